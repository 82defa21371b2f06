//! The weather service.

use archon_protocol::{ServiceKind, Weather, WeatherReply, WeatherRequest};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;

use crate::ServiceHandler;

/// Reports a uniformly random weather label on every request.
#[derive(Debug)]
pub struct WeatherService {
    rng: StdRng,
}

impl WeatherService {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn forecast(&mut self) -> Weather {
        Weather::ALL
            .choose(&mut self.rng)
            .copied()
            .unwrap_or_default()
    }
}

impl Default for WeatherService {
    fn default() -> Self {
        Self::new()
    }
}

impl ServiceHandler for WeatherService {
    type Request = WeatherRequest;
    type Reply = WeatherReply;
    const KIND: ServiceKind = ServiceKind::Weather;

    fn handle(&mut self, _request: WeatherRequest) -> WeatherReply {
        WeatherReply {
            weather_state: self.forecast(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forecast_covers_several_labels() {
        let mut service = WeatherService::with_seed(9);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            seen.insert(service.forecast());
        }
        assert!(seen.len() > 1);
        assert!(seen.iter().all(|w| Weather::ALL.contains(w)));
    }
}
