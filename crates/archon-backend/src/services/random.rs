//! The d100 service.

use archon_protocol::{RandomRequest, Roll, ServiceKind};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::ServiceHandler;

/// Answers every `"roll"` with a uniform integer in 1..=100.
#[derive(Debug)]
pub struct RandomService {
    rng: StdRng,
}

impl RandomService {
    /// Seeded from the OS.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Repeatable rolls, for tests.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn roll(&mut self) -> Roll {
        let value = self.rng.random_range(1..=100u32);
        Roll::new(value).unwrap_or(Roll::NEUTRAL)
    }
}

impl Default for RandomService {
    fn default() -> Self {
        Self::new()
    }
}

impl ServiceHandler for RandomService {
    type Request = RandomRequest;
    type Reply = Roll;
    const KIND: ServiceKind = ServiceKind::Random;

    fn handle(&mut self, _request: RandomRequest) -> Roll {
        self.roll()
    }
}
