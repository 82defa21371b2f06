//! Shared fixture: a session wired to in-process backends whose
//! availability and rolls the test controls.

#![allow(dead_code)]

use std::collections::{HashSet, VecDeque};
use std::sync::{Arc, Mutex};

use archon_backend::{
    BattleService, EnemyService, MapService, ServiceHandler, WeatherService, respond,
};
use archon_game::GameSession;
use archon_protocol::{JsonCodec, ServiceKind};
use archon_services::ServiceClients;
use archon_transport::{Direction, LocalChannel, TransportError};

/// What the fake backends do next.
#[derive(Default)]
struct Script {
    down: HashSet<ServiceKind>,
    rolls: VecDeque<u32>,
    calls: Vec<ServiceKind>,
}

/// Hands out sessions whose backends are controlled from the test.
///
/// Map, enemy, battle, and weather run the real reference handlers.
/// Rolls come from a queue; an empty queue rolls 100 (no encounter,
/// flee escapes).
#[derive(Clone, Default)]
pub struct Harness {
    script: Arc<Mutex<Script>>,
}

impl Harness {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> GameSession<LocalChannel> {
        GameSession::new(self.clients())
    }

    pub fn clients(&self) -> ServiceClients<LocalChannel> {
        ServiceClients::from_fn("archon-test", |kind| match kind {
            ServiceKind::Movement => self.serve(kind, MapService::test_map()),
            ServiceKind::Enemy => self.serve(kind, EnemyService::with_seed(17)),
            ServiceKind::Battle => self.serve(kind, BattleService),
            ServiceKind::Weather => self.serve(kind, WeatherService::with_seed(23)),
            ServiceKind::Random => self.rolls(),
        })
    }

    pub fn set_down(&self, kind: ServiceKind, down: bool) {
        let mut script = self.script.lock().unwrap();
        if down {
            script.down.insert(kind);
        } else {
            script.down.remove(&kind);
        }
    }

    pub fn push_rolls(&self, rolls: &[u32]) {
        self.script.lock().unwrap().rolls.extend(rolls);
    }

    /// Requests that reached `kind`, including ones answered as "down".
    pub fn calls(&self, kind: ServiceKind) -> usize {
        let script = self.script.lock().unwrap();
        script.calls.iter().filter(|k| **k == kind).count()
    }

    /// Records the call, then reports whether the service is down.
    fn hit(script: &Mutex<Script>, kind: ServiceKind) -> bool {
        let mut script = script.lock().unwrap();
        script.calls.push(kind);
        script.down.contains(&kind)
    }

    fn serve<H: ServiceHandler>(&self, kind: ServiceKind, mut handler: H) -> LocalChannel {
        let script = Arc::clone(&self.script);
        LocalChannel::new(format!("test:{kind}"), move |request: &[u8]| {
            if Self::hit(&script, kind) {
                return Err(TransportError::Timeout(Direction::Receive));
            }
            respond(&mut handler, &JsonCodec, request)
                .map_err(|e| TransportError::Channel(e.to_string()))
        })
    }

    fn rolls(&self) -> LocalChannel {
        let script = Arc::clone(&self.script);
        LocalChannel::new("test:random", move |_: &[u8]| {
            if Self::hit(&script, ServiceKind::Random) {
                return Err(TransportError::Timeout(Direction::Receive));
            }
            let roll = script.lock().unwrap().rolls.pop_front().unwrap_or(100);
            Ok(roll.to_string().into_bytes())
        })
    }
}
