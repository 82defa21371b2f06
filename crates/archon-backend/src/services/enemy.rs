//! The enemy service: a fixed bestiary, sampled by biome.

use archon_protocol::{EnemyRequest, EnemyState, ServiceKind, ServiceRequest};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;

use crate::ServiceHandler;

/// One row of the bestiary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnemyTemplate {
    pub name: &'static str,
    pub health: i32,
    pub attack: i32,
    pub defense: i32,
    pub biome: &'static str,
}

impl EnemyTemplate {
    fn spawn(&self) -> EnemyState {
        EnemyState {
            name: self.name.to_string(),
            health: self.health,
            attack: self.attack,
            defense: self.defense,
            biome: self.biome.to_string(),
        }
    }
}

const fn enemy(
    name: &'static str,
    health: i32,
    attack: i32,
    defense: i32,
    biome: &'static str,
) -> EnemyTemplate {
    EnemyTemplate {
        name,
        health,
        attack,
        defense,
        biome,
    }
}

/// Every enemy the service knows.
pub static BESTIARY: [EnemyTemplate; 8] = [
    enemy("Goblin", 10, 3, 5, "fields"),
    enemy("Wolf", 12, 4, 3, "fields"),
    enemy("Scorpion", 10, 5, 1, "desert"),
    enemy("Bandit", 18, 6, 5, "desert"),
    enemy("Giant Spider", 20, 7, 4, "scorched"),
    enemy("Undead", 10, 6, 6, "scorched"),
    enemy("Knight", 20, 6, 10, "scorched"),
    enemy("Vagabond", 18, 10, 7, "scorched"),
];

/// Picks a uniformly random enemy native to the requested biome.
#[derive(Debug)]
pub struct EnemyService {
    rng: StdRng,
}

impl EnemyService {
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

    /// An enemy for `biome`. Biomes with no natives draw from the whole
    /// bestiary.
    pub fn spawn(&mut self, biome: &str) -> EnemyState {
        let natives: Vec<&EnemyTemplate> =
            BESTIARY.iter().filter(|e| e.biome == biome).collect();

        let picked = if natives.is_empty() {
            tracing::debug!(biome, "no natives, drawing from whole bestiary");
            BESTIARY.choose(&mut self.rng)
        } else {
            natives.choose(&mut self.rng).copied()
        };

        // BESTIARY is non-empty, so `picked` is always Some.
        picked.unwrap_or(&BESTIARY[0]).spawn()
    }
}

impl Default for EnemyService {
    fn default() -> Self {
        Self::new()
    }
}

impl ServiceHandler for EnemyService {
    type Request = ServiceRequest<EnemyRequest>;
    type Reply = EnemyState;
    const KIND: ServiceKind = ServiceKind::Enemy;

    fn handle(&mut self, request: Self::Request) -> EnemyState {
        self.spawn(&request.data.biome)
    }
}
