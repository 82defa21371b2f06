//! `GameSession`: the one object that owns a game's state.
//!
//! Every player action is a method here. Each one checks the phase,
//! makes at most a couple of sequential service calls, and folds the
//! (fallback-safe) replies into state. The presentation layer only ever
//! reads state back through the query methods.

use archon_protocol::{EnemyState, TileInfo, Weather};
use archon_services::{MoveOutcome, ServiceClients};
use archon_transport::Channel;

use crate::item::{self, Item};
use crate::save::SaveRecord;
use crate::{Direction, GameError, GamePhase, PlayerState};

/// Successful moves between weather refreshes.
pub const WEATHER_INTERVAL: u32 = 5;

/// A roll at or above this escapes a fight.
pub const FLEE_THRESHOLD: u8 = 50;

const START_NARRATION: &str = "You stand at the edge of the known world. Step out to see where you are.";
const START_INSPECTION: &str = "There is nothing here yet but the road ahead.";

/// How an attack turn ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleOutcome {
    /// The enemy fell; back to exploring.
    Victory,
    /// The player fell; the session is over until a load or reset.
    Defeat,
    /// Both still standing.
    Ongoing,
}

/// How a flee attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FleeOutcome {
    Escaped,
    /// Still in battle, and flee is blocked until the next attack.
    Failed,
}

/// One game in progress.
pub struct GameSession<C: Channel> {
    clients: ServiceClients<C>,
    phase: GamePhase,
    player: PlayerState,
    tile: TileInfo,
    enemy: EnemyState,
    weather: Weather,
    moves_until_weather: u32,
    flee_blocked: bool,
}

impl<C: Channel> GameSession<C> {
    /// A fresh game with default player, tile, enemy, and weather.
    pub fn new(clients: ServiceClients<C>) -> Self {
        Self {
            clients,
            phase: GamePhase::Exploring,
            player: PlayerState::default(),
            tile: start_tile(),
            enemy: EnemyState::default(),
            weather: Weather::default(),
            moves_until_weather: WEATHER_INTERVAL,
            flee_blocked: false,
        }
    }

    /// A game restored from `raw` save data, or a fresh one when there
    /// is no usable save.
    pub fn from_save(clients: ServiceClients<C>, raw: Option<&str>) -> Self {
        let mut session = Self::new(clients);
        if !session.load(raw) {
            tracing::info!("no usable save, starting a new game");
        }
        session
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn tile(&self) -> &TileInfo {
        &self.tile
    }

    pub fn enemy(&self) -> &EnemyState {
        &self.enemy
    }

    pub fn weather(&self) -> Weather {
        self.weather
    }

    pub fn moves_until_weather(&self) -> u32 {
        self.moves_until_weather
    }

    pub fn narration(&self) -> &str {
        &self.tile.narration
    }

    pub fn inspection(&self) -> &str {
        &self.tile.inspection
    }

    /// Multi-line stats readout for the stats screen.
    pub fn stats_summary(&self) -> String {
        let p = &self.player;
        format!(
            "Name: {}\nHealth: {}\nMana: {}\nAttack: {}\nDefense: {}\nPosition: {}",
            p.name, p.stats.health, p.stats.mana, p.stats.attack, p.stats.defense, p.position
        )
    }

    pub fn inventory_names(&self) -> Vec<&'static str> {
        self.player.inventory_names()
    }

    /// `true` after a failed flee, until the next attack or the battle
    /// ends.
    pub fn flee_blocked(&self) -> bool {
        self.flee_blocked
    }

    // -----------------------------------------------------------------------
    // Exploring
    // -----------------------------------------------------------------------

    /// Steps one tile in `direction`.
    ///
    /// Only a `Moved` outcome changes the position and counts toward the
    /// next weather refresh. Every outcome replaces the tile. Follow with
    /// [`encounter_check`](Self::encounter_check).
    pub async fn move_player(&mut self, direction: Direction) -> Result<MoveOutcome, GameError> {
        self.require(GamePhase::Exploring, "move")?;

        let destination = direction.step(self.player.position.coords);
        let outcome = self
            .clients
            .movement
            .request_move(&self.player.position.map, destination)
            .await;

        self.tile = outcome.tile().clone();
        if outcome.is_moved() {
            self.player.position.coords = destination;
            tracing::info!(%direction, position = %self.player.position, "moved");
            self.tick_weather().await;
        } else {
            tracing::info!(%direction, "move refused");
        }
        Ok(outcome)
    }

    /// Re-reads the tile under the player without moving.
    ///
    /// Does not touch the weather countdown. Allowed in every phase.
    pub async fn refresh_tile(&mut self) -> MoveOutcome {
        let outcome = self
            .clients
            .movement
            .request_move(&self.player.position.map, self.player.position.coords)
            .await;
        self.tile = outcome.tile().clone();
        outcome
    }

    /// Rolls against the tile's encounter chance and starts a battle on a
    /// hit. A roll equal to the chance is a hit.
    pub async fn encounter_check(&mut self) -> Result<bool, GameError> {
        self.require(GamePhase::Exploring, "search for enemies")?;

        let roll = self.clients.random.roll().await;
        let hit = roll.value() <= self.tile.encounter.value();
        tracing::debug!(
            roll = roll.value(),
            chance = self.tile.encounter.value(),
            hit,
            "encounter check"
        );
        if hit {
            self.enter_battle().await?;
        }
        Ok(hit)
    }

    /// Enters (or re-enters) battle.
    ///
    /// A live enemy is kept; otherwise one is fetched for the current
    /// biome. If the enemy service is down the previous enemy stays.
    pub async fn enter_battle(&mut self) -> Result<(), GameError> {
        if self.phase.is_over() {
            return Err(self.invalid("enter battle"));
        }

        if self.enemy.is_defeated() {
            self.enemy = self
                .clients
                .enemy
                .fetch(&self.tile.biome, &self.enemy)
                .await;
        }
        if self.phase != GamePhase::InBattle {
            self.flee_blocked = false;
        }
        self.phase = GamePhase::InBattle;
        tracing::info!(enemy = %self.enemy.name, health = self.enemy.health, "battle started");
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Battle
    // -----------------------------------------------------------------------

    /// Resolves one exchange of blows.
    pub async fn attack(&mut self) -> Result<BattleOutcome, GameError> {
        self.require(GamePhase::InBattle, "attack")?;

        let (stats, foe) = self
            .clients
            .battle
            .resolve(&self.player.stats, &self.enemy)
            .await;
        self.player.stats.health = stats.health;
        self.enemy.health = foe.health;
        self.flee_blocked = false;

        let outcome = if self.enemy.is_defeated() {
            self.phase = GamePhase::Exploring;
            BattleOutcome::Victory
        } else if !self.player.is_alive() {
            self.phase = GamePhase::GameOver;
            BattleOutcome::Defeat
        } else {
            BattleOutcome::Ongoing
        };

        tracing::info!(
            ?outcome,
            player_health = self.player.stats.health,
            enemy_health = self.enemy.health,
            "attack resolved"
        );
        Ok(outcome)
    }

    /// Tries to run. Succeeds on a roll of [`FLEE_THRESHOLD`] or more.
    ///
    /// # Errors
    /// [`GameError::FleeBlocked`] right after a failed attempt.
    pub async fn flee(&mut self) -> Result<FleeOutcome, GameError> {
        self.require(GamePhase::InBattle, "flee")?;
        if self.flee_blocked {
            return Err(GameError::FleeBlocked);
        }

        let roll = self.clients.random.roll().await;
        if roll.value() >= FLEE_THRESHOLD {
            self.enemy.health = 0;
            self.phase = GamePhase::Exploring;
            tracing::info!(roll = roll.value(), "fled");
            Ok(FleeOutcome::Escaped)
        } else {
            self.flee_blocked = true;
            tracing::info!(roll = roll.value(), "flee failed");
            Ok(FleeOutcome::Failed)
        }
    }

    // -----------------------------------------------------------------------
    // Inventory
    // -----------------------------------------------------------------------

    /// Picks up `item` and applies its equip effects.
    pub fn add_item(&mut self, item: &'static Item) -> Result<(), GameError> {
        self.require(GamePhase::Exploring, "pick up items")?;
        item::apply_effects(item.on_equip, &mut self.player.stats);
        self.player.inventory.push(item);
        tracing::debug!(item = item.name, "item added");
        Ok(())
    }

    /// Drops the first held item called `name` and applies its remove
    /// effects.
    pub fn remove_item(&mut self, name: &str) -> Result<&'static Item, GameError> {
        self.require(GamePhase::Exploring, "drop items")?;
        self.take_item(name)
    }

    /// Applies a consumable's effects, then removes it.
    pub fn use_item(&mut self, name: &str) -> Result<(), GameError> {
        self.require(GamePhase::Exploring, "use items")?;

        let index = self
            .player
            .find_item(name)
            .ok_or_else(|| GameError::ItemNotHeld(name.to_string()))?;
        let item = self.player.inventory[index];
        if !item.consumable {
            return Err(GameError::NotConsumable(item.name.to_string()));
        }

        item::apply_effects(item.on_apply, &mut self.player.stats);
        self.take_item(name)?;
        tracing::info!(item = item.name, "item used");
        Ok(())
    }

    fn take_item(&mut self, name: &str) -> Result<&'static Item, GameError> {
        let index = self
            .player
            .find_item(name)
            .ok_or_else(|| GameError::ItemNotHeld(name.to_string()))?;
        let item = self.player.inventory.remove(index);
        item::apply_effects(item.on_remove, &mut self.player.stats);
        tracing::debug!(item = item.name, "item removed");
        Ok(item)
    }

    // -----------------------------------------------------------------------
    // Lifecycle
    // -----------------------------------------------------------------------

    /// Starts over: default player, tile, enemy, and weather.
    pub fn reset(&mut self) {
        self.restore(PlayerState::default());
        tracing::info!("new game");
    }

    /// The current player as a save record.
    pub fn save(&self) -> SaveRecord {
        SaveRecord::from_player(&self.player)
    }

    pub fn save_json(&self) -> Result<String, GameError> {
        Ok(self.save().to_json()?)
    }

    /// Replaces the game with the one in `raw`.
    ///
    /// Returns `false` and changes nothing when `raw` is absent, blank,
    /// or malformed.
    pub fn load(&mut self, raw: Option<&str>) -> bool {
        let Some(record) = raw.and_then(SaveRecord::parse) else {
            return false;
        };
        self.restore(record.into_player());
        tracing::info!(name = %self.player.name, position = %self.player.position, "game loaded");
        true
    }

    fn restore(&mut self, player: PlayerState) {
        self.player = player;
        self.phase = GamePhase::Exploring;
        self.tile = start_tile();
        self.enemy = EnemyState::default();
        self.weather = Weather::default();
        self.moves_until_weather = WEATHER_INTERVAL;
        self.flee_blocked = false;
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    async fn tick_weather(&mut self) {
        self.moves_until_weather = self.moves_until_weather.saturating_sub(1);
        if self.moves_until_weather == 0 {
            self.weather = self.clients.weather.refresh(self.weather).await;
            self.moves_until_weather = WEATHER_INTERVAL;
            tracing::info!(weather = %self.weather, "weather changed");
        }
    }

    fn require(&self, phase: GamePhase, action: &'static str) -> Result<(), GameError> {
        if self.phase == phase {
            Ok(())
        } else {
            Err(self.invalid(action))
        }
    }

    fn invalid(&self, action: &'static str) -> GameError {
        GameError::InvalidPhase {
            action,
            phase: self.phase,
        }
    }
}

fn start_tile() -> TileInfo {
    TileInfo::inert(START_NARRATION, START_INSPECTION)
}
