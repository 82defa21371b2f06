//! The battle service: resolves one exchange of blows.

use archon_protocol::{BattleSnapshot, EnemyState, ServiceKind, ServiceRequest, Stats};

use crate::ServiceHandler;

/// Resolves one combat turn.
///
/// The player strikes first for `max(1, attack - enemy.defense)`. If the
/// enemy is still standing it strikes back for
/// `max(1, enemy.attack - defense)`. Nothing else changes.
pub fn resolve_turn(mut player: Stats, mut enemy: EnemyState) -> BattleSnapshot {
    let dealt = player.attack.saturating_sub(enemy.defense).max(1);
    enemy.health = enemy.health.saturating_sub(dealt);
    if !enemy.is_defeated() {
        let taken = enemy.attack.saturating_sub(player.defense).max(1);
        player.health = player.health.saturating_sub(taken);
    }
    (player, enemy)
}

/// Stateless; every request is one [`resolve_turn`].
#[derive(Debug, Default, Clone, Copy)]
pub struct BattleService;

impl ServiceHandler for BattleService {
    type Request = ServiceRequest<BattleSnapshot>;
    type Reply = BattleSnapshot;
    const KIND: ServiceKind = ServiceKind::Battle;

    fn handle(&mut self, request: Self::Request) -> BattleSnapshot {
        let (player, enemy) = request.data;
        resolve_turn(player, enemy)
    }
}
