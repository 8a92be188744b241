//! Combat domain: player and enemy controllers, spawning, and hit resolution.

pub mod ai;
mod components;
mod enemy;
mod events;
mod feedback;
mod player;
mod resolution;
mod resources;
mod spawn;
mod timers;

#[cfg(test)]
mod tests;

use bevy::prelude::*;

use crate::core::GameSet;

pub use components::{AttackHitbox, ComboState, Health, OFF_WORLD};
pub use enemy::{AiState, Enemy, EnemyId, EnemyKind};
pub use events::{BossSpawnedEvent, EnemyDefeatedEvent, LifeLostEvent, PlayerHitEvent};
pub use feedback::{CombatFeedback, DamageNumber, DamageTier, EffectId, HitSpark};
pub use player::{Player, PlayerTimers};
pub use resolution::{
    COMBO_KILL_BONUS, CombatReport, Defeat, EnemyHit, PlayerHit, kill_score, resolve_combat,
};
pub use resources::{AiTuning, EnemyRoster, EnemyStats, PlayerTuning, SpawnPoint, SpawnTuning};
pub use spawn::{EnemyManager, ManagerReport};
pub use timers::CombatTimer;

pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<EnemyDefeatedEvent>()
            .add_message::<PlayerHitEvent>()
            .add_message::<LifeLostEvent>()
            .add_message::<BossSpawnedEvent>()
            .add_systems(
                Update,
                events::log_combat_messages.in_set(GameSet::Presentation),
            );
    }
}
