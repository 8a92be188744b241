//! Content domain: the aggregate tuning resource loaded at startup.

use bevy::prelude::*;
use serde::Deserialize;

use crate::combat::{AiTuning, EnemyRoster, PlayerTuning, SpawnTuning};
use crate::core::SessionTuning;
use crate::movement::{LevelDef, PhysicsTuning};

#[derive(Resource, Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct GameTuning {
    pub physics: PhysicsTuning,
    pub player: PlayerTuning,
    pub enemies: EnemyRoster,
    pub ai: AiTuning,
    pub spawning: SpawnTuning,
    pub session: SessionTuning,
    pub level: LevelDef,
}
