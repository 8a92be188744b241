//! Movement domain: physics tuning and the per-frame input snapshot.

use bevy::prelude::*;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct PhysicsTuning {
    pub gravity: f32,
    pub max_fall_speed: f32,
    /// Boundary rectangles starting below this y are lethal.
    pub death_zone_y: f32,
    /// Longest step the simulation accepts in one tick.
    pub max_dt: f32,
}

impl Default for PhysicsTuning {
    fn default() -> Self {
        Self {
            gravity: 1500.0,
            max_fall_speed: 800.0,
            death_zone_y: 600.0,
            max_dt: 0.05,
        }
    }
}

/// Input sampled once per frame and handed to the player controller.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayerInput {
    /// -1 left, 1 right, 0 neither or both.
    pub axis_x: f32,
    pub jump_pressed: bool,
    pub attack_pressed: bool,
    pub special_pressed: bool,
}

impl PlayerInput {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn moving(axis_x: f32) -> Self {
        Self {
            axis_x,
            ..default()
        }
    }
}
