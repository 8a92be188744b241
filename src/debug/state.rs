//! Debug domain: toggles for the dev overlay.

use bevy::prelude::*;

#[derive(Resource, Debug, Default)]
pub struct DebugState {
    /// Outline bodies, hitboxes, platforms, and death zones.
    pub show_hitboxes: bool,
    /// Text readout of player position, health, and enemy count.
    pub show_info: bool,
    /// Keeps the player at full health.
    pub invincible: bool,
}

/// Marker for the debug info text overlay
#[derive(Component, Debug)]
pub struct DebugInfoOverlay;
