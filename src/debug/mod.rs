//! Debug domain: dev-tools overlay for tuning collision and combat.
//!
//! - F3 toggles gizmo outlines of bodies, attack hitboxes, platforms and death zones
//! - F4 toggles a text readout of the player and spawner
//! - Ctrl+I toggles invincibility

mod state;
mod systems;

pub use state::DebugState;

use bevy::prelude::*;

use crate::core::{GameSession, GameSet};
use crate::debug::systems::{
    apply_invincibility, draw_hitboxes, handle_debug_hotkeys, update_debug_info_overlay,
};

pub struct DebugPlugin;

impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DebugState>()
            .add_systems(
                Update,
                (
                    handle_debug_hotkeys,
                    apply_invincibility.run_if(resource_exists::<GameSession>),
                )
                    .chain()
                    .in_set(GameSet::Input),
            )
            .add_systems(
                Update,
                (
                    draw_hitboxes.run_if(|state: Res<DebugState>| state.show_hitboxes),
                    update_debug_info_overlay.run_if(|state: Res<DebugState>| state.show_info),
                )
                    .in_set(GameSet::Presentation)
                    .run_if(resource_exists::<GameSession>),
            );
    }
}
