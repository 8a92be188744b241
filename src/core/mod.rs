//! Core domain: game states, the session resource, and the frame loop.

mod camera;
mod session;
mod state;
mod systems;


use bevy::prelude::*;

pub use camera::{CameraFollow, MainCamera};
pub use session::{GameSession, HitEffects, SessionStatus, SessionTuning, TickReport, sanitize_dt};
pub use state::{GameSet, GameState};

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            .configure_sets(
                Update,
                (GameSet::Input, GameSet::Simulation, GameSet::Presentation).chain(),
            )
            .add_systems(Startup, camera::setup_camera)
            .add_systems(
                Update,
                (
                    systems::start_session
                        .run_if(in_state(GameState::Menu).or(in_state(GameState::GameOver))),
                    systems::toggle_pause,
                )
                    .in_set(GameSet::Input),
            )
            .add_systems(
                Update,
                systems::advance_session
                    .in_set(GameSet::Simulation)
                    .run_if(in_state(GameState::Playing)),
            )
            .add_systems(
                Update,
                systems::sync_camera
                    .in_set(GameSet::Presentation)
                    .run_if(resource_exists::<GameSession>),
            );
    }
}
