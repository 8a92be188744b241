//! Core domain: game flow states and the frame's system ordering.

use bevy::prelude::*;

#[derive(States, Debug, Clone, Copy, Default, Eq, PartialEq, Hash)]
pub enum GameState {
    #[default]
    Menu,
    Playing,
    Paused,
    GameOver,
}

/// Stages of one frame, run in order: sample input, tick the simulation,
/// then mirror settled state to sprites, UI, camera, and audio.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum GameSet {
    Input,
    Simulation,
    Presentation,
}
