//! Movement domain: kinematic bodies, level geometry, and input sampling.

mod body;
mod level;
mod resources;
mod systems;


use bevy::prelude::*;

use crate::core::GameSet;

pub use body::{Aabb, CollisionReport, Facing, KinematicBody, MoveOptions};
pub use level::{Boundary, BoundaryKind, Level, LevelDef, RectDef};
pub use resources::{PhysicsTuning, PlayerInput};

pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlayerInput>()
            .add_systems(Update, systems::read_input.in_set(GameSet::Input));
    }
}
