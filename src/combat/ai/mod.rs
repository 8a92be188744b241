//! Enemy steering: what each movement style does in patrol, chase, and attack.

mod flying;
mod ground;

use crate::combat::enemy::Enemy;
use crate::combat::resources::AiTuning;
use crate::movement::{Aabb, Facing};

pub use flying::FlyingSteering;
pub use ground::GroundSteering;

/// Read-only inputs shared by every steering call.
pub struct SteerContext<'a> {
    pub dt: f32,
    pub player: &'a Aabb,
    pub ai: &'a AiTuning,
}

pub trait Steerable {
    fn patrol(&self, enemy: &mut Enemy, ctx: &SteerContext);

    fn chase(&self, enemy: &mut Enemy, ctx: &SteerContext);

    fn attack(&self, enemy: &mut Enemy, _ctx: &SteerContext) {
        enemy.body.velocity.x = 0.0;
        enemy.try_start_attack();
    }
}

/// Walk between `start.x - patrol_range` and `start.x + patrol_range`,
/// turning at each bound. Between the bounds keep walking the way we face.
pub(crate) fn patrol_horizontal(enemy: &mut Enemy) {
    let x = enemy.body.position.x;
    let left = enemy.start.x - enemy.stats.patrol_range;
    let right = enemy.start.x + enemy.stats.patrol_range;

    if x <= left {
        enemy.body.facing = Facing::Right;
    } else if x >= right {
        enemy.body.facing = Facing::Left;
    }
    enemy.body.velocity.x = enemy.body.facing.sign() * enemy.stats.speed;
}

/// Move toward the player horizontally at `speed`.
pub(crate) fn pursue_horizontal(enemy: &mut Enemy, player: &Aabb, speed: f32) {
    enemy.body.facing = if player.x > enemy.body.position.x {
        Facing::Right
    } else {
        Facing::Left
    };
    enemy.body.velocity.x = enemy.body.facing.sign() * speed;
}
