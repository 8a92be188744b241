//! Ground steering for walkers and the boss.

use crate::combat::ai::{SteerContext, Steerable, patrol_horizontal, pursue_horizontal};
use crate::combat::enemy::Enemy;

pub struct GroundSteering;

impl Steerable for GroundSteering {
    fn patrol(&self, enemy: &mut Enemy, _ctx: &SteerContext) {
        patrol_horizontal(enemy);
    }

    fn chase(&self, enemy: &mut Enemy, ctx: &SteerContext) {
        let horizontal = (ctx.player.x - enemy.body.position.x).abs();
        let above = enemy.body.position.y - ctx.player.y;

        // Player standing overhead: wait instead of jittering underneath.
        if above > ctx.ai.overhead_height && horizontal < ctx.ai.overhead_band {
            enemy.body.velocity.x = 0.0;
            return;
        }

        let speed = enemy.stats.speed;
        pursue_horizontal(enemy, ctx.player, speed);
    }
}
