//! Flying steering: hover while patrolling, track the player in both axes.

use crate::combat::ai::{SteerContext, Steerable, patrol_horizontal, pursue_horizontal};
use crate::combat::enemy::Enemy;

pub struct FlyingSteering;

impl FlyingSteering {
    fn track_height(enemy: &mut Enemy, ctx: &SteerContext) {
        let target_y = ctx.player.y - ctx.ai.flying_hover_offset;
        let max = ctx.ai.flying_max_vertical_speed;
        enemy.body.velocity.y =
            ((target_y - enemy.body.position.y) * ctx.ai.flying_vertical_gain).clamp(-max, max);
    }
}

impl Steerable for FlyingSteering {
    fn patrol(&self, enemy: &mut Enemy, ctx: &SteerContext) {
        enemy.hover_time += ctx.dt;
        patrol_horizontal(enemy);

        let phase = (enemy.hover_time * ctx.ai.hover_rate * 60.0).to_radians();
        let target_y = enemy.start.y + ctx.ai.hover_amplitude * phase.cos();
        enemy.body.velocity.y = (target_y - enemy.body.position.y) * ctx.ai.hover_gain;
    }

    fn chase(&self, enemy: &mut Enemy, ctx: &SteerContext) {
        let horizontal = (ctx.player.x - enemy.body.position.x).abs();
        let below = ctx.player.y - enemy.body.position.y;

        if below > ctx.ai.flying_below_depth && horizontal < ctx.ai.flying_below_band {
            enemy.body.velocity.x = 0.0;
        } else {
            let speed = enemy.stats.speed * ctx.ai.flying_chase_multiplier;
            pursue_horizontal(enemy, ctx.player, speed);
        }
        Self::track_height(enemy, ctx);
    }

    fn attack(&self, enemy: &mut Enemy, _ctx: &SteerContext) {
        enemy.body.velocity.x = 0.0;
        enemy.body.velocity.y = 0.0;
        enemy.try_start_attack();
    }
}
