//! Combat domain: enemy state and the per-tick enemy controller.

use bevy::prelude::*;
use serde::Deserialize;

use crate::audio::{AudioCues, SoundCue};
use crate::combat::ai::{SteerContext, Steerable};
use crate::combat::components::{AttackHitbox, Health};
use crate::combat::resources::{AiTuning, EnemyStats};
use crate::combat::timers::CombatTimer;
use crate::movement::{Aabb, Facing, KinematicBody, Level, MoveOptions, PhysicsTuning};
use crate::sprites::{AttackVariant, Animator, select_state};

/// Stable identity for an enemy across ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EnemyId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum EnemyKind {
    GroundBasic,
    GroundFast,
    Flying,
    Boss,
}

impl EnemyKind {
    pub fn is_flying(self) -> bool {
        self == EnemyKind::Flying
    }

    pub fn steering(self) -> &'static dyn Steerable {
        match self {
            EnemyKind::Flying => &crate::combat::ai::FlyingSteering,
            EnemyKind::GroundBasic | EnemyKind::GroundFast | EnemyKind::Boss => {
                &crate::combat::ai::GroundSteering
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AiState {
    #[default]
    Patrol,
    Chase,
    Attack,
}

#[derive(Debug, Clone)]
pub struct Enemy {
    pub id: EnemyId,
    pub kind: EnemyKind,
    pub stats: EnemyStats,
    pub body: KinematicBody,
    pub health: Health,
    pub ai_state: AiState,
    /// Patrol and hover anchor.
    pub start: Vec2,
    pub knockback_vx: f32,
    pub hover_time: f32,
    pub attack_timer: CombatTimer,
    pub attack_cooldown: CombatTimer,
    pub hit_stun: CombatTimer,
    pub hitbox: AttackHitbox,
    pub animator: Animator,
}

impl Enemy {
    pub fn new(
        id: EnemyId,
        kind: EnemyKind,
        position: Vec2,
        stats: EnemyStats,
        animator: Animator,
    ) -> Self {
        let mut body = KinematicBody::new(position, Vec2::new(stats.width, stats.height));
        body.facing = Facing::Left;
        body.velocity.x = -stats.speed;

        Self {
            id,
            kind,
            health: Health::new(stats.health),
            hitbox: AttackHitbox::new(Vec2::new(stats.hitbox_width, stats.hitbox_height)),
            stats,
            body,
            ai_state: AiState::Patrol,
            start: position,
            knockback_vx: 0.0,
            hover_time: 0.0,
            attack_timer: CombatTimer::default(),
            attack_cooldown: CombatTimer::default(),
            hit_stun: CombatTimer::default(),
            animator,
        }
    }

    pub fn is_attacking(&self) -> bool {
        self.attack_timer.is_active()
    }

    pub fn is_stunned(&self) -> bool {
        self.hit_stun.is_active()
    }

    pub fn is_dead(&self) -> bool {
        self.health.is_dead()
    }

    /// Begin an attack if the cooldown allows it.
    pub fn try_start_attack(&mut self) -> bool {
        if self.attack_cooldown.is_active() {
            return false;
        }
        self.attack_timer.start(self.stats.attack_duration);
        self.attack_cooldown.start(self.stats.attack_cooldown);
        true
    }

    /// State the AI wants given the player's body.
    pub fn evaluate_state(&self, player: &Aabb) -> AiState {
        let dx = (self.body.position.x - player.x).abs();
        let dy = (self.body.position.y - player.y).abs();

        if dx < self.stats.attack_range && dy < self.stats.vertical_band {
            AiState::Attack
        } else if dx < self.stats.detection_range {
            AiState::Chase
        } else {
            AiState::Patrol
        }
    }

    pub fn update(
        &mut self,
        dt: f32,
        player: &Aabb,
        level: &Level,
        physics: &PhysicsTuning,
        ai: &AiTuning,
    ) {
        self.attack_timer.tick(dt);
        self.attack_cooldown.tick(dt);
        self.hit_stun.tick(dt);

        self.ai_state = self.evaluate_state(player);

        self.knockback_vx *= ai.knockback_decay;
        if self.knockback_vx.abs() < ai.knockback_snap {
            self.knockback_vx = 0.0;
        }

        let flying = self.kind.is_flying();
        if self.is_stunned() {
            self.body.velocity.x = 0.0;
            if flying {
                self.body.velocity.y = 0.0;
            }
        } else {
            let steering = self.kind.steering();
            let ctx = SteerContext { dt, player, ai };
            match self.ai_state {
                AiState::Patrol => steering.patrol(self, &ctx),
                AiState::Chase => steering.chase(self, &ctx),
                AiState::Attack => steering.attack(self, &ctx),
            }
        }

        if !flying {
            self.body
                .integrate(dt, physics.gravity, physics.max_fall_speed);
        }

        let report = self.body.move_and_collide(
            dt,
            level,
            MoveOptions {
                extra_vx: self.knockback_vx,
                collide_platforms: !flying,
            },
        );

        if let Some(side) = report.blocked.or(report.wall) {
            self.body.facing = side.opposite();
            self.body.velocity.x = self.body.facing.sign() * self.stats.speed;
        }

        if report.entered_death_zone {
            self.health.kill();
        }

        if self.is_attacking() {
            let body = self.body.aabb();
            self.hitbox
                .place_forward(&body, self.body.facing, self.stats.hitbox_offset_y);
        } else {
            self.hitbox.park();
        }

        let attack = self.is_attacking().then_some(AttackVariant::Normal);
        let airborne = !self.body.grounded && !flying;
        self.animator
            .update(select_state(attack, airborne, self.body.velocity.x), dt);
    }

    /// Apply a hit. `direction` is the knockback sign (+1 pushes right).
    /// Returns true if the hit was fatal.
    pub fn take_damage(&mut self, amount: i32, direction: f32, audio: &mut dyn AudioCues) -> bool {
        self.health.take_damage(amount);
        self.hit_stun.start(self.stats.hit_stun);
        self.knockback_vx = direction.signum() * self.stats.knockback;

        if self.is_dead() {
            audio.play_sound(SoundCue::EnemyDeath, 1.0);
            if self.kind == EnemyKind::Boss {
                audio.play_sound(SoundCue::BossDefeat, 1.0);
            }
            true
        } else {
            audio.play_sound(SoundCue::EnemyHit, 1.0);
            false
        }
    }
}
