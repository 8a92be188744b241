//! Combat domain: the player controller.
//!
//! One `update` call runs the whole per-tick pipeline: timers, input,
//! steering, physics, jump resolution, hitbox placement, animation.

use bevy::prelude::*;
use std::collections::HashSet;

use crate::audio::{AudioCues, SoundCue};
use crate::combat::components::{AttackHitbox, ComboState, Health};
use crate::combat::enemy::EnemyId;
use crate::combat::resources::PlayerTuning;
use crate::combat::timers::CombatTimer;
use crate::movement::{Aabb, Facing, KinematicBody, Level, MoveOptions, PhysicsTuning, PlayerInput};
use crate::sprites::{AnimationKey, Animator, AttackVariant, select_state};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayerTimers {
    pub attack: CombatTimer,
    pub attack_cooldown: CombatTimer,
    pub hit_stun: CombatTimer,
    pub invulnerable: CombatTimer,
    pub coyote: CombatTimer,
    pub jump_buffer: CombatTimer,
}

impl PlayerTimers {
    fn tick(&mut self, dt: f32) {
        self.attack.tick(dt);
        self.attack_cooldown.tick(dt);
        self.hit_stun.tick(dt);
        self.invulnerable.tick(dt);
        self.coyote.tick(dt);
        self.jump_buffer.tick(dt);
    }
}

#[derive(Debug, Clone)]
pub struct Player {
    pub body: KinematicBody,
    pub health: Health,
    pub combo: ComboState,
    pub timers: PlayerTimers,
    pub hitbox: AttackHitbox,
    /// Active attack, if any. Always `None` once the attack timer runs out.
    pub attack: Option<AttackVariant>,
    /// Damage dealt by the active attack.
    pub attack_damage: i32,
    /// Enemies already struck by the active attack.
    pub hit_enemies: HashSet<EnemyId>,
    pub animator: Animator,
    tuning: PlayerTuning,
    special_duration: f32,
}

impl Player {
    pub fn new(tuning: PlayerTuning, animator: Animator) -> Self {
        let special_duration = animator
            .clip_duration(AnimationKey::Attack(AttackVariant::Special))
            .unwrap_or(tuning.special_duration);

        Self {
            body: KinematicBody::new(
                Vec2::new(tuning.spawn_x, tuning.spawn_y),
                Vec2::new(tuning.width, tuning.height),
            ),
            health: Health::new(tuning.max_health),
            combo: ComboState::default(),
            timers: PlayerTimers::default(),
            hitbox: AttackHitbox::new(Vec2::new(tuning.hitbox_width, tuning.hitbox_height)),
            attack: None,
            attack_damage: tuning.attack_damage,
            hit_enemies: HashSet::new(),
            animator,
            tuning,
            special_duration,
        }
    }

    pub fn tuning(&self) -> &PlayerTuning {
        &self.tuning
    }

    pub fn special_duration(&self) -> f32 {
        self.special_duration
    }

    pub fn is_attacking(&self) -> bool {
        self.attack.is_some()
    }

    pub fn is_invulnerable(&self) -> bool {
        self.timers.invulnerable.is_active()
    }

    pub fn update(
        &mut self,
        dt: f32,
        input: &PlayerInput,
        level: &Level,
        physics: &PhysicsTuning,
        enemies: &[Aabb],
        audio: &mut dyn AudioCues,
    ) {
        self.timers.tick(dt);
        if self.is_attacking() && !self.timers.attack.is_active() {
            self.end_attack();
        }
        self.combo.tick(dt);

        self.buffer_jump(input);
        if input.attack_pressed {
            self.start_attack(audio);
        }
        if input.special_pressed {
            self.start_special(audio);
        }

        self.steer(dt, input.axis_x);

        let was_grounded = self.body.grounded;
        self.body
            .integrate(dt, physics.gravity, physics.max_fall_speed);
        let report = self.body.move_and_collide(dt, level, MoveOptions::default());

        if report.entered_death_zone {
            self.health.kill();
        }
        if report.landed && report.impact_speed > self.tuning.land_sound_speed {
            audio.play_sound(SoundCue::Land, 0.5);
        }

        if was_grounded && !self.body.grounded {
            self.timers.coyote.start(self.tuning.coyote_time);
        } else if self.body.grounded {
            self.timers.coyote.clear();
        }

        if self.timers.jump_buffer.is_active()
            && (self.body.grounded || self.timers.coyote.is_active())
        {
            self.jump(audio);
        }

        if self.is_attacking() {
            self.place_hitbox(enemies);
        }

        let key = select_state(self.attack, !self.body.grounded, self.body.velocity.x);
        self.animator.update(key, dt);
    }

    /// Queue a jump request. Called from `update`, and directly while hit
    /// pause freezes the simulation so the press is not lost.
    pub fn buffer_jump(&mut self, input: &PlayerInput) {
        if input.jump_pressed {
            self.timers.jump_buffer.start(self.tuning.jump_buffer_time);
        }
    }

    fn steer(&mut self, dt: f32, axis_x: f32) {
        let stunned = self.timers.hit_stun.is_active();

        if self.attack == Some(AttackVariant::Special) && !stunned {
            self.body.velocity.x = self.body.facing.sign() * self.tuning.dash_speed;
            return;
        }

        let axis = if stunned { 0.0 } else { axis_x.clamp(-1.0, 1.0) };
        if let Some(facing) = Facing::from_direction(axis) {
            self.body.facing = facing;
            let target = axis * self.tuning.speed;
            let step = self.tuning.acceleration * dt;
            let vx = self.body.velocity.x;
            self.body.velocity.x = if vx < target {
                (vx + step).min(target)
            } else {
                (vx - step).max(target)
            };
        } else {
            let step = self.tuning.friction * dt;
            let vx = self.body.velocity.x;
            self.body.velocity.x = if vx.abs() <= step {
                0.0
            } else {
                vx - vx.signum() * step
            };
        }
    }

    fn jump(&mut self, audio: &mut dyn AudioCues) {
        self.body.velocity.y = -self.tuning.jump_force;
        self.body.grounded = false;
        self.timers.coyote.clear();
        self.timers.jump_buffer.clear();
        audio.play_sound(SoundCue::Jump, 1.0);
    }

    /// Start a normal attack. Returns false when cooling down or mid-attack.
    pub fn start_attack(&mut self, audio: &mut dyn AudioCues) -> bool {
        if self.timers.attack_cooldown.is_active() || self.is_attacking() {
            return false;
        }

        self.attack = Some(AttackVariant::Normal);
        self.timers.attack.start(self.tuning.attack_duration);
        self.timers.attack_cooldown.start(self.tuning.attack_cooldown);
        self.hit_enemies.clear();

        let count = self
            .combo
            .register_attack(self.tuning.combo_window, self.tuning.max_combo);
        self.attack_damage = self
            .combo
            .scaled_damage(self.tuning.attack_damage, self.tuning.combo_step_percent);

        let step = count.clamp(1, 3) as u8;
        audio.play_sound(SoundCue::Attack(step), 1.0 + 0.1 * (step - 1) as f32);
        if count == 3 {
            audio.play_sound(SoundCue::Combo, 0.6);
        }
        true
    }

    /// Start the dash strike. Only allowed on the ground and between attacks.
    pub fn start_special(&mut self, audio: &mut dyn AudioCues) -> bool {
        if self.is_attacking() || !self.body.grounded {
            return false;
        }

        self.attack = Some(AttackVariant::Special);
        self.timers.attack.start(self.special_duration);
        self.timers.attack_cooldown.start(
            self.tuning.attack_cooldown * self.tuning.special_cooldown_multiplier,
        );
        self.hit_enemies.clear();
        self.attack_damage = self.tuning.attack_damage * self.tuning.special_damage_percent / 100;
        self.body.velocity.x = self.body.facing.sign() * self.tuning.dash_speed;

        audio.play_sound(SoundCue::ShadowStrike, 1.0);
        true
    }

    fn end_attack(&mut self) {
        self.attack = None;
        self.hitbox.park();
        if self.body.velocity.x.abs() > self.tuning.speed {
            self.body.velocity.x = 0.0;
        }
    }

    /// Redirect upward when an enemy hovers overhead, otherwise strike
    /// forward from the leading edge.
    fn place_hitbox(&mut self, enemies: &[Aabb]) {
        let body = self.body.aabb();
        let overhead = enemies.iter().any(|enemy| {
            enemy.bottom() < body.top() + self.tuning.upward_margin
                && (enemy.center().x - body.center().x).abs() < self.tuning.upward_band
        });

        if overhead {
            let width = self.hitbox.base_size().x + self.tuning.upward_extra_width;
            let x = match self.body.facing {
                Facing::Right => body.left(),
                Facing::Left => body.left() - self.tuning.upward_extra_width,
            };
            self.hitbox.rect = Aabb::new(
                x,
                body.top() - self.tuning.upward_reach,
                width,
                self.tuning.upward_height,
            );
        } else {
            let size = match self.attack {
                Some(AttackVariant::Special) => Vec2::new(
                    self.tuning.special_hitbox_width,
                    self.tuning.special_hitbox_height,
                ),
                _ => self.hitbox.base_size(),
            };
            self.hitbox.resize(size);
            self.hitbox
                .place_forward(&body, self.body.facing, self.tuning.hitbox_offset_y);
        }
    }

    /// Apply an enemy hit. Returns false if invulnerability absorbed it.
    pub fn take_damage(&mut self, amount: i32, audio: &mut dyn AudioCues) -> bool {
        if self.is_invulnerable() {
            return false;
        }

        self.health.take_damage(amount);
        self.timers.hit_stun.start(self.tuning.hit_stun);
        self.timers.invulnerable.start(self.tuning.invulnerability);
        self.body.velocity.x = self.body.facing.opposite().sign() * self.tuning.knockback_x;
        self.body.velocity.y = -self.tuning.knockback_y;

        audio.play_sound(SoundCue::PlayerHit, 1.0);
        true
    }

    /// Back to spawn with full health, as after losing a life.
    pub fn reset(&mut self) {
        let tuning = &self.tuning;
        self.body = KinematicBody::new(
            Vec2::new(tuning.spawn_x, tuning.spawn_y),
            Vec2::new(tuning.width, tuning.height),
        );
        self.health.restore();
        self.combo.reset();
        self.timers = PlayerTimers::default();
        self.attack = None;
        self.attack_damage = tuning.attack_damage;
        self.hit_enemies.clear();
        self.hitbox.park();
    }
}
