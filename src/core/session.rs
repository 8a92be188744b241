//! Core domain: the game session, one full playthrough from spawn to game over.
//!
//! [`GameSession::tick`] is the game loop body. Each call runs, in order:
//! feedback aging, player update, enemy manager update, combat resolution,
//! life bookkeeping, camera follow. Nothing outside the call mutates session state.

use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Deserialize;

use crate::audio::{AudioCues, SoundCue};
use crate::combat::{
    AiTuning, CombatFeedback, CombatReport, CombatTimer, EnemyManager, ManagerReport, Player,
    resolve_combat,
};
use crate::content::GameTuning;
use crate::core::camera::CameraFollow;
use crate::movement::{Level, PhysicsTuning, PlayerInput};
use crate::sprites::AnimationLibrary;

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct SessionTuning {
    pub lives: u32,
    /// Fixed seed for spawns and shake. Random per session when absent.
    pub seed: Option<u64>,
    pub view_width: f32,
    pub view_height: f32,
    pub hit_pause: f32,
    pub hit_shake_time: f32,
    pub hit_shake: f32,
    pub kill_shake: f32,
    pub player_hit_shake_time: f32,
    pub player_hit_shake: f32,
}

impl Default for SessionTuning {
    fn default() -> Self {
        Self {
            lives: 3,
            seed: None,
            view_width: 1280.0,
            view_height: 720.0,
            hit_pause: 0.05,
            hit_shake_time: 0.1,
            hit_shake: 3.0,
            kill_shake: 6.0,
            player_hit_shake_time: 0.2,
            player_hit_shake: 5.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HitEffects {
    /// Freezes the simulation briefly after a landed hit.
    pub hit_pause: CombatTimer,
    pub shake: CombatTimer,
    pub shake_intensity: f32,
}

impl HitEffects {
    fn shake(&mut self, duration: f32, intensity: f32) {
        self.shake.start(duration);
        self.shake_intensity = intensity;
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionStatus {
    #[default]
    Playing,
    GameOver,
}

/// Everything that happened in one tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    /// Non-finite or non-positive dt; nothing advanced.
    pub skipped: bool,
    /// Hit pause swallowed the tick.
    pub paused: bool,
    pub spawns: ManagerReport,
    pub combat: CombatReport,
    pub life_lost: bool,
    pub game_over: bool,
}

/// Clamp a frame delta into something the simulation can take.
pub fn sanitize_dt(dt: f32, max_dt: f32) -> Option<f32> {
    if !dt.is_finite() {
        warn!("Skipping tick with non-finite dt {}", dt);
        return None;
    }
    if dt <= 0.0 {
        return None;
    }
    Some(dt.min(max_dt))
}

#[derive(Resource, Debug, Clone)]
pub struct GameSession {
    pub player: Player,
    pub enemies: EnemyManager,
    pub level: Level,
    pub physics: PhysicsTuning,
    pub ai: AiTuning,
    pub tuning: SessionTuning,
    pub score: u32,
    pub lives: u32,
    pub camera: CameraFollow,
    pub effects: HitEffects,
    /// Damage numbers and hit sparks.
    pub feedback: CombatFeedback,
    pub status: SessionStatus,
    rng: ChaCha8Rng,
}

impl GameSession {
    pub fn new(tuning: &GameTuning, library: &AnimationLibrary, seed: u64) -> Self {
        let level = Level::from_def(&tuning.level, tuning.physics.death_zone_y);
        let session = tuning.session.clone();
        let mut camera = CameraFollow::new(Vec2::new(session.view_width, session.view_height));
        let player = Player::new(tuning.player.clone(), library.player.clone());
        camera.follow(player.body.aabb().center().x, level.width);

        Self {
            player,
            enemies: EnemyManager::new(
                tuning.enemies.clone(),
                tuning.spawning.clone(),
                library.clone(),
                seed,
            ),
            level,
            physics: tuning.physics.clone(),
            ai: tuning.ai.clone(),
            lives: session.lives,
            tuning: session,
            score: 0,
            camera,
            effects: HitEffects::default(),
            feedback: CombatFeedback::default(),
            status: SessionStatus::Playing,
            rng: ChaCha8Rng::seed_from_u64(seed.wrapping_add(1)),
        }
    }

    pub fn is_over(&self) -> bool {
        self.status == SessionStatus::GameOver
    }

    pub fn tick(
        &mut self,
        dt: f32,
        input: &PlayerInput,
        audio: &mut dyn AudioCues,
    ) -> TickReport {
        let mut report = TickReport::default();

        let Some(dt) = sanitize_dt(dt, self.physics.max_dt) else {
            report.skipped = true;
            return report;
        };
        if self.is_over() {
            report.skipped = true;
            return report;
        }

        self.effects.shake.tick(dt);
        if self.effects.hit_pause.is_active() {
            self.effects.hit_pause.tick(dt);
            self.player.buffer_jump(input);
            self.update_camera();
            report.paused = true;
            return report;
        }

        self.feedback.update(dt);

        let bodies = self.enemies.bodies();
        self.player
            .update(dt, input, &self.level, &self.physics, &bodies, audio);

        let player_body = self.player.body.aabb();
        report.spawns = self.enemies.update(
            dt,
            &player_body,
            &self.level,
            &self.physics,
            &self.ai,
            audio,
        );

        report.combat = resolve_combat(&mut self.player, &mut self.enemies, audio);
        self.score += report.combat.score;
        self.apply_effects(&report.combat);

        if self.player.health.is_dead() {
            self.lose_life(audio);
            report.life_lost = true;
            report.game_over = self.is_over();
        }

        self.update_camera();
        report
    }

    fn apply_effects(&mut self, combat: &CombatReport) {
        for hit in &combat.enemy_hits {
            let intensity = if hit.killed {
                self.tuning.kill_shake
            } else {
                self.tuning.hit_shake
            };
            self.effects.shake(self.tuning.hit_shake_time, intensity);
            self.effects.hit_pause.start(self.tuning.hit_pause);
            self.feedback.spawn_hit(hit, &mut self.rng);
        }
        if !combat.player_hits.is_empty() {
            self.effects
                .shake(self.tuning.player_hit_shake_time, self.tuning.player_hit_shake);
        }
    }

    fn lose_life(&mut self, audio: &mut dyn AudioCues) {
        self.lives = self.lives.saturating_sub(1);
        if self.lives == 0 {
            self.status = SessionStatus::GameOver;
            audio.play_sound(SoundCue::GameOver, 1.0);
            audio.stop_music();
            info!("Game over with score {}", self.score);
        } else {
            self.player.reset();
        }
    }

    fn update_camera(&mut self) {
        let target = self.player.body.aabb().center().x;
        self.camera.follow(target, self.level.width);

        self.camera.shake_offset = if self.effects.shake.is_active() {
            let amount = self.effects.shake_intensity.round().max(0.0) as i32;
            self.rng.random_range(-amount..=amount) as f32
        } else {
            0.0
        };
    }
}
