//! Combat domain: the enemy manager owns every live enemy and spawns new ones
//! on a timer ahead of the player.

use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::audio::{AudioCues, SoundCue};
use crate::combat::enemy::{Enemy, EnemyId, EnemyKind};
use crate::combat::resources::{AiTuning, EnemyRoster, SpawnTuning};
use crate::movement::{Aabb, Level, PhysicsTuning};
use crate::sprites::AnimationLibrary;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ManagerReport {
    pub spawned: Vec<(EnemyId, EnemyKind)>,
    pub boss_spawned: bool,
    /// Enemies removed this tick for reasons other than combat (death zone).
    pub culled: Vec<EnemyId>,
}

#[derive(Debug, Clone)]
pub struct EnemyManager {
    enemies: Vec<Enemy>,
    roster: EnemyRoster,
    tuning: SpawnTuning,
    library: AnimationLibrary,
    seed: u64,
    rng: ChaCha8Rng,
    next_id: u64,
    ground_timer: f32,
    flying_timer: f32,
    boss_spawned: bool,
}

impl EnemyManager {
    pub fn new(roster: EnemyRoster, tuning: SpawnTuning, library: AnimationLibrary, seed: u64) -> Self {
        let mut manager = Self {
            enemies: Vec::new(),
            roster,
            tuning,
            library,
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
            next_id: 0,
            ground_timer: 0.0,
            flying_timer: 0.0,
            boss_spawned: false,
        };
        manager.reset();
        manager
    }

    /// Clear everything and restore the canonical starting layout.
    pub fn reset(&mut self) {
        self.enemies.clear();
        self.rng = ChaCha8Rng::seed_from_u64(self.seed);
        self.next_id = 0;
        self.ground_timer = 0.0;
        self.flying_timer = 0.0;
        self.boss_spawned = false;

        let initial = self.tuning.initial.clone();
        for point in initial {
            self.spawn(point.kind, Vec2::new(point.x, point.y));
        }
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn enemies_mut(&mut self) -> &mut [Enemy] {
        &mut self.enemies
    }

    pub fn get_mut(&mut self, id: EnemyId) -> Option<&mut Enemy> {
        self.enemies.iter_mut().find(|e| e.id == id)
    }

    pub fn bodies(&self) -> Vec<Aabb> {
        self.enemies.iter().map(|e| e.body.aabb()).collect()
    }

    pub fn len(&self) -> usize {
        self.enemies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enemies.is_empty()
    }

    pub fn boss_spawned(&self) -> bool {
        self.boss_spawned
    }

    /// Add an enemy unless the population cap is reached.
    pub fn spawn(&mut self, kind: EnemyKind, position: Vec2) -> Option<EnemyId> {
        if self.enemies.len() >= self.tuning.max_enemies {
            debug!("Enemy cap reached, skipping {:?} spawn", kind);
            return None;
        }

        Some(self.insert(kind, position))
    }

    fn insert(&mut self, kind: EnemyKind, position: Vec2) -> EnemyId {
        let id = EnemyId(self.next_id);
        self.next_id += 1;
        self.enemies.push(Enemy::new(
            id,
            kind,
            position,
            self.roster.stats(kind).clone(),
            self.library.for_enemy(kind),
        ));
        debug!("Spawned {:?} {:?} at {:?}", kind, id, position);
        id
    }

    /// Keep a timed spawn inside the level's horizontal extent.
    fn spawn_x(&self, kind: EnemyKind, x: f32, level: &Level) -> f32 {
        let max_x = (level.width - self.roster.stats(kind).width).max(0.0);
        x.clamp(0.0, max_x)
    }

    pub fn update(
        &mut self,
        dt: f32,
        player: &Aabb,
        level: &Level,
        physics: &PhysicsTuning,
        ai: &AiTuning,
        audio: &mut dyn AudioCues,
    ) -> ManagerReport {
        let mut report = ManagerReport::default();

        self.ground_timer += dt;
        if self.ground_timer >= self.tuning.ground_interval {
            self.ground_timer = 0.0;
            let kind = if self.rng.random_bool(self.tuning.fast_chance.clamp(0.0, 1.0)) {
                EnemyKind::GroundFast
            } else {
                EnemyKind::GroundBasic
            };
            let x = self.spawn_x(kind, player.x + self.tuning.ground_spawn_ahead, level);
            let position = Vec2::new(x, self.tuning.ground_spawn_y);
            if let Some(id) = self.spawn(kind, position) {
                report.spawned.push((id, kind));
            }
        }

        self.flying_timer += dt;
        if self.flying_timer >= self.tuning.flying_interval {
            self.flying_timer = 0.0;
            let (min_y, max_y) = (self.tuning.flying_spawn_min_y, self.tuning.flying_spawn_max_y);
            let y = if max_y > min_y {
                self.rng.random_range(min_y..=max_y).round()
            } else {
                min_y
            };
            let x = self.spawn_x(EnemyKind::Flying, player.x + self.tuning.flying_spawn_ahead, level);
            let position = Vec2::new(x, y);
            if let Some(id) = self.spawn(EnemyKind::Flying, position) {
                report.spawned.push((id, EnemyKind::Flying));
            }
        }

        if !self.boss_spawned
            && self.tuning.boss_trigger_x >= 0.0
            && player.x >= self.tuning.boss_trigger_x
        {
            self.boss_spawned = true;
            let position = Vec2::new(self.tuning.boss_spawn_x, self.tuning.boss_spawn_y);
            // The boss ignores the population cap.
            let id = self.insert(EnemyKind::Boss, position);
            audio.play_sound(SoundCue::BossSpawn, 1.0);
            info!("Boss spawned at {:?}", position);
            report.spawned.push((id, EnemyKind::Boss));
            report.boss_spawned = true;
        }

        for enemy in &mut self.enemies {
            enemy.update(dt, player, level, physics, ai);
        }

        report.culled = self
            .enemies
            .iter()
            .filter(|e| e.is_dead())
            .map(|e| e.id)
            .collect();
        self.enemies.retain(|e| !e.is_dead());

        report
    }

    /// Drop the listed enemies. Called after a scan, never during one.
    pub fn remove_all(&mut self, ids: &[EnemyId]) {
        self.enemies.retain(|e| !ids.contains(&e.id));
    }
}
