//! Combat domain: tuning for the player, each enemy kind, enemy AI, and spawning.
//!
//! Every struct deserializes with `#[serde(default)]`, so tuning files only
//! need to list the values they change.

use serde::Deserialize;

use crate::combat::enemy::EnemyKind;

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlayerTuning {
    pub width: f32,
    pub height: f32,
    pub spawn_x: f32,
    pub spawn_y: f32,
    pub max_health: i32,

    pub speed: f32,
    pub acceleration: f32,
    pub friction: f32,
    pub jump_force: f32,
    pub coyote_time: f32,
    pub jump_buffer_time: f32,
    /// Minimum landing speed that plays the landing cue.
    pub land_sound_speed: f32,

    pub attack_damage: i32,
    pub attack_duration: f32,
    pub attack_cooldown: f32,
    pub combo_window: f32,
    pub max_combo: u32,
    /// Extra damage per combo step past the first, in percent.
    pub combo_step_percent: i32,
    pub hitbox_width: f32,
    pub hitbox_height: f32,
    pub hitbox_offset_y: f32,

    pub special_hitbox_width: f32,
    pub special_hitbox_height: f32,
    pub dash_speed: f32,
    pub special_cooldown_multiplier: f32,
    pub special_damage_percent: i32,
    /// Used when the special clip has no frames to time against.
    pub special_duration: f32,

    /// Enemy bottom must be above `top + upward_margin` to trigger an upward strike.
    pub upward_margin: f32,
    /// Maximum centre-to-centre horizontal distance for an upward strike.
    pub upward_band: f32,
    pub upward_reach: f32,
    pub upward_height: f32,
    pub upward_extra_width: f32,

    pub hit_stun: f32,
    pub invulnerability: f32,
    pub knockback_x: f32,
    pub knockback_y: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            width: 64.0,
            height: 64.0,
            spawn_x: 100.0,
            spawn_y: 500.0,
            max_health: 100,
            speed: 400.0,
            acceleration: 2500.0,
            friction: 1800.0,
            jump_force: 700.0,
            coyote_time: 0.15,
            jump_buffer_time: 0.1,
            land_sound_speed: 200.0,
            attack_damage: 15,
            attack_duration: 0.3,
            attack_cooldown: 0.3,
            combo_window: 0.4,
            max_combo: 3,
            combo_step_percent: 20,
            hitbox_width: 60.0,
            hitbox_height: 40.0,
            hitbox_offset_y: 20.0,
            special_hitbox_width: 80.0,
            special_hitbox_height: 60.0,
            dash_speed: 600.0,
            special_cooldown_multiplier: 1.5,
            special_damage_percent: 150,
            special_duration: 0.25,
            upward_margin: 20.0,
            upward_band: 80.0,
            upward_reach: 60.0,
            upward_height: 80.0,
            upward_extra_width: 20.0,
            hit_stun: 0.2,
            invulnerability: 0.5,
            knockback_x: 200.0,
            knockback_y: 300.0,
        }
    }
}

/// Stat block for one enemy kind.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct EnemyStats {
    pub width: f32,
    pub height: f32,
    pub health: i32,
    pub speed: f32,
    pub attack_damage: i32,
    pub points: u32,
    pub attack_range: f32,
    pub detection_range: f32,
    /// Largest vertical distance at which the enemy still attacks.
    pub vertical_band: f32,
    pub patrol_range: f32,
    pub attack_duration: f32,
    pub attack_cooldown: f32,
    pub hitbox_width: f32,
    pub hitbox_height: f32,
    pub hitbox_offset_y: f32,
    pub hit_stun: f32,
    pub knockback: f32,
}

impl Default for EnemyStats {
    fn default() -> Self {
        Self {
            width: 48.0,
            height: 48.0,
            health: 50,
            speed: 150.0,
            attack_damage: 15,
            points: 100,
            attack_range: 80.0,
            detection_range: 300.0,
            vertical_band: 50.0,
            patrol_range: 200.0,
            attack_duration: 0.5,
            attack_cooldown: 2.0,
            hitbox_width: 60.0,
            hitbox_height: 40.0,
            hitbox_offset_y: 20.0,
            hit_stun: 0.15,
            knockback: 200.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct EnemyRoster {
    pub ground_basic: EnemyStats,
    pub ground_fast: EnemyStats,
    pub flying: EnemyStats,
    pub boss: EnemyStats,
}

impl Default for EnemyRoster {
    fn default() -> Self {
        let base = EnemyStats::default();
        Self {
            ground_fast: EnemyStats {
                health: 40,
                speed: 225.0,
                points: 120,
                ..base.clone()
            },
            flying: EnemyStats {
                width: 64.0,
                height: 64.0,
                ..base.clone()
            },
            boss: EnemyStats {
                width: 128.0,
                height: 128.0,
                health: 250,
                speed: 135.0,
                attack_damage: 27,
                points: 500,
                attack_range: 120.0,
                attack_duration: 0.65,
                attack_cooldown: 1.6,
                hitbox_width: 120.0,
                hitbox_height: 80.0,
                ..base.clone()
            },
            ground_basic: base,
        }
    }
}

impl EnemyRoster {
    pub fn stats(&self, kind: EnemyKind) -> &EnemyStats {
        match kind {
            EnemyKind::GroundBasic => &self.ground_basic,
            EnemyKind::GroundFast => &self.ground_fast,
            EnemyKind::Flying => &self.flying,
            EnemyKind::Boss => &self.boss,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct AiTuning {
    /// Knockback is multiplied by this every tick.
    pub knockback_decay: f32,
    pub knockback_snap: f32,

    /// Ground enemies stop chasing when the player is this close horizontally...
    pub overhead_band: f32,
    /// ...and at least this far above them.
    pub overhead_height: f32,

    pub flying_chase_multiplier: f32,
    /// Fliers aim for this far above the player.
    pub flying_hover_offset: f32,
    pub flying_vertical_gain: f32,
    pub flying_max_vertical_speed: f32,
    pub flying_below_band: f32,
    pub flying_below_depth: f32,

    pub hover_amplitude: f32,
    pub hover_rate: f32,
    pub hover_gain: f32,
}

impl Default for AiTuning {
    fn default() -> Self {
        Self {
            knockback_decay: 0.9,
            knockback_snap: 10.0,
            overhead_band: 40.0,
            overhead_height: 30.0,
            flying_chase_multiplier: 1.2,
            flying_hover_offset: 50.0,
            flying_vertical_gain: 3.0,
            flying_max_vertical_speed: 300.0,
            flying_below_band: 40.0,
            flying_below_depth: 60.0,
            hover_amplitude: 30.0,
            hover_rate: 2.0,
            hover_gain: 5.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
pub struct SpawnPoint {
    pub kind: EnemyKind,
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct SpawnTuning {
    pub ground_interval: f32,
    pub flying_interval: f32,
    /// Chance that a timed ground spawn is the fast variant.
    pub fast_chance: f64,
    pub ground_spawn_ahead: f32,
    pub ground_spawn_y: f32,
    pub flying_spawn_ahead: f32,
    pub flying_spawn_min_y: f32,
    pub flying_spawn_max_y: f32,
    pub max_enemies: usize,
    /// Canonical layout restored by every reset.
    pub initial: Vec<SpawnPoint>,
    /// Player x that wakes the boss. Negative disables the encounter.
    pub boss_trigger_x: f32,
    pub boss_spawn_x: f32,
    pub boss_spawn_y: f32,
}

impl Default for SpawnTuning {
    fn default() -> Self {
        let at = |kind, x, y| SpawnPoint { kind, x, y };
        Self {
            ground_interval: 5.0,
            flying_interval: 8.0,
            fast_chance: 0.3,
            ground_spawn_ahead: 800.0,
            ground_spawn_y: 500.0,
            flying_spawn_ahead: 900.0,
            flying_spawn_min_y: 200.0,
            flying_spawn_max_y: 400.0,
            max_enemies: 12,
            initial: vec![
                at(EnemyKind::GroundBasic, 400.0, 500.0),
                at(EnemyKind::GroundBasic, 700.0, 500.0),
                at(EnemyKind::GroundBasic, 1000.0, 500.0),
                at(EnemyKind::Flying, 600.0, 300.0),
                at(EnemyKind::Flying, 1200.0, 250.0),
            ],
            boss_trigger_x: 2200.0,
            boss_spawn_x: 2530.0,
            boss_spawn_y: 360.0,
        }
    }
}
