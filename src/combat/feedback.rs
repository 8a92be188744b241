//! Combat domain: short-lived hit feedback, floating damage numbers and
//! spark bursts, spawned per landed hit and aged with the simulation.

use std::f32::consts::TAU;

use bevy::prelude::*;
use rand::Rng;

use crate::combat::resolution::EnemyHit;

pub const DAMAGE_NUMBER_LIFETIME: f32 = 0.8;
/// Initial upward speed; gravity pulls it back so the number slows as it rises.
const DAMAGE_NUMBER_RISE: f32 = 100.0;
const DAMAGE_NUMBER_GRAVITY: f32 = 300.0;
/// Hits at or above this are drawn as heavy.
const HEAVY_DAMAGE: i32 = 30;
/// Hits at or below this are drawn as light.
const LIGHT_DAMAGE: i32 = 5;

pub const SPARK_LIFETIME: f32 = 0.2;
const SPARK_PARTICLES: usize = 8;
const SPARK_SPEED: (f32, f32) = (100.0, 200.0);
/// Per-tick velocity retention.
const SPARK_FRICTION: f32 = 0.95;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EffectId(pub u64);

/// Visual weight of a damage number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageTier {
    Critical,
    Heavy,
    Normal,
    Light,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DamageNumber {
    pub id: EffectId,
    /// World-space anchor, centred horizontally on the struck enemy.
    pub position: Vec2,
    pub velocity_y: f32,
    pub damage: i32,
    pub critical: bool,
    pub age: f32,
}

impl DamageNumber {
    pub fn tier(&self) -> DamageTier {
        if self.critical {
            DamageTier::Critical
        } else if self.damage >= HEAVY_DAMAGE {
            DamageTier::Heavy
        } else if self.damage <= LIGHT_DAMAGE {
            DamageTier::Light
        } else {
            DamageTier::Normal
        }
    }

    /// 1.0 when spawned, falling to 0.0 at the end of its lifetime.
    pub fn fade(&self) -> f32 {
        (1.0 - self.age / DAMAGE_NUMBER_LIFETIME).clamp(0.0, 1.0)
    }

    pub fn is_alive(&self) -> bool {
        self.age < DAMAGE_NUMBER_LIFETIME
    }

    fn update(&mut self, dt: f32) {
        self.age += dt;
        self.position.y += self.velocity_y * dt;
        self.velocity_y += DAMAGE_NUMBER_GRAVITY * dt;
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SparkParticle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub size: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HitSpark {
    pub id: EffectId,
    pub particles: Vec<SparkParticle>,
    pub age: f32,
}

impl HitSpark {
    fn new(id: EffectId, origin: Vec2, rng: &mut impl Rng) -> Self {
        let particles = (0..SPARK_PARTICLES)
            .map(|_| {
                let angle = rng.random_range(0.0..TAU);
                let speed = rng.random_range(SPARK_SPEED.0..=SPARK_SPEED.1);
                SparkParticle {
                    position: origin,
                    velocity: Vec2::from_angle(angle) * speed,
                    size: rng.random_range(2..=4) as f32,
                }
            })
            .collect();

        Self {
            id,
            particles,
            age: 0.0,
        }
    }

    pub fn fade(&self) -> f32 {
        (1.0 - self.age / SPARK_LIFETIME).clamp(0.0, 1.0)
    }

    pub fn is_alive(&self) -> bool {
        self.age < SPARK_LIFETIME
    }

    fn update(&mut self, dt: f32) {
        self.age += dt;
        for particle in &mut self.particles {
            particle.position += particle.velocity * dt;
            particle.velocity *= SPARK_FRICTION;
        }
    }
}

/// Every live feedback effect in the session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CombatFeedback {
    damage_numbers: Vec<DamageNumber>,
    sparks: Vec<HitSpark>,
    next_id: u64,
}

impl CombatFeedback {
    pub fn damage_numbers(&self) -> &[DamageNumber] {
        &self.damage_numbers
    }

    pub fn sparks(&self) -> &[HitSpark] {
        &self.sparks
    }

    fn next_id(&mut self) -> EffectId {
        let id = EffectId(self.next_id);
        self.next_id += 1;
        id
    }

    /// A damage number above the struck enemy and a spark burst at its centre.
    pub fn spawn_hit(&mut self, hit: &EnemyHit, rng: &mut impl Rng) {
        let center = hit.target.center();

        let id = self.next_id();
        self.damage_numbers.push(DamageNumber {
            id,
            position: Vec2::new(center.x, hit.target.top()),
            velocity_y: -DAMAGE_NUMBER_RISE,
            damage: hit.damage,
            critical: hit.critical,
            age: 0.0,
        });

        let id = self.next_id();
        self.sparks.push(HitSpark::new(id, center, rng));
    }

    /// Age every effect and drop the expired ones.
    pub fn update(&mut self, dt: f32) {
        for number in &mut self.damage_numbers {
            number.update(dt);
        }
        for spark in &mut self.sparks {
            spark.update(dt);
        }
        self.damage_numbers.retain(DamageNumber::is_alive);
        self.sparks.retain(HitSpark::is_alive);
    }
}
