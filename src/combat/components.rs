//! Combat domain: health, combo tracking, and attack hitboxes.

use bevy::prelude::*;

use crate::combat::timers::CombatTimer;
use crate::movement::{Aabb, Facing};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Health {
    pub current: i32,
    pub max: i32,
}

impl Health {
    pub fn new(max: i32) -> Self {
        Self { current: max, max }
    }

    /// Subtract damage, flooring at zero. Returns the amount actually removed.
    pub fn take_damage(&mut self, amount: i32) -> i32 {
        let actual = amount.max(0).min(self.current);
        self.current -= actual;
        actual
    }

    pub fn kill(&mut self) {
        self.current = 0;
    }

    pub fn restore(&mut self) {
        self.current = self.max;
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0
    }

    pub fn percent(&self) -> f32 {
        if self.max <= 0 {
            return 0.0;
        }
        self.current as f32 / self.max as f32
    }
}

/// Consecutive-attack counter with its expiry window.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ComboState {
    pub count: u32,
    pub window: CombatTimer,
}

impl ComboState {
    pub fn tick(&mut self, dt: f32) {
        self.window.tick(dt);
        if !self.window.is_active() {
            self.count = 0;
        }
    }

    /// Count a new attack and restart the window. Returns the new count.
    pub fn register_attack(&mut self, window: f32, max_combo: u32) -> u32 {
        if self.window.is_active() && self.count < max_combo {
            self.count += 1;
        } else {
            self.count = 1;
        }
        self.window.start(window);
        self.count
    }

    /// `base` scaled by `step_percent` per combo step past the first, floored.
    pub fn scaled_damage(&self, base: i32, step_percent: i32) -> i32 {
        let steps = self.count.saturating_sub(1) as i32;
        base * (100 + step_percent * steps) / 100
    }

    pub fn reset(&mut self) {
        self.count = 0;
        self.window.clear();
    }
}

/// Where an inactive hitbox is parked so nothing can overlap it.
pub const OFF_WORLD: Vec2 = Vec2::new(-1000.0, -1000.0);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttackHitbox {
    pub rect: Aabb,
    base_size: Vec2,
}

impl AttackHitbox {
    pub fn new(size: Vec2) -> Self {
        let mut hitbox = Self {
            rect: Aabb::default(),
            base_size: size,
        };
        hitbox.park();
        hitbox
    }

    pub fn base_size(&self) -> Vec2 {
        self.base_size
    }

    pub fn resize(&mut self, size: Vec2) {
        self.rect.width = size.x;
        self.rect.height = size.y;
    }

    /// Move off-world and restore the default size.
    pub fn park(&mut self) {
        self.rect = Aabb::new(OFF_WORLD.x, OFF_WORLD.y, self.base_size.x, self.base_size.y);
    }

    pub fn is_parked(&self) -> bool {
        self.rect.x == OFF_WORLD.x && self.rect.y == OFF_WORLD.y
    }

    /// Place flush against the leading edge of `body`, `offset_y` below its top.
    pub fn place_forward(&mut self, body: &Aabb, facing: Facing, offset_y: f32) {
        self.rect.x = if facing == Facing::Right {
            body.right()
        } else {
            body.left() - self.rect.width
        };
        self.rect.y = body.top() + offset_y;
    }
}
