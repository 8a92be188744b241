//! Combat domain: countdown timers backing every cooldown, window, and grace period.

/// Non-negative countdown. Active while any time remains.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CombatTimer {
    remaining: f32,
}

impl CombatTimer {
    pub fn tick(&mut self, dt: f32) {
        self.remaining = (self.remaining - dt.max(0.0)).max(0.0);
    }

    pub fn start(&mut self, duration: f32) {
        self.remaining = duration.max(0.0);
    }

    pub fn clear(&mut self) {
        self.remaining = 0.0;
    }

    pub fn is_active(&self) -> bool {
        self.remaining > 0.0
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }
}
