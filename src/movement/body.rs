//! Movement domain: axis-aligned boxes and the kinematic body shared by the
//! player and every enemy.
//!
//! World space is y-down with the box origin at its top-left corner. Render
//! code flips to Bevy's y-up space; nothing in here knows about Transforms.

use bevy::prelude::*;

use crate::movement::level::{BoundaryKind, Level};

/// Axis-aligned rectangle, origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Aabb {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Aabb {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// Strict overlap: boxes that only share an edge do not intersect.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

impl Facing {
    pub fn sign(self) -> f32 {
        match self {
            Facing::Right => 1.0,
            Facing::Left => -1.0,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Facing::Right => Facing::Left,
            Facing::Left => Facing::Right,
        }
    }

    /// Facing implied by a horizontal direction; `None` for zero.
    pub fn from_direction(dx: f32) -> Option<Self> {
        if dx > 0.0 {
            Some(Facing::Right)
        } else if dx < 0.0 {
            Some(Facing::Left)
        } else {
            None
        }
    }
}

/// Per-move knobs that differ between walkers and fliers.
#[derive(Debug, Clone, Copy)]
pub struct MoveOptions {
    /// Horizontal velocity added on top of the body's own this tick (knockback).
    pub extra_vx: f32,
    /// Flying bodies pass through platforms but still respect walls and the death zone.
    pub collide_platforms: bool,
}

impl Default for MoveOptions {
    fn default() -> Self {
        Self {
            extra_vx: 0.0,
            collide_platforms: true,
        }
    }
}

/// What happened during one `move_and_collide` call.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CollisionReport {
    /// Grounded this tick after being airborne last tick.
    pub landed: bool,
    /// Downward speed at the moment of landing.
    pub impact_speed: f32,
    pub hit_ceiling: bool,
    /// Side of the body that ran into a platform.
    pub blocked: Option<Facing>,
    /// Side of the body that was clamped by a level wall.
    pub wall: Option<Facing>,
    pub entered_death_zone: bool,
    /// Movement produced non-finite state and was discarded.
    pub rejected: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct KinematicBody {
    pub position: Vec2,
    pub velocity: Vec2,
    pub size: Vec2,
    pub facing: Facing,
    pub grounded: bool,
}

impl KinematicBody {
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            size,
            facing: Facing::Right,
            grounded: false,
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.position.x, self.position.y, self.size.x, self.size.y)
    }

    /// Apply gravity, clamping downward speed.
    pub fn integrate(&mut self, dt: f32, gravity: f32, max_fall_speed: f32) {
        self.velocity.y = (self.velocity.y + gravity * dt).min(max_fall_speed);
    }

    /// Move by velocity and resolve against the level.
    ///
    /// Horizontal displacement is resolved before vertical. Platforms are
    /// tested in storage order and only the first overlap on each axis is
    /// resolved. `grounded` is recomputed from scratch every call.
    pub fn move_and_collide(
        &mut self,
        dt: f32,
        level: &Level,
        options: MoveOptions,
    ) -> CollisionReport {
        let mut report = CollisionReport::default();
        let previous = self.position;
        let was_grounded = self.grounded;
        self.grounded = false;

        // Horizontal
        let vx = self.velocity.x + options.extra_vx;
        self.position.x += vx * dt;
        if options.collide_platforms && vx != 0.0 {
            let body = self.aabb();
            if let Some(platform) = level.platforms.iter().find(|p| body.intersects(p)) {
                if vx > 0.0 {
                    self.position.x = platform.left() - self.size.x;
                    report.blocked = Some(Facing::Right);
                } else {
                    self.position.x = platform.right();
                    report.blocked = Some(Facing::Left);
                }
                self.velocity.x = 0.0;
            }
        }

        // Walls clamp against their inner edge, so a body that ends up past
        // a wall (placed there, or tunnelled through) is pulled back inside.
        for boundary in &level.boundaries {
            let body = self.aabb();
            match boundary.kind {
                BoundaryKind::LeftWall if body.left() < boundary.rect.right() => {
                    self.position.x = boundary.rect.right();
                    self.velocity.x = self.velocity.x.max(0.0);
                    report.wall = Some(Facing::Left);
                }
                BoundaryKind::RightWall if body.right() > boundary.rect.left() => {
                    self.position.x = boundary.rect.left() - self.size.x;
                    self.velocity.x = self.velocity.x.min(0.0);
                    report.wall = Some(Facing::Right);
                }
                _ => {}
            }
        }

        // Vertical
        let vy = self.velocity.y;
        self.position.y += vy * dt;
        if options.collide_platforms && vy != 0.0 {
            let body = self.aabb();
            if let Some(platform) = level.platforms.iter().find(|p| body.intersects(p)) {
                if vy > 0.0 {
                    self.position.y = platform.top() - self.size.y;
                    self.grounded = true;
                    if !was_grounded {
                        report.landed = true;
                        report.impact_speed = vy;
                    }
                } else {
                    self.position.y = platform.bottom();
                    report.hit_ceiling = true;
                }
                self.velocity.y = 0.0;
            }
        }

        let body = self.aabb();
        report.entered_death_zone = level.death_zones().any(|zone| body.intersects(zone));

        if !self.position.is_finite() || !self.velocity.is_finite() {
            warn!(
                "Rejected non-finite body state {:?} / {:?}, restoring {:?}",
                self.position, self.velocity, previous
            );
            self.position = previous;
            self.velocity = Vec2::ZERO;
            self.grounded = was_grounded;
            report = CollisionReport {
                rejected: true,
                ..default()
            };
        }

        report
    }
}
