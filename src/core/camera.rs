//! Core domain: side-scrolling camera follow with screen shake.

use bevy::prelude::*;

/// Horizontal camera scroll in world units. `x` is the left edge of the view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraFollow {
    pub x: f32,
    pub shake_offset: f32,
    pub view_size: Vec2,
}

impl CameraFollow {
    pub fn new(view_size: Vec2) -> Self {
        Self {
            x: 0.0,
            shake_offset: 0.0,
            view_size,
        }
    }

    /// Centre the view on `target_x` without showing past either level edge.
    pub fn follow(&mut self, target_x: f32, level_width: f32) {
        let max_x = (level_width - self.view_size.x).max(0.0);
        self.x = (target_x - self.view_size.x * 0.5).clamp(0.0, max_x);
    }

    /// Left edge of the view including shake.
    pub fn view_left(&self) -> f32 {
        self.x + self.shake_offset
    }

    /// Bevy camera translation for the current view. World space is y-down,
    /// so the view's centre sits at negative y.
    pub fn translation(&self) -> Vec3 {
        Vec3::new(
            self.view_left() + self.view_size.x * 0.5,
            -self.view_size.y * 0.5,
            0.0,
        )
    }
}

/// Marker for the gameplay camera.
#[derive(Component)]
pub struct MainCamera;

pub(crate) fn setup_camera(mut commands: Commands) {
    commands.spawn((Name::new("MainCamera"), Camera2d, MainCamera));
}
