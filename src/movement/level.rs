//! Movement domain: immutable level geometry.

use serde::Deserialize;

use crate::movement::body::Aabb;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryKind {
    LeftWall,
    RightWall,
    /// Below-map region; anything entering it dies.
    DeathZone,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Boundary {
    pub rect: Aabb,
    pub kind: BoundaryKind,
}

/// Platforms and boundaries, read-only once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Level {
    pub platforms: Vec<Aabb>,
    pub boundaries: Vec<Boundary>,
    pub width: f32,
    pub height: f32,
}

/// Serialized rectangle as it appears in tuning files.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
pub struct RectDef {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl From<RectDef> for Aabb {
    fn from(r: RectDef) -> Self {
        Aabb::new(r.x, r.y, r.w, r.h)
    }
}

/// Level layout loaded from tuning data.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct LevelDef {
    pub width: f32,
    pub height: f32,
    /// Platforms in resolution order. The first entry is the ground.
    pub platforms: Vec<RectDef>,
    pub boundaries: Vec<RectDef>,
}

impl Default for LevelDef {
    fn default() -> Self {
        let width = 3000.0;
        let height = 720.0;

        let rect = |x, y, w, h| RectDef { x, y, w, h };
        let platforms = vec![
            rect(0.0, 580.0, width, 40.0),
            // Starting area
            rect(200.0, 480.0, 150.0, 20.0),
            rect(430.0, 420.0, 150.0, 20.0),
            rect(680.0, 460.0, 180.0, 20.0),
            rect(960.0, 380.0, 150.0, 20.0),
            rect(1210.0, 440.0, 150.0, 20.0),
            rect(1460.0, 360.0, 180.0, 20.0),
            // High section
            rect(1740.0, 300.0, 150.0, 20.0),
            rect(1990.0, 360.0, 140.0, 20.0),
            // Raised floors leading to the boss
            rect(2230.0, 540.0, 180.0, 40.0),
            rect(2510.0, 500.0, 180.0, 40.0),
            rect(2790.0, 430.0, 120.0, 20.0),
        ];

        let boundaries = vec![
            RectDef {
                x: -50.0,
                y: 0.0,
                w: 50.0,
                h: height,
            },
            RectDef {
                x: width,
                y: 0.0,
                w: 50.0,
                h: height,
            },
            RectDef {
                x: 0.0,
                y: 650.0,
                w: width,
                h: 50.0,
            },
        ];

        Self {
            width,
            height,
            platforms,
            boundaries,
        }
    }
}

impl Level {
    /// Build a level, classifying each boundary rectangle. Rectangles whose
    /// top lies below `death_zone_y` are death zones; the rest are walls on
    /// whichever side of the level they sit.
    pub fn new(
        platforms: Vec<Aabb>,
        boundary_rects: Vec<Aabb>,
        width: f32,
        height: f32,
        death_zone_y: f32,
    ) -> Self {
        let boundaries = boundary_rects
            .into_iter()
            .map(|rect| {
                let kind = if rect.top() > death_zone_y {
                    BoundaryKind::DeathZone
                } else if rect.center().x < width * 0.5 {
                    BoundaryKind::LeftWall
                } else {
                    BoundaryKind::RightWall
                };
                Boundary { rect, kind }
            })
            .collect();

        Self {
            platforms,
            boundaries,
            width,
            height,
        }
    }

    pub fn from_def(def: &LevelDef, death_zone_y: f32) -> Self {
        Self::new(
            def.platforms.iter().copied().map(Aabb::from).collect(),
            def.boundaries.iter().copied().map(Aabb::from).collect(),
            def.width,
            def.height,
            death_zone_y,
        )
    }

    pub fn death_zones(&self) -> impl Iterator<Item = &Aabb> {
        self.boundaries
            .iter()
            .filter(|b| b.kind == BoundaryKind::DeathZone)
            .map(|b| &b.rect)
    }
}
