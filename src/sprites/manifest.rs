//! Sprite manifest loading and the frame provider behind every animation.
//!
//! The manifest maps logical sheet ids to image paths. Clip geometry (frame
//! size, count, timing) is fixed per character in [`CharacterSprite::clips`];
//! a character with any unloadable sheet renders as a placeholder.

use bevy::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::combat::EnemyKind;
use crate::sprites::animation::{
    Animation, AnimationKey, AnimationPlayer, AnimationSet, Animator, AttackVariant,
};

pub const MANIFEST_PATH: &str = "assets/sprites/manifest.json";

/// One frame of a sprite sheet.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FrameHandle {
    pub image: Handle<Image>,
    pub layout: Handle<TextureAtlasLayout>,
    pub index: usize,
}

/// Horizontal strip geometry: `count` square frames of `frame_size` pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameGeometry {
    pub frame_size: u32,
    pub count: usize,
}

#[derive(Debug)]
pub struct AssetError {
    pub sheet: String,
    pub message: String,
}

impl std::fmt::Display for AssetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to load sheet {}: {}", self.sheet, self.message)
    }
}

/// Supplies frame handles for a logical sheet id.
pub trait AssetProvider {
    fn load_frames(
        &mut self,
        sheet: &str,
        geometry: FrameGeometry,
    ) -> Result<Vec<FrameHandle>, AssetError>;
}

/// Resource listing every known sprite sheet.
#[derive(Resource, Debug, Default)]
pub struct SpriteManifest {
    pub version: u32,
    /// Sheet id to image path, relative to assets/.
    pub sheets: HashMap<String, String>,
}

#[derive(Deserialize)]
struct ManifestJson {
    version: u32,
    sheets: HashMap<String, String>,
}

impl SpriteManifest {
    pub fn from_json(contents: &str) -> Result<Self, serde_json::Error> {
        let manifest: ManifestJson = serde_json::from_str(contents)?;
        Ok(Self {
            version: manifest.version,
            sheets: manifest.sheets,
        })
    }

    /// Load from disk. A missing or malformed manifest leaves it empty.
    pub fn load_from_file(&mut self, path: &str) {
        let manifest_path = Path::new(path);

        if !manifest_path.exists() {
            warn!(
                "Sprite manifest not found at {:?}, every character renders as a placeholder",
                path
            );
            return;
        }

        let contents = match fs::read_to_string(manifest_path) {
            Ok(c) => c,
            Err(e) => {
                error!("Failed to read sprite manifest: {}", e);
                return;
            }
        };

        match Self::from_json(&contents) {
            Ok(manifest) => *self = manifest,
            Err(e) => {
                error!("Failed to parse sprite manifest: {}", e);
                return;
            }
        }

        info!(
            "Loaded sprite manifest v{} with {} sheets",
            self.version,
            self.sheets.len()
        );
    }
}

/// Loads sheets through the asset server, slicing each into an atlas.
pub struct SheetProvider<'a> {
    pub manifest: &'a SpriteManifest,
    pub asset_server: &'a AssetServer,
    pub layouts: &'a mut Assets<TextureAtlasLayout>,
}

impl AssetProvider for SheetProvider<'_> {
    fn load_frames(
        &mut self,
        sheet: &str,
        geometry: FrameGeometry,
    ) -> Result<Vec<FrameHandle>, AssetError> {
        let path = self.manifest.sheets.get(sheet).ok_or_else(|| AssetError {
            sheet: sheet.to_string(),
            message: "not listed in manifest".to_string(),
        })?;

        if !Path::new("assets").join(path).exists() {
            return Err(AssetError {
                sheet: sheet.to_string(),
                message: format!("file {} does not exist", path),
            });
        }

        let image: Handle<Image> = self.asset_server.load(path.clone());
        let layout = self.layouts.add(TextureAtlasLayout::from_grid(
            UVec2::splat(geometry.frame_size),
            geometry.count as u32,
            1,
            None,
            None,
        ));

        Ok((0..geometry.count)
            .map(|index| FrameHandle {
                image: image.clone(),
                layout: layout.clone(),
                index,
            })
            .collect())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipSpec {
    pub sheet: &'static str,
    pub geometry: FrameGeometry,
    pub frame_duration: f32,
    pub looping: bool,
}

const fn clip(
    sheet: &'static str,
    frame_size: u32,
    count: usize,
    frame_duration: f32,
    looping: bool,
) -> ClipSpec {
    ClipSpec {
        sheet,
        geometry: FrameGeometry { frame_size, count },
        frame_duration,
        looping,
    }
}

const NORMAL: AnimationKey = AnimationKey::Attack(AttackVariant::Normal);
const SPECIAL: AnimationKey = AnimationKey::Attack(AttackVariant::Special);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharacterSprite {
    Player,
    Enemy(EnemyKind),
}

impl CharacterSprite {
    /// On-screen size of one frame.
    pub fn display_size(self) -> Vec2 {
        match self {
            CharacterSprite::Player => Vec2::splat(96.0),
            CharacterSprite::Enemy(EnemyKind::GroundBasic | EnemyKind::GroundFast) => {
                Vec2::splat(48.0)
            }
            CharacterSprite::Enemy(EnemyKind::Flying) => Vec2::splat(64.0),
            CharacterSprite::Enemy(EnemyKind::Boss) => Vec2::splat(128.0),
        }
    }

    pub fn clips(self) -> [(AnimationKey, ClipSpec); AnimationKey::COUNT] {
        match self {
            CharacterSprite::Player => [
                (AnimationKey::Idle, clip("ninja_idle", 64, 1, 1.0, true)),
                (AnimationKey::Move, clip("ninja_walk", 32, 4, 0.1, true)),
                (AnimationKey::Airborne, clip("ninja_jump", 32, 4, 0.12, true)),
                (NORMAL, clip("ninja_attack", 32, 4, 0.08, false)),
                (SPECIAL, clip("ninja_shadow_strike", 32, 4, 0.05, false)),
            ],
            CharacterSprite::Enemy(EnemyKind::GroundBasic | EnemyKind::GroundFast) => [
                (AnimationKey::Idle, clip("basic_idle", 48, 4, 0.2, true)),
                (AnimationKey::Move, clip("basic_walk", 48, 4, 0.15, true)),
                (AnimationKey::Airborne, clip("basic_idle", 48, 4, 0.2, true)),
                (NORMAL, clip("basic_attack", 48, 4, 0.1, false)),
                (SPECIAL, clip("basic_attack", 48, 4, 0.1, false)),
            ],
            CharacterSprite::Enemy(EnemyKind::Flying) => [
                (AnimationKey::Idle, clip("fly_idle", 40, 3, 0.2, true)),
                (AnimationKey::Move, clip("fly_move", 40, 3, 0.12, true)),
                (AnimationKey::Airborne, clip("fly_move", 40, 3, 0.12, true)),
                (NORMAL, clip("fly_attack", 40, 3, 0.1, false)),
                (SPECIAL, clip("fly_attack", 40, 3, 0.1, false)),
            ],
            CharacterSprite::Enemy(EnemyKind::Boss) => [
                (AnimationKey::Idle, clip("boss_idle", 128, 4, 0.2, true)),
                (AnimationKey::Move, clip("boss_walk", 128, 6, 0.15, true)),
                (AnimationKey::Airborne, clip("boss_idle", 128, 4, 0.2, true)),
                (NORMAL, clip("boss_attack1", 128, 6, 0.1, false)),
                (SPECIAL, clip("boss_special", 128, 8, 0.08, false)),
            ],
        }
    }
}

/// Build an animator for `sprite`, or a placeholder if any sheet fails.
pub fn build_animator(provider: &mut dyn AssetProvider, sprite: CharacterSprite) -> Animator {
    let mut clips = Vec::with_capacity(AnimationKey::COUNT);

    for (key, spec) in sprite.clips() {
        match provider.load_frames(spec.sheet, spec.geometry) {
            Ok(frames) if !frames.is_empty() => {
                clips.push((key, Animation::new(frames, spec.frame_duration, spec.looping)));
            }
            Ok(_) => {
                warn!(
                    "Sheet {} has no frames, {:?} renders as a placeholder",
                    spec.sheet, sprite
                );
                return Animator::Placeholder;
            }
            Err(e) => {
                warn!("{}; {:?} renders as a placeholder", e, sprite);
                return Animator::Placeholder;
            }
        }
    }

    debug!("Built animations for {:?}", sprite);
    Animator::Animated(AnimationPlayer::new(AnimationSet::from_clips(clips)))
}

/// Prototype animators, cloned into each spawned character.
#[derive(Resource, Debug, Clone)]
pub struct AnimationLibrary {
    pub player: Animator,
    pub ground: Animator,
    pub flying: Animator,
    pub boss: Animator,
}

impl Default for AnimationLibrary {
    fn default() -> Self {
        Self::placeholders()
    }
}

impl AnimationLibrary {
    pub fn placeholders() -> Self {
        Self {
            player: Animator::Placeholder,
            ground: Animator::Placeholder,
            flying: Animator::Placeholder,
            boss: Animator::Placeholder,
        }
    }

    pub fn load(provider: &mut dyn AssetProvider) -> Self {
        Self {
            player: build_animator(provider, CharacterSprite::Player),
            ground: build_animator(provider, CharacterSprite::Enemy(EnemyKind::GroundBasic)),
            flying: build_animator(provider, CharacterSprite::Enemy(EnemyKind::Flying)),
            boss: build_animator(provider, CharacterSprite::Enemy(EnemyKind::Boss)),
        }
    }

    pub fn for_enemy(&self, kind: EnemyKind) -> Animator {
        match kind {
            EnemyKind::GroundBasic | EnemyKind::GroundFast => self.ground.clone(),
            EnemyKind::Flying => self.flying.clone(),
            EnemyKind::Boss => self.boss.clone(),
        }
    }
}
