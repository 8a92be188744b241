//! Sprites domain: animation playback, sheet loading, and render sync.

pub mod animation;
mod feedback;
pub mod manifest;
mod render;

#[cfg(test)]
mod tests;

use bevy::prelude::*;

use crate::core::{GameSession, GameSet};

pub use animation::*;
pub use feedback::{DamageNumberText, SparkParticleSprite};
pub use manifest::*;
pub use render::{EnemySprite, PlatformSprite, PlayerSprite, world_to_translation};

pub struct SpritesPlugin;

impl Plugin for SpritesPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SpriteManifest>()
            .init_resource::<AnimationLibrary>()
            .add_systems(
                Startup,
                (load_animation_library, render::spawn_level_sprites),
            )
            .add_systems(
                Update,
                (
                    render::sync_player_sprite,
                    render::sync_enemy_sprites,
                    feedback::sync_damage_numbers,
                    feedback::sync_spark_sprites,
                )
                    .in_set(GameSet::Presentation)
                    .run_if(resource_exists::<GameSession>),
            );
    }
}

/// Load the manifest and slice every character's sheets into animations.
fn load_animation_library(
    mut manifest: ResMut<SpriteManifest>,
    mut library: ResMut<AnimationLibrary>,
    asset_server: Res<AssetServer>,
    mut layouts: ResMut<Assets<TextureAtlasLayout>>,
) {
    manifest.load_from_file(MANIFEST_PATH);

    let mut provider = SheetProvider {
        manifest: &*manifest,
        asset_server: &*asset_server,
        layouts: &mut *layouts,
    };
    *library = AnimationLibrary::load(&mut provider);
}
