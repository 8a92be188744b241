//! Mirrors settled session state onto Bevy sprites.
//!
//! World space is y-down with top-left box origins; sprites are centred and
//! y-up, so every position goes through [`world_to_translation`].

use bevy::prelude::*;
use std::collections::HashMap;

use crate::combat::{AiState, Enemy, EnemyId};
use crate::content::GameTuning;
use crate::core::GameSession;
use crate::movement::{Aabb, Facing, Level};
use crate::sprites::animation::Animator;
use crate::sprites::manifest::CharacterSprite;

const LEVEL_Z: f32 = 0.0;
const ENEMY_Z: f32 = 1.0;
const PLAYER_Z: f32 = 2.0;

#[derive(Component)]
pub struct PlayerSprite;

#[derive(Component)]
pub struct EnemySprite(pub EnemyId);

#[derive(Component)]
pub struct PlatformSprite;

pub fn world_to_translation(rect: &Aabb, z: f32) -> Vec3 {
    let center = rect.center();
    Vec3::new(center.x, -center.y, z)
}

fn placeholder_enemy_color(enemy: &Enemy) -> Color {
    if enemy.is_stunned() {
        return Color::WHITE;
    }
    match enemy.ai_state {
        AiState::Attack => Color::srgb(0.85, 0.2, 0.2),
        AiState::Chase => Color::srgb(0.9, 0.8, 0.2),
        AiState::Patrol => Color::srgb(0.5, 0.5, 0.5),
    }
}

/// Point `sprite` at the animator's current frame, or draw a flat box.
fn apply_frame(sprite: &mut Sprite, animator: &Animator, display: Vec2, body: Vec2, color: Color) {
    match animator.current_frame() {
        Some(frame) => {
            sprite.image = frame.image.clone();
            sprite.texture_atlas = Some(TextureAtlas {
                layout: frame.layout.clone(),
                index: frame.index,
            });
            sprite.custom_size = Some(display);
            sprite.color = Color::WHITE;
        }
        None => {
            sprite.image = Handle::default();
            sprite.texture_atlas = None;
            sprite.custom_size = Some(body);
            sprite.color = color;
        }
    }
}

pub(crate) fn spawn_level_sprites(mut commands: Commands, tuning: Res<GameTuning>) {
    let level = Level::from_def(&tuning.level, tuning.physics.death_zone_y);
    for platform in &level.platforms {
        commands.spawn((
            PlatformSprite,
            Sprite::from_color(
                Color::srgb(0.35, 0.25, 0.2),
                Vec2::new(platform.width, platform.height),
            ),
            Transform::from_translation(world_to_translation(platform, LEVEL_Z)),
        ));
    }
}

pub(crate) fn sync_player_sprite(
    mut commands: Commands,
    session: Res<GameSession>,
    mut query: Query<(&mut Transform, &mut Sprite), With<PlayerSprite>>,
) {
    let player = &session.player;
    let body = player.body.aabb();
    let translation = world_to_translation(&body, PLAYER_Z);

    let Ok((mut transform, mut sprite)) = query.single_mut() else {
        commands.spawn((
            PlayerSprite,
            Sprite::from_color(Color::srgb(0.2, 0.4, 0.9), player.body.size),
            Transform::from_translation(translation),
        ));
        return;
    };

    transform.translation = translation;
    let color = if player.is_invulnerable() {
        Color::srgba(0.2, 0.4, 0.9, 0.5)
    } else {
        Color::srgb(0.2, 0.4, 0.9)
    };
    apply_frame(
        &mut sprite,
        &player.animator,
        CharacterSprite::Player.display_size(),
        player.body.size,
        color,
    );
    sprite.flip_x = player.body.facing == Facing::Left;
}

pub(crate) fn sync_enemy_sprites(
    mut commands: Commands,
    session: Res<GameSession>,
    mut query: Query<(Entity, &EnemySprite, &mut Transform, &mut Sprite)>,
) {
    let enemies: HashMap<EnemyId, &Enemy> = session
        .enemies
        .enemies()
        .iter()
        .map(|e| (e.id, e))
        .collect();
    let mut drawn = Vec::with_capacity(enemies.len());

    for (entity, marker, mut transform, mut sprite) in &mut query {
        let Some(enemy) = enemies.get(&marker.0) else {
            commands.entity(entity).despawn();
            continue;
        };
        drawn.push(enemy.id);

        transform.translation = world_to_translation(&enemy.body.aabb(), ENEMY_Z);
        apply_frame(
            &mut sprite,
            &enemy.animator,
            CharacterSprite::Enemy(enemy.kind).display_size(),
            enemy.body.size,
            placeholder_enemy_color(enemy),
        );
        // Enemy sheets face left.
        sprite.flip_x = enemy.body.facing == Facing::Right;
        if enemy.is_stunned() && enemy.animator.current_frame().is_some() {
            sprite.color = Color::srgb(1.0, 0.6, 0.6);
        }
    }

    for enemy in enemies.values() {
        if drawn.contains(&enemy.id) {
            continue;
        }
        commands.spawn((
            EnemySprite(enemy.id),
            Sprite::from_color(placeholder_enemy_color(enemy), enemy.body.size),
            Transform::from_translation(world_to_translation(&enemy.body.aabb(), ENEMY_Z)),
        ));
    }
}
