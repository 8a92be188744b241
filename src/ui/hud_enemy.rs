//! UI domain: world-space enemy health bars.

use bevy::prelude::*;
use std::collections::HashMap;

use crate::combat::{Enemy, EnemyId};
use crate::core::GameSession;
use crate::movement::Aabb;
use crate::sprites::world_to_translation;

const ENEMY_HEALTHBAR_MIN_WIDTH: f32 = 50.0;
const ENEMY_HEALTHBAR_HEIGHT: f32 = 5.0;
/// Gap between the bar's top edge and the enemy's head.
const ENEMY_HEALTHBAR_OFFSET_Y: f32 = 10.0;
const BAR_Z: f32 = 5.0;
const FILL_Z: f32 = 6.0;

/// Background of an enemy health bar.
#[derive(Component)]
pub struct EnemyHealthBar {
    pub owner: EnemyId,
}

/// Left-aligned fill of an enemy health bar.
#[derive(Component)]
pub struct EnemyHealthBarFill {
    pub owner: EnemyId,
}

/// Background and fill rectangles for a bar above `body`. The bar is at
/// least 50 wide and centred on the body.
pub fn enemy_bar_rects(body: &Aabb, ratio: f32) -> (Aabb, Aabb) {
    let width = body.width.max(ENEMY_HEALTHBAR_MIN_WIDTH);
    let x = body.x + (body.width - width) / 2.0;
    let y = body.y - ENEMY_HEALTHBAR_OFFSET_Y;

    let background = Aabb::new(x, y, width, ENEMY_HEALTHBAR_HEIGHT);
    let fill = Aabb::new(x, y, width * ratio.clamp(0.0, 1.0), ENEMY_HEALTHBAR_HEIGHT);
    (background, fill)
}

fn enemy_rects(enemy: &Enemy) -> (Aabb, Aabb) {
    enemy_bar_rects(&enemy.body.aabb(), enemy.health.percent())
}

pub(crate) fn sync_enemy_healthbars(
    mut commands: Commands,
    session: Option<Res<GameSession>>,
    mut bar_query: Query<(Entity, &EnemyHealthBar, &mut Transform), Without<EnemyHealthBarFill>>,
    mut fill_query: Query<(Entity, &EnemyHealthBarFill, &mut Transform, &mut Sprite)>,
) {
    let enemies: HashMap<EnemyId, &Enemy> = session
        .as_ref()
        .map(|s| s.enemies.enemies().iter().map(|e| (e.id, e)).collect())
        .unwrap_or_default();
    let mut drawn = Vec::with_capacity(enemies.len());

    for (entity, bar, mut transform) in &mut bar_query {
        let Some(enemy) = enemies.get(&bar.owner) else {
            commands.entity(entity).despawn();
            continue;
        };
        drawn.push(enemy.id);
        let (background, _) = enemy_rects(enemy);
        transform.translation = world_to_translation(&background, BAR_Z);
    }

    for (entity, fill, mut transform, mut sprite) in &mut fill_query {
        let Some(enemy) = enemies.get(&fill.owner) else {
            commands.entity(entity).despawn();
            continue;
        };
        let (_, rect) = enemy_rects(enemy);
        transform.translation = world_to_translation(&rect, FILL_Z);
        sprite.custom_size = Some(Vec2::new(rect.width, rect.height));
    }

    for enemy in enemies.values() {
        if drawn.contains(&enemy.id) {
            continue;
        }
        let (background, fill) = enemy_rects(enemy);
        commands.spawn((
            EnemyHealthBar { owner: enemy.id },
            Sprite::from_color(
                Color::srgb(0.8, 0.1, 0.1),
                Vec2::new(background.width, background.height),
            ),
            Transform::from_translation(world_to_translation(&background, BAR_Z)),
        ));
        commands.spawn((
            EnemyHealthBarFill { owner: enemy.id },
            Sprite::from_color(Color::srgb(0.1, 0.8, 0.2), Vec2::new(fill.width, fill.height)),
            Transform::from_translation(world_to_translation(&fill, FILL_Z)),
        ));
    }
}
