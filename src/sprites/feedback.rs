//! Draws hit feedback: floating damage numbers and spark particles.

use bevy::prelude::*;
use std::collections::HashMap;

use crate::combat::{DamageNumber, DamageTier, EffectId, HitSpark};
use crate::core::GameSession;

const FEEDBACK_Z: f32 = 8.0;

#[derive(Component)]
pub struct DamageNumberText(pub EffectId);

#[derive(Component)]
pub struct SparkParticleSprite {
    pub spark: EffectId,
    pub index: usize,
}

/// Colour and font size per tier.
fn tier_style(tier: DamageTier) -> (Color, f32) {
    match tier {
        DamageTier::Critical => (Color::srgb(1.0, 0.4, 0.4), 32.0),
        DamageTier::Heavy => (Color::srgb(1.0, 1.0, 0.0), 28.0),
        DamageTier::Normal => (Color::WHITE, 26.0),
        DamageTier::Light => (Color::srgb(0.4, 0.8, 1.0), 24.0),
    }
}

fn spark_color(spark: &HitSpark) -> Color {
    Color::srgba(1.0, 0.78, 0.4, spark.fade())
}

fn point_translation(point: Vec2) -> Vec3 {
    Vec3::new(point.x, -point.y, FEEDBACK_Z)
}

pub(crate) fn sync_damage_numbers(
    mut commands: Commands,
    session: Res<GameSession>,
    mut query: Query<(Entity, &DamageNumberText, &mut Transform, &mut TextColor)>,
) {
    let numbers: HashMap<EffectId, &DamageNumber> = session
        .feedback
        .damage_numbers()
        .iter()
        .map(|n| (n.id, n))
        .collect();
    let mut drawn = Vec::with_capacity(numbers.len());

    for (entity, marker, mut transform, mut color) in &mut query {
        let Some(number) = numbers.get(&marker.0) else {
            commands.entity(entity).despawn();
            continue;
        };
        drawn.push(number.id);

        transform.translation = point_translation(number.position);
        let (base, _) = tier_style(number.tier());
        color.0 = base.with_alpha(number.fade());
    }

    for number in numbers.values() {
        if drawn.contains(&number.id) {
            continue;
        }
        let (color, font_size) = tier_style(number.tier());
        commands.spawn((
            DamageNumberText(number.id),
            Text2d::new(number.damage.to_string()),
            TextFont {
                font_size,
                ..default()
            },
            TextColor(color.with_alpha(number.fade())),
            Transform::from_translation(point_translation(number.position)),
        ));
    }
}

pub(crate) fn sync_spark_sprites(
    mut commands: Commands,
    session: Res<GameSession>,
    mut query: Query<(Entity, &SparkParticleSprite, &mut Transform, &mut Sprite)>,
) {
    let sparks: HashMap<EffectId, &HitSpark> = session
        .feedback
        .sparks()
        .iter()
        .map(|s| (s.id, s))
        .collect();
    let mut drawn = Vec::new();

    for (entity, marker, mut transform, mut sprite) in &mut query {
        let Some((spark, particle)) = sparks
            .get(&marker.spark)
            .and_then(|s| s.particles.get(marker.index).map(|p| (*s, p)))
        else {
            commands.entity(entity).despawn();
            continue;
        };
        drawn.push((marker.spark, marker.index));

        transform.translation = point_translation(particle.position);
        sprite.color = spark_color(spark);
    }

    for spark in sparks.values() {
        for (index, particle) in spark.particles.iter().enumerate() {
            if drawn.contains(&(spark.id, index)) {
                continue;
            }
            commands.spawn((
                SparkParticleSprite {
                    spark: spark.id,
                    index,
                },
                Sprite::from_color(spark_color(spark), Vec2::splat(particle.size * 2.0)),
                Transform::from_translation(point_translation(particle.position)),
            ));
        }
    }
}
