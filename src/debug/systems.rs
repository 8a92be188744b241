//! Debug domain: hotkeys, gizmo outlines, and the info readout.

use bevy::prelude::*;

use crate::combat::AiState;
use crate::core::GameSession;
use crate::debug::state::{DebugInfoOverlay, DebugState};
use crate::movement::{Aabb, BoundaryKind};
use crate::sprites::{Animator, world_to_translation};

const PLATFORM_COLOR: Color = Color::srgb(0.3, 0.6, 1.0);
const WALL_COLOR: Color = Color::srgb(0.6, 0.6, 0.6);
const DEATH_ZONE_COLOR: Color = Color::srgb(1.0, 0.2, 0.2);
const BODY_COLOR: Color = Color::srgb(0.2, 1.0, 0.4);
const HITBOX_COLOR: Color = Color::srgb(1.0, 0.5, 0.0);

/// F3 outlines, F4 info readout, Ctrl+I invincibility
pub(crate) fn handle_debug_hotkeys(
    mut commands: Commands,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut debug_state: ResMut<DebugState>,
    existing_overlay: Query<Entity, With<DebugInfoOverlay>>,
) {
    if keyboard.just_pressed(KeyCode::F3) {
        debug_state.show_hitboxes = !debug_state.show_hitboxes;
        info!("[DEBUG] Hitbox overlay {}", on_off(debug_state.show_hitboxes));
    }

    if keyboard.just_pressed(KeyCode::F4) {
        debug_state.show_info = !debug_state.show_info;
        info!("[DEBUG] Info overlay {}", on_off(debug_state.show_info));

        if debug_state.show_info {
            spawn_debug_info_overlay(&mut commands);
        } else {
            for entity in &existing_overlay {
                commands.entity(entity).despawn();
            }
        }
    }

    let ctrl = keyboard.pressed(KeyCode::ControlLeft) || keyboard.pressed(KeyCode::ControlRight);
    if ctrl && keyboard.just_pressed(KeyCode::KeyI) {
        debug_state.invincible = !debug_state.invincible;
        info!("[DEBUG] Invincibility {}", on_off(debug_state.invincible));
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag { "ON" } else { "OFF" }
}

fn draw_rect(gizmos: &mut Gizmos, rect: &Aabb, color: Color) {
    gizmos.rect_2d(
        Isometry2d::from_translation(world_to_translation(rect, 0.0).truncate()),
        Vec2::new(rect.width, rect.height),
        color,
    );
}

pub(crate) fn draw_hitboxes(session: Res<GameSession>, mut gizmos: Gizmos) {
    for platform in &session.level.platforms {
        draw_rect(&mut gizmos, platform, PLATFORM_COLOR);
    }
    for boundary in &session.level.boundaries {
        let color = match boundary.kind {
            BoundaryKind::DeathZone => DEATH_ZONE_COLOR,
            BoundaryKind::LeftWall | BoundaryKind::RightWall => WALL_COLOR,
        };
        draw_rect(&mut gizmos, &boundary.rect, color);
    }

    draw_rect(&mut gizmos, &session.player.body.aabb(), BODY_COLOR);
    if !session.player.hitbox.is_parked() {
        draw_rect(&mut gizmos, &session.player.hitbox.rect, HITBOX_COLOR);
    }

    for enemy in session.enemies.enemies() {
        draw_rect(&mut gizmos, &enemy.body.aabb(), BODY_COLOR);
        if enemy.ai_state == AiState::Attack && !enemy.hitbox.is_parked() {
            draw_rect(&mut gizmos, &enemy.hitbox.rect, HITBOX_COLOR);
        }
    }
}

/// Holds invulnerability frames open and tops health back up.
pub(crate) fn apply_invincibility(debug_state: Res<DebugState>, mut session: ResMut<GameSession>) {
    if !debug_state.invincible || session.is_over() {
        return;
    }

    let player = &mut session.player;
    player.timers.invulnerable.start(1.0);
    if player.health.current < player.health.max {
        player.health.restore();
    }
}

pub(crate) fn update_debug_info_overlay(
    session: Res<GameSession>,
    debug_state: Res<DebugState>,
    mut overlay_query: Query<&mut Text, With<DebugInfoOverlay>>,
) {
    let Ok(mut text) = overlay_query.single_mut() else {
        return;
    };

    let player = &session.player;
    let pos = player.body.position;
    **text = format!(
        "Pos: ({:.0}, {:.0})\nVel: ({:.0}, {:.0})\nGrounded: {}\nHP: {}/{}\nCombo: {}\nCooldown: {:.2}s  Invuln: {:.2}s\n{}\nEnemies: {}\nBoss spawned: {}\nInvincible: {}",
        pos.x,
        pos.y,
        player.body.velocity.x,
        player.body.velocity.y,
        player.body.grounded,
        player.health.current,
        player.health.max,
        player.combo.count,
        player.timers.attack_cooldown.remaining(),
        player.timers.invulnerable.remaining(),
        animation_line(&player.animator),
        session.enemies.len(),
        session.enemies.boss_spawned(),
        debug_state.invincible
    );
}

fn animation_line(animator: &Animator) -> String {
    let Some((key, clip)) = animator.active_clip() else {
        return "Anim: placeholder".to_string();
    };
    let mode = if clip.is_looping() {
        "loop"
    } else if clip.is_finished() {
        "held"
    } else {
        "once"
    };
    format!(
        "Anim: {:?} {}/{} ({})",
        key,
        clip.frame_index() + 1,
        clip.frame_count(),
        mode
    )
}
