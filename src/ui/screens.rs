//! UI domain: full-screen overlays for the menu, pause, and game-over states.

use bevy::prelude::*;

use crate::core::GameSession;

#[derive(Component)]
pub struct MenuScreen;

#[derive(Component)]
pub struct PauseScreen;

#[derive(Component)]
pub struct GameOverScreen;

fn overlay(alpha: f32) -> impl Bundle {
    (
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(0.0),
            right: Val::Px(0.0),
            top: Val::Px(0.0),
            bottom: Val::Px(0.0),
            justify_content: JustifyContent::Center,
            align_items: AlignItems::Center,
            flex_direction: FlexDirection::Column,
            ..default()
        },
        BackgroundColor(Color::srgba(0.0, 0.0, 0.0, alpha)),
        ZIndex(100),
    )
}

fn title(text: &str, color: Color) -> impl Bundle {
    (
        Text::new(text),
        TextFont {
            font_size: 72.0,
            ..default()
        },
        TextColor(color),
        Node {
            margin: UiRect::bottom(Val::Px(40.0)),
            ..default()
        },
    )
}

fn hint(text: impl Into<String>) -> impl Bundle {
    (
        Text::new(text),
        TextFont {
            font_size: 20.0,
            ..default()
        },
        TextColor(Color::srgb(0.6, 0.6, 0.6)),
        Node {
            margin: UiRect::bottom(Val::Px(16.0)),
            ..default()
        },
    )
}

pub(crate) fn spawn_menu_screen(mut commands: Commands) {
    commands
        .spawn((MenuScreen, overlay(0.9)))
        .with_children(|parent| {
            parent.spawn(title("SKUNK FU", Color::srgb(0.95, 0.95, 0.95)));
            parent.spawn(hint("Press ENTER to start"));
            parent.spawn(hint("A/D move   SPACE jump   J attack   L shadow strike"));
        });
}

pub(crate) fn spawn_pause_screen(mut commands: Commands) {
    commands
        .spawn((PauseScreen, overlay(0.6)))
        .with_children(|parent| {
            parent.spawn(title("PAUSED", Color::srgb(0.9, 0.9, 0.9)));
            parent.spawn(hint("Press ESC to resume"));
        });
}

pub(crate) fn spawn_game_over_screen(mut commands: Commands, session: Option<Res<GameSession>>) {
    let score = session.map(|s| s.score).unwrap_or_default();

    commands
        .spawn((GameOverScreen, overlay(0.85)))
        .with_children(|parent| {
            parent.spawn(title("GAME OVER", Color::srgb(0.8, 0.15, 0.15)));
            parent.spawn(hint(format!("Final score: {}", score)));
            parent.spawn(hint("Press ENTER to try again"));
        });
}

/// Despawn every overlay tagged with `T`.
pub(crate) fn despawn_screen<T: Component>(
    mut commands: Commands,
    query: Query<Entity, With<T>>,
) {
    for entity in &query {
        commands.entity(entity).despawn();
    }
}
