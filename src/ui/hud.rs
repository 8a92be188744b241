//! UI domain: in-run HUD with health, lives, score, combo, and boss health.

use bevy::prelude::*;

use crate::combat::EnemyKind;
use crate::core::GameSession;

const HEALTHBAR_WIDTH: f32 = 200.0;
const HEALTHBAR_HEIGHT: f32 = 20.0;
const PADDING: f32 = 16.0;
const BOSS_BAR_WIDTH: f32 = 400.0;
const BOSS_BAR_HEIGHT: f32 = 24.0;

#[derive(Component)]
pub struct HudRoot;

#[derive(Component)]
pub struct PlayerHealthFill;

#[derive(Component)]
pub struct StatsText;

#[derive(Component)]
pub struct ComboText;

#[derive(Component)]
pub struct BossBar;

#[derive(Component)]
pub struct BossHealthFill;

pub(crate) fn spawn_hud(mut commands: Commands) {
    commands
        .spawn((
            HudRoot,
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                ..default()
            },
            Visibility::Hidden,
        ))
        .with_children(|root| {
            root.spawn((
                Node {
                    position_type: PositionType::Absolute,
                    left: Val::Px(PADDING),
                    top: Val::Px(PADDING),
                    width: Val::Px(HEALTHBAR_WIDTH),
                    height: Val::Px(HEALTHBAR_HEIGHT),
                    border: UiRect::all(Val::Px(2.0)),
                    ..default()
                },
                BackgroundColor(Color::srgba(0.1, 0.1, 0.1, 0.8)),
                BorderColor::all(Color::srgb(0.3, 0.3, 0.3)),
            ))
            .with_child((
                PlayerHealthFill,
                Node {
                    width: Val::Percent(100.0),
                    height: Val::Percent(100.0),
                    ..default()
                },
                BackgroundColor(Color::srgb(0.2, 0.8, 0.3)),
            ));

            root.spawn((
                StatsText,
                Text::new(""),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(Color::srgb(0.9, 0.9, 0.9)),
                Node {
                    position_type: PositionType::Absolute,
                    left: Val::Px(PADDING),
                    top: Val::Px(PADDING + HEALTHBAR_HEIGHT + 8.0),
                    ..default()
                },
            ));

            root.spawn((
                ComboText,
                Text::new(""),
                TextFont {
                    font_size: 28.0,
                    ..default()
                },
                TextColor(Color::srgb(1.0, 0.8, 0.2)),
                Node {
                    position_type: PositionType::Absolute,
                    right: Val::Px(PADDING),
                    top: Val::Px(PADDING),
                    ..default()
                },
            ));

            root.spawn((
                BossBar,
                Node {
                    position_type: PositionType::Absolute,
                    bottom: Val::Px(40.0),
                    left: Val::Percent(50.0),
                    margin: UiRect::left(Val::Px(-BOSS_BAR_WIDTH / 2.0)),
                    width: Val::Px(BOSS_BAR_WIDTH),
                    height: Val::Px(BOSS_BAR_HEIGHT),
                    border: UiRect::all(Val::Px(2.0)),
                    ..default()
                },
                BackgroundColor(Color::srgba(0.05, 0.05, 0.05, 0.9)),
                BorderColor::all(Color::srgb(0.6, 0.1, 0.1)),
                Visibility::Hidden,
            ))
            .with_child((
                BossHealthFill,
                Node {
                    width: Val::Percent(100.0),
                    height: Val::Percent(100.0),
                    ..default()
                },
                BackgroundColor(Color::srgb(0.8, 0.1, 0.1)),
            ));
        });
}

pub(crate) fn show_hud(mut query: Query<&mut Visibility, With<HudRoot>>) {
    for mut visibility in &mut query {
        *visibility = Visibility::Inherited;
    }
}

pub(crate) fn hide_hud(mut query: Query<&mut Visibility, With<HudRoot>>) {
    for mut visibility in &mut query {
        *visibility = Visibility::Hidden;
    }
}

pub(crate) fn update_player_health(
    session: Res<GameSession>,
    mut fill_query: Query<(&mut Node, &mut BackgroundColor), With<PlayerHealthFill>>,
) {
    let percent = session.player.health.percent();
    for (mut node, mut bg_color) in &mut fill_query {
        node.width = Val::Percent(percent * 100.0);

        // green -> yellow -> red
        bg_color.0 = if percent > 0.5 {
            let t = (percent - 0.5) * 2.0;
            Color::srgb(1.0 - t * 0.8, 0.8, 0.3 * (1.0 - t))
        } else {
            let t = percent * 2.0;
            Color::srgb(0.9, 0.2 + t * 0.6, 0.2)
        };
    }
}

pub(crate) fn update_stats_text(
    session: Res<GameSession>,
    mut stats_query: Query<&mut Text, (With<StatsText>, Without<ComboText>)>,
    mut combo_query: Query<&mut Text, (With<ComboText>, Without<StatsText>)>,
) {
    if !session.is_changed() {
        return;
    }

    for mut text in &mut stats_query {
        **text = format!(
            "HP {}/{}   Lives {}   Score {}",
            session.player.health.current,
            session.player.health.max,
            session.lives,
            session.score
        );
    }

    let combo = session.player.combo.count;
    for mut text in &mut combo_query {
        **text = if combo >= 2 {
            format!("{} HIT COMBO", combo)
        } else {
            String::new()
        };
    }
}

pub(crate) fn update_boss_bar(
    session: Res<GameSession>,
    mut bar_query: Query<&mut Visibility, With<BossBar>>,
    mut fill_query: Query<&mut Node, With<BossHealthFill>>,
) {
    let boss = session
        .enemies
        .enemies()
        .iter()
        .find(|e| e.kind == EnemyKind::Boss);

    for mut visibility in &mut bar_query {
        *visibility = if boss.is_some() {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
    }

    if let Some(boss) = boss {
        for mut node in &mut fill_query {
            node.width = Val::Percent(boss.health.percent() * 100.0);
        }
    }
}
