//! UI domain: in-run HUD and state overlays.

mod hud;
mod hud_enemy;
mod screens;


use bevy::prelude::*;

use crate::core::{GameSession, GameSet, GameState};
use crate::ui::hud::{
    hide_hud, show_hud, spawn_hud, update_boss_bar, update_player_health, update_stats_text,
};
use crate::ui::hud_enemy::sync_enemy_healthbars;
use crate::ui::screens::{
    GameOverScreen, MenuScreen, PauseScreen, despawn_screen, spawn_game_over_screen,
    spawn_menu_screen, spawn_pause_screen,
};

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_hud)
            .add_systems(OnEnter(GameState::Menu), (spawn_menu_screen, hide_hud))
            .add_systems(OnExit(GameState::Menu), (despawn_screen::<MenuScreen>, show_hud))
            .add_systems(OnEnter(GameState::Paused), spawn_pause_screen)
            .add_systems(OnExit(GameState::Paused), despawn_screen::<PauseScreen>)
            .add_systems(OnEnter(GameState::GameOver), spawn_game_over_screen)
            .add_systems(OnExit(GameState::GameOver), despawn_screen::<GameOverScreen>)
            .add_systems(
                Update,
                (update_player_health, update_stats_text, update_boss_bar)
                    .in_set(GameSet::Presentation)
                    .run_if(resource_exists::<GameSession>),
            )
            .add_systems(Update, sync_enemy_healthbars.in_set(GameSet::Presentation));
    }
}
