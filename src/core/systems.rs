//! Core domain: state transitions and the per-frame simulation step.

use bevy::prelude::*;
use rand::Rng;

use crate::audio::{AudioCues, AudioQueue, MusicTrack, SoundCue};
use crate::combat::{BossSpawnedEvent, EnemyDefeatedEvent, LifeLostEvent, PlayerHitEvent};
use crate::content::GameTuning;
use crate::core::camera::MainCamera;
use crate::core::session::GameSession;
use crate::core::state::GameState;
use crate::movement::PlayerInput;
use crate::sprites::AnimationLibrary;

fn new_session(tuning: &GameTuning, library: &AnimationLibrary) -> GameSession {
    let seed = tuning
        .session
        .seed
        .unwrap_or_else(|| rand::rng().random());
    info!("Starting session with seed {}", seed);
    GameSession::new(tuning, library, seed)
}

/// Enter starts a fresh session from the menu or the game-over screen.
pub(crate) fn start_session(
    mut commands: Commands,
    keyboard: Res<ButtonInput<KeyCode>>,
    tuning: Res<GameTuning>,
    library: Res<AnimationLibrary>,
    mut audio: ResMut<AudioQueue>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if !keyboard.any_just_pressed([KeyCode::Enter, KeyCode::NumpadEnter]) {
        return;
    }

    commands.insert_resource(new_session(&tuning, &library));
    audio.play_sound(SoundCue::MenuSelect, 1.0);
    audio.play_music(MusicTrack::Gameplay);
    next_state.set(GameState::Playing);
}

pub(crate) fn toggle_pause(
    keyboard: Res<ButtonInput<KeyCode>>,
    state: Res<State<GameState>>,
    mut audio: ResMut<AudioQueue>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if !keyboard.just_pressed(KeyCode::Escape) {
        return;
    }

    match state.get() {
        GameState::Playing => {
            audio.play_sound(SoundCue::Pause, 1.0);
            audio.pause_music();
            next_state.set(GameState::Paused);
        }
        GameState::Paused => {
            audio.resume_music();
            next_state.set(GameState::Playing);
        }
        GameState::Menu | GameState::GameOver => {}
    }
}

pub(crate) fn advance_session(
    time: Res<Time>,
    input: Res<PlayerInput>,
    mut session: ResMut<GameSession>,
    mut audio: ResMut<AudioQueue>,
    mut next_state: ResMut<NextState<GameState>>,
    mut defeated: MessageWriter<EnemyDefeatedEvent>,
    mut player_hits: MessageWriter<PlayerHitEvent>,
    mut lives_lost: MessageWriter<LifeLostEvent>,
    mut bosses: MessageWriter<BossSpawnedEvent>,
) {
    let report = session.tick(time.delta_secs(), &input, &mut *audio);

    for defeat in &report.combat.defeated {
        defeated.write(EnemyDefeatedEvent {
            id: defeat.id,
            kind: defeat.kind,
            points: defeat.points,
        });
    }
    for hit in &report.combat.player_hits {
        player_hits.write(PlayerHitEvent {
            damage: hit.damage,
            health_left: session.player.health.current,
        });
    }
    if report.life_lost {
        lives_lost.write(LifeLostEvent {
            lives_left: session.lives,
        });
    }
    if report.spawns.boss_spawned {
        bosses.write(BossSpawnedEvent);
    }

    if report.game_over {
        next_state.set(GameState::GameOver);
    }
}

pub(crate) fn sync_camera(
    session: Res<GameSession>,
    mut camera_query: Query<&mut Transform, With<MainCamera>>,
) {
    let Ok(mut transform) = camera_query.single_mut() else {
        return;
    };
    let target = session.camera.translation();
    transform.translation.x = target.x;
    transform.translation.y = target.y;
}
