//! Audio domain: fire-and-forget sound cues and background music.
//!
//! Simulation code only talks to the [`AudioCues`] trait. The queue it writes
//! to is drained once per frame by a system that spawns the actual players.

use bevy::audio::{AudioSinkPlayback, Volume};
use bevy::prelude::*;
use std::collections::HashMap;
use std::path::Path;

use crate::core::GameSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    Jump,
    Land,
    /// Swing sound for the given combo step (1..=3).
    Attack(u8),
    Combo,
    ShadowStrike,
    PlayerHit,
    EnemyHit,
    EnemyDeath,
    BossSpawn,
    BossDefeat,
    Pause,
    MenuSelect,
    GameOver,
}

impl SoundCue {
    pub const ALL: [SoundCue; 15] = [
        SoundCue::Jump,
        SoundCue::Land,
        SoundCue::Attack(1),
        SoundCue::Attack(2),
        SoundCue::Attack(3),
        SoundCue::Combo,
        SoundCue::ShadowStrike,
        SoundCue::PlayerHit,
        SoundCue::EnemyHit,
        SoundCue::EnemyDeath,
        SoundCue::BossSpawn,
        SoundCue::BossDefeat,
        SoundCue::Pause,
        SoundCue::MenuSelect,
        SoundCue::GameOver,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            SoundCue::Jump => "jump.wav",
            SoundCue::Land => "land.wav",
            SoundCue::Attack(1) => "attack1.wav",
            SoundCue::Attack(2) => "attack2.wav",
            SoundCue::Attack(_) => "attack3.wav",
            SoundCue::Combo => "combo.wav",
            SoundCue::ShadowStrike => "shadow_strike.wav",
            SoundCue::PlayerHit => "player_hit.wav",
            SoundCue::EnemyHit => "enemy_hit.wav",
            SoundCue::EnemyDeath => "enemy_death.wav",
            SoundCue::BossSpawn => "boss_spawn.wav",
            SoundCue::BossDefeat => "boss_defeat.wav",
            SoundCue::Pause => "pause.wav",
            SoundCue::MenuSelect => "menu_select.wav",
            SoundCue::GameOver => "game_over.wav",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MusicTrack {
    Gameplay,
}

impl MusicTrack {
    pub fn file_name(self) -> &'static str {
        match self {
            MusicTrack::Gameplay => "gameplay.ogg",
        }
    }
}

/// Sink for audio requests raised by gameplay. Calls never block.
pub trait AudioCues {
    fn play_sound(&mut self, cue: SoundCue, volume: f32);
    fn play_music(&mut self, track: MusicTrack);
    fn stop_music(&mut self);
    fn pause_music(&mut self);
    fn resume_music(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AudioRequest {
    Sound { cue: SoundCue, volume: f32 },
    PlayMusic(MusicTrack),
    StopMusic,
    PauseMusic,
    ResumeMusic,
}

/// Requests recorded during the frame, in the order they were raised.
#[derive(Resource, Debug, Default)]
pub struct AudioQueue {
    requests: Vec<AudioRequest>,
}

impl AudioQueue {
    pub fn requests(&self) -> &[AudioRequest] {
        &self.requests
    }

    /// Cues raised so far, ignoring music control.
    pub fn sounds(&self) -> impl Iterator<Item = SoundCue> + '_ {
        self.requests.iter().filter_map(|r| match r {
            AudioRequest::Sound { cue, .. } => Some(*cue),
            _ => None,
        })
    }

    pub fn contains(&self, cue: SoundCue) -> bool {
        self.sounds().any(|c| c == cue)
    }

    pub fn clear(&mut self) {
        self.requests.clear();
    }

    fn drain(&mut self) -> std::vec::Drain<'_, AudioRequest> {
        self.requests.drain(..)
    }
}

impl AudioCues for AudioQueue {
    fn play_sound(&mut self, cue: SoundCue, volume: f32) {
        self.requests.push(AudioRequest::Sound { cue, volume });
    }

    fn play_music(&mut self, track: MusicTrack) {
        self.requests.push(AudioRequest::PlayMusic(track));
    }

    fn stop_music(&mut self) {
        self.requests.push(AudioRequest::StopMusic);
    }

    fn pause_music(&mut self) {
        self.requests.push(AudioRequest::PauseMusic);
    }

    fn resume_music(&mut self) {
        self.requests.push(AudioRequest::ResumeMusic);
    }
}

/// Loaded clip handles. Cues whose files are missing are simply absent.
#[derive(Resource, Default)]
pub struct GameAudio {
    pub sounds: HashMap<SoundCue, Handle<AudioSource>>,
    pub music: HashMap<MusicTrack, Handle<AudioSource>>,
}

/// Marker for the single looping music entity.
#[derive(Component)]
pub struct MusicPlayer;

const SFX_DIR: &str = "audio/sfx";
const MUSIC_DIR: &str = "audio/music";

pub struct GameAudioPlugin;

impl Plugin for GameAudioPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AudioQueue>()
            .add_systems(Startup, load_audio)
            .add_systems(Update, play_audio_requests.in_set(GameSet::Presentation));
    }
}

fn asset_exists(relative: &str) -> bool {
    Path::new("assets").join(relative).exists()
}

fn load_audio(mut commands: Commands, asset_server: Res<AssetServer>) {
    let mut audio = GameAudio::default();

    for cue in SoundCue::ALL {
        let path = format!("{}/{}", SFX_DIR, cue.file_name());
        if asset_exists(&path) {
            audio.sounds.insert(cue, asset_server.load(path));
        }
    }

    let track = MusicTrack::Gameplay;
    let path = format!("{}/{}", MUSIC_DIR, track.file_name());
    if asset_exists(&path) {
        audio.music.insert(track, asset_server.load(path));
    }

    if audio.sounds.len() < SoundCue::ALL.len() {
        warn!(
            "Loaded {}/{} sound cues; missing cues will be silent",
            audio.sounds.len(),
            SoundCue::ALL.len()
        );
    }

    commands.insert_resource(audio);
}

fn play_audio_requests(
    mut commands: Commands,
    mut queue: ResMut<AudioQueue>,
    audio: Res<GameAudio>,
    music_query: Query<(Entity, Option<&AudioSink>), With<MusicPlayer>>,
) {
    for request in queue.drain() {
        match request {
            AudioRequest::Sound { cue, volume } => {
                let Some(handle) = audio.sounds.get(&cue) else {
                    debug!("No clip for {:?}", cue);
                    continue;
                };
                commands.spawn((
                    AudioPlayer::new(handle.clone()),
                    PlaybackSettings::DESPAWN.with_volume(Volume::Linear(volume)),
                ));
            }
            AudioRequest::PlayMusic(track) => {
                for (entity, _) in &music_query {
                    commands.entity(entity).despawn();
                }
                if let Some(handle) = audio.music.get(&track) {
                    commands.spawn((
                        MusicPlayer,
                        AudioPlayer::new(handle.clone()),
                        PlaybackSettings::LOOP.with_volume(Volume::Linear(0.5)),
                    ));
                }
            }
            AudioRequest::StopMusic => {
                for (entity, _) in &music_query {
                    commands.entity(entity).despawn();
                }
            }
            AudioRequest::PauseMusic => {
                for (_, sink) in &music_query {
                    if let Some(sink) = sink {
                        sink.pause();
                    }
                }
            }
            AudioRequest::ResumeMusic => {
                for (_, sink) in &music_query {
                    if let Some(sink) = sink {
                        sink.play();
                    }
                }
            }
        }
    }
}
