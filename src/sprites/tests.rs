use super::*;
use crate::combat::EnemyKind;
use super::animation::AnimationPlayer;

fn frames(count: usize) -> Vec<FrameHandle> {
    (0..count)
        .map(|index| FrameHandle {
            index,
            ..Default::default()
        })
        .collect()
}

fn full_set() -> AnimationSet {
    AnimationSet::from_clips(
        AnimationKey::ALL
            .into_iter()
            .map(|key| (key, Animation::new(frames(4), 0.1, !matches!(key, AnimationKey::Attack(_)))))
            .collect(),
    )
}

/// Provider that hands out empty handles, failing for one named sheet.
struct FakeProvider {
    fail_sheet: Option<&'static str>,
    requested: Vec<String>,
}

impl FakeProvider {
    fn new(fail_sheet: Option<&'static str>) -> Self {
        Self {
            fail_sheet,
            requested: Vec::new(),
        }
    }
}

impl AssetProvider for FakeProvider {
    fn load_frames(
        &mut self,
        sheet: &str,
        geometry: FrameGeometry,
    ) -> Result<Vec<FrameHandle>, AssetError> {
        self.requested.push(sheet.to_string());
        if self.fail_sheet == Some(sheet) {
            return Err(AssetError {
                sheet: sheet.to_string(),
                message: "missing".to_string(),
            });
        }
        Ok(frames(geometry.count))
    }
}

// ----------------------------------------------------------------------------
// Animation playback
// ----------------------------------------------------------------------------

#[test]
fn test_animation_advances_one_frame_per_duration() {
    let mut anim = Animation::new(frames(4), 0.1, true);

    anim.advance(0.05);
    assert_eq!(anim.frame_index(), 0);

    anim.advance(0.06);
    assert_eq!(anim.frame_index(), 1);

    anim.advance(0.25);
    assert_eq!(anim.frame_index(), 3);
}

#[test]
fn test_looping_animation_wraps_to_first_frame() {
    let mut anim = Animation::new(frames(3), 0.1, true);

    for _ in 0..3 {
        anim.advance(0.1001);
    }

    assert_eq!(anim.frame_index(), 0);
    assert!(!anim.is_finished());
}

#[test]
fn test_non_looping_animation_holds_last_frame() {
    let mut anim = Animation::new(frames(3), 0.1, false);

    anim.advance(1.0);
    assert!(anim.is_finished());
    assert_eq!(anim.frame_index(), 2);

    anim.advance(1.0);
    assert_eq!(anim.frame_index(), 2);
    assert_eq!(anim.current_frame().index, 2);
}

#[test]
fn test_animation_reset_rewinds() {
    let mut anim = Animation::new(frames(3), 0.1, false);
    anim.advance(1.0);

    anim.reset();

    assert_eq!(anim.frame_index(), 0);
    assert!(!anim.is_finished());
}

#[test]
fn test_negative_dt_does_not_rewind() {
    let mut anim = Animation::new(frames(3), 0.1, true);
    anim.advance(0.15);

    anim.advance(-1.0);

    assert_eq!(anim.frame_index(), 1);
}

#[test]
fn test_total_duration_is_frames_times_duration() {
    let anim = Animation::new(frames(4), 0.05, false);
    assert!((anim.total_duration() - 0.2).abs() < 1e-6);
}

#[test]
#[should_panic(expected = "at least one frame")]
fn test_empty_animation_panics() {
    Animation::new(Vec::new(), 0.1, true);
}

#[test]
#[should_panic(expected = "frame duration must be positive")]
fn test_zero_frame_duration_panics() {
    Animation::new(frames(2), 0.0, true);
}

// ----------------------------------------------------------------------------
// State selection
// ----------------------------------------------------------------------------

#[test]
fn test_select_state_precedence() {
    let special = Some(AttackVariant::Special);

    assert_eq!(
        select_state(special, true, 300.0),
        AnimationKey::Attack(AttackVariant::Special)
    );
    assert_eq!(select_state(None, true, 300.0), AnimationKey::Airborne);
    assert_eq!(select_state(None, false, -300.0), AnimationKey::Move);
    assert_eq!(select_state(None, false, 0.0), AnimationKey::Idle);
}

#[test]
fn test_select_state_deadzone() {
    assert_eq!(select_state(None, false, MOVE_DEADZONE), AnimationKey::Idle);
    assert_eq!(select_state(None, false, -9.5), AnimationKey::Idle);
    assert_eq!(select_state(None, false, 10.5), AnimationKey::Move);
}

#[test]
fn test_animation_key_indices_are_unique() {
    let mut seen = [false; AnimationKey::COUNT];
    for key in AnimationKey::ALL {
        assert!(!seen[key.index()], "{key:?} shares an index");
        seen[key.index()] = true;
    }
}

// ----------------------------------------------------------------------------
// Animation sets and players
// ----------------------------------------------------------------------------

#[test]
#[should_panic(expected = "missing animation")]
fn test_animation_set_missing_key_panics() {
    AnimationSet::from_clips(vec![(AnimationKey::Idle, Animation::new(frames(1), 0.1, true))]);
}

#[test]
#[should_panic(expected = "duplicate animation")]
fn test_animation_set_duplicate_key_panics() {
    let mut clips: Vec<_> = AnimationKey::ALL
        .into_iter()
        .map(|key| (key, Animation::new(frames(1), 0.1, true)))
        .collect();
    clips.push((AnimationKey::Idle, Animation::new(frames(1), 0.1, true)));
    AnimationSet::from_clips(clips);
}

#[test]
fn test_player_advances_active_clip() {
    let mut player = AnimationPlayer::new(full_set());

    player.update(AnimationKey::Idle, 0.25);

    assert_eq!(player.active_key(), AnimationKey::Idle);
    assert_eq!(player.active().frame_index(), 2);
}

#[test]
fn test_player_switch_resets_new_clip() {
    let mut player = AnimationPlayer::new(full_set());
    player.update(AnimationKey::Move, 0.0);
    player.update(AnimationKey::Move, 0.25);
    assert_eq!(player.active().frame_index(), 2);

    player.update(AnimationKey::Idle, 0.0);
    player.update(AnimationKey::Move, 0.25);

    // Switching back rewinds instead of resuming.
    assert_eq!(player.active_key(), AnimationKey::Move);
    assert_eq!(player.active().frame_index(), 0);
}

#[test]
fn test_attack_clip_finishes_and_holds() {
    let mut player = AnimationPlayer::new(full_set());
    let key = AnimationKey::Attack(AttackVariant::Normal);

    player.update(key, 0.0);
    for _ in 0..10 {
        player.update(key, 0.1);
    }

    assert!(player.active().is_finished());
    assert_eq!(player.active().frame_index(), 3);
}

#[test]
fn test_placeholder_animator_ignores_updates() {
    let mut animator = Animator::Placeholder;

    animator.update(AnimationKey::Move, 0.5);

    assert!(animator.active_clip().is_none());
    assert!(animator.current_frame().is_none());
    assert_eq!(animator.clip_duration(AnimationKey::Idle), None);
}

// ----------------------------------------------------------------------------
// Asset loading
// ----------------------------------------------------------------------------

#[test]
fn test_build_animator_loads_every_clip() {
    let mut provider = FakeProvider::new(None);

    let animator = build_animator(&mut provider, CharacterSprite::Player);

    assert_eq!(provider.requested.len(), AnimationKey::COUNT);
    assert_eq!(animator.active_clip().map(|(key, _)| key), Some(AnimationKey::Idle));
    let special = animator
        .clip_duration(AnimationKey::Attack(AttackVariant::Special))
        .unwrap();
    assert!((special - 0.2).abs() < 1e-6);
}

#[test]
fn test_build_animator_falls_back_on_missing_sheet() {
    let mut provider = FakeProvider::new(Some("ninja_attack"));

    let animator = build_animator(&mut provider, CharacterSprite::Player);

    assert_eq!(animator, Animator::Placeholder);
}

#[test]
fn test_library_failure_only_affects_one_character() {
    let mut provider = FakeProvider::new(Some("fly_move"));

    let library = AnimationLibrary::load(&mut provider);

    assert!(matches!(library.player, Animator::Animated(_)));
    assert!(matches!(library.ground, Animator::Animated(_)));
    assert_eq!(library.flying, Animator::Placeholder);
    assert!(matches!(library.boss, Animator::Animated(_)));
    assert_eq!(library.for_enemy(EnemyKind::Flying), Animator::Placeholder);
}

#[test]
fn test_every_character_has_a_clip_per_key() {
    let sprites = [
        CharacterSprite::Player,
        CharacterSprite::Enemy(EnemyKind::GroundBasic),
        CharacterSprite::Enemy(EnemyKind::Flying),
        CharacterSprite::Enemy(EnemyKind::Boss),
    ];
    for sprite in sprites {
        let clips = sprite.clips();
        for key in AnimationKey::ALL {
            assert!(clips.iter().any(|(k, _)| *k == key), "{sprite:?} lacks {key:?}");
        }
        assert!(clips.iter().all(|(_, spec)| spec.frame_duration > 0.0));
    }
}

#[test]
fn test_manifest_from_json() {
    let json = r#"{
        "version": 2,
        "sheets": {
            "ninja_idle": "sprites/ninja/idle.png",
            "boss_walk": "sprites/boss/walk.png"
        }
    }"#;

    let manifest = SpriteManifest::from_json(json).unwrap();

    assert_eq!(manifest.version, 2);
    assert_eq!(manifest.sheets.len(), 2);
    assert_eq!(manifest.sheets["ninja_idle"], "sprites/ninja/idle.png");
}

#[test]
fn test_manifest_rejects_malformed_json() {
    assert!(SpriteManifest::from_json("{\"version\": 1").is_err());
}

#[test]
fn test_world_to_translation_flips_y() {
    let rect = crate::movement::Aabb::new(100.0, 200.0, 40.0, 60.0);

    let translation = world_to_translation(&rect, 5.0);

    assert_eq!(translation, Vec3::new(120.0, -230.0, 5.0));
}
