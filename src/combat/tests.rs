//! Combat domain: tests for timers, the player and enemy controllers,
//! spawning, and hit resolution.

use bevy::prelude::Vec2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::*;
use crate::audio::{AudioQueue, SoundCue};
use crate::movement::{Aabb, Facing, Level, PhysicsTuning, PlayerInput};
use crate::sprites::{AnimationLibrary, Animator, AttackVariant};

const GROUND_Y: f32 = 500.0;
const FRAME: f32 = 1.0 / 16.0;

/// Flat ground across the whole level with walls and a death zone.
fn ground_level() -> Level {
    Level::new(
        vec![Aabb::new(0.0, GROUND_Y, 3000.0, 50.0)],
        boundaries(),
        3000.0,
        720.0,
        600.0,
    )
}

fn boundaries() -> Vec<Aabb> {
    vec![
        Aabb::new(-50.0, 0.0, 50.0, 720.0),
        Aabb::new(3000.0, 0.0, 50.0, 720.0),
        Aabb::new(0.0, 700.0, 3000.0, 100.0),
    ]
}

fn physics() -> PhysicsTuning {
    PhysicsTuning::default()
}

fn player_tuning() -> PlayerTuning {
    PlayerTuning {
        spawn_x: 100.0,
        spawn_y: GROUND_Y - 64.0,
        ..Default::default()
    }
}

fn step(player: &mut Player, dt: f32, input: PlayerInput, level: &Level, audio: &mut AudioQueue) {
    player.update(dt, &input, level, &physics(), &[], audio);
}

/// Player standing on the ground after one settling tick.
fn grounded_player(tuning: PlayerTuning, level: &Level) -> Player {
    let mut player = Player::new(tuning, Animator::Placeholder);
    let mut audio = AudioQueue::default();
    step(&mut player, FRAME, PlayerInput::idle(), level, &mut audio);
    assert!(player.body.grounded);
    player
}

fn empty_manager(roster: EnemyRoster) -> EnemyManager {
    let tuning = SpawnTuning {
        initial: Vec::new(),
        ..Default::default()
    };
    EnemyManager::new(roster, tuning, AnimationLibrary::placeholders(), 7)
}

fn enemy_at(kind: EnemyKind, x: f32, y: f32, stats: EnemyStats) -> Enemy {
    Enemy::new(EnemyId(0), kind, Vec2::new(x, y), stats, Animator::Placeholder)
}

fn count_cue(audio: &AudioQueue, cue: SoundCue) -> usize {
    audio.sounds().filter(|c| *c == cue).count()
}

// ----------------------------------------------------------------------------
// Timers
// ----------------------------------------------------------------------------

#[test]
fn test_timer_never_goes_negative() {
    let mut timer = CombatTimer::default();
    timer.start(0.3);

    for dt in [0.1, 0.25, -0.5, 1.0, 0.0] {
        timer.tick(dt);
        assert!(timer.remaining() >= 0.0);
        assert_eq!(timer.is_active(), timer.remaining() > 0.0);
    }
    assert!(!timer.is_active());
    assert_eq!(timer.remaining(), 0.0);
}

#[test]
fn test_timer_ignores_negative_dt() {
    let mut timer = CombatTimer::default();
    timer.start(0.2);
    timer.tick(-1.0);
    assert_eq!(timer.remaining(), 0.2);
}

#[test]
fn test_timer_start_clamps_negative_duration() {
    let mut timer = CombatTimer::default();
    timer.start(-3.0);
    assert!(!timer.is_active());
}

// ----------------------------------------------------------------------------
// Health and combo
// ----------------------------------------------------------------------------

#[test]
fn test_health_floors_at_zero() {
    let mut health = Health::new(20);
    assert_eq!(health.take_damage(15), 15);
    assert_eq!(health.take_damage(15), 5);
    assert_eq!(health.current, 0);
    assert!(health.is_dead());
}

#[test]
fn test_combo_scales_damage_and_resets_after_window() {
    let mut combo = ComboState::default();
    let mut damages = Vec::new();

    for _ in 0..3 {
        combo.register_attack(0.4, 3);
        damages.push(combo.scaled_damage(10, 20));
        combo.tick(0.1);
    }
    assert_eq!(damages, vec![10, 12, 14]);

    combo.tick(0.5);
    assert_eq!(combo.count, 0);

    combo.register_attack(0.4, 3);
    assert_eq!(combo.scaled_damage(10, 20), 10);
}

#[test]
fn test_combo_wraps_after_max() {
    let mut combo = ComboState::default();
    for _ in 0..3 {
        combo.register_attack(0.4, 3);
    }
    assert_eq!(combo.register_attack(0.4, 3), 1);
}

// ----------------------------------------------------------------------------
// Player attacks
// ----------------------------------------------------------------------------

fn quick_attack_tuning() -> PlayerTuning {
    PlayerTuning {
        attack_damage: 10,
        attack_duration: 0.1,
        attack_cooldown: 0.1,
        combo_window: 0.4,
        ..player_tuning()
    }
}

#[test]
fn test_player_combo_damage_sequence() {
    let level = ground_level();
    let mut player = grounded_player(quick_attack_tuning(), &level);
    let mut audio = AudioQueue::default();
    let mut damages = Vec::new();

    for _ in 0..3 {
        assert!(player.start_attack(&mut audio));
        damages.push(player.attack_damage);
        step(&mut player, FRAME, PlayerInput::idle(), &level, &mut audio);
        step(&mut player, FRAME, PlayerInput::idle(), &level, &mut audio);
    }
    assert_eq!(damages, vec![10, 12, 14]);
    assert!(audio.contains(SoundCue::Attack(1)));
    assert!(audio.contains(SoundCue::Attack(3)));
    assert_eq!(count_cue(&audio, SoundCue::Combo), 1);

    for _ in 0..8 {
        step(&mut player, FRAME, PlayerInput::idle(), &level, &mut audio);
    }
    assert!(player.start_attack(&mut audio));
    assert_eq!(player.attack_damage, 10);
}

#[test]
fn test_attack_blocked_during_cooldown() {
    let level = ground_level();
    let mut player = grounded_player(player_tuning(), &level);
    let mut audio = AudioQueue::default();

    assert!(player.start_attack(&mut audio));
    assert!(!player.start_attack(&mut audio));
}

#[test]
fn test_attack_end_parks_hitbox() {
    let level = ground_level();
    let mut player = grounded_player(quick_attack_tuning(), &level);
    let mut audio = AudioQueue::default();

    player.start_attack(&mut audio);
    step(&mut player, FRAME, PlayerInput::idle(), &level, &mut audio);
    assert!(!player.hitbox.is_parked());
    assert_eq!(player.hitbox.rect.x, player.body.aabb().right());

    step(&mut player, FRAME, PlayerInput::idle(), &level, &mut audio);
    assert!(!player.is_attacking());
    assert!(player.hitbox.is_parked());
}

#[test]
fn test_hitbox_faces_left_edge() {
    let level = ground_level();
    let mut player = grounded_player(player_tuning(), &level);
    let mut audio = AudioQueue::default();
    player.body.facing = Facing::Left;

    player.start_attack(&mut audio);
    step(&mut player, FRAME, PlayerInput::idle(), &level, &mut audio);

    let body = player.body.aabb();
    assert_eq!(player.hitbox.rect.right(), body.left());
    assert_eq!(player.hitbox.rect.y, body.top() + player.tuning().hitbox_offset_y);
}

#[test]
fn test_hitbox_redirects_upward_for_enemy_overhead() {
    let level = ground_level();
    let mut player = grounded_player(player_tuning(), &level);
    let mut audio = AudioQueue::default();
    let body = player.body.aabb();
    let overhead = Aabb::new(body.x + 8.0, body.top() - 100.0, 48.0, 48.0);

    player.start_attack(&mut audio);
    player.update(
        FRAME,
        &PlayerInput::idle(),
        &level,
        &physics(),
        &[overhead],
        &mut audio,
    );

    let body = player.body.aabb();
    assert!(player.hitbox.rect.bottom() <= body.top() + 20.0);
    assert!(player.hitbox.rect.top() < body.top());
    assert!(player.hitbox.rect.intersects(&overhead));
}

#[test]
fn test_special_attack_dashes_forward() {
    let level = ground_level();
    let mut player = grounded_player(player_tuning(), &level);
    let mut audio = AudioQueue::default();

    assert!(player.start_special(&mut audio));
    assert_eq!(player.attack, Some(AttackVariant::Special));
    assert_eq!(player.attack_damage, 22);
    assert!((player.timers.attack_cooldown.remaining() - 0.45).abs() < 1e-5);
    assert!(audio.contains(SoundCue::ShadowStrike));

    let start_x = player.body.position.x;
    step(&mut player, FRAME, PlayerInput::moving(-1.0), &level, &mut audio);

    // Dash ignores steering input for its duration.
    assert_eq!(player.body.velocity.x, player.tuning().dash_speed);
    assert!(player.body.position.x > start_x);
    assert_eq!(player.hitbox.rect.width, player.tuning().special_hitbox_width);
}

#[test]
fn test_special_duration_falls_back_to_tuning() {
    let player = Player::new(player_tuning(), Animator::Placeholder);
    assert_eq!(player.special_duration(), player_tuning().special_duration);
}

#[test]
fn test_special_requires_ground() {
    let mut player = Player::new(player_tuning(), Animator::Placeholder);
    let mut audio = AudioQueue::default();
    assert!(!player.body.grounded);
    assert!(!player.start_special(&mut audio));
}

// ----------------------------------------------------------------------------
// Player movement
// ----------------------------------------------------------------------------

#[test]
fn test_acceleration_caps_at_speed() {
    let level = ground_level();
    let mut player = grounded_player(player_tuning(), &level);
    let mut audio = AudioQueue::default();

    step(&mut player, 0.01, PlayerInput::moving(1.0), &level, &mut audio);
    assert!((player.body.velocity.x - 25.0).abs() < 1e-3);

    for _ in 0..50 {
        step(&mut player, 0.01, PlayerInput::moving(1.0), &level, &mut audio);
    }
    assert_eq!(player.body.velocity.x, player.tuning().speed);
}

#[test]
fn test_friction_snaps_to_zero() {
    let level = ground_level();
    let mut player = grounded_player(player_tuning(), &level);
    let mut audio = AudioQueue::default();
    player.body.velocity.x = 10.0;

    step(&mut player, 0.01, PlayerInput::idle(), &level, &mut audio);

    assert_eq!(player.body.velocity.x, 0.0);
}

#[test]
fn test_hit_stun_blocks_steering() {
    let level = ground_level();
    let mut player = grounded_player(player_tuning(), &level);
    let mut audio = AudioQueue::default();
    player.timers.hit_stun.start(0.2);

    step(&mut player, 0.01, PlayerInput::moving(1.0), &level, &mut audio);

    assert_eq!(player.body.velocity.x, 0.0);
    assert_eq!(player.body.facing, Facing::Right);
}

// ----------------------------------------------------------------------------
// Jumping
// ----------------------------------------------------------------------------

/// A 300-wide ledge with nothing else to stand on.
fn ledge_level() -> Level {
    Level::new(
        vec![Aabb::new(0.0, GROUND_Y, 300.0, 50.0)],
        boundaries(),
        3000.0,
        720.0,
        600.0,
    )
}

/// Player who just walked off the ledge, coyote timer freshly started.
fn player_leaving_ledge(level: &Level, audio: &mut AudioQueue) -> Player {
    let tuning = PlayerTuning {
        spawn_x: 200.0,
        ..player_tuning()
    };
    let mut player = grounded_player(tuning, level);
    player.body.position.x = 320.0;
    step(&mut player, 0.01, PlayerInput::idle(), level, audio);
    assert!(!player.body.grounded);
    assert!(player.timers.coyote.is_active());
    player
}

fn jump_input() -> PlayerInput {
    PlayerInput {
        jump_pressed: true,
        ..Default::default()
    }
}

#[test]
fn test_coyote_jump_within_window() {
    let level = ledge_level();
    let mut audio = AudioQueue::default();
    let mut player = player_leaving_ledge(&level, &mut audio);

    for _ in 0..9 {
        step(&mut player, 0.01, PlayerInput::idle(), &level, &mut audio);
    }
    step(&mut player, 0.01, jump_input(), &level, &mut audio);

    assert!(player.body.velocity.y < 0.0);
    assert!(audio.contains(SoundCue::Jump));
    assert!(!player.timers.coyote.is_active());
    assert!(!player.timers.jump_buffer.is_active());
}

#[test]
fn test_coyote_jump_after_window_fails() {
    let level = ledge_level();
    let mut audio = AudioQueue::default();
    let mut player = player_leaving_ledge(&level, &mut audio);

    for _ in 0..19 {
        step(&mut player, 0.01, PlayerInput::idle(), &level, &mut audio);
    }
    step(&mut player, 0.01, jump_input(), &level, &mut audio);

    assert!(player.body.velocity.y > 0.0);
    assert!(!audio.contains(SoundCue::Jump));
}

fn falling_player(gap: f32) -> Player {
    let tuning = PlayerTuning {
        spawn_y: GROUND_Y - 64.0 - gap,
        ..player_tuning()
    };
    Player::new(tuning, Animator::Placeholder)
}

#[test]
fn test_buffered_jump_fires_on_landing() {
    let level = ground_level();
    let mut audio = AudioQueue::default();
    // Six ticks of falling at dt 0.01 covers 3.15 units.
    let mut player = falling_player(3.0);

    step(&mut player, 0.01, jump_input(), &level, &mut audio);
    assert!(player.body.velocity.y > 0.0);

    for _ in 0..4 {
        step(&mut player, 0.01, PlayerInput::idle(), &level, &mut audio);
        assert!(player.body.velocity.y > 0.0);
    }

    step(&mut player, 0.01, PlayerInput::idle(), &level, &mut audio);
    assert_eq!(player.body.velocity.y, -player.tuning().jump_force);

    // No second jump from the same request.
    for _ in 0..150 {
        step(&mut player, 0.01, PlayerInput::idle(), &level, &mut audio);
    }
    assert!(player.body.grounded);
    assert_eq!(count_cue(&audio, SoundCue::Jump), 1);
}

#[test]
fn test_buffered_jump_expires_before_long_fall() {
    let level = ground_level();
    let mut audio = AudioQueue::default();
    // Lands on tick 20, long after the 0.1s buffer.
    let mut player = falling_player(30.0);

    step(&mut player, 0.01, jump_input(), &level, &mut audio);
    for _ in 0..24 {
        step(&mut player, 0.01, PlayerInput::idle(), &level, &mut audio);
    }

    assert!(player.body.grounded);
    assert!(!audio.contains(SoundCue::Jump));
    assert!(audio.contains(SoundCue::Land));
}

#[test]
fn test_player_death_zone_is_lethal() {
    let level = ground_level();
    let tuning = PlayerTuning {
        spawn_y: 690.0,
        ..player_tuning()
    };
    let mut player = Player::new(tuning, Animator::Placeholder);
    let mut audio = AudioQueue::default();

    step(&mut player, FRAME, PlayerInput::idle(), &level, &mut audio);

    assert!(player.health.is_dead());
}

// ----------------------------------------------------------------------------
// Player damage intake
// ----------------------------------------------------------------------------

#[test]
fn test_player_take_damage_knocks_back() {
    let level = ground_level();
    let mut player = grounded_player(player_tuning(), &level);
    let mut audio = AudioQueue::default();

    assert!(player.take_damage(15, &mut audio));

    assert_eq!(player.health.current, 85);
    assert_eq!(player.body.velocity.x, -player.tuning().knockback_x);
    assert_eq!(player.body.velocity.y, -player.tuning().knockback_y);
    assert!(player.timers.hit_stun.is_active());
    assert!(player.is_invulnerable());
    assert!(audio.contains(SoundCue::PlayerHit));
}

#[test]
fn test_player_invulnerability_absorbs_hits() {
    let level = ground_level();
    let mut player = grounded_player(player_tuning(), &level);
    let mut audio = AudioQueue::default();

    player.take_damage(15, &mut audio);
    assert!(!player.take_damage(15, &mut audio));
    assert_eq!(player.health.current, 85);
}

#[test]
fn test_player_reset_restores_spawn() {
    let level = ground_level();
    let mut player = grounded_player(player_tuning(), &level);
    let mut audio = AudioQueue::default();
    player.take_damage(40, &mut audio);
    player.start_attack(&mut audio);
    player.body.position.x = 900.0;

    player.reset();

    assert_eq!(player.health.current, player.health.max);
    assert_eq!(player.body.position, Vec2::new(100.0, GROUND_Y - 64.0));
    assert_eq!(player.body.velocity, Vec2::ZERO);
    assert!(!player.is_attacking());
    assert!(!player.is_invulnerable());
}

// ----------------------------------------------------------------------------
// Enemy AI
// ----------------------------------------------------------------------------

fn far_player() -> Aabb {
    Aabb::new(2900.0, GROUND_Y - 64.0, 64.0, 64.0)
}

#[test]
fn test_patrol_is_a_triangle_wave() {
    let level = ground_level();
    let ai = AiTuning::default();
    let stats = EnemyStats {
        speed: 50.0,
        patrol_range: 200.0,
        ..Default::default()
    };
    let mut enemy = enemy_at(EnemyKind::GroundBasic, 500.0, GROUND_Y - 48.0, stats);
    let player = far_player();

    let mut turns = Vec::new();
    let mut facing = enemy.body.facing;
    let mut min_x = f32::MAX;
    let mut max_x = f32::MIN;

    for _ in 0..260 {
        enemy.update(0.1, &player, &level, &physics(), &ai);
        assert_eq!(enemy.ai_state, AiState::Patrol);
        min_x = min_x.min(enemy.body.position.x);
        max_x = max_x.max(enemy.body.position.x);
        if enemy.body.facing != facing {
            facing = enemy.body.facing;
            turns.push((facing, enemy.body.position.x));
        }
    }

    assert!((294.0..=301.0).contains(&min_x), "min x {min_x}");
    assert!((699.0..=706.0).contains(&max_x), "max x {max_x}");
    assert_eq!(turns[0].0, Facing::Right);
    assert_eq!(turns[1].0, Facing::Left);
    assert_eq!(turns[2].0, Facing::Right);
}

#[test]
fn test_evaluate_state_thresholds() {
    let enemy = enemy_at(EnemyKind::GroundBasic, 500.0, 452.0, EnemyStats::default());

    let close = Aabb::new(450.0, 440.0, 64.0, 64.0);
    let near = Aabb::new(700.0, 440.0, 64.0, 64.0);
    let close_but_high = Aabb::new(480.0, 300.0, 64.0, 64.0);

    assert_eq!(enemy.evaluate_state(&close), AiState::Attack);
    assert_eq!(enemy.evaluate_state(&near), AiState::Chase);
    assert_eq!(enemy.evaluate_state(&close_but_high), AiState::Chase);
    assert_eq!(enemy.evaluate_state(&far_player()), AiState::Patrol);
}

#[test]
fn test_ground_chase_moves_toward_player() {
    let level = ground_level();
    let mut enemy = enemy_at(EnemyKind::GroundBasic, 500.0, GROUND_Y - 48.0, EnemyStats::default());
    let player = Aabb::new(700.0, GROUND_Y - 64.0, 64.0, 64.0);

    enemy.update(FRAME, &player, &level, &physics(), &AiTuning::default());

    assert_eq!(enemy.ai_state, AiState::Chase);
    assert_eq!(enemy.body.facing, Facing::Right);
    assert_eq!(enemy.body.velocity.x, enemy.stats.speed);
}

#[test]
fn test_ground_chase_waits_under_player() {
    let level = ground_level();
    let mut enemy = enemy_at(EnemyKind::GroundBasic, 500.0, GROUND_Y - 48.0, EnemyStats::default());
    let player = Aabb::new(510.0, 250.0, 64.0, 64.0);

    enemy.update(FRAME, &player, &level, &physics(), &AiTuning::default());

    assert_eq!(enemy.ai_state, AiState::Chase);
    assert_eq!(enemy.body.velocity.x, 0.0);
}

#[test]
fn test_flying_patrol_hovers_without_falling() {
    let level = ground_level();
    let ai = AiTuning::default();
    let mut enemy = enemy_at(EnemyKind::Flying, 600.0, 300.0, EnemyStats::default());

    for _ in 0..100 {
        enemy.update(FRAME, &far_player(), &level, &physics(), &ai);
        let offset = (enemy.body.position.y - 300.0).abs();
        assert!(offset <= ai.hover_amplitude + 1.0, "drifted {offset}");
    }
    assert!(!enemy.body.grounded);
}

#[test]
fn test_flying_chase_holds_over_player() {
    let level = ground_level();
    let mut enemy = enemy_at(EnemyKind::Flying, 500.0, 200.0, EnemyStats::default());
    let player = Aabb::new(510.0, GROUND_Y - 64.0, 64.0, 64.0);

    enemy.update(FRAME, &player, &level, &physics(), &AiTuning::default());

    assert_eq!(enemy.ai_state, AiState::Chase);
    assert_eq!(enemy.body.velocity.x, 0.0);
    assert!(enemy.body.velocity.y > 0.0);
}

#[test]
fn test_flying_chase_clamps_vertical_speed() {
    let level = ground_level();
    let ai = AiTuning::default();
    let mut enemy = enemy_at(EnemyKind::Flying, 500.0, 50.0, EnemyStats::default());
    let player = Aabb::new(700.0, GROUND_Y - 64.0, 64.0, 64.0);

    enemy.update(FRAME, &player, &level, &physics(), &ai);

    assert_eq!(enemy.body.velocity.y, ai.flying_max_vertical_speed);
    assert_eq!(enemy.body.velocity.x, enemy.stats.speed * ai.flying_chase_multiplier);
}

#[test]
fn test_enemy_attack_stops_and_places_hitbox() {
    let level = ground_level();
    let mut enemy = enemy_at(EnemyKind::GroundBasic, 500.0, GROUND_Y - 48.0, EnemyStats::default());
    let player = Aabb::new(450.0, GROUND_Y - 64.0, 64.0, 64.0);

    enemy.update(FRAME, &player, &level, &physics(), &AiTuning::default());

    assert_eq!(enemy.ai_state, AiState::Attack);
    assert_eq!(enemy.body.velocity.x, 0.0);
    assert!(enemy.is_attacking());
    assert!(enemy.attack_cooldown.is_active());
    assert!(!enemy.hitbox.is_parked());
    assert!(enemy.hitbox.rect.intersects(&player));
}

#[test]
fn test_hit_stun_freezes_behavior_but_not_knockback() {
    let level = ground_level();
    let ai = AiTuning::default();
    let mut enemy = enemy_at(EnemyKind::GroundBasic, 500.0, GROUND_Y - 48.0, EnemyStats::default());
    let mut audio = AudioQueue::default();
    let player = Aabb::new(700.0, GROUND_Y - 64.0, 64.0, 64.0);
    enemy.attack_cooldown.start(0.1);

    assert!(!enemy.take_damage(10, 1.0, &mut audio));
    enemy.update(0.05, &player, &level, &physics(), &ai);

    assert!(enemy.is_stunned());
    assert_eq!(enemy.body.velocity.x, 0.0);
    assert!(enemy.body.position.x > 500.0);
    assert!((enemy.attack_cooldown.remaining() - 0.05).abs() < 1e-5);
    assert!(audio.contains(SoundCue::EnemyHit));
}

#[test]
fn test_knockback_decays_to_zero() {
    let level = ground_level();
    let ai = AiTuning::default();
    let mut enemy = enemy_at(EnemyKind::GroundBasic, 500.0, GROUND_Y - 48.0, EnemyStats::default());
    let mut audio = AudioQueue::default();

    enemy.take_damage(10, -1.0, &mut audio);
    assert!(enemy.knockback_vx < 0.0);

    for _ in 0..60 {
        enemy.update(FRAME, &far_player(), &level, &physics(), &ai);
    }
    assert_eq!(enemy.knockback_vx, 0.0);
}

#[test]
fn test_boss_defeat_cues() {
    let stats = EnemyRoster::default().boss;
    let mut boss = enemy_at(EnemyKind::Boss, 2480.0, 340.0, stats);
    let mut audio = AudioQueue::default();

    assert!(boss.take_damage(1000, 1.0, &mut audio));

    assert!(audio.contains(SoundCue::EnemyDeath));
    assert!(audio.contains(SoundCue::BossDefeat));
    assert!(!audio.contains(SoundCue::EnemyHit));
}

#[test]
fn test_enemy_death_zone_kills() {
    let level = ground_level();
    let mut enemy = enemy_at(EnemyKind::GroundBasic, 500.0, 690.0, EnemyStats::default());

    enemy.update(FRAME, &far_player(), &level, &physics(), &AiTuning::default());

    assert!(enemy.is_dead());
}

// ----------------------------------------------------------------------------
// Enemy manager
// ----------------------------------------------------------------------------

#[test]
fn test_manager_starts_with_initial_layout() {
    let tuning = SpawnTuning::default();
    let manager = EnemyManager::new(
        EnemyRoster::default(),
        tuning.clone(),
        AnimationLibrary::placeholders(),
        1,
    );

    assert_eq!(manager.len(), tuning.initial.len());
    for (enemy, point) in manager.enemies().iter().zip(&tuning.initial) {
        assert_eq!(enemy.kind, point.kind);
        assert_eq!(enemy.body.position, Vec2::new(point.x, point.y));
    }
}

#[test]
fn test_manager_respects_cap() {
    let tuning = SpawnTuning {
        max_enemies: 2,
        ..Default::default()
    };
    let mut manager = EnemyManager::new(
        EnemyRoster::default(),
        tuning,
        AnimationLibrary::placeholders(),
        1,
    );

    assert_eq!(manager.len(), 2);
    assert_eq!(manager.spawn(EnemyKind::Flying, Vec2::new(100.0, 100.0)), None);
}

#[test]
fn test_manager_timed_spawns_ahead_of_player() {
    let level = ground_level();
    let mut manager = empty_manager(EnemyRoster::default());
    let mut audio = AudioQueue::default();
    let player = Aabb::new(100.0, GROUND_Y - 64.0, 64.0, 64.0);

    let mut spawned = Vec::new();
    for _ in 0..(5.5 / 0.05) as usize {
        let report = manager.update(
            0.05,
            &player,
            &level,
            &physics(),
            &AiTuning::default(),
            &mut audio,
        );
        spawned.extend(report.spawned);
    }

    assert_eq!(spawned.len(), 1);
    assert!(matches!(
        spawned[0].1,
        EnemyKind::GroundBasic | EnemyKind::GroundFast
    ));
}

#[test]
fn test_spawns_near_right_edge_stay_in_level() {
    let level = ground_level();
    let tuning = SpawnTuning {
        initial: Vec::new(),
        ground_spawn_y: GROUND_Y - 48.0,
        ..Default::default()
    };
    let mut manager = EnemyManager::new(
        EnemyRoster::default(),
        tuning,
        AnimationLibrary::placeholders(),
        7,
    );
    let mut audio = AudioQueue::default();
    let player = Aabb::new(2600.0, GROUND_Y - 64.0, 64.0, 64.0);

    for _ in 0..(60.0 / 0.05) as usize {
        manager.update(
            0.05,
            &player,
            &level,
            &physics(),
            &AiTuning::default(),
            &mut audio,
        );

        for enemy in manager.enemies() {
            let body = enemy.body.aabb();
            assert!(body.left() >= 0.0, "{:?} left of level", enemy.id);
            assert!(body.right() <= level.width, "{:?} right of level", enemy.id);
            assert!(body.bottom() <= GROUND_Y, "{:?} below ground", enemy.id);
        }
    }

    let timed: Vec<_> = manager
        .enemies()
        .iter()
        .filter(|e| e.kind != EnemyKind::Boss)
        .collect();
    assert!(!timed.is_empty());
    for enemy in timed {
        assert_eq!(enemy.start.x, level.width - enemy.stats.width);
    }
}

fn run_manager(seed: u64, seconds: f32) -> EnemyManager {
    let level = ground_level();
    let mut manager = EnemyManager::new(
        EnemyRoster::default(),
        SpawnTuning::default(),
        AnimationLibrary::placeholders(),
        seed,
    );
    let mut audio = AudioQueue::default();
    let player = Aabb::new(100.0, GROUND_Y - 64.0, 64.0, 64.0);

    for _ in 0..(seconds / 0.05) as usize {
        manager.update(
            0.05,
            &player,
            &level,
            &physics(),
            &AiTuning::default(),
            &mut audio,
        );
    }
    manager
}

fn snapshot(manager: &EnemyManager) -> Vec<(EnemyId, EnemyKind, Vec2)> {
    manager
        .enemies()
        .iter()
        .map(|e| (e.id, e.kind, e.body.position))
        .collect()
}

#[test]
fn test_manager_is_deterministic_per_seed() {
    let a = run_manager(42, 30.0);
    let b = run_manager(42, 30.0);

    assert_eq!(snapshot(&a), snapshot(&b));
}

#[test]
fn test_manager_reset_restores_layout() {
    let mut manager = run_manager(42, 30.0);
    let fresh = EnemyManager::new(
        EnemyRoster::default(),
        SpawnTuning::default(),
        AnimationLibrary::placeholders(),
        42,
    );

    manager.reset();

    assert_eq!(snapshot(&manager), snapshot(&fresh));
    assert!(!manager.boss_spawned());
}

#[test]
fn test_boss_spawns_once_past_trigger() {
    let level = ground_level();
    let tuning = SpawnTuning {
        max_enemies: 0,
        initial: Vec::new(),
        ..Default::default()
    };
    let mut manager = EnemyManager::new(
        EnemyRoster::default(),
        tuning,
        AnimationLibrary::placeholders(),
        3,
    );
    let mut audio = AudioQueue::default();
    let player = Aabb::new(2300.0, GROUND_Y - 64.0, 64.0, 64.0);

    let first = manager.update(
        FRAME,
        &player,
        &level,
        &physics(),
        &AiTuning::default(),
        &mut audio,
    );
    let second = manager.update(
        FRAME,
        &player,
        &level,
        &physics(),
        &AiTuning::default(),
        &mut audio,
    );

    assert!(first.boss_spawned);
    assert!(!second.boss_spawned);
    assert_eq!(manager.len(), 1);
    assert_eq!(manager.enemies()[0].kind, EnemyKind::Boss);
    assert_eq!(count_cue(&audio, SoundCue::BossSpawn), 1);
}

#[test]
fn test_manager_culls_dead_enemies() {
    let level = ground_level();
    let mut manager = empty_manager(EnemyRoster::default());
    let mut audio = AudioQueue::default();
    let id = manager
        .spawn(EnemyKind::GroundBasic, Vec2::new(500.0, 690.0))
        .unwrap();

    let report = manager.update(
        FRAME,
        &far_player(),
        &level,
        &physics(),
        &AiTuning::default(),
        &mut audio,
    );

    assert_eq!(report.culled, vec![id]);
    assert!(manager.is_empty());
}

// ----------------------------------------------------------------------------
// Combat resolution
// ----------------------------------------------------------------------------

#[test]
fn test_one_hit_per_enemy_per_swing() {
    let level = ground_level();
    let mut player = grounded_player(player_tuning(), &level);
    let mut manager = empty_manager(EnemyRoster::default());
    let mut audio = AudioQueue::default();
    let id = manager
        .spawn(EnemyKind::GroundBasic, Vec2::new(150.0, GROUND_Y - 48.0))
        .unwrap();

    player.start_attack(&mut audio);
    let mut hits = 0;
    while player.is_attacking() {
        let bodies = manager.bodies();
        player.update(FRAME, &PlayerInput::idle(), &level, &physics(), &bodies, &mut audio);
        hits += resolve_combat(&mut player, &mut manager, &mut audio)
            .enemy_hits
            .len();
    }

    assert_eq!(hits, 1);
    let enemy = manager.get_mut(id).unwrap();
    assert_eq!(enemy.health.current, 35);
}

#[test]
fn test_basic_melee_kill_scores_combo_bonus() {
    let level = ground_level();
    let mut player = grounded_player(quick_attack_tuning(), &level);
    let roster = EnemyRoster {
        ground_basic: EnemyStats {
            health: 20,
            ..Default::default()
        },
        ..Default::default()
    };
    let points = roster.ground_basic.points;
    let mut manager = empty_manager(roster);
    let mut audio = AudioQueue::default();
    manager
        .spawn(EnemyKind::GroundBasic, Vec2::new(150.0, GROUND_Y - 48.0))
        .unwrap();

    let mut reports = Vec::new();
    for _ in 0..3 {
        assert!(player.start_attack(&mut audio));
        for _ in 0..2 {
            step(&mut player, FRAME, PlayerInput::idle(), &level, &mut audio);
            reports.push(resolve_combat(&mut player, &mut manager, &mut audio));
        }
    }

    let hits: Vec<EnemyHit> = reports.iter().flat_map(|r| r.enemy_hits.clone()).collect();
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].damage, 10);
    assert!(!hits[0].killed);
    assert_eq!(hits[1].damage, 12);
    assert!(hits[1].killed);

    let score: u32 = reports.iter().map(|r| r.score).sum();
    assert_eq!(score, points + COMBO_KILL_BONUS);
    assert!(manager.is_empty());
    assert!(audio.contains(SoundCue::EnemyDeath));
}

#[test]
fn test_kill_score() {
    assert_eq!(kill_score(100, 1), 100);
    assert_eq!(kill_score(100, 3), 200);
    assert_eq!(kill_score(100, 0), 100);
}

#[test]
fn test_enemy_hitbox_damages_player_once() {
    let level = ground_level();
    let mut player = grounded_player(player_tuning(), &level);
    let mut manager = empty_manager(EnemyRoster::default());
    let mut audio = AudioQueue::default();
    let id = manager
        .spawn(EnemyKind::GroundBasic, Vec2::new(200.0, GROUND_Y - 48.0))
        .unwrap();
    let body = player.body.aabb();
    {
        let enemy = manager.get_mut(id).unwrap();
        enemy.attack_timer.start(0.5);
        enemy.hitbox.rect = body;
    }

    let first = resolve_combat(&mut player, &mut manager, &mut audio);
    let second = resolve_combat(&mut player, &mut manager, &mut audio);

    assert_eq!(first.player_hits, vec![PlayerHit { by: id, damage: 15 }]);
    assert!(second.player_hits.is_empty());
    assert_eq!(player.health.current, 85);
}

#[test]
fn test_idle_enemy_hitbox_is_harmless() {
    let level = ground_level();
    let mut player = grounded_player(player_tuning(), &level);
    let mut manager = empty_manager(EnemyRoster::default());
    let mut audio = AudioQueue::default();
    manager
        .spawn(EnemyKind::GroundBasic, Vec2::new(120.0, GROUND_Y - 48.0))
        .unwrap();

    let report = resolve_combat(&mut player, &mut manager, &mut audio);

    assert!(report.player_hits.is_empty());
    assert_eq!(player.health.current, player.health.max);
}

#[test]
fn test_third_combo_hit_is_critical() {
    let level = ground_level();
    let mut player = grounded_player(quick_attack_tuning(), &level);
    let mut manager = empty_manager(EnemyRoster::default());
    let mut audio = AudioQueue::default();
    manager
        .spawn(EnemyKind::GroundBasic, Vec2::new(150.0, GROUND_Y - 48.0))
        .unwrap();
    let target = manager.enemies()[0].body.aabb();

    let mut hits = Vec::new();
    for _ in 0..3 {
        assert!(player.start_attack(&mut audio));
        for _ in 0..2 {
            step(&mut player, FRAME, PlayerInput::idle(), &level, &mut audio);
            hits.extend(resolve_combat(&mut player, &mut manager, &mut audio).enemy_hits);
        }
    }

    let critical: Vec<bool> = hits.iter().map(|h| h.critical).collect();
    assert_eq!(critical, vec![false, false, true]);
    assert!(hits.iter().all(|h| h.target == target));
}

// ----------------------------------------------------------------------------
// Hit feedback
// ----------------------------------------------------------------------------

fn hit_on(target: Aabb, damage: i32, critical: bool) -> EnemyHit {
    EnemyHit {
        id: EnemyId(1),
        damage,
        killed: false,
        critical,
        target,
    }
}

#[test]
fn test_damage_number_rises_and_expires() {
    let mut feedback = CombatFeedback::default();
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let target = Aabb::new(100.0, 200.0, 48.0, 48.0);

    feedback.spawn_hit(&hit_on(target, 10, false), &mut rng);
    assert_eq!(feedback.damage_numbers()[0].position, Vec2::new(124.0, 200.0));
    assert_eq!(feedback.damage_numbers()[0].damage, 10);

    feedback.update(0.25);
    let number = &feedback.damage_numbers()[0];
    assert_eq!(number.position.y, 175.0);
    assert!(number.fade() < 1.0);

    feedback.update(0.25);
    feedback.update(0.25);
    assert_eq!(feedback.damage_numbers().len(), 1);

    feedback.update(0.25);
    assert!(feedback.damage_numbers().is_empty());
}

#[test]
fn test_spark_particles_spread_then_expire() {
    let mut feedback = CombatFeedback::default();
    let mut rng = ChaCha8Rng::seed_from_u64(9);
    let target = Aabb::new(300.0, 400.0, 64.0, 64.0);

    feedback.spawn_hit(&hit_on(target, 10, false), &mut rng);
    assert_eq!(feedback.sparks()[0].particles.len(), 8);

    feedback.update(0.1);
    for particle in &feedback.sparks()[0].particles {
        let distance = particle.position.distance(target.center());
        assert!((9.9..=20.1).contains(&distance), "distance {distance}");
        assert!((2.0..=4.0).contains(&particle.size));
    }

    feedback.update(0.15);
    assert!(feedback.sparks().is_empty());
    assert_eq!(feedback.damage_numbers().len(), 1);
}

#[test]
fn test_damage_number_tiers() {
    let mut feedback = CombatFeedback::default();
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let target = Aabb::new(0.0, 0.0, 48.0, 48.0);

    for (damage, critical) in [(12, false), (12, true), (30, false), (5, false)] {
        feedback.spawn_hit(&hit_on(target, damage, critical), &mut rng);
    }

    let tiers: Vec<DamageTier> = feedback.damage_numbers().iter().map(|n| n.tier()).collect();
    assert_eq!(
        tiers,
        vec![
            DamageTier::Normal,
            DamageTier::Critical,
            DamageTier::Heavy,
            DamageTier::Light
        ]
    );
}
