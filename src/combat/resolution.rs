//! Combat domain: hitbox overlap tests between the player and enemies.

use crate::audio::AudioCues;
use crate::combat::enemy::{EnemyId, EnemyKind};
use crate::combat::player::Player;
use crate::combat::spawn::EnemyManager;
use crate::movement::Aabb;

/// Score bonus per combo step past the first when landing a kill.
pub const COMBO_KILL_BONUS: u32 = 50;
/// Combo count from which a hit counts as critical.
pub const CRITICAL_COMBO: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyHit {
    pub id: EnemyId,
    pub damage: i32,
    pub killed: bool,
    pub critical: bool,
    /// Enemy body at the moment of the hit.
    pub target: Aabb,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Defeat {
    pub id: EnemyId,
    pub kind: EnemyKind,
    pub points: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerHit {
    pub by: EnemyId,
    pub damage: i32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CombatReport {
    pub enemy_hits: Vec<EnemyHit>,
    pub defeated: Vec<Defeat>,
    pub player_hits: Vec<PlayerHit>,
    pub score: u32,
}

/// Points for a kill at the given combo count.
pub fn kill_score(points: u32, combo_count: u32) -> u32 {
    points + combo_count.saturating_sub(1) * COMBO_KILL_BONUS
}

/// Resolve one tick of combat. Enemies killed by the player are collected
/// during the scan and removed once it finishes.
pub fn resolve_combat(
    player: &mut Player,
    manager: &mut EnemyManager,
    audio: &mut dyn AudioCues,
) -> CombatReport {
    let mut report = CombatReport::default();

    if player.is_attacking() {
        let hitbox = player.hitbox.rect;
        let direction = player.body.facing.sign();
        let damage = player.attack_damage;
        let combo = player.combo.count;

        for enemy in manager.enemies_mut() {
            if enemy.is_dead()
                || player.hit_enemies.contains(&enemy.id)
                || !hitbox.intersects(&enemy.body.aabb())
            {
                continue;
            }

            player.hit_enemies.insert(enemy.id);
            let killed = enemy.take_damage(damage, direction, audio);
            report.enemy_hits.push(EnemyHit {
                id: enemy.id,
                damage,
                killed,
                critical: combo >= CRITICAL_COMBO,
                target: enemy.body.aabb(),
            });

            if killed {
                let points = kill_score(enemy.stats.points, combo);
                report.score += points;
                report.defeated.push(Defeat {
                    id: enemy.id,
                    kind: enemy.kind,
                    points,
                });
            }
        }

        let removed: Vec<EnemyId> = report.defeated.iter().map(|d| d.id).collect();
        manager.remove_all(&removed);
    }

    let body = player.body.aabb();
    for enemy in manager.enemies() {
        if !enemy.is_attacking() || !enemy.hitbox.rect.intersects(&body) {
            continue;
        }
        let damage = enemy.stats.attack_damage;
        if player.take_damage(damage, audio) {
            report.player_hits.push(PlayerHit {
                by: enemy.id,
                damage,
            });
        }
    }

    report
}
