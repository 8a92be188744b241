//! Combat domain: gameplay messages published after each simulation tick.

use bevy::ecs::message::Message;
use bevy::prelude::*;

use crate::combat::enemy::{EnemyId, EnemyKind};

#[derive(Debug, Clone)]
pub struct EnemyDefeatedEvent {
    pub id: EnemyId,
    pub kind: EnemyKind,
    pub points: u32,
}

impl Message for EnemyDefeatedEvent {}

#[derive(Debug, Clone)]
pub struct PlayerHitEvent {
    pub damage: i32,
    pub health_left: i32,
}

impl Message for PlayerHitEvent {}

#[derive(Debug, Clone)]
pub struct LifeLostEvent {
    pub lives_left: u32,
}

impl Message for LifeLostEvent {}

#[derive(Debug, Clone)]
pub struct BossSpawnedEvent;

impl Message for BossSpawnedEvent {}

pub(crate) fn log_combat_messages(
    mut defeated: MessageReader<EnemyDefeatedEvent>,
    mut hits: MessageReader<PlayerHitEvent>,
    mut lives: MessageReader<LifeLostEvent>,
    mut bosses: MessageReader<BossSpawnedEvent>,
) {
    for event in defeated.read() {
        if event.kind == EnemyKind::Boss {
            info!("Boss defeated for {} points", event.points);
        } else {
            debug!("{:?} {:?} defeated (+{})", event.kind, event.id, event.points);
        }
    }
    for event in hits.read() {
        debug!("Player hit for {} ({} left)", event.damage, event.health_left);
    }
    for event in lives.read() {
        info!("Life lost, {} remaining", event.lives_left);
    }
    for _ in bosses.read() {
        info!("Boss encounter started");
    }
}
