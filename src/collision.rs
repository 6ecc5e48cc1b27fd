use std::collections::HashSet;

use bevy::prelude::*;

use crate::components::{aabb_overlap, Collider, FallingTarget, GamePosition, Projectile, Tuning};
use crate::events::{GameEventKind, GameEventLog};
use crate::flow::TickSet;
use crate::scoring::ScoreBoard;

pub struct CollisionPlugin;

impl Plugin for CollisionPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(FixedUpdate, resolve_hits.in_set(TickSet::Collide));
    }
}

/// Brute-force pairwise overlap over the live projectiles and targets.
/// Both collections stay small (bounded by flight time and cadence), so
/// there is no spatial index. A projectile is spent on its first hit
/// and a target dies at most once per tick.
fn resolve_hits(
    mut commands: Commands,
    tuning: Res<Tuning>,
    mut score_board: ResMut<ScoreBoard>,
    mut log: ResMut<GameEventLog>,
    projectiles: Query<(Entity, &GamePosition, &Collider), With<Projectile>>,
    targets: Query<(Entity, &GamePosition, &Collider), With<FallingTarget>>,
) {
    let mut destroyed: HashSet<Entity> = HashSet::new();

    for (projectile, shot_pos, shot_col) in projectiles.iter() {
        for (target, target_pos, target_col) in targets.iter() {
            if destroyed.contains(&target) {
                continue;
            }
            if aabb_overlap(shot_pos, shot_col, target_pos, target_col) {
                commands.entity(projectile).despawn();
                commands.entity(target).despawn();
                destroyed.insert(target);

                let leveled_up = score_board.register_hit(&tuning);
                log.push(GameEventKind::TargetDestroyed {
                    x: target_pos.x,
                    y: target_pos.y,
                    score: score_board.score,
                });
                if leveled_up {
                    log.push(GameEventKind::LevelUp {
                        level: score_board.level,
                    });
                    info!("[Skyfall] Level {}", score_board.level);
                }
                break;
            }
        }
    }
}
