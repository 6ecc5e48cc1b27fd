use bevy::prelude::*;

use crate::events::{GameEventKind, GameEventLog};
use crate::flow::TickSet;

/// Per-session counters. These survive restarts; a run's end rolls its
/// score into `last_run_score` / `best_score`.
#[derive(Resource, Default, Clone, serde::Serialize)]
pub struct SessionStats {
    pub fixed_frames: u64,
    pub shots_fired: u64,
    pub targets_spawned: u64,
    pub targets_destroyed: u64,
    pub runs_ended: u64,
    pub best_score: u32,
    pub last_run_score: u32,
}

pub fn fold_event(stats: &mut SessionStats, kind: &GameEventKind) {
    match kind {
        GameEventKind::ShotFired => stats.shots_fired += 1,
        GameEventKind::TargetSpawned { .. } => stats.targets_spawned += 1,
        GameEventKind::TargetDestroyed { .. } => stats.targets_destroyed += 1,
        GameEventKind::RunEnded { score, .. } => {
            stats.runs_ended += 1;
            stats.last_run_score = *score;
            stats.best_score = stats.best_score.max(*score);
        }
        GameEventKind::RunStarted | GameEventKind::LevelUp { .. } => {}
    }
}

pub struct TelemetryPlugin;

impl Plugin for TelemetryPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(SessionStats::default())
            .add_systems(FixedUpdate, update_session_stats.in_set(TickSet::Report));
    }
}

fn update_session_stats(mut stats: ResMut<SessionStats>, log: Res<GameEventLog>) {
    stats.fixed_frames += 1;
    for event in log.current_frame() {
        fold_event(&mut stats, &event.kind);
    }
}
