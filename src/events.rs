use std::collections::VecDeque;

use bevy::prelude::*;
use serde::Serialize;

use crate::flow::TickSet;

const MAX_EVENTS: usize = 500;

#[derive(Serialize, Clone, Debug, PartialEq)]
pub enum GameEventKind {
    RunStarted,
    ShotFired,
    TargetSpawned { x: f32 },
    TargetDestroyed { x: f32, y: f32, score: u32 },
    LevelUp { level: u32 },
    RunEnded { score: u32, level: u32 },
}

#[derive(Serialize, Clone)]
pub struct GameEvent {
    pub kind: GameEventKind,
    pub frame: u64,
}

/// Bounded log of recent gameplay events. Gameplay systems push,
/// telemetry (and anything else observing the run) scans.
#[derive(Resource, Default)]
pub struct GameEventLog {
    pub recent: VecDeque<GameEvent>,
    pub frame: u64,
    pub dropped_events: u64,
    last_overflow_log_frame: u64,
}

impl GameEventLog {
    pub fn push(&mut self, kind: GameEventKind) {
        self.recent.push_back(GameEvent {
            kind,
            frame: self.frame,
        });
        if self.recent.len() > MAX_EVENTS {
            let excess = self.recent.len() - MAX_EVENTS;
            for _ in 0..excess {
                self.recent.pop_front();
            }
            self.dropped_events = self.dropped_events.saturating_add(excess as u64);
            if self.frame.saturating_sub(self.last_overflow_log_frame) >= 60 {
                self.last_overflow_log_frame = self.frame;
                warn!(
                    "[Skyfall events] Dropped {} buffered events (total dropped: {})",
                    excess, self.dropped_events
                );
            }
        }
    }

    /// Events pushed during the current fixed frame, oldest first
    pub fn current_frame(&self) -> impl Iterator<Item = &GameEvent> {
        let frame = self.frame;
        self.recent.iter().filter(move |ev| ev.frame == frame)
    }
}

pub struct GameEventsPlugin;

impl Plugin for GameEventsPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(GameEventLog::default())
            .add_systems(FixedUpdate, tick_event_frame.in_set(TickSet::Frame));
    }
}

fn tick_event_frame(mut log: ResMut<GameEventLog>) {
    log.frame = log.frame.saturating_add(1);
}
