use bevy::prelude::*;

use crate::components::Tuning;
use crate::flow::PlayState;

/// Score, level, and the fall speed they drive. Fall speed lives here
/// rather than on each target so a level-up accelerates targets
/// already in flight.
#[derive(Resource, Clone, serde::Serialize)]
pub struct ScoreBoard {
    pub score: u32,
    pub level: u32,
    pub fall_speed: f32,
}

impl Default for ScoreBoard {
    fn default() -> Self {
        Self {
            score: 0,
            level: 1,
            fall_speed: Tuning::default().base_fall_speed,
        }
    }
}

impl ScoreBoard {
    /// Award a destroyed target. Returns true when the level rose:
    /// every time the score lands on a multiple of the level step,
    /// the level climbs and targets fall faster.
    pub fn register_hit(&mut self, tuning: &Tuning) -> bool {
        self.score += tuning.points_per_hit;
        if self.score % tuning.level_step == 0 {
            self.level += 1;
            self.fall_speed += tuning.fall_speed_step;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self, tuning: &Tuning) {
        self.score = 0;
        self.level = 1;
        self.fall_speed = tuning.base_fall_speed;
    }
}

pub struct ScoringPlugin;

impl Plugin for ScoringPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ScoreBoard>()
            .add_systems(OnEnter(PlayState::Playing), reset_score_board);
    }
}

fn reset_score_board(tuning: Res<Tuning>, mut score_board: ResMut<ScoreBoard>) {
    score_board.reset(&tuning);
}
