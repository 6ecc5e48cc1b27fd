use bevy::prelude::*;
use rand::rngs::SmallRng;
use rand::{Rng as _, SeedableRng as _};

use crate::components::{Collider, FallingTarget, GamePosition, HeadlessMode, Tuning};
use crate::events::{GameEventKind, GameEventLog};
use crate::flow::{PlayState, TickSet};
use crate::scoring::ScoreBoard;

/// Repeating target-spawn cadence
#[derive(Resource)]
pub struct SpawnTimer(pub Timer);

impl FromWorld for SpawnTimer {
    fn from_world(world: &mut World) -> Self {
        let interval = world.resource::<Tuning>().spawn_interval;
        Self(Timer::from_seconds(interval, TimerMode::Repeating))
    }
}

/// Spawn-position randomness; tests construct it with a fixed seed
#[derive(Resource)]
pub struct SpawnRng(pub SmallRng);

impl SpawnRng {
    pub fn seeded(seed: u64) -> Self {
        Self(SmallRng::seed_from_u64(seed))
    }
}

impl Default for SpawnRng {
    fn default() -> Self {
        Self(SmallRng::from_entropy())
    }
}

pub struct TargetsPlugin;

impl Plugin for TargetsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SpawnTimer>()
            .init_resource::<SpawnRng>()
            .add_systems(OnEnter(PlayState::Playing), clear_sky)
            .add_systems(FixedUpdate, spawn_when_ready.in_set(TickSet::Spawn))
            .add_systems(FixedUpdate, descend_targets.in_set(TickSet::Move))
            .add_systems(FixedUpdate, detect_breach.in_set(TickSet::Settle));
    }
}

/// Fresh run: no targets in flight, spawn cadence restarted from zero
fn clear_sky(
    mut commands: Commands,
    mut timer: ResMut<SpawnTimer>,
    targets: Query<Entity, With<FallingTarget>>,
) {
    timer.0.reset();
    for entity in targets.iter() {
        commands.entity(entity).despawn();
    }
}

fn spawn_when_ready(
    mut commands: Commands,
    time: Res<Time<Fixed>>,
    tuning: Res<Tuning>,
    headless: Res<HeadlessMode>,
    mut timer: ResMut<SpawnTimer>,
    mut rng: ResMut<SpawnRng>,
    mut log: ResMut<GameEventLog>,
) {
    if !timer.0.tick(time.delta()).just_finished() {
        return;
    }
    let half = tuning.target_width / 2.0;
    let x = rng.0.gen_range(half..=tuning.playfield_width - half);
    let y = tuning.target_spawn_y();

    let mut entity = commands.spawn((
        FallingTarget,
        GamePosition { x, y },
        Collider {
            width: tuning.target_width,
            height: tuning.target_height,
        },
        Transform::from_xyz(0.0, 0.0, 5.0),
    ));
    if !headless.0 {
        entity.insert(Sprite::from_color(
            Color::srgb(0.92, 0.92, 0.92),
            Vec2::new(tuning.target_width, tuning.target_height),
        ));
    }
    log.push(GameEventKind::TargetSpawned { x });
}

/// All targets share the score board's fall speed, so a level-up
/// accelerates targets already in flight.
fn descend_targets(
    time: Res<Time<Fixed>>,
    score_board: Res<ScoreBoard>,
    mut targets: Query<&mut GamePosition, With<FallingTarget>>,
) {
    let drop = score_board.fall_speed * time.delta_secs();
    for mut pos in targets.iter_mut() {
        pos.y -= drop;
    }
}

/// A target whose bottom edge reaches the playfield bottom ends the run
fn detect_breach(
    score_board: Res<ScoreBoard>,
    mut log: ResMut<GameEventLog>,
    mut next_state: ResMut<NextState<PlayState>>,
    targets: Query<(&GamePosition, &Collider), With<FallingTarget>>,
) {
    for (pos, collider) in targets.iter() {
        if pos.y - collider.height / 2.0 <= 0.0 {
            log.push(GameEventKind::RunEnded {
                score: score_board.score,
                level: score_board.level,
            });
            next_state.set(PlayState::GameOver);
            info!(
                "[Skyfall] Run over at score {} (level {})",
                score_board.score, score_board.level
            );
            break;
        }
    }
}
