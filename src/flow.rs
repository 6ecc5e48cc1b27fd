use bevy::prelude::*;

use crate::components::Tuning;
use crate::events::{GameEventKind, GameEventLog};
use crate::input::PointerState;

#[derive(States, Default, Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub enum PlayState {
    #[default]
    Playing,
    GameOver,
}

/// Fixed-tick phases. Everything between Track and Settle is gated on
/// the run being active; Frame and Report run regardless so the event
/// clock and session stats keep moving.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TickSet {
    Frame,
    Track,
    Fire,
    Spawn,
    Move,
    Collide,
    Settle,
    Report,
}

/// Countdown armed on game over when timed restart is configured
#[derive(Resource, Default)]
pub struct AutoRestart(pub Option<Timer>);

pub struct FlowPlugin;

impl Plugin for FlowPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<PlayState>()
            .init_resource::<AutoRestart>()
            .configure_sets(
                FixedUpdate,
                (
                    TickSet::Frame,
                    TickSet::Track,
                    TickSet::Fire,
                    TickSet::Spawn,
                    TickSet::Move,
                    TickSet::Collide,
                    TickSet::Settle,
                    TickSet::Report,
                )
                    .chain(),
            )
            .configure_sets(
                FixedUpdate,
                (
                    TickSet::Track,
                    TickSet::Fire,
                    TickSet::Spawn,
                    TickSet::Move,
                    TickSet::Collide,
                    TickSet::Settle,
                )
                    .run_if(in_state(PlayState::Playing)),
            )
            .add_systems(OnEnter(PlayState::Playing), begin_run)
            .add_systems(OnEnter(PlayState::GameOver), arm_auto_restart)
            .add_systems(
                Update,
                (restart_on_press, tick_auto_restart).run_if(in_state(PlayState::GameOver)),
            );
    }
}

fn begin_run(mut auto_restart: ResMut<AutoRestart>, mut log: ResMut<GameEventLog>) {
    auto_restart.0 = None;
    log.push(GameEventKind::RunStarted);
    info!("[Skyfall] Run started");
}

fn arm_auto_restart(tuning: Res<Tuning>, mut auto_restart: ResMut<AutoRestart>) {
    auto_restart.0 = tuning
        .auto_restart_seconds
        .map(|secs| Timer::from_seconds(secs, TimerMode::Once));
}

/// Click/tap during game over starts a fresh run
fn restart_on_press(pointer: Res<PointerState>, mut next_state: ResMut<NextState<PlayState>>) {
    if pointer.restart_pressed {
        next_state.set(PlayState::Playing);
    }
}

fn tick_auto_restart(
    time: Res<Time>,
    mut auto_restart: ResMut<AutoRestart>,
    mut next_state: ResMut<NextState<PlayState>>,
) {
    if let Some(timer) = auto_restart.0.as_mut() {
        if timer.tick(time.delta()).just_finished() {
            next_state.set(PlayState::Playing);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::state::app::StatesPlugin;
    use bevy::time::TimeUpdateStrategy;
    use std::time::Duration;

    fn harness(tuning: Tuning) -> App {
        let mut app = App::new();
        app.insert_resource(tuning)
            .insert_resource(PointerState::default())
            .add_plugins(MinimalPlugins)
            .add_plugins(StatesPlugin)
            .insert_resource(Time::<Fixed>::from_seconds(0.01))
            .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(10)))
            .add_plugins(crate::events::GameEventsPlugin)
            .add_plugins(FlowPlugin);
        app
    }

    fn force_game_over(app: &mut App) {
        app.world_mut()
            .resource_mut::<NextState<PlayState>>()
            .set(PlayState::GameOver);
        app.update();
        assert_eq!(
            app.world().resource::<State<PlayState>>().get(),
            &PlayState::GameOver
        );
    }

    #[test]
    fn startup_enters_playing_and_logs_run_start() {
        let mut app = harness(Tuning::default());
        app.update();
        assert_eq!(
            app.world().resource::<State<PlayState>>().get(),
            &PlayState::Playing
        );
        let log = app.world().resource::<GameEventLog>();
        assert!(log
            .recent
            .iter()
            .any(|ev| ev.kind == GameEventKind::RunStarted));
    }

    #[test]
    fn press_restarts_after_game_over() {
        let mut app = harness(Tuning::default());
        app.update();
        force_game_over(&mut app);

        app.world_mut().resource_mut::<PointerState>().restart_pressed = true;
        app.update();
        app.update();
        assert_eq!(
            app.world().resource::<State<PlayState>>().get(),
            &PlayState::Playing
        );
    }

    #[test]
    fn press_during_play_is_ignored() {
        let mut app = harness(Tuning::default());
        app.update();
        app.world_mut().resource_mut::<PointerState>().restart_pressed = true;
        app.update();
        assert_eq!(
            app.world().resource::<State<PlayState>>().get(),
            &PlayState::Playing
        );
    }

    #[test]
    fn timed_restart_fires_when_configured() {
        let tuning = Tuning {
            auto_restart_seconds: Some(0.2),
            ..Tuning::default()
        };
        let mut app = harness(tuning);
        app.update();
        force_game_over(&mut app);
        assert!(app.world().resource::<AutoRestart>().0.is_some());

        for _ in 0..30 {
            app.update();
        }
        assert_eq!(
            app.world().resource::<State<PlayState>>().get(),
            &PlayState::Playing
        );
        // disarmed again for the new run
        assert!(app.world().resource::<AutoRestart>().0.is_none());
    }

    #[test]
    fn game_over_persists_without_auto_restart() {
        let mut app = harness(Tuning::default());
        app.update();
        force_game_over(&mut app);
        for _ in 0..60 {
            app.update();
        }
        assert_eq!(
            app.world().resource::<State<PlayState>>().get(),
            &PlayState::GameOver
        );
    }
}
