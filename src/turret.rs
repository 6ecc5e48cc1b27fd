use bevy::prelude::*;

use crate::components::{Collider, GamePosition, HeadlessMode, Turret, Tuning};
use crate::flow::TickSet;
use crate::input::PointerState;

pub struct TurretPlugin;

impl Plugin for TurretPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_turret)
            .add_systems(FixedUpdate, track_pointer.in_set(TickSet::Track));
    }
}

fn spawn_turret(mut commands: Commands, tuning: Res<Tuning>, headless: Res<HeadlessMode>) {
    let mut entity = commands.spawn((
        Turret,
        GamePosition {
            x: tuning.playfield_width / 2.0,
            y: tuning.turret_center_y(),
        },
        Collider {
            width: tuning.turret_width,
            height: tuning.turret_height,
        },
        Transform::from_xyz(0.0, 0.0, 10.0),
    ));

    if !headless.0 {
        entity.insert(Sprite::from_color(
            Color::srgb(0.85, 0.2, 0.2),
            Vec2::new(tuning.turret_width, tuning.turret_height),
        ));
    }
}

/// Snap the turret to the pointer, clamped inside the playfield.
/// No pointer seen yet means the turret holds position.
fn track_pointer(
    tuning: Res<Tuning>,
    pointer: Res<PointerState>,
    mut turrets: Query<&mut GamePosition, With<Turret>>,
) {
    let Some(target_x) = pointer.x else {
        return;
    };
    let (min_x, max_x) = tuning.turret_clamp_range();
    for mut pos in turrets.iter_mut() {
        pos.x = target_x.clamp(min_x, max_x);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::{FlowPlugin, PlayState};
    use bevy::state::app::StatesPlugin;
    use bevy::time::TimeUpdateStrategy;
    use std::time::Duration;

    fn harness() -> App {
        let mut app = App::new();
        app.insert_resource(Tuning::default())
            .insert_resource(HeadlessMode(true))
            .insert_resource(PointerState::default())
            .add_plugins(MinimalPlugins)
            .add_plugins(StatesPlugin)
            .insert_resource(Time::<Fixed>::from_seconds(0.01))
            .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(10)))
            .add_plugins(crate::events::GameEventsPlugin)
            .add_plugins(FlowPlugin)
            .add_plugins(TurretPlugin);
        app
    }

    fn turret_x(app: &mut App) -> f32 {
        let mut query = app
            .world_mut()
            .query_filtered::<&GamePosition, With<Turret>>();
        query.single(app.world()).x
    }

    #[test]
    fn turret_spawns_centered() {
        let mut app = harness();
        app.update();
        assert_eq!(turret_x(&mut app), 250.0);
    }

    #[test]
    fn turret_follows_pointer() {
        let mut app = harness();
        app.world_mut().resource_mut::<PointerState>().x = Some(120.0);
        for _ in 0..5 {
            app.update();
        }
        assert_eq!(turret_x(&mut app), 120.0);
    }

    #[test]
    fn turret_clamps_to_playfield_edges() {
        let mut app = harness();
        app.world_mut().resource_mut::<PointerState>().x = Some(10_000.0);
        for _ in 0..5 {
            app.update();
        }
        assert_eq!(turret_x(&mut app), 475.0);

        app.world_mut().resource_mut::<PointerState>().x = Some(-10_000.0);
        for _ in 0..5 {
            app.update();
        }
        assert_eq!(turret_x(&mut app), 25.0);
    }

    #[test]
    fn turret_freezes_during_game_over() {
        let mut app = harness();
        app.world_mut().resource_mut::<PointerState>().x = Some(100.0);
        for _ in 0..5 {
            app.update();
        }
        app.world_mut()
            .resource_mut::<NextState<PlayState>>()
            .set(PlayState::GameOver);
        app.update();
        app.world_mut().resource_mut::<PointerState>().x = Some(400.0);
        for _ in 0..5 {
            app.update();
        }
        assert_eq!(turret_x(&mut app), 100.0);
    }
}
