use bevy::prelude::*;

use crate::components::{Collider, GamePosition, HeadlessMode, Projectile, Turret, Tuning, Velocity};
use crate::events::{GameEventKind, GameEventLog};
use crate::flow::{PlayState, TickSet};

/// Repeating auto-fire cadence
#[derive(Resource)]
pub struct FireTimer(pub Timer);

impl FromWorld for FireTimer {
    fn from_world(world: &mut World) -> Self {
        let interval = world.resource::<Tuning>().fire_interval;
        Self(Timer::from_seconds(interval, TimerMode::Repeating))
    }
}

pub struct ProjectilePlugin;

impl Plugin for ProjectilePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FireTimer>()
            .add_systems(OnEnter(PlayState::Playing), reset_volley)
            .add_systems(FixedUpdate, fire_when_ready.in_set(TickSet::Fire))
            .add_systems(
                FixedUpdate,
                (advance_projectiles, despawn_spent).chain().in_set(TickSet::Move),
            );
    }
}

/// Fresh run: empty sky, fire cadence restarted from zero
fn reset_volley(
    mut commands: Commands,
    mut timer: ResMut<FireTimer>,
    projectiles: Query<Entity, With<Projectile>>,
) {
    timer.0.reset();
    for entity in projectiles.iter() {
        commands.entity(entity).despawn();
    }
}

fn fire_when_ready(
    mut commands: Commands,
    time: Res<Time<Fixed>>,
    tuning: Res<Tuning>,
    headless: Res<HeadlessMode>,
    mut timer: ResMut<FireTimer>,
    mut log: ResMut<GameEventLog>,
    turrets: Query<&GamePosition, With<Turret>>,
) {
    if !timer.0.tick(time.delta()).just_finished() {
        return;
    }
    let Ok(turret_pos) = turrets.get_single() else {
        return;
    };

    let (x, y) = tuning.muzzle_position(turret_pos.x);
    let mut entity = commands.spawn((
        Projectile,
        GamePosition { x, y },
        Velocity {
            x: 0.0,
            y: tuning.projectile_speed,
        },
        Collider {
            width: tuning.projectile_width,
            height: tuning.projectile_height,
        },
        Transform::from_xyz(0.0, 0.0, 5.0),
    ));
    if !headless.0 {
        entity.insert(Sprite::from_color(
            Color::srgb(0.95, 0.85, 0.2),
            Vec2::new(tuning.projectile_width, tuning.projectile_height),
        ));
    }
    log.push(GameEventKind::ShotFired);
}

fn advance_projectiles(
    time: Res<Time<Fixed>>,
    mut projectiles: Query<(&mut GamePosition, &Velocity), With<Projectile>>,
) {
    let dt = time.delta_secs();
    for (mut pos, vel) in projectiles.iter_mut() {
        pos.x += vel.x * dt;
        pos.y += vel.y * dt;
    }
}

/// Remove projectiles once their bottom edge clears the playfield top
fn despawn_spent(
    mut commands: Commands,
    tuning: Res<Tuning>,
    projectiles: Query<(Entity, &GamePosition, &Collider), With<Projectile>>,
) {
    for (entity, pos, collider) in projectiles.iter() {
        if pos.y - collider.height / 2.0 >= tuning.playfield_height {
            commands.entity(entity).despawn();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::FlowPlugin;
    use crate::turret::TurretPlugin;
    use bevy::state::app::StatesPlugin;
    use bevy::time::TimeUpdateStrategy;
    use std::time::Duration;

    fn harness() -> App {
        let mut app = App::new();
        app.insert_resource(Tuning::default())
            .insert_resource(HeadlessMode(true))
            .insert_resource(crate::input::PointerState::default())
            .add_plugins(MinimalPlugins)
            .add_plugins(StatesPlugin)
            .insert_resource(Time::<Fixed>::from_seconds(0.01))
            .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(10)))
            .add_plugins(crate::events::GameEventsPlugin)
            .add_plugins(FlowPlugin)
            .add_plugins(TurretPlugin)
            .add_plugins(ProjectilePlugin);
        app
    }

    fn projectiles(app: &mut App) -> Vec<GamePosition> {
        let mut query = app
            .world_mut()
            .query_filtered::<&GamePosition, With<Projectile>>();
        query.iter(app.world()).copied().collect()
    }

    #[test]
    fn fire_timer_spawns_projectiles_at_the_muzzle() {
        let mut app = harness();
        // > 0.5 s of fixed ticks
        for _ in 0..60 {
            app.update();
        }
        let shots = projectiles(&mut app);
        assert!(!shots.is_empty());
        let tuning = Tuning::default();
        let (muzzle_x, muzzle_y) = tuning.muzzle_position(250.0);
        assert_eq!(shots[0].x, muzzle_x);
        assert!(shots[0].y >= muzzle_y);
        let log = app.world().resource::<GameEventLog>();
        assert!(log
            .recent
            .iter()
            .any(|ev| ev.kind == GameEventKind::ShotFired));
    }

    #[test]
    fn projectiles_climb_over_time() {
        let mut app = harness();
        for _ in 0..60 {
            app.update();
        }
        let before = projectiles(&mut app)[0].y;
        for _ in 0..10 {
            app.update();
        }
        let after = projectiles(&mut app)[0].y;
        // ~0.1 s at 300 u/s
        assert!(after - before > 20.0);
    }

    #[test]
    fn projectiles_despawn_past_the_top() {
        let mut app = harness();
        app.update();
        let tuning = Tuning::default();
        app.world_mut().spawn((
            Projectile,
            GamePosition {
                x: 250.0,
                y: tuning.playfield_height - 2.0,
            },
            Velocity {
                x: 0.0,
                y: tuning.projectile_speed,
            },
            Collider {
                width: tuning.projectile_width,
                height: tuning.projectile_height,
            },
        ));
        // a handful of ticks is plenty to clear 7 units at 300 u/s
        for _ in 0..10 {
            app.update();
        }
        let remaining = projectiles(&mut app);
        assert!(remaining
            .iter()
            .all(|pos| pos.y - tuning.projectile_height / 2.0 < tuning.playfield_height));
    }
}
