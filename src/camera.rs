use bevy::prelude::*;

use crate::components::Tuning;

#[derive(Component)]
pub struct MainCamera;

/// Dark quad marking the playfield bounds
#[derive(Component)]
pub struct Backdrop;

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_camera);
    }
}

/// The playfield is mapped so its center sits at the world origin,
/// so a default camera frames it exactly.
fn spawn_camera(mut commands: Commands, tuning: Res<Tuning>) {
    commands.spawn((MainCamera, Camera2d));
    commands.spawn((
        Backdrop,
        Sprite::from_color(
            Color::srgb(0.05, 0.05, 0.08),
            Vec2::new(tuning.playfield_width, tuning.playfield_height),
        ),
        Transform::from_xyz(0.0, 0.0, -1.0),
    ));
}
