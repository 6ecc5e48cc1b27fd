use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::components::Tuning;

/// Abstraction layer between raw pointer devices and game systems.
/// Both the window systems (mouse/touch) and tests write to this.
#[derive(Resource, Default, Clone)]
pub struct PointerState {
    /// Latest known pointer x in playfield units
    pub x: Option<f32>,
    /// Click/tap edge, cleared at the end of every frame
    pub restart_pressed: bool,
}

/// Map a window-space x (logical pixels) to playfield units
pub fn window_to_playfield_x(cursor_x: f32, window_width: f32, playfield_width: f32) -> f32 {
    if window_width <= 0.0 {
        return cursor_x;
    }
    cursor_x * playfield_width / window_width
}

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(PointerState::default())
            .add_systems(
                PreUpdate,
                (
                    pointer_from_window.run_if(resource_exists::<Touches>),
                    press_to_restart
                        .run_if(resource_exists::<ButtonInput<MouseButton>>)
                        .run_if(resource_exists::<Touches>),
                )
                    .chain(),
            )
            .add_systems(Last, clear_pointer_edges);
    }
}

/// Track the pointer; an active touch wins over the mouse cursor
fn pointer_from_window(
    windows: Query<&Window, With<PrimaryWindow>>,
    touches: Res<Touches>,
    tuning: Res<Tuning>,
    mut pointer: ResMut<PointerState>,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };
    if let Some(touch) = touches.iter().next() {
        pointer.x = Some(window_to_playfield_x(
            touch.position().x,
            window.width(),
            tuning.playfield_width,
        ));
    } else if let Some(cursor) = window.cursor_position() {
        pointer.x = Some(window_to_playfield_x(
            cursor.x,
            window.width(),
            tuning.playfield_width,
        ));
    }
}

fn press_to_restart(
    mouse: Res<ButtonInput<MouseButton>>,
    touches: Res<Touches>,
    mut pointer: ResMut<PointerState>,
) {
    if mouse.just_pressed(MouseButton::Left) || touches.iter_just_pressed().next().is_some() {
        pointer.restart_pressed = true;
    }
}

fn clear_pointer_edges(mut pointer: ResMut<PointerState>) {
    pointer.restart_pressed = false;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_x_scales_to_playfield_units() {
        // 2x-scaled window: 1000 px wide for a 500-unit playfield
        assert_eq!(window_to_playfield_x(500.0, 1000.0, 500.0), 250.0);
        assert_eq!(window_to_playfield_x(0.0, 1000.0, 500.0), 0.0);
        assert_eq!(window_to_playfield_x(1000.0, 1000.0, 500.0), 500.0);
    }

    #[test]
    fn unscaled_window_maps_one_to_one() {
        assert_eq!(window_to_playfield_x(123.0, 500.0, 500.0), 123.0);
    }

    #[test]
    fn restart_edge_clears_at_end_of_frame() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(Tuning::default())
            .add_plugins(InputPlugin);
        app.world_mut().resource_mut::<PointerState>().restart_pressed = true;
        app.update();
        assert!(!app.world().resource::<PointerState>().restart_pressed);
    }
}
