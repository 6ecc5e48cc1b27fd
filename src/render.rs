use bevy::prelude::*;

use crate::components::{GamePosition, Tuning};

pub struct RenderPlugin;

impl Plugin for RenderPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, sync_game_position_to_transform);
    }
}

/// Sync GamePosition → Transform for all entities that have both.
/// Playfield coordinates are bottom-left based; world space centers
/// the playfield on the origin.
fn sync_game_position_to_transform(
    tuning: Res<Tuning>,
    mut query: Query<(&GamePosition, &mut Transform), Changed<GamePosition>>,
) {
    let offset_x = tuning.playfield_width / 2.0;
    let offset_y = tuning.playfield_height / 2.0;
    for (pos, mut transform) in query.iter_mut() {
        transform.translation.x = pos.x - offset_x;
        transform.translation.y = pos.y - offset_y;
    }
}
