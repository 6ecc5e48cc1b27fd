use bevy::prelude::*;

use crate::flow::{AutoRestart, PlayState};
use crate::scoring::ScoreBoard;

#[derive(Component)]
struct ScoreText;

#[derive(Component)]
struct LevelText;

#[derive(Component)]
struct GameOverOverlay;

#[derive(Component)]
struct RestartHintText;

pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_hud)
            .add_systems(Update, update_hud.run_if(resource_changed::<ScoreBoard>))
            .add_systems(OnEnter(PlayState::GameOver), show_game_over)
            .add_systems(OnExit(PlayState::GameOver), hide_game_over)
            .add_systems(
                Update,
                update_restart_hint.run_if(in_state(PlayState::GameOver)),
            );
    }
}

fn restart_hint(remaining_seconds: Option<f32>) -> String {
    match remaining_seconds {
        Some(secs) => format!("Restarting in {}s", secs.ceil().max(1.0) as u32),
        None => "Click to restart".to_string(),
    }
}

fn spawn_hud(mut commands: Commands) {
    commands.spawn((
        ScoreText,
        Text::new("Score: 0"),
        TextFont {
            font_size: 20.0,
            ..default()
        },
        TextColor(Color::WHITE),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(10.0),
            top: Val::Px(10.0),
            ..default()
        },
    ));
    commands.spawn((
        LevelText,
        Text::new("Level: 1"),
        TextFont {
            font_size: 20.0,
            ..default()
        },
        TextColor(Color::WHITE),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(10.0),
            top: Val::Px(38.0),
            ..default()
        },
    ));
}

fn update_hud(
    score_board: Res<ScoreBoard>,
    mut score_texts: Query<&mut Text, (With<ScoreText>, Without<LevelText>)>,
    mut level_texts: Query<&mut Text, With<LevelText>>,
) {
    for mut text in score_texts.iter_mut() {
        text.0 = format!("Score: {}", score_board.score);
    }
    for mut text in level_texts.iter_mut() {
        text.0 = format!("Level: {}", score_board.level);
    }
}

fn show_game_over(mut commands: Commands, auto_restart: Res<AutoRestart>) {
    let hint = restart_hint(auto_restart.0.as_ref().map(Timer::remaining_secs));
    commands
        .spawn((
            GameOverOverlay,
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                row_gap: Val::Px(12.0),
                ..default()
            },
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("Game Over!"),
                TextFont {
                    font_size: 34.0,
                    ..default()
                },
                TextColor(Color::srgb(0.9, 0.2, 0.2)),
            ));
            parent.spawn((
                RestartHintText,
                Text::new(hint),
                TextFont {
                    font_size: 20.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
        });
}

fn hide_game_over(mut commands: Commands, overlays: Query<Entity, With<GameOverOverlay>>) {
    for entity in overlays.iter() {
        commands.entity(entity).despawn_recursive();
    }
}

/// Keep the countdown hint live while a timed restart is armed
fn update_restart_hint(
    auto_restart: Res<AutoRestart>,
    mut hints: Query<&mut Text, With<RestartHintText>>,
) {
    let Some(timer) = auto_restart.0.as_ref() else {
        return;
    };
    for mut text in hints.iter_mut() {
        text.0 = restart_hint(Some(timer.remaining_secs()));
    }
}
