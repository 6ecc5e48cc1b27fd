mod camera;
mod collision;
mod components;
mod events;
mod flow;
mod input;
mod projectile;
mod render;
mod scoring;
mod targets;
mod telemetry;
mod turret;
mod ui;

use bevy::prelude::*;
use components::{HeadlessMode, Tuning};

#[derive(serde::Deserialize, Default)]
struct StartupConfig {
    window_title: Option<String>,
    window_scale: Option<f32>,
    background_color: Option<[f32; 3]>,
    auto_restart_seconds: Option<f32>,
}

fn load_startup_config() -> StartupConfig {
    let path = std::env::var("SKYFALL_CONFIG")
        .ok()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "skyfall.json".to_string());
    match std::fs::read_to_string(&path) {
        Ok(contents) => match serde_json::from_str::<StartupConfig>(&contents) {
            Ok(cfg) => {
                println!("[Skyfall] Loaded startup config from {}", path);
                cfg
            }
            Err(e) => {
                eprintln!("[Skyfall] Failed to parse {}: {}", path, e);
                StartupConfig::default()
            }
        },
        Err(_) => StartupConfig::default(),
    }
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let headless = args.iter().any(|a| a == "--headless");

    let startup_config = load_startup_config();
    let mut tuning = Tuning::default();
    if startup_config.auto_restart_seconds.is_some() {
        tuning.auto_restart_seconds = startup_config.auto_restart_seconds;
    }

    let mut app = App::new();
    app.insert_resource(HeadlessMode(headless));

    if headless {
        // Headless mode: no window, no rendering, just the simulation
        app.add_plugins(MinimalPlugins);
        app.add_plugins(bevy::state::app::StatesPlugin);
        println!("[Skyfall] Starting in HEADLESS mode");
    } else {
        let window_title = startup_config
            .window_title
            .unwrap_or_else(|| "Skyfall".to_string());
        let window_scale = startup_config.window_scale.unwrap_or(1.0).clamp(0.5, 4.0);
        let resolution = (
            tuning.playfield_width * window_scale,
            tuning.playfield_height * window_scale,
        );

        app.add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: window_title,
                resolution: resolution.into(),
                present_mode: bevy::window::PresentMode::AutoVsync,
                ..default()
            }),
            ..default()
        }));
        let bg = startup_config.background_color.unwrap_or([0.02, 0.02, 0.04]);
        app.insert_resource(ClearColor(Color::srgb(bg[0], bg[1], bg[2])));
        app.add_plugins(camera::CameraPlugin);
        app.add_plugins(render::RenderPlugin);
        app.add_plugins(ui::HudPlugin);
        println!("[Skyfall] Starting in WINDOWED mode");
    }

    app.insert_resource(tuning)
        .insert_resource(Time::<Fixed>::from_hz(60.0))
        .add_plugins(input::InputPlugin)
        .add_plugins(flow::FlowPlugin)
        .add_plugins(events::GameEventsPlugin)
        .add_plugins(scoring::ScoringPlugin)
        .add_plugins(turret::TurretPlugin)
        .add_plugins(projectile::ProjectilePlugin)
        .add_plugins(targets::TargetsPlugin)
        .add_plugins(collision::CollisionPlugin)
        .add_plugins(telemetry::TelemetryPlugin);

    app.run();
}
