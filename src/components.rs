use bevy::prelude::*;

/// Marks the player-controlled turret
#[derive(Component)]
pub struct Turret;

/// Marks an upward-flying projectile
#[derive(Component)]
pub struct Projectile;

/// Marks a target descending from the top of the playfield
#[derive(Component)]
pub struct FallingTarget;

/// Position in playfield units (origin bottom-left, y up, center-based)
#[derive(Component, Clone, Copy, Default)]
pub struct GamePosition {
    pub x: f32,
    pub y: f32,
}

/// Velocity in playfield units per second
#[derive(Component, Clone, Copy, Default)]
pub struct Velocity {
    pub x: f32,
    pub y: f32,
}

/// Axis-aligned extents around the entity center
#[derive(Component, Clone, Copy)]
pub struct Collider {
    pub width: f32,
    pub height: f32,
}

/// True when running without a window (tests, CI)
#[derive(Resource, Clone, Copy, Default)]
pub struct HeadlessMode(pub bool);

/// Gameplay constants (as a resource so they can be tuned)
#[derive(Resource, Clone, serde::Serialize, serde::Deserialize)]
pub struct Tuning {
    pub playfield_width: f32,
    pub playfield_height: f32,
    pub turret_width: f32,
    pub turret_height: f32,
    /// Gap between the playfield bottom and the turret's bottom edge
    pub turret_rest_height: f32,
    /// Muzzle distance from the turret's left edge
    pub muzzle_offset: f32,
    pub projectile_width: f32,
    pub projectile_height: f32,
    pub projectile_speed: f32,
    pub target_width: f32,
    pub target_height: f32,
    pub base_fall_speed: f32,
    pub fall_speed_step: f32,
    pub fire_interval: f32,
    pub spawn_interval: f32,
    pub points_per_hit: u32,
    pub level_step: u32,
    /// None = wait for a click/tap after game over
    pub auto_restart_seconds: Option<f32>,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            playfield_width: 500.0,
            playfield_height: 600.0,
            turret_width: 50.0,
            turret_height: 20.0,
            turret_rest_height: 30.0,
            muzzle_offset: 20.0,
            projectile_width: 5.0,
            projectile_height: 10.0,
            projectile_speed: 300.0,
            target_width: 30.0,
            target_height: 30.0,
            base_fall_speed: 120.0,
            fall_speed_step: 30.0,
            fire_interval: 0.5,
            spawn_interval: 2.0,
            points_per_hit: 5,
            level_step: 20,
            auto_restart_seconds: None,
        }
    }
}

impl Tuning {
    pub fn turret_center_y(&self) -> f32 {
        self.turret_rest_height + self.turret_height / 2.0
    }

    /// Clamp range for the turret center so it stays fully inside
    pub fn turret_clamp_range(&self) -> (f32, f32) {
        let half = self.turret_width / 2.0;
        (half, self.playfield_width - half)
    }

    /// Projectile spawn point for a turret centered at `turret_x`.
    /// The muzzle sits a fixed distance from the turret's left edge,
    /// with the projectile's bottom resting on the turret's top edge.
    pub fn muzzle_position(&self, turret_x: f32) -> (f32, f32) {
        let x = turret_x - self.turret_width / 2.0 + self.muzzle_offset + self.projectile_width / 2.0;
        let y = self.turret_center_y() + self.turret_height / 2.0 + self.projectile_height / 2.0;
        (x, y)
    }

    /// Vertical center at which fresh targets appear (top-aligned inside)
    pub fn target_spawn_y(&self) -> f32 {
        self.playfield_height - self.target_height / 2.0
    }
}

/// Overlap test for two center-based AABBs. Touching edges do not count.
pub fn aabb_overlap(a: &GamePosition, ac: &Collider, b: &GamePosition, bc: &Collider) -> bool {
    (a.x - b.x).abs() * 2.0 < ac.width + bc.width && (a.y - b.y).abs() * 2.0 < ac.height + bc.height
}
