//! Splitshot - a two-player split-screen arcade shooter core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, spawning, collisions, game state)
//! - `highscores`: Single best-score persistence
//! - `settings`: Front-end preference data model
//!
//! Rendering, raw input handling, and audio are external collaborators:
//! they feed a per-tick key state into [`sim::tick`] and draw from
//! [`sim::build_snapshot`].

pub mod highscores;
pub mod settings;
pub mod sim;

pub use highscores::HighScore;
pub use settings::{Difficulty, Settings};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate. All speeds are px/tick, all timers are ticks.
    pub const TICK_HZ: u32 = 60;

    /// Entity dimensions
    pub const PLAYER_WIDTH: f32 = 30.0;
    pub const PLAYER_HEIGHT: f32 = 30.0;
    pub const ENEMY_WIDTH: f32 = 40.0;
    pub const ENEMY_HEIGHT: f32 = 40.0;
    pub const BULLET_WIDTH: f32 = 12.0;
    pub const BULLET_HEIGHT: f32 = 20.0;
    pub const POWERUP_SIZE: f32 = 45.0;

    /// Player movement
    pub const PLAYER_ACCEL: f32 = 0.35;
    pub const PLAYER_MAX_SPEED: f32 = 6.0;
    pub const PLAYER_FRICTION: f32 = 0.85;
    /// Hold ramp: accel factor grows to this cap the longer a key is held
    pub const HOLD_RAMP_CAP: f32 = 1.8;
    /// Ticks of holding per +1.0 of ramp factor
    pub const HOLD_RAMP_TICKS: f32 = 75.0;
    /// Players start this far above the bottom edge
    pub const PLAYER_BOTTOM_OFFSET: f32 = 50.0;
    pub const PLAYER_START_HEALTH: i32 = 100;

    /// Shooting
    pub const SHOOT_COOLDOWN_TICKS: u32 = 18;
    /// Fire-rate boost divides the cooldown by this factor
    pub const FIRE_RATE_DIVISOR: f32 = 1.5;
    pub const BULLET_SPEED: f32 = 7.0;
    /// Bullet-size boost multiplies both bullet dimensions
    pub const BULLET_SIZE_MULT: f32 = 1.5;
    /// Multi-shot side bullets fire at (±this, -this)
    pub const MULTI_SHOT_SIDE_SPEED: f32 = 5.0;
    /// Steering speed of auto-aim bullets
    pub const AUTO_AIM_SPEED: f32 = 7.0;

    /// Enemies
    pub const ENEMY_FALL_SPEED: f32 = 0.5;
    pub const ENEMY_SPAWN_Y: f32 = 20.0;
    pub const ENEMY_CONTACT_DAMAGE: i32 = 5;
    pub const ENEMY_SCORE: u32 = 10;

    /// Spawning schedule
    pub const SPAWN_WARMUP_TICKS: u64 = 60;
    pub const BASE_ENEMY_SPAWN_INTERVAL: u32 = 90;
    pub const MIN_ENEMY_SPAWN_INTERVAL: u32 = 36;
    /// Enemy spawn interval shrinks by 1 per this many elapsed ticks
    pub const DIFFICULTY_STEP_TICKS: u64 = 300;
    pub const POWERUP_SPAWN_INTERVAL: u32 = 360;
    pub const MAX_POWERUPS: usize = 6;
    /// Minimum distance between same-side power-ups
    pub const POWERUP_MIN_SPACING: f32 = 150.0;
    pub const POWERUP_PLACEMENT_ATTEMPTS: u32 = 10;
    /// Boost duration after pickup (10 s)
    pub const POWERUP_DURATION_TICKS: u32 = 600;

    /// Gap kept between entities and the field edges / midline
    pub const SIDE_MARGIN: f32 = 10.0;
}
