//! Gatehop - a single-screen gate-dodging arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, obstacles, collisions, run state)
//! - `game`: Phase state machine driving the simulation one frame at a time
//! - `schedule`: Frame driver contract (schedule / cancel the next tick)
//! - `config`: Data-driven game tuning
//! - `render`: Scene building for the canvas renderer

pub mod config;
pub mod game;
pub mod render;
pub mod schedule;
pub mod scoreboard;
pub mod sim;

pub use config::{ConfigError, GameConfig};
pub use game::{Frame, Game, GameView};
pub use schedule::{FrameHandle, FrameScheduler, ManualScheduler};
pub use scoreboard::Scoreboard;

/// Reference tuning values (320x480 field, one tick per display frame)
pub mod consts {
    /// Play-field dimensions
    pub const PLAYFIELD_WIDTH: f32 = 320.0;
    pub const PLAYFIELD_HEIGHT: f32 = 480.0;
    /// Height of the ground strip at the bottom of the field
    pub const GROUND_HEIGHT: f32 = 70.0;

    /// Downward acceleration per tick
    pub const GRAVITY: f32 = 0.35;
    /// Velocity set by a flap (negative = upward)
    pub const FLAP_IMPULSE: f32 = -6.2;

    /// Avatar defaults
    pub const AVATAR_X: f32 = 90.0;
    pub const AVATAR_RADIUS: f32 = 14.0;

    /// Obstacle defaults
    pub const GAP_SIZE: f32 = 140.0;
    pub const OBSTACLE_WIDTH: f32 = 54.0;
    pub const OBSTACLE_SPEED: f32 = 2.6;
    /// Horizontal distance between consecutive obstacles
    pub const OBSTACLE_SPACING: f32 = 180.0;
    /// Minimum distance from the gap centre to the ceiling / ground line
    pub const MIN_GAP_MARGIN: f32 = 120.0;

    /// Seed used by the native runner when none is given
    pub const DEFAULT_SEED: u64 = 0x6a7e_4f1d;
}
