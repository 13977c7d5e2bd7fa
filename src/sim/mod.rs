//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per tick
//! - Injected RNG only
//! - Obstacles iterated in spawn order
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod obstacles;
pub mod physics;
pub mod state;
pub mod tick;

pub use collision::{hits_ceiling, hits_ground, hits_obstacle, is_colliding};
pub use obstacles::ObstacleField;
pub use state::{Avatar, GamePhase, Obstacle, Run};
pub use tick::{TickOutcome, tick};
