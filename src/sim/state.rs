//! Game state and core simulation types
//!
//! Everything a single run owns lives in `Run`; a new run replaces it wholesale.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::obstacles::ObstacleField;
use crate::config::GameConfig;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Before the first run; waiting for a start or flap
    #[default]
    Idle,
    /// Active gameplay, ticking every frame
    Playing,
    /// Run ended by a collision; a start or flap begins a new run
    Over,
}

/// The player-controlled avatar (a circle)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Avatar {
    /// Centre position; x is fixed for the whole run
    pub pos: Vec2,
    pub radius: f32,
    /// Vertical velocity (positive = downward)
    pub velocity: f32,
}

impl Avatar {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            pos: Vec2::new(config.avatar_x, config.avatar_start_y),
            radius: config.avatar_radius,
            velocity: 0.0,
        }
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y - self.radius
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.radius
    }
}

/// A gated obstacle scrolling leftward
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Left (leading) edge
    pub x: f32,
    /// Vertical centre of the passable gap
    pub gap_y: f32,
    /// Set once the avatar has cleared this obstacle
    pub passed: bool,
}

impl Obstacle {
    pub fn new(x: f32, gap_y: f32) -> Self {
        Self {
            x,
            gap_y,
            passed: false,
        }
    }

    /// Right edge of the obstacle
    #[inline]
    pub fn trailing_edge(&self, width: f32) -> f32 {
        self.x + width
    }

    /// Bottom of the top segment
    #[inline]
    pub fn gap_top(&self, gap_size: f32) -> f32 {
        self.gap_y - gap_size / 2.0
    }

    /// Top of the bottom segment
    #[inline]
    pub fn gap_bottom(&self, gap_size: f32) -> f32 {
        self.gap_y + gap_size / 2.0
    }
}

/// State of one run, recreated on every start
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Run {
    pub avatar: Avatar,
    pub obstacles: ObstacleField,
    /// Obstacles passed this run
    pub score: u32,
    /// Simulation ticks elapsed this run
    pub ticks: u64,
}

impl Run {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            avatar: Avatar::new(config),
            obstacles: ObstacleField::new(),
            score: 0,
            ticks: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_run_is_clean() {
        let config = GameConfig::default();
        let run = Run::new(&config);
        assert_eq!(run.avatar.pos, Vec2::new(90.0, 240.0));
        assert_eq!(run.avatar.velocity, 0.0);
        assert_eq!(run.score, 0);
        assert_eq!(run.ticks, 0);
        assert!(run.obstacles.is_empty());
        assert_eq!(run.obstacles.distance_since_spawn(), 0.0);
    }

    #[test]
    fn test_obstacle_edges() {
        let obstacle = Obstacle::new(100.0, 200.0);
        assert_eq!(obstacle.trailing_edge(54.0), 154.0);
        assert_eq!(obstacle.gap_top(140.0), 130.0);
        assert_eq!(obstacle.gap_bottom(140.0), 270.0);
        assert!(!obstacle.passed);
    }
}
