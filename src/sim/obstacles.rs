//! Obstacle spawning, scrolling, scoring and recycling
//!
//! Obstacles are kept in spawn order, which is also left-to-right order since
//! they all scroll at the same speed. Recycling therefore only ever pops from
//! the front.

use std::collections::VecDeque;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::Obstacle;
use crate::config::GameConfig;

/// The obstacle collection of one run plus its spacing counter
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObstacleField {
    obstacles: VecDeque<Obstacle>,
    /// Horizontal distance scrolled since the last spawn
    distance_since_spawn: f32,
}

impl ObstacleField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    /// Oldest (leftmost) first
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Obstacle> + '_ {
        self.obstacles.iter()
    }

    pub fn front(&self) -> Option<&Obstacle> {
        self.obstacles.front()
    }

    pub fn distance_since_spawn(&self) -> f32 {
        self.distance_since_spawn
    }

    /// Insert an obstacle directly (level setups and tests)
    pub fn push(&mut self, obstacle: Obstacle) {
        self.obstacles.push_back(obstacle);
    }

    /// Spawn one obstacle at the right edge with a random gap centre
    pub fn spawn<R: Rng>(&mut self, config: &GameConfig, rng: &mut R) -> Obstacle {
        let (lo, hi) = config.gap_bounds();
        let gap_y = if lo < hi {
            rng.random_range(lo..=hi)
        } else {
            lo
        };
        let obstacle = Obstacle::new(config.width, gap_y);
        self.obstacles.push_back(obstacle);
        obstacle
    }

    /// Scroll every obstacle left by `speed`.
    ///
    /// Returns how many obstacles the avatar cleared this call; each obstacle
    /// counts once, the first time its trailing edge is left of `avatar_x`.
    pub fn advance(&mut self, speed: f32, width: f32, avatar_x: f32) -> u32 {
        let mut cleared = 0;
        for obstacle in &mut self.obstacles {
            obstacle.x -= speed;
            if !obstacle.passed && obstacle.trailing_edge(width) < avatar_x {
                obstacle.passed = true;
                cleared += 1;
            }
        }
        cleared
    }

    /// Drop obstacles whose trailing edge has left the play-field.
    ///
    /// Returns the number removed.
    pub fn recycle(&mut self, width: f32) -> usize {
        let mut removed = 0;
        while self
            .obstacles
            .front()
            .is_some_and(|o| o.trailing_edge(width) <= 0.0)
        {
            self.obstacles.pop_front();
            removed += 1;
        }
        removed
    }

    /// Spacing policy: spawn once `obstacle_spacing` has scrolled by since the
    /// last spawn, otherwise accumulate this tick's scroll distance.
    pub fn update_spacing<R: Rng>(
        &mut self,
        config: &GameConfig,
        rng: &mut R,
    ) -> Option<Obstacle> {
        if self.distance_since_spawn >= config.obstacle_spacing {
            self.distance_since_spawn = 0.0;
            Some(self.spawn(config, rng))
        } else {
            self.distance_since_spawn += config.obstacle_speed;
            None
        }
    }

    /// One tick of the obstacle manager: advance, recycle, then spawn.
    ///
    /// Returns the number of obstacles cleared by the avatar.
    pub fn step<R: Rng>(&mut self, config: &GameConfig, avatar_x: f32, rng: &mut R) -> u32 {
        let cleared = self.advance(config.obstacle_speed, config.obstacle_width, avatar_x);
        self.recycle(config.obstacle_width);
        if let Some(spawned) = self.update_spacing(config, rng) {
            log::debug!("Spawned obstacle with gap at y={:.1}", spawned.gap_y);
        }
        cleared
    }
}
