//! Game tuning
//!
//! Fixed when a `Game` is built; there is no runtime reconfiguration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Reasons a configuration document is rejected
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("`{field}` must be a finite number")]
    NotFinite { field: &'static str },
    #[error("`{field}` must be greater than zero")]
    NotPositive { field: &'static str },
    #[error("`{field}` must not be negative")]
    Negative { field: &'static str },
    #[error("ground height {ground} leaves no room in a play-field {height} tall")]
    GroundFillsPlayfield { ground: f32, height: f32 },
}

/// All simulation constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Play-field ===
    pub width: f32,
    pub height: f32,
    pub ground_height: f32,

    // === Avatar ===
    pub gravity: f32,
    /// Velocity a flap sets (negative = upward)
    pub flap_impulse: f32,
    pub avatar_x: f32,
    pub avatar_radius: f32,
    /// Height the avatar starts each run at
    pub avatar_start_y: f32,

    // === Obstacles ===
    pub gap_size: f32,
    pub obstacle_width: f32,
    pub obstacle_speed: f32,
    pub obstacle_spacing: f32,
    pub min_gap_margin: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: PLAYFIELD_WIDTH,
            height: PLAYFIELD_HEIGHT,
            ground_height: GROUND_HEIGHT,

            gravity: GRAVITY,
            flap_impulse: FLAP_IMPULSE,
            avatar_x: AVATAR_X,
            avatar_radius: AVATAR_RADIUS,
            avatar_start_y: PLAYFIELD_HEIGHT / 2.0,

            gap_size: GAP_SIZE,
            obstacle_width: OBSTACLE_WIDTH,
            obstacle_speed: OBSTACLE_SPEED,
            obstacle_spacing: OBSTACLE_SPACING,
            min_gap_margin: MIN_GAP_MARGIN,
        }
    }
}

impl GameConfig {
    /// Parse a (possibly partial) JSON document; missing fields keep defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Resize the play-field and recentre the avatar's start height
    pub fn with_playfield(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self.avatar_start_y = height / 2.0;
        self
    }

    /// Reject values the simulation cannot be defined over.
    ///
    /// An oversized gap is accepted; spawning clamps it instead.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("width", self.width),
            ("height", self.height),
            ("ground_height", self.ground_height),
            ("gravity", self.gravity),
            ("flap_impulse", self.flap_impulse),
            ("avatar_x", self.avatar_x),
            ("avatar_radius", self.avatar_radius),
            ("avatar_start_y", self.avatar_start_y),
            ("gap_size", self.gap_size),
            ("obstacle_width", self.obstacle_width),
            ("obstacle_speed", self.obstacle_speed),
            ("obstacle_spacing", self.obstacle_spacing),
            ("min_gap_margin", self.min_gap_margin),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { field });
            }
        }

        let positive = [
            ("width", self.width),
            ("height", self.height),
            ("avatar_radius", self.avatar_radius),
            ("gap_size", self.gap_size),
            ("obstacle_width", self.obstacle_width),
            ("obstacle_speed", self.obstacle_speed),
            ("obstacle_spacing", self.obstacle_spacing),
        ];
        for (field, value) in positive {
            if value <= 0.0 {
                return Err(ConfigError::NotPositive { field });
            }
        }

        if self.min_gap_margin < 0.0 {
            return Err(ConfigError::Negative {
                field: "min_gap_margin",
            });
        }

        if self.ground_height < 0.0 || self.ground_height >= self.height {
            return Err(ConfigError::GroundFillsPlayfield {
                ground: self.ground_height,
                height: self.height,
            });
        }

        Ok(())
    }

    /// Y coordinate of the top of the ground strip
    #[inline]
    pub fn ground_line(&self) -> f32 {
        self.height - self.ground_height
    }

    /// Inclusive range a gap centre may be placed in.
    ///
    /// Normally `[min_gap_margin, ground_line - min_gap_margin]`, further
    /// narrowed so the whole gap stays between ceiling and ground. A gap taller
    /// than the open sky leaves no such range, so it collapses to the middle.
    pub fn gap_bounds(&self) -> (f32, f32) {
        let line = self.ground_line();
        let half_gap = self.gap_size / 2.0;
        let lo = self.min_gap_margin.max(half_gap);
        let hi = (line - self.min_gap_margin).min(line - half_gap);
        if lo <= hi {
            (lo, hi)
        } else {
            let mid = line / 2.0;
            (mid, mid)
        }
    }
}
