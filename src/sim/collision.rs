//! Collision detection between the avatar and the world
//!
//! All checks are pure predicates over the current state; nothing here moves
//! or resolves anything. A run simply ends on the first hit.

use super::state::{Avatar, Obstacle};
use crate::config::GameConfig;

/// Avatar's lower edge reached the ground line
#[inline]
pub fn hits_ground(avatar: &Avatar, config: &GameConfig) -> bool {
    avatar.bottom() >= config.ground_line()
}

/// Avatar's upper edge reached the top of the play-field
#[inline]
pub fn hits_ceiling(avatar: &Avatar) -> bool {
    avatar.top() <= 0.0
}

/// Avatar overlaps the solid part (top or bottom segment) of an obstacle.
///
/// Horizontal test treats the avatar as its bounding box; vertically it only
/// hits when it pokes above the gap top or below the gap bottom.
pub fn hits_obstacle(avatar: &Avatar, obstacle: &Obstacle, config: &GameConfig) -> bool {
    let overlaps_x = avatar.pos.x + avatar.radius > obstacle.x
        && avatar.pos.x - avatar.radius < obstacle.trailing_edge(config.obstacle_width);
    if !overlaps_x {
        return false;
    }

    let hits_top = avatar.top() < obstacle.gap_top(config.gap_size);
    let hits_bottom = avatar.bottom() > obstacle.gap_bottom(config.gap_size);
    hits_top || hits_bottom
}

/// Whether the avatar is touching the ground, the ceiling or any obstacle
pub fn is_colliding<'a>(
    avatar: &Avatar,
    mut obstacles: impl Iterator<Item = &'a Obstacle>,
    config: &GameConfig,
) -> bool {
    hits_ground(avatar, config)
        || hits_ceiling(avatar)
        || obstacles.any(|o| hits_obstacle(avatar, o, config))
}
