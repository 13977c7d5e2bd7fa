//! Demo-mode flap policy
//!
//! Hovers just below the centre of the next gap: flap whenever the avatar is
//! falling and has dropped past the target height. A flap rises ~52px before
//! gravity turns it around, so aiming low keeps the whole bounce inside the gap.

use super::state::Run;
use crate::config::GameConfig;

/// How far below the gap centre the avatar is allowed to sink before flapping
const TARGET_OFFSET: f32 = 20.0;

/// Height the autopilot is steering toward this tick
pub fn target_y(run: &Run, config: &GameConfig) -> f32 {
    let avatar_left = run.avatar.pos.x - run.avatar.radius;
    let next = run
        .obstacles
        .iter()
        .find(|o| o.trailing_edge(config.obstacle_width) >= avatar_left);

    let centre = match next {
        Some(obstacle) => obstacle.gap_y,
        None => {
            let (lo, hi) = config.gap_bounds();
            (lo + hi) / 2.0
        }
    };
    centre + TARGET_OFFSET
}

/// Whether the autopilot flaps before the next tick
pub fn wants_flap(run: &Run, config: &GameConfig) -> bool {
    run.avatar.velocity >= 0.0 && run.avatar.pos.y > target_y(run, config)
}
