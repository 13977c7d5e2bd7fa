//! Fixed-step simulation tick
//!
//! One call advances a run by exactly one frame. Flaps are not inputs here;
//! they are applied to the avatar directly between ticks.

use rand::Rng;

use super::collision::is_colliding;
use super::physics;
use super::state::Run;
use crate::config::GameConfig;

/// What happened during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// Obstacles cleared this tick (already added to the run's score)
    pub cleared: u32,
    /// The avatar ended the tick touching something
    pub collided: bool,
}

/// Advance the run by one tick: physics, then obstacles, then collision
pub fn tick<R: Rng>(run: &mut Run, config: &GameConfig, rng: &mut R) -> TickOutcome {
    run.ticks += 1;

    physics::integrate(&mut run.avatar, config.gravity);

    let cleared = run.obstacles.step(config, run.avatar.pos.x, rng);
    run.score += cleared;

    let collided = is_colliding(&run.avatar, run.obstacles.iter(), config);

    TickOutcome { cleared, collided }
}
