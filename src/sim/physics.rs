//! Vertical motion of the avatar

use super::state::Avatar;

/// Advance one tick: `v' = v + g`, `y' = y + v'`. Velocity is not clamped.
#[inline]
pub fn integrate(avatar: &mut Avatar, gravity: f32) {
    avatar.velocity += gravity;
    avatar.pos.y += avatar.velocity;
}

/// Replace (not add to) the current velocity with the flap impulse
#[inline]
pub fn flap(avatar: &mut Avatar, impulse: f32) {
    avatar.velocity = impulse;
}
