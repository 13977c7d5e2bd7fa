//! Frame driver contract
//!
//! The game never loops on its own. While a run is active it keeps exactly one
//! next-frame request outstanding, and it cancels that request on every
//! transition out of `Playing` so a stale frame can never tick a fresh run.

use std::collections::VecDeque;

/// Identifier of one outstanding frame request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHandle(pub i32);

/// Source of "call me back next frame" requests
pub trait FrameScheduler {
    /// Ask for one callback on the next frame. `None` if it could not be scheduled.
    fn request_frame(&mut self) -> Option<FrameHandle>;

    /// Withdraw a request; the callback must not fire afterwards
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// In-memory scheduler for headless runs and tests.
///
/// Requests queue up until `fire` hands them back one at a time.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: i32,
    queued: VecDeque<FrameHandle>,
    cancelled: Vec<FrameHandle>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pop the oldest outstanding request, as if its frame arrived
    pub fn fire(&mut self) -> Option<FrameHandle> {
        self.queued.pop_front()
    }

    /// Outstanding (requested, not yet fired or cancelled) frames
    pub fn pending(&self) -> usize {
        self.queued.len()
    }

    /// Every handle that has been cancelled, oldest first
    pub fn cancelled(&self) -> &[FrameHandle] {
        &self.cancelled
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> Option<FrameHandle> {
        self.next_id = self.next_id.wrapping_add(1);
        let handle = FrameHandle(self.next_id);
        self.queued.push_back(handle);
        Some(handle)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.queued.retain(|h| *h != handle);
        self.cancelled.push(handle);
    }
}
