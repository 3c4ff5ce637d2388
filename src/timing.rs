//! Rate limiting for high-frequency browser events.
//!
//! Scroll and resize can fire dozens of times per frame. Two small state
//! holders keep the work bounded:
//!
//! - [`FrameGate`] coalesces bursts into at most one pending animation frame.
//! - [`Debounce`] waits for a quiet period and fires once, on the trailing
//!   edge; every new trigger cancels the previous timer.
//!
//! Both only hold the scheduler [`Handle`]. What to run when the handle fires
//! is the caller's business.

use crate::platform::{Handle, Scheduler, Wake};

/// Single-flight animation frame request.
#[derive(Debug, Default)]
pub struct FrameGate {
    pending: Option<Handle>,
}

impl FrameGate {
    /// Request a frame unless one is already pending.
    ///
    /// Returns the new handle, or `None` when the request was coalesced into
    /// the frame that is already queued.
    pub fn request(&mut self, scheduler: &mut impl Scheduler) -> Option<Handle> {
        if self.pending.is_some() {
            return None;
        }
        let handle = scheduler.schedule(Wake::NextFrame);
        self.pending = Some(handle);
        Some(handle)
    }

    /// Mark the pending frame as delivered. Returns false for stale handles.
    pub fn complete(&mut self, handle: Handle) -> bool {
        if self.pending == Some(handle) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

/// Trailing-edge debounce.
#[derive(Debug)]
pub struct Debounce {
    wait_ms: f64,
    pending: Option<Handle>,
}

impl Debounce {
    pub fn new(wait_ms: f64) -> Self {
        Self {
            wait_ms,
            pending: None,
        }
    }

    /// Restart the quiet period. Any earlier timer is cancelled.
    pub fn trigger(&mut self, scheduler: &mut impl Scheduler) -> Handle {
        if let Some(previous) = self.pending.take() {
            scheduler.cancel(previous);
        }
        let handle = scheduler.schedule(Wake::After(self.wait_ms));
        self.pending = Some(handle);
        handle
    }

    /// Whether `handle` is the timer that should fire. Clears it if so.
    pub fn settle(&mut self, handle: Handle) -> bool {
        if self.pending == Some(handle) {
            self.pending = None;
            true
        } else {
            false
        }
    }
}
