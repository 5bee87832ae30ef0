//! Frame scheduling abstraction
//!
//! The view never calls a host "next frame" function directly. It asks a
//! [`TickScheduler`] for a tick and gets a handle back; the host later
//! delivers that handle to [`SpaceView::on_frame`](crate::view::SpaceView::on_frame).
//! Stopping the loop means cancelling the outstanding handle and not asking
//! for another one.
//!
//! [`ManualScheduler`] is the in-process implementation used by tests and the
//! headless demo: requested handles queue up until the host drains them with
//! [`ManualScheduler::due`].

use std::time::{Duration, Instant};
use tracing::trace;

/// Identifies one requested tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TickHandle(u64);

impl TickHandle {
    #[must_use]
    pub fn id(self) -> u64 {
        self.0
    }
}

/// Host-provided frame scheduling
pub trait TickScheduler {
    /// Ask for one callback on the next frame.
    fn request_tick(&mut self) -> TickHandle;

    /// Withdraw a previously requested tick. Unknown or already delivered
    /// handles are ignored.
    fn cancel_tick(&mut self, handle: TickHandle);
}

/// Scheduler driven explicitly by the caller, one frame at a time
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u64,
    /// Requested and not yet delivered or cancelled
    queued: Vec<TickHandle>,
    requested: u64,
    cancelled: u64,
}

impl ManualScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the handles due on this frame.
    ///
    /// Ticks requested while those handles are being processed land in the
    /// next frame's batch.
    pub fn due(&mut self) -> Vec<TickHandle> {
        std::mem::take(&mut self.queued)
    }

    /// Handles waiting for the next frame
    #[must_use]
    pub fn queued(&self) -> &[TickHandle] {
        &self.queued
    }

    /// True when nothing is scheduled
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.queued.is_empty()
    }

    /// Total ticks ever requested
    #[must_use]
    pub fn requested_count(&self) -> u64 {
        self.requested
    }

    /// Total ticks cancelled while still queued
    #[must_use]
    pub fn cancelled_count(&self) -> u64 {
        self.cancelled
    }
}

impl TickScheduler for ManualScheduler {
    fn request_tick(&mut self) -> TickHandle {
        self.next_id += 1;
        self.requested += 1;
        let handle = TickHandle(self.next_id);
        self.queued.push(handle);
        trace!("Tick {} requested", handle.0);
        handle
    }

    fn cancel_tick(&mut self, handle: TickHandle) {
        let before = self.queued.len();
        self.queued.retain(|h| *h != handle);
        if self.queued.len() < before {
            self.cancelled += 1;
            trace!("Tick {} cancelled", handle.0);
        }
    }
}

/// Converts wall-clock frame intervals into animation `dt_scale` factors
///
/// One nominal frame (60 Hz by default) maps to 1.0. Long stalls are capped
/// so a particle can't jump across most of its arc after the host was
/// suspended.
#[derive(Debug, Clone)]
pub struct FrameClock {
    nominal: Duration,
    max_scale: f64,
    last: Option<Instant>,
    last_frame_time_ms: f64,
}

impl FrameClock {
    /// Nominal frame at 60 Hz, scale capped at 4 frames
    #[must_use]
    pub fn new() -> Self {
        Self::with_nominal(Duration::from_micros(16_667), 4.0)
    }

    #[must_use]
    pub fn with_nominal(nominal: Duration, max_scale: f64) -> Self {
        Self {
            nominal,
            max_scale,
            last: None,
            last_frame_time_ms: 0.0,
        }
    }

    /// Record a frame at `now` and return its `dt_scale`.
    ///
    /// The first frame always scales by 1.0.
    pub fn tick(&mut self, now: Instant) -> f64 {
        let scale = match self.last {
            Some(last) => {
                let elapsed = now.saturating_duration_since(last);
                self.last_frame_time_ms = elapsed.as_secs_f64() * 1000.0;
                (elapsed.as_secs_f64() / self.nominal.as_secs_f64()).min(self.max_scale)
            }
            None => 1.0,
        };
        self.last = Some(now);
        scale
    }

    /// Duration of the last measured frame
    #[must_use]
    pub fn last_frame_time_ms(&self) -> f64 {
        self.last_frame_time_ms
    }

    /// Forget the previous frame, e.g. after the view was hidden.
    pub fn reset(&mut self) {
        self.last = None;
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_handles_are_unique() {
        let mut s = ManualScheduler::new();
        let a = s.request_tick();
        let b = s.request_tick();
        assert_ne!(a, b);
        assert_eq!(s.queued(), &[a, b]);
        assert_eq!(s.requested_count(), 2);
    }

    #[test]
    fn test_due_drains_queue() {
        let mut s = ManualScheduler::new();
        let a = s.request_tick();
        assert_eq!(s.due(), vec![a]);
        assert!(s.is_idle());
        assert!(s.due().is_empty());
    }

    #[test]
    fn test_cancel_removes_only_queued() {
        let mut s = ManualScheduler::new();
        let a = s.request_tick();
        let b = s.request_tick();
        s.cancel_tick(a);
        assert_eq!(s.queued(), &[b]);
        assert_eq!(s.cancelled_count(), 1);

        // Cancelling twice or after delivery is a no-op
        s.cancel_tick(a);
        let delivered = s.due();
        s.cancel_tick(delivered[0]);
        assert_eq!(s.cancelled_count(), 1);
    }

    #[test]
    fn test_frame_clock_scaling() {
        let mut clock = FrameClock::with_nominal(Duration::from_millis(10), 3.0);
        let start = Instant::now();

        assert_eq!(clock.tick(start), 1.0);
        assert_relative_eq!(clock.tick(start + Duration::from_millis(20)), 2.0, epsilon = 1e-9);
        assert_relative_eq!(clock.last_frame_time_ms(), 20.0, epsilon = 1e-9);

        // Long stall is capped
        assert_eq!(clock.tick(start + Duration::from_secs(5)), 3.0);

        clock.reset();
        assert_eq!(clock.tick(start + Duration::from_secs(6)), 1.0);
    }
}
