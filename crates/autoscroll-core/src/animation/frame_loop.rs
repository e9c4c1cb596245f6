#![forbid(unsafe_code)]

//! Frame-to-frame elapsed time bookkeeping.
//!
//! # Invariants
//!
//! 1. The first frame after [`FrameLoop::restart`] reports zero elapsed time.
//! 2. Elapsed time is never negative: a timestamp older than the previous one
//!    reports zero and becomes the new baseline.

use core::time::Duration;

/// What the frame loop must do after a motion change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopChange {
    /// Motion stays as it was.
    Unchanged,
    /// Motion became possible: request the first frame.
    Start,
    /// Motion stopped: cancel the pending frame.
    Stop,
    /// Speed changed while running: cancel, reset the baseline, request anew.
    Restart,
}

impl LoopChange {
    /// Whether a fresh frame must be requested.
    #[must_use]
    pub const fn requests_frame(self) -> bool {
        matches!(self, Self::Start | Self::Restart)
    }
}

/// Tracks the previous frame timestamp of one loop run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameLoop {
    last_frame: Option<Duration>,
}

impl FrameLoop {
    /// A loop that has not seen a frame yet.
    #[must_use]
    pub const fn new() -> Self {
        Self { last_frame: None }
    }

    /// Forget the previous timestamp so the next frame starts from zero.
    pub fn restart(&mut self) {
        self.last_frame = None;
    }

    /// Elapsed time since the previous frame, recording `now` as the new
    /// baseline.
    pub fn elapsed(&mut self, now: Duration) -> Duration {
        let elapsed = self
            .last_frame
            .map_or(Duration::ZERO, |last| now.saturating_sub(last));
        self.last_frame = Some(now);
        elapsed
    }

    /// Timestamp of the previous frame in this run.
    #[must_use]
    pub const fn last_frame(&self) -> Option<Duration> {
        self.last_frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn first_frame_is_zero() {
        let mut l = FrameLoop::new();
        assert_eq!(l.elapsed(MS * 5_000), Duration::ZERO);
        assert_eq!(l.elapsed(MS * 5_016), MS * 16);
    }

    #[test]
    fn restart_discards_stale_baseline() {
        let mut l = FrameLoop::new();
        let _ = l.elapsed(MS * 100);
        l.restart();
        assert_eq!(l.last_frame(), None);
        assert_eq!(l.elapsed(MS * 60_000), Duration::ZERO);
    }

    #[test]
    fn clock_skew_reports_zero() {
        let mut l = FrameLoop::new();
        let _ = l.elapsed(MS * 100);
        assert_eq!(l.elapsed(MS * 90), Duration::ZERO);
        assert_eq!(l.elapsed(MS * 100), MS * 10);
    }

    #[test]
    fn loop_change_requests() {
        assert!(LoopChange::Start.requests_frame());
        assert!(LoopChange::Restart.requests_frame());
        assert!(!LoopChange::Stop.requests_frame());
        assert!(!LoopChange::Unchanged.requests_frame());
    }
}
