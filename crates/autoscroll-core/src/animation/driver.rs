#![forbid(unsafe_code)]

//! Constant-velocity scroll integrator.
//!
//! # State machine
//!
//! ```text
//!            motion gated off (<=1 item, speed 0, reduced motion)
//!   Idle  <-------------------------------------------------------+
//!    |                                                             |
//!    | motion allowed                                              |
//!    v        pointer enter            pointer leave               |
//!  Running ---------------> Paused ---------------> Suspended      |
//!    ^  \                                              |           |
//!    |   \-- wheel ------------------------------------+           |
//!    +------------- now > active_until && !hover ------+           |
//! ```
//!
//! # Invariants
//!
//! 1. [`step`] only moves the offset in [`DriverPhase::Running`].
//! 2. After a step the offset lies in `[0, one_copy_height)` whenever
//!    `one_copy_height > 0`, for any elapsed duration.
//! 3. Leaving motion (`Stop`) renders offset `0`.

use core::time::Duration;

use super::frame_loop::{FrameLoop, LoopChange};
use crate::geometry::Geometry;
use crate::interaction::InteractionState;

/// Motion gating inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion {
    /// Configured speed in pixels per second.
    pub speed_px_per_sec: f64,
    /// Items in the logical list.
    pub item_count: usize,
    /// Platform reduced-motion preference.
    pub reduced_motion: bool,
}

impl Motion {
    /// Create motion gating inputs.
    #[must_use]
    pub const fn new(speed_px_per_sec: f64, item_count: usize, reduced_motion: bool) -> Self {
        Self {
            speed_px_per_sec,
            item_count,
            reduced_motion,
        }
    }

    /// No motion at all.
    #[must_use]
    pub const fn still() -> Self {
        Self::new(0.0, 0, false)
    }

    /// Whether the loop should run.
    #[must_use]
    pub fn animates(&self) -> bool {
        self.speed_px_per_sec.is_finite()
            && self.speed_px_per_sec > 0.0
            && self.item_count > 1
            && !self.reduced_motion
    }

    /// Speed in pixels per millisecond.
    #[must_use]
    pub fn speed_px_per_ms(&self) -> f64 {
        self.speed_px_per_sec / 1000.0
    }
}

impl Default for Motion {
    fn default() -> Self {
        Self::still()
    }
}

/// Scroll offset owned by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OffsetState {
    /// Distance the track is translated upwards, in pixels.
    pub offset: f64,
}

impl OffsetState {
    /// Offset zero.
    pub const ZERO: Self = Self { offset: 0.0 };

    /// Wrap the offset into the geometry's range.
    #[must_use]
    pub fn rewrapped(self, geometry: &Geometry) -> Self {
        Self {
            offset: geometry.wrap(self.offset),
        }
    }
}

/// Observable driver phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverPhase {
    /// Motion gated off.
    Idle,
    /// Advancing every frame.
    Running,
    /// Pointer over the container.
    Paused,
    /// Inside a post-interaction suspension window.
    Suspended,
}

/// Phase for the given inputs at `now`.
#[must_use]
pub fn phase(motion: &Motion, interaction: &InteractionState, now: Duration) -> DriverPhase {
    if !motion.animates() {
        DriverPhase::Idle
    } else if interaction.is_hover_paused() {
        DriverPhase::Paused
    } else if interaction.is_suspended(now) {
        DriverPhase::Suspended
    } else {
        DriverPhase::Running
    }
}

/// Advance `state` by `elapsed` at the configured speed.
///
/// Returns `state` unchanged unless the phase at `now` is
/// [`DriverPhase::Running`]. The advanced offset is reduced with a true
/// modulo, so a ten-minute gap lands at the same place continuous motion
/// would have.
#[must_use]
pub fn step(
    state: OffsetState,
    elapsed: Duration,
    geometry: &Geometry,
    motion: &Motion,
    interaction: &InteractionState,
    now: Duration,
) -> OffsetState {
    if phase(motion, interaction, now) != DriverPhase::Running {
        return state;
    }
    let elapsed_ms = elapsed.as_secs_f64() * 1000.0;
    let advanced = state.offset + elapsed_ms * motion.speed_px_per_ms();
    OffsetState {
        offset: geometry.wrap(advanced),
    }
}

/// Offset, motion gating and frame loop of one widget.
#[derive(Debug, Clone, Default)]
pub struct AnimationDriver {
    state: OffsetState,
    motion: Motion,
    frames: FrameLoop,
}

impl AnimationDriver {
    /// Driver at offset zero with the given motion.
    #[must_use]
    pub fn new(motion: Motion) -> Self {
        Self {
            state: OffsetState::ZERO,
            motion,
            frames: FrameLoop::new(),
        }
    }

    /// Current offset.
    #[must_use]
    pub const fn offset(&self) -> f64 {
        self.state.offset
    }

    /// Current offset state.
    #[must_use]
    pub const fn state(&self) -> OffsetState {
        self.state
    }

    /// Current motion gating.
    #[must_use]
    pub const fn motion(&self) -> Motion {
        self.motion
    }

    /// Previous frame timestamp of the running loop.
    #[must_use]
    pub const fn last_frame(&self) -> Option<Duration> {
        self.frames.last_frame()
    }

    /// Phase at `now`.
    #[must_use]
    pub fn phase(&self, interaction: &InteractionState, now: Duration) -> DriverPhase {
        phase(&self.motion, interaction, now)
    }

    /// Replace motion gating, reporting what the frame loop must do.
    ///
    /// Any change restarts the elapsed-time baseline.
    pub fn set_motion(&mut self, motion: Motion) -> LoopChange {
        let change = match (self.motion.animates(), motion.animates()) {
            (false, true) => LoopChange::Start,
            (true, false) => LoopChange::Stop,
            (true, true) if self.motion.speed_px_per_sec != motion.speed_px_per_sec => {
                LoopChange::Restart
            }
            _ => LoopChange::Unchanged,
        };
        self.motion = motion;
        if change != LoopChange::Unchanged {
            self.frames.restart();
        }
        if change == LoopChange::Stop {
            self.state = OffsetState::ZERO;
        }
        change
    }

    /// Advance for a frame at `now`.
    pub fn on_frame(
        &mut self,
        now: Duration,
        geometry: &Geometry,
        interaction: &InteractionState,
    ) -> OffsetState {
        let elapsed = self.frames.elapsed(now);
        self.state = step(
            self.state,
            elapsed,
            geometry,
            &self.motion,
            interaction,
            now,
        );
        self.state
    }

    /// Overwrite the offset (manual scroll).
    pub fn set_offset(&mut self, offset: f64) {
        self.state = OffsetState { offset };
    }

    /// Re-wrap the offset after a geometry change.
    pub fn rewrap(&mut self, geometry: &Geometry) {
        self.state = self.state.rewrapped(geometry);
    }

    /// Offset zero and a fresh frame baseline (mount).
    pub fn reset(&mut self) {
        self.state = OffsetState::ZERO;
        self.frames.restart();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::DEFAULT_RESUME_DELAY;

    const MS: Duration = Duration::from_millis(1);

    fn geometry() -> Geometry {
        Geometry::new(500.0, 200.0, 8.0)
    }

    fn running() -> Motion {
        Motion::new(50.0, 5, false)
    }

    #[test]
    fn step_advances_by_speed_times_elapsed() {
        let next = step(
            OffsetState::ZERO,
            MS * 100,
            &geometry(),
            &running(),
            &InteractionState::new(),
            MS * 100,
        );
        assert!((next.offset - 5.0).abs() < 1e-9);
    }

    #[test]
    fn step_wraps_with_true_modulo() {
        let start = OffsetState { offset: 490.0 };
        // 50 px/s for 10 minutes = 30_000 px; 490 + 30_000 = 30_490 -> 490.
        let next = step(
            start,
            Duration::from_secs(600),
            &geometry(),
            &running(),
            &InteractionState::new(),
            Duration::from_secs(600),
        );
        assert!((next.offset - 490.0).abs() < 1e-6, "got {}", next.offset);
    }

    #[test]
    fn step_holds_while_paused_or_suspended() {
        let mut hover = InteractionState::new();
        hover.pointer_enter();
        let s = OffsetState { offset: 42.0 };
        assert_eq!(step(s, MS * 16, &geometry(), &running(), &hover, MS), s);

        let mut left = InteractionState::new();
        left.pointer_leave(MS, DEFAULT_RESUME_DELAY);
        assert_eq!(step(s, MS * 16, &geometry(), &running(), &left, MS * 500), s);
        assert_ne!(
            step(s, MS * 16, &geometry(), &running(), &left, MS * 2_002),
            s
        );
    }

    #[test]
    fn step_is_idle_without_motion() {
        let s = OffsetState::ZERO;
        let i = InteractionState::new();
        for motion in [
            Motion::new(0.0, 5, false),
            Motion::new(30.0, 1, false),
            Motion::new(30.0, 5, true),
            Motion::new(f64::NAN, 5, false),
        ] {
            assert_eq!(phase(&motion, &i, MS), DriverPhase::Idle);
            assert_eq!(step(s, MS * 1_000, &geometry(), &motion, &i, MS), s);
        }
    }

    #[test]
    fn unmeasured_geometry_does_not_wrap() {
        let next = step(
            OffsetState::ZERO,
            MS * 1_000,
            &Geometry::EMPTY,
            &running(),
            &InteractionState::new(),
            MS,
        );
        assert!((next.offset - 50.0).abs() < 1e-9);
        assert_eq!(next.rewrapped(&Geometry::new(30.0, 10.0, 0.0)).offset, 20.0);
    }

    #[test]
    fn set_motion_reports_loop_changes() {
        let mut d = AnimationDriver::new(Motion::still());
        assert_eq!(d.set_motion(running()), LoopChange::Start);
        assert_eq!(d.set_motion(Motion::new(50.0, 7, false)), LoopChange::Unchanged);
        assert_eq!(d.set_motion(Motion::new(80.0, 7, false)), LoopChange::Restart);
        d.set_offset(120.0);
        assert_eq!(d.set_motion(Motion::new(80.0, 7, true)), LoopChange::Stop);
        assert_eq!(d.offset(), 0.0);
        assert_eq!(d.set_motion(Motion::new(0.0, 7, false)), LoopChange::Unchanged);
    }

    #[test]
    fn restart_makes_next_frame_zero_elapsed() {
        let mut d = AnimationDriver::new(running());
        let i = InteractionState::new();
        let _ = d.on_frame(MS * 1_000, &geometry(), &i);
        let _ = d.on_frame(MS * 1_100, &geometry(), &i);
        let before = d.offset();
        assert_eq!(d.set_motion(Motion::new(100.0, 5, false)), LoopChange::Restart);
        let after = d.on_frame(MS * 60_000, &geometry(), &i);
        assert_eq!(after.offset, before);
    }
}
