#![forbid(unsafe_code)]

//! Interaction controller: hover pause, wheel override, timed resumption.
//!
//! # State
//!
//! [`InteractionState`] holds two facts: whether the pointer is over the
//! container (`hover_paused`) and the instant until which automatic advance
//! stays suspended (`active_until`). Both are edge-triggered:
//!
//! | Input          | Effect                                                    |
//! |----------------|-----------------------------------------------------------|
//! | pointer enter  | `hover_paused = true`                                     |
//! | pointer leave  | `hover_paused = false`, `active_until = now + delay`      |
//! | handled wheel  | offset moves, `active_until = now + delay`                |
//!
//! # Invariants
//!
//! 1. Entering never touches the offset.
//! 2. Suspension ends strictly after `active_until` (`now > active_until`).
//! 3. A handled wheel always leaves the offset in `[0, one_copy_height)`.
//!
//! # Failure Modes
//!
//! - Wheel events over content that fits, over lists with one or no item, or
//!   with zero/non-finite deltas are ignored and must not suppress the
//!   platform's default scrolling.

use core::time::Duration;

use crate::event::WheelEvent;
use crate::geometry::{Geometry, wrap_offset};

/// Default delay before automatic advance resumes after an interaction.
pub const DEFAULT_RESUME_DELAY: Duration = Duration::from_millis(2000);

/// Hover and suspension state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InteractionState {
    hover_paused: bool,
    active_until: Option<Duration>,
}

impl InteractionState {
    /// No hover, no suspension.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            hover_paused: false,
            active_until: None,
        }
    }

    /// Pointer entered the container.
    pub fn pointer_enter(&mut self) {
        self.hover_paused = true;
    }

    /// Pointer left the container at `now`.
    pub fn pointer_leave(&mut self, now: Duration, resume_delay: Duration) {
        self.hover_paused = false;
        self.suspend(now, resume_delay);
    }

    /// Extend the suspension window to `now + resume_delay`.
    pub fn suspend(&mut self, now: Duration, resume_delay: Duration) {
        self.active_until = Some(now.saturating_add(resume_delay));
    }

    /// Whether the pointer is over the container.
    #[must_use]
    pub const fn is_hover_paused(&self) -> bool {
        self.hover_paused
    }

    /// End of the current suspension window, if any was ever set.
    #[must_use]
    pub const fn active_until(&self) -> Option<Duration> {
        self.active_until
    }

    /// Whether `now` falls inside the suspension window.
    #[must_use]
    pub fn is_suspended(&self, now: Duration) -> bool {
        self.active_until.is_some_and(|until| now <= until)
    }

    /// Whether automatic advance is withheld at `now`.
    #[must_use]
    pub fn holds_motion(&self, now: Duration) -> bool {
        self.hover_paused || self.is_suspended(now)
    }

    /// Back to the initial state (mount).
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

/// Inputs the wheel handler needs besides the event itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelContext {
    /// Current measured geometry.
    pub geometry: Geometry,
    /// Number of items in the logical list.
    pub item_count: usize,
    /// Container client height, when the host can report it.
    pub client_height: Option<f64>,
    /// Pixels per wheel line.
    pub line_height: f64,
}

impl WheelContext {
    /// Whether wheel input should be taken over at all.
    #[must_use]
    pub fn accepts_wheel(&self) -> bool {
        self.item_count > 1 && self.geometry.overflows()
    }

    fn page_height(&self) -> f64 {
        self.client_height
            .filter(|h| h.is_finite() && *h > 0.0)
            .unwrap_or(self.geometry.visible_height)
    }
}

/// Result of offering a wheel event to the controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WheelOutcome {
    /// Not handled; the platform default must run.
    Ignored,
    /// Handled; the platform default must be suppressed.
    Scrolled {
        /// New wrapped offset.
        offset: f64,
        /// Normalized pixel delta that was applied.
        delta_px: f64,
    },
}

impl WheelOutcome {
    /// Whether the host should call `preventDefault()`.
    #[must_use]
    pub const fn prevents_default(&self) -> bool {
        matches!(self, Self::Scrolled { .. })
    }
}

/// Apply a wheel event to `offset`.
///
/// The normalized delta is added to the offset and wrapped with a
/// non-negative modulo, so arbitrarily large deltas of either sign land in
/// `[0, one_copy_height)`.
#[must_use]
pub fn apply_wheel(offset: f64, wheel: &WheelEvent, ctx: &WheelContext) -> WheelOutcome {
    if !ctx.accepts_wheel() || !wheel.has_vertical_delta() {
        return WheelOutcome::Ignored;
    }
    let delta_px = wheel.to_pixels(ctx.line_height, ctx.page_height());
    if !delta_px.is_finite() {
        return WheelOutcome::Ignored;
    }
    WheelOutcome::Scrolled {
        offset: wrap_offset(offset + delta_px, ctx.geometry.one_copy_height),
        delta_px,
    }
}
