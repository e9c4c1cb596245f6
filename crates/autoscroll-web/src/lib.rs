#![forbid(unsafe_code)]

//! `autoscroll-web` provides a host-driven implementation of the widget's
//! host traits.
//!
//! Design goals:
//! - **Host-driven I/O**: the embedding environment (JS) pushes layout
//!   readings and events.
//! - **Deterministic time**: the host advances a monotonic clock explicitly,
//!   and timers fire only when that clock passes their deadline.
//! - **No blocking / no threads**: suitable for `wasm32-unknown-unknown`.
//!
//! This crate does not bind to `wasm-bindgen`; `autoscroll-wasm` wraps
//! [`WidgetRunner`] with the JS API.

#[cfg(feature = "input-parser")]
pub mod input_parser;
pub mod runner;

pub use runner::WidgetRunner;

use core::time::Duration;

use autoscroll_backend::{
    Host, HostClock, HostLayout, HostObservers, HostPresenter, HostScheduler, Subscription,
};
use autoscroll_core::event::{FrameHandle, TimerHandle};
use autoscroll_core::geometry::{ContainerHeight, RowMetrics, translate_y_css};

/// Web host error type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebHostError {
    /// A value that cannot be written to a style property.
    NonFinite(&'static str),
}

impl core::fmt::Display for WebHostError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NonFinite(what) => write!(f, "non-finite {what}"),
        }
    }
}

impl std::error::Error for WebHostError {}

/// Deterministic monotonic clock controlled by the host.
#[derive(Debug, Default, Clone)]
pub struct DeterministicClock {
    now: Duration,
}

impl DeterministicClock {
    /// Create a clock starting at `0`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            now: Duration::ZERO,
        }
    }

    /// Set current monotonic time. Earlier times are ignored.
    pub fn set(&mut self, now: Duration) {
        self.now = self.now.max(now);
    }

    /// Advance monotonic time by `dt`.
    pub fn advance(&mut self, dt: Duration) {
        self.now = self.now.saturating_add(dt);
    }
}

impl HostClock for DeterministicClock {
    fn now_mono(&self) -> Duration {
        self.now
    }
}

/// Frame slot and timer queue.
///
/// Holds at most one pending frame. Timers carry absolute deadlines derived
/// from the scheduler's copy of the clock.
#[derive(Debug, Default, Clone)]
pub struct WebScheduler {
    now: Duration,
    next_id: u64,
    frame: Option<FrameHandle>,
    timers: Vec<(Duration, TimerHandle)>,
}

impl WebScheduler {
    /// Create an empty scheduler.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 0,
            frame: None,
            timers: Vec::new(),
        }
    }

    fn sync_time(&mut self, now: Duration) {
        self.now = now;
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    /// The pending frame, if any.
    #[must_use]
    pub const fn pending_frame(&self) -> Option<FrameHandle> {
        self.frame
    }

    /// Remove and return the pending frame.
    pub fn take_frame(&mut self) -> Option<FrameHandle> {
        self.frame.take()
    }

    /// Number of live timers.
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Earliest timer deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.iter().map(|(deadline, _)| *deadline).min()
    }

    /// Remove and return every timer due at the current time, earliest
    /// first.
    pub fn take_due_timers(&mut self) -> Vec<TimerHandle> {
        let now = self.now;
        let mut due: Vec<_> = self
            .timers
            .iter()
            .copied()
            .filter(|(deadline, _)| *deadline <= now)
            .collect();
        self.timers.retain(|(deadline, _)| *deadline > now);
        due.sort();
        due.into_iter().map(|(_, handle)| handle).collect()
    }
}

impl HostScheduler for WebScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        let handle = FrameHandle(self.next_id());
        self.frame = Some(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.frame == Some(handle) {
            self.frame = None;
        }
    }

    fn set_timeout(&mut self, delay: Duration) -> TimerHandle {
        let handle = TimerHandle(self.next_id());
        self.timers.push((self.now.saturating_add(delay), handle));
        handle
    }

    fn clear_timeout(&mut self, handle: TimerHandle) {
        self.timers.retain(|(_, h)| *h != handle);
    }
}

/// Layout readings pushed by the host.
#[derive(Debug, Default, Clone)]
pub struct WebLayout {
    rows: Option<RowMetrics>,
    client_height: Option<f64>,
    reduced_motion: bool,
}

impl WebLayout {
    /// Record the measured row heights of the rendered track.
    pub fn set_row_metrics(&mut self, rows: RowMetrics) {
        self.rows = (!rows.is_empty()).then_some(rows);
    }

    /// Forget the row metrics (rows not in the document).
    pub fn clear_row_metrics(&mut self) {
        self.rows = None;
    }

    /// Record the container's client height.
    pub fn set_container_client_height(&mut self, height: f64) {
        self.client_height = (height.is_finite() && height >= 0.0).then_some(height);
    }

    /// Record the reduced-motion preference.
    pub fn set_reduced_motion(&mut self, reduced: bool) {
        self.reduced_motion = reduced;
    }
}

impl HostLayout for WebLayout {
    fn row_metrics(&self) -> Option<RowMetrics> {
        self.rows.clone()
    }

    fn container_client_height(&self) -> Option<f64> {
        self.client_height
    }

    fn prefers_reduced_motion(&self) -> bool {
        self.reduced_motion
    }
}

/// Active subscriptions.
#[derive(Debug, Default, Clone)]
pub struct WebObservers {
    active: Vec<Subscription>,
}

impl WebObservers {
    /// Whether `subscription` is active.
    #[must_use]
    pub fn is_observing(&self, subscription: Subscription) -> bool {
        self.active.contains(&subscription)
    }

    /// Active subscriptions in registration order.
    #[must_use]
    pub fn active(&self) -> &[Subscription] {
        &self.active
    }
}

impl HostObservers for WebObservers {
    fn observe(&mut self, subscription: Subscription) {
        if !self.is_observing(subscription) {
            self.active.push(subscription);
        }
    }

    fn unobserve(&mut self, subscription: Subscription) {
        self.active.retain(|s| *s != subscription);
    }
}

/// Captured presentation outputs for host consumption.
///
/// Fields describe changes since the last [`WebPresenter::take_outputs`].
#[derive(Debug, Default, Clone, PartialEq)]
pub struct WebOutputs {
    /// Last offset applied to the track.
    pub offset: Option<f64>,
    /// CSS `transform` for [`Self::offset`].
    pub transform: Option<String>,
    /// Last committed container height.
    pub container_height: Option<ContainerHeight>,
    /// Number of container height commits.
    pub height_commits: u32,
    /// Number of transform updates.
    pub transform_updates: u32,
}

/// Presenter that records style writes for the host.
#[derive(Debug, Default, Clone)]
pub struct WebPresenter {
    outputs: WebOutputs,
}

impl WebPresenter {
    /// Create an empty presenter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get captured outputs.
    #[must_use]
    pub const fn outputs(&self) -> &WebOutputs {
        &self.outputs
    }

    /// Take captured outputs, leaving empty defaults.
    pub fn take_outputs(&mut self) -> WebOutputs {
        std::mem::take(&mut self.outputs)
    }
}

impl HostPresenter for WebPresenter {
    type Error = WebHostError;

    fn commit_container_height(&mut self, height: ContainerHeight) -> Result<(), Self::Error> {
        if let ContainerHeight::Fixed(px) = height
            && !px.is_finite()
        {
            return Err(WebHostError::NonFinite("container height"));
        }
        self.outputs.container_height = Some(height);
        self.outputs.height_commits = self.outputs.height_commits.saturating_add(1);
        Ok(())
    }

    fn apply_transform(&mut self, offset: f64) -> Result<(), Self::Error> {
        if !offset.is_finite() {
            return Err(WebHostError::NonFinite("offset"));
        }
        self.outputs.offset = Some(offset);
        self.outputs.transform = Some(translate_y_css(offset));
        self.outputs.transform_updates = self.outputs.transform_updates.saturating_add(1);
        Ok(())
    }
}

/// A host-driven web host.
///
/// Intended to be driven by a JS host:
/// - advance time via [`Self::set_time`] / [`Self::advance`]
/// - push layout readings via [`Self::layout_mut`]
/// - read style writes via [`Self::take_outputs`]
#[derive(Debug, Default, Clone)]
pub struct WebHost {
    clock: DeterministicClock,
    scheduler: WebScheduler,
    layout: WebLayout,
    observers: WebObservers,
    presenter: WebPresenter,
}

impl WebHost {
    /// Create a host at time zero with no layout readings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current host time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.clock.now_mono()
    }

    /// Move the clock to `now`. Earlier times are ignored.
    pub fn set_time(&mut self, now: Duration) {
        self.clock.set(now);
        self.scheduler.sync_time(self.clock.now_mono());
    }

    /// Advance the clock by `dt`.
    pub fn advance(&mut self, dt: Duration) {
        self.clock.advance(dt);
        self.scheduler.sync_time(self.clock.now_mono());
    }

    /// Mutably access layout readings.
    pub fn layout_mut(&mut self) -> &mut WebLayout {
        &mut self.layout
    }

    /// Read the scheduler state.
    #[must_use]
    pub const fn scheduler_state(&self) -> &WebScheduler {
        &self.scheduler
    }

    /// Read the observer registry.
    #[must_use]
    pub const fn observer_state(&self) -> &WebObservers {
        &self.observers
    }

    /// Get captured outputs.
    #[must_use]
    pub const fn outputs(&self) -> &WebOutputs {
        self.presenter.outputs()
    }

    /// Take captured outputs, leaving empty defaults.
    pub fn take_outputs(&mut self) -> WebOutputs {
        self.presenter.take_outputs()
    }
}

impl Host for WebHost {
    type Error = WebHostError;

    type Clock = DeterministicClock;
    type Scheduler = WebScheduler;
    type Layout = WebLayout;
    type Observers = WebObservers;
    type Presenter = WebPresenter;

    fn clock(&self) -> &Self::Clock {
        &self.clock
    }

    fn scheduler(&mut self) -> &mut Self::Scheduler {
        &mut self.scheduler
    }

    fn layout(&self) -> &Self::Layout {
        &self.layout
    }

    fn observers(&mut self) -> &mut Self::Observers {
        &mut self.observers
    }

    fn presenter(&mut self) -> &mut Self::Presenter {
        &mut self.presenter
    }
}
