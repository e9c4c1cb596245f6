#![forbid(unsafe_code)]

//! Measurement subsystem.
//!
//! Turns the host's row metrics into [`Geometry`] and decides when the
//! container's height must be committed.
//!
//! # Triggers
//!
//! - mount, item changes and layout-relevant config changes (immediate);
//! - the content-box observer on the measured rows (immediate);
//! - viewport resize, debounced through [`ResizeDebounce`] (~100ms, last
//!   write wins).
//!
//! # Invariants
//!
//! 1. A fixed-window height is committed only when it differs from the last
//!    committed one by more than the threshold (0.5px by default).
//! 2. Fill-parent mode commits `100%` once and afterwards only records the
//!    observed client height.
//! 3. No items ⇒ no measurement at all.
//!
//! # Failure Modes
//!
//! - Rows not mounted yet (host returns `None`, or fewer rows than items):
//!   the measurement is skipped and the previous geometry is kept.

use core::time::Duration;

use autoscroll_backend::HostScheduler;
use autoscroll_core::event::TimerHandle;
use autoscroll_core::geometry::{ContainerHeight, Geometry, RowMetrics};

/// Default minimum height change that gets committed.
pub const COMMIT_THRESHOLD_PX: f64 = 0.5;

/// How the container is sized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SizingMode {
    /// Container height equals the visible-window height.
    #[default]
    FixedWindow,
    /// Container takes 100% of an externally sized ancestor.
    FillParent,
}

/// Why a measurement was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasureTrigger {
    /// Initial measurement.
    Mount,
    /// Item list replaced.
    ItemsChanged,
    /// Layout-relevant configuration changed.
    ConfigChanged,
    /// Content-box observer fired.
    ContentResized,
    /// Debounced viewport resize elapsed.
    ViewportResized,
}

/// Why a measurement did not happen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Empty list: only the empty state is rendered.
    NoItems,
    /// Rows are not in the layout yet.
    NotMounted,
}

/// Result of one measurement pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MeasureOutcome {
    /// Nothing was measured.
    Skipped(SkipReason),
    /// Geometry was recomputed.
    Measured {
        /// New geometry.
        geometry: Geometry,
        /// Container height to commit, when it changed enough.
        commit: Option<ContainerHeight>,
    },
}

impl MeasureOutcome {
    /// Height to commit, if any.
    #[must_use]
    pub const fn commit(&self) -> Option<ContainerHeight> {
        match self {
            Self::Measured { commit, .. } => *commit,
            Self::Skipped(_) => None,
        }
    }
}

/// Measurement state of one widget.
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    mode: SizingMode,
    visible_count: usize,
    threshold: f64,
    geometry: Geometry,
    committed: Option<ContainerHeight>,
    observed_height: Option<f64>,
}

impl Measurement {
    /// Fresh measurement state; nothing committed yet.
    #[must_use]
    pub fn new(mode: SizingMode, visible_count: usize, threshold: f64) -> Self {
        Self {
            mode,
            visible_count,
            threshold,
            geometry: Geometry::EMPTY,
            committed: None,
            observed_height: None,
        }
    }

    /// Apply new layout-relevant settings.
    ///
    /// Switching sizing mode forgets the committed height so the next
    /// measurement commits for the new mode.
    pub fn reconfigure(&mut self, mode: SizingMode, visible_count: usize, threshold: f64) {
        if mode != self.mode {
            self.committed = None;
        }
        self.mode = mode;
        self.visible_count = visible_count;
        self.threshold = threshold;
    }

    /// Current geometry.
    #[must_use]
    pub const fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// Sizing mode.
    #[must_use]
    pub const fn mode(&self) -> SizingMode {
        self.mode
    }

    /// Last committed container height.
    #[must_use]
    pub const fn committed(&self) -> Option<ContainerHeight> {
        self.committed
    }

    /// Client height observed at the last measurement.
    #[must_use]
    pub const fn observed_height(&self) -> Option<f64> {
        self.observed_height
    }

    /// Forget everything (unmount).
    pub fn reset(&mut self) {
        self.geometry = Geometry::EMPTY;
        self.committed = None;
        self.observed_height = None;
    }

    /// Measure `item_count` rows from the host's metrics.
    pub fn measure(
        &mut self,
        item_count: usize,
        rows: Option<&RowMetrics>,
        client_height: Option<f64>,
    ) -> MeasureOutcome {
        if item_count == 0 {
            return MeasureOutcome::Skipped(SkipReason::NoItems);
        }
        let Some(rows) = rows.filter(|r| r.len() >= item_count) else {
            return MeasureOutcome::Skipped(SkipReason::NotMounted);
        };
        let first_pass = RowMetrics::new(rows.heights()[..item_count].to_vec(), rows.gap());
        self.observed_height = client_height.filter(|h| h.is_finite() && *h >= 0.0);

        let (geometry, next) = match self.mode {
            SizingMode::FixedWindow => {
                let g = Geometry::from_rows(&first_pass, self.visible_count);
                (g, ContainerHeight::Fixed(g.visible_height))
            }
            SizingMode::FillParent => {
                let g = Geometry::from_rows(&first_pass, item_count)
                    .with_visible_height(self.observed_height.unwrap_or(0.0));
                (g, ContainerHeight::FillParent)
            }
        };
        self.geometry = geometry;

        let commit = needs_commit(self.committed, next, self.threshold).then_some(next);
        if commit.is_some() {
            self.committed = Some(next);
        }
        MeasureOutcome::Measured { geometry, commit }
    }
}

fn needs_commit(prev: Option<ContainerHeight>, next: ContainerHeight, threshold: f64) -> bool {
    match (prev, next) {
        (Some(ContainerHeight::Fixed(a)), ContainerHeight::Fixed(b)) => (a - b).abs() > threshold,
        (Some(prev), next) => prev != next,
        (None, _) => true,
    }
}

/// Single pending debounce timer for viewport resizes.
///
/// A new resize cancels the pending timer and schedules a fresh one, so only
/// the last resize in a burst triggers a measurement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizeDebounce {
    delay: Duration,
    pending: Option<TimerHandle>,
}

impl ResizeDebounce {
    /// Debounce with the given delay.
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Change the delay for subsequent resizes.
    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }

    /// The pending timer, if any.
    #[must_use]
    pub const fn pending(&self) -> Option<TimerHandle> {
        self.pending
    }

    /// Register a resize: cancel any pending timer and schedule a new one.
    pub fn schedule<S: HostScheduler + ?Sized>(&mut self, scheduler: &mut S) -> TimerHandle {
        if let Some(prev) = self.pending.take() {
            scheduler.clear_timeout(prev);
        }
        let handle = scheduler.set_timeout(self.delay);
        self.pending = Some(handle);
        handle
    }

    /// A timer fired; returns `true` when it is the pending resize timer.
    pub fn fire(&mut self, handle: TimerHandle) -> bool {
        if self.pending == Some(handle) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    /// Cancel the pending timer (unmount).
    pub fn cancel<S: HostScheduler + ?Sized>(&mut self, scheduler: &mut S) {
        if let Some(prev) = self.pending.take() {
            scheduler.clear_timeout(prev);
        }
    }
}
