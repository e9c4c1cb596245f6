#![forbid(unsafe_code)]
#![doc = "Host capability traits for the auto-scrolling list widget."]
#![doc = ""]
#![doc = "This crate defines the boundary between the widget and the environment that"]
#![doc = "embeds it (a browser through WASM glue, or a deterministic host in tests)."]
#![doc = "The widget never reads a clock, schedules a callback, or touches layout except"]
#![doc = "through these traits."]

use core::time::Duration;

use autoscroll_core::event::{FrameHandle, TimerHandle};
use autoscroll_core::geometry::{ContainerHeight, RowMetrics};

/// Monotonic clock abstraction.
///
/// Browsers back this with `performance.now()`; tests advance it by hand.
pub trait HostClock {
    /// Elapsed time since an unspecified epoch, monotonically increasing.
    fn now_mono(&self) -> Duration;
}

/// Frame and timeout scheduling.
///
/// Callbacks are not closures: when a frame or timeout fires, the host
/// delivers `WidgetEvent::Frame(handle)` / `WidgetEvent::Timer(handle)` to the
/// widget. Canceled handles must never be delivered.
pub trait HostScheduler {
    /// Request a callback on the next display refresh.
    fn request_frame(&mut self) -> FrameHandle;

    /// Cancel a pending frame request. Unknown handles are ignored.
    fn cancel_frame(&mut self, handle: FrameHandle);

    /// Schedule a one-shot timeout after `delay`.
    fn set_timeout(&mut self, delay: Duration) -> TimerHandle;

    /// Cancel a pending timeout. Unknown handles are ignored.
    fn clear_timeout(&mut self, handle: TimerHandle);
}

/// Live layout reads.
pub trait HostLayout {
    /// Heights of the first rendered pass, or `None` when the rows are not
    /// mounted yet.
    fn row_metrics(&self) -> Option<RowMetrics>;

    /// The container's client height, when it is mounted.
    fn container_client_height(&self) -> Option<f64>;

    /// Current reduced-motion preference.
    fn prefers_reduced_motion(&self) -> bool;
}

/// Platform notifications the widget can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Subscription {
    /// Content-box observer on the measured rows (`ResizeObserver`).
    ContentBox,
    /// Global viewport resize listener.
    ViewportResize,
    /// `prefers-reduced-motion` media query listener.
    ReducedMotion,
}

impl Subscription {
    /// Every subscription kind.
    pub const ALL: [Self; 3] = [Self::ContentBox, Self::ViewportResize, Self::ReducedMotion];
}

/// Observer registration.
pub trait HostObservers {
    /// Start delivering the notification. Idempotent.
    fn observe(&mut self, subscription: Subscription);

    /// Stop delivering the notification. Idempotent.
    fn unobserve(&mut self, subscription: Subscription);
}

/// Output half of the boundary.
pub trait HostPresenter {
    /// Platform-specific error type.
    type Error: core::fmt::Debug + core::fmt::Display;

    /// Set the container's height.
    fn commit_container_height(&mut self, height: ContainerHeight) -> Result<(), Self::Error>;

    /// Translate the track upwards by `offset` pixels.
    fn apply_transform(&mut self, offset: f64) -> Result<(), Self::Error>;
}

/// Unified host combining every capability.
pub trait Host {
    /// Platform-specific error type shared with the presenter.
    type Error: core::fmt::Debug + core::fmt::Display;

    /// Clock implementation.
    type Clock: HostClock;

    /// Scheduler implementation.
    type Scheduler: HostScheduler;

    /// Layout reader implementation.
    type Layout: HostLayout;

    /// Observer registry implementation.
    type Observers: HostObservers;

    /// Presenter implementation.
    type Presenter: HostPresenter<Error = Self::Error>;

    /// Access the monotonic clock.
    fn clock(&self) -> &Self::Clock;

    /// Access the scheduler.
    fn scheduler(&mut self) -> &mut Self::Scheduler;

    /// Access layout reads.
    fn layout(&self) -> &Self::Layout;

    /// Access observer registration.
    fn observers(&mut self) -> &mut Self::Observers;

    /// Access the presenter.
    fn presenter(&mut self) -> &mut Self::Presenter;
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::fmt;
    use std::collections::BTreeSet;

    // -----------------------------------------------------------------------
    // Mock implementations for trait testing
    // -----------------------------------------------------------------------

    struct TestClock {
        elapsed: Duration,
    }

    impl HostClock for TestClock {
        fn now_mono(&self) -> Duration {
            self.elapsed
        }
    }

    #[derive(Default)]
    struct TestScheduler {
        next: u64,
        frames: BTreeSet<FrameHandle>,
        timers: BTreeSet<TimerHandle>,
    }

    impl HostScheduler for TestScheduler {
        fn request_frame(&mut self) -> FrameHandle {
            self.next += 1;
            let h = FrameHandle(self.next);
            self.frames.insert(h);
            h
        }

        fn cancel_frame(&mut self, handle: FrameHandle) {
            self.frames.remove(&handle);
        }

        fn set_timeout(&mut self, _delay: Duration) -> TimerHandle {
            self.next += 1;
            let h = TimerHandle(self.next);
            self.timers.insert(h);
            h
        }

        fn clear_timeout(&mut self, handle: TimerHandle) {
            self.timers.remove(&handle);
        }
    }

    struct TestLayout;

    impl HostLayout for TestLayout {
        fn row_metrics(&self) -> Option<RowMetrics> {
            Some(RowMetrics::uniform(3, 40.0, 8.0))
        }

        fn container_client_height(&self) -> Option<f64> {
            None
        }

        fn prefers_reduced_motion(&self) -> bool {
            false
        }
    }

    #[derive(Default)]
    struct TestObservers {
        active: BTreeSet<Subscription>,
    }

    impl HostObservers for TestObservers {
        fn observe(&mut self, subscription: Subscription) {
            self.active.insert(subscription);
        }

        fn unobserve(&mut self, subscription: Subscription) {
            self.active.remove(&subscription);
        }
    }

    #[derive(Debug)]
    struct TestError;

    impl fmt::Display for TestError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "test error")
        }
    }

    #[derive(Default)]
    struct TestPresenter {
        heights: Vec<ContainerHeight>,
        offsets: Vec<f64>,
    }

    impl HostPresenter for TestPresenter {
        type Error = TestError;

        fn commit_container_height(&mut self, height: ContainerHeight) -> Result<(), TestError> {
            self.heights.push(height);
            Ok(())
        }

        fn apply_transform(&mut self, offset: f64) -> Result<(), TestError> {
            if !offset.is_finite() {
                return Err(TestError);
            }
            self.offsets.push(offset);
            Ok(())
        }
    }

    struct TestHost {
        clock: TestClock,
        scheduler: TestScheduler,
        layout: TestLayout,
        observers: TestObservers,
        presenter: TestPresenter,
    }

    impl Host for TestHost {
        type Error = TestError;
        type Clock = TestClock;
        type Scheduler = TestScheduler;
        type Layout = TestLayout;
        type Observers = TestObservers;
        type Presenter = TestPresenter;

        fn clock(&self) -> &TestClock {
            &self.clock
        }

        fn scheduler(&mut self) -> &mut TestScheduler {
            &mut self.scheduler
        }

        fn layout(&self) -> &TestLayout {
            &self.layout
        }

        fn observers(&mut self) -> &mut TestObservers {
            &mut self.observers
        }

        fn presenter(&mut self) -> &mut TestPresenter {
            &mut self.presenter
        }
    }

    fn host() -> TestHost {
        TestHost {
            clock: TestClock {
                elapsed: Duration::from_millis(250),
            },
            scheduler: TestScheduler::default(),
            layout: TestLayout,
            observers: TestObservers::default(),
            presenter: TestPresenter::default(),
        }
    }

    // -----------------------------------------------------------------------
    // Trait behavior through the unified host
    // -----------------------------------------------------------------------

    #[test]
    fn clock_reads_through_host() {
        let h = host();
        assert_eq!(h.clock().now_mono(), Duration::from_millis(250));
    }

    #[test]
    fn scheduler_hands_out_distinct_handles() {
        let mut h = host();
        let f = h.scheduler().request_frame();
        let t = h.scheduler().set_timeout(Duration::from_millis(100));
        assert_ne!(f.0, t.0);
        h.scheduler().cancel_frame(f);
        h.scheduler().clear_timeout(t);
        assert!(h.scheduler.frames.is_empty());
        assert!(h.scheduler.timers.is_empty());
    }

    #[test]
    fn observers_are_idempotent() {
        let mut h = host();
        for s in Subscription::ALL {
            h.observers().observe(s);
            h.observers().observe(s);
        }
        assert_eq!(h.observers.active.len(), 3);
        h.observers().unobserve(Subscription::ContentBox);
        h.observers().unobserve(Subscription::ContentBox);
        assert_eq!(h.observers.active.len(), 2);
    }

    #[test]
    fn presenter_errors_surface() {
        let mut h = host();
        assert!(h.presenter().apply_transform(12.0).is_ok());
        assert!(h.presenter().apply_transform(f64::NAN).is_err());
        h.presenter()
            .commit_container_height(ContainerHeight::Fixed(136.0))
            .unwrap();
        assert_eq!(h.presenter.offsets, vec![12.0]);
        assert_eq!(h.presenter.heights, vec![ContainerHeight::Fixed(136.0)]);
    }

    #[test]
    fn layout_reports_rows() {
        let h = host();
        let rows = h.layout().row_metrics().expect("rows");
        assert_eq!(rows.one_copy_height(), 136.0);
        assert!(!h.layout().prefers_reduced_motion());
    }
}
