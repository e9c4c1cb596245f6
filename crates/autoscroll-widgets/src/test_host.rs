#![forbid(unsafe_code)]

//! Single-struct host used by unit tests in this crate.

use core::fmt;
use core::time::Duration;

use autoscroll_backend::{
    Host, HostClock, HostLayout, HostObservers, HostPresenter, HostScheduler, Subscription,
};
use autoscroll_core::event::{FrameHandle, TimerHandle};
use autoscroll_core::geometry::{ContainerHeight, RowMetrics};

#[derive(Debug)]
pub(crate) struct PresentError;

impl fmt::Display for PresentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("presenter unavailable")
    }
}

impl std::error::Error for PresentError {}

#[derive(Debug, Default)]
pub(crate) struct TestHost {
    pub now: Duration,
    pub rows: RowMetrics,
    pub client_height: Option<f64>,
    pub reduced_motion: bool,
    pub next_id: u64,
    pub live_frames: Vec<FrameHandle>,
    pub live_timers: Vec<TimerHandle>,
    pub observed: Vec<Subscription>,
    pub heights: Vec<ContainerHeight>,
    pub offsets: Vec<f64>,
    pub fail_presenter: bool,
}

impl TestHost {
    pub fn new(rows: RowMetrics) -> Self {
        Self {
            rows,
            ..Self::default()
        }
    }

    pub fn advance(&mut self, by: Duration) {
        self.now += by;
    }

    fn next(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

impl HostClock for TestHost {
    fn now_mono(&self) -> Duration {
        self.now
    }
}

impl HostScheduler for TestHost {
    fn request_frame(&mut self) -> FrameHandle {
        let handle = FrameHandle(self.next());
        self.live_frames.push(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.live_frames.retain(|h| *h != handle);
    }

    fn set_timeout(&mut self, _delay: Duration) -> TimerHandle {
        let handle = TimerHandle(self.next());
        self.live_timers.push(handle);
        handle
    }

    fn clear_timeout(&mut self, handle: TimerHandle) {
        self.live_timers.retain(|h| *h != handle);
    }
}

impl HostLayout for TestHost {
    fn row_metrics(&self) -> Option<RowMetrics> {
        (!self.rows.is_empty()).then(|| self.rows.clone())
    }

    fn container_client_height(&self) -> Option<f64> {
        self.client_height
    }

    fn prefers_reduced_motion(&self) -> bool {
        self.reduced_motion
    }
}

impl HostObservers for TestHost {
    fn observe(&mut self, subscription: Subscription) {
        if !self.observed.contains(&subscription) {
            self.observed.push(subscription);
        }
    }

    fn unobserve(&mut self, subscription: Subscription) {
        self.observed.retain(|s| *s != subscription);
    }
}

impl HostPresenter for TestHost {
    type Error = PresentError;

    fn commit_container_height(&mut self, height: ContainerHeight) -> Result<(), PresentError> {
        if self.fail_presenter {
            return Err(PresentError);
        }
        self.heights.push(height);
        Ok(())
    }

    fn apply_transform(&mut self, offset: f64) -> Result<(), PresentError> {
        if self.fail_presenter {
            return Err(PresentError);
        }
        self.offsets.push(offset);
        Ok(())
    }
}

impl Host for TestHost {
    type Error = PresentError;
    type Clock = Self;
    type Scheduler = Self;
    type Layout = Self;
    type Observers = Self;
    type Presenter = Self;

    fn clock(&self) -> &Self {
        self
    }

    fn scheduler(&mut self) -> &mut Self {
        self
    }

    fn layout(&self) -> &Self {
        self
    }

    fn observers(&mut self) -> &mut Self {
        self
    }

    fn presenter(&mut self) -> &mut Self {
        self
    }
}
