#![forbid(unsafe_code)]

//! The auto-scrolling list widget.
//!
//! [`AutoScrollList`] owns the item list, the measurement state, the
//! animation driver and the interaction state, and wires them to a [`Host`].
//! Hosts call [`AutoScrollList::mount`] once the markup is in the document,
//! forward every [`WidgetEvent`] to [`AutoScrollList::handle_event`], and
//! call [`AutoScrollList::unmount`] when the markup goes away.
//!
//! # Invariants
//!
//! 1. At most one animation frame is pending, and none while motion is idle
//!    or the widget is unmounted.
//! 2. Unmount cancels the pending frame and resize timer and unobserves every
//!    subscription.
//! 3. Events delivered while unmounted are ignored.
//!
//! # Failure Modes
//!
//! - Presenter errors are logged and swallowed; the worst case is a static
//!   list.

use autoscroll_backend::{
    Host, HostClock, HostLayout, HostObservers, HostPresenter, HostScheduler, Subscription,
};
use autoscroll_core::animation::{AnimationDriver, DriverPhase, LoopChange, Motion};
use autoscroll_core::event::{FrameHandle, WheelEvent, WidgetEvent};
use autoscroll_core::geometry::{ContainerHeight, Geometry};
use autoscroll_core::interaction::{InteractionState, WheelContext, WheelOutcome, apply_wheel};
use core::time::Duration;

use crate::config::AutoScrollConfig;
use crate::html;
use crate::item::{Item, ItemList};
use crate::list_model::ListView;
use crate::measurement::{MeasureOutcome, MeasureTrigger, Measurement, ResizeDebounce};

/// What the host should do after delivering an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventResult {
    /// The widget reacted to the event.
    pub handled: bool,
    /// The host must suppress the platform default (`preventDefault()`).
    pub prevent_default: bool,
}

impl EventResult {
    /// Event had no effect.
    pub const IGNORED: Self = Self {
        handled: false,
        prevent_default: false,
    };

    /// Event was consumed; platform default still runs.
    pub const HANDLED: Self = Self {
        handled: true,
        prevent_default: false,
    };

    /// Event was consumed and the platform default must not run.
    pub const PREVENT_DEFAULT: Self = Self {
        handled: true,
        prevent_default: true,
    };
}

/// Auto-scrolling list widget.
#[derive(Debug, Clone)]
pub struct AutoScrollList {
    config: AutoScrollConfig,
    items: ItemList,
    measurement: Measurement,
    driver: AnimationDriver,
    interaction: InteractionState,
    resize: ResizeDebounce,
    frame: Option<FrameHandle>,
    reduced_motion: bool,
    mounted: bool,
}

impl AutoScrollList {
    /// Create an unmounted widget. The config is sanitized.
    #[must_use]
    pub fn new(items: impl IntoIterator<Item = Item>, config: AutoScrollConfig) -> Self {
        let config = config.sanitized();
        let items = ItemList::with_limit(items, config.max_items);
        Self {
            measurement: Measurement::new(
                config.sizing_mode(),
                config.visible_count,
                config.commit_threshold_px,
            ),
            resize: ResizeDebounce::new(config.resize_debounce),
            driver: AnimationDriver::new(Motion::still()),
            interaction: InteractionState::new(),
            frame: None,
            reduced_motion: false,
            mounted: false,
            items,
            config,
        }
    }

    /// Current configuration.
    #[must_use]
    pub const fn config(&self) -> &AutoScrollConfig {
        &self.config
    }

    /// Kept items.
    #[must_use]
    pub const fn items(&self) -> &ItemList {
        &self.items
    }

    /// Whether [`Self::mount`] ran without a matching unmount.
    #[must_use]
    pub const fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Current scroll offset.
    #[must_use]
    pub const fn offset(&self) -> f64 {
        self.driver.offset()
    }

    /// Current geometry.
    #[must_use]
    pub const fn geometry(&self) -> Geometry {
        self.measurement.geometry()
    }

    /// Last committed container height.
    #[must_use]
    pub const fn container_height(&self) -> Option<ContainerHeight> {
        self.measurement.committed()
    }

    /// Current interaction state.
    #[must_use]
    pub const fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    /// Pending animation frame.
    #[must_use]
    pub const fn pending_frame(&self) -> Option<FrameHandle> {
        self.frame
    }

    /// Driver phase at `now`.
    #[must_use]
    pub fn phase(&self, now: Duration) -> DriverPhase {
        self.driver.phase(&self.interaction, now)
    }

    /// Borrowed render model.
    #[must_use]
    pub fn view(&self) -> ListView<'_> {
        ListView::new(&self.items, &self.config)
    }

    /// Markup for the current state.
    #[must_use]
    pub fn render_html(&self) -> String {
        html::render_html(
            self.view(),
            self.container_height().unwrap_or_default(),
            self.offset(),
        )
    }

    fn motion(&self) -> Motion {
        Motion::new(
            self.config.speed_px_per_sec,
            self.items.len(),
            self.reduced_motion,
        )
    }

    /// Attach to the host: subscribe, measure, and start motion.
    pub fn mount<H: Host>(&mut self, host: &mut H) {
        if self.mounted {
            return;
        }
        self.mounted = true;
        self.driver.reset();
        self.interaction.reset();
        self.reduced_motion = host.layout().prefers_reduced_motion();

        host.observers().observe(Subscription::ReducedMotion);
        self.sync_layout_subscriptions(host);

        tracing::debug!(
            items = self.items.len(),
            speed = self.config.speed_px_per_sec,
            reduced_motion = self.reduced_motion,
            "autoscroll mounted"
        );

        let _ = self.remeasure(host, MeasureTrigger::Mount);
        self.present_offset(host);
        self.sync_motion(host);
    }

    /// Detach from the host, canceling everything that is pending.
    pub fn unmount<H: Host>(&mut self, host: &mut H) {
        if !self.mounted {
            return;
        }
        if let Some(frame) = self.frame.take() {
            host.scheduler().cancel_frame(frame);
        }
        self.resize.cancel(host.scheduler());
        for subscription in Subscription::ALL {
            host.observers().unobserve(subscription);
        }
        self.measurement.reset();
        self.driver = AnimationDriver::new(Motion::still());
        self.mounted = false;
        tracing::debug!("autoscroll unmounted");
    }

    /// Replace the items. Re-measures when mounted.
    pub fn set_items<H: Host>(&mut self, items: impl IntoIterator<Item = Item>, host: &mut H) {
        let items = ItemList::with_limit(items, self.config.max_items);
        if items == self.items {
            return;
        }
        self.items = items;
        if !self.mounted {
            return;
        }
        self.sync_layout_subscriptions(host);
        let _ = self.remeasure(host, MeasureTrigger::ItemsChanged);
        self.sync_motion(host);
    }

    /// Replace the configuration. Re-measures when layout-relevant fields
    /// changed and restarts the loop when the speed changed.
    ///
    /// A new `max_items` applies from the next [`Self::set_items`].
    pub fn set_config<H: Host>(&mut self, config: AutoScrollConfig, host: &mut H) {
        let config = config.sanitized();
        let layout_changed = config.fill_parent != self.config.fill_parent
            || config.visible_count != self.config.visible_count
            || config.commit_threshold_px != self.config.commit_threshold_px;
        self.measurement.reconfigure(
            config.sizing_mode(),
            config.visible_count,
            config.commit_threshold_px,
        );
        self.resize.set_delay(config.resize_debounce);
        self.config = config;
        if !self.mounted {
            return;
        }
        if layout_changed {
            let _ = self.remeasure(host, MeasureTrigger::ConfigChanged);
        }
        self.sync_motion(host);
    }

    /// Deliver one host event.
    pub fn handle_event<H: Host>(&mut self, event: &WidgetEvent, host: &mut H) -> EventResult {
        if !self.mounted {
            return EventResult::IGNORED;
        }
        match *event {
            WidgetEvent::Frame(handle) => self.on_frame(handle, host),
            WidgetEvent::PointerEnter => {
                self.interaction.pointer_enter();
                EventResult::HANDLED
            }
            WidgetEvent::PointerLeave => {
                let now = host.clock().now_mono();
                self.interaction
                    .pointer_leave(now, self.config.resume_delay);
                EventResult::HANDLED
            }
            WidgetEvent::Wheel(wheel) => self.on_wheel(&wheel, host),
            WidgetEvent::ContentResized => {
                let _ = self.remeasure(host, MeasureTrigger::ContentResized);
                EventResult::HANDLED
            }
            WidgetEvent::ViewportResized => {
                if self.items.is_empty() {
                    return EventResult::IGNORED;
                }
                self.resize.schedule(host.scheduler());
                EventResult::HANDLED
            }
            WidgetEvent::Timer(handle) => {
                if self.resize.fire(handle) {
                    let _ = self.remeasure(host, MeasureTrigger::ViewportResized);
                    EventResult::HANDLED
                } else {
                    EventResult::IGNORED
                }
            }
            WidgetEvent::ReducedMotionChanged(reduced) => {
                self.reduced_motion = reduced;
                self.sync_motion(host);
                EventResult::HANDLED
            }
        }
    }

    fn on_frame<H: Host>(&mut self, handle: FrameHandle, host: &mut H) -> EventResult {
        if self.frame != Some(handle) {
            return EventResult::IGNORED;
        }
        self.frame = None;
        let now = host.clock().now_mono();
        let before = self.driver.offset();
        let geometry = self.measurement.geometry();
        let state = self.driver.on_frame(now, &geometry, &self.interaction);
        tracing::trace!(offset = state.offset, now_ms = now.as_millis() as u64, "frame");
        if state.offset != before {
            self.present_offset(host);
        }
        if self.driver.motion().animates() {
            self.frame = Some(host.scheduler().request_frame());
        }
        EventResult::HANDLED
    }

    fn on_wheel<H: Host>(&mut self, wheel: &WheelEvent, host: &mut H) -> EventResult {
        let ctx = WheelContext {
            geometry: self.measurement.geometry(),
            item_count: self.items.len(),
            client_height: host.layout().container_client_height(),
            line_height: self.config.line_height_px,
        };
        match apply_wheel(self.driver.offset(), wheel, &ctx) {
            WheelOutcome::Ignored => EventResult::IGNORED,
            WheelOutcome::Scrolled { offset, delta_px } => {
                let now = host.clock().now_mono();
                self.driver.set_offset(offset);
                self.interaction.suspend(now, self.config.resume_delay);
                tracing::trace!(delta_px, offset, "wheel scroll");
                self.present_offset(host);
                EventResult::PREVENT_DEFAULT
            }
        }
    }

    fn remeasure<H: Host>(&mut self, host: &mut H, trigger: MeasureTrigger) -> MeasureOutcome {
        let _span = tracing::debug_span!("autoscroll.measure", trigger = ?trigger).entered();
        let rows = host.layout().row_metrics();
        let client_height = host.layout().container_client_height();
        let outcome = self
            .measurement
            .measure(self.items.len(), rows.as_ref(), client_height);
        match outcome {
            MeasureOutcome::Skipped(reason) => {
                tracing::debug!(?reason, "measurement skipped");
            }
            MeasureOutcome::Measured { geometry, commit } => {
                tracing::debug!(
                    one_copy_height = geometry.one_copy_height,
                    visible_height = geometry.visible_height,
                    "measured"
                );
                if let Some(height) = commit {
                    tracing::info!(height = ?height, "container height committed");
                    if let Err(err) = host.presenter().commit_container_height(height) {
                        tracing::warn!(%err, "failed to commit container height");
                    }
                }
                let before = self.driver.offset();
                self.driver.rewrap(&geometry);
                if self.driver.offset() != before {
                    self.present_offset(host);
                }
            }
        }
        outcome
    }

    fn sync_motion<H: Host>(&mut self, host: &mut H) {
        let change = self.driver.set_motion(self.motion());
        match change {
            LoopChange::Unchanged => {}
            LoopChange::Start | LoopChange::Restart => {
                if let Some(frame) = self.frame.take() {
                    host.scheduler().cancel_frame(frame);
                }
                self.frame = Some(host.scheduler().request_frame());
                tracing::debug!(?change, speed = self.config.speed_px_per_sec, "animation loop");
            }
            LoopChange::Stop => {
                if let Some(frame) = self.frame.take() {
                    host.scheduler().cancel_frame(frame);
                }
                tracing::debug!("animation loop stopped");
                self.present_offset(host);
            }
        }
    }

    fn sync_layout_subscriptions<H: Host>(&mut self, host: &mut H) {
        let observers = host.observers();
        if self.items.is_empty() {
            observers.unobserve(Subscription::ContentBox);
            observers.unobserve(Subscription::ViewportResize);
        } else {
            observers.observe(Subscription::ContentBox);
            observers.observe(Subscription::ViewportResize);
        }
        if self.items.is_empty() {
            self.resize.cancel(host.scheduler());
        }
    }

    fn present_offset<H: Host>(&mut self, host: &mut H) {
        let offset = self.driver.offset();
        if let Err(err) = host.presenter().apply_transform(offset) {
            tracing::warn!(%err, offset, "failed to apply transform");
        }
    }
}
