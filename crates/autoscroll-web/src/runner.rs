#![forbid(unsafe_code)]

//! Drives an [`AutoScrollList`] against a [`WebHost`].
//!
//! The JS glue calls [`WidgetRunner::frame`] from `requestAnimationFrame` and
//! [`WidgetRunner::tick`] when the earliest timer deadline passes. Both move
//! the host clock forward, fire due timers, and (for `frame`) deliver the
//! pending animation frame.

use core::time::Duration;

use autoscroll_backend::Host;
use autoscroll_core::event::{WheelEvent, WidgetEvent};
use autoscroll_core::geometry::RowMetrics;
use autoscroll_widgets::{AutoScrollConfig, AutoScrollList, EventResult, Item};

use crate::{WebHost, WebOutputs};

/// Widget plus deterministic host.
#[derive(Debug, Clone)]
pub struct WidgetRunner {
    widget: AutoScrollList,
    host: WebHost,
}

impl WidgetRunner {
    /// Create a runner with a fresh host. The widget is not mounted.
    #[must_use]
    pub fn new(items: impl IntoIterator<Item = Item>, config: AutoScrollConfig) -> Self {
        Self::with_host(AutoScrollList::new(items, config), WebHost::new())
    }

    /// Wrap an existing widget and host.
    #[must_use]
    pub const fn with_host(widget: AutoScrollList, host: WebHost) -> Self {
        Self { widget, host }
    }

    /// The widget.
    #[must_use]
    pub const fn widget(&self) -> &AutoScrollList {
        &self.widget
    }

    /// The host.
    #[must_use]
    pub const fn host(&self) -> &WebHost {
        &self.host
    }

    /// Mutably access the host (layout readings, clock).
    pub fn host_mut(&mut self) -> &mut WebHost {
        &mut self.host
    }

    /// Current scroll offset.
    #[must_use]
    pub const fn offset(&self) -> f64 {
        self.widget.offset()
    }

    /// Markup for the current state.
    #[must_use]
    pub fn render_html(&self) -> String {
        self.widget.render_html()
    }

    /// Mount the widget.
    pub fn mount(&mut self) {
        self.widget.mount(&mut self.host);
    }

    /// Unmount the widget.
    pub fn unmount(&mut self) {
        self.widget.unmount(&mut self.host);
    }

    /// Replace the items.
    pub fn set_items(&mut self, items: impl IntoIterator<Item = Item>) {
        self.widget.set_items(items, &mut self.host);
    }

    /// Replace the configuration.
    pub fn set_config(&mut self, config: AutoScrollConfig) {
        self.widget.set_config(config, &mut self.host);
    }

    /// Record row metrics. Call [`Self::content_resized`] to re-measure.
    pub fn set_row_metrics(&mut self, rows: RowMetrics) {
        self.host.layout_mut().set_row_metrics(rows);
    }

    /// Record the container's client height.
    pub fn set_container_client_height(&mut self, height: f64) {
        self.host.layout_mut().set_container_client_height(height);
    }

    /// Record the reduced-motion preference and notify the widget.
    pub fn set_reduced_motion(&mut self, reduced: bool) -> EventResult {
        self.host.layout_mut().set_reduced_motion(reduced);
        self.dispatch(&WidgetEvent::ReducedMotionChanged(reduced))
    }

    /// Deliver one event.
    pub fn dispatch(&mut self, event: &WidgetEvent) -> EventResult {
        tracing::trace!(event = event.name(), "dispatch");
        self.widget.handle_event(event, &mut self.host)
    }

    /// Deliver a wheel event; `prevent_default` says whether the host must
    /// suppress page scrolling.
    pub fn wheel(&mut self, wheel: WheelEvent) -> EventResult {
        self.dispatch(&WidgetEvent::Wheel(wheel))
    }

    /// Pointer entered the container.
    pub fn pointer_enter(&mut self) -> EventResult {
        self.dispatch(&WidgetEvent::PointerEnter)
    }

    /// Pointer left the container.
    pub fn pointer_leave(&mut self) -> EventResult {
        self.dispatch(&WidgetEvent::PointerLeave)
    }

    /// The viewport was resized.
    pub fn viewport_resized(&mut self) -> EventResult {
        self.dispatch(&WidgetEvent::ViewportResized)
    }

    /// The content box changed size.
    pub fn content_resized(&mut self) -> EventResult {
        self.dispatch(&WidgetEvent::ContentResized)
    }

    /// Parse and deliver a JSON-encoded DOM input.
    #[cfg(feature = "input-parser")]
    pub fn push_encoded_input(
        &mut self,
        json: &str,
    ) -> Result<EventResult, crate::input_parser::InputParseError> {
        Ok(crate::input_parser::parse_encoded_input_to_event(json)?
            .map_or(EventResult::IGNORED, |event| self.dispatch(&event)))
    }

    /// Move time to `now` without firing timers. Call before delivering an
    /// input event so deadlines it schedules start from the event's time.
    pub fn at(&mut self, now: Duration) -> &mut Self {
        self.host.set_time(now);
        self
    }

    /// Move time to `now` and fire due timers.
    pub fn tick(&mut self, now: Duration) {
        self.host.set_time(now);
        let due = self.host.scheduler().take_due_timers();
        for timer in due {
            let _ = self.dispatch(&WidgetEvent::Timer(timer));
        }
    }

    /// Move time to `now`, fire due timers, then deliver the pending frame.
    pub fn frame(&mut self, now: Duration) -> EventResult {
        self.tick(now);
        match self.host.scheduler().take_frame() {
            Some(frame) => self.dispatch(&WidgetEvent::Frame(frame)),
            None => EventResult::IGNORED,
        }
    }

    /// Run `count` frames spaced `dt` apart.
    pub fn run_frames(&mut self, count: usize, dt: Duration) {
        for _ in 0..count {
            let now = self.host.now().saturating_add(dt);
            let _ = self.frame(now);
        }
    }

    /// Whether an animation frame is pending.
    #[must_use]
    pub fn wants_frame(&self) -> bool {
        self.host.scheduler_state().pending_frame().is_some()
    }

    /// Earliest pending timer deadline.
    #[must_use]
    pub fn next_timer_deadline(&self) -> Option<Duration> {
        self.host.scheduler_state().next_deadline()
    }

    /// Take captured outputs.
    pub fn take_outputs(&mut self) -> WebOutputs {
        self.host.take_outputs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use autoscroll_backend::Subscription;
    use autoscroll_core::geometry::ContainerHeight;
    use pretty_assertions::assert_eq;

    const FRAME: Duration = Duration::from_millis(16);

    fn items(n: usize) -> Vec<Item> {
        (0..n)
            .map(|i| Item::new(i.to_string(), format!("Item {i}")))
            .collect()
    }

    fn mounted(n: usize, config: AutoScrollConfig) -> WidgetRunner {
        let mut r = WidgetRunner::new(items(n), config);
        r.set_row_metrics(RowMetrics::uniform(n, 40.0, 8.0));
        r.mount();
        r
    }

    #[test]
    fn mount_commits_height_and_requests_frame() {
        let mut r = mounted(3, AutoScrollConfig::default());
        assert!(r.wants_frame());
        let out = r.take_outputs();
        assert_eq!(out.container_height, Some(ContainerHeight::Fixed(136.0)));
        assert_eq!(out.height_commits, 1);
        assert_eq!(out.transform.as_deref(), Some("translateY(0px)"));
        assert!(
            r.host()
                .observer_state()
                .is_observing(Subscription::ViewportResize)
        );
    }

    #[test]
    fn frames_move_the_track() {
        let mut r = mounted(5, AutoScrollConfig::default().with_visible_count(2));
        let _ = r.take_outputs();
        r.run_frames(30, FRAME);
        let out = r.take_outputs();
        assert!(r.offset() > 0.0);
        assert_eq!(out.offset, Some(r.offset()));
        assert!(out.transform_updates > 0);
    }

    #[test]
    fn frame_without_pending_request_is_ignored() {
        let mut r = mounted(1, AutoScrollConfig::default());
        assert!(!r.wants_frame());
        assert_eq!(r.frame(FRAME), EventResult::IGNORED);
    }

    #[test]
    fn tick_fires_debounced_resize() {
        let mut r = mounted(4, AutoScrollConfig::default().with_visible_count(2));
        let _ = r.take_outputs();
        r.set_row_metrics(RowMetrics::uniform(4, 50.0, 8.0));
        let _ = r.viewport_resized();
        assert_eq!(r.next_timer_deadline(), Some(Duration::from_millis(100)));

        r.tick(Duration::from_millis(99));
        assert_eq!(r.take_outputs().height_commits, 0);

        r.tick(Duration::from_millis(100));
        let out = r.take_outputs();
        assert_eq!(out.height_commits, 1);
        assert_eq!(out.container_height, Some(ContainerHeight::Fixed(108.0)));
        assert_eq!(r.next_timer_deadline(), None);
    }

    #[test]
    fn resize_deadline_follows_event_time_without_frames() {
        let mut r = mounted(4, AutoScrollConfig::default().with_visible_count(2));
        let _ = r.set_reduced_motion(true);
        let _ = r.take_outputs();
        r.set_row_metrics(RowMetrics::uniform(4, 50.0, 8.0));

        let _ = r.at(Duration::from_millis(5000)).viewport_resized();
        assert_eq!(r.next_timer_deadline(), Some(Duration::from_millis(5100)));
        assert_eq!(r.take_outputs().height_commits, 0);

        let _ = r.at(Duration::from_millis(5050)).viewport_resized();
        assert_eq!(r.next_timer_deadline(), Some(Duration::from_millis(5150)));

        r.tick(Duration::from_millis(5100));
        assert_eq!(r.take_outputs().height_commits, 0);
        r.tick(Duration::from_millis(5150));
        assert_eq!(r.take_outputs().height_commits, 1);
    }

    #[test]
    fn at_does_not_fire_due_timers() {
        let mut r = mounted(4, AutoScrollConfig::default().with_visible_count(2));
        let _ = r.take_outputs();
        let _ = r.viewport_resized();
        let _ = r.at(Duration::from_millis(500));
        assert_eq!(r.next_timer_deadline(), Some(Duration::from_millis(100)));
        assert_eq!(r.take_outputs().height_commits, 0);
    }

    #[cfg(feature = "input-parser")]
    #[test]
    fn encoded_wheel_prevents_default() {
        let mut r = mounted(5, AutoScrollConfig::default().with_visible_count(2));
        let result = r
            .push_encoded_input(r#"{"kind":"wheel","deltaY":2,"deltaMode":1}"#)
            .unwrap();
        assert!(result.prevent_default);
        assert_eq!(r.offset(), 32.0);
    }
}
