#![forbid(unsafe_code)]

use autoscroll_core::event::{DeltaMode, WheelEvent};
use autoscroll_core::geometry::RowMetrics;
use autoscroll_web::WidgetRunner;
use autoscroll_widgets::{AutoScrollConfig, ItemList};
use serde::Serialize;
use web_time::Duration;

/// Convert a JS millisecond timestamp to a [`Duration`].
///
/// Negative and non-finite values map to `None`.
#[must_use]
pub fn duration_from_ms(ms: f64) -> Option<Duration> {
    if !ms.is_finite() || ms < 0.0 {
        return None;
    }
    let secs = (ms / 1000.0).min(Duration::MAX.as_secs_f64());
    Some(Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX))
}

/// Style writes and scheduling hints for the JS glue.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionOutputs {
    /// New track `transform`, if it changed.
    pub transform: Option<String>,
    /// New container `height`, if it was committed.
    pub container_height: Option<String>,
    /// Call `frame` on the next animation frame.
    pub wants_frame: bool,
    /// Call `tick` once `performance.now()` reaches this value.
    pub timer_deadline_ms: Option<f64>,
}

/// The widget as seen from JavaScript.
#[derive(Debug, Clone)]
pub struct WidgetSession {
    runner: WidgetRunner,
}

impl WidgetSession {
    /// Create a session from a JSON config. Malformed or invalid config
    /// falls back to defaults.
    #[must_use]
    pub fn new(config_json: &str) -> Self {
        let config = if config_json.trim().is_empty() {
            AutoScrollConfig::default()
        } else {
            AutoScrollConfig::from_json_str(config_json).unwrap_or_else(|err| {
                tracing::warn!(%err, "invalid widget config, using defaults");
                AutoScrollConfig::default()
            })
        };
        Self {
            runner: WidgetRunner::new(Vec::new(), config),
        }
    }

    /// The wrapped runner.
    #[must_use]
    pub const fn runner(&self) -> &WidgetRunner {
        &self.runner
    }

    /// Replace the items from a JSON array. Returns `false` on malformed
    /// JSON, leaving the items unchanged.
    pub fn set_items_json(&mut self, json: &str) -> bool {
        let limit = self.runner.widget().config().max_items;
        match ItemList::from_json_str(json, limit) {
            Ok(items) => {
                self.runner.set_items(items);
                true
            }
            Err(err) => {
                tracing::warn!(%err, "rejected items JSON");
                false
            }
        }
    }

    /// Markup to insert before [`Self::mount`].
    #[must_use]
    pub fn render_html(&self) -> String {
        self.runner.render_html()
    }

    /// The markup is in the document.
    pub fn mount(&mut self) {
        self.runner.mount();
    }

    /// The markup is leaving the document.
    pub fn unmount(&mut self) {
        self.runner.unmount();
    }

    /// Record row heights (`getBoundingClientRect().height` of every
    /// rendered row, both passes) and the track's row gap.
    pub fn set_row_metrics(&mut self, heights: &[f64], gap: f64) {
        self.runner
            .set_row_metrics(RowMetrics::new(heights.to_vec(), gap));
    }

    /// Record the container's `clientHeight`.
    pub fn set_container_client_height(&mut self, height: f64) {
        self.runner.set_container_client_height(height);
    }

    /// `prefers-reduced-motion` changed.
    pub fn set_reduced_motion(&mut self, reduced: bool) {
        let _ = self.runner.set_reduced_motion(reduced);
    }

    /// `requestAnimationFrame` callback.
    pub fn frame(&mut self, timestamp_ms: f64) {
        if let Some(now) = duration_from_ms(timestamp_ms) {
            let _ = self.runner.frame(now);
        }
    }

    /// Timer deadline reached.
    pub fn tick(&mut self, timestamp_ms: f64) {
        if let Some(now) = duration_from_ms(timestamp_ms) {
            self.runner.tick(now);
        }
    }

    /// Pointer entered the container.
    pub fn pointer_enter(&mut self, timestamp_ms: f64) {
        let _ = self.stamp(timestamp_ms).pointer_enter();
    }

    /// Pointer left the container. The resume delay counts from
    /// `timestamp_ms`.
    pub fn pointer_leave(&mut self, timestamp_ms: f64) {
        let _ = self.stamp(timestamp_ms).pointer_leave();
    }

    /// Wheel over the container; `true` means call `preventDefault()`.
    /// An unknown `delta_mode` is ignored so the page scrolls natively.
    pub fn wheel(&mut self, delta_y: f64, delta_mode: u32, timestamp_ms: f64) -> bool {
        let Some(mode) = DeltaMode::from_dom(delta_mode) else {
            tracing::debug!(delta_mode, "ignored wheel with unknown delta mode");
            return false;
        };
        self.stamp(timestamp_ms)
            .wheel(WheelEvent { delta_y, mode })
            .prevent_default
    }

    /// Window `resize`. The debounce deadline counts from `timestamp_ms`.
    pub fn viewport_resized(&mut self, timestamp_ms: f64) {
        let _ = self.stamp(timestamp_ms).viewport_resized();
    }

    /// `ResizeObserver` callback for the container or track.
    pub fn content_resized(&mut self, timestamp_ms: f64) {
        let _ = self.stamp(timestamp_ms).content_resized();
    }

    /// Deliver a JSON-encoded DOM input. Returns `true` when the host must
    /// call `preventDefault()`.
    pub fn push_encoded_input(&mut self, json: &str, timestamp_ms: f64) -> bool {
        match self.stamp(timestamp_ms).push_encoded_input(json) {
            Ok(result) => result.prevent_default,
            Err(err) => {
                tracing::debug!(%err, "dropped encoded input");
                false
            }
        }
    }

    // Input events carry their own time; frames may not be running.
    fn stamp(&mut self, timestamp_ms: f64) -> &mut WidgetRunner {
        match duration_from_ms(timestamp_ms) {
            Some(now) => self.runner.at(now),
            None => &mut self.runner,
        }
    }

    /// Drain style writes and report scheduling needs.
    pub fn take_outputs(&mut self) -> SessionOutputs {
        let out = self.runner.take_outputs();
        SessionOutputs {
            transform: out.transform,
            container_height: out.container_height.map(|h| h.to_css()),
            wants_frame: self.runner.wants_frame(),
            timer_deadline_ms: self
                .runner
                .next_timer_deadline()
                .map(|d| d.as_micros() as f64 / 1000.0),
        }
    }

    /// [`Self::take_outputs`] as a JSON string.
    pub fn take_outputs_json(&mut self) -> String {
        serde_json::to_string(&self.take_outputs()).unwrap_or_else(|_| "{}".to_owned())
    }
}
