//! `wasm-bindgen` exports for the AutoScrollWidget.

use js_sys::{Float64Array, Object, Reflect};
use wasm_bindgen::prelude::*;

use crate::session::{SessionOutputs, WidgetSession};

fn set_js(obj: &Object, key: &str, value: JsValue) {
    let _ = Reflect::set(obj, &JsValue::from_str(key), &value);
}

fn install_panic_hook() {
    use std::sync::Once;
    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        std::panic::set_hook(Box::new(|info| {
            let global = js_sys::global();
            if let Ok(console) = Reflect::get(&global, &"console".into()) {
                if let Ok(error) = Reflect::get(&console, &"error".into()) {
                    if let Ok(f) = error.dyn_into::<js_sys::Function>() {
                        let _ = f.call1(&console, &JsValue::from_str(&format!("{info}")));
                    }
                }
            }
        }));
    });
}

fn outputs_to_js(out: SessionOutputs) -> JsValue {
    let obj = Object::new();
    set_js(
        &obj,
        "transform",
        out.transform.map_or(JsValue::NULL, |t| JsValue::from_str(&t)),
    );
    set_js(
        &obj,
        "containerHeight",
        out.container_height
            .map_or(JsValue::NULL, |h| JsValue::from_str(&h)),
    );
    set_js(&obj, "wantsFrame", JsValue::from(out.wants_frame));
    set_js(
        &obj,
        "timerDeadlineMs",
        out.timer_deadline_ms.map_or(JsValue::NULL, JsValue::from),
    );
    obj.into()
}

/// Auto-scrolling list widget for a JS host.
///
/// Host-driven: JavaScript inserts [`Self::render_html`], reports row
/// metrics, forwards DOM events, and applies the style writes returned by
/// [`Self::take_outputs`]. It calls `frame` from `requestAnimationFrame`
/// while `wantsFrame` is true and `tick` at `timerDeadlineMs`.
#[wasm_bindgen]
pub struct AutoScrollWidget {
    inner: WidgetSession,
}

#[wasm_bindgen]
impl AutoScrollWidget {
    /// Create a widget from a JSON config (camelCase keys; `{}` for
    /// defaults).
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str) -> Self {
        install_panic_hook();
        Self {
            inner: WidgetSession::new(config_json),
        }
    }

    /// Replace the items from a JSON array.
    #[wasm_bindgen(js_name = setItemsJson)]
    pub fn set_items_json(&mut self, json: &str) -> bool {
        self.inner.set_items_json(json)
    }

    /// Markup for the current items.
    #[wasm_bindgen(js_name = renderHtml)]
    pub fn render_html(&self) -> String {
        self.inner.render_html()
    }

    /// The markup is in the document.
    pub fn mount(&mut self) {
        self.inner.mount();
    }

    /// The markup is leaving the document.
    pub fn unmount(&mut self) {
        self.inner.unmount();
    }

    /// Row heights of both passes, in document order, and the row gap.
    #[wasm_bindgen(js_name = setRowMetrics)]
    pub fn set_row_metrics(&mut self, heights: Float64Array, gap: f64) {
        self.inner.set_row_metrics(&heights.to_vec(), gap);
    }

    /// Container `clientHeight`.
    #[wasm_bindgen(js_name = setContainerClientHeight)]
    pub fn set_container_client_height(&mut self, height: f64) {
        self.inner.set_container_client_height(height);
    }

    /// `matchMedia('(prefers-reduced-motion: reduce)').matches`.
    #[wasm_bindgen(js_name = setReducedMotion)]
    pub fn set_reduced_motion(&mut self, reduced: bool) {
        self.inner.set_reduced_motion(reduced);
    }

    /// `requestAnimationFrame` callback timestamp.
    pub fn frame(&mut self, timestamp_ms: f64) {
        self.inner.frame(timestamp_ms);
    }

    /// Timer deadline reached.
    pub fn tick(&mut self, timestamp_ms: f64) {
        self.inner.tick(timestamp_ms);
    }

    // Event methods take the DOM `event.timeStamp` (or `performance.now()`).

    #[wasm_bindgen(js_name = pointerEnter)]
    pub fn pointer_enter(&mut self, timestamp_ms: f64) {
        self.inner.pointer_enter(timestamp_ms);
    }

    #[wasm_bindgen(js_name = pointerLeave)]
    pub fn pointer_leave(&mut self, timestamp_ms: f64) {
        self.inner.pointer_leave(timestamp_ms);
    }

    /// Returns `true` when the listener must call `preventDefault()`.
    pub fn wheel(&mut self, delta_y: f64, delta_mode: u32, timestamp_ms: f64) -> bool {
        self.inner.wheel(delta_y, delta_mode, timestamp_ms)
    }

    #[wasm_bindgen(js_name = viewportResized)]
    pub fn viewport_resized(&mut self, timestamp_ms: f64) {
        self.inner.viewport_resized(timestamp_ms);
    }

    #[wasm_bindgen(js_name = contentResized)]
    pub fn content_resized(&mut self, timestamp_ms: f64) {
        self.inner.content_resized(timestamp_ms);
    }

    /// Push a JSON-encoded DOM input.
    #[wasm_bindgen(js_name = pushEncodedInput)]
    pub fn push_encoded_input(&mut self, json: &str, timestamp_ms: f64) -> bool {
        self.inner.push_encoded_input(json, timestamp_ms)
    }

    /// Style writes since the last call plus scheduling hints.
    #[wasm_bindgen(js_name = takeOutputs)]
    pub fn take_outputs(&mut self) -> JsValue {
        outputs_to_js(self.inner.take_outputs())
    }

    /// [`Self::take_outputs`] as a JSON string.
    #[wasm_bindgen(js_name = takeOutputsJson)]
    pub fn take_outputs_json(&mut self) -> String {
        self.inner.take_outputs_json()
    }

    /// Current scroll offset in pixels.
    pub fn offset(&self) -> f64 {
        self.inner.runner().offset()
    }
}
