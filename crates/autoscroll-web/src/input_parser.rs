#![forbid(unsafe_code)]

//! JSON input parser for converting DOM-encoded inputs to
//! [`autoscroll_core::event::WidgetEvent`] values.
//!
//! The JS glue encodes each DOM event it forwards as one JSON object with a
//! `kind` field:
//!
//! ```json
//! {"kind":"wheel","deltaY":120,"deltaMode":0}
//! {"kind":"pointer","phase":"enter"}
//! {"kind":"resize","target":"viewport"}
//! {"kind":"reducedMotion","matches":true}
//! ```
//!
//! Kinds the widget does not react to return `Ok(None)`. Frames and timers
//! carry host handles and are delivered through the runner, not as JSON.

use autoscroll_core::event::{DeltaMode, WheelEvent, WidgetEvent};
use serde::Deserialize;

/// Errors from parsing encoded input JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputParseError {
    /// Malformed JSON.
    Json(String),
    /// Missing required field.
    MissingField(&'static str),
    /// Unknown pointer phase or resize target.
    UnknownPhase(String),
    /// `deltaMode` outside the DOM's 0..=2.
    UnknownDeltaMode(u32),
}

impl core::fmt::Display for InputParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Json(msg) => write!(f, "JSON parse error: {msg}"),
            Self::MissingField(field) => write!(f, "missing required field: {field}"),
            Self::UnknownPhase(phase) => write!(f, "unknown phase: {phase}"),
            Self::UnknownDeltaMode(mode) => write!(f, "unknown wheel delta mode: {mode}"),
        }
    }
}

impl std::error::Error for InputParseError {}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawInput {
    kind: String,
    #[serde(default)]
    phase: Option<String>,
    #[serde(default)]
    target: Option<String>,
    #[serde(default)]
    delta_y: Option<f64>,
    #[serde(default)]
    delta_mode: Option<u32>,
    #[serde(default)]
    matches: Option<bool>,
}

/// Parse a JSON-encoded DOM input into a [`WidgetEvent`].
///
/// Returns `Ok(None)` for kinds with no widget equivalent.
///
/// Returns `Err` for malformed JSON or missing required fields.
pub fn parse_encoded_input_to_event(json: &str) -> Result<Option<WidgetEvent>, InputParseError> {
    let raw: RawInput =
        serde_json::from_str(json).map_err(|e| InputParseError::Json(e.to_string()))?;

    match raw.kind.as_str() {
        "wheel" => parse_wheel_event(&raw),
        "pointer" => parse_pointer_event(&raw).map(Some),
        "resize" => parse_resize_event(&raw).map(Some),
        "reducedMotion" => raw
            .matches
            .map(|m| Some(WidgetEvent::ReducedMotionChanged(m)))
            .ok_or(InputParseError::MissingField("matches")),
        _ => Ok(None),
    }
}

fn parse_wheel_event(raw: &RawInput) -> Result<Option<WidgetEvent>, InputParseError> {
    let delta_y = raw.delta_y.ok_or(InputParseError::MissingField("deltaY"))?;
    let code = raw.delta_mode.unwrap_or(0);
    let mode = DeltaMode::from_dom(code).ok_or(InputParseError::UnknownDeltaMode(code))?;
    let wheel = WheelEvent { delta_y, mode };
    // Horizontal-only wheels carry no vertical delta.
    if !wheel.has_vertical_delta() {
        return Ok(None);
    }
    Ok(Some(WidgetEvent::Wheel(wheel)))
}

fn parse_pointer_event(raw: &RawInput) -> Result<WidgetEvent, InputParseError> {
    match raw.phase.as_deref() {
        Some("enter") => Ok(WidgetEvent::PointerEnter),
        Some("leave") => Ok(WidgetEvent::PointerLeave),
        Some(other) => Err(InputParseError::UnknownPhase(other.to_owned())),
        None => Err(InputParseError::MissingField("phase")),
    }
}

fn parse_resize_event(raw: &RawInput) -> Result<WidgetEvent, InputParseError> {
    match raw.target.as_deref() {
        Some("viewport") | None => Ok(WidgetEvent::ViewportResized),
        Some("content") => Ok(WidgetEvent::ContentResized),
        Some(other) => Err(InputParseError::UnknownPhase(other.to_owned())),
    }
}
