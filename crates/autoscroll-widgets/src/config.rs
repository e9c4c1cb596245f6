#![forbid(unsafe_code)]

//! Widget configuration.
//!
//! [`AutoScrollConfig`] carries every knob the widget reads. It can be built
//! in code with the `with_*` builders or, with the `serde` feature, loaded
//! from the JSON data files the rest of the site uses (TOML with
//! `config-toml`).
//!
//! ```json
//! { "visibleCount": 4, "speed": 18, "resumeDelayMs": 1500,
//!   "ariaLabel": "Recently played", "emptyText": "Nothing yet" }
//! ```
//!
//! Every field has a default, so partial files are fine.

#[cfg(feature = "serde")]
use std::path::Path;
use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use autoscroll_core::event::WHEEL_LINE_HEIGHT_PX;
use autoscroll_core::interaction::DEFAULT_RESUME_DELAY;

use crate::item::MAX_ITEMS;
use crate::measurement::{COMMIT_THRESHOLD_PX, SizingMode};

/// Default rows in the visible window.
pub const DEFAULT_VISIBLE_COUNT: usize = 5;
/// Default scroll speed in pixels per second.
pub const DEFAULT_SPEED_PX_PER_SEC: f64 = 20.0;
/// Default viewport-resize debounce.
pub const DEFAULT_RESIZE_DEBOUNCE: Duration = Duration::from_millis(100);

/// Configuration for one auto-scrolling list.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct AutoScrollConfig {
    /// Rows shown in the fixed window.
    pub visible_count: usize,
    /// Fill an externally sized ancestor instead of sizing to the window.
    pub fill_parent: bool,
    /// Scroll speed in pixels per second; `0` disables motion.
    #[cfg_attr(feature = "serde", serde(rename = "speed"))]
    pub speed_px_per_sec: f64,
    /// Delay before advance resumes after hover-leave or wheel input.
    #[cfg_attr(
        feature = "serde",
        serde(rename = "resumeDelayMs", with = "duration_ms")
    )]
    pub resume_delay: Duration,
    /// Accessible name of the list.
    pub aria_label: String,
    /// Text shown when there are no items.
    pub empty_text: String,
    /// Debounce applied to viewport resize notifications.
    #[cfg_attr(
        feature = "serde",
        serde(rename = "resizeDebounceMs", with = "duration_ms")
    )]
    pub resize_debounce: Duration,
    /// Minimum container height change that gets committed.
    pub commit_threshold_px: f64,
    /// Pixels per wheel line.
    pub line_height_px: f64,
    /// Items kept from the caller's list (capped at ten).
    pub max_items: usize,
}

impl Default for AutoScrollConfig {
    fn default() -> Self {
        Self {
            visible_count: DEFAULT_VISIBLE_COUNT,
            fill_parent: false,
            speed_px_per_sec: DEFAULT_SPEED_PX_PER_SEC,
            resume_delay: DEFAULT_RESUME_DELAY,
            aria_label: "Auto-scrolling list".to_owned(),
            empty_text: "Nothing to show yet.".to_owned(),
            resize_debounce: DEFAULT_RESIZE_DEBOUNCE,
            commit_threshold_px: COMMIT_THRESHOLD_PX,
            line_height_px: WHEEL_LINE_HEIGHT_PX,
            max_items: MAX_ITEMS,
        }
    }
}

impl AutoScrollConfig {
    /// Set the visible row count (builder pattern).
    #[must_use]
    pub fn with_visible_count(mut self, count: usize) -> Self {
        self.visible_count = count;
        self
    }

    /// Set fill-parent sizing (builder pattern).
    #[must_use]
    pub fn with_fill_parent(mut self, fill_parent: bool) -> Self {
        self.fill_parent = fill_parent;
        self
    }

    /// Set the speed in pixels per second (builder pattern).
    #[must_use]
    pub fn with_speed(mut self, px_per_sec: f64) -> Self {
        self.speed_px_per_sec = px_per_sec;
        self
    }

    /// Set the resume delay (builder pattern).
    #[must_use]
    pub fn with_resume_delay(mut self, delay: Duration) -> Self {
        self.resume_delay = delay;
        self
    }

    /// Set the accessible name (builder pattern).
    #[must_use]
    pub fn with_aria_label(mut self, label: impl Into<String>) -> Self {
        self.aria_label = label.into();
        self
    }

    /// Set the empty-state text (builder pattern).
    #[must_use]
    pub fn with_empty_text(mut self, text: impl Into<String>) -> Self {
        self.empty_text = text.into();
        self
    }

    /// Set the item cap (builder pattern).
    #[must_use]
    pub fn with_max_items(mut self, max_items: usize) -> Self {
        self.max_items = max_items;
        self
    }

    /// Sizing mode implied by `fill_parent`.
    #[must_use]
    pub const fn sizing_mode(&self) -> SizingMode {
        if self.fill_parent {
            SizingMode::FillParent
        } else {
            SizingMode::FixedWindow
        }
    }

    /// Validate all parameters are within acceptable ranges.
    ///
    /// Returns a list of validation errors. An empty list means the config
    /// is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if !self.speed_px_per_sec.is_finite() || self.speed_px_per_sec < 0.0 {
            errors.push(format!(
                "speed must be finite and >= 0, got {}",
                self.speed_px_per_sec
            ));
        }
        if self.visible_count == 0 {
            errors.push("visibleCount must be > 0".into());
        }
        if self.max_items > MAX_ITEMS {
            errors.push(format!(
                "maxItems must be <= {MAX_ITEMS}, got {}",
                self.max_items
            ));
        }
        if !self.commit_threshold_px.is_finite() || self.commit_threshold_px < 0.0 {
            errors.push(format!(
                "commitThresholdPx must be finite and >= 0, got {}",
                self.commit_threshold_px
            ));
        }
        if !self.line_height_px.is_finite() || self.line_height_px <= 0.0 {
            errors.push(format!(
                "lineHeightPx must be finite and > 0, got {}",
                self.line_height_px
            ));
        }

        errors
    }

    /// Clamp out-of-range values to the nearest usable ones.
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        if !self.speed_px_per_sec.is_finite() || self.speed_px_per_sec < 0.0 {
            self.speed_px_per_sec = 0.0;
        }
        self.visible_count = self.visible_count.max(1);
        self.max_items = self.max_items.min(MAX_ITEMS);
        if !self.commit_threshold_px.is_finite() || self.commit_threshold_px < 0.0 {
            self.commit_threshold_px = COMMIT_THRESHOLD_PX;
        }
        if !self.line_height_px.is_finite() || self.line_height_px <= 0.0 {
            self.line_height_px = WHEEL_LINE_HEIGHT_PX;
        }
        self
    }

    /// Return `self` if valid, otherwise every validation error.
    pub fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Invalid(errors))
        }
    }

    /// Load from a JSON string.
    #[cfg(feature = "serde")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(s).map_err(ConfigError::Json)
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "serde")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// Load from a TOML string.
    #[cfg(feature = "config-toml")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(ConfigError::Toml)
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config-toml")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }
}

#[cfg(feature = "serde")]
mod duration_ms {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}

/// Errors from loading or validating configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// File could not be read.
    Io(std::io::Error),
    /// Malformed JSON.
    #[cfg(feature = "serde")]
    Json(serde_json::Error),
    /// Malformed TOML.
    #[cfg(feature = "config-toml")]
    Toml(toml::de::Error),
    /// Parsed, but out of range.
    Invalid(Vec<String>),
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "config I/O error: {e}"),
            #[cfg(feature = "serde")]
            Self::Json(e) => write!(f, "config JSON error: {e}"),
            #[cfg(feature = "config-toml")]
            Self::Toml(e) => write!(f, "config TOML error: {e}"),
            Self::Invalid(errors) => write!(f, "invalid config: {}", errors.join("; ")),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "serde")]
            Self::Json(e) => Some(e),
            #[cfg(feature = "config-toml")]
            Self::Toml(e) => Some(e),
            Self::Invalid(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let c = AutoScrollConfig::default();
        assert!(c.validate().is_empty());
        assert_eq!(c.resume_delay, Duration::from_millis(2000));
        assert_eq!(c.resize_debounce, Duration::from_millis(100));
        assert_eq!(c.max_items, 10);
        assert_eq!(c.sizing_mode(), SizingMode::FixedWindow);
    }

    #[test]
    fn validate_reports_every_problem() {
        let c = AutoScrollConfig::default()
            .with_speed(-3.0)
            .with_visible_count(0)
            .with_max_items(40);
        let errors = c.validate();
        assert_eq!(errors.len(), 3, "{errors:?}");
        assert!(matches!(c.validated(), Err(ConfigError::Invalid(e)) if e.len() == 3));
    }

    #[test]
    fn sanitized_clamps() {
        let c = AutoScrollConfig {
            line_height_px: 0.0,
            commit_threshold_px: f64::NAN,
            ..AutoScrollConfig::default()
        }
        .with_speed(f64::INFINITY)
        .with_visible_count(0)
        .with_max_items(99)
        .sanitized();
        assert!(c.validate().is_empty());
        assert_eq!(c.speed_px_per_sec, 0.0);
        assert_eq!(c.visible_count, 1);
        assert_eq!(c.max_items, MAX_ITEMS);
        assert_eq!(c.line_height_px, WHEEL_LINE_HEIGHT_PX);
    }

    #[test]
    fn fill_parent_selects_sizing_mode() {
        let c = AutoScrollConfig::default().with_fill_parent(true);
        assert_eq!(c.sizing_mode(), SizingMode::FillParent);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn json_partial_file_keeps_defaults() {
        let c = AutoScrollConfig::from_json_str(
            r#"{"visibleCount": 3, "speed": 12.5, "resumeDelayMs": 1500}"#,
        )
        .unwrap();
        assert_eq!(c.visible_count, 3);
        assert_eq!(c.speed_px_per_sec, 12.5);
        assert_eq!(c.resume_delay, Duration::from_millis(1500));
        assert_eq!(c.resize_debounce, DEFAULT_RESIZE_DEBOUNCE);
        assert_eq!(c.aria_label, "Auto-scrolling list");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn json_file_round_trip() {
        use std::io::Write;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let original = AutoScrollConfig::default().with_aria_label("Top tracks");
        write!(file, "{}", serde_json::to_string(&original).unwrap()).unwrap();
        let loaded = AutoScrollConfig::from_json_file(file.path()).unwrap();
        assert_eq!(loaded, original);
    }

    #[cfg(feature = "config-toml")]
    #[test]
    fn toml_loads() {
        let c = AutoScrollConfig::from_toml_str("fillParent = true\nspeed = 8.0\n").unwrap();
        assert!(c.fill_parent);
        assert_eq!(c.speed_px_per_sec, 8.0);
    }

    #[test]
    fn missing_file_is_io_error() {
        #[cfg(feature = "serde")]
        {
            let err = AutoScrollConfig::from_json_file("/definitely/not/here.json").unwrap_err();
            assert!(matches!(err, ConfigError::Io(_)));
        }
        let err = ConfigError::Invalid(vec!["a".into(), "b".into()]);
        assert_eq!(err.to_string(), "invalid config: a; b");
    }
}
