#![forbid(unsafe_code)]

//! Pixel geometry for the auto-scrolling list.
//!
//! All lengths are CSS pixels stored as `f64`. Values read from the host are
//! sanitized on the way in: non-finite or negative lengths collapse to `0.0`,
//! so downstream arithmetic never sees `NaN`.
//!
//! # Invariants
//!
//! 1. Every length stored in [`Geometry`] is finite and `>= 0`.
//! 2. [`wrap_offset`] returns a value in `[0, period)` whenever
//!    `period > 0`; otherwise it leaves the value untouched.
//! 3. `one_copy_height` of `n` rows is `sum(heights) + gap * (n - 1)`.

/// Content must exceed the visible window by more than this to count as
/// overflowing.
pub const OVERFLOW_TOLERANCE_PX: f64 = 1.0;

#[inline]
fn sanitize_len(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Measured heights of the first rendered pass, as reported by the host.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RowMetrics {
    heights: Vec<f64>,
    gap: f64,
}

impl RowMetrics {
    /// Build metrics from per-row heights and the inter-row gap.
    #[must_use]
    pub fn new(heights: Vec<f64>, gap: f64) -> Self {
        Self {
            heights: heights.into_iter().map(sanitize_len).collect(),
            gap: sanitize_len(gap),
        }
    }

    /// `count` rows of identical height.
    #[must_use]
    pub fn uniform(count: usize, height: f64, gap: f64) -> Self {
        Self::new(vec![height; count], gap)
    }

    /// Number of measured rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.heights.len()
    }

    /// Whether no rows were measured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }

    /// Inter-row gap.
    #[must_use]
    pub const fn gap(&self) -> f64 {
        self.gap
    }

    /// Row heights in render order.
    #[must_use]
    pub fn heights(&self) -> &[f64] {
        &self.heights
    }

    /// Height of the first `count` rows including the gaps between them.
    ///
    /// `count` is clamped to the number of measured rows.
    #[must_use]
    pub fn span_height(&self, count: usize) -> f64 {
        let k = count.min(self.heights.len());
        if k == 0 {
            return 0.0;
        }
        let rows: f64 = self.heights[..k].iter().sum();
        rows + self.gap * (k - 1) as f64
    }

    /// Height of one full pass through the measured rows.
    #[must_use]
    pub fn one_copy_height(&self) -> f64 {
        self.span_height(self.heights.len())
    }
}

/// Derived geometry consumed by the driver and the wheel handler.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Geometry {
    /// Height of one logical pass, gaps included.
    pub one_copy_height: f64,
    /// Height of the visible window.
    pub visible_height: f64,
    /// Inter-row gap.
    pub gap: f64,
}

impl Geometry {
    /// Unmeasured geometry.
    pub const EMPTY: Self = Self {
        one_copy_height: 0.0,
        visible_height: 0.0,
        gap: 0.0,
    };

    /// Create sanitized geometry.
    #[must_use]
    pub fn new(one_copy_height: f64, visible_height: f64, gap: f64) -> Self {
        Self {
            one_copy_height: sanitize_len(one_copy_height),
            visible_height: sanitize_len(visible_height),
            gap: sanitize_len(gap),
        }
    }

    /// Geometry of a fixed window showing the first `visible_count` rows.
    #[must_use]
    pub fn from_rows(rows: &RowMetrics, visible_count: usize) -> Self {
        Self::new(
            rows.one_copy_height(),
            rows.span_height(visible_count),
            rows.gap(),
        )
    }

    /// Replace the visible height (fill-parent mode).
    #[must_use]
    pub fn with_visible_height(self, visible_height: f64) -> Self {
        Self {
            visible_height: sanitize_len(visible_height),
            ..self
        }
    }

    /// Whether a pass has been measured with a positive height.
    #[inline]
    #[must_use]
    pub fn is_measured(&self) -> bool {
        self.one_copy_height > 0.0
    }

    /// Whether one pass is taller than the visible window.
    #[inline]
    #[must_use]
    pub fn overflows(&self) -> bool {
        self.one_copy_height > self.visible_height + OVERFLOW_TOLERANCE_PX
    }

    /// Wrap `offset` into `[0, one_copy_height)`.
    #[inline]
    #[must_use]
    pub fn wrap(&self, offset: f64) -> f64 {
        wrap_offset(offset, self.one_copy_height)
    }
}

/// Non-negative modulo of `value` against `period`.
///
/// Returns `value` unchanged when `period` is not a positive finite number,
/// and `0.0` when `value` itself is not finite.
#[must_use]
pub fn wrap_offset(value: f64, period: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    if !(period.is_finite() && period > 0.0) {
        return value;
    }
    let wrapped = value.rem_euclid(period);
    // rem_euclid may round up to exactly `period` for tiny negative inputs.
    if wrapped >= period { 0.0 } else { wrapped }
}

/// How the container's height is driven.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ContainerHeight {
    /// Not yet committed; the container sizes to content.
    #[default]
    Auto,
    /// Fixed pixel height (visible window).
    Fixed(f64),
    /// 100% of an externally sized ancestor.
    FillParent,
}

impl ContainerHeight {
    /// CSS `height` value.
    #[must_use]
    pub fn to_css(&self) -> String {
        match self {
            Self::Auto => "auto".to_owned(),
            Self::Fixed(px) => format!("{}px", format_px(*px)),
            Self::FillParent => "100%".to_owned(),
        }
    }
}

/// CSS transform for a scroll offset: a vertical translation by `-offset`.
#[must_use]
pub fn translate_y_css(offset: f64) -> String {
    if offset.is_finite() && offset > 0.0 {
        format!("translateY(-{}px)", format_px(offset))
    } else {
        "translateY(0px)".to_owned()
    }
}

/// Format a pixel length with at most two decimals and no trailing zeros.
fn format_px(px: f64) -> String {
    let mut s = format!("{:.2}", sanitize_len(px));
    while s.ends_with('0') {
        s.pop();
    }
    if s.ends_with('.') {
        s.pop();
    }
    s
}
