#![forbid(unsafe_code)]

//! Canonical widget input events.
//!
//! Hosts translate their platform notifications (DOM `wheel`,
//! `pointerenter`, `ResizeObserver` callbacks, `requestAnimationFrame`,
//! `matchMedia` changes) into [`WidgetEvent`] values. The widget never talks
//! to the platform directly.

/// Pixels per line for [`DeltaMode::Line`] wheel deltas.
pub const WHEEL_LINE_HEIGHT_PX: f64 = 16.0;

/// Unit of a wheel delta, matching DOM `WheelEvent.deltaMode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DeltaMode {
    /// `DOM_DELTA_PIXEL` (0).
    #[default]
    Pixel,
    /// `DOM_DELTA_LINE` (1).
    Line,
    /// `DOM_DELTA_PAGE` (2).
    Page,
}

impl DeltaMode {
    /// Map a DOM `deltaMode` code.
    #[must_use]
    pub const fn from_dom(code: u32) -> Option<Self> {
        match code {
            0 => Some(Self::Pixel),
            1 => Some(Self::Line),
            2 => Some(Self::Page),
            _ => None,
        }
    }

    /// The DOM `deltaMode` code.
    #[must_use]
    pub const fn dom_code(self) -> u32 {
        match self {
            Self::Pixel => 0,
            Self::Line => 1,
            Self::Page => 2,
        }
    }
}

/// A vertical wheel movement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelEvent {
    /// Raw vertical delta in `mode` units. Positive scrolls content up.
    pub delta_y: f64,
    /// Unit of `delta_y`.
    pub mode: DeltaMode,
}

impl WheelEvent {
    /// Wheel delta in pixels.
    #[must_use]
    pub const fn pixels(delta_y: f64) -> Self {
        Self {
            delta_y,
            mode: DeltaMode::Pixel,
        }
    }

    /// Wheel delta in lines.
    #[must_use]
    pub const fn lines(delta_y: f64) -> Self {
        Self {
            delta_y,
            mode: DeltaMode::Line,
        }
    }

    /// Wheel delta in pages.
    #[must_use]
    pub const fn pages(delta_y: f64) -> Self {
        Self {
            delta_y,
            mode: DeltaMode::Page,
        }
    }

    /// Whether the event carries a usable vertical movement.
    #[must_use]
    pub fn has_vertical_delta(&self) -> bool {
        self.delta_y.is_finite() && self.delta_y != 0.0
    }

    /// Normalize the delta to pixels.
    ///
    /// `page_height` is the container's client height.
    #[must_use]
    pub fn to_pixels(&self, line_height: f64, page_height: f64) -> f64 {
        match self.mode {
            DeltaMode::Pixel => self.delta_y,
            DeltaMode::Line => self.delta_y * line_height,
            DeltaMode::Page => self.delta_y * page_height,
        }
    }
}

/// Opaque id of a requested animation frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameHandle(pub u64);

/// Opaque id of a scheduled timeout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(pub u64);

/// Input delivered to the widget by its host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WidgetEvent {
    /// A previously requested animation frame fired.
    Frame(FrameHandle),
    /// Pointer entered the container.
    PointerEnter,
    /// Pointer left the container.
    PointerLeave,
    /// Wheel input over the container.
    Wheel(WheelEvent),
    /// The content-box observer saw the measured rows change size.
    ContentResized,
    /// The viewport was resized.
    ViewportResized,
    /// A previously scheduled timeout fired.
    Timer(TimerHandle),
    /// The reduced-motion preference changed.
    ReducedMotionChanged(bool),
}

impl WidgetEvent {
    /// Short name for logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Frame(_) => "frame",
            Self::PointerEnter => "pointer_enter",
            Self::PointerLeave => "pointer_leave",
            Self::Wheel(_) => "wheel",
            Self::ContentResized => "content_resized",
            Self::ViewportResized => "viewport_resized",
            Self::Timer(_) => "timer",
            Self::ReducedMotionChanged(_) => "reduced_motion_changed",
        }
    }
}
