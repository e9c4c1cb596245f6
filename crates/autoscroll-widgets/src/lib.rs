#![forbid(unsafe_code)]

//! Auto-scrolling list widget.
//!
//! The widget renders up to ten items twice in a vertical track and
//! translates the track upward at a constant speed. When the offset reaches
//! the height of one pass it wraps to zero, so the loop is seamless.
//!
//! - [`item`]: item records and the bounded [`ItemList`].
//! - [`config`]: [`AutoScrollConfig`] with validation and file loading.
//! - [`measurement`]: geometry measurement and container height commits.
//! - [`list_model`]: the dual-pass render model with accessibility flags.
//! - [`html`]: markup for the render model.
//! - [`auto_scroll`]: [`AutoScrollList`], which drives all of the above
//!   against an [`autoscroll_backend::Host`].
//!
//! # Example
//!
//! ```
//! use autoscroll_widgets::{AutoScrollConfig, AutoScrollList, Item};
//!
//! let items = vec![
//!     Item::new("a", "Alpha").with_emoji("🅰"),
//!     Item::new("b", "Beta").with_url("https://example.com/b"),
//! ];
//! let widget = AutoScrollList::new(items, AutoScrollConfig::default().with_visible_count(3));
//! let html = widget.render_html();
//! assert!(html.contains(r#"data-key="primary-1-a""#));
//! assert!(html.contains(r#"data-key="duplicate-2-b""#));
//! ```

pub mod auto_scroll;
pub mod config;
pub mod html;
pub mod item;
pub mod list_model;
pub mod measurement;

#[cfg(test)]
mod test_host;

pub use auto_scroll::{AutoScrollList, EventResult};
pub use config::{AutoScrollConfig, ConfigError};
#[cfg(feature = "serde")]
pub use item::ItemsError;
pub use item::{Item, ItemList, MAX_ITEMS};
pub use list_model::{ListView, Pass, RowFlags, RowView};
pub use measurement::{MeasureOutcome, MeasureTrigger, Measurement, ResizeDebounce, SizingMode};
