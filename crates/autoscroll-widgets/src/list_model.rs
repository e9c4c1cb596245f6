#![forbid(unsafe_code)]

//! Render/list model: one logical list drawn as two passes.
//!
//! [`ListView`] borrows an [`ItemList`] and yields `2 × N` [`RowView`]s. The
//! second pass exists only so the wrap at `one_copy_height` is visually
//! seamless; it is hidden from assistive technology, kept out of the tab
//! order, and never consulted for anything but drawing.

use std::borrow::Cow;

use bitflags::bitflags;

use crate::config::AutoScrollConfig;
use crate::item::{Item, ItemList};

bitflags! {
    /// Presentation flags of a rendered row.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct RowFlags: u8 {
        /// Row belongs to the duplicate pass.
        const DUPLICATE   = 0b0001;
        /// Row is hidden from assistive technology.
        const ARIA_HIDDEN = 0b0010;
        /// Row's focusable elements are out of the tab order.
        const UNFOCUSABLE = 0b0100;
    }
}

/// Which pass a row belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pass {
    /// Interactive pass.
    Primary,
    /// Presentational copy.
    Duplicate,
}

impl Pass {
    /// Both passes in render order.
    pub const BOTH: [Self; 2] = [Self::Primary, Self::Duplicate];

    /// Prefix used in row keys.
    #[must_use]
    pub const fn key_prefix(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Duplicate => "duplicate",
        }
    }

    /// Flags carried by every row of this pass.
    #[must_use]
    pub const fn flags(self) -> RowFlags {
        match self {
            Self::Primary => RowFlags::empty(),
            Self::Duplicate => RowFlags::DUPLICATE
                .union(RowFlags::ARIA_HIDDEN)
                .union(RowFlags::UNFOCUSABLE),
        }
    }
}

/// Leading icon of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon<'a> {
    /// Image source.
    Image(&'a str),
    /// Emoji glyph.
    Emoji(&'a str),
}

/// Title of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Title<'a> {
    /// Link opening in a new browsing context.
    Link {
        /// Link text.
        text: &'a str,
        /// Target URL.
        href: &'a str,
    },
    /// Static text.
    Text(&'a str),
}

impl<'a> Title<'a> {
    /// Visible text.
    #[must_use]
    pub const fn text(&self) -> &'a str {
        match *self {
            Self::Link { text, .. } | Self::Text(text) => text,
        }
    }
}

/// One drawn row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView<'a> {
    /// Key unique across both passes.
    pub key: String,
    /// Pass the row belongs to.
    pub pass: Pass,
    /// 1-based rank in the logical list.
    pub rank: usize,
    /// Leading icon: image, else emoji, else none.
    pub icon: Option<Icon<'a>>,
    /// Title.
    pub title: Title<'a>,
    /// Secondary line.
    pub subtitle: Option<&'a str>,
    /// Supplementary info text.
    pub info: Option<&'a str>,
    /// Trailing label: explicit, else `#rank`.
    pub trailing: Cow<'a, str>,
    /// Presentation flags.
    pub flags: RowFlags,
}

impl<'a> RowView<'a> {
    /// Build the row for `item` at zero-based `index` in `pass`.
    #[must_use]
    pub fn new(item: &'a Item, index: usize, pass: Pass) -> Self {
        let rank = index + 1;
        let icon = item
            .image_ref()
            .map(Icon::Image)
            .or_else(|| item.emoji().map(Icon::Emoji));
        let title = match item.url() {
            Some(href) => Title::Link {
                text: &item.title,
                href,
            },
            None => Title::Text(&item.title),
        };
        let trailing = item
            .trailing_label()
            .map_or_else(|| Cow::Owned(format!("#{rank}")), Cow::Borrowed);
        Self {
            key: format!("{}-{rank}-{}", pass.key_prefix(), item.id),
            pass,
            rank,
            icon,
            title,
            subtitle: item.subtitle(),
            info: item.info(),
            trailing,
            flags: pass.flags(),
        }
    }

    /// Whether assistive technology should skip the row.
    #[must_use]
    pub const fn is_aria_hidden(&self) -> bool {
        self.flags.contains(RowFlags::ARIA_HIDDEN)
    }

    /// Whether the row's link is out of the tab order.
    #[must_use]
    pub const fn is_unfocusable(&self) -> bool {
        self.flags.contains(RowFlags::UNFOCUSABLE)
    }
}

/// Edge of a decorative gradient overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayEdge {
    /// Top fade.
    Top,
    /// Bottom fade.
    Bottom,
}

/// Decorative gradient overlay. Never intercepts pointer events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overlay {
    /// Edge it sits on.
    pub edge: OverlayEdge,
}

impl Overlay {
    /// Overlays are purely decorative.
    #[must_use]
    pub const fn intercepts_pointer(&self) -> bool {
        false
    }
}

/// Top and bottom fades.
pub const OVERLAYS: [Overlay; 2] = [
    Overlay {
        edge: OverlayEdge::Top,
    },
    Overlay {
        edge: OverlayEdge::Bottom,
    },
];

/// Borrowed view over the items and the presentational config.
#[derive(Debug, Clone, Copy)]
pub struct ListView<'a> {
    items: &'a ItemList,
    aria_label: &'a str,
    empty_text: &'a str,
}

impl<'a> ListView<'a> {
    /// View over `items` using labels from `config`.
    #[must_use]
    pub fn new(items: &'a ItemList, config: &'a AutoScrollConfig) -> Self {
        Self {
            items,
            aria_label: &config.aria_label,
            empty_text: &config.empty_text,
        }
    }

    /// Whether only the empty state is drawn.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Accessible name of the list.
    #[must_use]
    pub const fn aria_label(&self) -> &'a str {
        self.aria_label
    }

    /// Empty-state text.
    #[must_use]
    pub const fn empty_text(&self) -> &'a str {
        self.empty_text
    }

    /// Rows in one pass.
    pub fn pass_rows(self, pass: Pass) -> impl Iterator<Item = RowView<'a>> {
        self.items
            .iter()
            .enumerate()
            .map(move |(index, item)| RowView::new(item, index, pass))
    }

    /// All `2 × N` rows: the primary pass followed by its duplicate.
    pub fn rows(self) -> impl Iterator<Item = RowView<'a>> {
        Pass::BOTH
            .into_iter()
            .flat_map(move |pass| self.pass_rows(pass))
    }

    /// Number of drawn rows.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.items.len() * Pass::BOTH.len()
    }

    /// Overlays to draw; none in the empty state.
    #[must_use]
    pub fn overlays(&self) -> &'static [Overlay] {
        if self.is_empty() { &[] } else { &OVERLAYS }
    }
}
