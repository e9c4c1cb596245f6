#![forbid(unsafe_code)]

//! Item records and the truncated item list.
//!
//! Items arrive from the caller (usually the portfolio's JSON data files) and
//! are immutable for one render cycle. [`ItemList`] keeps at most
//! [`MAX_ITEMS`] of them, in order.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Hard cap on rendered items.
pub const MAX_ITEMS: usize = 10;

/// One row of the list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Item {
    /// Stable identifier. Row keys also carry the rank, so repeats are tolerated.
    pub id: String,
    /// Primary text.
    pub title: String,
    /// Secondary line under the title.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub subtitle: Option<String>,
    /// Leading image source.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub image_ref: Option<String>,
    /// Leading emoji, used when there is no image.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub emoji: Option<String>,
    /// Link target for the title.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub url: Option<String>,
    /// Supplementary info text.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub info: Option<String>,
    /// Trailing label; defaults to `#<rank>`.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub trailing_label: Option<String>,
}

/// `Some(text)` when the field holds non-blank text.
fn non_blank(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.trim().is_empty())
}

impl Item {
    /// Item with just an id and a title.
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            ..Self::default()
        }
    }

    /// Set the subtitle (builder pattern).
    #[must_use]
    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    /// Set the leading image (builder pattern).
    #[must_use]
    pub fn with_image(mut self, image_ref: impl Into<String>) -> Self {
        self.image_ref = Some(image_ref.into());
        self
    }

    /// Set the leading emoji (builder pattern).
    #[must_use]
    pub fn with_emoji(mut self, emoji: impl Into<String>) -> Self {
        self.emoji = Some(emoji.into());
        self
    }

    /// Set the link target (builder pattern).
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Set the info text (builder pattern).
    #[must_use]
    pub fn with_info(mut self, info: impl Into<String>) -> Self {
        self.info = Some(info.into());
        self
    }

    /// Set the trailing label (builder pattern).
    #[must_use]
    pub fn with_trailing_label(mut self, label: impl Into<String>) -> Self {
        self.trailing_label = Some(label.into());
        self
    }

    /// Non-blank subtitle.
    #[must_use]
    pub fn subtitle(&self) -> Option<&str> {
        non_blank(&self.subtitle)
    }

    /// Non-blank image source.
    #[must_use]
    pub fn image_ref(&self) -> Option<&str> {
        non_blank(&self.image_ref)
    }

    /// Non-blank emoji.
    #[must_use]
    pub fn emoji(&self) -> Option<&str> {
        non_blank(&self.emoji)
    }

    /// Non-blank link target.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        non_blank(&self.url)
    }

    /// Non-blank info text.
    #[must_use]
    pub fn info(&self) -> Option<&str> {
        non_blank(&self.info)
    }

    /// Non-blank explicit trailing label.
    #[must_use]
    pub fn trailing_label(&self) -> Option<&str> {
        non_blank(&self.trailing_label)
    }
}

/// Errors from loading items.
#[cfg(feature = "serde")]
#[derive(Debug)]
pub enum ItemsError {
    /// Malformed JSON.
    Json(serde_json::Error),
}

#[cfg(feature = "serde")]
impl core::fmt::Display for ItemsError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Json(e) => write!(f, "items JSON error: {e}"),
        }
    }
}

#[cfg(feature = "serde")]
impl std::error::Error for ItemsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(e) => Some(e),
        }
    }
}

/// Ordered items, truncated to [`MAX_ITEMS`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ItemList {
    items: Vec<Item>,
}

impl ItemList {
    /// Keep the first [`MAX_ITEMS`] items.
    #[must_use]
    pub fn new(items: impl IntoIterator<Item = Item>) -> Self {
        Self::with_limit(items, MAX_ITEMS)
    }

    /// Keep the first `limit` items; `limit` is capped at [`MAX_ITEMS`].
    #[must_use]
    pub fn with_limit(items: impl IntoIterator<Item = Item>, limit: usize) -> Self {
        Self {
            items: items.into_iter().take(limit.min(MAX_ITEMS)).collect(),
        }
    }

    /// Parse a JSON array of items.
    #[cfg(feature = "serde")]
    pub fn from_json_str(json: &str, limit: usize) -> Result<Self, ItemsError> {
        let items: Vec<Item> = serde_json::from_str(json).map_err(ItemsError::Json)?;
        Ok(Self::with_limit(items, limit))
    }

    /// Number of kept items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items in order.
    #[must_use]
    pub fn as_slice(&self) -> &[Item] {
        &self.items
    }

    /// Iterate items in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.items.iter()
    }
}

impl<'a> IntoIterator for &'a ItemList {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl IntoIterator for ItemList {
    type Item = Item;
    type IntoIter = std::vec::IntoIter<Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl FromIterator<Item> for ItemList {
    fn from_iter<T: IntoIterator<Item = Item>>(iter: T) -> Self {
        Self::new(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(n: usize) -> Vec<Item> {
        (0..n).map(|i| Item::new(i.to_string(), format!("Item {i}"))).collect()
    }

    #[test]
    fn list_truncates_to_ten() {
        let list = ItemList::new(items(25));
        assert_eq!(list.len(), MAX_ITEMS);
        assert_eq!(list.as_slice()[9].id, "9");
    }

    #[test]
    fn limit_cannot_exceed_cap() {
        assert_eq!(ItemList::with_limit(items(25), 50).len(), MAX_ITEMS);
        assert_eq!(ItemList::with_limit(items(25), 3).len(), 3);
        assert!(ItemList::with_limit(items(25), 0).is_empty());
    }

    #[test]
    fn blank_optional_fields_read_as_absent() {
        let item = Item::new("a", "A").with_url("  ").with_emoji("").with_info("note");
        assert_eq!(item.url(), None);
        assert_eq!(item.emoji(), None);
        assert_eq!(item.info(), Some("note"));
        assert_eq!(item.trailing_label(), None);
    }

    #[test]
    fn collects_from_iterator() {
        let list: ItemList = items(12).into_iter().collect();
        assert_eq!(list.iter().count(), MAX_ITEMS);
        assert_eq!((&list).into_iter().next().map(|i| i.title.as_str()), Some("Item 0"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn items_load_from_camel_case_json() {
        let json = r#"[
            {"id": "1", "title": "Rust", "imageRef": "/img/rust.png", "trailingLabel": "42h"},
            {"id": "2", "title": "Go", "emoji": "🐹", "extra": true}
        ]"#;
        let list = ItemList::from_json_str(json, MAX_ITEMS).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list.as_slice()[0].image_ref(), Some("/img/rust.png"));
        assert_eq!(list.as_slice()[0].trailing_label(), Some("42h"));
        assert_eq!(list.as_slice()[1].emoji(), Some("🐹"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn malformed_items_json_is_an_error() {
        let err = ItemList::from_json_str("{not json", MAX_ITEMS).unwrap_err();
        assert!(err.to_string().starts_with("items JSON error"));
    }
}
