#![forbid(unsafe_code)]

//! Markup produced by a freshly constructed widget.

use autoscroll_widgets::{AutoScrollConfig, AutoScrollList, Item, MAX_ITEMS, Pass};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn items(n: usize) -> Vec<Item> {
    (0..n)
        .map(|i| Item::new(format!("id{i}"), format!("Title {i}")))
        .collect()
}

fn count(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}

#[test]
fn unmounted_widget_renders_auto_height_at_offset_zero() {
    let widget = AutoScrollList::new(items(3), AutoScrollConfig::default());
    let html = widget.render_html();
    assert!(html.contains("height:auto"));
    assert!(html.contains("translateY(0px)"));
    assert_eq!(widget.offset(), 0.0);
    assert!(!widget.is_mounted());
}

#[test]
fn aria_label_and_empty_text_come_from_config() {
    let config = AutoScrollConfig::default()
        .with_aria_label("Latest <news>")
        .with_empty_text("Nothing here");
    let full = AutoScrollList::new(items(2), config.clone()).render_html();
    assert!(full.contains(r#"aria-label="Latest &lt;news&gt;""#));

    let empty = AutoScrollList::new(Vec::new(), config).render_html();
    assert!(empty.contains("Nothing here"));
    assert_eq!(count(&empty, "autoscroll__row"), 0);
}

#[test]
fn max_items_limits_rendered_rows() {
    let widget = AutoScrollList::new(items(8), AutoScrollConfig::default().with_max_items(4));
    assert_eq!(widget.items().len(), 4);
    let rows: Vec<_> = widget.view().rows().map(|r| (r.pass, r.rank)).collect();
    assert_eq!(rows.len(), 8);
    assert_eq!(rows[0], (Pass::Primary, 1));
    assert_eq!(rows[4], (Pass::Duplicate, 1));
}

#[test]
fn invalid_config_is_sanitized_on_construction() {
    let bad = AutoScrollConfig {
        speed_px_per_sec: f64::NAN,
        visible_count: 0,
        ..AutoScrollConfig::default()
    };
    assert_eq!(bad.validate().len(), 2);
    let widget = AutoScrollList::new(items(2), bad);
    assert!(widget.config().validate().is_empty());
    assert_eq!(widget.config().speed_px_per_sec, 0.0);
    assert_eq!(widget.config().visible_count, 1);
}

proptest! {
    #[test]
    fn every_item_appears_in_both_passes(n in 0usize..16) {
        let html = AutoScrollList::new(items(n), AutoScrollConfig::default()).render_html();
        let kept = n.min(MAX_ITEMS);
        prop_assert_eq!(count(&html, r#"data-key="primary-"#), kept);
        prop_assert_eq!(count(&html, r#"data-key="duplicate-"#), kept);
        prop_assert_eq!(count(&html, r#"aria-hidden="true" style="pointer-events:none""#), if kept == 0 { 0 } else { 2 });
    }
}
