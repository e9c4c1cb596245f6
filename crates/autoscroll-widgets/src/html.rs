#![forbid(unsafe_code)]

//! HTML markup for a [`ListView`].
//!
//! The WASM host mounts this markup once and afterwards only updates the
//! track's `transform` and the container's `height`. Every text node and
//! attribute value is escaped.

use std::fmt::Write as _;

use autoscroll_core::geometry::{ContainerHeight, translate_y_css};

use crate::list_model::{Icon, ListView, OverlayEdge, RowView, Title};

/// CSS class of the container.
pub const CONTAINER_CLASS: &str = "autoscroll";
/// CSS class of the translated track.
pub const TRACK_CLASS: &str = "autoscroll__track";

/// Escape text for use in HTML text and double-quoted attributes.
#[must_use]
pub fn escape(text: &str) -> String {
    v_htmlescape::escape(text).to_string()
}

/// Render the whole widget.
#[must_use]
pub fn render_html(view: ListView<'_>, height: ContainerHeight, offset: f64) -> String {
    let mut out = String::new();
    if view.is_empty() {
        let _ = write!(
            out,
            r#"<div class="{CONTAINER_CLASS} {CONTAINER_CLASS}--empty" role="status" aria-label="{}"><p class="autoscroll__empty">{}</p></div>"#,
            escape(view.aria_label()),
            escape(view.empty_text()),
        );
        return out;
    }

    let _ = write!(
        out,
        r#"<div class="{CONTAINER_CLASS}" role="list" aria-label="{}" style="position:relative;overflow:hidden;height:{}">"#,
        escape(view.aria_label()),
        height.to_css(),
    );
    let _ = write!(
        out,
        r#"<div class="{TRACK_CLASS}" style="transform:{};will-change:transform">"#,
        translate_y_css(offset),
    );
    for row in view.rows() {
        render_row(&mut out, &row);
    }
    out.push_str("</div>");
    for overlay in view.overlays() {
        let edge = match overlay.edge {
            OverlayEdge::Top => "top",
            OverlayEdge::Bottom => "bottom",
        };
        let _ = write!(
            out,
            r#"<div class="autoscroll__fade autoscroll__fade--{edge}" aria-hidden="true" style="pointer-events:none"></div>"#,
        );
    }
    out.push_str("</div>");
    out
}

fn render_row(out: &mut String, row: &RowView<'_>) {
    let _ = write!(
        out,
        r#"<div class="autoscroll__row" role="listitem" data-key="{}""#,
        escape(&row.key),
    );
    if row.is_aria_hidden() {
        out.push_str(r#" aria-hidden="true""#);
    }
    out.push('>');

    match row.icon {
        Some(Icon::Image(src)) => {
            let _ = write!(
                out,
                r#"<span class="autoscroll__icon"><img src="{}" alt="" loading="lazy"></span>"#,
                escape(src),
            );
        }
        Some(Icon::Emoji(glyph)) => {
            let _ = write!(
                out,
                r#"<span class="autoscroll__icon" aria-hidden="true">{}</span>"#,
                escape(glyph),
            );
        }
        None => {}
    }

    out.push_str(r#"<div class="autoscroll__body">"#);
    match row.title {
        Title::Link { text, href } => {
            let tabindex = if row.is_unfocusable() {
                r#" tabindex="-1""#
            } else {
                ""
            };
            let _ = write!(
                out,
                r#"<a class="autoscroll__title" href="{}" target="_blank" rel="noopener noreferrer"{tabindex}>{}</a>"#,
                escape(href),
                escape(text),
            );
        }
        Title::Text(text) => {
            let _ = write!(
                out,
                r#"<span class="autoscroll__title">{}</span>"#,
                escape(text)
            );
        }
    }
    if let Some(subtitle) = row.subtitle {
        let _ = write!(
            out,
            r#"<span class="autoscroll__subtitle">{}</span>"#,
            escape(subtitle)
        );
    }
    if let Some(info) = row.info {
        let _ = write!(
            out,
            r#"<span class="autoscroll__info">{}</span>"#,
            escape(info)
        );
    }
    out.push_str("</div>");

    let _ = write!(
        out,
        r#"<span class="autoscroll__label">{}</span></div>"#,
        escape(&row.trailing),
    );
}
