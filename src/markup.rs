//! Markup generation for the pane skeleton and its table.
//!
//! Everything here is a pure function of a geometry snapshot. The full render
//! and the redraw path both build the colgroup through [`col_markers`], so a
//! redraw can never disagree with the last render about column widths.
//!
//! ```text
//! root (overflow, height = body height)
//! └── .grid-body-container   (height = total content height)
//!     ├── .grid-table-container   (top = virtual window top)
//!     │   └── table.grid-table
//!     │       ├── colgroup > col*   (width = column width - extra width)
//!     │       └── tbody
//!     └── .grid-selection-layer
//! ```

use crate::types::ColumnWidth;

pub const CLASS_BODY_CONTAINER: &str = "grid-body-container";
pub const CLASS_TABLE_CONTAINER: &str = "grid-table-container";
pub const CLASS_TABLE: &str = "grid-table";
pub const CLASS_SELECTION_LAYER: &str = "grid-selection-layer";
pub const CLASS_CELL: &str = "grid-cell";
pub const CLASS_NO_ROW: &str = "grid-no-row";

/// Format a pixel length for a style property.
pub fn px(value: f64) -> String {
    format!("{value}px")
}

/// Escape text content.
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape an attribute value for a double-quoted attribute.
pub fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// `<col>` markers for one pane, widths reduced by `extra_width`.
pub fn col_markers(widths: &[ColumnWidth], extra_width: u32) -> String {
    let mut out = String::with_capacity(widths.len() * 48);
    for column in widths {
        out.push_str(&format!(
            r#"<col columnname="{}" style="width:{}px"/>"#,
            escape_attr(&column.name),
            column.marker_width(extra_width)
        ));
    }
    out
}

/// The complete table element: colgroup plus the given tbody content.
pub fn table(col_markers: &str, tbody_inner: &str) -> String {
    format!(
        r#"<table class="{CLASS_TABLE}" width="100%" border="0" cellspacing="1" cellpadding="0"><colgroup>{col_markers}</colgroup><tbody>{tbody_inner}</tbody></table>"#
    )
}

/// Outer container, inner container and an empty table.
pub fn skeleton(
    content_height: f64,
    window_top: f64,
    widths: &[ColumnWidth],
    extra_width: u32,
) -> String {
    format!(
        r#"<div class="{CLASS_BODY_CONTAINER}" style="position:relative;height:{}"><div class="{CLASS_TABLE_CONTAINER}" style="position:absolute;top:{}">{}</div></div>"#,
        px(content_height),
        px(window_top),
        table(&col_markers(widths, extra_width), "")
    )
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;

    fn widths() -> Vec<ColumnWidth> {
        vec![
            ColumnWidth {
                name: "a".into(),
                width: 80,
            },
            ColumnWidth {
                name: "b".into(),
                width: 4,
            },
        ]
    }

    #[test]
    fn test_px() {
        assert_eq!(px(300.0), "300px");
        assert_eq!(px(12.5), "12.5px");
        assert_eq!(px(0.0), "0px");
    }

    #[test]
    fn test_col_markers_subtract_extra_width() {
        assert_eq!(
            col_markers(&widths(), 10),
            r#"<col columnname="a" style="width:70px"/><col columnname="b" style="width:0px"/>"#
        );
        assert_eq!(col_markers(&[], 10), "");
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape_text("a<b>&c\""), "a&lt;b&gt;&amp;c\"");
        assert_eq!(escape_attr("x\"y'z"), "x&quot;y&#39;z");
    }

    #[test]
    fn test_skeleton_shape() {
        let markup = skeleton(4200.0, 0.0, &widths(), 0);
        assert!(markup.starts_with(r#"<div class="grid-body-container" style="position:relative;height:4200px">"#));
        assert!(markup.contains(r#"<div class="grid-table-container" style="position:absolute;top:0px">"#));
        assert!(markup.contains("<colgroup><col"));
        assert!(markup.ends_with("<tbody></tbody></table></div></div>"));
    }
}
