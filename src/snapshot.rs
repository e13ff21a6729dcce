//! Static rendering of a [`GridDocument`] through the in-memory DOM.

use serde::{Deserialize, Serialize};

use crate::config::GridDocument;
use crate::dom::{DomBackend, MemoryDom};
use crate::error::Result;
use crate::grid::{Grid, PaneRoots};
use crate::types::Side;

/// Content of both pane roots after rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaneMarkup {
    pub left: String,
    pub right: String,
}

impl PaneMarkup {
    /// Both panes side by side, each wrapped in its root element.
    pub fn to_html(&self) -> String {
        format!(
            r#"<div class="grid-body"><div class="{}">{}</div><div class="{}">{}</div></div>"#,
            Side::Left.as_str(),
            self.left,
            Side::Right.as_str(),
            self.right
        )
    }
}

/// Build a grid for `document` on a fresh [`MemoryDom`] and render it.
///
/// Rows are loaded after the first render and the document's scroll, if
/// any, is applied to the RIGHT pane as native input.
pub fn build(document: &GridDocument) -> Result<Grid<MemoryDom>> {
    let mut dom = MemoryDom::new();
    let left = dom.create_element("div")?;
    let right = dom.create_element("div")?;
    let mut grid = Grid::new(
        dom,
        PaneRoots { left, right },
        document.options,
        document.geometry.clone(),
    );
    grid.render()?;
    grid.reset_rows(document.rows.clone())?;

    if let Some(scroll) = document.scroll.filter(|s| !s.is_empty()) {
        let root = *grid.pane(Side::Right).root();
        if let Some(top) = scroll.scroll_top {
            grid.dom_mut().set_scroll_top(&root, top);
        }
        if let Some(left) = scroll.scroll_left {
            grid.dom_mut().set_scroll_left(&root, left);
        }
        grid.handle_native_scroll(Side::Right)?;
    }
    Ok(grid)
}

/// Render `document` and return the markup of both panes.
pub fn render_document(document: &GridDocument) -> Result<PaneMarkup> {
    let grid = build(document)?;
    let dom = grid.dom();
    Ok(PaneMarkup {
        left: dom.inner_html(grid.pane(Side::Left).root())?,
        right: dom.inner_html(grid.pane(Side::Right).root())?,
    })
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

    const DOC: &str = r#"{
        "geometry": {
            "columns": [{"name": "id", "width": 40}, {"name": "name", "width": 120}],
            "frozenCount": 1,
            "rowHeight": 20
        },
        "rows": [
            {"key": "1", "values": {"id": 1, "name": "Ann"}},
            {"key": "2", "values": {"id": 2, "name": "Bob"}}
        ],
        "scroll": {"scrollTop": 15}
    }"#;

    #[test]
    fn test_render_document_splits_columns() {
        let markup = render_document(&GridDocument::from_json(DOC).unwrap()).unwrap();
        assert!(markup.left.contains(r#"<td columnname="id" class="grid-cell">1</td>"#));
        assert!(!markup.left.contains("Ann"));
        assert!(markup.right.contains(r#"<td columnname="name" class="grid-cell">Bob</td>"#));
        assert!(markup.left.contains("height:40px"));
    }

    #[test]
    fn test_build_applies_scroll_to_both_panes() {
        let grid = build(&GridDocument::from_json(DOC).unwrap()).unwrap();
        assert_eq!(grid.models().render.scroll_top(), 15.0);
        let left_root = grid.pane(Side::Left).root();
        assert_eq!(grid.dom().scroll_top(left_root), 15.0);
    }

    #[test]
    fn test_to_html_wraps_roots() {
        let markup = PaneMarkup {
            left: "L".into(),
            right: "R".into(),
        };
        assert_eq!(
            markup.to_html(),
            r#"<div class="grid-body"><div class="lside">L</div><div class="rside">R</div></div>"#
        );
    }
}
