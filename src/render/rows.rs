//! Row markup and the per-pane row list.

use std::rc::Rc;

use crate::body::PaneBody;
use crate::config::CELL_BORDER_WIDTH;
use crate::dom::DomBackend;
use crate::error::Result;
use crate::layout::{GeometryModel, Models, RowCollection};
use crate::markup::{escape_attr, escape_text, CLASS_CELL, CLASS_NO_ROW};
use crate::types::Side;

/// Produces the inner markup of a pane's `<tbody>`.
pub trait RowRenderer {
    fn render_rows(&self, rows: RowCollection<'_>, geometry: &GeometryModel) -> String;
}

/// Plain text cells, one `<tr>` per row.
#[derive(Debug, Clone)]
pub struct TableRowRenderer {
    /// Text shown in the RIGHT pane when there are no rows.
    pub empty_message: String,
}

impl Default for TableRowRenderer {
    fn default() -> Self {
        Self {
            empty_message: "No data.".to_string(),
        }
    }
}

impl RowRenderer for TableRowRenderer {
    fn render_rows(&self, rows: RowCollection<'_>, geometry: &GeometryModel) -> String {
        let columns = geometry.visible_columns(rows.side);
        if columns.is_empty() {
            return String::new();
        }
        if rows.is_empty() {
            return match rows.side {
                Side::Left => String::new(),
                Side::Right => format!(
                    r#"<tr><td class="{CLASS_NO_ROW}" colspan="{}">{}</td></tr>"#,
                    columns.len(),
                    escape_text(&self.empty_message)
                ),
            };
        }

        let height = geometry.row_height().saturating_sub(CELL_BORDER_WIDTH);
        let mut out = String::with_capacity(rows.len() * columns.len() * 48);
        for row in rows.rows {
            out.push_str(&format!(
                r#"<tr key="{}" style="height:{height}px">"#,
                escape_attr(&row.key)
            ));
            for column in &columns {
                out.push_str(&format!(
                    r#"<td columnname="{}" class="{CLASS_CELL}">{}</td>"#,
                    escape_attr(&column.name),
                    escape_text(&row.text(&column.name))
                ));
            }
            out.push_str("</tr>");
        }
        out
    }
}

/// Row renderer bound to one pane's collection and tbody.
pub struct RowList<B: DomBackend> {
    side: Side,
    renderer: Rc<dyn RowRenderer>,
    tbody: B::Handle,
    rendered: usize,
}

impl<B: DomBackend> RowList<B> {
    pub fn new(side: Side, renderer: Rc<dyn RowRenderer>, tbody: B::Handle) -> Self {
        Self {
            side,
            renderer,
            tbody,
            rendered: 0,
        }
    }

    /// Render the pane's current collection through the body's redraw path.
    ///
    /// The tbody is recreated by the redraw, so the new handle replaces the
    /// old one.
    pub fn render(
        &mut self,
        body: &mut PaneBody<B>,
        dom: &mut B,
        models: &Models,
    ) -> Result<&B::Handle> {
        let collection = models.render.collection(self.side);
        let markup = self.renderer.render_rows(collection, &models.geometry);
        self.tbody = body.redraw_table(dom, &models.geometry, &markup)?;
        self.rendered = collection.len();
        Ok(&self.tbody)
    }

    /// Rebind after the table was regenerated elsewhere.
    pub fn bind(&mut self, tbody: B::Handle) {
        self.tbody = tbody;
    }

    pub fn tbody(&self) -> &B::Handle {
        &self.tbody
    }

    pub fn side(&self) -> Side {
        self.side
    }

    /// Number of rows written by the last render.
    pub fn rendered_rows(&self) -> usize {
        self.rendered
    }
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
    use crate::config::GeometryConfig;
    use crate::event::Emitter;
    use crate::types::{ColumnSpec, RowData};

    fn geometry() -> GeometryModel {
        let mut config = GeometryConfig::new(
            vec![
                ColumnSpec::new("id", 40),
                ColumnSpec::new("name", 100),
                ColumnSpec::new("note", 100),
            ],
            1,
        );
        config.row_height = 21;
        GeometryModel::new(config, Emitter::new())
    }

    #[test]
    fn test_rows_use_side_columns() {
        let rows = vec![RowData::new("r1")
            .with("id", 1)
            .with("name", "Ann")
            .with("note", "<b>")];
        let renderer = TableRowRenderer::default();
        let left = renderer.render_rows(
            RowCollection {
                side: Side::Left,
                rows: &rows,
            },
            &geometry(),
        );
        assert_eq!(
            left,
            r#"<tr key="r1" style="height:20px"><td columnname="id" class="grid-cell">1</td></tr>"#
        );
        let right = renderer.render_rows(
            RowCollection {
                side: Side::Right,
                rows: &rows,
            },
            &geometry(),
        );
        assert!(right.contains(r#"<td columnname="name" class="grid-cell">Ann</td>"#));
        assert!(right.contains(r#"<td columnname="note" class="grid-cell">&lt;b&gt;</td>"#));
    }

    #[test]
    fn test_empty_collection_placeholder_on_right_only() {
        let renderer = TableRowRenderer::default();
        let right = renderer.render_rows(
            RowCollection {
                side: Side::Right,
                rows: &[],
            },
            &geometry(),
        );
        assert_eq!(
            right,
            r#"<tr><td class="grid-no-row" colspan="2">No data.</td></tr>"#
        );
        let left = renderer.render_rows(
            RowCollection {
                side: Side::Left,
                rows: &[],
            },
            &geometry(),
        );
        assert!(left.is_empty());
    }
}
