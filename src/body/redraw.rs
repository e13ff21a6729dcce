//! Partial update path: replace row markup without rebuilding the containers.

use crate::dom::DomBackend;
use crate::error::{GridError, Result};
use crate::layout::GeometryModel;
use crate::markup;

use super::PaneBody;

impl<B: DomBackend> PaneBody<B> {
    /// Replace the table's rows with `tbody_inner` and return the new `<tbody>`.
    ///
    /// The colgroup is regenerated from the geometry passed in, never reused
    /// from an earlier render, so colgroup and rows always share one width
    /// snapshot. Engines that cannot mutate table sections in place get the
    /// whole `<table>` regenerated in a single content replacement.
    pub fn redraw_table(
        &mut self,
        dom: &mut B,
        geometry: &GeometryModel,
        tbody_inner: &str,
    ) -> Result<B::Handle> {
        let inner = self.rendered()?.inner.clone();
        let widths = geometry.column_widths(self.side);
        let col_markers = markup::col_markers(&widths, self.options.extra_width());

        if self.options.engine.in_place_table_mutation {
            let colgroup = dom.query(&inner, "colgroup")?;
            let tbody = dom.query(&inner, "tbody")?;
            if let (Some(colgroup), Some(tbody)) = (colgroup, tbody) {
                dom.set_inner_html(&colgroup, &col_markers)?;
                dom.set_inner_html(&tbody, tbody_inner)?;
                tracing::trace!(side = %self.side, "table patched in place");
                return Ok(tbody);
            }
        }

        dom.set_inner_html(&inner, &markup::table(&col_markers, tbody_inner))?;
        tracing::trace!(side = %self.side, columns = widths.len(), "table regenerated");
        let tbody = dom
            .query(&inner, "tbody")?
            .ok_or_else(|| GridError::Dom("redraw produced no tbody".into()))?;
        if let Some(rows) = self.rows.as_mut() {
            rows.bind(tbody.clone());
        }
        Ok(tbody)
    }
}
