//! Geometry sync: column markers, root and container heights, table offset.

use crate::dom::DomBackend;
use crate::error::Result;
use crate::layout::Models;
use crate::markup::px;

use super::scroll::differs;
use super::PaneBody;

impl<B: DomBackend> PaneBody<B> {
    /// Apply the current column widths to the rendered `<col>` markers.
    ///
    /// When the number of markers no longer matches the width list (a column
    /// was shown, hidden, or moved across the frozen split) the rows are
    /// re-rendered so the colgroup and cells come from the same snapshot.
    pub fn on_column_width_changed(&mut self, dom: &mut B, models: &Models) -> Result<()> {
        let Some(containers) = self.containers.as_ref() else {
            return Ok(());
        };
        let widths = models.geometry.column_widths(self.side);
        let markers = dom.query_all(&containers.inner, "col")?;

        if markers.len() == widths.len() {
            let extra_width = self.options.extra_width();
            for (marker, column) in markers.iter().zip(&widths) {
                let width = column.marker_width(extra_width);
                dom.set_style(marker, "width", &px(f64::from(width)))?;
            }
        } else {
            tracing::debug!(
                side = %self.side,
                rendered = markers.len(),
                expected = widths.len(),
                "column count changed, resyncing table"
            );
            self.resync_columns(dom, models)?;
        }
        self.refresh_layer(dom, models)
    }

    fn resync_columns(&mut self, dom: &mut B, models: &Models) -> Result<()> {
        if self.rows.is_some() {
            return self.render_rows(dom, models);
        }
        let containers = self.rendered()?.clone();
        let tbody_inner = match dom.query(&containers.inner, "tbody")? {
            Some(tbody) => dom.inner_html(&tbody)?,
            None => String::new(),
        };
        self.redraw_table(dom, &models.geometry, &tbody_inner)?;
        Ok(())
    }

    /// Set the root height from the body-height notification.
    pub fn on_body_height_changed(&mut self, dom: &mut B, height: f64) -> Result<()> {
        dom.set_style(&self.root, "height", &px(height))
    }

    /// Resize the outer container to the total content height.
    ///
    /// Every mutation kind is handled the same way.
    pub fn on_data_changed(&mut self, dom: &mut B, models: &Models) -> Result<()> {
        let Some(containers) = self.containers.as_ref() else {
            return Ok(());
        };
        dom.set_style(
            &containers.outer,
            "height",
            &px(models.geometry.total_content_height() + self.scroll_gutter),
        )
    }

    /// Pad the scrollable extent by `gutter` pixels below the rows.
    ///
    /// A pane without a horizontal scrollbar needs the other pane's scrollbar
    /// height here, or its maximum scrollTop falls short and mirroring clamps.
    pub fn set_scroll_gutter(&mut self, dom: &mut B, models: &Models, gutter: f64) -> Result<()> {
        let gutter = gutter.max(0.0);
        if !differs(gutter, self.scroll_gutter) {
            return Ok(());
        }
        tracing::debug!(side = %self.side, gutter, "scroll gutter changed");
        self.scroll_gutter = gutter;
        self.on_data_changed(dom, models)
    }

    /// Slide the table container to the current virtual window top.
    pub fn reset_table_position(&mut self, dom: &mut B, models: &Models) -> Result<()> {
        let containers = self.rendered()?;
        dom.set_style(
            &containers.inner,
            "top",
            &px(models.render.virtual_window_top()),
        )
    }
}
