//! The split grid: two pane bodies over one set of models.
//!
//! The grid owns the DOM backend, the models and both panes. Every mutating
//! call changes a model, which queues notifications; the grid then drains the
//! queue and delivers each notification to the panes in subscription order
//! (LEFT before RIGHT).

use std::ops::Range;

use crate::body::{PaneBody, TableEvent};
use crate::config::{GeometryConfig, GridOptions};
use crate::dom::DomBackend;
use crate::error::Result;
use crate::event::{Emitter, GridEvent, Subscriber, Subscriptions};
use crate::layout::Models;
use crate::render::Collaborators;
use crate::types::{RowData, Selection, Side};

/// Root elements for the two panes.
#[derive(Debug, Clone, PartialEq)]
pub struct PaneRoots<H> {
    pub left: H,
    pub right: H,
}

/// Split grid body bound to a DOM backend.
pub struct Grid<B: DomBackend> {
    dom: B,
    models: Models,
    emitter: Emitter,
    subscriptions: Subscriptions,
    left: PaneBody<B>,
    right: PaneBody<B>,
    /// Publish every row as the visible window after data changes.
    auto_window: bool,
}

impl<B: DomBackend> Grid<B> {
    pub fn new(
        dom: B,
        roots: PaneRoots<B::Handle>,
        options: GridOptions,
        geometry: GeometryConfig,
    ) -> Self {
        Self::with_collaborators(dom, roots, options, geometry, Collaborators::default())
    }

    pub fn with_collaborators(
        dom: B,
        roots: PaneRoots<B::Handle>,
        options: GridOptions,
        geometry: GeometryConfig,
        collaborators: Collaborators<B>,
    ) -> Self {
        let emitter = Emitter::new();
        let models = Models::new(geometry, &emitter);
        let left = PaneBody::new(Side::Left, roots.left, options, collaborators.clone());
        let right = PaneBody::new(Side::Right, roots.right, options, collaborators);

        let mut subscriptions = Subscriptions::new();
        left.subscribe(&mut subscriptions);
        right.subscribe(&mut subscriptions);

        Self {
            dom,
            models,
            emitter,
            subscriptions,
            left,
            right,
            auto_window: true,
        }
    }

    /// Render both panes from the current model state.
    pub fn render(&mut self) -> Result<()> {
        // Anything queued before the first render is already reflected.
        self.emitter.drain();
        self.left.render(&mut self.dom, &self.models)?;
        self.right.render(&mut self.dom, &self.models)?;
        self.sync_scroll_gutter()
    }

    /// Give LEFT the same scrollable height as RIGHT, whose horizontal
    /// scrollbar eats into its viewport.
    fn sync_scroll_gutter(&mut self) -> Result<()> {
        let gutter = self.dom.horizontal_scrollbar_height(self.right.root());
        self.left.set_scroll_gutter(&mut self.dom, &self.models, gutter)
    }

    /// React to a native scroll event on `side`'s root element.
    pub fn handle_native_scroll(&mut self, side: Side) -> Result<()> {
        let update = self.pane(side).read_scroll(&self.dom);
        self.models.render.apply_scroll(update);
        self.pump()
    }

    pub fn set_column_width(&mut self, name: &str, width: u32) -> Result<bool> {
        let changed = self.models.geometry.set_column_width(name, width);
        self.pump()?;
        Ok(changed)
    }

    /// Replace the widths of the visible columns, in order.
    pub fn set_column_widths(&mut self, widths: &[u32]) -> Result<()> {
        self.models.geometry.set_column_widths(widths);
        self.pump()
    }

    pub fn set_column_hidden(&mut self, name: &str, hidden: bool) -> Result<bool> {
        let changed = self.models.geometry.set_column_hidden(name, hidden);
        self.pump()?;
        Ok(changed)
    }

    pub fn set_frozen_count(&mut self, frozen_count: usize) -> Result<()> {
        self.models.geometry.set_frozen_count(frozen_count);
        self.pump()
    }

    pub fn set_body_height(&mut self, height: f64) -> Result<()> {
        self.models.geometry.set_body_height(height);
        self.pump()
    }

    pub fn add_rows(&mut self, rows: Vec<RowData>) -> Result<()> {
        self.models.data.add(rows);
        self.after_data_change()
    }

    pub fn remove_row(&mut self, key: &str) -> Result<Option<RowData>> {
        let removed = self.models.data.remove(key);
        if removed.is_some() {
            self.after_data_change()?;
        }
        Ok(removed)
    }

    pub fn reset_rows(&mut self, rows: Vec<RowData>) -> Result<()> {
        self.models.data.reset(rows);
        self.after_data_change()
    }

    fn after_data_change(&mut self) -> Result<()> {
        self.models.geometry.set_row_count(self.models.data.len());
        if self.auto_window {
            let rows = self.models.data.rows().to_vec();
            self.models.render.set_window(0, 0.0, rows);
        }
        self.pump()
    }

    /// Publish an explicit row window.
    ///
    /// From here on data changes no longer replace the window automatically.
    pub fn set_window(&mut self, start: usize, top: f64, rows: Vec<RowData>) -> Result<()> {
        self.auto_window = false;
        self.models.render.set_window(start, top, rows);
        self.pump()
    }

    /// Show the rows in `range` of the data set, positioned at their offset.
    pub fn show_rows(&mut self, range: Range<usize>) -> Result<()> {
        let len = self.models.data.len();
        let start = range.start.min(len);
        let end = range.end.clamp(start, len);
        let rows = self
            .models
            .data
            .rows()
            .get(start..end)
            .map(<[RowData]>::to_vec)
            .unwrap_or_default();
        let top = start as f64 * f64::from(self.models.geometry.row_height());
        self.set_window(start, top, rows)
    }

    pub fn select(&mut self, selection: Option<Selection>) -> Result<()> {
        self.models.render.set_selection(selection);
        self.pump()
    }

    /// Register delegated table handlers on both panes.
    pub fn attach_table_event(&mut self, base: &str, events: &[TableEvent<B::Handle>]) -> Result<()> {
        self.left.attach_table_event(base, events)?;
        self.right.attach_table_event(base, events)
    }

    /// Run the delegated handlers for a native event on `side`.
    ///
    /// Returns the number of handlers invoked.
    pub fn dispatch_dom_event(&self, side: Side, event_type: &str, target: &B::Handle) -> Result<usize> {
        let matches = self.pane(side).resolve_delegates(&self.dom, event_type, target)?;
        for m in &matches {
            m.invoke();
        }
        Ok(matches.len())
    }

    pub fn dom(&self) -> &B {
        &self.dom
    }

    /// Direct access to the backend, e.g. to simulate user scrolling.
    pub fn dom_mut(&mut self) -> &mut B {
        &mut self.dom
    }

    pub fn models(&self) -> &Models {
        &self.models
    }

    pub fn subscriptions(&self) -> &Subscriptions {
        &self.subscriptions
    }

    pub fn pane(&self, side: Side) -> &PaneBody<B> {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    fn parts(&mut self, side: Side) -> (&mut PaneBody<B>, &mut B, &Models) {
        let pane = match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        };
        (pane, &mut self.dom, &self.models)
    }

    /// Deliver queued notifications until the queue is empty.
    ///
    /// Delivery continues past a failing subscriber; the first error is
    /// returned once the queue is drained.
    fn pump(&mut self) -> Result<()> {
        let mut first_error = None;
        while let Some(event) = self.emitter.pop() {
            let subscribers: Vec<Subscriber> =
                self.subscriptions.subscribers(event.kind()).collect();
            for subscriber in subscribers {
                if let Err(e) = self.deliver(subscriber, &event) {
                    tracing::warn!(?subscriber, ?event, error = %e, "event delivery failed");
                    first_error.get_or_insert(e);
                }
            }
        }
        if let Err(e) = self.sync_scroll_gutter() {
            first_error.get_or_insert(e);
        }
        first_error.map_or(Ok(()), Err)
    }

    fn deliver(&mut self, subscriber: Subscriber, event: &GridEvent) -> Result<()> {
        match subscriber {
            Subscriber::Body(side) => {
                let (pane, dom, models) = self.parts(side);
                pane.handle_event(dom, models, event)
            }
            Subscriber::Rows(side) => {
                let (pane, dom, models) = self.parts(side);
                pane.on_window_changed(dom, models)
            }
            Subscriber::Layer(side) => {
                let (pane, dom, models) = self.parts(side);
                pane.refresh_layer(dom, models)
            }
        }
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
    use crate::dom::MemoryDom;
    use crate::event::EventKind;
    use crate::types::ColumnSpec;

    fn grid() -> Grid<MemoryDom> {
        let mut dom = MemoryDom::new();
        let left = dom.create_element("div").unwrap();
        let right = dom.create_element("div").unwrap();
        Grid::new(
            dom,
            PaneRoots { left, right },
            GridOptions::default(),
            GeometryConfig::new(vec![ColumnSpec::new("a", 40), ColumnSpec::new("b", 60)], 1),
        )
    }

    #[test]
    fn test_left_subscribes_before_right() {
        let grid = grid();
        let order: Vec<_> = grid
            .subscriptions()
            .subscribers(EventKind::ScrollTopChanged)
            .collect();
        assert_eq!(
            order,
            vec![Subscriber::Body(Side::Left), Subscriber::Body(Side::Right)]
        );
        assert_eq!(grid.subscriptions().len(), 14);
    }

    #[test]
    fn test_show_rows_clamps_range() {
        let mut grid = grid();
        grid.render().unwrap();
        grid.reset_rows((0..5).map(|i| RowData::new(i.to_string())).collect())
            .unwrap();
        grid.show_rows(3..50).unwrap();
        let render = &grid.models().render;
        assert_eq!(render.window_start(), 3);
        assert_eq!(render.collection(Side::Right).len(), 2);
        assert_eq!(render.virtual_window_top(), 81.0);
    }

    #[test]
    fn test_remove_missing_row_is_silent() {
        let mut grid = grid();
        grid.render().unwrap();
        assert!(grid.remove_row("nope").unwrap().is_none());
    }
}
