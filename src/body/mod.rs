//! Pane body: one side of the split grid body.
//!
//! A pane owns its root element and everything below it:
//! - geometry sync: column markers, root height, outer height, table offset
//! - scroll sync: native scroll in, model scroll out, per-axis ownership
//! - redraw: whole-table regeneration from one geometry snapshot
//! - delegation: row-level handlers bound once to the table container
//!
//! Panes do not subscribe to models themselves. They declare their
//! subscriptions and the grid delivers events to them in order.

mod delegate;
mod geometry;
mod redraw;
mod scroll;

pub use delegate::{DelegateHandler, DelegateMatch, DelegateRegistry, DelegatedEvent, TableEvent};

use std::rc::Rc;

use crate::config::GridOptions;
use crate::dom::DomBackend;
use crate::error::{GridError, Result};
use crate::event::{EventKind, GridEvent, Subscriber, Subscriptions};
use crate::layout::Models;
use crate::markup::{self, px, CLASS_BODY_CONTAINER, CLASS_TABLE_CONTAINER};
use crate::render::{Collaborators, Layer, LayerFactory, RowList, RowRenderer};
use crate::types::Side;

/// Handles captured after a full render.
#[derive(Debug, Clone, PartialEq)]
pub struct Containers<H> {
    /// Sized to the total content height; owns the scrollable extent.
    pub outer: H,
    /// Offset by the virtual window top; holds the table.
    pub inner: H,
}

/// One pane of the grid body.
pub struct PaneBody<B: DomBackend> {
    side: Side,
    options: GridOptions,
    root: B::Handle,
    containers: Option<Containers<B::Handle>>,
    rows: Option<RowList<B>>,
    layer: Option<Box<dyn Layer<B>>>,
    row_renderer: Rc<dyn RowRenderer>,
    layer_factory: Rc<dyn LayerFactory<B>>,
    delegates: DelegateRegistry<B::Handle>,
    /// Extra scrollable height below the rows, matching the other pane's
    /// horizontal scrollbar.
    scroll_gutter: f64,
}

impl<B: DomBackend> PaneBody<B> {
    /// Model notifications the body itself reacts to.
    pub const SUBSCRIPTIONS: [EventKind; 5] = [
        EventKind::ColumnWidthChanged,
        EventKind::BodyHeightChanged,
        EventKind::DataChanged,
        EventKind::ScrollTopChanged,
        EventKind::ScrollLeftChanged,
    ];

    pub fn new(
        side: Side,
        root: B::Handle,
        options: GridOptions,
        collaborators: Collaborators<B>,
    ) -> Self {
        Self {
            side,
            options,
            root,
            containers: None,
            rows: None,
            layer: None,
            row_renderer: collaborators.rows,
            layer_factory: collaborators.layers,
            delegates: DelegateRegistry::new(),
            scroll_gutter: 0.0,
        }
    }

    /// Register this pane's listeners. Called once at construction time.
    pub fn subscribe(&self, subscriptions: &mut Subscriptions) {
        for kind in Self::SUBSCRIPTIONS {
            subscriptions.subscribe(kind, Subscriber::Body(self.side));
        }
        subscriptions.subscribe(EventKind::WindowChanged, Subscriber::Rows(self.side));
        subscriptions.subscribe(EventKind::SelectionChanged, Subscriber::Layer(self.side));
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn root(&self) -> &B::Handle {
        &self.root
    }

    /// Outer and inner containers, once rendered.
    pub fn containers(&self) -> Option<&Containers<B::Handle>> {
        self.containers.as_ref()
    }

    /// Current `<tbody>` of the row list, once rendered.
    pub fn tbody(&self) -> Option<&B::Handle> {
        self.rows.as_ref().map(RowList::tbody)
    }

    pub fn row_list(&self) -> Option<&RowList<B>> {
        self.rows.as_ref()
    }

    fn rendered(&self) -> Result<&Containers<B::Handle>> {
        self.containers
            .as_ref()
            .ok_or(GridError::NotRendered("pane containers"))
    }

    /// Build the whole pane from scratch.
    ///
    /// Previous child views are dropped and the container hierarchy is
    /// recreated; delegated table events survive because they are bound
    /// through the pane, not the elements.
    pub fn render(&mut self, dom: &mut B, models: &Models) -> Result<&mut Self> {
        self.destroy_children(dom);

        let (overflow_x, overflow_y) = self.overflow();
        dom.set_style(&self.root, "overflow-x", overflow_x)?;
        dom.set_style(&self.root, "overflow-y", overflow_y)?;
        if matches!(self.side, Side::Left) {
            dom.set_style(&self.root, "scrollbar-width", "none")?;
        }
        dom.set_style(&self.root, "height", &px(models.geometry.viewport_height()))?;

        let widths = models.geometry.column_widths(self.side);
        let skeleton = markup::skeleton(
            models.geometry.total_content_height() + self.scroll_gutter,
            models.render.virtual_window_top(),
            &widths,
            self.options.extra_width(),
        );
        dom.set_inner_html(&self.root, &skeleton)?;

        let outer = dom
            .query(&self.root, &format!(".{CLASS_BODY_CONTAINER}"))?
            .ok_or_else(|| GridError::Dom("outer container missing".into()))?;
        let inner = dom
            .query(&outer, &format!(".{CLASS_TABLE_CONTAINER}"))?
            .ok_or_else(|| GridError::Dom("table container missing".into()))?;
        let tbody = dom
            .query(&inner, "tbody")?
            .ok_or_else(|| GridError::Dom("tbody missing".into()))?;
        self.containers = Some(Containers {
            outer: outer.clone(),
            inner,
        });

        let mut rows = RowList::new(self.side, Rc::clone(&self.row_renderer), tbody);
        let rendered = rows.render(self, dom, models).map(|_| ());
        self.rows = Some(rows);
        rendered?;

        let mut layer = self.layer_factory.create_layer(self.side);
        layer.render(dom, &outer, models)?;
        self.layer = Some(layer);

        tracing::debug!(side = %self.side, columns = widths.len(), "pane rendered");
        Ok(self)
    }

    /// Root `overflow-x` and `overflow-y` for this side.
    ///
    /// RIGHT scrolls on both axes unless configuration turns an axis off.
    /// LEFT never scrolls horizontally and always scrolls vertically, with
    /// its scrollbar hidden, so it can follow RIGHT's offset.
    pub fn overflow(&self) -> (&'static str, &'static str) {
        let axis = |enabled: bool| if enabled { "auto" } else { "hidden" };
        match self.side {
            Side::Left => ("hidden", "auto"),
            Side::Right => (axis(self.options.scroll_x), axis(self.options.scroll_y)),
        }
    }

    /// Extra scrollable height currently added below the rows.
    pub fn scroll_gutter(&self) -> f64 {
        self.scroll_gutter
    }

    fn destroy_children(&mut self, dom: &mut B) {
        if let Some(mut layer) = self.layer.take() {
            layer.destroy(dom);
        }
        self.rows = None;
        self.containers = None;
    }

    /// Drop child views and empty the root element.
    pub fn destroy(&mut self, dom: &mut B) -> Result<()> {
        self.destroy_children(dom);
        dom.clear_children(&self.root)
    }

    /// Re-render the row list after the visible window changed.
    pub fn on_window_changed(&mut self, dom: &mut B, models: &Models) -> Result<()> {
        if self.containers.is_none() {
            return Ok(());
        }
        self.render_rows(dom, models)?;
        self.reset_table_position(dom, models)
    }

    /// Re-apply the selection to the overlay layer.
    pub fn refresh_layer(&mut self, dom: &mut B, models: &Models) -> Result<()> {
        match self.layer.as_mut() {
            Some(layer) => layer.refresh(dom, models),
            None => Ok(()),
        }
    }

    fn render_rows(&mut self, dom: &mut B, models: &Models) -> Result<()> {
        let Some(mut rows) = self.rows.take() else {
            return Ok(());
        };
        let rendered = rows.render(self, dom, models).map(|_| ());
        self.rows = Some(rows);
        rendered
    }

    /// Deliver one model notification to the body.
    pub fn handle_event(&mut self, dom: &mut B, models: &Models, event: &GridEvent) -> Result<()> {
        match event {
            GridEvent::ColumnWidthChanged => self.on_column_width_changed(dom, models),
            GridEvent::BodyHeightChanged(height) => self.on_body_height_changed(dom, *height),
            GridEvent::DataChanged(_) => self.on_data_changed(dom, models),
            GridEvent::ScrollTopChanged(top) => {
                self.on_scroll_top_changed(dom, *top);
                Ok(())
            }
            GridEvent::ScrollLeftChanged(left) => {
                self.on_scroll_left_changed(dom, *left);
                Ok(())
            }
            GridEvent::WindowChanged | GridEvent::SelectionChanged => Ok(()),
        }
    }
}
