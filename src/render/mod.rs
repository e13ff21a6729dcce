//! Collaborators that fill a pane: the row list and the overlay layers.
//!
//! This module provides:
//! - [`RowRenderer`]: turns a row collection into `<tbody>` markup
//! - [`RowList`]: binds a renderer to one pane's tbody and redraws it
//! - [`Layer`] / [`LayerFactory`]: overlays mounted in the outer container

pub mod rows;
pub mod selection;

pub use rows::{RowList, RowRenderer, TableRowRenderer};
pub use selection::{selection_rect, LayerRect, SelectionLayer, SelectionLayerFactory};

use std::rc::Rc;

use crate::dom::DomBackend;
use crate::error::Result;
use crate::layout::Models;
use crate::types::Side;

/// An overlay element owned by a pane.
pub trait Layer<B: DomBackend> {
    /// Create the layer element inside `parent`.
    fn render(&mut self, dom: &mut B, parent: &B::Handle, models: &Models) -> Result<()>;

    /// Re-apply model state to an already rendered layer.
    fn refresh(&mut self, dom: &mut B, models: &Models) -> Result<()>;

    /// Forget the layer element. The pane removes it from the tree.
    fn destroy(&mut self, dom: &mut B);
}

/// Builds a layer for each pane.
pub trait LayerFactory<B: DomBackend> {
    fn create_layer(&self, side: Side) -> Box<dyn Layer<B>>;
}

/// The external renderers a pane composes.
pub struct Collaborators<B: DomBackend> {
    pub rows: Rc<dyn RowRenderer>,
    pub layers: Rc<dyn LayerFactory<B>>,
}

impl<B: DomBackend> Clone for Collaborators<B> {
    fn clone(&self) -> Self {
        Self {
            rows: Rc::clone(&self.rows),
            layers: Rc::clone(&self.layers),
        }
    }
}

impl<B: DomBackend> Default for Collaborators<B> {
    fn default() -> Self {
        Self {
            rows: Rc::new(TableRowRenderer::default()),
            layers: Rc::new(SelectionLayerFactory),
        }
    }
}
