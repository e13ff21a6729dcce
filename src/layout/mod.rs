//! Models the pane bodies read from.
//!
//! This module provides:
//! - [`GeometryModel`]: column widths per side, row and body heights
//! - [`RenderModel`]: scroll offsets, visible row window, selection
//! - [`DataModel`]: the ordered row set

mod data;
mod geometry;
mod render_model;

pub use data::DataModel;
pub use geometry::GeometryModel;
pub use render_model::{RenderModel, RowCollection};

use crate::config::GeometryConfig;
use crate::event::Emitter;

/// The three models a grid shares between its panes.
#[derive(Debug, Clone)]
pub struct Models {
    pub geometry: GeometryModel,
    pub render: RenderModel,
    pub data: DataModel,
}

impl Models {
    /// Build all models on one notification queue.
    pub fn new(geometry: GeometryConfig, emitter: &Emitter) -> Self {
        Self {
            geometry: GeometryModel::new(geometry, emitter.clone()),
            render: RenderModel::new(emitter.clone()),
            data: DataModel::new(emitter.clone()),
        }
    }
}
