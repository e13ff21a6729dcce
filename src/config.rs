//! Grid configuration.
//!
//! Options are read once when the grid is built. Engine capabilities are
//! detected at startup and injected here instead of being sniffed by each pane.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::{ColumnSpec, RowData, ScrollUpdate};

/// Horizontal cell padding (each side) in pixels.
pub const CELL_PADDING: u32 = 5;

/// Width of the border drawn between cells in pixels.
pub const CELL_BORDER_WIDTH: u32 = 1;

/// Default row height in pixels, border included.
pub const DEFAULT_ROW_HEIGHT: u32 = 27;

/// Default body (viewport) height in pixels.
pub const DEFAULT_BODY_HEIGHT: f64 = 300.0;

/// Rendering-engine capabilities that change how a pane writes to the DOM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineCapabilities {
    /// The engine sizes `<col>` markers including cell padding, so widths
    /// must be reduced by the padding to line up with the header.
    pub box_sizing_quirk: bool,
    /// The engine allows replacing the content of table sections in place.
    /// When false, redraw regenerates the whole `<table>`.
    pub in_place_table_mutation: bool,
}

impl EngineCapabilities {
    /// Pixel compensation subtracted from every column width.
    pub fn extra_width(&self) -> u32 {
        if self.box_sizing_quirk {
            CELL_PADDING * 2
        } else {
            0
        }
    }

    /// Probe the host document once at startup.
    #[cfg(target_arch = "wasm32")]
    pub fn detect() -> Self {
        crate::dom::web::detect_capabilities()
    }

    /// Outside the browser there is nothing to probe.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn detect() -> Self {
        Self::default()
    }
}

/// Global options shared by both panes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GridOptions {
    /// Horizontal scrolling enabled.
    pub scroll_x: bool,
    /// Vertical scrolling enabled.
    pub scroll_y: bool,
    pub engine: EngineCapabilities,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            scroll_x: true,
            scroll_y: true,
            engine: EngineCapabilities::default(),
        }
    }
}

impl GridOptions {
    /// Parse options from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Pixel compensation subtracted from every column width.
    pub fn extra_width(&self) -> u32 {
        self.engine.extra_width()
    }
}

/// Initial geometry: columns, frozen split and row/body sizes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeometryConfig {
    pub columns: Vec<ColumnSpec>,
    /// Number of leading visible columns rendered in the LEFT pane.
    #[serde(default)]
    pub frozen_count: usize,
    #[serde(default = "default_row_height")]
    pub row_height: u32,
    #[serde(default = "default_body_height")]
    pub body_height: f64,
}

fn default_row_height() -> u32 {
    DEFAULT_ROW_HEIGHT
}

fn default_body_height() -> f64 {
    DEFAULT_BODY_HEIGHT
}

impl GeometryConfig {
    pub fn new(columns: Vec<ColumnSpec>, frozen_count: usize) -> Self {
        Self {
            columns,
            frozen_count,
            row_height: DEFAULT_ROW_HEIGHT,
            body_height: DEFAULT_BODY_HEIGHT,
        }
    }
}

/// A complete grid description as loaded by the CLI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridDocument {
    #[serde(default)]
    pub options: GridOptions,
    pub geometry: GeometryConfig,
    #[serde(default)]
    pub rows: Vec<RowData>,
    /// Scroll applied to the RIGHT pane after rendering.
    #[serde(default)]
    pub scroll: Option<ScrollUpdate>,
}

impl GridDocument {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
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

    #[test]
    fn test_options_defaults() {
        let options = GridOptions::from_json("{}").unwrap();
        assert!(options.scroll_x);
        assert!(options.scroll_y);
        assert_eq!(options.extra_width(), 0);
    }

    #[test]
    fn test_options_camel_case() {
        let options = GridOptions::from_json(
            r#"{"scrollX": false, "engine": {"boxSizingQuirk": true, "inPlaceTableMutation": true}}"#,
        )
        .unwrap();
        assert!(!options.scroll_x);
        assert!(options.scroll_y);
        assert_eq!(options.extra_width(), 10);
        assert!(options.engine.in_place_table_mutation);
    }

    #[test]
    fn test_options_rejects_garbage() {
        assert!(matches!(
            GridOptions::from_json("not json"),
            Err(crate::error::GridError::Config(_))
        ));
    }

    #[test]
    fn test_document_defaults() {
        let doc = GridDocument::from_json(
            r#"{"geometry": {"columns": [{"name": "a", "width": 80}]}, "rows": [{"key": "1", "values": {"a": 3}}]}"#,
        )
        .unwrap();
        assert_eq!(doc.geometry.row_height, DEFAULT_ROW_HEIGHT);
        assert_eq!(doc.geometry.body_height, DEFAULT_BODY_HEIGHT);
        assert_eq!(doc.geometry.frozen_count, 0);
        assert_eq!(doc.rows[0].text("a"), "3");
        assert!(doc.scroll.is_none());
    }
}
