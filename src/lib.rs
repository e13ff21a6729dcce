//! splitgrid - split-pane grid body for the web
//!
//! Renders a grid body as two synchronized panes:
//! - LEFT holds the frozen columns, RIGHT the scrollable rest
//! - vertical scroll is locked across both panes, horizontal scroll is RIGHT only
//! - column widths, body height and content height follow the shared models
//! - rows are redrawn by regenerating table markup from one geometry snapshot
//! - row events are delegated, so redraws never need rebinding
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { GridView } from 'splitgrid';
//! await init();
//! const view = new GridView(leftEl, rightEl, { scrollX: true }, {
//!   columns: [{ name: 'id', width: 60 }, { name: 'name', width: 200 }],
//!   frozenCount: 1,
//! });
//! view.render();
//! view.load([{ key: '1', values: { id: 1, name: 'Ann' } }]);
//! view.on('click', 'tr', (row, side) => console.log(row.getAttribute('key'), side));
//! ```

pub mod body;
pub mod config;
pub mod dom;
pub mod error;
pub mod event;
pub mod grid;
pub mod layout;
pub mod markup;
pub mod render;
pub mod snapshot;
pub mod types;
#[cfg(target_arch = "wasm32")]
pub mod viewer;

use wasm_bindgen::prelude::*;

pub use body::{DelegatedEvent, PaneBody, TableEvent};
pub use config::{EngineCapabilities, GeometryConfig, GridDocument, GridOptions};
pub use dom::{DomBackend, MemoryDom};
pub use error::{GridError, Result};
pub use grid::{Grid, PaneRoots};
pub use snapshot::{render_document, PaneMarkup};
pub use types::*;
#[cfg(target_arch = "wasm32")]
pub use viewer::GridView;

/// Render a JSON grid document to static pane markup.
///
/// Returns `{ left, right }` with the content of each pane root.
///
/// # Errors
/// Returns an error if the document is invalid or cannot be rendered.
#[wasm_bindgen]
pub fn render_markup(json: &str) -> std::result::Result<JsValue, JsValue> {
    let document = GridDocument::from_json(json)?;
    let markup = render_document(&document)?;
    serde_wasm_bindgen::to_value(&markup)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
}

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
