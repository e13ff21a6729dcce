//! `GridView`: the JavaScript entry point.
//!
//! Wraps a [`Grid`] over the live DOM and wires the native listeners:
//! - `scroll` on both pane roots feeds scroll sync
//! - delegated table events are bound once per event type on the stable
//!   roots and resolved against the current table on every dispatch

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::{Rc, Weak};

use js_sys::Function;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Element, Event};

use crate::body::TableEvent;
use crate::config::{EngineCapabilities, GeometryConfig, GridOptions};
use crate::dom::WebDom;
use crate::error::GridError;
use crate::grid::{Grid, PaneRoots};
use crate::types::{RowData, Selection, Side};

type SharedGrid = Rc<RefCell<Grid<WebDom>>>;

/// Report a failure raised inside a native listener, where there is no caller
/// to return it to. Goes to the console since no subscriber may be installed.
fn report_listener_error(side: Side, context: &str, error: &GridError) {
    tracing::warn!(%side, error = %error, "{context}");
    web_sys::console::error_1(&JsValue::from_str(&format!("splitgrid: {context} ({side}): {error}")));
}

struct Listener {
    target: Element,
    event_type: String,
    closure: Closure<dyn FnMut(Event)>,
}

/// Split grid body mounted on two existing root elements.
#[wasm_bindgen]
pub struct GridView {
    grid: SharedGrid,
    roots: PaneRoots<Element>,
    listeners: Vec<Listener>,
    delegated: HashSet<String>,
}

#[wasm_bindgen]
impl GridView {
    /// Create a grid over `left` and `right`.
    ///
    /// `options` may be `undefined`. Engine capabilities are always probed
    /// from the current document.
    #[wasm_bindgen(constructor)]
    pub fn new(
        left: Element,
        right: Element,
        options: JsValue,
        geometry: JsValue,
    ) -> Result<GridView, JsValue> {
        console_error_panic_hook::set_once();

        let mut options: GridOptions = if options.is_undefined() || options.is_null() {
            GridOptions::default()
        } else {
            serde_wasm_bindgen::from_value(options)?
        };
        options.engine = EngineCapabilities::detect();
        let geometry: GeometryConfig = serde_wasm_bindgen::from_value(geometry)?;

        let roots = PaneRoots { left, right };
        let grid = Grid::new(WebDom::new()?, roots.clone(), options, geometry);
        let mut view = GridView {
            grid: Rc::new(RefCell::new(grid)),
            roots,
            listeners: Vec::new(),
            delegated: HashSet::new(),
        };
        for side in Side::ALL {
            view.listen_scroll(side)?;
        }
        Ok(view)
    }

    pub fn render(&self) -> Result<(), JsValue> {
        self.grid.borrow_mut().render().map_err(JsValue::from)
    }

    /// Replace every row. `rows` is an array of `{ key, values }`.
    pub fn load(&self, rows: JsValue) -> Result<(), JsValue> {
        let rows: Vec<RowData> = serde_wasm_bindgen::from_value(rows)?;
        self.grid.borrow_mut().reset_rows(rows).map_err(JsValue::from)
    }

    pub fn add_rows(&self, rows: JsValue) -> Result<(), JsValue> {
        let rows: Vec<RowData> = serde_wasm_bindgen::from_value(rows)?;
        self.grid.borrow_mut().add_rows(rows).map_err(JsValue::from)
    }

    pub fn remove_row(&self, key: &str) -> Result<bool, JsValue> {
        let removed = self.grid.borrow_mut().remove_row(key)?;
        Ok(removed.is_some())
    }

    pub fn show_rows(&self, start: usize, end: usize) -> Result<(), JsValue> {
        self.grid.borrow_mut().show_rows(start..end).map_err(JsValue::from)
    }

    pub fn set_column_width(&self, name: &str, width: u32) -> Result<bool, JsValue> {
        self.grid
            .borrow_mut()
            .set_column_width(name, width)
            .map_err(JsValue::from)
    }

    pub fn set_column_hidden(&self, name: &str, hidden: bool) -> Result<bool, JsValue> {
        self.grid
            .borrow_mut()
            .set_column_hidden(name, hidden)
            .map_err(JsValue::from)
    }

    pub fn set_frozen_count(&self, frozen_count: usize) -> Result<(), JsValue> {
        self.grid
            .borrow_mut()
            .set_frozen_count(frozen_count)
            .map_err(JsValue::from)
    }

    pub fn set_body_height(&self, height: f64) -> Result<(), JsValue> {
        self.grid
            .borrow_mut()
            .set_body_height(height)
            .map_err(JsValue::from)
    }

    /// Set or clear (`null`) the selection.
    pub fn select(&self, selection: JsValue) -> Result<(), JsValue> {
        let selection: Option<Selection> = serde_wasm_bindgen::from_value(selection)?;
        self.grid.borrow_mut().select(selection).map_err(JsValue::from)
    }

    /// Bind `callback(matchedElement, side)` to `event_type` on rows
    /// matching `selector`, in both panes.
    pub fn on(&mut self, event_type: &str, selector: &str, callback: Function) -> Result<(), JsValue> {
        let handler = TableEvent::new(selector, move |event| {
            let side = JsValue::from_str(event.side.as_str());
            if let Err(e) = callback.call2(&JsValue::NULL, &event.matched, &side) {
                web_sys::console::error_1(&e);
            }
        });
        self.grid
            .borrow_mut()
            .attach_table_event(event_type, &[handler])?;

        if self.delegated.insert(event_type.to_string()) {
            for side in Side::ALL {
                self.listen_delegated(side, event_type)?;
            }
        }
        Ok(())
    }
}

impl GridView {
    fn root(&self, side: Side) -> &Element {
        match side {
            Side::Left => &self.roots.left,
            Side::Right => &self.roots.right,
        }
    }

    fn listen(&mut self, side: Side, event_type: &str, closure: Closure<dyn FnMut(Event)>) -> Result<(), JsValue> {
        let target = self.root(side).clone();
        target.add_event_listener_with_callback(event_type, closure.as_ref().unchecked_ref())?;
        self.listeners.push(Listener {
            target,
            event_type: event_type.to_string(),
            closure,
        });
        Ok(())
    }

    fn listen_scroll(&mut self, side: Side) -> Result<(), JsValue> {
        let grid: Weak<RefCell<Grid<WebDom>>> = Rc::downgrade(&self.grid);
        let closure = Closure::wrap(Box::new(move |_event: Event| {
            let Some(grid) = grid.upgrade() else {
                return;
            };
            // Busy means the scroll was caused by our own write.
            let Ok(mut grid) = grid.try_borrow_mut() else {
                return;
            };
            if let Err(e) = grid.handle_native_scroll(side) {
                report_listener_error(side, "scroll sync failed", &e);
            }
        }) as Box<dyn FnMut(Event)>);
        self.listen(side, "scroll", closure)
    }

    fn listen_delegated(&mut self, side: Side, event_type: &str) -> Result<(), JsValue> {
        let grid: Weak<RefCell<Grid<WebDom>>> = Rc::downgrade(&self.grid);
        let name = event_type.to_string();
        let closure = Closure::wrap(Box::new(move |event: Event| {
            let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
                return;
            };
            let Some(grid) = grid.upgrade() else {
                return;
            };
            // Resolve under the borrow, invoke after it so handlers may call back in.
            let matches = match grid.try_borrow() {
                Ok(grid) => grid.pane(side).resolve_delegates(grid.dom(), &name, &target),
                Err(_) => return,
            };
            match matches {
                Ok(matches) => {
                    for m in &matches {
                        m.invoke();
                    }
                }
                Err(e) => report_listener_error(side, "delegated event failed", &e),
            }
        }) as Box<dyn FnMut(Event)>);
        self.listen(side, event_type, closure)
    }
}

impl Drop for GridView {
    fn drop(&mut self) {
        for listener in self.listeners.drain(..) {
            listener
                .target
                .remove_event_listener_with_callback(
                    &listener.event_type,
                    listener.closure.as_ref().unchecked_ref(),
                )
                .ok();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_listener_errors_reach_console_without_subscriber() {
        // No tracing subscriber is installed here; the console write must not
        // depend on one.
        report_listener_error(
            Side::Right,
            "scroll sync failed",
            &GridError::NotRendered("pane containers"),
        );
    }
}
