//! Browser tests for the `web-sys` backend.
//!
//! Run with: wasm-pack test --headless --firefox
#![cfg(target_arch = "wasm32")]
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use splitgrid::dom::WebDom;
use splitgrid::{
    ColumnSpec, DomBackend, GeometryConfig, Grid, GridOptions, PaneRoots, RowData, Side,
};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn mounted_grid() -> Grid<WebDom> {
    let document = web_sys::window().unwrap().document().unwrap();
    let body = document.body().unwrap();
    let mut dom = WebDom::new().unwrap();
    let left = dom.create_element("div").unwrap();
    let right = dom.create_element("div").unwrap();
    body.append_child(&left).unwrap();
    body.append_child(&right).unwrap();

    let mut config = GeometryConfig::new(
        vec![ColumnSpec::new("id", 40), ColumnSpec::new("name", 120)],
        1,
    );
    config.row_height = 20;
    config.body_height = 100.0;
    Grid::new(dom, PaneRoots { left, right }, GridOptions::default(), config)
}

#[wasm_bindgen_test]
fn test_render_into_live_dom() {
    let mut grid = mounted_grid();
    grid.render().unwrap();
    grid.reset_rows((0..50).map(|i| RowData::new(i.to_string()).with("id", i)).collect())
        .unwrap();

    let dom = grid.dom();
    let right = grid.pane(Side::Right).root();
    assert_eq!(dom.style(right, "height").as_deref(), Some("100px"));
    assert_eq!(dom.style(right, "overflow-y").as_deref(), Some("auto"));
    let left = grid.pane(Side::Left).root();
    assert_eq!(dom.style(left, "overflow-x").as_deref(), Some("hidden"));
    assert_eq!(dom.query_all(right, "col").unwrap().len(), 1);
    assert_eq!(dom.query_all(right, "tr").unwrap().len(), 50);

    let outer = &grid.pane(Side::Left).containers().unwrap().outer;
    assert_eq!(dom.style(outer, "height").as_deref(), Some("1000px"));
}

#[wasm_bindgen_test]
fn test_scroll_mirrors_to_left_pane() {
    let mut grid = mounted_grid();
    grid.render().unwrap();
    grid.reset_rows((0..50).map(|i| RowData::new(i.to_string())).collect())
        .unwrap();

    let right = grid.pane(Side::Right).root().clone();
    grid.dom_mut().set_scroll_top(&right, 60.0);
    grid.handle_native_scroll(Side::Right).unwrap();

    let left = grid.pane(Side::Left).root();
    assert_eq!(grid.dom().scroll_top(left), 60.0);
}
