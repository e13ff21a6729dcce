//! Shared builders and DOM readers for the integration tests.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use splitgrid::dom::{MemoryDom, NodeId};
use splitgrid::{ColumnSpec, DomBackend, GeometryConfig, Grid, GridOptions, PaneRoots, RowData, Side};

/// Row height used by every fixture grid.
pub const ROW_HEIGHT: u32 = 20;

/// `id` is frozen; `name`, `city` and `note` scroll.
pub fn columns() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::new("id", 40),
        ColumnSpec::new("name", 120),
        ColumnSpec::new("city", 100),
        ColumnSpec::new("note", 80),
    ]
}

pub fn geometry() -> GeometryConfig {
    let mut config = GeometryConfig::new(columns(), 1);
    config.row_height = ROW_HEIGHT;
    config
}

/// `n` rows keyed `r0..r{n-1}` with a value in every column.
pub fn rows(n: usize) -> Vec<RowData> {
    (0..n)
        .map(|i| {
            RowData::new(format!("r{i}"))
                .with("id", i)
                .with("name", format!("name {i}"))
                .with("city", format!("city {i}"))
                .with("note", format!("note {i}"))
        })
        .collect()
}

pub fn grid_with(options: GridOptions, geometry: GeometryConfig) -> Grid<MemoryDom> {
    let mut dom = MemoryDom::new();
    let left = dom.create_element("div").unwrap();
    let right = dom.create_element("div").unwrap();
    Grid::new(dom, PaneRoots { left, right }, options, geometry)
}

/// Rendered fixture grid holding `n` rows.
pub fn rendered(n: usize) -> Grid<MemoryDom> {
    rendered_with(GridOptions::default(), n)
}

pub fn rendered_with(options: GridOptions, n: usize) -> Grid<MemoryDom> {
    let mut grid = grid_with(options, geometry());
    grid.render().unwrap();
    grid.reset_rows(rows(n)).unwrap();
    grid
}

pub fn root(grid: &Grid<MemoryDom>, side: Side) -> NodeId {
    *grid.pane(side).root()
}

pub fn outer(grid: &Grid<MemoryDom>, side: Side) -> NodeId {
    grid.pane(side).containers().unwrap().outer
}

pub fn inner(grid: &Grid<MemoryDom>, side: Side) -> NodeId {
    grid.pane(side).containers().unwrap().inner
}

pub fn style(grid: &Grid<MemoryDom>, el: NodeId, property: &str) -> Option<String> {
    grid.dom().style(&el, property)
}

/// Width style of every `<col>` marker in `side`'s table.
pub fn marker_widths(grid: &Grid<MemoryDom>, side: Side) -> Vec<String> {
    let dom = grid.dom();
    dom.query_all(&inner(grid, side), "col")
        .unwrap()
        .iter()
        .map(|col| dom.style(col, "width").unwrap_or_default())
        .collect()
}

/// Value of `columnname` on every `<col>` marker in `side`'s table.
pub fn marker_names(grid: &Grid<MemoryDom>, side: Side) -> Vec<String> {
    let dom = grid.dom();
    dom.query_all(&inner(grid, side), "col")
        .unwrap()
        .iter()
        .map(|col| dom.attribute(col, "columnname").unwrap_or_default())
        .collect()
}

/// `key` of every rendered row in `side`'s table.
pub fn row_keys(grid: &Grid<MemoryDom>, side: Side) -> Vec<String> {
    let dom = grid.dom();
    dom.query_all(&inner(grid, side), "tr[key]")
        .unwrap()
        .iter()
        .map(|tr| dom.attribute(tr, "key").unwrap_or_default())
        .collect()
}

/// Cells in the first rendered row of `side`.
pub fn first_row_cells(grid: &Grid<MemoryDom>, side: Side) -> Vec<String> {
    let dom = grid.dom();
    let Some(tr) = dom.query(&inner(grid, side), "tr").unwrap() else {
        return Vec::new();
    };
    dom.query_all(&tr, "td")
        .unwrap()
        .iter()
        .map(|td| dom.text_content(*td))
        .collect()
}

/// Simulate the user scrolling `side` and the browser firing `scroll`.
pub fn scroll_native(grid: &mut Grid<MemoryDom>, side: Side, top: f64, left: f64) {
    let el = root(grid, side);
    grid.dom_mut().set_scroll_top(&el, top);
    grid.dom_mut().set_scroll_left(&el, left);
    grid.handle_native_scroll(side).unwrap();
}
