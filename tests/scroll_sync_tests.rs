//! Scroll sync: the vertical offset is locked across panes and the
//! horizontal offset belongs to the RIGHT pane only.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use common::*;
use splitgrid::dom::MemoryDom;
use splitgrid::{DomBackend, Grid, RowData, Side};

fn offsets(grid: &Grid<MemoryDom>, side: Side) -> (f64, f64) {
    let el = root(grid, side);
    (grid.dom().scroll_top(&el), grid.dom().scroll_left(&el))
}

#[test]
fn test_right_scroll_drives_model_and_left_top() {
    let mut grid = rendered(50);
    scroll_native(&mut grid, Side::Right, 120.0, 40.0);

    let render = &grid.models().render;
    assert_eq!(render.scroll_top(), 120.0);
    assert_eq!(render.scroll_left(), 40.0);

    assert_eq!(offsets(&grid, Side::Left), (120.0, 0.0));
    assert_eq!(offsets(&grid, Side::Right), (120.0, 40.0));
}

#[test]
fn test_left_scroll_never_touches_horizontal_offset() {
    let mut grid = rendered(50);
    scroll_native(&mut grid, Side::Right, 0.0, 40.0);

    // The LEFT root reports a stray horizontal offset; it must be ignored.
    scroll_native(&mut grid, Side::Left, 75.0, 30.0);

    let render = &grid.models().render;
    assert_eq!(render.scroll_top(), 75.0);
    assert_eq!(render.scroll_left(), 40.0);
    assert_eq!(offsets(&grid, Side::Right), (75.0, 40.0));
}

#[test]
fn test_left_root_keeps_its_own_horizontal_offset() {
    let mut grid = rendered(50);
    scroll_native(&mut grid, Side::Right, 10.0, 90.0);
    scroll_native(&mut grid, Side::Right, 20.0, 120.0);
    assert_eq!(offsets(&grid, Side::Left), (20.0, 0.0));
}

#[test]
fn test_panes_stay_aligned_over_a_sequence() {
    let mut grid = rendered(50);
    let inputs = [
        (Side::Right, 10.0),
        (Side::Left, 30.0),
        (Side::Right, 200.0),
        (Side::Left, 0.0),
    ];
    for (side, top) in inputs {
        scroll_native(&mut grid, side, top, 0.0);
        assert_eq!(grid.models().render.scroll_top(), top);
        assert_eq!(offsets(&grid, Side::Left).0, top);
        assert_eq!(offsets(&grid, Side::Right).0, top);
    }
}

#[test]
fn test_unchanged_offsets_write_nothing() {
    let mut grid = rendered(50);
    scroll_native(&mut grid, Side::Right, 60.0, 5.0);
    let mutations = grid.dom().structural_mutations();

    grid.handle_native_scroll(Side::Right).unwrap();
    grid.handle_native_scroll(Side::Left).unwrap();

    assert_eq!(grid.models().render.scroll_top(), 60.0);
    assert_eq!(grid.models().render.scroll_left(), 5.0);
    assert_eq!(grid.dom().structural_mutations(), mutations);
}

#[test]
fn test_scroll_survives_redraw() {
    let mut grid = rendered(50);
    scroll_native(&mut grid, Side::Right, 140.0, 25.0);
    grid.reset_rows(rows(60)).unwrap();
    grid.set_column_width("city", 300).unwrap();

    assert_eq!(offsets(&grid, Side::Left), (140.0, 0.0));
    assert_eq!(offsets(&grid, Side::Right), (140.0, 25.0));
}

#[test]
fn test_read_scroll_reports_horizontal_only_for_right() {
    let mut grid = rendered(5);
    let left = root(&grid, Side::Left);
    grid.dom_mut().set_scroll_left(&left, 30.0);
    grid.dom_mut().set_scroll_top(&left, 12.0);

    let update = grid.pane(Side::Left).read_scroll(grid.dom());
    assert_eq!(update.scroll_top, Some(12.0));
    assert_eq!(update.scroll_left, None);

    let update = grid.pane(Side::Right).read_scroll(grid.dom());
    assert_eq!(update.scroll_top, Some(0.0));
    assert_eq!(update.scroll_left, Some(0.0));
}

#[test]
fn test_left_extent_covers_right_scrollbar() {
    let mut grid = rendered(50);
    let total = grid.models().geometry.total_content_height();
    let right = root(&grid, Side::Right);
    grid.dom_mut().set_horizontal_scrollbar_height(right, 15.0).unwrap();

    grid.set_column_width("note", 300).unwrap();

    assert_eq!(grid.pane(Side::Left).scroll_gutter(), 15.0);
    assert_eq!(grid.pane(Side::Right).scroll_gutter(), 0.0);
    let left_outer = style(&grid, outer(&grid, Side::Left), "height");
    assert_eq!(left_outer, Some(format!("{}px", total + 15.0)));
    let right_outer = style(&grid, outer(&grid, Side::Right), "height");
    assert_eq!(right_outer, Some(format!("{total}px")));

    // A full render keeps the padding.
    grid.render().unwrap();
    let left_outer = style(&grid, outer(&grid, Side::Left), "height");
    assert_eq!(left_outer, Some(format!("{}px", total + 15.0)));

    grid.dom_mut().set_horizontal_scrollbar_height(right, 0.0).unwrap();
    grid.set_column_width("note", 80).unwrap();
    assert_eq!(grid.pane(Side::Left).scroll_gutter(), 0.0);
    let left_outer = style(&grid, outer(&grid, Side::Left), "height");
    assert_eq!(left_outer, Some(format!("{total}px")));
}

#[test]
fn test_gutter_follows_row_count() {
    let mut grid = rendered(10);
    let right = root(&grid, Side::Right);
    grid.dom_mut().set_horizontal_scrollbar_height(right, 12.0).unwrap();
    grid.add_rows(vec![RowData::new("extra").with("id", 99)]).unwrap();

    let total = grid.models().geometry.total_content_height();
    let left_outer = style(&grid, outer(&grid, Side::Left), "height");
    assert_eq!(left_outer, Some(format!("{}px", total + 12.0)));
}
