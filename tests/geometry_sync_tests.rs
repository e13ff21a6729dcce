//! Geometry sync: column markers, root height, content height and the
//! table offset follow the geometry and render models.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use common::*;
use splitgrid::{DomBackend, EngineCapabilities, GridOptions, Side};
use test_case::test_case;

fn quirk_options() -> GridOptions {
    GridOptions {
        engine: EngineCapabilities {
            box_sizing_quirk: true,
            in_place_table_mutation: false,
        },
        ..GridOptions::default()
    }
}

#[test]
fn test_width_change_updates_markers_in_place() {
    let mut grid = rendered(3);
    let markers_before = grid.dom().query_all(&inner(&grid, Side::Right), "col").unwrap();

    assert!(grid.set_column_width("name", 150).unwrap());

    assert_eq!(marker_widths(&grid, Side::Right), vec!["150px", "100px", "80px"]);
    assert_eq!(marker_widths(&grid, Side::Left), vec!["40px"]);
    let markers_after = grid.dom().query_all(&inner(&grid, Side::Right), "col").unwrap();
    assert_eq!(markers_before, markers_after);
}

#[test]
fn test_width_change_for_unknown_column_is_ignored() {
    let mut grid = rendered(1);
    assert!(!grid.set_column_width("missing", 10).unwrap());
    assert_eq!(marker_widths(&grid, Side::Right), vec!["120px", "100px", "80px"]);
}

#[test_case(false, &["40px"], &["120px", "100px", "80px"] ; "standard box sizing")]
#[test_case(true, &["30px"], &["110px", "90px", "70px"] ; "padding included in col width")]
fn test_markers_subtract_extra_width(quirk: bool, left: &[&str], right: &[&str]) {
    let options = if quirk {
        quirk_options()
    } else {
        GridOptions::default()
    };
    let mut grid = rendered_with(options, 2);
    assert_eq!(marker_widths(&grid, Side::Left), left);
    assert_eq!(marker_widths(&grid, Side::Right), right);

    // The notification path applies the same compensation as the render.
    grid.set_column_widths(&[40, 120, 100, 80]).unwrap();
    assert_eq!(marker_widths(&grid, Side::Left), left);
    assert_eq!(marker_widths(&grid, Side::Right), right);
}

#[test]
fn test_marker_width_never_negative() {
    let mut grid = rendered_with(quirk_options(), 1);
    grid.set_column_width("note", 4).unwrap();
    assert_eq!(marker_widths(&grid, Side::Right), vec!["110px", "90px", "0px"]);
}

#[test]
fn test_set_column_widths_splits_by_side() {
    let mut grid = rendered(1);
    grid.set_column_widths(&[50, 60, 70, 80]).unwrap();
    assert_eq!(marker_widths(&grid, Side::Left), vec!["50px"]);
    assert_eq!(marker_widths(&grid, Side::Right), vec!["60px", "70px", "80px"]);
}

#[test_case(450.0, "450px")]
#[test_case(300.0, "300px")]
#[test_case(12.5, "12.5px")]
fn test_body_height_sets_root_height(height: f64, expected: &str) {
    let mut grid = rendered(1);
    grid.set_body_height(height).unwrap();
    for side in Side::ALL {
        assert_eq!(style(&grid, root(&grid, side), "height").as_deref(), Some(expected));
    }
}

#[test]
fn test_reset_sets_content_height() {
    let mut config = geometry();
    config.row_height = 42;
    let mut grid = grid_with(GridOptions::default(), config);
    grid.render().unwrap();
    grid.reset_rows(rows(100)).unwrap();
    for side in Side::ALL {
        assert_eq!(style(&grid, outer(&grid, side), "height").as_deref(), Some("4200px"));
    }
}

#[test]
fn test_every_data_change_kind_resizes_content() {
    let mut grid = rendered(3);
    assert_eq!(style(&grid, outer(&grid, Side::Left), "height").as_deref(), Some("60px"));

    let mut extra = rows(5);
    grid.add_rows(extra.split_off(3)).unwrap();
    assert_eq!(style(&grid, outer(&grid, Side::Left), "height").as_deref(), Some("100px"));
    assert_eq!(row_keys(&grid, Side::Left), vec!["r0", "r1", "r2", "r3", "r4"]);

    grid.remove_row("r1").unwrap();
    assert_eq!(style(&grid, outer(&grid, Side::Right), "height").as_deref(), Some("80px"));
    assert_eq!(row_keys(&grid, Side::Right), vec!["r0", "r2", "r3", "r4"]);

    grid.reset_rows(Vec::new()).unwrap();
    assert_eq!(style(&grid, outer(&grid, Side::Right), "height").as_deref(), Some("0px"));
}

#[test]
fn test_hiding_a_column_resyncs_markers_and_rows() {
    let mut grid = rendered(2);
    assert!(grid.set_column_hidden("city", true).unwrap());

    assert_eq!(marker_names(&grid, Side::Right), vec!["name", "note"]);
    assert_eq!(marker_widths(&grid, Side::Right), vec!["120px", "80px"]);
    assert_eq!(first_row_cells(&grid, Side::Right), vec!["name 0", "note 0"]);
    assert_eq!(marker_names(&grid, Side::Left), vec!["id"]);

    grid.set_column_hidden("city", false).unwrap();
    assert_eq!(marker_names(&grid, Side::Right), vec!["name", "city", "note"]);
    assert_eq!(
        first_row_cells(&grid, Side::Right),
        vec!["name 0", "city 0", "note 0"]
    );
}

#[test]
fn test_moving_frozen_split_resyncs_both_panes() {
    let mut grid = rendered(2);
    grid.set_frozen_count(2).unwrap();

    assert_eq!(marker_names(&grid, Side::Left), vec!["id", "name"]);
    assert_eq!(marker_names(&grid, Side::Right), vec!["city", "note"]);
    assert_eq!(first_row_cells(&grid, Side::Left), vec!["0", "name 0"]);
    assert_eq!(first_row_cells(&grid, Side::Right), vec!["city 0", "note 0"]);
    assert_eq!(row_keys(&grid, Side::Left), row_keys(&grid, Side::Right));
}

#[test]
fn test_window_move_repositions_table() {
    let mut grid = rendered(10);
    grid.show_rows(4..7).unwrap();
    for side in Side::ALL {
        assert_eq!(style(&grid, inner(&grid, side), "top").as_deref(), Some("80px"));
        assert_eq!(row_keys(&grid, side), vec!["r4", "r5", "r6"]);
        // Content height still covers every row.
        assert_eq!(style(&grid, outer(&grid, side), "height").as_deref(), Some("200px"));
    }
}

#[test]
fn test_explicit_window_survives_data_changes() {
    let mut grid = rendered(10);
    grid.show_rows(0..2).unwrap();
    grid.add_rows(rows(1)).unwrap();
    assert_eq!(row_keys(&grid, Side::Right), vec!["r0", "r1"]);
    assert_eq!(style(&grid, outer(&grid, Side::Right), "height").as_deref(), Some("220px"));
}

#[test]
fn test_notifications_before_render_are_ignored() {
    let mut grid = grid_with(GridOptions::default(), geometry());
    grid.set_column_width("name", 10).unwrap();
    grid.set_body_height(100.0).unwrap();
    grid.reset_rows(rows(2)).unwrap();

    assert!(grid.pane(Side::Right).containers().is_none());
    grid.render().unwrap();
    assert_eq!(marker_widths(&grid, Side::Right), vec!["10px", "100px", "80px"]);
    assert_eq!(style(&grid, root(&grid, Side::Left), "height").as_deref(), Some("100px"));
    assert_eq!(row_keys(&grid, Side::Left), vec!["r0", "r1"]);
}
