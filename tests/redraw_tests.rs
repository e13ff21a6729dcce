//! Redraw path: whole-table regeneration versus in-place table mutation,
//! both driven from one geometry snapshot.
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
use splitgrid::event::Emitter;
use splitgrid::layout::Models;
use splitgrid::render::Collaborators;
use splitgrid::{DomBackend, EngineCapabilities, GridError, GridOptions, PaneBody, Side};

fn in_place_options() -> GridOptions {
    GridOptions {
        engine: EngineCapabilities {
            box_sizing_quirk: false,
            in_place_table_mutation: true,
        },
        ..GridOptions::default()
    }
}

/// A RIGHT pane rendered on its own, outside a grid.
fn standalone(options: GridOptions, n: usize) -> (PaneBody<MemoryDom>, MemoryDom, Models) {
    let mut dom = MemoryDom::new();
    let root = dom.create_element("div").unwrap();
    let mut models = Models::new(geometry(), &Emitter::new());
    models.data.reset(rows(n));
    models.geometry.set_row_count(n);
    models.render.set_window(0, 0.0, rows(n));

    let mut pane = PaneBody::new(Side::Right, root, options, Collaborators::default());
    pane.render(&mut dom, &models).unwrap();
    (pane, dom, models)
}

#[test]
fn test_redraw_is_idempotent() {
    for options in [GridOptions::default(), in_place_options()] {
        let mut grid = rendered_with(options, 5);
        let before: Vec<String> = Side::ALL
            .iter()
            .map(|side| grid.dom().inner_html(&inner(&grid, *side)).unwrap())
            .collect();

        grid.show_rows(0..5).unwrap();
        grid.show_rows(0..5).unwrap();

        let after: Vec<String> = Side::ALL
            .iter()
            .map(|side| grid.dom().inner_html(&inner(&grid, *side)).unwrap())
            .collect();
        assert_eq!(before, after);
    }
}

#[test]
fn test_regeneration_replaces_table_in_one_mutation() {
    let (mut pane, mut dom, models) = standalone(GridOptions::default(), 3);
    let inner = pane.containers().unwrap().inner;
    let old_table = dom.query(&inner, "table").unwrap().unwrap();
    let old_tbody = *pane.tbody().unwrap();

    let before = dom.structural_mutations();
    let tbody = pane
        .redraw_table(&mut dom, &models.geometry, r#"<tr key="x"><td>x</td></tr>"#)
        .unwrap();

    assert_eq!(dom.structural_mutations() - before, 1);
    assert!(!dom.is_alive(old_table));
    assert!(!dom.is_alive(old_tbody));
    assert_eq!(pane.tbody(), Some(&tbody));
    assert_eq!(dom.inner_html(&tbody).unwrap(), r#"<tr key="x"><td>x</td></tr>"#);
    assert_eq!(dom.children(inner).len(), 1);
}

#[test]
fn test_in_place_mutation_keeps_table_element() {
    let (mut pane, mut dom, models) = standalone(in_place_options(), 3);
    let inner = pane.containers().unwrap().inner;
    let table = dom.query(&inner, "table").unwrap().unwrap();
    let old_tbody = *pane.tbody().unwrap();

    let tbody = pane.redraw_table(&mut dom, &models.geometry, "").unwrap();

    assert!(dom.is_alive(table));
    assert_eq!(tbody, old_tbody);
    assert_eq!(dom.inner_html(&tbody).unwrap(), "");
    assert_eq!(dom.query_all(&inner, "col").unwrap().len(), 3);
}

#[test]
fn test_redraw_uses_current_widths() {
    for options in [GridOptions::default(), in_place_options()] {
        let (mut pane, mut dom, mut models) = standalone(options, 2);
        // Change geometry without delivering the notification.
        models.geometry.set_column_width("city", 222);

        pane.redraw_table(&mut dom, &models.geometry, "").unwrap();

        let inner = pane.containers().unwrap().inner;
        let widths: Vec<String> = dom
            .query_all(&inner, "col")
            .unwrap()
            .iter()
            .map(|c| dom.style(c, "width").unwrap())
            .collect();
        assert_eq!(widths, vec!["120px", "222px", "80px"]);
    }
}

#[test]
fn test_window_change_mutation_counts() {
    let mut grid = rendered(6);
    let before = grid.dom().structural_mutations();
    grid.show_rows(2..4).unwrap();
    assert_eq!(grid.dom().structural_mutations() - before, 2);

    let mut grid = rendered_with(in_place_options(), 6);
    let before = grid.dom().structural_mutations();
    grid.show_rows(2..4).unwrap();
    assert_eq!(grid.dom().structural_mutations() - before, 4);
}

#[test]
fn test_row_list_rebinds_after_regeneration() {
    let mut grid = rendered(4);
    let old_tbody = *grid.pane(Side::Left).tbody().unwrap();
    grid.reset_rows(rows(2)).unwrap();

    let new_tbody = *grid.pane(Side::Left).tbody().unwrap();
    assert_ne!(old_tbody, new_tbody);
    assert!(!grid.dom().is_alive(old_tbody));
    assert_eq!(grid.dom().query_all(&new_tbody, "tr").unwrap().len(), 2);
}

#[test]
fn test_in_place_resync_after_hiding_column() {
    let mut grid = rendered_with(in_place_options(), 2);
    grid.set_column_hidden("name", true).unwrap();
    assert_eq!(marker_names(&grid, Side::Right), vec!["city", "note"]);
    assert_eq!(first_row_cells(&grid, Side::Right), vec!["city 0", "note 0"]);
}

#[test]
fn test_redraw_before_render_fails() {
    let mut dom = MemoryDom::new();
    let root = dom.create_element("div").unwrap();
    let models = Models::new(geometry(), &Emitter::new());
    let mut pane: PaneBody<MemoryDom> =
        PaneBody::new(Side::Left, root, GridOptions::default(), Collaborators::default());

    let err = pane.redraw_table(&mut dom, &models.geometry, "").unwrap_err();
    assert!(matches!(err, GridError::NotRendered(_)));
}

#[test]
fn test_malformed_rows_leave_table_intact() {
    let (mut pane, mut dom, models) = standalone(GridOptions::default(), 2);
    let inner = pane.containers().unwrap().inner;
    let before = dom.inner_html(&inner).unwrap();

    let err = pane
        .redraw_table(&mut dom, &models.geometry, "<tr><td>x</tr>")
        .unwrap_err();

    assert!(matches!(err, GridError::Markup(_)));
    assert_eq!(dom.inner_html(&inner).unwrap(), before);
}

#[test]
fn test_repeated_redraws_keep_arena_size() {
    for options in [GridOptions::default(), in_place_options()] {
        let mut grid = rendered_with(options, 30);
        grid.show_rows(0..10).unwrap();
        grid.show_rows(10..20).unwrap();
        let settled = grid.dom().arena_len();
        let live = grid.dom().live_nodes();

        for _ in 0..200 {
            grid.show_rows(0..10).unwrap();
            grid.show_rows(10..20).unwrap();
        }

        assert_eq!(grid.dom().arena_len(), settled);
        assert_eq!(grid.dom().live_nodes(), live);
        assert_eq!(row_keys(&grid, Side::Right).first().map(String::as_str), Some("r10"));
    }
}
