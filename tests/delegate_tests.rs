//! Delegated table events: handlers bound through the pane keep working
//! across redraws and only see targets inside the table container.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use std::cell::RefCell;
use std::rc::Rc;

use common::*;
use splitgrid::dom::{MemoryDom, NodeId};
use splitgrid::{DelegatedEvent, DomBackend, Grid, GridError, Side, TableEvent};

type Log = Rc<RefCell<Vec<(String, Side, NodeId)>>>;

fn recorder(tag: &str, log: &Log) -> TableEvent<NodeId> {
    let log = Rc::clone(log);
    let tag = tag.to_string();
    TableEvent::new(tag.clone(), move |event: &DelegatedEvent<NodeId>| {
        log.borrow_mut().push((tag.clone(), event.side, event.matched));
    })
}

fn cell(grid: &Grid<MemoryDom>, side: Side, row: usize) -> NodeId {
    let dom = grid.dom();
    let trs = dom.query_all(&inner(grid, side), "tr").unwrap();
    dom.query(&trs[row], "td").unwrap().unwrap()
}

#[test]
fn test_click_on_cell_resolves_row() {
    let mut grid = rendered(3);
    let log: Log = Rc::default();
    grid.attach_table_event("click", &[recorder("tr", &log)]).unwrap();

    let td = cell(&grid, Side::Right, 1);
    assert_eq!(grid.dispatch_dom_event(Side::Right, "click", &td).unwrap(), 1);

    let log = log.borrow();
    let (_, side, matched) = &log[0];
    assert_eq!(*side, Side::Right);
    assert_eq!(grid.dom().attribute(matched, "key").as_deref(), Some("r1"));
}

#[test]
fn test_handlers_survive_redraw() {
    let mut grid = rendered(3);
    let log: Log = Rc::default();
    grid.attach_table_event("click", &[recorder("tr", &log)]).unwrap();

    grid.reset_rows(rows(5)).unwrap();
    grid.set_column_hidden("city", true).unwrap();
    grid.render().unwrap();

    let td = cell(&grid, Side::Left, 4);
    assert_eq!(grid.dispatch_dom_event(Side::Left, "click", &td).unwrap(), 1);
    let matched = log.borrow()[0].2;
    assert_eq!(grid.dom().attribute(&matched, "key").as_deref(), Some("r4"));
}

#[test]
fn test_base_selector_is_combined_with_entries() {
    let mut grid = rendered(2);
    let log: Log = Rc::default();
    grid.attach_table_event(
        "dblclick tr",
        &[recorder("td.grid-cell", &log), recorder("td.missing", &log)],
    )
    .unwrap();

    let td = cell(&grid, Side::Right, 0);
    assert_eq!(grid.dispatch_dom_event(Side::Right, "dblclick", &td).unwrap(), 1);
    assert_eq!(log.borrow()[0].2, td);
    assert_eq!(grid.pane(Side::Right).delegates().len(), 2);
}

#[test]
fn test_targets_outside_table_are_ignored() {
    let mut grid = rendered(2);
    let log: Log = Rc::default();
    grid.attach_table_event("click", &[recorder("div", &log)]).unwrap();

    let layer = grid
        .dom()
        .query(&outer(&grid, Side::Right), ".grid-selection-layer")
        .unwrap()
        .unwrap();
    assert_eq!(grid.dispatch_dom_event(Side::Right, "click", &layer).unwrap(), 0);

    // The table container itself is the boundary and never matches.
    let inner = inner(&grid, Side::Right);
    assert_eq!(grid.dispatch_dom_event(Side::Right, "click", &inner).unwrap(), 0);
    assert!(log.borrow().is_empty());
}

#[test]
fn test_other_event_types_do_not_fire() {
    let mut grid = rendered(2);
    let log: Log = Rc::default();
    grid.attach_table_event("click", &[recorder("tr", &log)]).unwrap();

    let td = cell(&grid, Side::Right, 0);
    assert_eq!(grid.dispatch_dom_event(Side::Right, "mouseover", &td).unwrap(), 0);
}

#[test]
fn test_duplicate_registration_replaces_handler() {
    let mut grid = rendered(2);
    let first: Log = Rc::default();
    let second: Log = Rc::default();
    grid.attach_table_event("click", &[recorder("tr", &first)]).unwrap();
    grid.attach_table_event("click", &[recorder("tr", &second)]).unwrap();

    let td = cell(&grid, Side::Right, 0);
    assert_eq!(grid.dispatch_dom_event(Side::Right, "click", &td).unwrap(), 1);
    assert!(first.borrow().is_empty());
    assert_eq!(second.borrow().len(), 1);
}

#[test]
fn test_invalid_selector_registers_nothing() {
    let mut grid = rendered(1);
    let log: Log = Rc::default();
    let err = grid
        .attach_table_event("click", &[recorder("tr", &log), recorder("td:hover", &log)])
        .unwrap_err();
    assert!(matches!(err, GridError::Selector(_)));
    assert!(grid.pane(Side::Left).delegates().is_empty());
}

#[test]
fn test_missing_event_type_is_rejected() {
    let mut grid = rendered(1);
    let log: Log = Rc::default();
    assert!(grid.attach_table_event("  ", &[recorder("tr", &log)]).is_err());
}

#[test]
fn test_dispatch_before_render_matches_nothing() {
    let mut grid = grid_with(Default::default(), geometry());
    let log: Log = Rc::default();
    grid.attach_table_event("click", &[recorder("tr", &log)]).unwrap();
    let root = root(&grid, Side::Right);
    assert_eq!(grid.dispatch_dom_event(Side::Right, "click", &root).unwrap(), 0);
}
