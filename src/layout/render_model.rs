//! Render model: scroll offsets, the visible row window and the selection.

use crate::event::{Emitter, GridEvent};
use crate::types::{RowData, ScrollUpdate, Selection, Side};

/// Rows currently rendered by one pane.
#[derive(Debug, Clone, Copy)]
pub struct RowCollection<'a> {
    pub side: Side,
    pub rows: &'a [RowData],
}

impl RowCollection<'_> {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Shared scroll and visible-row state.
///
/// This is the single owner of the scroll position; panes only read it after
/// a notification and write it in response to native scroll input.
#[derive(Debug, Clone)]
pub struct RenderModel {
    scroll_top: f64,
    scroll_left: f64,
    /// Offset of the first rendered row within the full content height
    window_top: f64,
    /// Index of the first rendered row in the data set
    window_start: usize,
    rows: Vec<RowData>,
    selection: Option<Selection>,
    emitter: Emitter,
}

fn changed(a: f64, b: f64) -> bool {
    (a - b).abs() > f64::EPSILON
}

impl RenderModel {
    pub fn new(emitter: Emitter) -> Self {
        Self {
            scroll_top: 0.0,
            scroll_left: 0.0,
            window_top: 0.0,
            window_start: 0,
            rows: Vec::new(),
            selection: None,
            emitter,
        }
    }

    pub fn scroll_top(&self) -> f64 {
        self.scroll_top
    }

    pub fn scroll_left(&self) -> f64 {
        self.scroll_left
    }

    /// Write every field present in `update` as one step, then notify.
    ///
    /// Both fields are stored before any event is queued, and only fields
    /// whose value changed produce an event.
    pub fn apply_scroll(&mut self, update: ScrollUpdate) {
        let mut events = Vec::with_capacity(2);
        if let Some(top) = update.scroll_top {
            if changed(top, self.scroll_top) {
                self.scroll_top = top;
                events.push(GridEvent::ScrollTopChanged(top));
            }
        }
        if let Some(left) = update.scroll_left {
            if changed(left, self.scroll_left) {
                self.scroll_left = left;
                events.push(GridEvent::ScrollLeftChanged(left));
            }
        }
        for event in events {
            self.emitter.emit(event);
        }
    }

    /// Rows rendered by `side`.
    pub fn collection(&self, side: Side) -> RowCollection<'_> {
        RowCollection {
            side,
            rows: &self.rows,
        }
    }

    pub fn virtual_window_top(&self) -> f64 {
        self.window_top
    }

    pub fn window_start(&self) -> usize {
        self.window_start
    }

    /// Publish a new row window computed by the windowing collaborator.
    pub fn set_window(&mut self, start: usize, top: f64, rows: Vec<RowData>) {
        self.window_start = start;
        self.window_top = top;
        self.rows = rows;
        self.emitter.emit(GridEvent::WindowChanged);
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn set_selection(&mut self, selection: Option<Selection>) {
        self.selection = selection;
        self.emitter.emit(GridEvent::SelectionChanged);
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
    fn test_combined_update_writes_both_before_notifying() {
        let emitter = Emitter::new();
        let mut model = RenderModel::new(emitter.clone());
        model.apply_scroll(ScrollUpdate::both(120.0, 40.0));
        assert_eq!(model.scroll_top(), 120.0);
        assert_eq!(model.scroll_left(), 40.0);
        assert_eq!(
            emitter.drain(),
            vec![
                GridEvent::ScrollTopChanged(120.0),
                GridEvent::ScrollLeftChanged(40.0)
            ]
        );
    }

    #[test]
    fn test_missing_scroll_left_is_untouched() {
        let emitter = Emitter::new();
        let mut model = RenderModel::new(emitter.clone());
        model.apply_scroll(ScrollUpdate::both(10.0, 55.0));
        emitter.drain();

        model.apply_scroll(ScrollUpdate::top(75.0));
        assert_eq!(model.scroll_top(), 75.0);
        assert_eq!(model.scroll_left(), 55.0);
        assert_eq!(emitter.drain(), vec![GridEvent::ScrollTopChanged(75.0)]);
    }

    #[test]
    fn test_same_value_does_not_notify() {
        let emitter = Emitter::new();
        let mut model = RenderModel::new(emitter.clone());
        model.apply_scroll(ScrollUpdate::top(30.0));
        emitter.drain();
        model.apply_scroll(ScrollUpdate::both(30.0, 0.0));
        assert_eq!(emitter.pending(), 0);
    }

    #[test]
    fn test_window() {
        let emitter = Emitter::new();
        let mut model = RenderModel::new(emitter.clone());
        model.set_window(10, 270.0, vec![RowData::new("10"), RowData::new("11")]);
        assert_eq!(model.virtual_window_top(), 270.0);
        assert_eq!(model.window_start(), 10);
        assert_eq!(model.collection(Side::Left).len(), 2);
        assert_eq!(model.collection(Side::Right).rows[1].key, "11");
        assert_eq!(emitter.pop(), Some(GridEvent::WindowChanged));
    }
}
