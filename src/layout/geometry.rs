//! Geometry model: column widths per pane, row and body heights.
//!
//! Widths are stored once for the whole grid; each pane pulls its own slice
//! through [`GeometryModel::column_widths`] after a notification.

use crate::config::GeometryConfig;
use crate::event::{Emitter, GridEvent};
use crate::types::{ColumnSpec, ColumnWidth, Side};

/// Column and height layout shared by both panes.
#[derive(Debug, Clone)]
pub struct GeometryModel {
    columns: Vec<ColumnSpec>,
    /// Number of leading visible columns that belong to the LEFT pane
    frozen_count: usize,
    /// Row height in pixels, border included
    row_height: u32,
    row_count: usize,
    /// Body (viewport) height in pixels
    body_height: f64,
    emitter: Emitter,
}

impl GeometryModel {
    pub fn new(config: GeometryConfig, emitter: Emitter) -> Self {
        Self {
            columns: config.columns,
            frozen_count: config.frozen_count,
            row_height: config.row_height,
            row_count: 0,
            body_height: config.body_height,
            emitter,
        }
    }

    /// Visible column declarations for one side, in display order.
    pub fn visible_columns(&self, side: Side) -> Vec<&ColumnSpec> {
        let visible: Vec<&ColumnSpec> = self.columns.iter().filter(|c| !c.hidden).collect();
        let split = self.frozen_count.min(visible.len());
        let (left, right) = visible.split_at(split);
        match side {
            Side::Left => left.to_vec(),
            Side::Right => right.to_vec(),
        }
    }

    /// Ordered `(name, width)` list for one side.
    pub fn column_widths(&self, side: Side) -> Vec<ColumnWidth> {
        self.visible_columns(side)
            .into_iter()
            .map(|c| ColumnWidth {
                name: c.name.clone(),
                width: c.width,
            })
            .collect()
    }

    /// Index of the first visible column of `side` in the grid-wide visible order.
    pub fn first_column_index(&self, side: Side) -> usize {
        match side {
            Side::Left => 0,
            Side::Right => self.frozen_count.min(self.visible_count()),
        }
    }

    pub fn visible_count(&self) -> usize {
        self.columns.iter().filter(|c| !c.hidden).count()
    }

    /// Height of every row laid end to end.
    pub fn total_content_height(&self) -> f64 {
        self.row_count as f64 * f64::from(self.row_height)
    }

    pub fn viewport_height(&self) -> f64 {
        self.body_height
    }

    pub fn row_height(&self) -> u32 {
        self.row_height
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn frozen_count(&self) -> usize {
        self.frozen_count
    }

    /// Set one column's width. Returns false when no column has that name.
    pub fn set_column_width(&mut self, name: &str, width: u32) -> bool {
        let Some(column) = self.columns.iter_mut().find(|c| c.name == name) else {
            return false;
        };
        column.width = width;
        self.emitter.emit(GridEvent::ColumnWidthChanged);
        true
    }

    /// Replace the widths of all visible columns, in visible order.
    ///
    /// Extra widths are ignored; columns beyond the list keep their width.
    pub fn set_column_widths(&mut self, widths: &[u32]) {
        for (column, width) in self
            .columns
            .iter_mut()
            .filter(|c| !c.hidden)
            .zip(widths.iter().copied())
        {
            column.width = width;
        }
        self.emitter.emit(GridEvent::ColumnWidthChanged);
    }

    /// Show or hide a column. Returns false when no column has that name.
    pub fn set_column_hidden(&mut self, name: &str, hidden: bool) -> bool {
        let Some(column) = self.columns.iter_mut().find(|c| c.name == name) else {
            return false;
        };
        column.hidden = hidden;
        self.emitter.emit(GridEvent::ColumnWidthChanged);
        true
    }

    /// Move the frozen split. Changes the column count of both panes.
    pub fn set_frozen_count(&mut self, frozen_count: usize) {
        self.frozen_count = frozen_count;
        self.emitter.emit(GridEvent::ColumnWidthChanged);
    }

    pub fn set_body_height(&mut self, height: f64) {
        self.body_height = height;
        self.emitter.emit(GridEvent::BodyHeightChanged(height));
    }

    /// Track the data-set size. The data model's own notification follows.
    pub fn set_row_count(&mut self, row_count: usize) {
        self.row_count = row_count;
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

    fn model(frozen: usize) -> (GeometryModel, Emitter) {
        let emitter = Emitter::new();
        let config = GeometryConfig::new(
            vec![
                ColumnSpec::new("id", 40),
                ColumnSpec::new("name", 120),
                ColumnSpec::new("price", 80),
                ColumnSpec::new("qty", 60),
            ],
            frozen,
        );
        (GeometryModel::new(config, emitter.clone()), emitter)
    }

    #[test]
    fn test_columns_split_by_side() {
        let (geometry, _) = model(1);
        let left: Vec<_> = geometry
            .column_widths(Side::Left)
            .into_iter()
            .map(|c| c.name)
            .collect();
        let right: Vec<_> = geometry
            .column_widths(Side::Right)
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(left, vec!["id"]);
        assert_eq!(right, vec!["name", "price", "qty"]);
        assert_eq!(geometry.first_column_index(Side::Right), 1);
    }

    #[test]
    fn test_hidden_columns_are_skipped() {
        let (mut geometry, emitter) = model(2);
        assert!(geometry.set_column_hidden("id", true));
        assert_eq!(emitter.pop(), Some(GridEvent::ColumnWidthChanged));
        let left = geometry.column_widths(Side::Left);
        assert_eq!(left.len(), 2);
        assert_eq!(left[0].name, "name");
        assert_eq!(left[1].name, "price");
        assert_eq!(geometry.visible_count(), 3);
    }

    #[test]
    fn test_frozen_count_beyond_columns() {
        let (geometry, _) = model(10);
        assert_eq!(geometry.column_widths(Side::Left).len(), 4);
        assert!(geometry.column_widths(Side::Right).is_empty());
        assert_eq!(geometry.first_column_index(Side::Right), 4);
    }

    #[test]
    fn test_width_notification_is_level_triggered() {
        let (mut geometry, emitter) = model(1);
        assert!(geometry.set_column_width("price", 80));
        assert!(geometry.set_column_width("price", 80));
        assert_eq!(emitter.pending(), 2);
        assert!(!geometry.set_column_width("missing", 10));
        assert_eq!(emitter.pending(), 2);
    }

    #[test]
    fn test_set_column_widths_in_visible_order() {
        let (mut geometry, _) = model(1);
        geometry.set_column_widths(&[11, 22]);
        let widths: Vec<u32> = geometry
            .column_widths(Side::Left)
            .into_iter()
            .chain(geometry.column_widths(Side::Right))
            .map(|c| c.width)
            .collect();
        assert_eq!(widths, vec![11, 22, 80, 60]);
    }

    #[test]
    fn test_total_content_height() {
        let (mut geometry, emitter) = model(1);
        geometry.set_row_count(100);
        assert_eq!(geometry.total_content_height(), 2700.0);
        assert_eq!(emitter.pending(), 0);
    }

    #[test]
    fn test_body_height_carries_value() {
        let (mut geometry, emitter) = model(1);
        geometry.set_body_height(300.0);
        assert_eq!(geometry.viewport_height(), 300.0);
        assert_eq!(emitter.pop(), Some(GridEvent::BodyHeightChanged(300.0)));
    }
}
