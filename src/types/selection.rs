use serde::{Deserialize, Serialize};

/// Type of selection drawn by the overlay layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SelectionType {
    /// Standard cell range (default)
    #[default]
    CellRange,
    /// Entire row(s) selected
    RowRange,
    /// Entire column(s) selected
    ColumnRange,
}

/// Selected block of rows and visible columns.
///
/// Column indices count visible columns across both panes, LEFT first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    #[serde(default)]
    pub selection_type: SelectionType,
    pub start_row: usize,
    pub start_col: usize,
    pub end_row: usize,
    pub end_col: usize,
}

impl Selection {
    /// Create a new cell range selection
    pub fn cell_range(start_row: usize, start_col: usize, end_row: usize, end_col: usize) -> Self {
        Self {
            selection_type: SelectionType::CellRange,
            start_row,
            start_col,
            end_row,
            end_col,
        }
    }

    /// Create a row range selection spanning every column
    pub fn row_range(start_row: usize, end_row: usize) -> Self {
        Self {
            selection_type: SelectionType::RowRange,
            start_row,
            start_col: 0,
            end_row,
            end_col: usize::MAX,
        }
    }

    /// Create a column range selection spanning every row
    pub fn column_range(start_col: usize, end_col: usize) -> Self {
        Self {
            selection_type: SelectionType::ColumnRange,
            start_row: 0,
            start_col,
            end_row: usize::MAX,
            end_col,
        }
    }

    /// Inclusive `(min_row, max_row)` regardless of drag direction.
    pub fn rows(&self) -> (usize, usize) {
        (
            self.start_row.min(self.end_row),
            self.start_row.max(self.end_row),
        )
    }

    /// Inclusive `(min_col, max_col)` regardless of drag direction.
    pub fn cols(&self) -> (usize, usize) {
        (
            self.start_col.min(self.end_col),
            self.start_col.max(self.end_col),
        )
    }
}
