//! Data model: the ordered row set.

use crate::event::{DataChange, Emitter, GridEvent};
use crate::types::RowData;

#[derive(Debug, Clone)]
pub struct DataModel {
    rows: Vec<RowData>,
    emitter: Emitter,
}

impl DataModel {
    pub fn new(emitter: Emitter) -> Self {
        Self {
            rows: Vec::new(),
            emitter,
        }
    }

    pub fn rows(&self) -> &[RowData] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&RowData> {
        self.rows.iter().find(|r| r.key == key)
    }

    pub fn add(&mut self, rows: Vec<RowData>) {
        self.rows.extend(rows);
        self.emitter.emit(GridEvent::DataChanged(DataChange::Add));
    }

    /// Remove a row by key. No notification when the key is unknown.
    pub fn remove(&mut self, key: &str) -> Option<RowData> {
        let index = self.rows.iter().position(|r| r.key == key)?;
        let removed = self.rows.remove(index);
        self.emitter.emit(GridEvent::DataChanged(DataChange::Remove));
        Some(removed)
    }

    pub fn reset(&mut self, rows: Vec<RowData>) {
        self.rows = rows;
        self.emitter.emit(GridEvent::DataChanged(DataChange::Reset));
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
    fn test_mutations_notify() {
        let emitter = Emitter::new();
        let mut data = DataModel::new(emitter.clone());
        data.reset(vec![RowData::new("a"), RowData::new("b")]);
        data.add(vec![RowData::new("c")]);
        assert_eq!(data.remove("b").map(|r| r.key), Some("b".to_string()));
        assert!(data.remove("zzz").is_none());
        assert_eq!(data.len(), 2);
        assert_eq!(
            emitter.drain(),
            vec![
                GridEvent::DataChanged(DataChange::Reset),
                GridEvent::DataChanged(DataChange::Add),
                GridEvent::DataChanged(DataChange::Remove),
            ]
        );
    }
}
