//! Selection overlay layer.
//!
//! The rectangle math is kept separate from the DOM so it stays testable.

use crate::config::CELL_BORDER_WIDTH;
use crate::dom::DomBackend;
use crate::error::Result;
use crate::layout::{GeometryModel, Models};
use crate::markup::{px, CLASS_SELECTION_LAYER};
use crate::types::{Selection, Side};

use super::{Layer, LayerFactory};

/// Overlay position inside the outer container, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayerRect {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

/// Part of `selection` that falls inside `side`, or `None` when the
/// selection does not touch that pane.
pub fn selection_rect(
    selection: &Selection,
    geometry: &GeometryModel,
    side: Side,
) -> Option<LayerRect> {
    let row_count = geometry.row_count();
    if row_count == 0 {
        return None;
    }
    let (min_row, max_row) = selection.rows();
    if min_row >= row_count {
        return None;
    }
    let max_row = max_row.min(row_count - 1);

    let widths = geometry.column_widths(side);
    let first = geometry.first_column_index(side);
    let (min_col, max_col) = selection.cols();
    let start = min_col.max(first);
    let end = max_col.min((first + widths.len()).checked_sub(1)?);
    if start > end {
        return None;
    }

    let border = f64::from(CELL_BORDER_WIDTH);
    let span = |range: std::ops::Range<usize>| -> f64 {
        widths
            .iter()
            .skip(range.start)
            .take(range.len())
            .map(|c| f64::from(c.width) + border)
            .sum()
    };
    let row_height = f64::from(geometry.row_height());
    let rows = (max_row - min_row + 1) as f64;

    Some(LayerRect {
        top: min_row as f64 * row_height,
        left: span(0..start - first),
        width: span(start - first..end - first + 1) - border,
        height: rows * row_height - border,
    })
}

/// Absolutely positioned box marking the current selection.
pub struct SelectionLayer<B: DomBackend> {
    side: Side,
    element: Option<B::Handle>,
}

impl<B: DomBackend> SelectionLayer<B> {
    pub fn new(side: Side) -> Self {
        Self {
            side,
            element: None,
        }
    }

    pub fn element(&self) -> Option<&B::Handle> {
        self.element.as_ref()
    }
}

impl<B: DomBackend> Layer<B> for SelectionLayer<B> {
    fn render(&mut self, dom: &mut B, parent: &B::Handle, models: &Models) -> Result<()> {
        let element = dom.create_element("div")?;
        dom.set_attribute(&element, "class", CLASS_SELECTION_LAYER)?;
        dom.set_style(&element, "position", "absolute")?;
        dom.append_child(parent, &element)?;
        self.element = Some(element);
        self.refresh(dom, models)
    }

    fn refresh(&mut self, dom: &mut B, models: &Models) -> Result<()> {
        let Some(element) = &self.element else {
            return Ok(());
        };
        let rect = models
            .render
            .selection()
            .and_then(|s| selection_rect(s, &models.geometry, self.side));
        match rect {
            Some(rect) => {
                dom.set_style(element, "display", "block")?;
                dom.set_style(element, "top", &px(rect.top))?;
                dom.set_style(element, "left", &px(rect.left))?;
                dom.set_style(element, "width", &px(rect.width))?;
                dom.set_style(element, "height", &px(rect.height))?;
            }
            None => dom.set_style(element, "display", "none")?,
        }
        Ok(())
    }

    fn destroy(&mut self, _dom: &mut B) {
        self.element = None;
    }
}

/// Creates a [`SelectionLayer`] per pane.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectionLayerFactory;

impl<B: DomBackend> LayerFactory<B> for SelectionLayerFactory {
    fn create_layer(&self, side: Side) -> Box<dyn Layer<B>> {
        Box::new(SelectionLayer::<B>::new(side))
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
    use crate::config::GeometryConfig;
    use crate::event::Emitter;
    use crate::types::ColumnSpec;

    fn geometry() -> GeometryModel {
        let mut config = GeometryConfig::new(
            vec![
                ColumnSpec::new("a", 50),
                ColumnSpec::new("b", 60),
                ColumnSpec::new("c", 70),
                ColumnSpec::new("d", 80),
            ],
            1,
        );
        config.row_height = 20;
        let mut geometry = GeometryModel::new(config, Emitter::new());
        geometry.set_row_count(10);
        geometry
    }

    #[test]
    fn test_cell_range_in_right_pane() {
        let rect = selection_rect(&Selection::cell_range(2, 2, 3, 3), &geometry(), Side::Right)
            .unwrap();
        assert_eq!(
            rect,
            LayerRect {
                top: 40.0,
                left: 61.0,
                width: 151.0,
                height: 39.0,
            }
        );
    }

    #[test]
    fn test_range_outside_pane() {
        let sel = Selection::cell_range(0, 2, 0, 3);
        assert!(selection_rect(&sel, &geometry(), Side::Left).is_none());
    }

    #[test]
    fn test_row_range_is_clamped() {
        let geometry = geometry();
        let left = selection_rect(&Selection::row_range(8, 50), &geometry, Side::Left).unwrap();
        assert_eq!(left.top, 160.0);
        assert_eq!(left.height, 39.0);
        assert_eq!(left.left, 0.0);
        assert_eq!(left.width, 50.0);
        let right = selection_rect(&Selection::row_range(8, 50), &geometry, Side::Right).unwrap();
        assert_eq!(right.width, 212.0);
    }

    #[test]
    fn test_no_rows() {
        let mut geometry = geometry();
        geometry.set_row_count(0);
        assert!(selection_rect(&Selection::cell_range(0, 0, 0, 0), &geometry, Side::Left).is_none());
    }
}
