//! Scroll sync.
//!
//! Native scroll on either pane is read into one combined [`ScrollUpdate`]
//! and written to the render model; the model's notifications are then
//! applied back to every pane. Vertical offsets are mirrored on both panes,
//! the horizontal offset only ever lands on the RIGHT pane.

use crate::dom::DomBackend;
use crate::types::ScrollUpdate;

use super::PaneBody;

pub(super) fn differs(a: f64, b: f64) -> bool {
    (a - b).abs() > f64::EPSILON
}

impl<B: DomBackend> PaneBody<B> {
    /// Read the native offsets after a scroll event on this pane's root.
    ///
    /// The LEFT pane reports no horizontal offset.
    pub fn read_scroll(&self, dom: &B) -> ScrollUpdate {
        ScrollUpdate {
            scroll_top: Some(dom.scroll_top(&self.root)),
            scroll_left: self
                .side
                .owns_horizontal_scroll()
                .then(|| dom.scroll_left(&self.root)),
        }
    }

    /// Mirror the model's vertical offset onto this pane.
    pub fn on_scroll_top_changed(&mut self, dom: &mut B, scroll_top: f64) {
        if differs(dom.scroll_top(&self.root), scroll_top) {
            tracing::trace!(side = %self.side, scroll_top, "apply scroll top");
            dom.set_scroll_top(&self.root, scroll_top);
        }
    }

    /// Apply the model's horizontal offset. Ignored by the LEFT pane.
    pub fn on_scroll_left_changed(&mut self, dom: &mut B, scroll_left: f64) {
        if !self.side.owns_horizontal_scroll() {
            return;
        }
        if differs(dom.scroll_left(&self.root), scroll_left) {
            tracing::trace!(side = %self.side, scroll_left, "apply scroll left");
            dom.set_scroll_left(&self.root, scroll_left);
        }
    }
}
