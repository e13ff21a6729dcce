//! Model notifications and their delivery order.
//!
//! Models push [`GridEvent`]s into a shared [`Emitter`]. The grid drains the
//! queue and hands each event to its subscribers in subscription order.
//! Everything runs on one thread; an event queued while another is being
//! delivered is delivered after it.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::types::Side;

/// Kind of data-set mutation. Panes treat all kinds identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataChange {
    Add,
    Remove,
    Reset,
}

/// A notification emitted by one of the grid models.
#[derive(Debug, Clone, PartialEq)]
pub enum GridEvent {
    /// Column widths, visibility or the frozen split changed.
    ColumnWidthChanged,
    /// Body (viewport) height changed, in pixels.
    BodyHeightChanged(f64),
    /// Rows were added, removed or reset.
    DataChanged(DataChange),
    ScrollTopChanged(f64),
    ScrollLeftChanged(f64),
    /// The visible row window moved or its rows changed.
    WindowChanged,
    SelectionChanged,
}

/// Payload-free discriminant used for subscriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    ColumnWidthChanged,
    BodyHeightChanged,
    DataChanged,
    ScrollTopChanged,
    ScrollLeftChanged,
    WindowChanged,
    SelectionChanged,
}

impl GridEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            GridEvent::ColumnWidthChanged => EventKind::ColumnWidthChanged,
            GridEvent::BodyHeightChanged(_) => EventKind::BodyHeightChanged,
            GridEvent::DataChanged(_) => EventKind::DataChanged,
            GridEvent::ScrollTopChanged(_) => EventKind::ScrollTopChanged,
            GridEvent::ScrollLeftChanged(_) => EventKind::ScrollLeftChanged,
            GridEvent::WindowChanged => EventKind::WindowChanged,
            GridEvent::SelectionChanged => EventKind::SelectionChanged,
        }
    }
}

/// Cloneable handle onto a shared FIFO of pending events.
#[derive(Debug, Clone, Default)]
pub struct Emitter {
    queue: Rc<RefCell<VecDeque<GridEvent>>>,
}

impl Emitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&self, event: GridEvent) {
        tracing::trace!(?event, "queue event");
        self.queue.borrow_mut().push_back(event);
    }

    /// Pop the oldest pending event.
    pub fn pop(&self) -> Option<GridEvent> {
        self.queue.borrow_mut().pop_front()
    }

    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Remove and return every pending event.
    pub fn drain(&self) -> Vec<GridEvent> {
        self.queue.borrow_mut().drain(..).collect()
    }
}

/// Something inside a pane that listens to model events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Subscriber {
    /// The pane body itself (geometry and scroll sync).
    Body(Side),
    /// The pane's row list.
    Rows(Side),
    /// The pane's selection overlay.
    Layer(Side),
}

/// Subscription table, kept in registration order.
#[derive(Debug, Clone, Default)]
pub struct Subscriptions {
    entries: Vec<(EventKind, Subscriber)>,
}

impl Subscriptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, kind: EventKind, subscriber: Subscriber) {
        if !self.entries.contains(&(kind, subscriber)) {
            self.entries.push((kind, subscriber));
        }
    }

    /// Subscribers for `kind`, in the order they subscribed.
    pub fn subscribers(&self, kind: EventKind) -> impl Iterator<Item = Subscriber> + '_ {
        self.entries
            .iter()
            .filter(move |(k, _)| *k == kind)
            .map(|(_, s)| *s)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
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
    fn test_emitter_is_fifo_and_shared() {
        let emitter = Emitter::new();
        let clone = emitter.clone();
        emitter.emit(GridEvent::ScrollTopChanged(10.0));
        clone.emit(GridEvent::DataChanged(DataChange::Reset));
        assert_eq!(emitter.pending(), 2);
        assert_eq!(clone.pop(), Some(GridEvent::ScrollTopChanged(10.0)));
        assert_eq!(
            emitter.pop(),
            Some(GridEvent::DataChanged(DataChange::Reset))
        );
        assert_eq!(emitter.pop(), None);
    }

    #[test]
    fn test_subscribers_keep_registration_order() {
        let mut subs = Subscriptions::new();
        subs.subscribe(EventKind::ScrollTopChanged, Subscriber::Body(Side::Left));
        subs.subscribe(EventKind::ScrollLeftChanged, Subscriber::Body(Side::Left));
        subs.subscribe(EventKind::ScrollTopChanged, Subscriber::Body(Side::Right));
        subs.subscribe(EventKind::ScrollTopChanged, Subscriber::Body(Side::Left));

        let order: Vec<_> = subs.subscribers(EventKind::ScrollTopChanged).collect();
        assert_eq!(
            order,
            vec![Subscriber::Body(Side::Left), Subscriber::Body(Side::Right)]
        );
        assert_eq!(subs.len(), 3);
    }

    #[test]
    fn test_event_kind() {
        assert_eq!(
            GridEvent::BodyHeightChanged(300.0).kind(),
            EventKind::BodyHeightChanged
        );
        assert_eq!(
            GridEvent::DataChanged(DataChange::Add).kind(),
            EventKind::DataChanged
        );
    }
}
