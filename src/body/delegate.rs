//! Delegated table events.
//!
//! Handlers are registered against the pane, not against row elements, and
//! resolved against the table container when a native event arrives. Rows
//! can be regenerated freely without rebinding anything.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::dom::{DomBackend, SelectorList};
use crate::error::{GridError, Result};
use crate::types::Side;

use super::PaneBody;

/// A native event matched against a delegated selector.
#[derive(Debug, Clone, PartialEq)]
pub struct DelegatedEvent<H> {
    pub event_type: String,
    pub side: Side,
    /// Element the native event was dispatched to.
    pub target: H,
    /// Nearest ancestor of `target` matching the handler's selector.
    pub matched: H,
}

pub type DelegateHandler<H> = Rc<dyn Fn(&DelegatedEvent<H>)>;

/// One `selector -> handler` entry passed to [`PaneBody::attach_table_event`].
pub struct TableEvent<H> {
    pub selector: String,
    pub handler: DelegateHandler<H>,
}

impl<H: 'static> TableEvent<H> {
    pub fn new(selector: impl Into<String>, handler: impl Fn(&DelegatedEvent<H>) + 'static) -> Self {
        Self {
            selector: selector.into(),
            handler: Rc::new(handler),
        }
    }
}

impl<H> Clone for TableEvent<H> {
    fn clone(&self) -> Self {
        Self {
            selector: self.selector.clone(),
            handler: Rc::clone(&self.handler),
        }
    }
}

impl<H> fmt::Debug for TableEvent<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableEvent")
            .field("selector", &self.selector)
            .finish_non_exhaustive()
    }
}

/// A resolved handler ready to run.
pub struct DelegateMatch<H> {
    pub event: DelegatedEvent<H>,
    handler: DelegateHandler<H>,
}

impl<H> DelegateMatch<H> {
    pub fn invoke(&self) {
        (self.handler)(&self.event);
    }
}

impl<H: fmt::Debug> fmt::Debug for DelegateMatch<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DelegateMatch")
            .field("event", &self.event)
            .finish_non_exhaustive()
    }
}

struct Entry<H> {
    event_type: String,
    selector: String,
    handler: DelegateHandler<H>,
}

/// Registered handlers, keyed by event type and full selector.
///
/// Registering the same key again replaces the handler in place, keeping
/// its original dispatch position.
pub struct DelegateRegistry<H> {
    entries: Vec<Entry<H>>,
    index: HashMap<(String, String), usize>,
}

impl<H> Default for DelegateRegistry<H> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<H> DelegateRegistry<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, event_type: &str, selector: &str, handler: DelegateHandler<H>) {
        let key = (event_type.to_string(), selector.to_string());
        if let Some(entry) = self.index.get(&key).and_then(|&i| self.entries.get_mut(i)) {
            entry.handler = handler;
            return;
        }
        self.index.insert(key, self.entries.len());
        self.entries.push(Entry {
            event_type: event_type.to_string(),
            selector: selector.to_string(),
            handler,
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered event types, deduplicated, in registration order.
    pub fn event_types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = Vec::new();
        for entry in &self.entries {
            if !types.contains(&entry.event_type.as_str()) {
                types.push(&entry.event_type);
            }
        }
        types
    }
}

/// Split `"click tr"` into `("click", "tr")`.
fn split_base(base: &str) -> Result<(&str, &str)> {
    let base = base.trim();
    let (event_type, rest) = base.split_once(char::is_whitespace).unwrap_or((base, ""));
    if event_type.is_empty() {
        return Err(GridError::Selector("empty event type".into()));
    }
    Ok((event_type, rest.trim()))
}

fn join_selector(base: &str, sub: &str) -> String {
    match (base.is_empty(), sub.trim().is_empty()) {
        (true, _) => sub.trim().to_string(),
        (false, true) => base.to_string(),
        (false, false) => format!("{base} {}", sub.trim()),
    }
}

impl<B: DomBackend> PaneBody<B> {
    /// Register delegated handlers under `base` (`"<event> [selector]"`).
    ///
    /// Each entry's selector is appended to the base selector. Every combined
    /// selector is validated before anything is registered.
    pub fn attach_table_event(&mut self, base: &str, events: &[TableEvent<B::Handle>]) -> Result<()> {
        let (event_type, base_selector) = split_base(base)?;
        let mut resolved = Vec::with_capacity(events.len());
        for event in events {
            let selector = join_selector(base_selector, &event.selector);
            if selector.is_empty() {
                return Err(GridError::Selector(format!("no selector for '{event_type}'")));
            }
            SelectorList::parse(&selector)?;
            resolved.push((selector, Rc::clone(&event.handler)));
        }
        for (selector, handler) in resolved {
            tracing::debug!(side = %self.side, event_type, %selector, "attach table event");
            self.delegates.insert(event_type, &selector, handler);
        }
        Ok(())
    }

    pub fn delegates(&self) -> &DelegateRegistry<B::Handle> {
        &self.delegates
    }

    /// Handlers matching a native `event_type` dispatched to `target`.
    ///
    /// Matching stops at the table container; targets outside it resolve
    /// to nothing.
    pub fn resolve_delegates(
        &self,
        dom: &B,
        event_type: &str,
        target: &B::Handle,
    ) -> Result<Vec<DelegateMatch<B::Handle>>> {
        let Some(containers) = self.containers.as_ref() else {
            return Ok(Vec::new());
        };
        let mut matches = Vec::new();
        for entry in self
            .delegates
            .entries
            .iter()
            .filter(|e| e.event_type == event_type)
        {
            if let Some(matched) = dom.closest_within(target, &entry.selector, &containers.inner)? {
                matches.push(DelegateMatch {
                    event: DelegatedEvent {
                        event_type: event_type.to_string(),
                        side: self.side,
                        target: target.clone(),
                        matched,
                    },
                    handler: Rc::clone(&entry.handler),
                });
            }
        }
        Ok(matches)
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
    fn test_split_base() {
        assert_eq!(split_base("click").unwrap(), ("click", ""));
        assert_eq!(split_base(" click  tr ").unwrap(), ("click", "tr"));
        assert_eq!(split_base("dblclick tbody tr").unwrap(), ("dblclick", "tbody tr"));
        assert!(split_base("   ").is_err());
    }

    #[test]
    fn test_join_selector() {
        assert_eq!(join_selector("tr", "td.grid-cell"), "tr td.grid-cell");
        assert_eq!(join_selector("", "tr"), "tr");
        assert_eq!(join_selector("tr", " "), "tr");
    }

    fn noop() -> DelegateHandler<u32> {
        Rc::new(|_: &DelegatedEvent<u32>| {})
    }

    #[test]
    fn test_registry_replaces_duplicate_key() {
        let mut registry: DelegateRegistry<u32> = DelegateRegistry::new();
        registry.insert("click", "tr", noop());
        registry.insert("click", "td", noop());
        registry.insert("click", "tr", noop());
        registry.insert("dblclick", "tr", noop());
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.event_types(), vec!["click", "dblclick"]);
    }
}
