//! DOM backend trait for pluggable render targets.
//!
//! Pane bodies never touch a browser API directly. They drive a
//! [`DomBackend`] through opaque element handles, so the same pane logic runs
//! against the in-memory [`MemoryDom`] (tests, CLI, benches) and against the
//! browser through `WebDom` on wasm32.

pub mod memory;
pub mod selector;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use memory::{MemoryDom, NodeId};
pub use selector::SelectorList;
#[cfg(target_arch = "wasm32")]
pub use web::WebDom;

use std::fmt::Debug;

use crate::error::Result;

/// Operations a pane body needs from its render target.
pub trait DomBackend: 'static {
    /// Cheap, cloneable reference to one element.
    type Handle: Clone + PartialEq + Debug + 'static;

    /// Create a detached element.
    fn create_element(&mut self, tag: &str) -> Result<Self::Handle>;

    /// Append `child` as the last child of `parent`, detaching it first.
    fn append_child(&mut self, parent: &Self::Handle, child: &Self::Handle) -> Result<()>;

    /// Remove every child of `el`.
    fn clear_children(&mut self, el: &Self::Handle) -> Result<()>;

    /// Replace the content of `el` with parsed `markup` in one mutation.
    fn set_inner_html(&mut self, el: &Self::Handle, markup: &str) -> Result<()>;

    /// Serialized content of `el`.
    fn inner_html(&self, el: &Self::Handle) -> Result<String>;

    /// First descendant of `el` matching `selector`, in document order.
    fn query(&self, el: &Self::Handle, selector: &str) -> Result<Option<Self::Handle>>;

    /// Every descendant of `el` matching `selector`, in document order.
    fn query_all(&self, el: &Self::Handle, selector: &str) -> Result<Vec<Self::Handle>>;

    /// Whether `el` itself matches `selector`.
    fn matches(&self, el: &Self::Handle, selector: &str) -> Result<bool>;

    fn parent(&self, el: &Self::Handle) -> Option<Self::Handle>;

    /// Set an inline style property. An empty value removes it.
    fn set_style(&mut self, el: &Self::Handle, property: &str, value: &str) -> Result<()>;

    fn style(&self, el: &Self::Handle, property: &str) -> Option<String>;

    fn set_attribute(&mut self, el: &Self::Handle, name: &str, value: &str) -> Result<()>;

    fn attribute(&self, el: &Self::Handle, name: &str) -> Option<String>;

    fn scroll_top(&self, el: &Self::Handle) -> f64;

    fn scroll_left(&self, el: &Self::Handle) -> f64;

    fn set_scroll_top(&mut self, el: &Self::Handle, value: f64);

    fn set_scroll_left(&mut self, el: &Self::Handle, value: f64);

    /// Height taken by `el`'s horizontal scrollbar, zero when it has none.
    fn horizontal_scrollbar_height(&self, el: &Self::Handle) -> f64;

    /// Nearest inclusive ancestor of `el` matching `selector`, stopping before
    /// `boundary`. Returns `None` when `el` is not inside `boundary`.
    fn closest_within(
        &self,
        el: &Self::Handle,
        selector: &str,
        boundary: &Self::Handle,
    ) -> Result<Option<Self::Handle>> {
        let mut matched = None;
        let mut current = Some(el.clone());
        while let Some(node) = current {
            if &node == boundary {
                return Ok(matched);
            }
            if matched.is_none() && self.matches(&node, selector)? {
                matched = Some(node.clone());
            }
            current = self.parent(&node);
        }
        Ok(None)
    }
}
