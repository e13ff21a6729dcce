//! In-memory DOM used outside the browser.
//!
//! Elements live in an arena addressed by [`NodeId`]. Markup is parsed as
//! well-formed XHTML with quick-xml; replacing content frees the old subtree,
//! so handles into it become stale and fail with [`GridError::Dom`].
//!
//! Freed slots are recycled. Each slot carries a generation that is bumped on
//! free, so a handle to a reused slot still reads as stale.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::selector::{SelectorList, SelectorTarget};
use super::DomBackend;
use crate::error::{GridError, Result};
use crate::markup::{escape_attr, escape_text};

/// Elements serialized without a closing tag when they have no children.
const VOID_ELEMENTS: &[&str] = &["col", "br", "img", "input", "hr"];

/// Handle to a node in a [`MemoryDom`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    index: usize,
    generation: u32,
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}v{}", self.index, self.generation)
    }
}

#[derive(Debug, Clone)]
enum NodeKind {
    Element {
        tag: String,
        attrs: Vec<(String, String)>,
        style: Vec<(String, String)>,
    },
    Text(String),
}

#[derive(Debug, Clone)]
struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    scroll_top: f64,
    scroll_left: f64,
    scrollbar_height: f64,
}

impl Node {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            parent: None,
            children: Vec::new(),
            scroll_top: 0.0,
            scroll_left: 0.0,
            scrollbar_height: 0.0,
        }
    }
}

#[derive(Debug, Clone, Default)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

/// Arena-backed element tree.
#[derive(Debug, Clone, Default)]
pub struct MemoryDom {
    slots: Vec<Slot>,
    /// Indices of vacated slots, reused before the arena grows.
    free: Vec<usize>,
    /// Count of structural mutations (content replacement, append, clear).
    mutations: usize,
}

/// Borrowed view of one element for selector matching.
#[derive(Clone, Copy)]
struct NodeRef<'a> {
    dom: &'a MemoryDom,
    id: NodeId,
}

impl SelectorTarget for NodeRef<'_> {
    fn tag_name(&self) -> &str {
        match self.dom.node(self.id).map(|n| &n.kind) {
            Some(NodeKind::Element { tag, .. }) => tag.as_str(),
            _ => "",
        }
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        match self.dom.node(self.id).map(|n| &n.kind) {
            Some(NodeKind::Element { attrs, .. }) => attrs
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.as_str()),
            _ => None,
        }
    }

    fn parent_element(&self) -> Option<Self> {
        self.dom.node(self.id)?.parent.map(|id| NodeRef {
            dom: self.dom,
            id,
        })
    }
}

fn parse_style(text: &str) -> Vec<(String, String)> {
    text.split(';')
        .filter_map(|decl| {
            let (prop, value) = decl.split_once(':')?;
            let prop = prop.trim();
            let value = value.trim();
            (!prop.is_empty() && !value.is_empty())
                .then(|| (prop.to_ascii_lowercase(), value.to_string()))
        })
        .collect()
}

fn format_style(style: &[(String, String)]) -> String {
    style
        .iter()
        .map(|(k, v)| format!("{k}:{v}"))
        .collect::<Vec<_>>()
        .join(";")
}

impl MemoryDom {
    pub fn new() -> Self {
        Self::default()
    }

    fn node(&self, id: NodeId) -> Option<&Node> {
        self.slots
            .get(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.slots
            .get_mut(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
    }

    fn live(&self, id: NodeId) -> Result<&Node> {
        self.node(id)
            .ok_or_else(|| GridError::Dom(format!("stale node handle {id}")))
    }

    fn live_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.node_mut(id)
            .ok_or_else(|| GridError::Dom(format!("stale node handle {id}")))
    }

    fn alloc(&mut self, kind: NodeKind) -> NodeId {
        let node = Some(Node::new(kind));
        if let Some(index) = self.free.pop() {
            if let Some(slot) = self.slots.get_mut(index) {
                slot.node = node;
                return NodeId {
                    index,
                    generation: slot.generation,
                };
            }
        }
        self.slots.push(Slot {
            generation: 0,
            node,
        });
        NodeId {
            index: self.slots.len() - 1,
            generation: 0,
        }
    }

    fn attach(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.live_mut(child)?.parent = Some(parent);
        self.live_mut(parent)?.children.push(child);
        Ok(())
    }

    fn detach(&mut self, child: NodeId) {
        let Some(parent) = self.node(child).and_then(|n| n.parent) else {
            return;
        };
        if let Some(p) = self.node_mut(parent) {
            p.children.retain(|c| *c != child);
        }
        if let Some(c) = self.node_mut(child) {
            c.parent = None;
        }
    }

    /// Free `id` and everything below it.
    fn free_subtree(&mut self, id: NodeId) {
        let mut pending = vec![id];
        while let Some(next) = pending.pop() {
            let Some(slot) = self
                .slots
                .get_mut(next.index)
                .filter(|slot| slot.generation == next.generation)
            else {
                continue;
            };
            if let Some(node) = slot.node.take() {
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(next.index);
                pending.extend(node.children);
            }
        }
    }

    fn free_children(&mut self, id: NodeId) -> Result<()> {
        let children = std::mem::take(&mut self.live_mut(id)?.children);
        for child in children {
            self.free_subtree(child);
        }
        Ok(())
    }

    fn element_from(&mut self, start: &BytesStart<'_>) -> Result<NodeId> {
        let tag = std::str::from_utf8(start.name().as_ref())
            .map_err(|e| GridError::Markup(e.to_string()))?
            .to_ascii_lowercase();
        let mut attrs = Vec::new();
        let mut style = Vec::new();
        for attr in start.attributes() {
            let attr = attr?;
            let key = std::str::from_utf8(attr.key.as_ref())
                .map_err(|e| GridError::Markup(e.to_string()))?
                .to_ascii_lowercase();
            let value = attr.unescape_value()?.into_owned();
            if key == "style" {
                style = parse_style(&value);
            } else {
                attrs.push((key, value));
            }
        }
        Ok(self.alloc(NodeKind::Element { tag, attrs, style }))
    }

    /// Parse `markup` into children of the detached node `fragment`.
    fn parse_into(&mut self, fragment: NodeId, markup: &str) -> Result<()> {
        let mut reader = Reader::from_str(markup);
        let mut stack = vec![fragment];
        loop {
            let parent = stack.last().copied().unwrap_or(fragment);
            match reader.read_event()? {
                Event::Start(start) => {
                    let id = self.element_from(&start)?;
                    self.attach(parent, id)?;
                    stack.push(id);
                }
                Event::Empty(start) => {
                    let id = self.element_from(&start)?;
                    self.attach(parent, id)?;
                }
                Event::End(_) => {
                    if stack.len() <= 1 {
                        return Err(GridError::Markup("unexpected closing tag".into()));
                    }
                    stack.pop();
                }
                Event::Text(text) => {
                    let text = text.unescape()?.into_owned();
                    if !text.is_empty() {
                        let id = self.alloc(NodeKind::Text(text));
                        self.attach(parent, id)?;
                    }
                }
                Event::CData(data) => {
                    let text = String::from_utf8_lossy(&data).into_owned();
                    let id = self.alloc(NodeKind::Text(text));
                    self.attach(parent, id)?;
                }
                Event::Eof => break,
                _ => {}
            }
        }
        if stack.len() != 1 {
            return Err(GridError::Markup("unclosed element".into()));
        }
        Ok(())
    }

    fn write_node(&self, id: NodeId, out: &mut String) {
        let Some(node) = self.node(id) else {
            return;
        };
        match &node.kind {
            NodeKind::Text(text) => out.push_str(&escape_text(text)),
            NodeKind::Element { tag, attrs, style } => {
                out.push('<');
                out.push_str(tag);
                for (k, v) in attrs {
                    out.push_str(&format!(" {k}=\"{}\"", escape_attr(v)));
                }
                if !style.is_empty() {
                    out.push_str(&format!(" style=\"{}\"", escape_attr(&format_style(style))));
                }
                if node.children.is_empty() && VOID_ELEMENTS.contains(&tag.as_str()) {
                    out.push_str("/>");
                    return;
                }
                out.push('>');
                for child in &node.children {
                    self.write_node(*child, out);
                }
                out.push_str("</");
                out.push_str(tag);
                out.push('>');
            }
        }
    }

    fn selector(selector: &str) -> Result<SelectorList> {
        SelectorList::parse(selector)
    }

    fn is_element(&self, id: NodeId) -> bool {
        matches!(
            self.node(id).map(|n| &n.kind),
            Some(NodeKind::Element { .. })
        )
    }

    /// Descendant elements of `id` in document order.
    fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut pending: Vec<NodeId> = self
            .node(id)
            .map(|n| n.children.iter().rev().copied().collect())
            .unwrap_or_default();
        while let Some(next) = pending.pop() {
            if self.is_element(next) {
                out.push(next);
            }
            if let Some(node) = self.node(next) {
                pending.extend(node.children.iter().rev().copied());
            }
        }
        out
    }

    /// Serialized element including its own tag.
    pub fn outer_html(&self, id: NodeId) -> Result<String> {
        self.live(id)?;
        let mut out = String::new();
        self.write_node(id, &mut out);
        Ok(out)
    }

    /// Element children of `id`, skipping text nodes.
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.node(id)
            .map(|n| {
                n.children
                    .iter()
                    .copied()
                    .filter(|c| self.is_element(*c))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        match self.node(id).map(|n| &n.kind) {
            Some(NodeKind::Element { tag, .. }) => Some(tag.as_str()),
            _ => None,
        }
    }

    /// Concatenated text of every descendant text node.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        let mut pending = vec![id];
        while let Some(next) = pending.pop() {
            let Some(node) = self.node(next) else {
                continue;
            };
            if let NodeKind::Text(text) = &node.kind {
                out.push_str(text);
            }
            pending.extend(node.children.iter().rev().copied());
        }
        out
    }

    /// Whether the handle still refers to a live node.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    /// Number of slots in the arena, live or vacated.
    pub fn arena_len(&self) -> usize {
        self.slots.len()
    }

    /// Number of live nodes, attached or detached.
    pub fn live_nodes(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// Give `id` a horizontal scrollbar of `height` pixels, as a browser
    /// would once its content overflows horizontally.
    pub fn set_horizontal_scrollbar_height(&mut self, id: NodeId, height: f64) -> Result<()> {
        self.live_mut(id)?.scrollbar_height = height.max(0.0);
        Ok(())
    }

    /// Number of structural mutations performed so far.
    pub fn structural_mutations(&self) -> usize {
        self.mutations
    }
}

impl DomBackend for MemoryDom {
    type Handle = NodeId;

    fn create_element(&mut self, tag: &str) -> Result<NodeId> {
        Ok(self.alloc(NodeKind::Element {
            tag: tag.to_ascii_lowercase(),
            attrs: Vec::new(),
            style: Vec::new(),
        }))
    }

    fn append_child(&mut self, parent: &NodeId, child: &NodeId) -> Result<()> {
        self.live(*parent)?;
        self.live(*child)?;
        self.detach(*child);
        self.attach(*parent, *child)?;
        self.mutations += 1;
        Ok(())
    }

    fn clear_children(&mut self, el: &NodeId) -> Result<()> {
        self.free_children(*el)?;
        self.mutations += 1;
        Ok(())
    }

    fn set_inner_html(&mut self, el: &NodeId, markup: &str) -> Result<()> {
        self.live(*el)?;
        let fragment = self.alloc(NodeKind::Text(String::new()));
        if let Err(e) = self.parse_into(fragment, markup) {
            self.free_subtree(fragment);
            return Err(e);
        }
        self.free_children(*el)?;
        let parsed = self
            .node_mut(fragment)
            .map(|n| std::mem::take(&mut n.children))
            .unwrap_or_default();
        for child in parsed {
            self.attach(*el, child)?;
        }
        self.free_subtree(fragment);
        self.mutations += 1;
        Ok(())
    }

    fn inner_html(&self, el: &NodeId) -> Result<String> {
        let node = self.live(*el)?;
        let mut out = String::new();
        for child in &node.children {
            self.write_node(*child, &mut out);
        }
        Ok(out)
    }

    fn query(&self, el: &NodeId, selector: &str) -> Result<Option<NodeId>> {
        self.live(*el)?;
        let selector = Self::selector(selector)?;
        Ok(self
            .descendants(*el)
            .into_iter()
            .find(|id| selector.matches(&NodeRef { dom: self, id: *id })))
    }

    fn query_all(&self, el: &NodeId, selector: &str) -> Result<Vec<NodeId>> {
        self.live(*el)?;
        let selector = Self::selector(selector)?;
        Ok(self
            .descendants(*el)
            .into_iter()
            .filter(|id| selector.matches(&NodeRef { dom: self, id: *id }))
            .collect())
    }

    fn matches(&self, el: &NodeId, selector: &str) -> Result<bool> {
        self.live(*el)?;
        if !self.is_element(*el) {
            return Ok(false);
        }
        Ok(Self::selector(selector)?.matches(&NodeRef { dom: self, id: *el }))
    }

    fn parent(&self, el: &NodeId) -> Option<NodeId> {
        self.node(*el)?.parent
    }

    fn set_style(&mut self, el: &NodeId, property: &str, value: &str) -> Result<()> {
        let property = property.to_ascii_lowercase();
        let NodeKind::Element { style, .. } = &mut self.live_mut(*el)?.kind else {
            return Err(GridError::Dom("style on a text node".into()));
        };
        let existing = style.iter().position(|(k, _)| *k == property);
        match (existing, value.is_empty()) {
            (Some(i), true) => {
                style.remove(i);
            }
            (Some(i), false) => {
                if let Some(entry) = style.get_mut(i) {
                    entry.1 = value.to_string();
                }
            }
            (None, true) => {}
            (None, false) => style.push((property, value.to_string())),
        }
        Ok(())
    }

    fn style(&self, el: &NodeId, property: &str) -> Option<String> {
        match &self.node(*el)?.kind {
            NodeKind::Element { style, .. } => style
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(property))
                .map(|(_, v)| v.clone()),
            NodeKind::Text(_) => None,
        }
    }

    fn set_attribute(&mut self, el: &NodeId, name: &str, value: &str) -> Result<()> {
        let name = name.to_ascii_lowercase();
        let NodeKind::Element { attrs, style, .. } = &mut self.live_mut(*el)?.kind else {
            return Err(GridError::Dom("attribute on a text node".into()));
        };
        if name == "style" {
            *style = parse_style(value);
            return Ok(());
        }
        match attrs.iter_mut().find(|(k, _)| *k == name) {
            Some(entry) => entry.1 = value.to_string(),
            None => attrs.push((name, value.to_string())),
        }
        Ok(())
    }

    fn attribute(&self, el: &NodeId, name: &str) -> Option<String> {
        match &self.node(*el)?.kind {
            NodeKind::Element { style, .. } if name.eq_ignore_ascii_case("style") => {
                (!style.is_empty()).then(|| format_style(style))
            }
            NodeKind::Element { attrs, .. } => attrs
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(name))
                .map(|(_, v)| v.clone()),
            NodeKind::Text(_) => None,
        }
    }

    fn scroll_top(&self, el: &NodeId) -> f64 {
        self.node(*el).map_or(0.0, |n| n.scroll_top)
    }

    fn scroll_left(&self, el: &NodeId) -> f64 {
        self.node(*el).map_or(0.0, |n| n.scroll_left)
    }

    fn set_scroll_top(&mut self, el: &NodeId, value: f64) {
        if let Some(node) = self.node_mut(*el) {
            node.scroll_top = value.max(0.0);
        }
    }

    fn set_scroll_left(&mut self, el: &NodeId, value: f64) {
        if let Some(node) = self.node_mut(*el) {
            node.scroll_left = value.max(0.0);
        }
    }

    fn horizontal_scrollbar_height(&self, el: &NodeId) -> f64 {
        self.node(*el).map_or(0.0, |n| n.scrollbar_height)
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

    fn host() -> (MemoryDom, NodeId) {
        let mut dom = MemoryDom::new();
        let root = dom.create_element("div").unwrap();
        (dom, root)
    }

    #[test]
    fn test_inner_html_roundtrip() {
        let (mut dom, root) = host();
        let markup = r#"<table class="t"><colgroup><col style="width:80px"/></colgroup><tbody><tr key="1"><td>a &amp; b</td></tr></tbody></table>"#;
        dom.set_inner_html(&root, markup).unwrap();
        assert_eq!(dom.inner_html(&root).unwrap(), markup);
        assert_eq!(dom.structural_mutations(), 1);
    }

    #[test]
    fn test_style_attribute_is_parsed() {
        let (mut dom, root) = host();
        dom.set_inner_html(&root, r#"<div class="c" style="height: 40px; top:0px"></div>"#)
            .unwrap();
        let child = dom.query(&root, ".c").unwrap().unwrap();
        assert_eq!(dom.style(&child, "height").as_deref(), Some("40px"));
        dom.set_style(&child, "top", "").unwrap();
        dom.set_style(&child, "left", "3px").unwrap();
        assert_eq!(
            dom.attribute(&child, "style").as_deref(),
            Some("height:40px;left:3px")
        );
    }

    #[test]
    fn test_replacing_content_frees_old_nodes() {
        let (mut dom, root) = host();
        dom.set_inner_html(&root, "<tbody><tr></tr></tbody>").unwrap();
        let old = dom.query(&root, "tbody").unwrap().unwrap();
        dom.set_inner_html(&root, "<tbody></tbody>").unwrap();
        assert!(!dom.is_alive(old));
        assert!(matches!(dom.inner_html(&old), Err(GridError::Dom(_))));
        let new = dom.query(&root, "tbody").unwrap().unwrap();
        assert_ne!(old, new);
    }

    #[test]
    fn test_freed_slots_are_reused() {
        let (mut dom, root) = host();
        let markup = "<table><tbody><tr><td>a</td><td>b</td></tr></tbody></table>";
        dom.set_inner_html(&root, markup).unwrap();
        dom.set_inner_html(&root, markup).unwrap();
        let settled = dom.arena_len();
        let live = dom.live_nodes();
        for _ in 0..1000 {
            dom.set_inner_html(&root, markup).unwrap();
        }
        assert_eq!(dom.arena_len(), settled);
        assert_eq!(dom.live_nodes(), live);
        assert_eq!(dom.inner_html(&root).unwrap(), markup);
    }

    #[test]
    fn test_reused_slot_keeps_old_handle_stale() {
        let (mut dom, root) = host();
        dom.set_inner_html(&root, "<span></span>").unwrap();
        let old = dom.query(&root, "span").unwrap().unwrap();
        dom.clear_children(&root).unwrap();
        let fresh = dom.create_element("b").unwrap();
        assert_eq!(fresh.index, old.index);
        assert_ne!(fresh, old);
        assert!(!dom.is_alive(old));
        assert!(dom.is_alive(fresh));
        assert!(matches!(
            dom.set_style(&old, "top", "1px"),
            Err(GridError::Dom(_))
        ));
        assert_eq!(dom.tag_name(fresh), Some("b"));
    }

    #[test]
    fn test_malformed_markup_leaves_content() {
        let (mut dom, root) = host();
        dom.set_inner_html(&root, "<p>keep</p>").unwrap();
        assert!(matches!(
            dom.set_inner_html(&root, "<tr><td></tr>"),
            Err(GridError::Markup(_))
        ));
        assert!(matches!(
            dom.set_inner_html(&root, "<tr>"),
            Err(GridError::Markup(_))
        ));
        assert_eq!(dom.inner_html(&root).unwrap(), "<p>keep</p>");
    }

    #[test]
    fn test_query_all_document_order() {
        let (mut dom, root) = host();
        dom.set_inner_html(
            &root,
            r#"<colgroup><col name="a"/><col name="b"/></colgroup><div><col name="c"/></div>"#,
        )
        .unwrap();
        let names: Vec<_> = dom
            .query_all(&root, "col")
            .unwrap()
            .iter()
            .map(|c| dom.attribute(c, "name").unwrap())
            .collect();
        assert_eq!(names, vec!["a", "b", "c"]);
        assert_eq!(dom.query_all(&root, "colgroup col").unwrap().len(), 2);
    }

    #[test]
    fn test_closest_within_boundary() {
        let (mut dom, root) = host();
        dom.set_inner_html(
            &root,
            r#"<div class="box"><table><tbody><tr key="1"><td class="cell"><b>x</b></td></tr></tbody></table></div>"#,
        )
        .unwrap();
        let container = dom.query(&root, ".box").unwrap().unwrap();
        let bold = dom.query(&root, "b").unwrap().unwrap();
        let td = dom.query(&root, "td").unwrap().unwrap();
        assert_eq!(
            dom.closest_within(&bold, "td.cell", &container).unwrap(),
            Some(td)
        );
        assert_eq!(
            dom.closest_within(&bold, ".box", &container).unwrap(),
            None
        );
        let outside = dom.create_element("td").unwrap();
        assert_eq!(
            dom.closest_within(&outside, "td", &container).unwrap(),
            None
        );
    }

    #[test]
    fn test_append_moves_child() {
        let (mut dom, root) = host();
        let a = dom.create_element("div").unwrap();
        let b = dom.create_element("span").unwrap();
        dom.append_child(&root, &a).unwrap();
        dom.append_child(&a, &b).unwrap();
        dom.append_child(&root, &b).unwrap();
        assert_eq!(dom.children(root), vec![a, b]);
        assert!(dom.children(a).is_empty());
        assert_eq!(dom.parent(&b), Some(root));
    }

    #[test]
    fn test_scroll_offsets() {
        let (mut dom, root) = host();
        dom.set_scroll_top(&root, 120.0);
        dom.set_scroll_left(&root, -5.0);
        assert_eq!(dom.scroll_top(&root), 120.0);
        assert_eq!(dom.scroll_left(&root), 0.0);
    }

    #[test]
    fn test_text_content() {
        let (mut dom, root) = host();
        dom.set_inner_html(&root, "<tr><td>a</td><td>&lt;b&gt;</td></tr>")
            .unwrap();
        assert_eq!(dom.text_content(root), "a<b>");
        assert_eq!(dom.inner_html(&root).unwrap(), "<tr><td>a</td><td>&lt;b&gt;</td></tr>");
    }
}
