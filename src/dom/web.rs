//! Browser backend over `web-sys`.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement};

use crate::config::EngineCapabilities;
use crate::error::{GridError, Result};

use super::DomBackend;

fn js_err(context: &str, value: &JsValue) -> GridError {
    GridError::Dom(format!("{context}: {value:?}"))
}

fn document() -> Result<Document> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| GridError::Dom("no document".into()))
}

/// Live DOM of the current document.
#[derive(Debug, Clone)]
pub struct WebDom {
    document: Document,
}

impl WebDom {
    pub fn new() -> Result<Self> {
        Ok(Self {
            document: document()?,
        })
    }
}

impl DomBackend for WebDom {
    type Handle = Element;

    fn create_element(&mut self, tag: &str) -> Result<Element> {
        self.document
            .create_element(tag)
            .map_err(|e| js_err("create_element", &e))
    }

    fn append_child(&mut self, parent: &Element, child: &Element) -> Result<()> {
        parent
            .append_child(child)
            .map(|_| ())
            .map_err(|e| js_err("append_child", &e))
    }

    fn clear_children(&mut self, el: &Element) -> Result<()> {
        el.set_inner_html("");
        Ok(())
    }

    fn set_inner_html(&mut self, el: &Element, markup: &str) -> Result<()> {
        el.set_inner_html(markup);
        Ok(())
    }

    fn inner_html(&self, el: &Element) -> Result<String> {
        Ok(el.inner_html())
    }

    fn query(&self, el: &Element, selector: &str) -> Result<Option<Element>> {
        el.query_selector(selector)
            .map_err(|e| GridError::Selector(format!("{selector}: {e:?}")))
    }

    fn query_all(&self, el: &Element, selector: &str) -> Result<Vec<Element>> {
        let list = el
            .query_selector_all(selector)
            .map_err(|e| GridError::Selector(format!("{selector}: {e:?}")))?;
        Ok((0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect())
    }

    fn matches(&self, el: &Element, selector: &str) -> Result<bool> {
        el.matches(selector)
            .map_err(|e| GridError::Selector(format!("{selector}: {e:?}")))
    }

    fn parent(&self, el: &Element) -> Option<Element> {
        el.parent_element()
    }

    fn set_style(&mut self, el: &Element, property: &str, value: &str) -> Result<()> {
        let Some(html) = el.dyn_ref::<HtmlElement>() else {
            return Err(GridError::Dom(format!("<{}> has no inline style", el.tag_name())));
        };
        let style = html.style();
        if value.is_empty() {
            style
                .remove_property(property)
                .map(|_| ())
                .map_err(|e| js_err("remove_property", &e))
        } else {
            style
                .set_property(property, value)
                .map_err(|e| js_err("set_property", &e))
        }
    }

    fn style(&self, el: &Element, property: &str) -> Option<String> {
        let value = el
            .dyn_ref::<HtmlElement>()?
            .style()
            .get_property_value(property)
            .ok()?;
        (!value.is_empty()).then_some(value)
    }

    fn set_attribute(&mut self, el: &Element, name: &str, value: &str) -> Result<()> {
        el.set_attribute(name, value)
            .map_err(|e| js_err("set_attribute", &e))
    }

    fn attribute(&self, el: &Element, name: &str) -> Option<String> {
        el.get_attribute(name)
    }

    fn scroll_top(&self, el: &Element) -> f64 {
        f64::from(el.scroll_top())
    }

    fn scroll_left(&self, el: &Element) -> f64 {
        f64::from(el.scroll_left())
    }

    #[allow(clippy::cast_possible_truncation)]
    fn set_scroll_top(&mut self, el: &Element, value: f64) {
        el.set_scroll_top(value.round() as i32);
    }

    #[allow(clippy::cast_possible_truncation)]
    fn set_scroll_left(&mut self, el: &Element, value: f64) {
        el.set_scroll_left(value.round() as i32);
    }

    fn horizontal_scrollbar_height(&self, el: &Element) -> f64 {
        let Some(html) = el.dyn_ref::<HtmlElement>() else {
            return 0.0;
        };
        // offsetHeight counts both borders and the scrollbar, clientHeight neither.
        let borders = 2 * el.client_top();
        f64::from(html.offset_height() - el.client_height() - borders).max(0.0)
    }
}

/// Probe the current document for the engine quirks a pane cares about.
///
/// Falls back to the defaults when there is no document.
pub fn detect_capabilities() -> EngineCapabilities {
    let Ok(document) = document() else {
        return EngineCapabilities::default();
    };
    let box_sizing_quirk = document.compat_mode() == "BackCompat";
    let in_place_table_mutation = probe_tbody_mutation(&document).unwrap_or(false);
    tracing::debug!(box_sizing_quirk, in_place_table_mutation, "engine capabilities");
    EngineCapabilities {
        box_sizing_quirk,
        in_place_table_mutation,
    }
}

fn probe_tbody_mutation(document: &Document) -> Option<bool> {
    let table = document.create_element("table").ok()?;
    table.set_inner_html("<tbody></tbody>");
    let tbody = table.query_selector("tbody").ok()??;
    tbody.set_inner_html("<tr><td></td></tr>");
    Some(tbody.child_element_count() == 1)
}
