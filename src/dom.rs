//! `PageDom` over the live browser document.

use slotsofchoice_core::{ChoiceError, ChoiceResult, PageDom};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, HtmlElement, HtmlInputElement, HtmlSelectElement, Node, ScrollBehavior,
    ScrollToOptions, Window,
};

/// Convert a rejected browser call into a `ChoiceError`.
pub fn js_error(err: JsValue) -> ChoiceError {
    let message = err
        .as_string()
        .or_else(|| err.dyn_ref::<js_sys::Error>().map(|e| String::from(e.message())))
        .unwrap_or_else(|| format!("{err:?}"));
    ChoiceError::Dom(message)
}

#[derive(Clone)]
pub struct WebDom {
    window: Window,
    document: Document,
}

impl WebDom {
    pub fn new() -> ChoiceResult<Self> {
        let window = web_sys::window().ok_or(ChoiceError::MissingGlobal("window"))?;
        let document = window
            .document()
            .ok_or(ChoiceError::MissingGlobal("document"))?;
        Ok(Self { window, document })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn body(&self) -> Option<Element> {
        self.document.body().map(Element::from)
    }

    /// First match for `selector` in the document.
    pub fn query(&self, selector: &str) -> ChoiceResult<Option<Element>> {
        self.document.query_selector(selector).map_err(js_error)
    }

    /// First match for `selector` below `root`.
    pub fn query_in(&self, root: &Element, selector: &str) -> ChoiceResult<Option<Element>> {
        root.query_selector(selector).map_err(js_error)
    }

    /// All matches for `selector`, below `root` or in the whole document.
    pub fn query_all(&self, root: Option<&Element>, selector: &str) -> ChoiceResult<Vec<Element>> {
        let list = match root {
            Some(root) => root.query_selector_all(selector),
            None => self.document.query_selector_all(selector),
        }
        .map_err(js_error)?;

        Ok((0..list.length())
            .filter_map(|i| list.get(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect())
    }

    pub fn page_y_offset(&self) -> f64 {
        self.window.page_y_offset().unwrap_or(0.0)
    }

    pub fn viewport_width(&self) -> f64 {
        self.window
            .inner_width()
            .ok()
            .and_then(|w| w.as_f64())
            .unwrap_or(0.0)
    }

    pub fn scroll_smoothly_to(&self, top: f64) {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(ScrollBehavior::Smooth);
        self.window.scroll_to_with_scroll_to_options(&options);
    }
}

impl PageDom for WebDom {
    type Node = Element;

    fn has_class(&self, node: &Element, class: &str) -> bool {
        node.class_list().contains(class)
    }

    fn set_class(&self, node: &Element, class: &str, present: bool) {
        if let Err(e) = node.class_list().toggle_with_force(class, present) {
            tracing::warn!(class, error = %js_error(e), "Failed to update class");
        }
    }

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn set_attribute(&self, node: &Element, name: &str, value: &str) -> ChoiceResult<()> {
        node.set_attribute(name, value).map_err(js_error)
    }

    fn is_displayed(&self, node: &Element) -> bool {
        node.dyn_ref::<HtmlElement>()
            .and_then(|el| el.style().get_property_value("display").ok())
            .map_or(true, |display| display != "none")
    }

    fn set_displayed(&self, node: &Element, displayed: bool) {
        let Some(el) = node.dyn_ref::<HtmlElement>() else {
            return;
        };
        let style = el.style();
        let result = if displayed {
            style.remove_property("display").map(|_| ())
        } else {
            style.set_property("display", "none")
        };
        if let Err(e) = result {
            tracing::warn!(displayed, error = %js_error(e), "Failed to update display");
        }
    }

    fn set_style(&self, node: &Element, property: &str, value: &str) {
        if let Some(el) = node.dyn_ref::<HtmlElement>() {
            if let Err(e) = el.style().set_property(property, value) {
                tracing::warn!(property, error = %js_error(e), "Failed to set style");
            }
        }
    }

    fn value(&self, node: &Element) -> Option<String> {
        if let Some(select) = node.dyn_ref::<HtmlSelectElement>() {
            return Some(select.value());
        }
        node.dyn_ref::<HtmlInputElement>().map(|input| input.value())
    }

    fn set_value(&self, node: &Element, value: &str) {
        if let Some(select) = node.dyn_ref::<HtmlSelectElement>() {
            select.set_value(value);
        } else if let Some(input) = node.dyn_ref::<HtmlInputElement>() {
            input.set_value(value);
        }
    }

    fn set_text(&self, node: &Element, text: &str) {
        node.set_text_content(Some(text));
    }

    fn contains(&self, ancestor: &Element, node: &Element) -> bool {
        let node: &Node = node;
        ancestor.contains(Some(node))
    }

    fn find_by_class(&self, root: &Element, class: &str) -> Option<Element> {
        root.get_elements_by_class_name(class).item(0)
    }

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn create_element(&self, tag: &str) -> ChoiceResult<Element> {
        self.document.create_element(tag).map_err(js_error)
    }

    fn append_child(&self, parent: &Element, child: &Element) -> ChoiceResult<()> {
        parent.append_child(child).map(|_| ()).map_err(js_error)
    }

    fn remove(&self, node: &Element) {
        node.remove();
    }

    fn offset_height(&self, node: &Element) -> f64 {
        node.dyn_ref::<HtmlElement>()
            .map_or(0.0, |el| f64::from(el.offset_height()))
    }

    fn document_top(&self, node: &Element) -> f64 {
        node.get_bounding_client_rect().top() + self.page_y_offset()
    }
}
