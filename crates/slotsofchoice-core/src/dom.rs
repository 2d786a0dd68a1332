//! Document access seam.
//!
//! Behaviors never talk to a browser directly. They go through [`PageDom`],
//! which the browser crate implements over `web_sys` and tests implement with
//! [`MemoryDom`](crate::memory::MemoryDom).

use std::fmt::Debug;

use crate::error::ChoiceResult;

/// Node-level operations the page behaviors need.
///
/// Handles are cheap to clone and compare by identity.
pub trait PageDom {
    type Node: Clone + PartialEq + Debug;

    fn has_class(&self, node: &Self::Node, class: &str) -> bool;

    /// Add (`present = true`) or remove a class.
    fn set_class(&self, node: &Self::Node, class: &str, present: bool);

    /// Flip a class and return whether it is now present.
    fn toggle_class(&self, node: &Self::Node, class: &str) -> bool {
        let present = !self.has_class(node, class);
        self.set_class(node, class, present);
        present
    }

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;

    fn set_attribute(&self, node: &Self::Node, name: &str, value: &str) -> ChoiceResult<()>;

    /// False when the inline style hides the node (`display: none`).
    fn is_displayed(&self, node: &Self::Node) -> bool;

    /// Clear the inline `display` or set it to `none`.
    fn set_displayed(&self, node: &Self::Node, displayed: bool);

    fn set_style(&self, node: &Self::Node, property: &str, value: &str);

    /// Current value of a form control, `None` for other elements.
    fn value(&self, node: &Self::Node) -> Option<String>;

    fn set_value(&self, node: &Self::Node, value: &str);

    fn set_text(&self, node: &Self::Node, text: &str);

    /// Inclusive containment, like `Node.contains`.
    fn contains(&self, ancestor: &Self::Node, node: &Self::Node) -> bool;

    /// First descendant carrying `class`.
    fn find_by_class(&self, root: &Self::Node, class: &str) -> Option<Self::Node>;

    fn element_by_id(&self, id: &str) -> Option<Self::Node>;

    fn create_element(&self, tag: &str) -> ChoiceResult<Self::Node>;

    fn append_child(&self, parent: &Self::Node, child: &Self::Node) -> ChoiceResult<()>;

    /// Detach a node from its parent.
    fn remove(&self, node: &Self::Node);

    /// Rendered height, zero when unknown.
    fn offset_height(&self, node: &Self::Node) -> f64;

    /// Distance from the top of the document to the node's top edge.
    fn document_top(&self, node: &Self::Node) -> f64;
}

/// Attribute name backing a `dataset` key: `bonusType` -> `data-bonus-type`.
///
/// Dashed keys pass through, so `bonus-type` also reads `data-bonus-type`.
/// The browser's `dataset["bonus-type"]` is `undefined` instead, which would
/// never match.
pub fn dataset_attribute(key: &str) -> String {
    let mut name = String::with_capacity(key.len() + 8);
    name.push_str("data-");
    for ch in key.chars() {
        if ch.is_ascii_uppercase() {
            name.push('-');
            name.push(ch.to_ascii_lowercase());
        } else {
            name.push(ch);
        }
    }
    name
}

/// Read a card's `dataset` entry for a filter dimension.
pub fn dataset_value<D: PageDom>(dom: &D, node: &D::Node, key: &str) -> Option<String> {
    dom.attribute(node, &dataset_attribute(key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dataset_attribute_kebab_cases_keys() {
        assert_eq!(dataset_attribute("provider"), "data-provider");
        assert_eq!(dataset_attribute("bonusType"), "data-bonus-type");
        assert_eq!(dataset_attribute("minDepositUsd"), "data-min-deposit-usd");
    }

    #[test]
    fn dashed_keys_pass_through() {
        assert_eq!(dataset_attribute("bonus-type"), "data-bonus-type");
    }
}
