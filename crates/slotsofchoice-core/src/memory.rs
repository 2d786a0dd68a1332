//! In-memory document.
//!
//! A small arena of elements implementing [`PageDom`], so page behaviors can
//! be exercised without a browser.
//!
//! ```
//! use slotsofchoice_core::memory::MemoryDom;
//! use slotsofchoice_core::PageDom;
//!
//! let dom = MemoryDom::new();
//! let grid = dom.element("div", &["casino-grid"]);
//! let card = dom.element("article", &["casino-card"]);
//! dom.set_attr(card, "data-provider", "Acme, Beta");
//! dom.append(grid, card);
//!
//! assert!(dom.contains(&grid, &card));
//! ```

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};

use crate::dom::PageDom;
use crate::error::{ChoiceError, ChoiceResult};

/// Handle into a [`MemoryDom`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Default)]
struct NodeData {
    tag: String,
    classes: BTreeSet<String>,
    attributes: BTreeMap<String, String>,
    style: BTreeMap<String, String>,
    value: Option<String>,
    text: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    top: f64,
    height: f64,
}

/// Arena-backed document. Interior mutability mirrors the shared,
/// single-threaded browser document.
#[derive(Debug, Default)]
pub struct MemoryDom {
    nodes: RefCell<Vec<NodeData>>,
}

impl MemoryDom {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a detached element with the given classes.
    pub fn element(&self, tag: &str, classes: &[&str]) -> NodeId {
        let mut nodes = self.nodes.borrow_mut();
        nodes.push(NodeData {
            tag: tag.to_string(),
            classes: classes.iter().map(|c| c.to_string()).collect(),
            ..NodeData::default()
        });
        NodeId(nodes.len() - 1)
    }

    /// Create a form control (select/input) holding `value`.
    pub fn control(&self, tag: &str, classes: &[&str], value: &str) -> NodeId {
        let id = self.element(tag, classes);
        self.nodes.borrow_mut()[id.0].value = Some(value.to_string());
        id
    }

    pub fn set_attr(&self, node: NodeId, name: &str, value: &str) {
        self.nodes.borrow_mut()[node.0]
            .attributes
            .insert(name.to_string(), value.to_string());
    }

    /// Append `child` to `parent`, detaching it from any previous parent.
    pub fn append(&self, parent: NodeId, child: NodeId) {
        self.detach(child);
        let mut nodes = self.nodes.borrow_mut();
        nodes[child.0].parent = Some(parent);
        nodes[parent.0].children.push(child);
    }

    pub fn set_geometry(&self, node: NodeId, top: f64, height: f64) {
        let mut nodes = self.nodes.borrow_mut();
        nodes[node.0].top = top;
        nodes[node.0].height = height;
    }

    pub fn tag(&self, node: NodeId) -> String {
        self.nodes.borrow()[node.0].tag.clone()
    }

    pub fn text(&self, node: NodeId) -> String {
        self.nodes.borrow()[node.0].text.clone()
    }

    pub fn style(&self, node: NodeId, property: &str) -> Option<String> {
        self.nodes.borrow()[node.0].style.get(property).cloned()
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.borrow()[node.0].parent
    }

    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.nodes.borrow()[node.0].children.clone()
    }

    /// All descendants of `root` carrying `class`, in document order.
    pub fn descendants_with_class(&self, root: NodeId, class: &str) -> Vec<NodeId> {
        let nodes = self.nodes.borrow();
        let mut found = Vec::new();
        let mut stack: Vec<NodeId> = nodes[root.0].children.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            if nodes[id.0].classes.contains(class) {
                found.push(id);
            }
            stack.extend(nodes[id.0].children.iter().rev().copied());
        }
        found
    }

    fn detach(&self, node: NodeId) {
        let mut nodes = self.nodes.borrow_mut();
        if let Some(parent) = nodes[node.0].parent.take() {
            nodes[parent.0].children.retain(|c| *c != node);
        }
    }
}

impl PageDom for MemoryDom {
    type Node = NodeId;

    fn has_class(&self, node: &NodeId, class: &str) -> bool {
        self.nodes.borrow()[node.0].classes.contains(class)
    }

    fn set_class(&self, node: &NodeId, class: &str, present: bool) {
        let mut nodes = self.nodes.borrow_mut();
        let classes = &mut nodes[node.0].classes;
        if present {
            classes.insert(class.to_string());
        } else {
            classes.remove(class);
        }
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        self.nodes.borrow()[node.0].attributes.get(name).cloned()
    }

    fn set_attribute(&self, node: &NodeId, name: &str, value: &str) -> ChoiceResult<()> {
        self.set_attr(*node, name, value);
        Ok(())
    }

    fn is_displayed(&self, node: &NodeId) -> bool {
        self.nodes.borrow()[node.0]
            .style
            .get("display")
            .map_or(true, |d| d != "none")
    }

    fn set_displayed(&self, node: &NodeId, displayed: bool) {
        let mut nodes = self.nodes.borrow_mut();
        let style = &mut nodes[node.0].style;
        if displayed {
            style.remove("display");
        } else {
            style.insert("display".to_string(), "none".to_string());
        }
    }

    fn set_style(&self, node: &NodeId, property: &str, value: &str) {
        self.nodes.borrow_mut()[node.0]
            .style
            .insert(property.to_string(), value.to_string());
    }

    fn value(&self, node: &NodeId) -> Option<String> {
        self.nodes.borrow()[node.0].value.clone()
    }

    fn set_value(&self, node: &NodeId, value: &str) {
        let mut nodes = self.nodes.borrow_mut();
        if let Some(current) = nodes[node.0].value.as_mut() {
            *current = value.to_string();
        }
    }

    fn set_text(&self, node: &NodeId, text: &str) {
        self.nodes.borrow_mut()[node.0].text = text.to_string();
    }

    fn contains(&self, ancestor: &NodeId, node: &NodeId) -> bool {
        let nodes = self.nodes.borrow();
        let mut current = Some(*node);
        while let Some(id) = current {
            if id == *ancestor {
                return true;
            }
            current = nodes[id.0].parent;
        }
        false
    }

    fn find_by_class(&self, root: &NodeId, class: &str) -> Option<NodeId> {
        self.descendants_with_class(*root, class).into_iter().next()
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        let nodes = self.nodes.borrow();
        nodes
            .iter()
            .position(|n| n.attributes.get("id").is_some_and(|v| v == id))
            .map(NodeId)
    }

    fn create_element(&self, tag: &str) -> ChoiceResult<NodeId> {
        if tag.is_empty() {
            return Err(ChoiceError::Dom("empty tag name".to_string()));
        }
        Ok(self.element(tag, &[]))
    }

    fn append_child(&self, parent: &NodeId, child: &NodeId) -> ChoiceResult<()> {
        if self.contains(child, parent) {
            return Err(ChoiceError::Dom("cannot append an ancestor".to_string()));
        }
        self.append(*parent, *child);
        Ok(())
    }

    fn remove(&self, node: &NodeId) {
        self.detach(*node);
    }

    fn offset_height(&self, node: &NodeId) -> f64 {
        self.nodes.borrow()[node.0].height
    }

    fn document_top(&self, node: &NodeId) -> f64 {
        self.nodes.borrow()[node.0].top
    }
}
