//! Arena-backed document tree.
//!
//! [`Document`] models the slice of the browser DOM the client touches: elements
//! with a tag, attributes, class list, own text and form value, arranged in a
//! parent/children tree rooted at `body`. Nodes are addressed by [`NodeId`] and are
//! never freed; a removed node is simply detached and may be re-inserted later,
//! which is exactly what the review view does with a selected card.
//!
//! A `Document` lives for one page load, so the arena grows with every node the
//! page ever creates, detached ones included (each search adds its cards and the
//! previous ones stay behind). Slots are not reused: a [`NodeId`] held by a
//! controller must keep naming the same element until the page is discarded.
//!
//! Structural edits follow DOM semantics: appending or inserting a node that
//! already has a parent moves it, and setting text replaces the element's children.

use super::element::Element;
use crate::domain::error::{ClientError, Result};
use std::collections::BTreeMap;

/// Class that hides an element.
pub const HIDDEN: &str = "hidden";

/// Handle to one element of a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone, Default)]
struct Node {
    tag: String,
    attrs: BTreeMap<String, String>,
    classes: Vec<String>,
    text: String,
    value: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// In-memory document tree.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    body: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Creates a document containing only an empty `body`.
    #[must_use]
    pub fn new() -> Self {
        let body = Node {
            tag: "body".to_string(),
            ..Node::default()
        };
        Self {
            nodes: vec![body],
            body: NodeId(0),
        }
    }

    #[must_use]
    pub const fn body(&self) -> NodeId {
        self.body
    }

    /// Creates a detached element.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.nodes.push(Node {
            tag: tag.to_string(),
            ..Node::default()
        });
        NodeId(self.nodes.len() - 1)
    }

    /// Builds a detached subtree from a fragment and returns its root.
    pub fn instantiate(&mut self, element: &Element) -> NodeId {
        let id = self.create_element(&element.tag);
        {
            let node = &mut self.nodes[id.0];
            node.attrs.clone_from(&element.attrs);
            node.classes.clone_from(&element.classes);
            node.text.clone_from(&element.text);
            node.value.clone_from(&element.value);
        }
        for child in &element.children {
            let child_id = self.instantiate(child);
            self.nodes[child_id.0].parent = Some(id);
            self.nodes[id.0].children.push(child_id);
        }
        id
    }

    /// Builds a fragment and appends it to `parent`.
    ///
    /// # Errors
    ///
    /// Returns an error if `parent` does not belong to this document.
    pub fn mount(&mut self, parent: NodeId, element: &Element) -> Result<NodeId> {
        self.check(parent)?;
        let id = self.instantiate(element);
        self.append_child(parent, id)?;
        Ok(id)
    }

    fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    fn check(&self, id: NodeId) -> Result<()> {
        if id.0 < self.nodes.len() {
            Ok(())
        } else {
            Err(ClientError::Dom(format!("unknown node {}", id.0)))
        }
    }

    /// Number of elements ever created, `body` included.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn exists(&self, id: NodeId) -> bool {
        id.0 < self.nodes.len()
    }

    #[must_use]
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        self.node(id).map(|n| n.tag.as_str())
    }

    #[must_use]
    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.node(id)?.attrs.get(name).map(String::as_str)
    }

    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) {
        if let Some(node) = self.node_mut(id) {
            node.attrs.insert(name.to_string(), value.to_string());
        }
    }

    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id)?.parent
    }

    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map_or(&[], |n| n.children.as_slice())
    }

    /// The node following `id` under the same parent.
    #[must_use]
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let siblings = self.children(self.parent(id)?);
        let index = siblings.iter().position(|&c| c == id)?;
        siblings.get(index + 1).copied()
    }

    /// Whether `ancestor` is `id` or one of its ancestors.
    #[must_use]
    pub fn contains(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.parent(node);
        }
        false
    }

    /// Whether the node is attached to the document body.
    #[must_use]
    pub fn is_connected(&self, id: NodeId) -> bool {
        self.contains(self.body, id)
    }

    /// Detaches a node from its parent. No-op for detached nodes.
    pub fn remove(&mut self, id: NodeId) {
        let Some(parent) = self.parent(id) else {
            return;
        };
        if let Some(node) = self.node_mut(parent) {
            node.children.retain(|&c| c != id);
        }
        if let Some(node) = self.node_mut(id) {
            node.parent = None;
        }
    }

    fn check_insertable(&self, parent: NodeId, child: NodeId) -> Result<()> {
        self.check(parent)?;
        self.check(child)?;
        if self.contains(child, parent) {
            return Err(ClientError::Dom(format!(
                "node {} cannot be inserted into its own subtree",
                child.0
            )));
        }
        Ok(())
    }

    /// Appends `child` as the last child of `parent`, moving it if attached elsewhere.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown nodes or if `child` contains `parent`.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.check_insertable(parent, child)?;
        self.remove(child);
        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);
        Ok(())
    }

    /// Inserts `child` under `parent` immediately before `reference`.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown nodes, if `child` contains `parent`, or if
    /// `reference` is not a child of `parent`.
    pub fn insert_before(&mut self, parent: NodeId, child: NodeId, reference: NodeId) -> Result<()> {
        self.check_insertable(parent, child)?;
        if child == reference {
            return Ok(());
        }
        if self.parent(reference) != Some(parent) {
            return Err(ClientError::Dom(format!(
                "node {} is not a child of node {}",
                reference.0, parent.0
            )));
        }
        self.remove(child);
        let siblings = &mut self.nodes[parent.0].children;
        let index = siblings
            .iter()
            .position(|&c| c == reference)
            .unwrap_or(siblings.len());
        siblings.insert(index, child);
        self.nodes[child.0].parent = Some(parent);
        Ok(())
    }

    /// Detaches every child of `id`.
    pub fn clear_children(&mut self, id: NodeId) {
        let children = self.children(id).to_vec();
        for child in children {
            self.remove(child);
        }
    }

    /// Replaces the element's children with plain text, like assigning `innerText`.
    pub fn set_text(&mut self, id: NodeId, text: &str) {
        self.clear_children(id);
        if let Some(node) = self.node_mut(id) {
            node.text = text.to_string();
        }
    }

    /// The element's own text, excluding descendants.
    #[must_use]
    pub fn text(&self, id: NodeId) -> &str {
        self.node(id).map_or("", |n| n.text.as_str())
    }

    /// Own text followed by the text of every descendant, in document order.
    #[must_use]
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = self.text(id).to_string();
        for child in self.descendants(id) {
            out.push_str(self.text(child));
        }
        out
    }

    #[must_use]
    pub fn value(&self, id: NodeId) -> &str {
        self.node(id).map_or("", |n| n.value.as_str())
    }

    pub fn set_value(&mut self, id: NodeId, value: &str) {
        if let Some(node) = self.node_mut(id) {
            node.value = value.to_string();
        }
    }

    #[must_use]
    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.node(id).is_some_and(|n| n.classes.iter().any(|c| c == class))
    }

    pub fn add_class(&mut self, id: NodeId, class: &str) {
        if self.has_class(id, class) {
            return;
        }
        if let Some(node) = self.node_mut(id) {
            node.classes.push(class.to_string());
        }
    }

    pub fn remove_class(&mut self, id: NodeId, class: &str) {
        if let Some(node) = self.node_mut(id) {
            node.classes.retain(|c| c != class);
        }
    }

    /// Flips a class and returns whether it is now present.
    pub fn toggle_class(&mut self, id: NodeId, class: &str) -> bool {
        if self.has_class(id, class) {
            self.remove_class(id, class);
            false
        } else {
            self.add_class(id, class);
            true
        }
    }

    pub fn hide(&mut self, id: NodeId) {
        self.add_class(id, HIDDEN);
    }

    pub fn show(&mut self, id: NodeId) {
        self.remove_class(id, HIDDEN);
    }

    #[must_use]
    pub fn is_hidden(&self, id: NodeId) -> bool {
        self.has_class(id, HIDDEN)
    }

    /// Every node below `root`, depth-first in document order.
    #[must_use]
    pub fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(root).iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }
        out
    }

    /// First connected element whose `id` attribute equals `id`.
    #[must_use]
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.descendants(self.body)
            .into_iter()
            .find(|&n| self.attr(n, "id") == Some(id))
    }

    /// First descendant of `root` carrying `class`.
    #[must_use]
    pub fn query_class(&self, root: NodeId, class: &str) -> Option<NodeId> {
        self.descendants(root)
            .into_iter()
            .find(|&n| self.has_class(n, class))
    }

    /// Every descendant of `root` carrying `class`.
    #[must_use]
    pub fn query_all_class(&self, root: NodeId, class: &str) -> Vec<NodeId> {
        self.descendants(root)
            .into_iter()
            .filter(|&n| self.has_class(n, class))
            .collect()
    }

    /// Finds the first descendant field named `name` (an `input`, `textarea` or
    /// `select`).
    #[must_use]
    pub fn field(&self, form: NodeId, name: &str) -> Option<NodeId> {
        self.descendants(form)
            .into_iter()
            .find(|&n| self.is_field(n) && self.attr(n, "name") == Some(name))
    }

    fn is_field(&self, id: NodeId) -> bool {
        matches!(self.tag(id), Some("input" | "textarea" | "select"))
    }

    /// Serializes a form's named fields in document order.
    #[must_use]
    pub fn form_payload(&self, form: NodeId) -> super::FormPayload {
        self.descendants(form)
            .into_iter()
            .filter(|&n| self.is_field(n))
            .filter_map(|n| {
                self.attr(n, "name")
                    .map(|name| (name.to_string(), self.value(n).to_string()))
            })
            .collect()
    }
}
