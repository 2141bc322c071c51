//! Canonical form of a content tree
//!
//! Markdown conversion leaves whitespace-only text between block elements.
//! Those nodes carry no meaning but would shift every structural index, so they
//! are dropped before slides are grouped or traces are assigned.

use super::node::{Element, Node, Root};

/// Returns a copy of `node` without whitespace-only text nodes, at any depth.
pub fn remove_blank_text_nodes(node: &Node) -> Node {
    match node {
        Node::Root(root) => Node::Root(Root {
            children: normalize_children(&root.children),
            position: root.position,
        }),
        Node::Element(element) => Node::Element(Element {
            children: normalize_children(&element.children),
            ..element.clone_shallow()
        }),
        Node::Text(_) | Node::Comment(_) | Node::Doctype => node.clone(),
    }
}

/// Normalizes a list of siblings.
pub fn normalize_children(children: &[Node]) -> Vec<Node> {
    children
        .iter()
        .filter(|child| !is_blank_text(child))
        .map(remove_blank_text_nodes)
        .collect()
}

fn is_blank_text(node: &Node) -> bool {
    matches!(node, Node::Text(text) if text.value.trim().is_empty())
}

impl Element {
    /// Copy of the element without its children.
    pub(crate) fn clone_shallow(&self) -> Element {
        Element {
            tag_name: self.tag_name.clone(),
            properties: self.properties.clone(),
            children: Vec::new(),
            position: self.position,
            wrapper: self.wrapper.clone(),
        }
    }
}
