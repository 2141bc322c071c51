//! Removal of active content from raw HTML
//!
//! Slides embed user-authored HTML. Inline `style` attributes and `<style>`
//! elements are the whole point of the editor and stay; script-capable
//! elements, event handler attributes and `javascript:` URLs are dropped.

use super::node::{Element, Node, Root};

const DROPPED_ELEMENTS: &[&str] = &[
    "script", "iframe", "object", "embed", "frame", "frameset", "base", "meta",
];

const URL_ATTRIBUTES: &[&str] = &["href", "src", "action", "formaction", "xlink:href"];

/// Returns a copy of `node` with active content removed.
pub fn sanitize(node: &Node) -> Node {
    match node {
        Node::Root(root) => Node::Root(Root {
            children: sanitize_children(&root.children),
            position: root.position,
        }),
        Node::Element(element) => Node::Element(sanitize_element(element)),
        Node::Text(_) | Node::Comment(_) | Node::Doctype => node.clone(),
    }
}

fn sanitize_children(children: &[Node]) -> Vec<Node> {
    children
        .iter()
        .filter(|child| {
            !matches!(child, Node::Element(element)
                if DROPPED_ELEMENTS.contains(&element.tag_name.as_str()))
        })
        .map(sanitize)
        .collect()
}

fn sanitize_element(element: &Element) -> Element {
    let mut clean = element.clone_shallow();
    clean.properties.retain(|name, value| {
        if name.starts_with("on") {
            log::debug!("dropping event handler attribute {name} on <{}>", element.tag_name);
            return false;
        }
        !(URL_ATTRIBUTES.contains(&name.as_str()) && is_script_url(value))
    });
    clean.children = sanitize_children(&element.children);
    clean
}

fn is_script_url(value: &str) -> bool {
    let compact: String = value
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .collect();
    compact.to_ascii_lowercase().starts_with("javascript:")
}
