//! HTML serialization (content tree → HTML)
//!
//! Pipeline: content tree → RcDom handles → HTML string.
//!
//! Wrapper markers are written back as their class tokens, ahead of any class
//! the author gave the element, so the markup can be parsed into the same tree.

use super::parser::is_void_element;
use crate::error::PatchError;
use crate::tree::{Element, Node, Properties, WrapperMarker, RESERVED_ATTRIBUTE_PREFIX};
use html5ever::{
    ns, serialize, serialize::SerializeOpts, serialize::TraversalScope, Attribute, LocalName,
    QualName,
};
use markup5ever_rcdom::{Handle, Node as DomNode, NodeData, SerializableHandle};
use std::cell::{Cell, RefCell};
use std::default::Default;
use std::rc::Rc;

/// Render a node and its descendants as HTML.
pub fn node_to_html(node: &Node) -> Result<String, PatchError> {
    match node {
        Node::Root(root) => nodes_to_html(&root.children),
        _ => nodes_to_html(std::slice::from_ref(node)),
    }
}

/// Render a list of sibling nodes as HTML.
pub fn nodes_to_html(nodes: &[Node]) -> Result<String, PatchError> {
    let mut output = String::new();
    for node in nodes {
        if let Some(handle) = build_handle(node) {
            output.push_str(&serialize_handle(&handle)?);
        }
    }
    Ok(output)
}

/// Render `element`'s own tag as HTML around `interior`, which is kept verbatim.
///
/// `extra` attributes win over the element's own. Bookkeeping attributes
/// (`data-node-*`) and empty values are dropped. Void elements get no interior.
///
/// ```ignore
/// let p = Element::new("p");
/// let style = Properties::from([("style".into(), "color: blue;".into())]);
/// assert_eq!(render_with_html_head(&p, &style, "abc")?, r#"<p style="color: blue;">abc</p>"#);
/// ```
pub fn render_with_html_head(
    element: &Element,
    extra: &Properties,
    interior: &str,
) -> Result<String, PatchError> {
    let mut properties = element.properties.clone();
    properties.extend(extra.iter().map(|(name, value)| (name.clone(), value.clone())));
    properties.retain(|name, value| {
        !name.starts_with(RESERVED_ATTRIBUTE_PREFIX) && !value.trim().is_empty()
    });

    let head = create_element(
        &element.tag_name,
        ordered_attributes(element.wrapper.as_ref(), properties),
    );
    let html = serialize_handle(&head)?;
    if is_void_element(&element.tag_name) {
        return Ok(html);
    }

    let close = format!("</{}>", element.tag_name);
    let open = html.strip_suffix(close.as_str()).ok_or_else(|| {
        PatchError::SerializationError(format!(
            "Unexpected markup for <{}>: {html}",
            element.tag_name
        ))
    })?;
    Ok(format!("{open}{interior}{close}"))
}

/// Attribute list in output order: the class list first, wrapper tokens leading.
fn ordered_attributes(
    wrapper: Option<&WrapperMarker>,
    mut properties: Properties,
) -> Vec<(String, String)> {
    let mut classes = wrapper
        .map(WrapperMarker::class_tokens)
        .unwrap_or_default();
    if let Some(class) = properties.remove("class") {
        classes.extend(class.split_whitespace().map(str::to_string));
    }

    let mut attributes = Vec::with_capacity(properties.len() + 1);
    if !classes.is_empty() {
        attributes.push(("class".to_string(), classes.join(" ")));
    }
    attributes.extend(properties);
    attributes
}

fn build_handle(node: &Node) -> Option<Handle> {
    match node {
        Node::Element(element) => {
            let handle = create_element(
                &element.tag_name,
                ordered_attributes(element.wrapper.as_ref(), element.properties.clone()),
            );
            let children = element.children.iter().filter_map(build_handle);
            handle.children.borrow_mut().extend(children);
            Some(handle)
        }
        Node::Text(text) => Some(create_text(&text.value)),
        Node::Comment(comment) => Some(create_comment(&comment.value)),
        Node::Root(_) | Node::Doctype => None,
    }
}

fn create_element(tag: &str, attrs: Vec<(String, String)>) -> Handle {
    let qual_name = QualName::new(None, ns!(html), LocalName::from(tag));
    let attributes = attrs
        .into_iter()
        .map(|(name, value)| Attribute {
            name: QualName::new(None, ns!(), LocalName::from(name)),
            value: value.into(),
        })
        .collect();

    Rc::new(DomNode {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Element {
            name: qual_name,
            attrs: RefCell::new(attributes),
            template_contents: Default::default(),
            mathml_annotation_xml_integration_point: false,
        },
    })
}

fn create_text(text: &str) -> Handle {
    Rc::new(DomNode {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Text {
            contents: RefCell::new(text.to_string().into()),
        },
    })
}

fn create_comment(text: &str) -> Handle {
    Rc::new(DomNode {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Comment {
            contents: text.to_string().into(),
        },
    })
}

fn serialize_handle(handle: &Handle) -> Result<String, PatchError> {
    let mut output = Vec::new();
    let opts = SerializeOpts {
        traversal_scope: TraversalScope::IncludeNode,
        ..Default::default()
    };
    let serializable = SerializableHandle::from(handle.clone());
    serialize(&mut output, &serializable, opts)
        .map_err(|e| PatchError::SerializationError(format!("HTML serialization failed: {e}")))?;

    String::from_utf8(output)
        .map_err(|e| PatchError::SerializationError(format!("UTF-8 conversion failed: {e}")))
}
