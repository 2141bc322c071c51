//! Core data structures for the content tree.
//!
//! The tree follows the usual element/text shape of HTML syntax trees: a root,
//! elements with a tag name, an attribute map and ordered children, and text
//! leaves. Every node may carry a [`Position`] pointing back into the markdown
//! source it was parsed from.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::Range;

/// Attribute map of an element. The `class` attribute holds space-separated tokens.
pub type Properties = BTreeMap<String, String>;

/// A single location in the markdown source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    /// 1-based line number
    pub line: usize,
    /// 1-based column, counted in bytes
    pub column: usize,
    /// 0-based byte offset
    pub offset: usize,
}

impl Point {
    pub fn new(line: usize, column: usize, offset: usize) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }
}

/// Source span of a node. `end` is exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub start: Point,
    pub end: Point,
}

impl Position {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Byte range covered in the source.
    pub fn range(&self) -> Range<usize> {
        self.start.offset..self.end.offset
    }
}

/// Which strategy produced a synthetic wrapper element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WrapperKind {
    /// The wrapper replaces a whole block and contains it
    Outer,
    /// The wrapper sits inside an element and holds its former children
    Inner,
}

impl WrapperKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            WrapperKind::Outer => "outer",
            WrapperKind::Inner => "inner",
        }
    }
}

/// Marks an element as a wrapper synthesized by the style engine.
///
/// In markup the marker travels as class tokens
/// (`wrapper outer-wrapper ul-outer-wrapper`); in the tree it is this field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WrapperMarker {
    pub kind: WrapperKind,
    /// Tag of the element the wrapper was created for
    pub origin_tag: Option<String>,
}

impl WrapperMarker {
    pub fn new(kind: WrapperKind, origin_tag: impl Into<String>) -> Self {
        Self {
            kind,
            origin_tag: Some(origin_tag.into()),
        }
    }

    /// Class tokens that encode this marker in HTML.
    pub fn class_tokens(&self) -> Vec<String> {
        let qualifier = format!("{}-wrapper", self.kind.as_str());
        let mut tokens = vec!["wrapper".to_string(), qualifier.clone()];
        if let Some(tag) = &self.origin_tag {
            tokens.push(format!("{tag}-{qualifier}"));
        }
        tokens
    }
}

/// A node of the content tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Node {
    Root(Root),
    Element(Element),
    Text(Text),
    Comment(Comment),
    Doctype,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Root {
    pub children: Vec<Node>,
    pub position: Option<Position>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub tag_name: String,
    pub properties: Properties,
    pub children: Vec<Node>,
    pub position: Option<Position>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wrapper: Option<WrapperMarker>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Text {
    pub value: String,
    pub position: Option<Position>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub value: String,
    pub position: Option<Position>,
}

impl Node {
    pub fn text(value: impl Into<String>) -> Self {
        Node::Text(Text {
            value: value.into(),
            position: None,
        })
    }

    pub fn root(children: Vec<Node>) -> Self {
        Node::Root(Root {
            children,
            position: None,
        })
    }

    pub fn position(&self) -> Option<&Position> {
        match self {
            Node::Root(root) => root.position.as_ref(),
            Node::Element(element) => element.position.as_ref(),
            Node::Text(text) => text.position.as_ref(),
            Node::Comment(comment) => comment.position.as_ref(),
            Node::Doctype => None,
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Root(root) => &root.children,
            Node::Element(element) => &element.children,
            Node::Text(_) | Node::Comment(_) | Node::Doctype => &[],
        }
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Node::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn is_element(&self, tag_name: &str) -> bool {
        matches!(self, Node::Element(element) if element.tag_name == tag_name)
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl Element {
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            properties: Properties::new(),
            children: Vec::new(),
            position: None,
            wrapper: None,
        }
    }

    /// Synthetic wrapper `div` for `origin_tag`.
    pub fn wrapper(kind: WrapperKind, origin_tag: &str, children: Vec<Node>) -> Self {
        Self {
            wrapper: Some(WrapperMarker::new(kind, origin_tag)),
            children,
            ..Self::new("div")
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }

    /// Whether the element has a source span and can be patched.
    pub fn is_located(&self) -> bool {
        self.position.is_some()
    }

    /// Class tokens as they appear in markup, wrapper tokens first.
    pub fn class_tokens(&self) -> Vec<String> {
        let mut tokens = self
            .wrapper
            .as_ref()
            .map(WrapperMarker::class_tokens)
            .unwrap_or_default();
        if let Some(class) = self.attribute("class") {
            tokens.extend(class.split_whitespace().map(str::to_string));
        }
        tokens
    }
}

/// Concatenated text of a node and its descendants.
pub fn text_content(node: &Node) -> String {
    let mut output = String::new();
    collect_text(node, &mut output);
    output
}

fn collect_text(node: &Node, output: &mut String) {
    match node {
        Node::Text(text) => output.push_str(&text.value),
        Node::Root(_) | Node::Element(_) => {
            for child in node.children() {
                collect_text(child, output);
            }
        }
        Node::Comment(_) | Node::Doctype => {}
    }
}
