//! Wrapper marker detection
//!
//! Inside the tree a style wrapper is an explicit [`WrapperMarker`] on a `div`.
//! In markup it travels as class tokens, so the conversion happens once at the
//! parsing boundary and nothing downstream inspects class strings.

use crate::tree::{Element, Node, WrapperKind, WrapperMarker};

const WRAPPER_TOKEN: &str = "wrapper";
const OUTER_TOKEN: &str = "outer-wrapper";
const INNER_TOKEN: &str = "inner-wrapper";

impl WrapperMarker {
    /// Reads a marker from class tokens.
    ///
    /// `wrapper` together with `outer-wrapper` or `inner-wrapper` is a marker;
    /// the origin tag comes from the `<tag>-outer-wrapper` style token. A bare
    /// `wrapper` token is logged as a fault and yields no marker.
    pub fn from_class_tokens<S: AsRef<str>>(tokens: &[S]) -> Option<WrapperMarker> {
        let has = |wanted: &str| tokens.iter().any(|token| token.as_ref() == wanted);
        if !has(WRAPPER_TOKEN) {
            return None;
        }

        let kind = if has(OUTER_TOKEN) {
            WrapperKind::Outer
        } else if has(INNER_TOKEN) {
            WrapperKind::Inner
        } else {
            let classes: Vec<&str> = tokens.iter().map(AsRef::as_ref).collect();
            log::error!("cannot figure out wrapper kind from classes {classes:?}");
            return None;
        };

        let suffix = format!("-{}-wrapper", kind.as_str());
        let origin_tag = tokens
            .iter()
            .filter_map(|token| token.as_ref().strip_suffix(suffix.as_str()))
            .find(|tag| !tag.is_empty())
            .map(str::to_string);
        Some(WrapperMarker { kind, origin_tag })
    }
}

/// Wrapper kind of a node, if it is a style wrapper `div`.
pub fn detect_wrapper_kind(node: &Node) -> Option<WrapperKind> {
    match node {
        Node::Element(element) => element_wrapper_kind(element),
        Node::Root(_) | Node::Text(_) | Node::Comment(_) | Node::Doctype => None,
    }
}

pub fn element_wrapper_kind(element: &Element) -> Option<WrapperKind> {
    if element.tag_name != "div" {
        return None;
    }
    element.wrapper.as_ref().map(|marker| marker.kind)
}

/// Moves wrapper class tokens of a freshly parsed `div` into its marker field.
pub fn lift_wrapper_marker(element: &mut Element) {
    if element.tag_name != "div" {
        return;
    }
    let Some(class) = element.attribute("class") else {
        return;
    };
    let tokens: Vec<&str> = class.split_whitespace().collect();
    let Some(marker) = WrapperMarker::from_class_tokens(&tokens) else {
        return;
    };

    let marker_tokens = marker.class_tokens();
    let remaining: Vec<&str> = tokens
        .into_iter()
        .filter(|token| !marker_tokens.iter().any(|marker| marker == token))
        .collect();
    let remaining = remaining.join(" ");

    if remaining.is_empty() {
        element.properties.remove("class");
    } else {
        element.properties.insert("class".to_string(), remaining);
    }
    element.wrapper = Some(marker);
}
