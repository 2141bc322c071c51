//! Node lookup by index trace
//!
//! A trace is only meaningful for the tree snapshot it was assigned on. Lookups
//! on a newer tree either land on some node or return `None`; callers drop the
//! selection in the latter case.

use crate::selection::SelectionOrigin;
use crate::style::detect_wrapper_kind;
use crate::tree::{Node, WrapperKind};

/// Walks `trace` starting at `node`, which sits at `node_index` in its parent.
///
/// The first trace entry names `node` itself. A two-entry trace that lands on
/// the only child of an outer wrapper resolves to the wrapper, unless the
/// selection came from the properties pane.
pub fn find_node_by_index_trace<'a>(
    node: &'a Node,
    node_index: usize,
    trace: &[usize],
    origin: SelectionOrigin,
) -> Option<&'a Node> {
    let element = node.as_element()?;
    let (&head, rest) = trace.split_first()?;
    if head != node_index {
        return None;
    }
    if rest.is_empty() {
        return Some(node);
    }

    if rest.len() == 1
        && detect_wrapper_kind(node) == Some(WrapperKind::Outer)
        && element.children.len() == 1
        && origin != SelectionOrigin::Properties
    {
        return Some(node);
    }

    let child = element.children.get(rest[0])?;
    find_node_by_index_trace(child, rest[0], rest, origin)
}

/// Looks a trace up among the top-level nodes of a slide.
pub fn find_in_slide<'a>(
    nodes: &'a [Node],
    trace: &[usize],
    origin: SelectionOrigin,
) -> Option<&'a Node> {
    let &first = trace.first()?;
    find_node_by_index_trace(nodes.get(first)?, first, trace, origin)
}
