//! Structural index paths
//!
//! A trace is the list of child offsets leading from the top of a slide group
//! to an element. It is written on every element as the dot-joined
//! `data-node-index-trace` attribute so rendered HTML can be mapped back to
//! tree nodes. Traces are only valid for the tree snapshot they were assigned on.

use super::node::Node;

/// Attribute carrying the dot-joined trace of an element.
pub const NODE_INDEX_TRACE_ATTRIBUTE: &str = "data-node-index-trace";

/// Prefix of attributes used for internal bookkeeping; never emitted as markup.
pub const RESERVED_ATTRIBUTE_PREFIX: &str = "data-node-";

/// A structural index path.
pub type NodeIndexTrace = Vec<usize>;

/// Assigns traces to every element in `nodes`, depth first.
pub fn assign_node_index_trace(nodes: &mut [Node]) {
    assign_with_ancestors(nodes, &[]);
}

fn assign_with_ancestors(nodes: &mut [Node], ancestors: &[usize]) {
    for (index, node) in nodes.iter_mut().enumerate() {
        let Node::Element(element) = node else {
            continue;
        };
        let mut trace = ancestors.to_vec();
        trace.push(index);
        element
            .properties
            .insert(NODE_INDEX_TRACE_ATTRIBUTE.to_string(), format_trace(&trace));
        assign_with_ancestors(&mut element.children, &trace);
    }
}

/// Dot-joined form of a trace, e.g. `0.2.1`.
pub fn format_trace(trace: &[usize]) -> String {
    trace
        .iter()
        .map(usize::to_string)
        .collect::<Vec<_>>()
        .join(".")
}

/// Parses the dot-joined form. Returns `None` on anything that is not a
/// non-empty list of integers.
pub fn parse_trace(value: &str) -> Option<NodeIndexTrace> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    value
        .split('.')
        .map(|part| part.trim().parse::<usize>().ok())
        .collect()
}
