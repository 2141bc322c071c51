//! Content tree model
//!
//! The element/text tree every other module works on, together with the passes
//! that run over a freshly parsed tree: sanitizing, normalizing and assigning
//! structural index traces.

pub mod node;
pub mod normalize;
pub mod sanitize;
pub mod trace;

pub use node::{
    text_content, Comment, Element, Node, Point, Position, Properties, Root, Text, WrapperKind,
    WrapperMarker,
};
pub use normalize::{normalize_children, remove_blank_text_nodes};
pub use sanitize::sanitize;
pub use trace::{
    assign_node_index_trace, format_trace, parse_trace, NodeIndexTrace,
    NODE_INDEX_TRACE_ATTRIBUTE, RESERVED_ATTRIBUTE_PREFIX,
};
