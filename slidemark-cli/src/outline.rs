//! Slide outlines for `slidemark inspect`
//!
//! The text outline lists every slide followed by its elements, one per line,
//! indented by depth:
//!
//!     slide 1 [slide-index-1] Agenda
//!       0 <h2> 7:1-7:9
//!       1 <ul> 9:1-10:15
//!         1.0 <li> 9:1-9:13
//!
//! Each element shows the trace an editor would send back to select it, and
//! its source span when it has one. Wrappers are tagged with their kind and the
//! tag they were created for. The JSON outline carries the full slide trees.

use serde_json::{json, Value};
use slidemark_patch::tree::{Element, Node, Position, NODE_INDEX_TRACE_ATTRIBUTE};
use slidemark_patch::SlideGroup;

/// Renders the text outline of a deck.
pub fn outline(slides: &[SlideGroup]) -> String {
    let mut out = String::new();
    for slide in slides {
        out.push_str(&format!(
            "slide {} [{}] {}\n",
            slide.index, slide.class_name, slide.title
        ));
        for node in &slide.nodes {
            write_node(&mut out, node, 1);
        }
    }
    out
}

fn write_node(out: &mut String, node: &Node, depth: usize) {
    let Some(element) = node.as_element() else {
        return;
    };
    out.push_str(&"  ".repeat(depth));
    out.push_str(&element_line(element));
    out.push('\n');
    for child in &element.children {
        write_node(out, child, depth + 1);
    }
}

fn element_line(element: &Element) -> String {
    let trace = element
        .attribute(NODE_INDEX_TRACE_ATTRIBUTE)
        .unwrap_or("?");
    let mut line = format!(
        "{trace} <{}> {}",
        element.tag_name,
        span(element.position.as_ref())
    );
    if let Some(marker) = &element.wrapper {
        line.push_str(&format!(" ({} wrapper", marker.kind.as_str()));
        if let Some(tag) = &marker.origin_tag {
            line.push_str(&format!(" for <{tag}>"));
        }
        line.push(')');
    }
    line
}

fn span(position: Option<&Position>) -> String {
    match position {
        Some(p) => format!(
            "{}:{}-{}:{}",
            p.start.line, p.start.column, p.end.line, p.end.column
        ),
        None => "-".to_string(),
    }
}

/// Renders the JSON outline: one object per slide with its nodes.
pub fn outline_json(slides: &[SlideGroup]) -> Result<Value, serde_json::Error> {
    let mut entries = Vec::with_capacity(slides.len());
    for slide in slides {
        entries.push(json!({
            "index": slide.index,
            "title": slide.title,
            "class_name": slide.class_name,
            "nodes": serde_json::to_value(&slide.nodes)?,
        }));
    }
    Ok(Value::Array(entries))
}
