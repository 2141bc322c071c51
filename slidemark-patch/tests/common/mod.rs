//! Helpers shared by the integration tests

use slidemark_patch::deck::{slide_groups, DEFAULT_SCOPE_CLASS_PREFIX};
use slidemark_patch::formats::markdown::parser::parse_markdown;
use slidemark_patch::{find_in_slide, Element, SelectionOrigin};
use std::path::PathBuf;

pub fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"))
}

/// Element at `trace` in the first slide, looked up the way the properties pane does.
pub fn element_at(source: &str, trace: &[usize]) -> Element {
    let root = parse_markdown(source).expect("Should parse markdown");
    let slides = slide_groups(&root, DEFAULT_SCOPE_CLASS_PREFIX);
    find_in_slide(&slides[0].nodes, trace, SelectionOrigin::Properties)
        .and_then(|node| node.as_element())
        .cloned()
        .unwrap_or_else(|| panic!("No element at {trace:?} in {source:?}"))
}
