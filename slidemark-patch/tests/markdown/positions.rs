//! Every located node maps back onto the markdown it came from

use crate::common::fixture;
use proptest::prelude::*;
use slidemark_patch::formats::markdown::parser::parse_markdown;
use slidemark_patch::tree::remove_blank_text_nodes;
use slidemark_patch::Node;

fn check_spans(node: &Node, source: &str) {
    if let Some(position) = node.position() {
        let range = position.range();
        assert!(range.start <= range.end && range.end <= source.len());
        let slice = &source[range];
        assert_eq!(slice, slice.trim_end(), "span of {node:?} ends in whitespace");
        assert_eq!(
            position.start.offset,
            line_offset(source, position.start.line) + position.start.column - 1
        );
    }
    for child in node.children() {
        check_spans(child, source);
    }
}

fn line_offset(source: &str, line: usize) -> usize {
    source
        .split_inclusive('\n')
        .take(line - 1)
        .map(str::len)
        .sum()
}

#[test]
fn test_fixture_spans() {
    for name in ["deck.md", "nested-list.md", "nested-list.styled.md"] {
        let source = fixture(name);
        check_spans(&parse_markdown(&source).unwrap(), &source);
    }
}

#[test]
fn test_wrapper_span_covers_open_and_close_tags() {
    let source = fixture("nested-list.styled.md");
    let root = remove_blank_text_nodes(&parse_markdown(&source).unwrap());
    let wrapper = &root.children()[0].children()[0].children()[1];
    let range = wrapper.position().unwrap().range();
    let slice = &source[range];
    assert!(slice.starts_with("<div class=\"wrapper outer-wrapper ul-outer-wrapper\""));
    assert!(slice.ends_with("  </div>"));
}

proptest! {
    #[test]
    fn paragraph_and_list_spans(
        paragraphs in prop::collection::vec("[a-z]{1,6}( [a-z]{1,6}){0,4}", 1..4),
        items in prop::collection::vec("[a-z]{1,6}", 0..4),
    ) {
        let mut source = paragraphs.join("\n\n");
        source.push_str("\n\n");
        for item in &items {
            source.push_str(&format!("- {item}\n"));
        }
        check_spans(&parse_markdown(&source).unwrap(), &source);
    }
}
