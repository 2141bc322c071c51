//! Markdown to HTML and back through the registry

use insta::assert_snapshot;
use slidemark_patch::tree::remove_blank_text_nodes;
use slidemark_patch::{Format, FormatRegistry};

#[test]
fn test_markdown_to_html() {
    let registry = FormatRegistry::default();
    let tree = registry
        .parse("Some *emphasis* and `code`", "markdown")
        .unwrap();
    assert_snapshot!(
        registry.serialize(&tree, "html").unwrap(),
        @"<p>Some <em>emphasis</em> and <code>code</code></p>"
    );
}

#[test]
fn test_html_wrapper_renders_as_div() {
    let registry = FormatRegistry::default();
    let source = "<div class=\"wrapper outer-wrapper ul-outer-wrapper\" style=\"color: blue;\">\n\n- a\n</div>\n";
    let tree = remove_blank_text_nodes(&registry.parse(source, "markdown").unwrap());
    let html = registry.serialize(&tree, "html").unwrap();
    assert_eq!(
        html,
        "<div class=\"wrapper outer-wrapper ul-outer-wrapper\" style=\"color: blue;\"><ul><li>a</li></ul></div>"
    );
}

#[test]
fn test_unsafe_markup_is_dropped() {
    let registry = FormatRegistry::default();
    let tree = registry
        .parse("<script>alert(1)</script>\n\n<a href=\"javascript:x\" onclick=\"y\">link</a>\n", "markdown")
        .unwrap();
    let html = registry.serialize(&tree, "html").unwrap();
    assert!(!html.contains("script"));
    assert!(!html.contains("javascript:"));
    assert!(!html.contains("onclick"));
    assert!(html.contains(">link</a>"));
}

#[test]
fn test_markdown_round_trip_through_tree() {
    let format = slidemark_patch::formats::MarkdownFormat;
    let source = "# Title\n\n- one\n- two\n";
    let tree = remove_blank_text_nodes(&format.parse(source).unwrap());
    assert_eq!(format.serialize(&tree).unwrap(), "# Title\n\n- one\n- two\n");
}
