//! Direct attributes: elements re-emitted as raw HTML

use crate::common::element_at;
use slidemark_patch::{PatchError, StyleEngine};

fn style(source: &str, trace: &[usize], value: &str) -> String {
    let element = element_at(source, trace);
    StyleEngine::default()
        .apply_style(&element, value, source)
        .unwrap()
        .apply(source)
        .unwrap()
}

#[test]
fn test_paragraph() {
    insta::assert_snapshot!(style("abc\n", &[0], "color: blue;"), @r###"<p style="color: blue;">abc</p>"###);
}

#[test]
fn test_restyle_replaces_previous_style() {
    let once = style("abc\n", &[0], "color: blue;");
    let twice = style(&once, &[0], "color: red;");
    assert_eq!(twice, "<p style=\"color: red;\">abc</p>\n");
    assert_eq!(twice.matches("<p").count(), 1);
}

#[test]
fn test_heading_and_inline_markup() {
    assert_eq!(
        style("# Title\n\nSome *styled* text\n", &[1], "color: blue;"),
        "# Title\n\n<p style=\"color: blue;\">Some *styled* text</p>\n"
    );
    assert_eq!(
        style("# Title\n", &[0], "font-size: 2em;"),
        "<h1 style=\"font-size: 2em;\">Title</h1>\n"
    );
}

#[test]
fn test_existing_attributes_are_kept() {
    assert_eq!(
        style("<p class=\"note\">abc</p>\n", &[0], "color: blue;"),
        "<p class=\"note\" style=\"color: blue;\">abc</p>\n"
    );
}

#[test]
fn test_empty_style_drops_the_attribute() {
    assert_eq!(
        style("<p style=\"color: blue;\">abc</p>\n", &[0], ""),
        "<p>abc</p>\n"
    );
}

#[test]
fn test_removing_from_plain_element_fails() {
    let p = element_at("abc\n", &[0]);
    assert_eq!(
        StyleEngine::default().remove_style(&p, "abc\n"),
        Err(PatchError::NotAWrapper("p".to_string()))
    );
}
