//! Outer wraps: lists and code blocks

use crate::common::{element_at, fixture};
use slidemark_patch::style::detect_wrapper_kind;
use slidemark_patch::tree::WrapperKind;
use slidemark_patch::{Node, StyleEngine};

#[test]
fn test_nested_list_keeps_parent_items() {
    let source = fixture("nested-list.md");
    let ul = element_at(&source, &[0, 0, 1]);
    assert_eq!(ul.tag_name, "ul");

    let edit = StyleEngine::default()
        .apply_style(&ul, "color: blue;", &source)
        .unwrap();
    assert_eq!(edit.range, 16..67);

    let styled = edit.apply(&source).unwrap();
    assert_eq!(styled, fixture("nested-list.styled.md"));
    assert!(styled.starts_with("* parent list\n"));
    assert!(styled.ends_with("\n* ending list item\n"));
}

#[test]
fn test_nested_list_wrapper_is_parsed_back() {
    let styled = fixture("nested-list.styled.md");
    let wrapper = element_at(&styled, &[0, 0, 1]);

    assert_eq!(
        detect_wrapper_kind(&Node::from(wrapper.clone())),
        Some(WrapperKind::Outer)
    );
    assert_eq!(wrapper.attribute("style"), Some("color: blue;"));
    assert_eq!(wrapper.children.len(), 1);
    assert!(wrapper.children[0].is_element("ul"));
}

#[test]
fn test_nested_list_removal_restores_source() {
    let styled = fixture("nested-list.styled.md");
    let wrapper = element_at(&styled, &[0, 0, 1]);

    let edit = StyleEngine::default()
        .remove_style(&wrapper, &styled)
        .unwrap()
        .unwrap();
    assert_eq!(edit.apply(&styled).unwrap(), fixture("nested-list.md"));
}

#[test]
fn test_restyling_a_wrapper_does_not_nest() {
    let styled = fixture("nested-list.styled.md");
    let wrapper = element_at(&styled, &[0, 0, 1]);

    let edit = StyleEngine::default()
        .apply_style(&wrapper, "color: red;", &styled)
        .unwrap();
    assert_eq!(
        edit.apply(&styled).unwrap(),
        styled.replace("color: blue;", "color: red;")
    );
}

#[test]
fn test_top_level_list() {
    let source = "- a\n- b\n";
    let ul = element_at(source, &[0]);
    let styled = StyleEngine::default()
        .apply_style(&ul, "color: blue;", source)
        .unwrap()
        .apply(source)
        .unwrap();
    assert_eq!(
        styled,
        "<div class=\"wrapper outer-wrapper ul-outer-wrapper\" style=\"color: blue;\">\n\n- a\n- b\n</div>\n"
    );

    let wrapper = element_at(&styled, &[0]);
    let restored = StyleEngine::default()
        .remove_style(&wrapper, &styled)
        .unwrap()
        .unwrap()
        .apply(&styled)
        .unwrap();
    assert_eq!(restored, source);
}

#[test]
fn test_code_block() {
    let source = "```js\nlet a = 1;\n```\n";
    let pre = element_at(source, &[0]);
    let styled = StyleEngine::default()
        .apply_style(&pre, "background: black;", source)
        .unwrap()
        .apply(source)
        .unwrap();
    assert_eq!(
        styled,
        "<div class=\"wrapper outer-wrapper pre-outer-wrapper\" style=\"background: black;\">\n\n```js\nlet a = 1;\n```\n</div>\n"
    );

    let wrapper = element_at(&styled, &[0]);
    assert!(wrapper.children[0].is_element("pre"));
    let restored = StyleEngine::default()
        .remove_style(&wrapper, &styled)
        .unwrap()
        .unwrap()
        .apply(&styled)
        .unwrap();
    assert_eq!(restored, source);
}

#[test]
fn test_restyling_keeps_every_child() {
    let styled = "<div class=\"wrapper outer-wrapper ul-outer-wrapper\" style=\"color: blue;\">\n\n- a\n- b\n\nmore text\n</div>\n";
    let wrapper = element_at(styled, &[0]);
    assert_eq!(wrapper.children.len(), 2);

    let restyled = StyleEngine::default()
        .apply_style(&wrapper, "color: red;", styled)
        .unwrap()
        .apply(styled)
        .unwrap();
    assert_eq!(restyled, styled.replace("color: blue;", "color: red;"));
}

#[test]
fn test_removing_keeps_every_child() {
    let styled = "<div class=\"wrapper outer-wrapper ul-outer-wrapper\" style=\"color: blue;\">\n\n- a\n- b\n\nmore text\n</div>\n";
    let wrapper = element_at(styled, &[0]);
    let restored = StyleEngine::default()
        .remove_style(&wrapper, styled)
        .unwrap()
        .unwrap()
        .apply(styled)
        .unwrap();
    assert_eq!(restored, "- a\n- b\n\nmore text\n");
}

#[test]
fn test_list_inside_blockquote() {
    let source = "> - a\n> - b\n";
    let ul = element_at(source, &[0, 0]);
    let styled = StyleEngine::default()
        .apply_style(&ul, "color: red;", source)
        .unwrap()
        .apply(source)
        .unwrap();
    assert_eq!(
        styled,
        "> <div class=\"wrapper outer-wrapper ul-outer-wrapper\" style=\"color: red;\">\n>\n> - a\n> - b\n> </div>\n"
    );

    let wrapper = element_at(&styled, &[0, 0]);
    assert_eq!(
        detect_wrapper_kind(&Node::from(wrapper.clone())),
        Some(WrapperKind::Outer)
    );
    let restored = StyleEngine::default()
        .remove_style(&wrapper, &styled)
        .unwrap()
        .unwrap()
        .apply(&styled)
        .unwrap();
    assert_eq!(restored, source);
}

#[test]
fn test_list_on_its_parent_marker_line() {
    let source = "* - a\n  - b\n";
    let ul = element_at(source, &[0, 0, 0]);
    let styled = StyleEngine::default()
        .apply_style(&ul, "color: red;", source)
        .unwrap()
        .apply(source)
        .unwrap();
    assert_eq!(
        styled,
        "* <div class=\"wrapper outer-wrapper ul-outer-wrapper\" style=\"color: red;\">\n\n  - a\n  - b\n  </div>\n"
    );

    let wrapper = element_at(&styled, &[0, 0, 0]);
    let restored = StyleEngine::default()
        .remove_style(&wrapper, &styled)
        .unwrap()
        .unwrap()
        .apply(&styled)
        .unwrap();
    assert_eq!(restored, source);
}

#[test]
fn test_lazy_quote_continuation_is_not_wrapped() {
    let source = "> - a\nlazy\n";
    let ul = element_at(source, &[0, 0]);
    assert!(StyleEngine::default()
        .apply_style(&ul, "color: red;", source)
        .is_none());
}
