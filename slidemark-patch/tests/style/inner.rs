//! Inner wraps: list items keep their marker

use crate::common::element_at;
use slidemark_patch::StyleEngine;

const LIST: &str = "* 1st item\n* 2nd item\n";

#[test]
fn test_inline_wrap_is_minimal() {
    let li = element_at(LIST, &[0, 0]);
    let edit = StyleEngine::default()
        .apply_style(&li, "color: blue;", LIST)
        .unwrap();

    assert_eq!(edit.range, 2..10);
    assert_eq!(
        edit.replacement,
        r#"<div class="wrapper inner-wrapper li-inner-wrapper" style="color: blue;">1st item</div>"#
    );
    assert_eq!(
        edit.apply(LIST).unwrap(),
        "* <div class=\"wrapper inner-wrapper li-inner-wrapper\" style=\"color: blue;\">1st item</div>\n* 2nd item\n"
    );
}

#[test]
fn test_inner_wrapper_removal() {
    let li = element_at(LIST, &[0, 1]);
    let styled = StyleEngine::default()
        .apply_style(&li, "color: blue;", LIST)
        .unwrap()
        .apply(LIST)
        .unwrap();
    assert!(styled.starts_with("* 1st item\n* <div"));

    let wrapper = element_at(&styled, &[0, 1, 0]);
    assert_eq!(wrapper.attribute("style"), Some("color: blue;"));
    let restored = StyleEngine::default()
        .remove_style(&wrapper, &styled)
        .unwrap()
        .unwrap()
        .apply(&styled)
        .unwrap();
    assert_eq!(restored, LIST);
}

#[test]
fn test_inner_wrapper_restyle_keeps_content() {
    let styled =
        "* <div class=\"wrapper inner-wrapper li-inner-wrapper\" style=\"color: blue;\">1st *item*</div>\n";
    let wrapper = element_at(styled, &[0, 0, 0]);
    let edit = StyleEngine::default()
        .apply_style(&wrapper, "color: red;", styled)
        .unwrap();
    assert_eq!(edit.apply(styled).unwrap(), styled.replace("blue", "red"));
}

const LOOSE: &str = "- para one\n\n  para two\n- b\n";
const LOOSE_STYLED: &str = "- <div class=\"wrapper inner-wrapper li-inner-wrapper\" style=\"color: blue;\">\n\n  para one\n\n  para two\n  </div>\n- b\n";

#[test]
fn test_multi_paragraph_item_is_framed() {
    let li = element_at(LOOSE, &[0, 0]);
    let styled = StyleEngine::default()
        .apply_style(&li, "color: blue;", LOOSE)
        .unwrap()
        .apply(LOOSE)
        .unwrap();
    assert_eq!(styled, LOOSE_STYLED);

    let wrapper = element_at(&styled, &[0, 0, 0]);
    assert_eq!(wrapper.children.len(), 2);
    assert!(wrapper.children.iter().all(|child| child.is_element("p")));

    let restored = StyleEngine::default()
        .remove_style(&wrapper, &styled)
        .unwrap()
        .unwrap()
        .apply(&styled)
        .unwrap();
    assert_eq!(restored, LOOSE);
}

#[test]
fn test_framed_inner_wrapper_restyle() {
    let wrapper = element_at(LOOSE_STYLED, &[0, 0, 0]);
    let edit = StyleEngine::default()
        .apply_style(&wrapper, "color: red;", LOOSE_STYLED)
        .unwrap();
    assert_eq!(
        edit.apply(LOOSE_STYLED).unwrap(),
        LOOSE_STYLED.replace("color: blue;", "color: red;")
    );
}

#[test]
fn test_multi_paragraph_item_inside_blockquote() {
    let source = "> - one\n>\n>   two\n";
    let li = element_at(source, &[0, 0, 0]);
    let styled = StyleEngine::default()
        .apply_style(&li, "color: blue;", source)
        .unwrap()
        .apply(source)
        .unwrap();
    assert_eq!(
        styled,
        "> - <div class=\"wrapper inner-wrapper li-inner-wrapper\" style=\"color: blue;\">\n>\n>   one\n>\n>   two\n>   </div>\n"
    );

    let wrapper = element_at(&styled, &[0, 0, 0, 0]);
    let restored = StyleEngine::default()
        .remove_style(&wrapper, &styled)
        .unwrap()
        .unwrap()
        .apply(&styled)
        .unwrap();
    assert_eq!(restored, source);
}
