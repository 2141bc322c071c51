//! Property tests: every wrap is undone by removing the wrapper

use crate::common::element_at;
use proptest::prelude::*;
use slidemark_patch::StyleEngine;

fn words() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z]{1,8}( [a-z]{1,8}){0,3}", 1..5)
}

/// List items of one or more paragraphs; any item with two makes the list loose.
fn items() -> impl Strategy<Value = Vec<Vec<String>>> {
    prop::collection::vec(
        prop::collection::vec("[a-z]{1,8}( [a-z]{1,8}){0,3}", 1..3),
        1..5,
    )
}

fn list(items: &[Vec<String>], container: &str) -> String {
    let mut source = String::new();
    for paragraphs in items {
        let item = format!("- {}", paragraphs.join("\n\n  "));
        for (index, line) in item.split('\n').enumerate() {
            if index > 0 && line.is_empty() {
                source.push_str(container.trim_end());
            } else {
                source.push_str(container);
                source.push_str(line);
            }
            source.push('\n');
        }
    }
    source
}

fn wrap_then_unwrap(source: &str, trace: &[usize], wrapper_trace: &[usize]) -> String {
    let engine = StyleEngine::default();
    let target = element_at(source, trace);
    let edit = engine.apply_style(&target, "color: blue;", source).unwrap();
    assert!(edit.range.start <= edit.range.end && edit.range.end <= source.len());

    let styled = edit.apply(source).unwrap();
    assert_eq!(&styled[..edit.range.start], &source[..edit.range.start]);
    assert_eq!(
        &styled[styled.len() - (source.len() - edit.range.end)..],
        &source[edit.range.end..]
    );

    let wrapper = element_at(&styled, wrapper_trace);
    engine
        .remove_style(&wrapper, &styled)
        .unwrap()
        .unwrap()
        .apply(&styled)
        .unwrap()
}

proptest! {
    #[test]
    fn outer_wrap_round_trips(items in words()) {
        let source: String = items.iter().map(|item| format!("- {item}\n")).collect();
        prop_assert_eq!(wrap_then_unwrap(&source, &[0], &[0]), source);
    }

    #[test]
    fn nested_outer_wrap_round_trips(items in words()) {
        let children: String = items.iter().map(|item| format!("  - {item}\n")).collect();
        let source = format!("* parent\n{children}* end\n");
        prop_assert_eq!(wrap_then_unwrap(&source, &[0, 0, 1], &[0, 0, 1]), source);
    }

    #[test]
    fn inner_wrap_round_trips(items in words(), pick in 0usize..5) {
        let source: String = items.iter().map(|item| format!("- {item}\n")).collect();
        let index = pick % items.len();
        prop_assert_eq!(wrap_then_unwrap(&source, &[0, index], &[0, index, 0]), source);
    }

    #[test]
    fn loose_inner_wrap_round_trips(items in items(), pick in 0usize..5) {
        let source = list(&items, "");
        let index = pick % items.len();
        prop_assert_eq!(wrap_then_unwrap(&source, &[0, index], &[0, index, 0]), source);
    }

    #[test]
    fn quoted_outer_wrap_round_trips(items in items()) {
        let source = list(&items, "> ");
        prop_assert_eq!(wrap_then_unwrap(&source, &[0, 0], &[0, 0]), source);
    }

    #[test]
    fn quoted_inner_wrap_round_trips(items in items(), pick in 0usize..5) {
        let source = list(&items, "> ");
        let index = pick % items.len();
        prop_assert_eq!(
            wrap_then_unwrap(&source, &[0, 0, index], &[0, 0, index, 0]),
            source
        );
    }
}
