use crate::common::fixture;
use slidemark_patch::style::detect_wrapper_kind;
use slidemark_patch::{Deck, DeckOptions, Selection, SelectionOrigin};

fn deck() -> Deck {
    Deck::new(fixture("deck.md"), DeckOptions::default())
}

#[test]
fn test_slides() {
    let deck = deck();
    let slides = deck.slides();
    assert_eq!(slides.len(), 2);

    let titles: Vec<&str> = slides.iter().map(|slide| slide.title.as_str()).collect();
    assert_eq!(titles, vec!["Welcome", "Agenda"]);
    assert_eq!(slides[1].class_name, "slide-index-1");
    assert!(slides[1].html.contains(".slide-index-1 h2"));
    assert!(!slides[0].html.contains("<style>"));
}

#[test]
fn test_style_list_then_remove_it() {
    let mut deck = deck();
    deck.select(Selection::node(1, vec![1], SelectionOrigin::Preview, 1));
    assert!(deck.selected_node().is_some_and(|node| node.is_element("ul")));

    assert!(deck.apply_style_to_selection("color: blue;"));
    assert!(deck.markdown().contains(
        "<div class=\"wrapper outer-wrapper ul-outer-wrapper\" style=\"color: blue;\">\n\n- first point\n- second point\n</div>\n"
    ));

    // A click on the list inside the wrapper selects the wrapper
    deck.select(Selection::node(1, vec![1, 0], SelectionOrigin::Preview, 2));
    assert!(deck.selected_node().is_some_and(|node| detect_wrapper_kind(node).is_some()));

    deck.select(Selection::node(1, vec![1, 0], SelectionOrigin::Properties, 3));
    assert!(deck.selected_node().is_some_and(|node| node.is_element("ul")));

    deck.select(Selection::node(1, vec![1, 0], SelectionOrigin::Contents, 4));
    assert_eq!(deck.remove_style_from_selection(), Ok(true));
    assert_eq!(deck.markdown(), fixture("deck.md"));
}

#[test]
fn test_slide_selection_without_node() {
    let mut deck = deck();
    deck.select(Selection::slide(0, SelectionOrigin::Contents, 1));
    assert_eq!(deck.selected().map(|selection| selection.slide_index), Some(0));
    assert_eq!(deck.selected_node(), None);
    assert!(!deck.apply_style_to_selection("color: blue;"));
    assert_eq!(deck.remove_style_from_selection(), Ok(false));
}
