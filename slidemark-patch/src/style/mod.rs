//! Style engine
//!
//! Turns "give this element an inline style" into a minimal edit of the markdown
//! source, and turns a previously injected wrapper back into the markdown it
//! replaced.
//!
//! Markdown has no attribute syntax, so the engine picks one of three forms:
//!
//! | target                      | form      | replaced range   | replacement                           |
//! |-----------------------------|-----------|------------------|---------------------------------------|
//! | list item (`li`)            | inner     | children span    | `<div class="wrapper inner-wrapper li-inner-wrapper" style>` around the verbatim children |
//! | `ul`, `ol`, `pre`, ...      | outer     | element span     | `<div class="wrapper outer-wrapper ul-outer-wrapper" style>` around the dedented block, re-indented |
//! | anything else, or a wrapper | attribute | element span     | the element's own tag as raw HTML with the merged `style` |
//!
//! The source is never mutated; every operation returns an [`Edit`] the caller
//! applies. Elements without a source position are never targets.

pub mod marker;
pub mod remover;
pub mod wrapper;

use crate::edit::Edit;
use crate::error::PatchError;
use crate::tree::Element;
use std::collections::BTreeSet;

pub use marker::{detect_wrapper_kind, element_wrapper_kind, lift_wrapper_marker};

/// Tags that get the inner form by default.
pub const DEFAULT_INNER_WRAP_TAGS: &[&str] = &["li"];
/// Tags that get the outer form by default.
pub const DEFAULT_OUTER_WRAP_TAGS: &[&str] = &["ul", "ol", "pre", "blockquote", "table"];

/// Which tags take which wrapping form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleOptions {
    pub inner_wrap_tags: BTreeSet<String>,
    pub outer_wrap_tags: BTreeSet<String>,
}

impl Default for StyleOptions {
    fn default() -> Self {
        Self {
            inner_wrap_tags: DEFAULT_INNER_WRAP_TAGS.iter().map(|t| t.to_string()).collect(),
            outer_wrap_tags: DEFAULT_OUTER_WRAP_TAGS.iter().map(|t| t.to_string()).collect(),
        }
    }
}

/// How a style is written for a given element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Replace the children span with a wrapper holding them
    InnerWrap,
    /// Replace the element with a wrapper holding it
    OuterWrap,
    /// Re-emit the element's own tag with the style attribute
    DirectAttribute,
}

#[derive(Debug, Clone, Default)]
pub struct StyleEngine {
    options: StyleOptions,
}

impl StyleEngine {
    pub fn new(options: StyleOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &StyleOptions {
        &self.options
    }

    /// The form a style on `element` takes. Existing wrappers are restyled in place.
    pub fn strategy(&self, element: &Element) -> Strategy {
        if element_wrapper_kind(element).is_some() {
            Strategy::DirectAttribute
        } else if self.options.inner_wrap_tags.contains(&element.tag_name) {
            Strategy::InnerWrap
        } else if self.options.outer_wrap_tags.contains(&element.tag_name) {
            Strategy::OuterWrap
        } else {
            Strategy::DirectAttribute
        }
    }

    /// Edit that gives `element` the inline `style`.
    ///
    /// `None` when the element has no source position, or when an inner wrap
    /// finds no located child to wrap.
    pub fn apply_style(&self, element: &Element, style: &str, source: &str) -> Option<Edit> {
        if !element.is_located() {
            log::debug!("<{}> has no source position, not styling it", element.tag_name);
            return None;
        }
        let strategy = self.strategy(element);
        log::debug!("styling <{}> with {strategy:?}", element.tag_name);

        let edit = match strategy {
            Strategy::InnerWrap => wrapper::inner_wrap(element, style, source),
            Strategy::OuterWrap => wrapper::outer_wrap(element, style, source),
            Strategy::DirectAttribute => wrapper::direct_attribute(element, style, source),
        };
        match edit {
            Ok(edit) => edit.filter(|edit| edit.fits(source)),
            Err(e) => {
                log::warn!("failed to render styled <{}>: {e}", element.tag_name);
                None
            }
        }
    }

    /// Edit that removes the wrapper `element` and restores what it wrapped.
    ///
    /// Fails with [`PatchError::NotAWrapper`] when `element` is not a style wrapper.
    pub fn remove_style(
        &self,
        element: &Element,
        source: &str,
    ) -> Result<Option<Edit>, PatchError> {
        remover::remove_style(element, source)
    }
}
