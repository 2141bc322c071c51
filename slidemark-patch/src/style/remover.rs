//! Wrapper removal
//!
//! Undoes what [`super::wrapper`] injected. The wrapper's span is replaced by the
//! source of what it holds: the children span for inner wrappers, the children's
//! lines with the wrapper's indentation taken back out for outer wrappers.

use super::marker::element_wrapper_kind;
use super::wrapper::{block_body, children_position, children_span, container_prefix, reindent};
use crate::edit::Edit;
use crate::error::PatchError;
use crate::tree::{Element, Position, WrapperKind};

/// Edit that removes the wrapper `element`.
///
/// `Ok(None)` when the wrapper or its content has no source position. Removing
/// a style from an element that is not a wrapper is an error: there is no
/// markdown to restore.
pub fn remove_style(element: &Element, source: &str) -> Result<Option<Edit>, PatchError> {
    let Some(position) = element.position else {
        return Ok(None);
    };
    let Some(kind) = element_wrapper_kind(element) else {
        return Err(PatchError::NotAWrapper(element.tag_name.clone()));
    };

    let replacement = match kind {
        WrapperKind::Outer => {
            let Some(children) = children_position(element) else {
                log::debug!("outer wrapper has no located child");
                return Ok(None);
            };
            let Some(text) = unwrap_outer(&position, &children, source) else {
                log::debug!("outer wrapper content continues lazily");
                return Ok(None);
            };
            text
        }
        WrapperKind::Inner => {
            let Some(text) = children_span(element).and_then(|range| source.get(range)) else {
                log::debug!("inner wrapper has no located children");
                return Ok(None);
            };
            text.to_string()
        }
    };

    let edit = Edit::new(position.range(), replacement);
    Ok(edit.fits(source).then_some(edit))
}

/// The children's lines, dedented by how much deeper than the wrapper they sit.
///
/// The edit starts where the wrapper's open tag starts, after the prefix of
/// its containers, so only the lines after the first get that prefix back.
fn unwrap_outer(wrapper: &Position, children: &Position, source: &str) -> Option<String> {
    let container = container_prefix(source, wrapper);
    let body = block_body(source, children, &container)?;
    Some(reindent(&body, &container))
}
