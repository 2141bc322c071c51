//! Wrapping strategies
//!
//! Each strategy returns the edit for one element. Slices that are not
//! re-rendered are copied from the source byte for byte.

use super::marker::element_wrapper_kind;
use crate::common::{prepend_lead_to_lines, trim_leads, LeadingWhitespaceOptions, PrependOptions};
use crate::edit::Edit;
use crate::error::PatchError;
use crate::formats::html::serializer::render_with_html_head;
use crate::formats::markdown::serializer::{is_block, node_to_markdown, nodes_to_markdown};
use crate::tree::{Element, Node, Position, Properties, WrapperKind};
use std::ops::Range;

/// Wraps the children of `element` (a list item, usually) in an inner wrapper.
///
/// Only the children span is replaced, so the list marker stays as it was.
/// Children on one line are wrapped in place; block children over several
/// lines are framed like an outer wrapper so they still parse as markdown.
pub fn inner_wrap(
    element: &Element,
    style: &str,
    source: &str,
) -> Result<Option<Edit>, PatchError> {
    let Some(children) = children_position(element) else {
        log::debug!("<{}> has no located children to wrap", element.tag_name);
        return Ok(None);
    };

    let wrapper = Element::wrapper(
        WrapperKind::Inner,
        &element.tag_name,
        element.children.clone(),
    );
    let multiline = children.start.line != children.end.line;
    let html = if multiline && element.children.iter().any(is_block) {
        let container = container_prefix(source, &children);
        let Some(body) = block_body(source, &children, &container) else {
            log::debug!("<{}> continues lazily, not wrapping it", element.tag_name);
            return Ok(None);
        };
        framed_block(&wrapper, style, &body, &container)?
    } else {
        let Some(interior) = source.get(children.range()) else {
            return Ok(None);
        };
        render_with_html_head(&wrapper, &style_attribute(style), interior)?
    };
    Ok(Some(Edit::new(children.range(), html)))
}

/// Replaces `element` with an outer wrapper holding its dedented source lines.
pub fn outer_wrap(
    element: &Element,
    style: &str,
    source: &str,
) -> Result<Option<Edit>, PatchError> {
    let Some(position) = element.position else {
        return Ok(None);
    };
    let container = container_prefix(source, &position);
    let Some(body) = block_body(source, &position, &container) else {
        log::debug!("<{}> continues lazily, not wrapping it", element.tag_name);
        return Ok(None);
    };

    let wrapper = Element::wrapper(
        WrapperKind::Outer,
        &element.tag_name,
        element.children.clone(),
    );
    let html = framed_block(&wrapper, style, &body, &container)?;
    Ok(Some(Edit::new(position.range(), html)))
}

/// Re-emits the element's own tag as raw HTML carrying the style.
///
/// Children are rendered back to markdown, except for wrappers, whose
/// interior is taken from the source so a restyle never rewrites content.
pub fn direct_attribute(
    element: &Element,
    style: &str,
    source: &str,
) -> Result<Option<Edit>, PatchError> {
    let Some(position) = element.position else {
        return Ok(None);
    };

    let interior = match (element_wrapper_kind(element), children_position(element)) {
        (Some(WrapperKind::Outer), _) => {
            return restyle_framed_wrapper(element, &position, style, source)
        }
        (Some(WrapperKind::Inner), Some(children)) => {
            if children.start.line > position.start.line {
                return restyle_framed_wrapper(element, &position, style, source);
            }
            match source.get(children.range()) {
                Some(slice) => slice.to_string(),
                None => render_interior(&element.children)?,
            }
        }
        _ => render_interior(&element.children)?,
    };

    let html = render_with_html_head(element, &style_attribute(style), &interior)?;
    Ok(Some(Edit::new(position.range(), html)))
}

/// Rebuilds a framed wrapper around the source lines of all its children.
fn restyle_framed_wrapper(
    wrapper: &Element,
    position: &Position,
    style: &str,
    source: &str,
) -> Result<Option<Edit>, PatchError> {
    let container = container_prefix(source, position);
    let body = match children_position(wrapper) {
        Some(children) => match block_body(source, &children, &container) {
            Some(body) => body,
            None => return Ok(None),
        },
        None => render_interior(&wrapper.children)?,
    };
    let html = framed_block(wrapper, style, &body, &container)?;
    Ok(Some(Edit::new(position.range(), html)))
}

/// `head` around `\n\n{body}\n`, with every line after the first behind `container`.
///
/// The blank line after the open tag ends the HTML block, so the body is
/// parsed as markdown again.
fn framed_block(
    head: &Element,
    style: &str,
    body: &str,
    container: &str,
) -> Result<String, PatchError> {
    let interior = format!("\n\n{body}\n");
    let html = render_with_html_head(head, &style_attribute(style), &interior)?;
    Ok(reindent(&html, container))
}

/// Children rendered to markdown, one line group per block, trimmed.
///
/// Runs of inline children are rendered together so a paragraph stays a
/// single line group.
fn render_interior(children: &[Node]) -> Result<String, PatchError> {
    let mut parts = Vec::new();
    let mut run: Vec<Node> = Vec::new();
    for child in children {
        if is_block(child) {
            if !run.is_empty() {
                parts.push(nodes_to_markdown(&run)?);
                run.clear();
            }
            parts.push(node_to_markdown(child)?);
        } else {
            run.push(child.clone());
        }
    }
    if !run.is_empty() {
        parts.push(nodes_to_markdown(&run)?);
    }

    let parts: Vec<&str> = parts
        .iter()
        .map(|part| part.trim_end())
        .filter(|part| !part.is_empty())
        .collect();
    Ok(parts.join("\n").trim().to_string())
}

fn style_attribute(style: &str) -> Properties {
    Properties::from([("style".to_string(), style.to_string())])
}

fn is_blank_text(node: &Node) -> bool {
    matches!(node, Node::Text(text) if text.value.trim().is_empty())
}

/// Positions of the children that hold content.
fn located_children(element: &Element) -> impl Iterator<Item = &Position> {
    element
        .children
        .iter()
        .filter(|child| !is_blank_text(child))
        .filter_map(Node::position)
}

/// From the first located child's start to the last located child's end.
pub(crate) fn children_position(element: &Element) -> Option<Position> {
    let start = located_children(element)
        .map(|position| position.start)
        .min_by_key(|point| point.offset)?;
    let end = located_children(element)
        .map(|position| position.end)
        .max_by_key(|point| point.offset)?;
    (start.offset <= end.offset).then(|| Position::new(start, end))
}

pub(crate) fn children_span(element: &Element) -> Option<Range<usize>> {
    children_position(element).map(|position| position.range())
}

/// Source lines `position.start.line..=position.end.line`, without newlines.
pub(crate) fn source_lines<'s>(source: &'s str, position: &Position) -> Vec<&'s str> {
    let first = position.start.line.saturating_sub(1);
    let count = position.end.line.saturating_sub(position.start.line) + 1;
    source.split('\n').skip(first).take(count).collect()
}

/// Prefix every continuation line of the node at `position` starts with.
///
/// Read off the text in front of the node on its first line: blockquote
/// markers are kept, list markers turn into the spaces that continue them.
pub(crate) fn container_prefix(source: &str, position: &Position) -> String {
    let column = position.start.column.saturating_sub(1);
    source_lines(source, position)
        .first()
        .and_then(|line| line.get(..column))
        .unwrap_or_default()
        .chars()
        .map(|c| if c == '>' || c.is_whitespace() { c } else { ' ' })
        .collect()
}

/// `line` without `container`. Missing whitespace is tolerated, a missing
/// `>` marker (a lazy continuation line) is not.
fn strip_container<'s>(line: &'s str, container: &str) -> Option<&'s str> {
    let mut rest = line;
    for marker in container.chars() {
        if marker == '>' {
            rest = rest.trim_start_matches(' ').strip_prefix('>')?;
        } else if let Some(stripped) = rest.strip_prefix(char::is_whitespace) {
            rest = stripped;
        }
    }
    Some(rest)
}

/// The lines of `position` as they read inside `container`, dedented.
///
/// The first line is cut at the node's column and keeps the indentation it
/// has past the container. `None` on a lazy continuation line.
pub(crate) fn block_body(source: &str, position: &Position, container: &str) -> Option<String> {
    let lines = source_lines(source, position);
    let (first, rest) = lines.split_first()?;
    let column = position.start.column.saturating_sub(1);
    let lead = column.saturating_sub(container.len());

    let mut content = vec![format!("{}{}", " ".repeat(lead), first.get(column..)?)];
    for line in rest {
        content.push(strip_container(line, container)?.to_string());
    }
    Some(trim_leads(&content, LeadingWhitespaceOptions::default()))
}

/// Puts every line of `text` after the first behind `container`.
///
/// Empty lines get the container's markers only, so a blank line inside a
/// blockquote stays inside it.
pub(crate) fn reindent(text: &str, container: &str) -> String {
    let lines: Vec<&str> = text.split('\n').collect();
    let Some((first, rest)) = lines.split_first() else {
        return text.to_string();
    };
    let rest = if container.chars().all(|c| c == ' ') {
        prepend_lead_to_lines(rest, container.len(), PrependOptions::default())
    } else {
        let markers = container.trim_end();
        rest.iter()
            .map(|line| {
                if line.is_empty() {
                    markers.to_string()
                } else {
                    format!("{container}{line}")
                }
            })
            .collect()
    };

    let mut output = vec![first.to_string()];
    output.extend(rest);
    output.join("\n")
}
