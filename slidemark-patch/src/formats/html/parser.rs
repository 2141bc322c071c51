//! Raw HTML tokenizing and folding
//!
//! Markdown lets authors drop raw HTML anywhere: as whole blocks, inline inside
//! paragraphs, or as an open tag in one block and its close tag several blocks
//! later. The markdown parser hands those fragments here as [`RawToken`]s and
//! this module folds them, together with the markdown nodes between them, into
//! real elements.
//!
//! Tag boundaries are found by a small quote-aware scanner so every token keeps
//! its byte range. The text of each tag is then decoded by html5ever's
//! tokenizer, which takes care of attribute quoting, entities and name casing.

use crate::error::PatchError;
use crate::formats::markdown::positions::LineIndex;
use crate::style::marker::lift_wrapper_marker;
use crate::tree::{sanitize, Comment, Element, Node, Properties, Root, Text};
use html5ever::tendril::StrTendril;
use html5ever::tokenizer::{
    BufferQueue, Tag, TagKind, Token, TokenSink, TokenSinkResult, Tokenizer, TokenizerOpts,
};
use std::cell::RefCell;
use std::ops::Range;

/// Elements that never have children or an end tag.
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Elements whose content is text up to the matching end tag.
const RAW_TEXT_ELEMENTS: &[&str] = &["style", "script", "textarea", "title"];

/// Elements whose raw text content still has entities decoded.
const ESCAPABLE_RAW_TEXT_ELEMENTS: &[&str] = &["textarea", "title"];

pub fn is_void_element(tag_name: &str) -> bool {
    VOID_ELEMENTS.contains(&tag_name)
}

/// A piece of raw HTML with its byte range.
#[derive(Debug, Clone, PartialEq)]
pub enum RawToken {
    StartTag {
        name: String,
        attributes: Properties,
        self_closing: bool,
        range: Range<usize>,
    },
    EndTag {
        name: String,
        range: Range<usize>,
    },
    Text {
        value: String,
        range: Range<usize>,
    },
    Comment {
        value: String,
        range: Range<usize>,
    },
    Doctype,
}

impl RawToken {
    /// Rewrites the byte ranges of the token through `map`.
    pub fn map_offsets(self, map: impl Fn(usize) -> usize) -> Self {
        let remap = |range: Range<usize>| map(range.start)..map(range.end);
        match self {
            RawToken::StartTag {
                name,
                attributes,
                self_closing,
                range,
            } => RawToken::StartTag {
                name,
                attributes,
                self_closing,
                range: remap(range),
            },
            RawToken::EndTag { name, range } => RawToken::EndTag {
                name,
                range: remap(range),
            },
            RawToken::Text { value, range } => RawToken::Text {
                value,
                range: remap(range),
            },
            RawToken::Comment { value, range } => RawToken::Comment {
                value,
                range: remap(range),
            },
            RawToken::Doctype => RawToken::Doctype,
        }
    }
}

/// Splits `html` into tags, comments and text.
pub fn tokenize(html: &str) -> Vec<RawToken> {
    let mut tokens = Vec::new();
    let mut pos = 0;
    let mut text_start = 0;

    while pos < html.len() {
        let Some(found) = html[pos..].find('<') else {
            break;
        };
        pos += found;

        let Some((end, token)) = scan_markup(html, pos) else {
            pos += 1;
            continue;
        };
        push_text(html, text_start..pos, true, &mut tokens);

        let raw_text_name = match &token {
            RawToken::StartTag {
                name, self_closing, ..
            } if !self_closing && RAW_TEXT_ELEMENTS.contains(&name.as_str()) => {
                Some(name.clone())
            }
            _ => None,
        };
        tokens.push(token);
        pos = end;
        text_start = end;

        if let Some(name) = raw_text_name {
            let close = find_raw_text_end(html, pos, &name).unwrap_or(html.len());
            let decode = ESCAPABLE_RAW_TEXT_ELEMENTS.contains(&name.as_str());
            push_text(html, pos..close, decode, &mut tokens);
            pos = close;
            text_start = close;
        }
    }
    push_text(html, text_start..html.len(), true, &mut tokens);
    tokens
}

fn push_text(html: &str, range: Range<usize>, decode: bool, tokens: &mut Vec<RawToken>) {
    if range.is_empty() {
        return;
    }
    let raw = &html[range.clone()];
    let value = if decode {
        html_escape::decode_html_entities(raw).into_owned()
    } else {
        raw.to_string()
    };
    tokens.push(RawToken::Text { value, range });
}

/// Recognizes the markup starting at `pos` (which holds a `<`).
fn scan_markup(html: &str, pos: usize) -> Option<(usize, RawToken)> {
    let rest = &html[pos..];
    let bytes = rest.as_bytes();

    if rest.starts_with("<!--") {
        let (value_end, end) = match rest[4..].find("-->") {
            Some(index) => (pos + 4 + index, pos + 4 + index + 3),
            None => (html.len(), html.len()),
        };
        let value = html[pos + 4..value_end].to_string();
        return Some((
            end,
            RawToken::Comment {
                value,
                range: pos..end,
            },
        ));
    }

    if rest.starts_with("<!") || rest.starts_with("<?") {
        let close = rest.find('>');
        let end = close.map(|index| pos + index + 1).unwrap_or(html.len());
        if rest
            .get(..9)
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case("<!doctype"))
        {
            return Some((end, RawToken::Doctype));
        }
        let value = match close {
            Some(index) => rest[2..index].to_string(),
            None => rest[2..].to_string(),
        };
        return Some((
            end,
            RawToken::Comment {
                value,
                range: pos..end,
            },
        ));
    }

    let is_end_tag = bytes.get(1) == Some(&b'/');
    let name_start = if is_end_tag { 2 } else { 1 };
    if !bytes.get(name_start).is_some_and(u8::is_ascii_alphabetic) {
        return None;
    }

    let end = find_tag_end(html, pos + name_start)?;
    let tag = decode_tag(&html[pos..end])?;
    let name = tag.name.to_string();
    let token = match tag.kind {
        TagKind::StartTag => RawToken::StartTag {
            name,
            attributes: tag
                .attrs
                .iter()
                .map(|attr| (attr.name.local.to_string(), attr.value.to_string()))
                .collect(),
            self_closing: tag.self_closing,
            range: pos..end,
        },
        TagKind::EndTag => RawToken::EndTag {
            name,
            range: pos..end,
        },
    };
    Some((end, token))
}

/// Offset just past the `>` closing the tag, skipping quoted attribute values.
fn find_tag_end(html: &str, from: usize) -> Option<usize> {
    let mut quote: Option<u8> = None;
    let mut after_equals = false;

    for (index, byte) in html.bytes().enumerate().skip(from) {
        if let Some(open) = quote {
            if byte == open {
                quote = None;
            }
            continue;
        }
        match byte {
            b'>' => return Some(index + 1),
            b'"' | b'\'' if after_equals => {
                quote = Some(byte);
                after_equals = false;
            }
            b'=' => after_equals = true,
            _ if byte.is_ascii_whitespace() => {}
            _ => after_equals = false,
        }
    }
    None
}

fn find_raw_text_end(html: &str, from: usize, name: &str) -> Option<usize> {
    let needle = format!("</{name}");
    html[from..]
        .to_ascii_lowercase()
        .find(&needle)
        .map(|index| from + index)
}

#[derive(Default)]
struct TagCollector {
    tags: RefCell<Vec<Tag>>,
}

impl TokenSink for TagCollector {
    type Handle = ();

    fn process_token(&self, token: Token, _line_number: u64) -> TokenSinkResult<()> {
        if let Token::TagToken(tag) = token {
            self.tags.borrow_mut().push(tag);
        }
        TokenSinkResult::Continue
    }
}

/// Runs html5ever's tokenizer over the text of a single tag.
fn decode_tag(markup: &str) -> Option<Tag> {
    let tokenizer = Tokenizer::new(TagCollector::default(), TokenizerOpts::default());
    let input = BufferQueue::default();
    input.push_back(StrTendril::from(markup));
    let _ = tokenizer.feed(&input);
    tokenizer.end();
    tokenizer.sink.tags.take().into_iter().next()
}

/// Input of [`fold`]: markdown nodes already converted, interleaved with raw HTML.
#[derive(Debug, Clone, PartialEq)]
pub enum Piece {
    Node(Node),
    Markup(RawToken),
}

struct OpenElement {
    element: Element,
    start: usize,
    open_end: usize,
}

/// Folds a run of sibling pieces into a list of nodes.
///
/// Start and end tags pair up by name. An end tag with no open element is
/// dropped; elements still open at the end of the run are closed there.
pub fn fold(pieces: Vec<Piece>, index: &LineIndex) -> Vec<Node> {
    let mut output = Vec::new();
    let mut stack: Vec<OpenElement> = Vec::new();

    for piece in pieces {
        let token = match piece {
            Piece::Node(node) => {
                push_node(&mut stack, &mut output, node);
                continue;
            }
            Piece::Markup(token) => token,
        };

        match token {
            RawToken::Text { value, range } => {
                let node = Node::Text(Text {
                    value,
                    position: index.position(range.start, range.end),
                });
                push_node(&mut stack, &mut output, node);
            }
            RawToken::Comment { value, range } => {
                let node = Node::Comment(Comment {
                    value,
                    position: index.position(range.start, range.end),
                });
                push_node(&mut stack, &mut output, node);
            }
            RawToken::Doctype => push_node(&mut stack, &mut output, Node::Doctype),
            RawToken::StartTag {
                name,
                attributes,
                self_closing,
                range,
            } => {
                let mut element = Element::new(name);
                element.properties = attributes;
                lift_wrapper_marker(&mut element);

                if self_closing || is_void_element(&element.tag_name) {
                    element.position = index.position(range.start, range.end);
                    push_node(&mut stack, &mut output, element.into());
                } else {
                    stack.push(OpenElement {
                        element,
                        start: range.start,
                        open_end: range.end,
                    });
                }
            }
            RawToken::EndTag { name, range } => {
                let Some(depth) = stack.iter().rposition(|open| open.element.tag_name == name)
                else {
                    log::debug!("ignoring stray </{name}>");
                    continue;
                };
                while stack.len() > depth + 1 {
                    close_implicitly(&mut stack, &mut output, index);
                }
                if let Some(open) = stack.pop() {
                    let node = finish(open, range.end, index);
                    push_node(&mut stack, &mut output, node);
                }
            }
        }
    }

    while !stack.is_empty() {
        close_implicitly(&mut stack, &mut output, index);
    }
    output
}

fn push_node(stack: &mut [OpenElement], output: &mut Vec<Node>, node: Node) {
    match stack.last_mut() {
        Some(open) => open.element.children.push(node),
        None => output.push(node),
    }
}

fn close_implicitly(stack: &mut Vec<OpenElement>, output: &mut Vec<Node>, index: &LineIndex) {
    let Some(open) = stack.pop() else {
        return;
    };
    let end = open
        .element
        .children
        .iter()
        .filter_map(|child| child.position().map(|position| position.end.offset))
        .fold(open.open_end, usize::max);
    let node = finish(open, end, index);
    push_node(stack, output, node);
}

fn finish(open: OpenElement, end: usize, index: &LineIndex) -> Node {
    let OpenElement {
        mut element, start, ..
    } = open;
    element.position = index.position(start, end);
    element.into()
}

/// Parses a standalone HTML fragment into a content tree.
pub fn parse_html(html: &str) -> Result<Node, PatchError> {
    let index = LineIndex::new(html);
    let pieces = tokenize(html).into_iter().map(Piece::Markup).collect();
    let children = fold(pieces, &index);
    Ok(sanitize(&Node::Root(Root {
        children,
        position: index.position(0, html.len()),
    })))
}
