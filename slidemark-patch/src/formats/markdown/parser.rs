//! Markdown parsing (Markdown → content tree)
//!
//! Pipeline: Markdown string → Comrak AST → pieces → folded content tree.
//!
//! The tree follows the usual markdown-to-HTML conventions: tight list items
//! unwrap their paragraphs, block children are separated by `"\n"` text nodes
//! and fenced code becomes `pre > code.language-x`. Every node converted from
//! comrak keeps its source span as byte offsets. Raw HTML is tokenized and
//! folded with the markdown nodes around it (see [`crate::formats::html::parser`]).

use super::default_comrak_options;
use super::positions::LineIndex;
use crate::error::PatchError;
use crate::formats::html::parser::{fold, tokenize, Piece};
use crate::tree::{sanitize, Element, Node, Position, Root, Text};
use comrak::nodes::{AstNode, ListType, NodeValue, TableAlignment};
use comrak::{parse_document, Arena};

/// Parse a markdown string into a positioned content tree.
pub fn parse_markdown(source: &str) -> Result<Node, PatchError> {
    let arena = Arena::new();
    let options = default_comrak_options();
    let root = parse_document(&arena, source, &options);

    let converter = Converter {
        index: LineIndex::new(source),
    };
    let pieces = converter.block_pieces(root, false);
    let children = fold(pieces, &converter.index);

    Ok(sanitize(&Node::Root(Root {
        children,
        position: converter.index.position(0, source.len()),
    })))
}

struct Converter<'s> {
    index: LineIndex<'s>,
}

impl<'s> Converter<'s> {
    fn position<'a>(&self, node: &'a AstNode<'a>) -> Option<Position> {
        self.index.sourcepos_position(&node.data.borrow().sourcepos)
    }

    fn element<'a>(
        &self,
        tag_name: &str,
        node: &'a AstNode<'a>,
        children: Vec<Node>,
    ) -> Element {
        Element {
            position: self.position(node),
            ..Element::new(tag_name).with_children(children)
        }
    }

    /// Block children of `node`, separated by newline text.
    fn block_pieces<'a>(&self, node: &'a AstNode<'a>, loose: bool) -> Vec<Piece> {
        let blocks = node
            .children()
            .map(|child| self.block(child))
            .filter(|pieces| !pieces.is_empty())
            .collect();
        wrap(blocks, loose)
    }

    fn block<'a>(&self, node: &'a AstNode<'a>) -> Vec<Piece> {
        let value = node.data.borrow().value.clone();
        let element = match value {
            NodeValue::Paragraph => {
                let children = fold(self.inline_children(node), &self.index);
                self.element("p", node, children)
            }
            NodeValue::Heading(heading) => {
                let tag_name = format!("h{}", heading.level.clamp(1, 6));
                let children = fold(self.inline_children(node), &self.index);
                self.element(&tag_name, node, children)
            }
            NodeValue::ThematicBreak => self.element("hr", node, vec![]),
            NodeValue::BlockQuote => {
                let children = fold(self.block_pieces(node, true), &self.index);
                self.element("blockquote", node, children)
            }
            NodeValue::List(list) => {
                let tight = list.tight;
                let items = node
                    .children()
                    .map(|item| vec![Piece::Node(self.list_item(item, tight).into())])
                    .collect();
                let children = fold(wrap(items, true), &self.index);
                match list.list_type {
                    ListType::Bullet => self.element("ul", node, children),
                    ListType::Ordered if list.start != 1 => self
                        .element("ol", node, children)
                        .with_attribute("start", list.start.to_string()),
                    ListType::Ordered => self.element("ol", node, children),
                }
            }
            NodeValue::Item(_) => self.list_item(node, true),
            NodeValue::CodeBlock(code_block) => {
                let mut code = self.element("code", node, vec![Node::text(code_block.literal)]);
                if let Some(language) = code_block.info.split_whitespace().next() {
                    code = code.with_attribute("class", format!("language-{language}"));
                }
                self.element("pre", node, vec![code.into()])
            }
            NodeValue::HtmlBlock(html) => {
                let start_line = node.data.borrow().sourcepos.start.line;
                let map = LiteralMap::new(&self.index, &html.literal, start_line, None);
                return tokenize(&html.literal)
                    .into_iter()
                    .map(|token| Piece::Markup(token.map_offsets(|offset| map.to_source(offset))))
                    .collect();
            }
            NodeValue::Table(table) => self.table(node, &table.alignments),
            NodeValue::Document => return self.block_pieces(node, false),
            other => {
                log::debug!("flattening unsupported block {other:?}");
                return self.block_pieces(node, false);
            }
        };
        vec![Piece::Node(element.into())]
    }

    fn list_item<'a>(&self, node: &'a AstNode<'a>, tight: bool) -> Element {
        let children: Vec<_> = node.children().collect();
        let mut pieces = Vec::new();

        for (index, child) in children.iter().enumerate() {
            let paragraph = is_paragraph(child);
            if !tight || index != 0 || !paragraph {
                pieces.push(newline());
            }
            if paragraph && tight {
                pieces.extend(self.inline_children(child));
            } else {
                pieces.extend(self.block(child));
            }
        }
        if let Some(last) = children.last() {
            if !tight || !is_paragraph(last) {
                pieces.push(newline());
            }
        }

        self.element("li", node, fold(pieces, &self.index))
    }

    fn table<'a>(&self, node: &'a AstNode<'a>, alignments: &[TableAlignment]) -> Element {
        let mut head = Vec::new();
        let mut body = Vec::new();
        for row in node.children() {
            let header = matches!(row.data.borrow().value, NodeValue::TableRow(true));
            let cells = row
                .children()
                .enumerate()
                .map(|(column, cell)| {
                    let children = fold(self.inline_children(cell), &self.index);
                    let cell = self.element(if header { "th" } else { "td" }, cell, children);
                    let cell = match alignments.get(column) {
                        Some(TableAlignment::Left) => cell.with_attribute("align", "left"),
                        Some(TableAlignment::Center) => cell.with_attribute("align", "center"),
                        Some(TableAlignment::Right) => cell.with_attribute("align", "right"),
                        Some(TableAlignment::None) | None => cell,
                    };
                    vec![Piece::Node(cell.into())]
                })
                .collect();
            let tr = self.element("tr", row, fold(wrap(cells, true), &self.index));
            if header {
                head.push(tr);
            } else {
                body.push(tr);
            }
        }

        let mut sections = Vec::new();
        for (tag_name, rows) in [("thead", head), ("tbody", body)] {
            if rows.is_empty() {
                continue;
            }
            let position = span_of(rows.iter().filter_map(|row| row.position), &self.index);
            let rows = rows.into_iter().map(|row| vec![Piece::Node(row.into())]).collect();
            let section = Element {
                position,
                ..Element::new(tag_name).with_children(fold(wrap(rows, true), &self.index))
            };
            sections.push(vec![Piece::Node(section.into())]);
        }
        self.element("table", node, fold(wrap(sections, true), &self.index))
    }

    /// Inline children of `node` with adjacent text merged.
    fn inline_children<'a>(&self, node: &'a AstNode<'a>) -> Vec<Piece> {
        let mut pieces = Vec::new();
        for child in node.children() {
            self.inline(child, &mut pieces);
        }
        merge_text(pieces)
    }

    fn inline<'a>(&self, node: &'a AstNode<'a>, pieces: &mut Vec<Piece>) {
        let value = node.data.borrow().value.clone();
        let position = self.position(node);
        let element = match value {
            NodeValue::Text(text) => {
                pieces.push(Piece::Node(Node::Text(Text {
                    value: text,
                    position,
                })));
                return;
            }
            NodeValue::SoftBreak => {
                pieces.push(newline());
                return;
            }
            NodeValue::LineBreak => {
                pieces.push(Piece::Node(self.element("br", node, vec![]).into()));
                pieces.push(newline());
                return;
            }
            NodeValue::HtmlInline(raw) => {
                let start = node.data.borrow().sourcepos.start;
                let first_offset = position.map(|position| position.start.offset);
                let map = LiteralMap::new(&self.index, &raw, start.line, first_offset);
                pieces.extend(tokenize(&raw).into_iter().map(|token| {
                    Piece::Markup(token.map_offsets(|offset| map.to_source(offset)))
                }));
                return;
            }
            NodeValue::Code(code) => self.element("code", node, vec![Node::text(code.literal)]),
            NodeValue::Emph => self.inline_element("em", node),
            NodeValue::Strong => self.inline_element("strong", node),
            NodeValue::Strikethrough => self.inline_element("del", node),
            NodeValue::Link(link) => {
                let mut a = self.inline_element("a", node).with_attribute("href", link.url);
                if !link.title.is_empty() {
                    a = a.with_attribute("title", link.title);
                }
                a
            }
            NodeValue::Image(link) => {
                let alt = crate::tree::text_content(&Node::root(fold(
                    self.inline_children(node),
                    &self.index,
                )));
                let mut img = self
                    .element("img", node, vec![])
                    .with_attribute("src", link.url)
                    .with_attribute("alt", alt);
                if !link.title.is_empty() {
                    img = img.with_attribute("title", link.title);
                }
                img
            }
            other => {
                log::debug!("flattening unsupported inline {other:?}");
                for child in node.children() {
                    self.inline(child, pieces);
                }
                return;
            }
        };
        pieces.push(Piece::Node(element.into()));
    }

    fn inline_element<'a>(&self, tag_name: &str, node: &'a AstNode<'a>) -> Element {
        let children = fold(self.inline_children(node), &self.index);
        self.element(tag_name, node, children)
    }
}

fn is_paragraph<'a>(node: &'a AstNode<'a>) -> bool {
    matches!(node.data.borrow().value, NodeValue::Paragraph)
}

fn newline() -> Piece {
    Piece::Node(Node::text("\n"))
}

/// Joins block outputs with newline text, also framing them when `loose`.
fn wrap(blocks: Vec<Vec<Piece>>, loose: bool) -> Vec<Piece> {
    let mut output = Vec::new();
    if loose {
        output.push(newline());
    }
    let has_blocks = !blocks.is_empty();
    for (index, block) in blocks.into_iter().enumerate() {
        if index > 0 {
            output.push(newline());
        }
        output.extend(block);
    }
    if loose && has_blocks {
        output.push(newline());
    }
    output
}

/// Merges runs of adjacent text nodes, as comrak splits text at breaks and
/// special characters.
fn merge_text(pieces: Vec<Piece>) -> Vec<Piece> {
    let mut output: Vec<Piece> = Vec::with_capacity(pieces.len());
    for piece in pieces {
        if let (Some(Piece::Node(Node::Text(previous))), Piece::Node(Node::Text(next))) =
            (output.last_mut(), &piece)
        {
            previous.value.push_str(&next.value);
            previous.position = match (previous.position, next.position) {
                (Some(first), Some(last)) => Some(Position::new(first.start, last.end)),
                (first, None) => first,
                (None, last) => last,
            };
            continue;
        }
        output.push(piece);
    }
    output
}

fn span_of(positions: impl Iterator<Item = Position>, index: &LineIndex) -> Option<Position> {
    let mut positions = positions.peekable();
    let first = *positions.peek()?;
    let end = positions.fold(first.end.offset, |end, position| end.max(position.end.offset));
    index.position(first.start.offset, end)
}

/// Maps byte offsets inside a comrak literal back to the source.
///
/// comrak strips container prefixes (list indentation, `> ` markers) from the
/// lines of raw HTML, so each literal line is located on its own source line.
struct LiteralMap {
    /// (offset of the line in the literal, offset of the same text in the source)
    lines: Vec<(usize, usize)>,
    source_len: usize,
}

impl LiteralMap {
    fn new(
        index: &LineIndex,
        literal: &str,
        first_line: usize,
        first_offset: Option<usize>,
    ) -> Self {
        let mut lines = Vec::new();
        let mut literal_offset = 0;

        for (number, raw_line) in literal.split('\n').enumerate() {
            let line = first_line + number;
            let text = raw_line.strip_suffix('\r').unwrap_or(raw_line);
            let line_start = index.line_start(line).unwrap_or(index.source().len());
            let base = match (number, first_offset, index.line_text(line)) {
                (0, Some(offset), _) => offset,
                (_, _, Some(_)) if text.is_empty() => line_start,
                (0, None, Some(source_line)) if source_line.ends_with(text) => {
                    line_start + source_line.len() - text.len()
                }
                (_, _, Some(source_line)) => source_line
                    .rfind(text)
                    .map(|found| line_start + found)
                    .unwrap_or(line_start),
                (_, _, None) => line_start,
            };
            lines.push((literal_offset, base));
            literal_offset += raw_line.len() + 1;
        }

        Self {
            lines,
            source_len: index.source().len(),
        }
    }

    fn to_source(&self, offset: usize) -> usize {
        let line = self
            .lines
            .partition_point(|(start, _)| *start <= offset)
            .saturating_sub(1);
        let (literal_start, base) = self.lines.get(line).copied().unwrap_or((0, 0));
        (base + offset - literal_start).min(self.source_len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{remove_blank_text_nodes, WrapperKind};

    fn normalized(source: &str) -> Node {
        remove_blank_text_nodes(&parse_markdown(source).unwrap())
    }

    fn slice<'s>(source: &'s str, node: &Node) -> &'s str {
        &source[node.position().unwrap().range()]
    }

    #[test]
    fn test_paragraph_with_emphasis() {
        let source = "a *markdown* text";
        let root = normalized(source);
        let p = root.children()[0].as_element().unwrap();
        assert_eq!(p.tag_name, "p");
        assert_eq!(p.children.len(), 3);
        assert!(p.children[1].is_element("em"));
        assert_eq!(slice(source, &root.children()[0]), source);
    }

    #[test]
    fn test_tight_list_items_unwrap_paragraphs() {
        let source = "* 1st item\n* 2nd item\n";
        let root = normalized(source);
        let ul = root.children()[0].as_element().unwrap();
        assert_eq!(ul.tag_name, "ul");
        assert_eq!(slice(source, &root.children()[0]), "* 1st item\n* 2nd item");

        let li = &ul.children[0];
        assert_eq!(slice(source, li), "* 1st item");
        assert_eq!(li.children().len(), 1);
        assert_eq!(crate::tree::text_content(li), "1st item");
        assert_eq!(slice(source, &li.children()[0]), "1st item");
    }

    #[test]
    fn test_nested_list_span() {
        let source = "* parent list\n  - 1st item of child list\n  - 2nd item of child list\n* ending list item\n";
        let root = normalized(source);
        let outer = root.children()[0].as_element().unwrap();
        let inner = outer.children[0].children()[1].as_element().unwrap();
        assert_eq!(inner.tag_name, "ul");
        let position = inner.position.unwrap();
        assert_eq!(position.start.line, 2);
        assert_eq!(position.start.column, 3);
        assert_eq!(position.end.line, 3);
        assert_eq!(
            &source[position.range()],
            "- 1st item of child list\n  - 2nd item of child list"
        );
    }

    #[test]
    fn test_code_block() {
        let source = "```js\nlet a = 1;\n```\n";
        let root = normalized(source);
        let pre = root.children()[0].as_element().unwrap();
        assert_eq!(pre.tag_name, "pre");
        let code = pre.children[0].as_element().unwrap();
        assert_eq!(code.attribute("class"), Some("language-js"));
        assert_eq!(crate::tree::text_content(&pre.children[0]), "let a = 1;\n");
        assert_eq!(slice(source, &root.children()[0]), source.trim_end());
    }

    #[test]
    fn test_html_block_folds_markdown_between_tags() {
        let source = "<div class=\"wrapper outer-wrapper ul-outer-wrapper\" style=\"color: blue;\">\n\n- a\n- b\n</div>\n";
        let root = normalized(source);
        assert_eq!(root.children().len(), 1);
        let div = root.children()[0].as_element().unwrap();
        assert_eq!(div.wrapper.as_ref().map(|marker| marker.kind), Some(WrapperKind::Outer));
        assert_eq!(div.attribute("style"), Some("color: blue;"));
        assert_eq!(div.attribute("class"), None);
        assert_eq!(div.children.len(), 1);
        assert!(div.children[0].is_element("ul"));
        assert_eq!(slice(source, &root.children()[0]), source.trim_end());
    }

    #[test]
    fn test_html_inside_list_item() {
        let source = "* <div class=\"wrapper inner-wrapper li-inner-wrapper\">1st item</div>\n";
        let root = normalized(source);
        let li = &root.children()[0].children()[0];
        let div = &li.children()[0];
        assert_eq!(
            slice(source, div),
            "<div class=\"wrapper inner-wrapper li-inner-wrapper\">1st item</div>"
        );
        assert_eq!(slice(source, &div.children()[0]), "1st item");
    }

    #[test]
    fn test_inline_html() {
        let source = "some <span style=\"color: red;\">red</span> text";
        let root = normalized(source);
        let p = root.children()[0].as_element().unwrap();
        let span = p.children[1].as_element().unwrap();
        assert_eq!(span.tag_name, "span");
        assert_eq!(
            slice(source, &p.children[1]),
            "<span style=\"color: red;\">red</span>"
        );
    }

    #[test]
    fn test_ordered_list_start() {
        let root = normalized("3. three\n4. four\n");
        let ol = root.children()[0].as_element().unwrap();
        assert_eq!(ol.tag_name, "ol");
        assert_eq!(ol.attribute("start"), Some("3"));
    }

    #[test]
    fn test_thematic_break_and_heading() {
        let root = normalized("# Title\n\n---\n\ntext\n");
        let tags: Vec<_> = root
            .children()
            .iter()
            .filter_map(|node| node.as_element().map(|element| element.tag_name.as_str()))
            .collect();
        assert_eq!(tags, vec!["h1", "hr", "p"]);
    }
}
