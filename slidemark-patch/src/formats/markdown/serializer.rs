//! Markdown serialization (content tree → Markdown)
//!
//! Pipeline: content tree → Comrak AST → Markdown string.
//!
//! Elements with a markdown form are mapped onto comrak nodes. Anything else,
//! style wrappers included, is kept as raw HTML so no attribute is lost.

use super::default_comrak_options;
use crate::error::PatchError;
use crate::formats::html::serializer::node_to_html;
use crate::tree::{text_content, Element, Node};
use comrak::nodes::{
    Ast, AstNode, ListDelimType, ListType, NodeCode, NodeCodeBlock, NodeHeading, NodeHtmlBlock,
    NodeLink, NodeList, NodeValue,
};
use comrak::{format_commonmark, Arena};
use std::cell::RefCell;

const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "details", "div", "dl", "fieldset",
    "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header",
    "hr", "li", "main", "nav", "ol", "p", "pre", "section", "style", "table", "ul",
];

/// Render a node as markdown.
pub fn node_to_markdown(node: &Node) -> Result<String, PatchError> {
    match node {
        Node::Root(root) => nodes_to_markdown(&root.children),
        _ => nodes_to_markdown(std::slice::from_ref(node)),
    }
}

/// Render a list of sibling nodes as markdown.
pub fn nodes_to_markdown(nodes: &[Node]) -> Result<String, PatchError> {
    let arena = Arena::new();
    let root = alloc(&arena, NodeValue::Document);
    append_flow(&arena, root, nodes)?;

    let mut output = Vec::new();
    let options = default_comrak_options();
    format_commonmark(root, &options, &mut output).map_err(|e| {
        PatchError::SerializationError(format!("Comrak serialization failed: {e}"))
    })?;

    let markdown = String::from_utf8(output)
        .map_err(|e| PatchError::SerializationError(format!("UTF-8 conversion failed: {e}")))?;

    // Consecutive lists are separated by comrak with a marker comment
    Ok(markdown.replace("<!-- end list -->\n\n", ""))
}

fn alloc<'a>(arena: &'a Arena<AstNode<'a>>, value: NodeValue) -> &'a AstNode<'a> {
    arena.alloc(AstNode::new(RefCell::new(Ast::new(value, (0, 0).into()))))
}

pub(crate) fn is_block(node: &Node) -> bool {
    match node {
        Node::Element(element) => {
            element.wrapper.is_some() || BLOCK_TAGS.contains(&element.tag_name.as_str())
        }
        Node::Comment(_) | Node::Root(_) => true,
        Node::Text(_) | Node::Doctype => false,
    }
}

/// Appends mixed content, gathering runs of inline nodes into paragraphs.
fn append_flow<'a>(
    arena: &'a Arena<AstNode<'a>>,
    parent: &'a AstNode<'a>,
    nodes: &[Node],
) -> Result<(), PatchError> {
    let mut run: Vec<&Node> = Vec::new();
    for node in nodes {
        if is_block(node) {
            flush_inline_run(arena, parent, &mut run)?;
            append_block(arena, parent, node)?;
        } else {
            run.push(node);
        }
    }
    flush_inline_run(arena, parent, &mut run)
}

fn flush_inline_run<'a>(
    arena: &'a Arena<AstNode<'a>>,
    parent: &'a AstNode<'a>,
    run: &mut Vec<&Node>,
) -> Result<(), PatchError> {
    let blank = run
        .iter()
        .all(|node| matches!(node, Node::Text(text) if text.value.trim().is_empty()));
    if !blank {
        let paragraph = alloc(arena, NodeValue::Paragraph);
        parent.append(paragraph);
        for node in run.iter() {
            append_inline(arena, paragraph, node)?;
        }
    }
    run.clear();
    Ok(())
}

fn append_block<'a>(
    arena: &'a Arena<AstNode<'a>>,
    parent: &'a AstNode<'a>,
    node: &Node,
) -> Result<(), PatchError> {
    let element = match node {
        Node::Element(element) => element,
        Node::Root(root) => return append_flow(arena, parent, &root.children),
        Node::Comment(_) => return append_html_block(arena, parent, node),
        Node::Text(_) | Node::Doctype => return Ok(()),
    };
    if element.wrapper.is_some() {
        return append_html_block(arena, parent, node);
    }

    match element.tag_name.as_str() {
        "p" => {
            let paragraph = alloc(arena, NodeValue::Paragraph);
            parent.append(paragraph);
            append_inlines(arena, paragraph, &element.children)?;
        }
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
            let level = element.tag_name[1..].parse::<u8>().unwrap_or(1);
            let heading = alloc(
                arena,
                NodeValue::Heading(NodeHeading {
                    level,
                    setext: false,
                }),
            );
            parent.append(heading);
            append_inlines(arena, heading, &element.children)?;
        }
        "ul" | "ol" => append_list(arena, parent, element, &element.children)?,
        "li" => append_list(arena, parent, &Element::new("ul"), std::slice::from_ref(node))?,
        "pre" => {
            let code = element.children.iter().find(|child| child.is_element("code"));
            let info = code
                .and_then(Node::as_element)
                .and_then(|code| code.attribute("class"))
                .and_then(|class| {
                    class
                        .split_whitespace()
                        .find_map(|token| token.strip_prefix("language-"))
                })
                .unwrap_or_default()
                .to_string();
            let mut literal = text_content(node);
            if !literal.ends_with('\n') {
                literal.push('\n');
            }
            parent.append(alloc(
                arena,
                NodeValue::CodeBlock(NodeCodeBlock {
                    fenced: true,
                    fence_char: b'`',
                    fence_length: 3,
                    fence_offset: 0,
                    info,
                    literal,
                }),
            ));
        }
        "blockquote" => {
            let quote = alloc(arena, NodeValue::BlockQuote);
            parent.append(quote);
            append_flow(arena, quote, &element.children)?;
        }
        "hr" => parent.append(alloc(arena, NodeValue::ThematicBreak)),
        _ => append_html_block(arena, parent, node)?,
    }
    Ok(())
}

fn append_list<'a>(
    arena: &'a Arena<AstNode<'a>>,
    parent: &'a AstNode<'a>,
    list: &Element,
    items: &[Node],
) -> Result<(), PatchError> {
    let ordered = list.tag_name == "ol";
    let start = list
        .attribute("start")
        .and_then(|start| start.parse().ok())
        .unwrap_or(1);
    let node_list = NodeList {
        list_type: if ordered {
            ListType::Ordered
        } else {
            ListType::Bullet
        },
        marker_offset: 0,
        padding: 0,
        start,
        delimiter: ListDelimType::Period,
        bullet_char: b'-',
        tight: true,
    };

    let list_node = alloc(arena, NodeValue::List(node_list));
    parent.append(list_node);
    for item in items {
        let Node::Element(item) = item else {
            continue;
        };
        let item_node = alloc(arena, NodeValue::Item(node_list));
        list_node.append(item_node);
        append_flow(arena, item_node, &item.children)?;
    }
    Ok(())
}

fn append_html_block<'a>(
    arena: &'a Arena<AstNode<'a>>,
    parent: &'a AstNode<'a>,
    node: &Node,
) -> Result<(), PatchError> {
    let literal = match node {
        Node::Comment(comment) => format!("<!--{}-->", comment.value),
        _ => node_to_html(node)?,
    };
    parent.append(alloc(
        arena,
        NodeValue::HtmlBlock(NodeHtmlBlock {
            block_type: 6,
            literal,
        }),
    ));
    Ok(())
}

fn append_inlines<'a>(
    arena: &'a Arena<AstNode<'a>>,
    parent: &'a AstNode<'a>,
    nodes: &[Node],
) -> Result<(), PatchError> {
    for node in nodes {
        append_inline(arena, parent, node)?;
    }
    Ok(())
}

fn append_inline<'a>(
    arena: &'a Arena<AstNode<'a>>,
    parent: &'a AstNode<'a>,
    node: &Node,
) -> Result<(), PatchError> {
    let element = match node {
        Node::Text(text) => {
            for (index, line) in text.value.split('\n').enumerate() {
                if index > 0 {
                    parent.append(alloc(arena, NodeValue::SoftBreak));
                }
                if !line.is_empty() {
                    parent.append(alloc(arena, NodeValue::Text(line.to_string())));
                }
            }
            return Ok(());
        }
        Node::Comment(comment) => {
            let literal = format!("<!--{}-->", comment.value);
            parent.append(alloc(arena, NodeValue::HtmlInline(literal)));
            return Ok(());
        }
        Node::Element(element) => element,
        Node::Root(_) | Node::Doctype => return Ok(()),
    };

    let container = match element.tag_name.as_str() {
        "em" | "i" => NodeValue::Emph,
        "strong" | "b" => NodeValue::Strong,
        "del" | "s" => NodeValue::Strikethrough,
        "a" => NodeValue::Link(NodeLink {
            url: element.attribute("href").unwrap_or_default().to_string(),
            title: element.attribute("title").unwrap_or_default().to_string(),
        }),
        "code" => {
            parent.append(alloc(
                arena,
                NodeValue::Code(NodeCode {
                    num_backticks: 1,
                    literal: text_content(node),
                }),
            ));
            return Ok(());
        }
        "img" => {
            let image = alloc(
                arena,
                NodeValue::Image(NodeLink {
                    url: element.attribute("src").unwrap_or_default().to_string(),
                    title: element.attribute("title").unwrap_or_default().to_string(),
                }),
            );
            let alt = element.attribute("alt").unwrap_or_default();
            if !alt.is_empty() {
                image.append(alloc(arena, NodeValue::Text(alt.to_string())));
            }
            parent.append(image);
            return Ok(());
        }
        "br" => {
            parent.append(alloc(arena, NodeValue::LineBreak));
            return Ok(());
        }
        _ => {
            parent.append(alloc(arena, NodeValue::HtmlInline(node_to_html(node)?)));
            return Ok(());
        }
    };

    let inline = alloc(arena, container);
    parent.append(inline);
    append_inlines(arena, inline, &element.children)
}
