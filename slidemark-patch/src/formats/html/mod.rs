//! HTML format implementation
//!
//! # Library Choice
//!
//! We use the `html5ever` + `markup5ever_rcdom` ecosystem:
//! - `html5ever`'s tokenizer decodes tag names, attributes and entities
//! - `markup5ever_rcdom` handles plus the html5ever serializer produce markup
//!
//! Parsing does not run the HTML5 tree builder. Markdown embeds fragments of
//! HTML whose tags pair up across markdown blocks, and every element has to keep
//! a byte span into the markdown source, so tags are folded by name instead
//! (see [`parser::fold`]).
//!
//! # Output
//!
//! Serialization emits a fragment, not a document: no `html`/`body` wrappers.
//! Wrapper markers become their class tokens, and `data-node-index-trace`
//! attributes are kept so rendered slides can be mapped back to tree nodes.

pub mod parser;
pub mod serializer;

use crate::error::PatchError;
use crate::format::Format;
use crate::tree::Node;

/// Format implementation for HTML fragments
#[derive(Default)]
pub struct HtmlFormat;

impl Format for HtmlFormat {
    fn name(&self) -> &str {
        "html"
    }

    fn description(&self) -> &str {
        "HTML fragment"
    }

    fn file_extensions(&self) -> &[&str] {
        &["html", "htm"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Node, PatchError> {
        parser::parse_html(source)
    }

    fn serialize(&self, node: &Node) -> Result<String, PatchError> {
        serializer::node_to_html(node)
    }
}
