//! Markdown format implementation
//!
//! This module implements conversion between CommonMark Markdown and the
//! content tree, with every parsed node carrying its source span.
//!
//! # Library Choice
//!
//! We use the `comrak` crate for Markdown parsing and serialization:
//! - Single crate for both parsing and serialization
//! - Reports line/column source positions for block and inline nodes
//! - Supports the GFM extensions slides use (tables, strikethrough, autolinks)
//!
//! # Element Mapping Table
//!
//! | Markdown              | Content tree                      | Notes                                   |
//! |-----------------------|-----------------------------------|-----------------------------------------|
//! | Paragraph             | `p`                               | Unwrapped inside tight list items       |
//! | Heading               | `h1`..`h6`                        | ATX and setext                          |
//! | Thematic break        | `hr`                              | Slide separator                         |
//! | List / item           | `ul` / `ol` (`start`) / `li`      |                                         |
//! | Code block            | `pre > code.language-x`           | Both elements share the block span      |
//! | Block quote           | `blockquote`                      |                                         |
//! | Table                 | `table > thead/tbody > tr > th/td`| `align` from the delimiter row          |
//! | Raw HTML              | elements folded across blocks     | See `formats::html::parser`             |
//! | Emphasis, strong, del | `em`, `strong`, `del`             |                                         |
//! | Code span             | `code`                            |                                         |
//! | Link / image          | `a[href,title]` / `img[src,alt]`  |                                         |
//! | Soft / hard break     | `"\n"` text / `br`                |                                         |
//!
//! # Positions
//!
//! comrak positions are 1-based lines and columns with an inclusive end. They are
//! turned into byte offsets with an exclusive end by [`positions::LineIndex`], and
//! trailing whitespace is never part of a span.
//!
//! # Lossy Conversions
//!
//! Serializing back goes through comrak's CommonMark formatter, so markers,
//! emphasis delimiters and blank lines are normalized. The style engine only
//! re-serializes content it rewrites anyway; untouched source is sliced verbatim.

pub mod parser;
pub mod positions;
pub mod serializer;

use crate::error::PatchError;
use crate::format::Format;
use crate::tree::Node;
use comrak::ComrakOptions;

/// Format implementation for Markdown
pub struct MarkdownFormat;

impl Format for MarkdownFormat {
    fn name(&self) -> &str {
        "markdown"
    }

    fn description(&self) -> &str {
        "CommonMark Markdown with raw HTML"
    }

    fn file_extensions(&self) -> &[&str] {
        &["md", "markdown"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Node, PatchError> {
        parser::parse_markdown(source)
    }

    fn serialize(&self, node: &Node) -> Result<String, PatchError> {
        serializer::node_to_markdown(node)
    }
}

pub(crate) fn default_comrak_options() -> ComrakOptions<'static> {
    let mut options = ComrakOptions::default();
    options.extension.table = true;
    options.extension.strikethrough = true;
    options.extension.autolink = true;
    // Slides are separated by `---`, so front matter stays off
    options.render.unsafe_ = true;
    options
}
