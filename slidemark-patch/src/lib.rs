//! Markdown-patch engine for a WYSIWYG slide editor
//!
//!     The editor keeps a markdown buffer as the single source of truth and shows it as rendered
//!     slides. Users select an element on a slide and give it an inline style; this crate turns
//!     that into the smallest edit of the markdown that produces the style, and undoes it again.
//!
//!     TLDR for contributors:
//!         - The markdown source is never mutated in place: operations return an Edit (range + replacement).
//!         - Source that is not being restyled is copied byte for byte, never re-serialized.
//!         - Every parsed node keeps its byte span, so a node can always be mapped back to its markdown.
//!         - Parsing and serialization are left to comrak, html5ever and lightningcss; this crate
//!           adapts their trees to ours and back.
//!         - This is a pure lib: no printing, no env vars, no file access. The CLI lives in slidemark-cli.
//!
//! Architecture
//!
//!     The file structure :
//!     .
//!     ├── error.rs
//!     ├── edit.rs                 # Range replacements over the source
//!     ├── format.rs               # Format trait definition
//!     ├── registry.rs             # FormatRegistry for discovery and selection
//!     ├── tree                    # Content tree, normalization, traces, sanitizing
//!     ├── common                  # Indentation utilities
//!     ├── formats
//!     │   ├── markdown            # comrak AST <-> content tree, with positions
//!     │   ├── html                # tag folding parser, rcdom serializer
//!     │   ├── css                 # stylesheet scoping
//!     │   └── json                # tree dump
//!     ├── style                   # wrapper markers, wrapping strategies, removal
//!     ├── locator.rs              # node lookup by index trace
//!     ├── selection.rs
//!     └── deck.rs                 # markdown + derived tree/html/slides + selection
//!
//! Testing
//!     tests
//!     └── <area>
//!         └── <testname>.rs
//!
//!     Note that rust does not by default discover tests in subdirectories, so these are included
//!     from tests/lib.rs.
//!
//! Core Algorithms
//!
//!     Markdown has no syntax for attributes. A style on a paragraph or heading is written by
//!     re-emitting the element as raw HTML; a list item keeps its marker and gets an inner wrapper
//!     `div` around its content; a list or code block is replaced by an outer wrapper `div` holding
//!     its dedented source, indented back to where the block was. Wrappers are recognized on the
//!     way back in by their class tokens, which turn into an explicit marker on the element (see
//!     style::marker), and removal restores the wrapped source.
//!
//!     Raw HTML in markdown is split across blocks: an open tag, some markdown, a close tag. The
//!     markdown parser folds those tags with the markdown nodes in between into real elements so
//!     a wrapper reads as one element holding what it wraps.
pub mod common;
pub mod deck;
pub mod edit;
pub mod error;
pub mod format;
pub mod formats;
pub mod locator;
pub mod registry;
pub mod selection;
pub mod style;
pub mod tree;

pub use deck::{content_title, slide_groups, slide_index_class_name, Deck, DeckOptions, SlideGroup};
pub use edit::{replace_markdown_at, Edit};
pub use error::PatchError;
pub use format::Format;
pub use locator::{find_in_slide, find_node_by_index_trace};
pub use registry::FormatRegistry;
pub use selection::{Selection, SelectionDetail, SelectionOrigin};
pub use style::{StyleEngine, StyleOptions};
pub use tree::{Element, Node, Position};
