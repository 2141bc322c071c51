//! Format trait definition
//!
//! This module defines the Format trait that every representation of a slide deck
//! implements. The trait provides a uniform interface for parsing source text into
//! a content tree and serializing a content tree back out.

use crate::error::PatchError;
use crate::tree::Node;

/// Trait for document formats
///
/// Implementors provide conversion between a string representation and the content
/// tree. Formats can support parsing, serialization, or both.
///
/// # Examples
///
/// ```ignore
/// struct PlainText;
///
/// impl Format for PlainText {
///     fn name(&self) -> &str {
///         "text"
///     }
///
///     fn supports_serialization(&self) -> bool {
///         true
///     }
///
///     fn serialize(&self, node: &Node) -> Result<String, PatchError> {
///         Ok(text_content(node))
///     }
/// }
/// ```
pub trait Format: Send + Sync {
    /// The name of this format (e.g., "markdown", "html")
    fn name(&self) -> &str;

    /// Optional description of this format
    fn description(&self) -> &str {
        ""
    }

    /// File extensions associated with this format, without the leading dot.
    ///
    /// Used for automatic format detection from filenames.
    fn file_extensions(&self) -> &[&str] {
        &[]
    }

    /// Whether this format supports parsing (source → tree)
    fn supports_parsing(&self) -> bool {
        false
    }

    /// Whether this format supports serialization (tree → source)
    fn supports_serialization(&self) -> bool {
        false
    }

    /// Parse source text into a content tree
    ///
    /// Default implementation returns NotSupported error.
    fn parse(&self, _source: &str) -> Result<Node, PatchError> {
        Err(PatchError::NotSupported(format!(
            "Format '{}' does not support parsing",
            self.name()
        )))
    }

    /// Serialize a content tree into source text
    ///
    /// Default implementation returns NotSupported error.
    fn serialize(&self, _node: &Node) -> Result<String, PatchError> {
        Err(PatchError::NotSupported(format!(
            "Format '{}' does not support serialization",
            self.name()
        )))
    }
}
