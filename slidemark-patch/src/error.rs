//! Error types for engine operations

use std::fmt;

/// Errors that can occur while parsing, rendering or patching a document
#[derive(Debug, Clone, PartialEq)]
pub enum PatchError {
    /// Format not found in registry
    FormatNotFound(String),
    /// Format does not support the requested direction
    NotSupported(String),
    /// Error while turning markdown or raw HTML into a content tree
    ParseError(String),
    /// Error while rendering a content tree to HTML or markdown
    SerializationError(String),
    /// Style removal requested on an element that was never wrapped
    NotAWrapper(String),
    /// Error while parsing or printing a stylesheet
    CssError(String),
}

impl fmt::Display for PatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatchError::FormatNotFound(name) => write!(f, "Format '{name}' not found"),
            PatchError::NotSupported(msg) => write!(f, "Operation not supported: {msg}"),
            PatchError::ParseError(msg) => write!(f, "Parse error: {msg}"),
            PatchError::SerializationError(msg) => write!(f, "Serialization error: {msg}"),
            PatchError::NotAWrapper(tag) => {
                write!(f, "Cannot remove style: <{tag}> is not a style wrapper")
            }
            PatchError::CssError(msg) => write!(f, "CSS error: {msg}"),
        }
    }
}

impl std::error::Error for PatchError {}
