//! Format implementations
//!
//! Markdown is the source of truth; HTML is what the slide preview shows; JSON
//! dumps the content tree. `css` is not a [`Format`](crate::format::Format), it
//! scopes the stylesheets slides embed.

pub mod css;
pub mod html;
pub mod json;
pub mod markdown;

pub use css::prepend_selector;
pub use html::HtmlFormat;
pub use json::JsonFormat;
pub use markdown::MarkdownFormat;
