//! Markdown format tests
//!
//! Parsing markdown into positioned content trees, and rendering trees back.

mod positions;
mod render;
