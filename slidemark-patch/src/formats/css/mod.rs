//! Stylesheet scoping
//!
//! Slides may carry their own `<style>` blocks. Before a slide is rendered, every
//! selector of its stylesheet gets the slide's scope selector in front of it so
//! rules stay inside the slide.
//!
//! # Library Choice
//!
//! We use `lightningcss` to parse and print stylesheets. Rules are printed one by
//! one and only the selector part of style rules is rewritten; at-rules such as
//! `@media` or `@font-face` are printed unchanged.

use crate::error::PatchError;
use lightningcss::rules::style::StyleRule;
use lightningcss::rules::CssRule;
use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};
use lightningcss::traits::ToCss;

/// Prefix every selector of every top-level style rule with `prefix` and a
/// descendant combinator.
///
/// `prepend_selector("h1, h2 { color: red }", ".slide")` yields
/// `.slide h1, .slide h2 { ... }`.
pub fn prepend_selector(css: &str, prefix: &str) -> Result<String, PatchError> {
    let sheet = StyleSheet::parse(css, ParserOptions::default())
        .map_err(|e| PatchError::CssError(format!("Failed to parse stylesheet: {e}")))?;

    let mut rules = Vec::with_capacity(sheet.rules.0.len());
    for rule in &sheet.rules.0 {
        let printed = print(rule)?;
        let rewritten = match rule {
            CssRule::Style(style) => prefix_rule(style, &printed, prefix)?,
            _ => printed,
        };
        rules.push(rewritten);
    }
    Ok(rules.join("\n"))
}

fn print<T: ToCss>(value: &T) -> Result<String, PatchError> {
    value
        .to_css_string(PrinterOptions::default())
        .map_err(|e| PatchError::CssError(format!("Failed to print stylesheet: {e}")))
}

/// Swaps the selector list the printed rule starts with for the scoped one.
fn prefix_rule(style: &StyleRule, printed: &str, prefix: &str) -> Result<String, PatchError> {
    let selectors = print(&style.selectors)?;
    let body = printed.strip_prefix(selectors.as_str()).ok_or_else(|| {
        PatchError::CssError(format!("Rule does not start with its selectors: {selectors}"))
    })?;

    let scoped = style
        .selectors
        .0
        .iter()
        .map(|selector| print(selector).map(|selector| format!("{prefix} {selector}")))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(format!("{}{body}", scoped.join(", ")))
}
