//! JSON format implementation
//!
//! Dumps the content tree, positions and wrapper markers included, with
//! `serde_json`. Useful for debugging the parser and for tooling that wants the
//! node index traces without scraping HTML.

use crate::error::PatchError;
use crate::format::Format;
use crate::tree::Node;

/// Format implementation for the JSON tree dump
pub struct JsonFormat;

impl Format for JsonFormat {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Content tree as JSON"
    }

    fn file_extensions(&self) -> &[&str] {
        &["json"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Node, PatchError> {
        serde_json::from_str(source)
            .map_err(|e| PatchError::ParseError(format!("Invalid tree JSON: {e}")))
    }

    fn serialize(&self, node: &Node) -> Result<String, PatchError> {
        serde_json::to_string_pretty(node)
            .map_err(|e| PatchError::SerializationError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{Element, WrapperKind};

    #[test]
    fn test_tree_survives_json() {
        let tree = Node::root(vec![Element::wrapper(
            WrapperKind::Outer,
            "ul",
            vec![Element::new("ul").into()],
        )
        .with_attribute("style", "color: blue;")
        .into()]);

        let json = JsonFormat.serialize(&tree).unwrap();
        assert!(json.contains("\"type\": \"element\""));
        assert!(json.contains("\"kind\": \"outer\""));
        assert_eq!(JsonFormat.parse(&json).unwrap(), tree);
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            JsonFormat.parse("{"),
            Err(PatchError::ParseError(_))
        ));
    }
}
