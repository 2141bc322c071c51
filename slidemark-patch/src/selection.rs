//! Selection protocol shared with the editor panes

use crate::tree::NodeIndexTrace;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which pane a selection came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SelectionOrigin {
    Preview,
    Contents,
    /// The properties pane inspects the literal innermost tag
    Properties,
}

impl fmt::Display for SelectionOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SelectionOrigin::Preview => "Preview",
            SelectionOrigin::Contents => "Contents",
            SelectionOrigin::Properties => "Properties",
        };
        f.write_str(name)
    }
}

impl FromStr for SelectionOrigin {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "preview" => Ok(SelectionOrigin::Preview),
            "contents" => Ok(SelectionOrigin::Contents),
            "properties" => Ok(SelectionOrigin::Properties),
            other => Err(format!("unknown selection origin '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionDetail {
    pub origin: SelectionOrigin,
    pub timestamp: i64,
}

/// A selected slide, and optionally a node inside it.
///
/// A missing trace means the slide itself is selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub slide_index: usize,
    pub trace: Option<NodeIndexTrace>,
    pub detail: SelectionDetail,
}

impl Selection {
    pub fn slide(slide_index: usize, origin: SelectionOrigin, timestamp: i64) -> Self {
        Self {
            slide_index,
            trace: None,
            detail: SelectionDetail { origin, timestamp },
        }
    }

    pub fn node(
        slide_index: usize,
        trace: NodeIndexTrace,
        origin: SelectionOrigin,
        timestamp: i64,
    ) -> Self {
        Self {
            trace: Some(trace),
            ..Self::slide(slide_index, origin, timestamp)
        }
    }
}
