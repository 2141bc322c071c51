//! Text utilities shared by the parser and the style engine

pub mod indent;

pub use indent::{
    compute_min_leading_whitespace_length, count_leading_whitespaces, prepend_lead_to_lines,
    strip_lead, trim_leads, LeadingWhitespaceOptions, PrependOptions,
};
