//! Leading-whitespace measurement and re-indentation
//!
//! Markdown list items and block continuations are indentation-significant, so
//! every slice the style engine lifts out of the source is measured here before
//! it is dedented, wrapped and indented back into place.
//!
//! Lengths are counted in characters, not bytes. A "blank" line in the options
//! below is a zero-length line; a line holding only spaces is not blank.

/// Options for [`compute_min_leading_whitespace_length`] and [`trim_leads`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeadingWhitespaceOptions {
    /// Drop the first line before measuring if it is empty
    pub remove_blank_first_line: bool,
    /// Drop the last line before measuring if it is empty
    pub remove_blank_last_line: bool,
    /// Trim leading whitespace of the whole text and leave line 0 out of the minimum
    pub trim_first_line: bool,
    /// Leave empty lines out of the measurement
    pub ignore_empty_line: bool,
}

impl Default for LeadingWhitespaceOptions {
    fn default() -> Self {
        Self {
            remove_blank_first_line: false,
            remove_blank_last_line: false,
            trim_first_line: false,
            ignore_empty_line: true,
        }
    }
}

/// Options for [`prepend_lead_to_lines`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrependOptions {
    pub fill: char,
    pub ignore_empty_line: bool,
}

impl Default for PrependOptions {
    fn default() -> Self {
        Self {
            fill: ' ',
            ignore_empty_line: true,
        }
    }
}

/// Number of leading whitespace characters on each line.
pub fn count_leading_whitespaces<S: AsRef<str>>(lines: &[S]) -> Vec<usize> {
    lines
        .iter()
        .map(|line| {
            line.as_ref()
                .chars()
                .take_while(|c| c.is_whitespace())
                .count()
        })
        .collect()
}

/// Minimal leading whitespace across `lines`.
///
/// Returns the minimum together with the per-line lengths and the lines that
/// were actually measured (after the filtering `options` ask for). When no line
/// is left to measure the minimum is `0`.
pub fn compute_min_leading_whitespace_length<S: AsRef<str>>(
    lines: &[S],
    options: LeadingWhitespaceOptions,
) -> (usize, Vec<usize>, Vec<String>) {
    let mut lines: Vec<String> = if options.trim_first_line {
        trim_start_joined(lines)
    } else {
        lines.iter().map(|line| line.as_ref().to_string()).collect()
    };

    if options.remove_blank_last_line && lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }
    if options.remove_blank_first_line && lines.first().is_some_and(|line| line.is_empty()) {
        lines.remove(0);
    }
    if options.ignore_empty_line {
        lines.retain(|line| !line.is_empty());
    }

    let lengths = count_leading_whitespaces(&lines);
    let skip = usize::from(options.trim_first_line);
    let min = lengths.iter().skip(skip).copied().min().unwrap_or(0);
    (min, lengths, lines)
}

/// Removes the common leading whitespace from every line and joins them with `\n`.
///
/// With `trim_first_line` the first line is trimmed instead and kept out of the
/// measurement.
pub fn trim_leads<S: AsRef<str>>(lines: &[S], options: LeadingWhitespaceOptions) -> String {
    let lines: Vec<String> = if options.trim_first_line {
        trim_start_joined(lines)
    } else {
        lines.iter().map(|line| line.as_ref().to_string()).collect()
    };
    let (min, _, _) = compute_min_leading_whitespace_length(&lines, options);

    lines
        .iter()
        .enumerate()
        .map(|(index, line)| {
            if index == 0 && options.trim_first_line {
                line.as_str()
            } else {
                strip_lead(line, min)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Prefixes every line with `length` copies of the fill character.
pub fn prepend_lead_to_lines<S: AsRef<str>>(
    lines: &[S],
    length: usize,
    options: PrependOptions,
) -> Vec<String> {
    let prefix: String = std::iter::repeat(options.fill).take(length).collect();
    lines
        .iter()
        .map(|line| {
            let line = line.as_ref();
            if options.ignore_empty_line && line.is_empty() {
                line.to_string()
            } else {
                format!("{prefix}{line}")
            }
        })
        .collect()
}

/// Removes up to `n` leading whitespace characters, never touching other content.
pub fn strip_lead(line: &str, n: usize) -> &str {
    let cut = line
        .char_indices()
        .take(n)
        .take_while(|(_, c)| c.is_whitespace())
        .last()
        .map(|(index, c)| index + c.len_utf8())
        .unwrap_or(0);
    &line[cut..]
}

fn trim_start_joined<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
    let joined = lines
        .iter()
        .map(|line| line.as_ref())
        .collect::<Vec<_>>()
        .join("\n");
    joined.trim_start().split('\n').map(str::to_string).collect()
}
