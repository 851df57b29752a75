//! Parser for the shell-fm rc file
//!
//! The format is one `key = value` pair per line. Whitespace around the key
//! and the value is insignificant, the value runs from the first `=` to the
//! end of the line, and anything that does not look like an assignment is
//! skipped without complaint.

use std::collections::HashMap;

/// Split a single line into a key/value pair.
///
/// Returns `None` for blank lines, comments and anything else that is not
/// an assignment. Keys must be a single word; values may be empty.
pub fn parse_line(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    let key = key.trim();

    if key.is_empty() || key.starts_with('#') || key.contains(char::is_whitespace) {
        return None;
    }

    Some((key, value.trim()))
}

/// Parse rc file contents into a key/value map.
///
/// Later assignments to the same key replace earlier ones.
pub fn parse(contents: &str) -> HashMap<String, String> {
    contents
        .lines()
        .filter_map(parse_line)
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}
