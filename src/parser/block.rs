//! Doc block isolation and content-line splitting.

use regex::Regex;
use std::sync::LazyLock;

// `/**` ... `*/`, lazily so only the first block is taken
static RE_DOC_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)/\*\*(.*?)\*/").unwrap());

// Leading `*` continuation marker, optionally indented
static RE_CONTENT_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[[:space:]]*\*(.*)$").unwrap());

/// Inner content of the first `/** ... */` block in `raw`, if any.
pub fn extract(raw: &str) -> Option<&str> {
    RE_DOC_BLOCK
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Lines of block content that carry a `*` marker, with the marker and
/// surrounding whitespace removed.
///
/// Lines left empty once the marker is stripped carry nothing and are
/// dropped, as is a stray closing `/`.
pub fn content_lines(block: &str) -> Vec<&str> {
    block
        .lines()
        .filter_map(|line| RE_CONTENT_LINE.captures(line))
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|text| !text.is_empty() && *text != "/")
        .collect()
}
