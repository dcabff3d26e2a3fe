//! Member scanner for PHP-style source files.
//!
//! Pairs every `function` declaration with the `/** ... */` block directly
//! above it. Only blank lines and `#[...]` attributes may sit between the
//! two; anything else detaches the block.

use regex::Regex;
use std::sync::LazyLock;

static RE_FUNCTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^[[:blank:]]*((abstract|final|public|protected|private|static)[[:blank:]]+)*",
        r"function[[:blank:]]+&?[[:blank:]]*([A-Za-z_\x80-\xff][A-Za-z0-9_\x80-\xff]*)[[:blank:]]*\(",
    ))
    .unwrap()
});

static RE_ATTRIBUTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[[:blank:]]*#\[.*\][[:blank:]]*$").unwrap());

/// A member found in source, with its raw doc comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberSource {
    pub name: String,
    /// Raw comment text, empty when the member has none
    pub comment: String,
    /// 1-based line of the declaration
    pub line: usize,
}

/// Scan `input` for documented and undocumented members, in source order.
pub fn scan(input: &str) -> Vec<MemberSource> {
    let mut members = Vec::new();
    let mut pending: Option<String> = None;
    let mut open: Option<String> = None;

    for (idx, line) in input.lines().enumerate() {
        // Text left on the line once any doc block on it has closed
        let rest = if let Some(ref mut block) = open {
            let Some(end) = line.find("*/") else {
                block.push('\n');
                block.push_str(line);
                continue;
            };
            block.push('\n');
            block.push_str(&line[..end + 2]);
            pending = open.take();
            &line[end + 2..]
        } else if let Some(after_open) = line.trim_start().strip_prefix("/**") {
            let Some(end) = after_open.find("*/") else {
                open = Some(line.trim_start().to_string());
                continue;
            };
            pending = Some(format!("/**{}", &after_open[..end + 2]));
            &after_open[end + 2..]
        } else {
            line
        };

        if let Some(caps) = RE_FUNCTION.captures(rest) {
            members.push(MemberSource {
                name: caps[3].to_string(),
                comment: pending.take().unwrap_or_default(),
                line: idx + 1,
            });
            continue;
        }

        if rest.trim().is_empty() || RE_ATTRIBUTE.is_match(rest) {
            continue;
        }

        pending = None;
    }

    members
}
