//! Annotation declaration matching and value tokenizing.

use crate::error::{DocBlockError, Result};
use regex::Regex;

/// How the remainder of a declaration line becomes value tokens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ValueMode {
    /// The trimmed remainder is a single token, even when empty.
    #[default]
    Whole,
    /// Split the remainder on runs of whitespace. An empty remainder
    /// yields no tokens.
    Whitespace,
}

/// Recognizes `<marker><word>` at the start of a content line.
#[derive(Debug, Clone)]
pub struct Matcher {
    marker: char,
    re: Regex,
}

impl Matcher {
    pub fn new(marker: char) -> Result<Self> {
        if marker.is_whitespace() || marker.is_alphanumeric() || matches!(marker, '_' | '*' | '/') {
            return Err(DocBlockError::InvalidMarker { marker });
        }
        let pattern = format!(r"^({}\w+)(.*)$", regex::escape(&marker.to_string()));
        let re = Regex::new(&pattern).map_err(|_| DocBlockError::InvalidMarker { marker })?;
        Ok(Self { marker, re })
    }

    pub fn marker(&self) -> char {
        self.marker
    }

    /// Split a trimmed content line into `(name, remainder)` when it
    /// declares an annotation.
    pub fn match_line<'a>(&self, line: &'a str) -> Option<(&'a str, &'a str)> {
        let caps = self.re.captures(line)?;
        let name = caps.get(1)?.as_str();
        let rest = caps.get(2).map(|m| m.as_str()).unwrap_or("");
        Some((name, rest))
    }
}

/// Turn a declaration remainder into value tokens.
pub fn tokenize(remainder: &str, mode: ValueMode) -> Vec<String> {
    let trimmed = remainder.trim();
    match mode {
        ValueMode::Whole => vec![trimmed.to_string()],
        ValueMode::Whitespace => trimmed.split_whitespace().map(str::to_string).collect(),
    }
}
