//! Parser module — doc block to element model.
//!
//! `block` isolates the comment and its content lines, `annotation` matches
//! declarations and tokenizes their values, and `engine` runs the per-member
//! state machine.

pub mod annotation;
pub mod block;
pub mod engine;

pub use annotation::{Matcher, ValueMode};
pub use engine::parse_member;

use crate::error::Result;
use crate::model::DocSet;
use crate::source::MemberSource;
use rayon::prelude::*;

/// Parser settings. Immutable once built, shareable across threads.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    matcher: Matcher,
    values: ValueMode,
}

impl ParserConfig {
    /// Config using `marker` to introduce annotations.
    pub fn new(marker: char) -> Result<Self> {
        Ok(Self {
            matcher: Matcher::new(marker)?,
            values: ValueMode::default(),
        })
    }

    pub fn with_values(mut self, values: ValueMode) -> Self {
        self.values = values;
        self
    }

    pub fn marker(&self) -> char {
        self.matcher.marker()
    }

    pub fn values(&self) -> ValueMode {
        self.values
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            matcher: Matcher::new('@').expect("'@' is a valid marker"),
            values: ValueMode::default(),
        }
    }
}

/// Parse `(name, comment)` pairs into a [`DocSet`], preserving input order.
pub fn analyze<'a, I>(members: I, config: &ParserConfig) -> DocSet
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    members
        .into_iter()
        .map(|(name, comment)| parse_member(name, comment, config))
        .collect()
}

/// Parallel [`analyze`] over scanned members. Order is preserved.
pub fn analyze_par(members: &[MemberSource], config: &ParserConfig) -> DocSet {
    let owners: Vec<_> = members
        .par_iter()
        .map(|m| parse_member(&m.name, &m.comment, config))
        .collect();
    DocSet::from(owners)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Annotated, Described};

    #[test]
    fn analyze_keeps_input_order() {
        let set = analyze(
            [
                ("b", "/**\n * @return int\n */"),
                ("a", ""),
                ("c", "/**\n * C.\n */"),
            ],
            &ParserConfig::default(),
        );
        let names: Vec<_> = set.iter().map(|o| o.name()).collect();
        assert_eq!(names, ["b", "a", "c"]);
        assert!(set.owner("a").is_some_and(|o| o.is_empty()));
        assert!(set.owner("b").is_some_and(|o| o.has_annotation("return")));
    }

    #[test]
    fn no_state_leaks_between_members() {
        let set = analyze(
            [
                ("first", "/**\n * @param x\n */"),
                ("second", "/**\n * Plain text.\n */"),
            ],
            &ParserConfig::default(),
        );
        let second = set.owner("second").unwrap();
        assert_eq!(second.description(), "Plain text.\n");
        assert!(second.annotation_list().is_empty());
        assert_eq!(
            set.owner("first").unwrap().annotation_list()[0].values(),
            ["x"]
        );
    }

    #[test]
    fn parallel_matches_sequential() {
        let members: Vec<MemberSource> = (0..64)
            .map(|i| MemberSource {
                name: format!("m{i}"),
                comment: format!("/**\n * Member {i}.\n * @param ${i}\n * more {i}\n */"),
                line: i + 1,
            })
            .collect();
        let config = ParserConfig::default();

        let par = analyze_par(&members, &config);
        let seq = analyze(
            members.iter().map(|m| (m.name.as_str(), m.comment.as_str())),
            &config,
        );
        assert_eq!(par.owners(), seq.owners());
    }

    #[test]
    fn config_accessors() {
        let config = ParserConfig::new('#').unwrap().with_values(ValueMode::Whitespace);
        assert_eq!(config.marker(), '#');
        assert_eq!(config.values(), ValueMode::Whitespace);
        assert_eq!(ParserConfig::default().marker(), '@');
    }
}
