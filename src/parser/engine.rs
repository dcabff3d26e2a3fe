//! Line-by-line state machine that builds one [`Owner`] per member.
//!
//! Each pass owns its [`ParseContext`]; nothing is carried between members.

use super::annotation::tokenize;
use super::{block, ParserConfig};
use crate::model::Owner;
use tracing::{debug, trace};

/// State carried across the content lines of a single doc block.
struct ParseContext {
    owner: Owner,
    /// Index of the most recently opened annotation
    open: Option<usize>,
}

impl ParseContext {
    fn new(name: &str) -> Self {
        Self {
            owner: Owner::new(name),
            open: None,
        }
    }

    fn feed(&mut self, line: &str, config: &ParserConfig) {
        // A declaration always opens a fresh annotation
        if let Some((name, rest)) = config.matcher.match_line(line) {
            let values = tokenize(rest, config.values);
            trace!(member = self.owner.name(), annotation = name, "open");
            self.open = Some(self.owner.open_annotation(name, values));
            return;
        }

        match self.open {
            None => self.owner.push_description_line(line),
            Some(index) => {
                if !self.owner.continue_annotation(index, line) {
                    trace!(
                        member = self.owner.name(),
                        "continuation dropped: annotation has no values"
                    );
                }
            }
        }
    }

    fn finish(self) -> Owner {
        self.owner
    }
}

/// Parse one member's raw comment into its [`Owner`].
///
/// A comment without a `/** ... */` block yields an empty owner.
pub fn parse_member(name: &str, comment: &str, config: &ParserConfig) -> Owner {
    let mut ctx = ParseContext::new(name);

    match block::extract(comment) {
        Some(content) => {
            for line in block::content_lines(content) {
                ctx.feed(line, config);
            }
        }
        None => debug!(member = name, "no doc block"),
    }

    ctx.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Annotated, Described};
    use crate::parser::ValueMode;

    fn parse(comment: &str) -> Owner {
        parse_member("doThing", comment, &ParserConfig::default())
    }

    #[test]
    fn no_block_yields_empty_owner() {
        for comment in ["", "// nothing", "/* plain */", "just text"] {
            let owner = parse(comment);
            assert_eq!(owner.name(), "doThing");
            assert_eq!(owner.description(), "");
            assert!(owner.annotation_list().is_empty());
            assert!(owner.is_empty());
        }
    }

    #[test]
    fn description_then_annotations_with_continuation() {
        let owner = parse(
            "/**\n * Does a thing.\n * @param name the value\n * continued detail\n * @return bool\n */",
        );

        assert_eq!(owner.description(), "Does a thing.\n");
        let anns = owner.annotation_list();
        assert_eq!(anns.len(), 2);
        assert_eq!(anns[0].name(), "@param");
        assert_eq!(anns[0].values(), ["name the value\ncontinued detail"]);
        assert_eq!(anns[1].name(), "@return");
        assert_eq!(anns[1].values(), ["bool"]);
    }

    #[test]
    fn multi_line_description() {
        let owner = parse("/**\n * First line.\n *\n * Second line.\n * @internal\n */");
        assert_eq!(owner.description(), "First line.\nSecond line.\n");
        assert!(owner.has_description());
    }

    #[test]
    fn single_declaration_value_is_trimmed_remainder() {
        let owner = parse("/**\n * @throws   InvalidArgumentException   when empty  \n */");
        assert_eq!(
            owner.annotation_list()[0].values(),
            ["InvalidArgumentException   when empty"]
        );
    }

    #[test]
    fn continuation_never_opens_new_annotation() {
        let owner = parse("/**\n * @param a\n * one\n * two\n * three\n */");
        let anns = owner.annotation_list();
        assert_eq!(anns.len(), 1);
        assert_eq!(anns[0].values(), ["a\none\ntwo\nthree"]);
        assert_eq!(owner.description(), "");
    }

    #[test]
    fn text_after_annotations_never_reaches_description() {
        let owner = parse("/**\n * @return int\n * Later prose.\n */");
        assert_eq!(owner.description(), "");
        assert_eq!(owner.annotation_list()[0].values(), ["int\nLater prose."]);
    }

    #[test]
    fn bare_declaration_keeps_continuation() {
        let owner = parse("/**\n * @deprecated\n * use other()\n */");
        assert_eq!(owner.annotation_list()[0].values(), ["\nuse other()"]);
    }

    #[test]
    fn continuation_on_valueless_annotation_is_dropped() {
        let config = ParserConfig::default().with_values(ValueMode::Whitespace);
        let owner = parse_member(
            "m",
            "/**\n * @deprecated\n * use other()\n * @param int $x\n */",
            &config,
        );
        let anns = owner.annotation_list();
        assert_eq!(anns.len(), 2);
        assert!(anns[0].values().is_empty());
        assert_eq!(anns[1].values(), ["int", "$x"]);
        assert_eq!(owner.description(), "");
    }

    #[test]
    fn whitespace_mode_extends_last_token() {
        let config = ParserConfig::default().with_values(ValueMode::Whitespace);
        let owner = parse_member("m", "/**\n * @param int $x\n * the x\n */", &config);
        assert_eq!(owner.annotation_list()[0].values(), ["int", "$x\nthe x"]);
    }

    #[test]
    fn repeated_names_stay_separate_and_ordered() {
        let owner = parse("/**\n * @param a\n * @param b\n * @param c\n */");
        let values: Vec<_> = owner
            .get_annotations("param")
            .iter()
            .filter_map(|a| a.value())
            .collect();
        assert_eq!(values, ["a", "b", "c"]);
    }

    #[test]
    fn custom_marker_config() {
        let config = ParserConfig::new('%').unwrap();
        let owner = parse_member("m", "/**\n * Text @inline\n * %Route /x\n */", &config);
        assert_eq!(owner.description(), "Text @inline\n");
        assert_eq!(owner.get_annotation("Route").and_then(|a| a.value()), Some("/x"));
    }

    #[test]
    fn crlf_line_endings() {
        let owner = parse("/**\r\n * Hi.\r\n * @return void\r\n */");
        assert_eq!(owner.description(), "Hi.\n");
        assert_eq!(owner.annotation_list()[0].values(), ["void"]);
    }
}
