//! docblock — extract `@annotations` and descriptions from `/** ... */`
//! doc blocks.
//!
//! Feed `(member name, raw comment)` pairs to [`parser::analyze`] (or a single
//! pair to [`parser::parse_member`]) and query the resulting [`Owner`]s through
//! the [`Annotated`] trait:
//!
//! ```
//! use docblock::{parse_member, Annotated, Described, ParserConfig};
//!
//! let owner = parse_member(
//!     "save",
//!     "/**\n * Save it.\n * @param string $path\n * @return bool\n */",
//!     &ParserConfig::default(),
//! );
//! assert_eq!(owner.description(), "Save it.\n");
//! assert!(owner.has_annotations(["param", "@return"]));
//! ```

pub mod error;
pub mod model;
pub mod parser;
pub mod render;
pub mod source;
mod toc;

pub use error::DocBlockError;
pub use model::{
    Annotated, Annotation, Described, DocSet, ElementMut, Filter, MemberRef, Owner, Reflectable,
};
pub use parser::{analyze, analyze_par, parse_member, ParserConfig, ValueMode};
pub use source::MemberSource;
