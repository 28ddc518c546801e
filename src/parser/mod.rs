//! Comment Block Parser
//!
//! The pipeline only sees the [`BlockParser`] trait. [`CommentParser`] is the
//! stock implementation: it reads `@name` annotations out of source comments
//! using the field parsers in a [`ParserRegistry`].

mod comment;
mod registry;
mod traits;

pub use comment::CommentParser;
pub use registry::{FieldKind, FieldParser, ParserRegistry, SharedRegistry};
pub use traits::BlockParser;
