//! Recursive-descent parsing for Larch.
//!
//! The parser is generic over two seams: where tokens come from
//! ([`TokenSource`]) and how nodes are allocated ([`NodeBuilder`] from
//! `larch_ir`). The same grammar code therefore serves the batch
//! compiler, the REPL, and every storage policy.
//!
//! ```
//! use larch_ir::{BoxedBuilder, StringInterner};
//! use larch_parse::{IterSource, Parser};
//!
//! let interner = StringInterner::new();
//! let (tokens, _) = larch_lexer::lex("print 1 + 2;", &interner);
//! let mut parser = Parser::new(IterSource::new(tokens), BoxedBuilder::<()>::new());
//! let unit = parser.parse();
//! assert_eq!(unit.statements.len(), 1);
//! assert!(!parser.had_error());
//! ```

mod error;
mod parser;
mod source;

pub use error::ParseError;
pub use parser::Parser;
pub use source::{IterSource, TokenSource};
