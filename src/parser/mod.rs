//! Parsing: logos lexer, keyword tables, and the outline parser.
//!
//! ```text
//! Source Text
//!     ↓
//! LineTable → lines, indentation
//!     ↓
//! Lexer (logos) → tokens per line
//!     ↓
//! OutlineParser → Module (declaration tree)
//! ```
//!
//! The real Cobra compiler can stand in for [`OutlineParser`] by
//! implementing [`SourceParser`].

pub mod keywords;
mod lexer;
mod options;
mod outline;
mod source_parser;

pub use lexer::{Lexer, Token, TokenKind, tokenize};
pub use options::{IMPLICIT_NAMESPACES, ParserOptions};
pub use outline::{MAX_NESTING, OutlineParser};
pub use source_parser::{ParseFault, SourceParser};
