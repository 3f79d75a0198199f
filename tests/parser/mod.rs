//! Parser tests: lexer, keywords and the outline parser.

pub mod tests_outline;
