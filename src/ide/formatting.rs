//! Auto-indentation for a new line.

use tracing::trace;

use crate::base::{LineTable, indent_level_of};
use crate::parser::keywords::{COMPOUND_STATEMENT_KEYWORDS, opens_block};
use crate::parser::{TokenKind, tokenize};

/// Indentation to insert after pressing Return at the end of `line`.
///
/// Missing lines get no indentation.
pub fn new_line_indent(table: &LineTable, line: usize) -> String {
    match table.line(line) {
        Some(text) => indent_after(text),
        None => {
            trace!(line, "no such line, not indenting");
            String::new()
        }
    }
}

/// Indentation for the line following `text`: its leading tabs, plus one
/// when `text` opens an indented block.
pub fn indent_after(text: &str) -> String {
    let level = indent_level_of(text);
    let extra = usize::from(opens_indented_block(text));
    "\t".repeat(level + extra)
}

fn opens_indented_block(text: &str) -> bool {
    let tokens = tokenize(text);
    let Some(first) = tokens.first().filter(|t| t.kind == TokenKind::Ident) else {
        return false;
    };
    let keyword = first.text;
    if !opens_block(keyword) {
        return false;
    }

    // `pro name from field` and friends have no body.
    if matches!(keyword, "pro" | "get" | "set") && tokens.iter().any(|t| t.is_ident("from")) {
        return false;
    }

    // `if cond, stmt` puts the body on the same line.
    if COMPOUND_STATEMENT_KEYWORDS.contains(&keyword) {
        let mut depth = 0usize;
        for token in &tokens {
            match token.kind {
                TokenKind::LParen => depth += 1,
                TokenKind::RParen => depth = depth.saturating_sub(1),
                TokenKind::Comma if depth == 0 => return false,
                _ => {}
            }
        }
    }

    true
}
