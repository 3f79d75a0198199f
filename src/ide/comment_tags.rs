//! Task tags (`TODO`, `FIXME`, ...) found in comments.

use smol_str::SmolStr;

use crate::base::LineTable;
use crate::base::text_utils::is_word_character;
use crate::parser::{TokenKind, tokenize};

/// Tags recognised when the host configures none.
pub const DEFAULT_TAGS: &[&str] = &["TODO", "FIXME", "HACK", "UNDONE"];

/// A comment that starts with one of the configured tags.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CommentTag {
    /// The tag that matched
    pub key: SmolStr,
    /// Comment text from the tag to the end of the comment
    pub text: SmolStr,
    pub line: usize,
    /// 1-based character column of the tag
    pub column: usize,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum State {
    Code,
    BlockComment,
    DocString,
}

/// Scan every comment in the document for `tags`.
///
/// Covers `#` line comments and the lines of `/# ... #/` blocks. Doc
/// strings are documentation, not comments, and are skipped.
pub fn comment_tags<S: AsRef<str>>(table: &LineTable, tags: &[S]) -> Vec<CommentTag> {
    let mut found = Vec::new();
    if tags.is_empty() {
        return found;
    }

    let mut state = State::Code;
    for (number, line) in table.iter() {
        match state {
            State::BlockComment => {
                let (body, closed) = match line.find("#/") {
                    Some(end) => (&line[..end], true),
                    None => (line, false),
                };
                found.extend(match_tag(tags, line, 0, body, number));
                if closed {
                    state = State::Code;
                }
            }
            State::DocString => {
                if line.contains("\"\"\"") {
                    state = State::Code;
                }
            }
            State::Code => state = scan_code_line(tags, line, number, &mut found),
        }
    }

    found
}

fn scan_code_line<S: AsRef<str>>(
    tags: &[S],
    line: &str,
    number: usize,
    found: &mut Vec<CommentTag>,
) -> State {
    for token in tokenize(line) {
        let start = u32::from(token.offset) as usize;
        match token.kind {
            TokenKind::Comment => {
                let body = &token.text[1..];
                found.extend(match_tag(tags, line, start + 1, body, number));
                return State::Code;
            }
            TokenKind::BlockCommentOpen => {
                let rest = &line[start + 2..];
                return match rest.find("#/") {
                    Some(end) => {
                        found.extend(match_tag(tags, line, start + 2, &rest[..end], number));
                        State::Code
                    }
                    None => {
                        found.extend(match_tag(tags, line, start + 2, rest, number));
                        State::BlockComment
                    }
                };
            }
            TokenKind::DocStringDelim => {
                let rest = &line[start + 3..];
                return if rest.contains("\"\"\"") {
                    State::Code
                } else {
                    State::DocString
                };
            }
            _ => {}
        }
    }
    State::Code
}

/// `body` is comment text starting at byte `body_start` of `line`.
fn match_tag<S: AsRef<str>>(
    tags: &[S],
    line: &str,
    body_start: usize,
    body: &str,
    number: usize,
) -> Option<CommentTag> {
    let trimmed = body.trim_start();
    let tag_start = body_start + (body.len() - trimmed.len());

    let key = tags.iter().map(AsRef::as_ref).find(|tag| {
        !tag.is_empty()
            && trimmed.starts_with(*tag)
            && !trimmed[tag.len()..].chars().next().is_some_and(is_word_character)
    })?;

    Some(CommentTag {
        key: SmolStr::new(key),
        text: SmolStr::new(trimmed.trim_end()),
        line: number,
        column: line[..tag_start].chars().count() + 1,
    })
}
