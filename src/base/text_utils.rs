//! Text manipulation utilities for working with source lines.

/// Check if a character is considered part of a word (identifier).
///
/// Uses Unicode Standard Annex #31 rules for identifier characters.
#[inline]
pub fn is_word_character(c: char) -> bool {
    unicode_ident::is_xid_continue(c)
}

/// Find the boundaries of a word at the given position.
///
/// Returns `Some((start, end))` where `start` is the character index of the word start
/// and `end` is the character index after the last word character.
/// Returns `None` if there is no word at the position.
pub fn find_word_boundaries(chars: &[char], position: usize) -> Option<(usize, usize)> {
    if position >= chars.len() || !is_word_character(chars[position]) {
        return None;
    }

    let mut start = position;
    while start > 0 && is_word_character(chars[start - 1]) {
        start -= 1;
    }

    let mut end = position;
    while end < chars.len() && is_word_character(chars[end]) {
        end += 1;
    }

    Some((start, end))
}

/// Extract the word (identifier) at the cursor position in a line of text.
///
/// # Example
/// ```
/// use cobra::base::text_utils::extract_word_at_cursor;
///
/// let line = "var foo = bar";
/// assert_eq!(extract_word_at_cursor(line, 4), Some("foo".to_string()));
/// assert_eq!(extract_word_at_cursor(line, 10), Some("bar".to_string()));
/// assert_eq!(extract_word_at_cursor(line, 8), None);
/// ```
pub fn extract_word_at_cursor(line: &str, position: usize) -> Option<String> {
    let chars: Vec<char> = line.chars().collect();
    let (start, end) = find_word_boundaries(&chars, position)?;
    Some(chars[start..end].iter().collect())
}

/// The identifier characters immediately before `position`.
///
/// This is the partial word a completion request should filter by; it is
/// empty when the cursor does not follow a word character.
pub fn word_prefix_before(line: &str, position: usize) -> String {
    let chars: Vec<char> = line.chars().collect();
    let end = position.min(chars.len());

    let mut start = end;
    while start > 0 && is_word_character(chars[start - 1]) {
        start -= 1;
    }

    chars[start..end].iter().collect()
}

/// Extract a dotted name such as `System.Collections.Generic` at the cursor.
///
/// Returns `None` for plain identifiers without a `.` separator.
///
/// # Example
/// ```
/// use cobra::base::text_utils::extract_qualified_name_at_cursor;
///
/// let line = "use System.Text";
/// assert_eq!(extract_qualified_name_at_cursor(line, 5), Some("System.Text".to_string()));
/// assert_eq!(extract_qualified_name_at_cursor(line, 1), None);
/// ```
pub fn extract_qualified_name_at_cursor(line: &str, position: usize) -> Option<String> {
    let chars: Vec<char> = line.chars().collect();
    let is_name_char = |c: char| is_word_character(c) || c == '.';

    if position >= chars.len() || !is_name_char(chars[position]) {
        return None;
    }

    let mut start = position;
    while start > 0 && is_name_char(chars[start - 1]) {
        start -= 1;
    }

    let mut end = position;
    while end < chars.len() && is_name_char(chars[end]) {
        end += 1;
    }

    let result: String = chars[start..end].iter().collect();
    let trimmed = result.trim_matches('.');
    trimmed.contains('.').then(|| trimmed.to_string())
}
