//! Line table for one source document.
//!
//! Maps 1-based line numbers to the raw text of each line. The table is
//! built once per parse call and never mutated afterwards. Line endings
//! (`\n` or `\r\n`) are stripped; a trailing newline does not produce an
//! empty last line.

use text_size::TextSize;
use thiserror::Error;

use super::Position;

/// Errors raised by line lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LineTableError {
    /// The requested line does not exist in the document.
    #[error("line {line} is out of range (document has {len} lines)")]
    LineOutOfRange { line: usize, len: usize },
}

/// Immutable 1-based line table with byte offsets of each line start.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineTable {
    /// `lines[0]` is line 1
    lines: Vec<String>,
    /// Byte offset where each line starts in the original text
    starts: Vec<TextSize>,
}

impl LineTable {
    /// Split `source` into lines.
    pub fn new(source: &str) -> Self {
        let mut lines = Vec::new();
        let mut starts = Vec::new();
        let mut offset = 0u32;

        for raw in source.split_inclusive('\n') {
            starts.push(TextSize::new(offset));
            offset += raw.len() as u32;

            let line = raw.strip_suffix('\n').unwrap_or(raw);
            let line = line.strip_suffix('\r').unwrap_or(line);
            lines.push(line.to_string());
        }

        Self { lines, starts }
    }

    /// Number of lines in the document.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Text of `line`, or `None` when the line is absent.
    pub fn line(&self, line: usize) -> Option<&str> {
        line.checked_sub(1)
            .and_then(|idx| self.lines.get(idx))
            .map(String::as_str)
    }

    /// Text of `line`, failing with [`LineTableError::LineOutOfRange`].
    pub fn get(&self, line: usize) -> Result<&str, LineTableError> {
        self.line(line).ok_or(LineTableError::LineOutOfRange {
            line,
            len: self.len(),
        })
    }

    /// Count of leading tab characters on `line`.
    pub fn indent_level(&self, line: usize) -> Result<usize, LineTableError> {
        self.get(line).map(indent_level_of)
    }

    /// True when the line is missing or holds only whitespace.
    pub fn is_blank(&self, line: usize) -> bool {
        self.line(line).is_none_or(|text| text.trim().is_empty())
    }

    /// True when the leading whitespace of `line` contains a space.
    ///
    /// Nesting is measured in tabs only, so such lines get flagged.
    pub fn has_space_indentation(&self, line: usize) -> bool {
        self.line(line).is_some_and(|text| {
            text.chars()
                .take_while(|c| c.is_whitespace())
                .any(|c| c == ' ')
        })
    }

    /// Iterate over `(line_number, text)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.lines
            .iter()
            .enumerate()
            .map(|(idx, text)| (idx + 1, text.as_str()))
    }

    /// Convert a byte offset into a 1-based line/column position.
    ///
    /// Columns count characters, not bytes. Offsets past the end of the
    /// document return `None`.
    pub fn line_col(&self, offset: TextSize) -> Option<Position> {
        let idx = self.starts.partition_point(|start| *start <= offset);
        let idx = idx.checked_sub(1)?;
        let start = self.starts[idx];
        let text = &self.lines[idx];

        let within = usize::from(offset - start);
        if within > text.len() {
            return None;
        }
        let column = text.get(..within)?.chars().count() + 1;
        Some(Position::new(idx + 1, column))
    }

    /// Convert a 1-based line/column position back into a byte offset.
    pub fn offset(&self, position: Position) -> Option<TextSize> {
        let text = self.line(position.line)?;
        let start = self.starts[position.line - 1];
        let col = position.column.checked_sub(1)?;

        let byte = if col == text.chars().count() {
            text.len()
        } else {
            text.char_indices().nth(col)?.0
        };
        Some(start + TextSize::new(byte as u32))
    }
}

/// Count of consecutive leading tab characters in `text`.
pub fn indent_level_of(text: &str) -> usize {
    text.chars().take_while(|c| *c == '\t').count()
}
