/// Position tracking for declarations and fold regions
///
/// Lines and columns are 1-indexed, matching what editors display and what
/// the Cobra compiler reports in its diagnostics.
/// A span between two positions, both inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

/// A position in source code (1-indexed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Create a span from line/column coordinates
    pub fn from_coords(
        start_line: usize,
        start_col: usize,
        end_line: usize,
        end_col: usize,
    ) -> Self {
        Self {
            start: Position::new(start_line, start_col),
            end: Position::new(end_line, end_col),
        }
    }

    /// Number of lines covered by the span
    pub fn line_count(&self) -> usize {
        self.end.line.saturating_sub(self.start.line) + 1
    }

    /// Check if a line falls within this span
    pub fn contains_line(&self, line: usize) -> bool {
        line >= self.start.line && line <= self.end.line
    }

    /// Check if a position falls within this span
    pub fn contains(&self, position: Position) -> bool {
        if !self.contains_line(position.line) {
            return false;
        }
        if position.line == self.start.line && position.column < self.start.column {
            return false;
        }
        if position.line == self.end.line && position.column > self.end.column {
            return false;
        }
        true
    }
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}
