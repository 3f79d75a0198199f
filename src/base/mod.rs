//! Foundation types for the Cobra editor layer.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`LineTable`] - 1-based line number to line text mapping
//! - [`Position`], [`Span`] - 1-based line/column positions
//! - [`text_utils`] - word and dotted-name extraction around a cursor
//!
//! This module has NO dependencies on other crate modules.

mod line_table;
mod position;
pub mod text_utils;

pub use line_table::{LineTable, LineTableError, indent_level_of};
pub use position::{Position, Span};

// Re-export text-size types for convenience
pub use text_size::{self, TextSize};
