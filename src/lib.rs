//! # cobra-ide-base
//!
//! Editor integration core for the Cobra language: outline parsing,
//! diagnostics, fold regions, completion and type outlines.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! ide       → Parsed documents, folding, completion, ambience, AnalysisHost
//!   ↓
//! hir       → Binding checks over the declaration tree
//!   ↓
//! parser    → Logos lexer, keyword tables, indentation-driven outline parser
//!   ↓
//! syntax    → Declaration tree, diagnostics
//!   ↓
//! base      → Primitives (LineTable, Position, Span, TextSize)
//! ```
//!
//! ## Quick start
//!
//! ```
//! use cobra::ide::{DocumentOptions, parse_document};
//!
//! let source = "namespace Shapes\n\tclass Circle\n\t\tvar radius as float\n";
//! let doc = parse_document("shapes.cobra", source, &DocumentOptions::default());
//!
//! assert!(doc.diagnostics.is_empty());
//! assert_eq!(doc.folds.len(), 2);
//! ```

// ============================================================================
// MODULES (dependency order: base → syntax → parser → hir → ide)
// ============================================================================

/// Foundation types: LineTable, Position, Span
pub mod base;

/// Syntax: declaration tree types, diagnostics
pub mod syntax;

/// Parser: Logos lexer, keywords, outline parser, the SourceParser seam
pub mod parser;

/// Binding: `use` directive checks behind the Binder seam
pub mod hir;

/// IDE features: documents, folding, completion, formatting, ambience
pub mod ide;

// Re-export commonly needed items
pub use parser::keywords;

// Re-export foundation types
pub use base::{LineTable, Position, Span, TextSize};
