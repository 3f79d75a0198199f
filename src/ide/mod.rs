//! IDE features: high-level APIs for editor integrations.
//!
//! Each function takes data in and returns data out; no editor protocol
//! types appear here. [`AnalysisHost`] keeps the parsed state of open
//! files and answers requests against it.
//!
//! ## Usage
//!
//! ```
//! use cobra::ide::{DocumentOptions, parse_document};
//!
//! let doc = parse_document(
//!     "n.cobra",
//!     "namespace N\n\tclass C\n\t\tdef m\n\t\t\tpass\n",
//!     &DocumentOptions::default(),
//! );
//! let folds: Vec<_> = doc.folds.iter().map(|f| (f.first_line(), f.last_line())).collect();
//! assert_eq!(folds, vec![(1, 4), (2, 4), (3, 4)]);
//! ```

mod analysis;
pub mod ambience;
pub mod comment_tags;
pub mod completion;
mod document;
pub mod folding;
pub mod formatting;
mod type_outline;

pub use analysis::AnalysisHost;
pub use comment_tags::{CommentTag, DEFAULT_TAGS};
pub use completion::{
    CompletionItem, CompletionKind, CompletionResult, TypeCatalog, TypeEntry,
    code_completion_command, handle_code_completion,
};
pub use document::{
    ConditionalRegion, DocumentError, DocumentOptions, ParsedDocument, load_document,
    parse_document, parse_document_with, parse_reader,
};
pub use folding::{FOLD_LABEL, FoldAccumulator, FoldKind, FoldingRegion, region_end};
pub use formatting::new_line_indent;
pub use type_outline::{MemberDefinition, MemberKind, TypeDefinition, TypeKind, type_outline};
