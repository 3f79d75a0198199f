//! Parsed documents: everything the editor needs from one source file.
//!
//! [`parse_document_with`] runs the pipeline:
//!
//! 1. split the text into a line table
//! 2. parse; a fault becomes one more error when errors were already
//!    recorded, otherwise it is logged and the document has no tree
//! 3. bind the tree; a failed phase is logged and keeps what it recorded
//! 4. collect diagnostics (errors first, then warnings), comment tags and
//!    the type outline
//! 5. compute fold regions, but only for a tree parsed without errors
//!
//! Nothing is kept between calls.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use smol_str::SmolStr;
use thiserror::Error;
use tracing::{debug, warn};

use super::comment_tags::{CommentTag, DEFAULT_TAGS, comment_tags};
use super::folding::{FoldingRegion, comment_folds, declaration_folds, merge_folds};
use super::type_outline::{
    MemberDefinition, TypeDefinition, innermost_type_at, member_at, top_level_type_at,
    type_outline,
};
use crate::base::{LineTable, Span};
use crate::hir::{Binder, UseBinder};
use crate::parser::{OutlineParser, ParserOptions, SourceParser};
use crate::syntax::{Diagnostic, DiagnosticSink, Module, codes};

/// Failure to obtain a document's text.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// What to compute for a document.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DocumentOptions {
    /// Keep the declaration tree in [`ParsedDocument::ast`]
    pub store_ast: bool,
    /// Add fold regions for multi-line comments and doc strings
    pub fold_comments: bool,
    pub collapse_comments: bool,
    /// Comment tags to report; empty disables the scan
    pub comment_tags: Vec<SmolStr>,
    pub parser: ParserOptions,
}

impl Default for DocumentOptions {
    fn default() -> Self {
        Self {
            store_ast: false,
            fold_comments: true,
            collapse_comments: false,
            comment_tags: DEFAULT_TAGS.iter().map(|t| SmolStr::new(t)).collect(),
            parser: ParserOptions::default(),
        }
    }
}

impl DocumentOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ast(mut self) -> Self {
        self.store_ast = true;
        self
    }

    pub fn with_parser_options(mut self, parser: ParserOptions) -> Self {
        self.parser = parser;
        self
    }
}

/// A region excluded by conditional compilation.
///
/// Cobra has no preprocessor, so documents never contain any.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConditionalRegion {
    pub flag: SmolStr,
    pub span: Span,
}

/// Result of parsing one source file.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParsedDocument {
    pub file_name: SmolStr,
    pub last_write_time: Option<SystemTime>,
    /// Declaration tree, present only when requested and parsing succeeded
    pub ast: Option<Module>,
    /// Errors in recorded order, then warnings
    pub diagnostics: Vec<Diagnostic>,
    pub comment_tags: Vec<CommentTag>,
    pub conditional_regions: Vec<ConditionalRegion>,
    /// Ordered by first line
    pub folds: Vec<FoldingRegion>,
    pub types: Vec<TypeDefinition>,
}

impl ParsedDocument {
    fn empty(file_name: &str) -> Self {
        Self {
            file_name: SmolStr::new(file_name),
            last_write_time: None,
            ast: None,
            diagnostics: Vec::new(),
            comment_tags: Vec::new(),
            conditional_regions: Vec::new(),
            folds: Vec::new(),
            types: Vec::new(),
        }
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.is_error())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| !d.is_error())
    }

    pub fn top_level_type_at(&self, line: usize) -> Option<&TypeDefinition> {
        top_level_type_at(&self.types, line)
    }

    pub fn innermost_type_at(&self, line: usize) -> Option<&TypeDefinition> {
        innermost_type_at(&self.types, line)
    }

    pub fn member_at(&self, line: usize) -> Option<&MemberDefinition> {
        member_at(&self.types, line)
    }
}

/// Parse `source` with the built-in outline parser and `use` binder.
pub fn parse_document(file_name: &str, source: &str, options: &DocumentOptions) -> ParsedDocument {
    let binder = UseBinder::new(&options.parser);
    parse_document_with(&OutlineParser::new(), &binder, file_name, source, options)
}

/// Parse `source` with the given parser and binder.
pub fn parse_document_with<P, B>(
    parser: &P,
    binder: &B,
    file_name: &str,
    source: &str,
    options: &DocumentOptions,
) -> ParsedDocument
where
    P: SourceParser + ?Sized,
    B: Binder + ?Sized,
{
    let table = LineTable::new(source);
    let mut sink = DiagnosticSink::new();
    let mut document = ParsedDocument::empty(file_name);

    let module = match parser.parse(file_name, source, &mut sink) {
        Ok(module) => Some(module),
        Err(fault) => {
            if sink.has_errors() {
                sink.error(
                    fault.line.unwrap_or(1),
                    codes::PARSER_FAULT,
                    fault.message.as_str(),
                );
            } else {
                warn!(file = file_name, %fault, "parser gave up without reporting an error");
            }
            None
        }
    };

    if let Some(module) = &module {
        if let Err(err) = binder.bind(module, &mut sink) {
            warn!(file = file_name, %err, "binding stopped early");
        }
    }

    let clean = !sink.has_errors();
    document.diagnostics = sink.into_diagnostics();

    if !options.comment_tags.is_empty() {
        document.comment_tags = comment_tags(&table, &options.comment_tags);
    }

    if let Some(module) = module {
        document.types = type_outline(&module, &table);

        if clean {
            let mut folds = declaration_folds(&module, &table);
            if options.fold_comments {
                let comments = comment_folds(&module.trivia, &table, options.collapse_comments);
                folds = merge_folds(folds, comments);
            }
            document.folds = folds;
        }

        if options.store_ast {
            document.ast = Some(module);
        }
    }

    debug!(
        file = file_name,
        diagnostics = document.diagnostics.len(),
        folds = document.folds.len(),
        types = document.types.len(),
        "document parsed"
    );
    document
}

/// Read the whole of `reader` and parse it.
pub fn parse_reader<R: Read>(
    file_name: &str,
    mut reader: R,
    options: &DocumentOptions,
) -> Result<ParsedDocument, DocumentError> {
    let mut source = String::new();
    reader
        .read_to_string(&mut source)
        .map_err(|source| DocumentError::Io {
            path: PathBuf::from(file_name),
            source,
        })?;
    Ok(parse_document(file_name, &source, options))
}

/// Load and parse a file, recording its modification time.
pub fn load_document(path: &Path, options: &DocumentOptions) -> Result<ParsedDocument, DocumentError> {
    let (source, modified) = read_source(path)?;
    let mut document = parse_document(&path.to_string_lossy(), &source, options);
    document.last_write_time = modified;
    Ok(document)
}

/// Text of `path` and, when the platform reports it, its modification time.
pub(crate) fn read_source(path: &Path) -> Result<(String, Option<SystemTime>), DocumentError> {
    let source = std::fs::read_to_string(path).map_err(|source| DocumentError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let modified = std::fs::metadata(path).and_then(|m| m.modified()).ok();
    Ok((source, modified))
}
