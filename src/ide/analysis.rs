//! AnalysisHost: owns the parsed documents an editor has open.
//!
//! ## Usage
//!
//! ```
//! use cobra::ide::AnalysisHost;
//!
//! let mut host = AnalysisHost::new();
//! host.set_file_content("shapes.cobra", "class Circle\n\tvar radius as float\n");
//!
//! assert_eq!(host.folding_ranges("shapes.cobra").len(), 1);
//! assert!(host.completions("shapes.cobra", 'C', 0).is_some());
//! ```

use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use tracing::debug;

use super::comment_tags::CommentTag;
use super::completion::{
    CompletionItem, CompletionResult, TypeCatalog, code_completion_command, handle_code_completion,
};
use super::document::{DocumentError, DocumentOptions, ParsedDocument, parse_document, read_source};
use super::folding::FoldingRegion;
use super::formatting::new_line_indent;
use super::type_outline::TypeDefinition;
use crate::base::text_utils::{
    extract_qualified_name_at_cursor, extract_word_at_cursor, word_prefix_before,
};
use crate::base::{LineTable, Position};
use crate::syntax::Diagnostic;

struct OpenFile {
    lines: LineTable,
    document: ParsedDocument,
}

/// Owns all per-file state for the IDE layer.
///
/// Every change re-parses the whole file. Declaration trees are always
/// kept so completion can see the file's `use` directives.
#[derive(Default)]
pub struct AnalysisHost {
    options: DocumentOptions,
    /// Types supplied by the host, e.g. from referenced assemblies
    catalog: TypeCatalog,
    files: FxHashMap<PathBuf, OpenFile>,
}

impl AnalysisHost {
    /// Create a new empty AnalysisHost.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: DocumentOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn options(&self) -> &DocumentOptions {
        &self.options
    }

    /// Replace the host-supplied types offered by completion.
    pub fn set_type_catalog(&mut self, catalog: TypeCatalog) {
        self.catalog = catalog;
    }

    /// Set the content of a file, parsing it and storing the result.
    pub fn set_file_content(&mut self, path: &str, content: &str) -> &ParsedDocument {
        self.store(PathBuf::from(path), content, None)
    }

    /// Read a file from disk and store its parse.
    pub fn load_file(&mut self, path: &Path) -> Result<&ParsedDocument, DocumentError> {
        let (source, modified) = read_source(path)?;
        Ok(self.store(path.to_path_buf(), &source, modified))
    }

    fn store(
        &mut self,
        path: PathBuf,
        content: &str,
        modified: Option<std::time::SystemTime>,
    ) -> &ParsedDocument {
        let options = DocumentOptions {
            store_ast: true,
            ..self.options.clone()
        };
        let mut document = parse_document(&path.to_string_lossy(), content, &options);
        document.last_write_time = modified;
        debug!(path = %path.display(), "file updated");

        let file = OpenFile {
            lines: LineTable::new(content),
            document,
        };
        &self.files.entry(path).insert_entry(file).into_mut().document
    }

    /// Remove a file from storage.
    pub fn remove_file(&mut self, path: &str) -> bool {
        self.files.remove(Path::new(path)).is_some()
    }

    pub fn has_file(&self, path: &str) -> bool {
        self.files.contains_key(Path::new(path))
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    pub fn document(&self, path: &str) -> Option<&ParsedDocument> {
        self.files.get(Path::new(path)).map(|f| &f.document)
    }

    pub fn diagnostics(&self, path: &str) -> &[Diagnostic] {
        self.document(path)
            .map(|d| d.diagnostics.as_slice())
            .unwrap_or_default()
    }

    pub fn folding_ranges(&self, path: &str) -> &[FoldingRegion] {
        self.document(path)
            .map(|d| d.folds.as_slice())
            .unwrap_or_default()
    }

    pub fn types(&self, path: &str) -> &[TypeDefinition] {
        self.document(path)
            .map(|d| d.types.as_slice())
            .unwrap_or_default()
    }

    pub fn comment_tags(&self, path: &str) -> &[CommentTag] {
        self.document(path)
            .map(|d| d.comment_tags.as_slice())
            .unwrap_or_default()
    }

    /// Completion after typing `trigger` in `path`.
    pub fn completions(
        &self,
        path: &str,
        trigger: char,
        trigger_word_length: usize,
    ) -> Option<CompletionResult> {
        let document = self.document(path)?;
        let (catalog, namespaces) = self.completion_scope(document);
        handle_code_completion(&catalog, &namespaces, trigger, trigger_word_length)
    }

    /// Explicitly requested completion of `prefix` in `path`.
    pub fn complete_word(&self, path: &str, prefix: &str) -> Vec<CompletionItem> {
        let Some(document) = self.document(path) else {
            return Vec::new();
        };
        let (catalog, namespaces) = self.completion_scope(document);
        code_completion_command(&catalog, &namespaces, prefix)
    }

    /// Completion of the partial word just before `position`.
    pub fn complete_at(&self, path: &str, position: Position) -> Vec<CompletionItem> {
        let Some(text) = self.line_text(path, position.line) else {
            return Vec::new();
        };
        let prefix = word_prefix_before(text, position.column.saturating_sub(1));
        self.complete_word(path, &prefix)
    }

    /// The declared type named at `position`.
    ///
    /// A dotted name must match a type's full name; a plain word matches
    /// any type of that name, nested types included.
    pub fn type_definition_at(&self, path: &str, position: Position) -> Option<&TypeDefinition> {
        let text = self.line_text(path, position.line)?;
        let column = position.column.saturating_sub(1);
        let types = &self.document(path)?.types;

        if let Some(qualified) = extract_qualified_name_at_cursor(text, column) {
            return find_type(types, &|t| t.full_name() == qualified);
        }
        let word = extract_word_at_cursor(text, column)?;
        find_type(types, &|t| t.name == word)
    }

    fn line_text(&self, path: &str, line: usize) -> Option<&str> {
        self.files.get(Path::new(path))?.lines.line(line)
    }

    /// Indentation for a new line typed after `line`.
    pub fn new_line_indent(&self, path: &str, line: usize) -> String {
        self.files
            .get(Path::new(path))
            .map(|f| new_line_indent(&f.lines, line))
            .unwrap_or_default()
    }

    /// Host types plus the document's own, and the namespaces visible in it.
    fn completion_scope(&self, document: &ParsedDocument) -> (TypeCatalog, Vec<SmolStr>) {
        let mut catalog = self.catalog.clone();
        catalog.extend(&TypeCatalog::from_outline(&document.types));

        let mut namespaces = self.options.parser.implicit_namespaces.clone();
        // Types outside any namespace are always visible.
        namespaces.push(SmolStr::default());
        if let Some(ast) = &document.ast {
            namespaces.extend(ast.use_directives().into_iter().map(|u| u.namespace.clone()));
            namespaces.extend(ast.declared_namespaces());
        }
        (catalog, namespaces)
    }
}

fn find_type<'a>(
    types: &'a [TypeDefinition],
    matches: &dyn Fn(&TypeDefinition) -> bool,
) -> Option<&'a TypeDefinition> {
    types.iter().find_map(|t| {
        if matches(t) {
            Some(t)
        } else {
            find_type(&t.nested, matches)
        }
    })
}
