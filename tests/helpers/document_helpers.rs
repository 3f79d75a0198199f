//! Helpers turning sources into parsed documents.

use cobra::ide::{DocumentOptions, FoldingRegion, ParsedDocument, parse_document};

/// Parse with default options.
pub fn document(source: &str) -> ParsedDocument {
    parse_document("test.cobra", source, &DocumentOptions::default())
}

/// `(first_line, last_line)` of every region.
pub fn fold_lines(folds: &[FoldingRegion]) -> Vec<(usize, usize)> {
    folds.iter().map(|f| (f.first_line(), f.last_line())).collect()
}

/// Assert a document has no error diagnostics.
pub fn assert_no_errors(doc: &ParsedDocument) {
    let errors: Vec<String> = doc.errors().map(ToString::to_string).collect();
    assert!(errors.is_empty(), "expected no errors, got:\n{}", errors.join("\n"));
}
