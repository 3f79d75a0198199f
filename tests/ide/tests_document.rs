//! Document pipeline tests: parser and binder failures, options, loading.

use std::io::Write;

use cobra::hir::{BindError, Binder, UseBinder};
use cobra::ide::{
    DocumentOptions, MemberKind, TypeKind, load_document, parse_document, parse_document_with,
    parse_reader,
};
use cobra::parser::{OutlineParser, ParseFault, SourceParser};
use cobra::syntax::{DiagnosticSink, Module, Severity, codes};

use crate::helpers::document_helpers::{assert_no_errors, document, fold_lines};
use crate::helpers::source_fixtures::{COMMENTED, FULL_CLASS, NESTED_METHOD};

// =============================================================================
// TEST DOUBLES
// =============================================================================

/// Parser that gives up, optionally after recording an error.
struct FaultyParser {
    record_error: bool,
    line: Option<usize>,
}

impl SourceParser for FaultyParser {
    fn parse(
        &self,
        _file_name: &str,
        _source: &str,
        sink: &mut DiagnosticSink,
    ) -> Result<Module, ParseFault> {
        if self.record_error {
            sink.error(2, codes::MISSING_NAME, "Expecting a name.");
        }
        sink.warning(3, codes::SPACE_INDENTATION, "Spaces.");
        Err(ParseFault {
            message: "internal parser failure".into(),
            line: self.line,
        })
    }
}

/// Binder that records one diagnostic and then fails.
struct FailingBinder {
    severity: Severity,
}

impl Binder for FailingBinder {
    fn bind(&self, _module: &Module, sink: &mut DiagnosticSink) -> Result<(), BindError> {
        match self.severity {
            Severity::Error => sink.error(1, "B0099", "binding error"),
            Severity::Warning => sink.warning(1, "B0099", "binding warning"),
        }
        Err(BindError::PhaseFailed {
            phase: "bind use",
            message: "lost track".into(),
        })
    }
}

fn options() -> DocumentOptions {
    DocumentOptions::default()
}

// =============================================================================
// PARSER FAULTS
// =============================================================================

#[test]
fn test_fault_after_errors_becomes_an_error() {
    let parser = FaultyParser {
        record_error: true,
        line: Some(7),
    };
    let doc = parse_document_with(&parser, &UseBinder::default(), "f.cobra", "x\n", &options());

    let errors: Vec<_> = doc.errors().map(|d| (d.line, d.message.to_string())).collect();
    assert_eq!(
        errors,
        vec![
            (2, "Expecting a name.".to_string()),
            (7, "internal parser failure".to_string()),
        ]
    );
    assert_eq!(doc.errors().last().and_then(|d| d.code.as_deref()), Some(codes::PARSER_FAULT));
    assert_eq!(doc.warnings().count(), 1);
    assert!(doc.ast.is_none());
    assert!(doc.folds.is_empty());
}

#[test]
fn test_fault_without_line_is_reported_on_line_one() {
    let parser = FaultyParser {
        record_error: true,
        line: None,
    };
    let doc = parse_document_with(&parser, &UseBinder::default(), "f.cobra", "x\n", &options());
    assert_eq!(doc.errors().last().map(|d| d.line), Some(1));
}

#[test]
fn test_silent_fault_leaves_only_recorded_diagnostics() {
    let parser = FaultyParser {
        record_error: false,
        line: Some(4),
    };
    let doc = parse_document_with(&parser, &UseBinder::default(), "f.cobra", "x\n", &options());

    assert!(!doc.has_errors());
    assert_eq!(doc.diagnostics.len(), 1);
    assert_eq!(doc.diagnostics[0].severity, Severity::Warning);
    assert!(doc.folds.is_empty());
    assert!(doc.types.is_empty());
}

#[test]
fn test_excessive_nesting_fault_is_silent() {
    let deep = format!("class C\n{}var x\n", "\t".repeat(300));
    let doc = document(&deep);
    assert!(doc.diagnostics.is_empty());
    assert!(doc.folds.is_empty());
    assert!(doc.types.is_empty());
}

// =============================================================================
// BINDER FAILURES
// =============================================================================

#[test]
fn test_bind_failure_keeps_diagnostics_and_folds() {
    let binder = FailingBinder {
        severity: Severity::Warning,
    };
    let doc = parse_document_with(&OutlineParser::new(), &binder, "b.cobra", NESTED_METHOD, &options());

    assert_eq!(doc.diagnostics.len(), 1);
    assert_eq!(doc.diagnostics[0].message.as_ref(), "binding warning");
    assert_eq!(fold_lines(&doc.folds), vec![(1, 4), (2, 4), (3, 4)]);
}

#[test]
fn test_binding_errors_suppress_folds() {
    let binder = FailingBinder {
        severity: Severity::Error,
    };
    let doc = parse_document_with(&OutlineParser::new(), &binder, "b.cobra", NESTED_METHOD, &options());

    assert!(doc.has_errors());
    assert!(doc.folds.is_empty());
    assert_eq!(doc.types.len(), 1);
}

// =============================================================================
// DIAGNOSTICS
// =============================================================================

#[test]
fn test_diagnostics_order_and_columns() {
    let source = "use Nope\nuse Nope\nclass C\n\tdef\n\tbogus\n";
    let doc = document(source);

    let summary: Vec<_> = doc
        .diagnostics
        .iter()
        .map(|d| (d.severity, d.line, d.code.as_deref()))
        .collect();
    assert_eq!(
        summary,
        vec![
            (Severity::Error, 4, Some(codes::MISSING_NAME)),
            (Severity::Error, 5, Some(codes::UNEXPECTED_KEYWORD)),
            (Severity::Warning, 1, Some(codes::UNKNOWN_NAMESPACE)),
            (Severity::Warning, 2, Some(codes::DUPLICATE_USE)),
        ]
    );
    assert!(doc.diagnostics.iter().all(|d| d.column == 1));
}

#[test]
fn test_known_namespaces_come_from_options() {
    let source = "use Acme.Tools\nclass C\n\tvar x\n";
    assert_eq!(document(source).warnings().count(), 1);

    let options = DocumentOptions::default().with_parser_options(
        cobra::parser::ParserOptions::default().with_known_namespace("Acme.Tools"),
    );
    assert!(parse_document("k.cobra", source, &options).diagnostics.is_empty());
}

#[test]
fn test_space_indentation_is_flagged_once() {
    let doc = document("class C\n    var x\n    var y\n");
    let warnings: Vec<_> = doc.warnings().filter_map(|d| d.code.as_deref()).collect();
    assert_eq!(warnings, vec![codes::SPACE_INDENTATION]);
}

// =============================================================================
// OUTPUTS
// =============================================================================

#[test]
fn test_type_outline_and_lookups() {
    let doc = document(FULL_CLASS);
    assert_no_errors(&doc);

    let names: Vec<_> = doc.types.iter().map(|t| (t.full_name(), t.kind)).collect();
    assert_eq!(
        names,
        vec![
            ("Geometry.Point".to_string(), TypeKind::Class),
            ("Geometry.Quadrant".to_string(), TypeKind::Enum),
        ]
    );

    let point = &doc.types[0];
    assert_eq!((point.first_line, point.last_line), (5, 36));
    let members: Vec<_> = point.members.iter().map(|m| (m.name.as_str(), m.kind)).collect();
    assert_eq!(
        members,
        vec![
            ("_x", MemberKind::Field),
            ("origin", MemberKind::Field),
            ("init", MemberKind::Initializer),
            ("x", MemberKind::Property),
            ("length", MemberKind::Property),
            ("scale", MemberKind::Method),
        ]
    );

    assert_eq!(doc.top_level_type_at(39).map(|t| t.name.as_str()), Some("Quadrant"));
    assert_eq!(doc.member_at(30).map(|m| m.name.as_str()), Some("scale"));
    assert_eq!(
        doc.member_at(24).and_then(|m| m.type_name.as_deref()),
        Some("Point")
    );
    assert!(doc.member_at(2).is_none());
}

#[test]
fn test_comment_tags_are_collected() {
    let doc = document(COMMENTED);
    let tags: Vec<_> = doc
        .comment_tags
        .iter()
        .map(|t| (t.key.as_str(), t.line, t.column))
        .collect();
    assert_eq!(tags, vec![("TODO", 3, 2), ("FIXME", 9, 14)]);
}

#[test]
fn test_collapsed_comments_option() {
    let options = DocumentOptions {
        collapse_comments: true,
        ..DocumentOptions::default()
    };
    let doc = parse_document("c.cobra", COMMENTED, &options);
    let collapsed: Vec<_> = doc.folds.iter().map(|f| f.collapsed_by_default).collect();
    assert_eq!(collapsed, vec![true, false, true, false]);
}

#[test]
fn test_no_conditional_regions() {
    assert!(document(FULL_CLASS).conditional_regions.is_empty());
}

#[test]
fn test_stored_tree_matches_source() {
    let doc = parse_document("t.cobra", FULL_CLASS, &DocumentOptions::new().with_ast());
    let ast = doc.ast.expect("tree requested");
    let uses: Vec<_> = ast.use_directives().iter().map(|u| u.namespace.to_string()).collect();
    assert_eq!(uses, vec!["System.Text"]);
}

// =============================================================================
// LOADING
// =============================================================================

#[test]
fn test_load_document_records_write_time() {
    let mut file = tempfile::Builder::new()
        .suffix(".cobra")
        .tempfile()
        .expect("temp file");
    file.write_all(NESTED_METHOD.as_bytes()).expect("write");

    let doc = load_document(file.path(), &options()).expect("load");
    assert!(doc.last_write_time.is_some());
    assert_eq!(doc.file_name.as_str(), file.path().to_string_lossy());
    assert_eq!(doc.folds.len(), 3);
}

#[test]
fn test_load_missing_file_is_an_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let missing = dir.path().join("missing.cobra");

    let err = load_document(&missing, &options()).expect_err("missing file");
    assert!(err.to_string().contains("missing.cobra"));
}

#[test]
fn test_parse_reader_has_no_write_time() {
    let doc = parse_reader("r.cobra", NESTED_METHOD.as_bytes(), &options()).expect("read");
    assert!(doc.last_write_time.is_none());
    assert_eq!(doc.folds.len(), 3);
}
