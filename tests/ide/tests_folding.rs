//! Fold region tests for the IDE layer.

use cobra::base::LineTable;
use cobra::ide::{FOLD_LABEL, FoldKind, region_end};
use rstest::rstest;

use crate::helpers::document_helpers::{assert_no_errors, document, fold_lines};
use crate::helpers::source_fixtures::{COMMENTED, FULL_CLASS, NESTED_METHOD};

// =============================================================================
// REGION END
// =============================================================================

#[rstest]
#[case("class X\n\tfield\n\n\tmethod\ndone\n", 1, 4)]
#[case("class X\n\tvar a\n\n\n", 1, 2)]
#[case("a\n\tb\n", 2, 2)]
#[case("\tdef a\nclass B\n", 1, 1)]
#[case("a\n\tb\n\t\tc\n\td\ne\n", 2, 3)]
#[case("a\n\n\n", 1, 1)]
fn test_region_end(#[case] source: &str, #[case] first: usize, #[case] expected: usize) {
    let table = LineTable::new(source);
    assert_eq!(region_end(&table, first), expected);
}

#[test]
fn test_region_end_never_precedes_start() {
    let table = LineTable::new(FULL_CLASS);
    for line in 1..=table.len() + 2 {
        assert!(region_end(&table, line) >= line, "line {line}");
    }
}

// =============================================================================
// DECLARATION FOLDS
// =============================================================================

#[test]
fn test_nested_namespace_class_and_method() {
    let doc = document(NESTED_METHOD);
    assert_no_errors(&doc);
    assert_eq!(fold_lines(&doc.folds), vec![(1, 4), (2, 4), (3, 4)]);

    let kinds: Vec<_> = doc.folds.iter().map(|f| f.kind).collect();
    assert_eq!(kinds, vec![FoldKind::Namespace, FoldKind::Type, FoldKind::Member]);
}

#[rstest]
#[case("namespace global\n\tclass C\n\t\tvar x\n", vec![(2, 3)])]
#[case("namespace Other\n\tclass C\n\t\tvar x\n", vec![(1, 3), (2, 3)])]
#[case("class A\nclass B\n", vec![])]
#[case("class A\n\tvar x\n\tvar y\n", vec![(1, 3)])]
#[case("enum Color\n\tred, green\n\tblue\n", vec![(1, 3)])]
fn test_declaration_folds(#[case] source: &str, #[case] expected: Vec<(usize, usize)>) {
    let doc = document(source);
    assert_no_errors(&doc);
    assert_eq!(fold_lines(&doc.folds), expected);
}

#[test]
fn test_full_class_folds_in_document_order() {
    let doc = document(FULL_CLASS);
    assert_no_errors(&doc);
    assert_eq!(
        fold_lines(&doc.folds),
        vec![
            (3, 40),
            (5, 36),
            (6, 8),
            (13, 14),
            (18, 22),
            (19, 20),
            (21, 22),
            (24, 33),
            (27, 29),
            (31, 32),
            (35, 36),
            (38, 40),
        ]
    );
}

#[test]
fn test_region_columns_and_label() {
    let doc = document(NESTED_METHOD);
    let ns = &doc.folds[0];

    assert_eq!(ns.label, FOLD_LABEL);
    assert_eq!(ns.span.start.column, "namespace N".len() + 1);
    assert_eq!(ns.span.end.column, "\t\t\tpass".len());
    assert!(!ns.collapsed_by_default);
}

#[test]
fn test_trailing_whitespace_is_not_part_of_the_region() {
    let doc = document("class C\n\tvar x   \t\n");
    assert_eq!(doc.folds[0].span.end.column, "\tvar x".chars().count());
}

// =============================================================================
// COMMENT FOLDS
// =============================================================================

#[test]
fn test_comment_blocks_fold_between_declarations() {
    let doc = document(COMMENTED);
    assert_no_errors(&doc);
    assert_eq!(fold_lines(&doc.folds), vec![(1, 4), (5, 10), (6, 8), (9, 10)]);

    let comment = &doc.folds[0];
    assert_eq!(comment.kind, FoldKind::Comment);
    assert_eq!(comment.span.start.column, 3);
    assert_eq!(comment.span.end.column, 2);
}

#[test]
fn test_single_line_block_comment_does_not_fold() {
    let doc = document("/# one line #/\nclass C\n\tvar x\n");
    assert_eq!(fold_lines(&doc.folds), vec![(2, 3)]);
}

// =============================================================================
// ERRORS
// =============================================================================

#[rstest]
#[case("class C\n\tdef\n\t\tpass\n")]
#[case("class C\n\tvar x\n\t\t\tvar y\n\tbogus thing\n")]
#[case("/#\nnever closed\nclass C\n\tvar x\n")]
fn test_errors_suppress_all_folds(#[case] source: &str) {
    let doc = document(source);
    assert!(doc.has_errors());
    assert!(doc.folds.is_empty());
}

#[test]
fn test_warnings_do_not_suppress_folds() {
    let doc = document("use Missing.Namespace\nclass C\n\tvar x\n");
    assert!(!doc.has_errors());
    assert_eq!(doc.warnings().count(), 1);
    assert_eq!(fold_lines(&doc.folds), vec![(2, 3)]);
}
