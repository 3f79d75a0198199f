//! `use` directive binding through the public API.

use cobra::hir::{Binder, UseBinder};
use cobra::parser::{OutlineParser, ParserOptions, SourceParser};
use cobra::syntax::{DiagnosticSink, codes};
use rstest::rstest;

fn warnings(source: &str, options: &ParserOptions) -> Vec<(usize, String)> {
    let mut sink = DiagnosticSink::new();
    let module = OutlineParser::new()
        .parse("b.cobra", source, &mut sink)
        .expect("parse");
    UseBinder::new(options).bind(&module, &mut sink).expect("bind");
    sink.warnings()
        .iter()
        .map(|w| (w.line, w.code.as_deref().unwrap_or_default().to_string()))
        .collect()
}

#[rstest]
#[case("use System\n")]
#[case("use System.IO\n")]
#[case("use System.Collections\n")]
#[case("use Cobra\n")]
#[case("namespace App.Core\n\tclass A\nuse App\n")]
fn test_resolvable_uses(#[case] source: &str) {
    assert!(warnings(source, &ParserOptions::default()).is_empty());
}

#[test]
fn test_unknown_namespace() {
    assert_eq!(
        warnings("use System.Windows.Forms\n", &ParserOptions::default()),
        vec![(1, codes::UNKNOWN_NAMESPACE.to_string())]
    );
}

#[test]
fn test_duplicates_reported_on_each_repeat() {
    let found = warnings("use System\nuse System\nuse System\n", &ParserOptions::default());
    assert_eq!(
        found,
        vec![
            (2, codes::DUPLICATE_USE.to_string()),
            (3, codes::DUPLICATE_USE.to_string()),
        ]
    );
}

#[test]
fn test_known_namespaces_replace_defaults() {
    let options = ParserOptions {
        known_namespaces: vec!["Acme".into()],
        ..ParserOptions::default()
    };
    assert_eq!(
        warnings("use Acme\nuse System\n", &options),
        vec![(2, codes::UNKNOWN_NAMESPACE.to_string())]
    );
}
