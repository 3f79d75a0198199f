//! Outline parser tests through the public API.

use cobra::parser::{OutlineParser, ParseFault, SourceParser};
use cobra::syntax::{
    BoxKind, ContractKind, Decl, DiagnosticSink, FieldKind, MethodKind, Module, PropertyKind,
    codes,
};
use rstest::rstest;

use crate::helpers::source_fixtures::FULL_CLASS;

fn parse(source: &str) -> (Result<Module, ParseFault>, DiagnosticSink) {
    let mut sink = DiagnosticSink::new();
    let result = OutlineParser::new().parse("test.cobra", source, &mut sink);
    (result, sink)
}

#[rstest]
#[case("class A\n", BoxKind::Class)]
#[case("interface IA\n", BoxKind::Interface)]
#[case("struct S\n", BoxKind::Struct)]
#[case("mixin M\n", BoxKind::Mixin)]
#[case("sig Callback(x as int)\n", BoxKind::Sig)]
fn test_box_kinds(#[case] source: &str, #[case] expected: BoxKind) {
    let (result, sink) = parse(source);
    assert!(!sink.has_errors());
    let module = result.expect("parse");
    assert!(matches!(module.decls(), [Decl::Box(b)] if b.kind == expected));
}

#[rstest]
#[case("class\n", codes::MISSING_NAME, 1)]
#[case("namespace\n", codes::MISSING_NAME, 1)]
#[case("class A\n\tvar\n", codes::MISSING_NAME, 2)]
#[case("print 'hi'\n", codes::UNEXPECTED_KEYWORD, 1)]
#[case("class A\n\tnamespace B\n", codes::UNEXPECTED_KEYWORD, 2)]
#[case("class A\n\tdef m\n\t\t\tx = 1\n\t\ty = 2\n", codes::INCONSISTENT_INDENTATION, 4)]
#[case("class A\n\t\"\"\"\n\tdocs\n", codes::UNTERMINATED_BLOCK, 2)]
fn test_first_error(#[case] source: &str, #[case] code: &str, #[case] line: usize) {
    let (result, sink) = parse(source);
    assert!(result.is_ok());
    let first = &sink.errors()[0];
    assert_eq!(first.code.as_deref(), Some(code));
    assert_eq!(first.line, line);
}

#[test]
fn test_full_class_structure() {
    let (result, sink) = parse(FULL_CLASS);
    assert!(!sink.has_errors(), "{:?}", sink.errors());
    let module = result.expect("parse");

    let [Decl::Use(using), Decl::Namespace(geometry)] = module.decls() else {
        panic!("unexpected top level: {:?}", module.decls());
    };
    assert_eq!(using.namespace, "System.Text");
    assert_eq!(geometry.name, "Geometry");

    let [Decl::Box(point), Decl::Enum(quadrant)] = geometry.decls.as_slice() else {
        panic!("unexpected namespace body");
    };
    assert_eq!(point.base.as_deref(), Some("Object"));
    assert_eq!(quadrant.values, vec!["first", "second", "third", "fourth"]);

    let kinds: Vec<&str> = point
        .members
        .iter()
        .map(|m| match m {
            Decl::Field(f) if f.kind == FieldKind::Var => "var",
            Decl::Field(_) => "const",
            Decl::Method(m) if m.kind == MethodKind::Cue => "cue",
            Decl::Method(_) => "def",
            Decl::Property(p) if p.kind == PropertyKind::Pro => "pro",
            Decl::Property(_) => "get/set",
            Decl::Contract(c) if c.kind == ContractKind::Invariant => "invariant",
            other => panic!("unexpected member {other:?}"),
        })
        .collect();
    assert_eq!(kinds, vec!["var", "const", "cue", "pro", "pro", "def", "invariant"]);

    let Decl::Method(scale) = &point.members[5] else {
        panic!("expected scale");
    };
    assert_eq!(scale.return_type.as_deref(), Some("Point"));
    assert!(scale.require_part().is_some());
    assert!(scale.ensure_part().is_some());
    assert_eq!(scale.tests().count(), 1);
    let statements: Vec<_> = scale.statements().map(|s| (s.line, s.body.len())).collect();
    assert_eq!(statements, vec![(31, 1), (33, 0)]);
}

#[test]
fn test_trivia_recorded_for_multi_line_blocks_only() {
    let (result, _) = parse("/# one #/\n/#\ntwo\n#/\nclass A\n");
    let module = result.expect("parse");
    assert_eq!(module.trivia.len(), 1);
    assert_eq!((module.trivia[0].first_line, module.trivia[0].last_line), (2, 4));
}

#[test]
fn test_empty_source_is_an_empty_module() {
    let (result, sink) = parse("");
    let module = result.expect("parse");
    assert!(module.decls().is_empty());
    assert!(sink.errors().is_empty() && sink.warnings().is_empty());
}

#[test]
fn test_assembly_attributes() {
    let (result, _) = parse("assembly\n\thas Version('1.0')\nclass A\n");
    let module = result.expect("parse");
    assert!(matches!(
        module.decls(),
        [Decl::Assembly(a), Decl::Box(_)] if a.attributes.len() == 1
    ));
}
