//! Ambience, formatting and comment tag tests.

use cobra::base::LineTable;
use cobra::ide::ambience::{
    OutputSettings, TypeRef, intrinsic_type_name, namespace_string, single_line_comment,
    type_kind_keyword, type_string,
};
use cobra::ide::comment_tags::comment_tags;
use cobra::ide::formatting::indent_after;
use cobra::ide::{DEFAULT_TAGS, TypeKind, new_line_indent};
use rstest::rstest;

// =============================================================================
// AMBIENCE
// =============================================================================

#[rstest]
#[case("System.Void", "")]
#[case("System.Boolean", "bool")]
#[case("System.Char", "char")]
#[case("System.String", "String")]
#[case("System.UInt32", "uint")]
#[case("System.Decimal", "decimal")]
#[case("System.SByte", "int8")]
#[case("System.Int16", "int16")]
#[case("System.UInt16", "uint16")]
#[case("System.Int64", "int64")]
#[case("System.UInt64", "uint64")]
#[case("System.Enum", "enum")]
#[case("Cobra.Core.Set", "Cobra.Core.Set")]
fn test_intrinsic_type_name(#[case] reflection: &str, #[case] expected: &str) {
    assert_eq!(intrinsic_type_name(reflection), expected);
}

#[rstest]
#[case(TypeKind::Class, Some("class"))]
#[case(TypeKind::Enum, Some("enum"))]
#[case(TypeKind::Interface, Some("interface"))]
#[case(TypeKind::Struct, Some("struct"))]
#[case(TypeKind::Delegate, Some("sig"))]
#[case(TypeKind::Unknown, None)]
fn test_type_kind_keyword(#[case] kind: TypeKind, #[case] expected: Option<&str>) {
    assert_eq!(type_kind_keyword(kind), expected);
}

#[test]
fn test_comment_and_namespace_rendering() {
    assert_eq!(single_line_comment("TODO"), "#TODO");
    let settings = OutputSettings {
        include_keywords: true,
        use_net_type_names: false,
    };
    assert_eq!(namespace_string("Geometry", settings), "namespace Geometry");
}

#[test]
fn test_nested_generic_type_string() {
    let list = TypeRef::new("System.Collections.Generic", "List", TypeKind::Class)
        .with_argument(TypeRef::new("System", "Double", TypeKind::Struct).nilable());
    assert_eq!(type_string(&list, OutputSettings::default()), "List<of float?>");

    let net = OutputSettings {
        use_net_type_names: true,
        ..OutputSettings::default()
    };
    assert_eq!(type_string(&list, net), "List<of Double?>");
}

#[test]
fn test_intrinsic_mapping_needs_system_namespace() {
    let own = TypeRef::new("Acme", "Int32", TypeKind::Struct);
    assert_eq!(type_string(&own, OutputSettings::default()), "Int32");
}

// =============================================================================
// FORMATTING
// =============================================================================

#[rstest]
#[case("namespace Geometry", "\t")]
#[case("\tclass Point", "\t\t")]
#[case("\t\tdef area as float", "\t\t\t")]
#[case("\t\t\twhile i < 10", "\t\t\t\t")]
#[case("\t\t\treturn x", "\t\t\t")]
#[case("\t\t\tif x, return", "\t\t\t")]
#[case("\t\tpro x from _x", "\t\t")]
#[case("\t\tvar x as int", "\t\t")]
#[case("", "")]
fn test_indent_after(#[case] line: &str, #[case] expected: &str) {
    assert_eq!(indent_after(line), expected);
}

#[test]
fn test_new_line_indent_uses_the_line_table() {
    let table = LineTable::new("class C\n\tdef m\n\t\tpass\n");
    assert_eq!(new_line_indent(&table, 1), "\t");
    assert_eq!(new_line_indent(&table, 2), "\t\t");
    assert_eq!(new_line_indent(&table, 3), "\t\t");
    assert_eq!(new_line_indent(&table, 0), "");
}

// =============================================================================
// COMMENT TAGS
// =============================================================================

#[test]
fn test_every_default_tag_is_found() {
    let source = "# TODO a\n# FIXME b\n# HACK c\n# UNDONE d\n# NOTE e\n";
    let keys: Vec<_> = comment_tags(&LineTable::new(source), DEFAULT_TAGS)
        .into_iter()
        .map(|t| t.key.to_string())
        .collect();
    assert_eq!(keys, vec!["TODO", "FIXME", "HACK", "UNDONE"]);
}

#[test]
fn test_tags_are_case_sensitive() {
    assert!(comment_tags(&LineTable::new("# todo lower\n"), DEFAULT_TAGS).is_empty());
}
