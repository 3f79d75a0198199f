//! Type outline: the types a file declares and the lines they cover.

use smol_str::SmolStr;

use super::folding::region_end;
use crate::base::LineTable;
use crate::syntax::{BoxKind, Decl, MethodKind, Module};

/// Kind of a type, as shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TypeKind {
    Class,
    Interface,
    Struct,
    Mixin,
    Delegate,
    Enum,
    TypeParameter,
    Unknown,
}

impl From<BoxKind> for TypeKind {
    fn from(kind: BoxKind) -> Self {
        match kind {
            BoxKind::Class => TypeKind::Class,
            BoxKind::Interface => TypeKind::Interface,
            BoxKind::Struct => TypeKind::Struct,
            BoxKind::Mixin => TypeKind::Mixin,
            BoxKind::Sig => TypeKind::Delegate,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MemberKind {
    Method,
    Initializer,
    Property,
    Field,
}

/// A method, property or field of a type.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MemberDefinition {
    pub name: SmolStr,
    pub kind: MemberKind,
    pub type_name: Option<SmolStr>,
    pub first_line: usize,
    pub last_line: usize,
}

/// A type declared in the file.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TypeDefinition {
    /// Dotted name of the enclosing namespace; empty for the global one
    pub namespace: SmolStr,
    pub name: SmolStr,
    pub kind: TypeKind,
    pub first_line: usize,
    pub last_line: usize,
    pub members: Vec<MemberDefinition>,
    pub nested: Vec<TypeDefinition>,
}

impl TypeDefinition {
    pub fn full_name(&self) -> String {
        if self.namespace.is_empty() {
            self.name.to_string()
        } else {
            format!("{}.{}", self.namespace, self.name)
        }
    }

    pub fn contains_line(&self, line: usize) -> bool {
        line >= self.first_line && line <= self.last_line
    }
}

/// Types declared at namespace level, with nested types attached to their
/// owners.
pub fn type_outline(module: &Module, table: &LineTable) -> Vec<TypeDefinition> {
    let mut types = Vec::new();
    collect_namespace(module.decls(), "", table, &mut types);
    types
}

fn collect_namespace(decls: &[Decl], namespace: &str, table: &LineTable, out: &mut Vec<TypeDefinition>) {
    for decl in decls {
        match decl {
            Decl::Namespace(ns) => {
                let full = if namespace.is_empty() {
                    ns.name.to_string()
                } else {
                    format!("{namespace}.{}", ns.name)
                };
                collect_namespace(&ns.decls, &full, table, out);
            }
            _ => out.extend(type_definition(decl, namespace, table)),
        }
    }
}

fn type_definition(decl: &Decl, namespace: &str, table: &LineTable) -> Option<TypeDefinition> {
    let (name, kind, line, members) = match decl {
        Decl::Box(b) => (&b.name, TypeKind::from(b.kind), b.line, b.members.as_slice()),
        Decl::Enum(e) => (&e.name, TypeKind::Enum, e.line, &[][..]),
        _ => return None,
    };

    let mut definition = TypeDefinition {
        namespace: SmolStr::new(namespace),
        name: name.clone(),
        kind,
        first_line: line,
        last_line: region_end(table, line),
        members: Vec::new(),
        nested: Vec::new(),
    };

    for member in members {
        let (name, kind, type_name, line) = match member {
            Decl::Method(m) => {
                let kind = match m.kind {
                    MethodKind::Def => MemberKind::Method,
                    MethodKind::Cue => MemberKind::Initializer,
                };
                (&m.name, kind, &m.return_type, m.line)
            }
            Decl::Property(p) => (&p.name, MemberKind::Property, &p.type_name, p.line),
            Decl::Field(f) => (&f.name, MemberKind::Field, &f.type_name, f.line),
            Decl::Box(_) | Decl::Enum(_) => {
                definition.nested.extend(type_definition(member, namespace, table));
                continue;
            }
            _ => continue,
        };

        definition.members.push(MemberDefinition {
            name: name.clone(),
            kind,
            type_name: type_name.clone(),
            first_line: line,
            last_line: region_end(table, line),
        });
    }

    Some(definition)
}

/// The top-level type whose lines include `line`.
pub fn top_level_type_at(types: &[TypeDefinition], line: usize) -> Option<&TypeDefinition> {
    types.iter().find(|t| t.contains_line(line))
}

/// The most deeply nested type whose lines include `line`.
pub fn innermost_type_at(types: &[TypeDefinition], line: usize) -> Option<&TypeDefinition> {
    let mut current = top_level_type_at(types, line)?;
    while let Some(inner) = current.nested.iter().find(|t| t.contains_line(line)) {
        current = inner;
    }
    Some(current)
}

/// The member of the innermost type whose lines include `line`.
pub fn member_at(types: &[TypeDefinition], line: usize) -> Option<&MemberDefinition> {
    innermost_type_at(types, line)?
        .members
        .iter()
        .find(|m| line >= m.first_line && line <= m.last_line)
}
