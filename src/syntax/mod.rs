//! Syntax: declaration tree types and diagnostics.

pub mod ast;
mod diagnostics;

pub use ast::{
    Accessor, AccessorKind, AssemblyDecl, BoxDecl, BoxKind, ContractKind, ContractPart, Decl,
    EnumDecl, Field, FieldKind, GLOBAL_NAMESPACE, Method, MethodKind, Module, Namespace, Property,
    PropertyKind, Stmt, TestMethod, Trivia, TriviaKind, UseDirective,
};
pub use diagnostics::{Diagnostic, DiagnosticSink, Severity, codes};
