//! Declaration tree for one Cobra source file.
//!
//! Every node carries the 1-based line of its introducing token. Children
//! are stored in declaration order so walkers see them exactly as written.

use smol_str::SmolStr;

/// Name of the implicit top-level namespace.
pub const GLOBAL_NAMESPACE: &str = "global";

/// A parsed source file.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Module {
    pub file_name: SmolStr,
    /// The implicit `global` namespace holding all top-level declarations
    pub top: Namespace,
    /// Multi-line comments and doc strings, in document order
    pub trivia: Vec<Trivia>,
}

impl Module {
    pub fn new(file_name: impl Into<SmolStr>) -> Self {
        Self {
            file_name: file_name.into(),
            top: Namespace::global(),
            trivia: Vec::new(),
        }
    }

    /// Top-level declarations in order.
    pub fn decls(&self) -> &[Decl] {
        &self.top.decls
    }

    /// All `use` directives anywhere in the file, in order.
    pub fn use_directives(&self) -> Vec<&UseDirective> {
        fn collect<'a>(decls: &'a [Decl], out: &mut Vec<&'a UseDirective>) {
            for decl in decls {
                match decl {
                    Decl::Use(u) => out.push(u),
                    Decl::Namespace(ns) => collect(&ns.decls, out),
                    _ => {}
                }
            }
        }

        let mut out = Vec::new();
        collect(&self.top.decls, &mut out);
        out
    }

    /// Fully qualified names of every namespace declared in the file.
    pub fn declared_namespaces(&self) -> Vec<SmolStr> {
        fn collect(decls: &[Decl], prefix: &str, out: &mut Vec<SmolStr>) {
            for decl in decls {
                if let Decl::Namespace(ns) = decl {
                    let full = if prefix.is_empty() {
                        ns.name.to_string()
                    } else {
                        format!("{prefix}.{}", ns.name)
                    };
                    collect(&ns.decls, &full, out);
                    out.push(SmolStr::new(full));
                }
            }
        }

        let mut out = Vec::new();
        collect(&self.top.decls, "", &mut out);
        out
    }
}

/// `namespace Name`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Namespace {
    pub name: SmolStr,
    pub line: usize,
    pub decls: Vec<Decl>,
}

impl Namespace {
    pub fn global() -> Self {
        Self {
            name: SmolStr::new_static(GLOBAL_NAMESPACE),
            line: 0,
            decls: Vec::new(),
        }
    }

    pub fn is_global(&self) -> bool {
        self.name == GLOBAL_NAMESPACE
    }
}

/// `use Some.Namespace`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UseDirective {
    pub namespace: SmolStr,
    pub line: usize,
}

/// The flavours of type declaration that share the "box" shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BoxKind {
    Class,
    Interface,
    Struct,
    Mixin,
    /// A delegate signature (`sig`)
    Sig,
}

impl BoxKind {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "class" => Some(Self::Class),
            "interface" => Some(Self::Interface),
            "struct" => Some(Self::Struct),
            "mixin" => Some(Self::Mixin),
            "sig" => Some(Self::Sig),
            _ => None,
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Interface => "interface",
            Self::Struct => "struct",
            Self::Mixin => "mixin",
            Self::Sig => "sig",
        }
    }
}

/// `class`, `interface`, `struct`, `mixin` or `sig`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoxDecl {
    pub kind: BoxKind,
    pub name: SmolStr,
    pub line: usize,
    /// Type named after `inherits`
    pub base: Option<SmolStr>,
    /// Methods, properties, fields, nested types, tests and invariants
    pub members: Vec<Decl>,
}

/// `enum Name` with its values
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnumDecl {
    pub name: SmolStr,
    pub line: usize,
    pub values: Vec<SmolStr>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MethodKind {
    /// `def`
    Def,
    /// `cue` (initializers and other special methods)
    Cue,
}

/// `def name` or `cue name`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Method {
    pub kind: MethodKind,
    pub name: SmolStr,
    pub line: usize,
    pub return_type: Option<SmolStr>,
    /// Contracts, tests and statements in declaration order
    pub body: Vec<Decl>,
}

impl Method {
    pub fn require_part(&self) -> Option<&ContractPart> {
        self.contract(ContractKind::Require)
    }

    pub fn ensure_part(&self) -> Option<&ContractPart> {
        self.contract(ContractKind::Ensure)
    }

    pub fn tests(&self) -> impl Iterator<Item = &TestMethod> {
        self.body.iter().filter_map(|decl| match decl {
            Decl::Test(t) => Some(t),
            _ => None,
        })
    }

    pub fn statements(&self) -> impl Iterator<Item = &Stmt> {
        self.body.iter().filter_map(|decl| match decl {
            Decl::Stmt(s) => Some(s),
            _ => None,
        })
    }

    fn contract(&self, kind: ContractKind) -> Option<&ContractPart> {
        self.body.iter().find_map(|decl| match decl {
            Decl::Contract(c) if c.kind == kind => Some(c),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PropertyKind {
    /// `pro`: read/write property
    Pro,
    /// `get`: read-only property
    Get,
    /// `set`: write-only property
    Set,
}

/// `pro name`, `get name` or `set name` at type level
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Property {
    pub kind: PropertyKind,
    pub name: SmolStr,
    pub line: usize,
    pub type_name: Option<SmolStr>,
    /// Accessors, contracts, tests and statements in declaration order
    pub body: Vec<Decl>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AccessorKind {
    Get,
    Set,
}

/// A `get` or `set` block inside a `pro`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Accessor {
    pub kind: AccessorKind,
    pub line: usize,
    pub statements: Vec<Stmt>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FieldKind {
    Var,
    Const,
}

/// `var name` or `const name` at type level
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Field {
    pub kind: FieldKind,
    pub name: SmolStr,
    pub line: usize,
    pub type_name: Option<SmolStr>,
}

/// `test [name]`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TestMethod {
    pub name: Option<SmolStr>,
    pub line: usize,
    pub statements: Vec<Stmt>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ContractKind {
    Require,
    Ensure,
    Invariant,
}

impl ContractKind {
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Require => "require",
            Self::Ensure => "ensure",
            Self::Invariant => "invariant",
        }
    }
}

/// `require`, `ensure` or `invariant` with its condition lines
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContractPart {
    pub kind: ContractKind,
    pub line: usize,
    pub conditions: Vec<SmolStr>,
}

/// A statement; compound statements own their indented body.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stmt {
    pub line: usize,
    /// Trimmed statement text
    pub text: SmolStr,
    pub body: Vec<Stmt>,
}

/// `assembly` with its attribute lines
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AssemblyDecl {
    pub line: usize,
    pub attributes: Vec<SmolStr>,
}

/// Any node the declaration walker visits.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Decl {
    Namespace(Namespace),
    Use(UseDirective),
    Box(BoxDecl),
    Enum(EnumDecl),
    Method(Method),
    Property(Property),
    Accessor(Accessor),
    Field(Field),
    Test(TestMethod),
    Contract(ContractPart),
    Stmt(Stmt),
    Assembly(AssemblyDecl),
}

impl Decl {
    /// Line of the token that introduces this node.
    pub fn line(&self) -> usize {
        match self {
            Decl::Namespace(n) => n.line,
            Decl::Use(u) => u.line,
            Decl::Box(b) => b.line,
            Decl::Enum(e) => e.line,
            Decl::Method(m) => m.line,
            Decl::Property(p) => p.line,
            Decl::Accessor(a) => a.line,
            Decl::Field(f) => f.line,
            Decl::Test(t) => t.line,
            Decl::Contract(c) => c.line,
            Decl::Stmt(s) => s.line,
            Decl::Assembly(a) => a.line,
        }
    }

    /// Declared name, for nodes that have one.
    pub fn name(&self) -> Option<&str> {
        match self {
            Decl::Namespace(n) => Some(&n.name),
            Decl::Use(u) => Some(&u.namespace),
            Decl::Box(b) => Some(&b.name),
            Decl::Enum(e) => Some(&e.name),
            Decl::Method(m) => Some(&m.name),
            Decl::Property(p) => Some(&p.name),
            Decl::Field(f) => Some(&f.name),
            Decl::Test(t) => t.name.as_deref(),
            Decl::Accessor(_) | Decl::Contract(_) | Decl::Stmt(_) | Decl::Assembly(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TriviaKind {
    /// `/# ... #/`
    BlockComment,
    /// `""" ... """`
    DocString,
}

/// A comment block or doc string with its line extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Trivia {
    pub kind: TriviaKind,
    pub first_line: usize,
    pub last_line: usize,
}
