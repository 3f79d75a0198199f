//! Indentation-driven outline parser for Cobra.
//!
//! Declarations are recognised by their leading keyword and nested by tab
//! depth. Expressions are not parsed: statements keep their source text and
//! own whatever lines are indented beneath them.

use smol_str::SmolStr;
use tracing::{debug, trace};

use super::keywords::is_keyword;
use super::lexer::{Token, TokenKind, tokenize};
use super::source_parser::{ParseFault, SourceParser};
use crate::base::{LineTable, indent_level_of};
use crate::syntax::{
    Accessor, AccessorKind, AssemblyDecl, BoxDecl, BoxKind, ContractKind, ContractPart, Decl,
    DiagnosticSink, EnumDecl, Field, FieldKind, Method, MethodKind, Module, Namespace, Property,
    PropertyKind, Stmt, TestMethod, Trivia, TriviaKind, UseDirective, codes,
};

/// Deepest tab indentation the parser descends into.
pub const MAX_NESTING: usize = 256;

/// Parser producing a declaration outline without evaluating expressions.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutlineParser;

impl OutlineParser {
    pub fn new() -> Self {
        Self
    }
}

impl SourceParser for OutlineParser {
    fn parse(
        &self,
        file_name: &str,
        source: &str,
        sink: &mut DiagnosticSink,
    ) -> Result<Module, ParseFault> {
        let table = LineTable::new(source);
        let scanned = scan_lines(&table, sink);
        debug!(
            file = file_name,
            lines = table.len(),
            significant = scanned.lines.len(),
            "outline scan finished"
        );

        if let Some(deep) = scanned.lines.iter().find(|l| l.indent > MAX_NESTING) {
            return Err(ParseFault::at_line(
                format!("Nesting deeper than {MAX_NESTING} levels is not supported."),
                deep.number,
            ));
        }

        if let Some(first) = scanned.lines.first().filter(|l| l.indent > 0) {
            sink.error(
                first.number,
                codes::UNEXPECTED_INDENTATION,
                "Unexpected indentation.",
            );
            return Err(ParseFault::at_line(
                "Cannot continue after unexpected indentation at the start of the file.",
                first.number,
            ));
        }

        let mut module = Module::new(file_name);
        module.trivia = scanned.trivia;

        let mut builder = OutlineBuilder { sink };
        module.top.decls = builder.namespace_members(&scanned.lines, "the top level");
        Ok(module)
    }
}

// ============================================================================
// LINE SCANNING
// ============================================================================

/// A line carrying code, with comments stripped.
#[derive(Debug)]
struct SourceLine<'a> {
    number: usize,
    indent: usize,
    /// Trimmed code text without any trailing comment
    code: &'a str,
    tokens: Vec<Token<'a>>,
}

impl<'a> SourceLine<'a> {
    fn keyword(&self) -> Option<&'a str> {
        self.tokens
            .first()
            .filter(|t| t.kind == TokenKind::Ident)
            .map(|t| t.text)
    }

    /// Code after the leading keyword.
    fn rest(&self) -> &'a str {
        match self.tokens.get(1) {
            Some(t) => self.code[usize::from(t.offset)..].trim(),
            None => "",
        }
    }
}

struct ScannedLines<'a> {
    lines: Vec<SourceLine<'a>>,
    trivia: Vec<Trivia>,
}

/// Drop blank lines, comments and doc strings; tokenize the rest.
fn scan_lines<'a>(table: &'a LineTable, sink: &mut DiagnosticSink) -> ScannedLines<'a> {
    let mut lines = Vec::new();
    let mut trivia = Vec::new();
    let mut open: Option<(TriviaKind, usize)> = None;
    let mut warned_spaces = false;

    for (number, raw) in table.iter() {
        let trimmed = raw.trim();

        if let Some((kind, first_line)) = open {
            let closer = match kind {
                TriviaKind::BlockComment => "#/",
                TriviaKind::DocString => "\"\"\"",
            };
            if trimmed.contains(closer) {
                trivia.push(Trivia {
                    kind,
                    first_line,
                    last_line: number,
                });
                open = None;
            }
            continue;
        }

        if trimmed.is_empty() {
            continue;
        }

        if !warned_spaces && table.has_space_indentation(number) {
            sink.warning(
                number,
                codes::SPACE_INDENTATION,
                "Line is indented with spaces; nesting is measured in tabs only.",
            );
            warned_spaces = true;
        }

        if let Some(rest) = trimmed.strip_prefix("/#") {
            if !rest.contains("#/") {
                open = Some((TriviaKind::BlockComment, number));
            }
            continue;
        }
        if trimmed.starts_with('#') {
            continue;
        }
        if let Some(rest) = trimmed.strip_prefix("\"\"\"") {
            if !rest.contains("\"\"\"") {
                open = Some((TriviaKind::DocString, number));
            }
            continue;
        }

        let tokens = tokenize(trimmed);
        let code = match tokens.iter().find(|t| t.kind == TokenKind::Comment) {
            Some(comment) => trimmed[..usize::from(comment.offset)].trim_end(),
            None => trimmed,
        };
        let tokens = tokens
            .into_iter()
            .filter(|t| t.kind != TokenKind::Comment)
            .collect();

        lines.push(SourceLine {
            number,
            indent: indent_level_of(raw),
            code,
            tokens,
        });
    }

    if let Some((kind, first_line)) = open {
        let message = match kind {
            TriviaKind::BlockComment => "Unterminated block comment.",
            TriviaKind::DocString => "Unterminated doc string.",
        };
        sink.error(first_line, codes::UNTERMINATED_BLOCK, message);
    }

    ScannedLines { lines, trivia }
}

// ============================================================================
// TREE BUILDING
// ============================================================================

/// A header line and the lines indented beneath it.
struct Block<'l, 'a> {
    header: &'l SourceLine<'a>,
    body: &'l [SourceLine<'a>],
}

impl Block<'_, '_> {
    fn line(&self) -> usize {
        self.header.number
    }
}

struct OutlineBuilder<'s> {
    sink: &'s mut DiagnosticSink,
}

impl OutlineBuilder<'_> {
    /// Split `lines` into sibling blocks at the depth of the first line.
    fn siblings<'l, 'a>(&mut self, lines: &'l [SourceLine<'a>]) -> Vec<Block<'l, 'a>> {
        let mut blocks = Vec::new();
        let Some(base) = lines.first().map(|l| l.indent) else {
            return blocks;
        };

        let mut i = 0;
        while i < lines.len() {
            let header = &lines[i];
            if header.indent != base {
                self.sink.error(
                    header.number,
                    codes::INCONSISTENT_INDENTATION,
                    format!(
                        "Inconsistent indentation: expected {base} tab(s) but found {}.",
                        header.indent
                    ),
                );
            }

            let end = lines[i + 1..]
                .iter()
                .position(|l| l.indent <= header.indent)
                .map_or(lines.len(), |p| i + 1 + p);

            blocks.push(Block {
                header,
                body: &lines[i + 1..end],
            });
            i = end;
        }

        blocks
    }

    fn namespace_members(&mut self, lines: &[SourceLine<'_>], context: &str) -> Vec<Decl> {
        let mut decls = Vec::new();

        for block in self.siblings(lines) {
            let decl = match block.header.keyword() {
                Some("namespace") => self.declared_name(&block, "namespace").map(|name| {
                    let context = format!("namespace \"{name}\"");
                    Decl::Namespace(Namespace {
                        decls: self.namespace_members(block.body, &context),
                        name,
                        line: block.line(),
                    })
                }),
                Some("use") => self.declared_name(&block, "use").map(|namespace| {
                    Decl::Use(UseDirective {
                        namespace,
                        line: block.line(),
                    })
                }),
                Some("enum") => self.enum_decl(&block),
                Some("assembly") => Some(Decl::Assembly(AssemblyDecl {
                    line: block.line(),
                    attributes: block.body.iter().map(|l| SmolStr::new(l.code)).collect(),
                })),
                Some(keyword) => match BoxKind::from_keyword(keyword) {
                    Some(kind) => self.box_decl(kind, &block),
                    None => {
                        self.unexpected(&block, context);
                        None
                    }
                },
                None => {
                    self.unexpected(&block, context);
                    None
                }
            };
            decls.extend(decl);
        }

        decls
    }

    fn box_decl(&mut self, kind: BoxKind, block: &Block<'_, '_>) -> Option<Decl> {
        let name = self.declared_name(block, kind.keyword())?;
        let mut base = type_after(&block.header.tokens, "inherits");

        let members = if kind == BoxKind::Sig {
            Vec::new()
        } else {
            let context = format!("{} \"{name}\"", kind.keyword());
            let (members, clause_base) = self.box_members(block.body, &context);
            base = base.or(clause_base);
            members
        };

        Some(Decl::Box(BoxDecl {
            kind,
            name,
            line: block.line(),
            base,
            members,
        }))
    }

    /// Members of a class-like body, plus a base type given on its own line.
    fn box_members(
        &mut self,
        lines: &[SourceLine<'_>],
        context: &str,
    ) -> (Vec<Decl>, Option<SmolStr>) {
        let mut members = Vec::new();
        let mut base = None;

        for block in self.siblings(lines) {
            let member = match block.header.keyword() {
                Some("enum") => self.enum_decl(&block),
                Some("def") => self.method(MethodKind::Def, &block),
                Some("cue") => self.method(MethodKind::Cue, &block),
                Some("pro") => self.property(PropertyKind::Pro, &block),
                Some("get") => self.property(PropertyKind::Get, &block),
                Some("set") => self.property(PropertyKind::Set, &block),
                Some("var") => self.field(FieldKind::Var, &block),
                Some("const") => self.field(FieldKind::Const, &block),
                Some("test") => Some(Decl::Test(self.test_method(&block))),
                Some("invariant") => Some(Decl::Contract(contract(ContractKind::Invariant, &block))),
                Some("inherits") => {
                    base = type_at(&block.header.tokens, 1);
                    None
                }
                // Clause lines continuing the type header
                Some("implements" | "is" | "has" | "where") => None,
                Some(keyword) => match BoxKind::from_keyword(keyword) {
                    Some(kind) => self.box_decl(kind, &block),
                    None => {
                        self.unexpected(&block, context);
                        None
                    }
                },
                None => {
                    self.unexpected(&block, context);
                    None
                }
            };
            members.extend(member);
        }

        (members, base)
    }

    fn method(&mut self, kind: MethodKind, block: &Block<'_, '_>) -> Option<Decl> {
        let keyword = match kind {
            MethodKind::Def => "def",
            MethodKind::Cue => "cue",
        };
        let name = self.declared_name(block, keyword)?;

        Some(Decl::Method(Method {
            kind,
            name,
            line: block.line(),
            return_type: type_after(&block.header.tokens, "as"),
            body: self.member_body(block.body, false),
        }))
    }

    fn property(&mut self, kind: PropertyKind, block: &Block<'_, '_>) -> Option<Decl> {
        let keyword = match kind {
            PropertyKind::Pro => "pro",
            PropertyKind::Get => "get",
            PropertyKind::Set => "set",
        };
        let name = self.declared_name(block, keyword)?;

        Some(Decl::Property(Property {
            kind,
            name,
            line: block.line(),
            type_name: type_after(&block.header.tokens, "as"),
            body: self.member_body(block.body, kind == PropertyKind::Pro),
        }))
    }

    fn field(&mut self, kind: FieldKind, block: &Block<'_, '_>) -> Option<Decl> {
        let keyword = match kind {
            FieldKind::Var => "var",
            FieldKind::Const => "const",
        };
        let name = self.declared_name(block, keyword)?;

        Some(Decl::Field(Field {
            kind,
            name,
            line: block.line(),
            type_name: type_after(&block.header.tokens, "as"),
        }))
    }

    /// Body of a method or property: contracts, tests, statements.
    fn member_body(&mut self, lines: &[SourceLine<'_>], accessors: bool) -> Vec<Decl> {
        let mut body = Vec::new();

        for block in self.siblings(lines) {
            match block.header.keyword() {
                Some("require") => body.push(Decl::Contract(contract(ContractKind::Require, &block))),
                Some("ensure") => body.push(Decl::Contract(contract(ContractKind::Ensure, &block))),
                Some("test") => body.push(Decl::Test(self.test_method(&block))),
                Some("body") => body.extend(self.statements(block.body).into_iter().map(Decl::Stmt)),
                Some("get") if accessors => body.push(Decl::Accessor(Accessor {
                    kind: AccessorKind::Get,
                    line: block.line(),
                    statements: self.statements(block.body),
                })),
                Some("set") if accessors => body.push(Decl::Accessor(Accessor {
                    kind: AccessorKind::Set,
                    line: block.line(),
                    statements: self.statements(block.body),
                })),
                _ => body.push(Decl::Stmt(self.statement(&block))),
            }
        }

        body
    }

    fn test_method(&mut self, block: &Block<'_, '_>) -> TestMethod {
        TestMethod {
            name: dotted_name(&block.header.tokens, 1),
            line: block.line(),
            statements: self.statements(block.body),
        }
    }

    fn statements(&mut self, lines: &[SourceLine<'_>]) -> Vec<Stmt> {
        self.siblings(lines)
            .iter()
            .map(|block| self.statement(block))
            .collect()
    }

    fn statement(&mut self, block: &Block<'_, '_>) -> Stmt {
        Stmt {
            line: block.line(),
            text: SmolStr::new(block.header.code),
            body: self.statements(block.body),
        }
    }

    fn enum_decl(&mut self, block: &Block<'_, '_>) -> Option<Decl> {
        let name = self.declared_name(block, "enum")?;
        let values = block.body.iter().flat_map(|l| enum_values(&l.tokens)).collect();

        Some(Decl::Enum(EnumDecl {
            name,
            line: block.line(),
            values,
        }))
    }

    /// The dotted name following the header keyword, reporting its absence.
    fn declared_name(&mut self, block: &Block<'_, '_>, keyword: &str) -> Option<SmolStr> {
        let name = dotted_name(&block.header.tokens, 1);
        if name.is_none() {
            self.sink.error(
                block.line(),
                codes::MISSING_NAME,
                format!("Expecting a name after \"{keyword}\"."),
            );
        }
        name
    }

    fn unexpected(&mut self, block: &Block<'_, '_>, context: &str) {
        let found = block.header.tokens.first().map_or("", |t| t.text);
        trace!(line = block.line(), found, context, "unexpected line");
        self.sink.error(
            block.line(),
            codes::UNEXPECTED_KEYWORD,
            format!("Unexpected \"{found}\" in {context}."),
        );
    }
}

// ============================================================================
// TOKEN HELPERS
// ============================================================================

fn contract(kind: ContractKind, block: &Block<'_, '_>) -> ContractPart {
    let mut conditions = Vec::new();
    let inline = block.header.rest();
    if !inline.is_empty() {
        conditions.push(SmolStr::new(inline));
    }
    conditions.extend(block.body.iter().map(|l| SmolStr::new(l.code)));

    ContractPart {
        kind,
        line: block.line(),
        conditions,
    }
}

/// `Ident (. Ident)*` starting at `start`.
fn dotted_name(tokens: &[Token<'_>], start: usize) -> Option<SmolStr> {
    let end = dotted_name_end(tokens, start)?;
    let name: String = tokens[start..end].iter().map(|t| t.text).collect();
    Some(SmolStr::new(name))
}

fn dotted_name_end(tokens: &[Token<'_>], start: usize) -> Option<usize> {
    if tokens.get(start)?.kind != TokenKind::Ident {
        return None;
    }

    let mut i = start + 1;
    while i + 1 < tokens.len()
        && tokens[i].kind == TokenKind::Dot
        && tokens[i + 1].kind == TokenKind::Ident
    {
        i += 2;
    }
    Some(i)
}

/// A type reference starting at `start`: dotted name, generic arguments
/// (`<of T>`), and a trailing `?` for nilable types.
fn type_at(tokens: &[Token<'_>], start: usize) -> Option<SmolStr> {
    let mut end = dotted_name_end(tokens, start)?;

    if tokens.get(end).is_some_and(|t| t.kind == TokenKind::Lt) {
        let mut depth = 0usize;
        let mut close = tokens.len();
        for (j, token) in tokens.iter().enumerate().skip(end) {
            match token.kind {
                TokenKind::Lt => depth += 1,
                TokenKind::Gt => {
                    depth -= 1;
                    if depth == 0 {
                        close = j + 1;
                        break;
                    }
                }
                _ => {}
            }
        }
        end = close;
    }

    if tokens.get(end).is_some_and(|t| t.kind == TokenKind::Question) {
        end += 1;
    }

    Some(render_type(&tokens[start..end]))
}

/// The type following the first `word` outside parentheses.
fn type_after(tokens: &[Token<'_>], word: &str) -> Option<SmolStr> {
    let mut depth = 0usize;
    for (i, token) in tokens.iter().enumerate().skip(1) {
        match token.kind {
            TokenKind::LParen => depth += 1,
            TokenKind::RParen => depth = depth.saturating_sub(1),
            TokenKind::Ident if depth == 0 && token.text == word => {
                return type_at(tokens, i + 1);
            }
            _ => {}
        }
    }
    None
}

fn render_type(tokens: &[Token<'_>]) -> SmolStr {
    let mut out = String::new();
    let mut prev = None;

    for token in tokens {
        if prev == Some(TokenKind::Ident) && token.kind == TokenKind::Ident {
            out.push(' ');
        }
        out.push_str(token.text);
        if token.kind == TokenKind::Comma {
            out.push(' ');
        }
        prev = Some(token.kind);
    }

    SmolStr::new(out)
}

/// Names declared on one line of an enum body (`red, green = 2, blue`).
fn enum_values(tokens: &[Token<'_>]) -> Vec<SmolStr> {
    if tokens.first().is_some_and(|t| is_keyword(t.text)) {
        return Vec::new();
    }

    let mut values = Vec::new();
    let mut expect_name = true;
    for token in tokens {
        match token.kind {
            TokenKind::Comma => expect_name = true,
            TokenKind::Ident if expect_name => {
                values.push(SmolStr::new(token.text));
                expect_name = false;
            }
            _ => expect_name = false,
        }
    }
    values
}
