//! Fold regions: indentation-driven block extents.
//!
//! A block extends as long as the non-blank lines after its header are
//! indented deeper than the header. The declaration walker asks for one
//! region per foldable node; single-line results are dropped.

use smol_str::SmolStr;
use tracing::warn;

use crate::base::{LineTable, Span};
use crate::syntax::{Decl, Module, Stmt, Trivia};

/// Text shown in place of a collapsed region.
pub const FOLD_LABEL: &str = "...";

/// What a fold region covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FoldKind {
    #[default]
    Undefined,
    Namespace,
    Type,
    Member,
    Statement,
    Comment,
}

/// A collapsible span of lines.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FoldingRegion {
    pub label: SmolStr,
    /// Starts just past the header text and ends at the last
    /// non-whitespace character of the block
    pub span: Span,
    pub kind: FoldKind,
    pub collapsed_by_default: bool,
}

impl FoldingRegion {
    pub fn first_line(&self) -> usize {
        self.span.start.line
    }

    pub fn last_line(&self) -> usize {
        self.span.end.line
    }
}

/// Indentation of `line`, or 0 when the line does not exist.
pub fn indent_or_zero(table: &LineTable, line: usize) -> usize {
    match table.indent_level(line) {
        Ok(level) => level,
        Err(err) => {
            warn!(%err, "indentation lookup failed, assuming level 0");
            0
        }
    }
}

/// Last line of the block headed by `first_line`.
///
/// Blank lines never end a block and are never its last line.
pub fn region_end(table: &LineTable, first_line: usize) -> usize {
    let level = indent_or_zero(table, first_line);
    let mut last = first_line;

    for line in first_line + 1..=table.len() {
        if table.is_blank(line) {
            continue;
        }
        if indent_or_zero(table, line) <= level {
            return last;
        }
        last = line;
    }

    last
}

/// Collects fold regions for one document in the order they are added.
#[derive(Debug)]
pub struct FoldAccumulator<'t> {
    table: &'t LineTable,
    regions: Vec<FoldingRegion>,
}

impl<'t> FoldAccumulator<'t> {
    pub fn new(table: &'t LineTable) -> Self {
        Self {
            table,
            regions: Vec::new(),
        }
    }

    /// Add the block headed by `first_line`, expanded by default.
    pub fn add_region(&mut self, first_line: usize) {
        self.add_region_with(first_line, false, FoldKind::Undefined);
    }

    /// Add the block headed by `first_line`.
    pub fn add_region_with(&mut self, first_line: usize, collapsed: bool, kind: FoldKind) {
        let last_line = region_end(self.table, first_line);
        self.add_span(first_line, last_line, collapsed, kind);
    }

    /// Add a region whose last line is already known.
    pub fn add_span(&mut self, first_line: usize, last_line: usize, collapsed: bool, kind: FoldKind) {
        if last_line <= first_line {
            return;
        }

        let (Some(first), Some(last)) = (self.table.line(first_line), self.table.line(last_line))
        else {
            warn!(first_line, last_line, "fold region outside the document");
            return;
        };

        self.regions.push(FoldingRegion {
            label: SmolStr::new_static(FOLD_LABEL),
            span: Span::from_coords(
                first_line,
                first.chars().count() + 1,
                last_line,
                last.trim_end().chars().count(),
            ),
            kind,
            collapsed_by_default: collapsed,
        });
    }

    pub fn regions(&self) -> &[FoldingRegion] {
        &self.regions
    }

    pub fn finish(self) -> Vec<FoldingRegion> {
        self.regions
    }
}

/// Fold regions for every foldable declaration, in document order.
pub fn declaration_folds(module: &Module, table: &LineTable) -> Vec<FoldingRegion> {
    let mut acc = FoldAccumulator::new(table);
    for decl in module.decls() {
        visit(&mut acc, decl);
    }
    acc.finish()
}

fn visit(acc: &mut FoldAccumulator<'_>, decl: &Decl) {
    match decl {
        Decl::Namespace(ns) => {
            if !ns.is_global() {
                acc.add_region_with(ns.line, false, FoldKind::Namespace);
            }
            for child in &ns.decls {
                visit(acc, child);
            }
        }
        Decl::Box(b) => {
            acc.add_region_with(b.line, false, FoldKind::Type);
            for member in &b.members {
                visit(acc, member);
            }
        }
        Decl::Enum(e) => acc.add_region_with(e.line, false, FoldKind::Type),
        Decl::Method(m) => {
            acc.add_region_with(m.line, false, FoldKind::Member);
            for child in &m.body {
                visit(acc, child);
            }
        }
        Decl::Property(p) => {
            acc.add_region_with(p.line, false, FoldKind::Member);
            for child in &p.body {
                visit(acc, child);
            }
        }
        Decl::Accessor(a) => {
            acc.add_region_with(a.line, false, FoldKind::Member);
            for stmt in &a.statements {
                visit_stmt(acc, stmt);
            }
        }
        Decl::Test(t) => {
            acc.add_region_with(t.line, false, FoldKind::Member);
            for stmt in &t.statements {
                visit_stmt(acc, stmt);
            }
        }
        Decl::Contract(c) => acc.add_region_with(c.line, false, FoldKind::Undefined),
        Decl::Assembly(a) => acc.add_region_with(a.line, false, FoldKind::Undefined),
        Decl::Stmt(s) => visit_stmt(acc, s),
        Decl::Use(_) | Decl::Field(_) => {}
    }
}

fn visit_stmt(acc: &mut FoldAccumulator<'_>, stmt: &Stmt) {
    acc.add_region_with(stmt.line, false, FoldKind::Statement);
    for child in &stmt.body {
        visit_stmt(acc, child);
    }
}

/// Fold regions for multi-line comments and doc strings.
pub fn comment_folds(trivia: &[Trivia], table: &LineTable, collapsed: bool) -> Vec<FoldingRegion> {
    let mut acc = FoldAccumulator::new(table);
    for t in trivia {
        acc.add_span(t.first_line, t.last_line, collapsed, FoldKind::Comment);
    }
    acc.finish()
}

/// Merge region lists into one list ordered by first line.
///
/// Regions starting on the same line keep their relative order.
pub fn merge_folds(mut folds: Vec<FoldingRegion>, more: Vec<FoldingRegion>) -> Vec<FoldingRegion> {
    folds.extend(more);
    folds.sort_by_key(FoldingRegion::first_line);
    folds
}
