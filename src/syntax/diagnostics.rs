//! Diagnostics: error and warning reporting for parsed documents.
//!
//! Parsers and binders record problems into a [`DiagnosticSink`]. The sink
//! keeps errors and warnings apart so the document can list all errors
//! before all warnings, each group in the order it was recorded.

use std::sync::Arc;

// ============================================================================
// DIAGNOSTIC TYPES
// ============================================================================

/// Severity level of a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    /// Convert to LSP severity number.
    pub fn to_lsp(&self) -> u32 {
        match self {
            Severity::Error => 1,
            Severity::Warning => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }
}

/// A diagnostic message anchored at the start of a line.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: Arc<str>,
    /// 1-based line
    pub line: usize,
    /// Always 1; the compiler reports lines only
    pub column: usize,
    /// Diagnostic code (e.g., "P0001")
    pub code: Option<Arc<str>>,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    pub fn error(line: usize, message: impl Into<Arc<str>>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
            line,
            column: 1,
            code: None,
        }
    }

    /// Create a new warning diagnostic.
    pub fn warning(line: usize, message: impl Into<Arc<str>>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
            line,
            column: 1,
            code: None,
        }
    }

    /// Set the diagnostic code.
    pub fn with_code(mut self, code: impl Into<Arc<str>>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}: {}: {}",
            self.line,
            self.column,
            self.severity.as_str(),
            self.message
        )
    }
}

// ============================================================================
// DIAGNOSTIC CODES
// ============================================================================

/// Diagnostic codes.
///
/// ## Code Ranges
///
/// - **P0001-P0099**: Parse errors
/// - **B0001-B0099**: Binding problems
/// - **W0001-W0099**: Warnings about source layout
pub mod codes {
    /// A declaration keyword without the name that must follow it.
    pub const MISSING_NAME: &str = "P0001";
    /// A keyword that is not allowed in the enclosing block.
    pub const UNEXPECTED_KEYWORD: &str = "P0002";
    /// Siblings indented at different depths.
    pub const INCONSISTENT_INDENTATION: &str = "P0003";
    /// A `/#` comment or `"""` doc string never closed.
    pub const UNTERMINATED_BLOCK: &str = "P0004";
    /// The file starts with an indented line.
    pub const UNEXPECTED_INDENTATION: &str = "P0005";
    /// The parser gave up; the message comes from the fault.
    pub const PARSER_FAULT: &str = "P0099";

    /// `use` of a namespace that cannot be found.
    pub const UNKNOWN_NAMESPACE: &str = "B0001";
    /// The same namespace used twice.
    pub const DUPLICATE_USE: &str = "B0002";

    /// Indentation made of spaces.
    pub const SPACE_INDENTATION: &str = "W0001";
}

// ============================================================================
// DIAGNOSTIC SINK
// ============================================================================

/// Records errors and warnings during one parse call.
#[derive(Clone, Debug, Default)]
pub struct DiagnosticSink {
    errors: Vec<Diagnostic>,
    warnings: Vec<Diagnostic>,
}

impl DiagnosticSink {
    /// Create a new empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic in the list matching its severity.
    pub fn add(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity {
            Severity::Error => self.errors.push(diagnostic),
            Severity::Warning => self.warnings.push(diagnostic),
        }
    }

    /// Record an error with a code.
    pub fn error(&mut self, line: usize, code: &str, message: impl Into<Arc<str>>) {
        self.add(Diagnostic::error(line, message).with_code(code));
    }

    /// Record a warning with a code.
    pub fn warning(&mut self, line: usize, code: &str, message: impl Into<Arc<str>>) {
        self.add(Diagnostic::warning(line, message).with_code(code));
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn errors(&self) -> &[Diagnostic] {
        &self.errors
    }

    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }

    /// All errors, then all warnings.
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        let mut all = self.errors;
        all.extend(self.warnings);
        all
    }
}
