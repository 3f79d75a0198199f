//! The boundary between the document pipeline and a Cobra parser.

use thiserror::Error;

use crate::syntax::{DiagnosticSink, Module};

/// An unrecoverable parser failure.
///
/// Problems the parser can report and continue past go into the
/// [`DiagnosticSink`] instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ParseFault {
    pub message: String,
    /// Line the parser stopped at, when known
    pub line: Option<usize>,
}

impl ParseFault {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            line: None,
        }
    }

    pub fn at_line(message: impl Into<String>, line: usize) -> Self {
        Self {
            message: message.into(),
            line: Some(line),
        }
    }
}

/// Turns Cobra source text into a declaration tree.
pub trait SourceParser {
    /// Parse `source`, recording recoverable problems in `sink`.
    fn parse(
        &self,
        file_name: &str,
        source: &str,
        sink: &mut DiagnosticSink,
    ) -> Result<Module, ParseFault>;
}
