//! Binding: semantic checks that run once a declaration tree exists.
//!
//! A binder only reads the tree and records diagnostics. Failing with a
//! [`BindError`] keeps every diagnostic recorded up to that point.

use rustc_hash::{FxHashMap, FxHashSet};
use smol_str::SmolStr;
use thiserror::Error;
use tracing::trace;

use crate::parser::ParserOptions;
use crate::syntax::{DiagnosticSink, Module, codes};

/// A binding phase that could not finish.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindError {
    #[error("{phase} failed: {message}")]
    PhaseFailed {
        phase: &'static str,
        message: String,
    },
}

/// Semantic pass over a parsed module.
pub trait Binder {
    fn bind(&self, module: &Module, sink: &mut DiagnosticSink) -> Result<(), BindError>;
}

/// Checks `use` directives against the namespaces that can be found.
#[derive(Debug, Clone)]
pub struct UseBinder {
    known: FxHashSet<SmolStr>,
}

impl UseBinder {
    pub fn new(options: &ParserOptions) -> Self {
        Self {
            known: options.known_namespaces.iter().cloned().collect(),
        }
    }
}

impl Default for UseBinder {
    fn default() -> Self {
        Self::new(&ParserOptions::default())
    }
}

impl Binder for UseBinder {
    fn bind(&self, module: &Module, sink: &mut DiagnosticSink) -> Result<(), BindError> {
        let declared = module.declared_namespaces();
        let mut seen: FxHashMap<&str, usize> = FxHashMap::default();

        for directive in module.use_directives() {
            let name = directive.namespace.as_str();

            if let Some(first_line) = seen.get(name) {
                sink.warning(
                    directive.line,
                    codes::DUPLICATE_USE,
                    format!("Namespace \"{name}\" is already used on line {first_line}."),
                );
                continue;
            }
            seen.insert(name, directive.line);

            let found = self
                .known
                .iter()
                .chain(declared.iter())
                .any(|candidate| covers(candidate, name));
            if !found {
                trace!(namespace = name, line = directive.line, "unresolved use");
                sink.warning(
                    directive.line,
                    codes::UNKNOWN_NAMESPACE,
                    format!("Cannot find namespace \"{name}\"."),
                );
            }
        }

        Ok(())
    }
}

/// True when `candidate` is `name` or lives inside it.
fn covers(candidate: &str, name: &str) -> bool {
    candidate
        .strip_prefix(name)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('.'))
}
