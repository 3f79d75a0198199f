//! Parser configuration.

use smol_str::SmolStr;

/// Namespaces every Cobra file uses without a `use` directive.
pub const IMPLICIT_NAMESPACES: &[&str] = &[
    "System",
    "System.Collections.Generic",
    "System.IO",
    "System.Text",
    "Cobra.Core",
];

/// Options shared by the parser and binder.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ParserOptions {
    /// Namespaces that `use` directives may refer to besides those
    /// declared in the file itself.
    pub known_namespaces: Vec<SmolStr>,
    /// Namespaces available without a `use` directive.
    pub implicit_namespaces: Vec<SmolStr>,
}

impl Default for ParserOptions {
    fn default() -> Self {
        let implicit: Vec<SmolStr> = IMPLICIT_NAMESPACES.iter().map(|ns| SmolStr::new(ns)).collect();
        Self {
            known_namespaces: implicit.clone(),
            implicit_namespaces: implicit,
        }
    }
}

impl ParserOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a namespace provided by a referenced library.
    pub fn with_known_namespace(mut self, namespace: impl Into<SmolStr>) -> Self {
        let namespace = namespace.into();
        if !self.known_namespaces.contains(&namespace) {
            self.known_namespaces.push(namespace);
        }
        self
    }

    /// Replace the implicitly used namespaces.
    pub fn with_implicit_namespaces<I, S>(mut self, namespaces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        self.implicit_namespaces = namespaces.into_iter().map(Into::into).collect();
        self
    }
}
