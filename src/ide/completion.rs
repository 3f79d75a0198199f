//! Completion suggestions implementation.
//!
//! Suggestions are the Cobra keywords plus every public type whose
//! namespace is in scope. Member completion after `.` is not offered.

use std::sync::Arc;

use indexmap::IndexMap;
use smol_str::SmolStr;
use tracing::debug;

use super::type_outline::{TypeDefinition, TypeKind};
use crate::parser::keywords::KEYWORDS;

/// Kind of completion item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CompletionKind {
    Class,
    Interface,
    Struct,
    Enum,
    Delegate,
    Keyword,
}

impl CompletionKind {
    /// Convert to LSP completion item kind number.
    pub fn to_lsp(&self) -> u32 {
        match self {
            CompletionKind::Class => 7,
            CompletionKind::Interface => 8,
            CompletionKind::Struct => 22,
            CompletionKind::Enum => 13,
            CompletionKind::Delegate => 3, // Function
            CompletionKind::Keyword => 14,
        }
    }
}

impl From<TypeKind> for CompletionKind {
    fn from(kind: TypeKind) -> Self {
        match kind {
            TypeKind::Interface => CompletionKind::Interface,
            TypeKind::Struct => CompletionKind::Struct,
            TypeKind::Enum => CompletionKind::Enum,
            TypeKind::Delegate => CompletionKind::Delegate,
            TypeKind::Class | TypeKind::Mixin | TypeKind::TypeParameter | TypeKind::Unknown => {
                CompletionKind::Class
            }
        }
    }
}

/// A completion suggestion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompletionItem {
    /// The text shown in the list.
    pub label: Arc<str>,
    /// The kind of completion.
    pub kind: CompletionKind,
    /// Detail text (shown after label).
    pub detail: Option<Arc<str>>,
    /// Text to insert (if different from label).
    pub insert_text: Option<Arc<str>>,
    /// Sort priority (lower = higher priority).
    pub sort_priority: u32,
}

impl CompletionItem {
    pub fn new(label: impl Into<Arc<str>>, kind: CompletionKind) -> Self {
        Self {
            label: label.into(),
            kind,
            detail: None,
            insert_text: None,
            sort_priority: 100,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<Arc<str>>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_insert_text(mut self, text: impl Into<Arc<str>>) -> Self {
        self.insert_text = Some(text.into());
        self
    }

    pub fn with_priority(mut self, priority: u32) -> Self {
        self.sort_priority = priority;
        self
    }

    /// Create from a catalog entry.
    pub fn from_type(entry: &TypeEntry) -> Self {
        let display = generic_display_name(&entry.name);
        let detail = if entry.namespace.is_empty() {
            display.clone()
        } else {
            format!("{}.{}", entry.namespace, display)
        };

        let mut item = Self::new(display, entry.kind.into())
            .with_detail(detail)
            .with_priority(10);
        if entry.name.contains('`') {
            // Insert the bare name; the user fills in the type arguments.
            item = item.with_insert_text(base_name(&entry.name));
        }
        item
    }
}

/// A type that completion may offer.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TypeEntry {
    pub namespace: SmolStr,
    /// Reflection name; generic types carry an arity suffix (`List`1`)
    pub name: SmolStr,
    pub kind: TypeKind,
    pub is_public: bool,
}

impl TypeEntry {
    pub fn new(namespace: impl Into<SmolStr>, name: impl Into<SmolStr>, kind: TypeKind) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            kind,
            is_public: true,
        }
    }
}

/// Types known to completion, usually supplied by the host.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TypeCatalog {
    entries: Vec<TypeEntry>,
}

impl TypeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, entry: TypeEntry) {
        self.entries.push(entry);
    }

    /// Catalog of the top-level types declared in a document.
    pub fn from_outline(types: &[TypeDefinition]) -> Self {
        let entries = types
            .iter()
            .map(|t| TypeEntry::new(t.namespace.clone(), t.name.clone(), t.kind))
            .collect();
        Self { entries }
    }

    pub fn extend(&mut self, other: &TypeCatalog) {
        self.entries.extend(other.entries.iter().cloned());
    }

    pub fn iter(&self) -> impl Iterator<Item = &TypeEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn base_name(name: &str) -> &str {
    name.split('`').next().unwrap_or(name)
}

/// Cobra spelling of a generic reflection name.
///
/// ```
/// use cobra::ide::completion::generic_display_name;
///
/// assert_eq!(generic_display_name("List`1"), "List<of T>");
/// assert_eq!(generic_display_name("Dictionary`2"), "Dictionary<of T1, T2>");
/// assert_eq!(generic_display_name("String"), "String");
/// ```
pub fn generic_display_name(name: &str) -> String {
    let Some((base, arity)) = name.split_once('`') else {
        return name.to_string();
    };
    let Ok(count) = arity.parse::<usize>() else {
        return name.to_string();
    };

    match count {
        0 => base.to_string(),
        1 => format!("{base}<of T>"),
        _ => {
            let params: Vec<String> = (1..=count).map(|i| format!("T{i}")).collect();
            format!("{base}<of {}>", params.join(", "))
        }
    }
}

/// Every Cobra keyword as a completion item.
pub fn keyword_items() -> Vec<CompletionItem> {
    KEYWORDS
        .iter()
        .map(|kw| CompletionItem::new(*kw, CompletionKind::Keyword).with_priority(50))
        .collect()
}

/// Public catalog types whose namespace is in `namespaces`.
pub fn type_items<S: AsRef<str>>(catalog: &TypeCatalog, namespaces: &[S]) -> Vec<CompletionItem> {
    catalog
        .iter()
        .filter(|t| t.is_public && namespaces.iter().any(|ns| t.namespace.as_str() == ns.as_ref()))
        .map(CompletionItem::from_type)
        .collect()
}

/// Items offered while typing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompletionResult {
    pub items: Vec<CompletionItem>,
    /// Length of the word being completed, counting the trigger character
    /// when it is part of the word
    pub trigger_word_length: usize,
}

/// Completion triggered by typing `trigger`.
///
/// Returns `None` after `.`; any trigger other than a space belongs to the
/// word being completed.
pub fn handle_code_completion<S: AsRef<str>>(
    catalog: &TypeCatalog,
    namespaces: &[S],
    trigger: char,
    trigger_word_length: usize,
) -> Option<CompletionResult> {
    if trigger == '.' {
        debug!("member completion is not available");
        return None;
    }

    let trigger_word_length = if trigger == ' ' {
        trigger_word_length
    } else {
        trigger_word_length + 1
    };

    let items = dedup(type_items(catalog, namespaces).into_iter().chain(keyword_items()));
    debug!(count = items.len(), trigger = %trigger, "completion");

    Some(CompletionResult {
        items,
        trigger_word_length,
    })
}

/// Explicitly requested completion for the word `prefix`.
///
/// Matching ignores ASCII case; types sort before keywords.
pub fn code_completion_command<S: AsRef<str>>(
    catalog: &TypeCatalog,
    namespaces: &[S],
    prefix: &str,
) -> Vec<CompletionItem> {
    let prefix = prefix.to_ascii_lowercase();
    let mut items: Vec<CompletionItem> = dedup(
        type_items(catalog, namespaces)
            .into_iter()
            .chain(keyword_items())
            .filter(|item| item.label.to_ascii_lowercase().starts_with(&prefix)),
    );
    items.sort_by_key(|item| item.sort_priority);
    items
}

/// Keep the first item for each label, in order.
fn dedup(items: impl Iterator<Item = CompletionItem>) -> Vec<CompletionItem> {
    let mut by_label: IndexMap<Arc<str>, CompletionItem> = IndexMap::new();
    for item in items {
        by_label.entry(item.label.clone()).or_insert(item);
    }
    by_label.into_values().collect()
}
