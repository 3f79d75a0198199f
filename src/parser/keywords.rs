//! Cobra keyword tables.

/// Every reserved word of the language, sorted.
pub const KEYWORDS: &[&str] = &[
    "abstract", "adds", "all", "and", "any", "as", "assembly", "assert", "base", "be", "body",
    "bool", "branch", "break", "callable", "catch", "char", "class", "const", "continue", "cue",
    "decimal", "def", "do", "dynamic", "each", "else", "end", "ensure", "enum", "event", "every",
    "except", "expect", "extend", "extern", "false", "finally", "float", "for", "from", "get",
    "has", "if", "ignore", "implements", "implies", "in", "inherits", "inlined", "inout", "int",
    "interface", "internal", "invariant", "is", "listen", "lock", "mixin", "must", "namespace",
    "new", "nil", "nonvirtual", "not", "number", "objc", "of", "off", "old", "on", "or", "out",
    "override", "partial", "pass", "passthrough", "post", "print", "private", "pro", "protected",
    "public", "raise", "ref", "require", "return", "same", "set", "shared", "sig", "stop",
    "struct", "success", "test", "this", "throw", "to", "trace", "true", "try", "uint", "use",
    "using", "var", "vari", "virtual", "where", "while", "yield",
];

/// Keywords that start a declaration with an indented body.
pub const DECLARATION_KEYWORDS: &[&str] = &[
    "namespace", "class", "interface", "struct", "mixin", "enum", "def", "cue", "pro", "get",
    "set", "test", "require", "ensure", "invariant", "body", "assembly",
];

/// Keywords that start a compound statement with an indented body.
pub const COMPOUND_STATEMENT_KEYWORDS: &[&str] = &[
    "if", "else", "for", "while", "post", "branch", "on", "try", "catch", "success", "finally",
    "using", "lock", "expect",
];

/// Check whether `word` is a reserved word.
pub fn is_keyword(word: &str) -> bool {
    KEYWORDS.binary_search(&word).is_ok()
}

/// Check whether a line starting with `word` opens an indented block.
pub fn opens_block(word: &str) -> bool {
    DECLARATION_KEYWORDS.contains(&word) || COMPOUND_STATEMENT_KEYWORDS.contains(&word)
}
