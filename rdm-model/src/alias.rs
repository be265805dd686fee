//! Reserved-word aliasing for field names.
//!
//! A schema key such as `pass` or `type` cannot be an identifier in the
//! languages that consume these schemas, so the field is declared as
//! `pass_`/`type_` and written back out under its original key.

/// Words that cannot be used verbatim as field identifiers.
pub const RESERVED_WORDS: &[&str] = &[
    "and", "as", "assert", "async", "await", "break", "class", "const", "continue", "crate",
    "def", "del", "dyn", "elif", "else", "enum", "except", "extern", "false", "finally", "fn",
    "for", "from", "global", "if", "impl", "import", "in", "is", "lambda", "let", "loop",
    "match", "mod", "move", "mut", "nonlocal", "not", "or", "pass", "pub", "raise", "ref",
    "return", "self", "static", "struct", "super", "trait", "true", "try", "type", "unsafe",
    "use", "where", "while", "with", "yield",
];

/// Returns true if `word` needs an alias to be used as a field name.
#[must_use]
pub fn is_reserved(word: &str) -> bool {
    RESERVED_WORDS.contains(&word)
}

/// External name for an internal field name: `pass_` → `pass`, everything else unchanged.
#[must_use]
pub fn field_name(name: &str) -> &str {
    match name.strip_suffix('_') {
        Some(stem) if is_reserved(stem) => stem,
        _ => name,
    }
}

/// Internal name for an external key: `pass` → `pass_`, everything else unchanged.
#[must_use]
pub fn internal_name(key: &str) -> String {
    if is_reserved(key) {
        format!("{key}_")
    } else {
        key.to_string()
    }
}
