//! Display text for symbolic keys.

use std::collections::HashMap;

use crate::key::Key;

/// Display text lookup.
pub trait Translator {
    /// Text for `key` within `scope` (e.g. `adva.titles`), `None` if unknown.
    fn translate(&self, key: &str, scope: &str) -> Option<String>;
}

/// In-memory translation table.
///
/// Entries may be stored fully qualified (`adva.titles.home`) or bare
/// (`home`); qualified entries win.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TitleTable {
    titles: HashMap<String, String>,
}

impl TitleTable {
    /// Empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry, builder style.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, title: impl Into<String>) -> Self {
        self.insert(key, title);
        self
    }

    /// Add an entry.
    pub fn insert(&mut self, key: impl Into<String>, title: impl Into<String>) {
        self.titles.insert(key.into(), title.into());
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.titles.len()
    }

    /// True if the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TitleTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (key, title) in iter {
            table.insert(key, title);
        }
        table
    }
}

impl Translator for TitleTable {
    fn translate(&self, key: &str, scope: &str) -> Option<String> {
        self.titles
            .get(&format!("{scope}.{key}"))
            .or_else(|| self.titles.get(key))
            .cloned()
    }
}

/// Translator that knows nothing; every symbolic key is humanized.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoTranslations;

impl Translator for NoTranslations {
    fn translate(&self, _key: &str, _scope: &str) -> Option<String> {
        None
    }
}

/// Turn `user_roles` into `User roles`.
#[must_use]
pub fn humanize(key: &str) -> String {
    let spaced = key.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Display text for a key: literal text as-is, symbols through `translator`.
pub(crate) fn resolve_key(key: &Key, translator: &dyn Translator, scope: &str) -> String {
    match key {
        Key::Literal(text) => text.clone(),
        Key::Symbol(name) => translator.translate(name, scope).unwrap_or_else(|| {
            tracing::debug!(key = %name, scope, "Missing translation, humanizing key");
            humanize(name)
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    struct Counting {
        calls: Cell<usize>,
    }

    impl Translator for Counting {
        fn translate(&self, key: &str, _scope: &str) -> Option<String> {
            self.calls.set(self.calls.get() + 1);
            Some(key.to_uppercase())
        }
    }

    #[test]
    fn test_humanize() {
        assert_eq!(humanize("user_roles"), "User roles");
        assert_eq!(humanize("sites"), "Sites");
        assert_eq!(humanize(""), "");
    }

    #[test]
    fn test_qualified_entry_wins() {
        let table = TitleTable::new()
            .with("home", "Home")
            .with("adva.titles.home", "Dashboard");

        assert_eq!(table.translate("home", "adva.titles").as_deref(), Some("Dashboard"));
        assert_eq!(table.translate("home", "other").as_deref(), Some("Home"));
        assert_eq!(table.translate("missing", "adva.titles"), None);
    }

    #[test]
    fn test_literal_key_skips_translator() {
        let translator = Counting { calls: Cell::new(0) };

        let text = resolve_key(&Key::literal("My Blog"), &translator, "titles");

        assert_eq!(text, "My Blog");
        assert_eq!(translator.calls.get(), 0);
    }

    #[test]
    fn test_symbol_key_uses_translator() {
        let translator = Counting { calls: Cell::new(0) };

        let text = resolve_key(&Key::symbol("home"), &translator, "titles");

        assert_eq!(text, "HOME");
        assert_eq!(translator.calls.get(), 1);
    }

    #[test]
    fn test_missing_translation_is_humanized() {
        let text = resolve_key(&Key::symbol("user_roles"), &NoTranslations, "titles");
        assert_eq!(text, "User roles");
    }

    #[test]
    fn test_from_iterator() {
        let table: TitleTable = [("home", "Home"), ("about", "About")].into_iter().collect();
        assert_eq!(table.len(), 2);
    }
}
