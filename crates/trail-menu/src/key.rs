//! Node keys and lookup paths.
//!
//! A [`Key`] is either a symbolic identifier (translated for display) or
//! literal text (displayed verbatim). A [`KeyPath`] is a pre-parsed
//! sequence of keys used for direct-child lookups.

use std::fmt;

/// Identifier of a menu node.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Symbolic identifier, resolved through a translator when displayed.
    Symbol(String),
    /// Literal display text.
    Literal(String),
}

impl Key {
    /// Create a symbolic key.
    #[must_use]
    pub fn symbol(name: impl Into<String>) -> Self {
        Self::Symbol(name.into())
    }

    /// Create a literal key.
    #[must_use]
    pub fn literal(text: impl Into<String>) -> Self {
        Self::Literal(text.into())
    }

    /// Raw name or text of the key.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Symbol(name) | Self::Literal(name) => name,
        }
    }

    /// True if the key is eligible for translation lookup.
    #[must_use]
    pub fn is_symbol(&self) -> bool {
        matches!(self, Self::Symbol(_))
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Symbol(name) => write!(f, ":{name}"),
            Self::Literal(text) => write!(f, "{text:?}"),
        }
    }
}

/// Plain strings become symbolic keys. Use [`Key::literal`] for display text.
impl From<&str> for Key {
    fn from(name: &str) -> Self {
        Self::symbol(name)
    }
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        Self::Symbol(name)
    }
}

impl From<&Key> for Key {
    fn from(key: &Key) -> Self {
        key.clone()
    }
}

/// Sequence of keys for direct-child lookups.
///
/// Dotted strings are split into symbolic keys: `"admin.users"` becomes
/// `[:admin, :users]`. The empty string is the empty path; any other empty
/// segment (`"a..b"`) is kept as an empty key, which no node carries.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyPath(Vec<Key>);

impl KeyPath {
    /// Parse a dotted path.
    #[must_use]
    pub fn parse(dotted: &str) -> Self {
        Self(split_dotted(dotted).collect())
    }

    /// Keys in lookup order.
    #[must_use]
    pub fn keys(&self) -> &[Key] {
        &self.0
    }

    /// True if the path has no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn split_dotted(dotted: &str) -> impl Iterator<Item = Key> + '_ {
    let segments = (!dotted.is_empty()).then(|| dotted.split('.'));
    segments.into_iter().flatten().map(Key::symbol)
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<&str> = self.0.iter().map(Key::as_str).collect();
        f.write_str(&joined.join("."))
    }
}

impl From<&str> for KeyPath {
    fn from(dotted: &str) -> Self {
        Self::parse(dotted)
    }
}

impl From<&String> for KeyPath {
    fn from(dotted: &String) -> Self {
        Self::parse(dotted)
    }
}

impl From<&[&str]> for KeyPath {
    fn from(segments: &[&str]) -> Self {
        Self(segments.iter().flat_map(|s| split_dotted(s)).collect())
    }
}

impl<const N: usize> From<[&str; N]> for KeyPath {
    fn from(segments: [&str; N]) -> Self {
        Self::from(&segments[..])
    }
}

impl From<Vec<Key>> for KeyPath {
    fn from(keys: Vec<Key>) -> Self {
        Self(keys)
    }
}

impl From<Key> for KeyPath {
    fn from(key: Key) -> Self {
        Self(vec![key])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_from_str_is_symbol() {
        let key = Key::from("home");
        assert!(key.is_symbol());
        assert_eq!(key.as_str(), "home");
    }

    #[test]
    fn test_literal_key_is_not_symbol() {
        let key = Key::literal("Blog");
        assert!(!key.is_symbol());
        assert_ne!(key, Key::symbol("Blog"));
    }

    #[test]
    fn test_key_display() {
        assert_eq!(Key::symbol("users").to_string(), ":users");
        assert_eq!(Key::literal("My Blog").to_string(), "\"My Blog\"");
    }

    #[test]
    fn test_parse_dotted_path() {
        let path = KeyPath::parse("admin.users");
        assert_eq!(path.keys(), &[Key::symbol("admin"), Key::symbol("users")]);
    }

    #[test]
    fn test_parse_keeps_inner_empty_segments() {
        let path = KeyPath::parse("admin..users");
        assert_eq!(
            path.keys(),
            &[Key::symbol("admin"), Key::symbol(""), Key::symbol("users")]
        );
        assert!(KeyPath::parse("").is_empty());
    }

    #[test]
    fn test_segments_are_split_individually() {
        let path = KeyPath::from(["admin.sites", "users"]);
        assert_eq!(path, KeyPath::parse("admin.sites.users"));
    }

    #[test]
    fn test_path_display_joins_with_dots() {
        assert_eq!(KeyPath::parse("a.b.c").to_string(), "a.b.c");
    }
}
