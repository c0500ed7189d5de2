//! Symbol: shared identifier used for tags, property keys, and symbolic values.

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

/// An immutable identifier.
///
/// Tags are an open set: applications invent new ones freely, so a symbol is
/// just shared text. Cloning is a reference-count bump.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(Arc<str>);

/// Words the canonical printer reserves for literal values.
const LITERAL_WORDS: &[&str] = &["nil", "true", "false"];

impl Symbol {
    /// Create a symbol from any string-like value.
    pub fn new(text: impl AsRef<str>) -> Self {
        Self(Arc::from(text.as_ref()))
    }

    /// The symbol's text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this symbol can be written without quoting in the canonical form.
    ///
    /// Bare symbols start with a letter or `_` and continue with letters, digits,
    /// `_` or `-`. The literal words `nil`, `true` and `false` are never bare.
    pub fn is_bare(&self) -> bool {
        let mut chars = self.0.chars();
        let starts_ok = chars
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
        starts_ok
            && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
            && !LITERAL_WORDS.contains(&self.as_str())
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ":{}", self.0)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Symbol {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for Symbol {
    fn from(text: String) -> Self {
        Self(Arc::from(text))
    }
}

impl From<&Symbol> for Symbol {
    fn from(symbol: &Symbol) -> Self {
        symbol.clone()
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Borrow<str> for Symbol {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq<str> for Symbol {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for Symbol {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}
