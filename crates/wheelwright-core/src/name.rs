//! Canonical package names.
//!
//! Names are derived either from a registry record or from project
//! metadata. Both sources are folded to one canonical form so that the
//! same package is never tracked twice under two different spellings.

use std::fmt;

/// A canonicalized package name.
///
/// Canonicalization lowercases the name and replaces underscores with
/// dashes, matching the normalization PyPI itself applies to
/// distribution names. Canonicalization is idempotent: canonicalizing
/// an already-canonical name returns the same name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct PackageName(String);

impl PackageName {
    /// Canonicalize a raw name.
    #[must_use]
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self(canonicalize(raw.as_ref()))
    }

    /// Borrow the canonical string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Validate that a raw (pre-canonicalization) name is well-formed.
    ///
    /// A name is valid if, once canonicalized, it consists only of
    /// alphanumerics, dots, underscores, and dashes.
    #[must_use]
    pub fn is_valid(raw: &str) -> bool {
        !raw.is_empty()
            && raw
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
    }
}

impl fmt::Display for PackageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PackageName {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for PackageName {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

/// Fold a raw name to its canonical form: lowercase, underscores as dashes.
#[must_use]
pub fn canonicalize(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == '_' { '-' } else { c })
        .collect()
}
