//! Version specifiers.
//!
//! Unlike a conventional SAT-backed resolver, this workspace never
//! compares competing version specifiers against each other — there is
//! no index of available versions to range over. A `VersionSpec`
//! exists only so that a requirement can carry *some* specifier
//! through the pipeline and have it evaluated against a single
//! candidate's declared version, or matched as "any".

use semver::{Version, VersionReq};
use std::fmt;

/// A version specifier attached to a requirement.
///
/// The empty specifier means "any version satisfies" — this is both
/// the polyfill default and the result of unpinning (C8).
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct VersionSpec {
    raw: String,
}

impl VersionSpec {
    /// The specifier that matches any version.
    #[must_use]
    pub fn any() -> Self {
        Self { raw: String::new() }
    }

    /// Build a specifier from a raw string (e.g. `>=1.2,<2.0`).
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    /// Whether this specifier is the "any version" polyfill.
    #[must_use]
    pub fn is_any(&self) -> bool {
        self.raw.trim().is_empty() || self.raw.trim() == "*"
    }

    /// Borrow the raw specifier string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Replace this specifier with the "any" polyfill, as the unpinner does.
    #[must_use]
    pub fn unpinned(&self) -> Self {
        Self::any()
    }

    /// Parse the raw specifier into a `semver::VersionReq`, if possible.
    ///
    /// Returns `None` for the "any" specifier (there is nothing to
    /// parse) rather than `VersionReq::STAR`, so callers can
    /// distinguish "match anything, skip the check" from "match this
    /// req".
    #[must_use]
    pub fn to_semver_req(&self) -> Option<VersionReq> {
        if self.is_any() {
            return None;
        }
        VersionReq::parse(&normalize(&self.raw)).ok()
    }

    /// Whether `version` satisfies this specifier.
    #[must_use]
    pub fn matches(&self, version: &Version) -> bool {
        match self.to_semver_req() {
            None => true,
            Some(req) => req.matches(version),
        }
    }
}

impl Default for VersionSpec {
    fn default() -> Self {
        Self::any()
    }
}

impl fmt::Display for VersionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_any() {
            write!(f, "*")
        } else {
            write!(f, "{}", self.raw)
        }
    }
}

/// `VersionReq::parse` is strict about whitespace-joined comma lists;
/// normalize common wheel-metadata punctuation (`, ` separators, extra
/// whitespace) into something it accepts.
fn normalize(raw: &str) -> String {
    raw.split(',')
        .map(str::trim)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_star_are_any() {
        assert!(VersionSpec::new("").is_any());
        assert!(VersionSpec::new("*").is_any());
        assert!(!VersionSpec::new(">=1.0").is_any());
    }

    #[test]
    fn any_matches_every_version() {
        let spec = VersionSpec::any();
        assert!(spec.matches(&Version::new(0, 0, 1)));
        assert!(spec.matches(&Version::new(99, 0, 0)));
    }

    #[test]
    fn range_matches_within_bounds_only() {
        let spec = VersionSpec::new(">=1.0.0, <2.0.0");
        assert!(spec.matches(&Version::new(1, 5, 0)));
        assert!(!spec.matches(&Version::new(2, 0, 0)));
    }

    #[test]
    fn unpinned_always_becomes_any() {
        let spec = VersionSpec::new(">=1.0.0, <2.0.0");
        assert!(spec.unpinned().is_any());
    }
}
