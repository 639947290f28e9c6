//! Core VCS types and abstractions.

use std::fmt;
use std::str::FromStr;

/// Which version-control system to dispatch to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VcsType {
    /// Git.
    Git,
    /// Mercurial.
    Hg,
}

impl VcsType {
    /// The CLI command name for this VCS.
    #[must_use]
    pub const fn command(self) -> &'static str {
        match self {
            Self::Git => "git",
            Self::Hg => "hg",
        }
    }
}

impl fmt::Display for VcsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.command())
    }
}

impl FromStr for VcsType {
    type Err = crate::error::VcsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "git" => Ok(Self::Git),
            "hg" | "mercurial" => Ok(Self::Hg),
            other => Err(crate::error::VcsError::git(format!(
                "unrecognized vcs type: {other}"
            ))),
        }
    }
}

/// A reference to check out after cloning: a branch, a tag, a commit,
/// or the repository's default branch.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum VcsRef {
    /// A named branch.
    Branch(String),
    /// A tag.
    Tag(String),
    /// A commit hash.
    Commit(String),
    /// The repository's default branch (no explicit ref given).
    #[default]
    Default,
}

impl VcsRef {
    /// Parse a raw ref string using the same heuristics as the
    /// original: 40-char hex strings are commits, leading `v` plus a
    /// digit or a dots-only string is a tag, everything else is a
    /// branch.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() {
            return Self::Default;
        }
        if raw.len() == 40 && raw.chars().all(|c| c.is_ascii_hexdigit()) {
            return Self::Commit(raw.to_string());
        }
        if raw.starts_with("refs/tags/") {
            return Self::Tag(raw.trim_start_matches("refs/tags/").to_string());
        }
        if raw.starts_with("refs/heads/") {
            return Self::Branch(raw.trim_start_matches("refs/heads/").to_string());
        }
        let looks_like_tag = raw
            .strip_prefix('v')
            .is_some_and(|rest| rest.starts_with(|c: char| c.is_ascii_digit()))
            || (raw.contains('.') && raw.chars().all(|c| c.is_ascii_digit() || c == '.'));
        if looks_like_tag {
            Self::Tag(raw.to_string())
        } else {
            Self::Branch(raw.to_string())
        }
    }

    /// Borrow the underlying ref string, if any.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Branch(s) | Self::Tag(s) | Self::Commit(s) => s,
            Self::Default => "",
        }
    }

    /// Whether this is a commit reference.
    #[must_use]
    pub const fn is_commit(&self) -> bool {
        matches!(self, Self::Commit(_))
    }
}

impl fmt::Display for VcsRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Branch(s) => write!(f, "branch:{s}"),
            Self::Tag(s) => write!(f, "tag:{s}"),
            Self::Commit(s) => write!(f, "commit:{s}"),
            Self::Default => write!(f, "default"),
        }
    }
}

/// Options governing how a clone is performed.
#[derive(Debug, Clone)]
pub struct CloneOptions {
    /// Clone depth. `None` means full history.
    pub depth: Option<u32>,
    /// Clone only the branch/tag being checked out.
    pub single_branch: bool,
}

impl CloneOptions {
    /// A shallow, single-branch clone at the given depth.
    #[must_use]
    pub const fn shallow(depth: u32) -> Self {
        Self {
            depth: Some(depth),
            single_branch: true,
        }
    }

    /// A full-history clone.
    #[must_use]
    pub const fn full() -> Self {
        Self {
            depth: None,
            single_branch: false,
        }
    }
}

impl Default for CloneOptions {
    fn default() -> Self {
        Self::shallow(1)
    }
}

/// The outcome of a successful clone.
#[derive(Debug, Clone)]
pub struct CloneResult {
    /// Local checkout path.
    pub path: std::path::PathBuf,
    /// Resolved commit hash.
    pub commit: String,
    /// Which VCS produced this checkout.
    pub vcs_type: VcsType,
    /// The reference that was checked out.
    pub reference: VcsRef,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_recognizes_40_char_hex_as_commit() {
        let sha = "a".repeat(40);
        assert_eq!(VcsRef::parse(&sha), VcsRef::Commit(sha));
    }

    #[test]
    fn parse_recognizes_v_prefixed_tag() {
        assert_eq!(VcsRef::parse("v1.2.3"), VcsRef::Tag("v1.2.3".to_string()));
    }

    #[test]
    fn parse_recognizes_dotted_version_as_tag() {
        assert_eq!(VcsRef::parse("1.2.3"), VcsRef::Tag("1.2.3".to_string()));
    }

    #[test]
    fn parse_falls_back_to_branch() {
        assert_eq!(VcsRef::parse("main"), VcsRef::Branch("main".to_string()));
    }

    #[test]
    fn parse_empty_is_default() {
        assert_eq!(VcsRef::parse(""), VcsRef::Default);
    }

    #[test]
    fn clone_options_default_is_shallow() {
        let opts = CloneOptions::default();
        assert_eq!(opts.depth, Some(1));
        assert!(opts.single_branch);
    }
}
