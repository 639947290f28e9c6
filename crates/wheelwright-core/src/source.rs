//! Source descriptors: where a package's source tree comes from.

/// A fetchable (or not-fetchable) source, as named by a registry record.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SourceDescriptor {
    /// Clone with git.
    Git {
        /// Repository URI.
        repo_uri: String,
        /// Subdirectory within the checkout holding the buildable project.
        sub_dir: Option<String>,
        /// Branch, tag, or commit to check out.
        ref_spec: Option<String>,
        /// Clone depth (0 means full history).
        depth: u32,
    },
    /// Clone with Mercurial.
    Hg {
        /// Repository URI.
        repo_uri: String,
        /// Subdirectory within the checkout holding the buildable project.
        sub_dir: Option<String>,
        /// Branch, tag, or revision to check out.
        ref_spec: Option<String>,
        /// Clone depth (0 means full history).
        depth: u32,
    },
    /// Must already be present on the host; never fetched.
    System,
    /// No source at all (a placeholder registry record).
    None,
    /// Resolved through a package index rather than source control.
    Pip {
        /// Index-relative package name, if it differs from the registry name.
        index_name: Option<String>,
    },
}

impl SourceDescriptor {
    /// The fetcher token this descriptor dispatches to.
    #[must_use]
    pub fn fetcher_name(&self) -> &'static str {
        match self {
            Self::Git { .. } => "git",
            Self::Hg { .. } => "hg",
            Self::System => "system",
            Self::None => "none",
            Self::Pip { .. } => "pip",
        }
    }

    /// Whether this descriptor requires no fetch at all.
    #[must_use]
    pub const fn is_fetchable(&self) -> bool {
        !matches!(self, Self::System | Self::None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_and_none_are_not_fetchable() {
        assert!(!SourceDescriptor::System.is_fetchable());
        assert!(!SourceDescriptor::None.is_fetchable());
    }

    #[test]
    fn git_descriptor_is_fetchable() {
        let source = SourceDescriptor::Git {
            repo_uri: "https://example.com/pkg.git".to_string(),
            sub_dir: None,
            ref_spec: Some("main".to_string()),
            depth: 1,
        };
        assert!(source.is_fetchable());
        assert_eq!(source.fetcher_name(), "git");
    }
}
