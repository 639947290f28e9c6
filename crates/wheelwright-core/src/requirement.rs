//! Requirements: a name plus an optional version specifier and marker.

use crate::name::PackageName;
use crate::platform::EnvMarker;
use crate::version::VersionSpec;

/// A dependency declaration, as extracted from a package's metadata.
///
/// The marker is an environment predicate; any requirement carrying a
/// non-null marker is inapplicable and the resolver skips it entirely,
/// regardless of what the predicate would itself evaluate to.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Requirement {
    /// Canonicalized package name.
    pub name: PackageName,
    /// Version specifier, if the declaration carried one.
    pub specifier: Option<VersionSpec>,
    /// Environment marker, if the declaration carried one.
    pub marker: Option<EnvMarker>,
}

impl Requirement {
    /// Build a bare requirement with no specifier or marker.
    #[must_use]
    pub fn new(name: impl Into<PackageName>) -> Self {
        Self {
            name: name.into(),
            specifier: None,
            marker: None,
        }
    }

    /// Attach a version specifier.
    #[must_use]
    pub fn with_specifier(mut self, specifier: VersionSpec) -> Self {
        self.specifier = Some(specifier);
        self
    }

    /// Attach an environment marker.
    #[must_use]
    pub fn with_marker(mut self, marker: EnvMarker) -> Self {
        self.marker = Some(marker);
        self
    }

    /// Whether the marker (if any) rules this requirement out.
    ///
    /// Any non-null marker makes a requirement inapplicable, full stop
    /// — this core never evaluates the predicate to decide whether to
    /// keep a marked requirement.
    #[must_use]
    pub fn is_applicable(&self) -> bool {
        self.marker.is_none()
    }

    /// Return a copy with the specifier replaced by "any version" (C8).
    ///
    /// Name and marker are left untouched; only the specifier is
    /// cleared, matching the unconditional blanket-clear behavior
    /// documented for the unpinner.
    #[must_use]
    pub fn unpinned(&self) -> Self {
        Self {
            name: self.name.clone(),
            specifier: Some(
                self.specifier
                    .as_ref()
                    .map_or_else(VersionSpec::any, VersionSpec::unpinned),
            ),
            marker: self.marker.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_requirement_is_applicable() {
        let req = Requirement::new("left-pad");
        assert!(req.is_applicable());
    }

    #[test]
    fn marker_failure_makes_requirement_inapplicable() {
        let other = if crate::platform::host_sys_platform() == "win32" {
            "linux"
        } else {
            "win32"
        };
        let req = Requirement::new("pywin32").with_marker(EnvMarker::sys_platform(other));
        assert!(!req.is_applicable());
    }

    #[test]
    fn marker_matching_the_host_is_still_inapplicable() {
        // Any non-null marker is skipped unconditionally, even one
        // whose predicate would evaluate true on this host.
        let req = Requirement::new("pywin32")
            .with_marker(EnvMarker::sys_platform(crate::platform::host_sys_platform()));
        assert!(!req.is_applicable());
    }

    #[test]
    fn unpinning_clears_specifier_but_keeps_name_and_marker() {
        let req = Requirement::new("numpy")
            .with_specifier(VersionSpec::new(">=1.0,<2.0"))
            .with_marker(EnvMarker::sys_platform("linux"));
        let unpinned = req.unpinned();
        assert_eq!(unpinned.name, req.name);
        assert_eq!(unpinned.marker, req.marker);
        assert!(unpinned.specifier.unwrap().is_any());
    }
}
