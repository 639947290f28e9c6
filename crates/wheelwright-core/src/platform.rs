//! Environment markers and host platform tag detection.
//!
//! The resolver itself never evaluates a marker's predicate: any
//! requirement carrying a non-null marker, recognized key or not, is
//! always skipped (see `Requirement::is_applicable`). `EnvMarker`
//! still models `sys_platform` as a distinct, evaluable key — keeping
//! the predicate's value around lets the one marker-evaluation test
//! below demonstrate that recognizing a key correctly is orthogonal to
//! whether the resolver would ever act on it.

/// The host's platform tag, as surfaced to `sys_platform` marker checks.
///
/// Kept intentionally small: it distinguishes the three tags the
/// partial evaluator's seeded `platform.system()` binding can produce
/// (`linux`, `darwin`, `win32`), not every `std::env::consts::OS`
/// value.
#[must_use]
pub fn host_sys_platform() -> &'static str {
    match std::env::consts::OS {
        "macos" => "darwin",
        "windows" => "win32",
        _ => "linux",
    }
}

/// The marker key a requirement's environment predicate is keyed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum MarkerKey {
    /// `sys_platform`, the only key this core currently evaluates.
    SysPlatform,
    /// Any other marker key (`platform_machine`, `python_version`, …).
    ///
    /// Carried through so a requirement can still round-trip even
    /// though its predicate can't be judged locally.
    Other,
}

/// An environment predicate attached to a requirement.
///
/// Only equality comparisons are modeled; that is the only operator
/// the original metadata dialects emit for `sys_platform`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EnvMarker {
    /// The marker's left-hand key.
    pub key: MarkerKey,
    /// The raw key string, preserved for markers this core doesn't model.
    pub raw_key: String,
    /// The value compared against.
    pub value: String,
}

impl EnvMarker {
    /// Build a `sys_platform == value` marker.
    #[must_use]
    pub fn sys_platform(value: impl Into<String>) -> Self {
        Self {
            key: MarkerKey::SysPlatform,
            raw_key: "sys_platform".to_string(),
            value: value.into(),
        }
    }

    /// Build a marker for a key this core does not evaluate.
    #[must_use]
    pub fn unrecognized(raw_key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: MarkerKey::Other,
            raw_key: raw_key.into(),
            value: value.into(),
        }
    }

    /// Evaluate this marker's predicate against the running host.
    ///
    /// Not consulted by the resolver's own applicability check — a
    /// requirement with any non-null marker is skipped regardless of
    /// what this returns. Unrecognized keys evaluate to `true`.
    #[must_use]
    pub fn evaluate(&self) -> bool {
        match self.key {
            MarkerKey::SysPlatform => host_sys_platform() == self.value,
            MarkerKey::Other => true,
        }
    }
}
