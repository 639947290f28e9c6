//! Core types shared across the wheelwright pipeline.
//!
//! This crate provides the foundational vocabulary used by every
//! other crate in the workspace:
//! - Canonical package names
//! - Requirements (name + version specifier + environment marker)
//! - Source descriptors (where a package's source tree comes from)
//! - Resolution preferences
//! - High-performance JSON operations
//! - Error types

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
mod json;
mod name;
mod platform;
mod prefs;
mod requirement;
mod source;
mod version;

pub use error::{Error, Result};
pub use json::{from_json, from_json_slice, to_json, to_json_pretty};
pub use name::{PackageName, canonicalize};
pub use platform::{EnvMarker, MarkerKey, host_sys_platform};
pub use prefs::ResolutionPrefs;
pub use requirement::Requirement;
pub use source::SourceDescriptor;
pub use version::VersionSpec;

// Re-export commonly used types
pub use ahash::{AHashMap, AHashSet};
pub use dashmap::DashMap;
pub use parking_lot::{Mutex, RwLock};
pub use semver::Version;

/// Global allocator using mimalloc for high performance.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;
