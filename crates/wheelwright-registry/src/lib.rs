//! Package name → source lookup.
//!
//! A registry is a tab-separated file mapping package names to the
//! source descriptor used to fetch them. Registries compose: a
//! `CompoundRegistry` searches its children in order and returns the
//! first match, so a private registry can shadow the built-in one.

pub mod package;
pub mod parse;
pub mod registry;

pub use package::{Package, derive_package_name_from_uri};
pub use registry::{CompoundRegistry, FlatRegistry, Registry};
