//! Testing utilities for wheelwright.
//!
//! This crate provides test helpers, fixtures, generators, and assertions
//! used across the resolve/fetch/build/install pipeline's crates.
//!
//! # Modules
//!
//! - [`fixtures`]: pre-built `pyproject.toml`/registry-TSV fixtures
//! - [`generators`]: random data generators for property-based testing
//! - [`assertions`]: custom assertion helpers for installed-package checks
//! - [`temp_project`]: temporary project and install-root creation
//! - [`git_utils`]: real git repository test utilities
//! - [`proptest_strategies`]: proptest strategies for wheelwright types
//!
//! # Example
//!
//! ```rust,no_run
//! use wheelwright_test_utils::temp_project::TempProject;
//!
//! let project = TempProject::new().simple().build().unwrap();
//! assert!(project.has_pyproject_toml());
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod assertions;
pub mod fixtures;
pub mod generators;
pub mod git_utils;
pub mod proptest_strategies;
pub mod temp_project;

/// Re-export commonly used testing utilities.
pub mod prelude {
    pub use crate::assertions::*;
    pub use crate::fixtures::Fixtures;
    pub use crate::generators::*;
    pub use crate::temp_project::{TempInstallRoot, TempProject};

    pub use pretty_assertions::{assert_eq, assert_ne};
    pub use proptest::prelude::*;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_exports() {
        let _ = fixtures::Fixtures::empty_pyproject_toml();
    }
}
