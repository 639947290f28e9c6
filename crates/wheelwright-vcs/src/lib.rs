//! Source-control fetching: clones a package's declared source into a
//! target directory.
//!
//! `system`, `none`, and `pip` descriptors never reach this crate —
//! the resolver intercepts `system` before dispatch, and `none`/`pip`
//! are rejected by the caller with `UnsupportedFetcher` before a
//! fetch is even attempted.

pub mod error;
pub mod git;
pub mod hg;
pub mod types;

pub use error::{Result, VcsError};
pub use types::{CloneOptions, CloneResult, VcsRef, VcsType};

use std::path::{Path, PathBuf};
use wheelwright_core::SourceDescriptor;

/// Fetch a source-controlled package into `dest`, returning the local
/// directory that holds its buildable project (honoring `subDir`).
///
/// # Errors
/// Returns `wheelwright_core::Error::UnsupportedFetcher` for
/// descriptors this crate cannot dispatch, or a wrapped `VcsError` on
/// clone/checkout failure.
pub fn fetch(source: &SourceDescriptor, dest: &Path) -> wheelwright_core::Result<PathBuf> {
    match source {
        SourceDescriptor::Git {
            repo_uri,
            sub_dir,
            ref_spec,
            depth,
        } => {
            let options = if *depth == 0 {
                CloneOptions::full()
            } else {
                CloneOptions::shallow(*depth)
            };
            let reference = ref_spec.as_deref().map(VcsRef::parse);
            let result = git::clone(repo_uri, dest, reference.as_ref(), &options)?;
            Ok(git::resolve_sub_dir(&result.path, sub_dir.as_deref()))
        }
        SourceDescriptor::Hg {
            repo_uri,
            sub_dir,
            ref_spec,
            depth,
        } => {
            let options = if *depth == 0 {
                CloneOptions::full()
            } else {
                CloneOptions::shallow(*depth)
            };
            let reference = ref_spec.as_deref().map(VcsRef::parse);
            let result = hg::clone(repo_uri, dest, reference.as_ref(), &options)?;
            Ok(sub_dir
                .as_deref()
                .map_or_else(|| result.path.clone(), |sub| result.path.join(sub)))
        }
        SourceDescriptor::System | SourceDescriptor::None => {
            Err(wheelwright_core::Error::unsupported_fetcher(
                "<unknown>",
                source.fetcher_name(),
            ))
        }
        SourceDescriptor::Pip { .. } => Err(wheelwright_core::Error::unsupported_fetcher(
            "<unknown>",
            source.fetcher_name(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_descriptor_is_unsupported_by_this_crate() {
        let err = fetch(&SourceDescriptor::System, Path::new("/tmp/whatever"));
        assert!(err.is_err());
    }
}
