//! Abstraction over metadata extraction, so the engine can be driven
//! by a fake in tests without a real source tree on disk.

use std::path::Path;

use wheelwright_core::Result;
use wheelwright_metadata::ExtractedMetadata;

/// Extracts a package's declared dependencies from its fetched source tree.
pub trait MetadataSource {
    /// Extract metadata from `dir`.
    ///
    /// # Errors
    /// Returns `Error::MetadataMissing`/`Error::MetadataMalformed` if
    /// no recognized build description is present or parses.
    fn extract(&self, dir: &Path) -> Result<ExtractedMetadata>;
}

/// A [`MetadataSource`] reading `pyproject.toml`/`setup.py`/`setup.cfg`
/// off the real filesystem.
#[derive(Debug, Default)]
pub struct FilesystemMetadataSource;

impl MetadataSource for FilesystemMetadataSource {
    fn extract(&self, dir: &Path) -> Result<ExtractedMetadata> {
        wheelwright_metadata::extract_metadata(dir)
    }
}

/// A [`MetadataSource`] for tests: a fixed directory → metadata table.
#[cfg(test)]
pub(crate) struct FakeMetadataSource {
    pub table: std::collections::HashMap<std::path::PathBuf, ExtractedMetadata>,
}

#[cfg(test)]
impl MetadataSource for FakeMetadataSource {
    fn extract(&self, dir: &Path) -> Result<ExtractedMetadata> {
        self.table
            .get(dir)
            .cloned()
            .ok_or_else(|| wheelwright_core::Error::metadata_missing(dir))
    }
}
