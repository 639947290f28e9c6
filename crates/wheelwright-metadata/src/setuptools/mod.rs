//! The legacy `setuptools` dialect: try the declarative `setup.cfg`
//! first, then fall back to the imperative `setup.py` if it's absent
//! or yields no usable name.

pub mod setup_cfg;
pub mod setup_py;

use crate::extracted::ExtractedMetadata;
use std::path::Path;
use wheelwright_core::{Error, Result};

pub use setup_py::InterpreterEnv;

/// Extract metadata via the `setuptools` dialect.
///
/// # Errors
/// Returns `Error::MetadataMissing` if neither `setup.cfg` nor
/// `setup.py` is present, or whatever error the chosen sub-extractor
/// raises.
pub fn extract(source_dir: &Path) -> Result<ExtractedMetadata> {
    if let Some(metadata) = setup_cfg::extract(source_dir)? {
        return Ok(metadata);
    }
    if source_dir.join("setup.py").exists() {
        return setup_py::extract(source_dir);
    }
    Err(Error::metadata_missing(source_dir))
}
