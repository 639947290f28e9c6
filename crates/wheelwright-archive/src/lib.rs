//! Wheel (ZIP) extraction.
//!
//! Wheel files are always ZIP archives, so this crate only needs the
//! one format — unlike a general-purpose package manager's archive
//! handling, there is no tarball or 7z path to support.

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

use std::fs::File;
use std::io::{Seek, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;
use wheelwright_core::{Error, Result};

/// Extracts wheel ZIP archives into an install-staging directory.
#[derive(Debug, Default)]
pub struct Extractor {
    strip_prefix: Option<usize>,
}

impl Extractor {
    /// Create a new extractor.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Strip N leading path components from each extracted entry.
    #[must_use]
    pub const fn strip_prefix(mut self, components: usize) -> Self {
        self.strip_prefix = Some(components);
        self
    }

    /// Extract a wheel archive to `dest`.
    ///
    /// # Errors
    /// Returns `Error::Archive` if the ZIP cannot be read, or
    /// `Error::Io` if the destination cannot be written to.
    pub fn extract(&self, archive: &Path, dest: &Path) -> Result<ExtractionResult> {
        debug!(archive = ?archive, dest = ?dest, "extracting wheel");
        std::fs::create_dir_all(dest).map_err(|e| Error::io(dest, e))?;

        let file = File::open(archive).map_err(|e| Error::io(archive, e))?;
        let mut zip = zip::ZipArchive::new(file).map_err(|e| Error::Archive(e.to_string()))?;

        let mut files_extracted = 0;
        let mut total_size = 0u64;

        for i in 0..zip.len() {
            let mut entry = zip.by_index(i).map_err(|e| Error::Archive(e.to_string()))?;

            let Some(path) = entry.enclosed_name().map(|p| p.to_path_buf()) else {
                continue;
            };

            let out_path = self.apply_strip_prefix(&path, dest);
            if out_path == dest {
                continue;
            }

            if entry.is_dir() {
                std::fs::create_dir_all(&out_path).map_err(|e| Error::io(&out_path, e))?;
            } else {
                if let Some(parent) = out_path.parent() {
                    std::fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
                }

                let mut out_file = File::create(&out_path).map_err(|e| Error::io(&out_path, e))?;
                let size =
                    std::io::copy(&mut entry, &mut out_file).map_err(|e| Error::io(&out_path, e))?;

                files_extracted += 1;
                total_size += size;

                #[cfg(unix)]
                {
                    use std::os::unix::fs::PermissionsExt;
                    if let Some(mode) = entry.unix_mode() {
                        let _ =
                            std::fs::set_permissions(&out_path, std::fs::Permissions::from_mode(mode));
                    }
                }
            }
        }

        info!(files = files_extracted, size = total_size, "wheel extraction complete");

        Ok(ExtractionResult {
            files_extracted,
            total_size,
            root_dir: find_root_dir(dest),
        })
    }

    fn apply_strip_prefix(&self, path: &Path, dest: &Path) -> PathBuf {
        if let Some(n) = self.strip_prefix {
            let components: Vec<_> = path.components().skip(n).collect();
            if components.is_empty() {
                return dest.to_path_buf();
            }
            dest.join(components.iter().collect::<PathBuf>())
        } else {
            dest.join(path)
        }
    }
}

/// The outcome of extracting a wheel.
#[derive(Debug)]
pub struct ExtractionResult {
    /// Number of files extracted.
    pub files_extracted: usize,
    /// Total size in bytes.
    pub total_size: u64,
    /// The single top-level directory, if the archive had exactly one.
    pub root_dir: Option<PathBuf>,
}

fn find_root_dir(dest: &Path) -> Option<PathBuf> {
    let entries: Vec<_> = WalkDir::new(dest)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .collect();

    if entries.len() == 1 && entries[0].file_type().is_dir() {
        Some(entries[0].path().to_path_buf())
    } else {
        None
    }
}

/// Create a ZIP archive from a directory tree (used by source-dist
/// staging and test fixtures).
///
/// # Errors
/// Returns `Error::Archive` if writing the archive fails.
pub fn create_zip<W: Write + Seek>(writer: W, source: &Path, prefix: Option<&str>) -> Result<()> {
    let mut zip = zip::ZipWriter::new(writer);
    let options =
        zip::write::SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    for entry in WalkDir::new(source).min_depth(1) {
        let entry = entry.map_err(|e| Error::Archive(e.to_string()))?;
        let path = entry.path();
        let relative = path
            .strip_prefix(source)
            .map_err(|e| Error::Archive(e.to_string()))?;

        let name = prefix.map_or_else(
            || relative.to_path_buf(),
            |p| PathBuf::from(p).join(relative),
        );
        let name_str = name.to_string_lossy();

        if path.is_dir() {
            zip.add_directory(&*name_str, options)
                .map_err(|e| Error::Archive(e.to_string()))?;
        } else {
            zip.start_file(&*name_str, options)
                .map_err(|e| Error::Archive(e.to_string()))?;

            let mut file = File::open(path).map_err(|e| Error::io(path, e))?;
            std::io::copy(&mut file, &mut zip).map_err(|e| Error::Archive(e.to_string()))?;
        }
    }

    zip.finish().map_err(|e| Error::Archive(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn round_trips_a_simple_directory() {
        let src = tempfile::tempdir().unwrap();
        std::fs::write(src.path().join("a.txt"), b"hello").unwrap();
        std::fs::create_dir(src.path().join("sub")).unwrap();
        std::fs::write(src.path().join("sub/b.txt"), b"world").unwrap();

        let mut buf = Cursor::new(Vec::new());
        create_zip(&mut buf, src.path(), None).unwrap();

        let archive_path = src.path().join("out.zip");
        std::fs::write(&archive_path, buf.into_inner()).unwrap();

        let dest = tempfile::tempdir().unwrap();
        let result = Extractor::new().extract(&archive_path, dest.path()).unwrap();

        assert_eq!(result.files_extracted, 2);
        assert!(dest.path().join("a.txt").exists());
        assert!(dest.path().join("sub/b.txt").exists());
    }

    #[test]
    fn strip_prefix_drops_leading_components() {
        let src = tempfile::tempdir().unwrap();
        std::fs::create_dir(src.path().join("pkg-1.0")).unwrap();
        std::fs::write(src.path().join("pkg-1.0/file.txt"), b"data").unwrap();

        let mut buf = Cursor::new(Vec::new());
        create_zip(&mut buf, src.path(), None).unwrap();
        let archive_path = src.path().join("out.zip");
        std::fs::write(&archive_path, buf.into_inner()).unwrap();

        let dest = tempfile::tempdir().unwrap();
        Extractor::new()
            .strip_prefix(1)
            .extract(&archive_path, dest.path())
            .unwrap();

        assert!(dest.path().join("file.txt").exists());
    }
}
