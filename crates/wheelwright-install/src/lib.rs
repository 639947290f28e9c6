//! Wheel installation (C5).
//!
//! A built wheel is always a ZIP archive; installing one means
//! unpacking it into an [`InstallationScheme`] and recording enough of
//! a `.dist-info` directory for a [`catalog::Catalog`] to answer "is
//! this installed, and at what version" on a later invocation — the
//! question the resolver's decision tree depends on at step 3 of its
//! per-requirement check.

pub mod catalog;
pub mod installer;
pub mod reinstall;
pub mod scheme;
pub mod uninstaller;
pub mod wheel_name;

pub use catalog::{Catalog, FilesystemCatalog, InMemoryCatalog};
pub use installer::{Installer, WheelInstaller};
pub use reinstall::ReInstaller;
pub use scheme::InstallationScheme;
pub use uninstaller::{FilesystemUninstaller, UnInstaller};
pub use wheel_name::{parse_wheel_filename, WheelIdentity};
