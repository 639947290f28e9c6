//! Metadata extraction (C3) and requirement unpinning (C8).
//!
//! Given a fetched source tree, produces the package's canonical name
//! and its build-time and run-time dependency lists. Extraction tries,
//! in order: standard `pyproject.toml` metadata (`[project]` +
//! `[build-system]`), a build-backend-specific extractor keyed on the
//! backend identifier, and finally the legacy `setuptools` dialect
//! (`setup.cfg`, then `setup.py`).
//!
//! Every requirement this crate returns has already been run through
//! the unpinner (C8): version specifiers are replaced with the "any
//! version" polyfill before the resolver ever sees them.

pub mod extracted;
pub mod extractor;
pub mod pyproject;
pub mod requirement_parse;
pub mod setuptools;
pub mod unpin;

pub use extracted::ExtractedMetadata;
pub use extractor::extract_metadata;
pub use requirement_parse::parse_requirement;
pub use unpin::{unpin, unpin_all};
