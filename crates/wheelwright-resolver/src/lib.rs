//! The build/runtime round-based dependency resolver (C6).
//!
//! Unlike a conventional package manager's resolver, this one never
//! compares competing version constraints against an index of
//! available releases — there is no SAT or PubGrub-style solving
//! here, by design (see [`wheelwright_core::VersionSpec`]'s module
//! doc). What it does instead is a fixed-point worklist: each round
//! fetches every name scheduled so far, extracts each fetched
//! package's declared build-time and run-time dependencies, and
//! schedules newly discovered names for the next round. Resolution
//! terminates once a round discovers nothing new.
//!
//! The two phases — Build and Runtime — are tracked separately
//! throughout so that a package needed only to build something else
//! never ends up installed into the target environment, and so a
//! package needed at build time can be installed (and made
//! available on `PYTHONPATH`) before the packages that need it at
//! build time are themselves built.

pub mod engine;
pub mod fetch;
pub mod metadata_source;
pub mod phase;
pub mod resolver;
pub mod round;

pub use engine::Engine;
pub use fetch::{FetchOutcome, Fetcher, RegistryFetcher};
pub use metadata_source::{FilesystemMetadataSource, MetadataSource};
pub use phase::PhaseId;
pub use resolver::{ResolutionOutcome, Resolver};
pub use round::Round;
