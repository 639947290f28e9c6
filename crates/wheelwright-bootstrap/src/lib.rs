//! The self-bootstrapper (C7): a hand-written, ordered install
//! sequence for the chicken-and-egg situation where the metadata
//! extractor or the build-hook protocol library is itself missing
//! from the target interpreter.
//!
//! The schedule (see [`schedule`]) and its per-entry extra-import-path
//! list are the key pieces of data here — they encode the
//! hand-verified dependency DAG for bootstrapping, kept separate from
//! the driver ([`orchestrator`]/[`runner`]) so the order can be
//! audited on its own.
//!
//! Every stage after the first runs as a fresh child process of the
//! same `wheelwright` binary rather than relying on anything like
//! Python's module-reload to see a sibling stage's freshly installed
//! packages — see [`stage`]'s module doc for why.

pub mod orchestrator;
pub mod precondition;
pub mod request;
pub mod runner;
pub mod schedule;
pub mod setup_cfg_fixup;
pub mod stage;
pub mod tier;

pub use orchestrator::Orchestrator;
pub use precondition::missing_essential_packages;
pub use request::StageRequest;
pub use schedule::{essential_package_names, foundational_pair, hatchling_bundle_schedule, packaging_ecosystem_schedule, ScheduleEntry};
pub use stage::Stage;
pub use tier::BootstrapTier;
