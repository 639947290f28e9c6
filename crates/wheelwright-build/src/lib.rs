//! Wheel building (C4).
//!
//! Turns a fetched, metadata-extracted source tree into a `.whl` file,
//! via one of two paths:
//!
//! - The PEP 517 build-backend hook protocol ([`hook`]), the default:
//!   the backend named in `[build-system]` (or `setuptools.build_meta`
//!   for a bare `setup.py`) is invoked's `build_wheel` hook directly.
//! - The legacy `bdist_wheel` path ([`legacy`]), used only as a
//!   fallback when the hook invocation itself fails.
//!
//! Either path may need build dependencies that were only just fetched
//! and have nowhere installed yet; [`scoped_path::ScopedImportPath`]
//! makes them importable for exactly the duration of one build. The
//! hook call itself can also be delegated to a child process speaking
//! the [`remote`] cookie-framed protocol, for callers that want build
//! isolation from the parent process's own import state.

pub mod builder;
pub mod cookie;
pub mod hook;
pub mod legacy;
pub mod remote;
pub mod scoped_path;

pub use builder::build_wheel;
pub use cookie::Cookie;
pub use hook::{resolve_backend, BackendSpec};
pub use scoped_path::ScopedImportPath;
