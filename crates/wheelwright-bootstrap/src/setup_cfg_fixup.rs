//! Eliding `wheel`'s own `install_requires` before its rough build.
//!
//! `wheel` declares build-adjacent runtime requirements in its own
//! `setup.cfg`; nothing has installed them yet at the point the
//! foundational pair builds, and there is no resolver running to fetch
//! them. Stripping the declaration before the legacy build sidesteps
//! the chicken-and-egg rather than solving it.

use regex::Regex;
use std::path::Path;
use wheelwright_core::{Error, Result};

const SETUP_CFG: &str = "setup.cfg";

/// Strip an `install_requires` declaration line out of `source_dir`'s
/// `setup.cfg`, if one is present.
///
/// A no-op when there's no `setup.cfg` to rewrite. Only the
/// declaration line itself is removed, matching the line-anchored
/// pattern this is grounded on — a value continued on indented lines
/// below it is left behind verbatim.
///
/// # Errors
/// Returns `Error::Io` if the file exists but can't be rewritten.
pub fn elide_install_requires(source_dir: &Path) -> Result<()> {
    let path = source_dir.join(SETUP_CFG);
    let Ok(text) = std::fs::read_to_string(&path) else {
        return Ok(());
    };

    let pattern = Regex::new(r"(?m)^install_requires.+$").expect("valid regex");
    let rewritten = pattern.replace_all(&text, "");
    std::fs::write(&path, rewritten.as_ref()).map_err(|e| Error::io(&path, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_the_declaration_line() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(SETUP_CFG),
            "[metadata]\nname = wheel\n\n[options]\ninstall_requires =\n    packaging\n",
        )
        .unwrap();
        elide_install_requires(dir.path()).unwrap();
        let text = std::fs::read_to_string(dir.path().join(SETUP_CFG)).unwrap();
        assert!(!text.contains("install_requires"));
        assert!(text.contains("name = wheel"));
        // the indented continuation line is a separate line; the
        // anchored pattern never touches it.
        assert!(text.contains("packaging"));
    }

    #[test]
    fn missing_setup_cfg_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        assert!(elide_install_requires(dir.path()).is_ok());
    }

    #[test]
    fn file_without_the_declaration_is_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let original = "[metadata]\nname = wheel\n";
        std::fs::write(dir.path().join(SETUP_CFG), original).unwrap();
        elide_install_requires(dir.path()).unwrap();
        let text = std::fs::read_to_string(dir.path().join(SETUP_CFG)).unwrap();
        assert_eq!(text, original);
    }
}
