//! `setup.cfg` extraction: `configparser`-equivalent INI parsing of
//! the `[metadata]` and `[options]` sections.

use crate::extracted::ExtractedMetadata;
use crate::requirement_parse::parse_requirement;
use std::collections::BTreeMap;
use std::path::Path;
use wheelwright_core::{PackageName, Requirement, Result};

/// Parse a `setup.cfg` file, reading `metadata.name`,
/// `options.setup_requires`, and `options.install_requires`.
///
/// Returns `Ok(None)` if the file doesn't exist, or exists but has no
/// usable `metadata.name` — both cases fall through to `setup.py` in
/// the setuptools dispatcher.
///
/// # Errors
/// This function does not itself fail; it returns `Ok(None)` for
/// anything unreadable rather than propagating an I/O error, since
/// `setup.cfg` is optional.
pub fn extract(source_dir: &Path) -> Result<Option<ExtractedMetadata>> {
    let path = source_dir.join("setup.cfg");
    let Ok(text) = std::fs::read_to_string(&path) else {
        return Ok(None);
    };
    let sections = parse_ini(&text);

    let Some(name) = sections.get("metadata").and_then(|m| m.get("name")).cloned() else {
        return Ok(None);
    };

    let build_deps = sections
        .get("options")
        .and_then(|o| o.get("setup_requires"))
        .map(|v| parse_multiline_requirements(v))
        .unwrap_or_default();
    let deps = sections
        .get("options")
        .and_then(|o| o.get("install_requires"))
        .map(|v| parse_multiline_requirements(v))
        .unwrap_or_default();

    Ok(Some(ExtractedMetadata {
        name: PackageName::new(name),
        build_deps,
        deps,
    }))
}

fn parse_multiline_requirements(raw: &str) -> Vec<Requirement> {
    raw.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .filter_map(|line| {
            let stripped = line.find('#').map_or(line, |idx| line[..idx].trim());
            if stripped.is_empty() {
                None
            } else {
                parse_requirement(stripped).ok()
            }
        })
        .collect()
}

/// Minimal INI parser covering what `setup.cfg` needs: `[section]`
/// headers, `key = value` / `key: value` pairs, and
/// `configparser`-style continuation lines (an indented line extends
/// the previous key's value, one entry per line).
fn parse_ini(text: &str) -> BTreeMap<String, BTreeMap<String, String>> {
    let mut sections: BTreeMap<String, BTreeMap<String, String>> = BTreeMap::new();
    let mut current_section = String::new();
    let mut current_key: Option<String> = None;

    for line in text.lines() {
        if line.trim_start().starts_with(['#', ';']) || line.trim().is_empty() {
            continue;
        }
        let is_continuation = line.starts_with(' ') || line.starts_with('\t');
        let trimmed = line.trim();

        if !is_continuation && trimmed.starts_with('[') && trimmed.ends_with(']') {
            current_section = trimmed[1..trimmed.len() - 1].trim().to_string();
            sections.entry(current_section.clone()).or_default();
            current_key = None;
            continue;
        }

        if is_continuation {
            if let Some(key) = &current_key {
                if let Some(existing) = sections
                    .get_mut(&current_section)
                    .and_then(|s| s.get_mut(key))
                {
                    existing.push('\n');
                    existing.push_str(trimmed);
                }
            }
            continue;
        }

        if let Some((key, value)) = split_ini_pair(trimmed) {
            let section = sections.entry(current_section.clone()).or_default();
            section.insert(key.clone(), value.to_string());
            current_key = Some(key);
        }
    }

    sections
}

fn split_ini_pair(line: &str) -> Option<(String, &str)> {
    let eq = line.find('=');
    let colon = line.find(':');
    let idx = match (eq, colon) {
        (Some(e), Some(c)) => e.min(c),
        (Some(e), None) => e,
        (None, Some(c)) => c,
        (None, None) => return None,
    };
    let key = line[..idx].trim().to_lowercase();
    let value = line[idx + 1..].trim();
    Some((key, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn reads_name_and_dependency_lists() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("setup.cfg"),
            "[metadata]\nname = left-pad\n\n[options]\ninstall_requires =\n    six>=1.0\n    requests  # http\nsetup_requires =\n    wheel\n",
        )
        .unwrap();
        let extracted = extract(dir.path()).unwrap().unwrap();
        assert_eq!(extracted.name.as_str(), "left-pad");
        assert_eq!(extracted.deps.len(), 2);
        assert_eq!(extracted.build_deps.len(), 1);
    }

    #[test]
    fn missing_file_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(extract(dir.path()).unwrap().is_none());
    }

    #[test]
    fn missing_name_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("setup.cfg"), "[options]\ninstall_requires =\n    six\n").unwrap();
        assert!(extract(dir.path()).unwrap().is_none());
    }
}
