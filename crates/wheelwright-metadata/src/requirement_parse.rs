//! Parsing PEP 508-ish requirement strings into `wheelwright_core::Requirement`.
//!
//! Scoped to what the supported metadata dialects actually emit: a
//! name, optional bracketed extras (ignored — this pipeline doesn't
//! track extras), an optional version specifier (bare, or
//! parenthesized the way `pkg_resources`-style `setup.py` lists write
//! it), and an optional `; marker` suffix. Only `key == 'value'`
//! markers are modeled; anything else (`!=`, `in`, boolean
//! combinations) is kept as an always-applicable marker so a
//! requirement this core can't judge is never silently dropped.

use once_cell::sync::Lazy;
use regex::Regex;
use wheelwright_core::{EnvMarker, Error, Requirement, Result, VersionSpec};

static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*([A-Za-z0-9][A-Za-z0-9._-]*)\s*(\[[^\]]*\])?\s*(.*)$").unwrap());

static MARKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"([A-Za-z_][A-Za-z0-9_]*)\s*==\s*['"]([^'"]*)['"]"#).unwrap());

/// Parse one requirement string.
///
/// # Errors
/// Returns `Error::MetadataMalformed` if no package name can be found.
pub fn parse_requirement(raw: &str) -> Result<Requirement> {
    let stripped = strip_trailing_comment(raw);
    let trimmed = stripped.trim();
    if trimmed.is_empty() {
        return Err(Error::metadata_malformed(
            std::path::PathBuf::new(),
            "empty requirement string",
        ));
    }

    let (req_part, marker_part) = match trimmed.split_once(';') {
        Some((r, m)) => (r, Some(m)),
        None => (trimmed, None),
    };

    let caps = NAME_RE.captures(req_part).ok_or_else(|| {
        Error::metadata_malformed(
            std::path::PathBuf::new(),
            format!("could not find a package name in requirement '{trimmed}'"),
        )
    })?;
    let name = caps.get(1).map_or("", |m| m.as_str());
    if name.is_empty() {
        return Err(Error::metadata_malformed(
            std::path::PathBuf::new(),
            format!("could not find a package name in requirement '{trimmed}'"),
        ));
    }

    let specifier_raw = caps.get(3).map_or("", |m| m.as_str()).trim();
    let specifier_raw = specifier_raw
        .strip_prefix('(')
        .and_then(|s| s.strip_suffix(')'))
        .unwrap_or(specifier_raw)
        .trim();

    let mut requirement = Requirement::new(name);
    if !specifier_raw.is_empty() {
        requirement = requirement.with_specifier(VersionSpec::new(specifier_raw));
    }
    if let Some(marker_text) = marker_part {
        requirement = requirement.with_marker(parse_marker(marker_text.trim()));
    }
    Ok(requirement)
}

fn parse_marker(text: &str) -> EnvMarker {
    match MARKER_RE.captures(text) {
        Some(caps) if &caps[1] == "sys_platform" => EnvMarker::sys_platform(caps[2].to_string()),
        Some(caps) => EnvMarker::unrecognized(caps[1].to_string(), caps[2].to_string()),
        None => EnvMarker::unrecognized(text.to_string(), String::new()),
    }
}

fn strip_trailing_comment(raw: &str) -> &str {
    raw.find('#').map_or(raw, |idx| &raw[..idx])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_name() {
        let req = parse_requirement("requests").unwrap();
        assert_eq!(req.name.as_str(), "requests");
        assert!(req.specifier.is_none());
    }

    #[test]
    fn parses_name_with_specifier() {
        let req = parse_requirement("requests>=2.0,<3.0").unwrap();
        assert_eq!(req.name.as_str(), "requests");
        assert_eq!(req.specifier.unwrap().as_str(), ">=2.0,<3.0");
    }

    #[test]
    fn parses_parenthesized_specifier() {
        let req = parse_requirement("requests (>=2.0)").unwrap();
        assert_eq!(req.specifier.unwrap().as_str(), ">=2.0");
    }

    #[test]
    fn parses_sys_platform_marker() {
        let req = parse_requirement("pywin32; sys_platform=='win32'").unwrap();
        assert_eq!(req.marker.as_ref().unwrap().value, "win32");
    }

    #[test]
    fn ignores_extras() {
        let req = parse_requirement("requests[security]>=2.0").unwrap();
        assert_eq!(req.name.as_str(), "requests");
        assert_eq!(req.specifier.unwrap().as_str(), ">=2.0");
    }

    #[test]
    fn strips_trailing_comment() {
        let req = parse_requirement("requests  # needed for http").unwrap();
        assert_eq!(req.name.as_str(), "requests");
    }

    #[test]
    fn empty_string_is_malformed() {
        assert!(parse_requirement("   ").is_err());
    }

    #[test]
    fn unrecognized_marker_operator_is_always_applicable() {
        let req = parse_requirement("foo; python_version < '3.8'").unwrap();
        assert!(req.is_applicable());
    }
}
