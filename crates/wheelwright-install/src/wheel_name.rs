//! Reading a package's name (and version, where present) off its wheel
//! filename alone — no need to open the archive.
//!
//! A wheel filename is `{distribution}-{version}(-{build})?-{python
//! tag}-{abi tag}-{platform tag}.whl`; only the first two dash-joined
//! segments matter here.

use wheelwright_core::{PackageName, Version};

/// The `(name, version)` pair read off a wheel filename, if it parses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WheelIdentity {
    /// Canonicalized distribution name.
    pub name: PackageName,
    /// The version segment, loosely parsed (see [`parse_version_loose`]).
    pub version: Option<Version>,
}

/// Parse a wheel's filename into its distribution name and version.
///
/// Returns `None` if `path` doesn't even have the two dash-separated
/// segments a wheel filename requires.
#[must_use]
pub fn parse_wheel_filename(filename: &str) -> Option<WheelIdentity> {
    let stem = filename.strip_suffix(".whl").unwrap_or(filename);
    let mut parts = stem.splitn(3, '-');
    let name = parts.next()?;
    let version = parts.next()?;
    if name.is_empty() || version.is_empty() {
        return None;
    }

    Some(WheelIdentity {
        name: PackageName::new(name),
        version: parse_version_loose(version),
    })
}

/// Parse a PEP 440-ish version string into a `semver::Version` on a
/// best-effort basis: takes the leading `major[.minor[.patch]]`
/// numeric run and treats anything after it (`rc1`, `.post1`, local
/// version labels) as a pre-release tag, since PEP 440 versions aren't
/// all valid semver and this crate never needs anything more precise
/// than "does an installed version satisfy a specifier".
#[must_use]
pub fn parse_version_loose(raw: &str) -> Option<Version> {
    if let Ok(v) = Version::parse(raw) {
        return Some(v);
    }

    let mut numeric_end = 0;
    let mut dots_seen = 0;
    for (i, c) in raw.char_indices() {
        if c.is_ascii_digit() {
            numeric_end = i + 1;
        } else if c == '.' && dots_seen < 2 {
            dots_seen += 1;
            numeric_end = i + 1;
        } else {
            break;
        }
    }

    let numeric_part = &raw[..numeric_end];
    let rest = &raw[numeric_end..];
    let mut components: Vec<u64> = numeric_part
        .split('.')
        .filter(|s| !s.is_empty())
        .map(|s| s.parse().unwrap_or(0))
        .collect();
    if components.is_empty() {
        return None;
    }
    while components.len() < 3 {
        components.push(0);
    }

    let mut version = Version::new(components[0], components[1], components[2]);
    if !rest.is_empty() {
        let pre = rest.trim_start_matches(['.', '-', '+']);
        let sanitized: String = pre
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '.' })
            .collect();
        if let Ok(pre) = semver::Prerelease::new(sanitized.trim_matches('.')) {
            version.pre = pre;
        }
    }
    Some(version)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_wheel_filename() {
        let id = parse_wheel_filename("left_pad-1.0.0-py3-none-any.whl").unwrap();
        assert_eq!(id.name.as_str(), "left-pad");
        assert_eq!(id.version.unwrap(), Version::new(1, 0, 0));
    }

    #[test]
    fn parses_build_tagged_wheel_filename() {
        let id = parse_wheel_filename("requests-2.31.0-1-py3-none-any.whl").unwrap();
        assert_eq!(id.name.as_str(), "requests");
        assert_eq!(id.version.unwrap(), Version::new(2, 31, 0));
    }

    #[test]
    fn loosely_parses_two_component_version() {
        let v = parse_version_loose("2.0").unwrap();
        assert_eq!(v, Version::new(2, 0, 0));
    }

    #[test]
    fn loosely_parses_rc_suffix_as_prerelease() {
        let v = parse_version_loose("1.0.0rc1").unwrap();
        assert_eq!((v.major, v.minor, v.patch), (1, 0, 0));
        assert_eq!(v.pre.as_str(), "rc1");
    }

    #[test]
    fn rejects_filename_without_enough_segments() {
        assert!(parse_wheel_filename("justonetoken.whl").is_none());
    }
}
