//! Tab-separated registry record parsing.
//!
//! Mirrors the original `csv.excel_tab` dialect used for registry
//! files: a header row naming columns, `#`-prefixed lines ignored as
//! comments, and empty fields treated as absent rather than `""`.

use crate::package::{Package, derive_package_name_from_uri};
use std::path::Path;
use wheelwright_core::{Error, PackageName, Result, SourceDescriptor, canonicalize};

/// Parse a TSV registry document into its records.
///
/// # Errors
/// Returns `Error::RegistryMalformed` if a record names an
/// unrecognized fetcher, or a repo-bearing record uses a fetcher that
/// cannot carry a repository (`system`/`none`/`pip`).
pub fn parse_tsv(path: &Path, text: &str) -> Result<Vec<Package>> {
    let mut lines = text.lines().filter(|l| !l.trim_start().starts_with('#'));
    let Some(header_line) = lines.next() else {
        return Ok(Vec::new());
    };
    let header: Vec<&str> = header_line.split('\t').map(str::trim).collect();

    let mut packages = Vec::new();
    for line in lines {
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split('\t').collect();
        let row = Row { header: &header, fields: &fields };
        packages.push(parse_record(path, &row)?);
    }
    Ok(packages)
}

struct Row<'a> {
    header: &'a [&'a str],
    fields: &'a [&'a str],
}

impl Row<'_> {
    fn get(&self, key: &str) -> Option<&str> {
        self.header
            .iter()
            .position(|h| *h == key)
            .and_then(|i| self.fields.get(i))
            .copied()
            .filter(|v| !v.is_empty())
    }
}

fn parse_record(path: &Path, row: &Row<'_>) -> Result<Package> {
    let repo = row.get("repo");
    let fetcher = row.get("fetcher");
    let sub_dir = row.get("subDir").map(str::to_string);
    let ref_spec = row.get("refSpec").map(str::to_string);
    let depth: u32 = row
        .get("depth")
        .and_then(|v| v.parse().ok())
        .unwrap_or(1);

    let raw_name = row
        .get("name")
        .map(str::to_string)
        .or_else(|| repo.map(derive_package_name_from_uri))
        .ok_or_else(|| {
            Error::metadata_malformed(path, "registry record has neither name nor repo column")
        })?;
    let name = PackageName::new(canonicalize(&raw_name));

    let source = match (repo, fetcher) {
        (Some(repo), fetcher) => match fetcher.unwrap_or("git") {
            "git" => SourceDescriptor::Git {
                repo_uri: repo.to_string(),
                sub_dir,
                ref_spec,
                depth,
            },
            "hg" => SourceDescriptor::Hg {
                repo_uri: repo.to_string(),
                sub_dir,
                ref_spec,
                depth,
            },
            other => {
                return Err(Error::metadata_malformed(
                    path,
                    format!("fetcher '{other}' cannot carry a repo column"),
                ));
            }
        },
        (None, Some("system")) => SourceDescriptor::System,
        (None, Some("none") | None) => SourceDescriptor::None,
        (None, Some("pip")) => SourceDescriptor::Pip {
            index_name: Some(name.as_str().to_string()),
        },
        (None, Some(other)) => {
            return Err(Error::metadata_malformed(
                path,
                format!("fetcher '{other}' requires a repo column"),
            ));
        }
    };

    Ok(Package::new(name, source))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn path() -> PathBuf {
        PathBuf::from("registry.tsv")
    }

    #[test]
    fn parses_git_record_with_explicit_name() {
        let tsv = "name\trepo\nleft-pad\thttps://example.com/left-pad.git\n";
        let records = parse_tsv(&path(), tsv).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name.as_str(), "left-pad");
        assert!(matches!(records[0].source, SourceDescriptor::Git { .. }));
    }

    #[test]
    fn derives_name_when_column_missing() {
        let tsv = "repo\nhttps://example.com/left-pad.git\n";
        let records = parse_tsv(&path(), tsv).unwrap();
        assert_eq!(records[0].name.as_str(), "left-pad");
    }

    #[test]
    fn comment_lines_are_skipped() {
        let tsv = "# a comment\nname\trepo\n# another comment\nleft-pad\thttps://example.com/left-pad.git\n";
        let records = parse_tsv(&path(), tsv).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn system_fetcher_without_repo_is_system_descriptor() {
        let tsv = "name\tfetcher\npython\tsystem\n";
        let records = parse_tsv(&path(), tsv).unwrap();
        assert_eq!(records[0].source, SourceDescriptor::System);
    }

    #[test]
    fn system_fetcher_with_repo_is_malformed() {
        let tsv = "name\trepo\tfetcher\nbad\thttps://example.com/x.git\tsystem\n";
        assert!(parse_tsv(&path(), tsv).is_err());
    }

    #[test]
    fn hg_fetcher_is_recognized() {
        let tsv = "name\trepo\tfetcher\nleft-pad\thttps://example.com/left-pad\thg\n";
        let records = parse_tsv(&path(), tsv).unwrap();
        assert!(matches!(records[0].source, SourceDescriptor::Hg { .. }));
    }
}
