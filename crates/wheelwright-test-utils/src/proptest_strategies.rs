//! Proptest strategies for wheelwright domain types.

use proptest::prelude::*;

/// Strategy for generating PEP 503-style package names (pre-canonicalization).
pub fn package_name_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z][a-zA-Z0-9._-]{1,30}"
}

/// Strategy for generating already-canonical package names (lowercase,
/// dashes only), matching what `PackageName::new` would produce.
pub fn canonical_package_name_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9-]{1,30}"
}

/// Strategy for generating PEP 440-ish version strings.
pub fn version_strategy() -> impl Strategy<Value = String> {
    (0u32..100, 0u32..100, 0u32..1000).prop_map(|(major, minor, patch)| format!("{major}.{minor}.{patch}"))
}

/// Strategy for generating version specifiers (`VersionSpec`'s raw shape).
pub fn specifier_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        version_strategy().prop_map(|v| format!(">={v}")),
        version_strategy().prop_map(|v| format!("=={v}")),
        version_strategy().prop_map(|v| format!("~={v}")),
        Just(String::new()),
        Just("*".to_string()),
    ]
}

/// Strategy for a git ref spec: a tag-shaped string.
pub fn ref_spec_strategy() -> impl Strategy<Value = String> {
    (0u32..50, 0u32..50, 0u32..50).prop_map(|(major, minor, patch)| format!("v{major}.{minor}.{patch}"))
}

/// Strategy for a plausible `https://` git repository URL.
pub fn git_url_strategy() -> impl Strategy<Value = String> {
    (canonical_package_name_strategy(), canonical_package_name_strategy())
        .prop_map(|(owner, repo)| format!("https://github.com/{owner}/{repo}.git"))
}

/// Strategy for a single registry TSV record line (tab-separated,
/// `name`/`repo`/`fetcher`/`refSpec` columns — no header).
pub fn registry_record_strategy() -> impl Strategy<Value = String> {
    (canonical_package_name_strategy(), git_url_strategy(), ref_spec_strategy())
        .prop_map(|(name, repo, ref_spec)| format!("{name}\t{repo}\tgit\t{ref_spec}"))
}

/// Strategy for a full registry TSV document: a header line plus
/// between 1 and `max_records` record lines.
pub fn registry_tsv_strategy(max_records: usize) -> impl Strategy<Value = String> {
    proptest::collection::vec(registry_record_strategy(), 1..=max_records)
        .prop_map(|records| format!("name\trepo\tfetcher\trefSpec\n{}\n", records.join("\n")))
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn canonical_package_names_are_lowercase(name in canonical_package_name_strategy()) {
            prop_assert_eq!(name.to_lowercase(), name);
        }

        #[test]
        fn versions_have_three_dot_separated_components(version in version_strategy()) {
            prop_assert_eq!(version.split('.').count(), 3);
        }

        #[test]
        fn registry_tsv_always_starts_with_header(tsv in registry_tsv_strategy(5)) {
            prop_assert!(tsv.starts_with("name\trepo\tfetcher\trefSpec\n"));
        }
    }
}
