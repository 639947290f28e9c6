//! Random data generators for property-based and fuzz testing.

use rand::Rng;
use std::collections::HashMap;

/// Generate a random PEP 503-normalizable package name.
#[must_use]
pub fn random_package_name() -> String {
    let mut rng = rand::thread_rng();
    let stems = [
        "requests", "click", "attrs", "six", "packaging", "urllib", "certifi", "idna", "charset", "pyyaml", "toolkit",
        "adapter", "helper", "client", "server", "plugin",
    ];
    let stem = stems[rng.gen_range(0..stems.len())];
    format!("{stem}-{}", rng.gen_range(1..1000))
}

/// Generate a random PEP 440-ish version string.
#[must_use]
pub fn random_version() -> String {
    let mut rng = rand::thread_rng();
    format!("{}.{}.{}", rng.gen_range(0..20), rng.gen_range(0..50), rng.gen_range(0..100))
}

/// Generate a random version specifier (`VersionSpec`'s raw string shape).
#[must_use]
pub fn random_specifier() -> String {
    let mut rng = rand::thread_rng();
    let major = rng.gen_range(1..10);
    let minor = rng.gen_range(0..20);
    match rng.gen_range(0..6) {
        0 => format!(">={major}.{minor}"),
        1 => format!("~={major}.{minor}"),
        2 => format!("=={major}.{minor}.0"),
        3 => format!(">={major}.{minor},<{}.0", major + 1),
        4 => "*".to_string(),
        _ => String::new(),
    }
}

/// Generate a random git ref (branch-like, not necessarily a real commit).
#[must_use]
pub fn random_git_ref() -> String {
    let mut rng = rand::thread_rng();
    format!("v{}.{}.{}", rng.gen_range(0..20), rng.gen_range(0..50), rng.gen_range(0..100))
}

/// Configuration for dependency-graph generation.
#[derive(Debug, Clone)]
pub struct GraphConfig {
    /// Number of packages.
    pub package_count: usize,
    /// Average dependencies per package.
    pub avg_deps: usize,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self { package_count: 50, avg_deps: 3 }
    }
}

impl GraphConfig {
    /// A small graph configuration, useful for quick unit tests.
    #[must_use]
    pub fn simple() -> Self {
        Self { package_count: 10, avg_deps: 2 }
    }

    /// A larger graph configuration for stress-testing the resolver's
    /// worklist termination.
    #[must_use]
    pub fn complex() -> Self {
        Self { package_count: 100, avg_deps: 5 }
    }
}

/// A generated package for testing: a name plus its declared dependencies.
#[derive(Debug, Clone)]
pub struct GeneratedPackage {
    /// Canonicalizable package name.
    pub name: String,
    /// Names this package depends on (acyclic by construction).
    pub deps: Vec<String>,
}

/// A generated dependency graph: acyclic by construction (each
/// package only depends on packages generated before it), matching
/// the resolver's own no-cycle-detection stance (cycles aren't a
/// distinct case it needs to special-case; `claimed` dedup alone keeps
/// a cyclic worklist from looping forever).
#[derive(Debug, Clone)]
pub struct GeneratedGraph {
    /// All generated packages, in dependency-safe order.
    pub packages: Vec<GeneratedPackage>,
    /// Root project's direct dependencies.
    pub root_deps: Vec<String>,
}

impl GeneratedGraph {
    /// Generate a random acyclic dependency graph.
    #[must_use]
    pub fn generate(config: &GraphConfig) -> Self {
        let mut rng = rand::thread_rng();
        let mut packages = Vec::with_capacity(config.package_count);
        let mut names = Vec::with_capacity(config.package_count);

        for i in 0..config.package_count {
            names.push(format!("generated-pkg-{i}"));
        }

        for (i, name) in names.iter().enumerate() {
            let max_deps = config.avg_deps.min(i);
            let dep_count = if i == 0 { 0 } else { rng.gen_range(0..=max_deps) };
            let mut deps: Vec<String> = Vec::new();
            let mut seen = std::collections::HashSet::new();
            for _ in 0..dep_count {
                let dep_idx = rng.gen_range(0..i);
                if seen.insert(dep_idx) {
                    deps.push(names[dep_idx].clone());
                }
            }
            packages.push(GeneratedPackage { name: name.clone(), deps });
        }

        let root_count = (config.package_count / 10).clamp(1, 10);
        let root_deps: Vec<String> = names.iter().rev().take(root_count).cloned().collect();

        Self { packages, root_deps }
    }

    /// Build a name→source-uri map suitable for a generated registry TSV.
    #[must_use]
    pub fn to_registry_records(&self) -> HashMap<String, String> {
        self.packages.iter().map(|pkg| (pkg.name.clone(), format!("https://example.test/{}.git", pkg.name))).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_version_has_three_components() {
        assert_eq!(random_version().split('.').count(), 3);
    }

    #[test]
    fn generated_graph_has_requested_package_count() {
        let config = GraphConfig::simple();
        let graph = GeneratedGraph::generate(&config);
        assert_eq!(graph.packages.len(), config.package_count);
        assert!(!graph.root_deps.is_empty());
    }

    #[test]
    fn generated_graph_deps_only_reference_earlier_packages() {
        let graph = GeneratedGraph::generate(&GraphConfig::simple());
        for (i, pkg) in graph.packages.iter().enumerate() {
            for dep in &pkg.deps {
                let dep_idx = graph.packages.iter().position(|p| &p.name == dep).unwrap();
                assert!(dep_idx < i, "{} depends on later package {dep}", pkg.name);
            }
        }
    }
}
