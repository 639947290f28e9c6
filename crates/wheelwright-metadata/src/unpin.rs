//! Requirement unpinning (C8).
//!
//! A registry-policy driven filter for which specifiers to keep is a
//! signed-registry concern outside this core's scope, so unpinning
//! always takes the unconditional blanket-clear path.

use wheelwright_core::Requirement;

/// Clear a requirement's version specifier, leaving its name and
/// marker untouched.
#[must_use]
pub fn unpin(req: &Requirement) -> Requirement {
    req.unpinned()
}

/// Unpin every requirement in a list.
#[must_use]
pub fn unpin_all(reqs: &[Requirement]) -> Vec<Requirement> {
    reqs.iter().map(unpin).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use wheelwright_core::VersionSpec;

    #[test]
    fn unpin_clears_specifier_only() {
        let req = Requirement::new("numpy").with_specifier(VersionSpec::new(">=1.0"));
        let unpinned = unpin(&req);
        assert!(unpinned.specifier.unwrap().is_any());
        assert_eq!(unpinned.name, req.name);
    }

    #[test]
    fn unpin_all_maps_every_entry() {
        let reqs = vec![
            Requirement::new("a").with_specifier(VersionSpec::new(">=1.0")),
            Requirement::new("b").with_specifier(VersionSpec::new("==2.0")),
        ];
        let unpinned = unpin_all(&reqs);
        assert!(unpinned.iter().all(|r| r.specifier.as_ref().unwrap().is_any()));
    }
}
