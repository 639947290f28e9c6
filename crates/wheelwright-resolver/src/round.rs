//! Round state: the `toFetch`/`fetched`/`resolved`/`ignored` pipeline
//! each phase walks through once per round.
//!
//! Discovery order matters — the final installation order is the
//! reverse of resolution order, so these collections preserve
//! insertion order rather than using a plain hash set or map.

use std::path::PathBuf;
use wheelwright_core::{AHashSet, PackageName};

use crate::phase::PhaseId;

/// An insertion-ordered set of package names.
#[derive(Debug, Clone, Default)]
pub struct OrderedSet {
    order: Vec<PackageName>,
    set: AHashSet<PackageName>,
}

impl OrderedSet {
    /// Insert `name`, returning `true` if it was newly added.
    pub fn insert(&mut self, name: PackageName) -> bool {
        if self.set.insert(name.clone()) {
            self.order.push(name);
            true
        } else {
            false
        }
    }

    /// Remove `name`, returning `true` if it was present.
    pub fn remove(&mut self, name: &PackageName) -> bool {
        if self.set.remove(name) {
            self.order.retain(|n| n != name);
            true
        } else {
            false
        }
    }

    /// Whether `name` is a member.
    #[must_use]
    pub fn contains(&self, name: &PackageName) -> bool {
        self.set.contains(name)
    }

    /// Iterate members in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &PackageName> {
        self.order.iter()
    }

    /// Whether this set has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Take every member, in insertion order, leaving the set empty.
    pub fn drain(&mut self) -> Vec<PackageName> {
        self.set.clear();
        std::mem::take(&mut self.order)
    }
}

/// An insertion-ordered name → path map.
#[derive(Debug, Clone, Default)]
pub struct OrderedMap {
    order: Vec<PackageName>,
    entries: Vec<(PackageName, PathBuf)>,
}

impl OrderedMap {
    /// Insert or overwrite `name`'s entry.
    pub fn insert(&mut self, name: PackageName, dir: PathBuf) {
        if let Some(existing) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            existing.1 = dir;
        } else {
            self.order.push(name.clone());
            self.entries.push((name, dir));
        }
    }

    /// Remove `name`'s entry, if present.
    pub fn remove(&mut self, name: &PackageName) -> Option<PathBuf> {
        let idx = self.entries.iter().position(|(n, _)| n == name)?;
        let (_, dir) = self.entries.remove(idx);
        self.order.retain(|n| n != name);
        Some(dir)
    }

    /// Whether `name` has an entry.
    #[must_use]
    pub fn contains(&self, name: &PackageName) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&PackageName, &PathBuf)> {
        self.order.iter().map(move |n| {
            let (_, dir) = self.entries.iter().find(|(en, _)| en == n).expect("order/entries in sync");
            (n, dir)
        })
    }

    /// Whether this map has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Consume the map, returning its entries in insertion order.
    #[must_use]
    pub fn into_ordered_vec(self) -> Vec<(PackageName, PathBuf)> {
        self.entries
    }
}

/// One phase's state for a single round.
#[derive(Debug, Default)]
pub struct SubRoundState {
    /// Names scheduled to be fetched this round.
    pub to_fetch: OrderedSet,
    /// Names fetched this round, with their local source directory.
    pub fetched: OrderedMap,
    /// Names whose dependencies have been extracted this round, ready
    /// to install, with their local source directory.
    pub resolved: OrderedMap,
    /// Names fetched this round but classified as already present on
    /// the host (a `system` source descriptor) — never installed.
    pub ignored: AHashSet<PackageName>,
}

/// Both phases' state for a single round.
///
/// A round is empty (and resolution terminates) once both phases have
/// nothing left scheduled to fetch.
#[derive(Debug, Default)]
pub struct Round {
    /// Build phase state.
    pub build: SubRoundState,
    /// Runtime phase state.
    pub runtime: SubRoundState,
}

impl Round {
    /// Whether both phases have nothing left to fetch.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.build.to_fetch.is_empty() && self.runtime.to_fetch.is_empty()
    }

    /// Borrow a phase's state.
    #[must_use]
    pub const fn sub_round(&self, phase: PhaseId) -> &SubRoundState {
        match phase {
            PhaseId::Build => &self.build,
            PhaseId::Runtime => &self.runtime,
        }
    }

    /// Mutably borrow a phase's state.
    pub fn sub_round_mut(&mut self, phase: PhaseId) -> &mut SubRoundState {
        match phase {
            PhaseId::Build => &mut self.build,
            PhaseId::Runtime => &mut self.runtime,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordered_set_preserves_insertion_order() {
        let mut set = OrderedSet::default();
        set.insert(PackageName::new("c"));
        set.insert(PackageName::new("a"));
        set.insert(PackageName::new("b"));
        let names: Vec<_> = set.iter().map(PackageName::as_str).collect();
        assert_eq!(names, vec!["c", "a", "b"]);
    }

    #[test]
    fn ordered_set_duplicate_insert_is_a_no_op() {
        let mut set = OrderedSet::default();
        assert!(set.insert(PackageName::new("a")));
        assert!(!set.insert(PackageName::new("a")));
        assert_eq!(set.iter().count(), 1);
    }

    #[test]
    fn ordered_map_remove_then_iterate_skips_removed() {
        let mut map = OrderedMap::default();
        map.insert(PackageName::new("a"), PathBuf::from("/a"));
        map.insert(PackageName::new("b"), PathBuf::from("/b"));
        map.remove(&PackageName::new("a"));
        let names: Vec<_> = map.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["b"]);
    }

    #[test]
    fn round_is_empty_only_when_both_phases_are() {
        let mut round = Round::default();
        assert!(round.is_empty());
        round.build.to_fetch.insert(PackageName::new("x"));
        assert!(!round.is_empty());
    }
}
