//! The bootstrap capability ladder: how much of the packaging
//! ecosystem a piece of bootstrap logic can assume is already present.

/// How much of the packaging ecosystem is available to code running
/// at a given point in the bootstrap sequence.
///
/// Ordered so that a later tier's numeric value is always greater than
/// an earlier one's, mirroring the three-level ladder the bootstrap
/// schedule climbs: a bare interpreter, a bare interpreter with just
/// enough to drive its own bootstrap, and a fully packaging-capable
/// one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum BootstrapTier {
    /// Works on a bare interpreter and requires no dependencies, but
    /// is useful only for driving the bootstrap sequence itself.
    Bootstrap = 0,
    /// Very limited but works on a bare interpreter with no
    /// dependencies installed.
    Bare = 1,
    /// Fully functional; may depend on whatever earlier tiers install.
    Full = 0xFE,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiers_order_bootstrap_below_bare_below_full() {
        assert!(BootstrapTier::Bootstrap < BootstrapTier::Bare);
        assert!(BootstrapTier::Bare < BootstrapTier::Full);
    }
}
