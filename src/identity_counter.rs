use std::collections::HashSet;
use std::hash::Hash;

/// Every identity ever observed, for the "total unique objects" metric.
///
/// Purely additive: identities whose tracks are lost keep counting.
#[derive(Debug, Clone)]
pub struct IdentityCounter<I> {
    seen: HashSet<I>,
}

impl<I> Default for IdentityCounter<I> {
    fn default() -> Self {
        Self {
            seen: HashSet::new(),
        }
    }
}

impl<I: Eq + Hash> IdentityCounter<I> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the identity was not seen before.
    #[inline]
    pub fn observe(&mut self, identity: I) -> bool {
        self.seen.insert(identity)
    }

    #[inline]
    pub fn contains(&self, identity: &I) -> bool {
        self.seen.contains(identity)
    }

    #[inline]
    pub fn total(&self) -> usize {
        self.seen.len()
    }
}
