use nalgebra as na;
use std::collections::HashMap;
use std::hash::Hash;

#[derive(Debug, Clone, Copy)]
struct IdentityState {
    last: na::Point2<f32>,
    crossed: bool,
}

/// Last known centroid and crossed flag per identity.
///
/// Entries live until `reset`; an identity missing from a tick keeps its old position.
#[derive(Debug, Clone)]
pub struct IdentityRegistry<I> {
    states: HashMap<I, IdentityState>,
}

impl<I> Default for IdentityRegistry<I> {
    fn default() -> Self {
        Self {
            states: HashMap::new(),
        }
    }
}

impl<I: Eq + Hash> IdentityRegistry<I> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `centroid` as the latest position and returns the one it replaced,
    /// `None` on a first sighting. The crossed flag is left untouched.
    pub fn observe(&mut self, identity: I, centroid: na::Point2<f32>) -> Option<na::Point2<f32>> {
        match self.states.get_mut(&identity) {
            Some(state) => Some(std::mem::replace(&mut state.last, centroid)),
            None => {
                self.states.insert(
                    identity,
                    IdentityState {
                        last: centroid,
                        crossed: false,
                    },
                );
                None
            }
        }
    }

    #[inline]
    pub fn has_crossed(&self, identity: &I) -> bool {
        self.states.get(identity).is_some_and(|s| s.crossed)
    }

    // Only the engine's dedup step flips this flag.
    #[inline]
    pub(crate) fn mark_crossed(&mut self, identity: &I) {
        if let Some(state) = self.states.get_mut(identity) {
            state.crossed = true;
        }
    }

    #[inline]
    pub fn last_position(&self, identity: &I) -> Option<na::Point2<f32>> {
        self.states.get(identity).map(|s| s.last)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn reset(&mut self) {
        self.states.clear();
    }
}
