use crate::circular_queue::CircularQueue;

use nalgebra as na;
use std::collections::HashMap;
use std::hash::Hash;

pub const DEFAULT_TRAJECTORY_LEN: usize = 30;

/// Recent centroids per identity, bounded to `max_len` points each.
#[derive(Debug, Clone)]
pub struct TrajectoryStore<I> {
    max_len: usize,
    tracks: HashMap<I, CircularQueue<na::Point2<f32>>>,
}

impl<I> Default for TrajectoryStore<I> {
    fn default() -> Self {
        Self {
            max_len: DEFAULT_TRAJECTORY_LEN,
            tracks: HashMap::new(),
        }
    }
}

impl<I: Eq + Hash> TrajectoryStore<I> {
    pub fn new(max_len: usize) -> Self {
        Self {
            max_len: max_len.max(1),
            tracks: HashMap::new(),
        }
    }

    pub fn push(&mut self, identity: I, centroid: na::Point2<f32>) {
        let max_len = self.max_len;

        self.tracks
            .entry(identity)
            .or_insert_with(|| CircularQueue::with_capacity(max_len))
            .push(centroid);
    }

    /// Points from oldest to newest; empty for an unknown identity.
    pub fn trajectory(&self, identity: &I) -> Vec<na::Point2<f32>> {
        self.tracks
            .get(identity)
            .map(|q| q.asc_iter().copied().collect())
            .unwrap_or_default()
    }

    #[inline]
    pub fn last(&self, identity: &I) -> Option<na::Point2<f32>> {
        self.tracks.get(identity)?.newest().copied()
    }

    #[inline]
    pub fn max_len(&self) -> usize {
        self.max_len
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn clear(&mut self) {
        self.tracks.clear();
    }
}
