use crate::observation::TrackedObservation;

/// One tick: every tracked object the tracker reported for a single video frame.
#[derive(Debug, Clone)]
pub struct Frame<I = u64> {
    pub index: u64, // position on the video timeline
    pub observations: Vec<TrackedObservation<I>>,
}

impl<I> Frame<I> {
    #[inline]
    pub fn new(index: u64, observations: Vec<TrackedObservation<I>>) -> Self {
        Self {
            index,
            observations,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &TrackedObservation<I>> {
        self.observations.iter()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
}
