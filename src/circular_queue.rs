use std::collections::VecDeque;
use std::fmt;

/// Fixed-capacity queue, newest item in front; pushing into a full queue drops the oldest.
pub struct CircularQueue<T> {
    deque: VecDeque<T>,
    capacity: usize,
}

impl<T: Clone> Clone for CircularQueue<T> {
    fn clone(&self) -> Self {
        Self {
            deque: self.deque.clone(),
            capacity: self.capacity,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for CircularQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.deque.fmt(f)
    }
}

impl<T> CircularQueue<T> {
    /// Capacity is at least one.
    #[inline]
    pub fn with_capacity(cap: usize) -> Self {
        let capacity = cap.max(1);

        Self {
            deque: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    #[inline]
    pub fn push(&mut self, item: T) -> Option<T> {
        let poped = if self.is_full() {
            self.deque.pop_back()
        } else {
            None
        };

        self.deque.push_front(item);

        poped
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.deque.len() >= self.capacity
    }

    #[inline]
    pub fn newest(&self) -> Option<&T> {
        self.deque.front()
    }

    /// Oldest to newest.
    #[inline]
    pub fn asc_iter(&self) -> impl Iterator<Item = &'_ T> {
        self.deque.iter().rev()
    }
}
