//! Shared multi-consumer task queue with a non-blocking pop.

use parking_lot::Mutex;
use std::collections::VecDeque;

/// Pre-loaded once, then only drained. Each item is handed to exactly one caller
/// of `try_pop`, and once empty the queue stays empty.
pub struct TaskQueue<T> {
    inner: Mutex<VecDeque<T>>,
}

impl<T> TaskQueue<T> {
    pub fn new<I: IntoIterator<Item = T>>(items: I) -> Self {
        Self { inner: Mutex::new(items.into_iter().collect()) }
    }

    /// `None` means the queue is exhausted; callers should stop polling.
    #[inline]
    pub fn try_pop(&self) -> Option<T> {
        self.inner.lock().pop_front()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}
