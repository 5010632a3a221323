//! Fixed-capacity sliding window of samples.

use std::collections::VecDeque;

use stream_spi::Sample;

/// FIFO buffer holding the most recent `capacity` samples, oldest first.
#[derive(Debug, Clone)]
pub struct WindowBuffer {
    samples: VecDeque<Sample>,
    capacity: usize,
}

impl WindowBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Append a sample, evicting from the front while over capacity.
    pub fn push(&mut self, sample: Sample) {
        self.samples.push_back(sample);
        while self.samples.len() > self.capacity {
            self.samples.pop_front();
        }
    }

    /// Copy of the current contents, oldest first.
    pub fn snapshot(&self) -> Vec<Sample> {
        self.samples.iter().copied().collect()
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|s| s.value)
    }

    pub fn latest(&self) -> Option<&Sample> {
        self.samples.back()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
