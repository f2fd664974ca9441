//! Bounded shuffle buffer with O(1) random pick-and-replace.
//!
//! The buffer holds samples awaiting emission. Removal moves the last occupied
//! slot into the hole, so storage order carries no meaning.

use rand::Rng;
use rand::RngCore;

/// Source of uniformly random indices.
///
/// Every `rand` generator gets this for free. Implement it directly to script
/// the exact sequence of picks.
pub trait RandomIndex {
    /// Uniform integer in `[lo, hi]`, both ends inclusive.
    fn randint(&mut self, lo: usize, hi: usize) -> usize;
}

impl<R: RngCore> RandomIndex for R {
    fn randint(&mut self, lo: usize, hi: usize) -> usize {
        self.gen_range(lo..=hi)
    }
}

/// Fixed-capacity buffer of samples with random removal.
#[derive(Debug)]
pub struct ShuffleBuffer<T> {
    samples: Vec<T>,
    capacity: usize,
}

impl<T> ShuffleBuffer<T> {
    /// Create an empty buffer holding at most `capacity` samples.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "capacity must be > 0");
        Self {
            samples: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a sample. Returns it back if the buffer is full.
    pub fn try_push(&mut self, sample: T) -> Result<(), T> {
        if self.is_full() {
            return Err(sample);
        }
        self.samples.push(sample);
        Ok(())
    }

    /// Append a sample; the caller guarantees the buffer is not full.
    pub(crate) fn push(&mut self, sample: T) {
        debug_assert!(self.samples.len() < self.capacity, "push into full buffer");
        self.samples.push(sample);
    }

    /// Remove the sample at `index`, filling the gap with the last sample.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn swap_remove(&mut self, index: usize) -> T {
        self.samples.swap_remove(index)
    }

    /// Remove and return a uniformly random sample, or `None` when empty.
    pub fn pick<G: RandomIndex>(&mut self, rng: &mut G) -> Option<T> {
        if self.samples.is_empty() {
            return None;
        }
        let k = rng.randint(0, self.samples.len() - 1);
        Some(self.swap_remove(k))
    }

    /// Drop every buffered sample.
    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Number of buffered samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True when nothing is buffered.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// True when no more samples fit.
    pub fn is_full(&self) -> bool {
        self.samples.len() >= self.capacity
    }

    /// Get buffer capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
