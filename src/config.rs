//! Shuffler configuration.

use thiserror::Error;

/// Rejected shuffler configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("buffer_size must be > 0")]
    ZeroBufferSize,
}

/// Fill levels for an incremental shuffler.
///
/// - `initial`: samples buffered before the first emission. Clamped to
///   `buffer_size`, never rejected.
/// - `buffer_size`: hard cap on buffered samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShuffleConfig {
    pub initial: usize,
    pub buffer_size: usize,
}

impl Default for ShuffleConfig {
    fn default() -> Self {
        Self {
            initial: 10,
            buffer_size: 1000,
        }
    }
}

impl ShuffleConfig {
    /// Set the fill level before the first emission.
    pub fn with_initial(mut self, initial: usize) -> Self {
        self.initial = initial;
        self
    }

    /// Set the maximum number of buffered samples.
    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size;
        self
    }

    /// Check that the buffer can hold at least one sample.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.buffer_size == 0 {
            return Err(ConfigError::ZeroBufferSize);
        }
        Ok(())
    }

    /// Buffer occupancy that triggers emission: `min(initial, buffer_size)`.
    pub fn effective_initial(&self) -> usize {
        self.initial.min(self.buffer_size)
    }
}
