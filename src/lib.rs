//! Incremental shuffling for streaming sample pipelines.
//!
//! Bounded-memory reordering of a lazy sample stream:
//! - Pull-based `Source` contract, traversable any number of times
//! - Shuffle buffer with O(1) random pick-and-replace
//! - Tunable trade-off between startup latency (`initial`) and mixing (`buffer_size`)
//! - Owned generator per stage, OS-entropy seeded unless one is supplied

mod config;
mod shuffle;
mod shuffler;
mod source;

pub use config::{ConfigError, ShuffleConfig};
pub use shuffle::{RandomIndex, ShuffleBuffer};
pub use shuffler::{IncrementalShuffler, Traversal};
pub use source::{FromFn, Source, SourceError, VecIter, from_fn};
