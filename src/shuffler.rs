//! Incremental shuffling stage.
//!
//! Each traversal runs:
//! Upstream -> Fill (one pull + one top-up) -> Pick -> Downstream
//!
//! - Buffer fills until `min(initial, buffer_size)` samples are held
//! - Every upstream pull after that is paired with one random emission
//! - Once upstream is exhausted the buffer drains in random order
//!
//! Mixing is local to the buffer window, not a uniform permutation of the
//! whole stream.

use crate::config::{ConfigError, ShuffleConfig};
use crate::shuffle::{RandomIndex, ShuffleBuffer};
use crate::source::Source;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, trace};

/// Shuffling stage over an upstream [`Source`].
///
/// The buffer lives per traversal. The generator lives per instance, so
/// repeated traversals see different draws.
pub struct IncrementalShuffler<S, R = StdRng> {
    source: S,
    rng: R,
    config: ShuffleConfig,
}

impl<S> IncrementalShuffler<S, StdRng> {
    /// Default configuration and a generator seeded from OS entropy.
    pub fn new(source: S) -> Self {
        Self {
            source,
            rng: StdRng::from_entropy(),
            config: ShuffleConfig::default(),
        }
    }

    /// Generator seeded from OS entropy.
    pub fn with_config(source: S, config: ShuffleConfig) -> Result<Self, ConfigError> {
        Self::with_rng(source, StdRng::from_entropy(), config)
    }

    /// Reproducible shuffling from a fixed seed.
    pub fn seeded(source: S, seed: u64, config: ShuffleConfig) -> Result<Self, ConfigError> {
        Self::with_rng(source, StdRng::seed_from_u64(seed), config)
    }
}

impl<S, R> IncrementalShuffler<S, R> {
    /// Shuffle with a caller-supplied generator.
    ///
    /// Fails if `config` has a zero `buffer_size`. Pass a seeded generator for
    /// reproducible output.
    pub fn with_rng(source: S, rng: R, config: ShuffleConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            source,
            rng,
            config,
        })
    }

    /// Configuration as supplied, before clamping.
    pub fn config(&self) -> &ShuffleConfig {
        &self.config
    }

    /// Occupancy that triggers the first emission.
    pub fn initial(&self) -> usize {
        self.config.effective_initial()
    }

    /// Maximum number of buffered samples.
    pub fn buffer_size(&self) -> usize {
        self.config.buffer_size
    }

    /// Borrow the upstream source.
    pub fn get_ref(&self) -> &S {
        &self.source
    }

    /// Unwrap the upstream source.
    pub fn into_inner(self) -> S {
        self.source
    }
}

impl<S, R> Source for IncrementalShuffler<S, R>
where
    S: Source,
    R: RandomIndex,
{
    type Item = S::Item;
    type Error = S::Error;
    type Iter<'a>
        = Traversal<'a, S, R>
    where
        Self: 'a;

    fn traverse(&mut self) -> Self::Iter<'_> {
        let initial = self.config.effective_initial();
        debug!(
            initial,
            buffer_size = self.config.buffer_size,
            "starting shuffle traversal"
        );
        Traversal {
            upstream: Some(self.source.traverse()),
            buffer: ShuffleBuffer::new(self.config.buffer_size),
            rng: &mut self.rng,
            initial,
        }
    }

    /// Forwards the upstream count unchanged.
    fn len(&self) -> Result<usize, S::Error> {
        self.source.len()
    }
}

/// One pass over an [`IncrementalShuffler`].
///
/// Dropping it early discards whatever is still buffered.
pub struct Traversal<'a, S, R>
where
    S: Source + 'a,
{
    // None once upstream is exhausted or has failed
    upstream: Option<S::Iter<'a>>,
    buffer: ShuffleBuffer<S::Item>,
    rng: &'a mut R,
    initial: usize,
}

impl<'a, S, R> Traversal<'a, S, R>
where
    S: Source + 'a,
{
    /// Samples currently held in the buffer.
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    /// True once upstream has stopped and only the drain remains.
    pub fn is_draining(&self) -> bool {
        self.upstream.is_none()
    }

    fn finish_fill(&mut self) {
        self.upstream = None;
        debug!(buffered = self.buffer.len(), "upstream exhausted, draining");
    }

    fn fail(&mut self, e: S::Error) -> S::Error {
        debug!(
            discarded = self.buffer.len(),
            "upstream failed, ending traversal"
        );
        self.upstream = None;
        self.buffer.clear();
        e
    }
}

impl<'a, S, R> Iterator for Traversal<'a, S, R>
where
    S: Source + 'a,
    R: RandomIndex,
{
    type Item = Result<S::Item, S::Error>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(upstream) = self.upstream.as_mut() {
            match upstream.next() {
                Some(Ok(sample)) => self.buffer.push(sample),
                Some(Err(e)) => return Some(Err(self.fail(e))),
                None => {
                    self.finish_fill();
                    break;
                }
            }

            // Opportunistic top-up; exhaustion here is not an error
            if !self.buffer.is_full() {
                match upstream.next() {
                    Some(Ok(sample)) => self.buffer.push(sample),
                    Some(Err(e)) => return Some(Err(self.fail(e))),
                    None => self.finish_fill(),
                }
            }

            if self.buffer.len() >= self.initial {
                trace!(buffered = self.buffer.len(), "pick");
                return self.buffer.pick(&mut *self.rng).map(Ok);
            }
        }

        self.buffer.pick(&mut *self.rng).map(Ok)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let buffered = self.buffer.len();
        match &self.upstream {
            Some(upstream) => {
                let (_, upper) = upstream.size_hint();
                // An upstream error ends the pass early, so no lower bound
                (0, upper.and_then(|n| n.checked_add(buffered)))
            }
            None => (buffered, Some(buffered)),
        }
    }
}
