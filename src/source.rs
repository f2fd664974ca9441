//! Upstream sample sources.
//!
//! A source can be traversed any number of times, each traversal yielding a
//! fresh lazy sequence of fallible samples. It may also report a total count.

use std::convert::Infallible;
use thiserror::Error;

/// Failures raised by the built-in source adapters.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    #[error("source has no defined length")]
    UnknownLength,
}

/// Repeatable, pull-based producer of samples.
pub trait Source {
    type Item;
    type Error;
    type Iter<'a>: Iterator<Item = Result<Self::Item, Self::Error>>
    where
        Self: 'a;

    /// Start a new traversal.
    fn traverse(&mut self) -> Self::Iter<'_>;

    /// Total number of samples one traversal yields.
    fn len(&self) -> Result<usize, Self::Error>;
}

/// Yields clones of the vector's elements on every traversal.
impl<T: Clone> Source for Vec<T> {
    type Item = T;
    type Error = Infallible;
    type Iter<'a>
        = VecIter<'a, T>
    where
        Self: 'a;

    fn traverse(&mut self) -> Self::Iter<'_> {
        VecIter {
            inner: self.as_slice().iter(),
        }
    }

    fn len(&self) -> Result<usize, Infallible> {
        Ok(Vec::len(self))
    }
}

/// Traversal of a `Vec` source, yielding owned clones.
pub struct VecIter<'a, T> {
    inner: std::slice::Iter<'a, T>,
}

impl<T: Clone> Iterator for VecIter<'_, T> {
    type Item = Result<T, Infallible>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().cloned().map(Ok)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

/// Source backed by a closure that opens a new traversal on each call.
pub struct FromFn<F> {
    open: F,
    len: Option<usize>,
}

/// Build a source from `open`, called once per traversal.
///
/// The length is unknown until declared with [`FromFn::with_len`].
pub fn from_fn<F>(open: F) -> FromFn<F> {
    FromFn { open, len: None }
}

impl<F> FromFn<F> {
    /// Declare how many samples each traversal yields.
    pub fn with_len(mut self, len: usize) -> Self {
        self.len = Some(len);
        self
    }
}

impl<F, I, T, E> Source for FromFn<F>
where
    F: FnMut() -> I,
    I: IntoIterator<Item = Result<T, E>>,
    E: From<SourceError>,
{
    type Item = T;
    type Error = E;
    type Iter<'a>
        = I::IntoIter
    where
        Self: 'a;

    fn traverse(&mut self) -> Self::Iter<'_> {
        (self.open)().into_iter()
    }

    fn len(&self) -> Result<usize, E> {
        self.len.ok_or_else(|| E::from(SourceError::UnknownLength))
    }
}
