use std::fmt;

use crate::base::{unpack, Base, BASES_PER_BYTE};
use crate::error::{Error, Result};

/// A read-only view of 2-bit packed bases backed by a borrowed byte buffer
///
/// The view exposes a logical sequence of `4 * bytes` bases and decodes each
/// base lazily on access; nothing is cached and the underlying buffer is
/// never copied. Valid exactly as long as the borrowed buffer.
#[derive(Debug, Clone, Copy)]
pub struct SequenceView<'a> {
    data: &'a [u8],
}

impl<'a> SequenceView<'a> {
    #[must_use]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    /// Number of bases in the view
    #[must_use]
    pub const fn len(&self) -> usize {
        self.data.len() * BASES_PER_BYTE
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the base at logical index `index`
    ///
    /// Fails with [`Error::OutOfRange`] when the index is past the end.
    pub fn at(&self, index: usize) -> Result<Base> {
        self.get(index)
            .ok_or(Error::OutOfRange(index, self.len()))
    }

    /// Non-erroring twin of [`at`](Self::at)
    #[must_use]
    pub fn get(&self, index: usize) -> Option<Base> {
        if index < self.len() {
            Some(unpack(self.data[index / BASES_PER_BYTE])[index % BASES_PER_BYTE])
        } else {
            None
        }
    }

    /// The backing packed bytes
    #[must_use]
    pub const fn bytes(&self) -> &'a [u8] {
        self.data
    }

    #[must_use]
    pub const fn iter(&self) -> Bases<'a> {
        Bases {
            data: self.data,
            front: 0,
            back: self.data.len() * BASES_PER_BYTE,
        }
    }
}

impl<'a> IntoIterator for &SequenceView<'a> {
    type Item = Base;
    type IntoIter = Bases<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for SequenceView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for base in self {
            write!(f, "{base}")?;
        }
        Ok(())
    }
}

/// Bidirectional iterator over the bases of a [`SequenceView`]
///
/// Each step re-decodes from the backing buffer; there is no cached state.
#[derive(Debug, Clone)]
pub struct Bases<'a> {
    data: &'a [u8],
    front: usize,
    back: usize,
}

impl Iterator for Bases<'_> {
    type Item = Base;

    fn next(&mut self) -> Option<Base> {
        if self.front >= self.back {
            return None;
        }
        let base = unpack(self.data[self.front / BASES_PER_BYTE])[self.front % BASES_PER_BYTE];
        self.front += 1;
        Some(base)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl DoubleEndedIterator for Bases<'_> {
    fn next_back(&mut self) -> Option<Base> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        Some(unpack(self.data[self.back / BASES_PER_BYTE])[self.back % BASES_PER_BYTE])
    }
}

impl ExactSizeIterator for Bases<'_> {}
