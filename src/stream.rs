use std::sync::atomic::{AtomicUsize, Ordering};

use auto_impl::auto_impl;

use crate::view::SequenceView;

/// A seekable source of packed sequence data read in chunks
///
/// This is the only capability the scanner requires from a chromosome
/// stream. All methods take `&self` so a single stream can be shared across
/// readers; see [`ChunkStream`] for the concurrency contract.
#[auto_impl(&, Box, Arc)]
pub trait HelixStream {
    /// Moves the read position to `pos`, clamped to `[0, len]`
    fn seek(&self, pos: usize);

    /// Reserves and returns the next `chunk` bytes as a sequence view
    ///
    /// Returns a shorter (possibly empty) view when fewer bytes remain.
    fn read(&self, chunk: usize) -> SequenceView<'_>;

    /// Total byte count of the backing buffer
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// An in-memory packed sequence stream with an atomically advanced offset
///
/// `read` reserves its byte range with a compare-exchange, so concurrent
/// readers each receive disjoint, contiguous chunks and every byte is
/// delivered to exactly one caller. `seek` is not synchronized against
/// in-flight `read`s; callers reposition only while no reads are racing.
#[derive(Debug)]
pub struct ChunkStream {
    data: Vec<u8>,
    offset: AtomicUsize,
}

impl ChunkStream {
    #[must_use]
    pub fn new(data: Vec<u8>) -> Self {
        Self {
            data,
            offset: AtomicUsize::new(0),
        }
    }
}

impl From<Vec<u8>> for ChunkStream {
    fn from(data: Vec<u8>) -> Self {
        Self::new(data)
    }
}

impl HelixStream for ChunkStream {
    fn seek(&self, pos: usize) {
        self.offset.store(pos.min(self.data.len()), Ordering::Release);
    }

    fn read(&self, chunk: usize) -> SequenceView<'_> {
        let mut offset = self.offset.load(Ordering::Acquire);
        loop {
            let len = chunk.min(self.data.len() - offset);
            if len == 0 {
                return SequenceView::new(&[]);
            }
            match self.offset.compare_exchange_weak(
                offset,
                offset + len,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => return SequenceView::new(&self.data[offset..offset + len]),
                Err(current) => offset = current,
            }
        }
    }

    fn len(&self) -> usize {
        self.data.len()
    }
}
