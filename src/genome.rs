use crate::error::{Error, Result};
use crate::stream::ChunkStream;

/// Number of chromosome streams held by a [`Genome`]
pub const CHROMOSOME_COUNT: usize = 23;

/// A minimal chromosome container: one packed stream per chromosome
///
/// This is the collaborator surface the scanner needs and nothing more;
/// each handle is a [`ChunkStream`] over that chromosome's packed bytes.
#[derive(Debug)]
pub struct Genome {
    chromosomes: Vec<ChunkStream>,
}

impl Genome {
    /// Builds a genome from exactly [`CHROMOSOME_COUNT`] packed buffers
    ///
    /// Fails with [`Error::SizeMismatch`] for any other count.
    pub fn new(chromosome_data: Vec<Vec<u8>>) -> Result<Self> {
        if chromosome_data.len() != CHROMOSOME_COUNT {
            return Err(Error::SizeMismatch {
                expected: CHROMOSOME_COUNT,
                got: chromosome_data.len(),
            });
        }
        let chromosomes = chromosome_data.into_iter().map(ChunkStream::new).collect();
        Ok(Self { chromosomes })
    }

    /// The stream handle for one chromosome
    ///
    /// Fails with [`Error::OutOfRange`] past [`CHROMOSOME_COUNT`].
    pub fn chromosome(&self, index: usize) -> Result<&ChunkStream> {
        self.chromosomes
            .get(index)
            .ok_or(Error::OutOfRange(index, CHROMOSOME_COUNT))
    }

    #[must_use]
    pub fn chromosomes(&self) -> usize {
        self.chromosomes.len()
    }
}
