/// Custom Result type for teloscan operations, wrapping the custom [`Error`] type
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the teloscan library
///
/// "No telomere found" is deliberately absent: the scanner reports it as an
/// `Option` sentinel because it is an expected outcome, not a failure.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Attempted to index a sequence view beyond its logical length
    ///
    /// # Arguments
    /// * First `usize` - The requested base index
    /// * Second `usize` - The length of the sequence view
    #[error("Requested base index ({0}) is out of sequence range ({1})")]
    OutOfRange(usize, usize),

    /// The number of chromosome buffers does not match the expected count
    ///
    /// # Fields
    /// * `expected` - The fixed number of chromosomes in a genome
    /// * `got` - The number of buffers actually provided
    #[error("Number of chromosome buffers ({got}) does not match the expected count ({expected})")]
    SizeMismatch { expected: usize, got: usize },
}
