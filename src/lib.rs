mod base;
mod error;
mod genome;
mod scanner;
mod stream;
mod view;

pub use base::{pack, unpack, Base, BASES_PER_BYTE};
pub use error::{Error, Result};
pub use genome::{Genome, CHROMOSOME_COUNT};
pub use scanner::{leading_telomere_bases, trailing_telomere_bases, TELOMERE_MOTIF};
pub use stream::{ChunkStream, HelixStream};
pub use view::{Bases, SequenceView};
