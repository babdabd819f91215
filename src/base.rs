use std::fmt;

/// Number of bases packed into a single byte (2 bits each)
pub const BASES_PER_BYTE: usize = 4;

/// A single DNA base with its fixed 2-bit ordinal encoding
///
/// The ordinals are part of the packed byte layout and must not change:
/// `pack`/`unpack` depend on them directly.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Base {
    A = 0,
    C = 1,
    G = 2,
    T = 3,
}

impl Base {
    /// Decodes a 2-bit value into a base. Total over the masked domain.
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0 => Self::A,
            1 => Self::C,
            2 => Self::G,
            _ => Self::T,
        }
    }

    /// Watson-Crick complement (A<->T, C<->G)
    #[must_use]
    pub const fn complement(self) -> Self {
        Self::from_bits(3 - self as u8)
    }

    #[must_use]
    pub const fn to_char(self) -> char {
        match self {
            Self::A => 'A',
            Self::C => 'C',
            Self::G => 'G',
            Self::T => 'T',
        }
    }
}

impl fmt::Display for Base {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// Packs four bases into one byte, most-significant pair first
///
/// Inverse of [`unpack`]: sub-index 0 lands in bits 7..=6, sub-index 3 in
/// bits 1..=0.
#[must_use]
pub const fn pack(a: Base, b: Base, c: Base, d: Base) -> u8 {
    ((a as u8) << 6) | ((b as u8) << 4) | ((c as u8) << 2) | (d as u8)
}

/// Unpacks one byte into its four bases in sub-index order
#[must_use]
pub const fn unpack(byte: u8) -> [Base; BASES_PER_BYTE] {
    [
        Base::from_bits(byte >> 6),
        Base::from_bits(byte >> 4),
        Base::from_bits(byte >> 2),
        Base::from_bits(byte),
    ]
}
