//! Block widths and byte-order policy.

use zeroize::Zeroize;

/// Byte order used when a block is interpreted as an integer.
///
/// The order governs counter arithmetic in CTR and the direction of the
/// GF(2^n) doubling in OMAC. It is chosen once per state object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Endian {
    /// Byte 0 is the most significant.
    Big,
    /// Byte 0 is the least significant.
    Little,
}

impl Endian {
    /// Position within a `len`-byte block of the byte with significance `i`
    /// (0 is the least significant byte).
    #[inline]
    pub(crate) fn byte_at(self, len: usize, i: usize) -> usize {
        match self {
            Endian::Big => len - 1 - i,
            Endian::Little => i,
        }
    }
}

mod sealed {
    pub trait Sealed {}
    impl Sealed for [u8; 8] {}
    impl Sealed for [u8; 16] {}
}

/// A cipher block: `[u8; 8]` or `[u8; 16]`.
pub trait Block:
    sealed::Sealed + Copy + Default + AsRef<[u8]> + AsMut<[u8]> + Zeroize + core::fmt::Debug
{
    /// Width in bytes.
    const SIZE: usize;

    /// Low byte of the reduction polynomial for doubling in GF(2^(8 * SIZE)).
    const REDUCTION: u8;

    /// Byte order matching the published test vectors for this width.
    const CANONICAL_ENDIAN: Endian;
}

impl Block for [u8; 8] {
    const SIZE: usize = 8;
    const REDUCTION: u8 = 0x1b;
    const CANONICAL_ENDIAN: Endian = Endian::Little;
}

impl Block for [u8; 16] {
    const SIZE: usize = 16;
    const REDUCTION: u8 = 0x87;
    const CANONICAL_ENDIAN: Endian = Endian::Big;
}

/// XORs `rhs` into `dst`.
#[inline]
pub fn xor_in_place<B: Block>(dst: &mut B, rhs: &B) {
    for (d, r) in dst.as_mut().iter_mut().zip(rhs.as_ref()) {
        *d ^= *r;
    }
}
