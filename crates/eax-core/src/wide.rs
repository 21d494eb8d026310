//! Wide-integer arithmetic over whole blocks.
//!
//! Both helpers touch every byte of the block regardless of its value, so the
//! work done depends only on the block width.

use crate::block::{Block, Endian};

/// Multiplies `block` by `x` in GF(2^(8 * SIZE)).
///
/// The block is read as an integer in `endian` order, shifted left by one and
/// reduced by the width's polynomial when the top bit falls off.
pub fn gf_double<B: Block>(block: &mut B, endian: Endian) {
    let bytes = block.as_mut();
    let len = bytes.len();

    let top = bytes[endian.byte_at(len, len - 1)] >> 7;
    let mask = 0u8.wrapping_sub(top);

    let mut carry = 0u8;
    for i in 0..len {
        let at = endian.byte_at(len, i);
        let byte = bytes[at];
        bytes[at] = (byte << 1) | carry;
        carry = byte >> 7;
    }

    bytes[endian.byte_at(len, 0)] ^= B::REDUCTION & mask;
}

/// Writes `base + inc` into `dst`, modulo 2^(8 * SIZE).
///
/// The carry is propagated through every byte in `endian` order of
/// significance.
pub fn add_counter<B: Block>(dst: &mut B, base: &B, inc: u64, endian: Endian) {
    let src = base.as_ref();
    let out = dst.as_mut();
    let len = out.len();

    let mut carry = inc;
    for i in 0..len {
        let at = endian.byte_at(len, i);
        let sum = u16::from(src[at]) + (carry & 0xff) as u16;
        out[at] = sum as u8;
        carry = (carry >> 8) + u64::from(sum >> 8);
    }
}
