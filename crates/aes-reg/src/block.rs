//! Block representation helpers.

/// AES block of 16 bytes.
pub type Block = [u8; 16];

/// Reads the little-endian word starting at byte `4 * column`.
#[inline]
pub(crate) fn column(block: &Block, column: usize) -> u32 {
    let at = column * 4;
    u32::from_le_bytes([block[at], block[at + 1], block[at + 2], block[at + 3]])
}

/// Writes `word` as the little-endian column starting at byte `4 * column`.
#[inline]
pub(crate) fn set_column(block: &mut Block, column: usize, word: u32) {
    let at = column * 4;
    block[at..at + 4].copy_from_slice(&word.to_le_bytes());
}
