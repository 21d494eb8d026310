//! XTEA, used to exercise the 64-bit block width.

use crate::cipher::BlockCipher;

const DELTA: u32 = 0x9e37_79b9;
const CYCLES: usize = 32;

/// XTEA with 32 cycles over a little-endian 64-bit block.
pub(crate) struct Xtea {
    key: [u32; 4],
}

impl Xtea {
    pub(crate) fn new(key: &[u8; 16]) -> Self {
        let key = core::array::from_fn(|i| {
            u32::from_le_bytes([key[4 * i], key[4 * i + 1], key[4 * i + 2], key[4 * i + 3]])
        });
        Self { key }
    }

    pub(crate) fn encrypt_words(&self, mut v0: u32, mut v1: u32) -> (u32, u32) {
        let mut sum = 0u32;
        for _ in 0..CYCLES {
            let mix = ((v1 << 4) ^ (v1 >> 5)).wrapping_add(v1);
            v0 = v0.wrapping_add(mix ^ sum.wrapping_add(self.key[(sum & 3) as usize]));
            sum = sum.wrapping_add(DELTA);
            let mix = ((v0 << 4) ^ (v0 >> 5)).wrapping_add(v0);
            v1 = v1.wrapping_add(mix ^ sum.wrapping_add(self.key[((sum >> 11) & 3) as usize]));
        }
        (v0, v1)
    }
}

impl BlockCipher for Xtea {
    type Block = [u8; 8];

    fn encrypt_block(&self, block: &mut [u8; 8]) {
        let q = u64::from_le_bytes(*block);
        let (v0, v1) = self.encrypt_words(q as u32, (q >> 32) as u32);
        *block = ((u64::from(v1) << 32) | u64::from(v0)).to_le_bytes();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_key_zero_block() {
        let xtea = Xtea::new(&[0u8; 16]);
        assert_eq!(xtea.encrypt_words(0, 0), (0xdee9_d4d8, 0xf713_1ed9));
    }

    #[test]
    fn block_layout_is_little_endian_words() {
        let key: [u8; 16] = core::array::from_fn(|i| i as u8 * 3);
        let xtea = Xtea::new(&key);
        let mut block = [1u8, 2, 3, 4, 5, 6, 7, 8];
        xtea.encrypt_block(&mut block);
        let (v0, v1) = xtea.encrypt_words(0x0403_0201, 0x0807_0605);
        assert_eq!(&block[..4], &v0.to_le_bytes());
        assert_eq!(&block[4..], &v1.to_le_bytes());
    }
}
