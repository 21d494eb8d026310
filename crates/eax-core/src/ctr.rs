//! Random-access CTR keystream.
//!
//! Keystream block `i` is `E(nonce + i)`, with the addition carried across the
//! whole block in the configured byte order. Only the most recently used
//! keystream block is cached.

use zeroize::Zeroize;

use crate::block::{Block, Endian};
use crate::cipher::BlockCipher;
use crate::error::Error;
use crate::wide::add_counter;

/// Streaming CTR state addressed by absolute byte position.
///
/// Output for a given `(pos, byte)` does not depend on the order of earlier
/// calls, so bytes may be processed backwards, repeatedly or out of order.
pub struct Ctr<'c, C: BlockCipher> {
    cipher: &'c C,
    endian: Endian,
    nonce: C::Block,
    keystream: C::Block,
    /// Index of the block held in `keystream`; `None` forces regeneration.
    block_index: Option<u64>,
    active: bool,
}

impl<'c, C: BlockCipher> Ctr<'c, C> {
    /// Creates a keystream for `nonce` using the width's canonical byte order.
    pub fn new(cipher: &'c C, nonce: &C::Block) -> Self {
        Self::with_endian(cipher, nonce, C::Block::CANONICAL_ENDIAN)
    }

    /// Creates a keystream for `nonce` with an explicit counter byte order.
    pub fn with_endian(cipher: &'c C, nonce: &C::Block, endian: Endian) -> Self {
        let mut ctr = Self::idle(cipher, endian);
        ctr.reset(nonce);
        ctr
    }

    pub(crate) fn idle(cipher: &'c C, endian: Endian) -> Self {
        Self {
            cipher,
            endian,
            nonce: C::Block::default(),
            keystream: C::Block::default(),
            block_index: None,
            active: false,
        }
    }

    /// Installs a new nonce and invalidates the cached keystream block.
    pub fn reset(&mut self, nonce: &C::Block) {
        self.clear();
        self.nonce = *nonce;
        self.active = true;
    }

    /// The nonce the keystream is derived from.
    pub fn nonce(&self) -> &C::Block {
        &self.nonce
    }

    /// Returns `byte` XOR the keystream byte at absolute position `pos`.
    ///
    /// Encryption and decryption are the same operation.
    pub fn process(&mut self, pos: u64, byte: u8) -> Result<u8, Error> {
        if !self.active {
            return Err(Error::Uninitialized { operation: "ctr process" });
        }

        let size = C::Block::SIZE as u64;
        let index = pos / size;
        if self.block_index != Some(index) {
            add_counter(&mut self.keystream, &self.nonce, index, self.endian);
            self.cipher.encrypt_block(&mut self.keystream);
            self.block_index = Some(index);
        }
        Ok(self.keystream.as_ref()[(pos % size) as usize] ^ byte)
    }

    /// Zeroes the nonce and cached keystream and invalidates the cache.
    pub fn clear(&mut self) {
        self.nonce.zeroize();
        self.keystream.zeroize();
        self.block_index = None;
        self.active = false;
    }

    #[cfg(test)]
    pub(crate) fn is_zeroed(&self) -> bool {
        let zero = |b: &C::Block| b.as_ref().iter().all(|&x| x == 0);
        zero(&self.nonce) && zero(&self.keystream) && self.block_index.is_none()
    }
}

impl<C: BlockCipher> Drop for Ctr<'_, C> {
    fn drop(&mut self) {
        self.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference;
    use crate::xtea::Xtea;
    use aes_reg::{Aes128, Aes128Key};
    use core::cell::Cell;
    use proptest::prelude::*;

    fn aes() -> Aes128 {
        Aes128::new(&Aes128Key::from(*b"ctr test key 128"))
    }

    /// Counts cipher invocations.
    struct Counting<'a, C> {
        inner: &'a C,
        calls: Cell<usize>,
    }

    impl<C: BlockCipher> BlockCipher for Counting<'_, C> {
        type Block = C::Block;

        fn encrypt_block(&self, block: &mut C::Block) {
            self.calls.set(self.calls.get() + 1);
            self.inner.encrypt_block(block);
        }
    }

    #[test]
    fn sequential_matches_reference() {
        let aes = aes();
        let nonce = [0x5c; 16];
        let data: Vec<u8> = (0..70u8).collect();
        let mut ctr = Ctr::new(&aes, &nonce);
        let out: Vec<u8> = data
            .iter()
            .enumerate()
            .map(|(i, &b)| ctr.process(i as u64, b).unwrap())
            .collect();
        assert_eq!(out, reference::ctr(&aes, Endian::Big, &nonce, &data));
    }

    #[test]
    fn little_endian_counter_for_64_bit_blocks() {
        let xtea = Xtea::new(&[9u8; 16]);
        let nonce = (u64::MAX - 1).to_le_bytes();
        let data = [0u8; 32];
        let mut ctr = Ctr::new(&xtea, &nonce);
        let out: Vec<u8> = (0..32).map(|i| ctr.process(i, data[i as usize]).unwrap()).collect();

        // Block 2 wraps around to a zero counter.
        let mut block = [0u8; 8];
        xtea.encrypt_block(&mut block);
        assert_eq!(&out[16..24], &block);
        assert_eq!(out, reference::ctr(&xtea, Endian::Little, &nonce, &data));
    }

    #[test]
    fn regenerates_only_on_block_change() {
        let aes = aes();
        let counting = Counting { inner: &aes, calls: Cell::new(0) };
        let mut ctr = Ctr::new(&counting, &[0u8; 16]);

        for pos in 0..16 {
            ctr.process(pos, 0).unwrap();
        }
        assert_eq!(counting.calls.get(), 1);

        ctr.process(3, 0).unwrap();
        assert_eq!(counting.calls.get(), 1);

        ctr.process(16, 0).unwrap();
        ctr.process(0, 0).unwrap();
        assert_eq!(counting.calls.get(), 3);
    }

    #[test]
    fn involution_with_fresh_instance() {
        let aes = aes();
        let nonce = [0xa5; 16];
        for pos in [0u64, 5, 16, 1000, u64::MAX] {
            let ct = Ctr::new(&aes, &nonce).process(pos, 0x3c).unwrap();
            let pt = Ctr::new(&aes, &nonce).process(pos, ct).unwrap();
            assert_eq!(pt, 0x3c);
        }
    }

    #[test]
    fn clear_is_idempotent_and_disables() {
        let aes = aes();
        let mut ctr = Ctr::new(&aes, &[1u8; 16]);
        ctr.process(0, 0).unwrap();
        ctr.clear();
        assert!(ctr.is_zeroed());
        ctr.clear();
        assert!(ctr.is_zeroed());
        assert_eq!(ctr.process(0, 0), Err(Error::Uninitialized { operation: "ctr process" }));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(48))]

        #[test]
        fn prop_any_order_matches_sequential(
            data in prop::collection::vec(any::<u8>(), 0..96)
                .prop_flat_map(|data| {
                    let len = data.len();
                    (Just(data), Just((0..len).collect::<Vec<_>>()).prop_shuffle())
                }),
            nonce in any::<[u8; 16]>(),
        ) {
            let (data, order) = data;
            let aes = aes();

            let mut seq = Ctr::new(&aes, &nonce);
            let expected: Vec<u8> = data
                .iter()
                .enumerate()
                .map(|(i, &b)| seq.process(i as u64, b).unwrap())
                .collect();

            let mut shuffled = Ctr::new(&aes, &nonce);
            let mut out = vec![0u8; data.len()];
            for i in order {
                out[i] = shuffled.process(i as u64, data[i]).unwrap();
            }
            prop_assert_eq!(out, expected);
        }

        #[test]
        fn prop_involution_64_bit(
            key in any::<[u8; 16]>(),
            nonce in any::<[u8; 8]>(),
            pos in any::<u64>(),
            byte in any::<u8>(),
        ) {
            let xtea = Xtea::new(&key);
            let ct = Ctr::new(&xtea, &nonce).process(pos, byte).unwrap();
            prop_assert_eq!(Ctr::new(&xtea, &nonce).process(pos, ct).unwrap(), byte);
        }
    }
}
