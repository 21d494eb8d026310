//! The block cipher capability consumed by OMAC, CTR and EAX.

use aes_reg::{Aes128, KeyRegisters};

use crate::block::Block;

/// Single-block encryption under a key owned by the implementor.
///
/// Implementations must be deterministic and must not observe or mutate any
/// mode state. Several OMAC and CTR instances may hold a shared reference to
/// the same cipher; calls through those references happen one at a time on
/// the owning thread.
pub trait BlockCipher {
    /// Block type, fixing the width to 64 or 128 bits.
    type Block: Block;

    /// Encrypts `block` in place.
    fn encrypt_block(&self, block: &mut Self::Block);
}

impl<R: KeyRegisters> BlockCipher for Aes128<R> {
    type Block = [u8; 16];

    #[inline]
    fn encrypt_block(&self, block: &mut [u8; 16]) {
        aes_reg::encrypt_block(self.registers(), block);
    }
}

impl<C: BlockCipher + ?Sized> BlockCipher for &C {
    type Block = C::Block;

    #[inline]
    fn encrypt_block(&self, block: &mut Self::Block) {
        (**self).encrypt_block(block);
    }
}
