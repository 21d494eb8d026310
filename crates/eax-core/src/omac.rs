//! Domain-separated OMAC (CMAC) over a byte stream.
//!
//! `OMAC^k(M)` is CMAC over the block `0^(n-8) || k` followed by `M`. The
//! domain block is preloaded into the pending buffer at reset, so the tag byte
//! enters the MAC exactly once, together with the first real block.
//!
//! Input is absorbed one byte at a time. A filled block is held back until the
//! next byte arrives, because the last full block must be masked with the
//! first subkey at digest time instead of being encrypted directly.

use zeroize::Zeroize;

use crate::block::{xor_in_place, Block, Endian};
use crate::cipher::BlockCipher;
use crate::error::Error;
use crate::wide::gf_double;

/// Padding byte appended to an incomplete final block.
const PAD: u8 = 0x80;

/// Lifecycle of an [`Omac`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OmacPhase {
    /// Cleared; `reset` must be called before use.
    Idle,
    /// Absorbing input.
    Accepting,
    /// `digest` has been taken; only `reset` or `clear` are legal.
    Finalized,
}

/// Streaming OMAC state.
///
/// All accumulated material is zeroized on [`clear`](Self::clear) and on drop.
pub struct Omac<'c, C: BlockCipher> {
    cipher: &'c C,
    endian: Endian,
    mac: C::Block,
    pending: C::Block,
    /// Bytes written into `pending`, modulo the block size. Zero means the
    /// pending block is complete (or holds only the domain block).
    pos: usize,
    phase: OmacPhase,
}

impl<'c, C: BlockCipher> Omac<'c, C> {
    /// Starts a MAC for domain `domain` using the width's canonical byte order.
    pub fn new(cipher: &'c C, domain: u8) -> Self {
        Self::with_endian(cipher, domain, C::Block::CANONICAL_ENDIAN)
    }

    /// Starts a MAC for domain `domain` with an explicit doubling byte order.
    pub fn with_endian(cipher: &'c C, domain: u8, endian: Endian) -> Self {
        let mut omac = Self::idle(cipher, endian);
        omac.reset(domain);
        omac
    }

    pub(crate) fn idle(cipher: &'c C, endian: Endian) -> Self {
        Self {
            cipher,
            endian,
            mac: C::Block::default(),
            pending: C::Block::default(),
            pos: 0,
            phase: OmacPhase::Idle,
        }
    }

    /// Discards all state and starts a fresh MAC for domain `domain`.
    pub fn reset(&mut self, domain: u8) {
        self.clear();
        self.pending.as_mut()[C::Block::SIZE - 1] = domain;
        self.phase = OmacPhase::Accepting;
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> OmacPhase {
        self.phase
    }

    /// Absorbs one byte.
    pub fn process(&mut self, byte: u8) -> Result<(), Error> {
        self.ensure_accepting("omac process")?;
        self.absorb(byte);
        Ok(())
    }

    /// Absorbs `bytes` one at a time.
    pub fn update(&mut self, bytes: &[u8]) -> Result<(), Error> {
        self.ensure_accepting("omac update")?;
        for &byte in bytes {
            self.absorb(byte);
        }
        Ok(())
    }

    /// Finishes the MAC and returns it.
    ///
    /// A complete final block is masked with `2L`, an incomplete one is padded
    /// with `0x80 0x00..` and masked with `4L`, where `L = E(0)`.
    pub fn digest(&mut self) -> Result<C::Block, Error> {
        self.ensure_accepting("omac digest")?;
        Ok(self.finish())
    }

    /// Finishes the MAC without checking the phase.
    pub(crate) fn finish(&mut self) -> C::Block {
        let complete = self.pos == 0;
        if !complete {
            self.pending.as_mut()[self.pos] = PAD;
        }
        xor_in_place(&mut self.mac, &self.pending);

        // The pending block is spent; reuse it for the subkey.
        self.pending.zeroize();
        self.cipher.encrypt_block(&mut self.pending);
        gf_double(&mut self.pending, self.endian);
        if !complete {
            gf_double(&mut self.pending, self.endian);
        }
        xor_in_place(&mut self.mac, &self.pending);
        self.cipher.encrypt_block(&mut self.mac);

        self.pending.zeroize();
        self.pos = 0;
        self.phase = OmacPhase::Finalized;
        self.mac
    }

    /// Zeroes the accumulator and pending block and returns to [`OmacPhase::Idle`].
    pub fn clear(&mut self) {
        self.mac.zeroize();
        self.pending.zeroize();
        self.pos = 0;
        self.phase = OmacPhase::Idle;
    }

    /// Absorbs one byte without checking the phase.
    pub(crate) fn absorb(&mut self, byte: u8) {
        if self.pos == 0 {
            xor_in_place(&mut self.mac, &self.pending);
            self.cipher.encrypt_block(&mut self.mac);
            self.pending.zeroize();
        }
        self.pending.as_mut()[self.pos] = byte;
        self.pos = (self.pos + 1) % C::Block::SIZE;
    }

    fn ensure_accepting(&self, operation: &'static str) -> Result<(), Error> {
        match self.phase {
            OmacPhase::Accepting => Ok(()),
            OmacPhase::Idle => Err(Error::Uninitialized { operation }),
            OmacPhase::Finalized => Err(Error::Finalized { operation }),
        }
    }

    #[cfg(test)]
    pub(crate) fn is_zeroed(&self) -> bool {
        let zero = |b: &C::Block| b.as_ref().iter().all(|&x| x == 0);
        zero(&self.mac) && zero(&self.pending) && self.pos == 0
    }
}

impl<C: BlockCipher> Drop for Omac<'_, C> {
    fn drop(&mut self) {
        self.clear();
    }
}
