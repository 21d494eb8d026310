//! The EAX composition.
//!
//! ```text
//! N   = OMAC^0(nonce)            seeds CTR
//! H   = OMAC^1(header)
//! C   = OMAC^2(ciphertext)
//! tag = N ^ H ^ C
//! ```
//!
//! Header and ciphertext are authenticated byte by byte in any interleaving.
//! Decryption is random access and may start before the tag is known; a
//! caller that decrypts speculatively must discard the output if the tag
//! does not verify.

use tracing::{debug, trace};
use zeroize::Zeroize;

use crate::block::{xor_in_place, Block, Endian};
use crate::cipher::BlockCipher;
use crate::ctr::Ctr;
use crate::error::Error;
use crate::omac::Omac;
use crate::tag::Tag;

/// OMAC domain of the nonce.
pub const NONCE_DOMAIN: u8 = 0;
/// OMAC domain of the header.
pub const HEADER_DOMAIN: u8 = 1;
/// OMAC domain of the ciphertext.
pub const CIPHERTEXT_DOMAIN: u8 = 2;

/// Lifecycle of an [`Eax`] session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EaxPhase {
    /// No nonce installed.
    Uninitialized,
    /// Accepting header and ciphertext bytes.
    Authenticating,
    /// Tag computed; only decryption, `init` and `clear` remain legal.
    Finalized,
}

/// Streaming EAX session over a borrowed cipher.
///
/// The session holds two MAC accumulators, one CTR keystream block and the
/// CTR nonce. All of it is zeroized by [`clear`](Self::clear) and on drop.
pub struct Eax<'c, C: BlockCipher> {
    header: Omac<'c, C>,
    ciphertext: Omac<'c, C>,
    ctr: Ctr<'c, C>,
    phase: EaxPhase,
}

impl<'c, C: BlockCipher> Eax<'c, C> {
    /// Creates an uninitialised session using the width's canonical byte order.
    pub fn new(cipher: &'c C) -> Self {
        Self::with_endian(cipher, C::Block::CANONICAL_ENDIAN)
    }

    /// Creates an uninitialised session with an explicit byte order for
    /// counter arithmetic and subkey doubling.
    pub fn with_endian(cipher: &'c C, endian: Endian) -> Self {
        Self {
            header: Omac::idle(cipher, endian),
            ciphertext: Omac::idle(cipher, endian),
            ctr: Ctr::idle(cipher, endian),
            phase: EaxPhase::Uninitialized,
        }
    }

    /// Creates a session and installs `nonce`.
    pub fn with_nonce(cipher: &'c C, nonce: &[u8]) -> Self {
        let mut eax = Self::new(cipher);
        eax.init(nonce);
        eax
    }

    /// Installs `nonce` and starts fresh header and ciphertext MACs.
    ///
    /// Any previous session state is discarded first. The nonce may have any
    /// length, including zero.
    pub fn init(&mut self, nonce: &[u8]) {
        self.clear();

        // The header accumulator doubles as the transient nonce MAC.
        self.header.reset(NONCE_DOMAIN);
        for &byte in nonce {
            self.header.absorb(byte);
        }
        let mut n = self.header.finish();
        self.ctr.reset(&n);
        n.zeroize();

        self.header.reset(HEADER_DOMAIN);
        self.ciphertext.reset(CIPHERTEXT_DOMAIN);
        self.phase = EaxPhase::Authenticating;
        trace!(nonce_len = nonce.len(), block_size = C::Block::SIZE, "eax session initialised");
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> EaxPhase {
        self.phase
    }

    /// Authenticates one header byte.
    pub fn auth_header(&mut self, byte: u8) -> Result<(), Error> {
        self.ensure_authenticating("auth_header")?;
        self.header.process(byte)
    }

    /// Authenticates one ciphertext byte.
    pub fn auth_ciphertext(&mut self, byte: u8) -> Result<(), Error> {
        self.ensure_authenticating("auth_ciphertext")?;
        self.ciphertext.process(byte)
    }

    /// Decrypts the ciphertext byte at position `pos`.
    ///
    /// Legal in any phase after [`init`](Self::init); does not touch the MACs.
    pub fn decrypt(&mut self, pos: u64, byte: u8) -> Result<u8, Error> {
        if self.phase == EaxPhase::Uninitialized {
            return Err(Error::Uninitialized { operation: "decrypt" });
        }
        self.ctr.process(pos, byte)
    }

    /// Encrypts the plaintext byte at position `pos`.
    ///
    /// Identical to [`decrypt`](Self::decrypt). The resulting ciphertext byte
    /// still has to be passed to [`auth_ciphertext`](Self::auth_ciphertext).
    pub fn encrypt(&mut self, pos: u64, byte: u8) -> Result<u8, Error> {
        if self.phase == EaxPhase::Uninitialized {
            return Err(Error::Uninitialized { operation: "encrypt" });
        }
        self.ctr.process(pos, byte)
    }

    /// Finalises both MACs and returns the tag.
    ///
    /// The ciphertext MAC is finalised before the header MAC. Both
    /// accumulators are cleared afterwards; the CTR state is kept so
    /// decryption can continue.
    pub fn digest(&mut self) -> Result<Tag<C::Block>, Error> {
        self.ensure_authenticating("digest")?;

        let mut tag = self.ciphertext.digest()?;
        let mut h = self.header.digest()?;
        xor_in_place(&mut tag, &h);
        xor_in_place(&mut tag, self.ctr.nonce());
        h.zeroize();

        self.ciphertext.clear();
        self.header.clear();
        self.phase = EaxPhase::Finalized;
        debug!("eax digest computed");
        Ok(Tag::new(tag))
    }

    /// Zeroes all session state and returns to [`EaxPhase::Uninitialized`].
    pub fn clear(&mut self) {
        self.header.clear();
        self.ciphertext.clear();
        self.ctr.clear();
        if self.phase != EaxPhase::Uninitialized {
            trace!("eax session cleared");
        }
        self.phase = EaxPhase::Uninitialized;
    }

    fn ensure_authenticating(&self, operation: &'static str) -> Result<(), Error> {
        match self.phase {
            EaxPhase::Authenticating => Ok(()),
            EaxPhase::Uninitialized => Err(Error::Uninitialized { operation }),
            EaxPhase::Finalized => Err(Error::Finalized { operation }),
        }
    }

    #[cfg(test)]
    fn is_zeroed(&self) -> bool {
        self.header.is_zeroed() && self.ciphertext.is_zeroed() && self.ctr.is_zeroed()
    }
}

impl<C: BlockCipher> Drop for Eax<'_, C> {
    fn drop(&mut self) {
        self.clear();
    }
}
