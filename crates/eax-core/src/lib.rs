//! Byte-streamed EAX authenticated encryption.
//!
//! EAX combines a CTR keystream with three domain-separated OMAC instances:
//!
//! 1. `init(nonce)` computes `N = OMAC^0(nonce)` and seeds CTR with it.
//! 2. Header bytes go to `OMAC^1`, ciphertext bytes to `OMAC^2`, in any
//!    interleaving and one byte at a time.
//! 3. `encrypt`/`decrypt` XOR a byte with the keystream at an absolute
//!    position; positions may be visited in any order.
//! 4. `digest` returns `N ^ OMAC^1(header) ^ OMAC^2(ciphertext)`.
//!
//! The session never buffers more than one block per primitive, so it fits
//! targets that receive data a byte at a time. The underlying cipher is any
//! [`BlockCipher`] with a 64- or 128-bit block; [`aes_reg::Aes128`]
//! implements it out of the box.
//!
//! ```
//! use aes_reg::{Aes128, Aes128Key};
//! use eax_core::{open_in_place, seal_in_place};
//!
//! let aes = Aes128::new(&Aes128Key::from([7u8; 16]));
//! let mut buf = *b"hello, eax";
//! let tag = seal_in_place(&aes, b"unique nonce", b"header", &mut buf)?;
//! open_in_place(&aes, b"unique nonce", b"header", &mut buf, tag.as_bytes())?;
//! assert_eq!(&buf, b"hello, eax");
//! # Ok::<(), eax_core::Error>(())
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod block;
mod cipher;
mod ctr;
mod eax;
mod error;
mod omac;
mod oneshot;
mod tag;
mod wide;

#[cfg(test)]
mod reference;
#[cfg(test)]
mod xtea;

pub use crate::block::{xor_in_place, Block, Endian};
pub use crate::cipher::BlockCipher;
pub use crate::ctr::Ctr;
pub use crate::eax::{Eax, EaxPhase, CIPHERTEXT_DOMAIN, HEADER_DOMAIN, NONCE_DOMAIN};
pub use crate::error::Error;
pub use crate::omac::{Omac, OmacPhase};
pub use crate::oneshot::{open_in_place, seal_in_place};
pub use crate::tag::Tag;
pub use crate::wide::{add_counter, gf_double};
