//! Register-resident AES-128.
//!
//! This crate implements single-block AES-128 encryption that keeps all key
//! material and cipher state in a small word-addressed register file and
//! never materialises an expanded key schedule:
//! - Key words, the live round key and the state live in twelve named slots
//!   ([`Reg`]) behind the [`KeyRegisters`] trait.
//! - Each round derives its round key in place from the previous one.
//! - SubBytes and ShiftRows are fused into a byte gather over column words and
//!   MixColumns doubles all four lanes of a column at once.
//!
//! The only table is the 256-byte S-box and no branch depends on key or data.
//! This is not a substitute for a side-channel audit: whether the S-box
//! lookup leaks through the cache on a given target must be checked there.
//!
//! Only encryption is provided; the modes built on top of it (CTR, OMAC)
//! never need the inverse cipher.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod block;
mod cipher;
mod key;
mod regs;
mod round;
mod sbox;

pub use crate::block::Block;
pub use crate::cipher::{encrypt, encrypt_block, get_data, set_data, set_key, Aes128};
pub use crate::key::Aes128Key;
pub use crate::regs::{KeyRegisters, KeyStore, Reg, NREGS};
pub use crate::round::{key_core, mix_column, sub_shift, xtime32};
pub use crate::sbox::sbox;
