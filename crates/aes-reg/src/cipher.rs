//! AES-128 block encryption against a register file.
//!
//! The flow mirrors a hardware key-register design:
//!
//! 1. [`set_key`] loads the key words.
//! 2. [`set_data`] loads the plaintext columns.
//! 3. [`encrypt`] runs ten rounds, deriving each round key from the previous
//!    one in place.
//! 4. [`get_data`] reads the ciphertext back.
//!
//! [`encrypt_block`] performs steps 2-4 and wipes the round-key and state
//! slots afterwards, leaving only the key words live.

use crate::block::{column, set_column, Block};
use crate::key::Aes128Key;
use crate::regs::{KeyRegisters, KeyStore, Reg};
use crate::round::{do_round, xtime, LAST_RCON};

/// Loads the key into the key slots.
pub fn set_key<R: KeyRegisters + ?Sized>(regs: &R, key: &Aes128Key) {
    let bytes = key.as_bytes();
    for (i, reg) in Reg::KEY.into_iter().enumerate() {
        regs.save(reg, column(bytes, i));
    }
}

/// Loads a plaintext block into the state slots.
pub fn set_data<R: KeyRegisters + ?Sized>(regs: &R, block: &Block) {
    for (i, reg) in Reg::STATE.into_iter().enumerate() {
        regs.save(reg, column(block, i));
    }
}

/// Reads the state slots out as a block.
pub fn get_data<R: KeyRegisters + ?Sized>(regs: &R) -> Block {
    let mut block = [0u8; 16];
    for (i, reg) in Reg::STATE.into_iter().enumerate() {
        set_column(&mut block, i, regs.load(reg));
    }
    block
}

/// Encrypts the state slots in place.
pub fn encrypt<R: KeyRegisters + ?Sized>(regs: &R) {
    // Round 0: the round key is the key itself.
    for i in 0..4 {
        let word = regs.load(Reg::KEY[i]);
        regs.save(Reg::ROUND_KEY[i], word);
        regs.save(Reg::STATE[i], regs.load(Reg::STATE[i]) ^ word);
    }

    let mut rcon = 0x01u8;
    loop {
        do_round(regs, rcon);
        if rcon == LAST_RCON {
            break;
        }
        rcon = xtime(rcon);
    }
}

/// Encrypts a single 16-byte block in place.
///
/// The round-key and state slots are wiped before returning.
pub fn encrypt_block<R: KeyRegisters + ?Sized>(regs: &R, block: &mut Block) {
    set_data(regs, block);
    encrypt(regs);
    *block = get_data(regs);
    for reg in Reg::ROUND_KEY.into_iter().chain(Reg::STATE) {
        regs.save(reg, 0);
    }
}

/// AES-128 instance bound to its own register file.
///
/// Only one encryption may run against the register file at a time; see
/// [`KeyRegisters`].
#[derive(Debug)]
pub struct Aes128<R = KeyStore> {
    regs: R,
}

impl Aes128<KeyStore> {
    /// Creates an instance backed by a fresh in-memory [`KeyStore`].
    pub fn new(key: &Aes128Key) -> Self {
        Self::with_registers(KeyStore::new(), key)
    }
}

impl<R: KeyRegisters> Aes128<R> {
    /// Creates an instance over an existing register file and loads `key`.
    pub fn with_registers(regs: R, key: &Aes128Key) -> Self {
        set_key(&regs, key);
        Self { regs }
    }

    /// Replaces the loaded key.
    pub fn rekey(&self, key: &Aes128Key) {
        set_key(&self.regs, key);
    }

    /// Encrypts `block` in place.
    #[inline]
    pub fn encrypt_block(&self, block: &mut Block) {
        encrypt_block(&self.regs, block);
    }

    /// Encrypts `block` and returns the ciphertext.
    pub fn encrypt(&self, block: &Block) -> Block {
        let mut out = *block;
        self.encrypt_block(&mut out);
        out
    }

    /// Returns the underlying register file.
    pub fn registers(&self) -> &R {
        &self.regs
    }

    /// Zeroes every register, including the key words.
    pub fn wipe(&self) {
        self.regs.wipe();
    }
}
