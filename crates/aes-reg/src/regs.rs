//! Word-addressed register file holding key material and cipher state.
//!
//! The engine never keeps an expanded key schedule. It reads and writes a
//! small set of named 32-bit slots through [`KeyRegisters`], which may be
//! backed by ordinary memory ([`KeyStore`]) or by dedicated hardware
//! registers.

use core::cell::Cell;
use core::fmt;

use zeroize::Zeroize;

/// Number of register slots used by the engine.
pub const NREGS: usize = 12;

/// Named register slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Reg {
    /// Key word 0 (key bytes 0..4, little-endian).
    K0 = 0,
    /// Key word 1.
    K1,
    /// Key word 2.
    K2,
    /// Key word 3.
    K3,
    /// Live round key word 0.
    Rk0,
    /// Live round key word 1.
    Rk1,
    /// Live round key word 2.
    Rk2,
    /// Live round key word 3.
    Rk3,
    /// State column 0.
    S0,
    /// State column 1.
    S1,
    /// State column 2.
    S2,
    /// State column 3.
    S3,
}

impl Reg {
    /// Every slot, in index order.
    pub const ALL: [Reg; NREGS] = [
        Reg::K0,
        Reg::K1,
        Reg::K2,
        Reg::K3,
        Reg::Rk0,
        Reg::Rk1,
        Reg::Rk2,
        Reg::Rk3,
        Reg::S0,
        Reg::S1,
        Reg::S2,
        Reg::S3,
    ];

    /// Key words.
    pub const KEY: [Reg; 4] = [Reg::K0, Reg::K1, Reg::K2, Reg::K3];

    /// Round key words.
    pub const ROUND_KEY: [Reg; 4] = [Reg::Rk0, Reg::Rk1, Reg::Rk2, Reg::Rk3];

    /// State columns.
    pub const STATE: [Reg; 4] = [Reg::S0, Reg::S1, Reg::S2, Reg::S3];

    /// Slot index in `0..NREGS`.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Word-addressed store for AES key material and state.
///
/// # Single flight
///
/// At most one encryption may run against a given store at a time. The
/// engine performs a sequence of loads and saves per round and assumes no
/// other party touches the slots in between. Implementations provide no
/// locking; callers serialize access. [`KeyStore`] is `!Sync`, which makes
/// the rule a compile-time property for the in-memory store.
pub trait KeyRegisters {
    /// Reads the word held in `reg`.
    fn load(&self, reg: Reg) -> u32;

    /// Writes `word` into `reg`.
    fn save(&self, reg: Reg, word: u32);

    /// Overwrites every slot with zero.
    fn wipe(&self) {
        for reg in Reg::ALL {
            self.save(reg, 0);
        }
    }
}

impl<R: KeyRegisters + ?Sized> KeyRegisters for &R {
    #[inline]
    fn load(&self, reg: Reg) -> u32 {
        (**self).load(reg)
    }

    #[inline]
    fn save(&self, reg: Reg, word: u32) {
        (**self).save(reg, word)
    }

    fn wipe(&self) {
        (**self).wipe()
    }
}

/// In-memory register file.
///
/// Every word is zeroized when the store is dropped.
#[derive(Default)]
pub struct KeyStore {
    words: [Cell<u32>; NREGS],
}

impl KeyStore {
    /// Creates a zeroed store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if every slot holds zero.
    pub fn is_wiped(&self) -> bool {
        self.words.iter().all(|word| word.get() == 0)
    }
}

impl KeyRegisters for KeyStore {
    #[inline]
    fn load(&self, reg: Reg) -> u32 {
        self.words[reg.index()].get()
    }

    #[inline]
    fn save(&self, reg: Reg, word: u32) {
        self.words[reg.index()].set(word);
    }
}

impl fmt::Debug for KeyStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyStore").finish_non_exhaustive()
    }
}

impl Drop for KeyStore {
    fn drop(&mut self) {
        for word in self.words.iter_mut() {
            word.get_mut().zeroize();
        }
    }
}
