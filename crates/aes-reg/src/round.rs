//! AES round transformations over little-endian column words.
//!
//! A column word holds rows 0..3 of one state column in bytes 0..3. All
//! operations are branch-free with respect to state and key bytes; the only
//! memory lookup is the S-box.

use crate::regs::{KeyRegisters, Reg};
use crate::sbox::sbox;

/// Round constant of the final round.
pub(crate) const LAST_RCON: u8 = 0x36;

/// Extracts byte lane `src` of `word` and places it at lane `dst`.
#[inline]
fn lane(word: u32, src: u32, dst: u32) -> u32 {
    ((word >> (src * 8)) & 0xff) << (dst * 8)
}

/// Extracts byte lane `src`, substitutes it, and places it at lane `dst`.
#[inline]
fn sub_lane(word: u32, src: u32, dst: u32) -> u32 {
    u32::from(sbox((word >> (src * 8)) as u8)) << (dst * 8)
}

/// Doubles every byte lane in GF(2^8) at once.
#[inline]
pub fn xtime32(word: u32) -> u32 {
    ((word << 1) & 0xfefe_fefe) ^ (((word >> 7) & 0x0101_0101) * 0x1b)
}

/// Doubles a single byte in GF(2^8).
#[inline]
pub(crate) fn xtime(byte: u8) -> u8 {
    (byte << 1) ^ ((byte >> 7) * 0x1b)
}

/// MixColumns on one column word.
#[inline]
pub fn mix_column(col: u32) -> u32 {
    let r8 = col.rotate_right(8);
    xtime32(col ^ r8) ^ r8 ^ col.rotate_right(16) ^ col.rotate_right(24)
}

/// Fused SubBytes and ShiftRows.
///
/// Row `r` of the output column `c` is the substituted byte of row `r` in
/// input column `c + r mod 4`.
#[inline]
pub fn sub_shift(cols: [u32; 4]) -> [u32; 4] {
    let [c0, c1, c2, c3] = cols;

    // Substituted rows, already rotated left by their row index.
    let r0 = sub_lane(c0, 0, 0) | sub_lane(c1, 0, 1) | sub_lane(c2, 0, 2) | sub_lane(c3, 0, 3);
    let r1 = sub_lane(c1, 1, 0) | sub_lane(c2, 1, 1) | sub_lane(c3, 1, 2) | sub_lane(c0, 1, 3);
    let r2 = sub_lane(c2, 2, 0) | sub_lane(c3, 2, 1) | sub_lane(c0, 2, 2) | sub_lane(c1, 2, 3);
    let r3 = sub_lane(c3, 3, 0) | sub_lane(c0, 3, 1) | sub_lane(c1, 3, 2) | sub_lane(c2, 3, 3);

    [0, 1, 2, 3].map(|c| lane(r0, c, 0) | lane(r1, c, 1) | lane(r2, c, 2) | lane(r3, c, 3))
}

/// RotWord, SubWord and the round constant applied to the last round key word.
#[inline]
pub fn key_core(rk3: u32, rcon: u8) -> u32 {
    (sub_lane(rk3, 1, 0) ^ u32::from(rcon))
        | sub_lane(rk3, 2, 1)
        | sub_lane(rk3, 3, 2)
        | sub_lane(rk3, 0, 3)
}

/// Runs one full round against the register file.
///
/// Derives the next round key in place from the live one, transforms the
/// state and adds the new round key. MixColumns is skipped when `rcon` is the
/// final round constant.
pub(crate) fn do_round<R: KeyRegisters + ?Sized>(regs: &R, rcon: u8) {
    let rk3 = regs.load(Reg::Rk3);
    let mut word = key_core(rk3, rcon);

    let state = Reg::STATE.map(|reg| regs.load(reg));
    let mut cols = sub_shift(state);
    if rcon != LAST_RCON {
        cols = cols.map(mix_column);
    }

    for (i, col) in cols.into_iter().enumerate() {
        // Rk3 was read before the round started; the others are read lazily.
        let prev = if i == 3 { rk3 } else { regs.load(Reg::ROUND_KEY[i]) };
        word ^= prev;
        regs.save(Reg::ROUND_KEY[i], word);
        regs.save(Reg::STATE[i], col ^ word);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xtime32_doubles_each_lane() {
        assert_eq!(xtime32(0x8040_2010), 0x1b80_4020);
        assert_eq!(xtime32(0x0000_0057), 0x0000_00ae);
        assert_eq!(xtime32(0x0000_00ae), 0x0000_0047);
    }

    #[test]
    fn xtime_walks_rcon_sequence() {
        let mut rcon = 0x01u8;
        let mut seen = vec![rcon];
        while rcon != LAST_RCON {
            rcon = xtime(rcon);
            seen.push(rcon);
        }
        assert_eq!(seen, [0x01, 0x02, 0x04, 0x08, 0x10, 0x20, 0x40, 0x80, 0x1b, 0x36]);
    }

    #[test]
    fn mix_column_matches_fips_example() {
        // Column db 13 53 45 maps to 8e 4d a1 bc.
        let col = u32::from_le_bytes([0xdb, 0x13, 0x53, 0x45]);
        assert_eq!(mix_column(col).to_le_bytes(), [0x8e, 0x4d, 0xa1, 0xbc]);
        let col = u32::from_le_bytes([0xf2, 0x0a, 0x22, 0x5c]);
        assert_eq!(mix_column(col).to_le_bytes(), [0x9f, 0xdc, 0x58, 0x9d]);
    }

    #[test]
    fn sub_shift_moves_rows() {
        // With the identity-like input where each byte is its own position, the
        // output byte at (row r, col c) must be sbox(4 * ((c + r) % 4) + r).
        let cols = [0u32, 1, 2, 3].map(|c| {
            u32::from_le_bytes([4 * c as u8, 4 * c as u8 + 1, 4 * c as u8 + 2, 4 * c as u8 + 3])
        });
        let out = sub_shift(cols);
        for c in 0..4usize {
            let bytes = out[c].to_le_bytes();
            for r in 0..4usize {
                let src = (4 * ((c + r) % 4) + r) as u8;
                assert_eq!(bytes[r], sbox(src), "row {r} col {c}");
            }
        }
    }

    #[test]
    fn key_core_matches_first_fips_round_key() {
        // FIPS-197 A.1: w[3] = 09cf4f3c, temp after RotWord/SubWord/Rcon = 8b84eb01.
        let rk3 = u32::from_le_bytes([0x09, 0xcf, 0x4f, 0x3c]);
        assert_eq!(key_core(rk3, 0x01).to_le_bytes(), [0x8b, 0x84, 0xeb, 0x01]);
    }
}
