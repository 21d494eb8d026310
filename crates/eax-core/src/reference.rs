//! Whole-buffer OMAC, CTR and EAX used as an oracle for the streaming code.

use crate::block::{xor_in_place, Block, Endian};
use crate::cipher::BlockCipher;
use crate::wide::{add_counter, gf_double};

pub(crate) fn omac<C: BlockCipher>(
    cipher: &C,
    endian: Endian,
    domain: u8,
    data: &[u8],
) -> C::Block {
    let size = C::Block::SIZE;

    let mut l2 = C::Block::default();
    cipher.encrypt_block(&mut l2);
    gf_double(&mut l2, endian);
    let mut l4 = l2;
    gf_double(&mut l4, endian);

    let mut msg = vec![0u8; size];
    msg[size - 1] = domain;
    msg.extend_from_slice(data);
    let tweak = if msg.len() % size == 0 {
        l2
    } else {
        msg.push(0x80);
        msg.resize(msg.len().div_ceil(size) * size, 0);
        l4
    };
    let last = msg.len() - size;
    for (m, t) in msg[last..].iter_mut().zip(tweak.as_ref()) {
        *m ^= t;
    }

    let mut mac = C::Block::default();
    for chunk in msg.chunks(size) {
        let mut block = C::Block::default();
        block.as_mut().copy_from_slice(chunk);
        xor_in_place(&mut mac, &block);
        cipher.encrypt_block(&mut mac);
    }
    mac
}

pub(crate) fn ctr<C: BlockCipher>(
    cipher: &C,
    endian: Endian,
    nonce: &C::Block,
    data: &[u8],
) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len());
    for (i, chunk) in data.chunks(C::Block::SIZE).enumerate() {
        let mut keystream = C::Block::default();
        add_counter(&mut keystream, nonce, i as u64, endian);
        cipher.encrypt_block(&mut keystream);
        out.extend(chunk.iter().zip(keystream.as_ref()).map(|(d, k)| d ^ k));
    }
    out
}

/// Returns `(ciphertext, tag)`.
pub(crate) fn seal<C: BlockCipher>(
    cipher: &C,
    endian: Endian,
    nonce: &[u8],
    header: &[u8],
    plaintext: &[u8],
) -> (Vec<u8>, C::Block) {
    let n = omac(cipher, endian, 0, nonce);
    let h = omac(cipher, endian, 1, header);
    let ct = ctr(cipher, endian, &n, plaintext);
    let c = omac(cipher, endian, 2, &ct);
    let mut tag = n;
    xor_in_place(&mut tag, &h);
    xor_in_place(&mut tag, &c);
    (ct, tag)
}
