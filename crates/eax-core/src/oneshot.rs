//! Whole-buffer wrappers around the streaming [`Eax`] session.

use crate::cipher::BlockCipher;
use crate::eax::Eax;
use crate::error::Error;
use crate::tag::Tag;

/// Encrypts `buf` in place and returns the tag over `nonce`, `header` and the
/// resulting ciphertext.
pub fn seal_in_place<C: BlockCipher>(
    cipher: &C,
    nonce: &[u8],
    header: &[u8],
    buf: &mut [u8],
) -> Result<Tag<C::Block>, Error> {
    let mut eax = Eax::with_nonce(cipher, nonce);
    for &byte in header {
        eax.auth_header(byte)?;
    }
    for (pos, byte) in (0u64..).zip(buf.iter_mut()) {
        *byte = eax.encrypt(pos, *byte)?;
        eax.auth_ciphertext(*byte)?;
    }
    eax.digest()
}

/// Verifies `tag` over `nonce`, `header` and the ciphertext in `buf`, then
/// decrypts `buf` in place.
///
/// Nothing is decrypted unless the tag matches; on error `buf` still holds
/// the ciphertext. `tag` may be truncated (see [`Tag::verify`]).
pub fn open_in_place<C: BlockCipher>(
    cipher: &C,
    nonce: &[u8],
    header: &[u8],
    buf: &mut [u8],
    tag: &[u8],
) -> Result<(), Error> {
    let mut eax = Eax::with_nonce(cipher, nonce);
    for &byte in header {
        eax.auth_header(byte)?;
    }
    for &byte in buf.iter() {
        eax.auth_ciphertext(byte)?;
    }
    eax.digest()?.verify(tag)?;

    for (pos, byte) in (0u64..).zip(buf.iter_mut()) {
        *byte = eax.decrypt(pos, *byte)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::Endian;
    use crate::reference;
    use crate::xtea::Xtea;
    use aes_reg::{Aes128, Aes128Key};
    use rand::{Rng, RngCore, SeedableRng};
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn seal_then_open_random_lengths() {
        let mut rng = ChaCha20Rng::from_seed([7u8; 32]);
        for _ in 0..16 {
            let mut key = [0u8; 16];
            rng.fill_bytes(&mut key);
            let aes = Aes128::new(&Aes128Key::from(key));

            let mut nonce = vec![0u8; rng.gen_range(0..20)];
            let mut header = vec![0u8; rng.gen_range(0..40)];
            let mut msg = vec![0u8; rng.gen_range(0..100)];
            rng.fill_bytes(&mut nonce);
            rng.fill_bytes(&mut header);
            rng.fill_bytes(&mut msg);

            let mut buf = msg.clone();
            let tag = seal_in_place(&aes, &nonce, &header, &mut buf).unwrap();
            let (ref_ct, ref_tag) = reference::seal(&aes, Endian::Big, &nonce, &header, &msg);
            assert_eq!(buf, ref_ct);
            assert_eq!(tag.into_inner(), ref_tag);

            open_in_place(&aes, &nonce, &header, &mut buf, tag.as_bytes()).unwrap();
            assert_eq!(buf, msg);
        }
    }

    #[test]
    fn open_rejects_tampering_and_leaves_buffer() {
        let xtea = Xtea::new(&[3u8; 16]);
        let mut buf = *b"attack at dawn";
        let tag = seal_in_place(&xtea, b"nonce", b"hdr", &mut buf).unwrap();
        let sealed = buf;

        let mut flipped = sealed;
        flipped[4] ^= 1;
        let tampered = flipped;
        assert_eq!(
            open_in_place(&xtea, b"nonce", b"hdr", &mut flipped, tag.as_bytes()),
            Err(Error::TagMismatch)
        );
        assert_eq!(flipped, tampered);

        let mut buf = sealed;
        assert_eq!(
            open_in_place(&xtea, b"nonce", b"HDR", &mut buf, tag.as_bytes()),
            Err(Error::TagMismatch)
        );
        assert_eq!(
            open_in_place(&xtea, b"nonce", b"hdr", &mut buf, &[]),
            Err(Error::InvalidTagLength { max: 8, actual: 0 })
        );
        assert_eq!(buf, sealed);

        open_in_place(&xtea, b"nonce", b"hdr", &mut buf, &tag.as_bytes()[..4]).unwrap();
        assert_eq!(&buf, b"attack at dawn");
    }
}
