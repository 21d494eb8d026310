//! Demonstrates sealing a message byte by byte and opening it again.

use aes_reg::{Aes128, Aes128Key};
use eax_core::{open_in_place, Eax};

fn main() {
    // Fixed key and nonce for reproducibility in the example.
    let aes = Aes128::new(&Aes128Key::from(*b"demo key 16 byte"));
    let nonce = b"message 0001";
    let header = b"from: sensor-7";
    let message = b"temperature=21.5C";

    // Sender: push bytes through the session as they become available.
    let mut eax = Eax::new(&aes);
    eax.init(nonce);
    for &b in header {
        eax.auth_header(b).unwrap();
    }
    let mut sealed = Vec::with_capacity(message.len());
    for (pos, &b) in message.iter().enumerate() {
        let c = eax.encrypt(pos as u64, b).unwrap();
        eax.auth_ciphertext(c).unwrap();
        sealed.push(c);
    }
    let tag = eax.digest().unwrap();
    println!("ciphertext: {}", hex::encode(&sealed));
    println!("tag:        {}", hex::encode(tag.as_bytes()));

    // Receiver: verify first, then decrypt in place.
    open_in_place(&aes, nonce, header, &mut sealed, tag.as_bytes()).unwrap();
    assert_eq!(&sealed, message);

    println!("example succeeded; message authenticated and recovered");
}
