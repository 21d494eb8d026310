//! Authentication tags.

use core::fmt;

use subtle::ConstantTimeEq;

use crate::block::Block;
use crate::error::Error;

/// EAX authentication tag, one block wide.
#[derive(Clone, Copy)]
pub struct Tag<B: Block>(B);

impl<B: Block> Tag<B> {
    pub(crate) fn new(block: B) -> Self {
        Self(block)
    }

    /// Tag bytes.
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_ref()
    }

    /// Returns the tag as a block.
    pub fn into_inner(self) -> B {
        self.0
    }

    /// Compares the tag with `expected` in constant time.
    ///
    /// `expected` may be truncated to any length from one byte to a full
    /// block; only that many leading bytes are compared. The result does not
    /// reveal which bytes differed.
    pub fn verify(&self, expected: &[u8]) -> Result<(), Error> {
        if expected.is_empty() || expected.len() > B::SIZE {
            return Err(Error::InvalidTagLength { max: B::SIZE, actual: expected.len() });
        }
        let ours = &self.as_bytes()[..expected.len()];
        if bool::from(ours.ct_eq(expected)) {
            Ok(())
        } else {
            Err(Error::TagMismatch)
        }
    }
}

impl<B: Block> AsRef<[u8]> for Tag<B> {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl<B: Block> fmt::Debug for Tag<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Tag(")?;
        for byte in self.as_bytes() {
            write!(f, "{byte:02x}")?;
        }
        f.write_str(")")
    }
}
