//! The `Text` argument trait.

use crate::charset::Charset;
use crate::translit;

/// Types usable as text arguments to string operations.
///
/// Needles, replacements, concatenated values and overwrite values all
/// accept anything implementing this trait. `encode_in` produces the bytes
/// of the text in the target charset, transliterating characters the charset
/// cannot represent, so a needle given as Unicode text, or as a
/// [`DynString`](crate::DynString) in a different charset, is unified with
/// the subject string before any byte-level work happens.
pub trait Text {
    /// Encodes this text into the given charset.
    fn encode_in(&self, charset: Charset) -> Vec<u8>;
}

impl<T: Text + ?Sized> Text for &T {
    #[inline]
    fn encode_in(&self, charset: Charset) -> Vec<u8> {
        (**self).encode_in(charset)
    }
}

impl Text for str {
    fn encode_in(&self, charset: Charset) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.len());
        translit::encode_lossy(charset.codec(), self.chars(), &mut out);
        out
    }
}

impl Text for String {
    #[inline]
    fn encode_in(&self, charset: Charset) -> Vec<u8> {
        self.as_str().encode_in(charset)
    }
}

impl Text for char {
    fn encode_in(&self, charset: Charset) -> Vec<u8> {
        let mut out = Vec::with_capacity(4);
        translit::encode_lossy(charset.codec(), std::iter::once(*self), &mut out);
        out
    }
}
