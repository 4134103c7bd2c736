use crate::codec::{Codec, CodecEntry};
use crate::error::DecodeError;

/// The UTF-8 codec.
///
/// Delegates validation to the standard library's UTF-8 machinery.
pub static UTF_8: Codec = Codec {
    name: "UTF-8",
    aliases: &["utf8", "unicode-1-1-utf-8", "csutf8"],
    is_unicode: true,
    max_char_len: 4,
    validate,
    decode_char_at,
    try_encode_char,
};

inventory::submit! { CodecEntry(&UTF_8) }

fn validate(bytes: &[u8]) -> Result<(), DecodeError> {
    match std::str::from_utf8(bytes) {
        Ok(_) => Ok(()),
        Err(e) => Err(DecodeError::new(e.valid_up_to(), e.error_len())),
    }
}

fn decode_char_at(bytes: &[u8], offset: usize) -> Option<(char, usize)> {
    let slice = bytes.get(offset..)?;

    // The first byte determines the sequence length.
    let first = slice.first()?;
    let len = match first {
        0x00..=0x7F => 1,
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF7 => 4,
        _ => return None, // Invalid start byte
    };

    let char_bytes = slice.get(..len)?;
    let s = std::str::from_utf8(char_bytes).ok()?;
    let c = s.chars().next()?;

    Some((c, offset + len))
}

fn try_encode_char(c: char, buf: &mut [u8]) -> Option<usize> {
    Some(c.encode_utf8(buf).len())
}
