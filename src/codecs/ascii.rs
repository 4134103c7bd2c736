use crate::codec::{Codec, CodecEntry};
use crate::error::DecodeError;

/// The US-ASCII codec.
///
/// Only byte values below 0x80 are valid.
pub static US_ASCII: Codec = Codec {
    name: "US-ASCII",
    aliases: &["ascii", "ansi_x3.4-1968", "iso-ir-6", "csascii", "646"],
    is_unicode: false,
    max_char_len: 1,
    validate,
    decode_char_at,
    try_encode_char,
};

inventory::submit! { CodecEntry(&US_ASCII) }

fn validate(bytes: &[u8]) -> Result<(), DecodeError> {
    match bytes.iter().position(|&b| b >= 0x80) {
        Some(index) => Err(DecodeError::new(index, Some(1))),
        None => Ok(()),
    }
}

fn decode_char_at(bytes: &[u8], offset: usize) -> Option<(char, usize)> {
    let b = *bytes.get(offset)?;
    if b >= 0x80 {
        return None;
    }
    Some((b as char, offset + 1))
}

fn try_encode_char(c: char, buf: &mut [u8]) -> Option<usize> {
    if !c.is_ascii() {
        return None;
    }
    buf[0] = c as u8;
    Some(1)
}
