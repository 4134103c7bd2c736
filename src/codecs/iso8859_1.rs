use crate::codec::{Codec, CodecEntry};
use crate::error::DecodeError;

/// The ISO-8859-1 (Latin-1) codec.
///
/// Every byte value is a valid character; code points map 1:1 onto the first
/// 256 Unicode code points.
pub static ISO_8859_1: Codec = Codec {
    name: "ISO-8859-1",
    aliases: &[
        "latin1",
        "latin-1",
        "iso8859-1",
        "iso_8859-1",
        "iso_8859_1",
        "l1",
        "cp819",
        "ibm819",
        "csisolatin1",
    ],
    is_unicode: false,
    max_char_len: 1,
    validate,
    decode_char_at,
    try_encode_char,
};

inventory::submit! { CodecEntry(&ISO_8859_1) }

fn validate(_bytes: &[u8]) -> Result<(), DecodeError> {
    Ok(())
}

fn decode_char_at(bytes: &[u8], offset: usize) -> Option<(char, usize)> {
    let b = *bytes.get(offset)?;
    Some((b as char, offset + 1))
}

fn try_encode_char(c: char, buf: &mut [u8]) -> Option<usize> {
    let cp = c as u32;
    if cp > 0xFF {
        return None;
    }
    buf[0] = cp as u8;
    Some(1)
}
