use crate::codec::{Codec, CodecEntry};
use crate::error::DecodeError;

// Surrogate range constants
const SURROGATE_HIGH_START: u16 = 0xD800;
const SURROGATE_HIGH_END: u16 = 0xDBFF;
const SURROGATE_LOW_START: u16 = 0xDC00;
const SURROGATE_LOW_END: u16 = 0xDFFF;

/// The UTF-16 little-endian codec.
pub static UTF_16LE: Codec = Codec {
    name: "UTF-16LE",
    aliases: &["utf16le", "ucs-2le", "csutf16le"],
    is_unicode: true,
    max_char_len: 4,
    validate: validate_le,
    decode_char_at: decode_char_at_le,
    try_encode_char: try_encode_char_le,
};

/// The UTF-16 big-endian codec.
pub static UTF_16BE: Codec = Codec {
    name: "UTF-16BE",
    aliases: &["utf16be", "ucs-2be", "csutf16be"],
    is_unicode: true,
    max_char_len: 4,
    validate: validate_be,
    decode_char_at: decode_char_at_be,
    try_encode_char: try_encode_char_be,
};

inventory::submit! { CodecEntry(&UTF_16LE) }
inventory::submit! { CodecEntry(&UTF_16BE) }

#[inline]
fn is_high_surrogate(unit: u16) -> bool {
    (SURROGATE_HIGH_START..=SURROGATE_HIGH_END).contains(&unit)
}

#[inline]
fn is_low_surrogate(unit: u16) -> bool {
    (SURROGATE_LOW_START..=SURROGATE_LOW_END).contains(&unit)
}

fn read_unit(bytes: &[u8], offset: usize, big_endian: bool) -> Option<u16> {
    let pair = bytes.get(offset..offset + 2)?;
    let unit = if big_endian {
        u16::from_be_bytes([pair[0], pair[1]])
    } else {
        u16::from_le_bytes([pair[0], pair[1]])
    };
    Some(unit)
}

fn validate(bytes: &[u8], big_endian: bool) -> Result<(), DecodeError> {
    // Must have an even number of bytes.
    if bytes.len() % 2 != 0 {
        return Err(DecodeError::new(bytes.len() - 1, None));
    }

    let mut offset = 0;
    while let Some(unit) = read_unit(bytes, offset, big_endian) {
        if is_high_surrogate(unit) {
            // High surrogate must be followed by a low surrogate.
            match read_unit(bytes, offset + 2, big_endian) {
                None => return Err(DecodeError::new(offset, None)),
                Some(low) if !is_low_surrogate(low) => {
                    return Err(DecodeError::new(offset, Some(2)));
                }
                Some(_) => offset += 4,
            }
        } else if is_low_surrogate(unit) {
            // Lone low surrogate is invalid.
            return Err(DecodeError::new(offset, Some(2)));
        } else {
            offset += 2;
        }
    }

    Ok(())
}

fn decode_char_at(bytes: &[u8], offset: usize, big_endian: bool) -> Option<(char, usize)> {
    let unit = read_unit(bytes, offset, big_endian)?;

    if is_high_surrogate(unit) {
        let low = read_unit(bytes, offset + 2, big_endian)?;
        if !is_low_surrogate(low) {
            return None;
        }
        let high = (unit - SURROGATE_HIGH_START) as u32;
        let low = (low - SURROGATE_LOW_START) as u32;
        let cp = 0x10000 + (high << 10) + low;
        let c = char::from_u32(cp)?;
        Some((c, offset + 4))
    } else if is_low_surrogate(unit) {
        None
    } else {
        let c = char::from_u32(unit as u32)?;
        Some((c, offset + 2))
    }
}

fn try_encode_char(c: char, buf: &mut [u8], big_endian: bool) -> Option<usize> {
    let mut units = [0u16; 2];
    let units = c.encode_utf16(&mut units);
    let mut written = 0;
    for unit in units.iter() {
        let pair = if big_endian {
            unit.to_be_bytes()
        } else {
            unit.to_le_bytes()
        };
        buf[written] = pair[0];
        buf[written + 1] = pair[1];
        written += 2;
    }
    Some(written)
}

fn validate_le(bytes: &[u8]) -> Result<(), DecodeError> {
    validate(bytes, false)
}

fn validate_be(bytes: &[u8]) -> Result<(), DecodeError> {
    validate(bytes, true)
}

fn decode_char_at_le(bytes: &[u8], offset: usize) -> Option<(char, usize)> {
    decode_char_at(bytes, offset, false)
}

fn decode_char_at_be(bytes: &[u8], offset: usize) -> Option<(char, usize)> {
    decode_char_at(bytes, offset, true)
}

fn try_encode_char_le(c: char, buf: &mut [u8]) -> Option<usize> {
    try_encode_char(c, buf, false)
}

fn try_encode_char_be(c: char, buf: &mut [u8]) -> Option<usize> {
    try_encode_char(c, buf, true)
}
