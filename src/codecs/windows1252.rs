use crate::codec::{Codec, CodecEntry};
use crate::error::DecodeError;

/// The Windows-1252 codepage codec.
///
/// Bytes 0x00-0x7F and 0xA0-0xFF map like ISO-8859-1; the 0x80-0x9F range
/// carries the codepage's punctuation and letters. The five unassigned slots
/// decode to the corresponding C1 controls, matching the WHATWG encoding
/// index, so the codec stays total over all byte values.
pub static WINDOWS_1252: Codec = Codec {
    name: "Windows-1252",
    aliases: &["cp1252", "windows1252", "x-cp1252", "cswindows1252"],
    is_unicode: false,
    max_char_len: 1,
    validate,
    decode_char_at,
    try_encode_char,
};

inventory::submit! { CodecEntry(&WINDOWS_1252) }

/// Code points for bytes 0x80-0x9F.
const HIGH_TABLE: [char; 32] = [
    '\u{20AC}', // 0x80 EURO SIGN
    '\u{0081}', // 0x81 (unassigned, C1 passthrough)
    '\u{201A}', // 0x82 SINGLE LOW-9 QUOTATION MARK
    '\u{0192}', // 0x83 LATIN SMALL LETTER F WITH HOOK
    '\u{201E}', // 0x84 DOUBLE LOW-9 QUOTATION MARK
    '\u{2026}', // 0x85 HORIZONTAL ELLIPSIS
    '\u{2020}', // 0x86 DAGGER
    '\u{2021}', // 0x87 DOUBLE DAGGER
    '\u{02C6}', // 0x88 MODIFIER LETTER CIRCUMFLEX ACCENT
    '\u{2030}', // 0x89 PER MILLE SIGN
    '\u{0160}', // 0x8A LATIN CAPITAL LETTER S WITH CARON
    '\u{2039}', // 0x8B SINGLE LEFT-POINTING ANGLE QUOTATION MARK
    '\u{0152}', // 0x8C LATIN CAPITAL LIGATURE OE
    '\u{008D}', // 0x8D (unassigned, C1 passthrough)
    '\u{017D}', // 0x8E LATIN CAPITAL LETTER Z WITH CARON
    '\u{008F}', // 0x8F (unassigned, C1 passthrough)
    '\u{0090}', // 0x90 (unassigned, C1 passthrough)
    '\u{2018}', // 0x91 LEFT SINGLE QUOTATION MARK
    '\u{2019}', // 0x92 RIGHT SINGLE QUOTATION MARK
    '\u{201C}', // 0x93 LEFT DOUBLE QUOTATION MARK
    '\u{201D}', // 0x94 RIGHT DOUBLE QUOTATION MARK
    '\u{2022}', // 0x95 BULLET
    '\u{2013}', // 0x96 EN DASH
    '\u{2014}', // 0x97 EM DASH
    '\u{02DC}', // 0x98 SMALL TILDE
    '\u{2122}', // 0x99 TRADE MARK SIGN
    '\u{0161}', // 0x9A LATIN SMALL LETTER S WITH CARON
    '\u{203A}', // 0x9B SINGLE RIGHT-POINTING ANGLE QUOTATION MARK
    '\u{0153}', // 0x9C LATIN SMALL LIGATURE OE
    '\u{009D}', // 0x9D (unassigned, C1 passthrough)
    '\u{017E}', // 0x9E LATIN SMALL LETTER Z WITH CARON
    '\u{0178}', // 0x9F LATIN CAPITAL LETTER Y WITH DIAERESIS
];

fn validate(_bytes: &[u8]) -> Result<(), DecodeError> {
    Ok(())
}

fn decode_char_at(bytes: &[u8], offset: usize) -> Option<(char, usize)> {
    let b = *bytes.get(offset)?;
    let c = match b {
        0x80..=0x9F => HIGH_TABLE[(b - 0x80) as usize],
        _ => b as char,
    };
    Some((c, offset + 1))
}

fn try_encode_char(c: char, buf: &mut [u8]) -> Option<usize> {
    let cp = c as u32;
    let b = match cp {
        0x00..=0x7F | 0xA0..=0xFF => cp as u8,
        _ => {
            let index = HIGH_TABLE.iter().position(|&h| h == c)?;
            0x80 + index as u8
        }
    };
    buf[0] = b;
    Some(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn euro_sign_roundtrip() {
        let mut buf = [0u8; 1];
        assert_eq!(try_encode_char('€', &mut buf), Some(1));
        assert_eq!(buf[0], 0x80);
        assert_eq!(decode_char_at(&buf, 0), Some(('€', 1)));
    }

    #[test]
    fn latin1_range_passes_through() {
        let mut buf = [0u8; 1];
        assert_eq!(try_encode_char('ä', &mut buf), Some(1));
        assert_eq!(buf[0], 0xE4);
    }

    #[test]
    fn cjk_is_outside_repertoire() {
        let mut buf = [0u8; 1];
        assert_eq!(try_encode_char('中', &mut buf), None);
    }
}
