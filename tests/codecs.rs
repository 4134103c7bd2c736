//! Tests for the codec implementations.

use dynstr::{Charset, DynString, MAX_CHAR_LEN};
use paste::paste;

// =============================================================================
// Per-codec basics
// =============================================================================

macro_rules! test_codec_basics {
    ($name:ident, $codec:expr) => {
        mod $name {
            #[test]
            fn name_is_not_empty() {
                assert!(!$codec.name().is_empty());
            }

            #[test]
            fn empty_bytes_are_valid() {
                assert!(($codec.validate)(&[]).is_ok());
            }

            #[test]
            fn ascii_letter_roundtrip() {
                let mut buf = [0u8; super::MAX_CHAR_LEN];
                let len = ($codec.try_encode_char)('A', &mut buf).unwrap();
                assert!(len > 0);
                let (decoded, next) = ($codec.decode_char_at)(&buf[..len], 0).unwrap();
                assert_eq!(decoded, 'A');
                assert_eq!(next, len);
            }

            #[test]
            fn encoded_letter_validates() {
                let mut buf = [0u8; super::MAX_CHAR_LEN];
                let len = ($codec.try_encode_char)('A', &mut buf).unwrap();
                assert!(($codec.validate)(&buf[..len]).is_ok());
            }

            #[test]
            fn matches_every_alias_case_insensitively() {
                for alias in $codec.aliases {
                    assert!($codec.matches(alias), "alias {} not matched", alias);
                    assert!($codec.matches(&alias.to_uppercase()));
                }
                assert!($codec.matches(&$codec.name().to_lowercase()));
            }

            #[test]
            fn does_not_match_other_names() {
                assert!(!$codec.matches("definitely-not-a-charset"));
            }
        }
    };
}

test_codec_basics!(utf8, dynstr::codecs::utf8::UTF_8);
test_codec_basics!(ascii, dynstr::codecs::ascii::US_ASCII);
test_codec_basics!(iso8859_1, dynstr::codecs::iso8859_1::ISO_8859_1);
#[cfg(feature = "utf16")]
test_codec_basics!(utf16le, dynstr::codecs::utf16::UTF_16LE);
#[cfg(feature = "utf16")]
test_codec_basics!(utf16be, dynstr::codecs::utf16::UTF_16BE);
#[cfg(feature = "codepages-windows")]
test_codec_basics!(windows1252, dynstr::codecs::windows1252::WINDOWS_1252);

// =============================================================================
// Text round-trips through DynString
// =============================================================================

macro_rules! test_text_roundtrip {
    ($($name:ident: $charset:expr => $text:expr;)+) => {
        paste! {
            $(
                #[test]
                fn [<roundtrip_ $name>]() {
                    let charset = Charset::new($charset).unwrap();
                    let s = DynString::with_charset($text, charset).unwrap();
                    assert_eq!(s.to_text(), $text);
                    assert_eq!(s.char_len(), $text.chars().count());

                    // Re-validating the produced bytes must succeed.
                    let rebuilt = DynString::from_bytes(s.as_bytes().to_vec(), charset).unwrap();
                    assert_eq!(rebuilt.to_text(), $text);
                }
            )+
        }
    };
}

test_text_roundtrip! {
    utf8_plain: "utf8" => "hello world";
    utf8_multibyte: "utf8" => "hällo wörld 世界 😀";
    ascii_plain: "ascii" => "plain ascii only";
    latin1_umlauts: "latin1" => "tääst öäü ß";
}

#[cfg(feature = "utf16")]
test_text_roundtrip! {
    utf16le_mixed: "utf-16le" => "hällo 世界 😀";
    utf16be_mixed: "utf-16be" => "hällo 世界 😀";
}

#[cfg(feature = "codepages-windows")]
test_text_roundtrip! {
    windows1252_punctuation: "cp1252" => "\u{201C}quoted\u{201D} – 10€";
}

// =============================================================================
// Codec-specific behavior
// =============================================================================

#[test]
fn utf8_rejects_latin1_umlaut_bytes() {
    let utf8 = Charset::new("utf8").unwrap();
    assert!(DynString::from_bytes(b"t\xE4st".to_vec(), utf8).is_err());
}

#[test]
fn latin1_accepts_every_byte_value() {
    let latin1 = Charset::new("latin1").unwrap();
    let all: Vec<u8> = (0u8..=255).collect();
    let s = DynString::from_bytes(all, latin1).unwrap();
    assert_eq!(s.char_len(), 256);
    assert_eq!(s.len(), 256);
}

#[test]
fn ascii_rejects_high_bytes() {
    let ascii = Charset::new("ascii").unwrap();
    assert!(DynString::from_bytes(vec![0x61, 0x80], ascii).is_err());
}

#[cfg(feature = "utf16")]
#[test]
fn utf16_uses_two_bytes_for_bmp_characters() {
    let s = DynString::with_charset("abc", "utf-16le").unwrap();
    assert_eq!(s.char_len(), 3);
    assert_eq!(s.len(), 6);
    assert_eq!(s.as_bytes(), &[0x61, 0x00, 0x62, 0x00, 0x63, 0x00]);
}

#[cfg(feature = "utf16")]
#[test]
fn utf16_rejects_lone_surrogates() {
    let utf16be = Charset::new("utf-16be").unwrap();
    assert!(DynString::from_bytes(vec![0xDC, 0x00], utf16be).is_err());
    assert!(DynString::from_bytes(vec![0xD8, 0x00, 0x00, 0x61], utf16be).is_err());
}

#[cfg(feature = "codepages-windows")]
#[test]
fn windows1252_encodes_euro_in_one_byte() {
    let s = DynString::with_charset("€", "cp1252").unwrap();
    assert_eq!(s.as_bytes(), &[0x80]);
    assert_eq!(s.to_text(), "€");
}
