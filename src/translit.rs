//! Lossy transliteration support for charset conversion.
//!
//! When a character has no representation in a target charset, conversion
//! falls back to a nearest ASCII-ish equivalent from the fold table below,
//! and finally to the `?` substitution marker. A character is never dropped
//! without leaving a marker behind.

use crate::codec::{Codec, MAX_CHAR_LEN};

/// The substitution marker used when no fold applies.
pub(crate) const SUBSTITUTE: char = '?';

/// Nearest-equivalent folds, ordered by code point for binary search.
///
/// Covers the Latin-1 supplement plus the general-punctuation repertoire of
/// the supported codepages.
#[rustfmt::skip]
static FOLDS: &[(char, &str)] = &[
    ('\u{00A0}', " "),    // no-break space
    ('\u{00A1}', "!"),    // inverted exclamation mark
    ('\u{00A2}', "c"),    // cent sign
    ('\u{00A5}', "Y"),    // yen sign
    ('\u{00A6}', "|"),    // broken bar
    ('\u{00A9}', "(C)"),  // copyright sign
    ('\u{00AA}', "a"),    // feminine ordinal indicator
    ('\u{00AB}', "\""),   // left-pointing double angle quotation mark
    ('\u{00AD}', "-"),    // soft hyphen
    ('\u{00AE}', "(R)"),  // registered sign
    ('\u{00B1}', "+/-"),  // plus-minus sign
    ('\u{00B2}', "2"),    // superscript two
    ('\u{00B3}', "3"),    // superscript three
    ('\u{00B5}', "u"),    // micro sign
    ('\u{00B7}', "."),    // middle dot
    ('\u{00B9}', "1"),    // superscript one
    ('\u{00BA}', "o"),    // masculine ordinal indicator
    ('\u{00BB}', "\""),   // right-pointing double angle quotation mark
    ('\u{00BC}', "1/4"),  // vulgar fraction one quarter
    ('\u{00BD}', "1/2"),  // vulgar fraction one half
    ('\u{00BE}', "3/4"),  // vulgar fraction three quarters
    ('\u{00BF}', "?"),    // inverted question mark
    ('\u{00C0}', "A"), ('\u{00C1}', "A"), ('\u{00C2}', "A"), ('\u{00C3}', "A"),
    ('\u{00C4}', "A"), ('\u{00C5}', "A"),
    ('\u{00C6}', "AE"),
    ('\u{00C7}', "C"),
    ('\u{00C8}', "E"), ('\u{00C9}', "E"), ('\u{00CA}', "E"), ('\u{00CB}', "E"),
    ('\u{00CC}', "I"), ('\u{00CD}', "I"), ('\u{00CE}', "I"), ('\u{00CF}', "I"),
    ('\u{00D0}', "D"),
    ('\u{00D1}', "N"),
    ('\u{00D2}', "O"), ('\u{00D3}', "O"), ('\u{00D4}', "O"), ('\u{00D5}', "O"),
    ('\u{00D6}', "O"),
    ('\u{00D7}', "x"),
    ('\u{00D8}', "O"),
    ('\u{00D9}', "U"), ('\u{00DA}', "U"), ('\u{00DB}', "U"), ('\u{00DC}', "U"),
    ('\u{00DD}', "Y"),
    ('\u{00DE}', "TH"),
    ('\u{00DF}', "ss"),
    ('\u{00E0}', "a"), ('\u{00E1}', "a"), ('\u{00E2}', "a"), ('\u{00E3}', "a"),
    ('\u{00E4}', "a"), ('\u{00E5}', "a"),
    ('\u{00E6}', "ae"),
    ('\u{00E7}', "c"),
    ('\u{00E8}', "e"), ('\u{00E9}', "e"), ('\u{00EA}', "e"), ('\u{00EB}', "e"),
    ('\u{00EC}', "i"), ('\u{00ED}', "i"), ('\u{00EE}', "i"), ('\u{00EF}', "i"),
    ('\u{00F0}', "d"),
    ('\u{00F1}', "n"),
    ('\u{00F2}', "o"), ('\u{00F3}', "o"), ('\u{00F4}', "o"), ('\u{00F5}', "o"),
    ('\u{00F6}', "o"),
    ('\u{00F7}', "/"),
    ('\u{00F8}', "o"),
    ('\u{00F9}', "u"), ('\u{00FA}', "u"), ('\u{00FB}', "u"), ('\u{00FC}', "u"),
    ('\u{00FD}', "y"),
    ('\u{00FE}', "th"),
    ('\u{00FF}', "y"),
    ('\u{0152}', "OE"),   // latin capital ligature oe
    ('\u{0153}', "oe"),   // latin small ligature oe
    ('\u{0160}', "S"),    // latin capital letter s with caron
    ('\u{0161}', "s"),    // latin small letter s with caron
    ('\u{0178}', "Y"),    // latin capital letter y with diaeresis
    ('\u{017D}', "Z"),    // latin capital letter z with caron
    ('\u{017E}', "z"),    // latin small letter z with caron
    ('\u{0192}', "f"),    // latin small letter f with hook
    ('\u{02C6}', "^"),    // modifier letter circumflex accent
    ('\u{02DC}', "~"),    // small tilde
    ('\u{2013}', "-"),    // en dash
    ('\u{2014}', "-"),    // em dash
    ('\u{2018}', "'"),    // left single quotation mark
    ('\u{2019}', "'"),    // right single quotation mark
    ('\u{201A}', "'"),    // single low-9 quotation mark
    ('\u{201C}', "\""),   // left double quotation mark
    ('\u{201D}', "\""),   // right double quotation mark
    ('\u{201E}', "\""),   // double low-9 quotation mark
    ('\u{2020}', "+"),    // dagger
    ('\u{2021}', "++"),   // double dagger
    ('\u{2022}', "*"),    // bullet
    ('\u{2026}', "..."),  // horizontal ellipsis
    ('\u{2030}', "0/00"), // per mille sign
    ('\u{2039}', "<"),    // single left-pointing angle quotation mark
    ('\u{203A}', ">"),    // single right-pointing angle quotation mark
    ('\u{20AC}', "EUR"),  // euro sign
    ('\u{2122}', "(TM)"), // trade mark sign
];

/// Looks up the nearest-equivalent fold for a character.
pub(crate) fn fold(c: char) -> Option<&'static str> {
    FOLDS
        .binary_search_by_key(&c, |&(key, _)| key)
        .ok()
        .map(|index| FOLDS[index].1)
}

/// Encodes characters into `out` under the given codec, transliterating
/// characters outside the codec's repertoire.
pub(crate) fn encode_lossy(codec: &Codec, chars: impl IntoIterator<Item = char>, out: &mut Vec<u8>) {
    let mut buf = [0u8; MAX_CHAR_LEN];
    for c in chars {
        if let Some(written) = (codec.try_encode_char)(c, &mut buf) {
            out.extend_from_slice(&buf[..written]);
            continue;
        }
        match fold(c) {
            Some(replacement) => {
                for rc in replacement.chars() {
                    match (codec.try_encode_char)(rc, &mut buf) {
                        Some(written) => out.extend_from_slice(&buf[..written]),
                        None => push_substitute(codec, &mut buf, out),
                    }
                }
            }
            None => push_substitute(codec, &mut buf, out),
        }
    }
}

fn push_substitute(codec: &Codec, buf: &mut [u8; MAX_CHAR_LEN], out: &mut Vec<u8>) {
    // Every supported codec can represent the marker.
    if let Some(written) = (codec.try_encode_char)(SUBSTITUTE, buf) {
        out.extend_from_slice(&buf[..written]);
    }
}
