//! Runtime codec descriptors.
//!
//! A [`Codec`] bundles everything the rest of the crate needs to know about
//! one character encoding: its canonical name, the aliases it answers to, and
//! function pointers for validation, per-character decoding and fallible
//! per-character encoding. Each codec module submits one `CodecEntry` via
//! `inventory::submit!`; the registry collects them at first use.
//!
//! The string type never inspects encoded bytes itself; every boundary,
//! validity and repertoire question goes through this surface.

use crate::error::DecodeError;

/// The largest number of bytes any supported codec uses for one character.
pub const MAX_CHAR_LEN: usize = 4;

/// A runtime descriptor for one character encoding.
pub struct Codec {
    /// The canonical name of the encoding (e.g., "UTF-8").
    pub name: &'static str,
    /// Alternative names for the encoding (e.g., `&["utf8"]`).
    pub aliases: &'static [&'static str],
    /// Whether this encoding can represent all Unicode code points.
    pub is_unicode: bool,
    /// The maximum number of bytes a single character occupies.
    pub max_char_len: usize,
    /// Validates that a byte slice is entirely valid for this encoding.
    pub validate: fn(&[u8]) -> Result<(), DecodeError>,
    /// Decodes the character starting at the given byte offset.
    ///
    /// Returns `Some((char, next_offset))` where `next_offset` is the byte
    /// index immediately after the decoded character, or `None` if no valid
    /// character starts at `offset`.
    pub decode_char_at: fn(&[u8], usize) -> Option<(char, usize)>,
    /// Attempts to encode a character into the buffer (at least
    /// [`MAX_CHAR_LEN`] bytes). Returns the number of bytes written, or
    /// `None` if the character is outside this encoding's repertoire.
    pub try_encode_char: fn(char, &mut [u8]) -> Option<usize>,
}

impl Codec {
    /// Returns the canonical name of this codec.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns all names (canonical + aliases) for this codec.
    pub fn all_names(&self) -> impl Iterator<Item = &'static str> {
        std::iter::once(self.name).chain(self.aliases.iter().copied())
    }

    /// Checks if this codec matches the given name (case-insensitive).
    pub fn matches(&self, name: &str) -> bool {
        self.all_names().any(|n| n.eq_ignore_ascii_case(name))
    }

    /// Returns `true` if this codec can represent the given character.
    #[inline]
    pub fn can_encode(&self, c: char) -> bool {
        let mut buf = [0u8; MAX_CHAR_LEN];
        (self.try_encode_char)(c, &mut buf).is_some()
    }

    /// Decodes the entire byte slice to a sequence of characters.
    ///
    /// The slice must already have been validated for this codec.
    pub(crate) fn decode_all(&self, bytes: &[u8]) -> Vec<char> {
        let mut chars = Vec::new();
        let mut offset = 0;
        while let Some((c, next)) = (self.decode_char_at)(bytes, offset) {
            chars.push(c);
            offset = next;
        }
        debug_assert_eq!(offset, bytes.len(), "buffer violates codec validity");
        chars
    }
}

impl std::fmt::Debug for Codec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Codec")
            .field("name", &self.name)
            .field("aliases", &self.aliases)
            .field("is_unicode", &self.is_unicode)
            .finish_non_exhaustive()
    }
}

/// A registration handle for one codec.
///
/// Codec modules submit these via `inventory::submit!`; the registry iterates
/// the collected entries when it is first populated.
pub struct CodecEntry(
    /// The registered codec.
    pub &'static Codec,
);

inventory::collect!(CodecEntry);
