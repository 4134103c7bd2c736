use std::cell::OnceCell;
use std::cmp::Ordering;
use std::fmt;
use std::fmt::Write as _;
use std::hash::{Hash, Hasher};

use md5::Digest;

use crate::charset::{Charset, IntoCharset};
use crate::error::{
    EncodingMismatchError, FormatError, IndexOutOfRangeError, InvalidCharsetError,
    UnsupportedOperationError,
};
use crate::format::{vformat, FormatArg};
use crate::iter::{Bytes, CharSlices, Chars};
use crate::text::Text;
use crate::translit;

/// An owned string tagged with an explicit charset.
///
/// A `DynString` owns a byte buffer that is always a valid encoding of its
/// [`Charset`]: the pairing is checked at construction and re-established
/// after every conversion. All indexing is by *character*, never by byte:
/// index 0 is the first decoded character regardless of how many bytes it
/// occupies.
///
/// Character boundaries are computed lazily on the first character-indexed
/// operation and cached until the next mutation. The cache makes the type
/// `!Sync`; share snapshots across threads by cloning.
///
/// Most operations mutate in place and return `&mut Self` for chaining; the
/// exceptions, [`sub_string`](Self::sub_string) and
/// [`hash_code`](Self::hash_code), return a newly constructed value and
/// leave `self` untouched.
///
/// # Example
///
/// ```
/// use dynstr::DynString;
///
/// let mut greeting = DynString::new("Hällo Wörld");
/// assert_eq!(greeting.char_len(), 11);
/// assert!(greeting.len() > greeting.char_len()); // umlauts take two bytes in UTF-8
///
/// greeting.to_upper_case().replace("WÖRLD", "WELT");
/// assert_eq!(greeting.to_text(), "HÄLLO WELT");
/// ```
pub struct DynString {
    bytes: Vec<u8>,
    charset: Charset,
    boundaries: OnceCell<Box<[usize]>>,
}

impl DynString {
    // === Construction ===

    /// Creates a UTF-8 string from Unicode text.
    pub fn new(text: &str) -> Self {
        Self {
            bytes: text.as_bytes().to_vec(),
            charset: Charset::utf8(),
            boundaries: OnceCell::new(),
        }
    }

    /// Creates a string by encoding Unicode text into the given charset.
    ///
    /// Characters the charset cannot represent are transliterated, falling
    /// back to the `?` substitution marker.
    pub fn with_charset(
        text: &str,
        charset: impl IntoCharset,
    ) -> Result<Self, InvalidCharsetError> {
        let charset = charset.into_charset()?;
        Ok(Self {
            bytes: text.encode_in(charset),
            charset,
            boundaries: OnceCell::new(),
        })
    }

    /// Creates a string from raw bytes already encoded in the given charset.
    ///
    /// The bytes are validated against the charset; construction fails with
    /// [`EncodingMismatchError`] if they do not decode.
    pub fn from_bytes(bytes: Vec<u8>, charset: Charset) -> Result<Self, EncodingMismatchError> {
        charset.validate(&bytes)?;
        Ok(Self {
            bytes,
            charset,
            boundaries: OnceCell::new(),
        })
    }

    fn from_parts(bytes: Vec<u8>, charset: Charset) -> Self {
        Self {
            bytes,
            charset,
            boundaries: OnceCell::new(),
        }
    }

    // === Cache ===

    /// Character boundary offsets: `b[0] = 0`, `b[char_len()] = len()`, and
    /// character `i` occupies `bytes[b[i]..b[i + 1]]`.
    fn boundaries(&self) -> &[usize] {
        self.boundaries.get_or_init(|| {
            let codec = self.charset.codec();
            let mut boundaries = Vec::with_capacity(self.bytes.len() + 1);
            boundaries.push(0);
            let mut offset = 0;
            while let Some((_, next)) = (codec.decode_char_at)(&self.bytes, offset) {
                offset = next;
                boundaries.push(offset);
            }
            debug_assert_eq!(offset, self.bytes.len(), "buffer violates charset validity");
            boundaries.into_boxed_slice()
        })
    }

    fn invalidate(&mut self) {
        let _ = self.boundaries.take();
    }

    // === Queries ===

    /// Returns the charset of this string.
    #[inline]
    pub fn charset(&self) -> Charset {
        self.charset
    }

    /// Returns the length of this string in bytes.
    ///
    /// Always at least [`char_len`](Self::char_len); equal only when every
    /// character occupies a single byte.
    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns the length of this string in characters.
    #[inline]
    pub fn char_len(&self) -> usize {
        self.boundaries().len() - 1
    }

    /// Returns `true` if this string contains no characters.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Returns the raw encoded bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consumes the string, returning its raw encoded bytes.
    #[inline]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Decodes this string to Unicode text.
    pub fn to_text(&self) -> String {
        self.decode_span(0, self.bytes.len())
    }

    fn decode_span(&self, from: usize, to: usize) -> String {
        let codec = self.charset.codec();
        let mut text = String::with_capacity(to - from);
        let mut offset = from;
        while offset < to {
            match (codec.decode_char_at)(&self.bytes, offset) {
                Some((c, next)) => {
                    text.push(c);
                    offset = next;
                }
                None => break,
            }
        }
        text
    }

    // === Iteration ===

    /// Returns an iterator over the decoded characters.
    ///
    /// Every call starts an independent traversal from the beginning.
    pub fn chars(&self) -> Chars<'_> {
        Chars::new(self.char_slices(), self.charset.codec())
    }

    /// Returns an iterator over the character slices (the bytes of each
    /// decoded character, in original order).
    pub fn char_slices(&self) -> CharSlices<'_> {
        CharSlices::new(&self.bytes, self.boundaries())
    }

    /// Returns an iterator over the raw bytes.
    pub fn bytes(&self) -> Bytes<'_> {
        Bytes(self.bytes.iter().copied())
    }

    // === Indexed access ===

    /// Returns the character at the given index.
    ///
    /// Fails with [`IndexOutOfRangeError`] outside `[0, char_len())`; the
    /// string is left untouched by a failed call.
    pub fn char_at(&self, index: usize) -> Result<char, IndexOutOfRangeError> {
        let boundaries = self.boundaries();
        let char_len = boundaries.len() - 1;
        if index >= char_len {
            return Err(IndexOutOfRangeError::new(index, char_len));
        }
        let decoded =
            (self.charset.codec().decode_char_at)(&self.bytes, boundaries[index]).map(|(c, _)| c);
        debug_assert!(decoded.is_some(), "buffer violates charset validity");
        Ok(decoded.unwrap_or(char::REPLACEMENT_CHARACTER))
    }

    /// Returns the raw byte slice of the character at the given index.
    pub fn char_slice_at(&self, index: usize) -> Result<&[u8], IndexOutOfRangeError> {
        let boundaries = self.boundaries();
        let char_len = boundaries.len() - 1;
        if index >= char_len {
            return Err(IndexOutOfRangeError::new(index, char_len));
        }
        Ok(&self.bytes[boundaries[index]..boundaries[index + 1]])
    }

    /// Overwrites the character at the given index with the (possibly
    /// multi-character) converted value.
    ///
    /// The index is checked before anything is touched; a failed call leaves
    /// the string unchanged.
    pub fn set_char(
        &mut self,
        index: usize,
        value: impl Text,
    ) -> Result<&mut Self, IndexOutOfRangeError> {
        let (start, end) = {
            let boundaries = self.boundaries();
            let char_len = boundaries.len() - 1;
            if index >= char_len {
                return Err(IndexOutOfRangeError::new(index, char_len));
            }
            (boundaries[index], boundaries[index + 1])
        };
        let replacement = value.encode_in(self.charset);
        self.bytes.splice(start..end, replacement);
        self.invalidate();
        Ok(self)
    }

    /// Deleting characters is not supported; this always fails.
    pub fn delete_char(&mut self, _index: usize) -> Result<&mut Self, UnsupportedOperationError> {
        Err(UnsupportedOperationError::new("deleting characters"))
    }

    // === Search ===

    fn boundary_at(&self, offset: usize) -> bool {
        self.boundaries().binary_search(&offset).is_ok()
    }

    fn find_encoded_from(&self, needle: &[u8], from: usize) -> Option<usize> {
        if needle.is_empty() {
            return None;
        }
        let boundaries = self.boundaries();
        let char_len = boundaries.len() - 1;
        for index in from..char_len {
            let start = boundaries[index];
            let end = start + needle.len();
            if end > self.bytes.len() {
                break;
            }
            if self.bytes[start..end] == *needle && boundaries[index..].binary_search(&end).is_ok()
            {
                return Some(index);
            }
        }
        None
    }

    fn rfind_encoded_within(&self, needle: &[u8], limit: usize) -> Option<usize> {
        if needle.is_empty() {
            return None;
        }
        let boundaries = self.boundaries();
        let char_len = boundaries.len() - 1;
        let limit = limit.min(char_len);
        let window_end = boundaries[limit];
        for index in (0..limit).rev() {
            let start = boundaries[index];
            let end = start + needle.len();
            if end <= window_end
                && self.bytes[start..end] == *needle
                && boundaries[index..=limit].binary_search(&end).is_ok()
            {
                return Some(index);
            }
        }
        None
    }

    /// Returns the character index of the first occurrence of `needle`.
    ///
    /// `None` if the needle is absent, empty, or the string is empty.
    pub fn index_of(&self, needle: impl Text) -> Option<usize> {
        self.index_of_from(needle, 0)
    }

    /// Returns the first occurrence of `needle` at or after character index
    /// `from`.
    ///
    /// `None` if the needle is absent or `from` exceeds the string's length.
    pub fn index_of_from(&self, needle: impl Text, from: usize) -> Option<usize> {
        let encoded = needle.encode_in(self.charset);
        self.find_encoded_from(&encoded, from)
    }

    /// Returns the character index of the last occurrence of `needle`.
    pub fn last_index_of(&self, needle: impl Text) -> Option<usize> {
        let encoded = needle.encode_in(self.charset);
        self.rfind_encoded_within(&encoded, self.char_len())
    }

    /// Returns the rightmost occurrence of `needle` contained in the first
    /// `from + 1` characters (the search is inclusive of the character at
    /// `from`).
    pub fn last_index_of_from(&self, needle: impl Text, from: usize) -> Option<usize> {
        let encoded = needle.encode_in(self.charset);
        self.rfind_encoded_within(&encoded, from.saturating_add(1))
    }

    /// Returns the indices of all occurrences of `needle`, in ascending
    /// order.
    ///
    /// Matches are found by repeated search restarting one character after
    /// each hit, so overlapping occurrences are reported. An empty needle
    /// yields no matches.
    pub fn indexes_of(&self, needle: impl Text) -> Vec<usize> {
        let encoded = needle.encode_in(self.charset);
        let mut indexes = Vec::new();
        let mut offset = 0;
        while let Some(position) = self.find_encoded_from(&encoded, offset) {
            indexes.push(position);
            offset = position + 1;
        }
        indexes
    }

    /// Checks if the string starts with the given prefix.
    pub fn starts_with(&self, prefix: impl Text) -> bool {
        let encoded = prefix.encode_in(self.charset);
        self.bytes.starts_with(&encoded) && self.boundary_at(encoded.len())
    }

    /// Checks if the string ends with the given suffix.
    pub fn ends_with(&self, suffix: impl Text) -> bool {
        let encoded = suffix.encode_in(self.charset);
        self.bytes.ends_with(&encoded) && self.boundary_at(self.bytes.len() - encoded.len())
    }

    /// Checks if the string contains the given needle.
    pub fn contains(&self, needle: impl Text) -> bool {
        self.index_of(needle).is_some()
    }

    /// Checks if the string contains any of the given needles.
    ///
    /// Vacuously `true` for an empty needle set.
    pub fn contains_any<N: Text>(&self, needles: &[N]) -> bool {
        if needles.is_empty() {
            return true;
        }
        needles.iter().any(|needle| self.contains(needle))
    }

    /// Checks if the string contains all of the given needles.
    ///
    /// Vacuously `true` for an empty needle set.
    pub fn contains_all<N: Text>(&self, needles: &[N]) -> bool {
        needles.iter().all(|needle| self.contains(needle))
    }

    // === Mutation ===

    /// Converts the string into the requested charset.
    ///
    /// Requesting the current charset is a no-op. Otherwise the buffer is
    /// re-encoded with lossy transliteration: characters without a
    /// representation in the target charset become a nearest equivalent or
    /// the `?` marker, never silently disappearing.
    pub fn convert_to(
        &mut self,
        charset: impl IntoCharset,
    ) -> Result<&mut Self, InvalidCharsetError> {
        let target = charset.into_charset()?;
        if target == self.charset {
            return Ok(self);
        }
        tracing::trace!(
            from = self.charset.name(),
            to = target.name(),
            "converting string charset"
        );
        let chars = self.charset.codec().decode_all(&self.bytes);
        let mut converted = Vec::with_capacity(chars.len());
        translit::encode_lossy(target.codec(), chars, &mut converted);
        debug_assert!(target.validate(&converted).is_ok());
        self.bytes = converted;
        self.charset = target;
        self.invalidate();
        Ok(self)
    }

    /// Removes one leading occurrence of `prefix`, if present.
    pub fn remove_prefix(&mut self, prefix: impl Text) -> &mut Self {
        let encoded = prefix.encode_in(self.charset);
        if !encoded.is_empty() && self.bytes.starts_with(&encoded) && self.boundary_at(encoded.len())
        {
            self.bytes.drain(..encoded.len());
            self.invalidate();
        }
        self
    }

    /// Removes one trailing occurrence of `suffix`, if present.
    pub fn remove_suffix(&mut self, suffix: impl Text) -> &mut Self {
        let encoded = suffix.encode_in(self.charset);
        if !encoded.is_empty()
            && self.bytes.ends_with(&encoded)
            && self.boundary_at(self.bytes.len() - encoded.len())
        {
            self.bytes.truncate(self.bytes.len() - encoded.len());
            self.invalidate();
        }
        self
    }

    /// Replaces all occurrences of `search` by `replacement`.
    pub fn replace(&mut self, search: impl Text, replacement: impl Text) -> &mut Self {
        let pair = [(
            search.encode_in(self.charset),
            replacement.encode_in(self.charset),
        )];
        self.apply_replacements(&pair)
    }

    /// Replaces all occurrences of every needle in `searches` by the same
    /// `replacement`.
    pub fn replace_any<S: Text>(&mut self, searches: &[S], replacement: impl Text) -> &mut Self {
        let replacement = replacement.encode_in(self.charset);
        let pairs: Vec<_> = searches
            .iter()
            .map(|search| (search.encode_in(self.charset), replacement.clone()))
            .collect();
        self.apply_replacements(&pairs)
    }

    /// Applies a search → replacement mapping.
    ///
    /// All pairs are applied in **one simultaneous pass**: at every character
    /// position the first matching needle (in pair order) wins, and
    /// substituted text is never re-scanned. A swapping mapping therefore
    /// behaves as a genuine swap:
    ///
    /// ```
    /// use dynstr::DynString;
    ///
    /// let mut s = DynString::new("ab");
    /// s.replace_pairs(&[("a", "b"), ("b", "a")]);
    /// assert_eq!(s.to_text(), "ba");
    /// ```
    pub fn replace_pairs<S: Text, R: Text>(&mut self, pairs: &[(S, R)]) -> &mut Self {
        let encoded: Vec<_> = pairs
            .iter()
            .map(|(search, replacement)| {
                (
                    search.encode_in(self.charset),
                    replacement.encode_in(self.charset),
                )
            })
            .collect();
        self.apply_replacements(&encoded)
    }

    fn apply_replacements(&mut self, pairs: &[(Vec<u8>, Vec<u8>)]) -> &mut Self {
        if pairs.iter().all(|(search, _)| search.is_empty()) {
            return self;
        }

        let mut out = Vec::with_capacity(self.bytes.len());
        let mut changed = false;
        {
            let boundaries = self.boundaries();
            let char_len = boundaries.len() - 1;
            let mut index = 0;
            'chars: while index < char_len {
                let start = boundaries[index];
                for (search, replacement) in pairs {
                    if search.is_empty() {
                        continue;
                    }
                    let end = start + search.len();
                    if end > self.bytes.len() || self.bytes[start..end] != *search {
                        continue;
                    }
                    if let Ok(matched_chars) = boundaries[index..].binary_search(&end) {
                        out.extend_from_slice(replacement);
                        index += matched_chars;
                        changed = true;
                        continue 'chars;
                    }
                }
                out.extend_from_slice(&self.bytes[start..boundaries[index + 1]]);
                index += 1;
            }
        }

        if changed {
            self.bytes = out;
            self.invalidate();
        }
        self
    }

    /// Converts all characters to upper case.
    ///
    /// Uses full Unicode case mapping per decoded character; expansions
    /// (e.g. `ß` → `SS`) are re-encoded into the charset like any other
    /// conversion.
    pub fn to_upper_case(&mut self) -> &mut Self {
        self.map_chars(|c, mapped| mapped.extend(c.to_uppercase()))
    }

    /// Converts all characters to lower case.
    pub fn to_lower_case(&mut self) -> &mut Self {
        self.map_chars(|c, mapped| mapped.extend(c.to_lowercase()))
    }

    fn map_chars(&mut self, map: impl Fn(char, &mut Vec<char>)) -> &mut Self {
        let codec = self.charset.codec();
        let chars = codec.decode_all(&self.bytes);
        let mut mapped = Vec::with_capacity(chars.len());
        for c in chars {
            map(c, &mut mapped);
        }
        let mut out = Vec::with_capacity(self.bytes.len());
        translit::encode_lossy(codec, mapped, &mut out);
        self.bytes = out;
        self.invalidate();
        self
    }

    /// Removes characters in `chars` (default: whitespace) from both ends.
    pub fn trim(&mut self, chars: Option<&str>) -> &mut Self {
        self.trim_ends(chars, true, true)
    }

    /// Removes characters in `chars` (default: whitespace) from the start.
    pub fn trim_left(&mut self, chars: Option<&str>) -> &mut Self {
        self.trim_ends(chars, true, false)
    }

    /// Removes characters in `chars` (default: whitespace) from the end.
    pub fn trim_right(&mut self, chars: Option<&str>) -> &mut Self {
        self.trim_ends(chars, false, true)
    }

    fn trim_ends(&mut self, chars: Option<&str>, left: bool, right: bool) -> &mut Self {
        let in_set = |c: char| match chars {
            Some(set) => set.contains(c),
            None => c.is_whitespace(),
        };
        let codec = self.charset.codec();
        let (start, end) = {
            let boundaries = self.boundaries();
            let char_len = boundaries.len() - 1;
            let mut first = 0;
            if left {
                while first < char_len {
                    match (codec.decode_char_at)(&self.bytes, boundaries[first]) {
                        Some((c, _)) if in_set(c) => first += 1,
                        _ => break,
                    }
                }
            }
            let mut last = char_len;
            if right {
                while last > first {
                    match (codec.decode_char_at)(&self.bytes, boundaries[last - 1]) {
                        Some((c, _)) if in_set(c) => last -= 1,
                        _ => break,
                    }
                }
            }
            (boundaries[first], boundaries[last])
        };
        if start > 0 || end < self.bytes.len() {
            self.bytes = self.bytes[start..end].to_vec();
            self.invalidate();
        }
        self
    }

    /// Reverses the order of the characters.
    ///
    /// Character slices are reassembled in reverse order; the bytes inside
    /// each character are never reordered.
    pub fn reverse(&mut self) -> &mut Self {
        let mut out = Vec::with_capacity(self.bytes.len());
        {
            let boundaries = self.boundaries();
            let char_len = boundaries.len() - 1;
            for index in (0..char_len).rev() {
                out.extend_from_slice(&self.bytes[boundaries[index]..boundaries[index + 1]]);
            }
        }
        self.bytes = out;
        self.invalidate();
        self
    }

    /// Appends `other`, converted to this string's charset.
    ///
    /// A zero-length `other` is a no-op.
    pub fn concat(&mut self, other: impl Text) -> &mut Self {
        let encoded = other.encode_in(self.charset);
        if encoded.is_empty() {
            return self;
        }
        self.bytes.extend_from_slice(&encoded);
        self.invalidate();
        self
    }

    // === Extraction ===

    /// Returns a new string holding the requested character range.
    ///
    /// Extraction starts at character `start` and takes `length` characters;
    /// a missing `length` extends to the end of the string, and a `length`
    /// exceeding the remaining characters is clamped. `self` is not
    /// modified.
    pub fn sub_string(&self, start: usize, length: Option<usize>) -> DynString {
        let boundaries = self.boundaries();
        let char_len = boundaries.len() - 1;
        let first = start.min(char_len);
        let last = match length {
            Some(length) => first.saturating_add(length).min(char_len),
            None => char_len,
        };
        Self::from_parts(
            self.bytes[boundaries[first]..boundaries[last]].to_vec(),
            self.charset,
        )
    }

    /// Splits the string on every occurrence of `delimiter`.
    ///
    /// With a `limit`, at most `limit` parts are produced and the final part
    /// carries the remainder of the string, further delimiters included.
    /// Parts are returned as decoded Unicode text.
    pub fn split(&self, delimiter: impl Text, limit: Option<usize>) -> Vec<String> {
        let encoded = delimiter.encode_in(self.charset);
        if encoded.is_empty() {
            return vec![self.to_text()];
        }
        let boundaries = self.boundaries();
        let char_len = boundaries.len() - 1;
        let max_parts = limit.unwrap_or(usize::MAX).max(1);

        let mut parts = Vec::new();
        let mut part_start = 0;
        let mut index = 0;
        while index < char_len && parts.len() + 1 < max_parts {
            let start = boundaries[index];
            let end = start + encoded.len();
            if end <= self.bytes.len() && self.bytes[start..end] == *encoded {
                if let Ok(matched_chars) = boundaries[index..].binary_search(&end) {
                    parts.push(self.decode_span(boundaries[part_start], start));
                    index += matched_chars;
                    part_start = index;
                    continue;
                }
            }
            index += 1;
        }
        parts.push(self.decode_span(boundaries[part_start], self.bytes.len()));
        parts
    }

    // === Comparison ===

    /// Checks for exact equality after converting `other` to this string's
    /// charset.
    pub fn equals(&self, other: impl Text) -> bool {
        self.bytes == other.encode_in(self.charset)
    }

    /// Byte-lexicographic comparison after converting `other` to this
    /// string's charset.
    pub fn compare_to(&self, other: impl Text) -> Ordering {
        self.bytes.as_slice().cmp(other.encode_in(self.charset).as_slice())
    }

    // === Digest & formatting ===

    /// Computes a digest over the raw bytes with the named algorithm.
    ///
    /// Supported algorithms: `"md5"`, `"sha1"`, `"sha256"`. The result is a
    /// **new** UTF-8 string holding the lowercase hex digest; `self` is not
    /// modified. An unknown algorithm name fails with
    /// [`UnsupportedOperationError`].
    pub fn hash_code(&self, algorithm: &str) -> Result<DynString, UnsupportedOperationError> {
        let hex = match algorithm.to_ascii_lowercase().as_str() {
            "md5" => hex_digest::<md5::Md5>(&self.bytes),
            "sha1" | "sha-1" => hex_digest::<sha1::Sha1>(&self.bytes),
            "sha256" | "sha-256" => hex_digest::<sha2::Sha256>(&self.bytes),
            _ => {
                return Err(UnsupportedOperationError::new(format!(
                    "digest algorithm \"{algorithm}\""
                )))
            }
        };
        Ok(DynString::new(&hex))
    }

    /// Renders a printf-style template into a new string.
    ///
    /// See [`FormatArg`] for accepted argument types. Fails with
    /// [`FormatError`] if the template consumes more arguments than `args`
    /// provides. The result uses `charset`, defaulting to UTF-8.
    pub fn format(
        template: &str,
        args: &[FormatArg],
        charset: Option<Charset>,
    ) -> Result<DynString, FormatError> {
        let rendered = vformat(template, args)?;
        let charset = charset.unwrap_or_default();
        let mut bytes = Vec::with_capacity(rendered.len());
        translit::encode_lossy(charset.codec(), rendered.chars(), &mut bytes);
        Ok(Self::from_parts(bytes, charset))
    }
}

fn hex_digest<D: Digest>(bytes: &[u8]) -> String {
    let digest = D::digest(bytes);
    let digest = digest.as_slice();
    let mut hex = String::with_capacity(digest.len() * 2);
    for byte in digest {
        let _ = write!(hex, "{byte:02x}");
    }
    hex
}

// === Text coercion ===

impl Text for DynString {
    fn encode_in(&self, charset: Charset) -> Vec<u8> {
        if charset == self.charset {
            return self.bytes.clone();
        }
        let chars = self.charset.codec().decode_all(&self.bytes);
        let mut out = Vec::with_capacity(chars.len());
        translit::encode_lossy(charset.codec(), chars, &mut out);
        out
    }
}

// === Std trait implementations ===

impl Clone for DynString {
    fn clone(&self) -> Self {
        Self::from_parts(self.bytes.clone(), self.charset)
    }
}

impl Default for DynString {
    fn default() -> Self {
        Self::from_parts(Vec::new(), Charset::utf8())
    }
}

impl fmt::Display for DynString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.chars() {
            f.write_char(c)?;
        }
        Ok(())
    }
}

impl fmt::Debug for DynString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynString")
            .field("charset", &self.charset.name())
            .field("text", &self.to_text())
            .finish()
    }
}

impl From<&str> for DynString {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for DynString {
    fn from(text: String) -> Self {
        Self::from_parts(text.into_bytes(), Charset::utf8())
    }
}

impl FromIterator<char> for DynString {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        let text: String = iter.into_iter().collect();
        Self::from(text)
    }
}

/// Equality over the decoded character sequence, independent of charset.
///
/// Two strings holding the same text in different charsets compare equal.
impl PartialEq for DynString {
    fn eq(&self, other: &Self) -> bool {
        self.chars().eq(other.chars())
    }
}

impl Eq for DynString {}

impl PartialOrd for DynString {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Lexicographic order over the decoded character sequence.
impl Ord for DynString {
    fn cmp(&self, other: &Self) -> Ordering {
        self.chars().cmp(other.chars())
    }
}

impl Hash for DynString {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for c in self.chars() {
            state.write_u32(c as u32);
        }
        state.write_u8(0xFF);
    }
}

impl<'a> IntoIterator for &'a DynString {
    type Item = char;
    type IntoIter = Chars<'a>;

    fn into_iter(self) -> Chars<'a> {
        self.chars()
    }
}
