//! The `Charset` identifier type.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::codec::Codec;
use crate::error::{EncodingMismatchError, InvalidCharsetError};
use crate::registry::CharsetRegistry;

/// A validated, canonical encoding identifier.
///
/// A `Charset` is a cheap `Copy` handle to one of the registry's codecs. It
/// can only be constructed through alias resolution, so holding one proves
/// the encoding is supported. Charsets are immutable; two charsets are equal
/// iff their canonical names match.
///
/// # Example
///
/// ```
/// use dynstr::Charset;
///
/// let latin1 = Charset::new("latin1")?;
/// assert_eq!(latin1.name(), "ISO-8859-1");
/// assert!(latin1.equals("ISO-8859-1")?);
/// assert!(!latin1.equals("utf8")?);
/// # Ok::<(), dynstr::InvalidCharsetError>(())
/// ```
#[derive(Clone, Copy)]
pub struct Charset {
    codec: &'static Codec,
}

impl Charset {
    /// Resolves a canonical name or alias against the global registry.
    ///
    /// Fails if the name is not a recognized encoding or alias.
    pub fn new(name: &str) -> Result<Self, InvalidCharsetError> {
        Self::resolve_in(CharsetRegistry::global(), name)
    }

    /// Resolves a name against an explicitly provided registry.
    pub fn resolve_in(registry: &CharsetRegistry, name: &str) -> Result<Self, InvalidCharsetError> {
        Ok(Self {
            codec: registry.resolve(name)?,
        })
    }

    /// Returns the UTF-8 charset, the crate-wide default.
    #[inline]
    pub fn utf8() -> Self {
        Self {
            codec: &crate::codecs::utf8::UTF_8,
        }
    }

    /// Returns the canonical name of this charset.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.codec.name
    }

    /// Returns whether this charset can represent all Unicode code points.
    #[inline]
    pub fn is_unicode(&self) -> bool {
        self.codec.is_unicode
    }

    /// Returns the codec backing this charset.
    #[inline]
    pub(crate) fn codec(&self) -> &'static Codec {
        self.codec
    }

    /// Compares this charset against another charset or name.
    ///
    /// The comparand is coerced to canonical form first; an unresolvable
    /// name fails with [`InvalidCharsetError`] rather than comparing unequal.
    pub fn equals(&self, other: impl IntoCharset) -> Result<bool, InvalidCharsetError> {
        Ok(*self == other.into_charset()?)
    }

    /// Asserts that a byte sequence is valid for this charset.
    ///
    /// This is a validity check only: it proves the bytes decode under this
    /// charset, not that they were originally produced in it.
    pub fn validate(&self, bytes: &[u8]) -> Result<(), EncodingMismatchError> {
        (self.codec.validate)(bytes)
            .map_err(|error| EncodingMismatchError::new(self.codec.name, error))
    }
}

impl Default for Charset {
    fn default() -> Self {
        Self::utf8()
    }
}

impl PartialEq for Charset {
    fn eq(&self, other: &Self) -> bool {
        self.codec.name == other.codec.name
    }
}

impl Eq for Charset {}

impl Hash for Charset {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.codec.name.hash(state);
    }
}

impl fmt::Debug for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Charset").field(&self.codec.name).finish()
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.codec.name)
    }
}

/// Conversion into a [`Charset`], resolving names through the registry.
///
/// Implemented for `Charset` itself (infallible) and for string types
/// (resolved against the global registry, failing on unknown names). This is
/// what lets operations accept either a charset value or an alias string.
pub trait IntoCharset {
    /// Coerces `self` into a canonical charset.
    fn into_charset(self) -> Result<Charset, InvalidCharsetError>;
}

impl IntoCharset for Charset {
    #[inline]
    fn into_charset(self) -> Result<Charset, InvalidCharsetError> {
        Ok(self)
    }
}

impl IntoCharset for &Charset {
    #[inline]
    fn into_charset(self) -> Result<Charset, InvalidCharsetError> {
        Ok(*self)
    }
}

impl IntoCharset for &str {
    fn into_charset(self) -> Result<Charset, InvalidCharsetError> {
        Charset::new(self)
    }
}

impl IntoCharset for &String {
    fn into_charset(self) -> Result<Charset, InvalidCharsetError> {
        Charset::new(self)
    }
}

impl IntoCharset for String {
    fn into_charset(self) -> Result<Charset, InvalidCharsetError> {
        Charset::new(&self)
    }
}
