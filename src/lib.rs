//! Charset-tagged string values.
//!
//! This crate provides [`DynString`], an owned string whose bytes are tagged
//! with an explicit, registry-validated [`Charset`]. Every operation
//! (indexing, searching, casing, splitting, comparison) counts decoded
//! characters rather than bytes, so multi-byte text behaves the same in
//! UTF-8, UTF-16 or a legacy codepage. Mixing encodings is impossible to do
//! silently: needles and operands are converted into the subject's charset
//! before any byte-level work, and constructing a string from bytes that do
//! not decode under the declared charset is an error.
//!
//! # Example
//!
//! ```
//! use dynstr::DynString;
//!
//! let mut s = DynString::with_charset("Grüße", "latin1")?;
//! assert_eq!(s.char_len(), 5);
//! assert_eq!(s.len(), 5); // single-byte charset
//!
//! s.convert_to("utf8")?;
//! assert_eq!(s.char_len(), 5);
//! assert_eq!(s.len(), 7); // ü and ß now take two bytes each
//! assert_eq!(s.to_text(), "Grüße");
//! # Ok::<(), dynstr::InvalidCharsetError>(())
//! ```
//!
//! Conversion is lossy but never silent: a character the target charset
//! cannot represent is transliterated to a near equivalent, or to `?`.
//!
//! ```
//! use dynstr::DynString;
//!
//! let mut price = DynString::new("10€");
//! price.convert_to("latin1")?;
//! assert_eq!(price.to_text(), "10EUR");
//! # Ok::<(), dynstr::InvalidCharsetError>(())
//! ```

#![deny(missing_docs)]

/// The `Charset` identifier type.
pub mod charset;
/// Runtime codec descriptors.
pub mod codec;
/// Codec implementations for the supported encodings.
pub mod codecs;
/// Error types for charset and string operations.
pub mod error;
/// Printf-style positional formatting.
pub mod format;
/// Iterator types for charset-tagged strings.
pub mod iter;
/// The charset registry.
pub mod registry;
/// The `DynString` owned string type.
pub mod string;
/// The `Text` argument trait.
pub mod text;

mod translit;

// Re-export main types
pub use charset::{Charset, IntoCharset};
pub use codec::{Codec, CodecEntry, MAX_CHAR_LEN};
pub use error::{
    DecodeError, EncodingMismatchError, FormatError, IndexOutOfRangeError, InvalidCharsetError,
    UnsupportedOperationError,
};
pub use format::FormatArg;
pub use iter::{Bytes, CharSlices, Chars};
pub use registry::CharsetRegistry;
pub use string::DynString;
pub use text::Text;
