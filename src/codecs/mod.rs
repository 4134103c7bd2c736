//! Codec implementations for the supported encodings.
//!
//! Each module defines one (or two) `static` [`Codec`](crate::codec::Codec)
//! values and submits them to the registry. UTF-8, US-ASCII and ISO-8859-1
//! are always available; UTF-16 and Windows-1252 are feature-gated.

/// UTF-8 codec.
pub mod utf8;

/// US-ASCII codec.
pub mod ascii;

/// ISO-8859-1 (Latin-1) codec.
pub mod iso8859_1;

/// UTF-16 little- and big-endian codecs.
#[cfg(feature = "utf16")]
pub mod utf16;

/// Windows-1252 codepage codec.
#[cfg(feature = "codepages-windows")]
pub mod windows1252;
