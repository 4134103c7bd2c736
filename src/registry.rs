//! The charset registry.
//!
//! A [`CharsetRegistry`] enumerates the codecs compiled into the crate and
//! resolves alias names (e.g. `"utf8"`, `"latin1"`) to their canonical
//! codecs. Registries are plain values and can be constructed wherever an
//! isolated view of the supported encodings is wanted; most callers use the
//! process-wide instance behind [`CharsetRegistry::global`], which is
//! populated exactly once and read-only afterwards.
//!
//! # Example
//!
//! ```
//! use dynstr::CharsetRegistry;
//!
//! let registry = CharsetRegistry::global();
//! assert!(registry.contains("UTF-8"));
//! assert_eq!(registry.resolve("latin1").unwrap().name(), "ISO-8859-1");
//! assert!(registry.resolve("klingon").is_err());
//! ```

use std::sync::OnceLock;

use crate::codec::{Codec, CodecEntry};
use crate::error::InvalidCharsetError;

static GLOBAL: OnceLock<CharsetRegistry> = OnceLock::new();

/// A registry of the codecs available at runtime.
#[derive(Debug)]
pub struct CharsetRegistry {
    codecs: Vec<&'static Codec>,
}

impl CharsetRegistry {
    /// Builds a registry from every codec compiled into the crate.
    pub fn new() -> Self {
        let mut codecs: Vec<&'static Codec> = inventory::iter::<CodecEntry>()
            .map(|entry| entry.0)
            .collect();
        codecs.sort_by_key(|codec| codec.name);
        tracing::debug!(codecs = codecs.len(), "charset registry populated");
        Self { codecs }
    }

    /// Returns the shared process-wide registry.
    ///
    /// The registry is populated on first call and never mutated afterwards.
    pub fn global() -> &'static CharsetRegistry {
        GLOBAL.get_or_init(CharsetRegistry::new)
    }

    /// Returns an iterator over the canonical names of all supported charsets.
    pub fn supported(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.codecs.iter().map(|codec| codec.name)
    }

    /// Returns an iterator over all registered codecs.
    pub fn codecs(&self) -> impl Iterator<Item = &'static Codec> + '_ {
        self.codecs.iter().copied()
    }

    /// Checks whether a name resolves to a supported charset (case-insensitive).
    pub fn contains(&self, name: &str) -> bool {
        self.codecs.iter().any(|codec| codec.matches(name))
    }

    /// Resolves a canonical name or alias to its codec (case-insensitive).
    pub fn resolve(&self, name: &str) -> Result<&'static Codec, InvalidCharsetError> {
        self.codecs
            .iter()
            .copied()
            .find(|codec| codec.matches(name))
            .ok_or_else(|| InvalidCharsetError::new(name))
    }
}

impl Default for CharsetRegistry {
    fn default() -> Self {
        Self::new()
    }
}
