use std::fmt;

/// An error indicating that an encoding name or alias is not recognized.
///
/// Returned when resolving a charset name against the registry fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidCharsetError {
    name: String,
}

impl InvalidCharsetError {
    /// Creates a new error for the given unrecognized name.
    #[inline]
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Returns the name that could not be resolved.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for InvalidCharsetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" is not a supported charset", self.name)
    }
}

impl std::error::Error for InvalidCharsetError {}

/// An error indicating that a byte slice is not valid for a given encoding.
///
/// Matches the shape of `std::str::Utf8Error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeError {
    valid_up_to: usize,
    error_len: Option<usize>,
}

impl DecodeError {
    /// Creates a new decode error.
    #[inline]
    pub const fn new(valid_up_to: usize, error_len: Option<usize>) -> Self {
        Self {
            valid_up_to,
            error_len,
        }
    }

    /// Returns the index up to which valid encoded data was verified.
    ///
    /// It is the maximum index such that `bytes[..index]` is valid.
    #[inline]
    pub const fn valid_up_to(&self) -> usize {
        self.valid_up_to
    }

    /// Provides more information about the failure:
    ///
    /// * `None`: the end of the input was reached unexpectedly.
    /// * `Some(len)`: an unexpected byte was encountered. The length indicates
    ///   how many bytes starting at the index given by `valid_up_to()` are invalid.
    #[inline]
    pub const fn error_len(&self) -> Option<usize> {
        self.error_len
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(error_len) = self.error_len {
            write!(
                f,
                "invalid encoding sequence of {} bytes from index {}",
                error_len, self.valid_up_to
            )
        } else {
            write!(
                f,
                "incomplete encoding sequence from index {}",
                self.valid_up_to
            )
        }
    }
}

impl std::error::Error for DecodeError {}

/// An error indicating that a byte sequence does not validate against its
/// declared charset.
///
/// Wraps a [`DecodeError`] together with the canonical name of the charset
/// the bytes were checked against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodingMismatchError {
    charset: &'static str,
    error: DecodeError,
}

impl EncodingMismatchError {
    /// Creates a new mismatch error for the named charset.
    #[inline]
    pub(crate) const fn new(charset: &'static str, error: DecodeError) -> Self {
        Self { charset, error }
    }

    /// Returns the canonical name of the charset the bytes were checked against.
    #[inline]
    pub const fn charset(&self) -> &'static str {
        self.charset
    }

    /// Returns the decode error that caused the validation to fail.
    #[inline]
    pub const fn decode_error(&self) -> &DecodeError {
        &self.error
    }
}

impl fmt::Display for EncodingMismatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "bytes are not valid {}: {}", self.charset, self.error)
    }
}

impl std::error::Error for EncodingMismatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

/// An error indicating that a character index is outside `[0, char_len)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexOutOfRangeError {
    index: usize,
    len: usize,
}

impl IndexOutOfRangeError {
    /// Creates a new out-of-range error.
    #[inline]
    pub(crate) const fn new(index: usize, len: usize) -> Self {
        Self { index, len }
    }

    /// Returns the offending character index.
    #[inline]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Returns the character length of the string at the time of the call.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }
}

impl fmt::Display for IndexOutOfRangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "index {} out of range for string of {} characters",
            self.index, self.len
        )
    }
}

impl std::error::Error for IndexOutOfRangeError {}

/// An error produced while applying a format template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// The template requires more arguments than were provided.
    MissingArguments {
        /// Number of arguments the template consumes.
        required: usize,
        /// Number of arguments that were provided.
        provided: usize,
    },
    /// A placeholder uses a conversion character that is not recognized.
    UnknownConversion {
        /// The unrecognized conversion character.
        conversion: char,
        /// Byte position of the placeholder in the template.
        position: usize,
    },
    /// The template ends in the middle of a placeholder.
    TruncatedPlaceholder {
        /// Byte position of the placeholder in the template.
        position: usize,
    },
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingArguments { required, provided } => write!(
                f,
                "format template requires {} arguments, but {} were provided",
                required, provided
            ),
            Self::UnknownConversion {
                conversion,
                position,
            } => write!(
                f,
                "unknown conversion '%{}' at byte {}",
                conversion, position
            ),
            Self::TruncatedPlaceholder { position } => {
                write!(
                    f,
                    "template ends inside the placeholder at byte {}",
                    position
                )
            }
        }
    }
}

impl std::error::Error for FormatError {}

/// An error indicating that an operation is disallowed by contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsupportedOperationError {
    operation: String,
}

impl UnsupportedOperationError {
    /// Creates a new error naming the unsupported operation.
    #[inline]
    pub(crate) fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
        }
    }

    /// Returns a description of the unsupported operation.
    #[inline]
    pub fn operation(&self) -> &str {
        &self.operation
    }
}

impl fmt::Display for UnsupportedOperationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} is not supported", self.operation)
    }
}

impl std::error::Error for UnsupportedOperationError {}
