//! Error types

use crate::{codec::Format, Uuid7};

/// Error parsing an invalid string representation.
///
/// Decoders skip characters outside their alphabet, so the only ways a decode can fail are a
/// wrong number of significant characters or, for [`Format::Id26`], a checksum mismatch.
#[derive(Clone, Eq, PartialEq, Hash, Debug, thiserror::Error)]
pub enum ParseError {
    /// The input did not contain exactly the number of significant characters the format needs.
    #[error("invalid {format} representation: expected {expected} significant characters, found {found}")]
    InvalidLength {
        /// The format that was being decoded.
        format: Format,
        /// The number of alphabet characters the format requires.
        expected: usize,
        /// The number of alphabet characters found in the input.
        found: usize,
    },

    /// The Id26 checksum did not match the decoded bytes.
    ///
    /// The value decoded from the input is still returned so that callers can inspect it, but it
    /// should not be trusted.
    #[error("invalid Id26 representation: checksum mismatch")]
    ChecksumMismatch {
        /// The value decoded before the checksum was verified.
        decoded: Uuid7,
    },

    /// The format specifier supplied alongside the input was not recognized.
    #[error(transparent)]
    UnknownSpecifier(#[from] FormatSpecError),
}

/// Error returned for an unrecognized format specifier.
#[derive(Clone, Eq, PartialEq, Hash, Debug, thiserror::Error)]
#[error("unrecognized format specifier {0:?}")]
pub struct FormatSpecError(pub(crate) String);

impl FormatSpecError {
    /// Returns the specifier that was rejected.
    pub fn specifier(&self) -> &str {
        &self.0
    }
}

/// Error constructing an identifier from a byte buffer that is not exactly 16 bytes long.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, thiserror::Error)]
#[error("buffer must be exactly 16 bytes in length, found {0}")]
pub struct ByteLengthError(pub(crate) usize);

impl ByteLengthError {
    /// Returns the length of the rejected buffer.
    pub const fn found(&self) -> usize {
        self.0
    }
}
