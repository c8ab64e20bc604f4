//! Error types for OxiFpz operations.
//!
//! This module provides a single error type that covers all failure
//! conditions of the codec: I/O errors from the underlying byte streams,
//! container format violations, and caller mistakes such as mismatched
//! sample counts.
//!
//! The error kinds fall into three groups:
//!
//! - **Caller bugs**, detected before any coding begins:
//!   [`InvalidDimensions`](OxiFpzError::InvalidDimensions),
//!   [`LengthMismatch`](OxiFpzError::LengthMismatch).
//! - **Corrupt input**: [`InvalidMagic`](OxiFpzError::InvalidMagic),
//!   [`UnsupportedVersion`](OxiFpzError::UnsupportedVersion),
//!   [`InvalidSampleType`](OxiFpzError::InvalidSampleType),
//!   [`TypeMismatch`](OxiFpzError::TypeMismatch).
//! - **Exhausted input**: [`UnexpectedEof`](OxiFpzError::UnexpectedEof).

use std::io;
use thiserror::Error;

/// The main error type for OxiFpz operations.
#[derive(Debug, Error)]
pub enum OxiFpzError {
    /// I/O error from underlying reader/writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Invalid magic number at the start of a stream.
    #[error("Invalid magic number: expected {expected:#010x}, found {found:#010x}")]
    InvalidMagic {
        /// Expected magic value.
        expected: u32,
        /// Actual magic value found.
        found: u32,
    },

    /// Stream was written by a format version this implementation does not
    /// understand.
    #[error("Unsupported format version: {version}")]
    UnsupportedVersion {
        /// The version field read from the header.
        version: u16,
    },

    /// The header's sample type byte is not a known encoding.
    #[error("Invalid sample type byte: {value:#04x}")]
    InvalidSampleType {
        /// The type byte read from the header.
        value: u8,
    },

    /// Decoding was requested for a sample width that does not match the
    /// stream header.
    #[error("Sample type mismatch: stream contains {found}, requested {expected}")]
    TypeMismatch {
        /// Sample type requested by the caller.
        expected: &'static str,
        /// Sample type recorded in the header.
        found: &'static str,
    },

    /// One or more array dimensions are zero or their product overflows.
    #[error("Invalid dimensions: {nx}x{ny}x{nz} with {nf} field(s)")]
    InvalidDimensions {
        /// Extent along x.
        nx: u32,
        /// Extent along y.
        ny: u32,
        /// Extent along z.
        nz: u32,
        /// Number of fields.
        nf: u32,
    },

    /// The sample buffer length does not match the product of the dimensions.
    #[error("Sample count mismatch: dimensions require {expected}, got {actual}")]
    LengthMismatch {
        /// Element count implied by the dimensions.
        expected: usize,
        /// Element count actually supplied.
        actual: usize,
    },

    /// The byte source was exhausted before decoding completed.
    #[error("Unexpected end of stream: coded data ended before {expected} sample(s) were recovered")]
    UnexpectedEof {
        /// Number of samples the stream promised.
        expected: usize,
    },
}

/// Result type alias for OxiFpz operations.
pub type Result<T> = std::result::Result<T, OxiFpzError>;

impl OxiFpzError {
    /// Create an invalid magic error.
    pub fn invalid_magic(expected: u32, found: u32) -> Self {
        Self::InvalidMagic { expected, found }
    }

    /// Create an unsupported version error.
    pub fn unsupported_version(version: u16) -> Self {
        Self::UnsupportedVersion { version }
    }

    /// Create an invalid sample type error.
    pub fn invalid_sample_type(value: u8) -> Self {
        Self::InvalidSampleType { value }
    }

    /// Create a type mismatch error.
    pub fn type_mismatch(expected: &'static str, found: &'static str) -> Self {
        Self::TypeMismatch { expected, found }
    }

    /// Create an invalid dimensions error.
    pub fn invalid_dimensions(nx: u32, ny: u32, nz: u32, nf: u32) -> Self {
        Self::InvalidDimensions { nx, ny, nz, nf }
    }

    /// Create a length mismatch error.
    pub fn length_mismatch(expected: usize, actual: usize) -> Self {
        Self::LengthMismatch { expected, actual }
    }

    /// Create an unexpected EOF error.
    pub fn unexpected_eof(expected: usize) -> Self {
        Self::UnexpectedEof { expected }
    }
}
