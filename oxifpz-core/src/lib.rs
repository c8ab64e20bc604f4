//! # OxiFpz Core
//!
//! Core components for the OxiFpz lossless floating-point compression
//! library.
//!
//! This crate provides the building blocks shared by the codec and the CLI:
//!
//! - [`bytestream`]: buffered byte-level I/O over `Read`/`Write`
//! - [`error`]: error types
//!
//! ## Architecture
//!
//! OxiFpz is designed as a small layered stack:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ L3: CLI                                                 │
//! │     raw-file framing, argument parsing                  │
//! ├─────────────────────────────────────────────────────────┤
//! │ L2: Codec (oxifpz-codec)                                │
//! │     container header, Lorenzo prediction, range coding  │
//! ├─────────────────────────────────────────────────────────┤
//! │ L1: ByteStream (this crate)                             │
//! │     ByteReader/ByteWriter, error types                  │
//! └─────────────────────────────────────────────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod bytestream;
pub mod error;

// Re-exports for convenience
pub use bytestream::{ByteReader, ByteWriter};
pub use error::{OxiFpzError, Result};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bytestream::{ByteReader, ByteWriter};
    pub use crate::error::{OxiFpzError, Result};
}
