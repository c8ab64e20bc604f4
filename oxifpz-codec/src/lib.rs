//! # OxiFpz Codec
//!
//! Lossless compression of multi-dimensional IEEE 754 floating-point
//! arrays. Decompression reproduces every input bit exactly, including
//! signed zeros, subnormals, infinities, and NaN payloads. On smooth
//! scientific field data (simulation grids, volumetric scans) the codec is
//! competitive with general-purpose coders while running in a single
//! streaming pass with bounded working memory.
//!
//! ## Pipeline
//!
//! ```text
//! sample ─► map(float→uint) ─► Lorenzo predictor ─► residual coder ─► range coder ─► bytes
//!                                     ▲
//!                                     └── previously coded samples (wavefront)
//! ```
//!
//! - [`sample`]: the order-preserving bijection between IEEE bits and
//!   unsigned integers,
//! - [`front`]: the circular wavefront buffer feeding the order-3 Lorenzo
//!   predictor,
//! - [`residual`]: prediction errors as adaptive class symbols plus raw
//!   mantissa bits,
//! - [`range`] and [`model`]: the arithmetic range coder and its
//!   quasi-static probability model,
//! - [`header`]: the fixed 24-byte container framing.
//!
//! ## Stream format
//!
//! A stream is the 24-byte little-endian header (magic `"fpz\0"`, version,
//! type byte, nx/ny/nz/nf) followed by the raw range-coded data, ending in
//! the coder's 4-byte flush. Samples are indexed
//! `x + nx * (y + ny * (z + nz * f))`.
//!
//! ## Usage
//!
//! ```
//! use oxifpz_codec::{compress, decompress_f32};
//!
//! let field: Vec<f32> = (0..64).map(|i| i as f32).collect();
//! let packed = compress(&field, 64, 1, 1, 1).unwrap();
//! assert_eq!(decompress_f32(&packed).unwrap(), field);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod decoder;
pub mod encoder;
pub mod front;
pub mod header;
pub mod model;
pub mod range;
pub mod residual;
pub mod sample;

// Re-exports
pub use decoder::{decompress, decompress_f32, decompress_f64};
pub use encoder::compress;
pub use front::Front;
pub use header::{read_header, Header, HEADER_SIZE, MAGIC, VERSION};
pub use model::QsModel;
pub use range::{RangeDecoder, RangeEncoder};
pub use sample::{map_forward, map_inverse, Sample, SampleBits, SampleKind};

use oxifpz_core::error::Result;

/// Compress a float32 array.
///
/// This is a convenience wrapper around [`compress`] naming the
/// single-precision instantiation.
pub fn compress_f32(samples: &[f32], nx: u32, ny: u32, nz: u32, nf: u32) -> Result<Vec<u8>> {
    compress(samples, nx, ny, nz, nf)
}

/// Compress a float64 array.
///
/// This is a convenience wrapper around [`compress`] naming the
/// double-precision instantiation.
pub fn compress_f64(samples: &[f64], nx: u32, ny: u32, nz: u32, nf: u32) -> Result<Vec<u8>> {
    compress(samples, nx, ny, nz, nf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_roundtrip_f32() {
        let samples = [1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
        let compressed = compress_f32(&samples, 8, 1, 1, 1).unwrap();
        assert_eq!(decompress_f32(&compressed).unwrap(), samples);
    }

    #[test]
    fn test_api_roundtrip_f64() {
        let samples = [0.25f64, -0.5, 1.75, 2.0, -3.125, 4.0];
        let compressed = compress_f64(&samples, 3, 2, 1, 1).unwrap();
        assert_eq!(decompress_f64(&compressed).unwrap(), samples);
    }

    #[test]
    fn test_header_of_compressed_stream() {
        let samples = [9.0f64; 30];
        let compressed = compress_f64(&samples, 5, 3, 2, 1).unwrap();
        let header = read_header(&compressed).unwrap();
        assert_eq!(header.kind, SampleKind::Double);
        assert_eq!((header.nx, header.ny, header.nz, header.nf), (5, 3, 2, 1));
    }
}
