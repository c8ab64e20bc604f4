//! Decompression: header validation plus the mirrored prediction pipeline.
//!
//! The decoder reproduces the encoder's traversal exactly: same wavefront
//! padding schedule, same prediction, same model updates, so the two stay
//! in lockstep symbol for symbol. A truncated stream does not abort the
//! loop; the range decoder runs out deterministically on zero bytes and the
//! truncation surfaces as a single error once the expected sample count has
//! been produced.

use crate::front::Front;
use crate::header::{read_header, HEADER_SIZE};
use crate::model::QsModel;
use crate::range::RangeDecoder;
use crate::residual::{decode_residual, symbol_count};
use crate::sample::{map_inverse, zero_mapping, Sample, SampleBits};
use oxifpz_core::error::{OxiFpzError, Result};
use std::io::Read;

/// Decompress a stream into samples of type `S`.
///
/// The stream's header must carry exactly `S`'s width; use
/// [`read_header`] first when the type is not known up front.
pub fn decompress<S: Sample>(bytes: &[u8]) -> Result<Vec<S>> {
    let header = read_header(bytes)?;
    if header.kind != S::KIND {
        return Err(OxiFpzError::type_mismatch(
            S::KIND.name(),
            header.kind.name(),
        ));
    }
    let total = header.element_count()?;

    let mut coder = RangeDecoder::new(&bytes[HEADER_SIZE..]);
    let mut model = QsModel::decoder(symbol_count(S::Bits::WIDTH));
    let mut output = Vec::with_capacity(total);
    for _ in 0..header.nf {
        decode_field(
            &mut coder,
            &mut model,
            &mut output,
            header.nx as usize,
            header.ny as usize,
            header.nz as usize,
        );
    }

    if coder.is_exhausted() {
        return Err(OxiFpzError::unexpected_eof(total));
    }
    Ok(output)
}

/// Convenience wrapper: decompress a float32 stream.
pub fn decompress_f32(bytes: &[u8]) -> Result<Vec<f32>> {
    decompress(bytes)
}

/// Convenience wrapper: decompress a float64 stream.
pub fn decompress_f64(bytes: &[u8]) -> Result<Vec<f64>> {
    decompress(bytes)
}

/// Run the mirrored prediction pipeline over one field.
fn decode_field<S: Sample, R: Read>(
    coder: &mut RangeDecoder<R>,
    model: &mut QsModel,
    output: &mut Vec<S>,
    nx: usize,
    ny: usize,
    nz: usize,
) {
    let mut front = Front::new(nx, ny, zero_mapping::<S>());
    front.advance(0, 0, 1);
    for _ in 0..nz {
        front.advance(0, 1, 0);
        for _ in 0..ny {
            front.advance(1, 0, 0);
            for _ in 0..nx {
                let predicted = front.predict();
                let actual = decode_residual(coder, model, predicted);
                output.push(map_inverse::<S>(actual));
                front.push(actual);
            }
        }
    }
}
