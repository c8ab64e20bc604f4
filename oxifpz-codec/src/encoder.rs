//! Compression: header framing plus the per-field prediction pipeline.
//!
//! Each field is traversed in row-major order (x innermost, z outermost).
//! The wavefront is padded with zero-mapping pushes at the start of the
//! field, of every slab, and of every row, which lines the seven causal
//! corner offsets up with exactly the neighbors of the position about to be
//! coded; absent neighbors at array boundaries read the zero mapping.
//!
//! Fields run back to back through a single range coder and a single
//! probability model, so statistics learned on one field carry into the
//! next. The wavefront is rebuilt per field.

use crate::front::Front;
use crate::header::{Header, HEADER_SIZE};
use crate::model::QsModel;
use crate::range::RangeEncoder;
use crate::residual::{encode_residual, symbol_count};
use crate::sample::{map_forward, zero_mapping, Sample, SampleBits};
use oxifpz_core::error::{OxiFpzError, Result};
use std::io::Write;

/// Compress a multi-field 3-D array into a self-describing byte stream.
///
/// `samples` holds `nx * ny * nz * nf` values indexed
/// `x + nx * (y + ny * (z + nz * f))`. Dimension and length validation
/// happens before any coding begins.
pub fn compress<S: Sample>(
    samples: &[S],
    nx: u32,
    ny: u32,
    nz: u32,
    nf: u32,
) -> Result<Vec<u8>> {
    let header = Header::new(S::KIND, nx, ny, nz, nf)?;
    let total = header.element_count()?;
    if samples.len() != total {
        return Err(OxiFpzError::length_mismatch(total, samples.len()));
    }

    let mut output = Vec::with_capacity(HEADER_SIZE + total);
    output.extend_from_slice(&header.to_bytes());

    let mut coder = RangeEncoder::new(output);
    let mut model = QsModel::encoder(symbol_count(S::Bits::WIDTH));
    for field in samples.chunks_exact(header.field_len()?) {
        encode_field(&mut coder, &mut model, field, nx as usize, ny as usize, nz as usize)?;
    }
    coder.finish()
}

/// Run the prediction pipeline over one field.
fn encode_field<S: Sample, W: Write>(
    coder: &mut RangeEncoder<W>,
    model: &mut QsModel,
    field: &[S],
    nx: usize,
    ny: usize,
    nz: usize,
) -> Result<()> {
    let mut front = Front::new(nx, ny, zero_mapping::<S>());
    let mut next = 0;
    front.advance(0, 0, 1);
    for _ in 0..nz {
        front.advance(0, 1, 0);
        for _ in 0..ny {
            front.advance(1, 0, 0);
            for _ in 0..nx {
                let actual = map_forward(field[next]);
                next += 1;
                let predicted = front.predict();
                encode_residual(coder, model, predicted, actual)?;
                front.push(actual);
            }
        }
    }
    Ok(())
}
