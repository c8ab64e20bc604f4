//! Residual coding: signed prediction error as class symbol plus raw bits.
//!
//! The difference between a predicted and an actual mapped sample is coded
//! in two parts. A class symbol, coded through the adaptive model, carries
//! the sign and the order of magnitude `k = ⌊log2 d⌋`; the remaining
//! `k` low bits of the magnitude follow raw (the leading one-bit of `d` is
//! implied by the class). Good predictions concentrate statistical mass on
//! the few central classes, so the model learns them quickly; noisy data
//! degrades gracefully toward full-width residuals.
//!
//! For a width-`W` sample the alphabet is `2W + 1` symbols: the midpoint
//! `W` means the prediction was exact, symbols above it code
//! under-predictions, symbols below it over-predictions.

use crate::model::QsModel;
use crate::range::{RangeDecoder, RangeEncoder};
use crate::sample::SampleBits;
use num_traits::{WrappingAdd, WrappingSub};
use oxifpz_core::error::Result;
use std::cmp::Ordering;
use std::io::{Read, Write};

/// Number of class symbols for a mapped-sample width.
pub const fn symbol_count(width: u32) -> usize {
    (2 * width + 1) as usize
}

/// Position of the magnitude's leading bit.
#[inline]
fn magnitude_class<B: SampleBits>(d: B) -> u32 {
    B::WIDTH - 1 - d.leading_zeros()
}

/// Encode `actual` relative to `predicted`.
pub fn encode_residual<B: SampleBits, W: Write>(
    coder: &mut RangeEncoder<W>,
    model: &mut QsModel,
    predicted: B,
    actual: B,
) -> Result<()> {
    let bias = B::WIDTH as usize;
    match actual.cmp(&predicted) {
        Ordering::Equal => coder.encode_sym(bias, model),
        Ordering::Greater => {
            let d = actual.wrapping_sub(&predicted);
            let k = magnitude_class(d);
            coder.encode_sym(bias + 1 + k as usize, model)?;
            if k > 0 {
                coder.encode_raw(d.as_u64() - (1u64 << k), k)?;
            }
            Ok(())
        }
        Ordering::Less => {
            let d = predicted.wrapping_sub(&actual);
            let k = magnitude_class(d);
            coder.encode_sym(bias - 1 - k as usize, model)?;
            if k > 0 {
                coder.encode_raw(d.as_u64() - (1u64 << k), k)?;
            }
            Ok(())
        }
    }
}

/// Decode a mapped sample relative to `predicted`.
pub fn decode_residual<B: SampleBits, R: Read>(
    coder: &mut RangeDecoder<R>,
    model: &mut QsModel,
    predicted: B,
) -> B {
    let bias = B::WIDTH as usize;
    let symbol = coder.decode_sym(model);
    match symbol.cmp(&bias) {
        Ordering::Equal => predicted,
        Ordering::Greater => {
            let k = (symbol - bias - 1) as u32;
            let d = (1u64 << k) | if k > 0 { coder.decode_raw(k) } else { 0 };
            predicted.wrapping_add(&B::from_u64(d))
        }
        Ordering::Less => {
            let k = (bias - symbol - 1) as u32;
            let d = (1u64 << k) | if k > 0 { coder.decode_raw(k) } else { 0 };
            predicted.wrapping_sub(&B::from_u64(d))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_counts() {
        assert_eq!(symbol_count(32), 65);
        assert_eq!(symbol_count(64), 129);
    }

    #[test]
    fn test_magnitude_classes() {
        assert_eq!(magnitude_class(1u32), 0);
        assert_eq!(magnitude_class(2u32), 1);
        assert_eq!(magnitude_class(3u32), 1);
        assert_eq!(magnitude_class(4u32), 2);
        assert_eq!(magnitude_class(u32::MAX), 31);
        assert_eq!(magnitude_class(u64::MAX), 63);
    }

    fn roundtrip_u32(pairs: &[(u32, u32)]) {
        let mut model = QsModel::encoder(symbol_count(32));
        let mut encoder = RangeEncoder::new(Vec::new());
        for &(predicted, actual) in pairs {
            encode_residual(&mut encoder, &mut model, predicted, actual).unwrap();
        }
        let encoded = encoder.finish().unwrap();

        let mut model = QsModel::decoder(symbol_count(32));
        let mut decoder = RangeDecoder::new(&encoded[..]);
        for &(predicted, actual) in pairs {
            assert_eq!(
                decode_residual(&mut decoder, &mut model, predicted),
                actual,
                "predicted {predicted:#x}, actual {actual:#x}"
            );
        }
        assert!(!decoder.is_exhausted());
    }

    #[test]
    fn test_residual_roundtrip_u32() {
        let mut pairs = vec![(42u32, 42u32), (0, u32::MAX), (u32::MAX, 0)];
        for k in 0..32 {
            let d = 1u32 << k;
            pairs.push((1000, 1000u32.wrapping_add(d)));
            pairs.push((1000, 1000u32.wrapping_sub(d)));
            pairs.push((1000, 1000u32.wrapping_add(d | (d >> 1))));
        }
        roundtrip_u32(&pairs);
    }

    #[test]
    fn test_residual_roundtrip_u64() {
        let mut pairs = vec![(7u64, 7u64), (0, u64::MAX), (u64::MAX, 0)];
        for k in 0..64 {
            let d = 1u64 << k;
            pairs.push((1 << 40, (1u64 << 40).wrapping_add(d)));
            pairs.push((1 << 40, (1u64 << 40).wrapping_sub(d | 1)));
        }

        let mut model = QsModel::encoder(symbol_count(64));
        let mut encoder = RangeEncoder::new(Vec::new());
        for &(predicted, actual) in &pairs {
            encode_residual(&mut encoder, &mut model, predicted, actual).unwrap();
        }
        let encoded = encoder.finish().unwrap();

        let mut model = QsModel::decoder(symbol_count(64));
        let mut decoder = RangeDecoder::new(&encoded[..]);
        for &(predicted, actual) in &pairs {
            assert_eq!(decode_residual(&mut decoder, &mut model, predicted), actual);
        }
    }

    #[test]
    fn test_exact_predictions_dominate_output_size() {
        let mut model = QsModel::encoder(symbol_count(32));
        let mut encoder = RangeEncoder::new(Vec::new());
        for _ in 0..10_000 {
            encode_residual(&mut encoder, &mut model, 0xC0FF_EE00u32, 0xC0FF_EE00u32).unwrap();
        }
        let encoded = encoder.finish().unwrap();
        // Exact predictions shrink to well under a bit per sample.
        assert!(encoded.len() < 10_000 / 8, "got {} bytes", encoded.len());
    }
}
