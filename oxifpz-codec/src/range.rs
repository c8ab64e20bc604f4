//! Arithmetic range coder over a byte stream.
//!
//! The coder tracks a shrinking interval `[low, low + range)` of 32-bit
//! unsigned values. Each coded event narrows the interval; whenever the top
//! byte of the interval is settled it is emitted and the interval shifts
//! left by eight bits. When the interval gets too small to split further
//! while its top byte is still ambiguous, two bytes of `low` are committed
//! and the interval is truncated up to the next 16-bit boundary
//! (`range = -low`), which sidesteps carry propagation entirely at the cost
//! of a fraction of a bit.
//!
//! Three event flavors are supported:
//!
//! - single bits at fixed 50% probability,
//! - symbols under an adaptive [`QsModel`],
//! - raw integers of up to 64 bits, coded as uniform shifts in 16-bit
//!   chunks, least-significant chunk first.
//!
//! The decoder mirrors every interval operation. Reading past the end of
//! the source yields zero bytes and latches a sticky error flag; decoding
//! continues deterministically and panic-free so the caller can run out the
//! expected sample count and report truncation once, at the end.

use crate::model::QsModel;
use oxifpz_core::bytestream::{ByteReader, ByteWriter};
use oxifpz_core::error::Result;
use std::io::{Read, Write};

/// Smallest interval width the coder will split; below this the interval is
/// force-renormalized.
const BOTTOM: u32 = 1 << 16;

/// Range encoder writing to a byte sink.
#[derive(Debug)]
pub struct RangeEncoder<W: Write> {
    /// Buffered byte sink.
    sink: ByteWriter<W>,
    /// Lower bound of the pending interval.
    low: u32,
    /// Width of the pending interval.
    range: u32,
}

impl<W: Write> RangeEncoder<W> {
    /// Create an encoder over the given sink.
    pub fn new(sink: W) -> Self {
        Self {
            sink: ByteWriter::new(sink),
            low: 0,
            range: 0xFFFF_FFFF,
        }
    }

    /// Encode one bit at fixed 50% probability.
    pub fn encode_bit(&mut self, bit: bool) -> Result<()> {
        self.range >>= 1;
        if bit {
            self.low = self.low.wrapping_add(self.range);
        }
        self.normalize()
    }

    /// Encode `symbol` under the adaptive `model` and record the occurrence.
    pub fn encode_sym(&mut self, symbol: usize, model: &mut QsModel) -> Result<()> {
        let (low, freq) = model.freq(symbol);
        self.range >>= model.bits();
        self.low = self.low.wrapping_add(self.range.wrapping_mul(low));
        self.range = self.range.wrapping_mul(freq);
        self.normalize()?;
        model.update(symbol);
        Ok(())
    }

    /// Encode `value` as a raw `bits`-wide integer, `bits <= 64`.
    ///
    /// Zero-width values are a no-op, so callers can pass degenerate
    /// residual classes straight through.
    pub fn encode_raw(&mut self, value: u64, bits: u32) -> Result<()> {
        debug_assert!(bits <= 64);
        debug_assert!(bits == 64 || value >> bits == 0);
        let mut value = value;
        let mut bits = bits;
        while bits > 16 {
            self.encode_shift((value & 0xFFFF) as u32, 16)?;
            value >>= 16;
            bits -= 16;
        }
        if bits > 0 {
            self.encode_shift(value as u32, bits)?;
        }
        Ok(())
    }

    /// Encode a uniform value in `[0, 2^bits)`, `1 <= bits <= 16`.
    fn encode_shift(&mut self, value: u32, bits: u32) -> Result<()> {
        self.range >>= bits;
        self.low = self.low.wrapping_add(self.range.wrapping_mul(value));
        self.normalize()
    }

    /// Restore `range >= 2^16`, emitting settled bytes.
    fn normalize(&mut self) -> Result<()> {
        while (self.low ^ self.low.wrapping_add(self.range)) >> 24 == 0 {
            self.sink.write_byte((self.low >> 24) as u8)?;
            self.low <<= 8;
            self.range <<= 8;
        }
        if self.range < BOTTOM {
            // Top byte still straddles a carry boundary: commit two bytes of
            // low and truncate the interval at the next 16-bit boundary.
            self.sink.write_byte((self.low >> 24) as u8)?;
            self.low <<= 8;
            self.sink.write_byte((self.low >> 24) as u8)?;
            self.low <<= 8;
            self.range = self.low.wrapping_neg();
        }
        Ok(())
    }

    /// Lock the code value by flushing four bytes of `low`, then flush and
    /// return the sink.
    pub fn finish(mut self) -> Result<W> {
        for _ in 0..4 {
            self.sink.write_byte((self.low >> 24) as u8)?;
            self.low <<= 8;
        }
        self.sink.into_inner()
    }
}

/// Range decoder reading from a byte source.
#[derive(Debug)]
pub struct RangeDecoder<R: Read> {
    /// Buffered byte source.
    source: ByteReader<R>,
    /// Lower bound of the pending interval; mirrors the encoder exactly.
    low: u32,
    /// Width of the pending interval.
    range: u32,
    /// Sliding window of the coded stream.
    code: u32,
    /// Latched when the source runs dry.
    error: bool,
}

impl<R: Read> RangeDecoder<R> {
    /// Create a decoder over the given source, priming the code window from
    /// its first four bytes.
    pub fn new(source: R) -> Self {
        let mut decoder = Self {
            source: ByteReader::new(source),
            low: 0,
            range: 0xFFFF_FFFF,
            code: 0,
            error: false,
        };
        for _ in 0..4 {
            decoder.code = (decoder.code << 8) | decoder.read_byte() as u32;
        }
        decoder
    }

    /// Whether the source ran out before decoding finished.
    pub fn is_exhausted(&self) -> bool {
        self.error
    }

    /// Next stream byte; zero (with the error flag latched) past the end.
    fn read_byte(&mut self) -> u8 {
        if self.error {
            return 0;
        }
        match self.source.read_byte() {
            Ok(byte) => byte,
            Err(_) => {
                self.error = true;
                0
            }
        }
    }

    /// Decode one bit at fixed 50% probability.
    pub fn decode_bit(&mut self) -> bool {
        self.range >>= 1;
        let bit = self.code.wrapping_sub(self.low) >= self.range;
        if bit {
            self.low = self.low.wrapping_add(self.range);
        }
        self.normalize();
        bit
    }

    /// Decode a symbol under the adaptive `model` and record the occurrence.
    pub fn decode_sym(&mut self, model: &mut QsModel) -> usize {
        self.range >>= model.bits();
        let target = self.code.wrapping_sub(self.low) / self.range;
        // Clamp so a corrupt stream cannot push the lookup out of range.
        let target = target.min((1 << model.bits()) - 1);
        let symbol = model.symbol(target);
        let (low, freq) = model.freq(symbol);
        self.low = self.low.wrapping_add(self.range.wrapping_mul(low));
        self.range = self.range.wrapping_mul(freq);
        self.normalize();
        model.update(symbol);
        symbol
    }

    /// Decode a raw `bits`-wide integer, `bits <= 64`.
    pub fn decode_raw(&mut self, bits: u32) -> u64 {
        debug_assert!(bits <= 64);
        let mut value = 0u64;
        let mut shift = 0u32;
        let mut bits = bits;
        while bits > 16 {
            value |= (self.decode_shift(16) as u64) << shift;
            shift += 16;
            bits -= 16;
        }
        if bits > 0 {
            value |= (self.decode_shift(bits) as u64) << shift;
        }
        value
    }

    /// Decode a uniform value in `[0, 2^bits)`, `1 <= bits <= 16`.
    fn decode_shift(&mut self, bits: u32) -> u32 {
        self.range >>= bits;
        let value = self.code.wrapping_sub(self.low) / self.range;
        let value = value.min((1 << bits) - 1);
        self.low = self.low.wrapping_add(self.range.wrapping_mul(value));
        self.normalize();
        value
    }

    /// Restore `range >= 2^16`, consuming bytes in lockstep with the
    /// encoder's emissions.
    fn normalize(&mut self) {
        while (self.low ^ self.low.wrapping_add(self.range)) >> 24 == 0 {
            self.code = (self.code << 8) | self.read_byte() as u32;
            self.low <<= 8;
            self.range <<= 8;
        }
        if self.range < BOTTOM {
            self.code = (self.code << 8) | self.read_byte() as u32;
            self.code = (self.code << 8) | self.read_byte() as u32;
            self.low <<= 16;
            self.range = self.low.wrapping_neg();
        }
    }
}
