//! Quasi-static adaptive probability model for the range coder.
//!
//! Frequencies adapt to the stream, but table rebuilds are batched into
//! rescale epochs so the per-symbol hot path stays at one lookup, one
//! add, and one decrement. During an epoch the coder works from a frozen
//! cumulative table (`cumf`) while occurrences accumulate into a pending
//! table (`symf`); at the epoch boundary the pending table is halved (with
//! the low bit forced so no frequency ever reaches zero) and the deficit to
//! the fixed total `2^bits` is spread over the next epoch as a per-symbol
//! increment. Epochs start short and double toward a target period, giving
//! fast adaptation at stream start and stability later.
//!
//! Decoder-side models additionally maintain a coarse 7-bit lookup table
//! mapping the top bits of a cumulative-frequency target to a lower-bound
//! symbol index, so symbol recovery is a short binary search.

/// Log2 of the total frequency mass of a model.
pub const MODEL_BITS: u32 = 16;

/// Target number of coded symbols between rescales.
pub const RESCALE_PERIOD: u32 = 1024;

/// Log2 of the decoder's coarse search table size.
const SEARCH_BITS: u32 = 7;

/// Adaptive frequency model with batched rescaling.
///
/// Encoder and decoder instances fed the same symbol sequence stay in
/// lockstep: both update after every coded symbol, so their epoch
/// boundaries and tables coincide.
#[derive(Debug, Clone)]
pub struct QsModel {
    /// Log2 of the total frequency.
    bits: u32,
    /// Rescale interval the model grows toward.
    target_rescale: u32,
    /// Current rescale interval.
    rescale: u32,
    /// Per-occurrence increment for the current epoch.
    incr: u32,
    /// Occurrences remaining before the next rescale step.
    left: u32,
    /// Remainder occurrences served at `incr + 1` after this epoch.
    next_left: u32,
    /// Pending per-symbol frequencies, accumulating during the epoch.
    symf: Vec<u32>,
    /// Frozen cumulative frequencies; `cumf[0] = 0`, `cumf[n] = 2^bits`.
    cumf: Vec<u32>,
    /// Coarse target-to-symbol lookup; decoder models only.
    search: Option<Vec<u16>>,
    /// Shift from a cumulative target to its search bucket.
    search_shift: u32,
}

impl QsModel {
    /// Create an encoder-side model over `symbols` symbols.
    pub fn encoder(symbols: usize) -> Self {
        Self::with_params(symbols, MODEL_BITS, RESCALE_PERIOD, false)
    }

    /// Create a decoder-side model over `symbols` symbols.
    ///
    /// Decoder models carry the search table needed by
    /// [`symbol`](Self::symbol).
    pub fn decoder(symbols: usize) -> Self {
        Self::with_params(symbols, MODEL_BITS, RESCALE_PERIOD, true)
    }

    /// Create a model with explicit parameters.
    ///
    /// # Panics
    ///
    /// Panics if `bits` exceeds 16, if `period` is zero, or if `symbols`
    /// does not fit the frequency total.
    pub fn with_params(symbols: usize, bits: u32, period: u32, decode: bool) -> Self {
        assert!(bits >= SEARCH_BITS && bits <= 16, "bits must be in 7..=16");
        assert!(period > 0, "rescale period must be positive");
        assert!(
            symbols >= 2 && symbols <= 1 << bits,
            "symbol count must be in 2..=2^bits"
        );

        let mut model = Self {
            bits,
            target_rescale: period,
            rescale: 0,
            incr: 0,
            left: 0,
            next_left: 0,
            symf: vec![0; symbols],
            cumf: vec![0; symbols + 1],
            search: decode.then(|| vec![0; (1 << SEARCH_BITS) + 1]),
            search_shift: bits - SEARCH_BITS,
        };
        model.reset();
        model
    }

    /// Log2 of the total frequency; the range coder shifts by this amount.
    #[inline]
    pub fn bits(&self) -> u32 {
        self.bits
    }

    /// Number of symbols in the alphabet.
    pub fn symbols(&self) -> usize {
        self.symf.len()
    }

    /// Reinitialize to a uniform distribution and a short first epoch.
    pub fn reset(&mut self) {
        let n = self.symf.len() as u32;
        let total = 1u32 << self.bits;
        self.rescale = (n >> 4) | 2;
        self.next_left = 0;
        let base = total / n;
        let extra = (total % n) as usize;
        for (i, freq) in self.symf.iter_mut().enumerate() {
            *freq = if i < extra { base + 1 } else { base };
        }
        self.do_rescale();
    }

    /// Cumulative frequency below `symbol` and the symbol's own frequency,
    /// from the current epoch's frozen table.
    #[inline]
    pub fn freq(&self, symbol: usize) -> (u32, u32) {
        (self.cumf[symbol], self.cumf[symbol + 1] - self.cumf[symbol])
    }

    /// Recover the symbol whose cumulative interval contains `target`.
    ///
    /// `target` must be below `2^bits`. Only valid on decoder-side models.
    #[inline]
    pub fn symbol(&self, target: u32) -> usize {
        let search = self
            .search
            .as_ref()
            .expect("symbol lookup requires a decoder-side model");
        let bucket = (target >> self.search_shift) as usize;
        let mut lo = search[bucket] as usize;
        let mut hi = search[bucket + 1] as usize + 1;
        while lo + 1 < hi {
            let mid = (lo + hi) >> 1;
            if target < self.cumf[mid] {
                hi = mid;
            } else {
                lo = mid;
            }
        }
        lo
    }

    /// Record one occurrence of `symbol`, rescaling at epoch boundaries.
    #[inline]
    pub fn update(&mut self, symbol: usize) {
        if self.left == 0 {
            self.do_rescale();
        }
        self.left -= 1;
        self.symf[symbol] += self.incr;
    }

    /// Epoch boundary: rebuild tables and set up the next increment run.
    fn do_rescale(&mut self) {
        if self.next_left > 0 {
            // Serve the deficit remainder at incr+1 before rescaling again.
            self.incr += 1;
            self.left = self.next_left;
            self.next_left = 0;
            return;
        }

        if self.rescale < self.target_rescale {
            self.rescale <<= 1;
            if self.rescale > self.target_rescale {
                self.rescale = self.target_rescale;
            }
        }

        // The pending frequencies sum to exactly 2^bits at every boundary;
        // freeze them into cumf, then halve them (odd bit set) for the next
        // epoch and spread the deficit over the coming occurrences.
        let total = 1u32 << self.bits;
        let mut cum = total;
        let mut missing = total;
        for i in (0..self.symf.len()).rev() {
            let pending = self.symf[i];
            cum -= pending;
            self.cumf[i] = cum;
            let halved = (pending >> 1) | 1;
            missing -= halved;
            self.symf[i] = halved;
        }
        debug_assert_eq!(cum, 0);
        self.cumf[self.symf.len()] = total;

        self.incr = missing / self.rescale;
        self.next_left = missing % self.rescale;
        self.left = self.rescale - self.next_left;

        self.rebuild_search();
    }

    /// Rebuild the coarse lookup: a descending sweep leaves, in every
    /// bucket, the smallest symbol whose interval intersects it.
    fn rebuild_search(&mut self) {
        let shift = self.search_shift;
        let top = self.symf.len() - 1;
        if let Some(search) = self.search.as_mut() {
            search[1 << SEARCH_BITS] = top as u16;
            for i in (0..=top).rev() {
                let start = (self.cumf[i] >> shift) as usize;
                let end = ((self.cumf[i + 1] - 1) >> shift) as usize;
                for slot in &mut search[start..=end] {
                    *slot = i as u16;
                }
            }
        }
    }
}
