//! The twiddle table cache pre-computes and stores the roots of unity consumed
//! by the transform kernels, along with the bit-reversal permutation for the
//! decimation step.
//!
//! Tables are keyed by the transform size exponent `k` (`N = 2^k`) and built
//! lazily: [`TwiddleCache::ensure_tables`] grows the cache from the largest
//! previously built exponent up to the requested one. The cache only ever
//! grows, and a table is immutable once built, so after a single-threaded
//! warm-up the cache can be shared freely between threads.

use num_traits::{Float, FloatConst};

use crate::bit_rev;

/// Pre-computed data for one transform size.
///
/// Holds the `N/2` twiddle factors `w_j = exp(-2πi·j/N)` for `j = 0..N/2-1`
/// in split real/imaginary layout, plus the bit-reversal permutation of
/// `0..N-1`. Both directions draw from the same table; the inverse reads the
/// imaginary parts with flipped sign.
pub struct TwiddleTable<T> {
    log_n: u32,
    twiddles_re: Vec<T>,
    twiddles_im: Vec<T>,
    bit_rev: Vec<usize>,
}

impl<T: Float + FloatConst> TwiddleTable<T> {
    /// Compute the table for exponent `k` from scratch.
    ///
    /// Each entry is evaluated directly as `cos`/`sin` of its exact angle
    /// rather than by a rotation recurrence, which keeps the trigonometric
    /// error flat across the table.
    fn build(k: u32) -> Self {
        let n = 1usize << k;
        let dist = n >> 1;

        let mut twiddles_re = vec![T::zero(); dist];
        let mut twiddles_im = vec![T::zero(); dist];

        let angle_mult = -(T::PI() + T::PI()) / T::from(n).unwrap();
        for (j, (re, im)) in twiddles_re
            .iter_mut()
            .zip(twiddles_im.iter_mut())
            .enumerate()
        {
            let angle = angle_mult * T::from(j).unwrap();
            *re = angle.cos();
            *im = angle.sin();
        }

        Self {
            log_n: k,
            twiddles_re,
            twiddles_im,
            bit_rev: bit_rev::bit_rev_indices(k),
        }
    }
}

impl<T> TwiddleTable<T> {
    /// The exponent `k` this table was built for.
    pub fn log_n(&self) -> u32 {
        self.log_n
    }

    /// The transform size `N = 2^k`.
    pub fn size(&self) -> usize {
        1 << self.log_n
    }

    /// Real parts of the `N/2` twiddle factors.
    pub fn twiddles_re(&self) -> &[T] {
        &self.twiddles_re
    }

    /// Imaginary parts of the `N/2` twiddle factors.
    pub fn twiddles_im(&self) -> &[T] {
        &self.twiddles_im
    }

    /// The bit-reversal permutation of `0..N-1`.
    pub fn bit_rev(&self) -> &[usize] {
        &self.bit_rev
    }

    pub(crate) fn num_twiddles(&self) -> usize {
        debug_assert_eq!(self.twiddles_re.len(), self.twiddles_im.len());
        self.twiddles_re.len()
    }
}

/// Monotonically growing store of [`TwiddleTable`]s, indexed by exponent.
///
/// Created empty; [`ensure_tables`](Self::ensure_tables) populates it up to a
/// requested exponent and is idempotent. Tables are never discarded or
/// rebuilt, so a `&TwiddleCache` handed out after warm-up always observes
/// fully built, immutable tables.
pub struct TwiddleCache<T> {
    tables: Vec<TwiddleTable<T>>,
}

impl<T: Float + FloatConst> TwiddleCache<T> {
    pub fn new() -> Self {
        Self { tables: Vec::new() }
    }

    /// Guarantee the cache holds tables for every exponent `<= k`.
    ///
    /// Grows incrementally from the largest previously built exponent; calling
    /// this again with the same or a smaller `k` is a no-op.
    pub fn ensure_tables(&mut self, k: u32) {
        assert!(k < usize::BITS, "exponent {k} is out of range");
        while self.tables.len() <= k as usize {
            let next = self.tables.len() as u32;
            self.tables.push(TwiddleTable::build(next));
        }
    }

    /// Largest exponent the cache currently covers, if any.
    pub fn max_exponent(&self) -> Option<u32> {
        (self.tables.len() as u32).checked_sub(1)
    }

    /// Whether a table for exponent `k` has been built.
    pub fn covers(&self, k: u32) -> bool {
        (k as usize) < self.tables.len()
    }
}

impl<T> TwiddleCache<T> {
    /// Borrow the table for exponent `k`.
    ///
    /// # Panics
    ///
    /// Panics if no table for `k` has been built. Requesting a table that was
    /// never ensured is a caller contract violation, not a recoverable
    /// condition.
    pub fn table_for(&self, k: u32) -> &TwiddleTable<T> {
        match self.tables.get(k as usize) {
            Some(table) => table,
            None => panic!("no twiddle table for exponent {k}; call ensure_tables({k}) first"),
        }
    }
}

impl<T: Float + FloatConst> Default for TwiddleCache<T> {
    fn default() -> Self {
        Self::new()
    }
}
