//! A cached-twiddle, power-of-two radix-2 FFT engine.
//!
//! The crate is built around two pieces: a [`TwiddleCache`] of pre-computed
//! roots of unity keyed by the transform size exponent, and transform
//! [`Kernel`]s that consume it. [`FftEngine`] ties them together: ensure the
//! cache covers an exponent once, then run any number of forward and inverse
//! transforms of that size without recomputing trigonometry — the usage
//! pattern of convolution-based big-number multiplication, where the same
//! sizes recur constantly.
//!
//! Transforms operate in place on split real/imaginary buffers of length
//! exactly `2^k`. The forward direction is unnormalized; the inverse applies
//! the full `1/N` factor, so inverse ∘ forward is the identity up to
//! floating-point rounding.
//!
//! ```
//! use cachedfft::FftEngine;
//!
//! let mut engine = FftEngine::<f64>::new();
//! engine.ensure_tables(3);
//!
//! let mut reals: Vec<f64> = (1..=8).map(f64::from).collect();
//! let mut imags = vec![0.0; 8];
//! engine.fft_forward(&mut reals, &mut imags, 3);
//! engine.fft_inverse(&mut reals, &mut imags, 3);
//! assert!((reals[5] - 6.0).abs() < 1e-12);
//! ```
//!
//! Building tables is the only mutating operation. After a single-threaded
//! warm-up, a shared `&FftEngine` can transform on as many threads as you
//! like, each on its own buffers.

use num_traits::{Float, FloatConst};

mod bit_rev;
mod cache;
mod kernels;
mod reference;
pub mod utils;

pub use cache::{TwiddleCache, TwiddleTable};
pub use kernels::{Direction, DitKernel, Kernel};
pub use reference::ReferenceKernel;

/// Forward/inverse transform pair over an owned [`TwiddleCache`].
///
/// The kernel strategy is chosen at construction: [`DitKernel`] is the
/// default fast path, [`ReferenceKernel`] the naive variant. Both satisfy the
/// same contract, so swapping them never changes results beyond rounding.
pub struct FftEngine<T, K = DitKernel> {
    cache: TwiddleCache<T>,
    kernel: K,
}

impl<T: Float + FloatConst> FftEngine<T, DitKernel> {
    /// Create an engine with an empty cache and the default kernel.
    pub fn new() -> Self {
        Self::with_kernel(DitKernel)
    }
}

impl<T: Float + FloatConst> Default for FftEngine<T, DitKernel> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float + FloatConst, K: Kernel<T>> FftEngine<T, K> {
    /// Create an engine with an empty cache and the given kernel strategy.
    pub fn with_kernel(kernel: K) -> Self {
        Self {
            cache: TwiddleCache::new(),
            kernel,
        }
    }

    /// Guarantee the cache covers exponent `k` (and every smaller exponent).
    ///
    /// Idempotent. This is the engine's only `&mut self` operation; call it
    /// for the largest size you need before sharing the engine across
    /// threads.
    pub fn ensure_tables(&mut self, k: u32) {
        self.cache.ensure_tables(k);
    }

    /// The engine's twiddle cache.
    pub fn cache(&self) -> &TwiddleCache<T> {
        &self.cache
    }

    /// In-place forward DFT of a sequence of exactly `2^k` complex numbers:
    /// `X[m] = Σ x[n]·exp(-2πi·m·n/N)`. Unnormalized.
    ///
    /// # Panics
    ///
    /// Panics if the buffer lengths differ, are not exactly `2^k`, or if
    /// [`ensure_tables`](Self::ensure_tables) has not covered `k`.
    pub fn fft_forward(&self, reals: &mut [T], imags: &mut [T], k: u32) {
        check_buffers(reals, imags, k);
        if k == 0 {
            return;
        }
        let table = self.cache.table_for(k);
        self.kernel.apply(table, reals, imags, Direction::Forward);
    }

    /// In-place inverse DFT: `x[n] = (1/N)·Σ X[m]·exp(+2πi·m·n/N)`.
    ///
    /// Runs the butterfly network with conjugate twiddles, then scales every
    /// element by `1/N`, so `fft_inverse(fft_forward(x)) == x` up to
    /// floating-point rounding.
    ///
    /// # Panics
    ///
    /// Same conditions as [`fft_forward`](Self::fft_forward).
    pub fn fft_inverse(&self, reals: &mut [T], imags: &mut [T], k: u32) {
        check_buffers(reals, imags, k);
        if k == 0 {
            return;
        }
        let table = self.cache.table_for(k);
        self.kernel.apply(table, reals, imags, Direction::Reverse);

        let scaling_factor = T::one() / T::from(reals.len()).unwrap();
        for (z_re, z_im) in reals.iter_mut().zip(imags.iter_mut()) {
            *z_re = *z_re * scaling_factor;
            *z_im = *z_im * scaling_factor;
        }
    }
}

fn check_buffers<T>(reals: &[T], imags: &[T], k: u32) {
    assert!(k < usize::BITS, "exponent {k} is out of range");
    assert_eq!(
        reals.len(),
        imags.len(),
        "real and imaginary buffers must be of equal length"
    );
    assert_eq!(
        reals.len(),
        1usize << k,
        "buffer length must be exactly 2^{k}"
    );
}

#[cfg(test)]
mod tests {
    use utilities::rustfft::{num_complex::Complex64, FftPlanner};
    use utilities::{assert_float_closeness, gen_random_signal};

    use super::*;

    #[test]
    fn forward_matches_rustfft() {
        let mut engine = FftEngine::<f64>::new();
        engine.ensure_tables(12);

        for k in 1..=12 {
            let n = 1usize << k;

            let mut reals = vec![0.0; n];
            let mut imags = vec![0.0; n];
            gen_random_signal(&mut reals, &mut imags);

            let mut buffer: Vec<Complex64> = reals
                .iter()
                .zip(imags.iter())
                .map(|(&z_re, &z_im)| Complex64::new(z_re, z_im))
                .collect();

            engine.fft_forward(&mut reals, &mut imags, k);

            let mut planner = FftPlanner::new();
            let fft = planner.plan_fft_forward(n);
            fft.process(&mut buffer);

            for (i, (z_re, z_im)) in reals.iter().zip(imags.iter()).enumerate() {
                assert_float_closeness(*z_re, buffer[i].re, 1e-8);
                assert_float_closeness(*z_im, buffer[i].im, 1e-8);
            }
        }
    }

    #[test]
    fn inverse_matches_rustfft() {
        let mut engine = FftEngine::<f64>::new();
        engine.ensure_tables(10);

        for k in 1..=10 {
            let n = 1usize << k;

            let mut reals = vec![0.0; n];
            let mut imags = vec![0.0; n];
            gen_random_signal(&mut reals, &mut imags);

            let mut buffer: Vec<Complex64> = reals
                .iter()
                .zip(imags.iter())
                .map(|(&z_re, &z_im)| Complex64::new(z_re, z_im))
                .collect();

            engine.fft_inverse(&mut reals, &mut imags, k);

            // rustfft's inverse is unnormalized; ours carries the 1/N factor.
            let mut planner = FftPlanner::new();
            let fft = planner.plan_fft_inverse(n);
            fft.process(&mut buffer);
            let scale = 1.0 / n as f64;

            for (i, (z_re, z_im)) in reals.iter().zip(imags.iter()).enumerate() {
                assert_float_closeness(*z_re, buffer[i].re * scale, 1e-8);
                assert_float_closeness(*z_im, buffer[i].im * scale, 1e-8);
            }
        }
    }

    #[test]
    fn round_trip_recovers_input() {
        let mut engine = FftEngine::<f64>::new();
        engine.ensure_tables(12);

        for k in 0..=12 {
            let n = 1usize << k;

            let mut reals = vec![0.0; n];
            let mut imags = vec![0.0; n];
            gen_random_signal(&mut reals, &mut imags);
            let (orig_re, orig_im) = (reals.clone(), imags.clone());

            engine.fft_forward(&mut reals, &mut imags, k);
            engine.fft_inverse(&mut reals, &mut imags, k);

            for i in 0..n {
                assert_float_closeness(reals[i], orig_re[i], 1e-10);
                assert_float_closeness(imags[i], orig_im[i], 1e-10);
            }
        }
    }

    #[test]
    fn round_trip_f32() {
        let mut engine = FftEngine::<f32>::new();
        engine.ensure_tables(10);

        for k in 0..=10 {
            let n = 1usize << k;

            let mut reals = vec![0.0f32; n];
            let mut imags = vec![0.0f32; n];
            gen_random_signal(&mut reals, &mut imags);
            let (orig_re, orig_im) = (reals.clone(), imags.clone());

            engine.fft_forward(&mut reals, &mut imags, k);
            engine.fft_inverse(&mut reals, &mut imags, k);

            for i in 0..n {
                assert_float_closeness(reals[i], orig_re[i], 1e-3);
                assert_float_closeness(imags[i], orig_im[i], 1e-3);
            }
        }
    }

    #[test]
    fn length_one_transform_is_identity() {
        let mut engine = FftEngine::<f64>::new();
        engine.ensure_tables(0);

        let mut reals = [42.5];
        let mut imags = [-7.25];

        engine.fft_forward(&mut reals, &mut imags, 0);
        assert_eq!(reals, [42.5]);
        assert_eq!(imags, [-7.25]);

        engine.fft_inverse(&mut reals, &mut imags, 0);
        assert_eq!(reals, [42.5]);
        assert_eq!(imags, [-7.25]);
    }

    #[test]
    fn known_case_n2() {
        let mut engine = FftEngine::<f64>::new();
        engine.ensure_tables(1);

        let mut reals = [1.0, 2.0];
        let mut imags = [0.0, 0.0];

        engine.fft_forward(&mut reals, &mut imags, 1);
        assert_float_closeness(reals[0], 3.0, 1e-12);
        assert_float_closeness(reals[1], -1.0, 1e-12);
        assert_float_closeness(imags[0], 0.0, 1e-12);
        assert_float_closeness(imags[1], 0.0, 1e-12);

        engine.fft_inverse(&mut reals, &mut imags, 1);
        assert_float_closeness(reals[0], 1.0, 1e-12);
        assert_float_closeness(reals[1], 2.0, 1e-12);
    }

    #[test]
    fn known_case_n4() {
        let mut engine = FftEngine::<f64>::new();
        engine.ensure_tables(2);

        let mut reals = [1.0, 2.0, 3.0, 4.0];
        let mut imags = [0.0; 4];

        engine.fft_forward(&mut reals, &mut imags, 2);
        let expected = [(10.0, 0.0), (-2.0, 2.0), (-2.0, 0.0), (-2.0, -2.0)];
        for (i, (e_re, e_im)) in expected.iter().enumerate() {
            assert_float_closeness(reals[i], *e_re, 1e-12);
            assert_float_closeness(imags[i], *e_im, 1e-12);
        }

        engine.fft_inverse(&mut reals, &mut imags, 2);
        for (i, e_re) in [1.0, 2.0, 3.0, 4.0].iter().enumerate() {
            assert_float_closeness(reals[i], *e_re, 1e-12);
            assert_float_closeness(imags[i], 0.0, 1e-12);
        }
    }

    #[test]
    fn forward_is_linear() {
        let mut engine = FftEngine::<f64>::new();
        engine.ensure_tables(8);

        let n = 1usize << 8;
        let a = 3.5;

        let mut x_re = vec![0.0; n];
        let mut x_im = vec![0.0; n];
        let mut y_re = vec![0.0; n];
        let mut y_im = vec![0.0; n];
        gen_random_signal(&mut x_re, &mut x_im);
        gen_random_signal(&mut y_re, &mut y_im);

        let mut sum_re: Vec<f64> = x_re.iter().zip(&y_re).map(|(x, y)| x + a * y).collect();
        let mut sum_im: Vec<f64> = x_im.iter().zip(&y_im).map(|(x, y)| x + a * y).collect();

        engine.fft_forward(&mut x_re, &mut x_im, 8);
        engine.fft_forward(&mut y_re, &mut y_im, 8);
        engine.fft_forward(&mut sum_re, &mut sum_im, 8);

        for i in 0..n {
            assert_float_closeness(sum_re[i], x_re[i] + a * y_re[i], 1e-9);
            assert_float_closeness(sum_im[i], x_im[i] + a * y_im[i], 1e-9);
        }
    }

    #[test]
    fn ensure_tables_covers_prefix() {
        let mut engine = FftEngine::<f64>::new();
        assert_eq!(engine.cache().max_exponent(), None);

        engine.ensure_tables(6);
        assert!(engine.cache().covers(0));
        assert!(engine.cache().covers(6));
        assert!(!engine.cache().covers(7));
        assert_eq!(engine.cache().max_exponent(), Some(6));
    }

    #[test]
    #[should_panic(expected = "no twiddle table for exponent 2")]
    fn transform_without_tables_panics() {
        let engine = FftEngine::<f64>::new();
        let mut reals = [0.0; 4];
        let mut imags = [0.0; 4];
        engine.fft_forward(&mut reals, &mut imags, 2);
    }

    #[test]
    #[should_panic(expected = "buffer length must be exactly 2^3")]
    fn wrong_length_panics() {
        let mut engine = FftEngine::<f64>::new();
        engine.ensure_tables(3);
        let mut reals = [0.0; 4];
        let mut imags = [0.0; 4];
        engine.fft_forward(&mut reals, &mut imags, 3);
    }
}
