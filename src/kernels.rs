//! Radix-2 butterfly kernels and the decimation-in-time stage driver.
//!
//! The butterflies are written over split real/imaginary slices and annotated
//! for runtime SIMD dispatch. Size-2 and size-4 butterflies have their twiddle
//! factors hard-coded; the general kernel reads twiddles out of the cached
//! table with a power-of-two stride, so a single `N/2`-entry table serves
//! every stage of an `N`-point transform.

use num_traits::Float;

use crate::cache::TwiddleTable;

/// Transform direction.
///
/// `Reverse` runs the same butterfly network with complex-conjugate twiddle
/// factors. The `1/N` scaling of the inverse transform is applied by the
/// caller, not the kernel.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Leave the exponent term in the twiddle factor alone
    Forward = 1,
    /// Multiply the exponent term in the twiddle factor by -1
    Reverse = -1,
}

impl Direction {
    /// Sign applied to the imaginary part of every twiddle factor.
    pub(crate) fn sign<T: Float>(self) -> T {
        match self {
            Direction::Forward => T::one(),
            Direction::Reverse => -T::one(),
        }
    }
}

/// A transform strategy over `{table, sequence, direction}`.
///
/// Implementations rewrite the sequence in place with its unnormalized DFT
/// (or conjugate-twiddle DFT for [`Direction::Reverse`]), drawing twiddle
/// factors and the bit-reversal permutation from the cached table. Swapping
/// implementations must not change results beyond floating-point rounding.
pub trait Kernel<T: Float> {
    /// Apply the transform to `reals`/`imags`, whose common length must equal
    /// the table's size.
    fn apply(&self, table: &TwiddleTable<T>, reals: &mut [T], imags: &mut [T], direction: Direction);
}

/// The fast path: iterative decimation-in-time over cached twiddles.
///
/// Permutes the input into bit-reversed order, then runs `log2(N)` butterfly
/// stages from size 2 up to size `N`.
pub struct DitKernel;

impl<T: Float> Kernel<T> for DitKernel {
    fn apply(
        &self,
        table: &TwiddleTable<T>,
        reals: &mut [T],
        imags: &mut [T],
        direction: Direction,
    ) {
        let log_n = table.log_n();
        debug_assert_eq!(reals.len(), table.size());

        crate::bit_rev::permute(reals, table.bit_rev());
        crate::bit_rev::permute(imags, table.bit_rev());

        for stage in 0..log_n {
            let dist = 1usize << stage;
            let chunk_size = dist << 1;

            if chunk_size == 2 {
                fft_dit_chunk_2(reals, imags);
            } else if chunk_size == 4 {
                fft_dit_chunk_4(reals, imags, direction);
            } else {
                // Stage butterflies need w_j = exp(-2πi·j/chunk_size); in the
                // full N/2-entry table those sit at j * (N / chunk_size).
                let stride = 1usize << (log_n - 1 - stage);
                fft_dit_chunk_n(
                    reals,
                    imags,
                    table.twiddles_re(),
                    table.twiddles_im(),
                    stride,
                    dist,
                    direction,
                );
            }
        }
    }
}

/// General DIT butterfly stage with strided twiddle lookup.
#[multiversion::multiversion(targets("x86_64+avx512f+avx512bw+avx512cd+avx512dq+avx512vl", // x86_64-v4
                                     "x86_64+avx2+fma", // x86_64-v3
                                     "x86_64+sse4.2", // x86_64-v2
                                     "x86+avx512f+avx512bw+avx512cd+avx512dq+avx512vl",
                                     "x86+avx2+fma",
                                     "x86+sse4.2",
                                     "x86+sse2",
                                     "aarch64+neon", // ARM64 with NEON (Apple Silicon M1/M2)
))]
#[inline]
pub(crate) fn fft_dit_chunk_n<T: Float>(
    reals: &mut [T],
    imags: &mut [T],
    twiddles_re: &[T],
    twiddles_im: &[T],
    stride: usize,
    dist: usize,
    direction: Direction,
) {
    let chunk_size = dist << 1;
    let sign = direction.sign::<T>();

    reals
        .chunks_exact_mut(chunk_size)
        .zip(imags.chunks_exact_mut(chunk_size))
        .for_each(|(reals_chunk, imags_chunk)| {
            let (reals_s0, reals_s1) = reals_chunk.split_at_mut(dist);
            let (imags_s0, imags_s1) = imags_chunk.split_at_mut(dist);

            reals_s0
                .iter_mut()
                .zip(reals_s1.iter_mut())
                .zip(imags_s0.iter_mut())
                .zip(imags_s1.iter_mut())
                .zip(twiddles_re.iter().step_by(stride))
                .zip(twiddles_im.iter().step_by(stride))
                .for_each(|(((((re_s0, re_s1), im_s0), im_s1), w_re), w_im)| {
                    let w_re = *w_re;
                    let w_im = sign * *w_im;

                    let in0_re = *re_s0;
                    let in0_im = *im_s0;
                    let in1_re = *re_s1;
                    let in1_im = *im_s1;

                    let wz_re = w_re * in1_re - w_im * in1_im;
                    let wz_im = w_re * in1_im + w_im * in1_re;

                    *re_s0 = in0_re + wz_re;
                    *im_s0 = in0_im + wz_im;
                    *re_s1 = in0_re - wz_re;
                    *im_s1 = in0_im - wz_im;
                });
        });
}

/// `chunk_size == 4`, so hard-code the twiddle factors (`1` and `∓i`)
#[multiversion::multiversion(targets("x86_64+avx512f+avx512bw+avx512cd+avx512dq+avx512vl", // x86_64-v4
                                     "x86_64+avx2+fma", // x86_64-v3
                                     "x86_64+sse4.2", // x86_64-v2
                                     "x86+avx512f+avx512bw+avx512cd+avx512dq+avx512vl",
                                     "x86+avx2+fma",
                                     "x86+sse4.2",
                                     "x86+sse2",
                                     "aarch64+neon", // ARM64 with NEON (Apple Silicon M1/M2)
))]
#[inline]
pub(crate) fn fft_dit_chunk_4<T: Float>(reals: &mut [T], imags: &mut [T], direction: Direction) {
    const DIST: usize = 2;
    const CHUNK_SIZE: usize = DIST << 1;

    reals
        .chunks_exact_mut(CHUNK_SIZE)
        .zip(imags.chunks_exact_mut(CHUNK_SIZE))
        .for_each(|(reals_chunk, imags_chunk)| {
            let (reals_s0, reals_s1) = reals_chunk.split_at_mut(DIST);
            let (imags_s0, imags_s1) = imags_chunk.split_at_mut(DIST);

            // First pair (w = 1)
            let in0_re = reals_s0[0];
            let in1_re = reals_s1[0];
            let in0_im = imags_s0[0];
            let in1_im = imags_s1[0];

            reals_s0[0] = in0_re + in1_re;
            imags_s0[0] = in0_im + in1_im;
            reals_s1[0] = in0_re - in1_re;
            imags_s1[0] = in0_im - in1_im;

            // Second pair (w = -i forward, +i reverse)
            let in0_re = reals_s0[1];
            let in1_re = reals_s1[1];
            let in0_im = imags_s0[1];
            let in1_im = imags_s1[1];

            let (wz_re, wz_im) = match direction {
                Direction::Forward => (in1_im, -in1_re),
                Direction::Reverse => (-in1_im, in1_re),
            };

            reals_s0[1] = in0_re + wz_re;
            imags_s0[1] = in0_im + wz_im;
            reals_s1[1] = in0_re - wz_re;
            imags_s1[1] = in0_im - wz_im;
        });
}

/// `chunk_size == 2`, so skip the twiddle multiply entirely
#[multiversion::multiversion(targets("x86_64+avx512f+avx512bw+avx512cd+avx512dq+avx512vl", // x86_64-v4
                                     "x86_64+avx2+fma", // x86_64-v3
                                     "x86_64+sse4.2", // x86_64-v2
                                     "x86+avx512f+avx512bw+avx512cd+avx512dq+avx512vl",
                                     "x86+avx2+fma",
                                     "x86+sse4.2",
                                     "x86+sse2",
                                     "aarch64+neon", // ARM64 with NEON (Apple Silicon M1/M2)
))]
#[inline]
pub(crate) fn fft_dit_chunk_2<T: Float>(reals: &mut [T], imags: &mut [T]) {
    reals
        .chunks_exact_mut(2)
        .zip(imags.chunks_exact_mut(2))
        .for_each(|(reals_chunk, imags_chunk)| {
            let z0_re = reals_chunk[0];
            let z0_im = imags_chunk[0];
            let z1_re = reals_chunk[1];
            let z1_im = imags_chunk[1];

            reals_chunk[0] = z0_re + z1_re;
            imags_chunk[0] = z0_im + z1_im;
            reals_chunk[1] = z0_re - z1_re;
            imags_chunk[1] = z0_im - z1_im;
        });
}
