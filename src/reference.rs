//! Slow but obviously correct transform variant.
//!
//! [`ReferenceKernel`] is the textbook iterative Cooley-Tukey loop over the
//! same cached table and permutation the fast kernel uses. It exists as the
//! scalar reference implementation: an interchangeable strategy for callers
//! that want predictable plain code, and the oracle the fast kernel is tested
//! against.

use num_traits::Float;

use crate::cache::TwiddleTable;
use crate::kernels::{Direction, Kernel};

/// Naive radix-2 transform satisfying the same contract as the fast kernel.
pub struct ReferenceKernel;

impl<T: Float> Kernel<T> for ReferenceKernel {
    fn apply(
        &self,
        table: &TwiddleTable<T>,
        reals: &mut [T],
        imags: &mut [T],
        direction: Direction,
    ) {
        let n = reals.len();
        debug_assert_eq!(n, table.size());

        crate::bit_rev::permute(reals, table.bit_rev());
        crate::bit_rev::permute(imags, table.bit_rev());

        let sign = direction.sign::<T>();
        let twiddles_re = table.twiddles_re();
        let twiddles_im = table.twiddles_im();

        let mut size = 2;
        while size <= n {
            let half = size / 2;
            let stride = n / size;

            for start in (0..n).step_by(size) {
                for j in 0..half {
                    let w_re = twiddles_re[j * stride];
                    let w_im = sign * twiddles_im[j * stride];

                    let a = start + j;
                    let b = start + j + half;

                    let u_re = reals[a];
                    let u_im = imags[a];
                    let v_re = reals[b];
                    let v_im = imags[b];

                    let wz_re = w_re * v_re - w_im * v_im;
                    let wz_im = w_re * v_im + w_im * v_re;

                    reals[a] = u_re + wz_re;
                    imags[a] = u_im + wz_im;
                    reals[b] = u_re - wz_re;
                    imags[b] = u_im - wz_im;
                }
            }

            size <<= 1;
        }
    }
}
