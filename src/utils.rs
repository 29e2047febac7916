//! Utility functions such as interleave/deinterleave

#[cfg(feature = "complex-nums")]
use num_complex::Complex;

#[cfg(feature = "complex-nums")]
use bytemuck::cast_slice;

#[cfg(feature = "complex-nums")]
use num_traits::Float;

/// Separates interleaved `[re0, im0, re1, im1, ..]` data into split
/// `(reals, imags)` vectors, for any even or odd length.
#[multiversion::multiversion(
    targets(
    "x86_64+avx2+fma", // x86_64-v3
    "x86_64+sse4.2", // x86_64-v2
    "x86+avx2+fma",
    "x86+sse4.2",
    "x86+sse2",
    ))]
pub fn deinterleave<T: Copy + Default>(input: &[T]) -> (Vec<T>, Vec<T>) {
    let out_len = input.len() / 2;
    // Zeroed output buffers keep this loop trivially auto-vectorizable.
    let mut reals = vec![T::default(); out_len];
    let mut imags = vec![T::default(); out_len];

    input
        .chunks_exact(2)
        .zip(reals.iter_mut())
        .zip(imags.iter_mut())
        .for_each(|((pair, re), im)| {
            *re = pair[0];
            *im = pair[1];
        });

    (reals, imags)
}

/// Utility function to separate a slice of [`Complex<f64>`]
/// into a pair of vectors of real and imaginary components.
#[cfg(feature = "complex-nums")]
pub fn deinterleave_complex64(signal: &[Complex<f64>]) -> (Vec<f64>, Vec<f64>) {
    let complex_t: &[f64] = cast_slice(signal);
    deinterleave(complex_t)
}

/// Utility function to separate a slice of [`Complex<f32>`]
/// into a pair of vectors of real and imaginary components.
#[cfg(feature = "complex-nums")]
pub fn deinterleave_complex32(signal: &[Complex<f32>]) -> (Vec<f32>, Vec<f32>) {
    let complex_t: &[f32] = cast_slice(signal);
    deinterleave(complex_t)
}

/// Utility function to combine separate vectors of real and imaginary
/// components into a single vector of complex number structs.
///
/// # Panics
///
/// Panics if `reals.len() != imags.len()`.
#[cfg(feature = "complex-nums")]
pub fn combine_re_im<T: Float>(reals: &[T], imags: &[T]) -> Vec<Complex<T>> {
    assert_eq!(reals.len(), imags.len());

    reals
        .iter()
        .zip(imags.iter())
        .map(|(z_re, z_im)| Complex::new(*z_re, *z_im))
        .collect()
}
