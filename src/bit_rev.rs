//! Bit-reversal permutation support for the decimation step.
//!
//! The permutation for a given size is computed once, stored in the twiddle
//! table, and replayed by every transform of that size.

/// Reverse the low `log_n` bits of `x`.
pub(crate) fn reverse(x: usize, log_n: u32) -> usize {
    if log_n == 0 {
        return x;
    }
    x.reverse_bits() >> (usize::BITS - log_n)
}

/// Build the bit-reversal permutation of indices `0..2^log_n`.
pub(crate) fn bit_rev_indices(log_n: u32) -> Vec<usize> {
    (0..1usize << log_n).map(|i| reverse(i, log_n)).collect()
}

/// Apply a precomputed bit-reversal permutation in place.
///
/// Each index pair is swapped once, when the index is smaller than its
/// reversal. The permutation is an involution, so applying it twice restores
/// the original order.
pub(crate) fn permute<T>(buf: &mut [T], indices: &[usize]) {
    debug_assert_eq!(buf.len(), indices.len());
    for (i, &j) in indices.iter().enumerate() {
        if i < j {
            buf.swap(i, j);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_permutations() {
        assert_eq!(bit_rev_indices(0), vec![0]);
        assert_eq!(bit_rev_indices(1), vec![0, 1]);
        assert_eq!(bit_rev_indices(2), vec![0, 2, 1, 3]);
        assert_eq!(bit_rev_indices(3), vec![0, 4, 2, 6, 1, 5, 3, 7]);
    }

    #[test]
    fn permute_is_an_involution() {
        let indices = bit_rev_indices(5);
        let original: Vec<usize> = (0..32).collect();

        let mut buf = original.clone();
        permute(&mut buf, &indices);
        assert_ne!(buf, original);

        permute(&mut buf, &indices);
        assert_eq!(buf, original);
    }

    #[test]
    fn permute_reorders_by_reversed_index() {
        let indices = bit_rev_indices(3);
        let mut buf: Vec<usize> = (0..8).collect();
        permute(&mut buf, &indices);
        assert_eq!(buf, vec![0, 4, 2, 6, 1, 5, 3, 7]);
    }
}
