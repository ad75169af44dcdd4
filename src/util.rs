//! Word-level bit primitives shared by the matchers.

/// Number of positions stored in one occurrence word.
pub(crate) const WORD_BITS: usize = 64;

/// Isolate the lowest set bit (`x & -x`).
#[inline(always)]
pub(crate) fn blsi(x: u64) -> u64 {
    x & x.wrapping_neg()
}

/// Clear the lowest set bit (`x & (x - 1)`).
#[inline(always)]
pub(crate) fn blsr(x: u64) -> u64 {
    x & x.wrapping_sub(1)
}

/// Mask with the `bits` lowest bits set. Saturates at a full word.
#[inline(always)]
pub(crate) fn bit_mask_lsb(bits: usize) -> u64 {
    if bits >= WORD_BITS {
        u64::MAX
    } else {
        (1u64 << bits) - 1
    }
}

/// Length of the shared leading run of two sequences.
#[inline]
pub(crate) fn common_prefix_len<S: PartialEq>(a: &[S], b: &[S]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}

#[cfg(test)]
#[cfg_attr(coverage, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn test_blsi() {
        assert_eq!(blsi(0), 0);
        assert_eq!(blsi(0b1011_0000), 0b1_0000);
        assert_eq!(blsi(u64::MAX), 1);
        assert_eq!(blsi(1 << 63), 1 << 63);
    }

    #[test]
    fn test_blsr() {
        assert_eq!(blsr(0), 0);
        assert_eq!(blsr(0b1011_0000), 0b1010_0000);
        assert_eq!(blsr(1 << 63), 0);
    }

    #[test]
    fn test_bit_mask_lsb() {
        assert_eq!(bit_mask_lsb(0), 0);
        assert_eq!(bit_mask_lsb(3), 0b111);
        assert_eq!(bit_mask_lsb(63), u64::MAX >> 1);
        assert_eq!(bit_mask_lsb(64), u64::MAX);
        assert_eq!(bit_mask_lsb(200), u64::MAX);
    }

    #[test]
    fn test_common_prefix_len() {
        assert_eq!(common_prefix_len(b"martha", b"marhta"), 3);
        assert_eq!(common_prefix_len(b"abc", b"abc"), 3);
        assert_eq!(common_prefix_len(b"", b"abc"), 0);
        assert_eq!(common_prefix_len(b"xbc", b"abc"), 0);
    }
}
