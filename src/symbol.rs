//! Atoms that can be compared by the Jaro matchers.

use std::hash::Hash;

/// A comparable atom of a sequence.
///
/// Every symbol can be hashed into an occurrence index. Symbols whose value
/// fits in a byte additionally report it through [`Symbol::extended_ascii`],
/// which lets the index answer from a dense table instead of a hash map.
pub trait Symbol: Copy + Eq + Hash {
    /// Byte value of this symbol, if it has one.
    fn extended_ascii(self) -> Option<u8>;
}

impl Symbol for u8 {
    #[inline(always)]
    fn extended_ascii(self) -> Option<u8> {
        Some(self)
    }
}

impl Symbol for char {
    #[inline(always)]
    fn extended_ascii(self) -> Option<u8> {
        u8::try_from(self).ok()
    }
}

macro_rules! impl_symbol_for_int {
    ($($t:ty),*) => {
        $(
            impl Symbol for $t {
                #[inline(always)]
                fn extended_ascii(self) -> Option<u8> {
                    u8::try_from(self).ok()
                }
            }
        )*
    };
}

impl_symbol_for_int!(u16, u32, u64, usize, i32, i64);
