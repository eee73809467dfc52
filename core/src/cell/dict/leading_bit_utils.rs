use num_bigint::BigUint;
use num_traits::{One, Zero};

// Keys inside the trie code carry one extra leading bit set to 1, so that leading zeros of
// the key survive as part of the BigUint. Everything here except `add_leading_bit` expects it.

pub(super) fn all_bits_same(val: &BigUint) -> bool {
    if val.is_zero() {
        return true;
    }
    let origin_bits = val.bits();
    let all_zero = (val - 1u32).bits() != origin_bits;
    let all_ones = (val + 1u32).bits() != origin_bits;
    all_zero || all_ones
}

pub(super) fn common_prefix_len(a: &BigUint, b: &BigUint) -> usize {
    let xor = a ^ b;
    (a.bits() - xor.bits() - 1) as usize
}

pub(super) fn remove_leading_bit(val: &BigUint) -> BigUint {
    let mask = BigUint::one() << (val.bits() - 1);
    val ^ mask
}

pub(super) fn add_leading_bit(val: &BigUint, val_bit_len: usize) -> BigUint {
    (BigUint::one() << val_bit_len) | val
}

/// Width of the length field in `hml_long`/`hml_same` labels: `#<= m` takes `ceil(log2(m + 1))` bits.
pub(super) fn label_len_width(max_len: usize) -> usize {
    (usize::BITS - max_len.leading_zeros()) as usize
}
