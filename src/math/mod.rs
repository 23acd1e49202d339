//! Bit-width helpers and the operator tokens shared with the symbolic engine.

mod operator;

pub use operator::OperatorId;

/// Width or offset of a value in bits.
pub type BitCount = u8;

/// Returns a mask of `bit_count` set bits starting at `bit_offset`.
///
/// Counts of 64 or more saturate to a full mask before shifting; bits shifted past
/// the top are discarded.
pub const fn fill(bit_count: BitCount, bit_offset: BitCount) -> u64 {
    let base = if bit_count >= 64 {
        u64::MAX
    } else {
        (1u64 << bit_count) - 1
    };
    if bit_offset >= 64 { 0 } else { base << bit_offset }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_produces_contiguous_ranges() {
        assert_eq!(fill(0, 0), 0);
        assert_eq!(fill(8, 0), 0xff);
        assert_eq!(fill(8, 8), 0xff00);
        assert_eq!(fill(64, 0), u64::MAX);
        assert_eq!(fill(1, 63), 1 << 63);
    }

    #[test]
    fn fill_discards_bits_past_the_top() {
        assert_eq!(fill(16, 56), 0xff00_0000_0000_0000);
        assert_eq!(fill(4, 64), 0);
    }
}
