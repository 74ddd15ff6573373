//! Bit-field insertion into 32-bit command subwords.
//!
//! [`pack`] is the primitive every encoder builds on. It keeps the low `width`
//! bits of the value and drops the rest, so oversized inputs wrap instead of
//! spilling into a neighbouring field. [`put`] is the same operation with a
//! width check that only fires in debug builds with the `validate` feature.

/// All-ones mask of `width` bits.
#[inline]
pub const fn mask(width: u32) -> u32 {
    if width >= 32 {
        u32::MAX
    } else {
        (1u32 << width) - 1
    }
}

/// Inserts the low `width` bits of `value` at bit offset `shift`.
#[inline]
pub const fn pack(value: u32, shift: u32, width: u32) -> u32 {
    (value & mask(width)) << shift
}

/// Reads back a field written by [`pack`].
#[inline]
pub const fn extract(word: u32, shift: u32, width: u32) -> u32 {
    (word >> shift) & mask(width)
}

/// Whether `value` survives a `width`-bit field without truncation.
#[inline]
pub const fn fits(value: u32, width: u32) -> bool {
    value & !mask(width) == 0
}

/// [`pack`] for fields whose inputs are expected to already be in range.
#[inline]
pub const fn put(value: u32, shift: u32, width: u32) -> u32 {
    crate::validate::assert_field_fits(value, width);
    pack(value, shift, width)
}

/// Places the opcode byte in the top 8 bits of a `hi` subword.
#[inline]
pub const fn opcode(op: u8) -> u32 {
    pack(op as u32, 24, 8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn mask_edges() {
        assert_eq!(mask(0), 0);
        assert_eq!(mask(1), 1);
        assert_eq!(mask(12), 0xFFF);
        assert_eq!(mask(24), 0x00FF_FFFF);
        assert_eq!(mask(32), u32::MAX);
    }

    #[test]
    fn wide_value_is_truncated_not_spilled() {
        // 31 into a 4-bit slot leaves 15, the neighbouring bits stay clear.
        assert_eq!(pack(31, 20, 4), 0x00F0_0000);
        assert_eq!(pack(0x1234, 0, 12), 0x234);
        assert_eq!(opcode(0xFC), 0xFC00_0000);
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 512,
            rng_algorithm: proptest::test_runner::RngAlgorithm::ChaCha,
            rng_seed: proptest::test_runner::RngSeed::Fixed(0x0F3D_E3),
            .. ProptestConfig::default()
        })]

        #[test]
        fn extract_inverts_pack(
            (shift, width) in (0u32..32).prop_flat_map(|s| (Just(s), 1u32..=(32 - s))),
            raw in any::<u32>(),
        ) {
            let v = raw & mask(width);
            prop_assert_eq!(extract(pack(v, shift, width), shift, width), v);
        }

        #[test]
        fn pack_ignores_bits_above_width(
            (shift, width) in (0u32..32).prop_flat_map(|s| (Just(s), 1u32..=(32 - s))),
            v in any::<u32>(),
        ) {
            prop_assert_eq!(pack(v, shift, width), pack(v & mask(width), shift, width));
            prop_assert!(fits(v & mask(width), width));
        }
    }
}
