//! Property tests for register descriptor invariants.

use liftir::arch::RegisterError;
use liftir::{RegisterDesc, RegisterFlags};
use proptest::prelude::*;

fn arb_flags() -> impl Strategy<Value = RegisterFlags> {
    any::<u8>().prop_map(RegisterFlags::from_bits_truncate)
}

/// Flags that always satisfy the special-register rules.
fn arb_plain_flags() -> impl Strategy<Value = RegisterFlags> {
    prop::sample::select(vec![
        RegisterFlags::VIRTUAL,
        RegisterFlags::LOCAL,
        RegisterFlags::PHYSICAL,
        RegisterFlags::PHYSICAL | RegisterFlags::VOLATILE,
        RegisterFlags::READ_ONLY,
        RegisterFlags::PHYSICAL | RegisterFlags::FLAGS,
        RegisterFlags::PHYSICAL | RegisterFlags::STACK_POINTER,
    ])
}

/// `(bit_count, bit_offset)` pairs that fit inside 64 bits.
fn arb_range() -> impl Strategy<Value = (u8, u8)> {
    (1u8..=64).prop_flat_map(|count| (Just(count), 0u8..=(64 - count)))
}

proptest! {
    #[test]
    fn construction_matches_is_valid(
        flags in arb_flags(),
        id in any::<u64>(),
        count in any::<u8>(),
        offset in any::<u8>(),
    ) {
        match RegisterDesc::try_new(flags, id, count, offset) {
            Ok(desc) => {
                prop_assert!(desc.is_valid());
                prop_assert!(desc.bit_count() > 0);
                prop_assert!(desc.bit_count() as u16 + desc.bit_offset() as u16 <= 64);
                if desc.is_flags() || desc.is_stack_pointer() {
                    prop_assert!(desc.is_physical());
                    prop_assert!(!desc.is_volatile() && !desc.is_read_only());
                }
                prop_assert!(!(desc.is_physical() && desc.is_local()));
            }
            Err(RegisterError::ZeroWidth) => {
                prop_assert_eq!(count, 0);
            }
            Err(RegisterError::OutOfRange { .. }) => {
                prop_assert!(count as u16 + offset as u16 > 64);
            }
            Err(RegisterError::InvalidSpecialRegister) => {
                prop_assert!(flags.intersects(RegisterFlags::FLAGS | RegisterFlags::STACK_POINTER));
            }
            Err(RegisterError::PhysicalLocal) => {
                prop_assert!(flags.contains(RegisterFlags::PHYSICAL | RegisterFlags::LOCAL));
            }
        }
    }

    #[test]
    fn mask_is_contiguous_run_at_offset(flags in arb_plain_flags(), (count, offset) in arb_range()) {
        let desc = RegisterDesc::new(flags, 0, count, offset);
        let mask = desc.mask();
        prop_assert_eq!(mask.count_ones(), count as u32);
        prop_assert_eq!(mask.trailing_zeros(), offset as u32);
        let shifted = mask >> offset;
        prop_assert_eq!(shifted.count_ones(), shifted.trailing_ones(), "bits must be contiguous");
    }

    #[test]
    fn overlap_is_symmetric_and_matches_ranges(
        flags in arb_plain_flags(),
        id in 0u64..4,
        (a_count, a_offset) in arb_range(),
        (b_count, b_offset) in arb_range(),
    ) {
        let a = RegisterDesc::new(flags, id, a_count, a_offset);
        let b = RegisterDesc::new(flags, id, b_count, b_offset);
        let a_end = a_offset as u16 + a_count as u16;
        let b_end = b_offset as u16 + b_count as u16;
        let intersect = (a_offset as u16) < b_end && (b_offset as u16) < a_end;
        prop_assert_eq!(a.overlaps(&b), intersect);
        prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
        prop_assert!(a.overlaps(&a));
    }

    #[test]
    fn distinct_identity_never_overlaps(
        (count, offset) in arb_range(),
        id in any::<u64>(),
    ) {
        let virt = RegisterDesc::new(RegisterFlags::VIRTUAL, id, count, offset);
        let local = RegisterDesc::new(RegisterFlags::LOCAL, id, count, offset);
        let other = RegisterDesc::new(RegisterFlags::VIRTUAL, id.wrapping_add(1), count, offset);
        prop_assert!(!virt.overlaps(&local));
        prop_assert!(!virt.overlaps(&other));
    }

    #[test]
    fn rendering_keeps_at_most_one_suffix(id in 0u64..1024, (count, offset) in arb_range()) {
        let text = RegisterDesc::new(RegisterFlags::VIRTUAL, id, count, offset).to_string();
        prop_assert!(!(text.contains('@') && text.contains(':')), "{}", text);
        let expected = if count != 64 {
            format!("vr{id}:{count}")
        } else if offset != 0 {
            format!("vr{id}@{offset}")
        } else {
            format!("vr{id}")
        };
        prop_assert_eq!(text, expected);
    }
}
