//! Property-based tests for expense splitting.
//!
//! - Property 5: Allocation Sum Invariant
//! - Property 6: Equal Splits Are Balanced
//! - Property 7: Filling Completes the Split

use divvy_shared::types::{Amount, MemberId};
use proptest::prelude::*;

use super::allocation::{allocate_cents, allocate_equal, fill_remaining};
use super::validation::{is_equal_split, validate_custom_split};
use crate::balance::Split;

fn participants(count: usize) -> Vec<MemberId> {
    (0..count).map(|i| MemberId::new(format!("m{i}"))).collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// **Property 5: Allocation Sum Invariant**
    ///
    /// *For any* total and count, the allocated shares SHALL sum exactly to
    /// the total and differ from each other by at most one cent.
    #[test]
    fn prop_allocation_sums_to_total(total in -10_000_000i64..10_000_000, count in 1usize..50) {
        let shares = allocate_cents(Amount::from_cents(total), count);
        prop_assert_eq!(shares.len(), count);
        prop_assert_eq!(shares.iter().sum::<Amount>(), Amount::from_cents(total));

        let max = shares.iter().max().copied().unwrap_or_default();
        let min = shares.iter().min().copied().unwrap_or_default();
        prop_assert!(max - min <= Amount::CENT);
    }

    /// **Property 6: Equal Splits Are Balanced**
    ///
    /// *For any* positive total, an equal split SHALL pass custom-split
    /// validation and be recognized as equal.
    #[test]
    fn prop_equal_split_is_valid(total in 1i64..10_000_000, count in 1usize..20) {
        let splits = allocate_equal(Amount::from_cents(total), &participants(count));
        prop_assert!(validate_custom_split(Amount::from_cents(total), &splits).is_ok());
        prop_assert!(is_equal_split(&splits));
    }

    /// **Property 7: Filling Completes the Split**
    ///
    /// *For any* partial split that does not exceed the total, filling the
    /// remainder SHALL make the shares sum exactly to the total without
    /// lowering any existing share.
    #[test]
    fn prop_fill_remaining_completes(
        shares in prop::collection::vec(0i64..100_000, 1..10),
        extra in 0i64..1_000_000,
    ) {
        let splits: Vec<Split> = shares
            .iter()
            .enumerate()
            .map(|(i, cents)| Split::new(format!("m{i}"), Amount::from_cents(*cents)))
            .collect();
        let total = Amount::from_cents(shares.iter().sum::<i64>() + extra);

        let filled = fill_remaining(total, &splits);
        prop_assert_eq!(filled.iter().map(|split| split.amount).sum::<Amount>(), total);
        for (before, after) in splits.iter().zip(&filled) {
            prop_assert_eq!(&before.member_id, &after.member_id);
            prop_assert!(after.amount >= before.amount);
        }
    }
}
