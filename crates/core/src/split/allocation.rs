//! Amount allocation using the Largest Remainder Method.
//!
//! Amounts are whole cents, so every share is the integer quotient and the
//! remainder cents go one each to the first recipients. The sum of the shares
//! always equals the total; no cent is lost or gained.

use divvy_shared::types::{Amount, MemberId};

use crate::balance::Split;

/// Divides `total` cents into `count` shares that sum exactly to `total`.
///
/// The first `total mod count` shares carry one extra cent.
#[must_use]
pub fn allocate_cents(total: Amount, count: usize) -> Vec<Amount> {
    let Ok(divisor) = i64::try_from(count) else {
        return vec![];
    };
    if divisor == 0 {
        return vec![];
    }

    let base = total.cents().div_euclid(divisor);
    let extra = usize::try_from(total.cents().rem_euclid(divisor)).unwrap_or(0);

    (0..count)
        .map(|i| Amount::from_cents(if i < extra { base + 1 } else { base }))
        .collect()
}

/// Splits `total` equally between `participants`.
///
/// # Example
///
/// ```
/// use divvy_core::split::allocate_equal;
/// use divvy_shared::types::{Amount, MemberId};
///
/// // 100 / 3 = [33.34, 33.33, 33.33], sum = 100.00
/// let ids = [MemberId::new("a"), MemberId::new("b"), MemberId::new("c")];
/// let splits = allocate_equal(Amount::from_major(100), &ids);
/// assert_eq!(splits[0].amount, Amount::from_cents(3334));
/// assert_eq!(splits.iter().map(|s| s.amount).sum::<Amount>(), Amount::from_major(100));
/// ```
#[must_use]
pub fn allocate_equal(total: Amount, participants: &[MemberId]) -> Vec<Split> {
    participants
        .iter()
        .zip(allocate_cents(total, participants.len()))
        .map(|(member_id, amount)| Split::new(member_id.clone(), amount))
        .collect()
}

/// Distributes whatever `total` has left unassigned across the splits.
///
/// Participants whose share is still zero receive the remainder; when every
/// participant already has a share, it is spread over all of them. Nothing
/// changes when the splits already cover (or exceed) the total.
#[must_use]
pub fn fill_remaining(total: Amount, splits: &[Split]) -> Vec<Split> {
    let assigned: Amount = splits.iter().map(|split| split.amount).sum();
    let remaining = total - assigned;
    if !remaining.is_positive() {
        return splits.to_vec();
    }

    let empty: Vec<usize> = splits
        .iter()
        .enumerate()
        .filter(|(_, split)| split.amount.is_zero())
        .map(|(i, _)| i)
        .collect();
    let targets: Vec<usize> = if empty.is_empty() {
        (0..splits.len()).collect()
    } else {
        empty
    };

    let mut filled = splits.to_vec();
    for (index, share) in targets.iter().zip(allocate_cents(remaining, targets.len())) {
        filled[*index].amount += share;
    }
    filled
}
