//! Greedy debt simplification.
//!
//! Debtors and creditors are each sorted largest first, then walked with two
//! cursors: the current largest debtor pays the current largest creditor as
//! much as both can absorb, and whichever side is exhausted advances. For
//! balances that sum to zero this yields at most `N - 1` transfers for `N`
//! non-settled members. It is not guaranteed to be the global minimum.

use divvy_shared::types::{Amount, MemberId};
use tracing::debug;

use super::types::{Balance, MemberBalance};

/// Balances within one cent of zero count as settled.
pub const DEFAULT_TOLERANCE: Amount = Amount::CENT;

#[derive(Debug)]
struct Party<'a> {
    member_id: &'a MemberId,
    remaining: Amount,
}

/// Outcome of one greedy pass.
#[derive(Debug, Default)]
pub(crate) struct Simplification {
    /// Transfers in emission order.
    pub(crate) transfers: Vec<Balance>,
    /// Debt still owed when the creditors ran out.
    pub(crate) unmatched_debits: Amount,
    /// Credit still due when the debtors ran out.
    pub(crate) unmatched_credits: Amount,
}

impl Simplification {
    pub(crate) fn has_residual(&self) -> bool {
        self.unmatched_debits.is_positive() || self.unmatched_credits.is_positive()
    }
}

/// Runs the two-cursor match.
///
/// Members strictly beyond `tolerance` on either side take part; a transfer is
/// emitted only when it is larger than `tolerance`; a cursor advances once its
/// remainder drops below `tolerance` (never less than one cent, so the loop
/// always terminates). Sorting is stable, so equal amounts keep input order.
pub(crate) fn greedy_match(balances: &[MemberBalance], tolerance: Amount) -> Simplification {
    let mut debtors = Vec::new();
    let mut creditors = Vec::new();
    for entry in balances {
        if entry.balance < -tolerance {
            debtors.push(Party {
                member_id: &entry.member_id,
                remaining: -entry.balance,
            });
        } else if entry.balance > tolerance {
            creditors.push(Party {
                member_id: &entry.member_id,
                remaining: entry.balance,
            });
        }
    }

    debtors.sort_by(|a, b| b.remaining.cmp(&a.remaining));
    creditors.sort_by(|a, b| b.remaining.cmp(&a.remaining));

    let exhausted = tolerance.max(Amount::CENT);
    let mut transfers = Vec::new();
    let (mut i, mut j) = (0, 0);

    while i < debtors.len() && j < creditors.len() {
        let amount = debtors[i].remaining.min(creditors[j].remaining);

        if amount > tolerance {
            transfers.push(Balance::new(
                debtors[i].member_id.clone(),
                creditors[j].member_id.clone(),
                amount,
            ));
        }

        debtors[i].remaining -= amount;
        creditors[j].remaining -= amount;

        if debtors[i].remaining < exhausted {
            i += 1;
        }
        if creditors[j].remaining < exhausted {
            j += 1;
        }
    }

    debug!(
        debtors = debtors.len(),
        creditors = creditors.len(),
        transfers = transfers.len(),
        "simplified debts"
    );

    Simplification {
        transfers,
        unmatched_debits: debtors[i..].iter().map(|party| party.remaining).sum(),
        unmatched_credits: creditors[j..].iter().map(|party| party.remaining).sum(),
    }
}

/// Reduces member balances to a small set of transfers that settles them.
///
/// Uses the default one-cent tolerance. See [`BalanceEngine`] to change the
/// tolerance or to reject balance sets that do not sum to zero.
///
/// # Example
///
/// ```
/// use divvy_core::{MemberBalance, simplify_debts};
/// use divvy_shared::types::Amount;
///
/// let balances = vec![
///     MemberBalance::new("a", Amount::from_major(50)),
///     MemberBalance::new("b", Amount::from_major(-20)),
///     MemberBalance::new("c", Amount::from_major(-30)),
/// ];
/// let transfers = simplify_debts(&balances);
/// assert_eq!(transfers.len(), 2);
/// assert_eq!(transfers[0].from.as_str(), "c");
/// assert_eq!(transfers[0].amount, Amount::from_major(30));
/// ```
///
/// [`BalanceEngine`]: super::BalanceEngine
#[must_use]
pub fn simplify_debts(balances: &[MemberBalance]) -> Vec<Balance> {
    super::BalanceEngine::default().simplify_debts(balances)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mb(id: &str, cents: i64) -> MemberBalance {
        MemberBalance::new(id, Amount::from_cents(cents))
    }

    fn transfer(from: &str, to: &str, cents: i64) -> Balance {
        Balance::new(from, to, Amount::from_cents(cents))
    }

    #[test]
    fn test_empty_balances() {
        assert!(simplify_debts(&[]).is_empty());
    }

    #[test]
    fn test_all_settled_within_tolerance() {
        let balances = vec![mb("a", 1), mb("b", -1), mb("c", 0)];
        assert!(simplify_debts(&balances).is_empty());
    }

    #[test]
    fn test_one_creditor_two_equal_debtors_keep_input_order() {
        let balances = vec![mb("a", 6000), mb("b", -3000), mb("c", -3000)];
        assert_eq!(
            simplify_debts(&balances),
            vec![transfer("b", "a", 3000), transfer("c", "a", 3000)]
        );
    }

    #[test]
    fn test_largest_debtor_pays_first() {
        let balances = vec![mb("a", 5000), mb("b", -2000), mb("c", -3000)];
        assert_eq!(
            simplify_debts(&balances),
            vec![transfer("c", "a", 3000), transfer("b", "a", 2000)]
        );
    }

    #[test]
    fn test_debtor_spans_two_creditors() {
        let balances = vec![mb("a", 3000), mb("b", 2000), mb("c", -5000)];
        assert_eq!(
            simplify_debts(&balances),
            vec![transfer("c", "a", 3000), transfer("c", "b", 2000)]
        );
    }

    #[test]
    fn test_at_most_n_minus_one_transfers() {
        let balances = vec![
            mb("a", 4500),
            mb("b", 1200),
            mb("c", -2500),
            mb("d", -1700),
            mb("e", -1500),
        ];
        let transfers = simplify_debts(&balances);
        assert!(transfers.len() <= 4);
        assert!(transfers.iter().all(|t| t.amount.is_positive()));
    }

    #[test]
    fn test_sub_tolerance_remainder_is_not_emitted() {
        // d owes 5 cents, a is owed 4: the leftover cent is absorbed silently.
        let balances = vec![mb("a", 4), mb("b", 3), mb("d", -5), mb("e", -2)];
        let outcome = greedy_match(&balances, DEFAULT_TOLERANCE);
        assert_eq!(
            outcome.transfers,
            vec![transfer("d", "a", 4), transfer("e", "b", 2)]
        );
        assert!(!outcome.has_residual());
    }

    #[test]
    fn test_unbalanced_input_leaves_residual() {
        let balances = vec![mb("a", 5000), mb("b", -2000)];
        let outcome = greedy_match(&balances, DEFAULT_TOLERANCE);
        assert_eq!(outcome.transfers, vec![transfer("b", "a", 2000)]);
        assert_eq!(outcome.unmatched_credits, Amount::from_cents(3000));
        assert_eq!(outcome.unmatched_debits, Amount::ZERO);
        assert!(outcome.has_residual());
    }

    #[test]
    fn test_zero_tolerance_still_terminates() {
        let balances = vec![mb("a", 1), mb("b", -1)];
        let outcome = greedy_match(&balances, Amount::ZERO);
        assert_eq!(outcome.transfers, vec![transfer("b", "a", 1)]);
    }

    #[test]
    fn test_wider_tolerance() {
        let balances = vec![mb("a", 1000), mb("b", -996), mb("c", -4)];
        let outcome = greedy_match(&balances, Amount::from_cents(5));
        assert_eq!(outcome.transfers, vec![transfer("b", "a", 996)]);
    }
}
