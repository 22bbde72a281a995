//! Net balance calculation.
//!
//! Every posting goes through [`Ledger::credit`] or [`Ledger::debit`]:
//! - an expense credits the payer with the full amount and debits each
//!   participant with their share
//! - a settlement credits `from` (they paid money in) and debits `to`
//!
//! Amounts are integer cents, so the sums are exact and the final two-decimal
//! rounding is already applied when amounts enter the system. A position that
//! would leave the `i64` range is clamped at the bound and logged.

use std::collections::HashMap;

use divvy_shared::types::{Amount, MemberId};
use tracing::warn;

use super::types::{Balance, Expense, Member, MemberBalance, Settlement};

/// Running net positions keyed by member.
///
/// Postings for ids that were never registered still accumulate; they are
/// simply never reported by [`Ledger::balances_for`].
#[derive(Debug, Default)]
pub(crate) struct Ledger {
    positions: HashMap<MemberId, Amount>,
}

impl Ledger {
    /// Opens a ledger with a zero position for every member.
    pub(crate) fn with_members(members: &[Member]) -> Self {
        let positions = members
            .iter()
            .map(|member| (member.id.clone(), Amount::ZERO))
            .collect();
        Self { positions }
    }

    /// Increases what `member_id` is owed.
    pub(crate) fn credit(&mut self, member_id: &MemberId, amount: Amount) {
        let position = self.positions.entry(member_id.clone()).or_default();
        let current = *position;
        *position = current.checked_add(amount).unwrap_or_else(|| {
            warn!(member = %member_id, %amount, "balance overflow, position clamped");
            current + amount
        });
    }

    /// Increases what `member_id` owes.
    pub(crate) fn debit(&mut self, member_id: &MemberId, amount: Amount) {
        let position = self.positions.entry(member_id.clone()).or_default();
        let current = *position;
        *position = current.checked_sub(amount).unwrap_or_else(|| {
            warn!(member = %member_id, %amount, "balance overflow, position clamped");
            current - amount
        });
    }

    pub(crate) fn post_expense(&mut self, expense: &Expense) {
        self.credit(&expense.paid_by, expense.amount);
        for split in &expense.split_between {
            self.debit(&split.member_id, split.amount);
        }
    }

    pub(crate) fn post_transfer(&mut self, from: &MemberId, to: &MemberId, amount: Amount) {
        self.credit(from, amount);
        self.debit(to, amount);
    }

    pub(crate) fn post_settlement(&mut self, settlement: &Settlement) {
        self.post_transfer(&settlement.from, &settlement.to, settlement.amount);
    }

    pub(crate) fn position(&self, member_id: &MemberId) -> Amount {
        self.positions.get(member_id).copied().unwrap_or_default()
    }

    /// Reports positions for `members`, in their order.
    pub(crate) fn balances_for(&self, members: &[Member]) -> Vec<MemberBalance> {
        members
            .iter()
            .map(|member| MemberBalance::new(member.id.clone(), self.position(&member.id)))
            .collect()
    }
}

/// Calculates the net balance of every member.
///
/// Returns one entry per member, in `members` order; members without any
/// activity get a zero balance. Expenses and settlements that reference ids
/// outside `members` are tolerated and ignored in the output.
///
/// # Example
///
/// ```
/// use divvy_core::{Expense, Member, Split, calculate_member_balances};
/// use divvy_shared::types::Amount;
///
/// let members = vec![Member::new("a", "Alice"), Member::new("b", "Bob")];
/// let expense = Expense::new(
///     "a",
///     Amount::from_major(40),
///     vec![Split::new("a", Amount::from_major(20)), Split::new("b", Amount::from_major(20))],
/// );
///
/// let balances = calculate_member_balances(&members, &[expense], &[]);
/// assert_eq!(balances[0].balance, Amount::from_major(20));
/// assert_eq!(balances[1].balance, Amount::from_major(-20));
/// ```
#[must_use]
pub fn calculate_member_balances(
    members: &[Member],
    expenses: &[Expense],
    settlements: &[Settlement],
) -> Vec<MemberBalance> {
    let mut ledger = Ledger::with_members(members);
    for expense in expenses {
        ledger.post_expense(expense);
    }
    for settlement in settlements {
        ledger.post_settlement(settlement);
    }
    ledger.balances_for(members)
}

/// Replays transfers on top of existing balances, as if each had been recorded
/// as a settlement.
#[must_use]
pub fn apply_transfers(balances: &[MemberBalance], transfers: &[Balance]) -> Vec<MemberBalance> {
    let mut ledger = Ledger::default();
    for entry in balances {
        ledger.credit(&entry.member_id, entry.balance);
    }
    for transfer in transfers {
        ledger.post_transfer(&transfer.from, &transfer.to, transfer.amount);
    }
    balances
        .iter()
        .map(|entry| MemberBalance::new(entry.member_id.clone(), ledger.position(&entry.member_id)))
        .collect()
}

/// Sum of all expense amounts.
#[must_use]
pub fn total_expenses(expenses: &[Expense]) -> Amount {
    expenses.iter().map(|expense| expense.amount).sum()
}
