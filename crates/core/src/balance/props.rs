//! Property-based tests for the balance engine.
//!
//! - Property 1: Zero-Sum Balances
//! - Property 2: Settlement Round-Trip
//! - Property 3: Deterministic Simplification
//! - Property 4: Settled Groups Need No Transfers

use divvy_shared::types::{Amount, MemberId};
use proptest::prelude::*;

use super::calculator::{apply_transfers, calculate_member_balances};
use super::simplify::simplify_debts;
use super::types::{Expense, Member, MemberBalance, Settlement, Standing};
use crate::split::allocate_equal;

const MEMBER_COUNT: usize = 6;

/// Sub-tolerance cents are never transferred; at most one cent per member is left behind.
const ROUND_TRIP_SLACK: Amount = Amount::from_cents(6);

fn members() -> Vec<Member> {
    (0..MEMBER_COUNT)
        .map(|i| Member::new(format!("m{i}"), format!("Member {i}")))
        .collect()
}

fn member_id(index: usize) -> MemberId {
    MemberId::new(format!("m{index}"))
}

/// Strategy for an expense whose splits sum exactly to its amount.
fn expense_strategy() -> impl Strategy<Value = Expense> {
    (
        0..MEMBER_COUNT,
        1i64..1_000_000,
        prop::sample::subsequence((0..MEMBER_COUNT).collect::<Vec<_>>(), 1..=MEMBER_COUNT),
    )
        .prop_map(|(payer, cents, participants)| {
            let ids: Vec<MemberId> = participants.into_iter().map(member_id).collect();
            let amount = Amount::from_cents(cents);
            Expense::new(member_id(payer), amount, allocate_equal(amount, &ids))
        })
}

/// Strategy for a settlement between two (possibly identical) members.
fn settlement_strategy() -> impl Strategy<Value = Settlement> {
    (0..MEMBER_COUNT, 0..MEMBER_COUNT, 1i64..500_000).prop_map(|(from, to, cents)| {
        Settlement::new(member_id(from), member_id(to), Amount::from_cents(cents))
    })
}

/// Strategy for arbitrary member balances (not necessarily summing to zero).
fn balances_strategy() -> impl Strategy<Value = Vec<MemberBalance>> {
    prop::collection::vec(-1_000_000i64..1_000_000, 0..12).prop_map(|values| {
        values
            .into_iter()
            .enumerate()
            .map(|(i, cents)| MemberBalance::new(member_id(i), Amount::from_cents(cents)))
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// **Property 1: Zero-Sum Balances**
    ///
    /// *For any* expenses whose splits sum to their amounts and any settlements
    /// between members, the member balances SHALL sum to exactly zero.
    #[test]
    fn prop_balances_sum_to_zero(
        expenses in prop::collection::vec(expense_strategy(), 0..20),
        settlements in prop::collection::vec(settlement_strategy(), 0..10),
    ) {
        let balances = calculate_member_balances(&members(), &expenses, &settlements);
        prop_assert_eq!(balances.len(), MEMBER_COUNT);
        let total: Amount = balances.iter().map(|entry| entry.balance).sum();
        prop_assert_eq!(total, Amount::ZERO);
    }

    /// **Property 2: Settlement Round-Trip**
    ///
    /// *For any* zero-sum balance state, replaying the simplified transfers as
    /// settlements SHALL bring every balance within a few cents of zero.
    #[test]
    fn prop_replaying_transfers_settles_everyone(
        expenses in prop::collection::vec(expense_strategy(), 1..20),
        settlements in prop::collection::vec(settlement_strategy(), 0..10),
    ) {
        let group = members();
        let balances = calculate_member_balances(&group, &expenses, &settlements);
        let transfers = simplify_debts(&balances);

        let replayed: Vec<Settlement> = transfers
            .iter()
            .map(|transfer| Settlement::new(transfer.from.clone(), transfer.to.clone(), transfer.amount))
            .collect();
        let all_settlements: Vec<Settlement> =
            settlements.iter().cloned().chain(replayed).collect();
        let after = calculate_member_balances(&group, &expenses, &all_settlements);

        prop_assert_eq!(&after, &apply_transfers(&balances, &transfers));
        for entry in &after {
            prop_assert!(
                entry.balance.abs() <= ROUND_TRIP_SLACK,
                "{} left with {}",
                entry.member_id,
                entry.balance
            );
        }
    }

    /// **Property 2.1: Transfers flow from debtors to creditors**
    ///
    /// *For any* balances, every emitted transfer SHALL be positive, leave a
    /// debtor and reach a creditor.
    #[test]
    fn prop_transfers_flow_from_debtors_to_creditors(balances in balances_strategy()) {
        let transfers = simplify_debts(&balances);
        let standing_of = |id: &MemberId| {
            balances
                .iter()
                .find(|entry| &entry.member_id == id)
                .map(|entry| entry.standing(Amount::CENT))
        };
        for transfer in &transfers {
            prop_assert!(transfer.amount > Amount::CENT);
            prop_assert_eq!(standing_of(&transfer.from), Some(Standing::Debtor));
            prop_assert_eq!(standing_of(&transfer.to), Some(Standing::Creditor));
        }
    }

    /// **Property 3: Deterministic Simplification**
    ///
    /// *For any* balances, simplifying twice SHALL produce the same transfers.
    #[test]
    fn prop_simplification_is_deterministic(balances in balances_strategy()) {
        prop_assert_eq!(simplify_debts(&balances), simplify_debts(&balances));
    }

    /// **Property 4: Settled Groups Need No Transfers**
    ///
    /// *For any* balances all within one cent of zero, simplification SHALL
    /// return no transfers.
    #[test]
    fn prop_settled_balances_yield_nothing(values in prop::collection::vec(-1i64..=1, 0..12)) {
        let balances: Vec<MemberBalance> = values
            .into_iter()
            .enumerate()
            .map(|(i, cents)| MemberBalance::new(member_id(i), Amount::from_cents(cents)))
            .collect();
        prop_assert!(simplify_debts(&balances).is_empty());
    }
}
