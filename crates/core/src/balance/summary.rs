//! Per-member balance summaries.

use divvy_shared::types::Amount;
use serde::Serialize;

use super::engine::BalanceEngine;
use super::types::{Balance, Expense, Member, MemberBalance, Settlement};

/// A member's net balance together with the simplified transfers that involve them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberSummary {
    /// The member.
    pub member: Member,
    /// Net balance (positive = is owed money).
    pub balance: Amount,
    /// Transfers this member should make.
    pub owes: Vec<Balance>,
    /// Transfers this member should receive.
    pub is_owed: Vec<Balance>,
}

pub(crate) fn summarize(
    members: &[Member],
    balances: &[MemberBalance],
    transfers: &[Balance],
) -> Vec<MemberSummary> {
    members
        .iter()
        .map(|member| {
            let balance = balances
                .iter()
                .find(|entry| entry.member_id == member.id)
                .map(|entry| entry.balance)
                .unwrap_or_default();
            let owes = transfers
                .iter()
                .filter(|transfer| transfer.from == member.id)
                .cloned()
                .collect();
            let is_owed = transfers
                .iter()
                .filter(|transfer| transfer.to == member.id)
                .cloned()
                .collect();

            MemberSummary {
                member: member.clone(),
                balance,
                owes,
                is_owed,
            }
        })
        .collect()
}

/// Computes balances, simplifies them, and splits the transfers per member.
///
/// Uses the default tolerance and the tolerant simplification policy.
#[must_use]
pub fn balance_summary(
    members: &[Member],
    expenses: &[Expense],
    settlements: &[Settlement],
) -> Vec<MemberSummary> {
    BalanceEngine::default().balance_summary(members, expenses, settlements)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::balance::types::Split;

    #[test]
    fn test_summary_partitions_transfers() {
        let members = vec![
            Member::new("a", "Alice"),
            Member::new("b", "Bob"),
            Member::new("c", "Carol"),
        ];
        let expense = Expense::new(
            "a",
            Amount::from_major(90),
            vec![
                Split::new("a", Amount::from_major(30)),
                Split::new("b", Amount::from_major(30)),
                Split::new("c", Amount::from_major(30)),
            ],
        );

        let summary = balance_summary(&members, &[expense], &[]);

        assert_eq!(summary.len(), 3);
        assert_eq!(summary[0].member.name, "Alice");
        assert_eq!(summary[0].balance, Amount::from_major(60));
        assert!(summary[0].owes.is_empty());
        assert_eq!(summary[0].is_owed.len(), 2);

        assert_eq!(summary[1].balance, Amount::from_major(-30));
        assert_eq!(
            summary[1].owes,
            vec![Balance::new("b", "a", Amount::from_major(30))]
        );
        assert!(summary[1].is_owed.is_empty());
    }

    #[test]
    fn test_summary_of_empty_group() {
        assert!(balance_summary(&[], &[], &[]).is_empty());
    }

    #[test]
    fn test_summary_serializes_camel_case() {
        let members = vec![Member::new("a", "Alice")];
        let summary = balance_summary(&members, &[], &[]);
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json[0]["balance"], "0.00");
        assert!(json[0]["isOwed"].as_array().unwrap().is_empty());
    }
}
