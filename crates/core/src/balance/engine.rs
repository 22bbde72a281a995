//! Balance engine entry point.
//!
//! [`BalanceEngine`] is a stateless value carrying the settlement tolerance.
//! Every call recomputes from scratch; nothing is cached between calls.

use divvy_shared::config::EngineConfig;
use divvy_shared::types::Amount;
use tracing::warn;

use super::calculator;
use super::error::BalanceError;
use super::simplify::{DEFAULT_TOLERANCE, greedy_match};
use super::summary::{self, MemberSummary};
use super::types::{Balance, Expense, Member, MemberBalance, Settlement};

/// Balance engine.
///
/// Two simplification policies are available:
/// - [`simplify_debts`](Self::simplify_debts) tolerates balances that do not
///   sum to zero and logs the unmatched residual
/// - [`try_simplify_debts`](Self::try_simplify_debts) rejects them with
///   [`BalanceError::Unbalanced`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BalanceEngine {
    tolerance: Amount,
}

impl Default for BalanceEngine {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl BalanceEngine {
    /// Creates an engine; negative tolerances are clamped to zero.
    #[must_use]
    pub fn new(tolerance: Amount) -> Self {
        Self {
            tolerance: tolerance.max(Amount::ZERO),
        }
    }

    /// Creates an engine from loaded configuration.
    #[must_use]
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(Amount::from_cents(config.tolerance_cents))
    }

    /// Band around zero within which a balance counts as settled.
    #[must_use]
    pub const fn tolerance(&self) -> Amount {
        self.tolerance
    }

    /// Net balance of every member, in `members` order.
    #[must_use]
    pub fn calculate_member_balances(
        &self,
        members: &[Member],
        expenses: &[Expense],
        settlements: &[Settlement],
    ) -> Vec<MemberBalance> {
        calculator::calculate_member_balances(members, expenses, settlements)
    }

    /// Simplifies debts, tolerating balances that do not cancel out.
    ///
    /// When they do not, the greedy walk stops as soon as one side runs out
    /// and the remainder is left unmatched.
    #[must_use]
    pub fn simplify_debts(&self, balances: &[MemberBalance]) -> Vec<Balance> {
        let outcome = greedy_match(balances, self.tolerance);
        if outcome.has_residual() {
            warn!(
                unmatched_debits = %outcome.unmatched_debits,
                unmatched_credits = %outcome.unmatched_credits,
                "member balances do not cancel out, residual left unmatched"
            );
        }
        outcome.transfers
    }

    /// Simplifies debts, rejecting balances whose sum is further than the
    /// tolerance from zero.
    ///
    /// # Errors
    ///
    /// Returns [`BalanceError::Unbalanced`] with the total debits and credits.
    pub fn try_simplify_debts(
        &self,
        balances: &[MemberBalance],
    ) -> Result<Vec<Balance>, BalanceError> {
        self.ensure_zero_sum(balances)?;
        Ok(greedy_match(balances, self.tolerance).transfers)
    }

    /// Per-member summary using the tolerant policy.
    #[must_use]
    pub fn balance_summary(
        &self,
        members: &[Member],
        expenses: &[Expense],
        settlements: &[Settlement],
    ) -> Vec<MemberSummary> {
        let balances = self.calculate_member_balances(members, expenses, settlements);
        let transfers = self.simplify_debts(&balances);
        summary::summarize(members, &balances, &transfers)
    }

    /// Per-member summary using the strict policy.
    ///
    /// # Errors
    ///
    /// Returns [`BalanceError::Unbalanced`] if the balances do not cancel out.
    pub fn try_balance_summary(
        &self,
        members: &[Member],
        expenses: &[Expense],
        settlements: &[Settlement],
    ) -> Result<Vec<MemberSummary>, BalanceError> {
        let balances = self.calculate_member_balances(members, expenses, settlements);
        let transfers = self.try_simplify_debts(&balances)?;
        Ok(summary::summarize(members, &balances, &transfers))
    }

    fn ensure_zero_sum(&self, balances: &[MemberBalance]) -> Result<(), BalanceError> {
        let credits: Amount = balances
            .iter()
            .map(|entry| entry.balance)
            .filter(|balance| balance.is_positive())
            .sum();
        let debits: Amount = balances
            .iter()
            .map(|entry| entry.balance)
            .filter(|balance| balance.is_negative())
            .map(|balance| -balance)
            .sum();

        if (credits - debits).abs() > self.tolerance {
            return Err(BalanceError::Unbalanced { debits, credits });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::balance::types::Split;

    fn mb(id: &str, cents: i64) -> MemberBalance {
        MemberBalance::new(id, Amount::from_cents(cents))
    }

    #[test]
    fn test_default_tolerance_is_one_cent() {
        assert_eq!(BalanceEngine::default().tolerance(), Amount::CENT);
    }

    #[test]
    fn test_negative_tolerance_is_clamped() {
        assert_eq!(
            BalanceEngine::new(Amount::from_cents(-3)).tolerance(),
            Amount::ZERO
        );
    }

    #[test]
    fn test_from_config() {
        let config = EngineConfig {
            tolerance_cents: 5,
            strict: true,
        };
        assert_eq!(
            BalanceEngine::from_config(&config).tolerance(),
            Amount::from_cents(5)
        );
    }

    #[test]
    fn test_strict_policy_rejects_unbalanced() {
        let engine = BalanceEngine::default();
        let balances = vec![mb("a", 5000), mb("b", -2000)];

        assert_eq!(
            engine.try_simplify_debts(&balances),
            Err(BalanceError::Unbalanced {
                debits: Amount::from_cents(2000),
                credits: Amount::from_cents(5000),
            })
        );
        // Tolerant policy still emits what it can match.
        assert_eq!(engine.simplify_debts(&balances).len(), 1);
    }

    #[test]
    fn test_strict_policy_accepts_rounding_slack() {
        let engine = BalanceEngine::default();
        let balances = vec![mb("a", 3334), mb("b", -1667), mb("c", -1666)];
        let transfers = engine.try_simplify_debts(&balances).unwrap();
        assert_eq!(transfers.len(), 2);
    }

    #[test]
    fn test_strict_summary_reports_split_mismatch() {
        let members = vec![Member::new("a", "Alice"), Member::new("b", "Bob")];
        let expense = Expense::new(
            "a",
            Amount::from_major(100),
            vec![Split::new("b", Amount::from_major(60))],
        );
        let engine = BalanceEngine::default();
        assert!(engine.try_balance_summary(&members, &[expense.clone()], &[]).is_err());
        assert_eq!(engine.balance_summary(&members, &[expense], &[]).len(), 2);
    }
}
