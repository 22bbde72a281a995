//! Balance engine error types.

use divvy_shared::AppError;
use divvy_shared::types::Amount;
use thiserror::Error;

/// Errors raised by the strict balance policy.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BalanceError {
    /// Member balances do not cancel out (debits != credits).
    #[error("Balances do not cancel out. Debits: {debits}, Credits: {credits}")]
    Unbalanced {
        /// Total owed by debtors.
        debits: Amount,
        /// Total owed to creditors.
        credits: Amount,
    },
}

impl From<BalanceError> for AppError {
    fn from(err: BalanceError) -> Self {
        Self::BusinessRule(err.to_string())
    }
}
