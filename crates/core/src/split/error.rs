//! Split validation errors.

use divvy_shared::AppError;
use divvy_shared::types::{Amount, MemberId};
use thiserror::Error;

/// Errors raised while building an expense and its split.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SplitError {
    /// Expense has no description.
    #[error("Please enter a description")]
    MissingDescription,

    /// Expense amount is zero or negative.
    #[error("Expense amount must be positive, got {0}")]
    InvalidAmount(Amount),

    /// Nobody was selected to share the expense.
    #[error("Please select at least one member")]
    NoParticipants,

    /// A share is negative.
    #[error("Share for {0} cannot be negative")]
    NegativeShare(MemberId),

    /// A member appears twice in the split.
    #[error("{0} appears more than once in the split")]
    DuplicateParticipant(MemberId),

    /// Payer or participant is not a member of the group.
    #[error("{0} is not a member of this group")]
    UnknownMember(MemberId),

    /// Shares do not add up to the expense amount.
    #[error("Split amounts ({assigned}) don't match total ({total})")]
    Mismatch {
        /// Sum of the shares.
        assigned: Amount,
        /// Expense amount.
        total: Amount,
    },
}

impl From<SplitError> for AppError {
    fn from(err: SplitError) -> Self {
        Self::Validation(err.to_string())
    }
}
