//! Settlement validation errors.

use divvy_shared::AppError;
use divvy_shared::types::{Amount, MemberId};
use thiserror::Error;

/// Errors raised while recording a settlement.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettlementError {
    /// Payer or recipient was left blank.
    #[error("Please select both members")]
    MissingMember,

    /// Payer and recipient are the same member.
    #[error("From and To must be different members")]
    SameMember,

    /// Amount is zero or negative.
    #[error("Please enter a valid amount, got {0}")]
    InvalidAmount(Amount),

    /// Payer or recipient is not a member of the group.
    #[error("{0} is not a member of this group")]
    UnknownMember(MemberId),
}

impl From<SettlementError> for AppError {
    fn from(err: SettlementError) -> Self {
        Self::Validation(err.to_string())
    }
}
