//! Settlement drafts and suggestions.

use chrono::NaiveDate;
use divvy_shared::types::{Amount, GroupId, MemberId, SettlementId};
use tracing::debug;

use super::error::SettlementError;
use crate::balance::{Balance, BalanceEngine, Expense, Member, Settlement};

/// A payment as entered, before it is recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettlementDraft {
    /// Member who pays.
    pub from: MemberId,
    /// Member who receives the payment.
    pub to: MemberId,
    /// Amount paid.
    pub amount: Amount,
    /// Day the payment happened.
    pub date: Option<NaiveDate>,
}

impl SettlementDraft {
    /// Drafts a payment of `amount` from `from` to `to`.
    #[must_use]
    pub fn new(from: impl Into<MemberId>, to: impl Into<MemberId>, amount: Amount) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            amount,
            date: None,
        }
    }

    /// Sets the payment date.
    #[must_use]
    pub fn on(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Checks the draft against the group's members.
    ///
    /// # Errors
    ///
    /// Returns a [`SettlementError`] describing the first problem found.
    pub fn validate(&self, members: &[Member]) -> Result<(), SettlementError> {
        if self.from.is_blank() || self.to.is_blank() {
            return Err(SettlementError::MissingMember);
        }
        if self.from == self.to {
            return Err(SettlementError::SameMember);
        }
        if !self.amount.is_positive() {
            return Err(SettlementError::InvalidAmount(self.amount));
        }

        for id in [&self.from, &self.to] {
            if !members.iter().any(|member| &member.id == id) {
                return Err(SettlementError::UnknownMember(id.clone()));
            }
        }
        Ok(())
    }

    /// Validates the draft and turns it into a settlement with a fresh ID.
    ///
    /// # Errors
    ///
    /// Returns a [`SettlementError`] if the draft is invalid.
    pub fn into_settlement(
        self,
        members: &[Member],
        group_id: Option<GroupId>,
    ) -> Result<Settlement, SettlementError> {
        self.validate(members)?;
        Ok(Settlement {
            id: SettlementId::generate(),
            group_id,
            from: self.from,
            to: self.to,
            amount: self.amount,
            date: self.date,
            created_at: None,
        })
    }
}

impl From<&Balance> for SettlementDraft {
    fn from(transfer: &Balance) -> Self {
        Self::new(transfer.from.clone(), transfer.to.clone(), transfer.amount)
    }
}

/// Drafts one settlement per simplified transfer.
///
/// Recording all of them brings every member back within the engine's
/// tolerance of zero.
#[must_use]
pub fn suggested_settlements(
    engine: &BalanceEngine,
    members: &[Member],
    expenses: &[Expense],
    settlements: &[Settlement],
) -> Vec<SettlementDraft> {
    let balances = engine.calculate_member_balances(members, expenses, settlements);
    let drafts: Vec<SettlementDraft> = engine
        .simplify_debts(&balances)
        .iter()
        .map(SettlementDraft::from)
        .collect();
    debug!(count = drafts.len(), "suggested settlements");
    drafts
}
