//! Validation rules for expense splits.

use std::collections::HashSet;

use chrono::NaiveDate;
use divvy_shared::types::{Amount, ExpenseId, GroupId, MemberId};

use super::allocation::allocate_equal;
use super::error::SplitError;
use crate::balance::{Expense, Member, Split};

/// Shares may differ from the expense amount by at most one cent.
pub const SPLIT_TOLERANCE: Amount = Amount::CENT;

/// How a custom split compares to the expense amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitStatus {
    /// Shares match the amount within tolerance.
    Exact,
    /// Shares fall short; carries the unassigned remainder.
    Under(Amount),
    /// Shares exceed the amount; carries the excess.
    Over(Amount),
}

/// Compares the sum of `splits` with `total`.
#[must_use]
pub fn split_status(total: Amount, splits: &[Split]) -> SplitStatus {
    let assigned: Amount = splits.iter().map(|split| split.amount).sum();
    let remaining = total - assigned;

    if remaining.abs() <= SPLIT_TOLERANCE {
        SplitStatus::Exact
    } else if remaining.is_positive() {
        SplitStatus::Under(remaining)
    } else {
        SplitStatus::Over(-remaining)
    }
}

/// Checks a custom split against the expense amount.
///
/// # Errors
///
/// Returns the first rule the split breaks, checked in this order: positive
/// total, at least one participant, no negative share, no duplicate
/// participant, shares matching the total within one cent.
pub fn validate_custom_split(total: Amount, splits: &[Split]) -> Result<(), SplitError> {
    if !total.is_positive() {
        return Err(SplitError::InvalidAmount(total));
    }
    if splits.is_empty() {
        return Err(SplitError::NoParticipants);
    }

    let mut seen = HashSet::with_capacity(splits.len());
    for split in splits {
        if split.amount.is_negative() {
            return Err(SplitError::NegativeShare(split.member_id.clone()));
        }
        if !seen.insert(&split.member_id) {
            return Err(SplitError::DuplicateParticipant(split.member_id.clone()));
        }
    }

    if split_status(total, splits) != SplitStatus::Exact {
        return Err(SplitError::Mismatch {
            assigned: splits.iter().map(|split| split.amount).sum(),
            total,
        });
    }
    Ok(())
}

/// Drops participants with a zero share and validates what is left.
///
/// # Errors
///
/// See [`validate_custom_split`].
pub fn custom_split(total: Amount, shares: Vec<Split>) -> Result<Vec<Split>, SplitError> {
    let shares: Vec<Split> = shares
        .into_iter()
        .filter(|split| !split.amount.is_zero())
        .collect();
    validate_custom_split(total, &shares)?;
    Ok(shares)
}

/// Returns true if every share is within one cent of the first.
///
/// An expense recorded this way reopens in equal-split mode.
#[must_use]
pub fn is_equal_split(splits: &[Split]) -> bool {
    let Some(first) = splits.first() else {
        return true;
    };
    splits
        .iter()
        .all(|split| (split.amount - first.amount).abs() <= SPLIT_TOLERANCE)
}

/// An expense as entered, before it is recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseDraft {
    /// Free-form description.
    pub description: String,
    /// Total amount paid.
    pub amount: Amount,
    /// Member who paid.
    pub paid_by: MemberId,
    /// Proposed shares.
    pub split_between: Vec<Split>,
    /// Day the expense happened.
    pub date: Option<NaiveDate>,
}

impl ExpenseDraft {
    /// Drafts an expense split equally between `participants`.
    #[must_use]
    pub fn equal(
        description: impl Into<String>,
        amount: Amount,
        paid_by: impl Into<MemberId>,
        participants: &[MemberId],
    ) -> Self {
        Self {
            description: description.into(),
            amount,
            paid_by: paid_by.into(),
            split_between: allocate_equal(amount, participants),
            date: None,
        }
    }

    /// Drafts an expense with caller-chosen shares.
    #[must_use]
    pub fn custom(
        description: impl Into<String>,
        amount: Amount,
        paid_by: impl Into<MemberId>,
        shares: Vec<Split>,
    ) -> Self {
        Self {
            description: description.into(),
            amount,
            paid_by: paid_by.into(),
            split_between: shares,
            date: None,
        }
    }

    /// Sets the expense date.
    #[must_use]
    pub fn on(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Checks the draft against the group's members.
    ///
    /// # Errors
    ///
    /// Returns a [`SplitError`] describing the first problem found.
    pub fn validate(&self, members: &[Member]) -> Result<(), SplitError> {
        if self.description.trim().is_empty() {
            return Err(SplitError::MissingDescription);
        }
        if !self.amount.is_positive() {
            return Err(SplitError::InvalidAmount(self.amount));
        }

        let known: HashSet<&MemberId> = members.iter().map(|member| &member.id).collect();
        if !known.contains(&self.paid_by) {
            return Err(SplitError::UnknownMember(self.paid_by.clone()));
        }

        validate_custom_split(self.amount, &self.split_between)?;

        if let Some(split) = self
            .split_between
            .iter()
            .find(|split| !known.contains(&split.member_id))
        {
            return Err(SplitError::UnknownMember(split.member_id.clone()));
        }
        Ok(())
    }

    /// Validates the draft and turns it into an expense with a fresh ID.
    ///
    /// # Errors
    ///
    /// Returns a [`SplitError`] if the draft is invalid.
    pub fn into_expense(
        self,
        members: &[Member],
        group_id: Option<GroupId>,
    ) -> Result<Expense, SplitError> {
        self.validate(members)?;
        let split_between = custom_split(self.amount, self.split_between)?;

        Ok(Expense {
            id: ExpenseId::generate(),
            group_id,
            description: self.description.trim().to_string(),
            amount: self.amount,
            paid_by: self.paid_by,
            split_between,
            date: self.date,
            created_at: None,
        })
    }
}
