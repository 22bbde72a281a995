//! Domain types consumed and produced by the balance engine.
//!
//! Field names serialize in camelCase so group snapshots exported from the
//! document store load unchanged.

use chrono::{DateTime, NaiveDate, Utc};
use divvy_shared::types::{
    Amount, Currency, ExpenseId, GroupId, MemberId, SettlementId, UserId,
};
use serde::{Deserialize, Serialize};

/// A participant in a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    /// Member ID.
    pub id: MemberId,
    /// Display name.
    pub name: String,
    /// Signed-in user who claimed this member, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claimed_by: Option<UserId>,
}

impl Member {
    /// Creates an unclaimed member.
    #[must_use]
    pub fn new(id: impl Into<MemberId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            claimed_by: None,
        }
    }
}

/// One member's share of an expense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Split {
    /// Member who owes the share.
    pub member_id: MemberId,
    /// Share amount.
    pub amount: Amount,
}

impl Split {
    /// Creates a split entry.
    #[must_use]
    pub fn new(member_id: impl Into<MemberId>, amount: Amount) -> Self {
        Self {
            member_id: member_id.into(),
            amount,
        }
    }
}

/// An expense fronted by one member and divided between several.
///
/// Callers are expected to keep `split_between` summing to `amount`; the
/// engine only sums contributions and never checks it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    /// Expense ID.
    pub id: ExpenseId,
    /// Owning group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<GroupId>,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Total amount paid.
    pub amount: Amount,
    /// Member who paid.
    pub paid_by: MemberId,
    /// How the amount is divided.
    pub split_between: Vec<Split>,
    /// Day the expense happened.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    /// When the record was created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Expense {
    /// Creates an expense with a fresh ID and no metadata.
    #[must_use]
    pub fn new(paid_by: impl Into<MemberId>, amount: Amount, split_between: Vec<Split>) -> Self {
        Self {
            id: ExpenseId::generate(),
            group_id: None,
            description: String::new(),
            amount,
            paid_by: paid_by.into(),
            split_between,
            date: None,
            created_at: None,
        }
    }
}

/// A real-world payment from one member to another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settlement {
    /// Settlement ID.
    pub id: SettlementId,
    /// Owning group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<GroupId>,
    /// Member who paid.
    pub from: MemberId,
    /// Member who received the payment.
    pub to: MemberId,
    /// Amount transferred.
    pub amount: Amount,
    /// Day the payment happened.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    /// When the record was created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Settlement {
    /// Creates a settlement with a fresh ID and no metadata.
    #[must_use]
    pub fn new(from: impl Into<MemberId>, to: impl Into<MemberId>, amount: Amount) -> Self {
        Self {
            id: SettlementId::generate(),
            group_id: None,
            from: from.into(),
            to: to.into(),
            amount,
            date: None,
            created_at: None,
        }
    }
}

/// Net position of a member.
///
/// Positive means the member is owed money, negative means they owe money.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberBalance {
    /// Member ID.
    pub member_id: MemberId,
    /// Net balance.
    pub balance: Amount,
}

impl MemberBalance {
    /// Creates a member balance.
    #[must_use]
    pub fn new(member_id: impl Into<MemberId>, balance: Amount) -> Self {
        Self {
            member_id: member_id.into(),
            balance,
        }
    }

    /// Classifies the balance, treating anything within `tolerance` of zero as settled.
    #[must_use]
    pub fn standing(&self, tolerance: Amount) -> Standing {
        if self.balance > tolerance {
            Standing::Creditor
        } else if self.balance < -tolerance {
            Standing::Debtor
        } else {
            Standing::Settled
        }
    }
}

/// Where a member stands once tolerance is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Standing {
    /// Is owed money.
    Creditor,
    /// Owes money.
    Debtor,
    /// Even.
    Settled,
}

/// A directed payment that settles (part of) a debt.
///
/// Produced by debt simplification as a suggestion; `amount` is always positive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    /// Member who pays.
    pub from: MemberId,
    /// Member who is paid.
    pub to: MemberId,
    /// Amount to transfer.
    pub amount: Amount,
}

impl Balance {
    /// Creates a transfer.
    #[must_use]
    pub fn new(from: impl Into<MemberId>, to: impl Into<MemberId>, amount: Amount) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            amount,
        }
    }
}

/// Snapshot of a group: its members and everything they recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    /// Group ID.
    pub id: GroupId,
    /// Group name.
    pub name: String,
    /// Currency every amount is expressed in.
    #[serde(default)]
    pub currency: Currency,
    /// Members in display order.
    pub members: Vec<Member>,
    /// Recorded expenses.
    #[serde(default)]
    pub expenses: Vec<Expense>,
    /// Recorded settlements.
    #[serde(default)]
    pub settlements: Vec<Settlement>,
}

/// Returns the display name of a member, or `"Unknown"` for an id not in `members`.
#[must_use]
pub fn member_name<'a>(members: &'a [Member], id: &MemberId) -> &'a str {
    members
        .iter()
        .find(|member| &member.id == id)
        .map_or("Unknown", |member| member.name.as_str())
}
