//! Net balances and debt simplification.
//!
//! This module implements the balance engine:
//! - Domain types (members, expenses, settlements, derived balances)
//! - Net balance calculation from expenses and settlements
//! - Greedy debt simplification
//! - Per-member summaries combining both
//! - Error types for the strict balancing policy

pub mod calculator;
pub mod engine;
pub mod error;
pub mod simplify;
pub mod summary;
pub mod types;

#[cfg(test)]
mod props;

pub use calculator::{apply_transfers, calculate_member_balances, total_expenses};
pub use engine::BalanceEngine;
pub use error::BalanceError;
pub use simplify::{DEFAULT_TOLERANCE, simplify_debts};
pub use summary::{MemberSummary, balance_summary};
pub use types::{
    Balance, Expense, Group, Member, MemberBalance, Settlement, Split, Standing, member_name,
};
