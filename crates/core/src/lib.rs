//! Core business logic for Divvy.
//!
//! This crate contains pure business logic with ZERO persistence or network dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `balance` - Net member balances and greedy debt simplification
//! - `split` - Dividing an expense between participants
//! - `settlement` - Recording real-world payments between members
//! - `currency` - Display formatting for amounts

pub mod balance;
pub mod currency;
pub mod settlement;
pub mod split;

pub use balance::{
    Balance, BalanceEngine, BalanceError, Expense, Group, Member, MemberBalance, MemberSummary,
    Settlement, Split, Standing, balance_summary, calculate_member_balances, simplify_debts,
};
pub use currency::{format_currency, format_signed};
pub use settlement::{SettlementDraft, SettlementError, suggested_settlements};
pub use split::{ExpenseDraft, SplitError, allocate_equal};
