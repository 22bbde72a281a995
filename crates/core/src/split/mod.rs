//! Dividing an expense between participants.
//!
//! The balance engine never checks that an expense's shares add up; these
//! helpers are what an entry form uses to build a consistent split first:
//! - equal splits with exact cent distribution
//! - custom splits validated against the total within one cent
//! - filling in whatever a custom split left unassigned

pub mod allocation;
pub mod error;
pub mod validation;

#[cfg(test)]
mod props;

pub use allocation::{allocate_cents, allocate_equal, fill_remaining};
pub use error::SplitError;
pub use validation::{
    ExpenseDraft, SPLIT_TOLERANCE, SplitStatus, custom_split, is_equal_split, split_status,
    validate_custom_split,
};
