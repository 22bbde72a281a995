//! Recording real-world payments between members.
//!
//! A settlement is entered as a [`SettlementDraft`], usually pre-filled from
//! one of the simplified transfers, and validated against the group before it
//! becomes a [`Settlement`](crate::balance::Settlement).

pub mod draft;
pub mod error;

pub use draft::{SettlementDraft, suggested_settlements};
pub use error::SettlementError;
