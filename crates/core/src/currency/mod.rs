//! Display formatting for amounts.

pub mod format;

pub use format::{format_currency, format_signed};
