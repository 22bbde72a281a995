//! en-US style currency formatting.
//!
//! Amounts always render with exactly two decimals and comma-grouped
//! thousands. The sign goes before the symbol; alphabetic symbols such as
//! `CHF` are separated from the number by a no-break space.

use divvy_shared::types::{Amount, Currency};

const NO_BREAK_SPACE: char = '\u{a0}';

/// Formats `amount` in `currency`.
///
/// # Example
///
/// ```
/// use divvy_core::currency::format_currency;
/// use divvy_shared::types::{Amount, Currency};
///
/// assert_eq!(format_currency(Amount::from_cents(123_450), Currency::Usd), "$1,234.50");
/// assert_eq!(format_currency(Amount::from_cents(-1200), Currency::Eur), "-€12.00");
/// ```
#[must_use]
pub fn format_currency(amount: Amount, currency: Currency) -> String {
    let sign = if amount.is_negative() { "-" } else { "" };
    render(sign, amount, currency)
}

/// Like [`format_currency`], but positive amounts carry a leading `+`.
///
/// Used where a balance is shown next to others and direction matters.
#[must_use]
pub fn format_signed(amount: Amount, currency: Currency) -> String {
    let sign = if amount.is_negative() {
        "-"
    } else if amount.is_positive() {
        "+"
    } else {
        ""
    };
    render(sign, amount, currency)
}

fn render(sign: &str, amount: Amount, currency: Currency) -> String {
    let cents = amount.cents().unsigned_abs();
    let symbol = currency.symbol();
    let separator = if symbol.chars().all(char::is_alphabetic) {
        NO_BREAK_SPACE.to_string()
    } else {
        String::new()
    };

    format!(
        "{sign}{symbol}{separator}{}.{:02}",
        group_thousands(cents / 100),
        cents % 100
    )
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}
