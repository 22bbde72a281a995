//! ISO 4217 currency catalog.
//!
//! A group picks one currency when it is created; every amount in the group is
//! expressed in it. There is no conversion between currencies.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// ISO 4217 currency codes supported by the system.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// US Dollar
    Usd,
    /// Euro
    #[default]
    Eur,
    /// British Pound
    Gbp,
    /// Japanese Yen
    Jpy,
    /// Canadian Dollar
    Cad,
    /// Australian Dollar
    Aud,
    /// Swiss Franc
    Chf,
    /// Indian Rupee
    Inr,
    /// Polish Zloty
    Pln,
    /// Swedish Krona
    Sek,
    /// Indonesian Rupiah
    Idr,
    /// Singapore Dollar
    Sgd,
}

impl Currency {
    /// Every supported currency, in catalog order.
    pub const ALL: [Self; 12] = [
        Self::Usd,
        Self::Eur,
        Self::Gbp,
        Self::Jpy,
        Self::Cad,
        Self::Aud,
        Self::Chf,
        Self::Inr,
        Self::Pln,
        Self::Sek,
        Self::Idr,
        Self::Sgd,
    ];

    /// Canonical three-letter code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Usd => "USD",
            Self::Eur => "EUR",
            Self::Gbp => "GBP",
            Self::Jpy => "JPY",
            Self::Cad => "CAD",
            Self::Aud => "AUD",
            Self::Chf => "CHF",
            Self::Inr => "INR",
            Self::Pln => "PLN",
            Self::Sek => "SEK",
            Self::Idr => "IDR",
            Self::Sgd => "SGD",
        }
    }

    /// Display symbol as rendered by an en-US formatter.
    ///
    /// Currencies without a dedicated en-US symbol fall back to their code.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Usd => "$",
            Self::Eur => "€",
            Self::Gbp => "£",
            Self::Jpy => "¥",
            Self::Cad => "CA$",
            Self::Aud => "A$",
            Self::Inr => "₹",
            Self::Chf | Self::Pln | Self::Sek | Self::Idr | Self::Sgd => self.code(),
        }
    }

    /// English display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Usd => "US Dollar",
            Self::Eur => "Euro",
            Self::Gbp => "British Pound",
            Self::Jpy => "Japanese Yen",
            Self::Cad => "Canadian Dollar",
            Self::Aud => "Australian Dollar",
            Self::Chf => "Swiss Franc",
            Self::Inr => "Indian Rupee",
            Self::Pln => "Polish Zloty",
            Self::Sek => "Swedish Krona",
            Self::Idr => "Indonesian Rupiah",
            Self::Sgd => "Singapore Dollar",
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for Currency {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_uppercase();
        Self::ALL
            .into_iter()
            .find(|currency| currency.code() == code)
            .ok_or_else(|| AppError::Validation(format!("Unknown currency: {s}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_currency_display() {
        assert_eq!(Currency::Usd.to_string(), "USD");
        assert_eq!(Currency::Eur.to_string(), "EUR");
        assert_eq!(Currency::Jpy.to_string(), "JPY");
        assert_eq!(Currency::Sek.to_string(), "SEK");
    }

    #[test]
    fn test_currency_from_str() {
        assert_eq!(Currency::from_str("USD").unwrap(), Currency::Usd);
        assert_eq!(Currency::from_str("usd").unwrap(), Currency::Usd);
        assert_eq!(Currency::from_str(" gbp ").unwrap(), Currency::Gbp);
        assert_eq!(Currency::from_str("PLN").unwrap(), Currency::Pln);

        assert!(Currency::from_str("XXX").is_err());
        assert!(Currency::from_str("").is_err());
    }

    #[test]
    fn test_catalog_codes_round_trip() {
        for currency in Currency::ALL {
            assert_eq!(Currency::from_str(currency.code()).unwrap(), currency);
            assert!(!currency.name().is_empty());
            assert!(!currency.symbol().is_empty());
        }
    }

    #[test]
    fn test_default_is_euro() {
        assert_eq!(Currency::default(), Currency::Eur);
    }

    #[test]
    fn test_serde_uses_code() {
        assert_eq!(serde_json::to_string(&Currency::Chf).unwrap(), "\"CHF\"");
        let parsed: Currency = serde_json::from_str("\"INR\"").unwrap();
        assert_eq!(parsed, Currency::Inr);
    }
}
