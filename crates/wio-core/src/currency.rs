//! # Currency
//!
//! The gateway accepts a fixed set of ISO 4217 currencies.
//! Codes travel upper-case on the wire.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Supported currencies (ISO 4217)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    USD,
    EUR,
    TRY,
    GBP,
}

impl Currency {
    /// Every currency the gateway accepts
    pub const ALL: [Currency; 4] = [Currency::USD, Currency::EUR, Currency::TRY, Currency::GBP];

    /// Returns the upper-case ISO 4217 code
    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::TRY => "TRY",
            Currency::GBP => "GBP",
        }
    }

    /// Look up a code case-insensitively
    pub fn parse(code: &str) -> Option<Self> {
        let upper = code.trim().to_ascii_uppercase();
        Self::ALL.into_iter().find(|c| c.as_str() == upper)
    }

    /// Format a decimal amount for display (e.g., "$50.00")
    pub fn display_amount(&self, amount: f64) -> String {
        let symbol = match self {
            Currency::USD => "$",
            Currency::EUR => "€",
            Currency::TRY => "₺",
            Currency::GBP => "£",
        };
        format!("{}{:.2}", symbol, amount)
    }
}

impl Default for Currency {
    fn default() -> Self {
        Currency::USD
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Currency {
    type Err = crate::error::ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or(crate::error::ValidationError::UnsupportedCurrency)
    }
}

impl From<Currency> for String {
    fn from(currency: Currency) -> Self {
        currency.as_str().to_string()
    }
}
