//! Currency and rounding primitives.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! All monetary values are `rust_decimal::Decimal`, quantized to the
//! currency's declared digit count with banker's rounding.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// ISO 4217 currency codes supported by the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// US Dollar
    Usd,
    /// Euro
    Eur,
    /// Dominican Peso
    Dop,
    /// Japanese Yen
    Jpy,
}

impl Currency {
    /// Number of decimal digits amounts in this currency carry.
    #[must_use]
    pub const fn digits(self) -> u32 {
        match self {
            Self::Usd | Self::Eur | Self::Dop => 2,
            Self::Jpy => 0,
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Usd => write!(f, "USD"),
            Self::Eur => write!(f, "EUR"),
            Self::Dop => write!(f, "DOP"),
            Self::Jpy => write!(f, "JPY"),
        }
    }
}

impl std::str::FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "USD" => Ok(Self::Usd),
            "EUR" => Ok(Self::Eur),
            "DOP" => Ok(Self::Dop),
            "JPY" => Ok(Self::Jpy),
            _ => Err(format!("Unknown currency: {s}")),
        }
    }
}

/// Quantizes an amount to the given number of decimal places.
///
/// Uses banker's rounding (round half to even) to minimize cumulative errors.
#[must_use]
pub fn round_currency(amount: Decimal, digits: u32) -> Decimal {
    amount.round_dp_with_strategy(digits, RoundingStrategy::MidpointNearestEven)
}
