//! Discounts

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places amounts are rounded to when leaving the engine.
pub const MINOR_UNIT_DP: u32 = 2;

/// A percent or flat discount applied against a base amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimpleDiscount {
    /// Percentage of the base on a 0-100 scale.
    ///
    /// Values above 100 are not clamped and yield a discount larger than the base.
    Percent(Decimal),

    /// Fixed amount off, never more than the base.
    Flat(Decimal),
}

impl SimpleDiscount {
    /// Name used when echoing the rule back to callers.
    pub const fn type_as_str(&self) -> &'static str {
        match self {
            Self::Percent(_) => "percent",
            Self::Flat(_) => "flat",
        }
    }

    /// The configured rate or amount.
    pub const fn value(&self) -> Decimal {
        match self {
            Self::Percent(value) | Self::Flat(value) => *value,
        }
    }
}

/// Computes the discount a single rule grants on `base`.
///
/// The result is left unrounded and is never negative.
pub fn calculate_discount(base: Decimal, discount: &SimpleDiscount) -> Decimal {
    let amount = match discount {
        SimpleDiscount::Percent(rate) => base.saturating_mul(*rate) / Decimal::ONE_HUNDRED,
        SimpleDiscount::Flat(amount) => (*amount).min(base),
    };

    amount.max(Decimal::ZERO)
}

/// Rounds an amount to the currency's minor unit, half away from zero.
pub fn round_to_minor(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MINOR_UNIT_DP, RoundingStrategy::MidpointAwayFromZero)
}
