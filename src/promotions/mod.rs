//! Promotions
//!
//! Automatic, code-less discount rules that are active within a time window.

use rust_decimal::Decimal;

use crate::{eligibility::Eligibility, validity::ValidityWindow};

pub mod combinator;

pub use combinator::{PromotionOutcome, combine};

/// The closed set of promotion mechanics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromotionKind {
    /// Percentage off the eligible lines (0-100 scale).
    Percent(Decimal),

    /// Fixed amount off the eligible lines.
    Flat(Decimal),

    /// Buy one get one: every second unit of an eligible line is free.
    Bogo,

    /// Free shipping once the cart subtotal reaches the threshold.
    FreeShippingOver {
        /// Subtotal at or above which shipping is free
        threshold: Decimal,
    },
}

impl PromotionKind {
    /// Stored and serialised name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Percent(_) => "percent",
            Self::Flat(_) => "flat",
            Self::Bogo => "bogo",
            Self::FreeShippingOver { .. } => "free_shipping_over",
        }
    }

    /// Rate or amount for kinds that carry one.
    pub const fn value(&self) -> Option<Decimal> {
        match self {
            Self::Percent(value) | Self::Flat(value) => Some(*value),
            Self::Bogo | Self::FreeShippingOver { .. } => None,
        }
    }
}

/// A promotion record as read from the rule store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Promotion {
    /// Display name
    pub name: String,

    /// Mechanic and its parameters
    pub kind: PromotionKind,

    /// Inactive promotions are never evaluated
    pub active: bool,

    /// When the promotion applies
    pub window: ValidityWindow,

    /// Lines the promotion applies to
    pub eligibility: Eligibility,

    /// Marketing flag, no pricing effect
    pub flash_sale: bool,

    /// Marketing tag, no pricing effect
    pub seasonal_tag: Option<String>,
}

impl Promotion {
    /// An active, unbounded, whole-cart promotion.
    pub fn new(name: impl Into<String>, kind: PromotionKind) -> Self {
        Self {
            name: name.into(),
            kind,
            active: true,
            window: ValidityWindow::unbounded(),
            eligibility: Eligibility::whole_cart(),
            flash_sale: false,
            seasonal_tag: None,
        }
    }

    /// Replace the eligibility constraints.
    #[must_use]
    pub fn with_eligibility(mut self, eligibility: Eligibility) -> Self {
        self.eligibility = eligibility;
        self
    }

    /// Replace the validity window.
    #[must_use]
    pub fn with_window(mut self, window: ValidityWindow) -> Self {
        self.window = window;
        self
    }

    /// Summary reported back to the caller when this promotion applies.
    pub fn summary(&self) -> PromotionSummary {
        PromotionSummary {
            name: self.name.clone(),
            kind: self.kind.as_str(),
            value: self.kind.value(),
        }
    }
}

/// A promotion that contributed to a quote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromotionSummary {
    /// Promotion name
    pub name: String,

    /// Promotion kind name
    pub kind: &'static str,

    /// Rate or amount, absent for bogo and free shipping
    pub value: Option<Decimal>,
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn kind_names() {
        assert_eq!(PromotionKind::Percent(dec!(5)).as_str(), "percent");
        assert_eq!(PromotionKind::Flat(dec!(5)).as_str(), "flat");
        assert_eq!(PromotionKind::Bogo.as_str(), "bogo");
        assert_eq!(
            PromotionKind::FreeShippingOver {
                threshold: dec!(200)
            }
            .as_str(),
            "free_shipping_over"
        );
    }

    #[test]
    fn summary_omits_value_for_bogo_and_free_shipping() {
        let bogo = Promotion::new("Socks BOGO", PromotionKind::Bogo).summary();
        let shipping = Promotion::new(
            "Free shipping",
            PromotionKind::FreeShippingOver {
                threshold: dec!(200),
            },
        )
        .summary();

        assert_eq!(bogo.value, None);
        assert_eq!(shipping.value, None);
    }

    #[test]
    fn summary_carries_value_for_percent() {
        let summary = Promotion::new("Spring", PromotionKind::Percent(dec!(15))).summary();

        assert_eq!(
            summary,
            PromotionSummary {
                name: "Spring".to_string(),
                kind: "percent",
                value: Some(dec!(15)),
            }
        );
    }
}
