//! Checkout Pricing
//!
//! Entry point of the engine: prices one cart snapshot against an optional
//! coupon and every active promotion, producing a discount breakdown. Pricing
//! is a pure quote. Nothing here records coupon usage or touches inventory.

use jiff::Timestamp;
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::debug;

use crate::{
    coupons::{self, Coupon, CouponCode, CouponKind},
    discounts::round_to_minor,
    items::CartLineItem,
    promotions::{Promotion, PromotionSummary, combine},
};

/// Rejected pricing input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidInput {
    /// The subtotal was below zero.
    #[error("subtotal must not be negative")]
    NegativeSubtotal,

    /// The shipping price was below zero.
    #[error("shipping price must not be negative")]
    NegativeShippingPrice,

    /// A line carried a negative unit price.
    #[error("item {id} has a negative price")]
    NegativePrice {
        /// Offending product id
        id: String,
    },

    /// A line carried no units.
    #[error("item {id} has a zero quantity")]
    ZeroQuantity {
        /// Offending product id
        id: String,
    },
}

/// Errors raised by [`apply_discounts`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PricingError {
    /// The request failed validation; nothing was computed.
    #[error("invalid pricing input: {0}")]
    InvalidInput(#[from] InvalidInput),
}

/// A cart snapshot to price.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PricingRequest {
    /// Cart lines
    pub items: Vec<CartLineItem>,

    /// Cart subtotal as computed by the caller
    pub subtotal: Decimal,

    /// Raw coupon code, if the customer entered one
    pub coupon_code: Option<String>,

    /// Shipping price quoted for this cart
    pub shipping_price: Decimal,
}

impl PricingRequest {
    /// Check amounts and quantities.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvalidInput`] found.
    pub fn validate(&self) -> Result<(), InvalidInput> {
        if self.subtotal < Decimal::ZERO {
            return Err(InvalidInput::NegativeSubtotal);
        }

        if self.shipping_price < Decimal::ZERO {
            return Err(InvalidInput::NegativeShippingPrice);
        }

        for item in &self.items {
            if item.price < Decimal::ZERO {
                return Err(InvalidInput::NegativePrice {
                    id: item.id.clone(),
                });
            }

            if item.qty == 0 {
                return Err(InvalidInput::ZeroQuantity {
                    id: item.id.clone(),
                });
            }
        }

        Ok(())
    }

    /// The normalised coupon code, if a non-blank one was supplied.
    pub fn coupon_code(&self) -> Option<CouponCode> {
        self.coupon_code.as_deref().and_then(CouponCode::parse)
    }
}

/// The coupon that applied to a quote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedCoupon {
    /// Normalised code
    pub code: CouponCode,

    /// Percent or flat
    pub kind: CouponKind,

    /// Rate or amount
    pub value: Decimal,
}

impl From<&Coupon> for AppliedCoupon {
    fn from(coupon: &Coupon) -> Self {
        Self {
            code: coupon.code.clone(),
            kind: coupon.kind,
            value: coupon.value,
        }
    }
}

/// Result of pricing a cart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscountBreakdown {
    /// Total to subtract from `subtotal + shipping_price`
    pub discount: Decimal,

    /// Discount granted by the coupon
    pub coupon_discount: Decimal,

    /// Discount granted by promotions
    pub promo_discount: Decimal,

    /// Shipping waived
    pub shipping_discount: Decimal,

    /// Whether a free-shipping promotion qualified
    pub free_shipping: bool,

    /// The coupon that applied, if any
    pub applied_coupon: Option<AppliedCoupon>,

    /// Promotions that applied
    pub applied_promos: Vec<PromotionSummary>,
}

impl DiscountBreakdown {
    /// Round every amount to the minor unit for presentation.
    ///
    /// Components are rounded first and `discount` is their sum, so the
    /// rounded breakdown always adds up.
    #[must_use]
    pub fn rounded(self) -> Self {
        let coupon_discount = round_to_minor(self.coupon_discount);
        let promo_discount = round_to_minor(self.promo_discount);
        let shipping_discount = round_to_minor(self.shipping_discount);

        Self {
            discount: total(coupon_discount, promo_discount, shipping_discount),
            coupon_discount,
            promo_discount,
            shipping_discount,
            ..self
        }
    }
}

/// Price a cart.
///
/// `coupon` is whatever the rule store returned for the request's coupon code;
/// it is checked here in full before it is allowed to apply. `promotions` may
/// include inactive records, which are ignored.
///
/// # Errors
///
/// Returns [`PricingError::InvalidInput`] when the request fails validation.
pub fn apply_discounts(
    request: &PricingRequest,
    coupon: Option<&Coupon>,
    promotions: &[Promotion],
    now: Timestamp,
) -> Result<DiscountBreakdown, PricingError> {
    request.validate()?;

    let applied = request
        .coupon_code()
        .and_then(|code| coupons::validate(&code, coupon, request.subtotal, now));

    let coupon_discount = applied.map_or(Decimal::ZERO, |coupon| {
        coupon.discount_for(&request.items, request.subtotal)
    });

    let outcome = combine(
        &request.items,
        request.subtotal,
        promotions,
        request.shipping_price,
        now,
    );

    debug!(
        coupon_applied = applied.is_some(),
        promotions_applied = outcome.applied.len(),
        free_shipping = outcome.free_shipping,
        "priced cart"
    );

    Ok(DiscountBreakdown {
        discount: total(
            coupon_discount,
            outcome.promo_discount,
            outcome.shipping_discount,
        ),
        coupon_discount,
        promo_discount: outcome.promo_discount,
        shipping_discount: outcome.shipping_discount,
        free_shipping: outcome.free_shipping,
        applied_coupon: applied.map(AppliedCoupon::from),
        applied_promos: outcome.applied,
    })
}

fn total(coupon: Decimal, promotions: Decimal, shipping: Decimal) -> Decimal {
    coupon.saturating_add(promotions).saturating_add(shipping)
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use crate::{eligibility::Eligibility, promotions::PromotionKind, validity::ValidityWindow};

    use super::*;

    fn now() -> Timestamp {
        Timestamp::from_second(1_780_000_000).unwrap_or_else(|_| unreachable!())
    }

    fn save10() -> Coupon {
        Coupon {
            code: CouponCode::parse("SAVE10").unwrap_or_else(|| unreachable!()),
            kind: CouponKind::Percent,
            value: dec!(10),
            active: true,
            window: ValidityWindow::unbounded(),
            min_subtotal: Decimal::ZERO,
            max_uses: None,
            used_count: 0,
            per_customer_limit: None,
            eligibility: Eligibility::whole_cart(),
        }
    }

    fn request(coupon_code: Option<&str>) -> PricingRequest {
        PricingRequest {
            items: vec![CartLineItem::new("sku-1", dec!(50), 2)],
            subtotal: dec!(100),
            coupon_code: coupon_code.map(ToString::to_string),
            shipping_price: dec!(15),
        }
    }

    #[test]
    fn coupon_and_promotion_stack() -> Result<(), PricingError> {
        let promotions = [Promotion::new("Five off", PromotionKind::Flat(dec!(5)))];

        let breakdown = apply_discounts(&request(Some("save10")), Some(&save10()), &promotions, now())?;

        assert_eq!(breakdown.coupon_discount, dec!(10));
        assert_eq!(breakdown.promo_discount, dec!(5));
        assert_eq!(breakdown.discount, dec!(15));
        assert_eq!(
            breakdown.applied_coupon,
            Some(AppliedCoupon {
                code: save10().code,
                kind: CouponKind::Percent,
                value: dec!(10),
            })
        );

        Ok(())
    }

    #[test]
    fn blank_code_ignores_the_store_record() -> Result<(), PricingError> {
        let breakdown = apply_discounts(&request(Some("   ")), Some(&save10()), &[], now())?;

        assert_eq!(breakdown, DiscountBreakdown::default());

        Ok(())
    }

    #[test]
    fn rejected_coupon_is_not_an_error() -> Result<(), PricingError> {
        let coupon = Coupon {
            min_subtotal: dec!(500),
            ..save10()
        };

        let breakdown = apply_discounts(&request(Some("SAVE10")), Some(&coupon), &[], now())?;

        assert_eq!(breakdown.applied_coupon, None);
        assert_eq!(breakdown.coupon_discount, Decimal::ZERO);

        Ok(())
    }

    #[test]
    fn free_shipping_adds_the_shipping_price() -> Result<(), PricingError> {
        let promotions = [Promotion::new(
            "Free shipping",
            PromotionKind::FreeShippingOver {
                threshold: dec!(100),
            },
        )];

        let breakdown = apply_discounts(&request(None), None, &promotions, now())?;

        assert!(breakdown.free_shipping);
        assert_eq!(breakdown.shipping_discount, dec!(15));
        assert_eq!(breakdown.discount, dec!(15));

        Ok(())
    }

    #[test]
    fn negative_amounts_are_rejected() {
        let mut negative_subtotal = request(None);
        negative_subtotal.subtotal = dec!(-1);

        let mut negative_shipping = request(None);
        negative_shipping.shipping_price = dec!(-0.01);

        let mut negative_price = request(None);
        negative_price.items = vec![CartLineItem::new("bad", dec!(-5), 1)];

        assert_eq!(
            apply_discounts(&negative_subtotal, None, &[], now()),
            Err(PricingError::InvalidInput(InvalidInput::NegativeSubtotal))
        );
        assert_eq!(
            apply_discounts(&negative_shipping, None, &[], now()),
            Err(PricingError::InvalidInput(InvalidInput::NegativeShippingPrice))
        );
        assert_eq!(
            apply_discounts(&negative_price, None, &[], now()),
            Err(PricingError::InvalidInput(InvalidInput::NegativePrice {
                id: "bad".to_string()
            }))
        );
    }

    #[test]
    fn zero_quantity_is_rejected() {
        let mut request = request(None);
        request.items = vec![CartLineItem::new("empty", dec!(5), 0)];

        assert_eq!(
            request.validate(),
            Err(InvalidInput::ZeroQuantity {
                id: "empty".to_string()
            })
        );
    }

    #[test]
    fn zero_amounts_are_valid() {
        let request = PricingRequest::default();

        assert_eq!(request.validate(), Ok(()));
    }

    #[test]
    fn rounded_breakdown_adds_up() {
        let breakdown = DiscountBreakdown {
            discount: dec!(0.015),
            coupon_discount: dec!(0.005),
            promo_discount: dec!(0.005),
            shipping_discount: dec!(0.005),
            ..DiscountBreakdown::default()
        }
        .rounded();

        assert_eq!(breakdown.coupon_discount, dec!(0.01));
        assert_eq!(breakdown.promo_discount, dec!(0.01));
        assert_eq!(breakdown.shipping_discount, dec!(0.01));
        assert_eq!(breakdown.discount, dec!(0.03));
    }
}
