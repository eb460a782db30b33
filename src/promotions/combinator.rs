//! Promotion Combinator
//!
//! Evaluates every active promotion against a cart and stacks the results.
//! There is no precedence between promotions, so the outcome does not depend
//! on the order they are supplied in.

use jiff::Timestamp;
use rust_decimal::Decimal;
use tracing::{debug, trace};

use crate::{
    discounts::{SimpleDiscount, calculate_discount},
    eligibility::Eligibility,
    items::CartLineItem,
    promotions::{Promotion, PromotionKind, PromotionSummary},
};

/// Combined effect of all promotions on one cart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromotionOutcome {
    /// Sum of every percent, flat and bogo contribution, unrounded.
    pub promo_discount: Decimal,

    /// Whether any free-shipping promotion qualified.
    pub free_shipping: bool,

    /// Shipping waived: the full shipping price when `free_shipping` is set.
    pub shipping_discount: Decimal,

    /// Promotions that applied, in input order.
    pub applied: Vec<PromotionSummary>,
}

/// What a single promotion contributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Contribution {
    Discount(Decimal),
    FreeShipping,
}

/// Evaluate and stack every active, in-window promotion.
pub fn combine(
    items: &[CartLineItem],
    subtotal: Decimal,
    promotions: &[Promotion],
    shipping_price: Decimal,
    now: Timestamp,
) -> PromotionOutcome {
    let mut outcome = PromotionOutcome::default();

    for promotion in promotions.iter().filter(|promotion| promotion.active) {
        if !promotion.window.contains(now) {
            debug!(promotion = %promotion.name, "promotion outside validity window");

            continue;
        }

        let Some(contribution) = evaluate(promotion, items, subtotal) else {
            continue;
        };

        trace!(promotion = %promotion.name, ?contribution, "promotion applied");

        match contribution {
            Contribution::Discount(amount) => {
                outcome.promo_discount = outcome.promo_discount.saturating_add(amount);
            }
            Contribution::FreeShipping => outcome.free_shipping = true,
        }

        outcome.applied.push(promotion.summary());
    }

    if outcome.free_shipping {
        outcome.shipping_discount = shipping_price;
    }

    outcome
}

fn evaluate(
    promotion: &Promotion,
    items: &[CartLineItem],
    subtotal: Decimal,
) -> Option<Contribution> {
    let eligibility = &promotion.eligibility;

    match promotion.kind {
        PromotionKind::Percent(rate) => {
            simple(eligibility, items, subtotal, &SimpleDiscount::Percent(rate))
        }
        PromotionKind::Flat(amount) => {
            simple(eligibility, items, subtotal, &SimpleDiscount::Flat(amount))
        }
        PromotionKind::Bogo => bogo(eligibility, items),
        PromotionKind::FreeShippingOver { threshold } => free_shipping_over(threshold, subtotal),
    }
}

/// Percent or flat off the eligible base. Applies only when it saves something.
fn simple(
    eligibility: &Eligibility,
    items: &[CartLineItem],
    subtotal: Decimal,
    discount: &SimpleDiscount,
) -> Option<Contribution> {
    let base = eligibility.filter(items).base(subtotal);
    let amount = calculate_discount(base, discount);

    (amount > Decimal::ZERO).then_some(Contribution::Discount(amount))
}

/// Every second unit of each eligible line is free; odd units round down.
///
/// Applies whenever at least one line is eligible, even if no unit ends up free.
fn bogo(eligibility: &Eligibility, items: &[CartLineItem]) -> Option<Contribution> {
    let lines = eligibility.filter(items).lines(items);

    if lines.is_empty() {
        return None;
    }

    let amount = lines.iter().fold(Decimal::ZERO, |acc, line| {
        let free_units = Decimal::from(line.qty / 2);

        acc.saturating_add(line.price.saturating_mul(free_units))
    });

    Some(Contribution::Discount(amount))
}

fn free_shipping_over(threshold: Decimal, subtotal: Decimal) -> Option<Contribution> {
    (subtotal >= threshold).then_some(Contribution::FreeShipping)
}
