//! Coupons
//!
//! Customer-entered codes granting a percent or flat discount, subject to a
//! validity window, a minimum subtotal and a usage cap.

use std::fmt;

use jiff::Timestamp;
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::debug;

use crate::{
    discounts::{SimpleDiscount, calculate_discount},
    eligibility::Eligibility,
    items::CartLineItem,
    validity::{ValidityWindow, WindowPosition},
};

/// A normalised coupon code: trimmed and uppercased, never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CouponCode(String);

impl CouponCode {
    /// Normalise a raw code. Returns `None` when nothing is left after trimming.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            return None;
        }

        Some(Self(trimmed.to_uppercase()))
    }

    /// The normalised code.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the code, returning the inner string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for CouponCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How a coupon's value is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CouponKind {
    /// Percentage of the base.
    Percent,

    /// Fixed amount off the base.
    Flat,
}

impl CouponKind {
    /// Stored and serialised name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Percent => "percent",
            Self::Flat => "flat",
        }
    }
}

/// A coupon record as read from the rule store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coupon {
    /// Unique normalised code
    pub code: CouponCode,

    /// Percent or flat
    pub kind: CouponKind,

    /// Rate (percent) or amount (flat)
    pub value: Decimal,

    /// Inactive coupons never apply
    pub active: bool,

    /// When the coupon may be used
    pub window: ValidityWindow,

    /// Minimum cart subtotal required
    pub min_subtotal: Decimal,

    /// Usage cap, `None` for unlimited
    pub max_uses: Option<u32>,

    /// Recorded redemptions. Read-only to the pricing engine.
    pub used_count: u32,

    /// Per-customer cap. Carried for callers; not enforced by the engine.
    pub per_customer_limit: Option<u32>,

    /// Lines the coupon applies to
    pub eligibility: Eligibility,
}

/// Why a coupon did not apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CouponRejection {
    /// The store returned nothing for the code.
    #[error("coupon not found")]
    NotFound,

    /// The store returned a record for a different code.
    #[error("coupon code does not match")]
    CodeMismatch,

    /// The coupon has been switched off.
    #[error("coupon is inactive")]
    Inactive,

    /// The validity window has not opened yet.
    #[error("coupon is not valid yet")]
    NotStarted,

    /// The validity window has closed.
    #[error("coupon has expired")]
    Expired,

    /// The cart subtotal is under the coupon's minimum.
    #[error("cart subtotal is below the coupon minimum")]
    BelowMinimum,

    /// Every permitted use has been recorded.
    #[error("coupon usage limit reached")]
    UsageExhausted,
}

impl Coupon {
    /// The discount rule this coupon grants.
    pub const fn discount(&self) -> SimpleDiscount {
        match self.kind {
            CouponKind::Percent => SimpleDiscount::Percent(self.value),
            CouponKind::Flat => SimpleDiscount::Flat(self.value),
        }
    }

    /// Whether the usage cap has been reached.
    pub fn is_exhausted(&self) -> bool {
        self.max_uses.is_some_and(|max| self.used_count >= max)
    }

    /// Run the activity, window, minimum and usage checks in order.
    ///
    /// # Errors
    ///
    /// Returns the first [`CouponRejection`] that applies.
    pub fn check(&self, subtotal: Decimal, now: Timestamp) -> Result<(), CouponRejection> {
        if !self.active {
            return Err(CouponRejection::Inactive);
        }

        match self.window.position(now) {
            WindowPosition::NotStarted => return Err(CouponRejection::NotStarted),
            WindowPosition::Ended => return Err(CouponRejection::Expired),
            WindowPosition::Open => {}
        }

        if subtotal < self.min_subtotal {
            return Err(CouponRejection::BelowMinimum);
        }

        if self.is_exhausted() {
            return Err(CouponRejection::UsageExhausted);
        }

        Ok(())
    }

    /// Discount this coupon grants on a cart, unrounded.
    pub fn discount_for(&self, items: &[CartLineItem], subtotal: Decimal) -> Decimal {
        let base = self.eligibility.filter(items).base(subtotal);

        calculate_discount(base, &self.discount())
    }
}

/// Validate the record the store returned for `code`.
///
/// Every failure is a normal outcome: the coupon simply does not apply.
pub fn validate<'c>(
    code: &CouponCode,
    found: Option<&'c Coupon>,
    subtotal: Decimal,
    now: Timestamp,
) -> Option<&'c Coupon> {
    match check_found(code, found, subtotal, now) {
        Ok(coupon) => Some(coupon),
        Err(rejection) => {
            debug!(code = %code, reason = %rejection, "coupon not applied");

            None
        }
    }
}

fn check_found<'c>(
    code: &CouponCode,
    found: Option<&'c Coupon>,
    subtotal: Decimal,
    now: Timestamp,
) -> Result<&'c Coupon, CouponRejection> {
    let coupon = found.ok_or(CouponRejection::NotFound)?;

    if coupon.code != *code {
        return Err(CouponRejection::CodeMismatch);
    }

    coupon.check(subtotal, now)?;

    Ok(coupon)
}
