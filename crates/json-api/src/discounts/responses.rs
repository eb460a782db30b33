//! Discounts Responses

use rust_decimal::Decimal;
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use rebate::{
    checkout::{AppliedCoupon, DiscountBreakdown},
    promotions::PromotionSummary,
};

/// Applied coupon
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub(crate) struct AppliedCouponResponse {
    /// Normalised code
    pub code: String,

    /// Coupon kind: `percent` or `flat`
    #[serde(rename = "type")]
    pub kind: String,

    /// Rate or amount
    #[serde(with = "rust_decimal::serde::float")]
    #[salvo(schema(value_type = f64))]
    pub value: Decimal,
}

impl From<AppliedCoupon> for AppliedCouponResponse {
    fn from(coupon: AppliedCoupon) -> Self {
        Self {
            code: coupon.code.into_string(),
            kind: coupon.kind.as_str().to_string(),
            value: coupon.value,
        }
    }
}

/// Applied promotion
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub(crate) struct AppliedPromotionResponse {
    /// Promotion name
    pub name: String,

    /// Promotion kind
    #[serde(rename = "type")]
    pub kind: String,

    /// Rate or amount, omitted for bogo and free shipping
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    #[salvo(schema(value_type = Option<f64>))]
    pub value: Option<Decimal>,
}

impl From<PromotionSummary> for AppliedPromotionResponse {
    fn from(summary: PromotionSummary) -> Self {
        Self {
            name: summary.name,
            kind: summary.kind.to_string(),
            value: summary.value,
        }
    }
}

/// Discount breakdown
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ApplyDiscountsResponse {
    /// Total discount
    #[serde(with = "rust_decimal::serde::float")]
    #[salvo(schema(value_type = f64))]
    pub discount: Decimal,

    /// Coupon share of the discount
    #[serde(with = "rust_decimal::serde::float")]
    #[salvo(schema(value_type = f64))]
    pub coupon_discount: Decimal,

    /// Promotion share of the discount
    #[serde(with = "rust_decimal::serde::float")]
    #[salvo(schema(value_type = f64))]
    pub promo_discount: Decimal,

    /// Shipping waived
    #[serde(with = "rust_decimal::serde::float")]
    #[salvo(schema(value_type = f64))]
    pub shipping_discount: Decimal,

    /// Whether shipping is free
    pub free_shipping: bool,

    /// Coupon that applied, `null` when none did
    pub applied_coupon: Option<AppliedCouponResponse>,

    /// Promotions that applied
    pub applied_promos: Vec<AppliedPromotionResponse>,
}

impl From<DiscountBreakdown> for ApplyDiscountsResponse {
    fn from(breakdown: DiscountBreakdown) -> Self {
        Self {
            discount: breakdown.discount,
            coupon_discount: breakdown.coupon_discount,
            promo_discount: breakdown.promo_discount,
            shipping_discount: breakdown.shipping_discount,
            free_shipping: breakdown.free_shipping,
            applied_coupon: breakdown.applied_coupon.map(Into::into),
            applied_promos: breakdown.applied_promos.into_iter().map(Into::into).collect(),
        }
    }
}
