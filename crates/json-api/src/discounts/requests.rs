//! Discounts Requests

use rust_decimal::Decimal;
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use rebate::{checkout::PricingRequest, items::CartLineItem};

/// Cart line to price
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub(crate) struct CartItemRequest {
    /// Product identifier
    pub id: String,

    /// Product category
    #[serde(default)]
    pub category: Option<String>,

    /// Product brand
    #[serde(default)]
    pub brand: Option<String>,

    /// Unit price
    #[salvo(schema(value_type = f64))]
    pub price: Decimal,

    /// Units on the line
    pub qty: u32,
}

impl From<CartItemRequest> for CartLineItem {
    fn from(request: CartItemRequest) -> Self {
        CartLineItem {
            id: request.id,
            category: request.category,
            brand: request.brand,
            price: request.price,
            qty: request.qty,
        }
    }
}

/// Apply Discounts Request
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ApplyDiscountsRequest {
    /// Cart lines
    pub items: Vec<CartItemRequest>,

    /// Cart subtotal
    #[salvo(schema(value_type = f64))]
    pub subtotal: Decimal,

    /// Customer email, accepted for the storefront's benefit and not used in pricing
    #[serde(default)]
    pub email: Option<String>,

    /// Coupon code as entered by the customer
    #[serde(default)]
    pub coupon_code: Option<String>,

    /// Quoted shipping price
    #[serde(default)]
    #[salvo(schema(value_type = f64))]
    pub shipping_price: Decimal,
}

impl From<ApplyDiscountsRequest> for PricingRequest {
    fn from(request: ApplyDiscountsRequest) -> Self {
        PricingRequest {
            items: request.items.into_iter().map(Into::into).collect(),
            subtotal: request.subtotal,
            coupon_code: request.coupon_code,
            shipping_price: request.shipping_price,
        }
    }
}
