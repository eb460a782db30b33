//! Rebate
//!
//! Rebate is a discount and promotion pricing engine for e-commerce carts,
//! written in Rust. Given a cart snapshot, an optional coupon code and the
//! promotions currently on offer, it computes how much to take off and why.

pub mod checkout;
pub mod coupons;
pub mod discounts;
pub mod eligibility;
pub mod fixtures;
pub mod items;
pub mod promotions;
pub mod validity;
