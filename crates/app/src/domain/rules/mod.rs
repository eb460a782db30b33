//! Rules
//!
//! Persistent coupons and promotions, read by the pricing path and redeemed
//! by order creation.

pub mod errors;
mod records;
mod repository;
pub mod store;

pub use errors::RuleStoreError;
pub use store::*;
