//! Pricing
//!
//! Prices a cart against the rules currently held by the store.

mod errors;
pub mod service;

pub use errors::PricingServiceError;
pub use service::*;
