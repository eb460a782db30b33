//! Pricing service errors.

use rebate::checkout::{InvalidInput, PricingError};
use thiserror::Error;

use crate::domain::rules::RuleStoreError;

#[derive(Debug, Error)]
pub enum PricingServiceError {
    #[error(transparent)]
    InvalidInput(#[from] InvalidInput),

    #[error("rule store unavailable")]
    RuleStoreUnavailable(#[source] RuleStoreError),
}

impl From<RuleStoreError> for PricingServiceError {
    fn from(error: RuleStoreError) -> Self {
        Self::RuleStoreUnavailable(error)
    }
}

impl From<PricingError> for PricingServiceError {
    fn from(error: PricingError) -> Self {
        match error {
            PricingError::InvalidInput(input) => Self::InvalidInput(input),
        }
    }
}
