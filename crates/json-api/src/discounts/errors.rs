//! Errors

use salvo::http::StatusError;
use tracing::error;

use rebate_app::domain::pricing::PricingServiceError;

pub(crate) fn into_status_error(error: PricingServiceError) -> StatusError {
    match error {
        PricingServiceError::InvalidInput(input) => {
            StatusError::bad_request().brief(input.to_string())
        }
        PricingServiceError::RuleStoreUnavailable(source) => {
            error!("failed to load pricing rules: {source}");

            StatusError::service_unavailable().brief("Pricing rules are temporarily unavailable")
        }
    }
}
