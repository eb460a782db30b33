//! Apply Discounts Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{oapi::extract::JsonBody, prelude::*};

use crate::{
    discounts::{
        errors::into_status_error, requests::ApplyDiscountsRequest,
        responses::ApplyDiscountsResponse,
    },
    extensions::*,
    observability::observe_quote,
    state::State,
};

/// Apply Discounts Handler
///
/// Quotes the discounts a cart would receive. Nothing is recorded, so the
/// request may be retried freely.
#[endpoint(
    tags("discounts"),
    summary = "Apply Discounts",
    responses(
        (status_code = StatusCode::OK, description = "Discount breakdown"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Pricing rules unavailable"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<ApplyDiscountsRequest>,
    depot: &mut Depot,
) -> Result<Json<ApplyDiscountsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let breakdown = state
        .pricing
        .apply_discounts(json.into_inner().into(), Timestamp::now())
        .await
        .map_err(into_status_error)?
        .rounded();

    observe_quote(breakdown.applied_coupon.is_some(), breakdown.free_shipping);

    Ok(Json(breakdown.into()))
}
