//! App Router

use salvo::Router;

use crate::{discounts, healthcheck, observability};

pub(crate) fn app_router() -> Router {
    Router::new()
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(Router::with_path("metrics").get(observability::metrics_handler))
        .push(Router::with_path("discounts/apply").post(discounts::apply::handler))
}
