//! Test helpers.

use std::sync::Arc;

use salvo::{affix_state::inject, prelude::*};

use rebate_app::domain::pricing::MockPricingService;

use crate::state::State;

pub(crate) fn state_with_pricing(pricing: MockPricingService) -> Arc<State> {
    Arc::new(State::new(Arc::new(pricing)))
}

pub(crate) fn pricing_service(pricing: MockPricingService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_pricing(pricing)))
            .push(route),
    )
}
