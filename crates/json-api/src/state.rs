//! State

use std::sync::Arc;

use rebate_app::{context::AppContext, domain::pricing::PricingService};

#[derive(Clone)]
pub(crate) struct State {
    pub(crate) pricing: Arc<dyn PricingService>,
}

impl State {
    #[must_use]
    pub(crate) fn new(pricing: Arc<dyn PricingService>) -> Self {
        Self { pricing }
    }

    #[must_use]
    pub(crate) fn from_app_context(app: AppContext) -> Arc<Self> {
        Arc::new(Self::new(app.pricing))
    }
}

impl std::fmt::Debug for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("State").finish_non_exhaustive()
    }
}
