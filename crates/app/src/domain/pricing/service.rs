//! Pricing Service

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use rebate::checkout::{self, DiscountBreakdown, PricingRequest};
use tracing::Span;

use crate::domain::{pricing::PricingServiceError, rules::RuleStore};

#[derive(Clone)]
pub struct StorePricingService {
    rules: Arc<dyn RuleStore>,
}

impl StorePricingService {
    #[must_use]
    pub fn new(rules: Arc<dyn RuleStore>) -> Self {
        Self { rules }
    }
}

impl std::fmt::Debug for StorePricingService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorePricingService").finish_non_exhaustive()
    }
}

#[async_trait]
impl PricingService for StorePricingService {
    #[tracing::instrument(
        name = "pricing.service.apply_discounts",
        skip(self, request),
        fields(
            item_count = request.items.len(),
            has_coupon_code = tracing::field::Empty,
            coupon_applied = tracing::field::Empty,
            promotion_count = tracing::field::Empty
        ),
        err
    )]
    async fn apply_discounts(
        &self,
        request: PricingRequest,
        now: Timestamp,
    ) -> Result<DiscountBreakdown, PricingServiceError> {
        request.validate()?;

        let span = Span::current();
        let code = request.coupon_code();

        span.record("has_coupon_code", code.is_some());

        let coupon = match code {
            Some(code) => self.rules.get_coupon(&code).await?,
            None => None,
        };

        let promotions = self.rules.list_active_promotions().await?;

        span.record("promotion_count", promotions.len());

        let breakdown = checkout::apply_discounts(&request, coupon.as_ref(), &promotions, now)?;

        span.record("coupon_applied", breakdown.applied_coupon.is_some());

        Ok(breakdown)
    }
}

/// Prices carts against stored rules.
#[automock]
#[async_trait]
pub trait PricingService: Send + Sync {
    /// Price a cart at `now`. Pure quote; nothing is written.
    async fn apply_discounts(
        &self,
        request: PricingRequest,
        now: Timestamp,
    ) -> Result<DiscountBreakdown, PricingServiceError>;
}
