//! Rule Store

use async_trait::async_trait;
use mockall::automock;
use rebate::{
    coupons::{Coupon, CouponCode},
    promotions::Promotion,
};
use tracing::{Span, info};

use crate::{
    database::Db,
    domain::rules::{RuleStoreError, repository::PgRulesRepository},
};

#[derive(Debug, Clone)]
pub struct PgRuleStore {
    db: Db,
    repository: PgRulesRepository,
}

impl PgRuleStore {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgRulesRepository::new(),
        }
    }
}

#[async_trait]
impl RuleStore for PgRuleStore {
    #[tracing::instrument(
        name = "rules.store.get_coupon",
        skip(self),
        fields(coupon_code = %code, found = tracing::field::Empty),
        err
    )]
    async fn get_coupon(&self, code: &CouponCode) -> Result<Option<Coupon>, RuleStoreError> {
        let mut tx = self.db.begin().await?;

        let record = self.repository.get_coupon(&mut tx, code).await?;

        tx.commit().await?;

        Span::current().record("found", record.is_some());

        record.map(Coupon::try_from).transpose()
    }

    #[tracing::instrument(
        name = "rules.store.list_active_promotions",
        skip(self),
        fields(promotion_count = tracing::field::Empty),
        err
    )]
    async fn list_active_promotions(&self) -> Result<Vec<Promotion>, RuleStoreError> {
        let mut tx = self.db.begin().await?;

        let records = self.repository.list_active_promotions(&mut tx).await?;

        tx.commit().await?;

        Span::current().record("promotion_count", records.len());

        records.into_iter().map(Promotion::try_from).collect()
    }

    #[tracing::instrument(
        name = "rules.store.redeem_coupon",
        skip(self),
        fields(coupon_code = %code),
        err
    )]
    async fn redeem_coupon(&self, code: &CouponCode) -> Result<bool, RuleStoreError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.redeem_coupon(&mut tx, code).await?;

        tx.commit().await?;

        let redeemed = rows_affected == 1;

        info!(coupon_code = %code, redeemed, "coupon redemption");

        Ok(redeemed)
    }
}

/// Source of coupons and promotions.
#[automock]
#[async_trait]
pub trait RuleStore: Send + Sync {
    /// Look up a coupon by its normalised code.
    async fn get_coupon(&self, code: &CouponCode) -> Result<Option<Coupon>, RuleStoreError>;

    /// Every promotion flagged active. Validity windows are left to the engine.
    async fn list_active_promotions(&self) -> Result<Vec<Promotion>, RuleStoreError>;

    /// Record one use of a coupon if its cap allows it.
    ///
    /// The check and the increment happen in one statement, so concurrent
    /// orders can never push `used_count` past `max_uses`. Returns `false`
    /// when the coupon is missing or exhausted.
    async fn redeem_coupon(&self, code: &CouponCode) -> Result<bool, RuleStoreError>;
}
