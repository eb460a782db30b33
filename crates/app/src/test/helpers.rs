//! Test Helpers

use jiff_sqlx::Timestamp as SqlxTimestamp;
use rebate::{
    coupons::{Coupon, CouponCode, CouponKind},
    eligibility::Eligibility,
    promotions::Promotion,
    validity::ValidityWindow,
};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::test::TestContext;

pub(crate) fn code(raw: &str) -> CouponCode {
    CouponCode::parse(raw).expect("test codes are non-empty")
}

/// An active, unbounded, unlimited whole-cart coupon.
pub(crate) fn coupon(raw: &str, kind: CouponKind, value: Decimal) -> Coupon {
    Coupon {
        code: code(raw),
        kind,
        value,
        active: true,
        window: ValidityWindow::unbounded(),
        min_subtotal: Decimal::ZERO,
        max_uses: None,
        used_count: 0,
        per_customer_limit: None,
        eligibility: Eligibility::whole_cart(),
    }
}

fn to_i32(value: Option<u32>) -> Option<i32> {
    value.map(|value| i32::try_from(value).expect("test counts fit in i32"))
}

fn to_sqlx(window: &ValidityWindow) -> (Option<SqlxTimestamp>, Option<SqlxTimestamp>) {
    (
        window.start_at.map(SqlxTimestamp::from),
        window.end_at.map(SqlxTimestamp::from),
    )
}

pub(crate) async fn insert_coupon(ctx: &TestContext, coupon: &Coupon) -> Result<(), sqlx::Error> {
    let (start_at, end_at) = to_sqlx(&coupon.window);

    sqlx::query(
        "INSERT INTO coupons (
           uuid, code, kind, value, active, start_at, end_at, min_subtotal,
           max_uses, used_count, per_customer_limit, categories, brands, product_ids
         ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)",
    )
    .bind(Uuid::now_v7())
    .bind(coupon.code.as_str())
    .bind(coupon.kind.as_str())
    .bind(coupon.value)
    .bind(coupon.active)
    .bind(start_at)
    .bind(end_at)
    .bind(coupon.min_subtotal)
    .bind(to_i32(coupon.max_uses))
    .bind(to_i32(Some(coupon.used_count)))
    .bind(to_i32(coupon.per_customer_limit))
    .bind(&coupon.eligibility.categories)
    .bind(&coupon.eligibility.brands)
    .bind(&coupon.eligibility.product_ids)
    .execute(ctx.db.pool())
    .await?;

    Ok(())
}

pub(crate) async fn insert_promotion(
    ctx: &TestContext,
    promotion: &Promotion,
) -> Result<(), sqlx::Error> {
    let (start_at, end_at) = to_sqlx(&promotion.window);

    let threshold = match promotion.kind {
        rebate::promotions::PromotionKind::FreeShippingOver { threshold } => Some(threshold),
        _ => None,
    };

    sqlx::query(
        "INSERT INTO promotions (
           uuid, name, kind, value, threshold, active, start_at, end_at,
           categories, brands, product_ids, flash_sale, seasonal_tag
         ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)",
    )
    .bind(Uuid::now_v7())
    .bind(&promotion.name)
    .bind(promotion.kind.as_str())
    .bind(promotion.kind.value())
    .bind(threshold)
    .bind(promotion.active)
    .bind(start_at)
    .bind(end_at)
    .bind(&promotion.eligibility.categories)
    .bind(&promotion.eligibility.brands)
    .bind(&promotion.eligibility.product_ids)
    .bind(promotion.flash_sale)
    .bind(&promotion.seasonal_tag)
    .execute(ctx.db.pool())
    .await?;

    Ok(())
}
