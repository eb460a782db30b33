//! Rule Records
//!
//! Raw rows as stored, and their mapping into engine types.

use jiff_sqlx::Timestamp as SqlxTimestamp;
use rebate::{
    coupons::{Coupon, CouponCode, CouponKind},
    eligibility::Eligibility,
    promotions::{Promotion, PromotionKind},
    validity::ValidityWindow,
};
use rust_decimal::Decimal;
use sqlx::{FromRow, Row, postgres::PgRow};
use uuid::Uuid;

use crate::domain::rules::RuleStoreError;

const COUPONS_TABLE: &str = "coupons";
const PROMOTIONS_TABLE: &str = "promotions";

/// Coupon row
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CouponRecord {
    pub uuid: Uuid,
    pub code: String,
    pub kind: String,
    pub value: Decimal,
    pub active: bool,
    pub window: ValidityWindow,
    pub min_subtotal: Decimal,
    pub max_uses: Option<i32>,
    pub used_count: i32,
    pub per_customer_limit: Option<i32>,
    pub eligibility: Eligibility,
}

/// Promotion row
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PromotionRecord {
    pub uuid: Uuid,
    pub name: String,
    pub kind: String,
    pub value: Option<Decimal>,
    pub threshold: Option<Decimal>,
    pub active: bool,
    pub window: ValidityWindow,
    pub eligibility: Eligibility,
    pub flash_sale: bool,
    pub seasonal_tag: Option<String>,
}

impl<'r> FromRow<'r, PgRow> for CouponRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get("uuid")?,
            code: row.try_get("code")?,
            kind: row.try_get("kind")?,
            value: row.try_get("value")?,
            active: row.try_get("active")?,
            window: window_from_row(row)?,
            min_subtotal: row.try_get("min_subtotal")?,
            max_uses: row.try_get("max_uses")?,
            used_count: row.try_get("used_count")?,
            per_customer_limit: row.try_get("per_customer_limit")?,
            eligibility: eligibility_from_row(row)?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for PromotionRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get("uuid")?,
            name: row.try_get("name")?,
            kind: row.try_get("kind")?,
            value: row.try_get("value")?,
            threshold: row.try_get("threshold")?,
            active: row.try_get("active")?,
            window: window_from_row(row)?,
            eligibility: eligibility_from_row(row)?,
            flash_sale: row.try_get("flash_sale")?,
            seasonal_tag: row.try_get("seasonal_tag")?,
        })
    }
}

fn window_from_row(row: &PgRow) -> sqlx::Result<ValidityWindow> {
    Ok(ValidityWindow::new(
        row.try_get::<Option<SqlxTimestamp>, _>("start_at")?
            .map(SqlxTimestamp::to_jiff),
        row.try_get::<Option<SqlxTimestamp>, _>("end_at")?
            .map(SqlxTimestamp::to_jiff),
    ))
}

fn eligibility_from_row(row: &PgRow) -> sqlx::Result<Eligibility> {
    Ok(Eligibility::new(
        row.try_get("categories")?,
        row.try_get("brands")?,
        row.try_get("product_ids")?,
    ))
}

impl TryFrom<CouponRecord> for Coupon {
    type Error = RuleStoreError;

    fn try_from(record: CouponRecord) -> Result<Self, Self::Error> {
        let invalid = |reason: &str| RuleStoreError::InvalidRecord {
            table: COUPONS_TABLE,
            uuid: record.uuid,
            reason: reason.to_string(),
        };

        let code = CouponCode::parse(&record.code).ok_or_else(|| invalid("blank code"))?;

        let kind = match record.kind.as_str() {
            "percent" => CouponKind::Percent,
            "flat" => CouponKind::Flat,
            _ => return Err(invalid(&format!("unknown kind {:?}", record.kind))),
        };

        let max_uses = record
            .max_uses
            .map(u32::try_from)
            .transpose()
            .map_err(|_err| invalid("negative max_uses"))?;

        let used_count =
            u32::try_from(record.used_count).map_err(|_err| invalid("negative used_count"))?;

        let per_customer_limit = record
            .per_customer_limit
            .map(u32::try_from)
            .transpose()
            .map_err(|_err| invalid("negative per_customer_limit"))?;

        Ok(Self {
            code,
            kind,
            value: record.value,
            active: record.active,
            window: record.window,
            min_subtotal: record.min_subtotal,
            max_uses,
            used_count,
            per_customer_limit,
            eligibility: record.eligibility,
        })
    }
}

impl TryFrom<PromotionRecord> for Promotion {
    type Error = RuleStoreError;

    fn try_from(record: PromotionRecord) -> Result<Self, Self::Error> {
        let invalid = |reason: String| RuleStoreError::InvalidRecord {
            table: PROMOTIONS_TABLE,
            uuid: record.uuid,
            reason,
        };

        let kind = match (record.kind.as_str(), record.value, record.threshold) {
            ("percent", Some(value), _) => PromotionKind::Percent(value),
            ("flat", Some(value), _) => PromotionKind::Flat(value),
            ("bogo", _, _) => PromotionKind::Bogo,
            ("free_shipping_over", _, Some(threshold)) => {
                PromotionKind::FreeShippingOver { threshold }
            }
            ("percent" | "flat", None, _) => {
                return Err(invalid(format!("{} promotion without a value", record.kind)));
            }
            ("free_shipping_over", _, None) => {
                return Err(invalid("free shipping promotion without a threshold".to_string()));
            }
            (other, _, _) => return Err(invalid(format!("unknown kind {other:?}"))),
        };

        Ok(Self {
            name: record.name,
            kind,
            active: record.active,
            window: record.window,
            eligibility: record.eligibility,
            flash_sale: record.flash_sale,
            seasonal_tag: record.seasonal_tag,
        })
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use testresult::TestResult;

    use super::*;

    fn coupon_record() -> CouponRecord {
        CouponRecord {
            uuid: Uuid::now_v7(),
            code: "SAVE10".to_string(),
            kind: "percent".to_string(),
            value: dec!(10),
            active: true,
            window: ValidityWindow::unbounded(),
            min_subtotal: dec!(0),
            max_uses: Some(10),
            used_count: 3,
            per_customer_limit: None,
            eligibility: Eligibility::whole_cart(),
        }
    }

    fn promotion_record(kind: &str) -> PromotionRecord {
        PromotionRecord {
            uuid: Uuid::now_v7(),
            name: "Spring".to_string(),
            kind: kind.to_string(),
            value: None,
            threshold: None,
            active: true,
            window: ValidityWindow::unbounded(),
            eligibility: Eligibility::whole_cart(),
            flash_sale: true,
            seasonal_tag: Some("spring".to_string()),
        }
    }

    #[test]
    fn coupon_record_maps_into_coupon() -> TestResult {
        let coupon = Coupon::try_from(coupon_record())?;

        assert_eq!(coupon.code.as_str(), "SAVE10");
        assert_eq!(coupon.kind, CouponKind::Percent);
        assert_eq!(coupon.max_uses, Some(10));
        assert_eq!(coupon.used_count, 3);

        Ok(())
    }

    #[test]
    fn unknown_coupon_kind_is_invalid() {
        let record = CouponRecord {
            kind: "tiered".to_string(),
            ..coupon_record()
        };

        assert!(matches!(
            Coupon::try_from(record),
            Err(RuleStoreError::InvalidRecord { table: "coupons", .. })
        ));
    }

    #[test]
    fn negative_used_count_is_invalid() {
        let record = CouponRecord {
            used_count: -1,
            ..coupon_record()
        };

        assert!(matches!(
            Coupon::try_from(record),
            Err(RuleStoreError::InvalidRecord { reason, .. }) if reason == "negative used_count"
        ));
    }

    #[test]
    fn promotion_kinds_map() -> TestResult {
        let percent = Promotion::try_from(PromotionRecord {
            value: Some(dec!(15)),
            ..promotion_record("percent")
        })?;

        let shipping = Promotion::try_from(PromotionRecord {
            threshold: Some(dec!(200)),
            ..promotion_record("free_shipping_over")
        })?;

        let bogo = Promotion::try_from(promotion_record("bogo"))?;

        assert_eq!(percent.kind, PromotionKind::Percent(dec!(15)));
        assert_eq!(
            shipping.kind,
            PromotionKind::FreeShippingOver {
                threshold: dec!(200)
            }
        );
        assert_eq!(bogo.kind, PromotionKind::Bogo);
        assert!(bogo.flash_sale);

        Ok(())
    }

    #[test]
    fn promotion_without_required_amount_is_invalid() {
        assert!(matches!(
            Promotion::try_from(promotion_record("flat")),
            Err(RuleStoreError::InvalidRecord { table: "promotions", .. })
        ));
        assert!(matches!(
            Promotion::try_from(promotion_record("free_shipping_over")),
            Err(RuleStoreError::InvalidRecord { .. })
        ));
    }
}
