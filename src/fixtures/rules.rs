//! Rule Fixtures
//!
//! Coupon and promotion records as the store would hold them.

use serde::Deserialize;

use crate::{
    coupons::{Coupon, CouponCode, CouponKind},
    eligibility::Eligibility,
    fixtures::{FixtureError, parse_amount, parse_optional_amount, parse_timestamp},
    promotions::{Promotion, PromotionKind},
    validity::ValidityWindow,
};

const fn default_active() -> bool {
    true
}

/// Eligibility constraints as written in YAML
#[derive(Debug, Default, Deserialize)]
pub struct EligibilityFixture {
    /// Allowed categories
    #[serde(default)]
    pub categories: Vec<String>,

    /// Allowed brands
    #[serde(default)]
    pub brands: Vec<String>,

    /// Allowed product ids
    #[serde(default)]
    pub product_ids: Vec<String>,
}

impl From<EligibilityFixture> for Eligibility {
    fn from(fixture: EligibilityFixture) -> Self {
        Eligibility::new(fixture.categories, fixture.brands, fixture.product_ids)
    }
}

/// Validity window as written in YAML
#[derive(Debug, Default, Deserialize)]
pub struct WindowFixture {
    /// First valid instant
    #[serde(default)]
    pub start_at: Option<String>,

    /// Last valid instant
    #[serde(default)]
    pub end_at: Option<String>,
}

impl TryFrom<WindowFixture> for ValidityWindow {
    type Error = FixtureError;

    fn try_from(fixture: WindowFixture) -> Result<Self, Self::Error> {
        let start_at = fixture.start_at.as_deref().map(parse_timestamp).transpose()?;
        let end_at = fixture.end_at.as_deref().map(parse_timestamp).transpose()?;

        Ok(ValidityWindow::new(start_at, end_at))
    }
}

/// Coupon kind as written in YAML
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CouponKindFixture {
    /// Percentage off
    Percent,

    /// Fixed amount off
    Flat,
}

impl From<CouponKindFixture> for CouponKind {
    fn from(fixture: CouponKindFixture) -> Self {
        match fixture {
            CouponKindFixture::Percent => CouponKind::Percent,
            CouponKindFixture::Flat => CouponKind::Flat,
        }
    }
}

/// Coupon record as written in YAML
#[derive(Debug, Deserialize)]
pub struct CouponFixture {
    /// Code, normalised on load
    pub code: String,

    /// Percent or flat
    #[serde(rename = "type")]
    pub kind: CouponKindFixture,

    /// Rate or amount
    pub value: String,

    /// Defaults to active
    #[serde(default = "default_active")]
    pub active: bool,

    /// Validity window
    #[serde(flatten)]
    pub window: WindowFixture,

    /// Minimum subtotal, zero when omitted
    #[serde(default)]
    pub min_subtotal: Option<String>,

    /// Usage cap
    #[serde(default)]
    pub max_uses: Option<u32>,

    /// Recorded redemptions
    #[serde(default)]
    pub used_count: u32,

    /// Per-customer cap
    #[serde(default)]
    pub per_customer_limit: Option<u32>,

    /// Eligibility constraints
    #[serde(flatten)]
    pub eligibility: EligibilityFixture,
}

impl TryFrom<CouponFixture> for Coupon {
    type Error = FixtureError;

    fn try_from(fixture: CouponFixture) -> Result<Self, Self::Error> {
        let code = CouponCode::parse(&fixture.code)
            .ok_or_else(|| FixtureError::InvalidCouponCode(fixture.code.clone()))?;

        Ok(Self {
            code,
            kind: fixture.kind.into(),
            value: parse_amount(&fixture.value)?,
            active: fixture.active,
            window: fixture.window.try_into()?,
            min_subtotal: parse_optional_amount(fixture.min_subtotal.as_deref())?,
            max_uses: fixture.max_uses,
            used_count: fixture.used_count,
            per_customer_limit: fixture.per_customer_limit,
            eligibility: fixture.eligibility.into(),
        })
    }
}

/// Promotion mechanic as written in YAML, tagged by `type`
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PromotionKindFixture {
    /// Percentage off
    Percent {
        /// Rate, 0-100
        value: String,
    },

    /// Fixed amount off
    Flat {
        /// Amount
        value: String,
    },

    /// Buy one get one
    Bogo,

    /// Free shipping from a subtotal threshold
    FreeShippingOver {
        /// Threshold
        threshold: String,
    },
}

impl TryFrom<PromotionKindFixture> for PromotionKind {
    type Error = FixtureError;

    fn try_from(fixture: PromotionKindFixture) -> Result<Self, Self::Error> {
        Ok(match fixture {
            PromotionKindFixture::Percent { value } => PromotionKind::Percent(parse_amount(&value)?),
            PromotionKindFixture::Flat { value } => PromotionKind::Flat(parse_amount(&value)?),
            PromotionKindFixture::Bogo => PromotionKind::Bogo,
            PromotionKindFixture::FreeShippingOver { threshold } => {
                PromotionKind::FreeShippingOver {
                    threshold: parse_amount(&threshold)?,
                }
            }
        })
    }
}

/// Promotion record as written in YAML
#[derive(Debug, Deserialize)]
pub struct PromotionFixture {
    /// Display name
    pub name: String,

    /// Mechanic and parameters
    #[serde(flatten)]
    pub kind: PromotionKindFixture,

    /// Defaults to active
    #[serde(default = "default_active")]
    pub active: bool,

    /// Validity window
    #[serde(flatten)]
    pub window: WindowFixture,

    /// Eligibility constraints
    #[serde(flatten)]
    pub eligibility: EligibilityFixture,

    /// Marketing flag
    #[serde(default)]
    pub flash_sale: bool,

    /// Marketing tag
    #[serde(default)]
    pub seasonal_tag: Option<String>,
}

impl TryFrom<PromotionFixture> for Promotion {
    type Error = FixtureError;

    fn try_from(fixture: PromotionFixture) -> Result<Self, Self::Error> {
        Ok(Self {
            name: fixture.name,
            kind: fixture.kind.try_into()?,
            active: fixture.active,
            window: fixture.window.try_into()?,
            eligibility: fixture.eligibility.into(),
            flash_sale: fixture.flash_sale,
            seasonal_tag: fixture.seasonal_tag,
        })
    }
}
