//! Fixtures
//!
//! Pricing scenarios described in YAML: a cart, the rules the store would
//! hold, and the breakdown the engine is expected to produce.

use std::{fs, path::PathBuf, str::FromStr};

use jiff::Timestamp;
use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use serde::Deserialize;
use thiserror::Error;

use crate::{
    checkout::{DiscountBreakdown, PricingError, PricingRequest, apply_discounts},
    coupons::{Coupon, CouponCode},
    fixtures::{
        cart::CartFixture,
        rules::{CouponFixture, PromotionFixture},
    },
    promotions::Promotion,
};

pub mod cart;
pub mod rules;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid decimal amount
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Invalid RFC 3339 timestamp
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// Blank coupon code
    #[error("Invalid coupon code: {0:?}")]
    InvalidCouponCode(String),

    /// Two coupons share a normalised code
    #[error("Duplicate coupon code: {0}")]
    DuplicateCouponCode(String),
}

/// Scenario file as written in YAML
#[derive(Debug, Deserialize)]
pub struct ScenarioFixture {
    /// Instant the cart is priced at
    pub now: String,

    /// The cart snapshot
    pub cart: CartFixture,

    /// Coupons held by the store
    #[serde(default)]
    pub coupons: Vec<CouponFixture>,

    /// Promotions held by the store
    #[serde(default)]
    pub promotions: Vec<PromotionFixture>,

    /// Rounded breakdown the engine should produce
    pub expected: ExpectedFixture,
}

/// Expected outcome as written in YAML
#[derive(Debug, Deserialize)]
pub struct ExpectedFixture {
    /// Total discount
    pub discount: String,

    /// Coupon share
    #[serde(default)]
    pub coupon_discount: Option<String>,

    /// Promotion share
    #[serde(default)]
    pub promo_discount: Option<String>,

    /// Shipping share
    #[serde(default)]
    pub shipping_discount: Option<String>,

    /// Free shipping flag
    #[serde(default)]
    pub free_shipping: bool,

    /// Code of the coupon expected to apply
    #[serde(default)]
    pub applied_coupon: Option<String>,

    /// Names of promotions expected to apply, in order
    #[serde(default)]
    pub applied_promos: Vec<String>,
}

/// Expected outcome of a scenario
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expected {
    /// Total discount
    pub discount: Decimal,

    /// Coupon share
    pub coupon_discount: Decimal,

    /// Promotion share
    pub promo_discount: Decimal,

    /// Shipping share
    pub shipping_discount: Decimal,

    /// Free shipping flag
    pub free_shipping: bool,

    /// Code of the coupon expected to apply
    pub applied_coupon: Option<String>,

    /// Names of promotions expected to apply
    pub applied_promos: Vec<String>,
}

impl Expected {
    /// Project a rounded breakdown onto the fields a scenario asserts on.
    pub fn from_breakdown(breakdown: &DiscountBreakdown) -> Self {
        Self {
            discount: breakdown.discount,
            coupon_discount: breakdown.coupon_discount,
            promo_discount: breakdown.promo_discount,
            shipping_discount: breakdown.shipping_discount,
            free_shipping: breakdown.free_shipping,
            applied_coupon: breakdown
                .applied_coupon
                .as_ref()
                .map(|coupon| coupon.code.to_string()),
            applied_promos: breakdown
                .applied_promos
                .iter()
                .map(|promo| promo.name.clone())
                .collect(),
        }
    }
}

impl TryFrom<ExpectedFixture> for Expected {
    type Error = FixtureError;

    fn try_from(fixture: ExpectedFixture) -> Result<Self, Self::Error> {
        Ok(Self {
            discount: parse_amount(&fixture.discount)?,
            coupon_discount: parse_optional_amount(fixture.coupon_discount.as_deref())?,
            promo_discount: parse_optional_amount(fixture.promo_discount.as_deref())?,
            shipping_discount: parse_optional_amount(fixture.shipping_discount.as_deref())?,
            free_shipping: fixture.free_shipping,
            applied_coupon: fixture.applied_coupon,
            applied_promos: fixture.applied_promos,
        })
    }
}

/// A parsed pricing scenario
#[derive(Debug, Clone)]
pub struct Scenario {
    /// Instant the cart is priced at
    pub now: Timestamp,

    /// Pricing request
    pub request: PricingRequest,

    /// Coupons keyed by normalised code, standing in for the rule store
    pub coupons: FxHashMap<CouponCode, Coupon>,

    /// Promotions held by the store, active or not
    pub promotions: Vec<Promotion>,

    /// Expected rounded outcome
    pub expected: Expected,
}

impl Scenario {
    /// Load a scenario from `./fixtures/scenarios/{name}.yml`
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        Self::from_path(
            PathBuf::from("./fixtures/scenarios").join(format!("{name}.yml")),
        )
    }

    /// Load a scenario from a file path
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_path(path: impl Into<PathBuf>) -> Result<Self, FixtureError> {
        let contents = fs::read_to_string(path.into())?;

        Self::from_yaml(&contents)
    }

    /// Parse a scenario from YAML source
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed or holds invalid values.
    pub fn from_yaml(source: &str) -> Result<Self, FixtureError> {
        let fixture: ScenarioFixture = serde_norway::from_str(source)?;

        Self::try_from(fixture)
    }

    /// Look the request's coupon up the way the rule store would.
    pub fn stored_coupon(&self) -> Option<&Coupon> {
        self.request
            .coupon_code()
            .and_then(|code| self.coupons.get(&code))
    }

    /// Price the scenario's cart, unrounded.
    ///
    /// # Errors
    ///
    /// Returns an error if the request is invalid.
    pub fn price(&self) -> Result<DiscountBreakdown, PricingError> {
        apply_discounts(
            &self.request,
            self.stored_coupon(),
            &self.promotions,
            self.now,
        )
    }
}

impl TryFrom<ScenarioFixture> for Scenario {
    type Error = FixtureError;

    fn try_from(fixture: ScenarioFixture) -> Result<Self, Self::Error> {
        let mut coupons = FxHashMap::default();

        for coupon in fixture.coupons {
            let coupon = Coupon::try_from(coupon)?;

            if coupons.contains_key(&coupon.code) {
                return Err(FixtureError::DuplicateCouponCode(coupon.code.into_string()));
            }

            coupons.insert(coupon.code.clone(), coupon);
        }

        let promotions = fixture
            .promotions
            .into_iter()
            .map(Promotion::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            now: parse_timestamp(&fixture.now)?,
            request: PricingRequest::try_from(fixture.cart)?,
            coupons,
            promotions,
            expected: Expected::try_from(fixture.expected)?,
        })
    }
}

/// Parse a decimal amount such as `"19.99"`
///
/// # Errors
///
/// Returns an error if the string is not a decimal number.
pub fn parse_amount(s: &str) -> Result<Decimal, FixtureError> {
    Decimal::from_str(s.trim()).map_err(|_err| FixtureError::InvalidAmount(s.to_string()))
}

/// Parse an optional amount, defaulting to zero
///
/// # Errors
///
/// Returns an error if a present string is not a decimal number.
pub fn parse_optional_amount(s: Option<&str>) -> Result<Decimal, FixtureError> {
    s.map_or(Ok(Decimal::ZERO), parse_amount)
}

/// Parse an RFC 3339 timestamp such as `"2026-06-01T12:00:00Z"`
///
/// # Errors
///
/// Returns an error if the string is not a valid timestamp.
pub fn parse_timestamp(s: &str) -> Result<Timestamp, FixtureError> {
    s.trim()
        .parse::<Timestamp>()
        .map_err(|_err| FixtureError::InvalidTimestamp(s.to_string()))
}
