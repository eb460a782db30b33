//! Cart Fixtures

use serde::Deserialize;

use crate::{
    checkout::PricingRequest,
    fixtures::{FixtureError, parse_amount, parse_optional_amount},
    items::{CartLineItem, total_price},
};

/// Cart line as written in YAML
#[derive(Debug, Deserialize)]
pub struct ItemFixture {
    /// Product id
    pub id: String,

    /// Category
    #[serde(default)]
    pub category: Option<String>,

    /// Brand
    #[serde(default)]
    pub brand: Option<String>,

    /// Unit price
    pub price: String,

    /// Units
    pub qty: u32,
}

impl TryFrom<ItemFixture> for CartLineItem {
    type Error = FixtureError;

    fn try_from(fixture: ItemFixture) -> Result<Self, Self::Error> {
        Ok(Self {
            id: fixture.id,
            category: fixture.category,
            brand: fixture.brand,
            price: parse_amount(&fixture.price)?,
            qty: fixture.qty,
        })
    }
}

/// Cart snapshot as written in YAML
///
/// When `subtotal` is omitted it is computed from the lines.
#[derive(Debug, Deserialize)]
pub struct CartFixture {
    /// Lines in the cart
    #[serde(default)]
    pub items: Vec<ItemFixture>,

    /// Caller-supplied subtotal
    #[serde(default)]
    pub subtotal: Option<String>,

    /// Shipping price, zero when omitted
    #[serde(default)]
    pub shipping_price: Option<String>,

    /// Raw coupon code
    #[serde(default)]
    pub coupon_code: Option<String>,
}

impl TryFrom<CartFixture> for PricingRequest {
    type Error = FixtureError;

    fn try_from(fixture: CartFixture) -> Result<Self, Self::Error> {
        let items = fixture
            .items
            .into_iter()
            .map(CartLineItem::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let subtotal = match fixture.subtotal.as_deref() {
            Some(subtotal) => parse_amount(subtotal)?,
            None => total_price(&items),
        };

        Ok(Self {
            items,
            subtotal,
            coupon_code: fixture.coupon_code,
            shipping_price: parse_optional_amount(fixture.shipping_price.as_deref())?,
        })
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn subtotal_defaults_to_line_total() -> TestResult {
        let fixture: CartFixture = serde_norway::from_str(
            r#"
items:
  - { id: a, price: "12.50", qty: 2 }
  - { id: b, category: socks, price: "5", qty: 3 }
"#,
        )?;

        let request = PricingRequest::try_from(fixture)?;

        assert_eq!(request.subtotal, dec!(40));
        assert_eq!(request.items.len(), 2);

        Ok(())
    }

    #[test]
    fn explicit_subtotal_wins() -> TestResult {
        let fixture: CartFixture = serde_norway::from_str(
            r#"
subtotal: "99.00"
shipping_price: "4.99"
items:
  - { id: a, price: "12.50", qty: 2 }
"#,
        )?;

        let request = PricingRequest::try_from(fixture)?;

        assert_eq!(request.subtotal, dec!(99));
        assert_eq!(request.shipping_price, dec!(4.99));

        Ok(())
    }

    #[test]
    fn bad_price_is_reported() -> TestResult {
        let fixture: CartFixture =
            serde_norway::from_str(r#"items: [{ id: a, price: "free", qty: 1 }]"#)?;

        assert!(matches!(
            PricingRequest::try_from(fixture),
            Err(FixtureError::InvalidAmount(amount)) if amount == "free"
        ));

        Ok(())
    }
}
