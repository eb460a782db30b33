//! Items

use rust_decimal::Decimal;

/// A cart line supplied by the caller for a single pricing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLineItem {
    /// Product identifier
    pub id: String,

    /// Product category, if the storefront knows it
    pub category: Option<String>,

    /// Product brand, if the storefront knows it
    pub brand: Option<String>,

    /// Unit price
    pub price: Decimal,

    /// Number of units on this line
    pub qty: u32,
}

impl CartLineItem {
    /// Creates a line with no category or brand.
    pub fn new(id: impl Into<String>, price: Decimal, qty: u32) -> Self {
        Self {
            id: id.into(),
            category: None,
            brand: None,
            price,
            qty,
        }
    }

    /// Sets the line's category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Sets the line's brand.
    #[must_use]
    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    /// Unit price multiplied by quantity.
    pub fn line_total(&self) -> Decimal {
        self.price.saturating_mul(Decimal::from(self.qty))
    }
}

/// Sums the line totals of the given items.
pub fn total_price<'a, I>(items: I) -> Decimal
where
    I: IntoIterator<Item = &'a CartLineItem>,
{
    items
        .into_iter()
        .fold(Decimal::ZERO, |acc, item| acc.saturating_add(item.line_total()))
}
