//! Eligibility
//!
//! Scopes a coupon or promotion to the cart lines it applies to. A rule may
//! restrict by category, brand and product id; an empty list places no
//! restriction on that dimension and a line must satisfy every non-empty list.

use rust_decimal::Decimal;
use smallvec::SmallVec;

use crate::items::{CartLineItem, total_price};

/// Category, brand and product id constraints of a single rule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Eligibility {
    /// Allowed categories. Empty means any category.
    pub categories: Vec<String>,

    /// Allowed brands. Empty means any brand.
    pub brands: Vec<String>,

    /// Allowed product ids. Empty means any product.
    pub product_ids: Vec<String>,
}

/// Which part of the cart a rule applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope<'a> {
    /// The rule has no constraints and applies to the whole cart.
    WholeCart,

    /// The rule is constrained; these are the lines that satisfied it.
    /// May be empty, in which case the rule contributes nothing.
    Subset(SmallVec<[&'a CartLineItem; 4]>),
}

impl Eligibility {
    /// Create a constraint set from the three dimensions.
    pub fn new(categories: Vec<String>, brands: Vec<String>, product_ids: Vec<String>) -> Self {
        Self {
            categories,
            brands,
            product_ids,
        }
    }

    /// A constraint set that applies to every line.
    #[must_use]
    pub fn whole_cart() -> Self {
        Self::default()
    }

    /// Whether every dimension is unconstrained.
    pub fn is_unrestricted(&self) -> bool {
        self.categories.is_empty() && self.brands.is_empty() && self.product_ids.is_empty()
    }

    /// Whether a single line satisfies every non-empty dimension.
    pub fn matches(&self, item: &CartLineItem) -> bool {
        allows(&self.categories, item.category.as_deref())
            && allows(&self.brands, item.brand.as_deref())
            && allows(&self.product_ids, Some(item.id.as_str()))
    }

    /// Resolve the scope of this rule against a cart.
    pub fn filter<'a>(&self, items: &'a [CartLineItem]) -> Scope<'a> {
        if self.is_unrestricted() {
            return Scope::WholeCart;
        }

        Scope::Subset(items.iter().filter(|item| self.matches(item)).collect())
    }
}

impl<'a> Scope<'a> {
    /// The amount a percent or flat discount is computed against.
    ///
    /// The whole-cart scope uses the caller's subtotal; a subset uses the sum
    /// of its line totals, which is zero when nothing matched.
    pub fn base(&self, subtotal: Decimal) -> Decimal {
        match self {
            Self::WholeCart => subtotal,
            Self::Subset(items) => total_price(items.iter().copied()),
        }
    }

    /// The concrete lines covered by this scope.
    pub fn lines(self, items: &'a [CartLineItem]) -> SmallVec<[&'a CartLineItem; 4]> {
        match self {
            Self::WholeCart => items.iter().collect(),
            Self::Subset(matched) => matched,
        }
    }
}

fn allows(allowed: &[String], value: Option<&str>) -> bool {
    if allowed.is_empty() {
        return true;
    }

    value.is_some_and(|value| allowed.iter().any(|candidate| candidate == value))
}
