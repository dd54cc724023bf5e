//! Catalog filter state: search term, category, price bucket and sort order.

use core::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::product::{Category, Product};

/// Error returned when a filter control value is not recognised.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind}: {value}")]
pub struct ParseFilterError {
    /// Which control was being parsed (`category`, `price range`, `sort key`).
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

impl ParseFilterError {
    pub(crate) fn unknown(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_owned(),
        }
    }
}

/// Named price buckets offered by the price filter.
///
/// Buckets are half-open on the low side so every price falls in exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriceRange {
    /// Up to and including 100.
    #[serde(rename = "0-100")]
    UpTo100,
    /// Above 100, up to and including 500.
    #[serde(rename = "100-500")]
    From100To500,
    /// Above 500, up to and including 1000.
    #[serde(rename = "500-1000")]
    From500To1000,
    /// Above 1000.
    #[serde(rename = "1000+")]
    Over1000,
}

impl PriceRange {
    pub const ALL: [Self; 4] = [
        Self::UpTo100,
        Self::From100To500,
        Self::From500To1000,
        Self::Over1000,
    ];

    /// Control value, e.g. `"500-1000"`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UpTo100 => "0-100",
            Self::From100To500 => "100-500",
            Self::From500To1000 => "500-1000",
            Self::Over1000 => "1000+",
        }
    }

    /// Whether `amount` falls inside this bucket.
    #[must_use]
    pub fn contains(self, amount: Decimal) -> bool {
        let hundred = Decimal::ONE_HUNDRED;
        let five_hundred = Decimal::from(500);
        let thousand = Decimal::ONE_THOUSAND;
        match self {
            Self::UpTo100 => amount <= hundred,
            Self::From100To500 => amount > hundred && amount <= five_hundred,
            Self::From500To1000 => amount > five_hundred && amount <= thousand,
            Self::Over1000 => amount > thousand,
        }
    }
}

impl fmt::Display for PriceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PriceRange {
    type Err = ParseFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|r| r.as_str() == needle)
            .ok_or_else(|| ParseFilterError::unknown("price range", s))
    }
}

/// Result ordering for the product grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortKey {
    /// Alphabetical by name.
    #[default]
    #[serde(rename = "name")]
    Name,
    /// Cheapest first.
    #[serde(rename = "price-asc", alias = "price-low")]
    PriceAsc,
    /// Most expensive first.
    #[serde(rename = "price-desc", alias = "price-high")]
    PriceDesc,
    /// Best rated first.
    #[serde(rename = "rating")]
    Rating,
}

impl SortKey {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::PriceAsc => "price-asc",
            Self::PriceDesc => "price-desc",
            Self::Rating => "rating",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = ParseFilterError;

    /// Accepts the canonical names plus the `price-low` / `price-high`
    /// control values. An empty string selects the default order.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "name" => Ok(Self::Name),
            "price-asc" | "price-low" => Ok(Self::PriceAsc),
            "price-desc" | "price-high" => Ok(Self::PriceDesc),
            "rating" => Ok(Self::Rating),
            _ => Err(ParseFilterError::unknown("sort key", s)),
        }
    }
}

/// The current state of the catalog's search and filter controls.
///
/// Derived from the UI on every change and never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterState {
    pub search_term: String,
    pub category: Option<Category>,
    pub price_range: Option<PriceRange>,
    pub sort_key: SortKey,
}

impl FilterState {
    /// Set the free-text search term.
    #[must_use]
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    /// Restrict to one category.
    #[must_use]
    pub const fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// Restrict to one price bucket.
    #[must_use]
    pub const fn with_price_range(mut self, range: PriceRange) -> Self {
        self.price_range = Some(range);
        self
    }

    /// Choose the result ordering.
    #[must_use]
    pub const fn sorted_by(mut self, key: SortKey) -> Self {
        self.sort_key = key;
        self
    }

    /// Whether `product` satisfies every active predicate.
    ///
    /// The search term matches case-insensitively anywhere in the name or
    /// the description; a blank term matches everything.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        let term = self.search_term.trim().to_lowercase();
        let matches_search = term.is_empty()
            || product.name.to_lowercase().contains(&term)
            || product.description.to_lowercase().contains(&term);

        let matches_category = self.category.is_none_or(|c| c == product.category);

        let matches_price = self
            .price_range
            .is_none_or(|range| range.contains(product.price.amount));

        matches_search && matches_category && matches_price
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::{Price, ProductId, Rating};

    fn product(name: &str, description: &str, price: i64, category: Category) -> Product {
        Product {
            id: ProductId::new(1),
            name: name.to_string(),
            description: description.to_string(),
            price: Price::usd(Decimal::from(price)),
            category,
            rating: Rating::from_tenths(45).unwrap(),
            badge: None,
            image: String::new(),
        }
    }

    #[test]
    fn test_price_range_boundaries() {
        assert!(PriceRange::UpTo100.contains(Decimal::from(100)));
        assert!(!PriceRange::From100To500.contains(Decimal::from(100)));
        assert!(PriceRange::From100To500.contains(Decimal::from(500)));
        assert!(PriceRange::From500To1000.contains(Decimal::from(1000)));
        assert!(!PriceRange::Over1000.contains(Decimal::from(1000)));
        assert!(PriceRange::Over1000.contains(Decimal::new(100_001, 2)));
    }

    #[test]
    fn test_every_price_in_exactly_one_bucket() {
        for amount in [0, 50, 100, 101, 499, 500, 999, 1000, 1001, 5000] {
            let hits = PriceRange::ALL
                .into_iter()
                .filter(|r| r.contains(Decimal::from(amount)))
                .count();
            assert_eq!(hits, 1, "amount {amount}");
        }
    }

    #[test]
    fn test_price_range_parse() {
        assert_eq!("1000+".parse::<PriceRange>().unwrap(), PriceRange::Over1000);
        assert!("1000-2000".parse::<PriceRange>().is_err());
    }

    #[test]
    fn test_sort_key_accepts_control_aliases() {
        assert_eq!("price-low".parse::<SortKey>().unwrap(), SortKey::PriceAsc);
        assert_eq!("price-high".parse::<SortKey>().unwrap(), SortKey::PriceDesc);
        assert_eq!("".parse::<SortKey>().unwrap(), SortKey::Name);
        assert!("popularity".parse::<SortKey>().is_err());
    }

    #[test]
    fn test_sort_key_serde_alias() {
        let key: SortKey = serde_json::from_str("\"price-high\"").unwrap();
        assert_eq!(key, SortKey::PriceDesc);
        assert_eq!(serde_json::to_string(&key).unwrap(), "\"price-desc\"");
    }

    #[test]
    fn test_matches_search_in_description_case_insensitive() {
        let p = product("AirPods Pro", "Active NOISE cancellation", 249, Category::Headphones);
        assert!(FilterState::default().with_search("noise").matches(&p));
        assert!(FilterState::default().with_search("AIRPODS").matches(&p));
        assert!(!FilterState::default().with_search("keyboard").matches(&p));
    }

    #[test]
    fn test_matches_requires_all_predicates() {
        let p = product("Dell XPS 13", "Ultra-portable laptop", 1299, Category::Laptops);
        let state = FilterState::default()
            .with_category(Category::Laptops)
            .with_price_range(PriceRange::Over1000);
        assert!(state.matches(&p));
        assert!(!state.clone().with_search("macbook").matches(&p));
        assert!(
            !FilterState::default()
                .with_category(Category::Laptops)
                .with_price_range(PriceRange::From500To1000)
                .matches(&p)
        );
    }

    #[test]
    fn test_blank_search_matches_everything() {
        let p = product("Magic Keyboard", "Wireless keyboard", 179, Category::Accessories);
        assert!(FilterState::default().with_search("   ").matches(&p));
    }
}
