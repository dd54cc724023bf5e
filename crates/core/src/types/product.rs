//! Catalog product types.

use core::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::filter::ParseFilterError;
use super::id::ProductId;
use super::price::Price;

/// A catalog product.
///
/// Products are created when the catalog is built and never change or go
/// away afterwards, so cart line items can hold a plain snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Price,
    pub category: Category,
    pub rating: Rating,
    /// Merchandising label such as "New" or "Bestseller".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
    /// Source image URL.
    pub image: String,
}

/// The fixed set of catalog categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Smartphones,
    Laptops,
    Headphones,
    Accessories,
}

impl Category {
    /// Every category, in menu order.
    pub const ALL: [Self; 4] = [
        Self::Smartphones,
        Self::Laptops,
        Self::Headphones,
        Self::Accessories,
    ];

    /// Machine name used in filters and storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Smartphones => "smartphones",
            Self::Laptops => "laptops",
            Self::Headphones => "headphones",
            Self::Accessories => "accessories",
        }
    }

    /// Human-readable menu label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Smartphones => "Smartphones",
            Self::Laptops => "Laptops",
            Self::Headphones => "Headphones",
            Self::Accessories => "Accessories",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ParseFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| ParseFilterError::unknown("category", s))
    }
}

/// Errors that can occur when constructing a [`Rating`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RatingError {
    #[error("rating must be between 0 and 5 (got {0})")]
    OutOfRange(Decimal),
}

/// A customer rating between 0 and 5 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Rating(Decimal);

impl Rating {
    /// Highest possible rating.
    pub const MAX_STARS: u32 = 5;

    /// No stars.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a rating, rejecting values outside `[0, 5]`.
    ///
    /// # Errors
    ///
    /// Returns `RatingError::OutOfRange` for negative values or values above 5.
    pub fn new(value: Decimal) -> Result<Self, RatingError> {
        if value < Decimal::ZERO || value > Decimal::from(Self::MAX_STARS) {
            return Err(RatingError::OutOfRange(value));
        }
        Ok(Self(value))
    }

    /// Create a rating from tenths, e.g. `48` for 4.8.
    ///
    /// # Errors
    ///
    /// Returns `RatingError::OutOfRange` if the result falls outside `[0, 5]`.
    pub fn from_tenths(tenths: i64) -> Result<Self, RatingError> {
        Self::new(Decimal::new(tenths, 1))
    }

    /// The underlying decimal value.
    #[must_use]
    pub const fn value(self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Rating {
    type Error = RatingError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rating> for Decimal {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}
