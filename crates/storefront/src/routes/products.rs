//! Product route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use techstore_core::{
    Category, FilterState, ParseFilterError, Price, PriceRange, Product, ProductId, SortKey,
};

use crate::catalog::ListingPage;
use crate::error::{AppError, Result};
use crate::filters;
use crate::services::CatalogService;
use crate::state::AppState;

/// Product card display data.
#[derive(Debug, Clone, Serialize)]
pub struct ProductView {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Price,
    pub price_display: String,
    pub category: Category,
    pub category_label: &'static str,
    pub rating: String,
    pub stars: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
    pub image: String,
    pub thumbnail: String,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price,
            price_display: product.price.display(),
            category: product.category,
            category_label: product.category.label(),
            rating: product.rating.to_string(),
            stars: filters::format_stars(product.rating),
            badge: product.badge.clone(),
            image: product.image.clone(),
            thumbnail: filters::optimized_image_url(&product.image, filters::CARD_IMAGE_WIDTH),
        }
    }
}

/// Product grid display data.
#[derive(Debug, Clone, Serialize)]
pub struct ListingView {
    pub products: Vec<ProductView>,
    pub total_matches: usize,
    pub page: usize,
    pub page_size: usize,
    pub has_more: bool,
}

impl From<ListingPage> for ListingView {
    fn from(page: ListingPage) -> Self {
        Self {
            products: page.products.iter().map(ProductView::from).collect(),
            total_matches: page.total_matches,
            page: page.page,
            page_size: page.page_size,
            has_more: page.has_more,
        }
    }
}

/// Filter controls as query parameters. Blank values mean "any".
#[derive(Debug, Default, Deserialize)]
pub struct FilterQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    pub price: Option<String>,
    pub sort: Option<String>,
}

impl FilterQuery {
    /// Parse the controls into a [`FilterState`].
    ///
    /// # Errors
    ///
    /// Returns `ParseFilterError` for an unknown category, price range or
    /// sort key.
    pub fn into_filter(self) -> std::result::Result<FilterState, ParseFilterError> {
        Ok(FilterState {
            search_term: self.search.unwrap_or_default(),
            category: parse_optional::<Category>(self.category.as_deref())?,
            price_range: parse_optional::<PriceRange>(self.price.as_deref())?,
            sort_key: self.sort.as_deref().unwrap_or_default().parse::<SortKey>()?,
        })
    }
}

fn parse_optional<T>(value: Option<&str>) -> std::result::Result<Option<T>, ParseFilterError>
where
    T: std::str::FromStr<Err = ParseFilterError>,
{
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some),
    }
}

/// Apply the filter in the query string and return page 1.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<FilterQuery>,
) -> Result<Json<ListingView>> {
    let filter = query.into_filter()?;
    let page = CatalogService::new(&state).apply_filter(filter).await;
    Ok(Json(page.into()))
}

/// Reveal the next page of the current listing.
#[instrument(skip(state))]
pub async fn load_more(State(state): State<AppState>) -> Result<Json<ListingView>> {
    let page = CatalogService::new(&state).load_more().await?;
    Ok(Json(page.into()))
}

/// Product detail.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<ProductView>> {
    let product = CatalogService::new(&state)
        .product(id)
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;
    Ok(Json(ProductView::from(product)))
}
