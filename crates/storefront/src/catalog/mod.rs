//! Product catalog: filtering, sorting and pagination.
//!
//! [`ProductCatalog`] owns the immutable product list and answers pure
//! queries. [`ProductListing`] is the shopper's browsing state on top of it
//! (current filter and how many pages are showing).

mod seed;

use std::cmp::Ordering;

use serde::Serialize;
use techstore_core::{FilterState, Product, ProductId, SortKey};

pub use seed::default_products;

/// Products shown per page unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 12;

/// The fixed set of products on sale.
#[derive(Debug, Clone)]
pub struct ProductCatalog {
    products: Vec<Product>,
}

impl Default for ProductCatalog {
    fn default() -> Self {
        Self::new(default_products())
    }
}

impl ProductCatalog {
    /// Build a catalog from `products`, in catalog order.
    #[must_use]
    pub const fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// The storefront's default product list.
    #[must_use]
    pub fn with_default_products() -> Self {
        Self::default()
    }

    /// Every product in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Products matching every active predicate of `state`, in its sort
    /// order. Ties keep catalog order.
    #[must_use]
    pub fn filter(&self, state: &FilterState) -> Vec<&Product> {
        let mut matches: Vec<&Product> =
            self.products.iter().filter(|p| state.matches(p)).collect();
        matches.sort_by(|a, b| compare(state.sort_key, a, b));
        matches
    }
}

fn compare(key: SortKey, a: &Product, b: &Product) -> Ordering {
    match key {
        SortKey::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        SortKey::PriceAsc => a.price.amount.cmp(&b.price.amount),
        SortKey::PriceDesc => b.price.amount.cmp(&a.price.amount),
        SortKey::Rating => b.rating.cmp(&a.rating),
    }
}

/// The first `page_size * page_number` items of `filtered`.
///
/// Page numbers start at 1. Page 0, a zero page size, or an empty input all
/// give an empty slice; a page past the end gives everything.
#[must_use]
pub fn page<T>(filtered: &[T], page_size: usize, page_number: usize) -> &[T] {
    let end = page_size.saturating_mul(page_number).min(filtered.len());
    filtered.get(..end).unwrap_or_default()
}

/// What the product grid currently shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingPage {
    pub products: Vec<Product>,
    pub total_matches: usize,
    pub page: usize,
    pub page_size: usize,
    pub has_more: bool,
}

/// The shopper's browsing state: active filter and pages loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductListing {
    filter: FilterState,
    page: usize,
    page_size: usize,
}

impl Default for ProductListing {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl ProductListing {
    /// Unfiltered listing on page 1. A zero page size is treated as 1.
    #[must_use]
    pub fn new(page_size: usize) -> Self {
        Self {
            filter: FilterState::default(),
            page: 1,
            page_size: page_size.max(1),
        }
    }

    #[must_use]
    pub const fn filter_state(&self) -> &FilterState {
        &self.filter
    }

    #[must_use]
    pub const fn page(&self) -> usize {
        self.page
    }

    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    /// Replace the filter and go back to page 1.
    pub fn apply(&mut self, filter: FilterState) {
        self.filter = filter;
        self.page = 1;
    }

    /// Show one more page. Returns `false` (and stays put) when everything
    /// matching is already visible.
    pub fn load_more(&mut self, catalog: &ProductCatalog) -> bool {
        if !self.view(catalog).has_more {
            return false;
        }
        self.page += 1;
        true
    }

    /// Render the current page from `catalog`.
    #[must_use]
    pub fn view(&self, catalog: &ProductCatalog) -> ListingPage {
        let filtered = catalog.filter(&self.filter);
        let visible = page(&filtered, self.page_size, self.page);
        ListingPage {
            products: visible.iter().map(|&p| p.clone()).collect(),
            total_matches: filtered.len(),
            page: self.page,
            page_size: self.page_size,
            has_more: visible.len() < filtered.len(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use techstore_core::{Category, PriceRange};

    use super::*;

    fn names(products: &[&Product]) -> Vec<String> {
        products.iter().map(|p| p.name.clone()).collect()
    }

    #[test]
    fn test_unfiltered_returns_everything_by_name() {
        let catalog = ProductCatalog::with_default_products();
        let all = catalog.filter(&FilterState::default());
        assert_eq!(all.len(), 12);
        assert_eq!(all[0].name, "AirPods Pro");
        assert_eq!(all[11].name, "Surface Laptop 5");
    }

    #[test]
    fn test_laptops_over_1000() {
        let catalog = ProductCatalog::with_default_products();
        let state = FilterState::default()
            .with_category(Category::Laptops)
            .with_price_range(PriceRange::Over1000);
        assert_eq!(
            names(&catalog.filter(&state)),
            ["Dell XPS 13", "MacBook Pro 14\"", "Surface Laptop 5"]
        );
    }

    #[test]
    fn test_search_matches_description() {
        let catalog = ProductCatalog::with_default_products();
        let state = FilterState::default().with_search("noise");
        assert_eq!(
            names(&catalog.filter(&state)),
            ["AirPods Pro", "Bose QuietComfort 45", "Sony WH-1000XM5"]
        );
    }

    #[test]
    fn test_no_results() {
        let catalog = ProductCatalog::with_default_products();
        assert!(catalog.filter(&FilterState::default().with_search("toaster")).is_empty());
    }

    #[test]
    fn test_price_sorts_are_reversed() {
        let catalog = ProductCatalog::with_default_products();
        let state = FilterState::default().with_category(Category::Laptops);
        let mut asc = names(&catalog.filter(&state.clone().sorted_by(SortKey::PriceAsc)));
        let desc = names(&catalog.filter(&state.sorted_by(SortKey::PriceDesc)));
        asc.reverse();
        assert_eq!(asc, desc);
    }

    #[test]
    fn test_rating_sort_is_descending_and_stable() {
        let catalog = ProductCatalog::with_default_products();
        let sorted = catalog.filter(&FilterState::default().sorted_by(SortKey::Rating));
        assert_eq!(sorted[0].name, "MacBook Pro 14\"");
        // iPhone and Sony tie at 4.8; catalog order decides.
        assert_eq!(sorted[1].name, "iPhone 14 Pro");
        assert_eq!(sorted[2].name, "Sony WH-1000XM5");
        assert!(sorted.windows(2).all(|w| w[0].rating >= w[1].rating));
    }

    #[test]
    fn test_every_combination_is_a_matching_subset() {
        let catalog = ProductCatalog::with_default_products();
        let categories = std::iter::once(None).chain(Category::ALL.map(Some));
        for category in categories {
            let ranges = std::iter::once(None).chain(PriceRange::ALL.map(Some));
            for price_range in ranges {
                let state = FilterState {
                    search_term: "pro".to_string(),
                    category,
                    price_range,
                    sort_key: SortKey::Name,
                };
                for product in catalog.filter(&state) {
                    assert!(catalog.product(product.id).is_some());
                    assert!(state.matches(product));
                }
            }
        }
    }

    #[test]
    fn test_page() {
        let items: Vec<u32> = (1..=30).collect();
        assert_eq!(page(&items, 12, 1).len(), 12);
        assert_eq!(page(&items, 12, 2).len(), 24);
        assert_eq!(page(&items, 12, 3).len(), 30);
        assert_eq!(page(&items, 12, 9).len(), 30);
        assert!(page(&items, 12, 0).is_empty());
        assert!(page::<u32>(&[], 12, 1).is_empty());
    }

    #[test]
    fn test_listing_load_more_and_reset() {
        let catalog = ProductCatalog::with_default_products();
        let mut listing = ProductListing::new(5);

        let first = listing.view(&catalog);
        assert_eq!(first.products.len(), 5);
        assert!(first.has_more);

        assert!(listing.load_more(&catalog));
        assert!(listing.load_more(&catalog));
        let last = listing.view(&catalog);
        assert_eq!(last.products.len(), 12);
        assert!(!last.has_more);
        assert!(!listing.load_more(&catalog));
        assert_eq!(listing.page(), 3);

        listing.apply(FilterState::default().with_category(Category::Headphones));
        assert_eq!(listing.page(), 1);
        assert_eq!(listing.view(&catalog).total_matches, 3);
    }
}
