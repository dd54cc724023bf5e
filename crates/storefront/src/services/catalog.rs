//! Catalog browsing service.

use tracing::{debug, instrument};

use techstore_core::{FilterState, Product, ProductId};

use crate::catalog::ListingPage;
use crate::events::StoreEvent;
use crate::operations::{OperationError, OperationKind};
use crate::state::AppState;

/// Filtering and pagination of the shopper's product listing.
pub struct CatalogService<'a> {
    state: &'a AppState,
}

impl<'a> CatalogService<'a> {
    #[must_use]
    pub const fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Look up one product.
    #[must_use]
    pub fn product(&self, id: ProductId) -> Option<&'a Product> {
        self.state.catalog().product(id)
    }

    /// The listing as currently filtered and paged.
    pub async fn listing(&self) -> ListingPage {
        let shop = self.state.shop().await;
        shop.listing.view(self.state.catalog())
    }

    /// Replace the filter. The listing goes back to page 1 and a pending
    /// load-more is abandoned.
    #[instrument(skip(self))]
    pub async fn apply_filter(&self, filter: FilterState) -> ListingPage {
        let mut shop = self.state.shop().await;
        self.state.operations().invalidate(OperationKind::LoadMore);
        shop.listing.apply(filter);
        let page = shop.listing.view(self.state.catalog());
        drop(shop);

        debug!(total_matches = page.total_matches, "Filter applied");
        self.publish(&page);
        page
    }

    /// Reveal the next page after the load-more delay.
    ///
    /// When every match is already showing the listing is returned
    /// unchanged.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::Pending` if a load-more is already running,
    /// or `OperationError::Superseded` if the filter changed while waiting.
    #[instrument(skip(self))]
    pub async fn load_more(&self) -> Result<ListingPage, OperationError> {
        let ticket = self.state.operations().begin(OperationKind::LoadMore)?;
        tokio::time::sleep(self.state.config().delays.load_more).await;

        let mut shop = self.state.shop().await;
        ticket.complete()?;
        let advanced = shop.listing.load_more(self.state.catalog());
        let page = shop.listing.view(self.state.catalog());
        drop(shop);

        if advanced {
            debug!(page = page.page, visible = page.products.len(), "Loaded more");
            self.publish(&page);
        }
        Ok(page)
    }

    fn publish(&self, page: &ListingPage) {
        self.state.events().publish(StoreEvent::ListingUpdated {
            visible: page.products.len(),
            total_matches: page.total_matches,
            has_more: page.has_more,
        });
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use techstore_core::Category;

    use super::*;
    use crate::config::StorefrontConfig;
    use crate::persistence::Persistence;

    fn state(page_size: usize) -> AppState {
        let config = StorefrontConfig {
            page_size,
            ..StorefrontConfig::default()
        };
        AppState::new(config, Persistence::in_memory())
    }

    #[tokio::test(start_paused = true)]
    async fn test_filter_resets_page() {
        let state = state(4);
        let catalog = CatalogService::new(&state);

        let page = catalog.load_more().await.unwrap();
        assert_eq!(page.page, 2);
        assert_eq!(page.products.len(), 8);

        let page = catalog
            .apply_filter(FilterState::default().with_category(Category::Smartphones))
            .await;
        assert_eq!(page.page, 1);
        assert_eq!(page.total_matches, 3);
        assert!(!page.has_more);
    }

    #[tokio::test(start_paused = true)]
    async fn test_load_more_rejects_overlap() {
        let state = state(4);
        let catalog = CatalogService::new(&state);

        let (first, second) = tokio::join!(catalog.load_more(), catalog.load_more());
        assert_eq!(first.unwrap().page, 2);
        assert_eq!(
            second.unwrap_err(),
            OperationError::Pending(OperationKind::LoadMore)
        );
        assert_eq!(catalog.listing().await.page, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_filter_change_abandons_pending_load_more() {
        let state = state(2);
        let catalog = CatalogService::new(&state);

        let (loaded, filtered) = tokio::join!(catalog.load_more(), async {
            tokio::time::sleep(std::time::Duration::from_millis(100)).await;
            catalog
                .apply_filter(FilterState::default().with_category(Category::Laptops))
                .await
        });

        assert_eq!(
            loaded.unwrap_err(),
            OperationError::Superseded(OperationKind::LoadMore)
        );
        assert_eq!(filtered.page, 1);
        let listing = catalog.listing().await;
        assert_eq!(listing.page, 1);
        assert_eq!(listing.products.len(), 2);
        assert!(!state.operations().is_pending(OperationKind::LoadMore));
    }

    #[tokio::test(start_paused = true)]
    async fn test_load_more_at_end_stays_put() {
        let state = state(12);
        let page = CatalogService::new(&state).load_more().await.unwrap();
        assert_eq!(page.page, 1);
        assert!(!page.has_more);
    }
}
