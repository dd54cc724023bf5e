//! Catalog commands.

use tracing::info;

use techstore_core::{FilterState, Product, ProductId};
use techstore_storefront::filters::format_stars;
use techstore_storefront::services::CatalogService;
use techstore_storefront::state::AppState;

fn log_product(product: &Product) {
    let badge = product
        .badge
        .as_deref()
        .map(|b| format!(" [{b}]"))
        .unwrap_or_default();
    info!(
        "#{:<3} {:<24} {:>10}  {} {}  {}{badge}",
        product.id,
        product.name,
        product.price.display(),
        format_stars(product.rating),
        product.rating,
        product.category.label(),
    );
}

/// List products matching `filter`, showing `pages` pages.
///
/// # Errors
///
/// Returns an error if loading further pages is rejected.
pub async fn list(
    state: &AppState,
    filter: FilterState,
    pages: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = CatalogService::new(state);
    let mut page = catalog.apply_filter(filter).await;
    for _ in 1..pages {
        if !page.has_more {
            break;
        }
        page = catalog.load_more().await?;
    }

    if page.products.is_empty() {
        info!("No products found. Try adjusting your search or filter criteria.");
        return Ok(());
    }

    for product in &page.products {
        log_product(product);
    }
    info!(
        "Showing {} of {} products{}",
        page.products.len(),
        page.total_matches,
        if page.has_more { " (use --page for more)" } else { "" }
    );
    Ok(())
}

/// Show one product in full.
///
/// # Errors
///
/// Returns an error if the id is not in the catalog.
pub fn show(state: &AppState, id: ProductId) -> Result<(), Box<dyn std::error::Error>> {
    let product = CatalogService::new(state)
        .product(id)
        .ok_or_else(|| format!("Product {id} not found"))?;
    log_product(product);
    info!("{}", product.description);
    info!("{}", product.image);
    Ok(())
}
