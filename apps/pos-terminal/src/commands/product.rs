//! # Product Commands
//!
//! Category bar, search box and the product grid.
//!
//! ## Filter Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Click "Bebidas" ──► set_category("beverages") ──┐                      │
//! │                                                   ├──► filtered grid     │
//! │  Type "cola" ──────► set_search("cola") ─────────┘     (catalog order)  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The active category and term live in the session, so `list_products`
//! always returns the grid as the cashier last left it.

use ibstock_core::{Intent, Money, Product, Route, ALL_CATEGORIES};
use serde::Serialize;
use tracing::debug;

use crate::error::ApiError;
use crate::fixtures::ALL_CATEGORIES_LABEL;
use crate::state::{AuthState, CatalogState, ConfigState, SessionState};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDto {
    pub id: String,
    pub name: String,
}

/// Product card data.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub id: String,
    pub name: String,
    pub unit_price: Money,
    pub price_display: String,
    pub stock: i64,
    /// Out-of-stock cards are greyed out and not clickable.
    pub in_stock: bool,
    pub category_id: String,
    pub image_ref: Option<String>,
}

impl ProductDto {
    fn new(p: &Product, config: &ConfigState) -> Self {
        ProductDto {
            id: p.id.clone(),
            name: p.name.clone(),
            unit_price: p.unit_price,
            price_display: config.format_currency(p.unit_price),
            stock: p.stock,
            in_stock: p.in_stock(),
            category_id: p.category_id.clone(),
            image_ref: p.image_ref.clone(),
        }
    }
}

/// The grid together with the filter that produced it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListResponse {
    pub category: String,
    pub search_term: String,
    pub products: Vec<ProductDto>,
}

fn product_list(
    catalog: &CatalogState,
    session: &SessionState,
    config: &ConfigState,
) -> ProductListResponse {
    session.with_session(|s| ProductListResponse {
        category: s.filter().category.clone(),
        search_term: s.filter().search_term.clone(),
        products: s
            .visible_products(catalog.catalog())
            .into_iter()
            .map(|p| ProductDto::new(p, config))
            .collect(),
    })
}

/// Lists the category tabs, "Todos" first.
pub fn list_categories(
    auth: &AuthState,
    catalog: &CatalogState,
) -> Result<Vec<CategoryDto>, ApiError> {
    debug!("list_categories command");
    auth.require(Route::Pos)?;

    let all = CategoryDto {
        id: ALL_CATEGORIES.to_string(),
        name: ALL_CATEGORIES_LABEL.to_string(),
    };
    let rest = catalog.catalog().categories().iter().map(|c| CategoryDto {
        id: c.id.clone(),
        name: c.name.clone(),
    });

    Ok(std::iter::once(all).chain(rest).collect())
}

/// Returns the product grid under the current filter.
pub fn list_products(
    auth: &AuthState,
    catalog: &CatalogState,
    session: &SessionState,
    config: &ConfigState,
) -> Result<ProductListResponse, ApiError> {
    debug!("list_products command");
    auth.require(Route::Pos)?;

    Ok(product_list(catalog, session, config))
}

/// Switches the category tab.
///
/// ## Arguments
/// * `category` - Category id, or `"all"`
pub fn set_category(
    auth: &AuthState,
    catalog: &CatalogState,
    session: &SessionState,
    config: &ConfigState,
    category: String,
) -> Result<ProductListResponse, ApiError> {
    debug!(category = %category, "set_category command");
    auth.require(Route::Pos)?;

    if !catalog.catalog().has_category(&category) {
        return Err(ApiError::not_found("Category", &category));
    }

    session.apply(Intent::SetCategory(category), |_, _| ());
    Ok(product_list(catalog, session, config))
}

/// Updates the search term (sent on every keystroke).
pub fn set_search(
    auth: &AuthState,
    catalog: &CatalogState,
    session: &SessionState,
    config: &ConfigState,
    term: String,
) -> Result<ProductListResponse, ApiError> {
    debug!(term = %term, "set_search command");
    auth.require(Route::Pos)?;

    session.apply(Intent::SetSearchTerm(term), |_, _| ());
    Ok(product_list(catalog, session, config))
}
