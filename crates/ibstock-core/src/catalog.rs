//! # Catalog
//!
//! Read-only products, categories and customers, plus the product filter
//! behind the category bar and search box.
//!
//! ## Filter Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  catalog order ──► category == active? ──► name contains term? ──► grid │
//! │                    (skipped for "all")     (skipped when blank)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::types::{Category, Customer, Product, ALL_CATEGORIES};
use crate::validation::{
    validate_category_id, validate_credit, validate_entity_id, validate_name, validate_stock,
    validate_unit_price, ValidationResult,
};

// =============================================================================
// Catalog
// =============================================================================

/// The store's catalog, validated once and immutable afterwards.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    categories: Vec<Category>,
    products: Vec<Product>,
    customers: Vec<Customer>,
}

impl Catalog {
    /// Validates and builds a catalog.
    ///
    /// ## Checks
    /// - ids are well formed and unique per entity kind
    /// - names are not blank
    /// - prices are positive, stock and credit are not negative
    /// - every product points at a known category
    pub fn new(
        categories: Vec<Category>,
        products: Vec<Product>,
        customers: Vec<Customer>,
    ) -> ValidationResult<Self> {
        let mut category_ids = HashSet::new();
        for category in &categories {
            validate_category_id(&category.id)?;
            validate_name("category name", &category.name)?;
            if !category_ids.insert(category.id.as_str()) {
                return Err(duplicate("category id", &category.id));
            }
        }

        let mut product_ids = HashSet::new();
        for product in &products {
            validate_entity_id("product id", &product.id)?;
            validate_name("product name", &product.name)?;
            validate_unit_price(product.unit_price)?;
            validate_stock(product.stock)?;
            if !category_ids.contains(product.category_id.as_str()) {
                return Err(ValidationError::NotAllowed {
                    field: format!("category of product '{}'", product.id),
                    allowed: categories.iter().map(|c| c.id.clone()).collect(),
                });
            }
            if !product_ids.insert(product.id.as_str()) {
                return Err(duplicate("product id", &product.id));
            }
        }

        let mut customer_ids = HashSet::new();
        for customer in &customers {
            validate_entity_id("customer id", &customer.id)?;
            validate_name("customer name", &customer.name)?;
            validate_credit(customer.outstanding_credit)?;
            if !customer_ids.insert(customer.id.as_str()) {
                return Err(duplicate("customer id", &customer.id));
            }
        }

        Ok(Catalog {
            categories,
            products,
            customers,
        })
    }

    /// Categories in display order (without the "all" tab).
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn customer(&self, id: &str) -> Option<&Customer> {
        self.customers.iter().find(|c| c.id == id)
    }

    pub fn has_category(&self, id: &str) -> bool {
        id == ALL_CATEGORIES || self.categories.iter().any(|c| c.id == id)
    }
}

fn duplicate(field: &str, value: &str) -> ValidationError {
    ValidationError::Duplicate {
        field: field.to_string(),
        value: value.to_string(),
    }
}

// =============================================================================
// Catalog Filter
// =============================================================================

/// Products matching a category and a search term, in catalog order.
///
/// ## Rules
/// - `category == "all"` keeps every category
/// - the search term is trimmed; blank keeps every name
/// - names match by case-insensitive substring
///
/// ## Example
/// ```rust
/// use ibstock_core::catalog::visible_products;
/// use ibstock_core::money::Money;
/// use ibstock_core::types::Product;
///
/// let cola = Product {
///     id: "p5".into(),
///     name: "Refrigerante Cola 2L".into(),
///     unit_price: Money::from_major(130),
///     stock: 24,
///     category_id: "beverages".into(),
///     image_ref: None,
/// };
/// let products = vec![cola];
/// assert_eq!(visible_products(&products, "beverages", " COLA ").len(), 1);
/// assert!(visible_products(&products, "bakery", "").is_empty());
/// ```
pub fn visible_products<'a>(
    products: &'a [Product],
    category: &str,
    search_term: &str,
) -> Vec<&'a Product> {
    let needle = search_term.trim().to_lowercase();

    products
        .iter()
        .filter(|p| category == ALL_CATEGORIES || p.category_id == category)
        .filter(|p| needle.is_empty() || p.name.to_lowercase().contains(&needle))
        .collect()
}

/// Active category and search term of the product grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CatalogFilter {
    pub category: String,
    pub search_term: String,
}

impl Default for CatalogFilter {
    fn default() -> Self {
        CatalogFilter {
            category: ALL_CATEGORIES.to_string(),
            search_term: String::new(),
        }
    }
}

impl CatalogFilter {
    pub fn set_category(&mut self, category: impl Into<String>) {
        self.category = category.into();
    }

    /// Stores the term as typed; trimming happens when filtering.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        visible_products(products, &self.category, &self.search_term)
    }
}
