//! # Seed Data
//!
//! The store's catalog, customer directory and demo accounts.
//!
//! There is no database: everything the terminal sells comes from these
//! tables and lives for the lifetime of the process.
//!
//! ## Seeded Data
//! - 7 categories (plus the implicit "Todos" tab)
//! - 12 products, prices in whole meticais
//! - 3 customers, one with outstanding credit
//! - 3 demo accounts, one per role, password `password123`

use ibstock_core::validation::ValidationResult;
use ibstock_core::{Catalog, Category, Customer, Money, Product, Role};

/// Label of the "no category filter" tab.
pub const ALL_CATEGORIES_LABEL: &str = "Todos";

/// Password shared by every demo account.
pub const DEMO_PASSWORD: &str = "password123";

/// (id, name)
const CATEGORIES: &[(&str, &str)] = &[
    ("groceries", "Mercearia"),
    ("beverages", "Bebidas"),
    ("bakery", "Padaria"),
    ("dairy", "Laticínios"),
    ("meat", "Carnes"),
    ("hygiene", "Higiene"),
    ("cleaning", "Limpeza"),
];

/// (id, name, price in MT, category, stock, image label)
const PRODUCTS: &[(&str, &str, i64, &str, i64, &str)] = &[
    ("p1", "Arroz Pérola 1kg", 100, "groceries", 25, "Arroz"),
    ("p2", "Óleo de Soja 900ml", 180, "groceries", 30, "Óleo"),
    ("p3", "Feijão 1kg", 120, "groceries", 15, "Feijão"),
    ("p4", "Açúcar 1kg", 90, "groceries", 18, "Açúcar"),
    ("p5", "Refrigerante Cola 2L", 130, "beverages", 24, "Cola"),
    ("p6", "Água Mineral 5L", 85, "beverages", 40, "Água"),
    ("p7", "Leite 1L", 95, "dairy", 12, "Leite"),
    ("p8", "Pão de Forma", 85, "bakery", 8, "Pão"),
    ("p9", "Sabonete em Barra", 40, "hygiene", 45, "Sabonete"),
    ("p10", "Detergente 500ml", 65, "cleaning", 32, "Detergente"),
    ("p11", "Papel Higiênico 4un", 75, "hygiene", 28, "Papel"),
    ("p12", "Frango Congelado 1kg", 250, "meat", 10, "Frango"),
];

/// (id, name, phone, credit in MT)
const CUSTOMERS: &[(&str, &str, &str, i64)] = &[
    ("c1", "Ana Silva", "84 123 4567", 0),
    ("c2", "João Machava", "85 765 4321", 250),
    ("c3", "Maria Tembe", "84 555 1234", 0),
];

/// A back-office account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAccount {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    password: String,
}

impl UserAccount {
    pub fn password_matches(&self, password: &str) -> bool {
        self.password == password
    }
}

fn image_url(label: &str) -> String {
    format!(
        "https://ui-avatars.com/api/?name={label}&background=F3F4F6&color=4B5563&size=100&font-size=0.33"
    )
}

/// Builds and validates the store catalog.
pub fn seed_catalog() -> ValidationResult<Catalog> {
    let categories = CATEGORIES
        .iter()
        .map(|(id, name)| Category::new(*id, *name))
        .collect();

    let products = PRODUCTS
        .iter()
        .map(|(id, name, price, category, stock, label)| Product {
            id: id.to_string(),
            name: name.to_string(),
            unit_price: Money::from_major(*price),
            stock: *stock,
            category_id: category.to_string(),
            image_ref: Some(image_url(label)),
        })
        .collect();

    let customers = CUSTOMERS
        .iter()
        .map(|(id, name, phone, credit)| Customer {
            id: id.to_string(),
            name: name.to_string(),
            phone: phone.to_string(),
            outstanding_credit: Money::from_major(*credit),
        })
        .collect();

    Catalog::new(categories, products, customers)
}

/// The three demo accounts.
pub fn demo_users() -> Vec<UserAccount> {
    [
        ("1", "Admin User", "admin@ibstock.com", Role::Admin),
        ("2", "Supervisor User", "supervisor@ibstock.com", Role::Supervisor),
        ("3", "Seller User", "seller@ibstock.com", Role::Seller),
    ]
    .into_iter()
    .map(|(id, name, email, role)| UserAccount {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        role,
        password: DEMO_PASSWORD.to_string(),
    })
    .collect()
}

/// Finds the account matching the credentials.
///
/// Email matching ignores case and surrounding whitespace; the password
/// must match exactly.
pub fn authenticate<'a>(
    directory: &'a [UserAccount],
    email: &str,
    password: &str,
) -> Option<&'a UserAccount> {
    let email = email.trim();
    directory
        .iter()
        .find(|u| u.email.eq_ignore_ascii_case(email) && u.password_matches(password))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authenticate() {
        let users = demo_users();
        let user = authenticate(&users, " Supervisor@IBStock.com ", DEMO_PASSWORD).unwrap();
        assert_eq!(user.role, Role::Supervisor);

        assert!(authenticate(&users, "supervisor@ibstock.com", "Password123").is_none());
        assert!(authenticate(&users, "nobody@ibstock.com", DEMO_PASSWORD).is_none());
    }

    #[test]
    fn test_seed_catalog_is_valid() {
        let catalog = seed_catalog().unwrap();
        assert_eq!(catalog.categories().len(), 7);
        assert_eq!(catalog.products().len(), 12);
        assert_eq!(catalog.customers().len(), 3);

        let rice = catalog.product("p1").unwrap();
        assert_eq!(rice.unit_price, Money::from_major(100));
        assert_eq!(rice.stock, 25);
    }

    #[test]
    fn test_only_joao_has_credit() {
        let catalog = seed_catalog().unwrap();
        let with_credit: Vec<&str> = catalog
            .customers()
            .iter()
            .filter(|c| c.has_outstanding_credit())
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(with_credit, vec!["c2"]);
    }

    #[test]
    fn test_demo_users_cover_every_role() {
        let users = demo_users();
        for role in Role::ALL {
            assert!(users.iter().any(|u| u.role == role));
        }
        assert!(users.iter().all(|u| u.password_matches(DEMO_PASSWORD)));
    }
}
