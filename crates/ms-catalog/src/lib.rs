//! Product catalog for the Malenadu Savi storefront.
//!
//! The catalog is fixed at start-up: either the built-in product set or one
//! supplied by configuration and validated through [`Catalog::new`].

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_CURRENCY_SYMBOL: &str = "₹";
pub const DEFAULT_UNIT: &str = "jar";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct ProductId(pub String);

impl ProductId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ProductId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Whole-number unit price; catalogs never carry fractional amounts.
    pub price: u32,
    pub image: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_unit")]
    pub unit: String,
}

fn default_unit() -> String {
    DEFAULT_UNIT.to_owned()
}

impl Product {
    /// `"10 jars"`, `"1 jar"`.
    pub fn quantity_label(&self, quantity: u32) -> String {
        let plural = if quantity > 1 { "s" } else { "" };
        format!("{quantity} {}{plural}", self.unit)
    }

    pub fn total(&self, quantity: u32) -> u64 {
        u64::from(self.price) * u64::from(quantity)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Currency {
    symbol: String,
}

impl Currency {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
        }
    }

    pub fn format(&self, amount: u64) -> String {
        format!("{}{amount}", self.symbol)
    }
}

impl Default for Currency {
    fn default() -> Self {
        Self::new(DEFAULT_CURRENCY_SYMBOL)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("product id cannot be empty")]
    EmptyId,
    #[error("product {0} must have a positive price")]
    ZeroPrice(ProductId),
    #[error("product {0} is listed more than once")]
    DuplicateId(ProductId),
    #[error("catalog must contain at least one product")]
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<Product>,
    currency: Currency,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        if products.is_empty() {
            return Err(CatalogError::Empty);
        }

        for (index, product) in products.iter().enumerate() {
            if product.id.as_str().trim().is_empty() {
                return Err(CatalogError::EmptyId);
            }
            if product.price == 0 {
                return Err(CatalogError::ZeroPrice(product.id.clone()));
            }
            if products[..index].iter().any(|p| p.id == product.id) {
                return Err(CatalogError::DuplicateId(product.id.clone()));
            }
        }

        debug!(count = products.len(), "catalog loaded");
        Ok(Self {
            products,
            currency: Currency::default(),
        })
    }

    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id.as_str() == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn currency(&self) -> &Currency {
        &self.currency
    }

    /// `"₹500 per jar"`.
    pub fn price_label(&self, product: &Product) -> String {
        format!(
            "{} per {}",
            self.currency.format(u64::from(product.price)),
            product.unit
        )
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            products: builtin_products(),
            currency: Currency::default(),
        }
    }
}

fn builtin_products() -> Vec<Product> {
    vec![
        Product {
            id: ProductId::from("honey"),
            name: "Honey".to_owned(),
            price: 500,
            image: "https://images.unsplash.com/photo-1587049352846-4a222e784d38?ixlib=rb-4.0.3&auto=format&fit=crop&w=500&q=80".to_owned(),
            description: "Single-origin honey harvested from pristine Malenadu forests. Pure, unfiltered, and naturally crystallized.".to_owned(),
            unit: default_unit(),
        },
        Product {
            id: ProductId::from("pickle"),
            name: "Amtekayi (hog plum) Pickle".to_owned(),
            price: 300,
            image: "https://images.unsplash.com/photo-1578662996442-48f60103fc96?ixlib=rb-4.0.3&auto=format&fit=crop&w=500&q=80".to_owned(),
            description: "Homemade Amtekayi (hog plum) Pickle with traditional spices. Small-batch artisanal preparation.".to_owned(),
            unit: default_unit(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, price: u32) -> Product {
        Product {
            id: ProductId::from(id),
            name: id.to_uppercase(),
            price,
            image: format!("https://img.example/{id}.jpg"),
            description: String::new(),
            unit: default_unit(),
        }
    }

    #[test]
    fn builtin_catalog_has_honey_and_pickle() {
        let catalog = Catalog::default();
        let honey = catalog.get("honey").expect("honey should exist");
        assert_eq!(honey.name, "Honey");
        assert_eq!(honey.price, 500);
        assert_eq!(catalog.get("pickle").map(|p| p.price), Some(300));
        assert!(!catalog.contains("unknown-id"));
    }

    #[test]
    fn rejects_zero_price_and_duplicates() {
        assert_eq!(
            Catalog::new(vec![product("ghee", 0)]),
            Err(CatalogError::ZeroPrice(ProductId::from("ghee")))
        );
        assert_eq!(
            Catalog::new(vec![product("ghee", 10), product("ghee", 20)]),
            Err(CatalogError::DuplicateId(ProductId::from("ghee")))
        );
        assert_eq!(Catalog::new(vec![product("  ", 10)]), Err(CatalogError::EmptyId));
        assert_eq!(Catalog::new(Vec::new()), Err(CatalogError::Empty));
    }

    #[test]
    fn labels_pluralise_and_prefix_currency() {
        let catalog = Catalog::default();
        let honey = catalog.get("honey").expect("honey should exist");
        assert_eq!(honey.quantity_label(1), "1 jar");
        assert_eq!(honey.quantity_label(10), "10 jars");
        assert_eq!(catalog.price_label(honey), "₹500 per jar");
        assert_eq!(honey.total(4), 2000);

        let dollars = catalog.clone().with_currency(Currency::new("$"));
        assert_eq!(dollars.currency().format(300), "$300");
    }

    #[test]
    fn products_deserialize_with_defaults() -> anyhow::Result<()> {
        let raw = r#"[{"id":"ghee","name":"Ghee","price":750,"image":"ghee.jpg"}]"#;
        let products: Vec<Product> = serde_json::from_str(raw)?;
        let catalog = Catalog::new(products)?;
        let ghee = catalog.get("ghee").expect("ghee should exist");
        assert_eq!(ghee.unit, "jar");
        assert!(ghee.description.is_empty());
        Ok(())
    }
}
