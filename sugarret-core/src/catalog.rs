//! Product catalog offered on the order page.

use std::collections::HashSet;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::CatalogEntry;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("product id '{0}' appears more than once")]
    DuplicateId(String),

    #[error("product '{id}' has a negative price {price}")]
    NegativePrice { id: String, price: Decimal },

    #[error("product id must not be blank")]
    BlankId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Builds a catalog, rejecting duplicate ids, blank ids and negative prices.
    pub fn new(entries: Vec<CatalogEntry>) -> Result<Self, CatalogError> {
        let catalog = Self { entries };
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn validate(&self) -> Result<(), CatalogError> {
        let mut seen = HashSet::new();
        for entry in &self.entries {
            if entry.id.trim().is_empty() {
                return Err(CatalogError::BlankId);
            }
            if entry.unit_price < Decimal::ZERO {
                return Err(CatalogError::NegativePrice {
                    id: entry.id.clone(),
                    price: entry.unit_price,
                });
            }
            if !seen.insert(entry.id.as_str()) {
                return Err(CatalogError::DuplicateId(entry.id.clone()));
            }
        }
        Ok(())
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn find(
        &self,
        id: &str,
    ) -> Option<&CatalogEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();
        for entry in &self.entries {
            if !categories.contains(&entry.category.as_str()) {
                categories.push(&entry.category);
            }
        }
        categories
    }

    pub fn in_category<'a>(
        &'a self,
        category: &'a str,
    ) -> impl Iterator<Item = &'a CatalogEntry> + 'a {
        self.entries.iter().filter(move |entry| entry.category == category)
    }
}

fn product(
    id: &str,
    name: &str,
    description: &str,
    price: i64,
    category: &str,
) -> CatalogEntry {
    CatalogEntry {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        unit_price: Decimal::from(price),
        category: category.to_string(),
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            entries: vec![
                product(
                    "1",
                    "Pure Sugarcane Juice",
                    "Freshly pressed from premium Ghanaian sugarcane",
                    15,
                    "Fresh Juices",
                ),
                product(
                    "2",
                    "Tropical Blend",
                    "Sugarcane with pineapple, mango, and passion fruit",
                    22,
                    "Fresh Juices",
                ),
                product(
                    "3",
                    "Mint Cooler",
                    "Sugarcane juice with fresh mint and cucumber",
                    18,
                    "Fresh Juices",
                ),
                product(
                    "4",
                    "Ginger Spice",
                    "Sugarcane juice with fresh ginger and honey",
                    20,
                    "Fresh Juices",
                ),
                product(
                    "5",
                    "Green Paradise",
                    "Sugarcane with spinach, apple, and lime",
                    25,
                    "Health Blends",
                ),
                product(
                    "6",
                    "Sunset Cocktail",
                    "Non-alcoholic blend with tropical fruits",
                    28,
                    "Cocktails",
                ),
            ],
        }
    }
}
