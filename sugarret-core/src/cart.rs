//! Session-scoped shopping cart for the order page.
//!
//! The cart is a plain owned value. Callers hosting several sessions at once
//! must give each session exclusive access to its cart (for example a
//! `Mutex<Cart>` per session).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{CartItem, CatalogEntry};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    #[error("your cart is empty")]
    Empty,
}

/// What was bought, returned by a successful [`Cart::checkout`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderConfirmation {
    pub items: Vec<CartItem>,
    pub total: Decimal,
    pub item_count: u32,
}

/// Ordered line items, at most one per product id.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use sugarret_core::{Cart, Catalog};
///
/// let catalog = Catalog::default();
/// let mut cart = Cart::new();
/// cart.add_item(catalog.find("1").unwrap());
/// cart.add_item(catalog.find("1").unwrap());
/// cart.add_item(catalog.find("2").unwrap());
///
/// assert_eq!(cart.item_count(), 3);
/// assert_eq!(cart.total(), dec!(52));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(
        &self,
        id: &str,
    ) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Adds one unit of `entry`, appending a new line if it is not in the cart.
    pub fn add_item(
        &mut self,
        entry: &CatalogEntry,
    ) {
        match self.items.iter_mut().find(|item| item.id == entry.id) {
            Some(item) => item.quantity = item.quantity.saturating_add(1),
            None => self.items.push(CartItem::from_entry(entry)),
        }
        debug!(id = %entry.id, "added item to cart");
    }

    /// Adjusts the quantity of `id` by `delta`.
    ///
    /// The line is removed once its quantity would drop to zero or below.
    /// Unknown ids are ignored.
    pub fn change_quantity(
        &mut self,
        id: &str,
        delta: i64,
    ) {
        let Some(index) = self.items.iter().position(|item| item.id == id) else {
            debug!(id, "quantity change for item not in cart ignored");
            return;
        };

        let current = i64::from(self.items[index].quantity);
        let updated = current.saturating_add(delta);
        if updated <= 0 {
            self.items.remove(index);
            debug!(id, "removed item from cart");
        } else {
            self.items[index].quantity = u32::try_from(updated).unwrap_or(u32::MAX);
            debug!(id, quantity = updated, "updated cart quantity");
        }
    }

    /// Removes the whole line for `id`, returning it if present.
    pub fn remove_item(
        &mut self,
        id: &str,
    ) -> Option<CartItem> {
        let index = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(index))
    }

    /// Sum of unit price times quantity over every line.
    pub fn total(&self) -> Decimal {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Total number of units, not distinct products.
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |count, item| count.saturating_add(item.quantity))
    }

    /// Empties the cart and returns what was in it.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Empty`] and leaves the cart untouched when there
    /// is nothing to check out.
    pub fn checkout(&mut self) -> Result<OrderConfirmation, CartError> {
        if self.items.is_empty() {
            warn!("checkout attempted with an empty cart");
            return Err(CartError::Empty);
        }

        let total = self.total();
        let item_count = self.item_count();
        let items = std::mem::take(&mut self.items);
        debug!(%total, item_count, "checked out cart");

        Ok(OrderConfirmation {
            items,
            total,
            item_count,
        })
    }
}
