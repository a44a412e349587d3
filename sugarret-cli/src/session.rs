//! Order page session state.
//!
//! Holds the cart and order options for one customer interaction. Nothing
//! here outlives the session.

use std::str::FromStr;

use serde::Serialize;
use sugarret_core::{Cart, CartError, Catalog, OrderConfirmation, OrderType};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("no product with id '{0}'")]
    UnknownProduct(String),

    #[error("'{0}' is not an order action; use add:ID, remove:ID or change:ID:DELTA")]
    InvalidAction(String),

    #[error("a delivery address is required for delivery orders")]
    MissingAddress,

    #[error(transparent)]
    Cart(#[from] CartError),
}

/// A single cart mutation, written `add:ID`, `remove:ID` or `change:ID:DELTA`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderAction {
    Add(String),
    Remove(String),
    Change(String, i64),
}

impl FromStr for OrderAction {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SessionError::InvalidAction(s.to_string());
        let mut parts = s.trim().splitn(3, ':');
        let verb = parts.next().unwrap_or_default();
        let id = parts.next().filter(|id| !id.is_empty()).ok_or_else(invalid)?;
        let rest = parts.next();

        match (verb, rest) {
            ("add", None) => Ok(Self::Add(id.to_string())),
            ("remove", None) => Ok(Self::Remove(id.to_string())),
            ("change", Some(delta)) => {
                let delta = delta.parse().map_err(|_| invalid())?;
                Ok(Self::Change(id.to_string(), delta))
            }
            _ => Err(invalid()),
        }
    }
}

/// What the order page shows after a successful checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderReceipt {
    pub order_type: OrderType,
    pub address: Option<String>,
    pub confirmation: OrderConfirmation,
}

#[derive(Debug, Clone, Default)]
pub struct OrderSession {
    pub cart: Cart,
    pub order_type: OrderType,
    pub address: Option<String>,
}

impl OrderSession {
    pub fn new(order_type: OrderType) -> Self {
        Self {
            order_type,
            ..Default::default()
        }
    }

    pub fn apply(
        &mut self,
        catalog: &Catalog,
        action: &OrderAction,
    ) -> Result<(), SessionError> {
        match action {
            OrderAction::Add(id) => {
                let entry = catalog
                    .find(id)
                    .ok_or_else(|| SessionError::UnknownProduct(id.clone()))?;
                self.cart.add_item(entry);
            }
            OrderAction::Remove(id) => {
                self.cart.remove_item(id);
            }
            OrderAction::Change(id, delta) => self.cart.change_quantity(id, *delta),
        }
        Ok(())
    }

    /// Places the order. Delivery orders need a non-blank address.
    ///
    /// On failure the cart is left as it was.
    pub fn checkout(&mut self) -> Result<OrderReceipt, SessionError> {
        let address = self
            .address
            .as_deref()
            .map(str::trim)
            .filter(|address| !address.is_empty())
            .map(str::to_string);
        if self.order_type == OrderType::Delivery && address.is_none() && !self.cart.is_empty() {
            return Err(SessionError::MissingAddress);
        }

        let confirmation = self.cart.checkout()?;
        Ok(OrderReceipt {
            order_type: self.order_type,
            address: address.filter(|_| self.order_type == OrderType::Delivery),
            confirmation,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn actions(specs: &[&str]) -> Vec<OrderAction> {
        specs.iter().map(|spec| spec.parse().unwrap()).collect()
    }

    fn session_with(specs: &[&str]) -> OrderSession {
        let catalog = Catalog::default();
        let mut session = OrderSession::default();
        for action in actions(specs) {
            session.apply(&catalog, &action).unwrap();
        }
        session
    }

    // =========================================================================
    // OrderAction parsing tests
    // =========================================================================

    #[test]
    fn parses_each_action_form() {
        assert_eq!(
            actions(&["add:1", "remove:2", "change:3:-2"]),
            vec![
                OrderAction::Add("1".to_string()),
                OrderAction::Remove("2".to_string()),
                OrderAction::Change("3".to_string(), -2),
            ]
        );
    }

    #[test]
    fn rejects_unknown_verb() {
        assert_eq!(
            "buy:1".parse::<OrderAction>(),
            Err(SessionError::InvalidAction("buy:1".to_string()))
        );
    }

    #[test]
    fn rejects_change_without_delta() {
        assert!("change:1".parse::<OrderAction>().is_err());
        assert!("change:1:lots".parse::<OrderAction>().is_err());
    }

    #[test]
    fn rejects_missing_id() {
        assert!("add:".parse::<OrderAction>().is_err());
        assert!("add".parse::<OrderAction>().is_err());
    }

    // =========================================================================
    // apply tests
    // =========================================================================

    #[test]
    fn actions_apply_in_order() {
        let session = session_with(&["add:1", "add:2", "add:1", "change:2:-1"]);

        assert_eq!(session.cart.item_count(), 2);
        assert_eq!(session.cart.total(), dec!(30));
    }

    #[test]
    fn adding_unknown_product_fails() {
        let mut session = OrderSession::default();

        let result = session.apply(&Catalog::default(), &OrderAction::Add("99".to_string()));

        assert_eq!(result, Err(SessionError::UnknownProduct("99".to_string())));
        assert!(session.cart.is_empty());
    }

    // =========================================================================
    // checkout tests
    // =========================================================================

    #[test]
    fn pickup_checkout_ignores_address() {
        let mut session = session_with(&["add:3"]);
        session.address = Some("Osu".to_string());

        let receipt = session.checkout().unwrap();

        assert_eq!(receipt.order_type, OrderType::Pickup);
        assert_eq!(receipt.address, None);
        assert_eq!(receipt.confirmation.total, dec!(18));
    }

    #[test]
    fn delivery_checkout_requires_address() {
        let mut session = session_with(&["add:3"]);
        session.order_type = OrderType::Delivery;
        session.address = Some("   ".to_string());

        assert_eq!(session.checkout(), Err(SessionError::MissingAddress));
        assert_eq!(session.cart.item_count(), 1);
    }

    #[test]
    fn delivery_checkout_keeps_trimmed_address() {
        let mut session = session_with(&["add:5"]);
        session.order_type = OrderType::Delivery;
        session.address = Some("  12 Labone Crescent ".to_string());

        let receipt = session.checkout().unwrap();

        assert_eq!(receipt.address.as_deref(), Some("12 Labone Crescent"));
        assert!(session.cart.is_empty());
    }

    #[test]
    fn empty_cart_checkout_reports_cart_error() {
        let mut session = OrderSession::new(OrderType::Delivery);

        assert_eq!(session.checkout(), Err(SessionError::Cart(CartError::Empty)));
    }
}
