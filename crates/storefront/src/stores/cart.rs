//! The session cart.
//!
//! Each cart line is a snapshot of the event at the moment it was added,
//! so the cart page renders without refetching. An event appears at most
//! once; adding it again is rejected rather than bumping the quantity.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tower_sessions::Session;

use eventhub_core::{EventId, Money};

use crate::models::{Event, session_keys};

/// Cart mutation errors surfaced to the user.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    #[error("This event is already in your cart")]
    AlreadyInCart,
}

/// One event in the cart with its ticket quantity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
    pub event: Event,
    pub quantity: u32,
}

impl CartItem {
    /// Price times quantity for this line.
    #[must_use]
    pub fn line_total(&self) -> Money {
        self.event.ticket_price.times(self.quantity)
    }
}

/// The shopping cart, stored whole in the session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Add an event with an initial quantity of 1.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::AlreadyInCart`] when the event is already
    /// in the cart.
    pub fn add_event(&mut self, event: Event) -> Result<(), CartError> {
        if self.contains(event.event_id) {
            return Err(CartError::AlreadyInCart);
        }
        self.items.push(CartItem { event, quantity: 1 });
        Ok(())
    }

    /// Set the quantity for an event. Zero removes the line.
    pub fn set_quantity(&mut self, event_id: EventId, quantity: u32) {
        if quantity == 0 {
            self.remove_event(event_id);
            return;
        }
        if let Some(item) = self
            .items
            .iter_mut()
            .find(|item| item.event.event_id == event_id)
        {
            item.quantity = quantity;
        }
    }

    /// Remove an event's line. Removing an absent event is a no-op.
    pub fn remove_event(&mut self, event_id: EventId) {
        self.items.retain(|item| item.event.event_id != event_id);
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    #[must_use]
    pub fn contains(&self, event_id: EventId) -> bool {
        self.items
            .iter()
            .any(|item| item.event.event_id == event_id)
    }

    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total number of tickets across all lines.
    #[must_use]
    pub fn total_tickets(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Sum of all line totals.
    #[must_use]
    pub fn total_amount(&self) -> Money {
        self.items.iter().map(CartItem::line_total).sum()
    }
}

/// Load the cart from the session, defaulting to empty.
pub async fn load_cart(session: &Session) -> Cart {
    session
        .get::<Cart>(session_keys::CART)
        .await
        .ok()
        .flatten()
        .unwrap_or_default()
}

/// Persist the cart back into the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn save_cart(
    session: &Session,
    cart: &Cart,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CART, cart).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::event::test_support::event;

    #[test]
    fn test_add_event_starts_at_one_ticket() {
        let mut cart = Cart::default();
        cart.add_event(event(1, "Tech Conference", "Convention Center", 500))
            .unwrap();
        assert_eq!(cart.total_tickets(), 1);
        assert_eq!(cart.total_amount(), Money::from_rupees(500));
    }

    #[test]
    fn test_duplicate_event_is_rejected() {
        let mut cart = Cart::default();
        cart.add_event(event(1, "Tech Conference", "Convention Center", 500))
            .unwrap();
        let err = cart
            .add_event(event(1, "Tech Conference", "Convention Center", 500))
            .unwrap_err();
        assert_eq!(err, CartError::AlreadyInCart);
        assert_eq!(cart.items().len(), 1);
    }

    #[test]
    fn test_set_quantity_updates_totals() {
        let mut cart = Cart::default();
        cart.add_event(event(1, "Tech Conference", "Convention Center", 500))
            .unwrap();
        cart.add_event(event(2, "Music Festival", "Central Park", 300))
            .unwrap();
        cart.set_quantity(EventId::new(1), 3);
        assert_eq!(cart.total_tickets(), 4);
        assert_eq!(cart.total_amount(), Money::from_rupees(1800));
    }

    #[test]
    fn test_zero_quantity_removes_line() {
        let mut cart = Cart::default();
        cart.add_event(event(1, "Tech Conference", "Convention Center", 500))
            .unwrap();
        cart.set_quantity(EventId::new(1), 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_for_absent_event_is_noop() {
        let mut cart = Cart::default();
        cart.add_event(event(1, "Tech Conference", "Convention Center", 500))
            .unwrap();
        cart.set_quantity(EventId::new(9), 5);
        assert_eq!(cart.total_tickets(), 1);
    }

    #[test]
    fn test_remove_and_clear() {
        let mut cart = Cart::default();
        cart.add_event(event(1, "Tech Conference", "Convention Center", 500))
            .unwrap();
        cart.add_event(event(2, "Music Festival", "Central Park", 300))
            .unwrap();
        cart.remove_event(EventId::new(1));
        assert_eq!(cart.items().len(), 1);
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total_amount(), Money::ZERO);
    }
}
