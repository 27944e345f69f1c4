//! The checkout state machine.
//!
//! Checkout snapshots the cart and walks a fixed sequence of steps:
//! collect one attendee per ticket, pick a payment method, simulate the
//! payment, then record the order. The whole machine is serialized into
//! the session between requests, so every transition is an explicit
//! method and illegal jumps (e.g. paying before attendees are in) are
//! rejected rather than silently accepted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use tower_sessions::Session;

use eventhub_core::{Email, EventId, Money, OrderId, OrderStatus, PaymentId, UserId};

use crate::models::{Attendee, Order, OrderLine, session_keys};

use super::cart::{Cart, CartItem};

/// Checkout transition and validation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("Your cart is empty")]
    EmptyCart,

    #[error("This step is not available yet")]
    WrongStep,

    #[error("Expected {expected} attendees, got {actual}")]
    AttendeeCountMismatch { expected: usize, actual: usize },

    #[error("{0}")]
    InvalidPayment(String),
}

/// Which attendee field failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttendeeField {
    FirstName,
    LastName,
    Email,
}

/// A field-level attendee validation failure, addressed by form index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendeeFormError {
    pub index: usize,
    pub field: AttendeeField,
    pub message: String,
}

/// Payment methods offered by the simulated checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Card,
    Upi,
    NetBanking,
}

impl PaymentMethod {
    /// The method name as it appears in order records and payment ids.
    #[must_use]
    pub const fn wire_name(self) -> &'static str {
        match self {
            Self::Card => "card",
            Self::Upi => "upi",
            Self::NetBanking => "netbanking",
        }
    }
}

/// Payment details as submitted on the payment step.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "lowercase")]
pub enum PaymentDetails {
    Card {
        number: String,
        expiry: String,
        cvv: String,
        holder_name: String,
    },
    Upi {
        vpa: String,
    },
    NetBanking {
        bank: String,
    },
}

/// MM/YY with a real month. Year windows are not checked; the gateway
/// simulation has no clock.
fn valid_expiry(expiry: &str) -> bool {
    let Some((month, year)) = expiry.split_once('/') else {
        return false;
    };
    let two_digits = |s: &str| s.len() == 2 && s.bytes().all(|b| b.is_ascii_digit());
    if !two_digits(month) || !two_digits(year) {
        return false;
    }
    matches!(month.parse::<u8>(), Ok(1..=12))
}

impl PaymentDetails {
    #[must_use]
    pub const fn method(&self) -> PaymentMethod {
        match self {
            Self::Card { .. } => PaymentMethod::Card,
            Self::Upi { .. } => PaymentMethod::Upi,
            Self::NetBanking { .. } => PaymentMethod::NetBanking,
        }
    }

    /// Structural validation of the submitted details. No real gateway
    /// is involved; this is what the simulation checks.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::InvalidPayment`] naming the first
    /// failing field.
    pub fn validate(&self) -> Result<(), CheckoutError> {
        match self {
            Self::Card {
                number,
                expiry,
                cvv,
                holder_name,
            } => {
                let digits: String = number.chars().filter(|c| !c.is_whitespace()).collect();
                if digits.len() != 16 || !digits.chars().all(|c| c.is_ascii_digit()) {
                    return Err(CheckoutError::InvalidPayment(
                        "Card number must be 16 digits".to_string(),
                    ));
                }
                if !valid_expiry(expiry) {
                    return Err(CheckoutError::InvalidPayment(
                        "Expiry must be in MM/YY format".to_string(),
                    ));
                }
                if !(3..=4).contains(&cvv.len()) || !cvv.chars().all(|c| c.is_ascii_digit()) {
                    return Err(CheckoutError::InvalidPayment(
                        "CVV must be 3 or 4 digits".to_string(),
                    ));
                }
                if holder_name.trim().is_empty() {
                    return Err(CheckoutError::InvalidPayment(
                        "Cardholder name is required".to_string(),
                    ));
                }
                Ok(())
            }
            Self::Upi { vpa } => {
                if vpa.trim().is_empty() || !vpa.contains('@') {
                    return Err(CheckoutError::InvalidPayment(
                        "Enter a valid UPI ID (e.g. name@bank)".to_string(),
                    ));
                }
                Ok(())
            }
            Self::NetBanking { bank } => {
                if bank.trim().is_empty() {
                    return Err(CheckoutError::InvalidPayment(
                        "Select a bank".to_string(),
                    ));
                }
                Ok(())
            }
        }
    }

    /// The non-sensitive summary recorded on the order. Card numbers are
    /// reduced to their last four digits; CVV and expiry never leave the
    /// session.
    #[must_use]
    pub fn record(&self) -> serde_json::Value {
        match self {
            Self::Card {
                number,
                holder_name,
                ..
            } => {
                let digits: String = number.chars().filter(char::is_ascii_digit).collect();
                let start = digits.len().saturating_sub(4);
                json!({ "last4": digits.get(start..).unwrap_or_default(), "name": holder_name })
            }
            Self::Upi { vpa } => json!({ "upiId": vpa }),
            Self::NetBanking { bank } => json!({ "bank": bank }),
        }
    }
}

/// The steps of a checkout, in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckoutStep {
    CollectingAttendees,
    SelectingPayment,
    Succeeded { order_id: OrderId },
}

/// One raw attendee row from the attendee form.
#[derive(Debug, Clone, Deserialize)]
pub struct AttendeeEntry {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// An attendee form slot: which event line the seat belongs to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendeeSlot {
    pub event_id: EventId,
    pub event_name: String,
    pub seat: u32,
}

/// A checkout in progress, serialized whole into the session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Checkout {
    step: CheckoutStep,
    items: Vec<CartItem>,
    total_amount: Money,
    attendees: Vec<Attendee>,
}

impl Checkout {
    /// Begin a checkout from the current cart.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::EmptyCart`] when there is nothing to
    /// book.
    pub fn begin(cart: &Cart) -> Result<Self, CheckoutError> {
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        Ok(Self {
            step: CheckoutStep::CollectingAttendees,
            items: cart.items().to_vec(),
            total_amount: cart.total_amount(),
            attendees: Vec::new(),
        })
    }

    #[must_use]
    pub const fn step(&self) -> &CheckoutStep {
        &self.step
    }

    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    #[must_use]
    pub const fn total_amount(&self) -> Money {
        self.total_amount
    }

    #[must_use]
    pub fn attendees(&self) -> &[Attendee] {
        &self.attendees
    }

    /// Whether the snapshot still reflects the cart's contents. A stale
    /// snapshot must be dropped, not resumed.
    #[must_use]
    pub fn matches_cart(&self, cart: &Cart) -> bool {
        let lines = |items: &[CartItem]| {
            items
                .iter()
                .map(|item| (item.event.event_id, item.quantity))
                .collect::<Vec<_>>()
        };
        lines(&self.items) == lines(cart.items())
    }

    /// The attendee form slots: one per ticket, in item order.
    #[must_use]
    pub fn attendee_slots(&self) -> Vec<AttendeeSlot> {
        self.items
            .iter()
            .flat_map(|item| {
                (1..=item.quantity).map(|seat| AttendeeSlot {
                    event_id: item.event.event_id,
                    event_name: item.event.event_name.clone(),
                    seat,
                })
            })
            .collect()
    }

    /// Validate and store the attendee form, advancing to payment.
    ///
    /// Expects exactly one entry per ticket, in slot order. On field
    /// failures the step does not advance and every failing field is
    /// reported.
    ///
    /// # Errors
    ///
    /// Returns the transition error, or the per-field failures.
    pub fn submit_attendees(
        &mut self,
        entries: &[AttendeeEntry],
    ) -> Result<(), (CheckoutError, Vec<AttendeeFormError>)> {
        if self.step != CheckoutStep::CollectingAttendees {
            return Err((CheckoutError::WrongStep, Vec::new()));
        }

        let slots = self.attendee_slots();
        if entries.len() != slots.len() {
            return Err((
                CheckoutError::AttendeeCountMismatch {
                    expected: slots.len(),
                    actual: entries.len(),
                },
                Vec::new(),
            ));
        }

        let mut errors = Vec::new();
        let mut attendees = Vec::with_capacity(entries.len());
        for (index, (entry, slot)) in entries.iter().zip(&slots).enumerate() {
            if entry.first_name.trim().is_empty() {
                errors.push(AttendeeFormError {
                    index,
                    field: AttendeeField::FirstName,
                    message: "First name is required".to_string(),
                });
            }
            if entry.last_name.trim().is_empty() {
                errors.push(AttendeeFormError {
                    index,
                    field: AttendeeField::LastName,
                    message: "Last name is required".to_string(),
                });
            }
            match Email::parse(&entry.email) {
                Ok(email) => attendees.push(Attendee {
                    first_name: entry.first_name.trim().to_string(),
                    last_name: entry.last_name.trim().to_string(),
                    email,
                    event_id: slot.event_id,
                    event_name: slot.event_name.clone(),
                }),
                Err(err) => errors.push(AttendeeFormError {
                    index,
                    field: AttendeeField::Email,
                    message: err.to_string(),
                }),
            }
        }

        if !errors.is_empty() {
            return Err((
                CheckoutError::InvalidPayment("attendee details incomplete".to_string()),
                errors,
            ));
        }

        self.attendees = attendees;
        self.step = CheckoutStep::SelectingPayment;
        Ok(())
    }

    /// Validate payment details and mint the simulated payment id.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::WrongStep`] before attendees are in, or
    /// the field validation failure.
    pub fn submit_payment(
        &self,
        details: &PaymentDetails,
        now: DateTime<Utc>,
    ) -> Result<PaymentId, CheckoutError> {
        if self.step != CheckoutStep::SelectingPayment {
            return Err(CheckoutError::WrongStep);
        }
        details.validate()?;
        let millis = now.timestamp_millis();
        Ok(PaymentId::new(format!(
            "pay_{}_{millis}",
            details.method().wire_name()
        )))
    }

    /// Build the order record after payment simulation succeeded.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::WrongStep`] if payment was never reached.
    pub fn finalize_order(
        &self,
        user_id: UserId,
        payment_id: PaymentId,
        method: PaymentMethod,
        order_id: OrderId,
        now: DateTime<Utc>,
    ) -> Result<Order, CheckoutError> {
        if self.step != CheckoutStep::SelectingPayment {
            return Err(CheckoutError::WrongStep);
        }
        let lines = self
            .items
            .iter()
            .map(|item| OrderLine {
                event_id: item.event.event_id,
                event_name: item.event.event_name.clone(),
                venue: item.event.venue.clone(),
                event_date: item.event.event_date,
                event_time: item.event.time_display(),
                ticket_price: item.event.ticket_price,
                quantity: item.quantity,
            })
            .collect();
        Ok(Order {
            order_id,
            user_id,
            payment_id,
            payment_method: method.wire_name().to_string(),
            lines,
            attendees: self.attendees.clone(),
            total_amount: self.total_amount,
            status: OrderStatus::Confirmed,
            created_at: now,
        })
    }

    /// Mark the checkout complete.
    pub fn complete(&mut self, order_id: OrderId) {
        self.step = CheckoutStep::Succeeded { order_id };
    }
}

/// Load the in-progress checkout from the session.
pub async fn load_checkout(session: &Session) -> Option<Checkout> {
    session
        .get::<Checkout>(session_keys::CHECKOUT)
        .await
        .ok()
        .flatten()
}

/// Persist the checkout back into the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn save_checkout(
    session: &Session,
    checkout: &Checkout,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CHECKOUT, checkout).await
}

/// Drop the in-progress checkout from the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_checkout(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.remove::<Checkout>(session_keys::CHECKOUT).await?;
    Ok(())
}
