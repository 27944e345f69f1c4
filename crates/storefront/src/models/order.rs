//! Order and attendee domain types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use eventhub_core::{Email, EventId, Money, OrderId, OrderStatus, PaymentId, UserId};

/// A named ticket holder tied to a specific event within an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attendee {
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    pub event_id: EventId,
    pub event_name: String,
}

impl Attendee {
    /// Full display name.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// One event line inside an order: an event snapshot plus quantity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLine {
    pub event_id: EventId,
    pub event_name: String,
    pub venue: String,
    pub event_date: NaiveDate,
    pub event_time: String,
    pub ticket_price: Money,
    pub quantity: u32,
}

impl OrderLine {
    /// Price × quantity for this line.
    #[must_use]
    pub fn line_total(&self) -> Money {
        self.ticket_price.times(self.quantity)
    }
}

/// A finalized, paid booking spanning one or more events and attendees.
///
/// Created by the checkout flow after a (real or simulated) successful
/// payment; read-only to the client thereafter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub order_id: OrderId,
    pub user_id: UserId,
    pub payment_id: PaymentId,
    pub payment_method: String,
    pub lines: Vec<OrderLine>,
    pub attendees: Vec<Attendee>,
    pub total_amount: Money,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Total number of tickets across all lines.
    #[must_use]
    pub fn total_tickets(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_line_total() {
        let line = OrderLine {
            event_id: EventId::new(1),
            event_name: "Tech Conference".to_string(),
            venue: "Convention Center".to_string(),
            event_date: NaiveDate::from_ymd_opt(2026, 3, 15).unwrap(),
            event_time: "09:00".to_string(),
            ticket_price: Money::from_rupees(500),
            quantity: 2,
        };
        assert_eq!(line.line_total(), Money::from_rupees(1000));
    }

    #[test]
    fn test_attendee_full_name() {
        let attendee = Attendee {
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            email: Email::parse("john@example.com").unwrap(),
            event_id: EventId::new(1),
            event_name: "Tech Conference".to_string(),
        };
        assert_eq!(attendee.full_name(), "John Doe");
    }
}
