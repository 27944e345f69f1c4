//! Fabricated demo data used when both order sources are unreachable.
//!
//! The storefront is a demo deployment of an intermittently-available
//! backend, so history and attendee views degrade to representative
//! sample data instead of an empty error page.

use chrono::{DateTime, Duration, NaiveDate, Utc};

use eventhub_core::{
    Email, EventId, Money, OrderId, OrderStatus, PaymentId, UserId, DEMO_ORDER_PREFIX,
};

use crate::models::{Attendee, Order, OrderLine};

fn demo_email(address: &str) -> Option<Email> {
    Email::parse(address).ok()
}

/// The two sample orders shown in place of an unreachable order history.
#[must_use]
pub fn demo_orders(user_id: UserId, now: DateTime<Utc>) -> Vec<Order> {
    let millis = now.timestamp_millis();

    let conference_attendees = [
        ("John", "Doe", "john.doe@example.com"),
        ("Jane", "Doe", "jane.doe@example.com"),
    ]
    .into_iter()
    .filter_map(|(first, last, email)| {
        Some(Attendee {
            first_name: first.to_string(),
            last_name: last.to_string(),
            email: demo_email(email)?,
            event_id: EventId::new(1),
            event_name: "Tech Conference 2024".to_string(),
        })
    })
    .collect();

    let conference = Order {
        order_id: OrderId::new(format!("{DEMO_ORDER_PREFIX}{millis}_1")),
        user_id,
        payment_id: PaymentId::new(format!("pay_card_{millis}")),
        payment_method: "card".to_string(),
        lines: vec![OrderLine {
            event_id: EventId::new(1),
            event_name: "Tech Conference 2024".to_string(),
            venue: "Convention Center".to_string(),
            event_date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap_or_default(),
            event_time: "09:00".to_string(),
            ticket_price: Money::from_rupees(500),
            quantity: 2,
        }],
        attendees: conference_attendees,
        total_amount: Money::from_rupees(1000),
        status: OrderStatus::Confirmed,
        created_at: now,
    };

    let festival = Order {
        order_id: OrderId::new(format!("{DEMO_ORDER_PREFIX}{millis}_2")),
        user_id,
        payment_id: PaymentId::new(format!("pay_upi_{millis}")),
        payment_method: "upi".to_string(),
        lines: vec![OrderLine {
            event_id: EventId::new(2),
            event_name: "Music Festival 2024".to_string(),
            venue: "Central Park".to_string(),
            event_date: NaiveDate::from_ymd_opt(2024, 4, 20).unwrap_or_default(),
            event_time: "18:00".to_string(),
            ticket_price: Money::from_rupees(300),
            quantity: 1,
        }],
        attendees: [("John", "Doe", "john.doe@example.com")]
            .into_iter()
            .filter_map(|(first, last, email)| {
                Some(Attendee {
                    first_name: first.to_string(),
                    last_name: last.to_string(),
                    email: demo_email(email)?,
                    event_id: EventId::new(2),
                    event_name: "Music Festival 2024".to_string(),
                })
            })
            .collect(),
        total_amount: Money::from_rupees(300),
        status: OrderStatus::Confirmed,
        created_at: now - Duration::days(1),
    };

    vec![conference, festival]
}

/// Sample attendee rows for the dashboard's per-event attendee list when
/// the bookings endpoint is unreachable.
#[must_use]
pub fn demo_attendees(event_id: EventId, event_name: &str) -> Vec<Attendee> {
    [
        ("Alice", "Kumar", "alice.kumar@example.com"),
        ("Rahul", "Mehta", "rahul.mehta@example.com"),
        ("Priya", "Singh", "priya.singh@example.com"),
    ]
    .into_iter()
    .filter_map(|(first, last, email)| {
        Some(Attendee {
            first_name: first.to_string(),
            last_name: last.to_string(),
            email: demo_email(email)?,
            event_id,
            event_name: event_name.to_string(),
        })
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exactly_two_demo_orders() {
        let orders = demo_orders(UserId::new(5), Utc::now());
        assert_eq!(orders.len(), 2);
        assert!(orders.iter().all(|o| o.order_id.is_demo()));
        assert!(orders.iter().all(|o| o.user_id == UserId::new(5)));
    }

    #[test]
    fn test_demo_order_amounts() {
        let orders = demo_orders(UserId::new(1), Utc::now());
        assert_eq!(orders[0].total_amount, Money::from_rupees(1000));
        assert_eq!(orders[0].total_tickets(), 2);
        assert_eq!(orders[0].payment_method, "card");
        assert_eq!(orders[1].total_amount, Money::from_rupees(300));
        assert_eq!(orders[1].payment_method, "upi");
    }

    #[test]
    fn test_demo_order_ids_are_distinct() {
        let now = Utc::now();
        let orders = demo_orders(UserId::new(1), now);
        assert_ne!(orders[0].order_id, orders[1].order_id);
        let millis = now.timestamp_millis();
        assert_eq!(
            orders[0].order_id.as_str(),
            format!("demo_order_{millis}_1")
        );
    }

    #[test]
    fn test_demo_attendees_carry_event() {
        let attendees = demo_attendees(EventId::new(9), "Startup Meetup");
        assert_eq!(attendees.len(), 3);
        assert!(attendees.iter().all(|a| a.event_id == EventId::new(9)));
    }
}
