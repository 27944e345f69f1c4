//! Event domain type.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use eventhub_core::{EventCategory, EventId, Money, PrivacySetting};

/// A bookable event.
///
/// The remote API owns these; the storefront only ever holds read-only
/// copies (and snapshots of them inside cart items and order lines).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub event_id: EventId,
    pub event_name: String,
    pub description: String,
    pub venue: String,
    pub event_date: NaiveDate,
    pub event_time: NaiveTime,
    pub ticket_price: Money,
    pub category: Option<EventCategory>,
    pub privacy: PrivacySetting,
    pub image_url: Option<String>,
    pub creator_name: Option<String>,
}

impl Event {
    /// Time of day formatted for display (e.g. `18:00`).
    #[must_use]
    pub fn time_display(&self) -> String {
        self.event_time.format("%H:%M").to_string()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use rust_decimal::Decimal;

    /// A throwaway event for store and filter tests.
    pub fn event(id: i32, name: &str, venue: &str, price: i64) -> Event {
        Event {
            event_id: EventId::new(id),
            event_name: name.to_string(),
            description: format!("{name} description"),
            venue: venue.to_string(),
            event_date: NaiveDate::from_ymd_opt(2026, 3, 15).expect("valid date"),
            event_time: NaiveTime::from_hms_opt(9, 0, 0).expect("valid time"),
            ticket_price: Money::new(Decimal::from(price)),
            category: Some(EventCategory::Conference),
            privacy: PrivacySetting::Public,
            image_url: None,
            creator_name: None,
        }
    }
}
