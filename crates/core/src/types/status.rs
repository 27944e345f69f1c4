//! Status and category enums shared with the remote EventHub API.
//!
//! Wire casing follows the backend's Java enums (SCREAMING_SNAKE_CASE for
//! event metadata) and its lowercase order status strings.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Confirmed,
    Pending,
    Cancelled,
}

impl OrderStatus {
    /// Human-readable label for display.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Confirmed => "Confirmed",
            Self::Pending => "Pending",
            Self::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Category of an event, as defined by the remote API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventCategory {
    Conference,
    Workshop,
    Concert,
    Sports,
    Social,
    Educational,
    Entertainment,
    Business,
    Charity,
    Other,
}

impl EventCategory {
    /// All categories, in the order the catalog filter offers them.
    pub const ALL: [Self; 10] = [
        Self::Conference,
        Self::Workshop,
        Self::Concert,
        Self::Sports,
        Self::Social,
        Self::Educational,
        Self::Entertainment,
        Self::Business,
        Self::Charity,
        Self::Other,
    ];

    /// Human-readable label for display.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Conference => "Conference",
            Self::Workshop => "Workshop",
            Self::Concert => "Concert",
            Self::Sports => "Sports",
            Self::Social => "Social",
            Self::Educational => "Educational",
            Self::Entertainment => "Entertainment",
            Self::Business => "Business",
            Self::Charity => "Charity",
            Self::Other => "Other",
        }
    }

    /// The wire value (e.g. `CONFERENCE`) used in query strings.
    #[must_use]
    pub const fn as_wire(&self) -> &'static str {
        match self {
            Self::Conference => "CONFERENCE",
            Self::Workshop => "WORKSHOP",
            Self::Concert => "CONCERT",
            Self::Sports => "SPORTS",
            Self::Social => "SOCIAL",
            Self::Educational => "EDUCATIONAL",
            Self::Entertainment => "ENTERTAINMENT",
            Self::Business => "BUSINESS",
            Self::Charity => "CHARITY",
            Self::Other => "OTHER",
        }
    }

    /// Parse a wire value, ignoring unknown strings.
    #[must_use]
    pub fn from_wire(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_wire() == s)
    }
}

/// Error returned when parsing an unknown category wire value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown event category: {0}")]
pub struct ParseCategoryError(String);

impl std::str::FromStr for EventCategory {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_wire(s).ok_or_else(|| ParseCategoryError(s.to_string()))
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

/// Privacy setting of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PrivacySetting {
    #[default]
    Public,
    Private,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_status_wire_casing() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::Confirmed).unwrap(),
            "\"confirmed\""
        );
        let status: OrderStatus = serde_json::from_str("\"cancelled\"").unwrap();
        assert_eq!(status, OrderStatus::Cancelled);
    }

    #[test]
    fn test_category_wire_round_trip() {
        for category in EventCategory::ALL {
            assert_eq!(EventCategory::from_wire(category.as_wire()), Some(category));
        }
        assert_eq!(EventCategory::from_wire("KARAOKE"), None);
    }

    #[test]
    fn test_category_from_str_uses_wire_names() {
        assert_eq!(
            "CONCERT".parse::<EventCategory>(),
            Ok(EventCategory::Concert)
        );
        assert!("".parse::<EventCategory>().is_err());
        assert!("karaoke".parse::<EventCategory>().is_err());
    }

    #[test]
    fn test_category_serde_screaming_snake() {
        assert_eq!(
            serde_json::to_string(&EventCategory::Conference).unwrap(),
            "\"CONFERENCE\""
        );
    }

    #[test]
    fn test_privacy_default_public() {
        assert_eq!(PrivacySetting::default(), PrivacySetting::Public);
    }
}
