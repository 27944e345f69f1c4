//! Newtype IDs for type-safe entity references.
//!
//! Numeric identifiers minted by the remote EventHub API use the
//! `define_id!` macro. Order and payment identifiers are opaque strings
//! on the wire (e.g. `demo_order_1700000000000_1`, `pay_card_...`) and
//! get dedicated string newtypes below.

use serde::{Deserialize, Serialize};

/// Macro to define a type-safe ID wrapper.
///
/// Creates a newtype wrapper around `i32` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`
/// - Conversion methods: `new()`, `as_i32()`
/// - `From<i32>` and `Into<i32>` implementations
///
/// # Example
///
/// ```rust
/// # use eventhub_core::define_id;
/// define_id!(VenueId);
///
/// let venue_id = VenueId::new(1);
/// assert_eq!(venue_id.as_i32(), 1);
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Create a new ID from an i32 value.
            #[must_use]
            pub const fn new(id: i32) -> Self {
                Self(id)
            }

            /// Get the underlying i32 value.
            #[must_use]
            pub const fn as_i32(&self) -> i32 {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i32> for $name {
            fn from(id: i32) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

// Define standard entity IDs
define_id!(UserId);
define_id!(EventId);
define_id!(BookingId);
define_id!(QuestionId);

/// Prefix that marks a locally fabricated order identifier.
pub const DEMO_ORDER_PREFIX: &str = "demo_order_";

/// An order identifier.
///
/// Opaque string minted by the remote order service, or fabricated locally
/// with the [`DEMO_ORDER_PREFIX`] when the service is unreachable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    /// Wrap an order identifier string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Fabricate a local demo order id from a millisecond timestamp.
    #[must_use]
    pub fn demo(millis: i64) -> Self {
        Self(format!("{DEMO_ORDER_PREFIX}{millis}"))
    }

    /// Whether this id was fabricated locally rather than minted remotely.
    #[must_use]
    pub fn is_demo(&self) -> bool {
        self.0.starts_with(DEMO_ORDER_PREFIX)
    }

    /// Get the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for OrderId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for OrderId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A payment identifier (e.g. `pay_card_1700000000000`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaymentId(String);

impl PaymentId {
    /// Wrap a payment identifier string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for PaymentId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for PaymentId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_distinct_types() {
        let user_id = UserId::new(1);
        let event_id = EventId::new(1);
        assert_eq!(user_id.as_i32(), event_id.as_i32());
        // `let _: UserId = event_id;` would not compile.
    }

    #[test]
    fn test_id_display() {
        assert_eq!(EventId::new(42).to_string(), "42");
    }

    #[test]
    fn test_id_serde_transparent() {
        let id = UserId::new(7);
        assert_eq!(serde_json::to_string(&id).unwrap(), "7");
        let back: UserId = serde_json::from_str("7").unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_demo_order_id() {
        let id = OrderId::demo(1_700_000_000_000);
        assert!(id.is_demo());
        assert_eq!(id.as_str(), "demo_order_1700000000000");

        let remote = OrderId::new("ord_8f3a");
        assert!(!remote.is_demo());
    }

    #[test]
    fn test_order_id_serde_transparent() {
        let id = OrderId::new("demo_order_1_2");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"demo_order_1_2\"");
    }
}
