//! Remote EventHub API client.
//!
//! # Architecture
//!
//! - Plain JSON over HTTP via `reqwest`; every response body is wrapped in
//!   the backend's `{ statusCode, message, data }` envelope
//! - The remote API is the source of truth - NO local persistence, direct
//!   API calls from handlers
//! - In-memory caching via `moka` for the public event list (60 second TTL)
//! - Authentication is carried as explicit user/email identifiers in query
//!   parameters, not bearer tokens (remote API convention)
//!
//! # Example
//!
//! ```rust,ignore
//! use eventhub_storefront::api::EventHubClient;
//!
//! let client = EventHubClient::new(&config.api);
//!
//! // List bookable events
//! let events = client.public_events().await?;
//!
//! // Record an order after checkout
//! let order_id = client.create_order(&request).await?;
//! ```

mod client;
pub mod demo;
pub mod types;

mod auth;
mod events;
mod orders;
mod payment;
mod qa;

pub use client::EventHubClient;
pub use orders::SourceOutcome;

use thiserror::Error;

/// Errors that can occur when talking to the remote EventHub API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP transport failed (connection refused, DNS, TLS, ...).
    #[error("HTTP error: {0}")]
    Http(reqwest::Error),

    /// The request exceeded its deadline.
    #[error("request timed out after {0} seconds")]
    Timeout(u64),

    /// The remote API answered with a non-success status.
    #[error("API returned {code}: {message}")]
    Status {
        /// HTTP status code.
        code: u16,
        /// Message from the response envelope, or a truncated body.
        message: String,
    },

    /// JSON decoding of the response envelope failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The envelope decoded but carried no data payload.
    #[error("API response carried no data: {0}")]
    EmptyData(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            // reqwest does not expose the configured deadline; callers that
            // set one log it themselves
            Self::Timeout(0)
        } else {
            Self::Http(err)
        }
    }
}

impl ApiError {
    /// Whether this failure is worth a retry against a fallback endpoint.
    ///
    /// Everything except a parse error qualifies: a malformed body from
    /// the primary endpoint usually means the fallback is malformed too.
    #[must_use]
    pub const fn is_fallback_worthy(&self) -> bool {
        !matches!(self, Self::Parse(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = ApiError::NotFound("event 123".to_string());
        assert_eq!(err.to_string(), "Not found: event 123");

        let err = ApiError::Status {
            code: 500,
            message: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "API returned 500: boom");
    }

    #[test]
    fn test_fallback_worthiness() {
        let status = ApiError::Status {
            code: 500,
            message: String::new(),
        };
        assert!(status.is_fallback_worthy());
        assert!(ApiError::Timeout(10).is_fallback_worthy());

        let parse_err = serde_json::from_str::<i32>("not json").unwrap_err();
        assert!(!ApiError::Parse(parse_err).is_fallback_worthy());
    }
}
