//! Order endpoints with an explicit primary/fallback source strategy.
//!
//! The backend exposes order routes twice: the real ones under
//! `/api/orders` and demo ones under `/api/demo/orders`. Each operation
//! walks the sources in order and records how far the request got, so
//! callers can distinguish "the primary answered" from "we fell back"
//! from "everything is down".

use tracing::{instrument, warn};

use eventhub_core::{OrderId, UserId};

use crate::models::Order;

use super::types::{OrderDto, OrderListDto, OrderRequest};
use super::{ApiError, EventHubClient};

/// Where an order operation's answer came from.
#[derive(Debug)]
pub enum SourceOutcome<T> {
    /// The primary order service answered.
    Primary(T),
    /// The primary failed; the demo service answered.
    Fallback(T),
    /// Both sources failed. Carries the primary's error.
    Unavailable(ApiError),
}

impl<T> SourceOutcome<T> {
    /// The payload, when either source answered.
    pub fn into_value(self) -> Option<T> {
        match self {
            Self::Primary(value) | Self::Fallback(value) => Some(value),
            Self::Unavailable(_) => None,
        }
    }

    /// True when neither source answered.
    #[must_use]
    pub const fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }

    /// True when the answer came from the demo service.
    #[must_use]
    pub const fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }
}

impl EventHubClient {
    /// Record an order, preferring the real order service and falling
    /// back to the demo one.
    ///
    /// Returns [`SourceOutcome::Unavailable`] when both sources fail;
    /// the checkout flow then records the order locally so the booking
    /// still completes.
    #[instrument(skip(self, request), fields(payment_id = %request.payment_id))]
    pub async fn create_order(&self, request: &OrderRequest) -> SourceOutcome<OrderId> {
        let primary = self
            .post::<OrderRequest, OrderDto>("/api/orders/create", request)
            .await;
        let primary_err = match primary {
            Ok(dto) => return SourceOutcome::Primary(dto.order_id),
            Err(err) if err.is_fallback_worthy() => err,
            Err(err) => return SourceOutcome::Unavailable(err),
        };

        warn!(error = %primary_err, "order service failed, trying demo endpoint");
        match self
            .post::<OrderRequest, OrderDto>("/api/demo/orders/create", request)
            .await
        {
            Ok(dto) => SourceOutcome::Fallback(dto.order_id),
            Err(fallback_err) => {
                warn!(error = %fallback_err, "demo order endpoint failed too");
                SourceOutcome::Unavailable(primary_err)
            }
        }
    }

    /// Fetch a user's order history, preferring the real order service.
    #[instrument(skip(self))]
    pub async fn user_orders(&self, user_id: UserId) -> SourceOutcome<Vec<Order>> {
        let primary = self
            .get::<OrderListDto>(&format!("/api/orders/user/{user_id}"), &[])
            .await;
        let primary_err = match primary {
            Ok(list) => return SourceOutcome::Primary(into_orders(list, user_id)),
            Err(err) if err.is_fallback_worthy() => err,
            Err(err) => return SourceOutcome::Unavailable(err),
        };

        warn!(error = %primary_err, "order history failed, trying demo endpoint");
        match self
            .get::<OrderListDto>(&format!("/api/demo/orders/user/{user_id}"), &[])
            .await
        {
            Ok(list) => SourceOutcome::Fallback(into_orders(list, user_id)),
            Err(fallback_err) => {
                warn!(error = %fallback_err, "demo order history failed too");
                SourceOutcome::Unavailable(primary_err)
            }
        }
    }
}

fn into_orders(list: OrderListDto, user_id: UserId) -> Vec<Order> {
    list.orders
        .into_iter()
        .map(|dto| dto.into_order(user_id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_value_extraction() {
        assert_eq!(SourceOutcome::Primary(1).into_value(), Some(1));
        assert_eq!(SourceOutcome::Fallback(2).into_value(), Some(2));
        let down: SourceOutcome<i32> =
            SourceOutcome::Unavailable(ApiError::EmptyData("orders".to_string()));
        assert!(down.is_unavailable());
        assert!(down.into_value().is_none());
    }

    #[test]
    fn test_fallback_flag() {
        assert!(SourceOutcome::Fallback(()).is_fallback());
        assert!(!SourceOutcome::Primary(()).is_fallback());
    }
}
