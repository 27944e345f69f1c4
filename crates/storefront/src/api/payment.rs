//! Hosted payment gateway endpoints.
//!
//! Distinct from the simulated checkout: these back the `/payment` page,
//! which drives the real gateway's hosted widget against the backend's
//! create-order and verify routes.

use tracing::instrument;

use super::types::{PaymentOrderDto, PaymentOrderRequest, PaymentVerifyRequest};
use super::{ApiError, EventHubClient};

impl EventHubClient {
    /// Create a gateway order for the hosted checkout widget.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend rejects the request or the
    /// call fails.
    #[instrument(skip(self, request), fields(event_id = %request.event_id))]
    pub async fn create_payment_order(
        &self,
        request: &PaymentOrderRequest,
    ) -> Result<PaymentOrderDto, ApiError> {
        self.post("/payment/create-order", request).await
    }

    /// Verify a gateway callback signature and record the booking.
    ///
    /// # Errors
    ///
    /// Returns an error when the signature does not verify or the call
    /// fails.
    #[instrument(skip(self, request), fields(event_id = %request.event_id))]
    pub async fn verify_payment(
        &self,
        request: &PaymentVerifyRequest,
    ) -> Result<String, ApiError> {
        self.post("/payment/verify", request).await
    }
}
