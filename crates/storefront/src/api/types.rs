//! Wire types for the remote EventHub API.
//!
//! Field names are camelCase on the wire (the backend is a Java service
//! with default Jackson naming). Amounts travel as JSON numbers and are
//! converted to [`Money`] at the domain boundary; times travel as strings
//! because the backend emits both `HH:MM` and `HH:MM:SS`.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use eventhub_core::{
    Email, EventCategory, EventId, Money, OrderId, OrderStatus, PaymentId, PrivacySetting, UserId,
};

use crate::models::{Attendee, Event, Order, OrderLine};

/// The backend's uniform response envelope.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    #[serde(default)]
    pub status_code: i32,
    #[serde(default)]
    pub message: String,
    pub data: Option<T>,
}

/// Convert a JSON number amount into [`Money`].
fn money_from_f64(amount: f64) -> Money {
    Decimal::from_f64_retain(amount)
        .map(Money::new)
        .unwrap_or(Money::ZERO)
}

pub(crate) fn money_to_f64(money: Money) -> f64 {
    use rust_decimal::prelude::ToPrimitive;
    money.amount().to_f64().unwrap_or(0.0)
}

/// Parse a wire time that may or may not carry seconds.
fn parse_wire_time(s: &str) -> NaiveTime {
    NaiveTime::parse_from_str(s, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .unwrap_or_default()
}

// =============================================================================
// Users
// =============================================================================

/// A user profile as returned by `/user/*` endpoints.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub user_id: UserId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub verified: bool,
}

/// Registration payload for `POST /user/register`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Login payload for `POST /user/login`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

// =============================================================================
// Events
// =============================================================================

/// An event as returned by `/events/*` endpoints.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDto {
    pub event_id: EventId,
    pub event_name: String,
    #[serde(default)]
    pub description: String,
    pub venue: String,
    pub event_date: NaiveDate,
    pub event_time: String,
    pub ticket_price: f64,
    #[serde(default)]
    pub event_category: Option<EventCategory>,
    #[serde(default)]
    pub privacy_settings: Option<PrivacySetting>,
    #[serde(default)]
    pub event_image_url: Option<String>,
    #[serde(default)]
    pub creator_name: Option<String>,
}

impl From<EventDto> for Event {
    fn from(dto: EventDto) -> Self {
        Self {
            event_id: dto.event_id,
            event_name: dto.event_name,
            description: dto.description,
            venue: dto.venue,
            event_date: dto.event_date,
            event_time: parse_wire_time(&dto.event_time),
            ticket_price: money_from_f64(dto.ticket_price),
            category: dto.event_category,
            privacy: dto.privacy_settings.unwrap_or_default(),
            image_url: dto.event_image_url,
            creator_name: dto.creator_name,
        }
    }
}

/// Payload for `POST /events/create` and `PUT /events/update`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRequest {
    pub event_name: String,
    pub description: String,
    pub venue: String,
    pub event_date: NaiveDate,
    pub event_time: String,
    pub ticket_price: f64,
    pub event_category: EventCategory,
    pub privacy_settings: PrivacySetting,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_image_url: Option<String>,
}

/// A booking row from `GET /events/bookings` (the per-event attendee list).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingDto {
    pub booking_id: i32,
    #[serde(default)]
    pub user: Option<BookingUserDto>,
    #[serde(default)]
    pub payment_status: Option<String>,
}

/// The user half of a booking row.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingUserDto {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

// =============================================================================
// Orders
// =============================================================================

/// One event line item on the order wire format.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemDto {
    pub event_id: EventId,
    pub event_name: String,
    #[serde(default)]
    pub venue: String,
    pub event_date: NaiveDate,
    #[serde(default)]
    pub event_time: String,
    pub ticket_price: f64,
    pub quantity: u32,
}

/// An attendee on the order wire format.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendeeDto {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub event_id: EventId,
    #[serde(default)]
    pub event_name: String,
}

/// Order payload for `POST /api/orders/create`, built after a successful
/// payment simulation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub user_id: String,
    pub payment_id: PaymentId,
    pub payment_method: String,
    pub payment_details: serde_json::Value,
    pub items: Vec<OrderItemDto>,
    pub attendees: Vec<AttendeeDto>,
    pub total_amount: f64,
    pub status: OrderStatus,
}

/// An order as returned by the order endpoints.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDto {
    pub order_id: OrderId,
    #[serde(default)]
    pub payment_id: Option<PaymentId>,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub items: Vec<OrderItemDto>,
    #[serde(default)]
    pub attendees: Vec<AttendeeDto>,
    #[serde(default)]
    pub total_amount: Option<f64>,
    #[serde(default)]
    pub status: Option<OrderStatus>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Wrapper for the order-list payload (`{ "orders": [...] }`).
#[derive(Debug, Deserialize)]
pub struct OrderListDto {
    #[serde(default)]
    pub orders: Vec<OrderDto>,
}

impl OrderDto {
    /// Convert to the domain [`Order`], filling defaults for the loosely
    /// typed parts the remote sometimes omits.
    #[must_use]
    pub fn into_order(self, user_id: UserId) -> Order {
        let lines = self
            .items
            .into_iter()
            .map(|item| OrderLine {
                event_id: item.event_id,
                event_name: item.event_name,
                venue: item.venue,
                event_date: item.event_date,
                event_time: item.event_time,
                ticket_price: money_from_f64(item.ticket_price),
                quantity: item.quantity,
            })
            .collect();

        let attendees = self
            .attendees
            .into_iter()
            .filter_map(|a| {
                let email = Email::parse(&a.email).ok()?;
                Some(Attendee {
                    first_name: a.first_name,
                    last_name: a.last_name,
                    email,
                    event_id: a.event_id,
                    event_name: a.event_name,
                })
            })
            .collect();

        Order {
            order_id: self.order_id,
            user_id,
            payment_id: self
                .payment_id
                .unwrap_or_else(|| PaymentId::new("unknown")),
            payment_method: self.payment_method.unwrap_or_else(|| "card".to_string()),
            lines,
            attendees,
            total_amount: self.total_amount.map(money_from_f64).unwrap_or(Money::ZERO),
            status: self.status.unwrap_or_default(),
            created_at: self.created_at.unwrap_or_else(Utc::now),
        }
    }
}

impl OrderRequest {
    /// Build the wire request from a finalized domain order. The order
    /// record has no payment details; callers attach the summary from
    /// the submitted [`PaymentDetails`](crate::stores::PaymentDetails).
    #[must_use]
    pub fn from_order(order: &Order) -> Self {
        Self {
            user_id: order.user_id.to_string(),
            payment_id: order.payment_id.clone(),
            payment_method: order.payment_method.clone(),
            payment_details: serde_json::Value::Null,
            items: order
                .lines
                .iter()
                .map(|line| OrderItemDto {
                    event_id: line.event_id,
                    event_name: line.event_name.clone(),
                    venue: line.venue.clone(),
                    event_date: line.event_date,
                    event_time: line.event_time.clone(),
                    ticket_price: money_to_f64(line.ticket_price),
                    quantity: line.quantity,
                })
                .collect(),
            attendees: order
                .attendees
                .iter()
                .map(|a| AttendeeDto {
                    first_name: a.first_name.clone(),
                    last_name: a.last_name.clone(),
                    email: a.email.to_string(),
                    event_id: a.event_id,
                    event_name: a.event_name.clone(),
                })
                .collect(),
            total_amount: money_to_f64(order.total_amount),
            status: order.status,
        }
    }
}

// =============================================================================
// Payments
// =============================================================================

/// Payload for `POST /payment/create-order`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentOrderRequest {
    pub user_id: UserId,
    pub event_id: EventId,
    pub amount: f64,
}

/// A gateway order created by the remote API for the hosted checkout.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentOrderDto {
    pub order_id: String,
    pub amount: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    "INR".to_string()
}

/// Gateway callback payload for `POST /payment/verify`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentVerifyRequest {
    pub razorpay_order_id: String,
    pub razorpay_payment_id: String,
    pub razorpay_signature: String,
    pub user_id: UserId,
    pub event_id: EventId,
}

// =============================================================================
// Q&A
// =============================================================================

/// A question (optionally answered) on an event's Q&A board.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDto {
    pub qa_id: i32,
    pub question: String,
    #[serde(default)]
    pub answer: Option<String>,
    pub event_id: EventId,
    #[serde(default)]
    pub asked_by_name: Option<String>,
    #[serde(default)]
    pub answered_by_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_decodes_backend_shape() {
        let body = r#"{"statusCode":200,"message":"ok","data":{"userId":7,"name":"Asha","email":"asha@example.com","verified":true}}"#;
        let envelope: Envelope<UserDto> = serde_json::from_str(body).unwrap();
        let user = envelope.data.unwrap();
        assert_eq!(user.user_id, UserId::new(7));
        assert!(user.verified);
    }

    #[test]
    fn test_event_dto_converts_to_domain() {
        let body = r#"{
            "eventId": 12,
            "eventName": "Tech Conference 2026",
            "description": "Talks",
            "venue": "Convention Center",
            "eventDate": "2026-03-15",
            "eventTime": "09:00:00",
            "ticketPrice": 500.0,
            "eventCategory": "CONFERENCE",
            "privacySettings": "PUBLIC"
        }"#;
        let dto: EventDto = serde_json::from_str(body).unwrap();
        let event: Event = dto.into();
        assert_eq!(event.event_id, EventId::new(12));
        assert_eq!(event.time_display(), "09:00");
        assert_eq!(event.ticket_price, Money::from_rupees(500));
    }

    #[test]
    fn test_wire_time_accepts_both_precisions() {
        assert_eq!(parse_wire_time("18:00").to_string(), "18:00:00");
        assert_eq!(parse_wire_time("18:00:00").to_string(), "18:00:00");
    }

    #[test]
    fn test_order_dto_tolerates_sparse_payloads() {
        let body = r#"{"orderId":"ord_1","items":[],"attendees":[]}"#;
        let dto: OrderDto = serde_json::from_str(body).unwrap();
        let order = dto.into_order(UserId::new(3));
        assert_eq!(order.order_id.as_str(), "ord_1");
        assert_eq!(order.total_amount, Money::ZERO);
        assert_eq!(order.status, OrderStatus::Confirmed);
    }

    #[test]
    fn test_order_request_serializes_camel_case() {
        let order = crate::api::demo::demo_orders(UserId::new(1), Utc::now())
            .into_iter()
            .next()
            .unwrap();
        let request = OrderRequest::from_order(&order);
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("paymentMethod").is_some());
        assert!(json.get("totalAmount").is_some());
        assert_eq!(json["status"], "confirmed");
    }
}
