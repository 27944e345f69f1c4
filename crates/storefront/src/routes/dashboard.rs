//! Event management dashboard route handlers.
//!
//! Creators list, create, edit and delete their own events, see who
//! booked them, and answer questions. The my-events fetch carries its
//! own timeout because the backend's cold starts are long enough to
//! hang the page otherwise.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use tracing::warn;

use eventhub_core::{EventCategory, EventId, PrivacySetting, QuestionId};

use crate::api::demo;
use crate::api::types::{EventRequest, QuestionDto};
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::RequireAuth;
use crate::models::{Attendee, CurrentUser, Event};
use crate::state::AppState;

// =============================================================================
// Forms
// =============================================================================

/// Event create/edit form data.
#[derive(Debug, Deserialize)]
pub struct EventForm {
    pub event_name: String,
    pub description: String,
    pub venue: String,
    pub event_date: NaiveDate,
    /// `HH:MM` from the time input, optionally with seconds.
    pub event_time: String,
    pub ticket_price: f64,
    pub category: EventCategory,
    #[serde(default)]
    pub privacy: PrivacySetting,
    pub image_url: Option<String>,
}

impl EventForm {
    fn parse_time(&self) -> Result<NaiveTime> {
        NaiveTime::parse_from_str(&self.event_time, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(&self.event_time, "%H:%M:%S"))
            .map_err(|_| AppError::Validation("Invalid event time".to_string()))
    }

    fn validate(&self) -> Result<()> {
        if self.event_name.trim().is_empty() {
            return Err(AppError::Validation("Event name is required".to_string()));
        }
        if self.venue.trim().is_empty() {
            return Err(AppError::Validation("Venue is required".to_string()));
        }
        if self.ticket_price < 0.0 {
            return Err(AppError::Validation(
                "Ticket price cannot be negative".to_string(),
            ));
        }
        self.parse_time()?;
        Ok(())
    }

    fn into_request(self) -> Result<EventRequest> {
        let time = self.parse_time()?;
        Ok(EventRequest {
            event_name: self.event_name.trim().to_string(),
            description: self.description.trim().to_string(),
            venue: self.venue.trim().to_string(),
            event_date: self.event_date,
            event_time: time.format("%H:%M").to_string(),
            ticket_price: self.ticket_price,
            event_category: self.category,
            privacy_settings: self.privacy,
            event_image_url: self
                .image_url
                .map(|url| url.trim().to_string())
                .filter(|url| !url.is_empty()),
        })
    }
}

/// Answer form data.
#[derive(Debug, Deserialize)]
pub struct AnswerForm {
    pub question_id: QuestionId,
    pub answer: String,
}

/// Query parameters for error/success display.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
    pub success: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Dashboard page template: the user's events.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard/index.html")]
pub struct DashboardTemplate {
    pub events: Vec<Event>,
    pub error: Option<String>,
    pub success: Option<String>,
    pub user: Option<CurrentUser>,
}

/// Event create/edit form template.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard/event_form.html")]
pub struct EventFormTemplate {
    /// Present when editing, absent when creating.
    pub event: Option<Event>,
    pub categories: &'static [EventCategory],
    pub error: Option<String>,
    pub user: Option<CurrentUser>,
}

/// Per-event attendee list template.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard/attendees.html")]
pub struct AttendeesListTemplate {
    pub event: Event,
    pub attendees: Vec<Attendee>,
    /// Set when the list is fabricated sample data.
    pub sample_data: bool,
    pub user: Option<CurrentUser>,
}

/// Per-event Q&A management template.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard/questions.html")]
pub struct QuestionsTemplate {
    pub event: Event,
    pub questions: Vec<QuestionDto>,
    pub user: Option<CurrentUser>,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the creator's events.
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Query(query): Query<MessageQuery>,
) -> Result<impl IntoResponse> {
    let events = state.api().my_events(user.user_id).await?;
    Ok(DashboardTemplate {
        events,
        error: query.error,
        success: query.success,
        user: Some(user),
    })
}

/// Display the blank event form.
pub async fn new_event(
    RequireAuth(user): RequireAuth,
    Query(query): Query<MessageQuery>,
) -> impl IntoResponse {
    EventFormTemplate {
        event: None,
        categories: &EventCategory::ALL,
        error: query.error,
        user: Some(user),
    }
}

/// Handle event creation.
pub async fn create_event(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Form(form): Form<EventForm>,
) -> Result<Response> {
    form.validate()?;
    state
        .api()
        .create_event(&form.into_request()?, user.user_id)
        .await?;
    Ok(Redirect::to("/dashboard?success=created").into_response())
}

/// Display the edit form pre-filled with the event.
pub async fn edit_event(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(event_id): Path<EventId>,
    Query(query): Query<MessageQuery>,
) -> Result<impl IntoResponse> {
    let event = state.api().event_details(event_id).await?;
    Ok(EventFormTemplate {
        event: Some(event),
        categories: &EventCategory::ALL,
        error: query.error,
        user: Some(user),
    })
}

/// Handle event update.
pub async fn update_event(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(event_id): Path<EventId>,
    Form(form): Form<EventForm>,
) -> Result<Response> {
    form.validate()?;
    state
        .api()
        .update_event(event_id, user.user_id, &form.into_request()?)
        .await?;
    Ok(Redirect::to("/dashboard?success=updated").into_response())
}

/// Handle event deletion.
pub async fn delete_event(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(event_id): Path<EventId>,
) -> Result<Response> {
    state.api().delete_event(event_id, user.user_id).await?;
    Ok(Redirect::to("/dashboard?success=deleted").into_response())
}

/// Display who booked an event.
///
/// Falls back to sample rows when the bookings endpoint is down, so the
/// page stays demoable.
pub async fn attendees(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(event_id): Path<EventId>,
) -> Result<impl IntoResponse> {
    let event = state.api().event_details(event_id).await?;

    let (attendees, sample_data) = match state.api().event_bookings(event_id, user.user_id).await
    {
        Ok(bookings) => {
            let attendees = bookings
                .into_iter()
                .filter_map(|booking| {
                    let booked_by = booking.user?;
                    let email = eventhub_core::Email::parse(&booked_by.email?).ok()?;
                    let name = booked_by.name.unwrap_or_default();
                    let (first, last) = name.split_once(' ').unwrap_or((name.as_str(), ""));
                    Some(Attendee {
                        first_name: first.to_string(),
                        last_name: last.to_string(),
                        email,
                        event_id,
                        event_name: event.event_name.clone(),
                    })
                })
                .collect();
            (attendees, false)
        }
        Err(err) => {
            warn!(error = %err, "bookings unavailable, showing sample attendees");
            (demo::demo_attendees(event_id, &event.event_name), true)
        }
    };

    Ok(AttendeesListTemplate {
        event,
        attendees,
        sample_data,
        user: Some(user),
    })
}

/// Display an event's Q&A board for the creator.
pub async fn questions(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(event_id): Path<EventId>,
) -> Result<impl IntoResponse> {
    let event = state.api().event_details(event_id).await?;
    let questions = state.api().view_questions(event_id).await?;
    Ok(QuestionsTemplate {
        event,
        questions,
        user: Some(user),
    })
}

/// Handle an answer submission.
pub async fn answer_question(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(event_id): Path<EventId>,
    Form(form): Form<AnswerForm>,
) -> Result<Response> {
    if form.answer.trim().is_empty() {
        return Err(AppError::Validation("Answer cannot be empty".to_string()));
    }
    state
        .api()
        .answer_question(form.question_id, user.user_id, form.answer.trim())
        .await?;
    Ok(Redirect::to(&format!("/dashboard/events/{event_id}/questions")).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> EventForm {
        EventForm {
            event_name: "Tech Conference".to_string(),
            description: "Talks".to_string(),
            venue: "Convention Center".to_string(),
            event_date: NaiveDate::from_ymd_opt(2026, 3, 15).unwrap(),
            event_time: "09:00".to_string(),
            ticket_price: 500.0,
            category: EventCategory::Conference,
            privacy: PrivacySetting::Public,
            image_url: Some("  ".to_string()),
        }
    }

    #[test]
    fn test_event_form_normalizes_time_and_blank_image() {
        let request = form().into_request().unwrap();
        assert_eq!(request.event_time, "09:00");
        assert!(request.event_image_url.is_none());
    }

    #[test]
    fn test_event_form_rejects_bad_time_and_negative_price() {
        let mut bad_time = form();
        bad_time.event_time = "9 am".to_string();
        assert!(bad_time.validate().is_err());

        let mut negative = form();
        negative.ticket_price = -1.0;
        assert!(negative.validate().is_err());
    }
}
