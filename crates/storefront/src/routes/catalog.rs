//! Event catalog route handlers.
//!
//! The full public catalog is fetched once per cache window; filtering
//! and sorting happen locally so typing in the search box never hits
//! the remote API.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
};
use chrono::NaiveDate;
use serde::Deserialize;
use tower_sessions::Session;

use eventhub_core::{EventCategory, EventId};

use crate::api::types::QuestionDto;
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::OptionalAuth;
use crate::models::{CurrentUser, Event};
use crate::state::AppState;
use crate::stores::load_cart;

/// Sort orders offered on the catalog page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CatalogSort {
    /// Soonest event first.
    #[default]
    Date,
    PriceAsc,
    PriceDesc,
    Name,
}

/// Catalog filter and sort parameters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogQuery {
    /// Free-text match against name, description and venue.
    pub search: Option<String>,
    /// Venue substring match.
    pub venue: Option<String>,
    /// Exact event date.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub category: Option<EventCategory>,
    #[serde(default)]
    pub sort: CatalogSort,
}

/// Browsers submit untouched form inputs as empty strings; treat those
/// as unset rather than failing the whole query.
fn empty_as_none<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let value = Option::<String>::deserialize(deserializer)?;
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s.parse::<T>().map(Some).map_err(serde::de::Error::custom),
    }
}

impl CatalogQuery {
    fn is_filtered(&self) -> bool {
        self.search.is_some()
            || self.venue.is_some()
            || self.date.is_some()
            || self.category.is_some()
    }
}

/// Apply the catalog filters to the full event list.
///
/// All matches are case-insensitive. Empty or whitespace-only filter
/// values are ignored.
pub fn filter_events(events: &[Event], query: &CatalogQuery) -> Vec<Event> {
    let search = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);
    let venue = query
        .venue
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);

    events
        .iter()
        .filter(|event| {
            if let Some(term) = &search {
                let haystack = format!(
                    "{} {} {}",
                    event.event_name, event.description, event.venue
                )
                .to_lowercase();
                if !haystack.contains(term) {
                    return false;
                }
            }
            if let Some(venue) = &venue {
                if !event.venue.to_lowercase().contains(venue) {
                    return false;
                }
            }
            if let Some(date) = query.date {
                if event.event_date != date {
                    return false;
                }
            }
            if let Some(category) = query.category {
                if event.category != Some(category) {
                    return false;
                }
            }
            true
        })
        .cloned()
        .collect()
}

/// Sort the filtered list in place.
pub fn sort_events(events: &mut [Event], sort: CatalogSort) {
    match sort {
        CatalogSort::Date => {
            events.sort_by_key(|e| (e.event_date, e.event_time));
        }
        CatalogSort::PriceAsc => events.sort_by_key(|e| e.ticket_price),
        CatalogSort::PriceDesc => {
            events.sort_by(|a, b| b.ticket_price.cmp(&a.ticket_price));
        }
        CatalogSort::Name => {
            events.sort_by(|a, b| a.event_name.to_lowercase().cmp(&b.event_name.to_lowercase()));
        }
    }
}

// =============================================================================
// Templates
// =============================================================================

/// Catalog page template.
#[derive(Template, WebTemplate)]
#[template(path = "catalog/index.html")]
pub struct CatalogTemplate {
    pub events: Vec<Event>,
    pub categories: &'static [EventCategory],
    pub query: CatalogQuery,
    pub filtered: bool,
    pub user: Option<CurrentUser>,
}

/// Event detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "catalog/show.html")]
pub struct EventShowTemplate {
    pub event: Event,
    pub questions: Vec<QuestionDto>,
    pub in_cart: bool,
    pub user: Option<CurrentUser>,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the event catalog with the active filters applied.
pub async fn index(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    Query(query): Query<CatalogQuery>,
) -> Result<impl IntoResponse> {
    let all = state.api().public_events().await?;
    let mut events = filter_events(&all, &query);
    sort_events(&mut events, query.sort);

    Ok(CatalogTemplate {
        filtered: query.is_filtered(),
        events,
        categories: &EventCategory::ALL,
        query,
        user,
    })
}

/// Display one event with its Q&A board.
pub async fn show(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    session: Session,
    Path(event_id): Path<EventId>,
) -> Result<impl IntoResponse> {
    let event = state.api().event_details(event_id).await.map_err(|err| {
        if matches!(err, crate::api::ApiError::NotFound(_)) {
            AppError::NotFound(format!("event {event_id}"))
        } else {
            AppError::from(err)
        }
    })?;

    // The Q&A board is decorative on the detail page; an unreachable
    // board should not take the event down with it.
    let questions = state
        .api()
        .view_questions(event_id)
        .await
        .unwrap_or_default();

    let cart = load_cart(&session).await;
    Ok(EventShowTemplate {
        in_cart: cart.contains(event_id),
        event,
        questions,
        user,
    })
}

/// Question form data.
#[derive(Debug, Deserialize)]
pub struct AskQuestionForm {
    pub question: String,
}

/// Post a question to an event's Q&A board.
pub async fn ask_question(
    State(state): State<AppState>,
    crate::middleware::RequireAuth(user): crate::middleware::RequireAuth,
    Path(event_id): Path<EventId>,
    axum::Form(form): axum::Form<AskQuestionForm>,
) -> Result<impl IntoResponse> {
    if form.question.trim().is_empty() {
        return Err(AppError::Validation("Question cannot be empty".to_string()));
    }
    state
        .api()
        .ask_question(event_id, user.user_id, form.question.trim())
        .await?;
    Ok(axum::response::Redirect::to(&format!("/events/{event_id}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::event::test_support::event;

    fn sample_events() -> Vec<Event> {
        let mut tech = event(1, "Tech Conference 2026", "Convention Center", 500);
        tech.description = "Talks and workshops".to_string();
        let mut music = event(2, "Music Festival", "Central Park", 300);
        music.category = Some(EventCategory::Concert);
        music.event_date = NaiveDate::from_ymd_opt(2026, 4, 20).unwrap();
        let mut charity = event(3, "Charity Run", "Riverside Park", 100);
        charity.category = Some(EventCategory::Charity);
        vec![tech, music, charity]
    }

    #[test]
    fn test_search_matches_name_description_and_venue() {
        let events = sample_events();
        let query = CatalogQuery {
            search: Some("workshops".to_string()),
            ..Default::default()
        };
        let hits = filter_events(&events, &query);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].event_id, EventId::new(1));

        let query = CatalogQuery {
            search: Some("PARK".to_string()),
            ..Default::default()
        };
        assert_eq!(filter_events(&events, &query).len(), 2);
    }

    #[test]
    fn test_venue_filter_is_substring_match() {
        let events = sample_events();
        let query = CatalogQuery {
            venue: Some("park".to_string()),
            ..Default::default()
        };
        assert_eq!(filter_events(&events, &query).len(), 2);
    }

    #[test]
    fn test_date_filter_is_exact() {
        let events = sample_events();
        let query = CatalogQuery {
            date: NaiveDate::from_ymd_opt(2026, 4, 20),
            ..Default::default()
        };
        let hits = filter_events(&events, &query);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].event_id, EventId::new(2));
    }

    #[test]
    fn test_category_filter() {
        let events = sample_events();
        let query = CatalogQuery {
            category: Some(EventCategory::Charity),
            ..Default::default()
        };
        let hits = filter_events(&events, &query);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].event_id, EventId::new(3));
    }

    #[test]
    fn test_blank_filters_are_ignored() {
        let events = sample_events();
        let query = CatalogQuery {
            search: Some("   ".to_string()),
            venue: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(filter_events(&events, &query).len(), 3);
    }

    #[test]
    fn test_sort_orders() {
        let mut events = sample_events();
        sort_events(&mut events, CatalogSort::PriceAsc);
        assert_eq!(events[0].event_id, EventId::new(3));
        sort_events(&mut events, CatalogSort::PriceDesc);
        assert_eq!(events[0].event_id, EventId::new(1));
        sort_events(&mut events, CatalogSort::Name);
        assert_eq!(events[0].event_id, EventId::new(3));
        sort_events(&mut events, CatalogSort::Date);
        assert_eq!(events.last().unwrap().event_id, EventId::new(2));
    }
}
