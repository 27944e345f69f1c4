//! Event listing and organizer CRUD endpoints.

use std::sync::Arc;
use std::time::Duration;

use tracing::instrument;

use eventhub_core::{EventId, UserId};

use crate::models::Event;

use super::types::{BookingDto, EventDto, EventRequest};
use super::{ApiError, EventHubClient};

/// Deadline for the my-events listing; the only request with an explicit
/// timeout (the organizer dashboard must not hang on a slow backend).
const MY_EVENTS_TIMEOUT: Duration = Duration::from_secs(10);

const PUBLIC_EVENTS_CACHE_KEY: &str = "public_events";

impl EventHubClient {
    /// Fetch the public event catalog, served from cache when fresh.
    ///
    /// All catalog filtering and sorting happens locally over this full
    /// set; filter changes never cause another round-trip.
    ///
    /// # Errors
    ///
    /// Returns an error when the catalog cannot be fetched and no cached
    /// copy exists.
    #[instrument(skip(self))]
    pub async fn public_events(&self) -> Result<Arc<Vec<Event>>, ApiError> {
        if let Some(events) = self.event_cache().get(PUBLIC_EVENTS_CACHE_KEY).await {
            return Ok(events);
        }

        let dtos: Vec<EventDto> = self.get("/events/public", &[]).await?;
        let events: Arc<Vec<Event>> = Arc::new(dtos.into_iter().map(Event::from).collect());

        self.event_cache()
            .insert(PUBLIC_EVENTS_CACHE_KEY, Arc::clone(&events))
            .await;

        Ok(events)
    }

    /// Fetch a single event's details.
    ///
    /// # Errors
    ///
    /// Returns an error when the event does not exist or the call fails.
    #[instrument(skip(self))]
    pub async fn event_details(&self, event_id: EventId) -> Result<Event, ApiError> {
        let dto: EventDto = self
            .get("/events/details", &[("eventId", event_id.to_string())])
            .await?;
        Ok(dto.into())
    }

    /// Events created by the given user, capped at 10 seconds.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Timeout`] when the deadline elapses, or any
    /// other transport/status error.
    #[instrument(skip(self))]
    pub async fn my_events(&self, user_id: UserId) -> Result<Vec<Event>, ApiError> {
        let dtos: Vec<EventDto> = self
            .get_with_timeout(
                "/events/my-events",
                &[("userId", user_id.to_string())],
                MY_EVENTS_TIMEOUT,
            )
            .await?;
        Ok(dtos.into_iter().map(Event::from).collect())
    }

    /// Create an event owned by `user_id`.
    ///
    /// # Errors
    ///
    /// Returns an error when the remote call fails.
    #[instrument(skip(self, request), fields(event_name = %request.event_name))]
    pub async fn create_event(
        &self,
        request: &EventRequest,
        user_id: UserId,
    ) -> Result<Event, ApiError> {
        let dto: EventDto = self
            .post_with_query(
                "/events/create",
                &[("userId", user_id.to_string())],
                request,
            )
            .await?;
        // The catalog changed; drop the cached copy early
        self.event_cache().invalidate_all();
        Ok(dto.into())
    }

    /// Update an event; only its creator may do so.
    ///
    /// # Errors
    ///
    /// Returns an error when the remote call fails.
    #[instrument(skip(self, request))]
    pub async fn update_event(
        &self,
        event_id: EventId,
        creator_id: UserId,
        request: &EventRequest,
    ) -> Result<Event, ApiError> {
        let dto: EventDto = self
            .put(
                "/events/update",
                &[
                    ("eventId", event_id.to_string()),
                    ("creatorId", creator_id.to_string()),
                ],
                Some(request),
            )
            .await?;
        self.event_cache().invalidate_all();
        Ok(dto.into())
    }

    /// Delete an event; only its creator may do so.
    ///
    /// # Errors
    ///
    /// Returns an error when the remote call fails.
    #[instrument(skip(self))]
    pub async fn delete_event(&self, event_id: EventId, user_id: UserId) -> Result<(), ApiError> {
        let _: String = self
            .delete(
                "/events/delete",
                &[
                    ("eventId", event_id.to_string()),
                    ("userId", user_id.to_string()),
                ],
            )
            .await?;
        self.event_cache().invalidate_all();
        Ok(())
    }

    /// Bookings (the attendee list) for an event, visible to its creator.
    ///
    /// # Errors
    ///
    /// Returns an error when the remote call fails; the dashboard degrades
    /// to a fallback dataset in that case.
    #[instrument(skip(self))]
    pub async fn event_bookings(
        &self,
        event_id: EventId,
        creator_id: UserId,
    ) -> Result<Vec<BookingDto>, ApiError> {
        self.get(
            "/events/bookings",
            &[
                ("eventId", event_id.to_string()),
                ("creatorId", creator_id.to_string()),
            ],
        )
        .await
    }
}
