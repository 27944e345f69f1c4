//! HTTP plumbing for the EventHub API client.
//!
//! One `reqwest::Client` shared behind an `Arc`; every call decodes the
//! backend's `{ statusCode, message, data }` envelope. The public event
//! list is cached with `moka` (60 second TTL).

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::EventHubApiConfig;
use crate::models::Event;

use super::ApiError;
use super::types::Envelope;

/// How long the public event list stays fresh.
const EVENT_CACHE_TTL: Duration = Duration::from_secs(60);

/// Client for the remote EventHub JSON API.
///
/// Cheaply cloneable; all clones share the same connection pool and cache.
#[derive(Clone)]
pub struct EventHubClient {
    pub(super) inner: Arc<EventHubClientInner>,
}

pub(super) struct EventHubClientInner {
    pub(super) client: reqwest::Client,
    pub(super) base_url: String,
    pub(super) event_cache: Cache<&'static str, Arc<Vec<Event>>>,
}

impl EventHubClient {
    /// Create a new API client.
    #[must_use]
    pub fn new(config: &EventHubApiConfig) -> Self {
        let event_cache = Cache::builder()
            .max_capacity(4)
            .time_to_live(EVENT_CACHE_TTL)
            .build();

        Self {
            inner: Arc::new(EventHubClientInner {
                client: reqwest::Client::new(),
                base_url: config.base_url.clone(),
                event_cache,
            }),
        }
    }

    /// Ping the remote API; used by the readiness probe.
    ///
    /// # Errors
    ///
    /// Returns an error when the remote API is unreachable.
    pub async fn ping(&self) -> Result<(), ApiError> {
        let url = self.url("/events/public");
        self.inner.client.get(url).send().await?;
        Ok(())
    }

    pub(super) fn url(&self, path: &str) -> String {
        format!("{}{path}", self.inner.base_url)
    }

    /// GET `path` with query parameters and decode the envelope's data.
    pub(super) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let request = self.inner.client.get(self.url(path)).query(query);
        self.execute(path, request).await
    }

    /// GET with a per-request deadline (only the my-events listing uses one).
    pub(super) async fn get_with_timeout<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        timeout: Duration,
    ) -> Result<T, ApiError> {
        let request = self
            .inner
            .client
            .get(self.url(path))
            .query(query)
            .timeout(timeout);
        self.execute(path, request).await.map_err(|err| {
            if let ApiError::Timeout(_) = err {
                ApiError::Timeout(timeout.as_secs())
            } else {
                err
            }
        })
    }

    /// POST a JSON body and decode the envelope's data.
    pub(super) async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let request = self.inner.client.post(self.url(path)).json(body);
        self.execute(path, request).await
    }

    /// POST a JSON body with additional query parameters.
    pub(super) async fn post_with_query<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        body: &B,
    ) -> Result<T, ApiError> {
        let request = self
            .inner
            .client
            .post(self.url(path))
            .query(query)
            .json(body);
        self.execute(path, request).await
    }

    /// POST with no body, parameters in the query string (remote API
    /// convention for OTP and profile operations).
    pub(super) async fn post_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let request = self.inner.client.post(self.url(path)).query(query);
        self.execute(path, request).await
    }

    /// PUT with parameters in the query string and an optional JSON body.
    pub(super) async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> Result<T, ApiError> {
        let mut request = self.inner.client.put(self.url(path)).query(query);
        if let Some(body) = body {
            request = request.json(body);
        }
        self.execute(path, request).await
    }

    /// DELETE with parameters in the query string.
    pub(super) async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let request = self.inner.client.delete(self.url(path)).query(query);
        self.execute(path, request).await
    }

    /// Send a request and decode the response envelope.
    async fn execute<T: DeserializeOwned>(
        &self,
        path: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = request.send().await?;
        let status = response.status();

        // Body as text first for better error diagnostics
        let body = response.text().await?;

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(path.to_string()));
        }

        if !status.is_success() {
            // Prefer the envelope message when the error body carries one
            let message = serde_json::from_str::<Envelope<serde_json::Value>>(&body)
                .map(|envelope| envelope.message)
                .ok()
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| body.chars().take(200).collect());

            tracing::warn!(
                path,
                status = %status,
                message = %message,
                "EventHub API returned non-success status"
            );
            return Err(ApiError::Status {
                code: status.as_u16(),
                message,
            });
        }

        let envelope: Envelope<T> = serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                path,
                error = %e,
                body = %body.chars().take(500).collect::<String>(),
                "Failed to parse EventHub API response"
            );
            ApiError::Parse(e)
        })?;

        envelope
            .data
            .ok_or_else(|| ApiError::EmptyData(envelope.message))
    }

    pub(super) fn event_cache(&self) -> &Cache<&'static str, Arc<Vec<Event>>> {
        &self.inner.event_cache
    }
}
