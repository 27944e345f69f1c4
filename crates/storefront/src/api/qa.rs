//! Event Q&A endpoints.

use tracing::instrument;

use eventhub_core::{EventId, QuestionId, UserId};

use super::types::QuestionDto;
use super::{ApiError, EventHubClient};

impl EventHubClient {
    /// Questions (and any answers) on an event's board.
    ///
    /// # Errors
    ///
    /// Returns an error when the remote call fails.
    #[instrument(skip(self))]
    pub async fn view_questions(&self, event_id: EventId) -> Result<Vec<QuestionDto>, ApiError> {
        self.get(&format!("/qa/view/{event_id}"), &[]).await
    }

    /// Ask a question on an event's board.
    ///
    /// # Errors
    ///
    /// Returns an error when the remote call fails.
    #[instrument(skip(self, question))]
    pub async fn ask_question(
        &self,
        event_id: EventId,
        user_id: UserId,
        question: &str,
    ) -> Result<QuestionDto, ApiError> {
        self.post_with_query(
            "/qa/ask",
            &[
                ("eventId", event_id.to_string()),
                ("userId", user_id.to_string()),
            ],
            &serde_json::json!({ "question": question }),
        )
        .await
    }

    /// Answer a question as the event's creator.
    ///
    /// # Errors
    ///
    /// Returns an error when the caller is not the creator or the call
    /// fails.
    #[instrument(skip(self, answer))]
    pub async fn answer_question(
        &self,
        question_id: QuestionId,
        user_id: UserId,
        answer: &str,
    ) -> Result<QuestionDto, ApiError> {
        self.post_with_query(
            "/qa/answer",
            &[
                ("qaId", question_id.to_string()),
                ("userId", user_id.to_string()),
            ],
            &serde_json::json!({ "answer": answer }),
        )
        .await
    }
}
