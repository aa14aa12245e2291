//! Assistant endpoints proxied by the helpdesk backend.

use async_trait::async_trait;
use client::tickets::{self, NewTicket};
use client::{ApiClient, ApiError, Session};
use models::{Priority, Role, Ticket};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, warn};

/// Anything that can answer a chat message.
#[async_trait]
pub trait Assistant: Send + Sync {
    async fn reply(&self, message: &str) -> Result<String, ApiError>;
}

/// A canned reply proposed for a ticket, with the reason it fits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub response: String,
    #[serde(default)]
    pub rationale: String,
}

/// Ticket fields extracted from a spoken description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketDraft {
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
}

impl From<TicketDraft> for NewTicket {
    fn from(draft: TicketDraft) -> Self {
        NewTicket {
            priority: draft.priority,
            ..NewTicket::new(draft.title, draft.description)
        }
    }
}

#[derive(Deserialize)]
struct ChatResponse {
    response: String,
}

#[derive(Deserialize)]
struct SuggestionsResponse {
    #[serde(default)]
    suggestions: Vec<Suggestion>,
}

/// Assistant backed by the helpdesk API. Without a session it uses the
/// public chat mode.
#[derive(Debug, Clone)]
pub struct BackendAssistant {
    api: ApiClient,
    session: Option<Session>,
}

impl BackendAssistant {
    pub fn new(api: ApiClient, session: Option<Session>) -> Self {
        Self { api, session }
    }

    pub async fn chat(&self, message: &str) -> Result<String, ApiError> {
        let body = match &self.session {
            Some(s) => json!({
                "message": message,
                "userId": s.user().id,
                "userRole": s.role(),
            }),
            None => json!({ "message": message, "isPublic": true }),
        };
        let req = self
            .api
            .request(Method::POST, "/assistant/chat", self.session.as_ref())
            .json(&body);
        let resp: ChatResponse = self.api.send(req).await?;
        Ok(resp.response)
    }

    /// Suggested replies for `ticket_id`, phrased for `role`.
    pub async fn suggestions(&self, ticket_id: &str, role: Role) -> Result<Vec<Suggestion>, ApiError> {
        let session = self.session.as_ref().ok_or(ApiError::Unauthorized)?;
        let req = self
            .api
            .request(
                Method::GET,
                &format!("/tickets/{ticket_id}/suggestions"),
                Some(session),
            )
            .query(&[("role", role.to_string())]);
        let resp: SuggestionsResponse = self.api.send(req).await?;
        Ok(resp.suggestions)
    }

    /// Turns a speech transcript into a ticket draft.
    pub async fn voice_ticket(&self, transcript: &str) -> Result<TicketDraft, ApiError> {
        let transcript = transcript.trim();
        if transcript.is_empty() {
            return Err(ApiError::Validation("Please speak your issue first".into()));
        }
        let session = self.session.as_ref().ok_or(ApiError::Unauthorized)?;
        let req = self
            .api
            .request(Method::POST, "/assistant/voice-ticket", Some(session))
            .json(&json!({ "speech": transcript }));
        self.api.send(req).await
    }

    /// Drafts a ticket from `transcript` and files it.
    pub async fn file_voice_ticket(&self, transcript: &str) -> Result<Ticket, ApiError> {
        let draft = self.voice_ticket(transcript).await?;
        let session = self.session.as_ref().ok_or(ApiError::Unauthorized)?;
        let ticket = tickets::create_ticket(&self.api, session, draft.into())
            .await
            .inspect_err(|e| warn!(error = %e, "voice ticket draft was not accepted"))?;
        info!(ticket = %ticket.id, "voice ticket filed");
        Ok(ticket)
    }
}

#[async_trait]
impl Assistant for BackendAssistant {
    async fn reply(&self, message: &str) -> Result<String, ApiError> {
        self.chat(message).await
    }
}
