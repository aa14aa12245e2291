use client::{ApiClient, ApiError};
use models::{Role, Ticket};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Language the summaries are written in; translating into it is a no-op.
pub const SOURCE_LANGUAGE: &str = "en";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SummarizeRequest<'a> {
    ticket_id: &'a str,
    ticket_data: &'a Ticket,
}

#[derive(Deserialize)]
struct SummarizeResponse {
    summary: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TranslateRequest<'a> {
    text: &'a str,
    target_language: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TranslateResponse {
    translated_text: String,
}

/// Client for the standalone AI service (`AI_BASE_URL`).
#[derive(Debug, Clone)]
pub struct AiService {
    api: ApiClient,
}

impl AiService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Asks the service for a short prose summary of `ticket` as `viewer`
    /// may see it. Internal comments and mood never reach the service for
    /// non-staff.
    pub async fn summarize(&self, ticket: &Ticket, viewer: Role) -> Result<String, ApiError> {
        debug!(ticket = %ticket.id, %viewer, "requesting summary");
        let visible = ticket.view_for(viewer);
        let req = self
            .api
            .request(Method::POST, "/api/assistant/summarize-ticket", None)
            .json(&SummarizeRequest {
                ticket_id: &visible.id,
                ticket_data: &visible,
            });
        let resp: SummarizeResponse = self.api.send(req).await?;
        Ok(resp.summary)
    }

    /// Language code to display name, sorted by code.
    pub async fn languages(&self) -> Result<BTreeMap<String, String>, ApiError> {
        self.api
            .send(self.api.request(Method::GET, "/api/translation/languages", None))
            .await
    }

    pub async fn translate(&self, text: &str, target: &str) -> Result<String, ApiError> {
        let target = target.trim();
        if target.eq_ignore_ascii_case(SOURCE_LANGUAGE) {
            return Ok(text.to_string());
        }
        let req = self
            .api
            .request(Method::POST, "/api/translation/translate", None)
            .json(&TranslateRequest {
                text,
                target_language: target,
            });
        let resp: TranslateResponse = self.api.send(req).await?;
        Ok(resp.translated_text)
    }
}
