use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, multipart::Part};
use serde::de::DeserializeOwned;
use std::path::Path;
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::session::Session;

const FALLBACK_MESSAGE: &str = "Something went wrong";

/// Thin JSON client bound to one base URL.
///
/// Cloning is cheap; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, ApiError> {
        let http = util::http::build_client("helpdesk", timeout_secs)?;
        Ok(Self::with_client(http, base_url))
    }

    pub fn with_client(http: Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn http(&self) -> &Client {
        &self.http
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Starts a request; attaches the session's bearer token when given.
    pub fn request(&self, method: Method, path: &str, session: Option<&Session>) -> RequestBuilder {
        let req = self.http.request(method, self.url(path));
        match session {
            Some(session) => req.bearer_auth(session.token()),
            None => req,
        }
    }

    /// Sends `req` and decodes a JSON body of type `T`.
    pub async fn send<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, ApiError> {
        let request = req.build()?;
        let method = request.method().clone();
        let url = request.url().clone();
        let authenticated = request.headers().contains_key(AUTHORIZATION);
        debug!(%method, url = %url.path(), "sending request");

        let resp = self.http.execute(request).await.map_err(|e| {
            warn!(%method, url = %url.path(), error = %e, "request failed");
            ApiError::from(e)
        })?;
        decode(resp, authenticated).await
    }
}

/// Maps a response onto the error taxonomy, or decodes its body.
///
/// 401/403 only mean a rejected token when a token was sent; for anonymous
/// calls such as login they carry the server's message like any other
/// failure.
pub(crate) async fn decode<T: DeserializeOwned>(
    resp: Response,
    authenticated: bool,
) -> Result<T, ApiError> {
    let status = resp.status();
    let body = resp.text().await?;

    let rejected = status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN;
    if rejected && authenticated {
        return Err(ApiError::Unauthorized);
    }
    if !status.is_success() {
        let message = error_message(&body);
        warn!(status = status.as_u16(), %message, "server rejected request");
        return Err(ApiError::Status {
            status: status.as_u16(),
            message,
        });
    }

    let body = if body.trim().is_empty() { "null" } else { body.as_str() };
    serde_json::from_str(body).map_err(|e| ApiError::Malformed(e.to_string()))
}

/// Extracts a human-readable message from an error body: `message`, then
/// `error`, then a generic fallback.
pub fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            ["message", "error"]
                .iter()
                .find_map(|key| v.get(*key).and_then(|m| m.as_str()).map(str::to_string))
        })
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| FALLBACK_MESSAGE.to_string())
}

/// Reads a file into a multipart part, named after the file and typed by
/// its extension.
pub(crate) async fn file_part(path: &Path) -> Result<Part, ApiError> {
    let bytes = tokio::fs::read(path).await?;
    let name = util::paths::file_name_or(path, "upload");
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    Ok(Part::bytes(bytes).file_name(name).mime_str(mime.as_ref())?)
}
