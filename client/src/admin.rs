//! Admin dashboard reads. Shapes differ between backend versions, so the
//! bodies are returned as JSON values for the caller to render.

use reqwest::Method;
use serde_json::Value;

use crate::error::ApiError;
use crate::http::ApiClient;
use crate::query::{TicketQuery, UserQuery};
use crate::session::Session;

pub async fn dashboard_stats(api: &ApiClient, session: &Session) -> Result<Value, ApiError> {
    api.send(api.request(Method::GET, "/admin/dashboard", Some(session)))
        .await
}

pub async fn admin_users(
    api: &ApiClient,
    session: &Session,
    query: &UserQuery,
) -> Result<Value, ApiError> {
    let req = api
        .request(Method::GET, "/admin/users", Some(session))
        .query(&query.pairs());
    api.send(req).await
}

pub async fn admin_tickets(
    api: &ApiClient,
    session: &Session,
    query: &TicketQuery,
) -> Result<Value, ApiError> {
    let req = api
        .request(Method::GET, "/admin/tickets", Some(session))
        .query(&query.pairs());
    api.send(req).await
}
