use models::{Category, Comment, DepartmentStats, Priority, Ticket, TicketPage, TicketUpdate};
use reqwest::Method;
use reqwest::multipart::Form;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::path::PathBuf;
use tracing::{debug, info};
use validator::Validate;

use crate::error::ApiError;
use crate::http::{ApiClient, file_part};
use crate::query::TicketQuery;
use crate::session::Session;

pub const MAX_ATTACHMENTS: usize = 5;

#[derive(Debug, Clone, Validate)]
pub struct NewTicket {
    #[validate(custom(function = "common::not_blank", message = "Title is required"))]
    pub title: String,
    #[validate(custom(function = "common::not_blank", message = "Description is required"))]
    pub description: String,
    pub priority: Option<Priority>,
    #[validate(length(max = 5, message = "You can only upload up to 5 files"))]
    pub attachments: Vec<PathBuf>,
}

impl NewTicket {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            priority: None,
            attachments: Vec::new(),
        }
    }
}

#[derive(Serialize)]
struct NewTicketBody<'a> {
    title: &'a str,
    description: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    priority: Option<Priority>,
}

#[derive(Deserialize)]
struct TicketEnvelope {
    ticket: Ticket,
}

#[derive(Deserialize)]
struct CommentEnvelope {
    comment: Comment,
}

/// The server answers either `{ticket}` or the bare ticket.
#[derive(Deserialize)]
#[serde(untagged)]
enum MaybeWrapped {
    Wrapped(TicketEnvelope),
    Bare(Box<Ticket>),
}

impl From<MaybeWrapped> for Ticket {
    fn from(value: MaybeWrapped) -> Self {
        match value {
            MaybeWrapped::Wrapped(env) => env.ticket,
            MaybeWrapped::Bare(ticket) => *ticket,
        }
    }
}

/// Files a ticket. Attachments switch the request to multipart.
pub async fn create_ticket(
    api: &ApiClient,
    session: &Session,
    ticket: NewTicket,
) -> Result<Ticket, ApiError> {
    ticket.validate()?;
    let title = ticket.title.trim();
    let description = ticket.description.trim();

    let req = api.request(Method::POST, "/tickets", Some(session));
    let req = if ticket.attachments.is_empty() {
        req.json(&NewTicketBody {
            title,
            description,
            priority: ticket.priority,
        })
    } else {
        let mut form = Form::new()
            .text("title", title.to_string())
            .text("description", description.to_string());
        if let Some(priority) = ticket.priority {
            form = form.text("priority", priority.to_string());
        }
        for path in &ticket.attachments {
            form = form.part("attachments", file_part(path).await?);
        }
        req.multipart(form)
    };

    let created: MaybeWrapped = api.send(req).await?;
    let created = Ticket::from(created);
    info!(ticket = %created.id, number = %created.ticket_number, "ticket created");
    Ok(created)
}

pub async fn list_tickets(
    api: &ApiClient,
    session: &Session,
    query: &TicketQuery,
) -> Result<TicketPage, ApiError> {
    let req = api
        .request(Method::GET, "/tickets", Some(session))
        .query(&query.pairs());
    api.send(req).await
}

pub async fn get_ticket(api: &ApiClient, session: &Session, id: &str) -> Result<Ticket, ApiError> {
    let env: MaybeWrapped = api
        .send(api.request(Method::GET, &format!("/tickets/{id}"), Some(session)))
        .await?;
    Ok(env.into())
}

/// Applies one typed update and returns the server's full ticket.
pub async fn update_ticket(
    api: &ApiClient,
    session: &Session,
    id: &str,
    update: &TicketUpdate,
) -> Result<Ticket, ApiError> {
    update.validate()?;
    debug!(ticket = %id, kind = update.kind(), "updating ticket");
    let req = api
        .request(Method::PUT, &format!("/tickets/{id}"), Some(session))
        .json(&update.body());
    let updated: MaybeWrapped = api.send(req).await?;
    Ok(updated.into())
}

pub async fn add_comment(
    api: &ApiClient,
    session: &Session,
    id: &str,
    content: &str,
    is_internal: bool,
) -> Result<Comment, ApiError> {
    let content = content.trim();
    if content.is_empty() {
        return Err(ApiError::Validation("Comment Required".into()));
    }
    let req = api
        .request(Method::POST, &format!("/tickets/{id}/comments"), Some(session))
        .json(&json!({ "content": content, "isInternal": is_internal }));
    let env: CommentEnvelope = api.send(req).await?;
    Ok(env.comment)
}

/// Aggregate counts; the shape varies by role so it stays loosely typed.
pub async fn ticket_stats(api: &ApiClient, session: &Session) -> Result<serde_json::Value, ApiError> {
    api.send(api.request(Method::GET, "/tickets/stats", Some(session)))
        .await
}

pub async fn department_stats(
    api: &ApiClient,
    session: &Session,
    category: Category,
) -> Result<DepartmentStats, ApiError> {
    api.send(api.request(
        Method::GET,
        &format!("/tickets/department-stats/{category}"),
        Some(session),
    ))
    .await
}
