#![allow(dead_code)]

use async_trait::async_trait;
use client::{ApiError, TicketQuery};
use models::{
    Category, Comment, DepartmentStats, Pagination, Role, Ticket, TicketPage, TicketStatus,
    TicketUpdate, User, UserRef,
};
use serde_json::json;
use services::TicketBackend;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const REQUESTER_ID: &str = "emp-1";

pub fn user(id: &str, role: Role) -> User {
    User {
        id: id.into(),
        name: format!("User {id}"),
        email: format!("{id}@example.com"),
        role,
        department: None,
        avatar: None,
    }
}

pub fn ticket(status: TicketStatus) -> Ticket {
    let mut t: Ticket = serde_json::from_value(json!({
        "_id": "t-1",
        "ticketNumber": "TKT-0001",
        "title": "Laptop fan is loud",
        "description": "Started after the BIOS update",
        "category": "IT",
        "status": "Open",
        "priority": "Medium",
        "mood": "frustrated",
        "requester": { "_id": REQUESTER_ID, "name": "Ana" },
        "createdAt": "2024-03-01T09:00:00Z",
        "comments": [
            {
                "_id": "c-0",
                "content": "Escalating to hardware",
                "author": { "_id": "it-1", "name": "Sam" },
                "createdAt": "2024-03-01T10:00:00Z",
                "isInternal": true
            }
        ]
    }))
    .unwrap();
    t.status = status;
    t
}

/// In-memory backend. Updates are applied to the stored ticket unless
/// `fail_updates` is set.
#[derive(Clone)]
pub struct MockBackend {
    pub ticket: Arc<Mutex<Ticket>>,
    pub updates: Arc<Mutex<Vec<TicketUpdate>>>,
    pub comments: Arc<Mutex<Vec<(String, bool)>>>,
    pub fail_get: bool,
    pub fail_updates: bool,
    pub stats: Option<DepartmentStats>,
    pub delay: Arc<Mutex<Option<Duration>>>,
}

impl MockBackend {
    pub fn new(ticket: Ticket) -> Self {
        Self {
            ticket: Arc::new(Mutex::new(ticket)),
            updates: Arc::default(),
            comments: Arc::default(),
            fail_get: false,
            fail_updates: false,
            stats: Some(DepartmentStats {
                top_depts: vec!["IT".into(), "Facilities".into()],
                avg_steps: Some(2.0),
                avg_resolution_time: Some(4.0),
            }),
            delay: Arc::default(),
        }
    }

    pub fn update_count(&self) -> usize {
        self.updates.lock().unwrap().len()
    }

    /// Slows every later call down, including calls made through clones.
    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    async fn pause(&self) {
        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }
}

fn server_error() -> ApiError {
    ApiError::Status {
        status: 500,
        message: "Internal server error".into(),
    }
}

#[async_trait]
impl TicketBackend for MockBackend {
    async fn list_tickets(&self, query: &TicketQuery) -> Result<TicketPage, ApiError> {
        self.pause().await;
        let page = query.page.unwrap_or(1);
        Ok(TicketPage {
            tickets: vec![self.ticket.lock().unwrap().clone()],
            pagination: Pagination {
                total: 80,
                page,
                limit: query.limit.unwrap_or(10),
                total_pages: 8,
                has_next_page: page < 8,
                has_prev_page: page > 1,
            },
        })
    }

    async fn get_ticket(&self, _id: &str) -> Result<Ticket, ApiError> {
        self.pause().await;
        if self.fail_get {
            return Err(server_error());
        }
        Ok(self.ticket.lock().unwrap().clone())
    }

    async fn update_ticket(&self, _id: &str, update: &TicketUpdate) -> Result<Ticket, ApiError> {
        self.updates.lock().unwrap().push(update.clone());
        self.pause().await;
        if self.fail_updates {
            return Err(server_error());
        }

        let mut ticket = self.ticket.lock().unwrap();
        let body = update.body();
        if let Some(status) = body.status {
            ticket.status = status;
        }
        if let Some(category) = body.category {
            ticket.category = category;
        }
        if let Some(assignee) = body.assigned_to {
            ticket.assigned_to = Some(UserRef {
                id: assignee,
                name: "Assignee".into(),
                email: String::new(),
                role: Some(Role::It),
                department: None,
            });
        }
        Ok(ticket.clone())
    }

    async fn add_comment(&self, _id: &str, content: &str, internal: bool) -> Result<Comment, ApiError> {
        self.pause().await;
        self.comments.lock().unwrap().push((content.to_string(), internal));
        Ok(serde_json::from_value(json!({
            "_id": "c-new",
            "content": content,
            "author": { "_id": REQUESTER_ID, "name": "Ana" },
            "createdAt": "2024-03-02T09:00:00Z",
            "isInternal": internal
        }))
        .unwrap())
    }

    async fn department_stats(&self, _category: Category) -> Result<DepartmentStats, ApiError> {
        self.stats
            .clone()
            .ok_or_else(|| ApiError::Malformed("missing topDepts".into()))
    }
}
