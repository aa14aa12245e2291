//! Typed ticket update commands.
//!
//! Each command carries only the fields it changes and validates them
//! before anything is sent. [`TicketUpdate::body`] renders the JSON body the
//! backend's `PUT /tickets/{id}` expects.

use serde::Serialize;
use validator::{Validate, ValidationErrors};

use crate::ticket::{Category, Priority, TicketStatus};

#[derive(Debug, Clone, PartialEq, Validate)]
pub struct SetStatus {
    pub status: TicketStatus,
    #[validate(length(max = 1000, message = "Status comment must be at most 1000 characters"))]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Validate)]
pub struct SetCategory {
    pub category: Category,
    #[validate(length(max = 1000, message = "Category comment must be at most 1000 characters"))]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Validate)]
pub struct SetAssignee {
    #[validate(custom(function = "common::not_blank", message = "Assignee is required"))]
    pub assignee_id: String,
}

#[derive(Debug, Clone, PartialEq, Validate)]
pub struct SetPriority {
    pub priority: Priority,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TicketUpdate {
    Status(SetStatus),
    Category(SetCategory),
    Assign(SetAssignee),
    Priority(SetPriority),
}

/// Wire body for `PUT /tickets/{id}`; unset fields are left out.
#[derive(Debug, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TicketStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
}

impl TicketUpdate {
    pub fn status(status: TicketStatus) -> Self {
        TicketUpdate::Status(SetStatus {
            status,
            comment: None,
        })
    }

    pub fn status_with_comment(status: TicketStatus, comment: &str) -> Self {
        TicketUpdate::Status(SetStatus {
            status,
            comment: tidy(comment),
        })
    }

    pub fn category(category: Category, comment: &str) -> Self {
        TicketUpdate::Category(SetCategory {
            category,
            comment: tidy(comment),
        })
    }

    pub fn assign(assignee_id: impl Into<String>) -> Self {
        TicketUpdate::Assign(SetAssignee {
            assignee_id: assignee_id.into().trim().to_string(),
        })
    }

    pub fn priority(priority: Priority) -> Self {
        TicketUpdate::Priority(SetPriority { priority })
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        match self {
            TicketUpdate::Status(cmd) => cmd.validate(),
            TicketUpdate::Category(cmd) => cmd.validate(),
            TicketUpdate::Assign(cmd) => cmd.validate(),
            TicketUpdate::Priority(cmd) => cmd.validate(),
        }
    }

    pub fn body(&self) -> UpdateBody {
        match self {
            TicketUpdate::Status(cmd) => UpdateBody {
                status: Some(cmd.status),
                status_comment: cmd.comment.clone(),
                ..Default::default()
            },
            TicketUpdate::Category(cmd) => UpdateBody {
                category: Some(cmd.category),
                category_comment: cmd.comment.clone(),
                ..Default::default()
            },
            TicketUpdate::Assign(cmd) => UpdateBody {
                assigned_to: Some(cmd.assignee_id.clone()),
                ..Default::default()
            },
            TicketUpdate::Priority(cmd) => UpdateBody {
                priority: Some(cmd.priority),
                ..Default::default()
            },
        }
    }

    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            TicketUpdate::Status(_) => "status",
            TicketUpdate::Category(_) => "category",
            TicketUpdate::Assign(_) => "assignment",
            TicketUpdate::Priority(_) => "priority",
        }
    }
}

fn tidy(comment: &str) -> Option<String> {
    let trimmed = comment.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
