use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::comment::Comment;
use crate::history::{AppendLog, FieldChange, StatusChange};
use crate::user::{Role, UserRef};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum TicketStatus {
    Open,
    #[serde(rename = "In Progress")]
    #[strum(to_string = "In Progress", serialize = "in-progress", serialize = "in_progress")]
    InProgress,
    Resolved,
    Closed,
}

impl TicketStatus {
    /// Every status in lifecycle order.
    pub const ALL: [TicketStatus; 4] = [
        TicketStatus::Open,
        TicketStatus::InProgress,
        TicketStatus::Resolved,
        TicketStatus::Closed,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum Category {
    #[serde(rename = "IT")]
    #[strum(serialize = "IT")]
    It,
    #[serde(rename = "HR")]
    #[strum(serialize = "HR")]
    Hr,
    Admin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

/// Sentiment assigned to a ticket by the AI layer. Staff-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Mood {
    Angry,
    Frustrated,
    Neutral,
    Satisfied,
    Urgent,
}

impl Mood {
    pub fn icon(self) -> &'static str {
        match self {
            Mood::Angry => "😠",
            Mood::Frustrated => "😤",
            Mood::Urgent => "⚡",
            Mood::Satisfied => "😊",
            Mood::Neutral => "😐",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub url: String,
    pub original_name: String,
}

/// The ticket aggregate. Comments and both histories are owned by it and
/// have no lifecycle of their own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub ticket_number: String,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub status: TicketStatus,
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<Mood>,
    pub requester: UserRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<UserRef>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub status_history: AppendLog<StatusChange>,
    #[serde(default)]
    pub history: AppendLog<FieldChange>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

impl Ticket {
    pub fn is_closed(&self) -> bool {
        self.status == TicketStatus::Closed
    }

    /// Still waiting on staff: `Open` or `In Progress`.
    pub fn is_pending(&self) -> bool {
        matches!(self.status, TicketStatus::Open | TicketStatus::InProgress)
    }

    /// The ticket as an actor with `role` may see it. Non-staff lose the
    /// mood classification and every internal comment.
    pub fn view_for(&self, role: Role) -> Ticket {
        let mut view = self.clone();
        if !role.is_staff() {
            view.mood = None;
            view.comments.retain(|c| !c.is_internal);
        }
        view
    }
}
