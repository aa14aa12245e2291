use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ticket::TicketStatus;
use crate::user::UserRef;

/// An ordered log that can only grow.
///
/// Entries are never edited, removed or reordered once recorded; the type
/// only exposes appending and read access.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppendLog<T>(Vec<T>);

impl<T> Default for AppendLog<T> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<T> AppendLog<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, entry: T) {
        self.0.push(entry);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.0
    }

    pub fn last(&self) -> Option<&T> {
        self.0.last()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<T> From<Vec<T>> for AppendLog<T> {
    fn from(entries: Vec<T>) -> Self {
        Self(entries)
    }
}

impl<'a, T> IntoIterator for &'a AppendLog<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// One status transition: the resulting status, who made it and when.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusChange {
    pub status: TicketStatus,
    pub changed_by: UserRef,
    pub changed_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// A change to any other ticket field (category, assignee, priority).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldChange {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub old_value: Option<String>,
    #[serde(default)]
    pub new_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub changed_by: UserRef,
    pub changed_at: DateTime<Utc>,
}
