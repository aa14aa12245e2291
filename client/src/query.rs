//! Typed list filters, rendered as query-string pairs. Unset filters are
//! left out of the query entirely.

use models::{Category, Mood, Priority, Role, TicketStatus};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TicketQuery {
    pub status: Option<TicketStatus>,
    pub category: Option<Category>,
    pub priority: Option<Priority>,
    pub mood: Option<Mood>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl TicketQuery {
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        push(&mut pairs, "status", self.status);
        push(&mut pairs, "category", self.category);
        push(&mut pairs, "priority", self.priority);
        push(&mut pairs, "mood", self.mood);
        push(&mut pairs, "page", self.page);
        push(&mut pairs, "limit", self.limit);
        pairs
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserQuery {
    pub role: Option<Role>,
    pub department: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl UserQuery {
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        push(&mut pairs, "role", self.role);
        push(
            &mut pairs,
            "department",
            self.department.as_deref().filter(|d| !d.trim().is_empty()),
        );
        push(&mut pairs, "page", self.page);
        push(&mut pairs, "limit", self.limit);
        pairs
    }
}

fn push<T: ToString>(pairs: &mut Vec<(&'static str, String)>, key: &'static str, value: Option<T>) {
    if let Some(value) = value {
        pairs.push((key, value.to_string()));
    }
}
