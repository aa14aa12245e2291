//! Search, status and mood filters for a ticket list.

use client::TicketQuery;
use models::{Mood, Role, Ticket, TicketStatus};
use std::str::FromStr;

/// Keyword meaning "no filter" in status and mood selectors.
pub const ALL: &str = "all";

#[derive(Debug, Clone, PartialEq)]
pub struct FilterBar {
    search: String,
    status: Option<TicketStatus>,
    mood: Option<Mood>,
    staff: bool,
    create_shortcut: bool,
}

impl FilterBar {
    /// `create_shortcut` switches on the "Create Ticket" variant of the bar.
    pub fn new(role: Role, create_shortcut: bool) -> Self {
        Self {
            search: String::new(),
            status: None,
            mood: None,
            staff: role.is_staff(),
            create_shortcut,
        }
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn status(&self) -> Option<TicketStatus> {
        self.status
    }

    pub fn mood(&self) -> Option<Mood> {
        self.mood
    }

    pub fn shows_mood_filter(&self) -> bool {
        self.staff
    }

    pub fn shows_create_shortcut(&self) -> bool {
        self.create_shortcut && !self.staff
    }

    pub fn set_search(&mut self, text: &str) {
        self.search = text.trim().to_lowercase();
    }

    pub fn set_status(&mut self, status: Option<TicketStatus>) {
        self.status = status;
    }

    /// Non-staff have no mood filter; the call is ignored and returns false.
    pub fn set_mood(&mut self, mood: Option<Mood>) -> bool {
        if !self.staff {
            return false;
        }
        self.mood = mood;
        true
    }

    pub fn matches(&self, ticket: &Ticket) -> bool {
        if self.status.is_some_and(|s| s != ticket.status) {
            return false;
        }
        if self.staff && self.mood.is_some() && self.mood != ticket.mood {
            return false;
        }
        if self.search.is_empty() {
            return true;
        }
        [&ticket.ticket_number, &ticket.title, &ticket.description]
            .iter()
            .any(|field| field.to_lowercase().contains(&self.search))
    }

    pub fn apply<'a>(&self, tickets: &'a [Ticket]) -> Vec<&'a Ticket> {
        tickets.iter().filter(|t| self.matches(t)).collect()
    }

    /// Server-side part of the filters. Search stays client-side.
    pub fn query(&self, page: u32, limit: u32) -> TicketQuery {
        TicketQuery {
            status: self.status,
            mood: if self.staff { self.mood } else { None },
            page: Some(page),
            limit: Some(limit),
            ..Default::default()
        }
    }
}

/// Parses a selector value: `all` or a name understood by `T`.
pub fn parse_choice<T: FromStr>(value: &str) -> Result<Option<T>, T::Err> {
    let value = value.trim();
    if value.eq_ignore_ascii_case(ALL) {
        return Ok(None);
    }
    value.parse().map(Some)
}
