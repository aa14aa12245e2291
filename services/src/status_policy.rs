//! Which status changes an actor may pick for a ticket.
//!
//! Pure functions of the actor and the ticket; the detail view uses them to
//! fill its status selector and to gate the confirmation step. Committing a
//! change does not consult this module again.

use models::{Role, Ticket, TicketStatus, User};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusOption {
    pub status: TicketStatus,
    pub label: String,
}

impl StatusOption {
    fn new(status: TicketStatus, label: impl Into<String>) -> Self {
        Self {
            status,
            label: label.into(),
        }
    }
}

/// The requester is the employee who filed the ticket.
pub fn is_requester(actor: &User, ticket: &Ticket) -> bool {
    actor.role == Role::Employee && ticket.requester.is(actor)
}

/// Options for a known role, requester flag and current status.
pub fn options_for(role: Role, is_requester: bool, current: TicketStatus) -> Vec<StatusOption> {
    if role.is_staff() {
        return TicketStatus::ALL
            .iter()
            .map(|s| StatusOption::new(*s, s.to_string()))
            .collect();
    }
    if role == Role::Employee && is_requester {
        return match current {
            TicketStatus::Closed => vec![StatusOption::new(TicketStatus::Open, "Reopen Ticket")],
            _ => vec![StatusOption::new(TicketStatus::Closed, "Close Ticket")],
        };
    }
    Vec::new()
}

/// Options for `actor` on `ticket`; empty while either is still loading.
pub fn status_options(actor: Option<&User>, ticket: Option<&Ticket>) -> Vec<StatusOption> {
    match (actor, ticket) {
        (Some(actor), Some(ticket)) => {
            options_for(actor.role, is_requester(actor, ticket), ticket.status)
        }
        _ => Vec::new(),
    }
}

pub fn can_change_status(actor: Option<&User>, ticket: Option<&Ticket>) -> bool {
    !status_options(actor, ticket).is_empty()
}
