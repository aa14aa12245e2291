//! Detail view of one ticket.
//!
//! Status changes are two-step: [`TicketDetail::request_status`] records a
//! pending target, [`TicketDetail::confirm_status_change`] consumes it and
//! sends exactly one update. The local ticket is replaced only by a
//! successful server response.

use client::ApiError;
use models::{Category, Comment, Priority, Ticket, TicketStatus, TicketUpdate, User};
use tracing::{debug, info, warn};

use crate::backend::TicketBackend;
use crate::notice::Notices;
use crate::scope::{ScopeHandle, ViewScope};
use crate::status_policy::{self, StatusOption};

pub struct TicketDetail<B> {
    backend: B,
    actor: User,
    ticket_id: String,
    ticket: Option<Ticket>,
    displayed_status: Option<TicketStatus>,
    pending_status: Option<TicketStatus>,
    forecast: Option<String>,
    notices: Notices,
    scope: ViewScope,
}

impl<B: TicketBackend> TicketDetail<B> {
    pub fn new(backend: B, actor: User, ticket_id: impl Into<String>) -> Self {
        Self {
            backend,
            actor,
            ticket_id: ticket_id.into(),
            ticket: None,
            displayed_status: None,
            pending_status: None,
            forecast: None,
            notices: Notices::default(),
            scope: ViewScope::new(),
        }
    }

    pub fn actor(&self) -> &User {
        &self.actor
    }

    /// The loaded ticket, unfiltered.
    pub fn ticket(&self) -> Option<&Ticket> {
        self.ticket.as_ref()
    }

    /// The loaded ticket as the actor is allowed to see it.
    pub fn visible_ticket(&self) -> Option<Ticket> {
        self.ticket.as_ref().map(|t| t.view_for(self.actor.role))
    }

    pub fn displayed_status(&self) -> Option<TicketStatus> {
        self.displayed_status
    }

    pub fn pending_status(&self) -> Option<TicketStatus> {
        self.pending_status
    }

    /// Resolution forecast, shown to the requester while the ticket is
    /// still open.
    pub fn forecast(&self) -> Option<&str> {
        self.forecast.as_deref()
    }

    pub fn notices(&self) -> &Notices {
        &self.notices
    }

    pub fn notices_mut(&mut self) -> &mut Notices {
        &mut self.notices
    }

    pub fn scope_handle(&self) -> ScopeHandle {
        self.scope.handle()
    }

    pub fn close(&self) {
        self.scope.close();
    }

    pub fn status_options(&self) -> Vec<StatusOption> {
        status_policy::status_options(Some(&self.actor), self.ticket.as_ref())
    }

    pub fn can_change_status(&self) -> bool {
        !self.status_options().is_empty()
    }

    fn offers(&self, target: TicketStatus) -> bool {
        self.status_options().iter().any(|o| o.status == target)
    }

    pub async fn load(&mut self) -> bool {
        let result = self.scope.run(self.backend.get_ticket(&self.ticket_id)).await;
        match result {
            Ok(ticket) => {
                self.replace_ticket(ticket);
                self.refresh_forecast().await;
                true
            }
            Err(ApiError::Cancelled) => false,
            Err(e) => {
                warn!(ticket = %self.ticket_id, error = %e, "failed to fetch ticket");
                self.notices.error("Error", "Failed to fetch ticket details.");
                false
            }
        }
    }

    /// First step of a status change: remember the target until confirmed.
    pub fn request_status(&mut self, status: TicketStatus) {
        debug!(ticket = %self.ticket_id, %status, "status change requested");
        self.pending_status = Some(status);
    }

    pub fn cancel_status_change(&mut self) {
        self.pending_status = None;
    }

    /// Second step: sends the pending status. Without a pending status this
    /// does nothing, so a confirmation can never send twice.
    pub async fn confirm_status_change(&mut self) -> bool {
        let Some(target) = self.pending_status.take() else {
            return false;
        };
        self.apply(
            TicketUpdate::status(target),
            ("Status Updated", format!("Ticket status has been updated to {target}.")),
            "Failed to update ticket status.",
        )
        .await
    }

    /// Requester shortcut for closing without the selector.
    pub async fn close_ticket(&mut self) -> bool {
        if !self.offers(TicketStatus::Closed) {
            self.notices
                .error("Not Allowed", "You cannot close this ticket.");
            return false;
        }
        self.apply(
            TicketUpdate::status(TicketStatus::Closed),
            ("Ticket Closed", "The ticket has been marked as closed.".into()),
            "Failed to close the ticket.",
        )
        .await
    }

    pub async fn reopen_ticket(&mut self) -> bool {
        if !self.offers(TicketStatus::Open) {
            self.notices
                .error("Not Allowed", "You cannot reopen this ticket.");
            return false;
        }
        self.apply(
            TicketUpdate::status(TicketStatus::Open),
            ("Ticket Reopened", "The ticket has been reopened.".into()),
            "Failed to reopen the ticket.",
        )
        .await
    }

    pub async fn change_category(&mut self, category: Category, comment: &str) -> bool {
        self.apply(
            TicketUpdate::category(category, comment),
            ("Success", "Ticket category updated successfully.".into()),
            "Failed to update ticket category.",
        )
        .await
    }

    pub async fn assign(&mut self, assignee_id: &str) -> bool {
        self.apply(
            TicketUpdate::assign(assignee_id),
            ("Ticket Assigned", "The ticket has been assigned.".into()),
            "Failed to assign the ticket.",
        )
        .await
    }

    pub async fn change_priority(&mut self, priority: Priority) -> bool {
        self.apply(
            TicketUpdate::priority(priority),
            ("Priority Updated", format!("Ticket priority has been set to {priority}.")),
            "Failed to update ticket priority.",
        )
        .await
    }

    /// Posts a comment. Internal comments are a staff feature; for anyone
    /// else the flag is ignored.
    pub async fn add_comment(&mut self, content: &str, internal: bool) -> bool {
        let content = content.trim();
        if content.is_empty() {
            self.notices
                .error("Comment Required", "Please enter a comment before submitting.");
            return false;
        }
        let internal = internal && self.actor.role.is_staff();

        let result = self
            .scope
            .run(self.backend.add_comment(&self.ticket_id, content, internal))
            .await;
        match result {
            Ok(comment) => {
                self.push_comment(comment);
                self.notices
                    .info("Comment Added", "Your comment has been added to the ticket.");
                true
            }
            Err(ApiError::Cancelled) => false,
            Err(e) => {
                warn!(ticket = %self.ticket_id, error = %e, "failed to add comment");
                self.notices.error("Error", "Failed to add comment.");
                false
            }
        }
    }

    async fn apply(
        &mut self,
        update: TicketUpdate,
        success: (&str, String),
        failure: &str,
    ) -> bool {
        if let Err(e) = update.validate() {
            self.notices.error("Error", ApiError::from(e).to_string());
            return false;
        }

        let result = self
            .scope
            .run(self.backend.update_ticket(&self.ticket_id, &update))
            .await;
        match result {
            Ok(ticket) => {
                info!(ticket = %self.ticket_id, kind = update.kind(), status = %ticket.status, "ticket updated");
                self.replace_ticket(ticket);
                self.notices.info(success.0, success.1);
                self.refresh_forecast().await;
                true
            }
            Err(ApiError::Cancelled) => false,
            Err(e) => {
                warn!(ticket = %self.ticket_id, kind = update.kind(), error = %e, "update failed");
                self.notices.error("Error", failure);
                false
            }
        }
    }

    fn replace_ticket(&mut self, ticket: Ticket) {
        self.displayed_status = Some(ticket.status);
        self.ticket = Some(ticket);
    }

    fn push_comment(&mut self, comment: Comment) {
        if let Some(ticket) = self.ticket.as_mut() {
            ticket.comments.push(comment);
        }
    }

    /// Fetches department stats for the requester of a pending ticket. Any
    /// failure just hides the forecast.
    async fn refresh_forecast(&mut self) {
        let category = match &self.ticket {
            Some(t) if t.is_pending() && status_policy::is_requester(&self.actor, t) => t.category,
            _ => {
                self.forecast = None;
                return;
            }
        };

        let result = self.scope.run(self.backend.department_stats(category)).await;
        match result {
            Ok(stats) => self.forecast = Some(stats.forecast()),
            Err(ApiError::Cancelled) => {}
            Err(e) => {
                debug!(%category, error = %e, "no department stats");
                self.forecast = None;
            }
        }
    }
}
