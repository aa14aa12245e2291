use async_trait::async_trait;
use client::{tickets, ApiClient, ApiError, Session, TicketQuery};
use models::{Category, Comment, DepartmentStats, Ticket, TicketPage, TicketUpdate, User};

/// The ticket operations the view controllers depend on.
///
/// [`HttpBackend`] is the real implementation; tests substitute their own.
#[async_trait]
pub trait TicketBackend: Send + Sync {
    async fn list_tickets(&self, query: &TicketQuery) -> Result<TicketPage, ApiError>;

    async fn get_ticket(&self, id: &str) -> Result<Ticket, ApiError>;

    async fn update_ticket(&self, id: &str, update: &TicketUpdate) -> Result<Ticket, ApiError>;

    async fn add_comment(&self, id: &str, content: &str, internal: bool)
        -> Result<Comment, ApiError>;

    async fn department_stats(&self, category: Category) -> Result<DepartmentStats, ApiError>;
}

/// Backend reached over REST on behalf of one session.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    api: ApiClient,
    session: Session,
}

impl HttpBackend {
    pub fn new(api: ApiClient, session: Session) -> Self {
        Self { api, session }
    }

    pub fn actor(&self) -> &User {
        self.session.user()
    }
}

#[async_trait]
impl TicketBackend for HttpBackend {
    async fn list_tickets(&self, query: &TicketQuery) -> Result<TicketPage, ApiError> {
        tickets::list_tickets(&self.api, &self.session, query).await
    }

    async fn get_ticket(&self, id: &str) -> Result<Ticket, ApiError> {
        tickets::get_ticket(&self.api, &self.session, id).await
    }

    async fn update_ticket(&self, id: &str, update: &TicketUpdate) -> Result<Ticket, ApiError> {
        tickets::update_ticket(&self.api, &self.session, id, update).await
    }

    async fn add_comment(
        &self,
        id: &str,
        content: &str,
        internal: bool,
    ) -> Result<Comment, ApiError> {
        tickets::add_comment(&self.api, &self.session, id, content, internal).await
    }

    async fn department_stats(&self, category: Category) -> Result<DepartmentStats, ApiError> {
        tickets::department_stats(&self.api, &self.session, category).await
    }
}
