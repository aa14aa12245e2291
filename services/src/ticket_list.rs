use client::ApiError;
use models::{Pagination, Ticket, TicketPage, User};
use tracing::warn;
use util::paging::{self, PageSlot};

use crate::backend::TicketBackend;
use crate::filter_bar::FilterBar;
use crate::notice::Notices;
use crate::scope::{ScopeHandle, ViewScope};

pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Paginated ticket list with its filter bar.
pub struct TicketList<B> {
    backend: B,
    actor: User,
    filters: FilterBar,
    page: u32,
    limit: u32,
    loaded: Option<TicketPage>,
    notices: Notices,
    scope: ViewScope,
}

impl<B: TicketBackend> TicketList<B> {
    pub fn new(backend: B, actor: User, create_shortcut: bool) -> Self {
        let filters = FilterBar::new(actor.role, create_shortcut);
        Self {
            backend,
            actor,
            filters,
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
            loaded: None,
            notices: Notices::default(),
            scope: ViewScope::new(),
        }
    }

    pub fn with_page_size(mut self, limit: u32) -> Self {
        self.limit = limit.max(1);
        self
    }

    pub fn filters(&self) -> &FilterBar {
        &self.filters
    }

    /// Filter changes take effect on the next [`TicketList::load`].
    pub fn filters_mut(&mut self) -> &mut FilterBar {
        &mut self.filters
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn pagination(&self) -> Option<&Pagination> {
        self.loaded.as_ref().map(|p| &p.pagination)
    }

    pub fn notices_mut(&mut self) -> &mut Notices {
        &mut self.notices
    }

    pub fn scope_handle(&self) -> ScopeHandle {
        self.scope.handle()
    }

    pub async fn load(&mut self) -> bool {
        let query = self.filters.query(self.page, self.limit);
        let result = self.scope.run(self.backend.list_tickets(&query)).await;
        match result {
            Ok(page) => {
                self.page = page.pagination.page.max(1);
                self.loaded = Some(page);
                true
            }
            Err(ApiError::Cancelled) => false,
            Err(e) => {
                warn!(page = self.page, error = %e, "failed to fetch tickets");
                self.notices.error("Error", "Failed to fetch tickets.");
                false
            }
        }
    }

    /// Jumps to `page`, clamped to the known range, and reloads.
    pub async fn go_to(&mut self, page: u32) -> bool {
        let last = self.pagination().map_or(u32::MAX, |p| p.total_pages.max(1));
        self.page = page.clamp(1, last);
        self.load().await
    }

    /// Tickets on the current page that pass the filters, as the actor may
    /// see them.
    pub fn visible(&self) -> Vec<Ticket> {
        let Some(loaded) = &self.loaded else {
            return Vec::new();
        };
        self.filters
            .apply(&loaded.tickets)
            .into_iter()
            .map(|t| t.view_for(self.actor.role))
            .collect()
    }

    pub fn pager(&self) -> Vec<PageSlot> {
        let total = self.pagination().map_or(0, |p| p.total_pages);
        paging::page_slots(self.page, total)
    }

    pub fn pager_line(&self) -> String {
        paging::render(&self.pager(), self.page)
    }
}
