//! View controllers for the helpdesk client.
//!
//! Each controller owns its state, mutates it only through `&mut self`, and
//! runs its network calls inside a [`scope::ViewScope`] so that closing the
//! view cancels whatever is still in flight.

pub mod backend;
pub mod filter_bar;
pub mod notice;
pub mod scope;
pub mod status_policy;
pub mod ticket_detail;
pub mod ticket_list;

pub use backend::{HttpBackend, TicketBackend};
pub use filter_bar::FilterBar;
pub use notice::{Notice, Notices, Severity};
pub use scope::{ScopeHandle, ViewScope};
pub use status_policy::{StatusOption, can_change_status, status_options};
pub use ticket_detail::TicketDetail;
pub use ticket_list::TicketList;
