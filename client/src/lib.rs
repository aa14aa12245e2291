//! REST client for the helpdesk backend.
//!
//! Every authenticated call takes the [`Session`] explicitly; there is no
//! ambient token.

pub mod admin;
pub mod auth;
pub mod error;
pub mod http;
pub mod query;
pub mod session;
pub mod tickets;
pub mod users;

pub use error::ApiError;
pub use http::ApiClient;
pub use query::{TicketQuery, UserQuery};
pub use session::{Session, SessionStore, logout};
