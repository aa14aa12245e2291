//! # AI helpers
//!
//! Clients for the auxiliary AI layer of the helpdesk.
//!
//! ## Overview
//!
//! - [`service::AiService`] talks to the standalone AI service: ticket
//!   summaries, the supported-language list and translation.
//! - [`assistant::BackendAssistant`] talks to the assistant endpoints that
//!   the helpdesk backend proxies: chat, response suggestions and
//!   voice-to-ticket drafts.
//! - [`conversation::Conversation`] keeps a chat transcript and turns any
//!   assistant failure into a fixed apology reply.
//!
//! All calls share the [`client::ApiError`] taxonomy.

pub mod assistant;
pub mod conversation;
pub mod service;

pub use assistant::{Assistant, BackendAssistant, Suggestion, TicketDraft};
pub use conversation::{APOLOGY, ChatMessage, Conversation, Speaker};
pub use service::AiService;
