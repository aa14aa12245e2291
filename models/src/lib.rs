pub mod comment;
pub mod history;
pub mod pagination;
pub mod stats;
pub mod ticket;
pub mod update;
pub mod user;

pub use comment::Comment;
pub use history::{AppendLog, FieldChange, StatusChange};
pub use pagination::{Pagination, TicketPage, UserPage};
pub use stats::DepartmentStats;
pub use ticket::{Attachment, Category, Mood, Priority, Ticket, TicketStatus};
pub use update::{SetAssignee, SetCategory, SetPriority, SetStatus, TicketUpdate, UpdateBody};
pub use user::{Role, User, UserRef};
