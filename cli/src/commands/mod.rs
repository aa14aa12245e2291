pub mod admin;
pub mod assistant;
pub mod auth;
pub mod health;
pub mod tickets;
pub mod users;
