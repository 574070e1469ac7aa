//! HTTP request handlers.

pub mod auth;
pub mod health;
pub mod list;
pub mod user;
