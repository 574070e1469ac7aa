//! # medialist-database
//!
//! Persistence layer for MediaList. Defines the [`store::UserStore`] and
//! [`store::ListStore`] traits, their PostgreSQL repository
//! implementations, and in-memory implementations used by tests and
//! local development. Connection pooling and migrations live here too.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use store::{ListStore, UserStore};
