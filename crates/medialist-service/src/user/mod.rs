//! User profile, search, password, and tag operations.

pub mod service;

pub use service::{SearchType, UserService};
