//! # medialist-service
//!
//! Business logic service layer for MediaList. Each service orchestrates
//! stores, cache, and authentication to implement application-level use
//! cases.
//!
//! Services follow constructor injection — all dependencies are provided
//! at construction time via `Arc` references, with the stores behind
//! trait objects so tests substitute in-memory fakes.

pub mod auth;
pub mod context;
pub mod list;
pub mod user;

pub use auth::AuthService;
pub use context::RequestContext;
pub use list::ListService;
pub use user::UserService;
