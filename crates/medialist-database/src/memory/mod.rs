//! In-memory store implementations.
//!
//! These back the service unit tests and the in-process integration
//! tests. They mirror the PostgreSQL repositories' observable behavior,
//! including set-semantics tag arrays and unique username/email
//! conflicts, and add single-shot failure injection for exercising the
//! ownership coordinator's compensation paths.

pub mod list;
pub mod user;

pub use list::MemoryListStore;
pub use user::MemoryUserStore;
