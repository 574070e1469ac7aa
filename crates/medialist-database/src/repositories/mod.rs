//! PostgreSQL repository implementations of the store traits.

pub mod list;
pub mod user;

pub use list::ListRepository;
pub use user::UserRepository;
