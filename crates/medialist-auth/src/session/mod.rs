//! Session cache over access tokens.

pub mod cache;

pub use cache::SessionCache;
