//! Integration tests running the full router in-process with in-memory
//! stores and cache.

mod helpers;

mod auth_test;
mod list_test;
mod user_test;
