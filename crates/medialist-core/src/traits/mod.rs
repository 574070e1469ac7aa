//! Core traits defined in `medialist-core` and implemented by other crates.

pub mod cache;

pub use cache::CacheProvider;
