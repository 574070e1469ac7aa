//! # medialist-api
//!
//! HTTP API layer for MediaList built on Axum. Routes live under `/v1`,
//! all state is shared through [`state::AppState`], and every error
//! leaves through the `IntoResponse` boundary on
//! `medialist_core::error::AppError`.

pub mod dto;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
