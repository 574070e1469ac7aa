//! Route definitions for the MediaList HTTP API.
//!
//! All routes are organized by domain and mounted under `/v1`.
//! The router receives `AppState` and passes it to all handlers via
//! Axum's `State` extractor.

use axum::{
    Router,
    http::{HeaderValue, Method},
    middleware as axum_middleware,
    routing::{delete, get, post, put},
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(list_routes())
        .merge(health_routes());

    let cors = build_cors_layer(&state);

    Router::new()
        .nest("/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Auth endpoints: register, login, refresh.
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/refresh", post(handlers::auth::refresh))
}

/// User endpoints: search, profile, password, deletion, tags.
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/user/search/{query}", get(handlers::user::search))
        .route("/user", delete(handlers::user::delete_account))
        .route("/user/update", put(handlers::user::update_profile))
        .route(
            "/user/updatePassword",
            put(handlers::user::update_password),
        )
        .route("/user/tag", put(handlers::user::tag))
        .route("/user/tags", get(handlers::user::get_tags))
}

/// List endpoints: lifecycle, details, and item operations.
fn list_routes() -> Router<AppState> {
    Router::new()
        .route("/list", post(handlers::list::create))
        .route("/list/{listId}", get(handlers::list::get))
        .route("/list/{listId}", delete(handlers::list::delete))
        .route("/list/update/{listId}", put(handlers::list::update))
        .route("/list/{listId}/items", post(handlers::list::add_items))
        .route("/list/{listId}/items", delete(handlers::list::remove_items))
        .route(
            "/list/{listId}/items/{mediaId}",
            put(handlers::list::update_item),
        )
}

/// Health endpoint, open.
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

/// Build the CORS layer from configuration.
fn build_cors_layer(state: &AppState) -> CorsLayer {
    let cors_config = &state.config.server.cors;

    let origins = if cors_config.allowed_origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(
            cors_config
                .allowed_origins
                .iter()
                .filter_map(|o| o.parse::<HeaderValue>().ok()),
        )
    };

    let methods: Vec<Method> = cors_config
        .allowed_methods
        .iter()
        .filter_map(|m| m.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(methods)
        .allow_headers(Any)
}
