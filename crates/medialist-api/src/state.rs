//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use medialist_auth::jwt::{JwtDecoder, JwtEncoder};
use medialist_auth::password::{PasswordHasher, PasswordValidator};
use medialist_auth::session::SessionCache;
use medialist_cache::CacheManager;
use medialist_core::config::AppConfig;
use medialist_database::{ListStore, UserStore};
use medialist_service::{AuthService, ListService, UserService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Cache manager (Redis or in-memory).
    pub cache: Arc<CacheManager>,
    /// JWT token decoder and validator.
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Access-token session cache.
    pub sessions: SessionCache,
    /// Authentication service.
    pub auth_service: Arc<AuthService>,
    /// User directory service.
    pub user_service: Arc<UserService>,
    /// List ownership service.
    pub list_service: Arc<ListService>,
}

impl AppState {
    /// Wires the full dependency graph from configuration, a cache
    /// manager, and the two stores. Used by the server binary and, with
    /// in-memory stores, by the integration tests.
    pub fn build(
        config: Arc<AppConfig>,
        cache: Arc<CacheManager>,
        users: Arc<dyn UserStore>,
        lists: Arc<dyn ListStore>,
    ) -> Self {
        let encoder = Arc::new(JwtEncoder::new(&config.auth));
        let decoder = Arc::new(JwtDecoder::new(&config.auth));
        let hasher = Arc::new(PasswordHasher::new());
        let validator = Arc::new(PasswordValidator::new(&config.auth));
        let sessions = SessionCache::new(cache.clone(), &config.auth);

        let auth_service = Arc::new(AuthService::new(
            users.clone(),
            encoder,
            decoder.clone(),
            hasher.clone(),
            validator.clone(),
            sessions.clone(),
        ));
        let user_service = Arc::new(UserService::new(
            users.clone(),
            lists.clone(),
            hasher,
            validator,
        ));
        let list_service = Arc::new(ListService::new(users, lists));

        Self {
            config,
            cache,
            jwt_decoder: decoder,
            sessions,
            auth_service,
            user_service,
            list_service,
        }
    }
}
