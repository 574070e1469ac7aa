//! Session cache mapping access tokens to their owning user.
//!
//! Every issued access token is cached under `session:{token}` (the
//! Redis backend adds its configured namespace prefix) with the access
//! token's lifetime as the TTL. A token whose entry has
//! expired or been deleted is not accepted even if its signature still
//! verifies, which makes the cache the revocation mechanism.

use std::sync::Arc;
use std::time::Duration;

use uuid::Uuid;

use medialist_cache::{CacheManager, keys};
use medialist_core::config::AuthConfig;
use medialist_core::error::AppError;
use medialist_core::result::AppResult;
use medialist_core::traits::cache::CacheProvider;

/// Access-token session cache.
#[derive(Debug, Clone)]
pub struct SessionCache {
    cache: Arc<CacheManager>,
    ttl: Duration,
}

impl SessionCache {
    /// Create a session cache with the access token lifetime as TTL.
    pub fn new(cache: Arc<CacheManager>, config: &AuthConfig) -> Self {
        Self {
            cache,
            ttl: Duration::from_secs(config.access_ttl_seconds()),
        }
    }

    /// Record a session for a freshly issued access token.
    pub async fn put(&self, access_token: &str, user_id: Uuid) -> AppResult<()> {
        self.cache
            .set(&keys::session(access_token), &user_id.to_string(), self.ttl)
            .await
    }

    /// Look up the user owning this access token. `None` means the
    /// session has expired or was never created.
    pub async fn get(&self, access_token: &str) -> AppResult<Option<Uuid>> {
        let Some(value) = self.cache.get(&keys::session(access_token)).await? else {
            return Ok(None);
        };
        let user_id = value.parse::<Uuid>().map_err(|e| {
            AppError::with_source(medialist_core::ErrorKind::Cache, "Corrupt session entry", e)
        })?;
        Ok(Some(user_id))
    }

    /// Drop the session for this access token.
    pub async fn delete(&self, access_token: &str) -> AppResult<()> {
        self.cache.delete(&keys::session(access_token)).await
    }
}
