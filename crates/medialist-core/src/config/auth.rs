//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Authentication and credential configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT signing (HMAC-SHA256).
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Access token TTL in minutes.
    #[serde(default = "default_access_ttl")]
    pub jwt_access_ttl_minutes: u64,
    /// Refresh token TTL in hours.
    #[serde(default = "default_refresh_ttl")]
    pub jwt_refresh_ttl_hours: u64,
    /// Minimum password length.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            jwt_access_ttl_minutes: default_access_ttl(),
            jwt_refresh_ttl_hours: default_refresh_ttl(),
            password_min_length: default_password_min(),
        }
    }
}

impl AuthConfig {
    /// Access token lifetime in seconds, also used as the session cache TTL.
    pub fn access_ttl_seconds(&self) -> u64 {
        self.jwt_access_ttl_minutes * 60
    }
}

fn default_jwt_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_access_ttl() -> u64 {
    60
}

fn default_refresh_ttl() -> u64 {
    168
}

fn default_password_min() -> usize {
    8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_token_lifetimes() {
        let config = AuthConfig::default();
        // Access tokens live 1 hour, refresh tokens 7 days.
        assert_eq!(config.jwt_access_ttl_minutes, 60);
        assert_eq!(config.jwt_refresh_ttl_hours, 168);
        assert_eq!(config.access_ttl_seconds(), 3600);
    }
}
