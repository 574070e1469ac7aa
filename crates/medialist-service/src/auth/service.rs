//! Authentication service — registration, login, and token refresh.

use std::sync::Arc;

use tracing::info;

use medialist_auth::jwt::{JwtDecoder, JwtEncoder, TokenPair};
use medialist_auth::password::{PasswordHasher, PasswordValidator};
use medialist_auth::session::SessionCache;
use medialist_core::error::AppError;
use medialist_core::result::AppResult;
use medialist_database::UserStore;
use medialist_entity::user::{NewUser, ProfileType, User};

/// Data for registering a new account. The password is still plaintext
/// here; the service hashes it before it reaches the store.
#[derive(Debug, Clone)]
pub struct RegisterData {
    /// Display name.
    pub name: String,
    /// Desired username.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Plaintext password.
    pub password: String,
    /// Profile visibility.
    pub profile_type: ProfileType,
    /// Avatar path (optional).
    pub avatar: Option<String>,
}

/// Which credential a login request identified itself with. The web
/// layer enforces that exactly one was supplied.
#[derive(Debug, Clone)]
pub enum LoginIdentifier {
    /// Exact username match.
    Username(String),
    /// Case-insensitive email match.
    Email(String),
}

/// Handles the authentication lifecycle.
#[derive(Debug, Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    encoder: Arc<JwtEncoder>,
    decoder: Arc<JwtDecoder>,
    hasher: Arc<PasswordHasher>,
    validator: Arc<PasswordValidator>,
    sessions: SessionCache,
}

impl AuthService {
    /// Creates a new auth service.
    pub fn new(
        users: Arc<dyn UserStore>,
        encoder: Arc<JwtEncoder>,
        decoder: Arc<JwtDecoder>,
        hasher: Arc<PasswordHasher>,
        validator: Arc<PasswordValidator>,
        sessions: SessionCache,
    ) -> Self {
        Self {
            users,
            encoder,
            decoder,
            hasher,
            validator,
            sessions,
        }
    }

    /// Registers a new account. Duplicate usernames are rejected before
    /// any write; the password policy is enforced on the plaintext.
    pub async fn register(&self, data: RegisterData) -> AppResult<User> {
        if self.users.find_by_username(&data.username).await?.is_some() {
            return Err(AppError::conflict(format!(
                "Username '{}' already exists",
                data.username
            )));
        }

        self.validator.validate(&data.password)?;
        let password_hash = self.hasher.hash_password(&data.password)?;

        let user = self
            .users
            .create(&NewUser {
                name: data.name,
                username: data.username,
                email: data.email,
                password_hash,
                profile_type: data.profile_type,
                avatar: data.avatar,
            })
            .await?;

        info!(user_id = %user.id, username = %user.username, "User registered");
        Ok(user)
    }

    /// Logs a user in. Every check fails early: unknown identifier,
    /// wrong password, and token issuance each return immediately.
    ///
    /// On success the access token is recorded in the session cache and
    /// the refresh token overwrites the user's single slot, invalidating
    /// any previous session.
    pub async fn login(
        &self,
        identifier: LoginIdentifier,
        password: &str,
    ) -> AppResult<TokenPair> {
        let user = match &identifier {
            LoginIdentifier::Username(username) => {
                self.users.find_by_username(username).await?
            }
            LoginIdentifier::Email(email) => self.users.find_by_email(email).await?,
        }
        .ok_or_else(|| AppError::not_found("User not found"))?;

        if !self.hasher.verify_password(password, &user.password_hash)? {
            return Err(AppError::authentication("Incorrect password"));
        }

        let pair = self.encoder.generate_token_pair(user.id)?;
        self.sessions.put(&pair.access_token, user.id).await?;
        self.users
            .set_refresh_token(user.id, Some(&pair.refresh_token))
            .await?;

        info!(user_id = %user.id, "User logged in");
        Ok(pair)
    }

    /// Exchanges a refresh token for a new access token. The presented
    /// token must verify as a refresh JWT *and* match the user's stored
    /// single-slot token; an overwritten token is thereby revoked.
    pub async fn refresh(&self, refresh_token: &str) -> AppResult<String> {
        let claims = self.decoder.decode_refresh_token(refresh_token)?;

        let user = self
            .users
            .find_by_id(claims.sub)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        if user.refresh_token.as_deref() != Some(refresh_token) {
            return Err(AppError::authentication("Refresh token has been revoked"));
        }

        let (access_token, _) = self.encoder.generate_access_token(user.id)?;
        self.sessions.put(&access_token, user.id).await?;

        info!(user_id = %user.id, "Access token refreshed");
        Ok(access_token)
    }

    /// Resolves an access token to its session's user, if any.
    pub async fn resolve_session(&self, access_token: &str) -> AppResult<Option<uuid::Uuid>> {
        self.sessions.get(access_token).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use medialist_cache::CacheManager;
    use medialist_cache::memory::MemoryCacheProvider;
    use medialist_core::config::AuthConfig;
    use medialist_core::config::cache::MemoryCacheConfig;
    use medialist_database::memory::MemoryUserStore;

    fn make_service() -> (AuthService, Arc<MemoryUserStore>) {
        let config = AuthConfig {
            jwt_secret: "test-secret".to_string(),
            ..Default::default()
        };
        let users = Arc::new(MemoryUserStore::new());
        let provider = MemoryCacheProvider::new(
            &MemoryCacheConfig {
                max_capacity: 100,
                time_to_live_seconds: 60,
            },
            60,
        );
        let cache = Arc::new(CacheManager::from_provider(Arc::new(provider)));
        let service = AuthService::new(
            users.clone(),
            Arc::new(JwtEncoder::new(&config)),
            Arc::new(JwtDecoder::new(&config)),
            Arc::new(PasswordHasher::new()),
            Arc::new(PasswordValidator::new(&config)),
            SessionCache::new(cache, &config),
        );
        (service, users)
    }

    fn alice() -> RegisterData {
        RegisterData {
            name: "Alice".to_string(),
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password: "Secret1pass".to_string(),
            profile_type: ProfileType::Public,
            avatar: None,
        }
    }

    #[tokio::test]
    async fn test_register_rejects_duplicate_username() {
        let (service, _) = make_service();
        service.register(alice()).await.unwrap();

        let mut dup = alice();
        dup.email = "other@example.com".to_string();
        let err = service.register(dup).await.unwrap_err();
        assert_eq!(err.kind, medialist_core::ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_register_hashes_the_password() {
        let (service, users) = make_service();
        let user = service.register(alice()).await.unwrap();
        let stored = users.find_by_id(user.id).await.unwrap().unwrap();
        assert_ne!(stored.password_hash, "Secret1pass");
        assert!(stored.password_hash.starts_with("$argon2id$"));
    }

    #[tokio::test]
    async fn test_login_creates_session_and_stores_refresh_token() {
        let (service, users) = make_service();
        let user = service.register(alice()).await.unwrap();

        let pair = service
            .login(
                LoginIdentifier::Email("alice@example.com".to_string()),
                "Secret1pass",
            )
            .await
            .unwrap();

        assert_eq!(
            service.resolve_session(&pair.access_token).await.unwrap(),
            Some(user.id)
        );
        let stored = users.find_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(stored.refresh_token.as_deref(), Some(pair.refresh_token.as_str()));
    }

    #[tokio::test]
    async fn test_login_failures_return_early() {
        let (service, _) = make_service();
        service.register(alice()).await.unwrap();

        let err = service
            .login(LoginIdentifier::Username("nobody".to_string()), "whatever")
            .await
            .unwrap_err();
        assert_eq!(err.kind, medialist_core::ErrorKind::NotFound);

        let err = service
            .login(LoginIdentifier::Username("alice".to_string()), "WrongPass1")
            .await
            .unwrap_err();
        assert_eq!(err.kind, medialist_core::ErrorKind::Authentication);
    }

    #[tokio::test]
    async fn test_refresh_mints_and_caches_new_access_token() {
        let (service, _) = make_service();
        let user = service.register(alice()).await.unwrap();
        let pair = service
            .login(
                LoginIdentifier::Username("alice".to_string()),
                "Secret1pass",
            )
            .await
            .unwrap();

        let access = service.refresh(&pair.refresh_token).await.unwrap();
        // The refreshed token must itself be usable on the next request.
        assert_eq!(
            service.resolve_session(&access).await.unwrap(),
            Some(user.id)
        );
    }

    #[tokio::test]
    async fn test_refresh_rejects_overwritten_token() {
        let (service, _) = make_service();
        service.register(alice()).await.unwrap();
        let first = service
            .login(
                LoginIdentifier::Username("alice".to_string()),
                "Secret1pass",
            )
            .await
            .unwrap();
        // Second login overwrites the single refresh slot.
        service
            .login(
                LoginIdentifier::Username("alice".to_string()),
                "Secret1pass",
            )
            .await
            .unwrap();

        let err = service.refresh(&first.refresh_token).await.unwrap_err();
        assert_eq!(err.kind, medialist_core::ErrorKind::Authentication);
    }

    #[tokio::test]
    async fn test_refresh_rejects_access_token() {
        let (service, _) = make_service();
        service.register(alice()).await.unwrap();
        let pair = service
            .login(
                LoginIdentifier::Username("alice".to_string()),
                "Secret1pass",
            )
            .await
            .unwrap();

        assert!(service.refresh(&pair.access_token).await.is_err());
    }
}
