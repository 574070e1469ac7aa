//! User repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use medialist_core::error::{AppError, ErrorKind};
use medialist_core::result::AppResult;
use medialist_entity::list::ListKind;
use medialist_entity::user::{ListIndex, NewUser, User, UserProfilePatch};

use crate::store::UserStore;

/// Repository for user CRUD, the ownership index arrays, and user tags.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn index_column(kind: ListKind) -> &'static str {
        match kind {
            ListKind::StatusBased => "status_based_lists",
            ListKind::ThemeBased => "theme_based_lists",
        }
    }

    fn map_unique_violation(e: sqlx::Error, data: &NewUser) -> AppError {
        match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("users_username_key") =>
            {
                AppError::conflict(format!("Username '{}' already exists", data.username))
            }
            sqlx::Error::Database(ref db_err) if db_err.constraint() == Some("users_email_key") => {
                AppError::conflict("Email already in use".to_string())
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create user", e),
        }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn create(&self, new_user: &NewUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (name, username, email, password_hash, profile_type, avatar) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING *",
        )
        .bind(&new_user.name)
        .bind(&new_user.username)
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .bind(new_user.profile_type)
        .bind(&new_user.avatar)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| Self::map_unique_violation(e, new_user))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user by id", e))
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find user by username", e)
            })
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE LOWER(email) = LOWER($1)")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find user by email", e)
            })
    }

    async fn search_by_name(&self, name: &str) -> AppResult<Vec<User>> {
        let pattern = format!("%{name}%");
        sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE name ILIKE $1 AND profile_type = 'public' \
             ORDER BY name ASC",
        )
        .bind(&pattern)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to search users", e))
    }

    async fn update_profile(&self, id: Uuid, patch: &UserProfilePatch) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET name = COALESCE($2, name), \
                              username = COALESCE($3, username), \
                              email = COALESCE($4, email), \
                              profile_type = COALESCE($5, profile_type), \
                              updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&patch.name)
        .bind(&patch.username)
        .bind(&patch.email)
        .bind(patch.profile_type)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("users_username_key") =>
            {
                AppError::conflict("Username already exists".to_string())
            }
            sqlx::Error::Database(ref db_err) if db_err.constraint() == Some("users_email_key") => {
                AppError::conflict("Email already in use".to_string())
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to update profile", e),
        })
    }

    async fn update_password_hash(&self, id: Uuid, hash: &str) -> AppResult<bool> {
        let result =
            sqlx::query("UPDATE users SET password_hash = $2, updated_at = NOW() WHERE id = $1")
                .bind(id)
                .bind(hash)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to update password", e)
                })?;
        Ok(result.rows_affected() > 0)
    }

    async fn set_refresh_token(&self, id: Uuid, token: Option<&str>) -> AppResult<bool> {
        let result =
            sqlx::query("UPDATE users SET refresh_token = $2, updated_at = NOW() WHERE id = $1")
                .bind(id)
                .bind(token)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to set refresh token", e)
                })?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete user", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn tags(&self, id: Uuid) -> AppResult<Option<Vec<String>>> {
        sqlx::query_scalar::<_, Vec<String>>("SELECT tags FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load user tags", e))
    }

    async fn add_tag(&self, id: Uuid, tag: &str) -> AppResult<bool> {
        // Set semantics: appending an existing tag leaves the array as is,
        // but the row is still touched so `rows_affected` reports existence.
        let result = sqlx::query(
            "UPDATE users SET tags = CASE WHEN $2 = ANY(tags) THEN tags \
                                          ELSE array_append(tags, $2) END, \
                              updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(id)
        .bind(tag)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to add tag", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn remove_tag(&self, id: Uuid, tag: &str) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE users SET tags = array_remove(tags, $2), updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(tag)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to remove tag", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_index(&self, id: Uuid) -> AppResult<Option<ListIndex>> {
        let row: Option<(Vec<Uuid>, Vec<Uuid>)> = sqlx::query_as(
            "SELECT status_based_lists, theme_based_lists FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load list index", e))?;

        Ok(row.map(|(status_based, theme_based)| ListIndex {
            status_based,
            theme_based,
        }))
    }

    async fn attach_list(&self, id: Uuid, list_id: Uuid, kind: ListKind) -> AppResult<bool> {
        let column = Self::index_column(kind);
        let sql = format!(
            "UPDATE users SET {column} = array_append({column}, $2), updated_at = NOW() \
             WHERE id = $1"
        );
        let result = sqlx::query(&sql)
            .bind(id)
            .bind(list_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to attach list", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn detach_list(&self, id: Uuid, list_id: Uuid, kind: ListKind) -> AppResult<bool> {
        let column = Self::index_column(kind);
        let sql = format!(
            "UPDATE users SET {column} = array_remove({column}, $2), updated_at = NOW() \
             WHERE id = $1"
        );
        let result = sqlx::query(&sql)
            .bind(id)
            .bind(list_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to detach list", e))?;
        Ok(result.rows_affected() > 0)
    }
}
