//! List repository implementation.
//!
//! Items live in the `items` JSONB column of their containing list, so
//! item-level mutations are read-modify-write cycles under a row lock.

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use medialist_core::error::{AppError, ErrorKind};
use medialist_core::result::AppResult;
use medialist_entity::list::{
    validate_item_patch, Item, ItemPatch, List, ListDetailsPatch, NewList,
};

use crate::store::ListStore;

/// Repository for list CRUD and embedded item mutations.
#[derive(Debug, Clone)]
pub struct ListRepository {
    pool: PgPool,
}

impl ListRepository {
    /// Create a new list repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ListStore for ListRepository {
    async fn create(&self, new_list: &NewList) -> AppResult<List> {
        sqlx::query_as::<_, List>(
            "INSERT INTO lists (name, privacy, kind, items) \
             VALUES ($1, $2, $3, $4) \
             RETURNING *",
        )
        .bind(&new_list.name)
        .bind(new_list.privacy)
        .bind(new_list.kind)
        .bind(Json(&new_list.items))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create list", e))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<List>> {
        sqlx::query_as::<_, List>("SELECT * FROM lists WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find list by id", e))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM lists WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete list", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn update_details(
        &self,
        id: Uuid,
        patch: &ListDetailsPatch,
    ) -> AppResult<Option<List>> {
        sqlx::query_as::<_, List>(
            "UPDATE lists SET name = COALESCE($2, name), \
                              privacy = COALESCE($3, privacy), \
                              updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&patch.name)
        .bind(patch.privacy)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update list", e))
    }

    async fn add_items(&self, id: Uuid, items: &[Item]) -> AppResult<Option<List>> {
        sqlx::query_as::<_, List>(
            "UPDATE lists SET items = items || $2::jsonb, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(Json(items))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to add items", e))
    }

    async fn remove_items(&self, id: Uuid, media_ids: &[String]) -> AppResult<Option<List>> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let Some(list) =
            sqlx::query_as::<_, List>("SELECT * FROM lists WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to lock list", e)
                })?
        else {
            return Ok(None);
        };

        let items: Vec<Item> = list
            .items
            .0
            .into_iter()
            .filter(|item| !media_ids.contains(&item.media_id))
            .collect();

        let updated = sqlx::query_as::<_, List>(
            "UPDATE lists SET items = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(Json(&items))
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to remove items", e))?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
        })?;
        Ok(Some(updated))
    }

    async fn update_item(
        &self,
        id: Uuid,
        media_id: &str,
        patch: &ItemPatch,
    ) -> AppResult<Option<List>> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let Some(list) =
            sqlx::query_as::<_, List>("SELECT * FROM lists WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to lock list", e)
                })?
        else {
            return Ok(None);
        };

        // The restriction is checked against the locked row's kind so it
        // cannot race a concurrent detail change. Dropping the transaction
        // on error rolls the lock back.
        validate_item_patch(list.kind, patch)?;

        let mut items = list.items.0;
        let Some(item) = items.iter_mut().find(|item| item.media_id == media_id) else {
            return Ok(None);
        };
        patch.apply(item);

        let updated = sqlx::query_as::<_, List>(
            "UPDATE lists SET items = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(Json(&items))
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update item", e))?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
        })?;
        Ok(Some(updated))
    }

    async fn remove_tag_from_items(&self, list_ids: &[Uuid], tag: &str) -> AppResult<u64> {
        if list_ids.is_empty() {
            return Ok(0);
        }

        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let lists =
            sqlx::query_as::<_, List>("SELECT * FROM lists WHERE id = ANY($1) FOR UPDATE")
                .bind(list_ids)
                .fetch_all(&mut *tx)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to lock lists", e)
                })?;

        let mut modified: u64 = 0;
        for list in lists {
            let mut items = list.items.0;
            let mut touched = false;
            for item in &mut items {
                let before = item.tags.len();
                item.tags.retain(|t| t != tag);
                if item.tags.len() != before {
                    modified += 1;
                    touched = true;
                }
            }
            if touched {
                sqlx::query("UPDATE lists SET items = $2, updated_at = NOW() WHERE id = $1")
                    .bind(list.id)
                    .bind(Json(&items))
                    .execute(&mut *tx)
                    .await
                    .map_err(|e| {
                        AppError::with_source(ErrorKind::Database, "Failed to strip item tags", e)
                    })?;
            }
        }

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
        })?;
        Ok(modified)
    }
}
