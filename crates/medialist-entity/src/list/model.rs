//! List entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::item::Item;
use super::kind::{ListKind, Privacy};

/// Bounds for list names.
pub const LIST_NAME_MIN: usize = 3;
/// Upper bound for list names.
pub const LIST_NAME_MAX: usize = 100;

/// A named, privacy-scoped collection of media items owned by exactly
/// one user. The owning user's index array (matching `kind`) is the
/// authoritative ownership record; a list with no owner is an orphan
/// and must be deleted.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct List {
    /// Unique list identifier.
    pub id: Uuid,
    /// List name (3-100 characters).
    pub name: String,
    /// Visibility.
    pub privacy: Privacy,
    /// Category; immutable after creation.
    #[serde(rename = "type")]
    #[sqlx(rename = "kind")]
    pub kind: ListKind,
    /// Embedded media items, in order.
    pub items: sqlx::types::Json<Vec<Item>>,
    /// When the list was created.
    pub added_at: DateTime<Utc>,
    /// When the list was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a new list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewList {
    /// List name.
    pub name: String,
    /// Visibility.
    pub privacy: Privacy,
    /// Category.
    #[serde(rename = "type")]
    pub kind: ListKind,
    /// Initial items.
    #[serde(default)]
    pub items: Vec<Item>,
}

impl NewList {
    /// Validate the name length bounds.
    pub fn validate(&self) -> medialist_core::AppResult<()> {
        let len = self.name.chars().count();
        if !(LIST_NAME_MIN..=LIST_NAME_MAX).contains(&len) {
            return Err(medialist_core::AppError::validation(format!(
                "List name must be between {LIST_NAME_MIN} and {LIST_NAME_MAX} characters"
            )));
        }
        Ok(())
    }
}

/// Sparse patch over the mutable list details. `kind` is deliberately
/// absent: the category is immutable after creation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListDetailsPatch {
    /// New name.
    pub name: Option<String>,
    /// New visibility.
    pub privacy: Option<Privacy>,
}

impl ListDetailsPatch {
    /// Whether the patch carries at least one field.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.privacy.is_none()
    }
}
