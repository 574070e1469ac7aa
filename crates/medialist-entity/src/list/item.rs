//! Embedded media items and their patch type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A media entry embedded in a list. Items have no independent lifecycle:
/// they exist only inside their containing list's `items` column.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// External catalog identifier.
    pub media_id: String,
    /// Media title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Catalog metadata snapshot.
    pub information: MediaInformation,
    /// Free-form user notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_notes: Option<String>,
    /// User tags on this item.
    #[serde(default)]
    pub tags: Vec<String>,
    /// User's rating (theme-based lists only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_rating: Option<f64>,
    /// Anticipation score (status-based lists only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anticipation: Option<i32>,
    /// Manual ordering position.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<i32>,
}

/// Metadata pulled from the external media catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaInformation {
    /// When the catalog entry was created.
    pub created_at: DateTime<Utc>,
    /// When the catalog entry was last updated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Catalog-wide rating.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    /// Age rating label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_rating: Option<String>,
    /// Poster image URL.
    pub poster_image: String,
    /// Cover image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    /// Genre labels.
    #[serde(default)]
    pub genres: Vec<String>,
}

/// Sparse patch over an item's user-mutable fields.
///
/// Presence is `Option::Some`, never truthiness: an explicit `0` rating
/// is a real update and is applied like any other value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemPatch {
    /// Replace the item's tag list.
    pub tags: Option<Vec<String>>,
    /// Replace the user notes.
    pub custom_notes: Option<String>,
    /// Replace the user rating.
    pub user_rating: Option<f64>,
    /// Replace the anticipation score.
    pub anticipation: Option<i32>,
    /// Replace the sort position.
    pub sort_order: Option<i32>,
}

impl ItemPatch {
    /// Whether the patch carries at least one field.
    pub fn is_empty(&self) -> bool {
        self.tags.is_none()
            && self.custom_notes.is_none()
            && self.user_rating.is_none()
            && self.anticipation.is_none()
            && self.sort_order.is_none()
    }

    /// Apply every present field onto the item.
    pub fn apply(&self, item: &mut Item) {
        if let Some(tags) = &self.tags {
            item.tags = tags.clone();
        }
        if let Some(notes) = &self.custom_notes {
            item.custom_notes = Some(notes.clone());
        }
        if let Some(rating) = self.user_rating {
            item.user_rating = Some(rating);
        }
        if let Some(anticipation) = self.anticipation {
            item.anticipation = Some(anticipation);
        }
        if let Some(sort_order) = self.sort_order {
            item.sort_order = Some(sort_order);
        }
    }
}
