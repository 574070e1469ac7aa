//! Kind-specific restrictions on item updates.
//!
//! Status-based lists track progress and reject `userRating` edits;
//! theme-based lists are curated rankings and reject `anticipation`
//! edits. The check is keyed on the list's `kind` (the upstream schema
//! mistakenly consulted `privacy` here) and runs inside the store's
//! update step so the restriction cannot race a concurrent change.

use medialist_core::{AppError, AppResult};

use super::item::ItemPatch;
use super::kind::ListKind;

/// Reject patch fields that are not editable for the given list kind.
pub fn validate_item_patch(kind: ListKind, patch: &ItemPatch) -> AppResult<()> {
    match kind {
        ListKind::StatusBased => {
            if patch.user_rating.is_some() {
                return Err(AppError::validation(
                    "userRating cannot be edited on a statusBased list",
                ));
            }
        }
        ListKind::ThemeBased => {
            if patch.anticipation.is_some() {
                return Err(AppError::validation(
                    "anticipation cannot be edited on a themeBased list",
                ));
            }
        }
    }
    Ok(())
}
