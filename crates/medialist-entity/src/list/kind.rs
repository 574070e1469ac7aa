//! List kind and privacy enumerations.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The category of a list. Immutable after creation: it determines which
/// of the owning user's index arrays holds the list reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "list_kind", rename_all = "snake_case")]
#[serde(rename_all = "camelCase")]
pub enum ListKind {
    /// Progress tracking (watching, finished, dropped, ...).
    StatusBased,
    /// Thematic grouping (favorites, best soundtracks, ...).
    ThemeBased,
}

impl ListKind {
    /// Return the kind using its wire spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StatusBased => "statusBased",
            Self::ThemeBased => "themeBased",
        }
    }
}

impl fmt::Display for ListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ListKind {
    type Err = medialist_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "statusBased" => Ok(Self::StatusBased),
            "themeBased" => Ok(Self::ThemeBased),
            _ => Err(medialist_core::AppError::validation(format!(
                "Invalid list type: '{s}'. Expected one of: statusBased, themeBased"
            ))),
        }
    }
}

/// Whether a list is visible to other users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "list_privacy", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Privacy {
    /// Visible to everyone.
    Public,
    /// Visible only to the owner.
    Private,
}

impl Privacy {
    /// Return the privacy as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Private => "private",
        }
    }
}

impl fmt::Display for Privacy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Privacy {
    type Err = medialist_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "public" => Ok(Self::Public),
            "private" => Ok(Self::Private),
            _ => Err(medialist_core::AppError::validation(format!(
                "Invalid privacy: '{s}'. Expected one of: public, private"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_str_uses_wire_spelling() {
        assert_eq!(
            "statusBased".parse::<ListKind>().unwrap(),
            ListKind::StatusBased
        );
        assert_eq!(
            "themeBased".parse::<ListKind>().unwrap(),
            ListKind::ThemeBased
        );
        // Kind values are not privacy values and vice versa.
        assert!("public".parse::<ListKind>().is_err());
        assert!("statusBased".parse::<Privacy>().is_err());
    }
}
