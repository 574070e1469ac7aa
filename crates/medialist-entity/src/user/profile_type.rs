//! Profile visibility enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Whether a user's profile is discoverable by name search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "profile_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ProfileType {
    /// Profile appears in name searches.
    Public,
    /// Profile is hidden from name searches.
    Private,
}

impl ProfileType {
    /// Return the profile type as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Private => "private",
        }
    }
}

impl fmt::Display for ProfileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ProfileType {
    type Err = medialist_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "public" => Ok(Self::Public),
            "private" => Ok(Self::Private),
            _ => Err(medialist_core::AppError::validation(format!(
                "Invalid profile type: '{s}'. Expected one of: public, private"
            ))),
        }
    }
}
