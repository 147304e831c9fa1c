//! Retrieval scopes over the record active flag.
//!
//! Every adapter filters through [`Visibility::is_active_filter`] or
//! [`Visibility::includes`], so the predicate lives in one place.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Named read view over stored records.
///
/// `Active` and `Inactive` partition `All`: each record falls in exactly one
/// of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    /// Every record regardless of the active flag.
    All,
    /// Records with `is_active = true`.
    Active,
    /// Records with `is_active = false` (soft deleted).
    Inactive,
}

impl Visibility {
    /// Value the `is_active` column must equal, or `None` for no filter.
    ///
    /// # Examples
    /// ```
    /// use groundwork::domain::Visibility;
    ///
    /// assert_eq!(Visibility::All.is_active_filter(), None);
    /// assert_eq!(Visibility::Inactive.is_active_filter(), Some(false));
    /// ```
    #[must_use]
    pub const fn is_active_filter(self) -> Option<bool> {
        match self {
            Self::All => None,
            Self::Active => Some(true),
            Self::Inactive => Some(false),
        }
    }

    /// Whether a record with the given flag is visible in this scope.
    #[must_use]
    pub fn includes(self, is_active: bool) -> bool {
        self.is_active_filter().is_none_or(|flag| flag == is_active)
    }

    /// Stable lowercase name used in query strings and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown scope name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown visibility scope '{0}'; expected all|active|inactive")]
pub struct UnknownVisibility(String);

impl FromStr for Visibility {
    type Err = UnknownVisibility;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            other => Err(UnknownVisibility(other.to_owned())),
        }
    }
}
