//! Defines the `Category` type and its validated name. A category classifies
//! transactions; a transaction may reference at most one category.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{Error, models::DatabaseID};

/// The name of a category.
///
/// Names are case-sensitive, unique across all categories, and never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategoryName(String);

impl CategoryName {
    /// Create a category name.
    ///
    /// The name is stored verbatim, including any surrounding whitespace.
    ///
    /// # Errors
    /// Returns [Error::EmptyName] if `name` is empty or whitespace-only.
    pub fn new(name: &str) -> Result<Self, Error> {
        if name.trim().is_empty() {
            Err(Error::EmptyName)
        } else {
            Ok(Self(name.to_string()))
        }
    }

    /// Create a category name without validation.
    ///
    /// The caller should ensure that the string is not empty. This function
    /// has `_unchecked` in the name but is not `unsafe`: violating the
    /// non-empty invariant causes incorrect behaviour, not memory unsafety.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl AsRef<str> for CategoryName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for CategoryName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A classification for transactions, e.g. 'Food & Dining' or 'Transportation'.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Category {
    /// The ID of the category. Assigned by the store, never reused.
    pub id: DatabaseID,
    /// The unique name of the category.
    pub name: CategoryName,
    /// An optional free-form description.
    pub description: Option<String>,
    /// When the category was created (UTC). Set once, immutable.
    pub created_at: OffsetDateTime,
}
