//! Tally is a personal ledger engine: it records monetary transactions, each
//! optionally tagged to a category, and produces aggregate reports over
//! calendar-month windows.
//!
//! This library deliberately contains no user interface. The [Ledger] facade
//! returns plain value objects and typed errors so that any front end
//! (console, web, GUI) can render them. The SQLite backend is wired up with
//! [create_ledger].

#![warn(missing_docs)]

pub mod db;
mod engine;
pub mod export;
pub mod models;
pub mod stores;
pub mod summary;

pub use engine::{DEFAULT_CATEGORIES, Ledger};
pub use stores::sqlite::{SQLLedger, create_ledger};

use crate::models::DatabaseID;

/// The errors that may occur in the ledger.
///
/// Every variant except [Error::StorageUnavailable] indicates invalid input
/// and is recoverable at the call site. [Error::StorageUnavailable] indicates
/// a fault in the underlying storage and is the only "system problem" kind.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// An empty or whitespace-only string was used as a category name.
    #[error("category names must not be empty")]
    EmptyName,

    /// A category with the given name already exists.
    #[error("a category named \"{0}\" already exists")]
    DuplicateName(String),

    /// The requested record could not be found.
    #[error("the requested record could not be found")]
    NotFound,

    /// Tried to delete a category that is still referenced by at least one
    /// transaction.
    #[error("the category is still referenced by one or more transactions")]
    InUse,

    /// A string could not be parsed as a monetary amount with at most two
    /// decimal places.
    #[error("\"{0}\" is not a valid amount")]
    InvalidAmount(String),

    /// A string could not be parsed as a calendar date or month.
    #[error("\"{0}\" is not a valid date")]
    InvalidDate(String),

    /// The category ID used to create or update a transaction did not match
    /// an existing category.
    #[error("the category ID {0:?} does not refer to a valid category")]
    UnknownCategory(Option<DatabaseID>),

    /// An unexpected error in the underlying storage.
    ///
    /// Unlike the other variants this does not mean the input was bad, and
    /// retrying with different parameters will not help.
    #[error("the underlying storage is unavailable: {0}")]
    StorageUnavailable(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {error}");
                Error::StorageUnavailable(error)
            }
        }
    }
}
