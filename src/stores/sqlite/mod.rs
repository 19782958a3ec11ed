//! Contains the SQLite backed store implementations and a convenience
//! constructor for a [Ledger] that uses them.

pub mod category;
pub mod transaction;

pub use category::SQLiteCategoryStore;
pub use transaction::SQLiteTransactionStore;

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{Error, Ledger, db::initialize};

/// An alias for a [Ledger] that uses SQLite for the backend.
pub type SQLLedger = Ledger<SQLiteCategoryStore, SQLiteTransactionStore>;

/// Creates a [Ledger] backed by the SQLite database `connection`.
///
/// This function will modify the database by adding the tables for the domain
/// models, if they do not already exist. Both stores share the one connection;
/// it is closed when the ledger is dropped.
///
/// # Errors
/// Returns an [Error::StorageUnavailable] if the schema could not be set up.
pub fn create_ledger(connection: Connection) -> Result<SQLLedger, Error> {
    initialize(&connection)?;

    let connection = Arc::new(Mutex::new(connection));
    let category_store = SQLiteCategoryStore::new(connection.clone());
    let transaction_store = SQLiteTransactionStore::new(connection);

    Ok(Ledger::new(category_store, transaction_store))
}
