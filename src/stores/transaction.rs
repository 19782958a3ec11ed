//! Defines the transaction store trait and its query types.

use serde::{Deserialize, Serialize};

use crate::{
    Error,
    models::{CategoryName, DatabaseID, Transaction, TransactionBuilder, TransactionUpdate,
        YearMonth},
};

/// Handles the creation, retrieval, editing and deletion of transactions.
pub trait TransactionStore {
    /// Create a new transaction in the store.
    ///
    /// # Errors
    /// Returns [Error::UnknownCategory] if the builder's category ID does not
    /// refer to a valid category, or [Error::StorageUnavailable] if there is
    /// some other SQL error.
    fn create(&mut self, builder: TransactionBuilder) -> Result<Transaction, Error>;

    /// Retrieve a transaction from the store.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if `id` does not refer to a transaction, or
    /// [Error::StorageUnavailable] if there is some other SQL error.
    fn get(&self, id: DatabaseID) -> Result<Transaction, Error>;

    /// Retrieve transactions from the store in the way defined by `query`.
    ///
    /// Results are always ordered by date descending, then by ID descending
    /// so that same-day entries have a deterministic order.
    ///
    /// # Errors
    /// Returns [Error::StorageUnavailable] if there is an SQL error.
    fn get_query(&self, query: TransactionQuery) -> Result<Vec<Transaction>, Error>;

    /// Retrieve transactions joined with their category names, in the way
    /// defined by `query` and the same order as
    /// [get_query](TransactionStore::get_query).
    ///
    /// # Errors
    /// Returns [Error::StorageUnavailable] if there is an SQL error.
    fn get_entries(&self, query: TransactionQuery) -> Result<Vec<TransactionEntry>, Error>;

    /// Apply a sparse set of changes to an existing transaction and return
    /// the updated record.
    ///
    /// Fields absent from `update` keep their stored values; fields present
    /// are validated and applied. The record's `updated_at` is refreshed on
    /// every successful call, even when `update` changes no field.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if `id` does not refer to a transaction,
    /// [Error::UnknownCategory] if the update's category ID does not refer to
    /// a valid category, or [Error::StorageUnavailable] if there is some
    /// other SQL error.
    fn update(&mut self, id: DatabaseID, update: TransactionUpdate)
    -> Result<Transaction, Error>;

    /// Delete a transaction from the store.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if `id` does not refer to a transaction, or
    /// [Error::StorageUnavailable] if there is some other SQL error.
    fn delete(&mut self, id: DatabaseID) -> Result<(), Error>;
}

/// Defines which transactions should be fetched from
/// [TransactionStore::get_query] and [TransactionStore::get_entries].
///
/// The default query selects every transaction.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct TransactionQuery {
    /// Include only transactions whose date falls within this calendar month
    /// (inclusive boundaries).
    pub month: Option<YearMonth>,
    /// Selects up to the first N (`limit`) transactions.
    pub limit: Option<u64>,
}

/// A transaction joined with the name of its category, the shape consumed by
/// listings and the CSV exporter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionEntry {
    /// The transaction itself.
    pub transaction: Transaction,
    /// The name of the referenced category, or `None` for an uncategorised
    /// transaction.
    pub category_name: Option<CategoryName>,
}
