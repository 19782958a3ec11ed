//! Implements a SQLite backed transaction store.

use std::sync::{Arc, Mutex};

use rusqlite::{Connection, Row, params_from_iter, types::Value};
use time::OffsetDateTime;

use crate::{
    Error,
    db::{CreateTable, MapRow},
    models::{
        CategoryName, DatabaseID, Transaction, TransactionBuilder, TransactionUpdate, format_date,
    },
    stores::{
        TransactionStore,
        transaction::{TransactionEntry, TransactionQuery},
    },
};

const TRANSACTION_COLUMNS: &str =
    "t.id, t.amount, t.date, t.description, t.category_id, t.created_at, t.updated_at";

/// Stores transactions in a SQLite database.
///
/// Because a transaction may reference a [Category](crate::models::Category),
/// the category table must also be set up in the database (see
/// [initialize](crate::db::initialize)).
#[derive(Debug, Clone)]
pub struct SQLiteTransactionStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteTransactionStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    /// Build the SELECT statement and its parameters for `query`.
    ///
    /// The ORDER BY clause makes listings deterministic: newest date first,
    /// and the higher (more recently assigned) ID first within a day.
    fn build_select(columns: &str, from: &str, query: TransactionQuery) -> (String, Vec<Value>) {
        let mut query_string_parts = vec![format!("SELECT {columns} FROM {from}")];
        let mut query_parameters = vec![];

        if let Some(month) = query.month {
            query_string_parts.push(format!(
                "WHERE t.date BETWEEN ?{} AND ?{}",
                query_parameters.len() + 1,
                query_parameters.len() + 2,
            ));
            query_parameters.push(Value::Text(format_date(month.first_day())));
            query_parameters.push(Value::Text(format_date(month.last_day())));
        }

        query_string_parts.push("ORDER BY t.date DESC, t.id DESC".to_string());

        if let Some(limit) = query.limit {
            query_string_parts.push(format!("LIMIT {limit}"));
        }

        (query_string_parts.join(" "), query_parameters)
    }
}

impl TransactionStore for SQLiteTransactionStore {
    /// Create a new transaction in the database.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::UnknownCategory] if the builder's category ID does not refer
    ///   to a valid category,
    /// - or [Error::StorageUnavailable] if there is some other SQL error.
    fn create(&mut self, builder: TransactionBuilder) -> Result<Transaction, Error> {
        let connection = self.connection.lock().unwrap();
        let now = OffsetDateTime::now_utc();

        let transaction = connection
            .prepare(
                "INSERT INTO \"transaction\"
                     (amount, date, description, category_id, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                 RETURNING id, amount, date, description, category_id, created_at, updated_at",
            )?
            .query_row(
                (
                    builder.amount,
                    builder.date,
                    &builder.description,
                    builder.category_id,
                    now,
                    now,
                ),
                Self::map_row,
            )
            .map_err(|error| match error {
                // Code 787 occurs when a FOREIGN KEY constraint failed.
                // The caller tried to file the transaction under a
                // non-existent category.
                rusqlite::Error::SqliteFailure(error, Some(_)) if error.extended_code == 787 => {
                    Error::UnknownCategory(builder.category_id)
                }
                error => error.into(),
            })?;

        tracing::debug!(id = transaction.id, "created transaction");

        Ok(transaction)
    }

    /// Retrieve a transaction in the database by its `id`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if `id` does not refer to a valid transaction,
    /// - or [Error::StorageUnavailable] if there is some other SQL error.
    fn get(&self, id: DatabaseID) -> Result<Transaction, Error> {
        let transaction = self
            .connection
            .lock()
            .unwrap()
            .prepare(&format!(
                "SELECT {TRANSACTION_COLUMNS} FROM \"transaction\" t WHERE t.id = :id"
            ))?
            .query_row(&[(":id", &id)], Self::map_row)?;

        Ok(transaction)
    }

    /// Query for transactions in the database.
    ///
    /// # Errors
    /// This function will return an [Error::StorageUnavailable] if there is
    /// an SQL error.
    fn get_query(&self, query: TransactionQuery) -> Result<Vec<Transaction>, Error> {
        let (query_string, query_parameters) =
            Self::build_select(TRANSACTION_COLUMNS, "\"transaction\" t", query);

        self.connection
            .lock()
            .unwrap()
            .prepare(&query_string)?
            .query_map(params_from_iter(query_parameters.iter()), Self::map_row)?
            .map(|maybe_transaction| maybe_transaction.map_err(|error| error.into()))
            .collect()
    }

    /// Query for transactions joined with their category names.
    ///
    /// # Errors
    /// This function will return an [Error::StorageUnavailable] if there is
    /// an SQL error.
    fn get_entries(&self, query: TransactionQuery) -> Result<Vec<TransactionEntry>, Error> {
        // LEFT JOIN so uncategorised transactions still appear in listings.
        let (query_string, query_parameters) = Self::build_select(
            &format!("{TRANSACTION_COLUMNS}, c.name"),
            "\"transaction\" t LEFT JOIN category c ON t.category_id = c.id",
            query,
        );

        self.connection
            .lock()
            .unwrap()
            .prepare(&query_string)?
            .query_map(params_from_iter(query_parameters.iter()), |row| {
                let transaction = Self::map_row(row)?;
                let category_name: Option<String> = row.get(7)?;

                Ok(TransactionEntry {
                    transaction,
                    category_name: category_name
                        .map(|raw_name| CategoryName::new_unchecked(&raw_name)),
                })
            })?
            .map(|maybe_entry| maybe_entry.map_err(|error| error.into()))
            .collect()
    }

    /// Apply a sparse set of changes to the transaction with `id`.
    ///
    /// The read and the write happen under the one connection lock, so the
    /// merge cannot lose a concurrent update. Fields absent from `update`
    /// keep the stored values read in the first step; `updated_at` is
    /// refreshed unconditionally, even when `update` is empty.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if `id` does not refer to a valid transaction,
    /// - [Error::UnknownCategory] if the update's category ID does not refer
    ///   to a valid category,
    /// - or [Error::StorageUnavailable] if there is some other SQL error.
    fn update(&mut self, id: DatabaseID, update: TransactionUpdate) -> Result<Transaction, Error> {
        let connection = self.connection.lock().unwrap();

        let mut transaction = connection
            .prepare(&format!(
                "SELECT {TRANSACTION_COLUMNS} FROM \"transaction\" t WHERE t.id = :id"
            ))?
            .query_row(&[(":id", &id)], Self::map_row)?;

        if let Some(amount) = update.amount {
            transaction.amount = amount;
        }
        if let Some(date) = update.date {
            transaction.date = date;
        }
        if let Some(description) = update.description {
            transaction.description = description;
        }
        if let Some(category_id) = update.category_id {
            transaction.category_id = category_id;
        }
        transaction.updated_at = OffsetDateTime::now_utc();

        connection
            .execute(
                "UPDATE \"transaction\"
                 SET amount = ?1, date = ?2, description = ?3, category_id = ?4, updated_at = ?5
                 WHERE id = ?6",
                (
                    transaction.amount,
                    transaction.date,
                    &transaction.description,
                    transaction.category_id,
                    transaction.updated_at,
                    id,
                ),
            )
            .map_err(|error| match error {
                // Code 787 occurs when a FOREIGN KEY constraint failed.
                rusqlite::Error::SqliteFailure(error, Some(_)) if error.extended_code == 787 => {
                    Error::UnknownCategory(transaction.category_id)
                }
                error => error.into(),
            })?;

        tracing::debug!(id, "updated transaction");

        Ok(transaction)
    }

    /// Delete the transaction with `id` from the database.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if `id` does not refer to a valid transaction,
    /// - or [Error::StorageUnavailable] if there is some other SQL error.
    fn delete(&mut self, id: DatabaseID) -> Result<(), Error> {
        let rows_deleted = self
            .connection
            .lock()
            .unwrap()
            .execute("DELETE FROM \"transaction\" WHERE id = ?1", (id,))?;

        if rows_deleted == 0 {
            return Err(Error::NotFound);
        }

        tracing::debug!(id, "deleted transaction");

        Ok(())
    }
}

impl CreateTable for SQLiteTransactionStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        // Amounts are INTEGER cents, never REAL: summing many binary floats
        // drifts at the cent level. AUTOINCREMENT keeps deleted IDs from
        // ever being reassigned.
        connection.execute(
            "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                amount INTEGER NOT NULL,
                date TEXT NOT NULL,
                description TEXT NOT NULL,
                category_id INTEGER,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                FOREIGN KEY(category_id) REFERENCES category(id)
            )",
            (),
        )?;

        Ok(())
    }
}

impl MapRow for SQLiteTransactionStore {
    type ReturnType = Transaction;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error> {
        Ok(Self::ReturnType {
            id: row.get(offset)?,
            amount: row.get(offset + 1)?,
            date: row.get(offset + 2)?,
            description: row.get(offset + 3)?,
            category_id: row.get(offset + 4)?,
            created_at: row.get(offset + 5)?,
            updated_at: row.get(offset + 6)?,
        })
    }
}
