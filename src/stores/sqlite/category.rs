//! Implements a SQLite backed category store.

use std::sync::{Arc, Mutex};

use rusqlite::{Connection, Row};
use time::OffsetDateTime;

use crate::{
    Error,
    db::{CreateTable, MapRow},
    models::{Category, CategoryName, DatabaseID},
    stores::CategoryStore,
};

/// Creates and retrieves transaction categories to/from a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteCategoryStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteCategoryStore {
    /// Create a new category store with a SQLite database.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

impl CategoryStore for SQLiteCategoryStore {
    /// Create a category in the database.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::DuplicateName] if a category named `name` already exists,
    /// - or [Error::StorageUnavailable] if there is some other SQL error.
    fn create(
        &mut self,
        name: CategoryName,
        description: Option<String>,
    ) -> Result<Category, Error> {
        let connection = self.connection.lock().unwrap();

        let category = connection
            .prepare(
                "INSERT INTO category (name, description, created_at)
                 VALUES (?1, ?2, ?3)
                 RETURNING id, name, description, created_at",
            )?
            .query_row(
                (name.as_ref(), &description, OffsetDateTime::now_utc()),
                Self::map_row,
            )
            .map_err(|error| match error {
                // Code 2067 occurs when a UNIQUE constraint failed.
                rusqlite::Error::SqliteFailure(error, Some(_)) if error.extended_code == 2067 => {
                    Error::DuplicateName(name.to_string())
                }
                error => error.into(),
            })?;

        tracing::debug!(id = category.id, name = %category.name, "created category");

        Ok(category)
    }

    /// Retrieve the category with `category_id` from the database.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if `category_id` does not refer to a valid category,
    /// - or [Error::StorageUnavailable] if there is some other SQL error.
    fn get(&self, category_id: DatabaseID) -> Result<Category, Error> {
        self.connection
            .lock()
            .unwrap()
            .prepare("SELECT id, name, description, created_at FROM category WHERE id = :id")?
            .query_row(&[(":id", &category_id)], Self::map_row)
            .map_err(|error| error.into())
    }

    /// Retrieve all categories in the database, sorted by name ascending.
    ///
    /// # Errors
    /// This function will return an [Error::StorageUnavailable] if there is
    /// an SQL error.
    fn get_all(&self) -> Result<Vec<Category>, Error> {
        self.connection
            .lock()
            .unwrap()
            .prepare("SELECT id, name, description, created_at FROM category ORDER BY name ASC")?
            .query_map([], Self::map_row)?
            .map(|maybe_category| maybe_category.map_err(|error| error.into()))
            .collect()
    }

    /// Delete the category with `category_id` from the database.
    ///
    /// The referencing-transaction check and the delete run under the one
    /// connection lock so a transaction cannot slip in between them.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if `category_id` does not refer to a valid category,
    /// - [Error::InUse] if at least one transaction references the category,
    /// - or [Error::StorageUnavailable] if there is some other SQL error.
    fn delete(&mut self, category_id: DatabaseID) -> Result<(), Error> {
        let connection = self.connection.lock().unwrap();

        let reference_count: i64 = connection.query_row(
            "SELECT COUNT(*) FROM \"transaction\" WHERE category_id = :id",
            &[(":id", &category_id)],
            |row| row.get(0),
        )?;

        if reference_count > 0 {
            return Err(Error::InUse);
        }

        let rows_deleted =
            connection.execute("DELETE FROM category WHERE id = ?1", (category_id,))?;

        if rows_deleted == 0 {
            return Err(Error::NotFound);
        }

        tracing::debug!(id = category_id, "deleted category");

        Ok(())
    }
}

impl CreateTable for SQLiteCategoryStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        // AUTOINCREMENT keeps deleted IDs from ever being reassigned.
        connection.execute(
            "CREATE TABLE IF NOT EXISTS category (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL UNIQUE,
                description TEXT,
                created_at TEXT NOT NULL
            )",
            (),
        )?;

        Ok(())
    }
}

impl MapRow for SQLiteCategoryStore {
    type ReturnType = Category;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error> {
        let id = row.get(offset)?;

        let raw_name: String = row.get(offset + 1)?;
        let name = CategoryName::new_unchecked(&raw_name);

        let description = row.get(offset + 2)?;
        let created_at = row.get(offset + 3)?;

        Ok(Self::ReturnType {
            id,
            name,
            description,
            created_at,
        })
    }
}
