//! Defines the category store trait.

use crate::{
    Error,
    models::{Category, CategoryName, DatabaseID},
};

/// Creates, retrieves and deletes transaction categories.
pub trait CategoryStore {
    /// Create a new category and add it to the store.
    ///
    /// # Errors
    /// Returns [Error::DuplicateName] if a category with `name` already
    /// exists, or [Error::StorageUnavailable] if there is an SQL error.
    fn create(&mut self, name: CategoryName, description: Option<String>)
    -> Result<Category, Error>;

    /// Get a category by its ID.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if `category_id` does not refer to a
    /// category, or [Error::StorageUnavailable] if there is an SQL error.
    fn get(&self, category_id: DatabaseID) -> Result<Category, Error>;

    /// Get all categories, sorted by name ascending.
    ///
    /// # Errors
    /// Returns [Error::StorageUnavailable] if there is an SQL error.
    fn get_all(&self) -> Result<Vec<Category>, Error>;

    /// Delete a category.
    ///
    /// Deletion is rejected while any transaction still references the
    /// category: transactions hold a reference to a category, not the other
    /// way around, so removing the category would orphan them.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if `category_id` does not refer to a
    /// category, [Error::InUse] if at least one transaction references it,
    /// or [Error::StorageUnavailable] if there is an SQL error.
    fn delete(&mut self, category_id: DatabaseID) -> Result<(), Error>;
}
