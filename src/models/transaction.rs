//! Defines the `Transaction` type, the core type of the ledger, along with
//! the builder used to create one and the sparse patch used to edit one.

use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::models::{Amount, DatabaseID};

/// A single ledger entry: money spent or earned on a particular date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction. Assigned by the store, never reused.
    pub id: DatabaseID,
    /// The amount of money spent or earned.
    pub amount: Amount,
    /// When the transaction happened. A calendar date, no time component.
    pub date: Date,
    /// A free-form description. The empty string means "no description".
    pub description: String,
    /// The category this transaction is filed under, if any.
    pub category_id: Option<DatabaseID>,
    /// When the record was created (UTC). Set once, immutable.
    pub created_at: OffsetDateTime,
    /// When the record was last modified (UTC). Refreshed on every
    /// successful update; always at or after `created_at`.
    pub updated_at: OffsetDateTime,
}

/// Builder for creating a new [Transaction] via
/// [TransactionStore::create](crate::stores::TransactionStore::create).
///
/// The date defaults to today (UTC), the description to the empty string and
/// the category to none.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionBuilder {
    /// The amount of money spent or earned.
    pub amount: Amount,
    /// When the transaction happened.
    pub date: Date,
    /// A free-form description.
    pub description: String,
    /// The category to file the transaction under, if any.
    pub category_id: Option<DatabaseID>,
}

impl TransactionBuilder {
    /// Create a builder for a transaction of `amount`.
    pub fn new(amount: Amount) -> Self {
        Self {
            amount,
            date: OffsetDateTime::now_utc().date(),
            description: String::new(),
            category_id: None,
        }
    }

    /// Set the date of the transaction.
    pub fn date(mut self, date: Date) -> Self {
        self.date = date;
        self
    }

    /// Set the description of the transaction.
    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    /// Set the category of the transaction.
    pub fn category(mut self, category_id: Option<DatabaseID>) -> Self {
        self.category_id = category_id;
        self
    }
}

/// A sparse set of changes to apply to an existing [Transaction].
///
/// Each field is either absent (`None`), meaning "keep the stored value", or
/// present (`Some`), meaning "validate and apply this value". Present and
/// absent are distinct signals: `with_description("")` clears the description
/// to the empty string, and [clear_category](TransactionUpdate::clear_category)
/// removes the category reference, while a default update changes no field at
/// all (but still counts as an update for `updated_at`).
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TransactionUpdate {
    /// Replacement amount, if supplied.
    pub amount: Option<Amount>,
    /// Replacement date, if supplied.
    pub date: Option<Date>,
    /// Replacement description, if supplied. May be the empty string.
    pub description: Option<String>,
    /// Replacement category reference, if supplied. The inner `None` is the
    /// sentinel meaning "no category".
    pub category_id: Option<Option<DatabaseID>>,
}

impl TransactionUpdate {
    /// An update that changes no field.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the amount.
    pub fn with_amount(mut self, amount: Amount) -> Self {
        self.amount = Some(amount);
        self
    }

    /// Replace the date.
    pub fn with_date(mut self, date: Date) -> Self {
        self.date = Some(date);
        self
    }

    /// Replace the description. The empty string clears it.
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// File the transaction under `category_id`.
    pub fn with_category(mut self, category_id: DatabaseID) -> Self {
        self.category_id = Some(Some(category_id));
        self
    }

    /// Remove the category reference.
    pub fn clear_category(mut self) -> Self {
        self.category_id = Some(None);
        self
    }
}
