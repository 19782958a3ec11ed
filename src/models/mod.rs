//! This module defines the domain data types.

pub use amount::Amount;
pub use category::{Category, CategoryName};
pub use month::{YearMonth, format_date, parse_date};
pub use transaction::{Transaction, TransactionBuilder, TransactionUpdate};

mod amount;
mod category;
mod month;
mod transaction;

/// Alias for the integer type used for mapping to database IDs.
pub type DatabaseID = i64;
