//! The ledger facade that front ends drive.

use crate::{
    Error, export,
    models::{
        Category, CategoryName, DatabaseID, Transaction, TransactionBuilder, TransactionUpdate,
        YearMonth,
    },
    stores::{CategoryStore, TransactionEntry, TransactionQuery, TransactionStore},
    summary::{self, MonthlySummary},
};

/// The categories inserted by [Ledger::seed_default_categories], so a fresh
/// ledger is usable without any category management.
pub const DEFAULT_CATEGORIES: [&str; 8] = [
    "Food & Dining",
    "Transportation",
    "Shopping",
    "Entertainment",
    "Bills & Utilities",
    "Healthcare",
    "Education",
    "Other",
];

/// Composes the category store, transaction store, aggregator and exporter
/// into the operation set consumed by front ends.
///
/// The facade performs no business logic of its own beyond delegation; it is
/// the single seam a console, web or GUI layer talks to, and it can be driven
/// with an in-memory database (see [create_ledger](crate::create_ledger)) or
/// fake stores in tests.
#[derive(Debug, Clone)]
pub struct Ledger<C, T> {
    category_store: C,
    transaction_store: T,
}

impl<C, T> Ledger<C, T>
where
    C: CategoryStore,
    T: TransactionStore,
{
    /// Create a ledger over the given stores.
    pub fn new(category_store: C, transaction_store: T) -> Self {
        Self {
            category_store,
            transaction_store,
        }
    }

    /// Create a new category.
    ///
    /// # Errors
    /// Returns [Error::EmptyName] if `name` is empty or whitespace-only, or
    /// [Error::DuplicateName] if a category named `name` already exists.
    pub fn add_category(
        &mut self,
        name: &str,
        description: Option<String>,
    ) -> Result<Category, Error> {
        let name = CategoryName::new(name)?;

        self.category_store.create(name, description)
    }

    /// Get a category by its ID.
    pub fn category(&self, id: DatabaseID) -> Result<Category, Error> {
        self.category_store.get(id)
    }

    /// All categories, sorted by name ascending.
    pub fn categories(&self) -> Result<Vec<Category>, Error> {
        self.category_store.get_all()
    }

    /// Delete a category.
    ///
    /// # Errors
    /// Returns [Error::InUse] if any transaction still references the
    /// category, or [Error::NotFound] if it does not exist.
    pub fn remove_category(&mut self, id: DatabaseID) -> Result<(), Error> {
        self.category_store.delete(id)
    }

    /// Insert the starter categories in [DEFAULT_CATEGORIES], skipping any
    /// that already exist. Idempotent.
    pub fn seed_default_categories(&mut self) -> Result<(), Error> {
        for name in DEFAULT_CATEGORIES {
            match self
                .category_store
                .create(CategoryName::new_unchecked(name), None)
            {
                Ok(_) | Err(Error::DuplicateName(_)) => {}
                Err(error) => return Err(error),
            }
        }

        Ok(())
    }

    /// Record a new transaction.
    ///
    /// # Errors
    /// Returns [Error::UnknownCategory] if the builder references a category
    /// that does not exist.
    pub fn add_transaction(&mut self, builder: TransactionBuilder) -> Result<Transaction, Error> {
        self.transaction_store.create(builder)
    }

    /// Get a transaction by its ID.
    pub fn transaction(&self, id: DatabaseID) -> Result<Transaction, Error> {
        self.transaction_store.get(id)
    }

    /// The most recent `limit` transactions joined with their category names,
    /// newest first (ties broken by ID, newest first).
    pub fn recent_transactions(&self, limit: u64) -> Result<Vec<TransactionEntry>, Error> {
        self.transaction_store.get_entries(TransactionQuery {
            limit: Some(limit),
            ..Default::default()
        })
    }

    /// Apply a sparse set of changes to an existing transaction.
    ///
    /// Fields absent from `update` keep their stored values; see
    /// [TransactionUpdate].
    pub fn edit_transaction(
        &mut self,
        id: DatabaseID,
        update: TransactionUpdate,
    ) -> Result<Transaction, Error> {
        self.transaction_store.update(id, update)
    }

    /// Delete a transaction.
    pub fn remove_transaction(&mut self, id: DatabaseID) -> Result<(), Error> {
        self.transaction_store.delete(id)
    }

    /// The per-category breakdown and grand total for one calendar month.
    pub fn monthly_summary(&self, month: YearMonth) -> Result<MonthlySummary, Error> {
        let transactions = self.transaction_store.get_query(TransactionQuery {
            month: Some(month),
            ..Default::default()
        })?;
        let categories = self.category_store.get_all()?;

        Ok(summary::summarise(month, &transactions, &categories))
    }

    /// Every transaction serialised as CSV text, newest first.
    ///
    /// The caller decides where the text goes; [export_file_name](export::export_file_name)
    /// gives the conventional file name for an export made today.
    pub fn export_csv(&self) -> Result<String, Error> {
        let entries = self.transaction_store.get_entries(TransactionQuery::default())?;

        Ok(export::to_csv(&entries))
    }
}

#[cfg(test)]
mod ledger_tests {
    use rusqlite::Connection;
    use time::{Date, Month};

    use crate::{
        Error, create_ledger,
        models::{Amount, TransactionBuilder, TransactionUpdate},
        stores::sqlite::SQLLedger,
    };

    use super::DEFAULT_CATEGORIES;

    fn get_test_ledger() -> SQLLedger {
        create_ledger(Connection::open_in_memory().unwrap()).unwrap()
    }

    fn date(year: i32, month: u8, day: u8) -> Date {
        Date::from_calendar_date(year, Month::try_from(month).unwrap(), day).unwrap()
    }

    #[test]
    fn add_category_rejects_empty_names() {
        let mut ledger = get_test_ledger();

        assert_eq!(ledger.add_category("  ", None), Err(Error::EmptyName));
        assert_eq!(ledger.categories(), Ok(vec![]));
    }

    #[test]
    fn monthly_summary_for_the_food_scenario() {
        let mut ledger = get_test_ledger();
        let food = ledger.add_category("Food", None).unwrap();

        for (cents, day) in [(1000, date(2025, 1, 5)), (2000, date(2025, 1, 20))] {
            ledger
                .add_transaction(
                    TransactionBuilder::new(Amount::from_cents(cents))
                        .date(day)
                        .category(Some(food.id)),
                )
                .unwrap();
        }
        ledger
            .add_transaction(
                TransactionBuilder::new(Amount::from_cents(500))
                    .date(date(2025, 2, 1))
                    .category(Some(food.id)),
            )
            .unwrap();

        let summary = ledger.monthly_summary("2025-01".parse().unwrap()).unwrap();

        assert_eq!(summary.categories.len(), 1);
        assert_eq!(summary.categories[0].name.as_ref(), "Food");
        assert_eq!(summary.categories[0].count, 2);
        assert_eq!(summary.categories[0].total, Amount::from_cents(3000));
        assert_eq!(summary.grand_total, Amount::from_cents(3000));
    }

    #[test]
    fn recent_transactions_come_back_newest_first_with_names() {
        let mut ledger = get_test_ledger();
        let shopping = ledger.add_category("Shopping", None).unwrap();

        for day in 1..=5 {
            ledger
                .add_transaction(
                    TransactionBuilder::new(Amount::from_cents(100 * day as i64))
                        .date(date(2025, 1, day))
                        .category(Some(shopping.id)),
                )
                .unwrap();
        }

        let recent = ledger.recent_transactions(2).unwrap();

        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].transaction.date, date(2025, 1, 5));
        assert_eq!(recent[1].transaction.date, date(2025, 1, 4));
        assert_eq!(
            recent[0].category_name.as_ref().map(|name| name.as_ref()),
            Some("Shopping")
        );
    }

    #[test]
    fn edit_and_remove_round_trip_through_the_facade() {
        let mut ledger = get_test_ledger();
        let transaction = ledger
            .add_transaction(TransactionBuilder::new(Amount::from_cents(100)))
            .unwrap();

        let edited = ledger
            .edit_transaction(
                transaction.id,
                TransactionUpdate::new().with_description("groceries"),
            )
            .unwrap();
        assert_eq!(edited.description, "groceries");

        ledger.remove_transaction(transaction.id).unwrap();
        assert_eq!(ledger.transaction(transaction.id), Err(Error::NotFound));
    }

    #[test]
    fn export_csv_lists_every_transaction_under_the_header() {
        let mut ledger = get_test_ledger();
        ledger
            .add_transaction(
                TransactionBuilder::new(Amount::from_cents(1000))
                    .date(date(2025, 1, 5))
                    .description("Lunch"),
            )
            .unwrap();
        ledger
            .add_transaction(
                TransactionBuilder::new(Amount::from_cents(2000))
                    .date(date(2025, 1, 20))
                    .description("Dinner"),
            )
            .unwrap();

        let output = ledger.export_csv().unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines[0], "ID,Date,Amount,Description,Category");
        // Newest first.
        assert!(lines[1].starts_with("2,2025-01-20,20.00"));
        assert!(lines[2].starts_with("1,2025-01-05,10.00"));
    }

    #[test]
    fn seed_default_categories_is_idempotent() {
        let mut ledger = get_test_ledger();

        ledger.seed_default_categories().unwrap();
        ledger.seed_default_categories().unwrap();

        let categories = ledger.categories().unwrap();
        assert_eq!(categories.len(), DEFAULT_CATEGORIES.len());
    }
}
