//! Computes per-category totals and counts for a calendar month.
//!
//! The aggregation is a pure function over a month's transactions and the
//! category list, so it can be tested without a store and reused against any
//! [TransactionStore](crate::stores::TransactionStore) backend.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::{Amount, Category, CategoryName, DatabaseID, Transaction, YearMonth};

/// The bucket that transactions without a category are grouped under.
///
/// Uncategorised transactions are included rather than dropped so that the
/// grand total always equals the sum of the per-category totals.
pub const UNCATEGORISED: &str = "Uncategorised";

/// The totals for one category within a month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    /// The category name, or [UNCATEGORISED].
    pub name: CategoryName,
    /// How many transactions fell in this category this month.
    pub count: usize,
    /// The sum of those transactions' amounts.
    pub total: Amount,
}

/// A per-category breakdown of one calendar month's transactions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySummary {
    /// The month the summary covers.
    pub month: YearMonth,
    /// Per-category rows, ordered by total descending then name ascending.
    pub categories: Vec<CategorySummary>,
    /// The sum of every transaction in the month, equal to the sum of the
    /// per-category totals.
    pub grand_total: Amount,
}

/// Summarise `transactions` for `month`, grouping by category.
///
/// Transactions dated outside `month` are ignored. Transactions with no
/// category, or whose category does not appear in `categories`, are grouped
/// under [UNCATEGORISED]. A month with no transactions yields an empty
/// breakdown and a grand total of zero.
pub fn summarise(
    month: YearMonth,
    transactions: &[Transaction],
    categories: &[Category],
) -> MonthlySummary {
    let names: HashMap<DatabaseID, &CategoryName> = categories
        .iter()
        .map(|category| (category.id, &category.name))
        .collect();

    let mut buckets: HashMap<Option<DatabaseID>, (usize, Amount)> = HashMap::new();
    let mut grand_total = Amount::ZERO;

    for transaction in transactions {
        if !month.contains(transaction.date) {
            continue;
        }

        // A dangling category ID cannot occur while referential integrity
        // holds; fold it into the uncategorised bucket rather than lose the
        // transaction from the report.
        let key = transaction
            .category_id
            .filter(|id| names.contains_key(id));

        let (count, total) = buckets.entry(key).or_insert((0, Amount::ZERO));
        *count += 1;
        *total += transaction.amount;
        grand_total += transaction.amount;
    }

    let mut rows: Vec<CategorySummary> = buckets
        .into_iter()
        .map(|(key, (count, total))| {
            let name = match key {
                Some(id) => names[&id].clone(),
                None => CategoryName::new_unchecked(UNCATEGORISED),
            };

            CategorySummary { name, count, total }
        })
        .collect();

    // Largest spend first; ties resolve alphabetically so the order is
    // deterministic.
    rows.sort_by(|a, b| {
        b.total
            .cmp(&a.total)
            .then_with(|| a.name.as_ref().cmp(b.name.as_ref()))
    });

    MonthlySummary {
        month,
        categories: rows,
        grand_total,
    }
}

#[cfg(test)]
mod summary_tests {
    use time::{Date, Month, OffsetDateTime};

    use crate::models::{
        Amount, Category, CategoryName, DatabaseID, Transaction, YearMonth,
    };

    use super::{CategorySummary, UNCATEGORISED, summarise};

    fn category(id: DatabaseID, name: &str) -> Category {
        Category {
            id,
            name: CategoryName::new_unchecked(name),
            description: None,
            created_at: OffsetDateTime::now_utc(),
        }
    }

    fn transaction(
        id: DatabaseID,
        cents: i64,
        date: Date,
        category_id: Option<DatabaseID>,
    ) -> Transaction {
        let now = OffsetDateTime::now_utc();

        Transaction {
            id,
            amount: Amount::from_cents(cents),
            date,
            description: String::new(),
            category_id,
            created_at: now,
            updated_at: now,
        }
    }

    fn date(year: i32, month: u8, day: u8) -> Date {
        Date::from_calendar_date(year, Month::try_from(month).unwrap(), day).unwrap()
    }

    #[test]
    fn totals_cover_only_the_requested_month() {
        let month = YearMonth::new(2025, 1).unwrap();
        let food = category(1, "Food");
        let transactions = [
            transaction(1, 1000, date(2025, 1, 5), Some(food.id)),
            transaction(2, 2000, date(2025, 1, 20), Some(food.id)),
            transaction(3, 500, date(2025, 2, 1), Some(food.id)),
        ];

        let summary = summarise(month, &transactions, &[food]);

        assert_eq!(
            summary.categories,
            vec![CategorySummary {
                name: CategoryName::new_unchecked("Food"),
                count: 2,
                total: Amount::from_cents(3000),
            }]
        );
        assert_eq!(summary.grand_total, Amount::from_cents(3000));
        assert_eq!(summary.grand_total.to_string(), "30.00");
    }

    #[test]
    fn rows_are_ordered_by_total_descending_then_name_ascending() {
        let month = YearMonth::new(2025, 1).unwrap();
        let categories = [
            category(1, "Zoo Trips"),
            category(2, "Bills & Utilities"),
            category(3, "Healthcare"),
        ];
        let transactions = [
            transaction(1, 500, date(2025, 1, 1), Some(1)),
            transaction(2, 500, date(2025, 1, 2), Some(2)),
            transaction(3, 9000, date(2025, 1, 3), Some(3)),
        ];

        let summary = summarise(month, &transactions, &categories);
        let names: Vec<&str> = summary
            .categories
            .iter()
            .map(|row| row.name.as_ref())
            .collect();

        // "Bills & Utilities" and "Zoo Trips" tie on total, so they fall
        // back to name order.
        assert_eq!(names, ["Healthcare", "Bills & Utilities", "Zoo Trips"]);
    }

    #[test]
    fn uncategorised_transactions_are_grouped_under_a_sentinel_bucket() {
        let month = YearMonth::new(2025, 1).unwrap();
        let food = category(1, "Food");
        let transactions = [
            transaction(1, 1000, date(2025, 1, 5), Some(food.id)),
            transaction(2, 700, date(2025, 1, 6), None),
            transaction(3, 300, date(2025, 1, 7), None),
        ];

        let summary = summarise(month, &transactions, &[food]);

        let uncategorised = summary
            .categories
            .iter()
            .find(|row| row.name.as_ref() == UNCATEGORISED)
            .unwrap();
        assert_eq!(uncategorised.count, 2);
        assert_eq!(uncategorised.total, Amount::from_cents(1000));
        // The grand total still covers every transaction in the month.
        assert_eq!(summary.grand_total, Amount::from_cents(2000));
    }

    #[test]
    fn grand_total_equals_sum_of_category_totals() {
        let month = YearMonth::new(2025, 1).unwrap();
        let categories = [category(1, "Food"), category(2, "Shopping")];
        let transactions = [
            transaction(1, 1250, date(2025, 1, 5), Some(1)),
            transaction(2, -300, date(2025, 1, 6), Some(2)),
            transaction(3, 475, date(2025, 1, 7), None),
        ];

        let summary = summarise(month, &transactions, &categories);

        let from_rows: Amount = summary.categories.iter().map(|row| row.total).sum();
        assert_eq!(summary.grand_total, from_rows);
        assert_eq!(summary.grand_total, Amount::from_cents(1425));
    }

    #[test]
    fn empty_month_yields_empty_summary_with_zero_total() {
        let month = YearMonth::new(2025, 6).unwrap();

        let summary = summarise(month, &[], &[category(1, "Food")]);

        assert_eq!(summary.categories, vec![]);
        assert_eq!(summary.grand_total, Amount::ZERO);
    }
}
