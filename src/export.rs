//! Serialises a transaction listing into CSV text.
//!
//! The exporter formats what it is given and nothing more: rows come out in
//! the order they went in, and fetching or sorting the listing is the
//! caller's job.

use time::Date;

use crate::{models::format_date, stores::TransactionEntry};

/// The header row of an export.
pub const CSV_HEADER: &str = "ID,Date,Amount,Description,Category";

/// Serialise `entries` as CSV text: the header row, then one row per entry.
///
/// Each row holds the transaction ID, the ISO-8601 date, the amount with two
/// decimal places, the description and the category name (empty for
/// uncategorised transactions). The description may contain arbitrary
/// characters, so it is always wrapped in double quotes with embedded quotes
/// doubled, the standard CSV convention. Rows are `\n`-terminated.
pub fn to_csv(entries: &[TransactionEntry]) -> String {
    let mut output = String::from(CSV_HEADER);
    output.push('\n');

    for entry in entries {
        let transaction = &entry.transaction;
        let category = entry
            .category_name
            .as_ref()
            .map(|name| name.as_ref())
            .unwrap_or_default();

        output.push_str(&format!(
            "{},{},{},\"{}\",{}\n",
            transaction.id,
            format_date(transaction.date),
            transaction.amount,
            transaction.description.replace('"', "\"\""),
            category,
        ));
    }

    output
}

/// The deterministic file name for an export made on `date`,
/// e.g. `expenses_2025-01-05.csv`.
pub fn export_file_name(date: Date) -> String {
    format!("expenses_{}.csv", format_date(date))
}
