//! Defines the core data model and database queries for transactions.

use std::str::FromStr;

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    Error,
    category::CategoryId,
    ledger::{Entry, TransactionKind},
};

// ============================================================================
// MODELS
// ============================================================================

/// Database identifier for a transaction.
pub type TransactionId = i64;

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// To create a new `Transaction`, use [Transaction::build].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// Whether the transaction is income or an expense.
    pub kind: TransactionKind,
    /// The amount of money spent or earned in this transaction. Zero or
    /// positive; direction is carried by `kind`.
    pub amount: f64,
    /// When the transaction happened.
    pub date: Date,
    /// A text description of what the transaction was for.
    pub description: String,
    /// The ID of the category the transaction belongs to.
    pub category_id: Option<CategoryId>,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [TransactionBuilder] for discoverability.
    pub fn build(
        kind: TransactionKind,
        amount: f64,
        date: Date,
        description: &str,
    ) -> TransactionBuilder {
        TransactionBuilder {
            kind,
            amount,
            date,
            description: description.to_owned(),
            category_id: None,
        }
    }
}

/// A builder for creating [Transaction] instances.
///
/// Pass the finished builder to [create_transaction] to validate it and
/// insert the row.
#[derive(Debug, PartialEq, Clone)]
pub struct TransactionBuilder {
    /// Whether the transaction is income or an expense.
    pub kind: TransactionKind,
    /// The monetary amount of the transaction. Must be zero or positive.
    pub amount: f64,
    /// The date when the transaction occurred. Must not be in the future.
    pub date: Date,
    /// A human-readable description of the transaction.
    pub description: String,
    /// The category of the transaction, e.g. "Groceries", "Rent".
    pub category_id: Option<CategoryId>,
}

impl TransactionBuilder {
    /// Set the category ID for the transaction.
    pub fn category_id(mut self, category_id: Option<CategoryId>) -> Self {
        self.category_id = category_id;
        self
    }
}

/// A transaction with its category name resolved, for rendering as a table
/// row.
#[derive(Debug, PartialEq, Clone)]
pub struct TransactionTableRow {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// Whether the transaction is income or an expense.
    pub kind: TransactionKind,
    /// The amount of money spent or earned in this transaction.
    pub amount: f64,
    /// When the transaction happened.
    pub date: Date,
    /// A text description of what the transaction was for.
    pub description: String,
    /// The name of the transaction's category, if it has one.
    pub category_name: Option<String>,
    /// The icon of the transaction's category, if it has one.
    pub category_icon: Option<String>,
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Create a new transaction in the database from a builder.
///
/// Amounts must be zero or positive, and dates must be no later than today
/// (the date is checked by the HTTP endpoint which knows the local timezone).
///
/// # Errors
/// This function will return a:
/// - [Error::NegativeAmount] if the amount is below zero,
/// - [Error::InvalidCategory] if the category ID does not refer to a real category,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn create_transaction(
    builder: TransactionBuilder,
    connection: &Connection,
) -> Result<Transaction, Error> {
    if builder.amount < 0.0 {
        return Err(Error::NegativeAmount(builder.amount));
    }

    let transaction = connection
        .prepare(
            "INSERT INTO \"transaction\" (kind, amount, date, description, category_id)
             VALUES (?1, ?2, ?3, ?4, ?5)
             RETURNING id, kind, amount, date, description, category_id",
        )?
        .query_row(
            (
                builder.kind.as_str(),
                builder.amount,
                builder.date,
                builder.description,
                builder.category_id,
            ),
            map_transaction_row,
        )
        .map_err(|error| match error {
            rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error {
                    code: _,
                    extended_code: rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY,
                },
                _,
            ) => Error::InvalidCategory(builder.category_id),
            error => error.into(),
        })?;

    Ok(transaction)
}

/// Retrieve a single transaction by ID.
pub fn get_transaction(
    transaction_id: TransactionId,
    connection: &Connection,
) -> Result<Transaction, Error> {
    connection
        .prepare(
            "SELECT id, kind, amount, date, description, category_id
             FROM \"transaction\" WHERE id = :id",
        )?
        .query_row(&[(":id", &transaction_id)], map_transaction_row)
        .map_err(|error| error.into())
}

/// Delete a transaction by ID. Returns an error if the transaction doesn't exist.
pub fn delete_transaction(
    transaction_id: TransactionId,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "DELETE FROM \"transaction\" WHERE id = ?1",
        [transaction_id],
    )?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingTransaction);
    }

    Ok(())
}

/// Count all transactions, for paging the transactions table.
pub fn count_transactions(connection: &Connection) -> Result<u64, Error> {
    connection
        .prepare("SELECT COUNT(id) FROM \"transaction\"")?
        .query_row([], |row| row.get::<_, i64>(0).map(|count| count as u64))
        .map_err(|error| error.into())
}

/// Retrieve one page of transactions with their category names, newest first.
pub fn get_transaction_table_rows(
    limit: u64,
    offset: u64,
    connection: &Connection,
) -> Result<Vec<TransactionTableRow>, Error> {
    connection
        .prepare(
            "SELECT t.id, t.kind, t.amount, t.date, t.description, c.name, c.icon
             FROM \"transaction\" t
             LEFT JOIN category c ON c.id = t.category_id
             ORDER BY t.date DESC, t.id DESC
             LIMIT :limit OFFSET :offset",
        )?
        .query_map(
            &[(":limit", &(limit as i64)), (":offset", &(offset as i64))],
            map_table_row,
        )?
        .map(|maybe_row| maybe_row.map_err(|error| error.into()))
        .collect()
}

/// Retrieve all transactions as ledger entries for the aggregation engine.
///
/// Rows with an unparseable date or an unrecognized kind are logged and
/// skipped rather than aborting the whole snapshot.
pub fn get_ledger_entries(connection: &Connection) -> Result<Vec<Entry>, Error> {
    let mut statement = connection.prepare(
        "SELECT t.kind, t.amount, t.date, t.category_id, c.name
         FROM \"transaction\" t
         LEFT JOIN category c ON c.id = t.category_id
         ORDER BY t.date ASC, t.id ASC",
    )?;

    let mut rows = statement.query([])?;
    let mut entries = Vec::new();

    while let Some(row) = rows.next()? {
        match map_entry_row(row) {
            Ok(entry) => entries.push(entry),
            Err(error) => {
                tracing::warn!("skipping malformed transaction row: {error}");
            }
        }
    }

    Ok(entries)
}

/// Initialize the transaction table and indexes.
///
/// Deleting a category keeps its transactions but clears their reference.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
            id INTEGER PRIMARY KEY,
            kind TEXT NOT NULL,
            amount REAL NOT NULL,
            date TEXT NOT NULL,
            description TEXT NOT NULL,
            category_id INTEGER,
            FOREIGN KEY(category_id) REFERENCES category(id)
                ON UPDATE CASCADE ON DELETE SET NULL
        );

        CREATE INDEX IF NOT EXISTS idx_transaction_date ON \"transaction\"(date);
        CREATE INDEX IF NOT EXISTS idx_transaction_category ON \"transaction\"(category_id);",
    )?;

    Ok(())
}

fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    Ok(Transaction {
        id: row.get(0)?,
        kind: parse_kind(row, 1)?,
        amount: row.get(2)?,
        date: row.get(3)?,
        description: row.get(4)?,
        category_id: row.get(5)?,
    })
}

fn map_table_row(row: &Row) -> Result<TransactionTableRow, rusqlite::Error> {
    Ok(TransactionTableRow {
        id: row.get(0)?,
        kind: parse_kind(row, 1)?,
        amount: row.get(2)?,
        date: row.get(3)?,
        description: row.get(4)?,
        category_name: row.get(5)?,
        category_icon: row.get(6)?,
    })
}

fn map_entry_row(row: &Row) -> Result<Entry, Error> {
    let kind = TransactionKind::from_str(&row.get::<_, String>(0)?)?;
    let amount: f64 = row.get(1)?;
    let date: Date = row.get(2)?;
    let category_id: Option<CategoryId> = row.get(3)?;
    let category: Option<String> = row.get(4)?;

    let mut entry = Entry::new(kind, amount, date);

    if let (Some(category_id), Some(category)) = (category_id, category.as_deref()) {
        entry = entry.with_category(category_id, category);
    }

    Ok(entry)
}

fn parse_kind(row: &Row, index: usize) -> Result<TransactionKind, rusqlite::Error> {
    let raw_kind: String = row.get(index)?;

    TransactionKind::from_str(&raw_kind).map_err(|error| {
        rusqlite::Error::FromSqlConversionFailure(index, rusqlite::types::Type::Text, Box::new(error))
    })
}
