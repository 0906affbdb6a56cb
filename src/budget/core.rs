//! Defines the core data model and database queries for budgets.

use rusqlite::{Connection, Row};

use crate::{Error, category::CategoryId};

/// Database identifier for a budget.
pub type BudgetId = i64;

/// A spending ceiling for a category within a specific month and year.
///
/// Only the limit is stored. How much of it has been spent is derived from
/// the matching expense transactions; see [crate::ledger::budget_progress].
#[derive(Debug, Clone, PartialEq)]
pub struct Budget {
    /// The ID of the budget.
    pub id: BudgetId,
    /// The ID of the category the budget covers.
    pub category_id: CategoryId,
    /// The spending ceiling. Always positive.
    pub limit: f64,
    /// Calendar month the budget covers, 1-12.
    pub month: u8,
    /// Calendar year the budget covers.
    pub year: i32,
}

/// A budget joined with the display fields of its category.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetWithCategory {
    /// The budget itself.
    pub budget: Budget,
    /// The name of the budget's category.
    pub category_name: String,
    /// The icon of the budget's category.
    pub category_icon: String,
    /// The colour of the budget's category.
    pub category_color: String,
}

/// The fields needed to create a budget.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBudget {
    /// The ID of the category the budget covers.
    pub category_id: CategoryId,
    /// The spending ceiling. Must be positive.
    pub limit: f64,
    /// Calendar month the budget covers, 1-12.
    pub month: u8,
    /// Calendar year the budget covers.
    pub year: i32,
}

/// Create a budget and return it with its generated ID.
///
/// # Errors
/// This function will return a:
/// - [Error::InvalidBudgetLimit] if the limit is zero or less,
/// - [Error::InvalidMonth] if the month is outside 1-12,
/// - [Error::InvalidCategory] if the category ID does not refer to a real category,
/// - [Error::DuplicateBudget] if a budget already exists for the category and month,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn create_budget(new_budget: NewBudget, connection: &Connection) -> Result<Budget, Error> {
    if new_budget.limit <= 0.0 {
        return Err(Error::InvalidBudgetLimit(new_budget.limit));
    }

    if !(1..=12).contains(&new_budget.month) {
        return Err(Error::InvalidMonth(new_budget.month));
    }

    connection
        .execute(
            "INSERT INTO budget (category_id, limit_amount, month, year) VALUES (?1, ?2, ?3, ?4)",
            (
                new_budget.category_id,
                new_budget.limit,
                new_budget.month,
                new_budget.year,
            ),
        )
        .map_err(|error| match error {
            rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error {
                    code: _,
                    extended_code: rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY,
                },
                _,
            ) => Error::InvalidCategory(Some(new_budget.category_id)),
            error => error.into(),
        })?;

    let id = connection.last_insert_rowid();

    Ok(Budget {
        id,
        category_id: new_budget.category_id,
        limit: new_budget.limit,
        month: new_budget.month,
        year: new_budget.year,
    })
}

/// Retrieve a single budget by ID.
pub fn get_budget(budget_id: BudgetId, connection: &Connection) -> Result<Budget, Error> {
    connection
        .prepare(
            "SELECT id, category_id, limit_amount, month, year FROM budget WHERE id = :id",
        )?
        .query_row(&[(":id", &budget_id)], map_budget_row)
        .map_err(|error| error.into())
}

/// Retrieve the budgets for one month with their category display fields,
/// ordered by category name.
pub fn get_budgets_for_month(
    month: u8,
    year: i32,
    connection: &Connection,
) -> Result<Vec<BudgetWithCategory>, Error> {
    connection
        .prepare(
            "SELECT b.id, b.category_id, b.limit_amount, b.month, b.year, c.name, c.icon, c.color
             FROM budget b
             INNER JOIN category c ON c.id = b.category_id
             WHERE b.month = :month AND b.year = :year
             ORDER BY c.name ASC",
        )?
        .query_map(
            &[(":month", &(month as i64)), (":year", &(year as i64))],
            |row| {
                Ok(BudgetWithCategory {
                    budget: map_budget_row(row)?,
                    category_name: row.get(5)?,
                    category_icon: row.get(6)?,
                    category_color: row.get(7)?,
                })
            },
        )?
        .map(|maybe_budget| maybe_budget.map_err(|error| error.into()))
        .collect()
}

/// Delete a budget by ID. Returns an error if the budget doesn't exist.
pub fn delete_budget(budget_id: BudgetId, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute("DELETE FROM budget WHERE id = ?1", [budget_id])?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingBudget);
    }

    Ok(())
}

/// Initialize the budget table.
///
/// One budget per category per month, removed with its category.
pub fn create_budget_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS budget (
            id INTEGER PRIMARY KEY,
            category_id INTEGER NOT NULL,
            limit_amount REAL NOT NULL,
            month INTEGER NOT NULL,
            year INTEGER NOT NULL,
            UNIQUE (category_id, month, year),
            FOREIGN KEY(category_id) REFERENCES category(id)
                ON UPDATE CASCADE ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_budget_period ON budget(year, month);",
    )?;

    Ok(())
}

fn map_budget_row(row: &Row) -> Result<Budget, rusqlite::Error> {
    Ok(Budget {
        id: row.get(0)?,
        category_id: row.get(1)?,
        limit: row.get(2)?,
        month: row.get(3)?,
        year: row.get(4)?,
    })
}
