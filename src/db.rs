//! Database initialization for the application's domain models.

use rusqlite::{Connection, Transaction as SqlTransaction};

use crate::{
    Error, budget::create_budget_table, category::create_category_table,
    transaction::create_transaction_table,
};

/// Create the application's tables if they do not already exist.
///
/// The tables are created inside one exclusive transaction so a partially
/// initialized database is never left behind.
///
/// # Errors
/// Returns an error if a table cannot be created or the transaction cannot be
/// committed.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    connection.pragma_update(None, "foreign_keys", "ON")?;

    let transaction =
        SqlTransaction::new_unchecked(connection, rusqlite::TransactionBehavior::Exclusive)?;

    create_category_table(&transaction)?;
    create_transaction_table(&transaction)?;
    create_budget_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;

    use super::initialize;

    #[test]
    fn creates_all_tables() {
        let connection = Connection::open_in_memory().unwrap();

        initialize(&connection).unwrap();

        let mut statement = connection
            .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
            .unwrap();
        let table_names: Vec<String> = statement
            .query_map([], |row| row.get(0))
            .unwrap()
            .map(|name| name.unwrap())
            .collect();

        for table in ["budget", "category", "transaction"] {
            assert!(
                table_names.iter().any(|name| name == table),
                "want table {table} in {table_names:?}"
            );
        }
    }

    #[test]
    fn is_idempotent() {
        let connection = Connection::open_in_memory().unwrap();

        initialize(&connection).unwrap();
        initialize(&connection).unwrap();
    }
}
