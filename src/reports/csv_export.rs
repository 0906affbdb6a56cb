//! Endpoint for downloading the full transaction history as a CSV file.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;

use crate::{AppState, Error};

/// The state needed for the CSV export.
#[derive(Debug, Clone)]
pub struct TransactionsCsvState {
    /// The database connection for reading transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for TransactionsCsvState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler that streams all transactions as a CSV download.
pub async fn get_transactions_csv(State(state): State<TransactionsCsvState>) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    match write_transactions_csv(&connection) {
        Ok(csv_bytes) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"transactions.csv\"",
                ),
            ],
            csv_bytes,
        )
            .into_response(),
        Err(error) => {
            tracing::error!("could not build CSV export: {error}");

            error.into_response()
        }
    }
}

/// Serialize every transaction, oldest first, with its category name resolved.
fn write_transactions_csv(connection: &Connection) -> Result<Vec<u8>, Error> {
    let mut statement = connection.prepare(
        "SELECT t.date, t.kind, t.amount, t.description, c.name
         FROM \"transaction\" t
         LEFT JOIN category c ON c.id = t.category_id
         ORDER BY t.date ASC, t.id ASC",
    )?;

    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record(["date", "kind", "amount", "description", "category"])
        .map_err(|error| Error::CsvError(error.to_string()))?;

    let mut rows = statement.query([])?;

    while let Some(row) = rows.next()? {
        let date: String = row.get(0)?;
        let kind: String = row.get(1)?;
        let amount: f64 = row.get(2)?;
        let description: String = row.get(3)?;
        let category: Option<String> = row.get(4)?;

        writer
            .write_record([
                date.as_str(),
                kind.as_str(),
                &amount.to_string(),
                description.as_str(),
                category.as_deref().unwrap_or(""),
            ])
            .map_err(|error| Error::CsvError(error.to_string()))?;
    }

    writer
        .into_inner()
        .map_err(|error| Error::CsvError(error.to_string()))
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::extract::State;
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        db::initialize,
        category::{CategoryName, NewCategory, create_category},
        ledger::TransactionKind,
        test_utils::{assert_status_ok, get_header},
        transaction::{Transaction, create_transaction},
    };

    use super::{TransactionsCsvState, get_transactions_csv, write_transactions_csv};

    fn get_test_state() -> TransactionsCsvState {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();

        TransactionsCsvState {
            db_connection: Arc::new(Mutex::new(connection)),
        }
    }

    #[tokio::test]
    async fn responds_with_csv_attachment() {
        let state = get_test_state();

        let response = get_transactions_csv(State(state)).await;

        assert_status_ok(&response);
        assert_eq!(
            get_header(&response, "content-type"),
            "text/csv; charset=utf-8"
        );
        assert!(get_header(&response, "content-disposition").contains("transactions.csv"));
    }

    #[test]
    fn serializes_each_transaction_with_category() {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        let category = create_category(
            NewCategory {
                name: CategoryName::new_unchecked("Food"),
                kind: TransactionKind::Expense,
                color: String::new(),
                icon: String::new(),
            },
            &connection,
        )
        .unwrap();
        create_transaction(
            Transaction::build(TransactionKind::Expense, 12.5, date!(2025 - 01 - 15), "Lunch")
                .category_id(Some(category.id)),
            &connection,
        )
        .unwrap();
        create_transaction(
            Transaction::build(
                TransactionKind::Income,
                1000.0,
                date!(2025 - 01 - 05),
                "Salary",
            ),
            &connection,
        )
        .unwrap();

        let csv_bytes = write_transactions_csv(&connection).unwrap();
        let csv_text = String::from_utf8(csv_bytes).unwrap();

        let lines: Vec<&str> = csv_text.trim().lines().collect();
        assert_eq!(lines[0], "date,kind,amount,description,category");
        // Oldest first.
        assert_eq!(lines[1], "2025-01-05,income,1000,Salary,");
        assert_eq!(lines[2], "2025-01-15,expense,12.5,Lunch,Food");
    }

    #[test]
    fn empty_database_yields_header_only() {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();

        let csv_bytes = write_transactions_csv(&connection).unwrap();
        let csv_text = String::from_utf8(csv_bytes).unwrap();

        assert_eq!(csv_text.trim(), "date,kind,amount,description,category");
    }
}
