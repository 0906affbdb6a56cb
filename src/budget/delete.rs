//! Endpoint for deleting a budget.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use maud::html;
use rusqlite::Connection;

use crate::{AppState, Error, budget::{BudgetId, delete_budget}};

/// The state needed to delete a budget.
#[derive(Debug, Clone)]
pub struct DeleteBudgetState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteBudgetState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for deleting a budget.
///
/// On success the response body is empty so HTMX removes the budget card the
/// delete button lives in.
pub async fn delete_budget_endpoint(
    State(state): State<DeleteBudgetState>,
    Path(budget_id): Path<BudgetId>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match delete_budget(budget_id, &connection) {
        Ok(()) => html!().into_response(),
        Err(error) => {
            tracing::error!("could not delete budget {budget_id}: {error}");

            error.into_alert_response()
        }
    }
}
