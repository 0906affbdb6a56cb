//! Endpoint for deleting a category.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use maud::html;
use rusqlite::Connection;

use crate::{AppState, Error, category::{CategoryId, delete_category}};

/// The state needed to delete a category.
#[derive(Debug, Clone)]
pub struct DeleteCategoryState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteCategoryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for deleting a category.
///
/// On success the response body is empty so HTMX removes the table row the
/// delete button lives in.
pub async fn delete_category_endpoint(
    State(state): State<DeleteCategoryState>,
    Path(category_id): Path<CategoryId>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match delete_category(category_id, &connection) {
        // The status code has to be 200 OK or HTMX will not delete the table row.
        Ok(()) => html!().into_response(),
        Err(error) => {
            tracing::error!("could not delete category {category_id}: {error}");

            error.into_alert_response()
        }
    }
}
