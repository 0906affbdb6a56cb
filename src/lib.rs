//! Ledgerly is a web app for tracking personal income, expenses, and monthly
//! budgets.
//!
//! This library provides a REST API that directly serves HTML pages.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use time::Date;
use tokio::signal;

mod alert;
mod analytics;
mod app_state;
mod budget;
mod category;
mod dashboard;
mod db;
mod endpoints;
mod html;
mod internal_server_error;
mod ledger;
mod navigation;
mod not_found;
mod pagination;
mod reports;
mod routing;
#[cfg(test)]
mod test_utils;
mod timezone;
mod transaction;

pub use app_state::AppState;
pub use budget::{NewBudget, create_budget};
pub use category::{CategoryName, NewCategory, create_category};
pub use db::initialize as initialize_db;
pub use ledger::TransactionKind;
pub use pagination::PaginationConfig;
pub use routing::build_router;
pub use transaction::{Transaction, create_transaction};

use crate::{
    alert::AlertTemplate,
    category::CategoryId,
    html::render,
    internal_server_error::{InternalServerErrorPageTemplate, render_internal_server_error},
    not_found::get_404_not_found_response,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// An empty string was used to create a category name.
    #[error("Category name cannot be empty")]
    EmptyCategoryName,

    /// The specified category name already exists in the database.
    #[error("the category \"{0}\" already exists in the database")]
    DuplicateCategoryName(String),

    /// The category ID used to create a transaction or budget did not match a
    /// valid category.
    #[error("the category ID does not refer to a valid category")]
    InvalidCategory(Option<CategoryId>),

    /// A negative amount was used to create a transaction.
    ///
    /// Direction is carried by the transaction kind, so amounts must be zero
    /// or positive.
    #[error("{0} is a negative amount, which is not allowed")]
    NegativeAmount(f64),

    /// A date in the future was used to create a transaction.
    ///
    /// Transactions record events that have already happened, therefore future
    /// dates are not allowed.
    #[error("{0} is a date in the future, which is not allowed")]
    FutureDate(Date),

    /// A kind string in the database or a form was neither "income" nor
    /// "expense".
    #[error("\"{0}\" is not a valid transaction kind")]
    UnknownKind(String),

    /// A budget was created with a limit of zero or less.
    ///
    /// Budget consumption is reported as a percentage of the limit, so the
    /// limit must be positive.
    #[error("{0} is not a valid budget limit, must be greater than zero")]
    InvalidBudgetLimit(f64),

    /// A budget was created with a month outside 1-12.
    #[error("{0} is not a valid month, must be between 1 and 12")]
    InvalidMonth(u8),

    /// A budget already exists for the specified category and month.
    #[error("a budget for this category and month already exists")]
    DuplicateBudget,

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// Tried to delete a transaction that does not exist
    #[error("tried to delete a transaction that is not in the database")]
    DeleteMissingTransaction,

    /// Tried to update a category that does not exist
    #[error("tried to update a category that is not in the database")]
    UpdateMissingCategory,

    /// Tried to delete a category that does not exist
    #[error("tried to delete a category that is not in the database")]
    DeleteMissingCategory,

    /// Tried to delete a budget that does not exist
    #[error("tried to delete a budget that is not in the database")]
    DeleteMissingBudget,

    /// An error occurred while building a CSV export.
    #[error("could not write the CSV export: {0}")]
    CsvError(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            // Code 2067 occurs when a UNIQUE constraint failed.
            rusqlite::Error::SqliteFailure(sql_error, Some(ref desc))
                if sql_error.extended_code == 2067 && desc.contains("category.name") =>
            {
                Error::DuplicateCategoryName(String::new())
            }
            rusqlite::Error::SqliteFailure(sql_error, Some(ref desc))
                if sql_error.extended_code == 2067 && desc.contains("budget") =>
            {
                Error::DuplicateBudget
            }
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => get_404_not_found_response(),
            Error::InvalidTimezoneError(timezone) => {
                render_internal_server_error(InternalServerErrorPageTemplate {
                    description: "Invalid Timezone Settings",
                    fix: &format!(
                        "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                    ),
                })
            }
            Error::DatabaseLockError => render_internal_server_error(Default::default()),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                render_internal_server_error(Default::default())
            }
        }
    }
}

impl Error {
    fn into_alert_response(self) -> Response {
        match self {
            Error::InvalidTimezoneError(timezone) => render(
                StatusCode::INTERNAL_SERVER_ERROR,
                AlertTemplate::error(
                    "Invalid Timezone Settings",
                    &format!(
                        "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                    ),
                ),
            ),
            Error::FutureDate(date) => render(
                StatusCode::BAD_REQUEST,
                AlertTemplate::error(
                    "Invalid transaction date",
                    &format!(
                        "{date} is a date in the future, which is not allowed. Change the date to \
                        today or earlier."
                    ),
                ),
            ),
            Error::NegativeAmount(amount) => render(
                StatusCode::BAD_REQUEST,
                AlertTemplate::error(
                    "Invalid amount",
                    &format!(
                        "{amount} is negative. Enter a positive amount and pick income or expense \
                        instead."
                    ),
                ),
            ),
            Error::EmptyCategoryName => render(
                StatusCode::BAD_REQUEST,
                AlertTemplate::error("Invalid category name", "The category name cannot be empty."),
            ),
            Error::DuplicateCategoryName(name) => render(
                StatusCode::BAD_REQUEST,
                AlertTemplate::error(
                    "Duplicate category name",
                    &format!(
                        "The category {name} already exists. \
                        Choose a different name, or edit or delete the existing category.",
                    ),
                ),
            ),
            Error::InvalidCategory(category_id) => render(
                StatusCode::BAD_REQUEST,
                AlertTemplate::error(
                    "Invalid category ID",
                    &format!("Could not find a category with the ID {category_id:?}"),
                ),
            ),
            Error::InvalidBudgetLimit(limit) => render(
                StatusCode::BAD_REQUEST,
                AlertTemplate::error(
                    "Invalid budget limit",
                    &format!("{limit} is not a valid budget limit. Enter an amount above zero."),
                ),
            ),
            Error::InvalidMonth(month) => render(
                StatusCode::BAD_REQUEST,
                AlertTemplate::error(
                    "Invalid month",
                    &format!("{month} is not a valid month. Pick a month between 1 and 12."),
                ),
            ),
            Error::DuplicateBudget => render(
                StatusCode::BAD_REQUEST,
                AlertTemplate::error(
                    "Duplicate budget",
                    "A budget for this category and month already exists. \
                    Edit or delete the existing budget instead.",
                ),
            ),
            Error::DeleteMissingTransaction => render(
                StatusCode::NOT_FOUND,
                AlertTemplate::error(
                    "Could not delete transaction",
                    "The transaction could not be found. \
                    Try refreshing the page to see if the transaction has already been deleted.",
                ),
            ),
            Error::UpdateMissingCategory => render(
                StatusCode::NOT_FOUND,
                AlertTemplate::error(
                    "Could not update category",
                    "The category could not be found.",
                ),
            ),
            Error::DeleteMissingCategory => render(
                StatusCode::NOT_FOUND,
                AlertTemplate::error(
                    "Could not delete category",
                    "The category could not be found. \
                    Try refreshing the page to see if the category has already been deleted.",
                ),
            ),
            Error::DeleteMissingBudget => render(
                StatusCode::NOT_FOUND,
                AlertTemplate::error(
                    "Could not delete budget",
                    "The budget could not be found. \
                    Try refreshing the page to see if the budget has already been deleted.",
                ),
            ),
            _ => render(
                StatusCode::INTERNAL_SERVER_ERROR,
                AlertTemplate::error(
                    "Something went wrong",
                    "An unexpected error occurred, check the server logs for more details.",
                ),
            ),
        }
    }
}
