//! Dashboard HTTP handler and view rendering.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error, endpoints,
    dashboard::{cards::totals_cards_view, tables::recent_transactions_view},
    html::{PAGE_CONTAINER_STYLE, base, link},
    ledger::{TotalsSummary, compute_totals},
    navigation::NavBar,
    transaction::{TransactionTableRow, get_ledger_entries, get_transaction_table_rows},
};

/// How many transactions the recent transactions list shows.
const RECENT_TRANSACTION_COUNT: u64 = 5;

/// The state needed for displaying the dashboard page.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The database connection for reading transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Display a page with an overview of the user's data.
pub async fn get_dashboard_page(State(state): State<DashboardState>) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let nav_bar = NavBar::new(endpoints::DASHBOARD_VIEW);

    let entries = get_ledger_entries(&connection)
        .inspect_err(|error| tracing::error!("could not get transactions: {error}"))?;

    if entries.is_empty() {
        return Ok(dashboard_no_data_view(nav_bar).into_response());
    }

    let summary = compute_totals(&entries);

    let recent_transactions = get_transaction_table_rows(RECENT_TRANSACTION_COUNT, 0, &connection)
        .inspect_err(|error| tracing::error!("could not get recent transactions: {error}"))?;

    Ok(dashboard_view(nav_bar, &summary, &recent_transactions).into_response())
}

/// Renders the dashboard page when no transaction data exists.
fn dashboard_no_data_view(nav_bar: NavBar) -> Markup {
    let nav_bar = nav_bar.into_html();
    let new_transaction_link = link(endpoints::NEW_TRANSACTION_VIEW, "adding a transaction");

    let content = html!(
        (nav_bar)

        div class="flex flex-col items-center px-6 py-8 mx-auto text-gray-900 dark:text-white"
        {
            h2 class="text-xl font-bold"
            {
                "Nothing here yet..."
            }

            p
            {
                "Your totals and recent transactions will show up here once you \
                start " (new_transaction_link) "."
            }
        }
    );

    base("Dashboard", &[], &content)
}

/// Renders the main dashboard page with summary cards and recent transactions.
fn dashboard_view(
    nav_bar: NavBar<'_>,
    summary: &TotalsSummary,
    recent_transactions: &[TransactionTableRow],
) -> Markup {
    let nav_bar = nav_bar.into_html();

    let content = html!(
        (nav_bar)

        div class={(PAGE_CONTAINER_STYLE) " max-w-screen-xl"}
        {
            (totals_cards_view(summary))

            (recent_transactions_view(recent_transactions))
        }
    );

    base("Dashboard", &[], &content)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::extract::State;
    use rusqlite::Connection;
    use scraper::Selector;
    use time::macros::date;

    use crate::{
        dashboard::handlers::DashboardState,
        db::initialize,
        ledger::TransactionKind,
        test_utils::{assert_status_ok, assert_valid_html, parse_html_document},
        transaction::{Transaction, create_transaction},
    };

    use super::get_dashboard_page;

    fn get_test_state() -> DashboardState {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();

        DashboardState {
            db_connection: Arc::new(Mutex::new(connection)),
        }
    }

    #[tokio::test]
    async fn dashboard_shows_totals_and_recent_transactions() {
        let state = get_test_state();
        {
            let connection = state.db_connection.lock().unwrap();
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
            create_transaction(
                Transaction::build(
                    TransactionKind::Expense,
                    300.0,
                    date!(2025 - 01 - 10),
                    "Groceries",
                ),
                &connection,
            )
            .unwrap();
        }

        let response = get_dashboard_page(State(state)).await.unwrap();

        assert_status_ok(&response);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        let text = html.root_element().text().collect::<String>();
        assert!(text.contains("$1,000.00"));
        assert!(text.contains("$300.00"));
        assert!(text.contains("$700.00"));
        assert!(text.contains("70%"));
        assert!(text.contains("Salary"));
        assert!(text.contains("Groceries"));
    }

    #[tokio::test]
    async fn displays_prompt_text_on_no_data() {
        let state = get_test_state();

        let response = get_dashboard_page(State(state)).await.unwrap();

        assert_status_ok(&response);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        let text = html.root_element().text().collect::<String>();
        assert!(text.contains("Nothing here yet"));

        let card_selector = Selector::parse("section").unwrap();
        assert!(html.select(&card_selector).next().is_none());
    }

    #[tokio::test]
    async fn recent_transactions_are_limited_to_five() {
        let state = get_test_state();
        {
            let connection = state.db_connection.lock().unwrap();
            for day in 1..=7u8 {
                create_transaction(
                    Transaction::build(
                        TransactionKind::Expense,
                        day as f64,
                        date!(2025 - 01 - 01).replace_day(day).unwrap(),
                        &format!("Day {day}"),
                    ),
                    &connection,
                )
                .unwrap();
            }
        }

        let response = get_dashboard_page(State(state)).await.unwrap();

        let html = parse_html_document(response).await;
        let text = html.root_element().text().collect::<String>();

        // Newest five only.
        assert!(text.contains("Day 7"));
        assert!(text.contains("Day 3"));
        assert!(!text.contains("Day 2"));
    }
}
