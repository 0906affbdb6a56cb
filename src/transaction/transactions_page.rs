//! Defines the route handler for the page that displays transactions as a table.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState, Error, endpoints,
    html::{
        BUTTON_DELETE_STYLE, CATEGORY_BADGE_STYLE, LINK_STYLE, PAGE_CONTAINER_STYLE,
        TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base, format_currency, link,
    },
    ledger::TransactionKind,
    navigation::NavBar,
    pagination::{PageControl, PaginationConfig, page_controls},
    transaction::{TransactionTableRow, count_transactions, get_transaction_table_rows},
};

/// The state needed for the transactions page.
#[derive(Debug, Clone)]
pub struct TransactionsPageState {
    /// The database connection for reading transactions.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The config that controls how to display pages of data.
    pub pagination_config: PaginationConfig,
}

impl FromRef<AppState> for TransactionsPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            pagination_config: state.pagination_config.clone(),
        }
    }
}

/// The query parameters for the transactions page.
#[derive(Debug, Deserialize)]
pub struct TransactionsQuery {
    /// The page number to display, starting from 1.
    pub page: Option<u64>,
}

/// Display transactions as a paged table, newest first.
pub async fn get_transactions_page(
    State(state): State<TransactionsPageState>,
    Query(query): Query<TransactionsQuery>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let config = &state.pagination_config;
    let transaction_count = count_transactions(&connection)
        .inspect_err(|error| tracing::error!("could not count transactions: {error}"))?;

    let page_size = config.default_page_size;
    let page_count = transaction_count.div_ceil(page_size).max(1);
    let current_page = query
        .page
        .unwrap_or(config.default_page)
        .clamp(1, page_count);

    let rows = get_transaction_table_rows(page_size, (current_page - 1) * page_size, &connection)
        .inspect_err(|error| tracing::error!("could not get transactions: {error}"))?;

    let controls = page_controls(current_page, page_count, config.max_page_links);

    Ok(transactions_view(&rows, &controls).into_response())
}

fn transactions_view(rows: &[TransactionTableRow], controls: &[PageControl]) -> Markup {
    let nav_bar = NavBar::new(endpoints::TRANSACTIONS_VIEW).into_html();
    let new_transaction_link = link(endpoints::NEW_TRANSACTION_VIEW, "Add a transaction");

    let content = html!(
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            h2 class="text-xl font-bold mb-4" { "Transactions" }

            p class="mb-4" { (new_transaction_link) }

            @if rows.is_empty() {
                p
                {
                    "Nothing here yet. Transactions will show up here once you add some."
                }
            } @else {
                div class="overflow-x-auto rounded-lg shadow w-full max-w-4xl"
                {
                    table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
                    {
                        thead class=(TABLE_HEADER_STYLE)
                        {
                            tr
                            {
                                th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Amount" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "" }
                            }
                        }

                        tbody
                        {
                            @for row in rows {
                                (transaction_row(row))
                            }
                        }
                    }
                }

                (pagination_view(controls))
            }
        }
    );

    base("Transactions", &[], &content)
}

fn transaction_row(row: &TransactionTableRow) -> Markup {
    let delete_url = endpoints::format_endpoint(endpoints::DELETE_TRANSACTION, row.id);

    let (amount_style, amount_sign) = match row.kind {
        TransactionKind::Income => ("text-green-600 dark:text-green-400", "+"),
        TransactionKind::Expense => ("text-red-600 dark:text-red-400", "-"),
    };

    html!(
        tr class=(TABLE_ROW_STYLE)
        {
            td class=(TABLE_CELL_STYLE) { (row.date) }

            td class=(TABLE_CELL_STYLE) { (row.description) }

            td class=(TABLE_CELL_STYLE)
            {
                @if let Some(category_name) = &row.category_name {
                    span class=(CATEGORY_BADGE_STYLE)
                    {
                        @if let Some(icon) = &row.category_icon {
                            @if !icon.is_empty() {
                                span class="mr-1" { (icon) }
                            }
                        }
                        (category_name)
                    }
                }
            }

            td class={(TABLE_CELL_STYLE) " " (amount_style)}
            {
                (amount_sign) (format_currency(row.amount))
            }

            td class=(TABLE_CELL_STYLE)
            {
                button
                    type="button"
                    hx-delete=(delete_url)
                    hx-target="closest tr"
                    hx-swap="outerHTML"
                    hx-target-error="#alert-container"
                    hx-confirm="Delete this transaction?"
                    class=(BUTTON_DELETE_STYLE)
                {
                    "Delete"
                }
            }
        }
    )
}

fn pagination_view(controls: &[PageControl]) -> Markup {
    let page_url = |page: u64| format!("{}?page={}", endpoints::TRANSACTIONS_VIEW, page);

    html!(
        nav class="flex items-center gap-2 mt-4" aria-label="Pagination"
        {
            @for control in controls {
                @match control {
                    PageControl::Back(page) => {
                        a href=(page_url(*page)) class=(LINK_STYLE) { "Back" }
                    }
                    PageControl::Number { page, is_current: true } => {
                        span class="font-bold" aria-current="page" { (page) }
                    }
                    PageControl::Number { page, is_current: false } => {
                        a href=(page_url(*page)) class=(LINK_STYLE) { (page) }
                    }
                    PageControl::Gap => {
                        span { "…" }
                    }
                    PageControl::Next(page) => {
                        a href=(page_url(*page)) class=(LINK_STYLE) { "Next" }
                    }
                }
            }
        }
    )
}

#[cfg(test)]
mod transactions_page_tests {
    use std::sync::{Arc, Mutex};

    use axum::extract::{Query, State};
    use rusqlite::Connection;
    use scraper::Selector;
    use time::macros::date;

    use crate::{
        db::initialize,
        ledger::TransactionKind,
        pagination::PaginationConfig,
        test_utils::{assert_status_ok, assert_valid_html, parse_html_document},
        transaction::{Transaction, create_transaction},
    };

    use super::{TransactionsPageState, TransactionsQuery, get_transactions_page};

    fn get_page_state(page_size: u64) -> TransactionsPageState {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();

        TransactionsPageState {
            db_connection: Arc::new(Mutex::new(connection)),
            pagination_config: PaginationConfig {
                default_page: 1,
                default_page_size: page_size,
                max_page_links: 5,
            },
        }
    }

    fn insert_transactions(state: &TransactionsPageState, count: u8) {
        let connection = state.db_connection.lock().unwrap();
        for day in 1..=count {
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

    #[tokio::test]
    async fn shows_empty_state_without_transactions() {
        let state = get_page_state(20);

        let response = get_transactions_page(State(state), Query(TransactionsQuery { page: None }))
            .await
            .unwrap();

        assert_status_ok(&response);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        let table_selector = Selector::parse("table").unwrap();
        assert!(html.select(&table_selector).next().is_none());
    }

    #[tokio::test]
    async fn shows_one_row_per_transaction_newest_first() {
        let state = get_page_state(20);
        insert_transactions(&state, 3);

        let response = get_transactions_page(State(state), Query(TransactionsQuery { page: None }))
            .await
            .unwrap();

        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        let row_selector = Selector::parse("tbody tr").unwrap();
        let rows: Vec<String> = html
            .select(&row_selector)
            .map(|row| row.text().collect::<String>())
            .collect();

        assert_eq!(rows.len(), 3);
        assert!(rows[0].contains("Day 3"));
        assert!(rows[2].contains("Day 1"));
    }

    #[tokio::test]
    async fn pages_are_limited_to_the_page_size() {
        let state = get_page_state(2);
        insert_transactions(&state, 5);

        let response = get_transactions_page(
            State(state),
            Query(TransactionsQuery { page: Some(2) }),
        )
        .await
        .unwrap();

        let html = parse_html_document(response).await;

        let row_selector = Selector::parse("tbody tr").unwrap();
        let rows: Vec<String> = html
            .select(&row_selector)
            .map(|row| row.text().collect::<String>())
            .collect();

        assert_eq!(rows.len(), 2);
        assert!(rows[0].contains("Day 3"));
        assert!(rows[1].contains("Day 2"));
    }

    #[tokio::test]
    async fn out_of_range_page_is_clamped() {
        let state = get_page_state(2);
        insert_transactions(&state, 3);

        let response = get_transactions_page(
            State(state),
            Query(TransactionsQuery { page: Some(99) }),
        )
        .await
        .unwrap();

        let html = parse_html_document(response).await;

        let row_selector = Selector::parse("tbody tr").unwrap();
        assert_eq!(html.select(&row_selector).count(), 1);
    }
}
