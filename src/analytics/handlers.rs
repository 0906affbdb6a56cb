//! Analytics HTTP handler and view rendering.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error, endpoints,
    analytics::charts::{AnalyticsChart, build_analytics_charts, charts_script, charts_view},
    html::{HeadElement, PAGE_CONTAINER_STYLE, base, format_currency, link},
    ledger::{AggregateStats, aggregate_stats},
    navigation::NavBar,
    transaction::get_ledger_entries,
};

/// The state needed for displaying the analytics page.
#[derive(Debug, Clone)]
pub struct AnalyticsState {
    /// The database connection for reading transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for AnalyticsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Display the analytics page with trend and distribution charts.
pub async fn get_analytics_page(State(state): State<AnalyticsState>) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let nav_bar = NavBar::new(endpoints::ANALYTICS_VIEW);

    let entries = get_ledger_entries(&connection)
        .inspect_err(|error| tracing::error!("could not get transactions: {error}"))?;

    if entries.is_empty() {
        return Ok(analytics_no_data_view(nav_bar).into_response());
    }

    let charts = build_analytics_charts(&entries);
    let stats = aggregate_stats(&entries);

    Ok(analytics_view(nav_bar, &charts, &stats).into_response())
}

/// Renders the analytics page when no transaction data exists.
fn analytics_no_data_view(nav_bar: NavBar) -> Markup {
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
                "Charts will show up here once you start " (new_transaction_link) "."
            }
        }
    );

    base("Analytics", &[], &content)
}

/// Renders the analytics page with charts and whole-ledger statistics.
fn analytics_view(
    nav_bar: NavBar<'_>,
    charts: &[AnalyticsChart],
    stats: &AggregateStats,
) -> Markup {
    let nav_bar = nav_bar.into_html();

    let content = html!(
        (nav_bar)

        div class={(PAGE_CONTAINER_STYLE) " max-w-screen-xl"}
        {
            (stats_strip_view(stats))

            (charts_view(charts))
        }
    );

    let scripts = [
        HeadElement::ScriptLink(
            "https://cdn.jsdelivr.net/npm/echarts@6.0.0/dist/echarts.min.js".to_owned(),
        ),
        charts_script(charts),
    ];

    base("Analytics", &scripts, &content)
}

/// Renders statistics across all transactions regardless of kind.
fn stats_strip_view(stats: &AggregateStats) -> Markup {
    let stat_card = |label: &str, value: String| {
        html!(
            div class="bg-white dark:bg-gray-800 rounded-lg shadow p-4"
            {
                p class="text-sm text-gray-600 dark:text-gray-400" { (label) }
                p class="text-2xl font-bold" { (value) }
            }
        )
    };

    html!(
        section class="grid grid-cols-2 md:grid-cols-4 gap-4 w-full mb-8"
        {
            (stat_card("Transactions", stats.count.to_string()))
            (stat_card("Average Amount", format_currency(stats.average)))
            (stat_card("Largest Amount", format_currency(stats.max)))
            (stat_card("Smallest Amount", format_currency(stats.min)))
        }
    )
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::extract::State;
    use rusqlite::Connection;
    use scraper::{Html, Selector};
    use time::macros::date;

    use crate::{
        analytics::handlers::AnalyticsState,
        db::initialize,
        ledger::TransactionKind,
        test_utils::{assert_status_ok, assert_valid_html, parse_html_document},
        transaction::{Transaction, create_transaction},
    };

    use super::get_analytics_page;

    fn get_test_state() -> AnalyticsState {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();

        AnalyticsState {
            db_connection: Arc::new(Mutex::new(connection)),
        }
    }

    fn seed_transactions(state: &AnalyticsState) {
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

    #[track_caller]
    fn assert_chart_exists(html: &Html, chart_id: &str) {
        let selector = Selector::parse(&format!("#{}", chart_id)).unwrap();
        assert!(
            html.select(&selector).next().is_some(),
            "Chart with id '{}' not found",
            chart_id
        );
    }

    #[tokio::test]
    async fn analytics_page_loads_successfully() {
        let state = get_test_state();
        seed_transactions(&state);

        let response = get_analytics_page(State(state)).await.unwrap();

        assert_status_ok(&response);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        assert_chart_exists(&html, "monthly-trend-chart");
        assert_chart_exists(&html, "category-distribution-chart");
        assert_chart_exists(&html, "monthly-comparison-chart");
    }

    #[tokio::test]
    async fn shows_aggregate_statistics() {
        let state = get_test_state();
        seed_transactions(&state);

        let response = get_analytics_page(State(state)).await.unwrap();

        let html = parse_html_document(response).await;
        let text = html.root_element().text().collect::<String>();

        // Income and expense amounts are pooled into one average/max/min.
        assert!(text.contains("$650.00"));
        assert!(text.contains("$1,000.00"));
        assert!(text.contains("$300.00"));
    }

    #[tokio::test]
    async fn displays_prompt_text_on_no_data() {
        let state = get_test_state();

        let response = get_analytics_page(State(state)).await.unwrap();

        assert_status_ok(&response);
        let html = parse_html_document(response).await;
        let text = html.root_element().text().collect::<String>();

        assert!(text.contains("Charts will show up here"));
    }
}
