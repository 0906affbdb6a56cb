//! Reports HTTP handler and view rendering.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error, endpoints,
    html::{
        PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base,
        format_currency, link,
    },
    ledger::{MonthlyTotals, PeriodKey, TotalsSummary, compute_totals, monthly_series},
    navigation::NavBar,
    transaction::get_ledger_entries,
};

/// The state needed for displaying the reports page.
#[derive(Debug, Clone)]
pub struct ReportsState {
    /// The database connection for reading transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ReportsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Display the monthly summary report with an export link.
pub async fn get_reports_page(State(state): State<ReportsState>) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let entries = get_ledger_entries(&connection)
        .inspect_err(|error| tracing::error!("could not get transactions: {error}"))?;

    let series = monthly_series(&entries);
    let summary = compute_totals(&entries);

    Ok(reports_view(&series, &summary).into_response())
}

fn reports_view(series: &[(PeriodKey, MonthlyTotals)], summary: &TotalsSummary) -> Markup {
    let nav_bar = NavBar::new(endpoints::REPORTS_VIEW).into_html();
    let csv_link = link(endpoints::TRANSACTIONS_CSV, "Download all transactions as CSV");

    let content = html!(
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            h2 class="text-xl font-bold mb-4" { "Monthly Summary" }

            p class="mb-4" { (csv_link) }

            @if series.is_empty() {
                p
                {
                    "Nothing to report yet. The monthly summary will show up here \
                    once you add some transactions."
                }
            } @else {
                div class="overflow-x-auto rounded-lg shadow w-full max-w-2xl"
                {
                    table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
                    {
                        thead class=(TABLE_HEADER_STYLE)
                        {
                            tr
                            {
                                th scope="col" class=(TABLE_CELL_STYLE) { "Month" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Income" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Expenses" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Net" }
                            }
                        }

                        tbody
                        {
                            @for (period, totals) in series {
                                (month_row(*period, *totals))
                            }

                            (totals_row(summary))
                        }
                    }
                }
            }
        }
    );

    base("Reports", &[], &content)
}

fn net_style(net: f64) -> &'static str {
    if net >= 0.0 {
        "text-green-600 dark:text-green-400"
    } else {
        "text-red-600 dark:text-red-400"
    }
}

fn month_row(period: PeriodKey, totals: MonthlyTotals) -> Markup {
    let net = totals.income - totals.expense;

    html!(
        tr class=(TABLE_ROW_STYLE)
        {
            th scope="row" class={(TABLE_CELL_STYLE) " font-medium text-gray-900 dark:text-white"}
            {
                (period)
            }

            td class={(TABLE_CELL_STYLE) " text-green-600 dark:text-green-400"}
            {
                (format_currency(totals.income))
            }

            td class={(TABLE_CELL_STYLE) " text-red-600 dark:text-red-400"}
            {
                (format_currency(totals.expense))
            }

            td class={(TABLE_CELL_STYLE) " " (net_style(net))}
            {
                (format_currency(net))
            }
        }
    )
}

fn totals_row(summary: &TotalsSummary) -> Markup {
    html!(
        tr class={(TABLE_ROW_STYLE) " font-bold"}
        {
            th scope="row" class={(TABLE_CELL_STYLE) " text-gray-900 dark:text-white"}
            {
                "Total"
            }

            td class={(TABLE_CELL_STYLE) " text-green-600 dark:text-green-400"}
            {
                (format_currency(summary.total_income))
            }

            td class={(TABLE_CELL_STYLE) " text-red-600 dark:text-red-400"}
            {
                (format_currency(summary.total_expense))
            }

            td class={(TABLE_CELL_STYLE) " " (net_style(summary.net_balance))}
            {
                (format_currency(summary.net_balance))
            }
        }
    )
}
