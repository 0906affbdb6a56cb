//! The page displaying budgets for a month with their consumption.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;
use serde::Deserialize;
use time::OffsetDateTime;

use crate::{
    AppState, Error, endpoints,
    budget::{BudgetWithCategory, get_budgets_for_month},
    html::{
        BUTTON_DELETE_STYLE, LINK_STYLE, PAGE_CONTAINER_STYLE, base, format_currency, link,
    },
    ledger::{BudgetProgress, BudgetStatus, PeriodKey, budget_progress},
    navigation::NavBar,
    timezone::get_local_offset,
    transaction::get_ledger_entries,
};

/// The state needed for the budgets page.
#[derive(Debug, Clone)]
pub struct BudgetsPageState {
    /// The database connection for reading budgets and transactions.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for BudgetsPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The query parameters for the budgets page.
///
/// Defaults to the current month in the configured timezone.
#[derive(Debug, Deserialize)]
pub struct BudgetsQuery {
    /// Calendar month to display, 1-12.
    pub month: Option<u8>,
    /// Calendar year to display.
    pub year: Option<i32>,
}

/// A budget joined with its derived consumption, ready for rendering.
struct BudgetCard {
    budget: BudgetWithCategory,
    progress: BudgetProgress,
}

/// Display the budgets for one month with progress bars and status badges.
pub async fn get_budgets_page(
    State(state): State<BudgetsPageState>,
    Query(query): Query<BudgetsQuery>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let local_timezone = get_local_offset(&state.local_timezone).ok_or_else(|| {
        tracing::error!("Invalid timezone {}", state.local_timezone);
        Error::InvalidTimezoneError(state.local_timezone.clone())
    })?;

    let today = OffsetDateTime::now_utc().to_offset(local_timezone).date();
    let period = PeriodKey {
        year: query.year.unwrap_or(today.year()),
        month: query.month.unwrap_or(u8::from(today.month())).clamp(1, 12),
    };

    let budgets = get_budgets_for_month(period.month, period.year, &connection)
        .inspect_err(|error| tracing::error!("could not get budgets: {error}"))?;

    let entries = get_ledger_entries(&connection)
        .inspect_err(|error| tracing::error!("could not get transactions: {error}"))?;

    let cards: Vec<BudgetCard> = budgets
        .into_iter()
        .map(|budget| BudgetCard {
            progress: budget_progress(&budget.budget, &entries),
            budget,
        })
        .collect();

    Ok(budgets_view(period, &cards).into_response())
}

fn previous_period(period: PeriodKey) -> PeriodKey {
    if period.month == 1 {
        PeriodKey {
            year: period.year - 1,
            month: 12,
        }
    } else {
        PeriodKey {
            year: period.year,
            month: period.month - 1,
        }
    }
}

fn next_period(period: PeriodKey) -> PeriodKey {
    if period.month == 12 {
        PeriodKey {
            year: period.year + 1,
            month: 1,
        }
    } else {
        PeriodKey {
            year: period.year,
            month: period.month + 1,
        }
    }
}

fn period_url(period: PeriodKey) -> String {
    format!(
        "{}?month={}&year={}",
        endpoints::BUDGETS_VIEW,
        period.month,
        period.year
    )
}

fn budgets_view(period: PeriodKey, cards: &[BudgetCard]) -> Markup {
    let nav_bar = NavBar::new(endpoints::BUDGETS_VIEW).into_html();
    let new_budget_link = link(endpoints::NEW_BUDGET_VIEW, "Create a new budget");

    let total_limit: f64 = cards.iter().map(|card| card.budget.budget.limit).sum();
    let total_spent: f64 = cards.iter().map(|card| card.progress.spent).sum();

    let content = html!(
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="flex items-center gap-4 mb-4"
            {
                a href=(period_url(previous_period(period))) class=(LINK_STYLE) { "←" }

                h2 class="text-xl font-bold" { "Budgets for " (period) }

                a href=(period_url(next_period(period))) class=(LINK_STYLE) { "→" }
            }

            p class="mb-4" { (new_budget_link) }

            @if cards.is_empty() {
                p
                {
                    "No budgets for this month yet. Create one to keep an eye on \
                    a category's spending."
                }
            } @else {
                (totals_view(total_limit, total_spent))

                div class="w-full max-w-2xl space-y-4"
                {
                    @for card in cards {
                        (budget_card_view(card))
                    }
                }
            }
        }
    );

    base("Budgets", &[], &content)
}

fn totals_view(total_limit: f64, total_spent: f64) -> Markup {
    html!(
        div class="grid grid-cols-3 gap-4 w-full max-w-2xl mb-6"
        {
            div class="bg-white dark:bg-gray-800 rounded-lg shadow p-4"
            {
                p class="text-sm text-gray-600 dark:text-gray-400" { "Total Budget" }
                p class="text-2xl font-bold" { (format_currency(total_limit)) }
            }

            div class="bg-white dark:bg-gray-800 rounded-lg shadow p-4"
            {
                p class="text-sm text-gray-600 dark:text-gray-400" { "Total Spent" }
                p class="text-2xl font-bold text-red-600 dark:text-red-400"
                {
                    (format_currency(total_spent))
                }
            }

            div class="bg-white dark:bg-gray-800 rounded-lg shadow p-4"
            {
                p class="text-sm text-gray-600 dark:text-gray-400" { "Remaining" }
                p class="text-2xl font-bold text-green-600 dark:text-green-400"
                {
                    (format_currency(total_limit - total_spent))
                }
            }
        }
    )
}

fn status_badge_styles(status: BudgetStatus) -> &'static str {
    match status {
        BudgetStatus::Ok => {
            "px-3 py-1 rounded-full text-xs font-semibold bg-green-100 text-green-700"
        }
        BudgetStatus::Warning => {
            "px-3 py-1 rounded-full text-xs font-semibold bg-yellow-100 text-yellow-700"
        }
        BudgetStatus::Critical => {
            "px-3 py-1 rounded-full text-xs font-semibold bg-orange-100 text-orange-700"
        }
        BudgetStatus::Exceeded => {
            "px-3 py-1 rounded-full text-xs font-semibold bg-red-100 text-red-700"
        }
    }
}

fn progress_bar_color(status: BudgetStatus) -> &'static str {
    match status {
        BudgetStatus::Ok => "bg-green-500",
        BudgetStatus::Warning => "bg-yellow-500",
        BudgetStatus::Critical | BudgetStatus::Exceeded => "bg-red-500",
    }
}

fn budget_card_view(card: &BudgetCard) -> Markup {
    let budget = &card.budget;
    let progress = &card.progress;
    let delete_url = endpoints::format_endpoint(endpoints::DELETE_BUDGET, budget.budget.id);

    // The raw percentage can pass 100; only the rendered bar width is capped.
    let bar_width = progress.percentage.min(100.0);

    html!(
        div class="budget-card bg-white dark:bg-gray-800 rounded-lg shadow p-4 space-y-3"
        {
            div class="flex items-center justify-between"
            {
                div class="flex items-center gap-3"
                {
                    @if !budget.category_icon.is_empty() {
                        span class="text-3xl" { (budget.category_icon) }
                    }

                    div
                    {
                        p class="font-bold text-lg" { (budget.category_name) }
                        p class="text-xs text-gray-600 dark:text-gray-400"
                        {
                            "Budget: " (format_currency(budget.budget.limit))
                        }
                    }
                }

                span class=(status_badge_styles(progress.status))
                {
                    (progress.status.label())
                }
            }

            div class="space-y-2"
            {
                div class="flex justify-between text-sm"
                {
                    span class="text-gray-600 dark:text-gray-400"
                    {
                        "Spent: " (format_currency(progress.spent))
                    }
                    span class="font-semibold" { (format!("{:.1}", progress.percentage)) "%" }
                }

                div class="w-full bg-gray-200 dark:bg-gray-700 rounded-full h-3 overflow-hidden"
                {
                    div
                        class={"h-full " (progress_bar_color(progress.status))}
                        role="progressbar"
                        aria-valuenow=(format!("{:.1}", progress.percentage))
                        aria-valuemin="0"
                        aria-valuemax="100"
                        style=(format!("width: {bar_width:.1}%"))
                    {}
                }

                div class="flex justify-between text-xs text-gray-600 dark:text-gray-400"
                {
                    @if progress.remaining >= 0.0 {
                        span { "Remaining: " (format_currency(progress.remaining)) }
                    } @else {
                        span class="text-red-600 dark:text-red-400"
                        {
                            "Over by " (format_currency(-progress.remaining))
                        }
                    }
                }
            }

            @if progress.status == BudgetStatus::Critical || progress.status == BudgetStatus::Exceeded {
                p class="text-xs text-yellow-700 dark:text-yellow-300"
                {
                    "You have spent " (format!("{:.1}", progress.percentage)) "% of this budget."
                }
            }

            div class="pt-2 border-t border-gray-200 dark:border-gray-700"
            {
                button
                    type="button"
                    hx-delete=(delete_url)
                    hx-target="closest .budget-card"
                    hx-swap="outerHTML"
                    hx-target-error="#alert-container"
                    hx-confirm="Delete this budget?"
                    class=(BUTTON_DELETE_STYLE)
                {
                    "Delete"
                }
            }
        }
    )
}

#[cfg(test)]
mod budgets_page_tests {
    use std::sync::{Arc, Mutex};

    use axum::extract::{Query, State};
    use rusqlite::Connection;
    use scraper::Selector;
    use time::macros::date;

    use crate::{
        budget::{NewBudget, create_budget},
        category::{CategoryName, NewCategory, create_category},
        db::initialize,
        ledger::TransactionKind,
        test_utils::{assert_status_ok, assert_valid_html, parse_html_document},
        transaction::{Transaction, create_transaction},
    };

    use super::{BudgetsPageState, BudgetsQuery, get_budgets_page};

    fn get_page_state() -> BudgetsPageState {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();

        BudgetsPageState {
            db_connection: Arc::new(Mutex::new(connection)),
            local_timezone: "Etc/UTC".to_owned(),
        }
    }

    fn seed_budget_with_spending(state: &BudgetsPageState, limit: f64, spent: f64) {
        let connection = state.db_connection.lock().unwrap();
        let category = create_category(
            NewCategory {
                name: CategoryName::new_unchecked("Food"),
                kind: TransactionKind::Expense,
                color: String::new(),
                icon: "🍔".to_owned(),
            },
            &connection,
        )
        .unwrap();
        create_budget(
            NewBudget {
                category_id: category.id,
                limit,
                month: 1,
                year: 2025,
            },
            &connection,
        )
        .unwrap();
        create_transaction(
            Transaction::build(
                TransactionKind::Expense,
                spent,
                date!(2025 - 01 - 10),
                "Groceries",
            )
            .category_id(Some(category.id)),
            &connection,
        )
        .unwrap();
    }

    #[tokio::test]
    async fn shows_progress_for_each_budget() {
        let state = get_page_state();
        seed_budget_with_spending(&state, 1000.0, 300.0);

        let response = get_budgets_page(
            State(state),
            Query(BudgetsQuery {
                month: Some(1),
                year: Some(2025),
            }),
        )
        .await
        .unwrap();

        assert_status_ok(&response);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        let bar_selector = Selector::parse("div[role=progressbar]").unwrap();
        let bar = html
            .select(&bar_selector)
            .next()
            .expect("No progress bar found");

        assert_eq!(bar.value().attr("aria-valuenow"), Some("30.0"));
        assert_eq!(bar.value().attr("style"), Some("width: 30.0%"));
    }

    #[tokio::test]
    async fn exceeded_budget_shows_true_percentage_with_capped_bar() {
        let state = get_page_state();
        seed_budget_with_spending(&state, 100.0, 300.0);

        let response = get_budgets_page(
            State(state),
            Query(BudgetsQuery {
                month: Some(1),
                year: Some(2025),
            }),
        )
        .await
        .unwrap();

        let html = parse_html_document(response).await;

        let bar_selector = Selector::parse("div[role=progressbar]").unwrap();
        let bar = html
            .select(&bar_selector)
            .next()
            .expect("No progress bar found");

        // The true figure is reported while the rendered width is capped.
        assert_eq!(bar.value().attr("aria-valuenow"), Some("300.0"));
        assert_eq!(bar.value().attr("style"), Some("width: 100.0%"));

        let text = html.root_element().text().collect::<String>();
        assert!(text.contains("Exceeded"));
        assert!(text.contains("Over by"));
    }

    #[tokio::test]
    async fn other_months_budgets_are_not_shown() {
        let state = get_page_state();
        seed_budget_with_spending(&state, 1000.0, 300.0);

        let response = get_budgets_page(
            State(state),
            Query(BudgetsQuery {
                month: Some(2),
                year: Some(2025),
            }),
        )
        .await
        .unwrap();

        let html = parse_html_document(response).await;

        let bar_selector = Selector::parse("div[role=progressbar]").unwrap();
        assert!(html.select(&bar_selector).next().is_none());
    }

    #[tokio::test]
    async fn shows_empty_state_without_budgets() {
        let state = get_page_state();

        let response = get_budgets_page(
            State(state),
            Query(BudgetsQuery {
                month: Some(1),
                year: Some(2025),
            }),
        )
        .await
        .unwrap();

        assert_status_ok(&response);
        let html = parse_html_document(response).await;
        let text = html.root_element().text().collect::<String>();

        assert!(text.contains("No budgets for this month yet"));
    }
}
