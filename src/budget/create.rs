//! Budget creation page and endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    Form,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use maud::{Markup, html};
use rusqlite::Connection;
use serde::Deserialize;
use time::OffsetDateTime;

use crate::{
    AppState, Error, endpoints,
    budget::{NewBudget, create_budget},
    category::{Category, CategoryId, get_all_categories},
    html::{
        BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, base,
    },
    ledger::{PeriodKey, TransactionKind},
    navigation::NavBar,
    timezone::get_local_offset,
};

/// The state needed for creating a budget.
#[derive(Debug, Clone)]
pub struct CreateBudgetState {
    /// The database connection for managing budgets.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for CreateBudgetState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The form data for creating a budget.
#[derive(Debug, Deserialize)]
pub struct BudgetForm {
    /// The ID of the category the budget covers.
    pub category_id: CategoryId,
    /// The spending ceiling.
    pub limit: f64,
    /// Calendar month the budget covers, 1-12.
    pub month: u8,
    /// Calendar year the budget covers.
    pub year: i32,
}

/// Render the budget creation page.
pub async fn get_new_budget_page(
    State(state): State<CreateBudgetState>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let categories = get_all_categories(&connection)
        .inspect_err(|error| tracing::error!("could not get categories: {error}"))?;

    // Budgets cap spending, so only expense categories make sense here.
    let expense_categories: Vec<Category> = categories
        .into_iter()
        .filter(|category| category.kind == TransactionKind::Expense)
        .collect();

    let local_timezone = get_local_offset(&state.local_timezone).ok_or_else(|| {
        tracing::error!("Invalid timezone {}", state.local_timezone);
        Error::InvalidTimezoneError(state.local_timezone.clone())
    })?;

    let today = OffsetDateTime::now_utc().to_offset(local_timezone).date();

    Ok(new_budget_view(PeriodKey::from_date(today), &expense_categories).into_response())
}

/// Handle budget creation form submission.
pub async fn create_budget_endpoint(
    State(state): State<CreateBudgetState>,
    Form(form): Form<BudgetForm>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    let new_budget = NewBudget {
        category_id: form.category_id,
        limit: form.limit,
        month: form.month,
        year: form.year,
    };

    match create_budget(new_budget, &connection) {
        Ok(_) => (
            HxRedirect(endpoints::BUDGETS_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(error) => {
            tracing::error!("could not create budget: {error}");

            error.into_alert_response()
        }
    }
}

fn new_budget_view(current_period: PeriodKey, expense_categories: &[Category]) -> Markup {
    let nav_bar = NavBar::new(endpoints::NEW_BUDGET_VIEW).into_html();
    let create_budget_endpoint = endpoints::POST_BUDGET;

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            form
                hx-post=(create_budget_endpoint)
                hx-target-error="#alert-container"
                class="w-full space-y-4 md:space-y-6"
            {
                div
                {
                    label for="category_id" class=(FORM_LABEL_STYLE) { "Category" }

                    select
                        id="category_id"
                        name="category_id"
                        required
                        class=(FORM_TEXT_INPUT_STYLE)
                    {
                        @for category in expense_categories {
                            option value=(category.id) { (category.name) }
                        }
                    }
                }

                div
                {
                    label for="limit" class=(FORM_LABEL_STYLE) { "Monthly Limit" }

                    input
                        id="limit"
                        type="number"
                        name="limit"
                        min="0.01"
                        step="0.01"
                        placeholder="0.00"
                        required
                        autofocus
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label for="month" class=(FORM_LABEL_STYLE) { "Month" }

                    select id="month" name="month" class=(FORM_TEXT_INPUT_STYLE)
                    {
                        @for month in 1..=12u8 {
                            option
                                value=(month)
                                selected[month == current_period.month]
                            {
                                (PeriodKey { year: current_period.year, month }.month_abbreviation())
                            }
                        }
                    }
                }

                div
                {
                    label for="year" class=(FORM_LABEL_STYLE) { "Year" }

                    input
                        id="year"
                        type="number"
                        name="year"
                        value=(current_period.year)
                        required
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Create Budget" }
            }
        }
    };

    base("Create Budget", &[], &content)
}

#[cfg(test)]
mod new_budget_page_tests {
    use std::sync::{Arc, Mutex};

    use axum::{extract::State, response::IntoResponse};
    use rusqlite::Connection;
    use scraper::Selector;

    use crate::{
        budget::create::CreateBudgetState,
        category::{CategoryName, NewCategory, create_category},
        db::initialize,
        endpoints,
        ledger::TransactionKind,
        test_utils::{
            assert_form_input, assert_form_select, assert_form_submit_button, assert_hx_endpoint,
            assert_status_ok, assert_valid_html, must_get_form, parse_html_document,
        },
    };

    use super::get_new_budget_page;

    fn get_page_state() -> CreateBudgetState {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();

        CreateBudgetState {
            db_connection: Arc::new(Mutex::new(connection)),
            local_timezone: "Etc/UTC".to_owned(),
        }
    }

    #[tokio::test]
    async fn render_page() {
        let state = get_page_state();

        let response = get_new_budget_page(State(state))
            .await
            .unwrap()
            .into_response();

        assert_status_ok(&response);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        let form = must_get_form(&html);
        assert_hx_endpoint(&form, endpoints::POST_BUDGET, "hx-post");
        assert_form_select(&form, "category_id");
        assert_form_input(&form, "limit", "number");
        assert_form_select(&form, "month");
        assert_form_input(&form, "year", "number");
        assert_form_submit_button(&form);
    }

    #[tokio::test]
    async fn category_select_only_lists_expense_categories() {
        let state = get_page_state();
        {
            let connection = state.db_connection.lock().unwrap();
            create_category(
                NewCategory {
                    name: CategoryName::new_unchecked("Food"),
                    kind: TransactionKind::Expense,
                    color: String::new(),
                    icon: String::new(),
                },
                &connection,
            )
            .unwrap();
            create_category(
                NewCategory {
                    name: CategoryName::new_unchecked("Salary"),
                    kind: TransactionKind::Income,
                    color: String::new(),
                    icon: String::new(),
                },
                &connection,
            )
            .unwrap();
        }

        let response = get_new_budget_page(State(state))
            .await
            .unwrap()
            .into_response();

        let html = parse_html_document(response).await;
        let option_selector = Selector::parse("select[name=category_id] option").unwrap();
        let options: Vec<String> = html
            .select(&option_selector)
            .map(|option| option.text().collect::<String>())
            .collect();

        assert_eq!(options, vec!["Food".to_owned()]);
    }
}
