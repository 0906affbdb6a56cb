//! Category creation page and endpoint.

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

use crate::{
    AppState, Error, endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, base,
    },
    navigation::NavBar,
    category::{CategoryFormData, CategoryName, NewCategory, create_category},
};

/// The state needed for creating a category.
#[derive(Debug, Clone)]
pub struct CreateCategoryEndpointState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateCategoryEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the category creation page.
pub async fn get_new_category_page() -> Response {
    new_category_view().into_response()
}

/// Handle category creation form submission.
pub async fn create_category_endpoint(
    State(state): State<CreateCategoryEndpointState>,
    Form(form): Form<CategoryFormData>,
) -> Response {
    let name = match CategoryName::new(&form.name) {
        Ok(name) => name,
        Err(error) => {
            return new_category_form_view(&format!("Error: {error}")).into_response();
        }
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    let new_category = NewCategory {
        name,
        kind: form.kind,
        color: form.color,
        icon: form.icon,
    };

    match create_category(new_category, &connection) {
        Ok(_) => (
            HxRedirect(endpoints::CATEGORIES_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(error @ Error::DuplicateCategoryName(_)) => error.into_alert_response(),
        Err(error) => {
            tracing::error!("An unexpected error occurred while creating a category: {error}");

            error.into_alert_response()
        }
    }
}

fn new_category_view() -> Markup {
    let nav_bar = NavBar::new(endpoints::NEW_CATEGORY_VIEW).into_html();
    let form = new_category_form_view("");

    let content = html! {
        (nav_bar)
        div class=(FORM_CONTAINER_STYLE) { (form) }
    };

    base("Create Category", &[], &content)
}

/// Shared form fields for creating and editing categories.
pub(super) fn category_form_fields(
    name: &str,
    kind: &str,
    color: &str,
    icon: &str,
) -> Markup {
    html! {
        div
        {
            label
                for="name"
                class=(FORM_LABEL_STYLE)
            {
                "Category Name"
            }

            input
                id="name"
                type="text"
                name="name"
                placeholder="Category Name"
                value=(name)
                required
                autofocus
                class=(FORM_TEXT_INPUT_STYLE);
        }

        div
        {
            label
                for="kind"
                class=(FORM_LABEL_STYLE)
            {
                "Kind"
            }

            select
                id="kind"
                name="kind"
                class=(FORM_TEXT_INPUT_STYLE)
            {
                option value="expense" selected[kind == "expense"] { "Expense" }
                option value="income" selected[kind == "income"] { "Income" }
            }
        }

        div
        {
            label
                for="color"
                class=(FORM_LABEL_STYLE)
            {
                "Color"
            }

            input
                id="color"
                type="color"
                name="color"
                value=(if color.is_empty() { "#3b82f6" } else { color })
                class=(FORM_TEXT_INPUT_STYLE);
        }

        div
        {
            label
                for="icon"
                class=(FORM_LABEL_STYLE)
            {
                "Icon"
            }

            input
                id="icon"
                type="text"
                name="icon"
                placeholder="e.g. 🍔"
                value=(icon)
                class=(FORM_TEXT_INPUT_STYLE);
        }
    }
}

fn new_category_form_view(error_message: &str) -> Markup {
    let create_category_endpoint = endpoints::POST_CATEGORY;

    html! {
        form
            hx-post=(create_category_endpoint)
            hx-target-error="#alert-container"
            class="w-full space-y-4 md:space-y-6"
        {
            (category_form_fields("", "expense", "", ""))

            @if !error_message.is_empty() {
                p class="text-red-600 dark:text-red-400"
                {
                    (error_message)
                }
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Create Category" }
        }
    }
}


#[cfg(test)]
mod create_category_endpoint_tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        Form,
        extract::State,
        http::{StatusCode, header::CONTENT_TYPE},
        response::IntoResponse,
    };
    use rusqlite::Connection;

    use crate::{
        category::{
            CategoryFormData, CategoryName, create::CreateCategoryEndpointState,
            create_category_endpoint, create_category_table, get_category,
        },
        endpoints,
        ledger::TransactionKind,
        test_utils::{
            assert_form_error_message, assert_hx_redirect, assert_valid_html, get_header,
            must_get_form, parse_html_fragment,
        },
    };

    fn get_category_state() -> CreateCategoryEndpointState {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        create_category_table(&connection).expect("Could not create category table");

        CreateCategoryEndpointState {
            db_connection: Arc::new(Mutex::new(connection)),
        }
    }

    #[tokio::test]
    async fn can_create_category() {
        let state = get_category_state();
        let form = CategoryFormData {
            name: "Groceries".to_owned(),
            kind: TransactionKind::Expense,
            color: "#ef4444".to_owned(),
            icon: "🛒".to_owned(),
        };

        let response = create_category_endpoint(State(state.clone()), Form(form))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_hx_redirect(&response, endpoints::CATEGORIES_VIEW);

        let connection = state.db_connection.lock().unwrap();
        let category = get_category(1, &connection).expect("Could not get created category");
        assert_eq!(category.name, CategoryName::new_unchecked("Groceries"));
        assert_eq!(category.kind, TransactionKind::Expense);
        assert_eq!(category.icon, "🛒");
    }

    #[tokio::test]
    async fn create_category_fails_on_empty_name() {
        let state = get_category_state();
        let form = CategoryFormData {
            name: "".to_owned(),
            kind: TransactionKind::Expense,
            color: String::new(),
            icon: String::new(),
        };

        let response = create_category_endpoint(State(state), Form(form))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            get_header(&response, CONTENT_TYPE.as_str()),
            "text/html; charset=utf-8"
        );
        let html = parse_html_fragment(response).await;
        assert_valid_html(&html);
        let form = must_get_form(&html);
        assert_form_error_message(&form, "Error: Category name cannot be empty");
    }

    #[tokio::test]
    async fn create_category_fails_on_duplicate_name() {
        let state = get_category_state();
        let form = CategoryFormData {
            name: "Rent".to_owned(),
            kind: TransactionKind::Expense,
            color: String::new(),
            icon: String::new(),
        };
        create_category_endpoint(State(state.clone()), Form(form))
            .await
            .into_response();

        let duplicate_form = CategoryFormData {
            name: "Rent".to_owned(),
            kind: TransactionKind::Expense,
            color: String::new(),
            icon: String::new(),
        };
        let response = create_category_endpoint(State(state), Form(duplicate_form))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
