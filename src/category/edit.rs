//! Category editing page and endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    Form,
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error, endpoints,
    category::{
        Category, CategoryFormData, CategoryId, CategoryName, NewCategory,
        create::category_form_fields, get_category, update_category,
    },
    html::{BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, base},
    navigation::NavBar,
};

/// The state needed for editing a category.
#[derive(Debug, Clone)]
pub struct EditCategoryState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for EditCategoryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the category editing page.
pub async fn get_edit_category_page(
    State(state): State<EditCategoryState>,
    Path(category_id): Path<CategoryId>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let category = get_category(category_id, &connection)?;

    Ok(edit_category_view(&category).into_response())
}

/// Handle category edit form submission.
pub async fn update_category_endpoint(
    State(state): State<EditCategoryState>,
    Path(category_id): Path<CategoryId>,
    Form(form): Form<CategoryFormData>,
) -> Response {
    let name = match CategoryName::new(&form.name) {
        Ok(name) => name,
        Err(error) => return error.into_alert_response(),
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    let replacement = NewCategory {
        name,
        kind: form.kind,
        color: form.color,
        icon: form.icon,
    };

    match update_category(category_id, replacement, &connection) {
        Ok(()) => (
            HxRedirect(endpoints::CATEGORIES_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(error) => {
            tracing::error!("could not update category {category_id}: {error}");

            error.into_alert_response()
        }
    }
}

fn edit_category_view(category: &Category) -> Markup {
    let nav_bar = NavBar::new(endpoints::CATEGORIES_VIEW).into_html();
    let update_endpoint = endpoints::format_endpoint(endpoints::PUT_CATEGORY, category.id);

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            form
                hx-put=(update_endpoint)
                hx-target-error="#alert-container"
                class="w-full space-y-4 md:space-y-6"
            {
                (category_form_fields(
                    category.name.as_ref(),
                    category.kind.as_str(),
                    &category.color,
                    &category.icon,
                ))

                button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Save Category" }
            }
        }
    };

    base("Edit Category", &[], &content)
}
