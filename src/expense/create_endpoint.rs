//! Defines the endpoint for adding a new expense.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
// axum_extra's Form treats an empty field as missing, so a blank note does not fail to parse.
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState, Error,
    expense::{ExpenseFilter, ExpenseScreen, NewExpense, create_expense, parse_amount},
    timezone::get_local_date,
};

/// The state needed to add an expense.
#[derive(Debug, Clone)]
pub struct CreateExpenseState {
    /// The database connection for managing expenses.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for CreateExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The form data for adding an expense.
#[derive(Debug, Deserialize)]
pub struct CreateExpenseForm {
    /// The amount as typed, e.g. "12.50".
    pub amount: String,
    /// What the money was spent on.
    pub category: String,
    /// Optional free text.
    #[serde(default)]
    pub note: Option<String>,
    /// The filter of the page the form was submitted from.
    #[serde(default)]
    pub filter: ExpenseFilter,
}

/// A route handler for adding an expense dated today.
///
/// On success the client is redirected to the expenses page with the same
/// filter. Invalid input is ignored: the response is `204 No Content`, the
/// database is untouched and the form keeps what the user typed.
pub async fn create_expense_endpoint(
    State(state): State<CreateExpenseState>,
    Form(form): Form<CreateExpenseForm>,
) -> Response {
    let today = match get_local_date(&state.local_timezone) {
        Ok(today) => today,
        Err(error) => return error.into_alert_response(),
    };

    let new_expense = match parse_amount(&form.amount).and_then(|amount| {
        NewExpense::new(amount, &form.category, form.note.as_deref(), today)
    }) {
        Ok(new_expense) => new_expense,
        Err(error) => {
            tracing::debug!("ignoring invalid expense: {error}");
            return StatusCode::NO_CONTENT.into_response();
        }
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match create_expense(new_expense, &connection) {
        Ok(expense) => tracing::info!("created expense {}", expense.id),
        Err(error) => {
            tracing::error!("could not create expense: {error}");
            return error.into_alert_response();
        }
    }

    (
        HxRedirect(ExpenseScreen::new(form.filter).url()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}
