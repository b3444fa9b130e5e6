//! Defines the endpoint for saving changes to an expense.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use rusqlite::Connection;
use serde::Deserialize;
use time::{Date, macros::format_description};

use crate::{
    AppState, Error,
    database_id::ExpenseId,
    expense::{ExpenseFilter, ExpenseScreen, NewExpense, parse_amount, update_expense},
};

/// The state needed to edit an expense.
#[derive(Debug, Clone)]
pub struct EditExpenseState {
    /// The database connection for managing expenses.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for EditExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The form data of the edit form.
#[derive(Debug, Deserialize)]
pub struct EditExpenseForm {
    /// The amount as typed, e.g. "12.50".
    pub amount: String,
    /// What the money was spent on.
    pub category: String,
    /// Optional free text.
    #[serde(default)]
    pub note: Option<String>,
    /// The date as typed, in the format YYYY-MM-DD.
    #[serde(default)]
    pub date: String,
    /// The filter of the page the form was submitted from.
    #[serde(default)]
    pub filter: ExpenseFilter,
}

/// Parse a date in the format YYYY-MM-DD with a four digit, unsigned year.
fn parse_date(text: &str) -> Result<Date, Error> {
    let trimmed = text.trim();

    if trimmed.len() != 10 || !trimmed.starts_with(|c: char| c.is_ascii_digit()) {
        return Err(Error::InvalidDate(text.to_owned()));
    }

    Date::parse(trimmed, format_description!("[year]-[month]-[day]"))
        .map_err(|_| Error::InvalidDate(text.to_owned()))
}

/// A route handler for overwriting the fields of an expense.
///
/// On success the client is redirected to the expenses page with the edit
/// form closed. Invalid input is reported with an alert and nothing is
/// written, so the edit form stays open.
pub async fn edit_expense_endpoint(
    State(state): State<EditExpenseState>,
    Path(expense_id): Path<ExpenseId>,
    Form(form): Form<EditExpenseForm>,
) -> Response {
    let new_expense = match parse_amount(&form.amount).and_then(|amount| {
        let date = parse_date(&form.date)?;
        NewExpense::new(amount, &form.category, form.note.as_deref(), date)
    }) {
        Ok(new_expense) => new_expense,
        Err(error) => {
            tracing::debug!("rejected changes to expense {expense_id}: {error}");
            return error.into_alert_response();
        }
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match update_expense(expense_id, new_expense, &connection) {
        Ok(0) => tracing::debug!("expense {expense_id} no longer exists, nothing to update"),
        Ok(_) => tracing::info!("updated expense {expense_id}"),
        Err(error) => {
            tracing::error!("could not update expense {expense_id}: {error}");
            return error.into_alert_response();
        }
    }

    (
        HxRedirect(ExpenseScreen::new(form.filter).url()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}
