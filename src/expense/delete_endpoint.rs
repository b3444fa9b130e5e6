//! Defines the endpoint for deleting an expense.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState, Error,
    database_id::ExpenseId,
    expense::{ExpenseFilter, ExpenseScreen, delete_expense},
};

/// The state needed to delete an expense.
#[derive(Debug, Clone)]
pub struct DeleteExpenseState {
    /// The database connection for managing expenses.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The query string of a delete request.
#[derive(Debug, Default, Deserialize)]
pub struct DeleteExpenseQuery {
    /// The filter of the page the request was sent from.
    #[serde(default)]
    pub filter: ExpenseFilter,
}

/// A route handler for deleting an expense, redirects to the expenses page.
///
/// Deleting an expense that does not exist changes nothing and still redirects.
pub async fn delete_expense_endpoint(
    State(state): State<DeleteExpenseState>,
    Path(expense_id): Path<ExpenseId>,
    Query(query): Query<DeleteExpenseQuery>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match delete_expense(expense_id, &connection) {
        Ok(0) => tracing::debug!("expense {expense_id} no longer exists, nothing to delete"),
        Ok(_) => tracing::info!("deleted expense {expense_id}"),
        Err(error) => {
            tracing::error!("could not delete expense {expense_id}: {error}");
            return error.into_alert_response();
        }
    }

    (
        HxRedirect(ExpenseScreen::new(query.filter).url()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}
