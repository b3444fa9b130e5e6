//! Expense Tracker is a small, local web app for recording personal expenses.
//!
//! Expenses (an amount, a category, an optional note and a date) are stored in
//! a single SQLite table. The library serves two HTML pages: a list of
//! expenses with forms for adding, editing and deleting them, and a bar chart
//! of spending per calendar month.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod alert;
mod app_state;
mod chart;
mod database_id;
mod db;
mod endpoints;
mod error;
mod error_pages;
mod expense;
mod html;
mod logging;
mod navigation;
mod routing;
mod timezone;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use database_id::ExpenseId;
pub use db::initialize as initialize_db;
pub use error::Error;
pub use expense::{
    Expense, ExpenseFilter, NewExpense, count_expenses, create_expense, list_all_expenses,
};
pub use logging::logging_middleware;
pub use routing::build_router;
pub use timezone::get_local_offset;

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}
