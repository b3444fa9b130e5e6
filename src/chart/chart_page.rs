use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::html;
use rusqlite::Connection;

use crate::{
    AppState, Error,
    chart::charts::{ChartView, chart_container, chart_script, monthly_expenses_chart},
    endpoints,
    expense::list_all_expenses,
    html::{HeadElement, PAGE_CONTAINER_STYLE, base},
    navigation::NavBar,
};

const ECHARTS_SCRIPT: &str = "https://cdn.jsdelivr.net/npm/echarts@6.0.0/dist/echarts.min.js";

/// The state needed for the chart page.
#[derive(Debug, Clone)]
pub struct ChartPageState {
    /// The database connection for reading expenses.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ChartPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Renders the monthly expenses chart over every stored expense.
///
/// The chart is drawn even when there are no expenses, with every month at zero.
pub async fn get_chart_page(State(state): State<ChartPageState>) -> Result<Response, Error> {
    let expenses = {
        let connection = state
            .db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        list_all_expenses(&connection)
            .inspect_err(|error| tracing::error!("could not list expenses: {error}"))?
    };

    let chart = ChartView {
        id: "monthly-expenses-chart",
        options: monthly_expenses_chart(&expenses).to_string(),
    };

    let nav_bar = NavBar::new(endpoints::CHARTS_VIEW).into_html();
    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            (chart_container(&chart))
        }
    );

    let scripts = [
        HeadElement::ScriptLink(ECHARTS_SCRIPT.to_owned()),
        chart_script(&chart),
    ];

    Ok(base("Charts", &scripts, &content).into_response())
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::extract::State;
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        db::initialize,
        expense::{NewExpense, create_expense},
        test_utils::{
            assert_content_type, assert_status_ok, assert_valid_html, must_select_one,
            parse_html_document, select_text,
        },
    };

    use super::{ChartPageState, get_chart_page};

    fn get_test_state() -> ChartPageState {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();

        ChartPageState {
            db_connection: Arc::new(Mutex::new(conn)),
        }
    }

    #[tokio::test]
    async fn renders_chart_without_expenses() {
        let response = get_chart_page(State(get_test_state())).await.unwrap();

        assert_status_ok(&response);
        assert_content_type(&response, "text/html; charset=utf-8");
        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        must_select_one(&html, "#monthly-expenses-chart");
    }

    #[tokio::test]
    async fn chart_script_contains_monthly_totals() {
        let state = get_test_state();
        {
            let connection = state.db_connection.lock().unwrap();
            for (amount, date) in [
                (10.0, date!(2024 - 01 - 15)),
                (5.0, date!(2024 - 02 - 01)),
                (2.5, date!(2023 - 02 - 10)),
            ] {
                let new_expense = NewExpense::new(amount, "Food", None, date).unwrap();
                create_expense(new_expense, &connection).unwrap();
            }
        }

        let response = get_chart_page(State(state)).await.unwrap();

        let html = parse_html_document(response).await;
        let script = select_text(&html, "head script:not([src])")
            .concat()
            .split_whitespace()
            .collect::<String>();
        assert!(
            script.contains("[10.0,7.5,0.0,0.0,0.0,0.0,0.0,0.0,0.0,0.0,0.0,0.0]"),
            "{script}"
        );
    }
}
