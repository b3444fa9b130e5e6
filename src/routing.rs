//! Application router configuration.

use axum::{
    Router,
    response::Redirect,
    routing::{get, post, put},
};

use crate::{
    AppState,
    chart::get_chart_page,
    endpoints,
    error_pages::get_404_not_found,
    expense::{
        create_expense_endpoint, delete_expense_endpoint, edit_expense_endpoint, get_expenses_page,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::EXPENSES_VIEW, get(get_expenses_page))
        .route(endpoints::CHARTS_VIEW, get(get_chart_page))
        .route(endpoints::EXPENSES_API, post(create_expense_endpoint))
        .route(
            endpoints::EXPENSE,
            put(edit_expense_endpoint).delete(delete_expense_endpoint),
        )
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the expenses page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::EXPENSES_VIEW)
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use rusqlite::Connection;

    use crate::{AppState, endpoints, expense::list_all_expenses};

    use super::build_router;

    fn get_test_server() -> (TestServer, AppState) {
        let connection = Connection::open_in_memory().unwrap();
        let state = AppState::new(connection, "Etc/UTC").unwrap();
        let app = build_router(state.clone());
        let server = TestServer::try_new(app).expect("Could not create test server.");

        (server, state)
    }

    #[tokio::test]
    async fn root_redirects_to_expenses() {
        let (server, _) = get_test_server();

        let response = server.get(endpoints::ROOT).await;

        response.assert_status(StatusCode::SEE_OTHER);
        assert_eq!(response.header("location"), endpoints::EXPENSES_VIEW);
    }

    #[tokio::test]
    async fn serves_both_pages() {
        let (server, _) = get_test_server();

        let this_week = format!("{}?filter=ThisWeek", endpoints::EXPENSES_VIEW);

        let urls = [
            endpoints::EXPENSES_VIEW,
            this_week.as_str(),
            endpoints::CHARTS_VIEW,
        ];

        for url in urls {
            server.get(url).await.assert_status_ok();
        }
    }

    #[tokio::test]
    async fn unknown_path_is_not_found() {
        let (server, _) = get_test_server();

        server
            .get("/nope")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn add_edit_and_delete_expense() {
        let (server, state) = get_test_server();

        let response = server
            .post(endpoints::EXPENSES_API)
            .form(&[
                ("amount", "12.50"),
                ("category", "Food"),
                ("note", ""),
                ("filter", "All"),
            ])
            .await;
        response.assert_status(StatusCode::SEE_OTHER);
        assert_eq!(response.header("hx-redirect"), "/expenses?filter=All");

        let expense = {
            let connection = state.db_connection.lock().unwrap();
            let expenses = list_all_expenses(&connection).unwrap();
            assert_eq!(expenses.len(), 1);
            expenses[0].clone()
        };
        assert_eq!(expense.note, None);

        let expense_url = endpoints::format_endpoint(endpoints::EXPENSE, expense.id);
        let response = server
            .put(&expense_url)
            .form(&[
                ("amount", "20"),
                ("category", "Books"),
                ("note", "novel"),
                ("date", "2024-01-15"),
                ("filter", "ThisMonth"),
            ])
            .await;
        response.assert_status(StatusCode::SEE_OTHER);
        assert_eq!(response.header("hx-redirect"), "/expenses?filter=ThisMonth");

        {
            let connection = state.db_connection.lock().unwrap();
            let expenses = list_all_expenses(&connection).unwrap();
            assert_eq!(expenses[0].category, "Books");
            assert_eq!(expenses[0].amount, 20.0);
        }

        let response = server
            .delete(&format!("{expense_url}?filter=ThisWeek"))
            .await;
        response.assert_status(StatusCode::SEE_OTHER);
        assert_eq!(response.header("hx-redirect"), "/expenses?filter=ThisWeek");

        let connection = state.db_connection.lock().unwrap();
        assert!(list_all_expenses(&connection).unwrap().is_empty());
    }

    #[tokio::test]
    async fn invalid_add_is_ignored() {
        let (server, state) = get_test_server();

        server
            .post(endpoints::EXPENSES_API)
            .form(&[("amount", "abc"), ("category", "Food")])
            .await
            .assert_status(StatusCode::NO_CONTENT);

        let connection = state.db_connection.lock().unwrap();
        assert!(list_all_expenses(&connection).unwrap().is_empty());
    }
}
