//! The expenses page: spending summary, the add form, the filtered list and the edit form.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error, endpoints,
    expense::{
        CategoryTotal, EditModal, Expense, ExpenseFilter, ExpenseScreen, ExpenseScreenQuery,
        category_totals, get_expense, list_expenses, total_spending,
    },
    html::{
        BUTTON_CANCEL_STYLE, BUTTON_DELETE_STYLE, BUTTON_PRIMARY_STYLE, FILTER_BUTTON_ACTIVE_STYLE,
        FILTER_BUTTON_STYLE, FORM_CONTAINER_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE,
        LINK_STYLE, PAGE_CONTAINER_STYLE, base, dollar_input_styles, format_currency,
        loading_spinner,
    },
    navigation::NavBar,
    timezone::get_local_date,
};

/// The state needed for the expenses page.
#[derive(Debug, Clone)]
pub struct ExpensesPageState {
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
    /// The database connection for reading expenses.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ExpensesPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            local_timezone: state.local_timezone.clone(),
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Renders the expenses page for the filter and edit form given in the query string.
///
/// If the expense to edit no longer exists, the page is shown with the edit form closed.
pub async fn get_expenses_page(
    State(state): State<ExpensesPageState>,
    Query(query): Query<ExpenseScreenQuery>,
) -> Result<Response, Error> {
    let today = get_local_date(&state.local_timezone)?;

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let expenses = list_expenses(query.filter, today, &connection)
        .inspect_err(|error| tracing::error!("could not list expenses: {error}"))?;

    let screen = ExpenseScreen::new(query.filter);
    let screen = match query.edit {
        Some(id) => match get_expense(id, &connection) {
            Ok(expense) => screen.start_edit(expense),
            Err(Error::NotFound) => {
                tracing::debug!("expense {id} no longer exists, closing edit form");
                screen
            }
            Err(error) => {
                tracing::error!("could not get expense {id}: {error}");
                return Err(error);
            }
        },
        None => screen,
    };

    Ok(expenses_view(&screen, &expenses).into_response())
}

fn expenses_view(screen: &ExpenseScreen, expenses: &[Expense]) -> Markup {
    let nav_bar = NavBar::new(endpoints::EXPENSES_VIEW).into_html();

    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-md space-y-6"
            {
                (summary_view(&category_totals(expenses), total_spending(expenses)))

                h1 class="text-2xl font-bold" { "Expense Tracker" }

                (add_expense_form(screen))

                (filter_buttons(screen))

                (expense_list(screen, expenses))

                p class="text-sm text-center text-gray-500 dark:text-gray-400"
                {
                    "Enter your expenses and they'll be saved locally with SQLite."
                }
            }
        }

        @if let EditModal::Open(expense) = &screen.modal {
            (edit_modal(screen, expense))
        }
    };

    base("Expenses", &[dollar_input_styles()], &content)
}

fn summary_view(category_totals: &[CategoryTotal], total: f64) -> Markup {
    html! {
        section id="summary" class="space-y-1"
        {
            ul id="category-totals"
            {
                @for category_total in category_totals {
                    li { (category_total.category) ": " (format_currency(category_total.total)) }
                }
            }

            p id="total" class="font-bold" { "Total: " (format_currency(total)) }
        }
    }
}

fn add_expense_form(screen: &ExpenseScreen) -> Markup {
    html! {
        form
            hx-post=(endpoints::EXPENSES_API)
            hx-target-error="#alert-container"
            class=(FORM_CONTAINER_STYLE)
        {
            input type="hidden" name="filter" value=(screen.filter.query_value());

            div
            {
                label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }

                div class="input-wrapper w-full"
                {
                    input
                        name="amount"
                        id="amount"
                        type="number"
                        step="0.01"
                        min="0.01"
                        placeholder="Amount (e.g. 12.50)"
                        required
                        class=(FORM_TEXT_INPUT_STYLE);
                }
            }

            div
            {
                label for="category" class=(FORM_LABEL_STYLE) { "Category" }

                input
                    name="category"
                    id="category"
                    type="text"
                    placeholder="Category (Food, Books, Rent...)"
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="note" class=(FORM_LABEL_STYLE) { "Note" }

                input
                    name="note"
                    id="note"
                    type="text"
                    placeholder="Note (optional)"
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE)
            {
                span id="indicator" class="inline htmx-indicator" { (loading_spinner()) }
                " Add Expense"
            }
        }
    }
}

fn filter_buttons(screen: &ExpenseScreen) -> Markup {
    html! {
        nav id="filters" class="flex justify-around"
        {
            @for filter in ExpenseFilter::ALL_FILTERS {
                @let style = if filter == screen.filter {
                    FILTER_BUTTON_ACTIVE_STYLE
                } else {
                    FILTER_BUTTON_STYLE
                };

                a
                    href=(screen.clone().close_modal().with_filter(filter).url())
                    class=(style)
                    aria-current=[(filter == screen.filter).then_some("page")]
                {
                    (filter.label())
                }
            }
        }
    }
}

fn expense_list(screen: &ExpenseScreen, expenses: &[Expense]) -> Markup {
    html! {
        ul id="expenses" class="space-y-2"
        {
            @for expense in expenses {
                (expense_row(screen, expense))
            }

            @if expenses.is_empty() {
                li class="text-center text-gray-500 dark:text-gray-400" { "No expenses yet." }
            }
        }
    }
}

fn expense_row(screen: &ExpenseScreen, expense: &Expense) -> Markup {
    let edit_url = screen.clone().start_edit(expense.clone()).url();
    let delete_url = format!(
        "{}?filter={}",
        endpoints::format_endpoint(endpoints::EXPENSE, expense.id),
        screen.filter.query_value()
    );

    html! {
        li class="flex items-center p-3 rounded-lg bg-white dark:bg-gray-800 shadow-sm"
        {
            div class="flex-1"
            {
                p class="text-lg font-bold text-amber-500" { (format_currency(expense.amount)) }
                p class="text-sm" { (expense.category) }

                @if let Some(note) = &expense.note {
                    p class="text-xs text-gray-500 dark:text-gray-400" { (note) }
                }

                p class="text-xs text-gray-500 dark:text-gray-400" { (expense.date.to_string()) }
            }

            a href=(edit_url) class={ (LINK_STYLE) " mr-3" } { "Edit" }

            button
                type="button"
                hx-delete=(delete_url)
                hx-target-error="#alert-container"
                aria-label="Delete expense"
                class=(BUTTON_DELETE_STYLE)
            {
                "✕"
            }
        }
    }
}

fn edit_modal(screen: &ExpenseScreen, expense: &Expense) -> Markup {
    let update_url = endpoints::format_endpoint(endpoints::EXPENSE, expense.id);
    let cancel_url = screen.clone().close_modal().url();

    html! {
        div
            id="edit-modal"
            role="dialog"
            aria-modal="true"
            class="fixed inset-0 z-40 flex items-center justify-center bg-black/70"
        {
            div class="w-full max-w-md m-5 p-5 rounded-lg bg-white dark:bg-gray-800 text-gray-900 dark:text-white"
            {
                h2 class="text-lg mb-3" { "Edit Expense" }

                form
                    hx-put=(update_url)
                    hx-target-error="#alert-container"
                    class="space-y-3"
                {
                    input type="hidden" name="filter" value=(screen.filter.query_value());

                    div class="input-wrapper w-full"
                    {
                        input
                            name="amount"
                            type="number"
                            step="0.01"
                            aria-label="Amount"
                            placeholder="Amount"
                            value=(expense.amount.to_string())
                            class=(FORM_TEXT_INPUT_STYLE);
                    }

                    input
                        name="category"
                        type="text"
                        aria-label="Category"
                        placeholder="Category"
                        value=(expense.category)
                        class=(FORM_TEXT_INPUT_STYLE);

                    input
                        name="note"
                        type="text"
                        aria-label="Note"
                        placeholder="Note"
                        value=(expense.note.as_deref().unwrap_or_default())
                        class=(FORM_TEXT_INPUT_STYLE);

                    input
                        name="date"
                        type="date"
                        aria-label="Date"
                        placeholder="Date (YYYY-MM-DD)"
                        value=(expense.date.to_string())
                        class=(FORM_TEXT_INPUT_STYLE);

                    button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Save Changes" }

                    a href=(cancel_url) class=(BUTTON_CANCEL_STYLE) { "Cancel" }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::extract::{Query, State};
    use rusqlite::Connection;
    use scraper::Html;
    use time::macros::date;

    use crate::{
        db::initialize,
        endpoints,
        expense::{Expense, ExpenseFilter, ExpenseScreenQuery, NewExpense, create_expense},
        test_utils::{
            assert_content_type, assert_form_input, assert_hx_endpoint, assert_status_ok,
            assert_submit_button_text, assert_valid_html, must_select_one, parse_html_document,
            select_text, visible_input_values,
        },
        timezone::get_local_date,
    };

    use super::{ExpensesPageState, get_expenses_page};

    fn get_test_state() -> ExpensesPageState {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();

        ExpensesPageState {
            local_timezone: "Etc/UTC".to_owned(),
            db_connection: Arc::new(Mutex::new(conn)),
        }
    }

    fn must_create(state: &ExpensesPageState, new_expense: NewExpense) -> Expense {
        let connection = state.db_connection.lock().unwrap();
        create_expense(new_expense, &connection).expect("could not create test expense")
    }

    async fn get_page(state: ExpensesPageState, query: ExpenseScreenQuery) -> Html {
        let response = get_expenses_page(State(state), Query(query))
            .await
            .expect("could not render expenses page");

        assert_status_ok(&response);
        assert_content_type(&response, "text/html; charset=utf-8");
        let document = parse_html_document(response).await;
        assert_valid_html(&document);

        document
    }

    #[tokio::test]
    async fn shows_add_form() {
        let document = get_page(get_test_state(), ExpenseScreenQuery::default()).await;

        let form = must_select_one(&document, "form[hx-post]");
        assert_hx_endpoint(&form, endpoints::EXPENSES_API, "hx-post");
        assert_form_input(&form, "filter", "hidden");
        assert_form_input(&form, "amount", "number");
        assert_form_input(&form, "category", "text");
        assert_form_input(&form, "note", "text");
        assert_submit_button_text(&form, "Add Expense");
    }

    #[tokio::test]
    async fn shows_empty_message_without_expenses() {
        let document = get_page(get_test_state(), ExpenseScreenQuery::default()).await;

        assert_eq!(
            select_text(&document, "#expenses li"),
            vec!["No expenses yet."]
        );
        assert_eq!(select_text(&document, "#total"), vec!["Total: $0.00"]);
    }

    #[tokio::test]
    async fn shows_expenses_with_category_totals() {
        let state = get_test_state();
        must_create(
            &state,
            NewExpense::new(5.0, "Food", Some("lunch"), date!(2024 - 01 - 03)).unwrap(),
        );
        must_create(
            &state,
            NewExpense::new(3.0, "Food", None, date!(2024 - 01 - 02)).unwrap(),
        );
        must_create(
            &state,
            NewExpense::new(2.0, "Books", None, date!(2024 - 01 - 01)).unwrap(),
        );

        let document = get_page(state, ExpenseScreenQuery::default()).await;

        assert_eq!(
            select_text(&document, "#category-totals li"),
            vec!["Food: $8.00", "Books: $2.00"]
        );
        assert_eq!(select_text(&document, "#total"), vec!["Total: $10.00"]);
        assert_eq!(
            select_text(&document, "#expenses li p.font-bold"),
            vec!["$5.00", "$3.00", "$2.00"]
        );
    }

    #[tokio::test]
    async fn filter_limits_list_and_totals() {
        let state = get_test_state();
        let today = get_local_date(&state.local_timezone).unwrap();
        must_create(&state, NewExpense::new(1.5, "Food", None, today).unwrap());
        must_create(
            &state,
            NewExpense::new(100.0, "Rent", None, date!(2000 - 01 - 01)).unwrap(),
        );

        let document = get_page(
            state,
            ExpenseScreenQuery {
                filter: ExpenseFilter::ThisMonth,
                edit: None,
            },
        )
        .await;

        assert_eq!(select_text(&document, "#total"), vec!["Total: $1.50"]);
        assert_eq!(
            select_text(&document, "#filters a[aria-current=page]"),
            vec!["This Month"]
        );
    }

    #[tokio::test]
    async fn edit_query_opens_modal_with_expense_values() {
        let state = get_test_state();
        let expense = must_create(
            &state,
            NewExpense::new(12.5, "Food", Some("pizza"), date!(2024 - 01 - 15)).unwrap(),
        );

        let document = get_page(
            state,
            ExpenseScreenQuery {
                filter: ExpenseFilter::All,
                edit: Some(expense.id),
            },
        )
        .await;

        let form = must_select_one(&document, "#edit-modal form");
        assert_hx_endpoint(
            &form,
            &endpoints::format_endpoint(endpoints::EXPENSE, expense.id),
            "hx-put",
        );
        assert_eq!(
            visible_input_values(&form),
            vec!["12.5", "Food", "pizza", "2024-01-15"]
        );
        assert_submit_button_text(&form, "Save Changes");
    }

    #[tokio::test]
    async fn edit_query_for_missing_expense_keeps_modal_closed() {
        let document = get_page(
            get_test_state(),
            ExpenseScreenQuery {
                filter: ExpenseFilter::All,
                edit: Some(404),
            },
        )
        .await;

        assert!(select_text(&document, "#edit-modal").is_empty());
    }
}
