//! The state of the expenses page.
//!
//! The page is rendered from an [ExpenseScreen], which lives in the URL query
//! string (`/expenses?filter=ThisWeek&edit=3`). Buttons on the page link to
//! the URL of the next state, so each transition is a page load that queries
//! the expenses again.

use serde::Deserialize;

use crate::{
    database_id::ExpenseId,
    endpoints,
    expense::{Expense, ExpenseFilter},
};

/// Whether the edit form is shown, and for which expense.
#[derive(Debug, Clone, PartialEq)]
pub enum EditModal {
    /// Only the list is shown.
    Closed,
    /// The edit form is shown over the list, filled in with this expense.
    Open(Expense),
}

/// Everything that determines how the expenses page looks, apart from the stored expenses.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseScreen {
    /// The filter applied to the list and the totals.
    pub filter: ExpenseFilter,
    /// The state of the edit form.
    pub modal: EditModal,
}

impl ExpenseScreen {
    /// The page with `filter` applied and the edit form closed.
    pub fn new(filter: ExpenseFilter) -> Self {
        Self {
            filter,
            modal: EditModal::Closed,
        }
    }

    /// Open the edit form for `expense`.
    pub fn start_edit(self, expense: Expense) -> Self {
        Self {
            modal: EditModal::Open(expense),
            ..self
        }
    }

    /// Close the edit form, after saving or cancelling.
    pub fn close_modal(self) -> Self {
        Self {
            modal: EditModal::Closed,
            ..self
        }
    }

    /// Show the expenses selected by `filter` instead.
    pub fn with_filter(self, filter: ExpenseFilter) -> Self {
        Self { filter, ..self }
    }

    /// The URL of the expenses page in this state.
    pub fn url(&self) -> String {
        let filter = self.filter.query_value();

        match &self.modal {
            EditModal::Closed => format!("{}?filter={filter}", endpoints::EXPENSES_VIEW),
            EditModal::Open(expense) => format!(
                "{}?filter={filter}&edit={}",
                endpoints::EXPENSES_VIEW,
                expense.id
            ),
        }
    }
}

/// The query string of the expenses page.
#[derive(Debug, Default, Deserialize)]
pub struct ExpenseScreenQuery {
    /// The filter to apply, [ExpenseFilter::All] if missing.
    #[serde(default)]
    pub filter: ExpenseFilter,
    /// The ID of the expense whose edit form is open.
    pub edit: Option<ExpenseId>,
}
