//! Recording, listing, editing and summarising expenses.

mod aggregation;
mod core;
mod create_endpoint;
mod delete_endpoint;
mod edit_endpoint;
mod expenses_page;
mod filter;
mod screen;

pub use self::core::{
    Expense, NewExpense, count_expenses, create_expense, create_expense_table, delete_expense,
    get_expense, list_all_expenses, list_expenses, parse_amount, update_expense,
};
pub use aggregation::{
    CategoryTotal, MONTH_LABELS, category_totals, monthly_totals, total_spending,
};
pub use create_endpoint::create_expense_endpoint;
pub use delete_endpoint::delete_expense_endpoint;
pub use edit_endpoint::edit_expense_endpoint;
pub use expenses_page::get_expenses_page;
pub use filter::ExpenseFilter;
pub use screen::{EditModal, ExpenseScreen, ExpenseScreenQuery};
