//! Defines the expense model and the database queries for the expenses table.

use rusqlite::{Connection, Row, params};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{Error, database_id::ExpenseId, expense::ExpenseFilter};

// ============================================================================
// MODELS
// ============================================================================

/// One recorded spending event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// The ID of the expense, assigned by the database.
    pub id: ExpenseId,
    /// How much was spent, always greater than zero.
    pub amount: f64,
    /// What the money was spent on, e.g. "Food", "Books", "Rent".
    pub category: String,
    /// Optional free text, never an empty string.
    pub note: Option<String>,
    /// The day the money was spent.
    pub date: Date,
}

/// The validated fields of an expense that has not been saved yet.
///
/// Used both to insert a new row and to overwrite an existing one.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    amount: f64,
    category: String,
    note: Option<String>,
    date: Date,
}

impl NewExpense {
    /// Validate and normalise the fields of an expense.
    ///
    /// `category` and `note` are trimmed. A blank `note` is stored as `None`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::InvalidAmount] if `amount` is not a finite number greater than zero,
    /// - or [Error::EmptyCategory] if `category` is empty after trimming whitespace.
    pub fn new(amount: f64, category: &str, note: Option<&str>, date: Date) -> Result<Self, Error> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(Error::InvalidAmount(amount.to_string()));
        }

        let category = category.trim();

        if category.is_empty() {
            return Err(Error::EmptyCategory);
        }

        let note = note
            .map(str::trim)
            .filter(|note| !note.is_empty())
            .map(str::to_owned);

        Ok(Self {
            amount,
            category: category.to_owned(),
            note,
            date,
        })
    }

    /// Greater than zero.
    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// Trimmed and non-empty.
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Trimmed, `None` if blank.
    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    /// The day the money was spent.
    pub fn date(&self) -> Date {
        self.date
    }
}

/// Parse the text of an amount input.
///
/// # Errors
/// Returns [Error::InvalidAmount] if `text` is not a number greater than zero.
pub fn parse_amount(text: &str) -> Result<f64, Error> {
    match text.trim().parse::<f64>() {
        Ok(amount) if amount.is_finite() && amount > 0.0 => Ok(amount),
        _ => Err(Error::InvalidAmount(text.to_owned())),
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

type RowsAffected = usize;

/// Create the expenses table in the database if it does not exist yet.
///
/// # Errors
/// Returns an error if the table cannot be created.
pub fn create_expense_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS expenses (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                amount REAL NOT NULL,
                category TEXT NOT NULL,
                note TEXT,
                date TEXT NOT NULL
                )",
        (),
    )?;

    Ok(())
}

/// Insert a new expense and return the stored row.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn create_expense(expense: NewExpense, connection: &Connection) -> Result<Expense, Error> {
    let expense = connection
        .prepare(
            "INSERT INTO expenses (amount, category, note, date)
             VALUES (?1, ?2, ?3, ?4)
             RETURNING id, amount, category, note, date",
        )?
        .query_row(
            params![expense.amount, expense.category, expense.note, expense.date],
            map_expense_row,
        )?;

    Ok(expense)
}

/// Retrieve an expense from the database by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a stored expense,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn get_expense(id: ExpenseId, connection: &Connection) -> Result<Expense, Error> {
    let expense = connection
        .prepare("SELECT id, amount, category, note, date FROM expenses WHERE id = :id")?
        .query_row(&[(":id", &id)], map_expense_row)?;

    Ok(expense)
}

/// Get the expenses selected by `filter`, newest first.
///
/// `today` is the current local date and determines where the week and month
/// start. Expenses on the same date are ordered by ID, newest first.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn list_expenses(
    filter: ExpenseFilter,
    today: Date,
    connection: &Connection,
) -> Result<Vec<Expense>, Error> {
    match filter.start_date(today) {
        Some(start_date) => connection
            .prepare(
                "SELECT id, amount, category, note, date FROM expenses
                 WHERE date >= ?1
                 ORDER BY date DESC, id DESC",
            )?
            .query_map((start_date,), map_expense_row)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(Error::from),
        None => list_all_expenses(connection),
    }
}

/// Get every expense, newest first.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn list_all_expenses(connection: &Connection) -> Result<Vec<Expense>, Error> {
    connection
        .prepare(
            "SELECT id, amount, category, note, date FROM expenses
             ORDER BY date DESC, id DESC",
        )?
        .query_map((), map_expense_row)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(Error::from)
}

/// Overwrite every field of the expense `id`.
///
/// Returns the number of rows changed, which is zero if `id` does not exist.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn update_expense(
    id: ExpenseId,
    expense: NewExpense,
    connection: &Connection,
) -> Result<RowsAffected, Error> {
    connection
        .execute(
            "UPDATE expenses
            SET \
                amount = ?1, \
                category = ?2, \
                note = ?3, \
                date = ?4 \
            WHERE id = ?5;",
            params![
                expense.amount,
                expense.category,
                expense.note,
                expense.date,
                id
            ],
        )
        .map_err(Error::from)
}

/// Delete the expense `id`.
///
/// Returns the number of rows deleted, which is zero if `id` does not exist.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn delete_expense(id: ExpenseId, connection: &Connection) -> Result<RowsAffected, Error> {
    connection
        .execute("DELETE FROM expenses WHERE id = :id", &[(":id", &id)])
        .map_err(Error::from)
}

/// Get the total number of expenses in the database.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn count_expenses(connection: &Connection) -> Result<u32, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM expenses;", [], |row| row.get(0))
        .map_err(Error::from)
}

/// Map a database row to an [Expense].
fn map_expense_row(row: &Row) -> Result<Expense, rusqlite::Error> {
    Ok(Expense {
        id: row.get(0)?,
        amount: row.get(1)?,
        category: row.get(2)?,
        note: row.get(3)?,
        date: row.get(4)?,
    })
}

// ============================================================================
// TESTS
// ============================================================================
