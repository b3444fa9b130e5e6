//! Database setup.

use rusqlite::Connection;

use crate::{Error, expense::create_expense_table};

/// Create the application's tables if they do not already exist.
///
/// Safe to call on every start up, an existing database is left untouched.
///
/// # Errors
/// Returns an error if a table cannot be created.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    create_expense_table(connection)?;

    Ok(())
}
