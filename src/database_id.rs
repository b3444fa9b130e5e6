//! Database ID type definition.

/// Alias for the integer type used for mapping to database IDs.
pub type DatabaseId = i64;

/// The ID of an expense, generated by SQLite on insert.
pub type ExpenseId = DatabaseId;
