//! Totals derived from a list of expenses for the summary and the chart.
//!
//! Nothing here is stored, everything is recomputed from the rows that were
//! just loaded.

use std::collections::HashMap;

use crate::expense::Expense;

/// Three-letter month names, January first.
pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// The amount spent in one category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
}

/// The sum of all amounts in `expenses`.
pub fn total_spending(expenses: &[Expense]) -> f64 {
    expenses
        .iter()
        .fold(0.0, |total, expense| total + expense.amount)
}

/// Sums the amounts in `expenses` per category.
///
/// Categories are returned in the order they first appear in `expenses`.
pub fn category_totals(expenses: &[Expense]) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for expense in expenses {
        match positions.get(expense.category.as_str()) {
            Some(&position) => totals[position].total += expense.amount,
            None => {
                positions.insert(&expense.category, totals.len());
                totals.push(CategoryTotal {
                    category: expense.category.clone(),
                    total: expense.amount,
                });
            }
        }
    }

    totals
}

/// Sums the amounts in `expenses` per calendar month, January at index 0.
///
/// The year is ignored: spending in January 2023 and January 2024 both count
/// towards index 0. Months without expenses are zero.
pub fn monthly_totals(expenses: &[Expense]) -> [f64; 12] {
    let mut totals = [0.0; 12];

    for expense in expenses {
        let month_index = usize::from(u8::from(expense.date.month())) - 1;
        totals[month_index] += expense.amount;
    }

    totals
}
