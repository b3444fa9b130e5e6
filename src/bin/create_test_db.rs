use std::{error::Error, path::Path, process::exit};

use clap::Parser;
use rusqlite::Connection;
use time::{Duration, OffsetDateTime};

use expense_tracker::{NewExpense, count_expenses, create_expense, initialize_db};

/// A utility for creating a database of sample expenses for manual testing.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// (amount, category, note, days before today)
const SAMPLE_EXPENSES: [(f64, &str, Option<&str>, i64); 12] = [
    (12.5, "Food", Some("Lunch"), 0),
    (4.2, "Coffee", None, 1),
    (60.0, "Groceries", Some("Weekly shop"), 3),
    (25.99, "Books", Some("Paperback"), 8),
    (350.0, "Rent", None, 14),
    (18.0, "Food", Some("Pizza"), 29),
    (75.3, "Groceries", None, 45),
    (350.0, "Rent", None, 60),
    (9.99, "Subscriptions", Some("Music"), 90),
    (120.0, "Clothing", Some("Jacket"), 150),
    (42.0, "Food", Some("Dinner out"), 220),
    (350.0, "Rent", None, 300),
];

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    let extension = output_path.extension().unwrap_or_default();

    if extension.is_empty() {
        eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
        exit(1);
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Creating sample expenses...");

    let today = OffsetDateTime::now_utc().date();

    for (amount, category, note, days_ago) in SAMPLE_EXPENSES {
        let date = today - Duration::days(days_ago);
        create_expense(NewExpense::new(amount, category, note, date)?, &conn)?;
    }

    println!("Created {} expenses.", count_expenses(&conn)?);
    println!("Success!");

    Ok(())
}
