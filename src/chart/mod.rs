//! The chart page: spending per calendar month across every recorded expense.

mod chart_page;
mod charts;

pub use chart_page::get_chart_page;
