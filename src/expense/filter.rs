//! The date filters for the expense list.

use serde::{Deserialize, Serialize};
use time::{Date, Duration};

/// Selects which expenses are shown in the list and counted in the totals.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExpenseFilter {
    /// Every expense.
    #[default]
    All,
    /// Expenses since the most recent Sunday, inclusive.
    ThisWeek,
    /// Expenses since the first day of the current month, inclusive.
    ThisMonth,
}

impl ExpenseFilter {
    /// The filters in the order they are shown on the page.
    pub const ALL_FILTERS: [ExpenseFilter; 3] = [
        ExpenseFilter::All,
        ExpenseFilter::ThisWeek,
        ExpenseFilter::ThisMonth,
    ];

    /// The earliest date included by this filter, or `None` if every date is included.
    ///
    /// Weeks start on Sunday, so on a Sunday `ThisWeek` starts today.
    pub fn start_date(self, today: Date) -> Option<Date> {
        match self {
            ExpenseFilter::All => None,
            ExpenseFilter::ThisWeek => {
                let days_since_sunday = today.weekday().number_days_from_sunday();
                Some(today - Duration::days(days_since_sunday.into()))
            }
            ExpenseFilter::ThisMonth => {
                let days_since_first = today.day() - 1;
                Some(today - Duration::days(days_since_first.into()))
            }
        }
    }

    /// The text of the button for this filter.
    pub fn label(self) -> &'static str {
        match self {
            ExpenseFilter::All => "All",
            ExpenseFilter::ThisWeek => "This Week",
            ExpenseFilter::ThisMonth => "This Month",
        }
    }

    /// The value of the `filter` query parameter for this filter.
    pub fn query_value(self) -> &'static str {
        match self {
            ExpenseFilter::All => "All",
            ExpenseFilter::ThisWeek => "ThisWeek",
            ExpenseFilter::ThisMonth => "ThisMonth",
        }
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use time::macros::date;

    use super::ExpenseFilter;

    #[test]
    fn all_has_no_start_date() {
        assert_eq!(ExpenseFilter::All.start_date(date!(2024 - 05 - 16)), None);
    }

    #[test]
    fn week_starts_on_previous_sunday() {
        // 2024-05-16 is a Thursday.
        assert_eq!(
            ExpenseFilter::ThisWeek.start_date(date!(2024 - 05 - 16)),
            Some(date!(2024 - 05 - 12))
        );
    }

    #[test]
    fn week_starting_today_on_sunday() {
        assert_eq!(
            ExpenseFilter::ThisWeek.start_date(date!(2024 - 05 - 12)),
            Some(date!(2024 - 05 - 12))
        );
    }

    #[test]
    fn week_can_start_in_previous_month() {
        // 2024-06-01 is a Saturday.
        assert_eq!(
            ExpenseFilter::ThisWeek.start_date(date!(2024 - 06 - 01)),
            Some(date!(2024 - 05 - 26))
        );
    }

    #[test]
    fn month_starts_on_the_first() {
        assert_eq!(
            ExpenseFilter::ThisMonth.start_date(date!(2024 - 02 - 29)),
            Some(date!(2024 - 02 - 01))
        );
        assert_eq!(
            ExpenseFilter::ThisMonth.start_date(date!(2024 - 02 - 01)),
            Some(date!(2024 - 02 - 01))
        );
    }

    #[derive(Deserialize)]
    struct Query {
        #[serde(default)]
        filter: ExpenseFilter,
    }

    #[test]
    fn deserialises_from_query_value() {
        for filter in ExpenseFilter::ALL_FILTERS {
            let query_string = format!("filter={}", filter.query_value());
            let query: Query = serde_html_form::from_str(&query_string).unwrap();

            assert_eq!(query.filter, filter);
        }

        let query: Query = serde_html_form::from_str("").unwrap();
        assert_eq!(query.filter, ExpenseFilter::All);
    }
}
