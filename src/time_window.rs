//! Calendar date windows for revision and commit queries.
//!
//! A [`TimeWindow`] is an inclusive range of calendar dates. Either bound
//! may be absent, giving an open-ended window. Revision queries compare the
//! calendar-date part of a revision's timestamp against the window, so a
//! window covers whole days rather than instants.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An inclusive, possibly open-ended range of calendar dates.
///
/// A window whose start lies after its end contains no dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
}

impl TimeWindow {
    /// Window spanning `start` through `end`, both inclusive.
    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    /// Window covering a single day.
    pub fn on(day: NaiveDate) -> Self {
        Self::between(day, day)
    }

    /// Window from `start` (inclusive) with no upper bound.
    pub fn since(start: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: None,
        }
    }

    /// Window up to `end` (inclusive) with no lower bound.
    pub fn until(end: NaiveDate) -> Self {
        Self {
            start: None,
            end: Some(end),
        }
    }

    /// The inclusive lower bound, if any.
    pub fn start(&self) -> Option<NaiveDate> {
        self.start
    }

    /// The inclusive upper bound, if any.
    pub fn end(&self) -> Option<NaiveDate> {
        self.end
    }

    /// Whether `date` falls within the window.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.is_none_or(|start| date >= start) && self.end.is_none_or(|end| date <= end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn between_is_inclusive_on_both_ends() {
        let window = TimeWindow::between(day(2024, 3, 1), day(2024, 3, 31));
        assert!(window.contains(day(2024, 3, 1)));
        assert!(window.contains(day(2024, 3, 15)));
        assert!(window.contains(day(2024, 3, 31)));
        assert!(!window.contains(day(2024, 2, 29)));
        assert!(!window.contains(day(2024, 4, 1)));
    }

    #[test]
    fn single_day_window() {
        let window = TimeWindow::on(day(2024, 6, 10));
        assert!(window.contains(day(2024, 6, 10)));
        assert!(!window.contains(day(2024, 6, 9)));
        assert!(!window.contains(day(2024, 6, 11)));
    }

    #[test]
    fn since_has_no_upper_bound() {
        let window = TimeWindow::since(day(2020, 1, 1));
        assert!(window.contains(day(2020, 1, 1)));
        assert!(window.contains(day(2099, 12, 31)));
        assert!(!window.contains(day(2019, 12, 31)));
    }

    #[test]
    fn until_has_no_lower_bound() {
        let window = TimeWindow::until(day(2020, 1, 1));
        assert!(window.contains(day(1970, 1, 1)));
        assert!(window.contains(day(2020, 1, 1)));
        assert!(!window.contains(day(2020, 1, 2)));
    }

    #[test]
    fn accessors_report_the_bounds() {
        let window = TimeWindow::between(day(2024, 3, 1), day(2024, 3, 31));
        assert_eq!(window.start(), Some(day(2024, 3, 1)));
        assert_eq!(window.end(), Some(day(2024, 3, 31)));

        assert_eq!(TimeWindow::since(day(2024, 1, 1)).end(), None);
        assert_eq!(TimeWindow::until(day(2024, 1, 1)).start(), None);
    }

    #[test]
    fn reversed_window_contains_nothing() {
        let window = TimeWindow::between(day(2024, 3, 31), day(2024, 3, 1));
        assert!(!window.contains(day(2024, 3, 15)));
        assert!(!window.contains(day(2024, 3, 1)));
        assert!(!window.contains(day(2024, 3, 31)));
    }
}
