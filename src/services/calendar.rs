//! Date-window arithmetic shared by the dashboard and the reports.
//!
//! Week math follows ISO-8601: weeks start on Monday and belong to the year
//! that contains their Thursday, so the first days of January can land in
//! week 52/53 of the previous ISO year.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Weekday};

use crate::domain::report::{ReportRange, RevenuePeriod};

/// Single-day window.
pub fn day_range(date: NaiveDate) -> ReportRange {
    ReportRange::new(date, date)
}

/// Monday through Sunday of the ISO week containing `date`.
pub fn iso_week_range(date: NaiveDate) -> ReportRange {
    let iso = date.iso_week();
    let monday = NaiveDate::from_isoywd_opt(iso.year(), iso.week(), Weekday::Mon)
        .unwrap_or(date);
    let sunday = monday + chrono::Duration::days(6);
    ReportRange::new(monday, sunday)
}

/// First through last day of the month containing `date`.
pub fn month_range(date: NaiveDate) -> ReportRange {
    let first = date.with_day(1).unwrap_or(date);
    let next_month = if first.month() == 12 {
        NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)
    };
    let last = next_month
        .map(|d| d - chrono::Duration::days(1))
        .unwrap_or(date);
    ReportRange::new(first, last)
}

/// January 1st through December 31st of the year containing `date`.
pub fn year_range(date: NaiveDate) -> ReportRange {
    let first = NaiveDate::from_ymd_opt(date.year(), 1, 1).unwrap_or(date);
    let last = NaiveDate::from_ymd_opt(date.year(), 12, 31).unwrap_or(date);
    ReportRange::new(first, last)
}

/// Resolves a dashboard period filter to its date window.
pub fn period_range(period: RevenuePeriod, date: NaiveDate) -> ReportRange {
    match period {
        RevenuePeriod::Daily => day_range(date),
        RevenuePeriod::Weekly => iso_week_range(date),
        RevenuePeriod::Monthly => month_range(date),
        RevenuePeriod::Yearly => year_range(date),
    }
}

/// The window of equal day-length immediately preceding `range`.
pub fn previous_range(range: ReportRange) -> ReportRange {
    let len = chrono::Duration::days(range.days());
    ReportRange::new(range.start - len, range.end - len)
}

/// Default reporting window: January 1st of `today`'s year through `today`.
pub fn default_report_range(today: NaiveDate) -> ReportRange {
    let first = NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap_or(today);
    ReportRange::new(first, today)
}

/// Inclusive datetime bounds covering every instant of the date window.
pub fn datetime_bounds(range: ReportRange) -> (NaiveDateTime, NaiveDateTime) {
    let start = range.start.and_hms_opt(0, 0, 0).unwrap_or_default();
    let end = range.end.and_hms_opt(23, 59, 59).unwrap_or_default();
    (start, end)
}

/// `2025-W07` style label for the ISO week containing `date`.
pub fn week_label(date: NaiveDate) -> String {
    let iso = date.iso_week();
    format!("{}-W{:02}", iso.year(), iso.week())
}

/// `2025-03` style label for the month containing `date`.
pub fn month_label(date: NaiveDate) -> String {
    format!("{}-{:02}", date.year(), date.month())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn iso_week_of_early_january_belongs_to_previous_year() {
        // 2027-01-01 is a Friday in ISO week 53 of 2026.
        let range = iso_week_range(d(2027, 1, 1));
        assert_eq!(range.start, d(2026, 12, 28));
        assert_eq!(range.end, d(2027, 1, 3));
        assert_eq!(week_label(d(2027, 1, 1)), "2026-W53");
    }

    #[test]
    fn iso_week_one_can_start_in_december() {
        // 2024-12-30 is a Monday that opens week 1 of 2025.
        assert_eq!(week_label(d(2024, 12, 30)), "2025-W01");
        let range = iso_week_range(d(2025, 1, 1));
        assert_eq!(range.start, d(2024, 12, 30));
    }

    #[test]
    fn month_range_handles_december() {
        let range = month_range(d(2025, 12, 15));
        assert_eq!(range.start, d(2025, 12, 1));
        assert_eq!(range.end, d(2025, 12, 31));
    }

    #[test]
    fn month_range_handles_leap_february() {
        let range = month_range(d(2024, 2, 10));
        assert_eq!(range.end, d(2024, 2, 29));
    }

    #[test]
    fn previous_range_is_adjacent_and_equal_length() {
        let range = ReportRange::new(d(2025, 3, 11), d(2025, 3, 20));
        let previous = previous_range(range);
        assert_eq!(previous.days(), range.days());
        assert_eq!(previous.end, d(2025, 3, 10));
        assert_eq!(previous.start, d(2025, 3, 1));
    }

    #[test]
    fn period_range_resolves_each_granularity() {
        let date = d(2025, 8, 7);
        assert_eq!(period_range(RevenuePeriod::Daily, date).days(), 1);
        assert_eq!(period_range(RevenuePeriod::Weekly, date).days(), 7);
        assert_eq!(
            period_range(RevenuePeriod::Monthly, date).start,
            d(2025, 8, 1)
        );
        assert_eq!(
            period_range(RevenuePeriod::Yearly, date).end,
            d(2025, 12, 31)
        );
    }
}
