//! Internal helpers for input normalization and calendar arithmetic.
//!
//! These utilities are **not** part of the public API.

use chrono::{Datelike, Days, Months, NaiveDate};

/// Trim optional free text, mapping blank input to `None`.
pub(crate) fn normalize_optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

/// First calendar day of the month containing `date`.
pub(crate) fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// First calendar day of the month before the one containing `date`.
pub(crate) fn first_of_previous_month(date: NaiveDate) -> NaiveDate {
    let first = first_of_month(date);
    first.checked_sub_months(Months::new(1)).unwrap_or(first)
}

/// Number of days in the month containing `date`.
pub(crate) fn days_in_month(date: NaiveDate) -> u32 {
    let first = first_of_month(date);
    first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.checked_sub_days(Days::new(1)))
        .map_or(31, |last| last.day())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn month_arithmetic() {
        assert_eq!(first_of_month(date(2026, 3, 14)), date(2026, 3, 1));
        assert_eq!(first_of_previous_month(date(2026, 1, 20)), date(2025, 12, 1));
        assert_eq!(days_in_month(date(2024, 2, 10)), 29);
        assert_eq!(days_in_month(date(2026, 12, 31)), 31);
        assert_eq!(days_in_month(date(2026, 4, 1)), 30);
    }

    #[test]
    fn blank_text_is_none() {
        assert_eq!(normalize_optional_text(Some("  ")), None);
        assert_eq!(
            normalize_optional_text(Some(" dinner ")),
            Some("dinner".to_string())
        );
    }
}
