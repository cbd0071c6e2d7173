//! Spending insights: top category, daily average, largest expense, the
//! month-over-month trend and a month-end projection.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::{
    CategoryTotal, ExpenseRecord, MoneyCents,
    aggregate::{by_category, top_categories},
    util::{days_in_month, first_of_month, first_of_previous_month},
};

/// Month-over-month changes within this many percent count as stable.
pub const TREND_THRESHOLD_PERCENT: f64 = 5.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Up,
    Down,
    Stable,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Insights {
    pub top_category: Option<CategoryTotal>,
    /// Total spending divided by the number of distinct dates with spending.
    pub average_daily: MoneyCents,
    pub active_days: usize,
    pub largest: Option<ExpenseRecord>,
    pub this_month: MoneyCents,
    pub last_month: MoneyCents,
    /// Change from last month in percent; zero when last month had no
    /// spending.
    pub month_change_percent: f64,
    pub trend: Trend,
    /// Month-end estimate extrapolated from the days elapsed so far. `None`
    /// on the last day of the month.
    pub projection: Option<MoneyCents>,
}

/// Computes insights over the spending records of a set. Returns `None`
/// when there is no spending at all.
pub fn insights<'a>(
    records: impl IntoIterator<Item = &'a ExpenseRecord>,
    today: NaiveDate,
) -> Option<Insights> {
    let spending: Vec<&ExpenseRecord> = records
        .into_iter()
        .filter(|record| !record.expense.is_settlement())
        .collect();
    if spending.is_empty() {
        return None;
    }

    let total: MoneyCents = spending.iter().map(|r| r.expense.amount).sum();
    let active_days = spending
        .iter()
        .map(|r| r.expense.date)
        .collect::<BTreeSet<_>>()
        .len();

    let largest = spending
        .iter()
        .copied()
        .reduce(|max, r| {
            if r.expense.amount > max.expense.amount {
                r
            } else {
                max
            }
        })
        .cloned();

    let this_month_start = first_of_month(today);
    let last_month_start = first_of_previous_month(today);
    let month_total = |from: NaiveDate, until: NaiveDate| -> MoneyCents {
        spending
            .iter()
            .filter(|r| r.expense.date >= from && r.expense.date < until)
            .map(|r| r.expense.amount)
            .sum()
    };
    let this_month: MoneyCents = spending
        .iter()
        .filter(|r| r.expense.date >= this_month_start)
        .map(|r| r.expense.amount)
        .sum();
    let last_month = month_total(last_month_start, this_month_start);

    let month_change_percent = if last_month.is_positive() {
        (this_month - last_month).as_f64() / last_month.as_f64() * 100.0
    } else {
        0.0
    };
    let trend = if month_change_percent > TREND_THRESHOLD_PERCENT {
        Trend::Up
    } else if month_change_percent < -TREND_THRESHOLD_PERCENT {
        Trend::Down
    } else {
        Trend::Stable
    };

    let days_passed = today.day();
    let month_days = days_in_month(today);
    let projection =
        (days_passed < month_days).then(|| this_month.scale(month_days, days_passed));

    Some(Insights {
        top_category: top_categories(by_category(spending.iter().copied()), Some(1))
            .into_iter()
            .next(),
        average_daily: total.per(active_days),
        active_days,
        largest,
        this_month,
        last_month,
        month_change_percent,
        trend,
        projection,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        Category,
        testing::{RecordExt, date, personal, settlement, shared},
    };

    #[test]
    fn nothing_to_report_without_spending() {
        let records = vec![settlement("k1", "Ashwin", "Pooja", 1_000)];
        assert!(insights(&records, date(2026, 3, 14)).is_none());
    }

    #[test]
    fn computes_headline_figures() {
        let today = date(2026, 3, 10);
        let records = vec![
            personal("k1", "Ashwin", 2_000)
                .on(date(2026, 3, 2))
                .in_category(Category::Groceries),
            shared("k2", "Pooja", 8_000)
                .on(date(2026, 3, 5))
                .in_category(Category::Rent),
            personal("k3", "Pooja", 1_000)
                .on(date(2026, 3, 5))
                .in_category(Category::Groceries),
            personal("k4", "Ashwin", 5_000).on(date(2026, 2, 20)),
            settlement("k5", "Ashwin", "Pooja", 90_000).on(date(2026, 3, 6)),
        ];
        let insights = insights(&records, today).unwrap();

        assert_eq!(
            insights.top_category.map(|c| c.category),
            Some(Category::Rent)
        );
        assert_eq!(insights.active_days, 3);
        assert_eq!(insights.average_daily, MoneyCents::new(16_000 / 3));
        assert_eq!(
            insights.largest.map(|r| r.key.as_str().to_string()),
            Some("k2".to_string())
        );
        assert_eq!(insights.this_month, MoneyCents::new(11_000));
        assert_eq!(insights.last_month, MoneyCents::new(5_000));
        assert_eq!(insights.trend, Trend::Up);
        assert!((insights.month_change_percent - 120.0).abs() < 1e-9);
        assert_eq!(insights.projection, Some(MoneyCents::new(11_000 * 31 / 10)));
    }

    #[test]
    fn small_changes_are_stable() {
        let today = date(2026, 3, 31);
        let records = vec![
            personal("k1", "Ashwin", 10_000).on(date(2026, 2, 10)),
            personal("k2", "Ashwin", 10_300).on(date(2026, 3, 10)),
        ];
        let insights = insights(&records, today).unwrap();
        assert_eq!(insights.trend, Trend::Stable);
        assert_eq!(insights.projection, None);
    }
}
