//! Filter criteria over records and attributed lines.
//!
//! Criteria are plain immutable values; "today" is always passed in so the
//! same criteria evaluate identically in tests and in production.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{
    AttributedLine, Category, EngineError, ExpenseRecord, Parties, Party, RecordKind,
    ResultEngine, util::first_of_month,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartyFilter {
    #[default]
    All,
    Only(Party),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

/// Record kind axis. Settlements are not selectable here: they pass only
/// under [`KindFilter::All`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KindFilter {
    #[default]
    All,
    Personal,
    Shared,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    Today,
    /// The last seven days and today.
    Week,
    /// Since the first day of the current calendar month.
    Month,
    #[default]
    All,
    /// Inclusive date range, both ends included for the whole day.
    Custom { start: NaiveDate, end: NaiveDate },
}

impl Period {
    /// Builds a custom range, rejecting ranges that end before they start.
    pub fn custom(start: NaiveDate, end: NaiveDate) -> ResultEngine<Self> {
        if end < start {
            return Err(EngineError::InvalidPeriod(format!(
                "range ends ({end}) before it starts ({start})"
            )));
        }
        Ok(Self::Custom { start, end })
    }

    /// Whether `date` falls inside the period as seen from `today`.
    pub fn contains(&self, date: NaiveDate, today: NaiveDate) -> bool {
        match *self {
            Self::Today => date == today,
            Self::Week => {
                let from = today.checked_sub_days(Days::new(7)).unwrap_or(NaiveDate::MIN);
                date >= from
            }
            Self::Month => date >= first_of_month(today),
            Self::All => true,
            Self::Custom { start, end } => start <= date && date <= end,
        }
    }
}

/// Complete filter selection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Criteria {
    pub party: PartyFilter,
    pub category: CategoryFilter,
    pub kind: KindFilter,
    pub period: Period,
}

impl Criteria {
    /// Every predicate except the party one.
    fn matches_record(&self, record: &ExpenseRecord, today: NaiveDate) -> bool {
        let expense = &record.expense;
        let category = match self.category {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => expense.category == category,
        };
        let kind = match self.kind {
            KindFilter::All => true,
            KindFilter::Personal => expense.kind() == RecordKind::Personal,
            KindFilter::Shared => expense.kind() == RecordKind::Shared,
        };
        category && kind && self.period.contains(expense.date, today)
    }
}

/// Narrows raw records. The party predicate keeps records the party paid
/// for, plus settlements they sent or received.
pub fn filter_records<'a>(
    records: impl IntoIterator<Item = &'a ExpenseRecord>,
    criteria: &Criteria,
    parties: &Parties,
    today: NaiveDate,
) -> Vec<&'a ExpenseRecord> {
    records
        .into_iter()
        .filter(|record| match criteria.party {
            PartyFilter::All => true,
            PartyFilter::Only(party) => record.expense.involves(parties.name(party)),
        })
        .filter(|record| criteria.matches_record(record, today))
        .collect()
}

/// Narrows attributed lines.
///
/// With a party selected, every line attributed to that party is kept, so
/// a shared expense the other party paid still shows the selected party's
/// split. Without a party, only payer lines are kept so each record is
/// listed once.
pub fn filter_lines<'a>(
    lines: &[AttributedLine<'a>],
    criteria: &Criteria,
    today: NaiveDate,
) -> Vec<AttributedLine<'a>> {
    lines
        .iter()
        .filter(|line| match criteria.party {
            PartyFilter::All => line.is_payer,
            PartyFilter::Only(party) => line.party == party,
        })
        .filter(|line| criteria.matches_record(line.source, today))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        MoneyCents, attribute,
        testing::{RecordExt, date, parties, personal, settlement, shared, today},
    };

    #[test]
    fn month_starts_on_first_calendar_day() {
        let today = date(2026, 3, 14);
        assert!(Period::Month.contains(date(2026, 3, 1), today));
        assert!(!Period::Month.contains(date(2026, 2, 28), today));
    }

    #[test]
    fn week_reaches_back_seven_days() {
        let today = date(2026, 3, 14);
        assert!(Period::Week.contains(date(2026, 3, 7), today));
        assert!(!Period::Week.contains(date(2026, 3, 6), today));
    }

    #[test]
    fn today_is_exact() {
        let today = date(2026, 3, 14);
        assert!(Period::Today.contains(today, today));
        assert!(!Period::Today.contains(date(2026, 3, 13), today));
    }

    #[test]
    fn custom_range_includes_both_ends() {
        let period = Period::custom(date(2026, 1, 10), date(2026, 1, 20)).unwrap();
        let today = date(2026, 3, 14);
        assert!(period.contains(date(2026, 1, 10), today));
        assert!(period.contains(date(2026, 1, 20), today));
        assert!(!period.contains(date(2026, 1, 21), today));
        assert!(Period::custom(date(2026, 1, 20), date(2026, 1, 10)).is_err());
    }

    #[test]
    fn category_filter_selects_matching_records() {
        let records = vec![
            personal("g1", "Ashwin", 1_000).in_category(Category::Groceries),
            shared("g2", "Pooja", 2_000).in_category(Category::Groceries),
            personal("g3", "Pooja", 3_000).in_category(Category::Groceries),
            personal("r1", "Ashwin", 50_000).in_category(Category::Rent),
            personal("f1", "Ashwin", 700),
        ];
        let criteria = Criteria {
            category: CategoryFilter::Only(Category::Groceries),
            ..Criteria::default()
        };
        let filtered = filter_records(&records, &criteria, &parties(), today());
        assert_eq!(filtered.len(), 3);
        let total: MoneyCents = filtered.iter().map(|r| r.expense.amount).sum();
        assert_eq!(total, MoneyCents::new(6_000));
    }

    #[test]
    fn kind_filter_excludes_settlements() {
        let records = vec![
            personal("k1", "Ashwin", 1_000),
            shared("k2", "Ashwin", 2_000),
            settlement("k3", "Pooja", "Ashwin", 1_000),
        ];
        let parties = parties();
        let personal_only = Criteria {
            kind: KindFilter::Personal,
            ..Criteria::default()
        };
        let shared_only = Criteria {
            kind: KindFilter::Shared,
            ..Criteria::default()
        };
        assert_eq!(filter_records(&records, &personal_only, &parties, today()).len(), 1);
        assert_eq!(filter_records(&records, &shared_only, &parties, today()).len(), 1);
        assert_eq!(
            filter_records(&records, &Criteria::default(), &parties, today()).len(),
            3
        );
    }

    #[test]
    fn party_filter_on_records_uses_payer_and_settlement_sides() {
        let records = vec![
            personal("k1", "Ashwin", 1_000),
            shared("k2", "Pooja", 2_000),
            settlement("k3", "Pooja", "Ashwin", 1_000),
        ];
        let criteria = Criteria {
            party: PartyFilter::Only(Party::A),
            ..Criteria::default()
        };
        let keys: Vec<_> = filter_records(&records, &criteria, &parties(), today())
            .into_iter()
            .map(|r| r.key.as_str())
            .collect();
        assert_eq!(keys, vec!["k1", "k3"]);
    }

    #[test]
    fn lines_without_party_are_deduplicated() {
        let records = vec![
            shared("k1", "Ashwin", 2_000),
            settlement("k2", "Pooja", "Ashwin", 1_000),
        ];
        let attribution = attribute(&records, &parties());
        let lines = filter_lines(&attribution.lines, &Criteria::default(), today());
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(|l| l.is_payer));
    }

    #[test]
    fn lines_for_a_party_include_counterpart_shares() {
        let records = vec![
            shared("k1", "Ashwin", 2_000),
            personal("k2", "Ashwin", 500),
        ];
        let attribution = attribute(&records, &parties());
        let criteria = Criteria {
            party: PartyFilter::Only(Party::B),
            ..Criteria::default()
        };
        let lines = filter_lines(&attribution.lines, &criteria, today());
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].amount, MoneyCents::new(1_000));
        assert!(!lines[0].is_payer);
    }

    #[test]
    fn period_applies_to_lines() {
        let records = vec![
            personal("k1", "Ashwin", 2_000).on(date(2026, 2, 28)),
            personal("k2", "Ashwin", 500).on(date(2026, 3, 1)),
        ];
        let attribution = attribute(&records, &parties());
        let criteria = Criteria {
            period: Period::Month,
            ..Criteria::default()
        };
        let lines = filter_lines(&attribution.lines, &criteria, today());
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].source.key.as_str(), "k2");
    }
}
