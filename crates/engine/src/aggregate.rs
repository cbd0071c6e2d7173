//! Reporting aggregates over a (usually filtered) record set.
//!
//! Settlements clear balances; they are not spending, so every aggregate in
//! this module skips them.

use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::{
    Category, ExpenseRecord, MoneyCents, Parties, Party, RecordKind,
    attribution::{attribute, share_by_party},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    pub category: Category,
    pub total: MoneyCents,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PartyTotals {
    pub a: MoneyCents,
    pub b: MoneyCents,
}

impl PartyTotals {
    pub fn get(&self, party: Party) -> MoneyCents {
        match party {
            Party::A => self.a,
            Party::B => self.b,
        }
    }

    pub fn get_mut(&mut self, party: Party) -> &mut MoneyCents {
        match party {
            Party::A => &mut self.a,
            Party::B => &mut self.b,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct KindTotals {
    pub personal: MoneyCents,
    pub shared: MoneyCents,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct DailyPoint {
    pub date: NaiveDate,
    pub total: MoneyCents,
    pub by_party: PartyTotals,
}

fn spending<'a>(
    records: impl IntoIterator<Item = &'a ExpenseRecord>,
) -> impl Iterator<Item = &'a ExpenseRecord> {
    records
        .into_iter()
        .filter(|record| !record.expense.is_settlement())
}

/// Spending per category, in [`Category::SPENDING`] order, without empty
/// categories.
pub fn by_category<'a>(records: impl IntoIterator<Item = &'a ExpenseRecord>) -> Vec<CategoryTotal> {
    let mut sums: BTreeMap<Category, MoneyCents> = BTreeMap::new();
    for record in spending(records) {
        *sums.entry(record.expense.category).or_default() += record.expense.amount;
    }
    Category::SPENDING
        .into_iter()
        .filter_map(|category| {
            let total = sums.get(&category).copied().unwrap_or_default();
            (!total.is_zero()).then_some(CategoryTotal { category, total })
        })
        .collect()
}

/// Category totals sorted by amount, largest first, truncated to `limit`.
pub fn top_categories(mut totals: Vec<CategoryTotal>, limit: Option<usize>) -> Vec<CategoryTotal> {
    totals.sort_by(|a, b| b.total.cmp(&a.total));
    if let Some(limit) = limit {
        totals.truncate(limit);
    }
    totals
}

/// Spending per paying party. Records with an unknown payer are left out.
pub fn by_party<'a>(
    records: impl IntoIterator<Item = &'a ExpenseRecord>,
    parties: &Parties,
) -> PartyTotals {
    let mut totals = PartyTotals::default();
    for record in spending(records) {
        if let Some(payer) = record
            .expense
            .payer
            .as_deref()
            .and_then(|p| parties.resolve(p))
        {
            *totals.get_mut(payer) += record.expense.amount;
        }
    }
    totals
}

/// Full amounts of the shared expenses each party paid.
pub fn shared_contribution<'a>(
    records: impl IntoIterator<Item = &'a ExpenseRecord>,
    parties: &Parties,
) -> PartyTotals {
    by_party(
        records
            .into_iter()
            .filter(|record| record.expense.kind() == RecordKind::Shared),
        parties,
    )
}

pub fn by_kind<'a>(records: impl IntoIterator<Item = &'a ExpenseRecord>) -> KindTotals {
    let mut totals = KindTotals::default();
    for record in spending(records) {
        match record.expense.kind() {
            RecordKind::Personal => totals.personal += record.expense.amount,
            RecordKind::Shared => totals.shared += record.expense.amount,
            RecordKind::Settlement => {}
        }
    }
    totals
}

/// Daily spending for the `days` days ending on `today`, oldest first.
/// Days without spending are present with zero totals.
pub fn daily_series<'a>(
    records: impl IntoIterator<Item = &'a ExpenseRecord>,
    parties: &Parties,
    today: NaiveDate,
    days: u32,
) -> Vec<DailyPoint> {
    if days == 0 {
        return Vec::new();
    }
    let Some(first) = today.checked_sub_days(Days::new(u64::from(days - 1))) else {
        return Vec::new();
    };

    let mut points: BTreeMap<NaiveDate, DailyPoint> = first
        .iter_days()
        .take_while(|date| *date <= today)
        .map(|date| {
            (
                date,
                DailyPoint {
                    date,
                    total: MoneyCents::ZERO,
                    by_party: PartyTotals::default(),
                },
            )
        })
        .collect();

    for record in spending(records) {
        let Some(point) = points.get_mut(&record.expense.date) else {
            continue;
        };
        point.total += record.expense.amount;
        if let Some(payer) = record
            .expense
            .payer
            .as_deref()
            .and_then(|p| parties.resolve(p))
        {
            *point.by_party.get_mut(payer) += record.expense.amount;
        }
    }

    points.into_values().collect()
}

/// Headline figures for a record set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total_spent: MoneyCents,
    pub transactions: usize,
    pub average_per_transaction: MoneyCents,
    pub highest_category: Option<CategoryTotal>,
    pub by_category: Vec<CategoryTotal>,
    pub by_party: PartyTotals,
    /// Spending each party consumed: their personal expenses plus their
    /// share of shared ones, whoever paid.
    pub consumed: PartyTotals,
    pub by_kind: KindTotals,
    pub shared_contribution: PartyTotals,
    pub daily: Vec<DailyPoint>,
}

pub fn summarize(
    records: &[&ExpenseRecord],
    parties: &Parties,
    today: NaiveDate,
    trend_days: u32,
) -> Summary {
    let iter = || records.iter().copied();
    let total_spent: MoneyCents = spending(iter()).map(|r| r.expense.amount).sum();
    let transactions = spending(iter()).count();
    let by_category = by_category(iter());
    let highest_category = top_categories(by_category.clone(), Some(1)).into_iter().next();
    let consumed = share_by_party(&attribute(spending(iter()), parties).lines);

    Summary {
        total_spent,
        transactions,
        average_per_transaction: total_spent.per(transactions),
        highest_category,
        by_category,
        by_party: by_party(iter(), parties),
        consumed,
        by_kind: by_kind(iter()),
        shared_contribution: shared_contribution(iter(), parties),
        daily: daily_series(iter(), parties, today, trend_days),
    }
}
