//! Record fixtures shared by the unit tests.

use chrono::{NaiveDate, TimeZone, Utc};

use crate::{
    Category, Expense, ExpenseRecord, MoneyCents, Parties, PartyConfig, RecordDetail, RecordKey,
    SettlementParties, SharedSplit,
};

pub(crate) fn parties() -> Parties {
    Parties::new(
        PartyConfig {
            name: "Ashwin".to_string(),
            email: "ashwin@example.com".to_string(),
        },
        PartyConfig {
            name: "Pooja".to_string(),
            email: "pooja@example.com".to_string(),
        },
    )
    .unwrap()
}

pub(crate) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// The "today" every fixture is dated on unless moved with [`RecordExt::on`].
pub(crate) fn today() -> NaiveDate {
    date(2026, 3, 14)
}

fn record(key: &str, payer: Option<&str>, amount: i64, detail: RecordDetail) -> ExpenseRecord {
    let category = if matches!(detail, RecordDetail::Settlement(_)) {
        Category::Settlement
    } else {
        Category::Food
    };
    ExpenseRecord::new(
        RecordKey::from(key),
        Expense {
            id: format!("id-{key}"),
            payer: payer.map(ToString::to_string),
            category,
            amount: MoneyCents::new(amount),
            date: today(),
            created_at: Utc.with_ymd_and_hms(2026, 3, 14, 12, 0, 0).unwrap(),
            updated_at: None,
            note: None,
            detail,
        },
    )
}

pub(crate) fn personal(key: &str, payer: &str, amount: i64) -> ExpenseRecord {
    record(key, Some(payer), amount, RecordDetail::Personal)
}

pub(crate) fn shared(key: &str, payer: &str, amount: i64) -> ExpenseRecord {
    record(
        key,
        Some(payer),
        amount,
        RecordDetail::Shared(SharedSplit {
            split_amount: None,
            split_with: None,
            custom: false,
        }),
    )
}

pub(crate) fn shared_custom(key: &str, payer: &str, amount: i64, split: i64) -> ExpenseRecord {
    record(
        key,
        Some(payer),
        amount,
        RecordDetail::Shared(SharedSplit {
            split_amount: Some(MoneyCents::new(split)),
            split_with: None,
            custom: true,
        }),
    )
}

pub(crate) fn settlement(key: &str, paid_by: &str, paid_to: &str, amount: i64) -> ExpenseRecord {
    record(
        key,
        None,
        amount,
        RecordDetail::Settlement(SettlementParties {
            paid_by: paid_by.to_string(),
            paid_to: paid_to.to_string(),
            settled_by: Some(paid_by.to_string()),
        }),
    )
}

pub(crate) fn unknown_payer(key: &str, amount: i64) -> ExpenseRecord {
    personal(key, "Mallory", amount)
}

pub(crate) trait RecordExt {
    fn on(self, date: NaiveDate) -> Self;
    fn in_category(self, category: Category) -> Self;
}

impl RecordExt for ExpenseRecord {
    fn on(mut self, date: NaiveDate) -> Self {
        self.expense.date = date;
        self
    }

    fn in_category(mut self, category: Category) -> Self {
        self.expense.category = category;
        self
    }
}
