use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseKind {
    Personal,
    Shared,
    Settlement,
}

/// Filter selection shared by the reporting routes.
///
/// Every field is optional; a missing field (or `all`) does not narrow.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct FilterQuery {
    /// Party name.
    pub party: Option<String>,
    /// Category slug, e.g. `groceries`.
    pub category: Option<String>,
    /// `personal` or `shared`.
    pub kind: Option<String>,
    /// `today`, `week`, `month`, `all` or `custom`.
    pub period: Option<String>,
    /// Start of a custom period, inclusive.
    pub start: Option<NaiveDate>,
    /// End of a custom period, inclusive.
    pub end: Option<NaiveDate>,
}

pub mod expense {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseView {
        pub key: String,
        pub id: String,
        pub kind: ExpenseKind,
        pub payer: Option<String>,
        pub category: String,
        pub category_label: String,
        pub amount_minor: i64,
        pub date: NaiveDate,
        pub created_at: DateTime<Utc>,
        pub updated_at: Option<DateTime<Utc>>,
        pub note: Option<String>,
        /// Share owed by the non-paying party (shared only).
        pub split_minor: Option<i64>,
        pub split_with: Option<String>,
        pub custom_split: bool,
        pub paid_by: Option<String>,
        pub paid_to: Option<String>,
        pub settled_by: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseListResponse {
        pub expenses: Vec<ExpenseView>,
        pub total_minor: i64,
    }

    /// Body of `POST /expenses` and `PATCH /expenses/{key}`.
    ///
    /// An edit replaces every field of the record.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseNew {
        pub kind: ExpenseKind,
        pub payer: String,
        pub category: String,
        /// Amount in paise. Either this or `amount` must be given.
        pub amount_minor: Option<i64>,
        /// Amount in rupees as typed, e.g. `"12.50"` or `"12,5"`.
        pub amount: Option<String>,
        pub date: NaiveDate,
        pub note: Option<String>,
        /// Custom share owed by the other party; omitted means an even
        /// split.
        pub split_minor: Option<i64>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseCreated {
        pub key: String,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct ExpenseDelete {
        pub confirm: Option<bool>,
    }
}

pub mod lines {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct LineView {
        pub key: String,
        pub party: String,
        pub kind: ExpenseKind,
        pub category: String,
        pub date: NaiveDate,
        /// Amount shown for the party: the full amount on payer lines, the
        /// split on counterpart lines.
        pub amount_minor: i64,
        /// Economic share of the party; payer and counterpart shares add up
        /// to the record amount.
        pub share_minor: i64,
        pub is_payer: bool,
        pub note: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct LinesResponse {
        pub lines: Vec<LineView>,
        /// Keys of records naming an unknown party.
        pub unattributed: Vec<String>,
    }
}

pub mod balance {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum BalanceStatus {
        Settled,
        Owing,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BalanceView {
        pub status: BalanceStatus,
        pub debtor: Option<String>,
        pub creditor: Option<String>,
        pub amount_minor: i64,
        /// Human readable line, e.g. `Pooja owes Ashwin ₹50.00`.
        pub message: String,
    }
}

pub mod summary {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryTotalView {
        pub category: String,
        pub label: String,
        pub total_minor: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PartyTotalView {
        pub party: String,
        pub total_minor: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct DailyPointView {
        pub date: NaiveDate,
        pub total_minor: i64,
        pub by_party: Vec<PartyTotalView>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SummaryView {
        pub total_minor: i64,
        pub transactions: usize,
        pub average_minor: i64,
        pub highest_category: Option<CategoryTotalView>,
        pub by_category: Vec<CategoryTotalView>,
        /// Amount each party paid.
        pub by_party: Vec<PartyTotalView>,
        /// Spending each party consumed: personal expenses plus their share
        /// of shared ones.
        pub consumed: Vec<PartyTotalView>,
        pub personal_minor: i64,
        pub shared_minor: i64,
        /// Full amount of the shared expenses each party paid.
        pub shared_contribution: Vec<PartyTotalView>,
        pub daily: Vec<DailyPointView>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct TopCategories {
        pub limit: Option<usize>,
    }
}

pub mod insights {
    use super::*;

    use crate::expense::ExpenseView;
    use crate::summary::CategoryTotalView;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum Trend {
        Up,
        Down,
        Stable,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct InsightsView {
        pub top_category: Option<CategoryTotalView>,
        pub average_daily_minor: i64,
        pub active_days: usize,
        pub largest: Option<ExpenseView>,
        pub this_month_minor: i64,
        pub last_month_minor: i64,
        pub month_change_percent: f64,
        pub trend: Trend,
        pub projection_minor: Option<i64>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct InsightsResponse {
        /// Absent when the selection has no spending.
        pub insights: Option<InsightsView>,
    }
}

pub mod settlement {
    use super::*;

    use crate::expense::ExpenseView;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SettlementDraftView {
        pub paid_by: String,
        pub paid_to: String,
        pub amount_minor: i64,
        pub date: NaiveDate,
        pub note: Option<String>,
    }

    /// Body of `POST /settlements`. Nothing is recorded unless `confirm` is
    /// `true`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct SettlementNew {
        pub paid_by: String,
        pub paid_to: String,
        pub amount_minor: i64,
        pub date: NaiveDate,
        pub note: Option<String>,
        #[serde(default)]
        pub confirm: bool,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct SettlementUpdate {
        pub amount_minor: Option<i64>,
        /// Amount in rupees as typed; alternative to `amount_minor`.
        pub amount: Option<String>,
        pub date: Option<NaiveDate>,
        pub note: Option<String>,
        /// New payer; the receiver becomes the other party.
        pub paid_by: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SettlementCreated {
        pub key: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SettlementHistory {
        pub settlements: Vec<ExpenseView>,
        pub total_minor: i64,
    }
}
