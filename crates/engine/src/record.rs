//! Expense record primitives.
//!
//! An [`ExpenseRecord`] is the only persisted entity: a store-assigned
//! [`RecordKey`] plus the [`Expense`] body. The body is one of three kinds
//! (personal, shared, settlement), modelled as [`RecordDetail`] so each kind
//! carries exactly the fields it needs.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    Category, EngineError, MoneyCents, Parties, Party, ResultEngine, money::MAX_AMOUNT,
    util::normalize_optional_text,
};

/// Opaque identifier assigned by the store when a record is appended.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordKey(String);

impl RecordKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for RecordKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for RecordKey {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Personal,
    Shared,
    Settlement,
}

impl RecordKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Personal => "personal",
            Self::Shared => "shared",
            Self::Settlement => "settlement",
        }
    }

    /// Parses the stored `type` field. A missing value means `personal`.
    pub fn from_stored(value: Option<&str>) -> ResultEngine<Self> {
        match value.map(str::trim) {
            None | Some("") | Some("personal") => Ok(Self::Personal),
            Some("shared") => Ok(Self::Shared),
            Some("settlement") => Ok(Self::Settlement),
            Some(other) => Err(EngineError::InvalidRecord(format!(
                "invalid record type: {other}"
            ))),
        }
    }
}

/// Split fields of a shared expense.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharedSplit {
    /// Portion owed by the non-paying party. `None` on legacy records, in
    /// which case half of the amount applies.
    pub split_amount: Option<MoneyCents>,
    /// Name of the non-paying party.
    pub split_with: Option<String>,
    pub custom: bool,
}

/// Direction of a settlement payment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementParties {
    pub paid_by: String,
    pub paid_to: String,
    /// Name of the signed-in party who recorded the settlement.
    pub settled_by: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RecordDetail {
    Personal,
    Shared(SharedSplit),
    Settlement(SettlementParties),
}

/// Body of a record, i.e. everything except the store key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    /// Client-generated correlation id, informational only.
    pub id: String,
    /// Name of the party who physically paid. Absent on settlements.
    pub payer: Option<String>,
    pub category: Category,
    pub amount: MoneyCents,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub note: Option<String>,
    pub detail: RecordDetail,
}

impl Expense {
    pub fn kind(&self) -> RecordKind {
        match self.detail {
            RecordDetail::Personal => RecordKind::Personal,
            RecordDetail::Shared(_) => RecordKind::Shared,
            RecordDetail::Settlement(_) => RecordKind::Settlement,
        }
    }

    pub fn is_settlement(&self) -> bool {
        matches!(self.detail, RecordDetail::Settlement(_))
    }

    /// Portion of a shared expense owed by the non-paying party.
    ///
    /// Falls back to half of the amount when the record carries no split,
    /// so records written before splits were stored stay interpretable.
    /// Returns `None` for other kinds.
    pub fn split_amount(&self) -> Option<MoneyCents> {
        match &self.detail {
            RecordDetail::Shared(split) => {
                Some(split.split_amount.unwrap_or_else(|| self.amount.half()))
            }
            _ => None,
        }
    }

    pub fn settlement(&self) -> Option<&SettlementParties> {
        match &self.detail {
            RecordDetail::Settlement(settlement) => Some(settlement),
            _ => None,
        }
    }

    /// Whether the named party paid for, or took part in, this record.
    pub fn involves(&self, name: &str) -> bool {
        match &self.detail {
            RecordDetail::Settlement(settlement) => {
                settlement.paid_by == name || settlement.paid_to == name
            }
            _ => self.payer.as_deref() == Some(name),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub key: RecordKey,
    pub expense: Expense,
}

impl ExpenseRecord {
    pub fn new(key: RecordKey, expense: Expense) -> Self {
        Self { key, expense }
    }
}

/// User input for creating or editing a personal or shared expense.
///
/// Settlements have their own lifecycle, see [`crate::settlement`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExpenseInput {
    pub kind: RecordKind,
    pub payer: String,
    pub category: Category,
    pub amount: MoneyCents,
    pub date: NaiveDate,
    pub note: Option<String>,
    /// Explicit share owed by the other party. Only meaningful for shared
    /// expenses; `None` means an even split.
    pub custom_split: Option<MoneyCents>,
}

impl ExpenseInput {
    /// Validates the input and computes the derived split fields.
    ///
    /// Nothing is written here: a rejected input leaves the store untouched.
    pub(crate) fn into_expense(
        self,
        parties: &Parties,
        id: String,
        created_at: DateTime<Utc>,
        updated_at: Option<DateTime<Utc>>,
    ) -> ResultEngine<Expense> {
        if self.kind == RecordKind::Settlement {
            return Err(EngineError::WrongKind(
                "settlements are recorded through the settlement lifecycle".to_string(),
            ));
        }
        if !self.category.is_spending() {
            return Err(EngineError::InvalidRecord(
                "the settlement category is reserved for settlements".to_string(),
            ));
        }
        if !self.amount.is_positive() {
            return Err(EngineError::InvalidAmount("amount must be > 0".to_string()));
        }
        if !self.amount.is_storable() {
            return Err(EngineError::InvalidAmount(format!(
                "amount must be <= {MAX_AMOUNT}"
            )));
        }
        let payer = parties.require(self.payer.trim())?;

        let detail = match self.kind {
            RecordKind::Shared => shared_split(parties, payer, self.amount, self.custom_split)?,
            _ => RecordDetail::Personal,
        };

        Ok(Expense {
            id,
            payer: Some(parties.name(payer).to_string()),
            category: self.category,
            amount: self.amount,
            date: self.date,
            created_at,
            updated_at,
            note: normalize_optional_text(self.note.as_deref()),
            detail,
        })
    }
}

fn shared_split(
    parties: &Parties,
    payer: Party,
    amount: MoneyCents,
    custom_split: Option<MoneyCents>,
) -> ResultEngine<RecordDetail> {
    let (split_amount, custom) = match custom_split {
        Some(split) if split.is_negative() => {
            return Err(EngineError::InvalidSplit("split must be >= 0".to_string()));
        }
        Some(split) if split > amount => {
            return Err(EngineError::InvalidSplit(format!(
                "split {split} exceeds amount {amount}"
            )));
        }
        Some(split) => (split, true),
        None => (amount.half(), false),
    };

    Ok(RecordDetail::Shared(SharedSplit {
        split_amount: Some(split_amount),
        split_with: Some(parties.name(payer.other()).to_string()),
        custom,
    }))
}

/// Client-side correlation id: creation millis plus a random suffix.
pub(crate) fn correlation_id(now: DateTime<Utc>) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{}_{}", now.timestamp_millis(), &suffix[..9])
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::testing::parties;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0).unwrap()
    }

    fn input(kind: RecordKind, amount: i64, custom_split: Option<i64>) -> ExpenseInput {
        ExpenseInput {
            kind,
            payer: "Ashwin".to_string(),
            category: Category::Groceries,
            amount: MoneyCents::new(amount),
            date: NaiveDate::from_ymd_opt(2026, 3, 14).unwrap(),
            note: Some("  ".to_string()),
            custom_split: custom_split.map(MoneyCents::new),
        }
    }

    #[test]
    fn shared_defaults_to_even_split() {
        let expense = input(RecordKind::Shared, 10_000, None)
            .into_expense(&parties(), "x".to_string(), now(), None)
            .unwrap();
        assert_eq!(
            expense.detail,
            RecordDetail::Shared(SharedSplit {
                split_amount: Some(MoneyCents::new(5_000)),
                split_with: Some("Pooja".to_string()),
                custom: false,
            })
        );
        assert_eq!(expense.note, None);
    }

    #[test]
    fn custom_split_is_kept() {
        let expense = input(RecordKind::Shared, 10_000, Some(7_000))
            .into_expense(&parties(), "x".to_string(), now(), None)
            .unwrap();
        assert_eq!(expense.split_amount(), Some(MoneyCents::new(7_000)));
    }

    #[test]
    fn custom_split_above_amount_is_rejected() {
        let err = input(RecordKind::Shared, 10_000, Some(10_001))
            .into_expense(&parties(), "x".to_string(), now(), None)
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidSplit(_)));
    }

    #[test]
    fn non_positive_amount_is_rejected() {
        let err = input(RecordKind::Personal, 0, None)
            .into_expense(&parties(), "x".to_string(), now(), None)
            .unwrap_err();
        assert_eq!(
            err,
            EngineError::InvalidAmount("amount must be > 0".to_string())
        );
    }

    #[test]
    fn amount_above_the_limit_is_rejected() {
        let err = input(RecordKind::Personal, i64::MAX, None)
            .into_expense(&parties(), "x".to_string(), now(), None)
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidAmount(_)));

        let at_limit = input(RecordKind::Shared, MAX_AMOUNT.cents(), None)
            .into_expense(&parties(), "x".to_string(), now(), None)
            .unwrap();
        assert_eq!(at_limit.amount, MAX_AMOUNT);
    }

    #[test]
    fn unknown_payer_is_rejected() {
        let mut input = input(RecordKind::Personal, 100, None);
        input.payer = "Mallory".to_string();
        let err = input
            .into_expense(&parties(), "x".to_string(), now(), None)
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidParty(_)));
    }

    #[test]
    fn legacy_shared_record_defaults_split_at_read_time() {
        let expense = Expense {
            id: "legacy".to_string(),
            payer: Some("Ashwin".to_string()),
            category: Category::Rent,
            amount: MoneyCents::new(3_001),
            date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            created_at: now(),
            updated_at: None,
            note: None,
            detail: RecordDetail::Shared(SharedSplit {
                split_amount: None,
                split_with: None,
                custom: false,
            }),
        };
        assert_eq!(expense.split_amount(), Some(MoneyCents::new(1_500)));
    }

    #[test]
    fn missing_type_means_personal() {
        assert_eq!(RecordKind::from_stored(None).unwrap(), RecordKind::Personal);
        assert!(RecordKind::from_stored(Some("loan")).is_err());
    }

    #[test]
    fn correlation_id_has_millis_and_suffix() {
        let id = correlation_id(now());
        let (millis, suffix) = id.split_once('_').unwrap();
        assert_eq!(millis, now().timestamp_millis().to_string());
        assert_eq!(suffix.len(), 9);
    }
}
