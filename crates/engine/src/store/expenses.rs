//! `expenses` table mapping.
//!
//! Rows keep the loose shape of the record collection: `kind` may be
//! missing (personal), split and settlement columns are only filled for
//! their kind.

use sea_orm::{ActiveValue, entity::prelude::*};

use crate::{
    Category, EngineError, Expense, ExpenseRecord, MoneyCents, RecordDetail, RecordKey,
    RecordKind, SettlementParties, SharedSplit,
};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub key: String,
    pub id: String,
    pub kind: Option<String>,
    pub payer: Option<String>,
    pub category: Option<String>,
    pub amount_minor: i64,
    pub date: Date,
    pub created_at: DateTimeUtc,
    pub updated_at: Option<DateTimeUtc>,
    pub note: Option<String>,
    pub split_minor: Option<i64>,
    pub split_with: Option<String>,
    pub custom_split: bool,
    pub paid_by: Option<String>,
    pub paid_to: Option<String>,
    pub settled_by: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<(&RecordKey, &Expense)> for ActiveModel {
    fn from((key, expense): (&RecordKey, &Expense)) -> Self {
        let (split_minor, split_with, custom_split) = match &expense.detail {
            RecordDetail::Shared(split) => (
                split.split_amount.map(MoneyCents::cents),
                split.split_with.clone(),
                split.custom,
            ),
            _ => (None, None, false),
        };
        let (paid_by, paid_to, settled_by) = match expense.settlement() {
            Some(s) => (
                Some(s.paid_by.clone()),
                Some(s.paid_to.clone()),
                s.settled_by.clone(),
            ),
            None => (None, None, None),
        };

        Self {
            key: ActiveValue::Set(key.as_str().to_string()),
            id: ActiveValue::Set(expense.id.clone()),
            kind: ActiveValue::Set(Some(expense.kind().as_str().to_string())),
            payer: ActiveValue::Set(expense.payer.clone()),
            category: ActiveValue::Set(Some(expense.category.as_str().to_string())),
            amount_minor: ActiveValue::Set(expense.amount.cents()),
            date: ActiveValue::Set(expense.date),
            created_at: ActiveValue::Set(expense.created_at),
            updated_at: ActiveValue::Set(expense.updated_at),
            note: ActiveValue::Set(expense.note.clone()),
            split_minor: ActiveValue::Set(split_minor),
            split_with: ActiveValue::Set(split_with),
            custom_split: ActiveValue::Set(custom_split),
            paid_by: ActiveValue::Set(paid_by),
            paid_to: ActiveValue::Set(paid_to),
            settled_by: ActiveValue::Set(settled_by),
        }
    }
}

impl TryFrom<Model> for ExpenseRecord {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let kind = RecordKind::from_stored(model.kind.as_deref())?;
        let amount = stored_amount(model.amount_minor)?;
        let (category, detail) = match kind {
            RecordKind::Personal => (
                stored_category(model.category.as_deref())?,
                RecordDetail::Personal,
            ),
            RecordKind::Shared => (
                stored_category(model.category.as_deref())?,
                RecordDetail::Shared(SharedSplit {
                    split_amount: model.split_minor.map(stored_amount).transpose()?,
                    split_with: model.split_with,
                    custom: model.custom_split,
                }),
            ),
            RecordKind::Settlement => {
                let (Some(paid_by), Some(paid_to)) = (model.paid_by, model.paid_to) else {
                    return Err(EngineError::InvalidRecord(format!(
                        "settlement {} without both parties",
                        model.key
                    )));
                };
                (
                    Category::Settlement,
                    RecordDetail::Settlement(SettlementParties {
                        paid_by,
                        paid_to,
                        settled_by: model.settled_by,
                    }),
                )
            }
        };

        Ok(ExpenseRecord::new(
            RecordKey::from(model.key),
            Expense {
                id: model.id,
                payer: model.payer,
                category,
                amount,
                date: model.date,
                created_at: model.created_at,
                updated_at: model.updated_at,
                note: model.note,
                detail,
            },
        ))
    }
}

fn stored_amount(minor: i64) -> Result<MoneyCents, EngineError> {
    let amount = MoneyCents::new(minor);
    if !amount.is_storable() {
        return Err(EngineError::InvalidRecord(format!(
            "amount {minor} outside the storable range"
        )));
    }
    Ok(amount)
}

fn stored_category(value: Option<&str>) -> Result<Category, EngineError> {
    let value = value.ok_or_else(|| EngineError::InvalidRecord("missing category".to_string()))?;
    let category = Category::try_from(value)?;
    if !category.is_spending() {
        return Err(EngineError::InvalidRecord(format!(
            "category {value} is reserved for settlements"
        )));
    }
    Ok(category)
}
