use chrono::{DateTime, Utc};

use crate::{
    EngineError, ExpenseInput, RecordKey, ResultEngine, record::correlation_id,
    store::RecordStore,
};

use super::Engine;

impl<S: RecordStore> Engine<S> {
    /// Validates and stores a new personal or shared expense.
    ///
    /// Returns the key the store assigned. Nothing is written when
    /// validation fails.
    pub async fn add_expense(
        &self,
        input: ExpenseInput,
        now: DateTime<Utc>,
    ) -> ResultEngine<RecordKey> {
        let expense = input.into_expense(&self.parties, correlation_id(now), now, None)?;
        let key = self.store.append(expense).await?;
        tracing::info!(%key, "expense added");
        Ok(key)
    }

    /// Replaces the body of an existing expense, keeping its correlation
    /// id and creation time.
    pub async fn edit_expense(
        &self,
        key: &RecordKey,
        input: ExpenseInput,
        now: DateTime<Utc>,
    ) -> ResultEngine<()> {
        let existing = self.existing(key)?;
        if existing.expense.is_settlement() {
            return Err(EngineError::WrongKind(format!(
                "{key} is a settlement, edit it as one"
            )));
        }
        let expense = input.into_expense(
            &self.parties,
            existing.expense.id,
            existing.expense.created_at,
            Some(now),
        )?;
        self.store.replace(key, expense).await?;
        tracing::info!(%key, "expense edited");
        Ok(())
    }

    pub async fn delete_expense(&self, key: &RecordKey) -> ResultEngine<()> {
        self.store.remove(key).await?;
        tracing::info!(%key, "record deleted");
        Ok(())
    }
}
