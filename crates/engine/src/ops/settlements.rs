use chrono::{DateTime, NaiveDate, Utc};

use crate::{
    Party, RecordKey, ResultEngine,
    record::correlation_id,
    settlement::{
        ConfirmedSettlement, SettlementDraft, SettlementEdit, apply_settlement_edit,
        propose_settlement, settlement_expense,
    },
    store::RecordStore,
};

use super::Engine;

impl<S: RecordStore> Engine<S> {
    /// Drafts the settlement clearing the full-history balance, or `None`
    /// when the pair is already settled.
    pub fn propose_settlement(&self, today: NaiveDate) -> Option<SettlementDraft> {
        propose_settlement(&self.balance(), today)
    }

    /// Records a confirmed settlement on behalf of `actor`.
    pub async fn commit_settlement(
        &self,
        confirmed: ConfirmedSettlement,
        actor: Party,
        now: DateTime<Utc>,
    ) -> ResultEngine<RecordKey> {
        let expense =
            settlement_expense(confirmed, &self.parties, actor, correlation_id(now), now)?;
        let amount = expense.amount;
        let key = self.store.append(expense).await?;
        tracing::info!(%key, %amount, settled_by = self.parties.name(actor), "settlement recorded");
        Ok(key)
    }

    /// Edits a recorded settlement. The new amount is not checked against
    /// the outstanding balance.
    pub async fn edit_settlement(
        &self,
        key: &RecordKey,
        edit: SettlementEdit,
        now: DateTime<Utc>,
    ) -> ResultEngine<()> {
        let existing = self.existing(key)?;
        let expense = apply_settlement_edit(&existing.expense, edit, &self.parties, now)?;
        self.store.replace(key, expense).await?;
        tracing::info!(%key, "settlement edited");
        Ok(())
    }
}
