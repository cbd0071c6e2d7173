use sea_orm::prelude::*;
use tokio::sync::{Mutex, watch};
use uuid::Uuid;

use crate::{EngineError, Expense, ExpenseRecord, RecordKey, ResultEngine};

use super::{RecordStore, Snapshot, Subscription, expenses};

/// [`RecordStore`] backed by the `expenses` table.
///
/// Every successful write reloads the table and publishes the result to
/// all subscribers. Writes are serialized together with their reload, so a
/// published snapshot is never older than the one before it.
#[derive(Debug)]
pub struct SqlStore {
    database: DatabaseConnection,
    tx: watch::Sender<Snapshot>,
    writes: Mutex<()>,
}

impl SqlStore {
    /// Opens the store and loads the initial snapshot.
    pub async fn open(database: DatabaseConnection) -> ResultEngine<Self> {
        let snapshot = load(&database).await?;
        tracing::info!(records = snapshot.len(), "expense store opened");
        let (tx, _rx) = watch::channel(snapshot);
        Ok(Self {
            database,
            tx,
            writes: Mutex::new(()),
        })
    }

    async fn publish(&self) {
        match load(&self.database).await {
            Ok(snapshot) => {
                self.tx.send_replace(snapshot);
            }
            // The write is committed; subscribers catch up on the next reload.
            Err(err) => tracing::error!("failed to reload expenses after write: {err}"),
        }
    }
}

async fn load(database: &DatabaseConnection) -> ResultEngine<Snapshot> {
    let models = expenses::Entity::find().all(database).await?;
    let records = models
        .into_iter()
        .filter_map(|model| {
            let key = model.key.clone();
            match ExpenseRecord::try_from(model) {
                Ok(record) => Some(record),
                Err(err) => {
                    tracing::warn!(%key, "unreadable expense row skipped: {err}");
                    None
                }
            }
        })
        .collect();
    Ok(Snapshot::new(records))
}

impl RecordStore for SqlStore {
    fn snapshot(&self) -> Snapshot {
        self.tx.borrow().clone()
    }

    fn subscribe(&self) -> Subscription {
        Subscription::new(self.tx.subscribe())
    }

    async fn append(&self, expense: Expense) -> ResultEngine<RecordKey> {
        let _write = self.writes.lock().await;
        let key = RecordKey::new(Uuid::new_v4().to_string());
        expenses::ActiveModel::from((&key, &expense))
            .insert(&self.database)
            .await?;
        tracing::debug!(%key, kind = expense.kind().as_str(), "expense appended");
        self.publish().await;
        Ok(key)
    }

    async fn replace(&self, key: &RecordKey, expense: Expense) -> ResultEngine<()> {
        let _write = self.writes.lock().await;
        let result = expenses::Entity::update_many()
            .set(expenses::ActiveModel::from((key, &expense)))
            .filter(expenses::Column::Key.eq(key.as_str()))
            .exec(&self.database)
            .await?;
        if result.rows_affected == 0 {
            return Err(EngineError::KeyNotFound(key.to_string()));
        }
        tracing::debug!(%key, "expense replaced");
        self.publish().await;
        Ok(())
    }

    async fn remove(&self, key: &RecordKey) -> ResultEngine<()> {
        let _write = self.writes.lock().await;
        let result = expenses::Entity::delete_by_id(key.as_str())
            .exec(&self.database)
            .await?;
        if result.rows_affected == 0 {
            return Err(EngineError::KeyNotFound(key.to_string()));
        }
        tracing::debug!(%key, "expense removed");
        self.publish().await;
        Ok(())
    }
}
