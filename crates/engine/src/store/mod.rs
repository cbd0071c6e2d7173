//! Record store boundary.
//!
//! A store keeps the record collection and publishes it as whole
//! [`Snapshot`]s. Mutations report success or failure but never hand back
//! the changed state: readers observe writes through the next snapshot.

use std::{future::Future, sync::Arc};

use tokio::sync::watch;

use crate::{Expense, ExpenseRecord, RecordKey, ResultEngine};

mod expenses;
mod sqlite;

pub use sqlite::SqlStore;

/// Async adapter over the record collection.
pub trait RecordStore: Send + Sync {
    /// Latest published snapshot.
    fn snapshot(&self) -> Snapshot;

    /// Opens a subscription that yields every snapshot published from now on.
    fn subscribe(&self) -> Subscription;

    /// Stores a new record and returns the key assigned to it.
    fn append(&self, expense: Expense) -> impl Future<Output = ResultEngine<RecordKey>> + Send;

    /// Overwrites the record stored under `key`.
    fn replace(
        &self,
        key: &RecordKey,
        expense: Expense,
    ) -> impl Future<Output = ResultEngine<()>> + Send;

    fn remove(&self, key: &RecordKey) -> impl Future<Output = ResultEngine<()>> + Send;
}

/// Immutable view of the whole collection at one point in time, newest
/// first.
#[derive(Clone, Debug, Default)]
pub struct Snapshot {
    records: Arc<[ExpenseRecord]>,
}

impl Snapshot {
    pub fn new(mut records: Vec<ExpenseRecord>) -> Self {
        records.sort_by(|a, b| {
            b.expense
                .created_at
                .cmp(&a.expense.created_at)
                .then_with(|| b.expense.date.cmp(&a.expense.date))
        });
        Self {
            records: records.into(),
        }
    }

    pub fn records(&self) -> &[ExpenseRecord] {
        &self.records
    }

    pub fn get(&self, key: &RecordKey) -> Option<&ExpenseRecord> {
        self.records.iter().find(|record| &record.key == key)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Live feed of snapshots. Dropping it releases the subscription.
#[derive(Debug)]
pub struct Subscription {
    rx: watch::Receiver<Snapshot>,
}

impl Subscription {
    pub(crate) fn new(rx: watch::Receiver<Snapshot>) -> Self {
        Self { rx }
    }

    /// Snapshot the subscription last saw.
    pub fn current(&self) -> Snapshot {
        self.rx.borrow().clone()
    }

    /// Waits for the next published snapshot. `None` once the store is gone.
    pub async fn next(&mut self) -> Option<Snapshot> {
        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().clone())
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        tracing::debug!("snapshot subscription released");
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::testing::{RecordExt, date, personal};

    #[test]
    fn snapshot_orders_newest_first() {
        let mut early = personal("early", "Ashwin", 100);
        early.expense.created_at = Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap();
        let late = personal("late", "Ashwin", 100);
        let same_time_older_date = personal("older", "Pooja", 100).on(date(2026, 3, 2));

        let snapshot = Snapshot::new(vec![same_time_older_date, early, late]);
        let keys: Vec<_> = snapshot.records().iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["late", "older", "early"]);
        assert!(snapshot.get(&RecordKey::from("early")).is_some());
        assert!(snapshot.get(&RecordKey::from("missing")).is_none());
    }

    #[tokio::test]
    async fn subscription_sees_published_snapshots() {
        let (tx, rx) = watch::channel(Snapshot::default());
        let mut subscription = Subscription::new(rx);
        assert!(subscription.current().is_empty());

        tx.send_replace(Snapshot::new(vec![personal("k1", "Ashwin", 100)]));
        let next = subscription.next().await.unwrap();
        assert_eq!(next.len(), 1);

        drop(tx);
        assert!(subscription.next().await.is_none());
    }
}
