use crate::{
    Balance, EngineError, ExpenseRecord, Parties, Party, RecordKey, ResultEngine,
    calculate_balance,
    store::{RecordStore, Snapshot, SqlStore, Subscription},
};

mod expenses;
mod settlements;

/// Write side of the ledger plus a window on the latest snapshot.
///
/// Pure reports (attribution, filters, aggregates) run on a [`Snapshot`];
/// the engine only owns the parties and the store.
#[derive(Debug)]
pub struct Engine<S = SqlStore> {
    parties: Parties,
    store: S,
}

impl<S: RecordStore> Engine<S> {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder<S> {
        EngineBuilder::default()
    }

    pub fn parties(&self) -> &Parties {
        &self.parties
    }

    pub fn snapshot(&self) -> Snapshot {
        self.store.snapshot()
    }

    pub fn subscribe(&self) -> Subscription {
        self.store.subscribe()
    }

    /// Maps the identity reported by the auth provider to a party.
    ///
    /// Anything outside the two configured emails is rejected.
    pub fn party_for_identity(&self, email: Option<&str>) -> ResultEngine<Party> {
        let email = email
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .ok_or_else(|| EngineError::InvalidParty("no identity".to_string()))?;
        self.parties
            .party_for_email(email)
            .ok_or_else(|| EngineError::InvalidParty(format!("{email} is not allowed")))
    }

    /// Balance over the full history.
    pub fn balance(&self) -> Balance {
        calculate_balance(self.snapshot().records(), &self.parties)
    }

    fn existing(&self, key: &RecordKey) -> ResultEngine<ExpenseRecord> {
        self.snapshot()
            .get(key)
            .cloned()
            .ok_or_else(|| EngineError::KeyNotFound(key.to_string()))
    }
}

/// The builder for `Engine`
pub struct EngineBuilder<S> {
    parties: Option<Parties>,
    store: Option<S>,
}

impl<S> Default for EngineBuilder<S> {
    fn default() -> Self {
        Self {
            parties: None,
            store: None,
        }
    }
}

impl<S: RecordStore> EngineBuilder<S> {
    /// Pass the two configured parties
    pub fn parties(mut self, parties: Parties) -> EngineBuilder<S> {
        self.parties = Some(parties);
        self
    }

    /// Pass the required store
    pub fn store(mut self, store: S) -> EngineBuilder<S> {
        self.store = Some(store);
        self
    }

    /// Construct `Engine`
    pub fn build(self) -> ResultEngine<Engine<S>> {
        let parties = self
            .parties
            .ok_or_else(|| EngineError::Incomplete("parties are required".to_string()))?;
        let store = self
            .store
            .ok_or_else(|| EngineError::Incomplete("a store is required".to_string()))?;
        Ok(Engine { parties, store })
    }
}

