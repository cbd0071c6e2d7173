//! Shared-expense ledger for two parties.
//!
//! Records flow from the [`store`] as whole snapshots; everything derived
//! from them (attribution, balance, filters, aggregates, insights) is a pure
//! function over a record slice. Writes go through [`Engine`].

pub use aggregate::{
    CategoryTotal, DailyPoint, KindTotals, PartyTotals, Summary, by_category, by_kind, by_party,
    daily_series, shared_contribution, summarize, top_categories,
};
pub use attribution::{AttributedLine, Attribution, attribute, share_by_party};
pub use balance::{Balance, SETTLED_EPSILON, calculate_balance};
pub use category::Category;
pub use error::EngineError;
pub use filter::{
    CategoryFilter, Criteria, KindFilter, PartyFilter, Period, filter_lines, filter_records,
};
pub use insights::{Insights, TREND_THRESHOLD_PERCENT, Trend, insights};
pub use money::{MAX_AMOUNT, MoneyCents};
pub use ops::{Engine, EngineBuilder};
pub use party::{Parties, Party, PartyConfig};
pub use record::{
    Expense, ExpenseInput, ExpenseRecord, RecordDetail, RecordKey, RecordKind, SettlementParties,
    SharedSplit,
};
pub use settlement::{
    ConfirmedSettlement, SettlementDraft, SettlementEdit, list_settlements, propose_settlement,
    total_settled,
};
pub use store::{RecordStore, Snapshot, SqlStore, Subscription};

mod aggregate;
mod attribution;
mod balance;
mod category;
mod error;
mod filter;
mod insights;
mod money;
mod ops;
mod party;
mod record;
mod settlement;
pub mod store;
mod util;

#[cfg(test)]
mod testing;

type ResultEngine<T> = Result<T, EngineError>;
