//! Net balance between the two parties.
//!
//! The balance is a pure fold over raw records, so callers decide which
//! subset it covers (full history, a period, a filtered view).

use serde::Serialize;

use crate::{ExpenseRecord, MoneyCents, Parties, Party, RecordDetail};

/// Below this magnitude the pair counts as settled.
pub const SETTLED_EPSILON: MoneyCents = MoneyCents::new(1);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Balance {
    Settled,
    Owing {
        debtor: Party,
        creditor: Party,
        amount: MoneyCents,
    },
}

impl Balance {
    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Settled)
    }

    pub fn net_amount(&self) -> MoneyCents {
        match self {
            Self::Settled => MoneyCents::ZERO,
            Self::Owing { amount, .. } => *amount,
        }
    }

    pub fn debtor(&self) -> Option<Party> {
        match self {
            Self::Settled => None,
            Self::Owing { debtor, .. } => Some(*debtor),
        }
    }

    pub fn creditor(&self) -> Option<Party> {
        match self {
            Self::Settled => None,
            Self::Owing { creditor, .. } => Some(*creditor),
        }
    }
}

/// Running obligations of each party toward the other.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Obligations {
    owed_by_a: MoneyCents,
    owed_by_b: MoneyCents,
}

impl Obligations {
    fn owed_by(&mut self, party: Party) -> &mut MoneyCents {
        match party {
            Party::A => &mut self.owed_by_a,
            Party::B => &mut self.owed_by_b,
        }
    }

    fn apply(&mut self, record: &ExpenseRecord, parties: &Parties) {
        let expense = &record.expense;
        match &expense.detail {
            RecordDetail::Personal => {}
            RecordDetail::Shared(_) => {
                let Some(payer) = expense.payer.as_deref().and_then(|p| parties.resolve(p)) else {
                    tracing::debug!(key = %record.key, "shared record without a known payer skipped");
                    return;
                };
                let split = expense.split_amount().unwrap_or_else(|| expense.amount.half());
                *self.owed_by(payer.other()) += split;
            }
            RecordDetail::Settlement(settlement) => {
                let (Some(paid_by), Some(paid_to)) = (
                    parties.resolve(&settlement.paid_by),
                    parties.resolve(&settlement.paid_to),
                ) else {
                    tracing::debug!(key = %record.key, "settlement with an unknown side skipped");
                    return;
                };
                if paid_by == paid_to {
                    tracing::debug!(key = %record.key, "self-settlement skipped");
                    return;
                }
                // Not clamped: an overpayment turns the payer into the creditor.
                *self.owed_by(paid_by) -= expense.amount;
            }
        }
    }

    fn balance(self) -> Balance {
        let net = self.owed_by_b - self.owed_by_a;
        if net.abs() < SETTLED_EPSILON {
            return Balance::Settled;
        }
        let debtor = if net.is_positive() { Party::B } else { Party::A };
        Balance::Owing {
            debtor,
            creditor: debtor.other(),
            amount: net.abs(),
        }
    }
}

/// Folds shared and settlement records into the net balance.
///
/// Personal records never move the balance. Records naming an unknown party
/// are skipped.
pub fn calculate_balance<'a>(
    records: impl IntoIterator<Item = &'a ExpenseRecord>,
    parties: &Parties,
) -> Balance {
    records
        .into_iter()
        .fold(Obligations::default(), |mut obligations, record| {
            obligations.apply(record, parties);
            obligations
        })
        .balance()
}
