//! Settlement lifecycle: propose, confirm, build, edit and list.
//!
//! The functions here are pure. Writing goes through
//! [`crate::Engine::commit_settlement`] and [`crate::Engine::edit_settlement`].
//!
//! A draft is trusted: its amount is never compared with the outstanding
//! balance, neither at commit nor on later edits. Callers must not offer a
//! settlement when the balance is already settled.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::{
    Balance, Category, EngineError, Expense, ExpenseRecord, MoneyCents, Parties, Party,
    RecordDetail, ResultEngine, SettlementParties, money::MAX_AMOUNT,
    util::normalize_optional_text,
};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SettlementDraft {
    pub paid_by: Party,
    pub paid_to: Party,
    pub amount: MoneyCents,
    pub date: NaiveDate,
    pub note: Option<String>,
}

impl SettlementDraft {
    /// Marks the draft as confirmed by the user. Only confirmed drafts can
    /// be committed.
    pub fn confirm(self) -> ConfirmedSettlement {
        ConfirmedSettlement(self)
    }
}

/// A draft the user explicitly agreed to record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfirmedSettlement(SettlementDraft);

impl ConfirmedSettlement {
    pub fn draft(&self) -> &SettlementDraft {
        &self.0
    }
}

/// Proposes the settlement that clears `balance`: the debtor pays the
/// creditor the net amount today. `None` when nothing is owed.
pub fn propose_settlement(balance: &Balance, today: NaiveDate) -> Option<SettlementDraft> {
    match *balance {
        Balance::Settled => None,
        Balance::Owing {
            debtor,
            creditor,
            amount,
        } => Some(SettlementDraft {
            paid_by: debtor,
            paid_to: creditor,
            amount,
            date: today,
            note: None,
        }),
    }
}

fn check_settlement(paid_by: Party, paid_to: Party, amount: MoneyCents) -> ResultEngine<()> {
    if paid_by == paid_to {
        return Err(EngineError::InvalidSettlement(
            "a party cannot settle with itself".to_string(),
        ));
    }
    if amount.is_negative() {
        return Err(EngineError::InvalidAmount(
            "settlement amount must be >= 0".to_string(),
        ));
    }
    if !amount.is_storable() {
        return Err(EngineError::InvalidAmount(format!(
            "settlement amount must be <= {MAX_AMOUNT}"
        )));
    }
    Ok(())
}

/// Builds the record body for a confirmed settlement.
pub(crate) fn settlement_expense(
    confirmed: ConfirmedSettlement,
    parties: &Parties,
    actor: Party,
    id: String,
    now: DateTime<Utc>,
) -> ResultEngine<Expense> {
    let draft = confirmed.0;
    check_settlement(draft.paid_by, draft.paid_to, draft.amount)?;

    Ok(Expense {
        id,
        payer: None,
        category: Category::Settlement,
        amount: draft.amount,
        date: draft.date,
        created_at: now,
        updated_at: None,
        note: normalize_optional_text(draft.note.as_deref()),
        detail: RecordDetail::Settlement(SettlementParties {
            paid_by: parties.name(draft.paid_by).to_string(),
            paid_to: parties.name(draft.paid_to).to_string(),
            settled_by: Some(parties.name(actor).to_string()),
        }),
    })
}

/// Post-hoc changes to a recorded settlement. `None` keeps the current
/// value. Changing `paid_by` moves `paid_to` to the other party.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SettlementEdit {
    pub amount: Option<MoneyCents>,
    pub date: Option<NaiveDate>,
    /// `Some` replaces the note; a blank note clears it.
    pub note: Option<String>,
    pub paid_by: Option<Party>,
}

/// Applies `edit` to a settlement record body, stamping `updated_at`.
pub(crate) fn apply_settlement_edit(
    expense: &Expense,
    edit: SettlementEdit,
    parties: &Parties,
    now: DateTime<Utc>,
) -> ResultEngine<Expense> {
    let Some(current) = expense.settlement() else {
        return Err(EngineError::WrongKind(format!(
            "record {} is a {} record, not a settlement",
            expense.id,
            expense.kind().as_str()
        )));
    };

    let paid_by = match edit.paid_by {
        Some(party) => party,
        None => parties.require(&current.paid_by)?,
    };
    let paid_to = paid_by.other();
    let amount = edit.amount.unwrap_or(expense.amount);
    check_settlement(paid_by, paid_to, amount)?;

    let mut updated = expense.clone();
    updated.amount = amount;
    if let Some(date) = edit.date {
        updated.date = date;
    }
    if let Some(note) = edit.note {
        updated.note = normalize_optional_text(Some(&note));
    }
    updated.updated_at = Some(now);
    updated.detail = RecordDetail::Settlement(SettlementParties {
        paid_by: parties.name(paid_by).to_string(),
        paid_to: parties.name(paid_to).to_string(),
        settled_by: current.settled_by.clone(),
    });
    Ok(updated)
}

/// Settlement records, newest date first. Same-day settlements keep the
/// most recently created first.
pub fn list_settlements<'a>(
    records: impl IntoIterator<Item = &'a ExpenseRecord>,
) -> Vec<&'a ExpenseRecord> {
    let mut settlements: Vec<&ExpenseRecord> = records
        .into_iter()
        .filter(|record| record.expense.is_settlement())
        .collect();
    settlements.sort_by(|a, b| {
        b.expense
            .date
            .cmp(&a.expense.date)
            .then_with(|| b.expense.created_at.cmp(&a.expense.created_at))
    });
    settlements
}

/// Sum of settlement amounts.
pub fn total_settled<'a>(settlements: impl IntoIterator<Item = &'a ExpenseRecord>) -> MoneyCents {
    settlements
        .into_iter()
        .filter(|record| record.expense.is_settlement())
        .map(|record| record.expense.amount)
        .sum()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::{
        RecordKey, calculate_balance,
        testing::{RecordExt, date, parties, personal, settlement, shared, today},
    };

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, 18, 0, 0).unwrap()
    }

    #[test]
    fn proposal_follows_balance_direction() {
        let records = vec![shared("k1", "Ashwin", 10_000)];
        let balance = calculate_balance(&records, &parties());
        let draft = propose_settlement(&balance, today()).unwrap();
        assert_eq!(draft.paid_by, Party::B);
        assert_eq!(draft.paid_to, Party::A);
        assert_eq!(draft.amount, MoneyCents::new(5_000));
        assert_eq!(draft.date, today());
    }

    #[test]
    fn nothing_to_propose_when_settled() {
        assert!(propose_settlement(&Balance::Settled, today()).is_none());
    }

    #[test]
    fn committing_the_proposal_settles_the_pair() {
        let parties = parties();
        let mut records = vec![
            shared("k1", "Ashwin", 10_000),
            shared("k2", "Pooja", 3_333),
        ];
        let balance = calculate_balance(&records, &parties);
        let draft = propose_settlement(&balance, today()).unwrap();
        let expense = settlement_expense(draft.confirm(), &parties, Party::A, "id".into(), now())
            .unwrap();
        records.push(ExpenseRecord::new(RecordKey::from("k3"), expense));
        assert!(calculate_balance(&records, &parties).is_settled());
    }

    #[test]
    fn settlement_body_names_both_sides_and_actor() {
        let draft = SettlementDraft {
            paid_by: Party::B,
            paid_to: Party::A,
            amount: MoneyCents::new(5_000),
            date: today(),
            note: Some(" cash ".to_string()),
        };
        let expense =
            settlement_expense(draft.confirm(), &parties(), Party::A, "id".into(), now()).unwrap();
        assert_eq!(expense.category, Category::Settlement);
        assert_eq!(expense.payer, None);
        assert_eq!(expense.note.as_deref(), Some("cash"));
        assert_eq!(
            expense.settlement(),
            Some(&SettlementParties {
                paid_by: "Pooja".to_string(),
                paid_to: "Ashwin".to_string(),
                settled_by: Some("Ashwin".to_string()),
            })
        );
    }

    #[test]
    fn self_settlement_is_rejected() {
        let draft = SettlementDraft {
            paid_by: Party::A,
            paid_to: Party::A,
            amount: MoneyCents::new(100),
            date: today(),
            note: None,
        };
        let err = settlement_expense(draft.confirm(), &parties(), Party::A, "id".into(), now())
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidSettlement(_)));
    }

    #[test]
    fn edit_can_flip_direction() {
        let record = settlement("k1", "Pooja", "Ashwin", 5_000);
        let edit = SettlementEdit {
            amount: Some(MoneyCents::new(6_000)),
            paid_by: Some(Party::A),
            ..SettlementEdit::default()
        };
        let updated = apply_settlement_edit(&record.expense, edit, &parties(), now()).unwrap();
        let sides = updated.settlement().unwrap();
        assert_eq!(sides.paid_by, "Ashwin");
        assert_eq!(sides.paid_to, "Pooja");
        assert_eq!(updated.amount, MoneyCents::new(6_000));
        assert_eq!(updated.updated_at, Some(now()));
        assert_eq!(updated.id, record.expense.id);
        assert_eq!(updated.created_at, record.expense.created_at);
    }

    #[test]
    fn amounts_above_the_limit_are_rejected() {
        let draft = SettlementDraft {
            paid_by: Party::B,
            paid_to: Party::A,
            amount: MoneyCents::new(i64::MAX),
            date: today(),
            note: None,
        };
        let err = settlement_expense(draft.confirm(), &parties(), Party::A, "id".into(), now())
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidAmount(_)));

        let record = settlement("k1", "Pooja", "Ashwin", 5_000);
        let edit = SettlementEdit {
            amount: Some(MAX_AMOUNT + MoneyCents::new(1)),
            ..SettlementEdit::default()
        };
        let err = apply_settlement_edit(&record.expense, edit, &parties(), now()).unwrap_err();
        assert!(matches!(err, EngineError::InvalidAmount(_)));
    }

    #[test]
    fn edit_rejects_non_settlements() {
        let record = personal("k1", "Ashwin", 100);
        let err = apply_settlement_edit(
            &record.expense,
            SettlementEdit::default(),
            &parties(),
            now(),
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::WrongKind(_)));
    }

    #[test]
    fn history_is_sorted_by_date_descending() {
        let records = vec![
            settlement("old", "Pooja", "Ashwin", 1_000).on(date(2026, 1, 5)),
            personal("p", "Ashwin", 100),
            settlement("new", "Ashwin", "Pooja", 2_000).on(date(2026, 3, 1)),
            settlement("mid", "Pooja", "Ashwin", 3_000).on(date(2026, 2, 1)),
        ];
        let history = list_settlements(&records);
        let keys: Vec<_> = history.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["new", "mid", "old"]);
        assert_eq!(total_settled(history), MoneyCents::new(6_000));
    }
}
