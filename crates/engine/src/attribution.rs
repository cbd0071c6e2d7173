//! Attribution of raw records to the two parties.
//!
//! Every record expands into one or two [`AttributedLine`]s so per-party
//! totals are plain sums by [`AttributedLine::party`]:
//!
//! | kind       | lines                                                      |
//! |------------|------------------------------------------------------------|
//! | personal   | payer, full amount, payer line                             |
//! | shared     | payer with full amount; other party with the split amount  |
//! | settlement | `paid_by` and `paid_to`, both with the full amount          |
//!
//! Shared and settlement records are entered twice. Transaction-list views
//! without a party filter must keep only payer lines, see
//! [`crate::filter::filter_lines`].

use crate::{ExpenseRecord, MoneyCents, Parties, Party, RecordDetail, aggregate::PartyTotals};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttributedLine<'a> {
    pub source: &'a ExpenseRecord,
    pub party: Party,
    /// Amount shown for this party in per-party reporting.
    pub amount: MoneyCents,
    /// Part of the spending this party consumed: the whole amount of a
    /// personal expense, `amount - split` for the payer of a shared expense
    /// and `split` for the other party. Zero on settlement lines, which move
    /// money without spending any.
    pub share: MoneyCents,
    pub is_payer: bool,
}

/// Result of attributing a record set.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Attribution<'a> {
    pub lines: Vec<AttributedLine<'a>>,
    /// Records that name a party outside the configured pair. They produce
    /// no lines and are missing from every per-party sum.
    pub unattributed: Vec<&'a ExpenseRecord>,
}

/// Expands records into attributed lines, preserving input order.
pub fn attribute<'a>(
    records: impl IntoIterator<Item = &'a ExpenseRecord>,
    parties: &Parties,
) -> Attribution<'a> {
    let mut attribution = Attribution::default();
    for record in records {
        if !attribute_record(record, parties, &mut attribution.lines) {
            tracing::warn!(
                key = %record.key,
                payer = ?record.expense.payer,
                "record does not belong to a known party, left out of attribution"
            );
            attribution.unattributed.push(record);
        }
    }
    attribution
}

/// Appends the lines of a single record. Returns `false` when the record
/// cannot be attributed.
fn attribute_record<'a>(
    record: &'a ExpenseRecord,
    parties: &Parties,
    lines: &mut Vec<AttributedLine<'a>>,
) -> bool {
    let expense = &record.expense;
    let amount = expense.amount;

    match &expense.detail {
        RecordDetail::Personal => {
            let Some(payer) = expense.payer.as_deref().and_then(|p| parties.resolve(p)) else {
                return false;
            };
            lines.push(AttributedLine {
                source: record,
                party: payer,
                amount,
                share: amount,
                is_payer: true,
            });
        }
        RecordDetail::Shared(_) => {
            let Some(payer) = expense.payer.as_deref().and_then(|p| parties.resolve(p)) else {
                return false;
            };
            let split = expense.split_amount().unwrap_or_else(|| amount.half());
            lines.push(AttributedLine {
                source: record,
                party: payer,
                amount,
                share: amount - split,
                is_payer: true,
            });
            lines.push(AttributedLine {
                source: record,
                party: payer.other(),
                amount: split,
                share: split,
                is_payer: false,
            });
        }
        RecordDetail::Settlement(settlement) => {
            let (Some(paid_by), Some(paid_to)) = (
                parties.resolve(&settlement.paid_by),
                parties.resolve(&settlement.paid_to),
            ) else {
                return false;
            };
            if paid_by == paid_to {
                return false;
            }
            lines.push(AttributedLine {
                source: record,
                party: paid_by,
                amount,
                share: MoneyCents::ZERO,
                is_payer: true,
            });
            lines.push(AttributedLine {
                source: record,
                party: paid_to,
                amount,
                share: MoneyCents::ZERO,
                is_payer: false,
            });
        }
    }
    true
}

/// Sums consumed shares per party. Over a whole record set the two totals
/// add up to the spending that could be attributed.
pub fn share_by_party<'a, 'b: 'a>(
    lines: impl IntoIterator<Item = &'a AttributedLine<'b>>,
) -> PartyTotals {
    let mut totals = PartyTotals::default();
    for line in lines {
        *totals.get_mut(line.party) += line.share;
    }
    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{parties, personal, settlement, shared, shared_custom, unknown_payer};

    #[test]
    fn personal_produces_one_payer_line() {
        let records = vec![personal("k1", "Ashwin", 1_200)];
        let attribution = attribute(&records, &parties());
        assert_eq!(attribution.lines.len(), 1);
        let line = &attribution.lines[0];
        assert_eq!(line.party, Party::A);
        assert_eq!(line.amount, MoneyCents::new(1_200));
        assert!(line.is_payer);
    }

    #[test]
    fn shared_produces_payer_and_counterpart_lines() {
        let records = vec![shared("k1", "Ashwin", 10_000)];
        let lines = attribute(&records, &parties()).lines;
        assert_eq!(lines.len(), 2);
        assert_eq!(
            (lines[0].party, lines[0].amount, lines[0].is_payer),
            (Party::A, MoneyCents::new(10_000), true)
        );
        assert_eq!(
            (lines[1].party, lines[1].amount, lines[1].is_payer),
            (Party::B, MoneyCents::new(5_000), false)
        );
    }

    #[test]
    fn shares_are_conserved() {
        let parties = parties();
        for record in [
            shared("k1", "Ashwin", 10_001),
            shared_custom("k2", "Pooja", 9_000, 2_500),
        ] {
            let records = vec![record];
            let lines = attribute(&records, &parties).lines;
            let expense = &records[0].expense;
            assert_eq!(lines[0].share + lines[1].share, expense.amount);
            assert_eq!(lines[1].amount, expense.split_amount().unwrap());
        }
    }

    #[test]
    fn settlement_lines_carry_full_amount() {
        let records = vec![settlement("k1", "Pooja", "Ashwin", 5_000)];
        let lines = attribute(&records, &parties()).lines;
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(|l| l.amount == MoneyCents::new(5_000)));
        assert_eq!((lines[0].party, lines[0].is_payer), (Party::B, true));
        assert_eq!((lines[1].party, lines[1].is_payer), (Party::A, false));
    }

    #[test]
    fn unknown_payer_is_reported_not_attributed() {
        let records = vec![unknown_payer("k1", 700), personal("k2", "Pooja", 300)];
        let attribution = attribute(&records, &parties());
        assert_eq!(attribution.lines.len(), 1);
        assert_eq!(attribution.unattributed.len(), 1);
        assert_eq!(attribution.unattributed[0].key.as_str(), "k1");
    }

    #[test]
    fn attribution_is_idempotent() {
        let records = vec![
            personal("k1", "Ashwin", 1_000),
            shared("k2", "Pooja", 4_000),
            settlement("k3", "Ashwin", "Pooja", 2_000),
        ];
        let parties = parties();
        assert_eq!(attribute(&records, &parties), attribute(&records, &parties));
    }

    #[test]
    fn per_party_share_sums() {
        let records = vec![
            personal("k1", "Ashwin", 1_000),
            shared("k2", "Pooja", 4_000),
        ];
        let lines = attribute(&records, &parties()).lines;
        let shares = share_by_party(&lines);
        assert_eq!(shares.a, MoneyCents::new(3_000));
        assert_eq!(shares.b, MoneyCents::new(2_000));
    }
}
