//! Engine values to wire views.

use api_types::{
    balance::{BalanceStatus, BalanceView},
    expense::ExpenseView,
    insights::{InsightsView, Trend as ApiTrend},
    lines::LineView,
    summary::{CategoryTotalView, DailyPointView, PartyTotalView, SummaryView},
};
use engine::{
    AttributedLine, Balance, CategoryTotal, DailyPoint, ExpenseRecord, Insights, Parties, Party,
    PartyTotals, RecordDetail, Summary, Trend,
};

use crate::query::api_kind;

pub(crate) fn expense_view(record: &ExpenseRecord) -> ExpenseView {
    let expense = &record.expense;
    let (split_with, custom_split) = match &expense.detail {
        RecordDetail::Shared(split) => (split.split_with.clone(), split.custom),
        _ => (None, false),
    };
    let settlement = expense.settlement();

    ExpenseView {
        key: record.key.to_string(),
        id: expense.id.clone(),
        kind: api_kind(expense.kind()),
        payer: expense.payer.clone(),
        category: expense.category.as_str().to_string(),
        category_label: expense.category.label().to_string(),
        amount_minor: expense.amount.cents(),
        date: expense.date,
        created_at: expense.created_at,
        updated_at: expense.updated_at,
        note: expense.note.clone(),
        split_minor: expense.split_amount().map(|split| split.cents()),
        split_with,
        custom_split,
        paid_by: settlement.map(|s| s.paid_by.clone()),
        paid_to: settlement.map(|s| s.paid_to.clone()),
        settled_by: settlement.and_then(|s| s.settled_by.clone()),
    }
}

pub(crate) fn line_view(line: &AttributedLine<'_>, parties: &Parties) -> LineView {
    let expense = &line.source.expense;
    LineView {
        key: line.source.key.to_string(),
        party: parties.name(line.party).to_string(),
        kind: api_kind(expense.kind()),
        category: expense.category.as_str().to_string(),
        date: expense.date,
        amount_minor: line.amount.cents(),
        share_minor: line.share.cents(),
        is_payer: line.is_payer,
        note: expense.note.clone(),
    }
}

pub(crate) fn balance_view(balance: &Balance, parties: &Parties) -> BalanceView {
    match *balance {
        Balance::Settled => BalanceView {
            status: BalanceStatus::Settled,
            debtor: None,
            creditor: None,
            amount_minor: 0,
            message: "All settled up".to_string(),
        },
        Balance::Owing {
            debtor,
            creditor,
            amount,
        } => BalanceView {
            status: BalanceStatus::Owing,
            debtor: Some(parties.name(debtor).to_string()),
            creditor: Some(parties.name(creditor).to_string()),
            amount_minor: amount.cents(),
            message: format!(
                "{} owes {} {amount}",
                parties.name(debtor),
                parties.name(creditor)
            ),
        },
    }
}

pub(crate) fn category_total_view(total: &CategoryTotal) -> CategoryTotalView {
    CategoryTotalView {
        category: total.category.as_str().to_string(),
        label: total.category.label().to_string(),
        total_minor: total.total.cents(),
    }
}

fn party_totals_view(totals: &PartyTotals, parties: &Parties) -> Vec<PartyTotalView> {
    Party::BOTH
        .into_iter()
        .map(|party| PartyTotalView {
            party: parties.name(party).to_string(),
            total_minor: totals.get(party).cents(),
        })
        .collect()
}

fn daily_point_view(point: &DailyPoint, parties: &Parties) -> DailyPointView {
    DailyPointView {
        date: point.date,
        total_minor: point.total.cents(),
        by_party: party_totals_view(&point.by_party, parties),
    }
}

pub(crate) fn summary_view(summary: &Summary, parties: &Parties) -> SummaryView {
    SummaryView {
        total_minor: summary.total_spent.cents(),
        transactions: summary.transactions,
        average_minor: summary.average_per_transaction.cents(),
        highest_category: summary.highest_category.as_ref().map(category_total_view),
        by_category: summary.by_category.iter().map(category_total_view).collect(),
        by_party: party_totals_view(&summary.by_party, parties),
        consumed: party_totals_view(&summary.consumed, parties),
        personal_minor: summary.by_kind.personal.cents(),
        shared_minor: summary.by_kind.shared.cents(),
        shared_contribution: party_totals_view(&summary.shared_contribution, parties),
        daily: summary
            .daily
            .iter()
            .map(|point| daily_point_view(point, parties))
            .collect(),
    }
}

pub(crate) fn insights_view(insights: &Insights) -> InsightsView {
    InsightsView {
        top_category: insights.top_category.as_ref().map(category_total_view),
        average_daily_minor: insights.average_daily.cents(),
        active_days: insights.active_days,
        largest: insights.largest.as_ref().map(expense_view),
        this_month_minor: insights.this_month.cents(),
        last_month_minor: insights.last_month.cents(),
        month_change_percent: insights.month_change_percent,
        trend: match insights.trend {
            Trend::Up => ApiTrend::Up,
            Trend::Down => ApiTrend::Down,
            Trend::Stable => ApiTrend::Stable,
        },
        projection_minor: insights.projection.map(|p| p.cents()),
    }
}
