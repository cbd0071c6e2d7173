//! Reporting API endpoints

use api_types::{
    FilterQuery,
    balance::BalanceView,
    insights::InsightsResponse,
    summary::{CategoryTotalView, SummaryView, TopCategories},
};
use axum::{
    Json,
    extract::{Query, State},
};
use engine::{by_category, calculate_balance, filter_records, summarize, top_categories};

use crate::{
    ServerError, query,
    server::ServerState,
    views::{balance_view, category_total_view, insights_view, summary_view},
};

/// Balance over the filtered records. Without filters this is the balance
/// over the whole history.
pub async fn balance(
    State(state): State<ServerState>,
    Query(filter): Query<FilterQuery>,
) -> Result<Json<BalanceView>, ServerError> {
    let parties = state.engine.parties();
    let criteria = query::criteria(&filter, parties)?;
    let snapshot = state.engine.snapshot();
    let records = filter_records(snapshot.records(), &criteria, parties, state.today());
    let balance = calculate_balance(records, parties);
    Ok(Json(balance_view(&balance, parties)))
}

pub async fn summary(
    State(state): State<ServerState>,
    Query(filter): Query<FilterQuery>,
) -> Result<Json<SummaryView>, ServerError> {
    let parties = state.engine.parties();
    let criteria = query::criteria(&filter, parties)?;
    let today = state.today();
    let snapshot = state.engine.snapshot();
    let records = filter_records(snapshot.records(), &criteria, parties, today);
    let summary = summarize(&records, parties, today, state.trend_days);
    Ok(Json(summary_view(&summary, parties)))
}

/// Category totals, largest first.
pub async fn categories(
    State(state): State<ServerState>,
    Query(filter): Query<FilterQuery>,
    Query(top): Query<TopCategories>,
) -> Result<Json<Vec<CategoryTotalView>>, ServerError> {
    let parties = state.engine.parties();
    let criteria = query::criteria(&filter, parties)?;
    let snapshot = state.engine.snapshot();
    let records = filter_records(snapshot.records(), &criteria, parties, state.today());
    let totals = top_categories(by_category(records), top.limit);
    Ok(Json(totals.iter().map(category_total_view).collect()))
}

pub async fn insights(
    State(state): State<ServerState>,
    Query(filter): Query<FilterQuery>,
) -> Result<Json<InsightsResponse>, ServerError> {
    let parties = state.engine.parties();
    let criteria = query::criteria(&filter, parties)?;
    let today = state.today();
    let snapshot = state.engine.snapshot();
    let records = filter_records(snapshot.records(), &criteria, parties, today);
    Ok(Json(InsightsResponse {
        insights: engine::insights(records, today)
            .as_ref()
            .map(insights_view),
    }))
}
