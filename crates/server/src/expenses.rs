//! Expense API endpoints

use api_types::{
    FilterQuery,
    expense::{ExpenseCreated, ExpenseDelete, ExpenseListResponse, ExpenseNew},
    lines::LinesResponse,
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use engine::{ExpenseInput, MoneyCents, RecordKey, attribute, filter_lines, filter_records};

use crate::{
    ServerError, query,
    server::ServerState,
    views::{expense_view, line_view},
};

fn expense_input(payload: ExpenseNew) -> Result<ExpenseInput, ServerError> {
    let amount = query::amount(payload.amount_minor, payload.amount.as_deref())?
        .ok_or_else(|| ServerError::Generic("amount is required".to_string()))?;
    Ok(ExpenseInput {
        kind: query::kind(payload.kind),
        payer: payload.payer,
        category: query::category(&payload.category)?,
        amount,
        date: payload.date,
        note: payload.note,
        custom_split: payload.split_minor.map(MoneyCents::new),
    })
}

/// Records matching the filter, newest first.
pub async fn list(
    State(state): State<ServerState>,
    Query(filter): Query<FilterQuery>,
) -> Result<Json<ExpenseListResponse>, ServerError> {
    let parties = state.engine.parties();
    let criteria = query::criteria(&filter, parties)?;
    let snapshot = state.engine.snapshot();
    let records = filter_records(snapshot.records(), &criteria, parties, state.today());

    Ok(Json(ExpenseListResponse {
        total_minor: records
            .iter()
            .filter(|r| !r.expense.is_settlement())
            .map(|r| r.expense.amount)
            .sum::<MoneyCents>()
            .cents(),
        expenses: records.into_iter().map(expense_view).collect(),
    }))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ExpenseNew>,
) -> Result<(StatusCode, Json<ExpenseCreated>), ServerError> {
    let input = expense_input(payload)?;
    let key = state.engine.add_expense(input, state.now()).await?;
    Ok((
        StatusCode::CREATED,
        Json(ExpenseCreated {
            key: key.to_string(),
        }),
    ))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(key): Path<String>,
    Json(payload): Json<ExpenseNew>,
) -> Result<StatusCode, ServerError> {
    let input = expense_input(payload)?;
    state
        .engine
        .edit_expense(&RecordKey::from(key), input, state.now())
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Deletes a record. The caller must pass `confirm=true`.
pub async fn delete(
    State(state): State<ServerState>,
    Path(key): Path<String>,
    Query(confirmation): Query<ExpenseDelete>,
) -> Result<StatusCode, ServerError> {
    if confirmation.confirm != Some(true) {
        return Err(ServerError::Generic(
            "deleting requires confirm=true".to_string(),
        ));
    }
    state.engine.delete_expense(&RecordKey::from(key)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Attributed lines matching the filter. Without a party filter each
/// record appears once, as its payer line.
pub async fn lines(
    State(state): State<ServerState>,
    Query(filter): Query<FilterQuery>,
) -> Result<Json<LinesResponse>, ServerError> {
    let parties = state.engine.parties();
    let criteria = query::criteria(&filter, parties)?;
    let snapshot = state.engine.snapshot();
    let attribution = attribute(snapshot.records(), parties);
    let lines = filter_lines(&attribution.lines, &criteria, state.today());

    Ok(Json(LinesResponse {
        lines: lines.iter().map(|line| line_view(line, parties)).collect(),
        unattributed: attribution
            .unattributed
            .iter()
            .map(|record| record.key.to_string())
            .collect(),
    }))
}
