//! Settlement API endpoints

use api_types::settlement::{
    SettlementCreated, SettlementDraftView, SettlementHistory, SettlementNew, SettlementUpdate,
};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::{
    MoneyCents, RecordKey, SettlementDraft, SettlementEdit, list_settlements, total_settled,
};

use crate::{
    ServerError, query,
    server::{Actor, ServerState},
    views::expense_view,
};

/// Every recorded settlement, newest first, with their total.
pub async fn history(
    State(state): State<ServerState>,
) -> Result<Json<SettlementHistory>, ServerError> {
    let snapshot = state.engine.snapshot();
    let settlements = list_settlements(snapshot.records());
    Ok(Json(SettlementHistory {
        total_minor: total_settled(settlements.iter().copied()).cents(),
        settlements: settlements.into_iter().map(expense_view).collect(),
    }))
}

/// Drafts the settlement that clears the full-history balance.
pub async fn propose(
    State(state): State<ServerState>,
) -> Result<Json<SettlementDraftView>, ServerError> {
    let draft = state
        .engine
        .propose_settlement(state.today())
        .ok_or_else(|| ServerError::Conflict("nothing to settle".to_string()))?;
    let parties = state.engine.parties();

    Ok(Json(SettlementDraftView {
        paid_by: parties.name(draft.paid_by).to_string(),
        paid_to: parties.name(draft.paid_to).to_string(),
        amount_minor: draft.amount.cents(),
        date: draft.date,
        note: draft.note,
    }))
}

/// Records a settlement the user confirmed.
pub async fn commit(
    Extension(Actor(actor)): Extension<Actor>,
    State(state): State<ServerState>,
    Json(payload): Json<SettlementNew>,
) -> Result<(StatusCode, Json<SettlementCreated>), ServerError> {
    if !payload.confirm {
        return Err(ServerError::Generic(
            "settlement must be confirmed".to_string(),
        ));
    }
    let parties = state.engine.parties();
    let draft = SettlementDraft {
        paid_by: query::party(parties, &payload.paid_by)?,
        paid_to: query::party(parties, &payload.paid_to)?,
        amount: MoneyCents::new(payload.amount_minor),
        date: payload.date,
        note: payload.note,
    };

    let key = state
        .engine
        .commit_settlement(draft.confirm(), actor, state.now())
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(SettlementCreated {
            key: key.to_string(),
        }),
    ))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(key): Path<String>,
    Json(payload): Json<SettlementUpdate>,
) -> Result<StatusCode, ServerError> {
    let paid_by = match payload.paid_by.as_deref() {
        Some(name) => Some(query::party(state.engine.parties(), name)?),
        None => None,
    };
    let edit = SettlementEdit {
        amount: query::amount(payload.amount_minor, payload.amount.as_deref())?,
        date: payload.date,
        note: payload.note,
        paid_by,
    };

    state
        .engine
        .edit_settlement(&RecordKey::from(key), edit, state.now())
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
