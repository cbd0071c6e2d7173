use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::EngineError;

use serde::Serialize;
pub use server::{Actor, ServerState, router, run_with_listener};

mod expenses;
mod query;
mod reports;
mod server;
mod settlements;
mod views;

pub mod types {
    pub mod expense {
        pub use api_types::expense::{ExpenseCreated, ExpenseListResponse, ExpenseNew, ExpenseView};
        pub use api_types::lines::{LineView, LinesResponse};
    }

    pub mod report {
        pub use api_types::balance::{BalanceStatus, BalanceView};
        pub use api_types::insights::{InsightsResponse, InsightsView};
        pub use api_types::summary::{CategoryTotalView, SummaryView};
    }

    pub mod settlement {
        pub use api_types::settlement::{
            SettlementCreated, SettlementDraftView, SettlementHistory, SettlementNew,
            SettlementUpdate,
        };
    }
}

pub enum ServerError {
    Engine(EngineError),
    /// Request is well formed but conflicts with the ledger state.
    Conflict(String),
    Generic(String),
}

#[derive(Serialize)]
struct Error {
    error: String,
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::KeyNotFound(_) => StatusCode::NOT_FOUND,
        EngineError::WrongKind(_) => StatusCode::CONFLICT,
        EngineError::Database(_) | EngineError::Incomplete(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        EngineError::InvalidAmount(_)
        | EngineError::InvalidSplit(_)
        | EngineError::InvalidParty(_)
        | EngineError::InvalidSettlement(_)
        | EngineError::InvalidPeriod(_)
        | EngineError::InvalidRecord(_) => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            "internal server error".to_string()
        }
        EngineError::Incomplete(reason) => {
            tracing::error!("engine misconfigured: {reason}");
            "internal server error".to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::Engine(err) => (status_for_engine_error(&err), message_for_engine_error(err)),
            ServerError::Conflict(err) => (StatusCode::CONFLICT, err),
            ServerError::Generic(err) => (StatusCode::BAD_REQUEST, err),
        };

        (status, Json(Error { error })).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_not_found_maps_to_404() {
        let res = ServerError::from(EngineError::KeyNotFound("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn engine_wrong_kind_maps_to_409() {
        let res = ServerError::from(EngineError::WrongKind("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn engine_validation_maps_to_422() {
        for err in [
            EngineError::InvalidAmount("x".to_string()),
            EngineError::InvalidSplit("x".to_string()),
            EngineError::InvalidParty("x".to_string()),
            EngineError::InvalidPeriod("x".to_string()),
        ] {
            let res = ServerError::from(err).into_response();
            assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
        }
    }

    #[test]
    fn database_error_is_not_leaked() {
        let err = EngineError::Database(sea_orm::DbErr::Custom("disk full".to_string()));
        let res = ServerError::from(err).into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn conflict_maps_to_409() {
        let res = ServerError::Conflict("settled".to_string()).into_response();
        assert_eq!(res.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn generic_maps_to_400() {
        let res = ServerError::Generic("bad".to_string()).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
