use axum::{
    Router,
    extract::{Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    routing::{get, patch, post},
};
use axum_extra::{
    TypedHeader,
    headers::{Error as AxumError, Header},
};
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

use std::sync::Arc;

use crate::{expenses, reports, settlements};
use engine::{Engine, Party};

static IDENTITY_HEADER: axum::http::HeaderName =
    axum::http::HeaderName::from_static("x-auth-request-email");

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
    /// Zone used to turn the current instant into the user's "today".
    pub timezone: Tz,
    /// Length of the daily series in `/summary`.
    pub trend_days: u32,
    pub clock: fn() -> DateTime<Utc>,
}

impl ServerState {
    pub fn new(engine: Engine, timezone: Tz, trend_days: u32) -> Self {
        Self {
            engine: Arc::new(engine),
            timezone,
            trend_days,
            clock: Utc::now,
        }
    }

    pub(crate) fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }

    pub(crate) fn today(&self) -> NaiveDate {
        self.now().with_timezone(&self.timezone).date_naive()
    }
}

/// Party behind the current request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Actor(pub Party);

/// `TypedHeader` for the identity forwarded by the OAuth proxy
///
/// Requests must contain the signed-in email in "x-auth-request-email".
#[derive(Debug)]
struct IdentityHeader(String);

impl Header for IdentityHeader {
    fn name() -> &'static axum::http::HeaderName {
        &IDENTITY_HEADER
    }

    fn decode<'i, I>(values: &mut I) -> Result<Self, AxumError>
    where
        Self: Sized,
        I: Iterator<Item = &'i axum::http::HeaderValue>,
    {
        let value = values.next().ok_or_else(AxumError::invalid)?;
        let Ok(value) = value.to_str() else {
            return Err(AxumError::invalid());
        };

        Ok(IdentityHeader(value.to_string()))
    }

    fn encode<E: Extend<axum::http::HeaderValue>>(&self, values: &mut E) {
        match axum::http::HeaderValue::from_str(&self.0) {
            Ok(value) => values.extend(std::iter::once(value)),
            Err(_) => tracing::error!("failed to encode x-auth-request-email header"),
        }
    }
}

async fn auth(
    identity: Option<TypedHeader<IdentityHeader>>,
    State(state): State<ServerState>,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let email = identity.as_ref().map(|header| header.0.0.as_str());
    let party = match state.engine.party_for_identity(email) {
        Ok(party) => party,
        Err(err) => {
            tracing::warn!("rejected request: {err}");
            return Err(StatusCode::UNAUTHORIZED);
        }
    };

    request.extensions_mut().insert(Actor(party));
    Ok(next.run(request).await)
}

pub fn router(state: ServerState) -> Router {
    Router::new()
        .route(
            "/expenses",
            get(expenses::list).post(expenses::create),
        )
        .route(
            "/expenses/{key}",
            patch(expenses::update).delete(expenses::delete),
        )
        .route("/lines", get(expenses::lines))
        .route("/balance", get(reports::balance))
        .route("/summary", get(reports::summary))
        .route("/categories", get(reports::categories))
        .route("/insights", get(reports::insights))
        .route(
            "/settlements",
            get(settlements::history).post(settlements::commit),
        )
        .route("/settlements/proposal", post(settlements::propose))
        .route("/settlements/{key}", patch(settlements::update))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth))
        .with_state(state)
}

pub async fn run_with_listener(
    state: ServerState,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router(state)).await
}
