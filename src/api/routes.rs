//! Route handlers. Translate `EngineError` into HTTP status codes per
//! spec.md §7's user-visible behavior: `NotFound` -> 404, `NoEvidence` ->
//! 400 with a textual hint, `Internal` -> 500.

use axum::extract::{Path, State as AxumState};
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};

use crate::api::AppState;
use crate::error::EngineError;
use crate::scorers::inboxguard::{self, url as inbox_url, TextEvidence};
use crate::scorers::{callguard, identitywatch, moneyguard};
use crate::types::{EventInput, Module, RiskResponse, SessionSummary, SessionView};

fn status_for(err: &EngineError) -> StatusCode {
    match err {
        EngineError::NotFound(_) => StatusCode::NOT_FOUND,
        EngineError::NoEvidence { .. } => StatusCode::BAD_REQUEST,
        EngineError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        EngineError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub async fn health() -> StatusCode {
    StatusCode::OK
}

#[derive(Debug, Deserialize)]
pub struct StartSessionRequest {
    pub user_id: String,
    pub device_id: String,
    pub module: Module,
}

#[derive(Debug, Serialize)]
pub struct StartSessionResponse {
    pub session_id: String,
}

pub async fn start_session(
    AxumState(state): AxumState<AppState>,
    Json(request): Json<StartSessionRequest>,
) -> Json<StartSessionResponse> {
    let session_id = state
        .store
        .start_session(&request.user_id, &request.device_id, request.module);
    Json(StartSessionResponse { session_id })
}

pub async fn append_event(
    AxumState(state): AxumState<AppState>,
    Path(session_id): Path<String>,
    Json(input): Json<EventInput>,
) -> Result<Json<RiskResponse>, StatusCode> {
    state
        .store
        .append_event(&session_id, input)
        .map_err(|e| status_for(&e))?;

    let risk = state
        .dispatcher
        .assess_session(&session_id)
        .map_err(|e| status_for(&e))?;
    Ok(Json(risk))
}

pub async fn end_session(
    AxumState(state): AxumState<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<SessionSummary>, StatusCode> {
    let view = state.store.get_session(&session_id).map_err(|e| status_for(&e))?;
    let last_risk = view.last_risk.ok_or(StatusCode::NOT_FOUND)?;
    let takeaways = last_risk.reasons.into_iter().take(3).collect();
    let summary = state
        .store
        .summarize(&session_id, takeaways)
        .map_err(|e| status_for(&e))?;
    Ok(Json(summary))
}

pub async fn get_session(
    AxumState(state): AxumState<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<SessionView>, StatusCode> {
    let view = state.store.get_session(&session_id).map_err(|e| status_for(&e))?;
    Ok(Json(view))
}

pub async fn callguard_assess(Json(signals): Json<Vec<String>>) -> Json<RiskResponse> {
    Json(callguard::assess(&signals))
}

pub async fn moneyguard_assess(
    Json(evidence): Json<moneyguard::MoneyGuardEvidence>,
) -> Json<RiskResponse> {
    Json(moneyguard::assess(&evidence))
}

pub async fn moneyguard_safe_steps() -> Json<serde_json::Value> {
    Json(moneyguard::safe_steps())
}

#[derive(Debug, Deserialize)]
pub struct InboxTextRequest {
    pub text: String,
    #[serde(default = "default_channel")]
    pub channel: String,
}

fn default_channel() -> String {
    "other".to_string()
}

pub async fn inboxguard_text(Json(request): Json<InboxTextRequest>) -> Json<RiskResponse> {
    Json(inboxguard::analyze_text(&TextEvidence {
        text: &request.text,
        channel: &request.channel,
    }))
}

#[derive(Debug, Deserialize)]
pub struct InboxUrlRequest {
    pub url: String,
}

pub async fn inboxguard_url(Json(request): Json<InboxUrlRequest>) -> Json<RiskResponse> {
    Json(inbox_url::analyze_url(&request.url))
}

pub async fn identitywatch_assess(
    Json(evidence): Json<identitywatch::IdentityWatchEvidence>,
) -> Json<RiskResponse> {
    Json(identitywatch::assess(&evidence))
}

pub async fn retention_policy(
    AxumState(state): AxumState<AppState>,
) -> Json<serde_json::Value> {
    let policy = state.retention_policy;
    Json(serde_json::json!({
        "session_ttl_hours": policy.session_ttl_hours,
        "max_session_age_hours": policy.max_session_age_hours,
        "event_retention_days": policy.event_retention_days,
        "pii_retention_days": policy.pii_retention_days,
    }))
}
