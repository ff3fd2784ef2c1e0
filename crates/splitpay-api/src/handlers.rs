//! Route handlers. Each one locks a single session, applies one wizard operation
//! and answers with the resulting snapshot.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::AppState;
use crate::error::ApiResult;
use crate::types::{
    AmountRequest, CommitFieldRequest, ConfirmResponse, CreateSessionRequest,
    CreateSessionResponse, EditFieldRequest, HealthResponse, SelectionRequest, SessionSnapshot,
};

type SharedState = State<Arc<AppState>>;

pub async fn health(State(state): SharedState) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        active_sessions: state.active_sessions(),
        uptime_seconds: state.elapsed().as_secs(),
    })
}

#[instrument(skip_all, fields(contacts = request.contacts.len()))]
pub async fn create_session(
    State(state): SharedState,
    Json(request): Json<CreateSessionRequest>,
) -> ApiResult<(StatusCode, Json<CreateSessionResponse>)> {
    let session_id = state.create_session(request.contacts)?;
    let session = state.with_session(session_id, |wizard| Ok(SessionSnapshot::from_wizard(wizard)))?;
    Ok((StatusCode::CREATED, Json(CreateSessionResponse { session_id, session })))
}

pub async fn get_session(
    State(state): SharedState,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<SessionSnapshot>> {
    state.with_session(id, |wizard| Ok(Json(SessionSnapshot::from_wizard(wizard))))
}

pub async fn delete_session(
    State(state): SharedState,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state.remove_session(id)?;
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state, request), fields(selected = request.contact_ids.len()))]
pub async fn update_selection(
    State(state): SharedState,
    Path(id): Path<Uuid>,
    Json(request): Json<SelectionRequest>,
) -> ApiResult<Json<SessionSnapshot>> {
    state.with_session(id, |wizard| {
        wizard.contacts_mut().replace(&request.contact_ids)?;
        Ok(Json(SessionSnapshot::from_wizard(wizard)))
    })
}

#[instrument(skip(state, request))]
pub async fn update_amount(
    State(state): SharedState,
    Path(id): Path<Uuid>,
    Json(request): Json<AmountRequest>,
) -> ApiResult<Json<SessionSnapshot>> {
    state.with_session(id, |wizard| {
        let amount = wizard.amount_mut();
        amount.set_base(request.base);
        amount.choose_tip(request.tip);
        debug!(total = ?amount.total(), "Amount updated");
        Ok(Json(SessionSnapshot::from_wizard(wizard)))
    })
}

#[instrument(skip(state))]
pub async fn next_step(
    State(state): SharedState,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<SessionSnapshot>> {
    state.with_session(id, |wizard| {
        wizard.next()?;
        Ok(Json(SessionSnapshot::from_wizard(wizard)))
    })
}

#[instrument(skip(state))]
pub async fn previous_step(
    State(state): SharedState,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<SessionSnapshot>> {
    state.with_session(id, |wizard| {
        wizard.back()?;
        Ok(Json(SessionSnapshot::from_wizard(wizard)))
    })
}

#[instrument(skip(state, request), fields(field = %request.field))]
pub async fn edit_field(
    State(state): SharedState,
    Path((id, participant_id)): Path<(Uuid, String)>,
    Json(request): Json<EditFieldRequest>,
) -> ApiResult<Json<SessionSnapshot>> {
    state.with_session(id, |wizard| {
        wizard.edit_field(&participant_id, request.field, &request.text)?;
        Ok(Json(SessionSnapshot::from_wizard(wizard)))
    })
}

#[instrument(skip(state, request), fields(field = %request.field))]
pub async fn commit_field(
    State(state): SharedState,
    Path((id, participant_id)): Path<(Uuid, String)>,
    Json(request): Json<CommitFieldRequest>,
) -> ApiResult<Json<SessionSnapshot>> {
    state.with_session(id, |wizard| {
        wizard.commit_field(&participant_id, request.field)?;
        Ok(Json(SessionSnapshot::from_wizard(wizard)))
    })
}

#[instrument(skip(state))]
pub async fn reset_to_equal(
    State(state): SharedState,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<SessionSnapshot>> {
    state.with_session(id, |wizard| {
        wizard.reset_to_equal()?;
        Ok(Json(SessionSnapshot::from_wizard(wizard)))
    })
}

#[instrument(skip(state))]
pub async fn confirm(
    State(state): SharedState,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ConfirmResponse>> {
    state.with_session(id, |wizard| {
        let allocations = wizard.confirm()?;
        Ok(Json(ConfirmResponse { total: wizard.engine().total(), allocations }))
    })
}
