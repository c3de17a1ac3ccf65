use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::client::api::{ApiEnvelope, FetchedCv, UserIdPayload};
use crate::errors::AppError;
use crate::models::CvFormData;
use crate::state::AppState;
use crate::submission::AssemblySources;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

type UserIdResponse = Json<ApiEnvelope<UserIdPayload>>;

/// A missing or malformed `userId` is a client error, reported in the
/// API's error envelope.
fn user_id(query: Result<Query<UserIdQuery>, QueryRejection>) -> Result<Uuid, AppError> {
    query
        .map(|Query(params)| params.user_id)
        .map_err(|e| AppError::BadRequest(e.body_text()))
}

/// Normalizes and validates an incoming CV against the full schema.
async fn accept(state: &AppState, cv: CvFormData) -> Result<CvFormData, AppError> {
    let sources = AssemblySources {
        form: cv,
        ..Default::default()
    };
    state
        .assembler
        .assemble(&sources)
        .await
        .map_err(AppError::Validation)
}

/// POST /api/cvgen/submitCV
pub async fn handle_submit_cv(
    State(state): State<AppState>,
    Json(cv): Json<CvFormData>,
) -> Result<(StatusCode, UserIdResponse), AppError> {
    let cv = accept(&state, cv).await?;
    let user_id = state.repo.create(&cv).await?;
    info!(%user_id, "CV created");
    Ok((
        StatusCode::CREATED,
        Json(ApiEnvelope { data: UserIdPayload { user_id } }),
    ))
}

/// PUT /api/cvgen/updateCV?userId=
pub async fn handle_update_cv(
    State(state): State<AppState>,
    query: Result<Query<UserIdQuery>, QueryRejection>,
    Json(cv): Json<CvFormData>,
) -> Result<UserIdResponse, AppError> {
    let user_id = user_id(query)?;
    let cv = accept(&state, cv).await?;
    if !state.repo.update(user_id, &cv).await? {
        return Err(AppError::NotFound(format!("CV {user_id} not found")));
    }
    info!(%user_id, "CV updated");
    Ok(Json(ApiEnvelope {
        data: UserIdPayload { user_id },
    }))
}

/// GET /api/cvedit/fetchCV?userId=
pub async fn handle_fetch_cv(
    State(state): State<AppState>,
    query: Result<Query<UserIdQuery>, QueryRejection>,
) -> Result<Json<ApiEnvelope<FetchedCv>>, AppError> {
    let user_id = user_id(query)?;
    let cv = state
        .repo
        .fetch(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("CV {user_id} not found")))?;
    Ok(Json(ApiEnvelope {
        data: FetchedCv { user_id, cv },
    }))
}
