//! Voting endpoints.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{ApiError, ApiErrorBody, FieldError};
use crate::services::votes::{self, VoteTally};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/votar", post(vote))
        .route("/votos/{reality}", get(list_votes))
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct VoteRequest {
    pub reality: Option<String>,
    pub participante: Option<String>,
}

impl VoteRequest {
    /// Both fields must be present and non-blank.
    fn into_parts(self) -> Result<(String, String), ApiError> {
        let mut errors = Vec::new();
        let reality = present(self.reality, "reality", &mut errors);
        let participante = present(self.participante, "participante", &mut errors);

        match (reality, participante) {
            (Some(r), Some(p)) if errors.is_empty() => Ok((r, p)),
            _ => Err(ApiError::validation(errors)),
        }
    }
}

fn present(value: Option<String>, field: &str, errors: &mut Vec<FieldError>) -> Option<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Some(v),
        _ => {
            errors.push(FieldError {
                field: field.to_string(),
                message: format!("{field} is required"),
            });
            None
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VoteResponse {
    pub ok: bool,
}

// ---------------------------------------------------------------------------
// POST /votar
// ---------------------------------------------------------------------------

#[utoipa::path(
    post,
    path = "/votar",
    tag = "Votes",
    request_body = VoteRequest,
    responses(
        (status = 200, description = "Vote registered", body = VoteResponse),
        (status = 400, description = "Missing show or participant", body = ApiErrorBody),
        (status = 404, description = "Show not found", body = ApiErrorBody),
        (status = 500, description = "Vote could not be stored", body = ApiErrorBody),
    ),
)]
pub async fn vote(
    State(state): State<AppState>,
    body: Result<Json<VoteRequest>, JsonRejection>,
) -> Result<Json<VoteResponse>, ApiError> {
    let Json(body) = body.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;
    let (reality, participante) = body.into_parts()?;
    let store = state.store()?;

    votes::register_vote(store.as_ref(), &state.snowflake, &reality, &participante).await?;

    Ok(Json(VoteResponse { ok: true }))
}

// ---------------------------------------------------------------------------
// GET /votos/:reality
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/votos/{reality}",
    tag = "Votes",
    params(("reality" = String, Path, description = "Exact show name")),
    responses(
        (status = 200, description = "Vote count per participant", body = [VoteTally]),
        (status = 404, description = "Show not found", body = ApiErrorBody),
    ),
)]
pub async fn list_votes(
    State(state): State<AppState>,
    Path(reality): Path<String>,
) -> Result<Json<Vec<VoteTally>>, ApiError> {
    let store = state.store()?;
    Ok(Json(votes::get_votes(store.as_ref(), &reality).await?))
}
