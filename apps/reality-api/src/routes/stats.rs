//! Read-only statistics endpoints.

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};

use crate::error::{ApiError, ApiErrorBody};
use crate::services::queries::{
    self, AgeExtremes, BroadcasterAudience, PrizeAtLeast, PrizeSummary, ShowPrizeTotal,
};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/premios", get(list_prizes))
        .route("/idade/{nome_reality}", get(age_extremes))
        .route("/maior/{valor}", get(prizes_at_least))
        .route("/total", get(prize_totals))
        .route("/audiencia", get(audience))
}

// ---------------------------------------------------------------------------
// GET /premios
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/premios",
    tag = "Stats",
    responses(
        (status = 200, description = "Prizes of every participant, per show", body = [PrizeSummary]),
        (status = 503, description = "Database not connected", body = ApiErrorBody),
    ),
)]
pub async fn list_prizes(State(state): State<AppState>) -> Result<Json<Vec<PrizeSummary>>, ApiError> {
    let store = state.store()?;
    Ok(Json(queries::list_prize_summary(store.as_ref()).await?))
}

// ---------------------------------------------------------------------------
// GET /idade/:nome_reality
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/idade/{nome_reality}",
    tag = "Stats",
    params(("nome_reality" = String, Path, description = "Exact show name")),
    responses(
        (status = 200, description = "Youngest and oldest participant", body = AgeExtremes),
        (status = 404, description = "Show not found", body = ApiErrorBody),
    ),
)]
pub async fn age_extremes(
    State(state): State<AppState>,
    Path(nome_reality): Path<String>,
) -> Result<Json<AgeExtremes>, ApiError> {
    let store = state.store()?;
    Ok(Json(queries::find_age_extremes(store.as_ref(), &nome_reality).await?))
}

// ---------------------------------------------------------------------------
// GET /maior/:valor
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/maior/{valor}",
    tag = "Stats",
    params(("valor" = f64, Path, description = "Minimum prize value, inclusive")),
    responses(
        (status = 200, description = "Prizes at or above the threshold", body = [PrizeAtLeast]),
        (status = 400, description = "Threshold is not a number", body = ApiErrorBody),
    ),
)]
pub async fn prizes_at_least(
    State(state): State<AppState>,
    Path(valor): Path<String>,
) -> Result<Json<Vec<PrizeAtLeast>>, ApiError> {
    let threshold = parse_threshold(&valor)?;
    let store = state.store()?;
    Ok(Json(queries::list_prizes_at_least(store.as_ref(), threshold).await?))
}

fn parse_threshold(raw: &str) -> Result<f64, ApiError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| !v.is_nan())
        .ok_or_else(|| ApiError::bad_request("Threshold must be a number"))
}

// ---------------------------------------------------------------------------
// GET /total
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/total",
    tag = "Stats",
    responses((status = 200, description = "Total prize value per show", body = [ShowPrizeTotal])),
)]
pub async fn prize_totals(State(state): State<AppState>) -> Result<Json<Vec<ShowPrizeTotal>>, ApiError> {
    let store = state.store()?;
    Ok(Json(queries::list_prize_totals(store.as_ref()).await?))
}

// ---------------------------------------------------------------------------
// GET /audiencia
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/audiencia",
    tag = "Stats",
    responses((status = 200, description = "Audience points per broadcaster", body = [BroadcasterAudience])),
)]
pub async fn audience(
    State(state): State<AppState>,
) -> Result<Json<Vec<BroadcasterAudience>>, ApiError> {
    let store = state.store()?;
    Ok(Json(queries::list_audience_by_broadcaster(store.as_ref()).await?))
}
