pub mod health;
pub mod stats;
pub mod votes;

use axum::extract::{Request, State};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::Router;
use tower_http::services::ServeDir;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::error::ApiError;
use crate::AppState;

/// Build the full application router.
///
/// Data routes are gated on the store being connected; `/health`, the API
/// docs and static files are always served.
pub fn router(state: AppState) -> Router {
    let data = Router::new()
        .merge(stats::router())
        .merge(votes::router())
        .route_layer(middleware::from_fn_with_state(state.clone(), require_store));

    Router::new()
        .merge(health::router())
        .merge(data)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .fallback_service(ServeDir::new(&state.config.public_dir))
        .with_state(state)
}

/// Refuse requests with 503 until the database handle is installed.
async fn require_store(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if !state.store.is_ready() {
        tracing::warn!(uri = %request.uri(), "request refused, database not connected");
        return Err(ApiError::service_unavailable("Database is not connected yet"));
    }
    Ok(next.run(request).await)
}

#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health,
        // Stats
        stats::list_prizes,
        stats::age_extremes,
        stats::prizes_at_least,
        stats::prize_totals,
        stats::audience,
        // Votes
        votes::vote,
        votes::list_votes,
    ),
    components(
        schemas(
            // Error types
            crate::error::ApiErrorBody,
            crate::error::ApiErrorDetail,
            crate::error::FieldError,
            // Models
            crate::models::show::Show,
            crate::models::show::Participant,
            // Views
            crate::services::queries::PrizeSummary,
            crate::services::queries::ParticipantPrizes,
            crate::services::queries::AgeExtremes,
            crate::services::queries::PrizeAtLeast,
            crate::services::queries::ShowPrizeTotal,
            crate::services::queries::BroadcasterAudience,
            crate::services::votes::VoteTally,
            // Route request/response types
            health::HealthResponse,
            votes::VoteRequest,
            votes::VoteResponse,
        )
    ),
    tags(
        (name = "Health", description = "Health check"),
        (name = "Stats", description = "Prize and audience statistics"),
        (name = "Votes", description = "Voting"),
    )
)]
pub struct ApiDoc;
