use axum::{
    extract::{Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde_json::{json, Value};

use crate::{
    error::AppResult,
    middleware::request_id::RequestId,
    models::{ComparisonRequest, ComparisonResult},
    services::compare_watchlists,
};

use super::AppState;

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Compare the watchlists of the users named in `?users=`
pub async fn compare(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(request): Query<ComparisonRequest>,
) -> AppResult<Json<ComparisonResult>> {
    tracing::info!(
        request_id = %request_id,
        users = %request.users,
        "Processing comparison request"
    );

    let result = compare_watchlists(&state, &request.users).await?;

    tracing::info!(
        request_id = %request_id,
        shared = result.movies.len(),
        "Comparison completed"
    );

    Ok(Json(result))
}
