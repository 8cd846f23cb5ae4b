use axum::{
    Json,
    body::Body,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{json, Value};
use tracing::error;

use crate::api::AppState;
use crate::api::response::{ApiError, read_body};
use crate::services::campaign_service::campaign_trigger_from_payload;

/// POST /api/campaign/start
///
/// Admission only: the runner is started on a detached task and this
/// returns before it resolves.
pub async fn handle_campaign_start(State(state): State<AppState>, body: Body) -> Response {
    let body = match read_body(body).await {
        Ok(bytes) => bytes,
        Err(e) => {
            error!("Failed to read campaign start request: {}", e);
            return ApiError::CampaignServerError(e.to_string()).into_response();
        }
    };

    let payload: Value = match serde_json::from_slice(&body) {
        Ok(v) => v,
        Err(e) => {
            error!("Failed to parse campaign start request: {}", e);
            return ApiError::CampaignServerError(e.to_string()).into_response();
        }
    };

    let Some(trigger) = campaign_trigger_from_payload(&payload) else {
        return ApiError::MissingCampaignId.into_response();
    };

    // Dropping the handle detaches the task.
    let _ = state.campaigns.dispatch(trigger);

    (
        StatusCode::OK,
        Json(json!({ "success": true, "message": "Campagne lancée" })),
    )
        .into_response()
}
