use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, header},
    response::{IntoResponse, Response},
};

use crate::api::AppState;
use crate::api::response::{ApiError, ok_response, read_json_object_or_empty};
use crate::services::{PricingViewInput, RequestMeta};

/// POST /api/analytics/pricing-view
pub async fn handle_pricing_view(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Body,
) -> Response {
    let payload = read_json_object_or_empty(body).await;

    let Some(input) = PricingViewInput::from_payload(&payload) else {
        return ApiError::MissingFields.into_response();
    };

    state.analytics.record_pricing_view(input, request_meta(&headers)).await;
    ok_response()
}

/// Header values that are not valid UTF-8 are recorded as absent.
pub fn request_meta(headers: &HeaderMap) -> RequestMeta {
    let get = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    RequestMeta {
        user_agent: get(header::USER_AGENT),
        referer: get(header::REFERER),
    }
}
