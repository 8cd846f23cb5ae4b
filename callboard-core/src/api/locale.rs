use axum::{
    Json,
    body::Body,
    extract::State,
    http::{HeaderMap, HeaderValue, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::{debug, error};

use crate::api::AppState;
use crate::api::response::{ApiError, ok_response, read_json_object_or_empty};

/// POST /api/locale
pub async fn handle_set_locale(State(state): State<AppState>, body: Body) -> Response {
    let payload = read_json_object_or_empty(body).await;

    let Some(selection) = state.locale.select(&payload) else {
        return ApiError::InvalidLocale.into_response();
    };

    let cookie = state.locale.cookie_header(&selection);
    let mut response = ok_response();
    match HeaderValue::from_str(&cookie) {
        Ok(value) => {
            response.headers_mut().insert(header::SET_COOKIE, value);
            debug!("Locale set to {}", selection.locale);
        }
        // Locale codes and cookie name are validated as cookie tokens at startup.
        Err(e) => error!("Could not encode locale cookie '{}': {}", cookie, e),
    }
    response
}

/// GET /api/locale
pub async fn handle_get_locale(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let cookie_header = headers.get(header::COOKIE).and_then(|v| v.to_str().ok());
    let locale = state.locale.resolve(cookie_header);
    Json(json!({ "locale": locale })).into_response()
}
