use std::any::Any;
use axum::{
    Json,
    body::{Body, Bytes},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{json, Value};
use tracing::{debug, error};

/// Generic message when a campaign error carries no text of its own.
pub const CAMPAIGN_INTERNAL_ERROR: &str = "Erreur interne";

/// Largest request body the JSON endpoints buffer.
pub const MAX_JSON_BODY_BYTES: usize = 1024 * 1024;

/// Every non-success reply the API can give, with its wire body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// 400 `{ok:false, error:"missing_fields"}`
    MissingFields,
    /// 500 `{ok:false, error:"server_error"}`
    AnalyticsServerError,
    /// 400 `{error:"campaign_id requis"}`
    MissingCampaignId,
    /// 500 `{error:<message>}`
    CampaignServerError(String),
    /// 400 `{ok:false, error:"invalid_locale"}`
    InvalidLocale,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingFields | ApiError::MissingCampaignId | ApiError::InvalidLocale => {
                StatusCode::BAD_REQUEST
            }
            ApiError::AnalyticsServerError | ApiError::CampaignServerError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn body(&self) -> Value {
        match self {
            ApiError::MissingFields => json!({ "ok": false, "error": "missing_fields" }),
            ApiError::AnalyticsServerError => json!({ "ok": false, "error": "server_error" }),
            ApiError::MissingCampaignId => json!({ "error": "campaign_id requis" }),
            ApiError::CampaignServerError(msg) if msg.is_empty() => {
                json!({ "error": CAMPAIGN_INTERNAL_ERROR })
            }
            ApiError::CampaignServerError(msg) => json!({ "error": msg }),
            ApiError::InvalidLocale => json!({ "ok": false, "error": "invalid_locale" }),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.body())).into_response()
    }
}

/// `{ok:true}`
pub fn ok_response() -> Response {
    (StatusCode::OK, Json(json!({ "ok": true }))).into_response()
}

/// Lenient body parsing: anything that is not a JSON object becomes `{}`.
pub fn json_object_or_empty(body: &[u8]) -> Value {
    match serde_json::from_slice::<Value>(body) {
        Ok(v @ Value::Object(_)) => v,
        _ => Value::Object(Default::default()),
    }
}

/// Buffer at most [`MAX_JSON_BODY_BYTES`] of a request body.
pub async fn read_body(body: Body) -> Result<Bytes, axum::Error> {
    axum::body::to_bytes(body, MAX_JSON_BODY_BYTES).await
}

/// [`read_body`] then [`json_object_or_empty`]. A body that is too large or
/// breaks off mid-stream is treated like any other unusable body.
pub async fn read_json_object_or_empty(body: Body) -> Value {
    match read_body(body).await {
        Ok(bytes) => json_object_or_empty(&bytes),
        Err(e) => {
            debug!("Discarding unreadable request body: {}", e);
            Value::Object(Default::default())
        }
    }
}

fn panic_message(err: &(dyn Any + Send)) -> &str {
    if let Some(s) = err.downcast_ref::<String>() {
        s
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic"
    }
}

/// Reply for a panic while serving the analytics or locale routes.
pub fn server_error_on_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    error!("Request handler panicked: {}", panic_message(&*err));
    ApiError::AnalyticsServerError.into_response()
}

/// Reply for a panic while admitting a campaign start.
pub fn campaign_error_on_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    error!("Campaign start handler panicked: {}", panic_message(&*err));
    ApiError::CampaignServerError(String::new()).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::MissingFields.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::InvalidLocale.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::MissingCampaignId.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::AnalyticsServerError.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            ApiError::CampaignServerError("x".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_campaign_error_message_fallback() {
        assert_eq!(
            ApiError::CampaignServerError(String::new()).body(),
            json!({ "error": "Erreur interne" })
        );
        assert_eq!(
            ApiError::CampaignServerError("boom".into()).body(),
            json!({ "error": "boom" })
        );
    }

    #[test]
    fn test_json_object_or_empty() {
        assert_eq!(json_object_or_empty(b"{\"a\":1}"), json!({"a": 1}));
        assert_eq!(json_object_or_empty(b""), json!({}));
        assert_eq!(json_object_or_empty(b"{oops"), json!({}));
        assert_eq!(json_object_or_empty(b"[1,2]"), json!({}));
        assert_eq!(json_object_or_empty(b"null"), json!({}));
    }

    #[tokio::test]
    async fn test_oversized_body_reads_as_empty_object() {
        let mut big = b"{\"locale\":\"fr\",\"pad\":\"".to_vec();
        big.resize(MAX_JSON_BODY_BYTES + 16, b'x');
        big.extend_from_slice(b"\"}");
        assert!(read_body(Body::from(big.clone())).await.is_err());
        assert_eq!(read_json_object_or_empty(Body::from(big)).await, json!({}));

        let small = Body::from("{\"locale\":\"fr\"}");
        assert_eq!(read_json_object_or_empty(small).await, json!({"locale": "fr"}));
    }

    async fn body_json(resp: Response) -> Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_panic_replies_use_endpoint_bodies() {
        let resp = server_error_on_panic(Box::new("boom"));
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(resp).await, json!({ "ok": false, "error": "server_error" }));

        let resp = campaign_error_on_panic(Box::new(String::from("boom")));
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(resp).await, json!({ "error": "Erreur interne" }));
    }

    #[test]
    fn test_panic_message_payloads() {
        let owned: Box<dyn Any + Send> = Box::new(String::from("boom"));
        let literal: Box<dyn Any + Send> = Box::new("bang");
        let other: Box<dyn Any + Send> = Box::new(7_u8);
        assert_eq!(panic_message(&*owned), "boom");
        assert_eq!(panic_message(&*literal), "bang");
        assert_eq!(panic_message(&*other), "unknown panic");
    }
}
