/*
 * Responsibility
 * - アプリ共通の AppError 定義
 * - IntoResponse 実装 (HTTP status / JSON error body)
 * - AuthError は reason を hint に載せて 401 access_denied に集約する
 */
use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::services::auth::AuthError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("access denied: {0}")]
    AccessDenied(#[from] AuthError),
    #[error("not found")]
    NotFound,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, hint) = match self {
            AppError::AccessDenied(reason) => (
                StatusCode::UNAUTHORIZED,
                "ACCESS_DENIED",
                "The resource owner or authorization server denied the request.".to_string(),
                Some(reason.to_string()),
            ),
            AppError::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND", "not found".into(), None),
        };

        let body = ErrorResponse {
            error: ErrorBody {
                code,
                message,
                hint,
            },
        };

        let mut response = (status, Json(body)).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response.headers_mut().insert(
                header::WWW_AUTHENTICATE,
                HeaderValue::from_static("Bearer error=\"access_denied\""),
            );
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn access_denied_is_401_with_reason_as_hint() {
        let response = AppError::from(AuthError::Revoked {
            jti: "abc".to_string(),
        })
        .into_response();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers()[header::WWW_AUTHENTICATE],
            "Bearer error=\"access_denied\""
        );

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(json["error"]["code"], "ACCESS_DENIED");
        assert_eq!(json["error"]["hint"], "Access token has been revoked");
    }

    #[tokio::test]
    async fn not_found_has_no_hint_or_challenge() {
        let response = AppError::NotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(!response.headers().contains_key(header::WWW_AUTHENTICATE));

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert!(json["error"].get("hint").is_none());
    }
}
