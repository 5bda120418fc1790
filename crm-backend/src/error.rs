// src/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::DbErr;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum AppError {
    /// ストア（DB）障害。リトライはストア層の責務なのでここでは伝播のみ
    #[error("Store unavailable: {0}")]
    StoreUnavailable(#[from] DbErr),

    #[error("Item not found: {0}")]
    NotFound(String),

    /// エンティティは存在するが組織モデルが不完全（ロール未割当・rank未設定など）
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Multiple validation errors")]
    ValidationErrors(Vec<String>),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal server error: {0}")]
    InternalServerError(String),
}

pub type AppResult<T> = Result<T, AppError>;

/// 統一的なエラーレスポンス
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error_type: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type, message, errors) = match self {
            AppError::StoreUnavailable(db_err) => {
                error!(error = ?db_err, "Store operation failed");
                let (status, message) = match db_err {
                    DbErr::RecordNotFound(_) => (
                        StatusCode::NOT_FOUND,
                        "The requested resource was not found",
                    ),
                    DbErr::Conn(_) => (
                        StatusCode::SERVICE_UNAVAILABLE,
                        "The data store is unreachable",
                    ),
                    _ => (StatusCode::SERVICE_UNAVAILABLE, "A store error occurred"),
                };
                (status, "store_unavailable", message.to_string(), None)
            }
            AppError::NotFound(message) => (StatusCode::NOT_FOUND, "not_found", message, None),
            AppError::Configuration(message) => {
                // 認可系の前提が壊れている状態。既定スコープで握りつぶさず必ず失敗させる
                error!(message = %message, "Organization model is misconfigured");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "configuration_error",
                    message,
                    None,
                )
            }
            AppError::ValidationError(message) => {
                (StatusCode::BAD_REQUEST, "validation_error", message, None)
            }
            AppError::ValidationErrors(errors) => (
                StatusCode::BAD_REQUEST,
                "validation_errors",
                "Validation failed".to_string(),
                Some(errors),
            ),
            AppError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, "bad_request", message, None)
            }
            AppError::Conflict(message) => (StatusCode::CONFLICT, "conflict", message, None),
            AppError::InternalServerError(message) => {
                error!(message = %message, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_server_error",
                    "An internal server error occurred".to_string(),
                    None,
                )
            }
        };

        let body = ErrorResponse {
            success: false,
            error_type,
            message,
            errors,
        };

        (status, Json(body)).into_response()
    }
}

impl From<crate::utils::password::PasswordError> for AppError {
    fn from(err: crate::utils::password::PasswordError) -> Self {
        use crate::utils::password::PasswordError;
        match err {
            PasswordError::WeakPassword(message) => {
                AppError::ValidationError(format!("password: {}", message))
            }
            other => AppError::InternalServerError(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        let response = AppError::NotFound("User not found".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn configuration_error_maps_to_500() {
        let response =
            AppError::Configuration("Current user has no role assignment".to_string())
                .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn store_failure_maps_to_503() {
        let response =
            AppError::StoreUnavailable(DbErr::Conn(sea_orm::RuntimeErr::Internal(
                "connection refused".to_string(),
            )))
            .into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn validation_errors_map_to_400() {
        let response = AppError::ValidationErrors(vec![
            "email: Invalid email format".to_string(),
            "full_name: Must be 1-255 characters".to_string(),
        ])
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
