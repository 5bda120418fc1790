// src/middleware/caller.rs

use crate::error::AppError;
use axum::{extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

/// `x-user-id` ヘッダーの名前
pub const CALLER_ID_HEADER: &str = "x-user-id";

/// 呼び出し元ユーザーIDのExtractor
///
/// 認証基盤は上流（ゲートウェイ）の責務で、ここでは検証済みの
/// ユーザーIDがヘッダーで渡ってくる前提。ヘッダー欠落・不正は 400。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallerId(pub Uuid);

impl CallerId {
    pub fn user_id(&self) -> Uuid {
        self.0
    }
}

impl<S> FromRequestParts<S> for CallerId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(CALLER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| {
                AppError::BadRequest(format!("Missing '{}' header", CALLER_ID_HEADER))
            })?;

        let user_id = Uuid::parse_str(raw).map_err(|_| {
            AppError::BadRequest(format!("Invalid UUID in '{}' header", CALLER_ID_HEADER))
        })?;

        Ok(CallerId(user_id))
    }
}
