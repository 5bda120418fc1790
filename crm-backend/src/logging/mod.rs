// src/logging/mod.rs

use axum::{body::Body, http::Request, middleware::Next, response::Response};
use std::time::Instant;
use uuid::Uuid;

use crate::middleware::CALLER_ID_HEADER;

/// リクエストの開始・完了を構造化ログに記録するミドルウェア
///
/// リクエストごとにrequest_idを採番する。呼び出し元IDは上流ゲートウェイが
/// 付与するヘッダーから読むだけで、ここでは検証しない。
pub async fn request_logging(req: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let request_id = Uuid::new_v4();
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let caller_id = req
        .headers()
        .get(CALLER_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);

    tracing::info!(
        request_id = %request_id,
        method = %method,
        path = %path,
        caller_id = caller_id.as_deref(),
        "Request started"
    );

    let response = next.run(req).await;

    let status = response.status().as_u16();
    let duration_ms = start.elapsed().as_millis() as u64;

    if status >= 500 {
        tracing::error!(
            request_id = %request_id,
            method = %method,
            path = %path,
            status,
            duration_ms,
            caller_id = caller_id.as_deref(),
            "Request completed"
        );
    } else if status >= 400 {
        tracing::warn!(
            request_id = %request_id,
            method = %method,
            path = %path,
            status,
            duration_ms,
            caller_id = caller_id.as_deref(),
            "Request completed"
        );
    } else {
        tracing::info!(
            request_id = %request_id,
            method = %method,
            path = %path,
            status,
            duration_ms,
            caller_id = caller_id.as_deref(),
            "Request completed"
        );
    }

    response
}
