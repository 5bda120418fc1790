// src/api/handlers/role_handler.rs

use crate::api::dto::role_dto::*;
use crate::api::AppState;
use crate::domain::role_model::Model as Role;
use crate::error::AppResult;
use crate::hierarchy::RankAvailability;
use crate::types::ApiResponse;
use crate::utils::error_helper::convert_validation_errors;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, patch, post},
    Json, Router,
};
use uuid::Uuid;
use validator::Validate;

/// ロール作成
pub async fn create_role_handler(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateRoleRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Role>>)> {
    payload
        .validate()
        .map_err(|e| convert_validation_errors(e, "create_role_handler"))?;

    let role = app_state
        .role_service
        .create_role(payload.into_service_input())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("Role created successfully", role)),
    ))
}

/// ロール詳細取得
pub async fn get_role_handler(
    State(app_state): State<AppState>,
    Path(role_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Role>>> {
    let role = app_state.role_service.get_role(role_id).await?;

    Ok(Json(ApiResponse::success(
        "Role retrieved successfully",
        role,
    )))
}

/// ロール更新
pub async fn update_role_handler(
    State(app_state): State<AppState>,
    Path(role_id): Path<Uuid>,
    Json(payload): Json<UpdateRoleRequest>,
) -> AppResult<Json<ApiResponse<Role>>> {
    payload
        .validate()
        .map_err(|e| convert_validation_errors(e, "update_role_handler"))?;

    let role = app_state
        .role_service
        .update_role(role_id, payload.into_service_input())
        .await?;

    Ok(Json(ApiResponse::success(
        "Role updated successfully",
        role,
    )))
}

/// ロール削除（ソフトデリート）
pub async fn delete_role_handler(
    State(app_state): State<AppState>,
    Path(role_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<()>>> {
    app_state.role_service.delete_role(role_id).await?;

    Ok(Json(ApiResponse::success_message(
        "Role deleted successfully",
    )))
}

/// 部門内のrank空き状況
pub async fn check_rank_availability_handler(
    State(app_state): State<AppState>,
    Query(query): Query<RankAvailabilityQuery>,
) -> AppResult<Json<ApiResponse<RankAvailability>>> {
    let availability = app_state
        .role_service
        .check_rank_availability(query.department_id, query.rank)
        .await?;

    Ok(Json(ApiResponse::success(
        "Rank availability retrieved successfully",
        availability,
    )))
}

// --- ルーター ---

/// ロールルーターを作成
pub fn role_router(app_state: AppState) -> Router {
    Router::new()
        .route("/roles", post(create_role_handler))
        .route("/roles/rank-availability", get(check_rank_availability_handler))
        .route("/roles/{id}", get(get_role_handler))
        .route("/roles/{id}", patch(update_role_handler))
        .route("/roles/{id}", delete(delete_role_handler))
        .with_state(app_state)
}
