// src/api/handlers/permission_handler.rs

use crate::api::dto::permission_dto::*;
use crate::api::AppState;
use crate::domain::permission_model::Model as Permission;
use crate::error::AppResult;
use crate::types::ApiResponse;
use crate::utils::error_helper::convert_validation_errors;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use uuid::Uuid;
use validator::Validate;

/// パーミッション作成
pub async fn create_permission_handler(
    State(app_state): State<AppState>,
    Json(payload): Json<CreatePermissionRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Permission>>)> {
    payload
        .validate()
        .map_err(|e| convert_validation_errors(e, "create_permission_handler"))?;

    let permission = app_state
        .permission_service
        .create_permission(payload.into_service_input())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            "Permission created successfully",
            permission,
        )),
    ))
}

/// パーミッション一覧取得
pub async fn list_permissions_handler(
    State(app_state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<Permission>>>> {
    let permissions = app_state.permission_service.list_permissions().await?;

    Ok(Json(ApiResponse::success(
        "Permissions retrieved successfully",
        permissions,
    )))
}

/// パーミッション詳細取得
pub async fn get_permission_handler(
    State(app_state): State<AppState>,
    Path(permission_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Permission>>> {
    let permission = app_state
        .permission_service
        .get_permission(permission_id)
        .await?;

    Ok(Json(ApiResponse::success(
        "Permission retrieved successfully",
        permission,
    )))
}

/// ロールへ付与
pub async fn assign_permission_to_role_handler(
    State(app_state): State<AppState>,
    Path(role_id): Path<Uuid>,
    Json(payload): Json<AssignPermissionRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<()>>)> {
    app_state
        .permission_service
        .assign_to_role(role_id, payload.permission_id)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_message(
            "Permission assigned to role successfully",
        )),
    ))
}

/// ロールから剥奪
pub async fn revoke_permission_from_role_handler(
    State(app_state): State<AppState>,
    Path((role_id, permission_id)): Path<(Uuid, Uuid)>,
) -> AppResult<Json<ApiResponse<()>>> {
    app_state
        .permission_service
        .revoke_from_role(role_id, permission_id)
        .await?;

    Ok(Json(ApiResponse::success_message(
        "Permission revoked from role successfully",
    )))
}

/// ユーザーへ直接付与
pub async fn assign_permission_to_user_handler(
    State(app_state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(payload): Json<AssignPermissionRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<()>>)> {
    app_state
        .permission_service
        .assign_to_user(user_id, payload.permission_id)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_message(
            "Permission assigned to user successfully",
        )),
    ))
}

/// ユーザーから直接付与を剥奪
pub async fn revoke_permission_from_user_handler(
    State(app_state): State<AppState>,
    Path((user_id, permission_id)): Path<(Uuid, Uuid)>,
) -> AppResult<Json<ApiResponse<()>>> {
    app_state
        .permission_service
        .revoke_from_user(user_id, permission_id)
        .await?;

    Ok(Json(ApiResponse::success_message(
        "Permission revoked from user successfully",
    )))
}

/// ユーザーの実効パーミッション一覧
pub async fn get_effective_permissions_handler(
    State(app_state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Vec<Permission>>>> {
    let permissions = app_state
        .permission_service
        .effective_permissions(user_id)
        .await?;

    Ok(Json(ApiResponse::success(
        "Effective permissions retrieved successfully",
        permissions,
    )))
}

// --- ルーター ---

/// パーミッションルーターを作成
pub fn permission_router(app_state: AppState) -> Router {
    Router::new()
        .route("/permissions", post(create_permission_handler))
        .route("/permissions", get(list_permissions_handler))
        .route("/permissions/{id}", get(get_permission_handler))
        .route(
            "/roles/{id}/permissions",
            post(assign_permission_to_role_handler),
        )
        .route(
            "/roles/{role_id}/permissions/{permission_id}",
            delete(revoke_permission_from_role_handler),
        )
        .route(
            "/users/{id}/permissions",
            post(assign_permission_to_user_handler),
        )
        .route(
            "/users/{user_id}/permissions/{permission_id}",
            delete(revoke_permission_from_user_handler),
        )
        .route(
            "/users/{id}/effective-permissions",
            get(get_effective_permissions_handler),
        )
        .with_state(app_state)
}
