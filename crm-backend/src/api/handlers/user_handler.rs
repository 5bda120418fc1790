// src/api/handlers/user_handler.rs

use crate::api::dto::user_dto::*;
use crate::api::AppState;
use crate::domain::user_model::{SafeUser, UserStatus};
use crate::error::AppResult;
use crate::hierarchy::HierarchyNode;
use crate::middleware::CallerId;
use crate::types::{ApiResponse, PaginatedResponse};
use crate::utils::error_helper::{convert_validation_errors, validation_error};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, patch, post},
    Json, Router,
};
use uuid::Uuid;
use validator::Validate;

/// ユーザー作成
pub async fn create_user_handler(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<SafeUser>>)> {
    payload
        .validate()
        .map_err(|e| convert_validation_errors(e, "create_user_handler"))?;

    let user = app_state
        .user_service
        .create_user(payload.into_service_input())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("User created successfully", user)),
    ))
}

/// ユーザー一覧取得（呼び出し元の可視範囲内のみ）
pub async fn list_users_handler(
    State(app_state): State<AppState>,
    caller: CallerId,
    Query(query): Query<ListUsersQuery>,
) -> AppResult<Json<ApiResponse<PaginatedResponse<SafeUser>>>> {
    let users = app_state
        .user_service
        .list_users(
            caller.user_id(),
            query.scope_query(),
            &query.pagination(),
            &query.sort(),
        )
        .await?;

    Ok(Json(ApiResponse::success(
        "Users retrieved successfully",
        users,
    )))
}

/// ユーザー詳細取得
pub async fn get_user_handler(
    State(app_state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<SafeUser>>> {
    let user = app_state.user_service.get_user(user_id).await?;

    Ok(Json(ApiResponse::success(
        "User retrieved successfully",
        user,
    )))
}

/// ユーザー更新
pub async fn update_user_handler(
    State(app_state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(payload): Json<UpdateUserRequest>,
) -> AppResult<Json<ApiResponse<SafeUser>>> {
    payload
        .validate()
        .map_err(|e| convert_validation_errors(e, "update_user_handler"))?;

    let user = app_state
        .user_service
        .update_user(user_id, payload.into_service_input())
        .await?;

    Ok(Json(ApiResponse::success(
        "User updated successfully",
        user,
    )))
}

/// ユーザーステータス変更
pub async fn update_user_status_handler(
    State(app_state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(payload): Json<UpdateUserStatusRequest>,
) -> AppResult<Json<ApiResponse<SafeUser>>> {
    let status = UserStatus::from_str(&payload.status)
        .ok_or_else(|| validation_error("status", "must be ACTIVE or INACTIVE"))?;

    let user = app_state
        .user_service
        .update_status(user_id, status)
        .await?;

    Ok(Json(ApiResponse::success(
        "User status updated successfully",
        user,
    )))
}

/// アクセスロール変更
pub async fn update_access_role_handler(
    State(app_state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(payload): Json<UpdateAccessRoleRequest>,
) -> AppResult<Json<ApiResponse<()>>> {
    app_state
        .user_service
        .update_access_role(user_id, payload.role_id)
        .await?;

    Ok(Json(ApiResponse::success_message(
        "User access role updated successfully",
    )))
}

/// プロフィール画像変更
pub async fn update_profile_image_handler(
    State(app_state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(payload): Json<UpdateProfileImageRequest>,
) -> AppResult<Json<ApiResponse<SafeUser>>> {
    let user = app_state
        .user_service
        .update_profile_image(user_id, payload.profile_image)
        .await?;

    Ok(Json(ApiResponse::success(
        "User profile image updated successfully",
        user,
    )))
}

/// 直属の部下一覧
pub async fn get_subordinates_handler(
    State(app_state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Vec<SubordinateResponse>>>> {
    let subordinates = app_state.user_service.get_subordinates(user_id).await?;

    let response: Vec<SubordinateResponse> = subordinates
        .into_iter()
        .map(SubordinateResponse::from)
        .collect();

    Ok(Json(ApiResponse::success(
        "Subordinates retrieved successfully",
        response,
    )))
}

/// 上位方向の階層パス
pub async fn get_hierarchy_path_handler(
    State(app_state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Vec<HierarchyNode>>>> {
    let path = app_state.user_service.get_hierarchy_path(user_id).await?;

    Ok(Json(ApiResponse::success(
        "Hierarchy path retrieved successfully",
        path,
    )))
}

// --- ルーター ---

/// ユーザールーターを作成
pub fn user_router(app_state: AppState) -> Router {
    Router::new()
        .route("/users", post(create_user_handler))
        .route("/users", get(list_users_handler))
        .route("/users/{id}", get(get_user_handler))
        .route("/users/{id}", patch(update_user_handler))
        .route("/users/{id}/status", patch(update_user_status_handler))
        .route("/users/{id}/access-role", patch(update_access_role_handler))
        .route(
            "/users/{id}/profile-image",
            patch(update_profile_image_handler),
        )
        .route("/users/{id}/subordinates", get(get_subordinates_handler))
        .route(
            "/users/{id}/hierarchy-path",
            get(get_hierarchy_path_handler),
        )
        .with_state(app_state)
}
