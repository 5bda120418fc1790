// src/api/handlers/department_handler.rs

use crate::api::dto::department_dto::*;
use crate::api::AppState;
use crate::domain::department_model::Model as Department;
use crate::domain::role_model::Model as Role;
use crate::error::AppResult;
use crate::types::ApiResponse;
use crate::utils::error_helper::convert_validation_errors;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, patch, post},
    Json, Router,
};
use serde::Serialize;
use uuid::Uuid;
use validator::Validate;

/// 部門詳細レスポンス（ロール一覧付き）
#[derive(Debug, Serialize)]
pub struct DepartmentDetailResponse {
    #[serde(flatten)]
    pub department: Department,
    pub roles: Vec<Role>,
}

/// 部門作成
pub async fn create_department_handler(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateDepartmentRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Department>>)> {
    payload
        .validate()
        .map_err(|e| convert_validation_errors(e, "create_department_handler"))?;

    let department = app_state
        .department_service
        .create_department(payload.into_service_input())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            "Department created successfully",
            department,
        )),
    ))
}

/// 部門一覧取得
pub async fn list_departments_handler(
    State(app_state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<Department>>>> {
    let departments = app_state.department_service.list_departments().await?;

    Ok(Json(ApiResponse::success(
        "Departments retrieved successfully",
        departments,
    )))
}

/// 部門詳細取得（所属ロール付き）
pub async fn get_department_handler(
    State(app_state): State<AppState>,
    Path(department_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<DepartmentDetailResponse>>> {
    let detail = app_state
        .department_service
        .get_department_with_roles(department_id)
        .await?;

    Ok(Json(ApiResponse::success(
        "Department retrieved successfully",
        DepartmentDetailResponse {
            department: detail.department,
            roles: detail.roles,
        },
    )))
}

/// 部門配下のロール一覧
pub async fn list_department_roles_handler(
    State(app_state): State<AppState>,
    Path(department_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Vec<Role>>>> {
    let roles = app_state
        .role_service
        .list_roles_by_department(department_id)
        .await?;

    Ok(Json(ApiResponse::success(
        "Roles retrieved successfully",
        roles,
    )))
}

/// 部門更新
pub async fn update_department_handler(
    State(app_state): State<AppState>,
    Path(department_id): Path<Uuid>,
    Json(payload): Json<UpdateDepartmentRequest>,
) -> AppResult<Json<ApiResponse<Department>>> {
    payload
        .validate()
        .map_err(|e| convert_validation_errors(e, "update_department_handler"))?;

    let department = app_state
        .department_service
        .update_department(department_id, payload.into_service_input())
        .await?;

    Ok(Json(ApiResponse::success(
        "Department updated successfully",
        department,
    )))
}

/// 部門削除（ソフトデリート）
pub async fn delete_department_handler(
    State(app_state): State<AppState>,
    Path(department_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<()>>> {
    app_state
        .department_service
        .delete_department(department_id)
        .await?;

    Ok(Json(ApiResponse::success_message(
        "Department deleted successfully",
    )))
}

// --- ルーター ---

/// 部門ルーターを作成
pub fn department_router(app_state: AppState) -> Router {
    Router::new()
        .route("/departments", post(create_department_handler))
        .route("/departments", get(list_departments_handler))
        .route("/departments/{id}", get(get_department_handler))
        .route("/departments/{id}", patch(update_department_handler))
        .route("/departments/{id}", delete(delete_department_handler))
        .route(
            "/departments/{id}/roles",
            get(list_department_roles_handler),
        )
        .with_state(app_state)
}
