// src/api/dto/permission_dto.rs

use crate::service::permission_service::CreatePermissionInput;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

/// パーミッション作成リクエスト
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePermissionRequest {
    #[validate(length(min = 1, max = 100, message = "Permission name must be 1-100 characters"))]
    pub name: String,

    #[validate(length(min = 1, max = 200, message = "Route name must be 1-200 characters"))]
    pub route_name: String,

    #[validate(length(max = 500, message = "Description cannot exceed 500 characters"))]
    pub description: Option<String>,
}

impl CreatePermissionRequest {
    pub fn into_service_input(self) -> CreatePermissionInput {
        CreatePermissionInput {
            name: self.name,
            route_name: self.route_name,
            description: self.description,
        }
    }
}

/// ロール・ユーザーへの付与リクエスト
#[derive(Debug, Clone, Deserialize)]
pub struct AssignPermissionRequest {
    pub permission_id: Uuid,
}
