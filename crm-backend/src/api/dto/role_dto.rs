// src/api/dto/role_dto.rs

use crate::service::role_service::{CreateRoleInput, UpdateRoleInput};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

/// ロール作成リクエスト
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateRoleRequest {
    #[validate(length(min = 1, max = 100, message = "Role name must be 1-100 characters"))]
    pub name: String,

    #[validate(range(min = 1, message = "Rank must be a positive integer"))]
    pub rank: i32,

    pub department_id: Uuid,

    #[validate(length(max = 500, message = "Description cannot exceed 500 characters"))]
    pub description: Option<String>,
}

impl CreateRoleRequest {
    pub fn into_service_input(self) -> CreateRoleInput {
        CreateRoleInput {
            name: self.name,
            rank: self.rank,
            department_id: self.department_id,
            description: self.description,
        }
    }
}

/// ロール更新リクエスト
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateRoleRequest {
    #[validate(length(min = 1, max = 100, message = "Role name must be 1-100 characters"))]
    pub name: Option<String>,

    #[validate(range(min = 1, message = "Rank must be a positive integer"))]
    pub rank: Option<i32>,

    #[validate(length(max = 500, message = "Description cannot exceed 500 characters"))]
    pub description: Option<String>,
}

impl UpdateRoleRequest {
    pub fn into_service_input(self) -> UpdateRoleInput {
        UpdateRoleInput {
            name: self.name,
            rank: self.rank,
            description: self.description,
        }
    }
}

/// rank空き状況のクエリパラメータ
#[derive(Debug, Clone, Deserialize)]
pub struct RankAvailabilityQuery {
    pub department_id: Uuid,
    pub rank: i32,
}
