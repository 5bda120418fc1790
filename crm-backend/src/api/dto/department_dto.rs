// src/api/dto/department_dto.rs

use crate::service::department_service::{CreateDepartmentInput, UpdateDepartmentInput};
use serde::Deserialize;
use validator::Validate;

/// 部門作成リクエスト
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateDepartmentRequest {
    #[validate(length(min = 1, max = 100, message = "Department name must be 1-100 characters"))]
    pub name: String,

    #[validate(length(max = 500, message = "Description cannot exceed 500 characters"))]
    pub description: Option<String>,
}

impl CreateDepartmentRequest {
    pub fn into_service_input(self) -> CreateDepartmentInput {
        CreateDepartmentInput {
            name: self.name,
            description: self.description,
        }
    }
}

/// 部門更新リクエスト
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateDepartmentRequest {
    #[validate(length(min = 1, max = 100, message = "Department name must be 1-100 characters"))]
    pub name: Option<String>,

    #[validate(length(max = 500, message = "Description cannot exceed 500 characters"))]
    pub description: Option<String>,
}

impl UpdateDepartmentRequest {
    pub fn into_service_input(self) -> UpdateDepartmentInput {
        UpdateDepartmentInput {
            name: self.name,
            description: self.description,
        }
    }
}
