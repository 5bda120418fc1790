// src/service/department_service.rs

use crate::domain::department_model::Model as Department;
use crate::domain::role_model::Model as Role;
use crate::error::{AppError, AppResult};
use crate::repository::department_repository::DepartmentRepository;
use chrono::Utc;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// 部門作成の入力
#[derive(Debug, Clone)]
pub struct CreateDepartmentInput {
    pub name: String,
    pub description: Option<String>,
}

/// 部門更新の入力
#[derive(Debug, Clone, Default)]
pub struct UpdateDepartmentInput {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// 部門とそのロール一覧
#[derive(Debug, Clone)]
pub struct DepartmentWithRoles {
    pub department: Department,
    pub roles: Vec<Role>,
}

/// 部門管理サービス
pub struct DepartmentService {
    department_repo: Arc<DepartmentRepository>,
}

impl DepartmentService {
    pub fn new(department_repo: Arc<DepartmentRepository>) -> Self {
        Self { department_repo }
    }

    /// 部門を作成（アクティブな部門間で名前の重複は不可）
    pub async fn create_department(&self, input: CreateDepartmentInput) -> AppResult<Department> {
        if let Some(_existing) = self.department_repo.find_by_name(&input.name).await? {
            return Err(AppError::Conflict(
                "Department with this name already exists".to_string(),
            ));
        }

        let department = Department {
            id: Uuid::new_v4(),
            name: input.name,
            description: input.description,
            deleted_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let created = self.department_repo.create(&department).await?;

        info!(department_id = %created.id, name = %created.name, "Department created successfully");

        Ok(created)
    }

    /// 部門を更新
    pub async fn update_department(
        &self,
        department_id: Uuid,
        input: UpdateDepartmentInput,
    ) -> AppResult<Department> {
        if let Some(new_name) = &input.name {
            if let Some(existing) = self.department_repo.find_by_name(new_name).await? {
                if existing.id != department_id {
                    return Err(AppError::Conflict(
                        "Department with this name already exists".to_string(),
                    ));
                }
            }
        }

        let updated = self
            .department_repo
            .update(department_id, input.name, input.description)
            .await?
            .ok_or_else(|| AppError::NotFound("Department not found".to_string()))?;

        info!(department_id = %department_id, "Department updated successfully");

        Ok(updated)
    }

    /// アクティブな部門一覧を取得
    pub async fn list_departments(&self) -> AppResult<Vec<Department>> {
        self.department_repo.find_all_active().await
    }

    /// 部門をロール一覧付きで取得
    pub async fn get_department_with_roles(
        &self,
        department_id: Uuid,
    ) -> AppResult<DepartmentWithRoles> {
        let department = self
            .department_repo
            .find_by_id(department_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Department not found".to_string()))?;

        let roles = self.department_repo.find_roles(department_id).await?;

        Ok(DepartmentWithRoles { department, roles })
    }

    /// 部門をソフトデリート
    pub async fn delete_department(&self, department_id: Uuid) -> AppResult<()> {
        let deleted = self.department_repo.soft_delete(department_id).await?;
        if !deleted {
            return Err(AppError::NotFound("Department not found".to_string()));
        }

        info!(department_id = %department_id, "Department deleted successfully");
        Ok(())
    }
}
