// src/service/role_service.rs

use crate::domain::role_model::{Model as Role, APEX_RANK};
use crate::error::{AppError, AppResult};
use crate::hierarchy::{HierarchyEngine, RankAvailability};
use crate::repository::department_repository::DepartmentRepository;
use crate::repository::role_repository::RoleRepository;
use chrono::Utc;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// ロール作成の入力
#[derive(Debug, Clone)]
pub struct CreateRoleInput {
    pub name: String,
    pub rank: i32,
    pub department_id: Uuid,
    pub description: Option<String>,
}

/// ロール更新の入力（許可フィールドのみ明示）
#[derive(Debug, Clone, Default)]
pub struct UpdateRoleInput {
    pub name: Option<String>,
    pub rank: Option<i32>,
    pub description: Option<String>,
}

/// ロール管理サービス
pub struct RoleService {
    role_repo: Arc<RoleRepository>,
    department_repo: Arc<DepartmentRepository>,
    hierarchy_engine: Arc<HierarchyEngine>,
}

impl RoleService {
    pub fn new(
        role_repo: Arc<RoleRepository>,
        department_repo: Arc<DepartmentRepository>,
        hierarchy_engine: Arc<HierarchyEngine>,
    ) -> Self {
        Self {
            role_repo,
            department_repo,
            hierarchy_engine,
        }
    }

    /// ロールを作成
    ///
    /// 同一部門内で名前またはrankが既存のアクティブなロールと衝突する場合は拒否する。
    pub async fn create_role(&self, input: CreateRoleInput) -> AppResult<Role> {
        if input.rank < APEX_RANK {
            return Err(AppError::ValidationError(
                "rank: must be a positive integer".to_string(),
            ));
        }

        self.department_repo
            .find_by_id(input.department_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Department not found".to_string()))?;

        if let Some(_existing) = self
            .role_repo
            .find_conflicting(input.department_id, Some(&input.name), Some(input.rank), None)
            .await?
        {
            return Err(AppError::Conflict(
                "A role with the same name or rank already exists in the department".to_string(),
            ));
        }

        let role = Role {
            id: Uuid::new_v4(),
            name: input.name,
            rank: input.rank,
            department_id: input.department_id,
            description: input.description,
            deleted_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let created = self.role_repo.create(&role).await?;

        info!(
            role_id = %created.id,
            department_id = %created.department_id,
            rank = %created.rank,
            "Role created successfully"
        );

        Ok(created)
    }

    /// ロールを更新
    pub async fn update_role(&self, role_id: Uuid, input: UpdateRoleInput) -> AppResult<Role> {
        let role = self
            .role_repo
            .find_by_id(role_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Role not found".to_string()))?;

        if let Some(rank) = input.rank {
            if rank < APEX_RANK {
                return Err(AppError::ValidationError(
                    "rank: must be a positive integer".to_string(),
                ));
            }
        }

        // 名前またはrankが変わる場合のみ衝突チェック（自分自身は除外）
        if input.name.is_some() || input.rank.is_some() {
            if let Some(_existing) = self
                .role_repo
                .find_conflicting(
                    role.department_id,
                    input.name.as_deref(),
                    input.rank,
                    Some(role.id),
                )
                .await?
            {
                return Err(AppError::Conflict(
                    "A role with the same name or rank already exists in the department"
                        .to_string(),
                ));
            }
        }

        let updated = self
            .role_repo
            .update(role_id, input.name, input.description, input.rank)
            .await?
            .ok_or_else(|| AppError::NotFound("Role not found".to_string()))?;

        info!(role_id = %role_id, "Role updated successfully");

        Ok(updated)
    }

    /// ロールをIDで取得
    pub async fn get_role(&self, role_id: Uuid) -> AppResult<Role> {
        self.role_repo
            .find_by_id(role_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Role not found".to_string()))
    }

    /// 部門のロール一覧を取得（rank昇順）
    pub async fn list_roles_by_department(&self, department_id: Uuid) -> AppResult<Vec<Role>> {
        self.department_repo
            .find_by_id(department_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Department not found".to_string()))?;

        self.role_repo.find_by_department_id(department_id).await
    }

    /// ロールをソフトデリート
    pub async fn delete_role(&self, role_id: Uuid) -> AppResult<()> {
        let deleted = self.role_repo.soft_delete(role_id).await?;
        if !deleted {
            return Err(AppError::NotFound("Role not found".to_string()));
        }

        info!(role_id = %role_id, "Role deleted successfully");
        Ok(())
    }

    /// 部門内のrank空き状況を取得
    pub async fn check_rank_availability(
        &self,
        department_id: Uuid,
        rank: i32,
    ) -> AppResult<RankAvailability> {
        self.department_repo
            .find_by_id(department_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Department not found".to_string()))?;

        self.hierarchy_engine
            .check_rank_availability(department_id, rank)
            .await
    }
}
