// src/service/permission_service.rs

use crate::domain::permission_model::Model as Permission;
use crate::error::{AppError, AppResult};
use crate::hierarchy::HierarchyStore;
use crate::repository::permission_repository::PermissionRepository;
use crate::repository::role_repository::RoleRepository;
use crate::repository::user_repository::UserRepository;
use chrono::Utc;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// パーミッション作成の入力
#[derive(Debug, Clone)]
pub struct CreatePermissionInput {
    pub name: String,
    pub route_name: String,
    pub description: Option<String>,
}

/// パーミッション管理サービス
///
/// 実効パーミッション = ロール経由の付与 ∪ 直接付与（重複排除）。
pub struct PermissionService {
    permission_repo: Arc<PermissionRepository>,
    role_repo: Arc<RoleRepository>,
    user_repo: Arc<UserRepository>,
    hierarchy_store: Arc<dyn HierarchyStore>,
}

impl PermissionService {
    pub fn new(
        permission_repo: Arc<PermissionRepository>,
        role_repo: Arc<RoleRepository>,
        user_repo: Arc<UserRepository>,
        hierarchy_store: Arc<dyn HierarchyStore>,
    ) -> Self {
        Self {
            permission_repo,
            role_repo,
            user_repo,
            hierarchy_store,
        }
    }

    /// パーミッションを作成（名前はグローバルに一意）
    pub async fn create_permission(&self, input: CreatePermissionInput) -> AppResult<Permission> {
        if self
            .permission_repo
            .find_by_name(&input.name)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(
                "Permission with this name already exists".to_string(),
            ));
        }

        let permission = Permission {
            id: Uuid::new_v4(),
            name: input.name,
            route_name: input.route_name,
            description: input.description,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let created = self.permission_repo.create(&permission).await?;

        info!(permission_id = %created.id, name = %created.name, "Permission created successfully");

        Ok(created)
    }

    /// パーミッション一覧を取得
    pub async fn list_permissions(&self) -> AppResult<Vec<Permission>> {
        self.permission_repo.find_all().await
    }

    /// パーミッションを取得
    pub async fn get_permission(&self, permission_id: Uuid) -> AppResult<Permission> {
        self.permission_repo
            .find_by_id(permission_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Permission not found".to_string()))
    }

    /// ロールにパーミッションを付与
    pub async fn assign_to_role(&self, role_id: Uuid, permission_id: Uuid) -> AppResult<()> {
        self.role_repo
            .find_by_id(role_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Role not found".to_string()))?;
        self.get_permission(permission_id).await?;

        if self
            .permission_repo
            .is_assigned_to_role(role_id, permission_id)
            .await?
        {
            return Err(AppError::Conflict(
                "Permission is already assigned to this role".to_string(),
            ));
        }

        self.permission_repo
            .assign_to_role(role_id, permission_id)
            .await?;

        info!(role_id = %role_id, permission_id = %permission_id, "Permission assigned to role");

        Ok(())
    }

    /// ロールからパーミッションを剥奪
    pub async fn revoke_from_role(&self, role_id: Uuid, permission_id: Uuid) -> AppResult<()> {
        let revoked = self
            .permission_repo
            .revoke_from_role(role_id, permission_id)
            .await?;
        if !revoked {
            return Err(AppError::NotFound(
                "Permission is not assigned to this role".to_string(),
            ));
        }

        info!(role_id = %role_id, permission_id = %permission_id, "Permission revoked from role");

        Ok(())
    }

    /// ユーザーにパーミッションを直接付与
    pub async fn assign_to_user(&self, user_id: Uuid, permission_id: Uuid) -> AppResult<()> {
        self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
        self.get_permission(permission_id).await?;

        if self
            .permission_repo
            .is_assigned_to_user(user_id, permission_id)
            .await?
        {
            return Err(AppError::Conflict(
                "Permission is already assigned to this user".to_string(),
            ));
        }

        self.permission_repo
            .assign_to_user(user_id, permission_id)
            .await?;

        info!(user_id = %user_id, permission_id = %permission_id, "Permission assigned to user");

        Ok(())
    }

    /// ユーザーから直接付与のパーミッションを剥奪（ロール経由の付与は残る）
    pub async fn revoke_from_user(&self, user_id: Uuid, permission_id: Uuid) -> AppResult<()> {
        let revoked = self
            .permission_repo
            .revoke_from_user(user_id, permission_id)
            .await?;
        if !revoked {
            return Err(AppError::NotFound(
                "Permission is not directly assigned to this user".to_string(),
            ));
        }

        info!(user_id = %user_id, permission_id = %permission_id, "Permission revoked from user");

        Ok(())
    }

    /// ユーザーの実効パーミッションを取得（ロール経由 ∪ 直接付与）
    pub async fn effective_permissions(&self, user_id: Uuid) -> AppResult<Vec<Permission>> {
        self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let roles = self.hierarchy_store.find_user_roles(user_id).await?;
        let role_ids: Vec<Uuid> = roles.iter().map(|r| r.id).collect();

        let via_roles = self.permission_repo.find_by_role_ids(&role_ids).await?;
        let direct = self.permission_repo.find_direct_by_user_id(user_id).await?;

        let mut seen = HashSet::new();
        let mut permissions = Vec::new();
        for permission in via_roles.into_iter().chain(direct) {
            if seen.insert(permission.id) {
                permissions.push(permission);
            }
        }

        Ok(permissions)
    }
}
