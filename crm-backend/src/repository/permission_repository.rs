// src/repository/permission_repository.rs

use crate::domain::permission_model::{
    ActiveModel as PermissionActiveModel, Column as PermissionColumn, Entity as PermissionEntity,
    Model as Permission,
};
use crate::domain::role_permission_model::{
    ActiveModel as RolePermissionActiveModel, Column as RolePermissionColumn,
    Entity as RolePermissionEntity,
};
use crate::domain::user_permission_model::{
    ActiveModel as UserPermissionActiveModel, Column as UserPermissionColumn,
    Entity as UserPermissionEntity,
};
use crate::error::AppResult;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

pub struct PermissionRepository {
    db: DatabaseConnection,
}

impl PermissionRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// パーミッションを作成
    pub async fn create(&self, permission: &Permission) -> AppResult<Permission> {
        let active_model = PermissionActiveModel {
            id: Set(permission.id),
            name: Set(permission.name.clone()),
            route_name: Set(permission.route_name.clone()),
            description: Set(permission.description.clone()),
            created_at: Set(permission.created_at),
            updated_at: Set(permission.updated_at),
        };

        let model = active_model.insert(&self.db).await?;
        Ok(model)
    }

    /// パーミッションをIDで取得
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Permission>> {
        let model = PermissionEntity::find_by_id(id).one(&self.db).await?;
        Ok(model)
    }

    /// パーミッションを名前で取得
    pub async fn find_by_name(&self, name: &str) -> AppResult<Option<Permission>> {
        let model = PermissionEntity::find()
            .filter(PermissionColumn::Name.eq(name))
            .one(&self.db)
            .await?;
        Ok(model)
    }

    /// パーミッション一覧を取得
    pub async fn find_all(&self) -> AppResult<Vec<Permission>> {
        let models = PermissionEntity::find()
            .order_by_asc(PermissionColumn::Name)
            .all(&self.db)
            .await?;
        Ok(models)
    }

    /// ロールにパーミッションを付与
    pub async fn assign_to_role(&self, role_id: Uuid, permission_id: Uuid) -> AppResult<()> {
        let mapping = RolePermissionActiveModel {
            id: Set(Uuid::new_v4()),
            role_id: Set(role_id),
            permission_id: Set(permission_id),
            created_at: Set(Utc::now()),
        };
        mapping.insert(&self.db).await?;
        Ok(())
    }

    /// ロールからパーミッションを剥奪
    pub async fn revoke_from_role(&self, role_id: Uuid, permission_id: Uuid) -> AppResult<bool> {
        let result = RolePermissionEntity::delete_many()
            .filter(RolePermissionColumn::RoleId.eq(role_id))
            .filter(RolePermissionColumn::PermissionId.eq(permission_id))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }

    /// ユーザーにパーミッションを直接付与
    pub async fn assign_to_user(&self, user_id: Uuid, permission_id: Uuid) -> AppResult<()> {
        let mapping = UserPermissionActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            permission_id: Set(permission_id),
            created_at: Set(Utc::now()),
        };
        mapping.insert(&self.db).await?;
        Ok(())
    }

    /// ユーザーから直接付与パーミッションを剥奪
    pub async fn revoke_from_user(&self, user_id: Uuid, permission_id: Uuid) -> AppResult<bool> {
        let result = UserPermissionEntity::delete_many()
            .filter(UserPermissionColumn::UserId.eq(user_id))
            .filter(UserPermissionColumn::PermissionId.eq(permission_id))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }

    /// ロール経由で付与されたパーミッション一覧を取得
    pub async fn find_by_role_ids(&self, role_ids: &[Uuid]) -> AppResult<Vec<Permission>> {
        let permission_ids: Vec<Uuid> = RolePermissionEntity::find()
            .filter(RolePermissionColumn::RoleId.is_in(role_ids.to_vec()))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|m| m.permission_id)
            .collect();

        let models = PermissionEntity::find()
            .filter(PermissionColumn::Id.is_in(permission_ids))
            .all(&self.db)
            .await?;
        Ok(models)
    }

    /// ユーザーに直接付与されたパーミッション一覧を取得
    pub async fn find_direct_by_user_id(&self, user_id: Uuid) -> AppResult<Vec<Permission>> {
        let permission_ids: Vec<Uuid> = UserPermissionEntity::find()
            .filter(UserPermissionColumn::UserId.eq(user_id))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|m| m.permission_id)
            .collect();

        let models = PermissionEntity::find()
            .filter(PermissionColumn::Id.is_in(permission_ids))
            .all(&self.db)
            .await?;
        Ok(models)
    }

    /// 既にロールへ付与済みかチェック
    pub async fn is_assigned_to_role(&self, role_id: Uuid, permission_id: Uuid) -> AppResult<bool> {
        let existing = RolePermissionEntity::find()
            .filter(RolePermissionColumn::RoleId.eq(role_id))
            .filter(RolePermissionColumn::PermissionId.eq(permission_id))
            .one(&self.db)
            .await?;
        Ok(existing.is_some())
    }

    /// 既にユーザーへ直接付与済みかチェック
    pub async fn is_assigned_to_user(&self, user_id: Uuid, permission_id: Uuid) -> AppResult<bool> {
        let existing = UserPermissionEntity::find()
            .filter(UserPermissionColumn::UserId.eq(user_id))
            .filter(UserPermissionColumn::PermissionId.eq(permission_id))
            .one(&self.db)
            .await?;
        Ok(existing.is_some())
    }
}
